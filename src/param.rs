//! Typed contract invocation parameters.
//!
//! Both the ledger RPC (for simulated calls) and the wallet (for signed calls)
//! take arguments as `{"type": "...", "value": ...}` pairs. Integers travel as
//! decimal strings so arbitrary precision survives the JSON hop.

use crate::hash::{Address, ScriptHash};
use crate::{Error, Result};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};

/// One positional argument to a contract method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractParam {
    Integer(BigInt),
    Hash160(ScriptHash),
    /// Script hash given in address form, resolved by the wallet.
    Address(String),
    String(String),
    Boolean(bool),
    ByteArray(Vec<u8>),
}

impl ContractParam {
    pub fn integer(value: impl Into<BigInt>) -> Self {
        ContractParam::Integer(value.into())
    }

    /// Integer parameter from decimal text.
    pub fn integer_from_str(text: &str) -> Result<Self> {
        text.trim()
            .parse::<BigInt>()
            .map(ContractParam::Integer)
            .map_err(|e| Error::InvalidArgument(format!("{:?} is not an integer: {}", text, e)))
    }

    /// 160-bit hash parameter from an address or hex script hash.
    pub fn hash160(text: &str, address_version: u8) -> Result<Self> {
        ScriptHash::parse(text, address_version).map(ContractParam::Hash160)
    }

    pub fn address(address: &Address) -> Self {
        ContractParam::Address(address.to_string())
    }

    pub fn string(value: impl Into<String>) -> Self {
        ContractParam::String(value.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ContractParam::Integer(_) => "Integer",
            ContractParam::Hash160(_) => "Hash160",
            ContractParam::Address(_) => "Address",
            ContractParam::String(_) => "String",
            ContractParam::Boolean(_) => "Boolean",
            ContractParam::ByteArray(_) => "ByteArray",
        }
    }
}

impl Serialize for ContractParam {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ContractParam", 2)?;
        state.serialize_field("type", self.type_name())?;
        match self {
            ContractParam::Integer(value) => state.serialize_field("value", &value.to_string())?,
            ContractParam::Hash160(hash) => state.serialize_field("value", &hash.to_string())?,
            ContractParam::Address(text) | ContractParam::String(text) => {
                state.serialize_field("value", text)?
            }
            ContractParam::Boolean(flag) => state.serialize_field("value", flag)?,
            ContractParam::ByteArray(bytes) => {
                use base64::Engine;
                let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
                state.serialize_field("value", &encoded)?
            }
        }
        state.end()
    }
}
