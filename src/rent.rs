use crate::hash::Address;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage code of a rental, as stored by the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RentState(pub u32);

impl fmt::Display for RentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rental record held by the contract.
///
/// Built only by [`crate::decode`]; every query returns fresh values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rent {
    pub token_id: String,
    pub owner: Address,
    /// `None` until someone rents the token.
    pub tenant: Option<Address>,
    pub nft_script_hash: Address,
    pub nft_token_id: String,
    #[serde(with = "biguint_text")]
    pub price: BigUint,
    #[serde(with = "biguint_text")]
    pub balance: BigUint,
    #[serde(with = "biguint_text")]
    pub amount: BigUint,
    pub state: RentState,
    /// Milliseconds.
    pub duration: u64,
    pub created_on: u64,
    /// Zero until rented.
    pub rented_on: u64,
    /// Zero until closed.
    pub closed_on: u64,
}

impl Rent {
    pub fn has_tenant(&self) -> bool {
        self.tenant.is_some()
    }

    pub fn is_rented(&self) -> bool {
        self.rented_on != 0
    }

    pub fn is_closed(&self) -> bool {
        self.closed_on != 0
    }
}

mod biguint_text {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
