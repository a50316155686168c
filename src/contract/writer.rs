//! Write path: signed calls relayed through the user's wallet.

use crate::collab::{TxId, WalletProvider, WalletResult};
use crate::hash::ScriptHash;
use crate::param::ContractParam;
use crate::{Error, Result};
use num_bigint::BigInt;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{info, warn};

pub const CREATE_TOKEN: &str = "createToken";

/// Scale a decimal price into integer GAS fractions, rounding up.
///
/// Fractions of the smallest unit round up.
pub fn scale_price(price: Decimal, gas_precision: u64) -> Result<BigInt> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(Error::InvalidArgument(format!(
            "price must not be negative: {}",
            price
        )));
    }
    let scaled = price
        .checked_mul(Decimal::from(gas_precision))
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "price {} overflows at precision {}",
                price, gas_precision
            ))
        })?;
    scaled
        .ceil()
        .to_i128()
        .map(BigInt::from)
        .ok_or_else(|| Error::InvalidArgument(format!("price {} is out of range", price)))
}

/// Arguments of `createToken(UInt160, ByteString, BigInteger, ulong)`.
pub fn create_token_params(
    nft_script_hash: &str,
    nft_token_id: &str,
    price: Decimal,
    duration: u64,
    gas_precision: u64,
    address_version: u8,
) -> Result<Vec<ContractParam>> {
    let nft_contract = ScriptHash::parse(nft_script_hash, address_version)
        .map_err(|e| Error::InvalidArgument(e.to_string()))?;

    Ok(vec![
        ContractParam::address(&nft_contract.to_address(address_version)),
        ContractParam::string(nft_token_id),
        ContractParam::Integer(scale_price(price, gas_precision)?),
        ContractParam::integer(duration),
    ])
}

/// Relay a call through `wallet` and extract the transaction id.
///
/// A wallet-reported error message aborts with [`Error::Invocation`]. A
/// reply carrying neither an id nor a message yields `None`.
#[tracing::instrument(skip_all, fields(method = method))]
pub async fn submit<W: WalletProvider + ?Sized>(
    wallet: &W,
    contract: &ScriptHash,
    method: &str,
    params: &[ContractParam],
) -> Result<Option<TxId>> {
    info!("Submitting {} to {}", method, contract);
    let response = wallet.invoke_function(contract, method, params).await?;

    if let Some(message) = response.result.error_message() {
        warn!("Wallet rejected {}: {}", method, message);
        return Err(Error::Invocation(message.to_string()));
    }

    match response.result {
        WalletResult::TxId(tx_id) => {
            info!("{} relayed as {}", method, tx_id);
            Ok(Some(tx_id))
        }
        WalletResult::Failure { .. } => {
            warn!("Wallet returned neither a transaction id nor an error message");
            Ok(None)
        }
    }
}
