//! Read path: simulated calls decoded into rental records.
//!
//! Every read query is the same three steps: marshal positional arguments,
//! simulate the call, decode stack slot 0. [`invoke_and_decode`] does the
//! last two so the queries only differ in method name, arguments and
//! whether slot 0 holds one record or a list.

use crate::collab::LedgerRpc;
use crate::contract::ContractHandle;
use crate::param::ContractParam;
use crate::stack::StackItem;
use crate::Result;

pub const GET_RENT: &str = "getRent";
pub const GET_RENT_LIST: &str = "getRentList";
pub const GET_RENT_LIST_AS_OWNER: &str = "getRentListAsOwner";
pub const GET_RENT_LIST_AS_TENANT: &str = "getRentListAsTenant";

/// Simulate `method` and decode the first stack slot with `decode`.
///
/// A missing slot is decoded as `Any`.
#[tracing::instrument(skip_all, fields(method = method))]
pub async fn invoke_and_decode<R, T>(
    rpc: &R,
    handle: &ContractHandle,
    method: &str,
    params: &[ContractParam],
    decode: impl FnOnce(&StackItem) -> T,
) -> Result<T>
where
    R: LedgerRpc + ?Sized,
{
    let result = handle.test_invoke(rpc, method, params).await?;
    Ok(decode(result.slot(0)))
}

/// Pagination cursor argument; the contract has no optional parameters so an
/// omitted cursor is sent as zero.
pub fn cursor_param(from_index: Option<u64>) -> ContractParam {
    ContractParam::integer(from_index.unwrap_or(0))
}

/// Arguments of `getRent`: the token id travels as an Integer.
pub fn get_rent_params(token_id: &str) -> Result<Vec<ContractParam>> {
    Ok(vec![ContractParam::integer_from_str(token_id)?])
}

pub fn get_rent_list_params(from_index: Option<u64>) -> Vec<ContractParam> {
    vec![cursor_param(from_index)]
}

/// Arguments of the per-account list queries.
pub fn account_list_params(
    address: &str,
    from_index: Option<u64>,
    address_version: u8,
) -> Result<Vec<ContractParam>> {
    Ok(vec![
        ContractParam::hash160(address, address_version)?,
        cursor_param(from_index),
    ])
}
