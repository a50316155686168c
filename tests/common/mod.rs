#![allow(dead_code)]

use num_bigint::BigInt;
use rentfuse::{ContractConfig, RentFuseContract, StackItem};
use rentfuse_mock::{MockLedger, MockNotificationIndex};
use std::sync::Arc;

pub const CONTRACT_HEX: &str = "0x8e1ca363695a3f762d1bd840e43c8b4a719d0e2f";

pub fn hash_bytes(seed: u8) -> Vec<u8> {
    (0..20).map(|i| seed.wrapping_add(i)).collect()
}

pub fn int(v: i64) -> StackItem {
    StackItem::Integer(BigInt::from(v))
}

/// A well-formed 13-slot rental as the contract returns it.
pub fn rent_item(token_id: &str, tenant: Option<u8>) -> StackItem {
    StackItem::Struct(vec![
        StackItem::ByteString(token_id.as_bytes().to_vec()),
        StackItem::ByteString(hash_bytes(1)),
        tenant.map_or(StackItem::Any, |seed| StackItem::ByteString(hash_bytes(seed))),
        StackItem::ByteString(hash_bytes(100)),
        StackItem::ByteString(format!("nft-{}", token_id).into_bytes()),
        int(100_000_000),
        int(0),
        int(0),
        int(0),
        int(3_600_000),
        int(1_650_000_000_000),
        int(0),
        int(0),
    ])
}

pub fn connector(
    ledger: Arc<MockLedger>,
    index: Arc<MockNotificationIndex>,
) -> RentFuseContract<MockLedger, MockNotificationIndex> {
    RentFuseContract::new(ContractConfig::default(), ledger, index)
}
