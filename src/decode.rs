//! Stack item → [`Rent`] decoding.
//!
//! The contract returns a rental as a 13-slot array with no field names, so
//! the position of each field is the only schema. Positions live in
//! [`layout`]; everything else reads through it.
//!
//! Decoding is total: a value of the wrong shape, or a slot that cannot be
//! converted, yields `None` for that record. List decoding keeps the good
//! records and drops the rest.

use crate::hash::{Address, ScriptHash, DEFAULT_ADDRESS_VERSION};
use crate::rent::{Rent, RentState};
use crate::stack::StackItem;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use tracing::debug;

/// Slot positions of a rental record.
pub mod layout {
    pub const TOKEN_ID: usize = 0;
    pub const OWNER: usize = 1;
    pub const TENANT: usize = 2;
    pub const NFT_SCRIPT_HASH: usize = 3;
    pub const NFT_TOKEN_ID: usize = 4;
    pub const PRICE: usize = 5;
    pub const BALANCE: usize = 6;
    pub const AMOUNT: usize = 7;
    pub const STATE: usize = 8;
    pub const DURATION: usize = 9;
    pub const CREATED_ON: usize = 10;
    pub const RENTED_ON: usize = 11;
    pub const CLOSED_ON: usize = 12;

    /// Number of slots in a well-formed record.
    pub const FIELD_COUNT: usize = 13;
}

/// Decodes rental records, deriving addresses under one address version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentDecoder {
    address_version: u8,
}

impl Default for RentDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS_VERSION)
    }
}

impl RentDecoder {
    pub fn new(address_version: u8) -> Self {
        Self { address_version }
    }

    /// Decode one record, or `None` if `item` is not a well-formed rental.
    pub fn decode(&self, item: &StackItem) -> Option<Rent> {
        let fields = item.as_items()?;
        if fields.len() != layout::FIELD_COUNT {
            return None;
        }

        Some(Rent {
            token_id: ascii_text(&fields[layout::TOKEN_ID])?,
            owner: self.address(&fields[layout::OWNER])?,
            tenant: self.optional_address(&fields[layout::TENANT])?,
            nft_script_hash: self.address(&fields[layout::NFT_SCRIPT_HASH])?,
            nft_token_id: token_id_text(&fields[layout::NFT_TOKEN_ID])?,
            price: unsigned(&fields[layout::PRICE])?,
            balance: unsigned(&fields[layout::BALANCE])?,
            amount: unsigned(&fields[layout::AMOUNT])?,
            state: RentState(fields[layout::STATE].as_integer()?.to_u32()?),
            duration: u64_field(&fields[layout::DURATION])?,
            created_on: u64_field(&fields[layout::CREATED_ON])?,
            rented_on: u64_field(&fields[layout::RENTED_ON])?,
            closed_on: u64_field(&fields[layout::CLOSED_ON])?,
        })
    }

    /// Decode every well-formed record of an array, in order.
    ///
    /// Anything that is not an array decodes to an empty list.
    pub fn decode_list(&self, item: &StackItem) -> Vec<Rent> {
        let Some(elements) = item.as_items() else {
            return Vec::new();
        };

        let rents: Vec<Rent> = elements.iter().filter_map(|e| self.decode(e)).collect();
        if rents.len() < elements.len() {
            debug!(
                "Dropped {} malformed rent entries out of {}",
                elements.len() - rents.len(),
                elements.len()
            );
        }
        rents
    }

    fn address(&self, item: &StackItem) -> Option<Address> {
        let hash = ScriptHash::from_le_slice(item.as_bytes()?)?;
        Some(hash.to_address(self.address_version))
    }

    /// Outer `None` means malformed, inner `None` means no tenant.
    fn optional_address(&self, item: &StackItem) -> Option<Option<Address>> {
        if item.is_null_or_empty() {
            return Some(None);
        }
        self.address(item).map(Some)
    }
}

/// Decode with the default address version.
pub fn decode_rent(item: &StackItem) -> Option<Rent> {
    RentDecoder::default().decode(item)
}

/// Decode a list with the default address version.
pub fn decode_rent_list(item: &StackItem) -> Vec<Rent> {
    RentDecoder::default().decode_list(item)
}

// ── field helpers ────────────────────────────────────────────────────────────

/// Bytes read one char per byte.
fn ascii_text(item: &StackItem) -> Option<String> {
    item.as_bytes()
        .map(|bytes| bytes.iter().map(|&b| char::from(b)).collect())
}

/// Byte strings read as text; small ids may arrive as plain scalars.
fn token_id_text(item: &StackItem) -> Option<String> {
    match item {
        StackItem::ByteString(_) | StackItem::Buffer(_) => ascii_text(item),
        StackItem::Integer(value) => Some(value.to_string()),
        StackItem::Boolean(flag) => Some(flag.to_string()),
        StackItem::Any
        | StackItem::Pointer(_)
        | StackItem::Array(_)
        | StackItem::Struct(_)
        | StackItem::Map(_)
        | StackItem::InteropInterface => None,
    }
}

fn unsigned(item: &StackItem) -> Option<BigUint> {
    item.as_integer()?.to_biguint()
}

fn u64_field(item: &StackItem) -> Option<u64> {
    item.as_integer()?.to_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn hash_bytes(seed: u8) -> Vec<u8> {
        (0..20).map(|i| seed.wrapping_add(i)).collect()
    }

    fn int(v: i64) -> StackItem {
        StackItem::Integer(BigInt::from(v))
    }

    fn record(tenant: StackItem, nft_token_id: StackItem) -> Vec<StackItem> {
        vec![
            StackItem::ByteString(b"7".to_vec()),
            StackItem::ByteString(hash_bytes(1)),
            tenant,
            StackItem::ByteString(hash_bytes(100)),
            nft_token_id,
            int(250_000_000),
            int(0),
            int(0),
            int(1),
            int(86_400_000),
            int(1_650_000_000_000),
            int(0),
            int(0),
        ]
    }

    fn expected_address(seed: u8) -> Address {
        ScriptHash::from_le_slice(&hash_bytes(seed))
            .unwrap()
            .to_address(DEFAULT_ADDRESS_VERSION)
    }

    #[test]
    fn decodes_well_formed_record() {
        let item = StackItem::Array(record(
            StackItem::ByteString(vec![]),
            StackItem::ByteString(b"nft-9".to_vec()),
        ));
        let rent = decode_rent(&item).unwrap();

        assert_eq!(rent.token_id, "7");
        assert_eq!(rent.owner, expected_address(1));
        assert_eq!(rent.tenant, None);
        assert_eq!(rent.nft_script_hash, expected_address(100));
        assert_eq!(rent.nft_token_id, "nft-9");
        assert_eq!(rent.price, BigUint::from(250_000_000u64));
        assert_eq!(rent.state, RentState(1));
        assert_eq!(rent.duration, 86_400_000);
        assert_eq!(rent.created_on, 1_650_000_000_000);
        assert!(!rent.is_rented());
        assert!(!rent.is_closed());
    }

    #[test]
    fn struct_records_decode_too() {
        let item = StackItem::Struct(record(StackItem::Any, int(3)));
        assert!(decode_rent(&item).is_some());
    }

    #[test]
    fn tenant_present_is_derived_address() {
        let item = StackItem::Array(record(StackItem::ByteString(hash_bytes(50)), int(3)));
        let rent = decode_rent(&item).unwrap();
        assert_eq!(rent.tenant, Some(expected_address(50)));
        assert!(rent.has_tenant());
    }

    #[test]
    fn tenant_null_is_absent() {
        let item = StackItem::Array(record(StackItem::Any, int(3)));
        assert_eq!(decode_rent(&item).unwrap().tenant, None);
    }

    #[test]
    fn nft_token_id_follows_wire_type() {
        let item = StackItem::Array(record(StackItem::Any, int(42)));
        assert_eq!(decode_rent(&item).unwrap().nft_token_id, "42");

        let item = StackItem::Array(record(StackItem::Any, StackItem::Array(vec![])));
        assert!(decode_rent(&item).is_none());
    }

    #[test]
    fn wrong_arity_is_absent() {
        let mut fields = record(StackItem::Any, int(1));
        fields.pop();
        assert!(decode_rent(&StackItem::Array(fields.clone())).is_none());
        fields.push(int(0));
        fields.push(int(0));
        assert!(decode_rent(&StackItem::Array(fields)).is_none());
    }

    #[test]
    fn non_arrays_are_absent() {
        assert!(decode_rent(&StackItem::Any).is_none());
        assert!(decode_rent(&int(13)).is_none());
        assert!(decode_rent(&StackItem::ByteString(vec![0; 13])).is_none());
    }

    #[test]
    fn bad_slots_make_the_record_absent() {
        let mut short_hash = record(StackItem::Any, int(1));
        short_hash[layout::OWNER] = StackItem::ByteString(vec![1; 19]);
        assert!(decode_rent(&StackItem::Array(short_hash)).is_none());

        let mut negative_price = record(StackItem::Any, int(1));
        negative_price[layout::PRICE] = int(-5);
        assert!(decode_rent(&StackItem::Array(negative_price)).is_none());
    }

    #[test]
    fn list_keeps_good_records_in_order() {
        let first = StackItem::Array(record(StackItem::Any, int(1)));
        let second = StackItem::Array(record(StackItem::Any, int(2)));
        let list = StackItem::Array(vec![
            first,
            StackItem::Array(vec![int(1)]),
            StackItem::Any,
            second,
        ]);

        let rents = decode_rent_list(&list);
        assert_eq!(rents.len(), 2);
        assert_eq!(rents[0].nft_token_id, "1");
        assert_eq!(rents[1].nft_token_id, "2");
    }

    #[test]
    fn list_of_non_array_is_empty() {
        assert!(decode_rent_list(&StackItem::Any).is_empty());
        assert!(decode_rent_list(&int(5)).is_empty());
    }

    #[test]
    fn serialises_like_the_dapp_record() {
        let item = StackItem::Array(record(StackItem::Any, int(3)));
        let json = serde_json::to_value(decode_rent(&item).unwrap()).unwrap();
        assert_eq!(json["tokenId"], "7");
        assert_eq!(json["tenant"], serde_json::Value::Null);
        assert_eq!(json["price"], "250000000");
        assert_eq!(json["createdOn"], 1_650_000_000_000u64);
    }
}
