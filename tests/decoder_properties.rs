//! Property tests: the rent decoder is total over arbitrary stack items.

use num_bigint::BigInt;
use proptest::prelude::*;
use rentfuse::{decode_rent, decode_rent_list, StackItem};

fn scalar() -> impl Strategy<Value = StackItem> {
    prop_oneof![
        Just(StackItem::Any),
        any::<bool>().prop_map(StackItem::Boolean),
        any::<i64>().prop_map(|v| StackItem::Integer(BigInt::from(v))),
        prop::collection::vec(any::<u8>(), 0..40).prop_map(StackItem::ByteString),
    ]
}

fn stack_item() -> impl Strategy<Value = StackItem> {
    scalar().prop_recursive(3, 64, 16, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..16).prop_map(StackItem::Array),
            prop::collection::vec(inner, 0..16).prop_map(StackItem::Struct),
        ]
    })
}

fn well_formed() -> StackItem {
    let hash = StackItem::ByteString(vec![7; 20]);
    let zero = StackItem::Integer(BigInt::from(0));
    StackItem::Array(vec![
        StackItem::ByteString(b"1".to_vec()),
        hash.clone(),
        StackItem::Any,
        hash,
        StackItem::Integer(BigInt::from(1)),
        zero.clone(),
        zero.clone(),
        zero.clone(),
        zero.clone(),
        zero.clone(),
        zero.clone(),
        zero.clone(),
        zero,
    ])
}

proptest! {
    #[test]
    fn decode_never_panics(item in stack_item()) {
        let _ = decode_rent(&item);
        let _ = decode_rent_list(&item);
    }

    #[test]
    fn only_thirteen_slot_arrays_decode(items in prop::collection::vec(scalar(), 0..30)) {
        let len = items.len();
        let decoded = decode_rent(&StackItem::Array(items));
        if len != 13 {
            prop_assert!(decoded.is_none());
        }
    }

    #[test]
    fn scalars_never_decode(item in scalar()) {
        prop_assert!(decode_rent(&item).is_none());
        prop_assert!(decode_rent_list(&item).is_empty());
    }

    #[test]
    fn list_length_counts_well_formed_entries(mask in prop::collection::vec(any::<bool>(), 0..20)) {
        let elements: Vec<StackItem> = mask
            .iter()
            .map(|&good| if good { well_formed() } else { StackItem::Array(vec![StackItem::Any]) })
            .collect();
        let expected = mask.iter().filter(|&&good| good).count();
        prop_assert_eq!(decode_rent_list(&StackItem::Array(elements)).len(), expected);
    }
}
