#![no_main]

use libfuzzer_sys::fuzz_target;
use rentfuse::{decode_rent, decode_rent_list, StackItem};

fuzz_target!(|data: &[u8]| {
    if let Ok(item) = serde_json::from_slice::<StackItem>(data) {
        let _ = decode_rent(&item);
        let _ = decode_rent_list(&item);
    }
});
