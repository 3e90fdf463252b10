#![no_main]

use libfuzzer_sys::fuzz_target;
use senml::{Format, decode, encode};

fuzz_target!(|data: &[u8]| {
    let Ok(pack) = decode(data, Format::Json) else {
        return;
    };

    // Whatever decodes must encode and decode back to the same pack.
    let bytes = encode(&pack, Format::Json).expect("decoded pack should encode");
    let again = decode(&bytes, Format::Json).expect("encoded pack should decode");
    assert_eq!(again.len(), pack.len());

    if let Ok(resolved) = pack.resolve() {
        assert_eq!(resolved.len(), pack.len());
        assert!(resolved.iter().all(|r| !r.name.is_empty()));
    }
});
