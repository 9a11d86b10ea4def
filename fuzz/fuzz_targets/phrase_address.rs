#![no_main]

use libfuzzer_sys::fuzz_target;
use keyward_core::derive_address;

fuzz_target!(|data: &[u8]| {
    // Any UTF-8 phrase yields a seed; address derivation returns Ok or Err.
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = derive_address(s);
    }
});
