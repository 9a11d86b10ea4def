#![no_main]

use libfuzzer_sys::fuzz_target;
use keyward_core::decrypt_mnemonic;

fuzz_target!(|data: &[u8]| {
    // Arbitrary stored blobs must fail cleanly, never panic.
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = decrypt_mnemonic(s, "", "fuzz-wallet");
    }
});
