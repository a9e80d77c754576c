#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // The parser must reject malformed input with an error, never panic.
        for strict in [true, false] {
            let _ = vmodc_syntax::parse(s, strict);
        }
    }
});
