//! Fuzz target for the JSON record-array reader.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::input::parse_records;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let _ = parse_records(data);
});
