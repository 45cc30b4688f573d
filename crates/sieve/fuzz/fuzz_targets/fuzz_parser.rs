//! Fuzz target for the delimited-text reader.
//!
//! The parser must never panic on malformed input, whatever delimiter it
//! detects, and anything it accepts must survive the full pipeline.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::{CleaningConfig, CleaningPipeline, Parser};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok((dataset, _)) = Parser::new().parse_bytes(data) {
        let _ = CleaningPipeline::new(CleaningConfig::all()).run(dataset);
    }
});
