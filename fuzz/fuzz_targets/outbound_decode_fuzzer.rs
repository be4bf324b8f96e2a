//! Fuzz target for outbound batch decoding
//!
//! The surface payload is attacker-adjacent input: malformed JSON, type
//! confusion (wrong field types for a known tag), unknown tags, and deep
//! nesting must all come back as errors, never as panics. A decodable
//! element surrounded by garbage must still decode.

#![no_main]

use libfuzzer_sys::fuzz_target;
use weft_proto::decode_outbound_batch;

fuzz_target!(|data: &[u8]| {
    let Ok(payload) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(results) = decode_outbound_batch(payload) else {
        return;
    };

    // Per-element isolation: a batch that parses as an array yields one
    // result per element, errors included.
    for result in results {
        let _ = result;
    }
});
