// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz the normalizer with arbitrary bytes parsed as JSON.
//!
//! Totality is the whole contract: whatever shape the payload takes, the
//! chain must return exactly one canonical error and never panic.
#![no_main]
use cerr_core::CanonicalError;
use cerr_normalize::{normalize, normalize_with};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(s) else {
        // Non-JSON text is still a valid string payload.
        let err = normalize(s);
        assert_eq!(err.message, s);
        return;
    };

    let err = normalize(value.clone());
    assert!(!err.name.is_empty());

    // A custom fallback never changes totality.
    let fallback = CanonicalError::new("fuzz fallback").with_field("marker", 1);
    let with_custom = normalize_with(value, fallback);
    assert!(!with_custom.name.is_empty());

    // Whatever came out must survive a serde round-trip.
    let json = serde_json::to_string(&err).expect("canonical errors serialize");
    let back: CanonicalError = serde_json::from_str(&json).expect("and deserialize");
    assert_eq!(back, err);
});
