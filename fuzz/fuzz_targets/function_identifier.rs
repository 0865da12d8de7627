#![no_main]

use libfuzzer_sys::fuzz_target;
use tfprobe_core::error::ParseError;
use tfprobe_scenario::FunctionIdentifier;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let segments: Vec<&str> = input.split('/').collect();
        match FunctionIdentifier::parse(input) {
            Ok(id) => {
                assert_eq!(id.region(), segments[3]);
                assert_eq!(id.name(), segments[5]);
                assert_eq!(id.full(), input);
            }
            Err(ParseError::TooFewSegments { found, required, .. }) => {
                assert_eq!(found, segments.len());
                assert!(found < required);
            }
        }
    }
});
