#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tfprobe_core::types::Expectation;
use tfprobe_scenario::verify;

#[derive(Debug, Arbitrary)]
struct VerifyInput {
    output: String,
    expected: Vec<String>,
}

fuzz_target!(|input: VerifyInput| {
    let report = verify(&input.output, &Expectation::new(input.expected.iter()));
    for missing in &report.missing {
        assert!(!input.output.contains(missing.as_str()));
    }
    assert_eq!(report.expected.len(), input.expected.len());
});
