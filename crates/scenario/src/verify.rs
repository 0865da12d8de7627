//! Substring verification of inventory output.
//!
//! Every expectation is checked; a missing substring does not stop the
//! remaining checks, so all mismatches are reported together.

use serde::Serialize;

use tfprobe_core::types::Expectation;

/// Result of checking one captured output against an [`Expectation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Substrings that were required, in order.
    pub expected: Vec<String>,
    /// Substrings absent from the output, in expectation order.
    pub missing: Vec<String>,
    /// The captured combined output.
    pub output: String,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }

    /// One line per missing substring.
    pub fn mismatch_messages(&self) -> Vec<String> {
        self.missing
            .iter()
            .map(|want| format!("output {:?} does not contain {:?}", self.output, want))
            .collect()
    }
}

/// Check that `output` contains every expected substring.
pub fn verify(output: &str, expectation: &Expectation) -> VerificationReport {
    let missing = expectation
        .substrings()
        .iter()
        .filter(|want| !output.contains(want.as_str()))
        .cloned()
        .collect();

    VerificationReport {
        expected: expectation.substrings().to_vec(),
        missing,
        output: output.to_owned(),
    }
}
