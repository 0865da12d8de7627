//! Fully-qualified cloud function identifier parsing.
//!
//! Identifiers look like
//! `projects/<project>/locations/<region>/functions/<name>`.
//! Segments are taken by fixed position; no structural validation is done.

use std::fmt;
use std::str::FromStr;

use tfprobe_core::error::ParseError;

/// Position of the region segment.
pub const REGION_INDEX: usize = 3;
/// Position of the short function name segment.
pub const NAME_INDEX: usize = 5;
/// Minimum number of `/`-separated segments.
pub const MIN_SEGMENTS: usize = NAME_INDEX + 1;

/// A parsed function identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionIdentifier {
    full: String,
    region: String,
    name: String,
}

impl FunctionIdentifier {
    /// Split `full` on `/` and pick the region and name by position.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::TooFewSegments`] when fewer than
    /// [`MIN_SEGMENTS`] segments are present.
    pub fn parse(full: &str) -> Result<Self, ParseError> {
        let segments: Vec<&str> = full.split('/').collect();
        if segments.len() < MIN_SEGMENTS {
            return Err(ParseError::TooFewSegments {
                identifier: full.to_owned(),
                found: segments.len(),
                required: MIN_SEGMENTS,
            });
        }

        Ok(Self {
            full: full.to_owned(),
            region: segments[REGION_INDEX].to_owned(),
            name: segments[NAME_INDEX].to_owned(),
        })
    }

    pub fn full(&self) -> &str {
        &self.full
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for FunctionIdentifier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FunctionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}
