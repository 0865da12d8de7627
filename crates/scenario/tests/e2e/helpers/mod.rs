//! Shared E2E test helpers.
//!
//! Provides a counting stub provisioner, scripted command runners and
//! outcome assertions.

pub mod assertions;
pub mod stub_provisioner;
pub mod stub_runner;
