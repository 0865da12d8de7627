//! E2E tests for tfprobe-scenario.
//!
//! These tests drive whole scenario runs against stub provisioners and
//! stub command runners, checking teardown guarantees, verification
//! results and query error handling.
//!
//! # Test Structure
//!
//! - `helpers/` -- Shared test utilities (stub provisioner, stub runners, assertions)
//! - `scenarios/` -- Test files organized by scenario
//!
//! # Running
//!
//! ```bash
//! cargo test -p tfprobe-scenario --test e2e
//! ```

mod helpers;
mod scenarios;
