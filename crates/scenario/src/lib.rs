//! Scenario harness: provision infrastructure, query live inventory,
//! assert on the output, and always tear down.
//!
//! # Module Structure
//!
//! - [`identifier`]: fully-qualified cloud function identifier parsing
//! - [`verify`]: substring expectations and accumulated mismatches
//! - [`guard`]: scoped teardown (`DeprovisionGuard`)
//! - [`scenario`]: the `Scenario` trait and the bucket / function scenarios
//! - [`outcome`]: phases, failures and the per-run result
//! - [`runner`]: the linear scenario pipeline (`ScenarioRunner`)
//!
//! # Lifecycle
//!
//! ```text
//! Init -> Provisioned -> Queried -> Verified | Failed -> TornDown
//!   |                                                      ^
//!   +---------------- DeprovisionGuard (armed) ------------+
//! ```

pub mod guard;
pub mod identifier;
pub mod outcome;
pub mod runner;
pub mod scenario;
pub mod verify;

pub use guard::DeprovisionGuard;
pub use identifier::FunctionIdentifier;
pub use outcome::{Failure, ScenarioOutcome, ScenarioPhase, TeardownStatus};
pub use runner::ScenarioRunner;
pub use scenario::{BucketScenario, FunctionTriggerScenario, Scenario, from_config};
pub use verify::{VerificationReport, verify};
