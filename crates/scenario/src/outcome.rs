//! Per-run scenario results.

use std::fmt;

use serde::Serialize;

use tfprobe_core::types::{ProvisioningOutputs, QueryErrorPolicy, QueryStatus};

use crate::verify::VerificationReport;

/// Lifecycle phase reached by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioPhase {
    Init,
    Provisioned,
    Queried,
    Verified,
    Failed,
    TornDown,
}

impl fmt::Display for ScenarioPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::Provisioned => "provisioned",
            Self::Queried => "queried",
            Self::Verified => "verified",
            Self::Failed => "failed",
            Self::TornDown => "torn_down",
        };
        f.write_str(name)
    }
}

/// Why a run failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    /// Initialization or apply failed.
    Provision { reason: String },
    /// An output could not be read or interpreted.
    Output { reason: String },
    /// The inventory query failed under a fatal policy.
    Query { command: String, reason: String },
    /// The query output lacked one or more expected substrings.
    Verification { missing: Vec<String> },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provision { reason } => write!(f, "provisioning failed: {reason}"),
            Self::Output { reason } => write!(f, "reading outputs failed: {reason}"),
            Self::Query { reason, .. } => write!(f, "query failed: {reason}"),
            Self::Verification { missing } => {
                write!(f, "{} expected substring(s) missing: ", missing.len())?;
                let quoted: Vec<String> = missing.iter().map(|s| format!("{s:?}")).collect();
                f.write_str(&quoted.join(", "))
            }
        }
    }
}

/// Result of the teardown step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TeardownStatus {
    Completed,
    Failed { reason: String },
}

impl TeardownStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Query details captured for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRecord {
    pub command: String,
    pub status: QueryStatus,
    pub policy: QueryErrorPolicy,
}

/// Everything observed during one scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: String,
    /// Unique per run; correlates log lines.
    pub run_id: String,
    /// Phases reached, in order. Always ends with `TornDown`.
    pub phases: Vec<ScenarioPhase>,
    pub outputs: ProvisioningOutputs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
    pub teardown: TeardownStatus,
    pub duration_ms: u64,
}

impl ScenarioOutcome {
    /// A run passes only if every phase succeeded, including teardown.
    pub fn passed(&self) -> bool {
        self.failure.is_none() && self.teardown.is_completed()
    }

    /// Last phase before teardown.
    pub fn terminal_phase(&self) -> ScenarioPhase {
        self.phases
            .iter()
            .rev()
            .copied()
            .find(|phase| *phase != ScenarioPhase::TornDown)
            .unwrap_or(ScenarioPhase::Init)
    }

    /// Human-readable failure lines; empty when the run passed.
    pub fn failure_messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        match (&self.failure, &self.verification) {
            (Some(Failure::Verification { .. }), Some(report)) => {
                messages.extend(report.mismatch_messages());
            }
            (Some(failure), _) => messages.push(failure.to_string()),
            (None, _) => {}
        }
        if let TeardownStatus::Failed { reason } = &self.teardown {
            messages.push(format!("teardown failed: {reason}"));
        }
        messages
    }
}
