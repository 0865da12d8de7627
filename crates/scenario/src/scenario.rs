//! Scenario definitions.
//!
//! A [`Scenario`] names the infrastructure it applies, the outputs it reads,
//! the inventory query it runs, and the substrings that query must return.
//! The runner drives every scenario through the same lifecycle.

use tfprobe_core::config::{HarnessConfig, ScenarioSection};
use tfprobe_core::error::{ConfigError, ProbeError, ProvisionError};
use tfprobe_core::types::{Expectation, ProvisioningOutputs, QueryErrorPolicy, ScenarioConfig};
use tfprobe_inventory::InventoryQuery;

use crate::identifier::FunctionIdentifier;

/// One provision / verify / teardown case.
pub trait Scenario: Send + Sync {
    /// Short name used in logs, metrics and reports.
    fn name(&self) -> &str;

    /// Infrastructure definition to apply.
    fn config(&self) -> &ScenarioConfig;

    /// Outputs to read after apply, in order.
    fn output_names(&self) -> Vec<&str>;

    /// Build the inventory query from the outputs read after apply.
    fn query(&self, outputs: &ProvisioningOutputs) -> Result<InventoryQuery, ProbeError>;

    /// Substrings the query output must contain.
    fn expectation(&self, outputs: &ProvisioningOutputs) -> Result<Expectation, ProbeError>;

    /// What a failed query means for the run.
    fn query_error_policy(&self) -> QueryErrorPolicy;
}

fn required_output<'o>(outputs: &'o ProvisioningOutputs, name: &str) -> Result<&'o str, ProbeError> {
    outputs.get(name).ok_or_else(|| {
        ProvisionError::Output {
            name: name.to_owned(),
            reason: "output was not read".to_owned(),
        }
        .into()
    })
}

// --- bucket ---------------------------------------------------------

/// Provisions a storage bucket and checks it shows up in a storage listing.
#[derive(Debug, Clone)]
pub struct BucketScenario {
    config: ScenarioConfig,
    output: String,
    policy: QueryErrorPolicy,
}

impl BucketScenario {
    pub const NAME: &'static str = "bucket";
    pub const DEFAULT_OUTPUT: &'static str = "bucket_url";

    pub fn new(config: ScenarioConfig) -> Self {
        Self {
            config,
            output: Self::DEFAULT_OUTPUT.to_owned(),
            policy: QueryErrorPolicy::Fatal,
        }
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_policy(mut self, policy: QueryErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn from_section(section: &ScenarioSection) -> Self {
        Self::new(section.scenario_config())
            .with_output(section.output.clone())
            .with_policy(section.query_error_policy.unwrap_or(QueryErrorPolicy::Fatal))
    }
}

impl Scenario for BucketScenario {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    fn output_names(&self) -> Vec<&str> {
        vec![self.output.as_str()]
    }

    fn query(&self, _outputs: &ProvisioningOutputs) -> Result<InventoryQuery, ProbeError> {
        Ok(InventoryQuery::ListStorage)
    }

    fn expectation(&self, outputs: &ProvisioningOutputs) -> Result<Expectation, ProbeError> {
        let url = required_output(outputs, &self.output)?;
        Ok(Expectation::new([url]))
    }

    fn query_error_policy(&self) -> QueryErrorPolicy {
        self.policy
    }
}

// --- function -------------------------------------------------------

/// Provisions a storage-triggered cloud function and checks it can be
/// described by name in its region.
#[derive(Debug, Clone)]
pub struct FunctionTriggerScenario {
    config: ScenarioConfig,
    output: String,
    policy: QueryErrorPolicy,
}

impl FunctionTriggerScenario {
    pub const NAME: &'static str = "function";
    pub const DEFAULT_OUTPUT: &'static str = "cloud_function";

    pub fn new(config: ScenarioConfig) -> Self {
        Self {
            config,
            output: Self::DEFAULT_OUTPUT.to_owned(),
            policy: QueryErrorPolicy::Tolerate,
        }
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_policy(mut self, policy: QueryErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn from_section(section: &ScenarioSection) -> Self {
        Self::new(section.scenario_config())
            .with_output(section.output.clone())
            .with_policy(
                section
                    .query_error_policy
                    .unwrap_or(QueryErrorPolicy::Tolerate),
            )
    }

    fn identifier(&self, outputs: &ProvisioningOutputs) -> Result<FunctionIdentifier, ProbeError> {
        let full = required_output(outputs, &self.output)?;
        Ok(FunctionIdentifier::parse(full)?)
    }
}

impl Scenario for FunctionTriggerScenario {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    fn output_names(&self) -> Vec<&str> {
        vec![self.output.as_str()]
    }

    fn query(&self, outputs: &ProvisioningOutputs) -> Result<InventoryQuery, ProbeError> {
        let id = self.identifier(outputs)?;
        Ok(InventoryQuery::DescribeFunction {
            name: id.name().to_owned(),
            region: id.region().to_owned(),
        })
    }

    fn expectation(&self, outputs: &ProvisioningOutputs) -> Result<Expectation, ProbeError> {
        let id = self.identifier(outputs)?;
        Ok(Expectation::new([format!("name: {}", id.full())]))
    }

    fn query_error_policy(&self) -> QueryErrorPolicy {
        self.policy
    }
}

/// Build the named scenario from its `[scenarios.<name>]` section.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownScenario`] for names other than
/// `bucket` and `function`.
pub fn from_config(config: &HarnessConfig, name: &str) -> Result<Box<dyn Scenario>, ConfigError> {
    let section = config.scenario(name)?;
    match name {
        BucketScenario::NAME => Ok(Box::new(BucketScenario::from_section(section))),
        FunctionTriggerScenario::NAME => Ok(Box::new(FunctionTriggerScenario::from_section(section))),
        other => Err(ConfigError::UnknownScenario(other.to_owned())),
    }
}
