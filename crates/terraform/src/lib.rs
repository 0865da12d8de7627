//! Terraform 프로비저너 어댑터
//!
//! [`TerraformProvisioner`]는 `tfprobe_core::pipeline::Provisioner`를 구현하며,
//! 모든 Terraform 호출을 `CommandRunner`를 통해 실행합니다.
//!
//! # Module Structure
//!
//! - [`error`]: 도메인 에러 타입 (`TerraformError`)
//! - [`options`]: 시나리오별 명령 인자 구성 (`TerraformOptions`, `Subcommand`)
//! - [`retry`]: 재시도 가능한 에러 판별 (`RetryPolicy`)
//! - [`provisioner`]: `Provisioner` 구현 (`TerraformProvisioner`)
//!
//! # Architecture
//!
//! ```text
//! ScenarioConfig --from_scenario()--> TerraformOptions
//!                                          |
//!                             init -> apply -> output -> destroy
//!                                          |
//!                            RetryPolicy (output regex match)
//!                                          |
//!                                   CommandRunner.run()
//! ```

pub mod error;
pub mod options;
pub mod provisioner;
pub mod retry;

pub use error::TerraformError;
pub use options::{Subcommand, TerraformOptions};
pub use provisioner::TerraformProvisioner;
pub use retry::RetryPolicy;
