//! tfprobe 공통 크레이트
//!
//! 시나리오 하네스가 공유하는 타입, 외부 협력자(trait), 에러, 설정을 정의합니다.
//! 프로비저닝 엔진(Terraform)과 인벤토리 CLI(gcloud)는 이 크레이트의
//! [`Provisioner`]와 [`CommandRunner`] trait 뒤에 숨겨집니다.

pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{CommandError, ConfigError, ParseError, ProbeError, ProvisionError, QueryError};

// 설정
pub use config::HarnessConfig;

// 외부 협력자 trait
pub use pipeline::{CommandRunner, Provisioner};

// 도메인 타입
pub use types::{
    CommandOutput, CommandSpec, Expectation, InventoryResult, ProvisioningOutputs,
    QueryErrorPolicy, QueryStatus, ScenarioConfig,
};
