//! Terraform 어댑터 에러 타입
//!
//! `From<TerraformError> for ProbeError` 변환이 구현되어 있어
//! `Provisioner` 구현에서 `?` 연산자로 그대로 전파할 수 있습니다.

use tfprobe_core::error::{ConfigError, ProbeError, ProvisionError};

use crate::options::Subcommand;

/// Terraform 어댑터 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum TerraformError {
    /// 하위 명령이 실패 상태로 종료
    #[error("terraform {subcommand} failed in '{dir}' after {attempts} attempt(s) ({status}): {output}")]
    CommandFailed {
        /// 실패한 하위 명령
        subcommand: Subcommand,
        /// 인프라 정의 디렉토리
        dir: String,
        /// 실행 횟수 (첫 시도 포함)
        attempts: u32,
        /// 종료 상태
        status: String,
        /// 결합 출력 (앞뒤 공백 제거)
        output: String,
    },

    /// 출력값 JSON 디코딩 실패
    #[error("failed to decode output '{name}': {reason}")]
    OutputDecode {
        /// 출력값 이름
        name: String,
        /// 실패 사유
        reason: String,
    },

    /// 재시도 패턴 컴파일 실패
    #[error("invalid retryable error pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// 정규식
        pattern: String,
        /// 실패 사유
        reason: String,
    },
}

impl From<TerraformError> for ProbeError {
    fn from(err: TerraformError) -> Self {
        let reason = err.to_string();
        match err {
            TerraformError::CommandFailed {
                subcommand, dir, ..
            } => match subcommand {
                Subcommand::Init => ProbeError::Provision(ProvisionError::Init { dir, reason }),
                Subcommand::Apply => ProbeError::Provision(ProvisionError::Apply { dir, reason }),
                Subcommand::Destroy => {
                    ProbeError::Provision(ProvisionError::Destroy { dir, reason })
                }
                Subcommand::Output(name) => {
                    ProbeError::Provision(ProvisionError::Output { name, reason })
                }
            },
            TerraformError::OutputDecode { name, .. } => {
                ProbeError::Provision(ProvisionError::Output { name, reason })
            }
            TerraformError::InvalidPattern { .. } => ProbeError::Config(ConfigError::InvalidValue {
                field: "terraform.retryable_errors".to_owned(),
                reason,
            }),
        }
    }
}
