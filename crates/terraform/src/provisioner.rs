//! `Provisioner` 구현: Terraform CLI 호출

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, info, warn};

use tfprobe_core::config::TerraformConfig;
use tfprobe_core::error::ProbeError;
use tfprobe_core::metrics as m;
use tfprobe_core::pipeline::{CommandRunner, Provisioner};
use tfprobe_core::types::{CommandOutput, ScenarioConfig};

use crate::error::TerraformError;
use crate::options::{Subcommand, TerraformOptions};
use crate::retry::RetryPolicy;

/// Terraform CLI 기반 프로비저너
///
/// 각 호출마다 `ScenarioConfig`로부터 [`TerraformOptions`]를 만들고,
/// 실패 출력이 재시도 패턴과 일치하면 [`RetryPolicy`]에 따라 재시도합니다.
pub struct TerraformProvisioner<R: CommandRunner> {
    /// 프로세스 실행기
    runner: Arc<R>,
    /// `[terraform]` 설정
    config: TerraformConfig,
    /// 재시도 정책
    retry: RetryPolicy,
}

impl<R: CommandRunner> TerraformProvisioner<R> {
    /// 새 프로비저너를 생성합니다.
    ///
    /// 재시도 패턴이 유효하지 않으면 에러를 반환합니다.
    pub fn new(runner: Arc<R>, config: TerraformConfig) -> Result<Self, TerraformError> {
        let retry = RetryPolicy::from_config(&config)?;
        Ok(Self {
            runner,
            config,
            retry,
        })
    }

    /// 시나리오에 대한 실행 옵션
    pub fn options(&self, scenario: &ScenarioConfig) -> TerraformOptions {
        TerraformOptions::from_scenario(scenario, &self.config)
    }

    /// 하위 명령을 실행하고, 재시도 가능한 실패는 정책에 따라 재시도합니다.
    fn run(
        &self,
        options: &TerraformOptions,
        subcommand: Subcommand,
    ) -> Result<CommandOutput, ProbeError> {
        let spec = options.command(&subcommand);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            debug!(command = %spec, attempt, "running terraform");

            let output = self.runner.run(&spec)?;
            if output.is_success() {
                return Ok(output);
            }

            let combined = output.combined();
            let retryable = self.retry.retryable_reason(&combined);

            match retryable {
                Some(reason) if attempt <= self.retry.max_retries() => {
                    let wait = self.retry.time_between_retries();
                    warn!(
                        subcommand = %subcommand,
                        dir = %options.dir_display(),
                        attempt,
                        reason,
                        wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                        "retryable terraform error, retrying"
                    );
                    counter!(m::TERRAFORM_RETRIES_TOTAL, m::LABEL_COMMAND => subcommand.label())
                        .increment(1);
                    std::thread::sleep(wait);
                }
                _ => {
                    return Err(TerraformError::CommandFailed {
                        dir: options.dir_display(),
                        attempts: attempt,
                        status: output.status_display(),
                        output: combined.trim().to_owned(),
                        subcommand,
                    }
                    .into());
                }
            }
        }
    }
}

impl<R: CommandRunner> Provisioner for TerraformProvisioner<R> {
    fn name(&self) -> &str {
        "terraform"
    }

    fn init_and_apply(&self, scenario: &ScenarioConfig) -> Result<(), ProbeError> {
        let options = self.options(scenario);
        info!(dir = %options.dir_display(), "terraform init");
        self.run(&options, Subcommand::Init)?;
        info!(
            dir = %options.dir_display(),
            var_files = options.var_files.len(),
            "terraform apply"
        );
        self.run(&options, Subcommand::Apply)?;
        Ok(())
    }

    fn output(&self, scenario: &ScenarioConfig, name: &str) -> Result<String, ProbeError> {
        let options = self.options(scenario);
        let output = self.run(&options, Subcommand::Output(name.to_owned()))?;
        let value = decode_output(name, &output.stdout)?;
        debug!(name, value = %value, "terraform output");
        Ok(value)
    }

    fn destroy(&self, scenario: &ScenarioConfig) -> Result<(), ProbeError> {
        let options = self.options(scenario);
        info!(dir = %options.dir_display(), "terraform destroy");
        self.run(&options, Subcommand::Destroy)?;
        Ok(())
    }
}

/// `terraform output -json <name>` 결과를 문자열로 변환합니다.
///
/// JSON 문자열은 따옴표 없이, 그 밖의 값은 압축된 JSON 텍스트로 반환합니다.
fn decode_output(name: &str, stdout: &str) -> Result<String, TerraformError> {
    let value: serde_json::Value =
        serde_json::from_str(stdout.trim()).map_err(|e| TerraformError::OutputDecode {
            name: name.to_owned(),
            reason: e.to_string(),
        })?;

    match value {
        serde_json::Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}
