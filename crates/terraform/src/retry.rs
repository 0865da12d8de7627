//! 재시도 가능한 Terraform 에러 판별

use std::time::Duration;

use regex::Regex;

use tfprobe_core::config::TerraformConfig;

use crate::error::TerraformError;

/// 실패 출력이 알려진 일시적 에러 패턴과 일치하면 재시도하는 정책
///
/// 패턴과 일치하지 않는 실패는 즉시 에러로 반환됩니다.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 첫 시도 이후 최대 재시도 횟수
    max_retries: u32,
    /// 재시도 간격
    time_between_retries: Duration,
    /// (패턴, 설명) 목록
    patterns: Vec<(Regex, String)>,
}

impl RetryPolicy {
    /// `[terraform]` 설정에서 정책을 생성합니다.
    pub fn from_config(config: &TerraformConfig) -> Result<Self, TerraformError> {
        let patterns = config
            .retryable_errors
            .iter()
            .map(|(pattern, description)| {
                Regex::new(pattern)
                    .map(|re| (re, description.clone()))
                    .map_err(|e| TerraformError::InvalidPattern {
                        pattern: pattern.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            max_retries: config.max_retries,
            time_between_retries: config.time_between_retries(),
            patterns,
        })
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn time_between_retries(&self) -> Duration {
        self.time_between_retries
    }

    /// 출력이 재시도 가능한 에러이면 해당 설명을 반환합니다.
    pub fn retryable_reason(&self, output: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(re, _)| re.is_match(output))
            .map(|(_, description)| description.as_str())
    }
}
