//! 설정 관리: tfprobe.toml 파싱 및 런타임 설정
//!
//! [`HarnessConfig`]는 하네스 전체 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`TFPROBE_TERRAFORM_BINARY=tofu` 형식)
//! 3. 설정 파일 (`tfprobe.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), tfprobe_core::error::ProbeError> {
//! use tfprobe_core::config::HarnessConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = HarnessConfig::load("tfprobe.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = HarnessConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, ProbeError};
use crate::types::{QueryErrorPolicy, ScenarioConfig};

/// 지원하는 시나리오 이름 (실행 순서)
pub const SCENARIO_NAMES: [&str; 2] = ["bucket", "function"];

/// tfprobe 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 프로비저닝 엔진 설정
    #[serde(default)]
    pub terraform: TerraformConfig,
    /// 인벤토리 CLI 설정
    #[serde(default)]
    pub inventory: InventoryConfig,
    /// 시나리오별 설정
    #[serde(default)]
    pub scenarios: ScenariosConfig,
}

impl HarnessConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProbeError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProbeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProbeError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                ProbeError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, ProbeError> {
        toml::from_str(toml_str).map_err(|e| {
            ProbeError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `TFPROBE_{SECTION}_{FIELD}`
    /// 시나리오는 `TFPROBE_SCENARIOS_{NAME}_{FIELD}` (예: `TFPROBE_SCENARIOS_BUCKET_OUTPUT`)
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "TFPROBE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "TFPROBE_GENERAL_LOG_FORMAT");

        // Terraform
        override_string(&mut self.terraform.binary, "TFPROBE_TERRAFORM_BINARY");
        override_u32(
            &mut self.terraform.max_retries,
            "TFPROBE_TERRAFORM_MAX_RETRIES",
        );
        override_u64(
            &mut self.terraform.time_between_retries_secs,
            "TFPROBE_TERRAFORM_TIME_BETWEEN_RETRIES_SECS",
        );
        override_bool(&mut self.terraform.no_color, "TFPROBE_TERRAFORM_NO_COLOR");
        override_bool(&mut self.terraform.lock, "TFPROBE_TERRAFORM_LOCK");

        // Inventory
        override_string(&mut self.inventory.binary, "TFPROBE_INVENTORY_BINARY");

        // Scenarios
        override_scenario(&mut self.scenarios.bucket, "TFPROBE_SCENARIOS_BUCKET");
        override_scenario(&mut self.scenarios.function, "TFPROBE_SCENARIOS_FUNCTION");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ProbeError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.terraform.binary.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "terraform.binary".to_owned(),
                reason: "binary must not be empty".to_owned(),
            }
            .into());
        }

        for pattern in self.terraform.retryable_errors.keys() {
            if let Err(e) = regex::Regex::new(pattern) {
                return Err(ConfigError::InvalidValue {
                    field: "terraform.retryable_errors".to_owned(),
                    reason: format!("invalid pattern '{}': {}", pattern, e),
                }
                .into());
            }
        }

        if self.inventory.binary.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "inventory.binary".to_owned(),
                reason: "binary must not be empty".to_owned(),
            }
            .into());
        }

        for name in SCENARIO_NAMES {
            let section = self.scenario(name)?;
            if section.enabled {
                section.validate(name)?;
            }
        }

        Ok(())
    }

    /// 이름으로 시나리오 설정을 찾습니다.
    pub fn scenario(&self, name: &str) -> Result<&ScenarioSection, ConfigError> {
        match name {
            "bucket" => Ok(&self.scenarios.bucket),
            "function" => Ok(&self.scenarios.function),
            other => Err(ConfigError::UnknownScenario(other.to_owned())),
        }
    }

    /// 활성화된 시나리오 이름 목록 (실행 순서)
    pub fn enabled_scenarios(&self) -> Vec<&'static str> {
        SCENARIO_NAMES
            .into_iter()
            .filter(|name| self.scenario(name).map(|s| s.enabled).unwrap_or(false))
            .collect()
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 프로비저닝 엔진(Terraform) 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerraformConfig {
    /// 실행할 바이너리 (terraform, tofu 등)
    pub binary: String,
    /// 재시도 가능한 에러 발생 시 최대 재시도 횟수
    pub max_retries: u32,
    /// 재시도 간격 (초)
    pub time_between_retries_secs: u64,
    /// `-no-color` 플래그 사용 여부
    pub no_color: bool,
    /// 상태 잠금 사용 여부 (`false`면 `-lock=false`)
    pub lock: bool,
    /// 재시도 가능한 에러 (정규식 → 설명)
    pub retryable_errors: BTreeMap<String, String>,
}

impl TerraformConfig {
    pub fn time_between_retries(&self) -> Duration {
        Duration::from_secs(self.time_between_retries_secs)
    }
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            binary: "terraform".to_owned(),
            max_retries: 3,
            time_between_retries_secs: 5,
            no_color: false,
            lock: false,
            retryable_errors: default_retryable_errors(),
        }
    }
}

/// 일시적인 네트워크/레지스트리 장애로 알려진 Terraform 에러 패턴
pub fn default_retryable_errors() -> BTreeMap<String, String> {
    const PLUGIN: &str = "Failed to retrieve plugin due to transient network error.";
    [
        (
            ".*read: connection reset by peer.*",
            "Failed to reach helm charts repository.",
        ),
        (".*transport is closing.*", "Failed to reach Kubernetes API."),
        (".*unable to verify signature.*", PLUGIN),
        (".*unable to verify checksum.*", PLUGIN),
        (".*no provider exists with the given name.*", PLUGIN),
        (".*registry service is unreachable.*", PLUGIN),
        (".*Error installing provider.*", PLUGIN),
        (".*Failed to query available provider packages.*", PLUGIN),
        (".*timeout while waiting for plugin to start.*", PLUGIN),
        (".*timed out waiting for server handshake.*", PLUGIN),
        ("could not query provider registry for", PLUGIN),
        (
            ".*Provider produced inconsistent result after apply.*",
            "Provider eventual consistency error.",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}

/// 인벤토리 CLI(gcloud) 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// 실행할 바이너리
    pub binary: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            binary: "gcloud".to_owned(),
        }
    }
}

/// 시나리오 설정 묶음
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenariosConfig {
    /// 스토리지 버킷 시나리오
    #[serde(default = "ScenarioSection::bucket")]
    pub bucket: ScenarioSection,
    /// 버킷 트리거 클라우드 함수 시나리오
    #[serde(default = "ScenarioSection::function")]
    pub function: ScenarioSection,
}

impl Default for ScenariosConfig {
    fn default() -> Self {
        Self {
            bucket: ScenarioSection::bucket(),
            function: ScenarioSection::function(),
        }
    }
}

/// 단일 시나리오 설정
///
/// 테이블을 직접 선언하면 기본값이 비어 있으므로 `terraform_dir`과
/// `output`을 함께 지정해야 합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSection {
    /// 활성화 여부
    pub enabled: bool,
    /// 인프라 정의 디렉토리
    pub terraform_dir: String,
    /// 변수 파일 목록 (순서대로 `-var-file`로 전달)
    pub var_files: Vec<String>,
    /// 검증에 사용할 출력값 이름
    pub output: String,
    /// 조회 실패 처리 방식 (미지정 시 시나리오 기본값)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_error_policy: Option<QueryErrorPolicy>,
}

impl Default for ScenarioSection {
    fn default() -> Self {
        Self {
            enabled: true,
            terraform_dir: String::new(),
            var_files: Vec::new(),
            output: String::new(),
            query_error_policy: None,
        }
    }
}

impl ScenarioSection {
    /// 버킷 시나리오 기본값
    pub fn bucket() -> Self {
        Self {
            terraform_dir: "test_storage".to_owned(),
            var_files: vec!["terraform.tfvars".to_owned()],
            output: "bucket_url".to_owned(),
            ..Self::default()
        }
    }

    /// 클라우드 함수 시나리오 기본값
    pub fn function() -> Self {
        Self {
            terraform_dir: "test_trigger_cloud_function".to_owned(),
            var_files: vec!["terraform.tfvars".to_owned()],
            output: "cloud_function".to_owned(),
            ..Self::default()
        }
    }

    /// 실행 가능한 시나리오인지 검증합니다.
    ///
    /// `enabled` 값과 무관하게 검사하므로, 비활성 시나리오를 명시적으로
    /// 실행할 때도 사용합니다.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.terraform_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("scenarios.{}.terraform_dir", name),
                reason: "terraform_dir must not be empty".to_owned(),
            });
        }
        if self.output.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("scenarios.{}.output", name),
                reason: "output must not be empty".to_owned(),
            });
        }
        Ok(())
    }

    /// 프로비저너에 전달할 [`ScenarioConfig`]를 생성합니다.
    pub fn scenario_config(&self) -> ScenarioConfig {
        ScenarioConfig::new(&self.terraform_dir).var_files(&self.var_files)
    }
}

fn override_scenario(section: &mut ScenarioSection, prefix: &str) {
    override_bool(&mut section.enabled, &format!("{prefix}_ENABLED"));
    override_string(
        &mut section.terraform_dir,
        &format!("{prefix}_TERRAFORM_DIR"),
    );
    override_csv(&mut section.var_files, &format!("{prefix}_VAR_FILES"));
    override_string(&mut section.output, &format!("{prefix}_OUTPUT"));

    let key = format!("{prefix}_QUERY_ERROR_POLICY");
    if let Ok(val) = std::env::var(&key) {
        match val.as_str() {
            "fatal" => section.query_error_policy = Some(QueryErrorPolicy::Fatal),
            "tolerate" => section.query_error_policy = Some(QueryErrorPolicy::Tolerate),
            _ => warn!(
                env_key = key.as_str(),
                value = val.as_str(),
                "failed to parse query error policy from env var, ignoring"
            ),
        }
    }
}

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_u32(target: &mut u32, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u32>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u32 from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}
