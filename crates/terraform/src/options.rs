//! 시나리오별 Terraform 명령 인자 구성

use std::fmt;
use std::path::PathBuf;

use tfprobe_core::config::TerraformConfig;
use tfprobe_core::types::{CommandSpec, ScenarioConfig};

/// Terraform 하위 명령
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subcommand {
    Init,
    Apply,
    /// 출력값 이름
    Output(String),
    Destroy,
}

impl Subcommand {
    /// 메트릭 레이블용 이름
    pub fn label(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Apply => "apply",
            Self::Output(_) => "output",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output(name) => write!(f, "output {name}"),
            other => f.write_str(other.label()),
        }
    }
}

/// 단일 시나리오에 대한 Terraform 실행 옵션
///
/// `ScenarioConfig`(디렉토리, 변수 파일)와 `[terraform]` 설정을 합쳐
/// 하위 명령별 인자 목록을 만듭니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerraformOptions {
    /// Terraform 바이너리
    pub binary: String,
    /// 인프라 정의 디렉토리 (명령의 작업 디렉토리)
    pub terraform_dir: PathBuf,
    /// 변수 파일 (순서 유지)
    pub var_files: Vec<PathBuf>,
    /// `-no-color` 사용 여부
    pub no_color: bool,
    /// 상태 잠금 사용 여부
    pub lock: bool,
}

impl TerraformOptions {
    /// 시나리오 설정과 Terraform 설정으로 옵션을 생성합니다.
    pub fn from_scenario(scenario: &ScenarioConfig, config: &TerraformConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            terraform_dir: scenario.terraform_dir().to_path_buf(),
            var_files: scenario.var_file_paths().to_vec(),
            no_color: config.no_color,
            lock: config.lock,
        }
    }

    /// 하위 명령의 인자 목록
    pub fn args(&self, subcommand: &Subcommand) -> Vec<String> {
        let mut args: Vec<String> = match subcommand {
            Subcommand::Init => vec!["init".into(), "-upgrade=false".into()],
            Subcommand::Apply => vec![
                "apply".into(),
                "-input=false".into(),
                "-auto-approve".into(),
            ],
            Subcommand::Output(name) => {
                // 출력값은 항상 색상 없는 JSON으로 받는다
                return vec![
                    "output".into(),
                    "-no-color".into(),
                    "-json".into(),
                    name.clone(),
                ];
            }
            Subcommand::Destroy => vec![
                "destroy".into(),
                "-auto-approve".into(),
                "-input=false".into(),
            ],
        };

        if matches!(subcommand, Subcommand::Apply | Subcommand::Destroy) {
            for file in &self.var_files {
                args.push("-var-file".into());
                args.push(file.to_string_lossy().into_owned());
            }
            if !self.lock {
                args.push("-lock=false".into());
            }
        }

        if self.no_color {
            args.push("-no-color".into());
        }

        args
    }

    /// 하위 명령을 실행할 `CommandSpec`
    pub fn command(&self, subcommand: &Subcommand) -> CommandSpec {
        CommandSpec::new(&self.binary)
            .args(self.args(subcommand))
            .current_dir(&self.terraform_dir)
    }

    /// 로그/에러용 디렉토리 표현
    pub fn dir_display(&self) -> String {
        self.terraform_dir.display().to_string()
    }
}
