//! 도메인 타입: 시나리오 설정, 프로비저닝 출력, 조회 결과

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// 시나리오 하나가 적용할 인프라 정의
///
/// 한 번 생성된 뒤에는 변경되지 않으며, 해당 시나리오 실행이 단독으로 소유합니다.
/// 프로비저너가 수행하는 검증 외에 별도 검증은 하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioConfig {
    terraform_dir: PathBuf,
    var_files: Vec<PathBuf>,
}

impl ScenarioConfig {
    /// 인프라 정의 디렉토리로 설정을 생성합니다.
    pub fn new(terraform_dir: impl Into<PathBuf>) -> Self {
        Self {
            terraform_dir: terraform_dir.into(),
            var_files: Vec::new(),
        }
    }

    /// 변수 파일을 추가합니다. 추가한 순서가 그대로 유지됩니다.
    pub fn var_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.var_files.push(path.into());
        self
    }

    /// 여러 변수 파일을 순서대로 추가합니다.
    pub fn var_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.var_files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// 인프라 정의 디렉토리
    pub fn terraform_dir(&self) -> &Path {
        &self.terraform_dir
    }

    /// 변수 파일 목록 (순서 유지)
    pub fn var_file_paths(&self) -> &[PathBuf] {
        &self.var_files
    }
}

/// 프로비저닝 이후 노출되는 출력값 (이름 → 값)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProvisioningOutputs {
    values: BTreeMap<String, String>,
}

impl ProvisioningOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// 조회 결과에 반드시 포함되어야 하는 부분 문자열 목록 (순서 유지)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Expectation {
    substrings: Vec<String>,
}

impl Expectation {
    pub fn new<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            substrings: substrings.into_iter().map(Into::into).collect(),
        }
    }

    pub fn substrings(&self) -> &[String] {
        &self.substrings
    }

    pub fn len(&self) -> usize {
        self.substrings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substrings.is_empty()
    }
}

/// 외부 프로세스 호출 명세
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arg_list(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// 종료된 외부 프로세스의 출력
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// 종료 코드 (시그널로 종료된 경우 `None`)
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// 정상 종료 출력
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    /// 실패 종료 출력
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code: Some(exit_code),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// stdout 뒤에 stderr를 이어 붙인 결합 출력
    ///
    /// stdout이 개행으로 끝나지 않으면 두 스트림 사이에 개행을 넣어
    /// 경계를 넘는 부분 문자열이 만들어지지 않게 합니다.
    pub fn combined(&self) -> String {
        let mut out = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        out.push_str(&self.stdout);
        if !self.stdout.is_empty() && !self.stdout.ends_with('\n') && !self.stderr.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.stderr);
        out
    }

    /// 사람이 읽을 수 있는 종료 상태
    pub fn status_display(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit code {code}"),
            None => "termination by signal".to_owned(),
        }
    }
}

/// 인벤토리 조회 명령 실패 시 처리 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryErrorPolicy {
    /// 실행 실패 또는 비정상 종료 시 시나리오 중단
    Fatal,
    /// 실패를 기록만 하고 (빈 출력일 수 있는) 결과를 계속 검사
    Tolerate,
}

impl fmt::Display for QueryErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fatal => f.write_str("fatal"),
            Self::Tolerate => f.write_str("tolerate"),
        }
    }
}

/// 인벤토리 조회 명령의 종료 상태
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryStatus {
    /// 정상 종료
    Success,
    /// 0이 아닌 종료 코드 또는 시그널 종료
    Failed { status: String },
    /// 프로세스를 시작하지 못함
    SpawnFailed { reason: String },
}

impl QueryStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// 실패 상태를 `command`에 대한 [`QueryError`]로 변환합니다. 성공이면 `None`.
    pub fn to_error(&self, command: &str) -> Option<QueryError> {
        match self {
            Self::Success => None,
            Self::Failed { status } => Some(QueryError::Failed {
                command: command.to_owned(),
                status: status.clone(),
            }),
            Self::SpawnFailed { reason } => Some(QueryError::Spawn {
                command: command.to_owned(),
                reason: reason.clone(),
            }),
        }
    }
}

/// 인벤토리 조회 결과: 결합 출력과 종료 상태
///
/// 검증 단계 안에서만 잠시 사용됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryResult {
    pub output: String,
    pub status: QueryStatus,
}

impl InventoryResult {
    pub fn from_output(output: &CommandOutput) -> Self {
        let status = if output.is_success() {
            QueryStatus::Success
        } else {
            QueryStatus::Failed {
                status: output.status_display(),
            }
        };
        Self {
            output: output.combined(),
            status,
        }
    }

    pub fn spawn_failed(reason: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            status: QueryStatus::SpawnFailed {
                reason: reason.into(),
            },
        }
    }
}
