//! 에러 타입: 설정, 프로비저닝, 조회, 파싱 실패

/// tfprobe 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 외부 프로세스 실행 에러
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// 프로비저닝 엔진 에러
    #[error("provision error: {0}")]
    Provision(#[from] ProvisionError),

    /// 인벤토리 조회 에러
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    /// 출력값 파싱 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// 알 수 없는 시나리오 이름
    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),
}

/// 외부 프로세스 실행 에러
///
/// 프로세스가 시작조차 되지 않은 경우에만 사용합니다.
/// 0이 아닌 종료 코드는 [`CommandOutput`](crate::types::CommandOutput)으로 전달됩니다.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// 프로세스 생성 실패 (바이너리 없음, 권한 부족 등)
    #[error("failed to spawn '{command}': {reason}")]
    Spawn { command: String, reason: String },

    /// 출력 스트림 디코딩 실패
    #[error("failed to read output of '{command}': {reason}")]
    Output { command: String, reason: String },
}

/// 프로비저닝 엔진 에러
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// `init` 실패
    #[error("init failed in '{dir}': {reason}")]
    Init { dir: String, reason: String },

    /// `apply` 실패
    #[error("apply failed in '{dir}': {reason}")]
    Apply { dir: String, reason: String },

    /// 출력값 조회 실패
    #[error("failed to read output '{name}': {reason}")]
    Output { name: String, reason: String },

    /// `destroy` 실패
    #[error("destroy failed in '{dir}': {reason}")]
    Destroy { dir: String, reason: String },
}

/// 인벤토리 조회 에러
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// 조회 명령을 실행할 수 없음
    #[error("failed to run '{command}': {reason}")]
    Spawn { command: String, reason: String },

    /// 조회 명령이 실패 상태로 종료
    #[error("'{command}' exited with {status}")]
    Failed { command: String, status: String },
}

/// 출력값 파싱 에러
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// 식별자 세그먼트 수 부족
    #[error("identifier '{identifier}' has {found} segments, need at least {required}")]
    TooFewSegments {
        identifier: String,
        found: usize,
        required: usize,
    },
}
