//! 인벤토리 조회: gcloud 명령 구성과 실행
//!
//! 하네스는 gcloud 출력 형식을 해석하지 않습니다.
//! 결합 출력(stdout + stderr)과 종료 상태만 돌려주고,
//! 부분 문자열 검사는 상위 레이어가 수행합니다.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use tfprobe_core::config::InventoryConfig;
use tfprobe_core::pipeline::CommandRunner;
use tfprobe_core::types::{CommandSpec, InventoryResult};

/// 인벤토리 조회 종류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryQuery {
    /// 모든 스토리지 객체 나열: `gcloud alpha storage ls`
    ListStorage,
    /// 리전의 클라우드 함수 조회: `gcloud functions describe <name> --region <region>`
    DescribeFunction { name: String, region: String },
}

impl InventoryQuery {
    /// 주어진 바이너리로 실행할 명령을 구성합니다.
    pub fn command(&self, binary: &str) -> CommandSpec {
        match self {
            Self::ListStorage => CommandSpec::new(binary).args(["alpha", "storage", "ls"]),
            Self::DescribeFunction { name, region } => CommandSpec::new(binary).args([
                "functions",
                "describe",
                name.as_str(),
                "--region",
                region.as_str(),
            ]),
        }
    }
}

impl fmt::Display for InventoryQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListStorage => f.write_str("list-storage"),
            Self::DescribeFunction { name, region } => {
                write!(f, "describe-function {name} ({region})")
            }
        }
    }
}

/// 인벤토리 CLI 클라이언트
pub struct InventoryClient<R: CommandRunner> {
    /// 프로세스 실행기
    runner: Arc<R>,
    /// 인벤토리 CLI 바이너리
    binary: String,
}

impl<R: CommandRunner> InventoryClient<R> {
    /// 새 클라이언트를 생성합니다.
    pub fn new(runner: Arc<R>, config: &InventoryConfig) -> Self {
        Self {
            runner,
            binary: config.binary.clone(),
        }
    }

    /// 조회 명령을 실행합니다.
    ///
    /// 프로세스 생성 실패도 `InventoryResult`의 상태로 표현됩니다.
    /// 치명적인지 여부는 호출자가 정책에 따라 결정합니다.
    pub fn query(&self, query: &InventoryQuery) -> InventoryResult {
        let spec = query.command(&self.binary);
        info!(query = %query, command = %spec, "running inventory query");

        match self.runner.run(&spec) {
            Ok(output) => {
                let result = InventoryResult::from_output(&output);
                if !result.status.is_success() {
                    warn!(
                        command = %spec,
                        status = %output.status_display(),
                        "inventory query exited unsuccessfully"
                    );
                }
                result
            }
            Err(e) => {
                warn!(command = %spec, error = %e, "inventory query could not be started");
                InventoryResult::spawn_failed(e.to_string())
            }
        }
    }

    /// 조회 명령의 문자열 표현 (보고용)
    pub fn describe(&self, query: &InventoryQuery) -> String {
        query.command(&self.binary).to_string()
    }
}
