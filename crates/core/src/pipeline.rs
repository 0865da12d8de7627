//! 외부 협력자 trait: 프로비저닝 엔진과 프로세스 실행 추상화
//!
//! 하네스는 두 협력자를 불투명한 블랙박스로 취급합니다.
//! 테스트에서는 호출 횟수를 세는 stub 구현으로 교체할 수 있습니다.

use crate::error::ProbeError;
use crate::types::{CommandOutput, CommandSpec, ScenarioConfig};

/// 인프라 프로비저닝 엔진
///
/// 모든 호출은 동기식이며, 엔진이 끝날 때까지 블로킹합니다.
/// 재시도 정책이 필요하다면 구현체 내부에서 처리합니다.
pub trait Provisioner: Send + Sync {
    /// 엔진 이름 (로그용)
    fn name(&self) -> &str;

    /// 초기화 후 적용합니다. 성공하면 인프라가 살아있는 상태입니다.
    fn init_and_apply(&self, config: &ScenarioConfig) -> Result<(), ProbeError>;

    /// 적용 이후 노출된 출력값을 문자열로 읽습니다.
    fn output(&self, config: &ScenarioConfig, name: &str) -> Result<String, ProbeError>;

    /// 프로비저닝된 인프라를 제거합니다.
    fn destroy(&self, config: &ScenarioConfig) -> Result<(), ProbeError>;
}

/// 외부 프로세스 실행기
pub trait CommandRunner: Send + Sync {
    /// 명령을 실행하고 종료될 때까지 기다립니다.
    ///
    /// 0이 아닌 종료 코드는 `Ok`로 반환되며, 프로세스를 시작하지 못한 경우에만
    /// `Err(ProbeError::Command(_))`를 반환합니다.
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProbeError>;
}
