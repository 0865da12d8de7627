//! 메트릭 상수
//!
//! 모든 메트릭 이름을 중앙에서 정의합니다. 각 크레이트는 이 상수로
//! `metrics::counter!()` 매크로를 호출합니다. 레코더가 설치되지 않은
//! 프로세스에서는 아무 동작도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `tfprobe_`
//! - 접미어: `_total` (counter)

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 시나리오 이름 레이블 키 (bucket, function)
pub const LABEL_SCENARIO: &str = "scenario";

/// 결과 레이블 키 (passed, failed)
pub const LABEL_RESULT: &str = "result";

/// Terraform 하위 명령 레이블 키 (init, apply, output, destroy)
pub const LABEL_COMMAND: &str = "command";

// ─── Scenario 메트릭 ───────────────────────────────────────────────

/// 시작된 시나리오 실행 수 (counter, label: scenario)
pub const SCENARIO_RUNS_TOTAL: &str = "tfprobe_scenario_runs_total";

/// 종료된 시나리오 실행 수 (counter, labels: scenario, result)
pub const SCENARIO_OUTCOMES_TOTAL: &str = "tfprobe_scenario_outcomes_total";

/// 누락된 기대 문자열 수 (counter, label: scenario)
pub const SCENARIO_MISSING_EXPECTATIONS_TOTAL: &str =
    "tfprobe_scenario_missing_expectations_total";

/// 실행된 teardown 수 (counter, label: scenario)
pub const SCENARIO_TEARDOWNS_TOTAL: &str = "tfprobe_scenario_teardowns_total";

/// 실패한 teardown 수 (counter, label: scenario)
pub const SCENARIO_TEARDOWN_FAILURES_TOTAL: &str = "tfprobe_scenario_teardown_failures_total";

// ─── Terraform 메트릭 ──────────────────────────────────────────────

/// 재시도된 Terraform 명령 수 (counter, label: command)
pub const TERRAFORM_RETRIES_TOTAL: &str = "tfprobe_terraform_retries_total";
