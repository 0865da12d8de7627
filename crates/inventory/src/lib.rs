//! 인벤토리 CLI 호출 크레이트
//!
//! # Module Structure
//!
//! - [`runner`]: 실제 프로세스를 실행하는 [`SystemCommandRunner`]
//! - [`gcloud`]: 인벤토리 조회 명령 ([`InventoryQuery`])과 [`InventoryClient`]
//!
//! # Architecture
//!
//! ```text
//! InventoryQuery --command()--> CommandSpec
//!                                   |
//!                          CommandRunner.run()
//!                                   |
//!                  InventoryResult { output, status }
//! ```

pub mod gcloud;
pub mod runner;

pub use gcloud::{InventoryClient, InventoryQuery};
pub use runner::SystemCommandRunner;
