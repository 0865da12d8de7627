//! E2E test scenarios.

mod function_flow;
mod teardown;
mod terraform_wiring;
