//! Autify API gateway
//!
//! A thin request/response layer over the three endpoints the CLI uses.

mod client;
pub mod types;

pub use client::{AutifyApi, AutifyClient};
pub use types::{RunHandle, Scenario, StatusKind, TestPlan, TestPlanResult};
