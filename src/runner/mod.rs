//! Test plan execution
//!
//! Starting a run and waiting for it to reach a terminal status.

mod coordinator;
pub mod progress;
pub mod status;

pub use coordinator::{Coordinator, Outcome, PollConfig, MAX_INTERVAL, MAX_TIMEOUT};
pub use status::{is_terminal, Classifier};
