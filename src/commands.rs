//! CLI command definitions
//!
//! Defines the clap commands for the Autify CLI.

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run a test plan and wait for its result
    Run {
        /// Project the test plan belongs to
        #[arg(long)]
        project_id: u64,

        /// Test plan to run
        #[arg(long)]
        plan_id: u64,

        /// Seconds between status polls (default: 3)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,

        /// Minutes to wait for a terminal status (default: 3)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Do not draw a spinner while waiting
        #[arg(long)]
        no_spinner: bool,
    },

    /// Get scenario metadata
    Scenario {
        /// Project the scenario belongs to
        #[arg(long)]
        project_id: u64,

        /// Scenario to fetch
        #[arg(long)]
        scenario_id: u64,
    },

    /// Get a test plan result
    Result {
        /// Project the result belongs to
        #[arg(long)]
        project_id: u64,

        /// Test plan result to fetch
        #[arg(long)]
        result_id: u64,
    },

    /// Print CLI version and revision
    Version,
}
