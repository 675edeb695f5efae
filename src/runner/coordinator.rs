//! Run-and-wait coordinator
//!
//! Starts a test plan run, then polls its result on a fixed interval until
//! the result reaches a terminal status or the overall deadline passes.
//!
//! ```text
//! NotStarted -> Starting -> Polling -> { Completed | TimedOut | Failed }
//! ```
//!
//! Polls are strictly sequential: the next tick is not considered until the
//! in-flight fetch has returned.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::api::{AutifyApi, RunHandle, StatusKind, TestPlanResult};
use crate::common::logging::LogSettings;
use crate::common::{Error, Result};

use super::progress::Progress;
use super::status::{is_terminal, Classifier};

/// Longest accepted poll interval
pub const MAX_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Longest accepted overall timeout
pub const MAX_TIMEOUT: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Timing for one run-and-wait session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    interval: Duration,
    timeout: Duration,
}

impl PollConfig {
    /// Both durations must be non-zero and within [`MAX_INTERVAL`] and
    /// [`MAX_TIMEOUT`], which keeps deadline arithmetic from overflowing
    pub fn new(interval: Duration, timeout: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::invalid_argument("interval must be greater than zero"));
        }
        if timeout.is_zero() {
            return Err(Error::invalid_argument("timeout must be greater than zero"));
        }
        if interval > MAX_INTERVAL {
            return Err(Error::invalid_argument(format!(
                "interval must be at most {} seconds",
                MAX_INTERVAL.as_secs()
            )));
        }
        if timeout > MAX_TIMEOUT {
            return Err(Error::invalid_argument(format!(
                "timeout must be at most {} minutes",
                MAX_TIMEOUT.as_secs() / 60
            )));
        }
        Ok(Self { interval, timeout })
    }

    /// Build from the CLI units: interval in seconds, timeout in minutes
    pub fn from_cli_units(interval_secs: u64, timeout_minutes: u64) -> Result<Self> {
        Self::new(
            Duration::from_secs(interval_secs),
            Duration::from_secs(timeout_minutes.saturating_mul(60)),
        )
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Upper bound on the number of fetches one session can make
    pub fn max_polls(&self) -> u64 {
        let interval = self.interval.as_nanos();
        self.timeout.as_nanos().div_ceil(interval) as u64
    }
}

/// How a run-and-wait session ended, short of an error
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The run reached a terminal status
    Completed(TestPlanResult),
    /// The deadline passed while the run was still in progress
    TimedOut {
        /// Handle of the run that is still in progress
        handle: RunHandle,
        /// Most recent snapshot, if any poll happened
        last: Option<TestPlanResult>,
        /// Number of status fetches made before giving up
        polls: u32,
    },
}

impl Outcome {
    /// The terminal result, if the run completed
    pub fn result(&self) -> Option<&TestPlanResult> {
        match self {
            Outcome::Completed(result) => Some(result),
            Outcome::TimedOut { .. } => None,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, Outcome::TimedOut { .. })
    }
}

/// Drives one test plan run from start to a terminal outcome
pub struct Coordinator {
    config: PollConfig,
    classify: Classifier,
    progress: Progress,
    verbose: bool,
}

impl Coordinator {
    /// Create a coordinator; the spinner starts enabled unless `log`
    /// emits detailed events
    pub fn new(config: PollConfig, log: &LogSettings) -> Self {
        let verbose = log.is_verbose();
        Self {
            config,
            classify: is_terminal,
            progress: Progress::new(!verbose),
            verbose,
        }
    }

    /// Enable or disable the spinner
    pub fn with_spinner(mut self, enabled: bool) -> Self {
        self.progress = Progress::new(enabled && !self.verbose);
        self
    }

    /// Replace the terminal-state classifier
    pub fn with_classifier(mut self, classify: Classifier) -> Self {
        self.classify = classify;
        self
    }

    /// Start a plan through `api` and wait for its result
    pub async fn run_plan(
        &self,
        api: &dyn AutifyApi,
        project_id: u64,
        plan_id: u64,
    ) -> Result<Outcome> {
        self.execute(api.run_test_plan(plan_id), |handle: &RunHandle| {
            api.fetch_result(project_id, handle.result_id())
        })
        .await
    }

    /// Await `start` once, then call `fetch` on every interval tick until a
    /// terminal status, a fetch error, or the deadline
    ///
    /// A failed start returns immediately without polling. Errors from either
    /// operation are returned unchanged.
    pub async fn execute<S, F, Fut>(&self, start: S, mut fetch: F) -> Result<Outcome>
    where
        S: Future<Output = Result<RunHandle>>,
        F: FnMut(&RunHandle) -> Fut,
        Fut: Future<Output = Result<TestPlanResult>>,
    {
        let handle = start.await?;
        info!(
            run_id = %handle.id,
            result_id = handle.result_id(),
            "Test plan run started"
        );

        let spinner = self.progress.start();

        let started = Instant::now();
        let deadline = started + self.config.timeout;
        let mut ticker =
            tokio::time::interval_at(started + self.config.interval, self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let expired = tokio::time::sleep_until(deadline);
        tokio::pin!(expired);

        let mut polls: u32 = 0;
        let mut last: Option<TestPlanResult> = None;

        loop {
            tokio::select! {
                biased;

                _ = ticker.tick() => {
                    // A tick landing exactly on the deadline still polls
                    if Instant::now() > deadline {
                        break;
                    }

                    polls += 1;
                    let result = fetch(&handle).await?;
                    debug!(poll = polls, status = %result.status, "Polled test plan result");
                    spinner.update(polls, result.status.as_str());

                    if (self.classify)(&result.status) {
                        if let StatusKind::Unknown(tag) = &result.status {
                            warn!(status = %tag, "Unrecognised status treated as terminal");
                        }
                        info!(polls, status = %result.status, "Test plan run finished");
                        return Ok(Outcome::Completed(result));
                    }

                    last = Some(result);
                }

                _ = &mut expired => break,
            }
        }

        drop(spinner);
        warn!(
            polls,
            timeout_secs = self.config.timeout.as_secs(),
            "Timed out waiting for test plan to finish"
        );
        Ok(Outcome::TimedOut {
            handle,
            last,
            polls,
        })
    }
}
