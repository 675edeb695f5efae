//! Spinner shown on stderr while waiting for a run

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const PREFIX: &str = "Waiting for test plan to finish. ";
const TICK_CHARS: &str = "⢄⢂⢁⡁⡈⡐⡠ ";

/// Starts spinners, or does nothing when disabled
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    enabled: bool,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start a spinner; it is cleared when the returned guard drops
    pub fn start(&self) -> Spinner {
        if !self.enabled {
            return Spinner(None);
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{prefix}{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars(TICK_CHARS),
        );
        pb.set_prefix(PREFIX);
        pb.enable_steady_tick(Duration::from_millis(100));
        Spinner(Some(pb))
    }
}

/// Active spinner guard
pub struct Spinner(Option<ProgressBar>);

impl Spinner {
    /// Show the latest poll state next to the spinner
    pub fn update(&self, polls: u32, status: &str) {
        if let Some(pb) = &self.0 {
            pb.set_message(format!("[{} polls, {}]", polls, status));
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = self.0.take() {
            pb.finish_and_clear();
        }
    }
}
