//! Terminal-state classification

use crate::api::StatusKind;

/// Decides whether a status ends the wait
pub type Classifier = fn(&StatusKind) -> bool;

/// Default classifier: anything not known to be waiting is terminal,
/// including tags this client does not recognise.
pub fn is_terminal(status: &StatusKind) -> bool {
    !matches!(
        status,
        StatusKind::Queuing | StatusKind::Waiting | StatusKind::Running
    )
}
