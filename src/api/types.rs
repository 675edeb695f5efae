//! Autify API payload types
//!
//! Field names follow the JSON the service returns; the same names are used
//! when a payload is printed back to stdout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Response body of `POST /schedules/{plan_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTestPlanResponse {
    pub data: RunHandle,
}

/// Handle for one started test plan run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHandle {
    /// Opaque identifier of the schedule execution
    pub id: String,
    /// Resource type reported by the service
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: RunAttributes,
}

/// Attributes of a started run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAttributes {
    /// Test plan result id, polled with `GET /projects/{project_id}/results/{id}`
    pub id: u64,
}

impl RunHandle {
    /// Id of the test plan result this run writes to
    pub fn result_id(&self) -> u64 {
        self.attributes.id
    }
}

/// Scenario metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Test plan a result belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestPlan {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Snapshot of a test plan result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestPlanResult {
    pub id: u64,
    pub status: StatusKind,
    /// Run duration in seconds, absent until the run finishes
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub test_plan: Option<TestPlan>,
}

/// Status tag of a test plan result
///
/// Unrecognised tags are kept verbatim so they survive a round trip to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusKind {
    Queuing,
    Waiting,
    Running,
    Passed,
    Failed,
    Warning,
    Unknown(String),
}

impl StatusKind {
    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            StatusKind::Queuing => "queuing",
            StatusKind::Waiting => "waiting",
            StatusKind::Running => "running",
            StatusKind::Passed => "passed",
            StatusKind::Failed => "failed",
            StatusKind::Warning => "warning",
            StatusKind::Unknown(tag) => tag,
        }
    }
}

impl From<String> for StatusKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "queuing" => StatusKind::Queuing,
            "waiting" => StatusKind::Waiting,
            "running" => StatusKind::Running,
            "passed" => StatusKind::Passed,
            "failed" => StatusKind::Failed,
            "warning" => StatusKind::Warning,
            _ => StatusKind::Unknown(tag),
        }
    }
}

impl From<StatusKind> for String {
    fn from(status: StatusKind) -> Self {
        match status {
            StatusKind::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
