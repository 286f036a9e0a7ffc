//! JSON output envelopes for `--json` mode.

use serde::Serialize;
use taskdash_core::DashboardIssue;

/// `list` command output.
#[derive(Debug, Serialize)]
pub struct DashboardListing {
    pub dashboard: String,
    pub active: Vec<DashboardIssue>,
    pub archived: Vec<DashboardIssue>,
}

/// `add` command output.
#[derive(Debug, Serialize)]
pub struct IssueCreated {
    pub id: String,
    pub name: String,
    pub path: String,
    pub priority: String,
}

/// `rebuild` command output.
#[derive(Debug, Serialize)]
pub struct RebuildReport {
    pub dashboard: String,
    pub issues: usize,
}
