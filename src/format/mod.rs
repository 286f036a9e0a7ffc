//! Output formatting for `taskdash`.
//!
//! Supports human-readable text output and machine-parseable JSON.
//! With `--json`, commands print one serialized envelope to stdout and
//! keep diagnostics on stderr.

mod output;
mod text;

pub use output::{DashboardListing, IssueCreated, RebuildReport};
pub use text::{format_issue_line, format_links_suffix, format_priority_badge};
