//! Text formatting functions for `taskdash`.
//!
//! Plain (non-ANSI) single-line issue rendering for terminal output.

use taskdash_core::{DashboardIssue, Priority};

/// Priority badge characters.
pub mod badges {
    /// Top priority - drop everything.
    pub const TOP: &str = "!!";
    /// High priority.
    pub const HIGH: &str = "! ";
    /// Medium priority (the default).
    pub const MEDIUM: &str = "- ";
    /// Low priority.
    pub const LOW: &str = ". ";
}

/// Return the two-character badge for a priority.
#[must_use]
pub const fn format_priority_badge(priority: Priority) -> &'static str {
    match priority {
        Priority::Top => badges::TOP,
        Priority::High => badges::HIGH,
        Priority::Medium => badges::MEDIUM,
        Priority::Low => badges::LOW,
    }
}

/// Format a GitHub-link count suffix, empty when there are none.
#[must_use]
pub fn format_links_suffix(count: usize) -> String {
    match count {
        0 => String::new(),
        1 => " (1 link)".to_string(),
        n => format!(" ({n} links)"),
    }
}

/// Format a single-line issue summary.
///
/// Format: `{badge} {id}  {name}{links}`
#[must_use]
pub fn format_issue_line(issue: &DashboardIssue) -> String {
    format!(
        "{} {}  {}{}",
        format_priority_badge(issue.priority),
        issue.id,
        issue.name,
        format_links_suffix(issue.github_links.len()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_issue(priority: Priority, links: usize) -> DashboardIssue {
        DashboardIssue {
            id: "fix-login".to_string(),
            name: "Fix login".to_string(),
            path: "Issues/Active/fix-login.md".to_string(),
            priority,
            github_links: (0..links)
                .map(|n| format!("https://github.com/acme/app/issues/{n}"))
                .collect(),
            block_start: 0,
            block_end: 0,
        }
    }

    #[test]
    fn test_issue_line() {
        let line = format_issue_line(&make_issue(Priority::Top, 0));
        assert_eq!(line, "!! fix-login  Fix login");
    }

    #[test]
    fn test_issue_line_with_links() {
        let line = format_issue_line(&make_issue(Priority::Medium, 2));
        assert_eq!(line, "-  fix-login  Fix login (2 links)");
        assert!(format_issue_line(&make_issue(Priority::Low, 1)).ends_with("(1 link)"));
    }
}
