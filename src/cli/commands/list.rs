use anyhow::Result;

use crate::cli::ListArgs;
use crate::format::{format_issue_line, DashboardListing};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the dashboard document cannot be read.
pub fn execute(args: &ListArgs, json: bool) -> Result<()> {
    let (_root, cfg, dashboard) = super::open_dashboard()?;
    let snapshot = dashboard.snapshot()?;

    if json {
        let out = DashboardListing {
            dashboard: cfg.dashboard_id,
            active: snapshot.active_issues,
            archived: snapshot.archived_issues,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let issues = if args.archived {
        &snapshot.archived_issues
    } else {
        &snapshot.active_issues
    };
    if issues.is_empty() {
        let section = if args.archived { "archived" } else { "active" };
        println!("No {section} issues");
        return Ok(());
    }
    for issue in issues {
        println!("{}", format_issue_line(issue));
    }
    Ok(())
}
