use anyhow::Result;

use crate::cli::AddArgs;
use crate::format::IssueCreated;

/// Execute the add command.
///
/// # Errors
///
/// Returns an error if validation fails or the issue cannot be created.
pub fn execute(args: &AddArgs, json: bool) -> Result<()> {
    let (_root, _cfg, mut dashboard) = super::open_dashboard()?;
    let issue = dashboard.create_issue(&args.name, args.priority.into(), args.body.as_deref())?;

    if json {
        let out = IssueCreated {
            id: issue.id,
            name: issue.name,
            path: issue.path,
            priority: issue.priority.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Created {}: {} ({})", issue.id, issue.name, issue.priority);
    }
    Ok(())
}
