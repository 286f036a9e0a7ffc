use anyhow::Result;

use crate::cli::IdArgs;

/// Execute the restore (unarchive) command.
///
/// # Errors
///
/// Returns an error if the dashboard cannot be read or spliced.
pub fn execute(args: &IdArgs) -> Result<()> {
    let (_root, _cfg, mut dashboard) = super::open_dashboard()?;
    let was_archived = dashboard
        .snapshot()?
        .archived_issues
        .iter()
        .any(|i| i.id == args.id);
    dashboard.move_to_active(&args.id)?;

    if was_archived {
        println!("Restored {}", args.id);
    } else {
        println!("No archived issue '{}'", args.id);
    }
    Ok(())
}
