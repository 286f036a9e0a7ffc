use anyhow::Result;

use crate::cli::IdArgs;

/// Execute the archive command.
///
/// # Errors
///
/// Returns an error if the dashboard cannot be read or spliced.
pub fn execute(args: &IdArgs) -> Result<()> {
    let (_root, _cfg, mut dashboard) = super::open_dashboard()?;
    let was_active = dashboard
        .snapshot()?
        .active_issues
        .iter()
        .any(|i| i.id == args.id);
    dashboard.move_to_archive(&args.id)?;

    if was_active {
        println!("Archived {}", args.id);
    } else {
        println!("No active issue '{}'", args.id);
    }
    Ok(())
}
