use anyhow::Result;
use taskdash_core::Priority;

use crate::cli::PriorityArgs;

/// Execute the priority command.
///
/// # Errors
///
/// Returns an error if the dashboard cannot be read or spliced.
pub fn execute(args: &PriorityArgs) -> Result<()> {
    let (_root, _cfg, mut dashboard) = super::open_dashboard()?;
    let priority: Priority = args.level.into();
    if dashboard.set_priority(&args.id, priority)? {
        println!("Set {} to {priority}", args.id);
    } else {
        println!("No issue '{}'", args.id);
    }
    Ok(())
}
