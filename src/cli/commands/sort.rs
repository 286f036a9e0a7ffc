use anyhow::Result;

use crate::cli::{SortArgs, SortKey};

/// Execute the sort command.
///
/// # Errors
///
/// Returns an error if the dashboard cannot be read or spliced.
pub fn execute(args: &SortArgs) -> Result<()> {
    let (_root, _cfg, mut dashboard) = super::open_dashboard()?;
    let direction = args.direction();
    let sorted = match args.key {
        SortKey::Priority => dashboard.sort_by_priority(direction)?,
        SortKey::Created => dashboard.sort_by_created(direction)?,
        SortKey::Edited => dashboard.sort_by_edited(direction)?,
    };

    if sorted {
        println!("Sorted active issues by {:?}", args.key);
    } else {
        println!("Nothing to sort");
    }
    Ok(())
}
