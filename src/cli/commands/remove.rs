use anyhow::Result;
use taskdash_core::{parser, Vault};

use crate::cli::RemoveArgs;

/// Execute the remove command.
///
/// # Errors
///
/// Returns an error if the dashboard cannot be read or spliced, or the
/// file deletion fails.
pub fn execute(args: &RemoveArgs) -> Result<()> {
    let (_root, _cfg, mut dashboard) = super::open_dashboard()?;

    // Capture the file path before the block goes away.
    let text = dashboard.vault().read_text(dashboard.path())?;
    let file_path = parser::find_issue_block(&text, &args.id)
        .and_then(|range| parser::parse_block(&text[range]))
        .map(|issue| issue.path);

    let Some(file_path) = file_path else {
        println!("No issue '{}'", args.id);
        return Ok(());
    };

    dashboard.remove_issue(&args.id)?;
    if args.delete_file {
        dashboard.vault_mut().remove(&file_path)?;
        println!("Removed {} and deleted {file_path}", args.id);
    } else {
        println!("Removed {} (file kept: {file_path})", args.id);
    }
    Ok(())
}
