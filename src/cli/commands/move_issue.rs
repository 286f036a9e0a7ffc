use anyhow::Result;

use crate::cli::{MoveArgs, MoveKind};

/// Execute the move command.
///
/// # Errors
///
/// Returns an error if the dashboard cannot be read or spliced.
pub fn execute(args: &MoveArgs) -> Result<()> {
    let (_root, _cfg, mut dashboard) = super::open_dashboard()?;
    match args.target.resolve() {
        MoveKind::Adjacent(direction) => dashboard.move_issue(&args.id, direction)?,
        MoveKind::Edge(edge) => dashboard.move_to_position(&args.id, edge)?,
    }
    println!("Moved {} {:?}", args.id, args.target);
    Ok(())
}
