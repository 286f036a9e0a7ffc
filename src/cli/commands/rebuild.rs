use anyhow::Result;

use crate::format::RebuildReport;

/// Execute the rebuild command.
///
/// # Errors
///
/// Returns an error if the issue files cannot be enumerated or the
/// document cannot be written.
pub fn execute(json: bool) -> Result<()> {
    let (_root, cfg, mut dashboard) = super::open_dashboard()?;
    let issues = dashboard.rebuild_from_files()?;

    if json {
        let out = RebuildReport {
            dashboard: cfg.dashboard_id,
            issues,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Rebuilt {} from {issues} issue file(s)", cfg.dashboard_path);
    }
    Ok(())
}
