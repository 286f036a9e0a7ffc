//! Command implementations for the `td` CLI.

pub mod add;
pub mod archive;
pub mod init;
pub mod link;
pub mod list;
pub mod move_issue;
pub mod priority;
pub mod rebuild;
pub mod remove;
pub mod restore;
pub mod sort;

use anyhow::{Context, Result};
use std::path::PathBuf;
use taskdash_core::{Dashboard, DiskVault};
use tracing::debug;

use crate::config::{self, Config};

/// Resolve the workspace and open its dashboard.
///
/// # Errors
///
/// Returns an error when run outside a taskdash workspace or when the
/// config cannot be loaded.
pub fn open_dashboard() -> Result<(PathBuf, Config, Dashboard<DiskVault>)> {
    let root = config::workspace_root()
        .context("not a taskdash workspace (run `td init` first)")?;
    let cfg = Config::load(&root)?;
    debug!(root = %root.display(), dashboard = %cfg.dashboard_id, "opened workspace");
    let vault = DiskVault::open(&root)?;
    let dashboard = Dashboard::new(
        vault,
        cfg.dashboard_path.clone(),
        cfg.dashboard_id.clone(),
        cfg.active_folder.clone(),
        cfg.archive_folder.clone(),
    );
    Ok((root, cfg, dashboard))
}
