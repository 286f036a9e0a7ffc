use anyhow::{bail, Result};
use taskdash_core::{Dashboard, DiskVault, Vault};

use crate::cli::InitArgs;
use crate::config::{self, Config};

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the directory is already initialized or the config
/// or dashboard skeleton cannot be written.
pub fn execute(args: &InitArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let root = dunce::canonicalize(&cwd).unwrap_or(cwd);
    if config::is_initialized(&root) {
        bail!("already initialized: {}", root.display());
    }

    let cfg = Config {
        dashboard_id: args.id.clone(),
        dashboard_path: args.path.clone(),
        ..Config::default()
    };
    cfg.save(&root)?;

    // An empty rebuild emits the marker skeleton.
    let vault = DiskVault::open(&root)?;
    let mut dashboard = Dashboard::new(
        vault,
        cfg.dashboard_path.clone(),
        cfg.dashboard_id.clone(),
        cfg.active_folder.clone(),
        cfg.archive_folder.clone(),
    );
    if !dashboard.vault().exists(&cfg.dashboard_path) {
        dashboard.rebuild_from_files()?;
    }

    println!(
        "Initialized dashboard '{}' at {}",
        cfg.dashboard_id, cfg.dashboard_path
    );
    Ok(())
}
