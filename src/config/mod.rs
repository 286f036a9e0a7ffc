//! Configuration management for `taskdash`.
//!
//! Workspace state lives in `.taskdash/config.json` at the vault root:
//! the dashboard identity and folder layout, plus the per-issue UI state
//! (collapsed flags, colors, folder assignments) that the dashboard
//! document itself deliberately does not carry.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Directory marking a taskdash workspace root.
pub const WORKSPACE_DIR: &str = ".taskdash";
const CONFIG_FILE: &str = "config.json";

/// Workspace configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Dashboard identity embedded in every issue block.
    pub dashboard_id: String,
    /// Vault-relative path of the dashboard document.
    pub dashboard_path: String,
    /// Folder holding active issue files.
    pub active_folder: String,
    /// Folder holding archived issue files.
    pub archive_folder: String,
    /// Issue ids whose checklist is collapsed in the rendered view.
    pub collapsed_issues: BTreeMap<String, bool>,
    /// Per-issue accent colors (id -> hex string).
    pub issue_colors: BTreeMap<String, String>,
    /// Per-issue folder overrides (id -> vault folder).
    pub issue_folders: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dashboard_id: "tasks".to_string(),
            dashboard_path: "Dashboard.md".to_string(),
            active_folder: "Issues/Active".to_string(),
            archive_folder: "Issues/Archive".to_string(),
            collapsed_issues: BTreeMap::new(),
            issue_colors: BTreeMap::new(),
            issue_folders: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load the configuration from a workspace root.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not valid JSON.
    pub fn load(root: &Path) -> Result<Self> {
        let path = config_path(root);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Persist the configuration to a workspace root, creating the
    /// `.taskdash` directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, root: &Path) -> Result<()> {
        let dir = root.join(WORKSPACE_DIR);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = config_path(root);
        let text = serde_json::to_string_pretty(self)?;
        fs::write(&path, text)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}

fn config_path(root: &Path) -> PathBuf {
    root.join(WORKSPACE_DIR).join(CONFIG_FILE)
}

/// Locate the workspace root: the current directory or the nearest
/// ancestor containing `.taskdash/`.
#[must_use]
pub fn workspace_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let cwd = dunce::canonicalize(&cwd).unwrap_or(cwd);
    let mut dir = cwd.as_path();
    loop {
        if dir.join(WORKSPACE_DIR).is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

/// True if `root` already carries a workspace config.
#[must_use]
pub fn is_initialized(root: &Path) -> bool {
    config_path(root).is_file()
}
