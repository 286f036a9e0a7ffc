//! Shared helpers for end-to-end CLI tests.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Temporary vault directory for one test.
pub struct TdWorkspace {
    pub root: PathBuf,
    _temp: tempfile::TempDir,
}

impl TdWorkspace {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("create temp workspace");
        Self {
            root: temp.path().to_path_buf(),
            _temp: temp,
        }
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root.join(rel))
            .unwrap_or_else(|e| panic!("read {rel}: {e}"))
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.root.join(rel).exists()
    }
}

pub struct CmdOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Run `td` inside the workspace, capturing output. `label` names the step
/// in failure messages.
pub fn run_td<'a>(
    workspace: &TdWorkspace,
    args: impl IntoIterator<Item = &'a str>,
    label: &str,
) -> CmdOutput {
    let output = assert_cmd::Command::cargo_bin("td")
        .expect("td binary")
        .current_dir(&workspace.root)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("{label}: failed to run td: {e}"));
    CmdOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Run `td` and require success.
pub fn run_td_ok<'a>(
    workspace: &TdWorkspace,
    args: impl IntoIterator<Item = &'a str>,
    label: &str,
) -> CmdOutput {
    let out = run_td(workspace, args, label);
    assert!(
        out.status.success(),
        "{label} failed\nstdout: {}\nstderr: {}",
        out.stdout,
        out.stderr
    );
    out
}
