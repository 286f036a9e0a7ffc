//! Virtual filesystem abstraction over the host vault.
//!
//! The core never touches `std::fs` directly; every read and write goes
//! through a [`Vault`]. Paths are vault-relative with forward slashes,
//! regardless of platform.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{DashboardError, Result};

/// Minimal host filesystem interface consumed by the core.
pub trait Vault {
    /// Read the full text of a file.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the path does not exist.
    fn read_text(&self, path: &str) -> Result<String>;

    /// Replace the full text of a file, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns `Io` on write failure.
    fn write_text(&mut self, path: &str, text: &str) -> Result<()>;

    /// Create a new file. Parent folders are created implicitly.
    ///
    /// # Errors
    ///
    /// Returns `FileExists` if the path is already taken.
    fn create_file(&mut self, path: &str, text: &str) -> Result<()>;

    /// Enumerate files whose path starts with `prefix`, sorted.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the listing fails. A missing prefix folder yields an
    /// empty list, not an error.
    fn list_files(&self, prefix: &str) -> Result<Vec<String>>;

    /// Last-modified time of a file.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the path does not exist.
    fn modified_time(&self, path: &str) -> Result<DateTime<Utc>>;

    /// Move a file to a new path.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the source does not exist.
    fn rename(&mut self, from: &str, to: &str) -> Result<()>;

    /// Delete a file. Deleting a missing path is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Io` on removal failure.
    fn remove(&mut self, path: &str) -> Result<()>;

    fn exists(&self, path: &str) -> bool;
}

// ============================================================================
// Disk vault
// ============================================================================

/// [`Vault`] backed by a directory on disk.
pub struct DiskVault {
    root: PathBuf,
}

impl DiskVault {
    /// Open a vault rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the root cannot be canonicalized.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = canonicalize_or_keep(root.as_ref())?;
        Ok(Self { root })
    }

    /// Absolute root directory of this vault.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let mut full = self.root.clone();
        for part in path.split('/').filter(|p| !p.is_empty() && *p != ".") {
            full.push(part);
        }
        full
    }
}

// A not-yet-existing root is kept as-is; folders appear on first write.
fn canonicalize_or_keep(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(p) => Ok(p),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(DashboardError::Io(e)),
    }
}

impl Vault for DiskVault {
    fn read_text(&self, path: &str) -> Result<String> {
        let full = self.resolve(path);
        fs::read_to_string(&full).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DashboardError::FileNotFound(full)
            } else {
                DashboardError::Io(e)
            }
        })
    }

    fn write_text(&mut self, path: &str, text: &str) -> Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write-to-temp + rename so a crash never leaves a half-written
        // dashboard behind.
        let tmp = full.with_extension("md.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &full)?;
        Ok(())
    }

    fn create_file(&mut self, path: &str, text: &str) -> Result<()> {
        let full = self.resolve(path);
        if full.exists() {
            return Err(DashboardError::FileExists(full));
        }
        self.write_text(path, text)
    }

    fn list_files(&self, prefix: &str) -> Result<Vec<String>> {
        let dir = self.resolve(prefix);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut paths = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                let name = entry.file_name().to_string_lossy().into_owned();
                let prefix = prefix.trim_end_matches('/');
                paths.push(format!("{prefix}/{name}"));
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn modified_time(&self, path: &str) -> Result<DateTime<Utc>> {
        let full = self.resolve(path);
        let meta = fs::metadata(&full).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DashboardError::FileNotFound(full.clone())
            } else {
                DashboardError::Io(e)
            }
        })?;
        let modified = meta.modified()?;
        Ok(DateTime::<Utc>::from(modified))
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let src = self.resolve(from);
        if !src.exists() {
            return Err(DashboardError::FileNotFound(src));
        }
        let dst = self.resolve(to);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(&src, &dst)?;
        Ok(())
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        let full = self.resolve(path);
        match fs::remove_file(&full) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DashboardError::Io(e)),
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }
}

// ============================================================================
// Memory vault
// ============================================================================

/// In-memory [`Vault`] for embedding and tests.
///
/// Modified times default to the moment of the write; tests that exercise
/// modified-time ordering can pin them with [`MemoryVault::set_modified`].
#[derive(Default)]
pub struct MemoryVault {
    files: BTreeMap<String, String>,
    mtimes: BTreeMap<String, DateTime<Utc>>,
}

impl MemoryVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a file's modified time.
    pub fn set_modified(&mut self, path: &str, at: DateTime<Utc>) {
        self.mtimes.insert(path.to_string(), at);
    }

    /// Number of files currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Vault for MemoryVault {
    fn read_text(&self, path: &str) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| DashboardError::FileNotFound(PathBuf::from(path)))
    }

    fn write_text(&mut self, path: &str, text: &str) -> Result<()> {
        self.files.insert(path.to_string(), text.to_string());
        self.mtimes
            .entry(path.to_string())
            .or_insert_with(Utc::now);
        Ok(())
    }

    fn create_file(&mut self, path: &str, text: &str) -> Result<()> {
        if self.files.contains_key(path) {
            return Err(DashboardError::FileExists(PathBuf::from(path)));
        }
        self.write_text(path, text)
    }

    fn list_files(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix = format!("{}/", prefix.trim_end_matches('/'));
        Ok(self
            .files
            .keys()
            .filter(|p| p.starts_with(&prefix))
            .cloned()
            .collect())
    }

    fn modified_time(&self, path: &str) -> Result<DateTime<Utc>> {
        self.mtimes
            .get(path)
            .copied()
            .ok_or_else(|| DashboardError::FileNotFound(PathBuf::from(path)))
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let text = self
            .files
            .remove(from)
            .ok_or_else(|| DashboardError::FileNotFound(PathBuf::from(from)))?;
        let mtime = self.mtimes.remove(from);
        self.files.insert(to.to_string(), text);
        if let Some(t) = mtime {
            self.mtimes.insert(to.to_string(), t);
        }
        Ok(())
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        self.files.remove(path);
        self.mtimes.remove(path);
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}
