//! Error types for `taskdash-core`.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for dashboard operations.
#[derive(Error, Debug)]
pub enum DashboardError {
    // === Structural Errors ===
    /// A writer operation needed a marker that is absent from the document.
    ///
    /// There is no safe splice point without it; `rebuild_from_files` is the
    /// designated recovery path.
    #[error("Missing dashboard marker: {marker}")]
    MissingMarker { marker: String },

    /// The document's marker set is partially present in a way that cannot
    /// be repaired without risking data loss.
    #[error("Corrupt dashboard structure: {reason} (run rebuild to recover)")]
    CorruptStructure { reason: String },

    // === Validation Errors ===
    /// Priority string is not one of low/medium/high/top.
    #[error("Invalid priority: {value}")]
    InvalidPriority { value: String },

    /// Status string is not active/archived.
    #[error("Invalid status: {value}")]
    InvalidStatus { value: String },

    /// Issue name failed validation.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    // === Vault Errors ===
    /// File not found at the specified vault path.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Attempted to create a file that already exists.
    #[error("File already exists: {0}")]
    FileExists(PathBuf),

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn missing_marker(marker: impl Into<String>) -> Self {
        Self::MissingMarker {
            marker: marker.into(),
        }
    }
}

/// Result type using `DashboardError`.
pub type Result<T> = std::result::Result<T, DashboardError>;
