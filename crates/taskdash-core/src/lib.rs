//! `taskdash-core` - Marker-based task dashboard engine.
//!
//! A dashboard is a plain Markdown document whose raw text is the database:
//! issue blocks live between `%% ... %%` sentinel markers and every mutation
//! is a one-shot read-splice-write transaction against that text. Issue files
//! hold the authoritative per-issue state in their frontmatter; the dashboard
//! is a denormalized projection plus manual ordering.
//!
//! # Quick Start
//!
//! ```no_run
//! use taskdash_core::{Dashboard, DiskVault, Priority, SortDirection};
//!
//! let vault = DiskVault::open("path/to/vault").unwrap();
//! let mut dash = Dashboard::new(vault, "Dashboard.md", "work", "Issues/Active", "Issues/Archive");
//!
//! // Create an issue: file under the Active folder, block in the document.
//! let issue = dash.create_issue("Fix login crash", Priority::High, None).unwrap();
//!
//! // Reorder and archive.
//! dash.sort_by_priority(SortDirection::Ascending).unwrap();
//! dash.move_to_archive(&issue.id).unwrap();
//!
//! // Disaster recovery: regenerate the document from the files on disk.
//! dash.rebuild_from_files().unwrap();
//! ```

pub mod builder;
pub mod error;
pub mod frontmatter;
pub mod markers;
pub mod model;
pub mod parser;
pub mod sort;
pub mod util;
pub mod vault;
pub mod writer;

pub use error::{DashboardError, Result};
pub use model::{DashboardIssue, GithubLink, IssueFile, IssueStatus, Priority};
pub use parser::ParsedDashboard;
pub use sort::SortDirection;
pub use vault::{DiskVault, MemoryVault, Vault};
pub use writer::{Dashboard, MoveDirection, NewIssue, SectionEdge};
