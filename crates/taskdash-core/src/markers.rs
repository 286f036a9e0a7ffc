//! Marker vocabulary for dashboard documents.
//!
//! Fixed sentinel strings delimiting the Active/Archive sections, the notes
//! region, and individual issue blocks. These strings are load-bearing: the
//! parser locates structure by first-occurrence substring search and the
//! writer splices against offsets derived from them.

/// Opens the Active section.
pub const ACTIVE_START: &str = "%% TASKS-DASHBOARD:ACTIVE:START %%";
/// Closes the Active section.
pub const ACTIVE_END: &str = "%% TASKS-DASHBOARD:ACTIVE:END %%";
/// Opens the Archive section.
pub const ARCHIVE_START: &str = "%% TASKS-DASHBOARD:ARCHIVE:START %%";
/// Closes the Archive section.
pub const ARCHIVE_END: &str = "%% TASKS-DASHBOARD:ARCHIVE:END %%";
/// Marks the start of the free-text notes region.
pub const NOTES: &str = "%% TASKS-DASHBOARD:NOTES %%";

/// Opening fence of an issue's embedded controls block.
pub const CONTROLS_FENCE: &str = "```tasks-dashboard-controls";
/// Opening fence of the Active section's sort-control sub-block.
pub const SORT_FENCE: &str = "```tasks-dashboard-sort";
/// Closing fence shared by both sub-blocks.
pub const FENCE_CLOSE: &str = "```";

/// Legacy inter-block separator, stripped alongside excised blocks when it
/// trails within [`SEPARATOR_WINDOW`] bytes.
pub const SEPARATOR: &str = "---";

/// How far past a block's excision point a trailing legacy separator may sit
/// and still be cleaned up with the block.
pub const SEPARATOR_WINDOW: usize = 10;

/// Start marker for the issue block with the given id.
#[must_use]
pub fn issue_start(id: &str) -> String {
    format!("%% ISSUE:{id}:START %%")
}

/// End marker for the issue block with the given id.
#[must_use]
pub fn issue_end(id: &str) -> String {
    format!("%% ISSUE:{id}:END %%")
}
