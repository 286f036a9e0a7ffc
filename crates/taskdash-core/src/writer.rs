//! Dashboard writer: transactional text splicing.
//!
//! Every public operation is a one-shot read-modify-write transaction: read
//! the current document text, re-parse, compute the new text by splicing
//! byte ranges, persist. No in-memory mirror survives between operations;
//! the document text is the system of record. All writes funnel through
//! [`Dashboard::commit`], so optimistic-concurrency checks could be added
//! there later without restructuring callers.

use std::collections::HashSet;
use std::ops::Range;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::builder;
use crate::error::{DashboardError, Result};
use crate::frontmatter;
use crate::markers;
use crate::model::{DashboardIssue, GithubLink, IssueFile, IssueStatus, Priority};
use crate::parser::{self, ParsedDashboard};
use crate::sort::{self, SortDirection};
use crate::util;
use crate::vault::Vault;

/// Direction for adjacent-transposition moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Target edge for move-to-position operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEdge {
    Top,
    Bottom,
}

/// Fields needed to insert an issue block into the dashboard.
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub id: String,
    pub name: String,
    pub path: String,
    pub priority: Priority,
    pub github_links: Vec<String>,
}

/// One dashboard document plus the vault it lives in.
pub struct Dashboard<V: Vault> {
    vault: V,
    path: String,
    id: String,
    active_folder: String,
    archive_folder: String,
}

impl<V: Vault> Dashboard<V> {
    pub fn new(
        vault: V,
        path: impl Into<String>,
        id: impl Into<String>,
        active_folder: impl Into<String>,
        archive_folder: impl Into<String>,
    ) -> Self {
        Self {
            vault,
            path: path.into(),
            id: id.into(),
            active_folder: active_folder.into(),
            archive_folder: archive_folder.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    /// Parse the current document text.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the dashboard document does not exist.
    pub fn snapshot(&self) -> Result<ParsedDashboard> {
        let text = self.load()?;
        Ok(parser::parse(&text))
    }

    // ========================================================================
    // Issue creation
    // ========================================================================

    /// Create a new issue: write its file under the Active folder and insert
    /// its block into the dashboard. The id is a slug of `name`,
    /// disambiguated with a numeric suffix on collision.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty name, or any vault error.
    pub fn create_issue(
        &mut self,
        name: &str,
        priority: Priority,
        body: Option<&str>,
    ) -> Result<NewIssue> {
        if name.trim().is_empty() {
            return Err(DashboardError::validation("name", "cannot be empty"));
        }
        let text = if self.vault.exists(&self.path) {
            self.load()?
        } else {
            String::new()
        };
        let id = util::unique_slug(name, |slug| {
            parser::find_issue_block(&text, slug).is_some()
                || self.vault.exists(&self.issue_path(&self.active_folder, slug))
                || self.vault.exists(&self.issue_path(&self.archive_folder, slug))
        });
        let file_path = self.issue_path(&self.active_folder, &id);
        let file = IssueFile {
            created: Some(Utc::now()),
            status: IssueStatus::Active,
            priority,
            github_links: Vec::new(),
            body: body.unwrap_or_default().to_string(),
        };
        self.vault
            .create_file(&file_path, &frontmatter::render_issue_file(&file))?;

        let issue = NewIssue {
            id,
            name: name.trim().to_string(),
            path: file_path,
            priority,
            github_links: Vec::new(),
        };
        self.add_issue(&issue)?;
        info!(id = %issue.id, "created issue");
        Ok(issue)
    }

    /// Insert an issue block immediately before the Active section's END
    /// marker, synthesizing or repairing the document skeleton first.
    ///
    /// # Errors
    ///
    /// Returns `CorruptStructure` when the marker set is partially present
    /// in a way that cannot be repaired without data loss, or
    /// `MissingMarker` if the splice point is still absent after repair.
    pub fn add_issue(&mut self, issue: &NewIssue) -> Result<()> {
        let text = self.ensure_document()?;
        let block = builder::issue_block(
            &issue.id,
            &issue.name,
            &issue.path,
            &self.id,
            issue.priority,
            &issue.github_links,
        );
        let new = insert_before_marker(&text, markers::ACTIVE_END, &block)?;
        self.commit(&new)
    }

    // ========================================================================
    // Archive / unarchive / remove
    // ========================================================================

    /// Move an issue block from Active to Archive, rewriting its internal
    /// path references and relocating the backing issue file. Unknown ids
    /// are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `MissingMarker` if the Archive END marker is absent.
    pub fn move_to_archive(&mut self, id: &str) -> Result<()> {
        let (from, to) = (self.active_folder.clone(), self.archive_folder.clone());
        self.relocate(id, &from, &to, markers::ARCHIVE_END, IssueStatus::Archived)
    }

    /// Move an issue block from Archive back to Active. Inverse of
    /// [`Dashboard::move_to_archive`].
    ///
    /// # Errors
    ///
    /// Returns `MissingMarker` if the Active END marker is absent.
    pub fn move_to_active(&mut self, id: &str) -> Result<()> {
        let (from, to) = (self.archive_folder.clone(), self.active_folder.clone());
        self.relocate(id, &from, &to, markers::ACTIVE_END, IssueStatus::Active)
    }

    /// Excise an issue block without re-insertion. Deleting or trashing the
    /// backing issue file is the host's responsibility. Unknown ids are a
    /// silent no-op.
    ///
    /// # Errors
    ///
    /// Returns vault errors from the read or the commit.
    pub fn remove_issue(&mut self, id: &str) -> Result<()> {
        if !self.vault.exists(&self.path) {
            return Ok(());
        }
        let text = self.load()?;
        let Some(range) = parser::find_issue_block(&text, id) else {
            return Ok(());
        };
        let (without, _) = excise(&text, &range);
        info!(id, "removed issue block");
        self.commit(&without)
    }

    fn relocate(
        &mut self,
        id: &str,
        from_folder: &str,
        to_folder: &str,
        dest_marker: &str,
        new_status: IssueStatus,
    ) -> Result<()> {
        if !self.vault.exists(&self.path) {
            return Ok(());
        }
        let text = self.load()?;
        let Some(range) = parser::find_issue_block(&text, id) else {
            debug!(id, "relocate: issue not in dashboard, nothing to do");
            return Ok(());
        };
        let (without, block) = excise(&text, &range);
        let moved = block.replace(from_folder, to_folder);
        let payload = format!("{moved}\n{}\n", markers::SEPARATOR);
        let new = insert_before_marker(&without, dest_marker, &payload)?;
        self.commit(&new)?;

        // Keep the issue file in step with the dashboard: same folder move,
        // status field updated.
        if let Some(issue) = parser::parse_block(&block) {
            let old_path = issue.path;
            let new_path = old_path.replace(from_folder, to_folder);
            if self.vault.exists(&old_path) {
                let file_text = self.vault.read_text(&old_path)?;
                let updated = frontmatter::set_key(&file_text, "status", new_status.as_str());
                self.vault.write_text(&old_path, &updated)?;
                if new_path != old_path {
                    self.vault.rename(&old_path, &new_path)?;
                }
            }
        }
        info!(id, status = %new_status, "relocated issue");
        Ok(())
    }

    // ========================================================================
    // Reordering
    // ========================================================================

    /// Swap an Active issue with its immediate neighbor. A boundary hit or
    /// an unknown id is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns vault errors from the read or the commit.
    pub fn move_issue(&mut self, id: &str, direction: MoveDirection) -> Result<()> {
        if !self.vault.exists(&self.path) {
            return Ok(());
        }
        let text = self.load()?;
        let parsed = parser::parse(&text);
        let Some(index) = parsed.active_issues.iter().position(|i| i.id == id) else {
            return Ok(());
        };
        let neighbor = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => (index + 1 < parsed.active_issues.len()).then_some(index + 1),
        };
        let Some(neighbor) = neighbor else {
            debug!(id, "move: already at boundary");
            return Ok(());
        };
        let a = &parsed.active_issues[index.min(neighbor)];
        let b = &parsed.active_issues[index.max(neighbor)];

        // Adjacent transposition: swap the two block texts verbatim and keep
        // the gap between them in place.
        let mut out = String::with_capacity(text.len());
        out.push_str(&text[..a.block_start]);
        out.push_str(&text[b.block_start..b.block_end]);
        out.push_str(&text[a.block_end..b.block_start]);
        out.push_str(&text[a.block_start..a.block_end]);
        out.push_str(&text[b.block_end..]);
        self.commit(&out)
    }

    /// Move an Active issue to the top or bottom of the section. Top means
    /// immediately after the sort-control sub-block; bottom means
    /// immediately before the Active END marker.
    ///
    /// # Errors
    ///
    /// Returns `MissingMarker` if the required Active marker is absent.
    pub fn move_to_position(&mut self, id: &str, edge: SectionEdge) -> Result<()> {
        if !self.vault.exists(&self.path) {
            return Ok(());
        }
        let text = self.load()?;
        let parsed = parser::parse(&text);
        let Some(issue) = parsed.active_issues.iter().find(|i| i.id == id) else {
            return Ok(());
        };
        let range = issue.block_start..issue.block_end;
        let (without, block) = excise(&text, &range);
        let payload = format!("{block}\n");
        let new = match edge {
            SectionEdge::Top => {
                let pos = active_top_offset(&without)?;
                let mut out = String::with_capacity(without.len() + payload.len());
                out.push_str(&without[..pos]);
                if pos > 0 && !without[..pos].ends_with('\n') {
                    out.push('\n');
                }
                out.push_str(&payload);
                out.push_str(&without[pos..]);
                out
            }
            SectionEdge::Bottom => insert_before_marker(&without, markers::ACTIVE_END, &payload)?,
        };
        self.commit(&new)
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    /// Stable-sort the Active section by priority ordinal.
    ///
    /// Returns false (leaving the document untouched) when fewer than two
    /// Active issues exist.
    ///
    /// # Errors
    ///
    /// Returns `MissingMarker` if either Active marker is absent.
    pub fn sort_by_priority(&mut self, direction: SortDirection) -> Result<bool> {
        self.sort_active(direction, |_dash, issue| SortKeyValue::Ordinal(issue.priority))
    }

    /// Stable-sort the Active section by the `created` timestamp from each
    /// issue's own file. Missing or unparsable timestamps sort as epoch 0.
    ///
    /// # Errors
    ///
    /// Returns `MissingMarker` if either Active marker is absent.
    pub fn sort_by_created(&mut self, direction: SortDirection) -> Result<bool> {
        self.sort_active(direction, |dash, issue| {
            SortKeyValue::Timestamp(dash.created_for(&issue.path))
        })
    }

    /// Stable-sort the Active section by file-system modified time.
    ///
    /// # Errors
    ///
    /// Returns `MissingMarker` if either Active marker is absent.
    pub fn sort_by_edited(&mut self, direction: SortDirection) -> Result<bool> {
        self.sort_active(direction, |dash, issue| {
            SortKeyValue::Timestamp(dash.vault.modified_time(&issue.path).ok())
        })
    }

    fn sort_active<F>(&mut self, direction: SortDirection, key_of: F) -> Result<bool>
    where
        F: Fn(&Self, &DashboardIssue) -> SortKeyValue,
    {
        if !self.vault.exists(&self.path) {
            return Ok(false);
        }
        let text = self.load()?;
        let parsed = parser::parse(&text);
        if parsed.active_issues.len() < 2 {
            debug!("sort: fewer than 2 active issues, nothing to do");
            return Ok(false);
        }
        require_marker(&text, markers::ACTIVE_START)?;
        require_marker(&text, markers::ACTIVE_END)?;

        let mut keyed: Vec<(SortKeyValue, &DashboardIssue)> = parsed
            .active_issues
            .iter()
            .map(|issue| (key_of(self, issue), issue))
            .collect();
        keyed.sort_by(|(ka, _), (kb, _)| direction.apply(ka.compare(kb)));

        // Rebuild the section: fresh sort-control sub-block, then the
        // re-ordered blocks, trimmed and with inter-block separators dropped.
        let mut section = String::from("\n");
        section.push_str(&builder::sort_block(&self.id));
        for (_, issue) in &keyed {
            section.push_str(text[issue.block_start..issue.block_end].trim_matches('\n'));
            section.push('\n');
        }
        let new = format!(
            "{}{}{}",
            &text[..parsed.active_start],
            section,
            &text[parsed.active_end..]
        );
        self.commit(&new)?;
        info!(count = keyed.len(), "sorted active section");
        Ok(true)
    }

    fn created_for(&self, path: &str) -> Option<DateTime<Utc>> {
        let text = self.vault.read_text(path).ok()?;
        frontmatter::parse_issue_file(&text).created
    }

    // ========================================================================
    // In-place block mutation
    // ========================================================================

    /// Rewrite an issue's priority in both its dashboard block and its file.
    /// Returns false when the id is not present in the dashboard.
    ///
    /// # Errors
    ///
    /// Returns vault errors from the reads or writes.
    pub fn set_priority(&mut self, id: &str, priority: Priority) -> Result<bool> {
        self.rewrite_block(id, |issue| issue.priority = priority, |file_text| {
            frontmatter::set_key(file_text, "priority", priority.as_str())
        })
    }

    /// Replace an issue's GitHub links in both its dashboard block and its
    /// file frontmatter. Writing through here migrates any legacy
    /// single-`github:` frontmatter to the `github_links:` list form.
    /// Returns false when the id is not present in the dashboard.
    ///
    /// # Errors
    ///
    /// Returns vault errors from the reads or writes.
    pub fn set_github_links(&mut self, id: &str, links: &[GithubLink]) -> Result<bool> {
        let urls: Vec<String> = links.iter().map(|l| l.url.clone()).collect();
        self.rewrite_block(
            id,
            |issue| issue.github_links = urls.clone(),
            |file_text| frontmatter::set_github_links(file_text, links),
        )
    }

    fn rewrite_block<B, F>(&mut self, id: &str, mutate: B, rewrite_file: F) -> Result<bool>
    where
        B: Fn(&mut DashboardIssue),
        F: Fn(&str) -> String,
    {
        if !self.vault.exists(&self.path) {
            return Ok(false);
        }
        let text = self.load()?;
        let Some(range) = parser::find_issue_block(&text, id) else {
            return Ok(false);
        };
        let Some(mut issue) = parser::parse_block(&text[range.clone()]) else {
            return Ok(false);
        };
        mutate(&mut issue);
        let built = builder::issue_block(
            &issue.id,
            &issue.name,
            &issue.path,
            &self.id,
            issue.priority,
            &issue.github_links,
        );
        // The parsed range is marker-inclusive without the trailing newline;
        // splice the built block in without its own.
        let built = built.strip_suffix('\n').unwrap_or(&built);
        let new = format!("{}{}{}", &text[..range.start], built, &text[range.end..]);
        self.commit(&new)?;

        if self.vault.exists(&issue.path) {
            let file_text = self.vault.read_text(&issue.path)?;
            self.vault.write_text(&issue.path, &rewrite_file(&file_text))?;
        }
        Ok(true)
    }

    // ========================================================================
    // Rebuild
    // ========================================================================

    /// Regenerate the whole document from the issue files on disk.
    ///
    /// The disaster-recovery path: ignores the embedded dashboard state
    /// entirely (except for the Notes section, preserved verbatim), parses
    /// every file under the Active and Archive folders independently, sorts
    /// by priority ascending then created descending, and emits a fresh
    /// document. Returns the total issue count.
    ///
    /// # Errors
    ///
    /// Returns vault errors from the enumeration or the final write.
    pub fn rebuild_from_files(&mut self) -> Result<usize> {
        let existing = if self.vault.exists(&self.path) {
            self.load()?
        } else {
            String::new()
        };
        let notes = parser::extract_notes(&existing).unwrap_or_default();

        let active_folder = self.active_folder.clone();
        let archive_folder = self.archive_folder.clone();
        let active = self.collect_issue_files(&active_folder)?;
        let archived = self.collect_issue_files(&archive_folder)?;
        let count = active.len() + archived.len();

        let mut taken = HashSet::new();
        let active_blocks = self.render_blocks(active, &mut taken);
        let archive_blocks = self.render_blocks(archived, &mut taken);

        let doc = builder::document(&self.id, &active_blocks, &notes, &archive_blocks);
        if self.vault.exists(&self.path) {
            self.commit(&doc)?;
        } else {
            self.vault.create_file(&self.path, &doc)?;
        }
        info!(count, "rebuilt dashboard from issue files");
        Ok(count)
    }

    fn collect_issue_files(&self, folder: &str) -> Result<Vec<(String, IssueFile)>> {
        let mut files = Vec::new();
        for path in self.vault.list_files(folder)? {
            if !path.ends_with(".md") {
                continue;
            }
            match self.vault.read_text(&path) {
                Ok(text) => files.push((path, frontmatter::parse_issue_file(&text))),
                Err(e) => warn!(path, error = %e, "skipping unreadable issue file"),
            }
        }
        files.sort_by(|(_, a), (_, b)| {
            sort::compare_rebuild(a.priority, a.created, b.priority, b.created)
        });
        Ok(files)
    }

    fn render_blocks(&self, files: Vec<(String, IssueFile)>, taken: &mut HashSet<String>) -> String {
        let mut blocks = String::new();
        for (path, file) in files {
            let name = util::file_stem(&path).to_string();
            let id = util::unique_slug(&name, |slug| taken.contains(slug));
            taken.insert(id.clone());
            let urls: Vec<String> = file.github_links.iter().map(|l| l.url.clone()).collect();
            blocks.push_str(&builder::issue_block(
                &id,
                &name,
                &path,
                &self.id,
                file.priority,
                &urls,
            ));
        }
        blocks
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn issue_path(&self, folder: &str, id: &str) -> String {
        format!("{}/{id}.md", folder.trim_end_matches('/'))
    }

    fn load(&self) -> Result<String> {
        self.vault.read_text(&self.path)
    }

    // The single write point of every transaction.
    fn commit(&mut self, text: &str) -> Result<()> {
        debug!(path = %self.path, bytes = text.len(), "committing dashboard text");
        self.vault.write_text(&self.path, text)
    }

    /// Load the document, creating or repairing the marker skeleton.
    ///
    /// A missing document or one with no markers at all gets a fresh
    /// skeleton. A document whose Active pair is intact but whose Archive
    /// pair is wholly missing is repaired by appending the archive scaffold,
    /// preserving the Active content. Any other partial marker set is
    /// refused: splicing into it risks silent data loss, and
    /// [`Dashboard::rebuild_from_files`] is the recovery path.
    fn ensure_document(&mut self) -> Result<String> {
        if !self.vault.exists(&self.path) {
            let text = builder::skeleton(&self.id);
            self.vault.create_file(&self.path, &text)?;
            info!(path = %self.path, "created dashboard skeleton");
            return Ok(text);
        }
        let text = self.load()?;
        if parser::has_markers(&text) {
            return Ok(text);
        }
        if parser::has_no_markers(&text) {
            warn!(path = %self.path, "no dashboard markers found, regenerating skeleton");
            let fresh = builder::skeleton(&self.id);
            self.commit(&fresh)?;
            return Ok(fresh);
        }
        let active_intact =
            text.contains(markers::ACTIVE_START) && text.contains(markers::ACTIVE_END);
        let archive_absent =
            !text.contains(markers::ARCHIVE_START) && !text.contains(markers::ARCHIVE_END);
        if active_intact && archive_absent {
            warn!(path = %self.path, "archive markers missing, appending scaffold");
            let mut repaired = text;
            if !repaired.ends_with('\n') {
                repaired.push('\n');
            }
            repaired.push_str(&builder::archive_scaffold());
            self.commit(&repaired)?;
            return Ok(repaired);
        }
        Err(DashboardError::CorruptStructure {
            reason: "partial marker set".to_string(),
        })
    }
}

enum SortKeyValue {
    Ordinal(Priority),
    Timestamp(Option<DateTime<Utc>>),
}

impl SortKeyValue {
    fn compare(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Self::Ordinal(a), Self::Ordinal(b)) => sort::compare_priority(*a, *b),
            (Self::Timestamp(a), Self::Timestamp(b)) => sort::compare_created(*a, *b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

fn require_marker(text: &str, marker: &str) -> Result<()> {
    if text.contains(marker) {
        Ok(())
    } else {
        Err(DashboardError::missing_marker(marker))
    }
}

/// Remove a block from the text, returning the remaining text and the block.
///
/// Consumes the block's own trailing newline, plus a legacy `---` separator
/// line when one starts within [`markers::SEPARATOR_WINDOW`] bytes of the
/// excision point.
fn excise(text: &str, range: &Range<usize>) -> (String, String) {
    let block = text[range.clone()].to_string();
    let tail = &text[range.end..];

    let mut strip = usize::from(tail.starts_with('\n'));
    if let Some(p) = tail.find(markers::SEPARATOR) {
        let at_line_start = p == 0 || tail[..p].ends_with('\n');
        let after = p + markers::SEPARATOR.len();
        let at_line_end = tail[after..].is_empty() || tail[after..].starts_with('\n');
        if p <= markers::SEPARATOR_WINDOW && at_line_start && at_line_end {
            strip = after + usize::from(tail[after..].starts_with('\n'));
        }
    }

    let mut out = String::with_capacity(text.len() - (range.end - range.start));
    out.push_str(&text[..range.start]);
    out.push_str(&text[range.end + strip..]);
    (out, block)
}

/// Splice `payload` (newline-terminated) in immediately before `marker`,
/// keeping the marker at a line start.
fn insert_before_marker(text: &str, marker: &str, payload: &str) -> Result<String> {
    let pos = text
        .find(marker)
        .ok_or_else(|| DashboardError::missing_marker(marker))?;
    let mut out = String::with_capacity(text.len() + payload.len() + 1);
    out.push_str(&text[..pos]);
    if pos > 0 && !text[..pos].ends_with('\n') {
        out.push('\n');
    }
    out.push_str(payload);
    out.push_str(&text[pos..]);
    Ok(out)
}

/// Offset of the Active section's top insertion point: just past the
/// sort-control sub-block when present, else just past the START marker.
fn active_top_offset(text: &str) -> Result<usize> {
    let marker_pos = text
        .find(markers::ACTIVE_START)
        .ok_or_else(|| DashboardError::missing_marker(markers::ACTIVE_START))?;
    let mut pos = marker_pos + markers::ACTIVE_START.len();
    if text[pos..].starts_with('\n') {
        pos += 1;
    }
    if text[pos..].starts_with(markers::SORT_FENCE) {
        let close = format!("\n{}\n", markers::FENCE_CLOSE);
        if let Some(rel) = text[pos + markers::SORT_FENCE.len()..].find(&close) {
            pos = pos + markers::SORT_FENCE.len() + rel + close.len();
        }
    }
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::MemoryVault;
    use chrono::TimeZone;

    fn dash() -> Dashboard<MemoryVault> {
        Dashboard::new(
            MemoryVault::new(),
            "Dashboard.md",
            "work",
            "Issues/Active",
            "Issues/Archive",
        )
    }

    fn active_ids(d: &Dashboard<MemoryVault>) -> Vec<String> {
        d.snapshot()
            .unwrap()
            .active_issues
            .iter()
            .map(|i| i.id.clone())
            .collect()
    }

    fn all_ids(d: &Dashboard<MemoryVault>) -> Vec<String> {
        let parsed = d.snapshot().unwrap();
        let mut ids: Vec<String> = parsed
            .active_issues
            .iter()
            .chain(&parsed.archived_issues)
            .map(|i| i.id.clone())
            .collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_create_issue_synthesizes_skeleton_and_inserts() {
        let mut d = dash();
        let issue = d.create_issue("Fix login", Priority::High, None).unwrap();
        assert_eq!(issue.id, "fix-login");
        assert_eq!(issue.path, "Issues/Active/fix-login.md");
        assert!(d.vault().exists("Issues/Active/fix-login.md"));

        let parsed = d.snapshot().unwrap();
        assert_eq!(parsed.active_issues.len(), 1);
        assert_eq!(parsed.active_issues[0].name, "Fix login");
        assert_eq!(parsed.active_issues[0].priority, Priority::High);
    }

    #[test]
    fn test_create_issue_disambiguates_slug() {
        let mut d = dash();
        let a = d.create_issue("Same name", Priority::Medium, None).unwrap();
        let b = d.create_issue("Same name", Priority::Medium, None).unwrap();
        assert_eq!(a.id, "same-name");
        assert_eq!(b.id, "same-name-2");
    }

    #[test]
    fn test_create_issue_rejects_empty_name() {
        let mut d = dash();
        assert!(matches!(
            d.create_issue("   ", Priority::Medium, None),
            Err(DashboardError::Validation { .. })
        ));
    }

    #[test]
    fn test_archive_moves_block_file_and_paths() {
        let mut d = dash();
        d.create_issue("Ship it", Priority::Medium, Some("- [ ] step\n"))
            .unwrap();
        d.move_to_archive("ship-it").unwrap();

        let parsed = d.snapshot().unwrap();
        assert!(parsed.active_issues.is_empty());
        assert_eq!(parsed.archived_issues.len(), 1);
        assert_eq!(
            parsed.archived_issues[0].path,
            "Issues/Archive/ship-it.md"
        );

        assert!(!d.vault().exists("Issues/Active/ship-it.md"));
        let file = d.vault().read_text("Issues/Archive/ship-it.md").unwrap();
        assert!(file.contains("status: archived\n"));
        assert!(file.contains("- [ ] step"));
    }

    #[test]
    fn test_unarchive_restores_active() {
        let mut d = dash();
        d.create_issue("Ship it", Priority::Medium, None).unwrap();
        d.move_to_archive("ship-it").unwrap();
        d.move_to_active("ship-it").unwrap();

        let parsed = d.snapshot().unwrap();
        assert!(parsed.archived_issues.is_empty());
        assert_eq!(parsed.active_issues[0].path, "Issues/Active/ship-it.md");
        let file = d.vault().read_text("Issues/Active/ship-it.md").unwrap();
        assert!(file.contains("status: active\n"));
    }

    #[test]
    fn test_unknown_id_operations_are_noops() {
        let mut d = dash();
        d.create_issue("Only one", Priority::Medium, None).unwrap();
        let before = d.vault().read_text("Dashboard.md").unwrap();

        d.move_to_archive("ghost").unwrap();
        d.remove_issue("ghost").unwrap();
        d.move_issue("ghost", MoveDirection::Up).unwrap();
        d.move_to_position("ghost", SectionEdge::Top).unwrap();

        assert_eq!(d.vault().read_text("Dashboard.md").unwrap(), before);
    }

    #[test]
    fn test_remove_excises_block_only() {
        let mut d = dash();
        d.create_issue("Doomed", Priority::Medium, None).unwrap();
        d.remove_issue("doomed").unwrap();
        assert!(d.snapshot().unwrap().active_issues.is_empty());
        // The file outlives the block; deleting it is the host's decision.
        assert!(d.vault().exists("Issues/Active/doomed.md"));
    }

    #[test]
    fn test_move_up_then_down_restores_order() {
        let mut d = dash();
        for name in ["Alpha", "Beta", "Gamma"] {
            d.create_issue(name, Priority::Medium, None).unwrap();
        }
        let original = active_ids(&d);

        d.move_issue("beta", MoveDirection::Up).unwrap();
        assert_eq!(active_ids(&d), vec!["beta", "alpha", "gamma"]);
        d.move_issue("beta", MoveDirection::Down).unwrap();
        assert_eq!(active_ids(&d), original);
    }

    #[test]
    fn test_move_at_boundary_is_noop() {
        let mut d = dash();
        for name in ["Alpha", "Beta"] {
            d.create_issue(name, Priority::Medium, None).unwrap();
        }
        let before = d.vault().read_text("Dashboard.md").unwrap();
        d.move_issue("alpha", MoveDirection::Up).unwrap();
        d.move_issue("beta", MoveDirection::Down).unwrap();
        assert_eq!(d.vault().read_text("Dashboard.md").unwrap(), before);
    }

    #[test]
    fn test_move_to_position() {
        let mut d = dash();
        for name in ["Alpha", "Beta", "Gamma"] {
            d.create_issue(name, Priority::Medium, None).unwrap();
        }
        d.move_to_position("gamma", SectionEdge::Top).unwrap();
        assert_eq!(active_ids(&d), vec!["gamma", "alpha", "beta"]);
        d.move_to_position("gamma", SectionEdge::Bottom).unwrap();
        assert_eq!(active_ids(&d), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_sort_by_priority_ascending_urgency_first() {
        let mut d = dash();
        d.create_issue("Top task", Priority::Top, None).unwrap();
        d.create_issue("Low task", Priority::Low, None).unwrap();
        d.create_issue("Med task", Priority::Medium, None).unwrap();

        assert!(d.sort_by_priority(SortDirection::Ascending).unwrap());
        assert_eq!(active_ids(&d), vec!["top-task", "med-task", "low-task"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut d = dash();
        d.create_issue("Top task", Priority::Top, None).unwrap();
        d.create_issue("Low task", Priority::Low, None).unwrap();
        d.create_issue("Med task", Priority::Medium, None).unwrap();

        d.sort_by_priority(SortDirection::Ascending).unwrap();
        let first = d.vault().read_text("Dashboard.md").unwrap();
        d.sort_by_priority(SortDirection::Ascending).unwrap();
        let second = d.vault().read_text("Dashboard.md").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_fewer_than_two_is_noop() {
        let mut d = dash();
        d.create_issue("Lonely", Priority::Medium, None).unwrap();
        let before = d.vault().read_text("Dashboard.md").unwrap();
        assert!(!d.sort_by_priority(SortDirection::Ascending).unwrap());
        assert_eq!(d.vault().read_text("Dashboard.md").unwrap(), before);
    }

    #[test]
    fn test_sort_empty_skeleton_is_noop() {
        let mut d = dash();
        d.vault_mut()
            .write_text("Dashboard.md", &builder::skeleton("work"))
            .unwrap();
        let before = d.vault().read_text("Dashboard.md").unwrap();
        assert!(!d.sort_by_priority(SortDirection::Ascending).unwrap());
        assert_eq!(d.vault().read_text("Dashboard.md").unwrap(), before);
    }

    #[test]
    fn test_sort_by_created() {
        let mut d = dash();
        d.create_issue("Old", Priority::Medium, None).unwrap();
        d.create_issue("New", Priority::Medium, None).unwrap();
        d.create_issue("Dateless", Priority::Medium, None).unwrap();

        let old = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let new = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let old_text = frontmatter::render_issue_file(&IssueFile {
            created: Some(old),
            ..IssueFile::default()
        });
        let new_text = frontmatter::render_issue_file(&IssueFile {
            created: Some(new),
            ..IssueFile::default()
        });
        let none_text = frontmatter::render_issue_file(&IssueFile::default());
        let vault = d.vault_mut();
        vault.write_text("Issues/Active/old.md", &old_text).unwrap();
        vault.write_text("Issues/Active/new.md", &new_text).unwrap();
        vault
            .write_text("Issues/Active/dateless.md", &none_text)
            .unwrap();

        assert!(d.sort_by_created(SortDirection::Ascending).unwrap());
        // Missing created sorts as epoch 0, so it comes first ascending.
        assert_eq!(active_ids(&d), vec!["dateless", "old", "new"]);

        assert!(d.sort_by_created(SortDirection::Descending).unwrap());
        assert_eq!(active_ids(&d), vec!["new", "old", "dateless"]);
    }

    #[test]
    fn test_sort_by_edited() {
        let mut d = dash();
        d.create_issue("First", Priority::Medium, None).unwrap();
        d.create_issue("Second", Priority::Medium, None).unwrap();

        let vault = d.vault_mut();
        vault.set_modified(
            "Issues/Active/first.md",
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        );
        vault.set_modified(
            "Issues/Active/second.md",
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        );

        assert!(d.sort_by_edited(SortDirection::Ascending).unwrap());
        assert_eq!(active_ids(&d), vec!["second", "first"]);
    }

    #[test]
    fn test_conservation_across_moves() {
        let mut d = dash();
        for name in ["Alpha", "Beta", "Gamma"] {
            d.create_issue(name, Priority::Medium, None).unwrap();
        }
        let before = all_ids(&d);

        d.move_to_archive("beta").unwrap();
        d.move_issue("gamma", MoveDirection::Up).unwrap();
        d.move_to_archive("alpha").unwrap();
        d.move_to_active("beta").unwrap();
        d.move_to_position("gamma", SectionEdge::Bottom).unwrap();

        assert_eq!(all_ids(&d), before);
    }

    #[test]
    fn test_separator_within_window_is_stripped() {
        let mut d = dash();
        d.create_issue("Keeper", Priority::Medium, None).unwrap();
        d.create_issue("Mover", Priority::Medium, None).unwrap();

        // Plant a legacy separator seven bytes after the mover's end marker
        // and another one fifty bytes later inside the notes region.
        let text = d.vault().read_text("Dashboard.md").unwrap();
        let end_marker = markers::issue_end("mover");
        let at = text.find(&end_marker).unwrap() + end_marker.len();
        let mut planted = text.clone();
        planted.insert_str(at, "\n\n\n\n\n\n\n---");
        d.vault_mut().write_text("Dashboard.md", &planted).unwrap();

        d.move_to_archive("mover").unwrap();
        let after = d.vault().read_text("Dashboard.md").unwrap();
        let active_region = &after[..after.find(markers::ACTIVE_END).unwrap()];
        assert!(
            !active_region.contains("---\n"),
            "separator inside the window must go with the block"
        );
        assert_eq!(all_ids(&d), vec!["keeper", "mover"]);
    }

    #[test]
    fn test_separator_outside_window_is_kept() {
        let mut d = dash();
        d.create_issue("Mover", Priority::Medium, None).unwrap();

        let text = d.vault().read_text("Dashboard.md").unwrap();
        let end_marker = markers::issue_end("mover");
        let at = text.find(&end_marker).unwrap() + end_marker.len();
        let filler = "\nfifty bytes of unrelated prose keeping its distance\n---";
        assert!(filler.find("---").unwrap() > markers::SEPARATOR_WINDOW);
        let mut planted = text.clone();
        planted.insert_str(at, filler);
        d.vault_mut().write_text("Dashboard.md", &planted).unwrap();

        d.move_to_archive("mover").unwrap();
        let after = d.vault().read_text("Dashboard.md").unwrap();
        assert!(after.contains("unrelated prose"));
        assert!(after.contains("prose keeping its distance\n---"));
    }

    #[test]
    fn test_add_repairs_missing_archive_markers_without_data_loss() {
        let mut d = dash();
        d.create_issue("Survivor", Priority::Medium, None).unwrap();

        // Chop the document off at the archive heading, losing both archive
        // markers but keeping the Active section intact.
        let text = d.vault().read_text("Dashboard.md").unwrap();
        let cut = text.find("# Archive").unwrap();
        d.vault_mut()
            .write_text("Dashboard.md", &text[..cut])
            .unwrap();
        assert!(!parser::has_markers(&d.vault().read_text("Dashboard.md").unwrap()));

        d.create_issue("Newcomer", Priority::Medium, None).unwrap();
        let repaired = d.vault().read_text("Dashboard.md").unwrap();
        assert!(parser::has_markers(&repaired));
        assert_eq!(active_ids(&d), vec!["survivor", "newcomer"]);
    }

    #[test]
    fn test_add_refuses_ambiguous_partial_markers() {
        let mut d = dash();
        let broken = format!("# Something\n{}\n", markers::ACTIVE_START);
        d.vault_mut().write_text("Dashboard.md", &broken).unwrap();
        assert!(matches!(
            d.create_issue("Task", Priority::Medium, None),
            Err(DashboardError::CorruptStructure { .. })
        ));
    }

    #[test]
    fn test_set_priority_rewrites_block_and_file() {
        let mut d = dash();
        d.create_issue("Task", Priority::Low, None).unwrap();
        assert!(d.set_priority("task", Priority::Top).unwrap());

        let parsed = d.snapshot().unwrap();
        assert_eq!(parsed.active_issues[0].priority, Priority::Top);
        let file = d.vault().read_text("Issues/Active/task.md").unwrap();
        assert!(file.contains("priority: top\n"));
        assert!(!d.set_priority("ghost", Priority::Top).unwrap());
    }

    #[test]
    fn test_set_github_links_updates_block_and_migrates_file() {
        let mut d = dash();
        d.create_issue("Task", Priority::Medium, None).unwrap();

        // Age the file into the legacy single-block format first.
        let legacy = "---\nstatus: active\npriority: medium\ngithub:\n  url: \"https://old.example\"\n---\n";
        d.vault_mut()
            .write_text("Issues/Active/task.md", legacy)
            .unwrap();

        let link = GithubLink {
            url: "https://github.com/acme/app/issues/1".to_string(),
            number: Some(1),
            ..GithubLink::default()
        };
        assert!(d.set_github_links("task", &[link]).unwrap());

        let parsed = d.snapshot().unwrap();
        assert_eq!(
            parsed.active_issues[0].github_links,
            vec!["https://github.com/acme/app/issues/1"]
        );
        let file = d.vault().read_text("Issues/Active/task.md").unwrap();
        assert!(file.contains("github_links:\n"));
        assert!(!file.contains("github:\n"));
    }

    #[test]
    fn test_rebuild_from_files_is_deterministic() {
        let mut d = dash();
        d.create_issue("Top task", Priority::Top, None).unwrap();
        d.create_issue("Low task", Priority::Low, None).unwrap();
        d.create_issue("Archived task", Priority::Medium, None).unwrap();
        d.move_to_archive("archived-task").unwrap();

        let count = d.rebuild_from_files().unwrap();
        assert_eq!(count, 3);
        let first = d.vault().read_text("Dashboard.md").unwrap();
        let count = d.rebuild_from_files().unwrap();
        assert_eq!(count, 3);
        let second = d.vault().read_text("Dashboard.md").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rebuild_ignores_corrupt_dashboard_and_preserves_notes() {
        let mut d = dash();
        d.create_issue("Alpha", Priority::High, None).unwrap();
        d.create_issue("Beta", Priority::Low, None).unwrap();

        // Corrupt the document beyond incremental repair, keeping the notes.
        let text = d.vault().read_text("Dashboard.md").unwrap();
        let with_notes = text.replace(
            &format!("{}\n", markers::NOTES),
            &format!("{}\nkeep these notes\n", markers::NOTES),
        );
        let corrupted = with_notes.replace(markers::ACTIVE_END, "");
        d.vault_mut().write_text("Dashboard.md", &corrupted).unwrap();

        let count = d.rebuild_from_files().unwrap();
        assert_eq!(count, 2);
        let rebuilt = d.vault().read_text("Dashboard.md").unwrap();
        assert!(parser::has_markers(&rebuilt));
        assert_eq!(parser::extract_notes(&rebuilt).unwrap(), "keep these notes");
        // Priority ascending: high before low.
        assert_eq!(active_ids(&d), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_rebuild_orders_by_priority_then_created_desc() {
        let mut d = dash();
        let old = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let new = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        for (name, created, priority) in [
            ("older", old, Priority::High),
            ("newer", new, Priority::High),
            ("urgent", old, Priority::Top),
        ] {
            let file = IssueFile {
                created: Some(created),
                priority,
                ..IssueFile::default()
            };
            d.vault_mut()
                .write_text(
                    &format!("Issues/Active/{name}.md"),
                    &frontmatter::render_issue_file(&file),
                )
                .unwrap();
        }

        d.rebuild_from_files().unwrap();
        assert_eq!(active_ids(&d), vec!["urgent", "newer", "older"]);
    }

    #[test]
    fn test_excise_strips_block_newline_only_without_separator() {
        let text = "before\nBLOCK\nafter\n";
        let range = 7..12;
        let (out, block) = excise(text, &range);
        assert_eq!(block, "BLOCK");
        assert_eq!(out, "before\nafter\n");
    }
}
