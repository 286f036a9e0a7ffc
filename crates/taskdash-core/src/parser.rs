//! Dashboard document parser.
//!
//! Locates section boundaries by first-occurrence marker search and scans
//! each section for issue blocks. Parsing never fails: absent markers
//! degrade to best-effort bounds (document start/end) and malformed issue
//! entries are skipped, because a half-broken dashboard must still render
//! and the rebuild path needs to read notes out of corrupted documents.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

use crate::markers;
use crate::model::{DashboardIssue, Priority};

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^name:[ \t]*(.*)$").unwrap());
static PATH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^path:[ \t]*(.*)$").unwrap());
static PRIORITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^priority:[ \t]*(\S+)").unwrap());
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^github_link:[ \t]*(\S+)").unwrap());

const ISSUE_HEAD: &str = "%% ISSUE:";
const START_TAIL: &str = ":START %%";

/// Result of parsing a dashboard document.
///
/// Section bounds are byte offsets into the original text: `*_start` is the
/// first byte of section content (just past the START marker, or 0 when the
/// marker is absent) and `*_end` is the offset of the END marker (or the
/// text length when absent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDashboard {
    pub active_issues: Vec<DashboardIssue>,
    pub archived_issues: Vec<DashboardIssue>,
    pub active_start: usize,
    pub active_end: usize,
    pub archive_start: usize,
    pub archive_end: usize,
}

/// Parse a dashboard document.
#[must_use]
pub fn parse(text: &str) -> ParsedDashboard {
    let active_start = text
        .find(markers::ACTIVE_START)
        .map_or(0, |i| i + markers::ACTIVE_START.len());
    let active_end = text.find(markers::ACTIVE_END).unwrap_or(text.len());
    let archive_start = text
        .find(markers::ARCHIVE_START)
        .map_or(0, |i| i + markers::ARCHIVE_START.len());
    let archive_end = text.find(markers::ARCHIVE_END).unwrap_or(text.len());

    ParsedDashboard {
        active_issues: scan_section(text, active_start..active_end),
        archived_issues: scan_section(text, archive_start..archive_end),
        active_start,
        active_end,
        archive_start,
        archive_end,
    }
}

/// True iff all four section markers are present.
#[must_use]
pub fn has_markers(text: &str) -> bool {
    text.contains(markers::ACTIVE_START)
        && text.contains(markers::ACTIVE_END)
        && text.contains(markers::ARCHIVE_START)
        && text.contains(markers::ARCHIVE_END)
}

/// True iff none of the four section markers is present.
#[must_use]
pub fn has_no_markers(text: &str) -> bool {
    !text.contains(markers::ACTIVE_START)
        && !text.contains(markers::ACTIVE_END)
        && !text.contains(markers::ARCHIVE_START)
        && !text.contains(markers::ARCHIVE_END)
}

/// Locate one issue block by direct marker search, marker-inclusive.
///
/// This is the writer's fast path for move/remove; it does not require a
/// full parse and does not care which section the block sits in.
#[must_use]
pub fn find_issue_block(text: &str, id: &str) -> Option<Range<usize>> {
    let start_marker = markers::issue_start(id);
    let end_marker = markers::issue_end(id);
    let start = text.find(&start_marker)?;
    let end_rel = text[start..].find(&end_marker)?;
    Some(start..start + end_rel + end_marker.len())
}

/// Parse a standalone block (as returned by block excision) into its fields.
///
/// Offsets in the result are relative to the block text itself.
#[must_use]
pub fn parse_block(block: &str) -> Option<DashboardIssue> {
    scan_section(block, 0..block.len()).into_iter().next()
}

fn scan_section(text: &str, range: Range<usize>) -> Vec<DashboardIssue> {
    let mut issues = Vec::new();
    if range.start >= range.end || range.end > text.len() {
        return issues;
    }
    let mut pos = range.start;
    while let Some(rel) = text[pos..range.end].find(ISSUE_HEAD) {
        let head = pos + rel;
        let after_head = head + ISSUE_HEAD.len();
        // Only START markers open a block; anything else (stray END markers,
        // malformed heads) is stepped over.
        let Some(tail_rel) = text[after_head..range.end].find(" %%") else {
            break;
        };
        let token = &text[after_head..after_head + tail_rel + 3];
        let Some(id) = token.strip_suffix(START_TAIL) else {
            pos = after_head;
            continue;
        };
        let start_marker_end = after_head + tail_rel + 3;
        let end_marker = markers::issue_end(id);
        let Some(end_rel) = text[start_marker_end..range.end].find(&end_marker) else {
            pos = after_head;
            continue;
        };
        let block_end = start_marker_end + end_rel + end_marker.len();

        let body = &text[start_marker_end..start_marker_end + end_rel];
        if let Some(issue) = extract_issue(id, body, head, block_end) {
            issues.push(issue);
        }
        pos = block_end;
    }
    issues
}

fn extract_issue(id: &str, body: &str, block_start: usize, block_end: usize) -> Option<DashboardIssue> {
    let name = capture(&NAME_RE, body).unwrap_or_default();
    let path = capture(&PATH_RE, body).unwrap_or_default();
    // An entry with neither a name nor a path is malformed; skip it rather
    // than aborting the whole parse.
    if name.is_empty() && path.is_empty() {
        return None;
    }
    let priority = capture(&PRIORITY_RE, body)
        .map_or_else(Priority::default, |v| Priority::parse_loose(&v));
    let github_links = LINK_RE
        .captures_iter(body)
        .map(|c| c[1].to_string())
        .collect();
    Some(DashboardIssue {
        id: id.to_string(),
        name,
        path,
        priority,
        github_links,
        block_start,
        block_end,
    })
}

fn capture(re: &Regex, body: &str) -> Option<String> {
    re.captures(body)
        .map(|c| c[1].trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Extract the free-text Notes section, if any.
///
/// Looks between the Active section's end region and the Archive header,
/// preferring the dedicated notes marker over a bare `# Notes` heading.
/// Surrounding blank lines are not part of the notes.
#[must_use]
pub fn extract_notes(text: &str) -> Option<String> {
    let search_from = text
        .find(markers::ACTIVE_END)
        .map_or(0, |i| i + markers::ACTIVE_END.len());
    let tail = &text[search_from..];

    let content_start = tail.find(markers::NOTES).map_or_else(
        || heading_start(tail, "# Notes").map(|i| i + "# Notes".len()),
        |i| Some(i + markers::NOTES.len()),
    )?;

    let after = &tail[content_start..];
    let content_end = heading_start(after, "# Archive")
        .or_else(|| after.find(markers::ARCHIVE_START))
        .unwrap_or(after.len());

    Some(after[..content_end].trim_matches('\n').to_string())
}

// Offset of a heading found at a line start.
fn heading_start(text: &str, heading: &str) -> Option<usize> {
    if text.starts_with(heading) {
        return Some(0);
    }
    let needle = format!("\n{heading}");
    text.find(&needle).map(|i| i + 1)
}
