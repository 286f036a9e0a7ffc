//! Issue block and document skeleton builders.
//!
//! Deterministic, whitespace-exact rendering: the writer's splice points are
//! newline-sensitive, so every builder output ends with exactly one newline
//! and the parser round-trips every field the block embeds.

use crate::markers;
use crate::model::Priority;

/// Boilerplate line closing a generated dashboard document.
pub const FOOTER: &str =
    "*Issue blocks between the markers are managed automatically; edit the issue files instead.*";

/// Render one issue block, marker-inclusive, trailing newline included.
#[must_use]
pub fn issue_block(
    id: &str,
    name: &str,
    path: &str,
    dashboard_id: &str,
    priority: Priority,
    github_links: &[String],
) -> String {
    let mut block = String::new();
    block.push_str(&markers::issue_start(id));
    block.push('\n');
    block.push_str(markers::CONTROLS_FENCE);
    block.push('\n');
    block.push_str(&format!("issue: {id}\n"));
    block.push_str(&format!("name: {name}\n"));
    block.push_str(&format!("path: {path}\n"));
    block.push_str(&format!("dashboard: {dashboard_id}\n"));
    block.push_str(&format!("priority: {priority}\n"));
    for url in github_links {
        block.push_str(&format!("github_link: {url}\n"));
    }
    block.push_str(markers::FENCE_CLOSE);
    block.push('\n');
    block.push_str(&markers::issue_end(id));
    block.push('\n');
    block
}

/// Render the sort-control sub-block heading the Active section.
#[must_use]
pub fn sort_block(dashboard_id: &str) -> String {
    format!(
        "{}\ndashboard: {dashboard_id}\n{}\n",
        markers::SORT_FENCE,
        markers::FENCE_CLOSE
    )
}

/// Render a complete dashboard document.
///
/// `active_blocks` and `archive_blocks` are concatenations of
/// [`issue_block`] outputs (possibly empty); `notes` is inserted verbatim
/// into the Notes section. [`skeleton`] and the rebuild path both go through
/// here so a freshly built and a rebuilt document share one layout.
#[must_use]
pub fn document(dashboard_id: &str, active_blocks: &str, notes: &str, archive_blocks: &str) -> String {
    let mut doc = String::new();
    doc.push_str("# Active Issues\n");
    doc.push_str(markers::ACTIVE_START);
    doc.push('\n');
    doc.push_str(&sort_block(dashboard_id));
    doc.push_str(active_blocks);
    doc.push_str(markers::ACTIVE_END);
    doc.push_str("\n# Notes\n");
    doc.push_str(markers::NOTES);
    doc.push('\n');
    let notes = notes.trim_matches('\n');
    if !notes.is_empty() {
        doc.push_str(notes);
        doc.push('\n');
    }
    doc.push_str("# Archive\n");
    doc.push_str(markers::ARCHIVE_START);
    doc.push('\n');
    doc.push_str(archive_blocks);
    doc.push_str(markers::ARCHIVE_END);
    doc.push_str("\n\n");
    doc.push_str(FOOTER);
    doc.push('\n');
    doc
}

/// Minimal valid marker scaffold for a new dashboard document.
#[must_use]
pub fn skeleton(dashboard_id: &str) -> String {
    document(dashboard_id, "", "", "")
}

/// Archive scaffold appended when repairing a document whose archive
/// markers are missing but whose Active section is intact.
#[must_use]
pub fn archive_scaffold() -> String {
    format!(
        "\n# Archive\n{}\n{}\n",
        markers::ARCHIVE_START,
        markers::ARCHIVE_END
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn test_block_layout_is_exact() {
        let block = issue_block(
            "fix-login",
            "Fix login",
            "Issues/Active/fix-login.md",
            "work",
            Priority::Top,
            &["https://github.com/acme/app/issues/7".to_string()],
        );
        assert_eq!(
            block,
            "%% ISSUE:fix-login:START %%\n\
             ```tasks-dashboard-controls\n\
             issue: fix-login\n\
             name: Fix login\n\
             path: Issues/Active/fix-login.md\n\
             dashboard: work\n\
             priority: top\n\
             github_link: https://github.com/acme/app/issues/7\n\
             ```\n\
             %% ISSUE:fix-login:END %%\n"
        );
    }

    #[test]
    fn test_skeleton_has_all_markers_and_no_issues() {
        let text = skeleton("work");
        assert!(parser::has_markers(&text));
        let parsed = parser::parse(&text);
        assert!(parsed.active_issues.is_empty());
        assert!(parsed.archived_issues.is_empty());
    }

    #[test]
    fn test_skeleton_is_deterministic() {
        assert_eq!(skeleton("work"), skeleton("work"));
    }

    // Round-trip: parse(build(fields)) restores every embedded field.
    #[test]
    fn test_build_parse_roundtrip() {
        let links = vec![
            "https://github.com/acme/app/issues/7".to_string(),
            "https://github.com/acme/app/pull/9".to_string(),
        ];
        let block = issue_block(
            "ship-it",
            "Ship it",
            "Issues/Active/ship-it.md",
            "work",
            Priority::Low,
            &links,
        );
        let text = document("work", &block, "", "");
        let parsed = parser::parse(&text);
        assert_eq!(parsed.active_issues.len(), 1);
        let issue = &parsed.active_issues[0];
        assert_eq!(issue.id, "ship-it");
        assert_eq!(issue.name, "Ship it");
        assert_eq!(issue.path, "Issues/Active/ship-it.md");
        assert_eq!(issue.priority, Priority::Low);
        assert_eq!(issue.github_links, links);
    }

    #[test]
    fn test_document_embeds_notes_between_sections() {
        let text = document("work", "", "keep me\nand me", "");
        let notes = parser::extract_notes(&text).unwrap();
        assert_eq!(notes, "keep me\nand me");
    }
}
