//! Frontmatter mini-parser for issue files.
//!
//! Handles the leading `---`-delimited metadata block: scalar `key: value`
//! lines, the `github_links:` list with nested per-link metadata, and the
//! legacy single-`github:` block it migrated from. This is deliberately a
//! hand-written line scanner, not a YAML parser; the format is line-oriented
//! and the fields are few.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::model::{GithubLink, IssueFile, Priority};

/// Keys rejected during parsing. Untrusted note content must not be able to
/// inject keys that collide with scripting-engine object internals.
const FORBIDDEN_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];

/// Byte range of the frontmatter interior plus the offset just past the
/// closing `---` line, or `None` if the document has no frontmatter.
fn bounds(text: &str) -> Option<(usize, usize, usize)> {
    let rest = text.strip_prefix("---\n")?;
    let inner_start = 4;
    let mut search = 0;
    loop {
        let close = rest[search..].find("\n---")? + search;
        let after = close + 4;
        // Closing fence must be a line of its own.
        if rest[after..].is_empty() || rest[after..].starts_with('\n') {
            let block_end = inner_start + after + usize::from(rest[after..].starts_with('\n'));
            return Some((inner_start, inner_start + close + 1, block_end));
        }
        search = after;
    }
}

/// Parse scalar `key: value` pairs from the leading frontmatter block.
///
/// Splits each top-level line at its first colon; indented lines and list
/// entries are skipped here (see [`github_links`]). Forbidden keys are
/// dropped. Returns an empty map when no frontmatter is present.
#[must_use]
pub fn parse(text: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    let Some((start, end, _)) = bounds(text) else {
        return map;
    };
    for line in text[start..end].lines() {
        if line.starts_with(' ') || line.starts_with('\t') || line.starts_with("- ") {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() || FORBIDDEN_KEYS.contains(&key) {
            continue;
        }
        map.insert(key.to_string(), value.trim().to_string());
    }
    map
}

/// Extract GitHub links from frontmatter.
///
/// The `github_links:` list form wins whenever it has entries; otherwise the
/// legacy single-`github:` block's `url:` field is consulted.
#[must_use]
pub fn github_links(text: &str) -> Vec<GithubLink> {
    let Some((start, end, _)) = bounds(text) else {
        return Vec::new();
    };
    let inner = &text[start..end];

    let links = collect_list_links(inner);
    if !links.is_empty() {
        return links;
    }
    collect_legacy_link(inner).into_iter().collect()
}

fn collect_list_links(inner: &str) -> Vec<GithubLink> {
    let mut links: Vec<GithubLink> = Vec::new();
    let mut in_list = false;
    for line in inner.lines() {
        if line.trim_end() == "github_links:" {
            in_list = true;
            continue;
        }
        if !in_list {
            continue;
        }
        if !line.starts_with(' ') && !line.starts_with('\t') {
            break; // dedent ends the list
        }
        let entry = line.trim_start();
        if let Some(url) = entry.strip_prefix("- url:") {
            links.push(GithubLink::new(unquote(url)));
        } else if let Some(current) = links.last_mut() {
            apply_link_field(current, entry);
        }
    }
    links
}

fn collect_legacy_link(inner: &str) -> Option<GithubLink> {
    let mut in_block = false;
    let mut link = GithubLink::default();
    for line in inner.lines() {
        if line.trim_end() == "github:" {
            in_block = true;
            continue;
        }
        if !in_block {
            continue;
        }
        if !line.starts_with(' ') && !line.starts_with('\t') {
            break;
        }
        let entry = line.trim_start();
        if let Some(url) = entry.strip_prefix("url:") {
            link.url = unquote(url);
        } else {
            apply_link_field(&mut link, entry);
        }
    }
    (!link.url.is_empty()).then_some(link)
}

fn apply_link_field(link: &mut GithubLink, entry: &str) {
    if let Some(v) = entry.strip_prefix("number:") {
        link.number = v.trim().parse().ok();
    } else if let Some(v) = entry.strip_prefix("state:") {
        link.state = Some(unquote(v));
    } else if let Some(v) = entry.strip_prefix("title:") {
        link.title = Some(unquote(v));
    } else if let Some(v) = entry.strip_prefix("labels:") {
        link.labels = parse_labels(v);
    } else if let Some(v) = entry.strip_prefix("lastFetched:") {
        link.last_fetched = Some(unquote(v));
    }
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    value.replace("\\\"", "\"").replace("\\\\", "\\")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn parse_labels(value: &str) -> Vec<String> {
    value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(unquote)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Parse a `created:` timestamp. Accepts RFC 3339, a naive datetime, or a
/// bare date; anything else is `None` (sorted as epoch 0 downstream).
#[must_use]
pub fn parse_created(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Parse a complete issue file: frontmatter fields plus the free-form body.
///
/// Unrecognized status or priority values fall back to their defaults; the
/// issue file is user-edited text and must not abort dashboard operations.
#[must_use]
pub fn parse_issue_file(text: &str) -> IssueFile {
    let map = parse(text);
    let body = bounds(text).map_or_else(
        || text.to_string(),
        |(_, _, block_end)| text[block_end..].trim_start_matches('\n').to_string(),
    );
    IssueFile {
        created: map.get("created").and_then(|v| parse_created(v)),
        status: map
            .get("status")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default(),
        priority: map
            .get("priority")
            .map_or_else(Priority::default, |v| Priority::parse_loose(v)),
        github_links: github_links(text),
        body,
    }
}

/// Render the `github_links:` frontmatter list.
#[must_use]
pub fn render_links(links: &[GithubLink]) -> String {
    let mut out = String::from("github_links:\n");
    for link in links {
        out.push_str(&format!("  - url: {}\n", quote(&link.url)));
        if let Some(number) = link.number {
            out.push_str(&format!("    number: {number}\n"));
        }
        if let Some(state) = &link.state {
            out.push_str(&format!("    state: {}\n", quote(state)));
        }
        if let Some(title) = &link.title {
            out.push_str(&format!("    title: {}\n", quote(title)));
        }
        if !link.labels.is_empty() {
            let labels: Vec<String> = link.labels.iter().map(|l| quote(l)).collect();
            out.push_str(&format!("    labels: [{}]\n", labels.join(",")));
        }
        if let Some(fetched) = &link.last_fetched {
            out.push_str(&format!("    lastFetched: {}\n", quote(fetched)));
        }
    }
    out
}

/// Render a full issue file from its parsed form.
#[must_use]
pub fn render_issue_file(issue: &IssueFile) -> String {
    let mut out = String::from("---\n");
    if let Some(created) = issue.created {
        out.push_str(&format!(
            "created: {}\n",
            created.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        ));
    }
    out.push_str(&format!("status: {}\n", issue.status));
    out.push_str(&format!("priority: {}\n", issue.priority));
    if !issue.github_links.is_empty() {
        out.push_str(&render_links(&issue.github_links));
    }
    out.push_str("---\n");
    if !issue.body.is_empty() {
        out.push('\n');
        out.push_str(&issue.body);
    }
    out
}

/// Rewrite the GitHub link frontmatter, migrating the legacy format.
///
/// Any existing `github_links:` list and any legacy `github:` block are
/// removed and replaced by the rendered list form, so after the first write
/// that touches GitHub data the multi-link format is the only one present.
#[must_use]
pub fn set_github_links(text: &str, links: &[GithubLink]) -> String {
    let Some((start, end, _)) = bounds(text) else {
        return format!("---\n{}---\n{text}", render_links(links));
    };
    let mut inner = String::new();
    let mut skipping = false;
    for line in text[start..end].lines() {
        let is_block_head = line.trim_end() == "github_links:" || line.trim_end() == "github:";
        if is_block_head {
            skipping = true;
            continue;
        }
        if skipping && (line.starts_with(' ') || line.starts_with('\t')) {
            continue;
        }
        skipping = false;
        inner.push_str(line);
        inner.push('\n');
    }
    if !links.is_empty() {
        inner.push_str(&render_links(links));
    }
    format!("---\n{inner}---{}", &text[end + 3..])
}

/// Update or insert a scalar frontmatter key.
#[must_use]
pub fn set_key(text: &str, key: &str, value: &str) -> String {
    if FORBIDDEN_KEYS.contains(&key) {
        return text.to_string();
    }
    let Some((start, end, _)) = bounds(text) else {
        return format!("---\n{key}: {value}\n---\n{text}");
    };
    let mut inner = String::new();
    let mut replaced = false;
    for line in text[start..end].lines() {
        let is_target = !line.starts_with(' ')
            && !line.starts_with('\t')
            && line
                .split_once(':')
                .is_some_and(|(k, _)| k.trim() == key);
        if is_target {
            inner.push_str(&format!("{key}: {value}\n"));
            replaced = true;
        } else {
            inner.push_str(line);
            inner.push('\n');
        }
    }
    if !replaced {
        inner.push_str(&format!("{key}: {value}\n"));
    }
    format!("---\n{inner}---{}", &text[end + 3..])
}
