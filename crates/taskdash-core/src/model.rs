//! Core data types for `taskdash-core`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issue urgency level.
///
/// Declaration order is the sort order: `Top` is the most urgent and carries
/// the lowest ordinal, mirroring how the dashboard sorts (ascending ordinal
/// puts the most urgent issues first). Note this is the opposite of the
/// calendar "priority 1..n" convention.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Top,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort ordinal (0 = most urgent). Comparators subtract these.
    #[must_use]
    pub const fn ordinal(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parse a priority field as the dashboard parser does: unrecognized or
    /// absent values fall back to `Medium` instead of erroring.
    #[must_use]
    pub fn parse_loose(value: &str) -> Self {
        Self::from_str(value).unwrap_or_default()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = crate::error::DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(crate::error::DashboardError::InvalidPriority {
                value: other.to_string(),
            }),
        }
    }
}

/// Issue lifecycle status, as recorded in the issue file's frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    #[default]
    Active,
    Archived,
}

impl IssueStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = crate::error::DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            other => Err(crate::error::DashboardError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// One issue record as extracted from a dashboard document.
///
/// `block_start`/`block_end` are absolute byte offsets within the original
/// document text (marker-inclusive), not the section substring. The writer
/// splices against the full document, so section-relative offsets would be
/// useless to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardIssue {
    /// Slug id, unique within the vault.
    pub id: String,
    /// Human name.
    pub name: String,
    /// Vault path of the backing issue file.
    pub path: String,
    pub priority: Priority,
    /// GitHub link URLs embedded as `github_link:` lines.
    pub github_links: Vec<String>,
    /// Absolute offset of the block's start marker.
    #[serde(skip)]
    pub block_start: usize,
    /// Absolute offset just past the block's end marker.
    #[serde(skip)]
    pub block_end: usize,
}

/// A GitHub link with cached metadata, as stored in issue-file frontmatter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GithubLink {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fetched: Option<String>,
}

impl GithubLink {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// The parsed contents of one issue file.
///
/// Issue files are the authoritative source; the dashboard's embedded blocks
/// are a denormalized projection of these plus manual ordering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IssueFile {
    /// Creation timestamp from frontmatter, if present and parseable.
    pub created: Option<DateTime<Utc>>,
    pub status: IssueStatus,
    pub priority: Priority,
    pub github_links: Vec<GithubLink>,
    /// Free-form body after the frontmatter block (typically a checklist).
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordinals_ascend_with_falling_urgency() {
        assert_eq!(Priority::Top.ordinal(), 0);
        assert_eq!(Priority::High.ordinal(), 1);
        assert_eq!(Priority::Medium.ordinal(), 2);
        assert_eq!(Priority::Low.ordinal(), 3);
        assert!(Priority::Top < Priority::Low);
    }

    #[test]
    fn test_priority_roundtrip() {
        for p in [
            Priority::Top,
            Priority::High,
            Priority::Medium,
            Priority::Low,
        ] {
            assert_eq!(Priority::from_str(p.as_str()).unwrap(), p);
        }
    }

    #[test]
    fn test_priority_parse_loose_defaults_medium() {
        assert_eq!(Priority::parse_loose("urgent"), Priority::Medium);
        assert_eq!(Priority::parse_loose(""), Priority::Medium);
        assert_eq!(Priority::parse_loose(" TOP "), Priority::Top);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(IssueStatus::from_str("Active").unwrap(), IssueStatus::Active);
        assert_eq!(
            IssueStatus::from_str("archived").unwrap(),
            IssueStatus::Archived
        );
        assert!(IssueStatus::from_str("done").is_err());
    }
}
