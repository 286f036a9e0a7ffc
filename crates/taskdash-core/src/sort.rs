//! Pure comparators consumed by the dashboard writer's sort operations.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::model::Priority;

/// Requested sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Apply this direction to a natural-order comparison.
    #[must_use]
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }
}

/// Priority ordering: ascending ordinal, most urgent first.
#[must_use]
pub fn compare_priority(a: Priority, b: Priority) -> Ordering {
    (a.ordinal() - b.ordinal()).cmp(&0)
}

/// Created-date ordering. Missing or unparsable timestamps sort as epoch 0.
#[must_use]
pub fn compare_created(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    let epoch = DateTime::<Utc>::UNIX_EPOCH;
    a.unwrap_or(epoch).cmp(&b.unwrap_or(epoch))
}

/// Modified-time ordering. Missing metadata sorts as epoch 0.
#[must_use]
pub fn compare_modified(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    compare_created(a, b)
}

/// Rebuild ordering: priority ascending, then created descending as the
/// tie-break.
#[must_use]
pub fn compare_rebuild(
    a_priority: Priority,
    a_created: Option<DateTime<Utc>>,
    b_priority: Priority,
    b_created: Option<DateTime<Utc>>,
) -> Ordering {
    compare_priority(a_priority, b_priority)
        .then_with(|| compare_created(a_created, b_created).reverse())
}
