//! Catalog records returned by the query layer.
//!
//! All entities are persisted externally and read-only from this
//! crate's perspective; nothing here creates or deletes rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog widget with its full tag and dongle associations.
///
/// `tag_ids` is non-empty (a widget without tags never matches the
/// query's inner join); `dongle_ids` may be empty. Both lists are
/// deduplicated and sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: i64,
    pub name: String,
    pub tag_ids: Vec<i64>,
    pub dongle_ids: Vec<i64>,
}

/// A label entity; many-to-many with widgets via `widget_tag_map`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: i64,
    pub tag: String,
}

/// A hardware association entity; many-to-many with widgets via
/// `widget_dongle_map`, optional per widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Dongle {
    pub id: i64,
}

/// Sort ascending and drop duplicates.
///
/// The SQL aggregates already order and de-duplicate; this runs on every
/// mapped row anyway so the invariant holds regardless of what the
/// database hands back.
pub fn normalize_ids(mut ids: Vec<i64>) -> Vec<i64> {
    ids.sort_unstable();
    ids.dedup();
    ids
}
