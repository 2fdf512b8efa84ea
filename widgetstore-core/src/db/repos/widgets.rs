//! Widget repository - the tag query.
//!
//! One statement does all the work:
//! - inner join through `widget_tag_map`/`tag` filters to widgets
//!   carrying the requested tag (exact match, collation-sensitive)
//! - a second alias of the same join aggregates ALL tag ids per
//!   matching widget, not just the filter tag
//! - left join through `widget_dongle_map`/`dongle` aggregates dongle
//!   ids, yielding an empty array when none exist
//! - soft-deleted widgets are excluded before grouping
//! - rows are grouped per widget and ordered by widget id ascending,
//!   so LIMIT/OFFSET pagination is stable across calls

use sqlx::postgres::PgRow;
use sqlx::Row;
use tracing::{debug, error};

use crate::config::DbConfig;
use crate::db::client::DbClient;
use crate::error::{DbError, DbResult};
use crate::models::{normalize_ids, Widget};

const FIND_WIDGETS_WITH_TAG_SQL: &str = r#"
SELECT
    w.id,
    w.name,
    array_agg(DISTINCT t.id ORDER BY t.id) AS tag_ids,
    COALESCE(
        array_agg(DISTINCT d.id ORDER BY d.id)
            FILTER (WHERE d.id IS NOT NULL),
        '{}'
    ) AS dongle_ids
FROM widget w
JOIN widget_tag_map ftm ON ftm.widget_id = w.id
JOIN tag ft ON ft.id = ftm.tag_id AND ft.tag = $1
JOIN widget_tag_map wtm ON wtm.widget_id = w.id
JOIN tag t ON t.id = wtm.tag_id
LEFT JOIN widget_dongle_map wdm ON wdm.widget_id = w.id
LEFT JOIN dongle d ON d.id = wdm.dongle_id
WHERE NOT w.deleted
GROUP BY w.id, w.name
ORDER BY w.id
LIMIT $2 OFFSET $3
"#;

/// Widget repository.
///
/// Holds only the connection credentials; every call opens and closes
/// its own connection, so a repo value is freely reusable and carries
/// no state between invocations.
pub struct WidgetRepo {
    config: DbConfig,
}

impl WidgetRepo {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    /// Find non-deleted widgets carrying `tag`, ordered by widget id
    /// ascending, with `offset`/`limit` applied after grouping.
    ///
    /// Returns `Ok(vec![])` when no widget matches; any connection or
    /// query failure propagates as `Err` so callers can tell "nothing
    /// found" from "query failed".
    pub async fn find_widgets_with_tag(
        &self,
        tag: &str,
        offset: u64,
        limit: u64,
    ) -> DbResult<Vec<Widget>> {
        let mut client = DbClient::connect(&self.config).await?;
        let result = fetch_widgets(&mut client, tag, offset, limit).await;
        client.close().await;

        match &result {
            Ok(widgets) => debug!(tag, count = widgets.len(), "widget tag query complete"),
            // Full detail stays in the internal log; callers render
            // DbError::public_message() to anything untrusted.
            Err(err) => error!(tag, error = %err, "widget tag query failed"),
        }

        result
    }
}

async fn fetch_widgets(
    client: &mut DbClient,
    tag: &str,
    offset: u64,
    limit: u64,
) -> DbResult<Vec<Widget>> {
    let query = sqlx::query(FIND_WIDGETS_WITH_TAG_SQL)
        .bind(tag)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX));

    let rows = client.fetch_all(query).await?;
    rows.into_iter().map(widget_from_row).collect()
}

fn widget_from_row(row: PgRow) -> DbResult<Widget> {
    let tag_ids: Vec<i64> = row.try_get("tag_ids").map_err(DbError::Query)?;
    let dongle_ids: Vec<i64> = row.try_get("dongle_ids").map_err(DbError::Query)?;

    Ok(Widget {
        id: row.try_get("id").map_err(DbError::Query)?,
        name: row.try_get("name").map_err(DbError::Query)?,
        tag_ids: normalize_ids(tag_ids),
        dongle_ids: normalize_ids(dongle_ids),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // The statement is a constant, so its structural guarantees can be
    // pinned without a database.

    #[test]
    fn query_excludes_soft_deleted_widgets() {
        assert!(FIND_WIDGETS_WITH_TAG_SQL.contains("NOT w.deleted"));
    }

    #[test]
    fn query_orders_by_widget_id_before_paginating() {
        let order = FIND_WIDGETS_WITH_TAG_SQL
            .find("ORDER BY w.id")
            .expect("explicit ordering");
        let limit = FIND_WIDGETS_WITH_TAG_SQL
            .find("LIMIT $2 OFFSET $3")
            .expect("bound pagination");
        assert!(order < limit);
    }

    #[test]
    fn query_binds_rather_than_interpolates() {
        assert!(FIND_WIDGETS_WITH_TAG_SQL.contains("ft.tag = $1"));
        assert!(!FIND_WIDGETS_WITH_TAG_SQL.contains("%s"));
        assert!(!FIND_WIDGETS_WITH_TAG_SQL.contains("%d"));
    }

    #[test]
    fn query_aggregates_all_tags_not_just_the_filter_tag() {
        // Second alias of widget_tag_map feeds the aggregate.
        assert!(FIND_WIDGETS_WITH_TAG_SQL.contains("JOIN widget_tag_map wtm"));
        assert!(FIND_WIDGETS_WITH_TAG_SQL.contains("array_agg(DISTINCT t.id ORDER BY t.id)"));
    }

    #[test]
    fn query_defaults_missing_dongles_to_empty_array() {
        assert!(FIND_WIDGETS_WITH_TAG_SQL.contains("LEFT JOIN widget_dongle_map"));
        assert!(FIND_WIDGETS_WITH_TAG_SQL.contains("'{}'"));
    }
}
