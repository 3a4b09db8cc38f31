//! Query engine implementation
//!
//! Provides the read operations over the catalog:
//! - Lookup by id
//! - Composable search (text + category + pagination)
//! - Category / subgroup listings
//! - Favorites and recently used emojis
//!
//! Reads never fail from the caller's point of view: errors are logged and
//! degrade to an empty result.

use std::collections::HashMap;
use rusqlite::{Connection, params_from_iter};
use rusqlite::types::Value;
use crate::Result;
use crate::emoji::{Emoji, EmojiId};
use crate::storage::EmojiStore;
use super::filter::{SearchFilter, sql_int};
use super::projection::{self, RawEmojiRow, EMOJI_COLUMNS};

/// Favorite indicator as a correlated subquery over `e`
const FAVORITE_FLAG: &str = "EXISTS(SELECT 1 FROM favorites f WHERE f.emoji_id = e.id) AS is_favorite";

/// Max ids bound per keyword lookup
const KEYWORD_BATCH: usize = 500;

/// Query engine for catalog reads
pub struct QueryEngine<'a> {
    store: &'a EmojiStore,
}

impl<'a> QueryEngine<'a> {
    /// Create a new query engine
    pub fn new(store: &'a EmojiStore) -> Self {
        Self { store }
    }

    /// Get a single emoji by id
    pub fn get_by_id(&self, id: EmojiId) -> Option<Emoji> {
        let sql = format!("SELECT {EMOJI_COLUMNS}, {FAVORITE_FLAG} FROM emojis e WHERE e.id = ?");
        let records = self.fetch_records(&sql, &[Value::Integer(id)]);
        degrade("get emoji", records).into_iter().next()
    }

    /// Search the catalog.
    ///
    /// Text matches the short name or any keyword (case-insensitive
    /// substring); category matches the group name exactly. Only supplied
    /// filters are applied. Results are ordered by short name and paged.
    pub fn search(&self, filter: &SearchFilter) -> Vec<Emoji> {
        let preds = filter.predicates();
        let sql = format!(
            "SELECT {EMOJI_COLUMNS}, {FAVORITE_FLAG} FROM emojis e{} \
             ORDER BY e.short_name ASC, e.id ASC LIMIT ? OFFSET ?",
            preds.where_clause()
        );
        let params = preds.params_with([sql_int(filter.limit), sql_int(filter.offset)]);
        tracing::debug!(?filter, "search");

        degrade("search emojis", self.fetch_records(&sql, &params))
    }

    /// Distinct non-empty group names, ascending
    pub fn list_categories(&self) -> Vec<String> {
        let result = self.fetch_strings(
            "SELECT DISTINCT group_name FROM emojis \
             WHERE group_name IS NOT NULL AND group_name != '' \
             ORDER BY group_name",
            &[],
        );
        degrade("list categories", result)
    }

    /// Distinct non-empty subgroups within a group, ascending
    pub fn list_subgroups(&self, category: &str) -> Vec<String> {
        let result = self.fetch_strings(
            "SELECT DISTINCT subgroup FROM emojis \
             WHERE group_name = ? AND subgroup IS NOT NULL AND subgroup != '' \
             ORDER BY subgroup",
            &[Value::Text(category.to_string())],
        );
        degrade("list subgroups", result)
    }

    /// Favorited emojis, most recently favorited first
    pub fn list_favorites(&self, limit: usize, offset: usize) -> Vec<Emoji> {
        let sql = format!(
            "SELECT {EMOJI_COLUMNS}, 1 AS is_favorite \
             FROM favorites f JOIN emojis e ON e.id = f.emoji_id \
             GROUP BY e.id \
             ORDER BY MAX(f.created_at) DESC, MAX(f.id) DESC \
             LIMIT ? OFFSET ?"
        );
        let records = self.fetch_records(&sql, &[sql_int(limit), sql_int(offset)]);
        degrade("list favorites", records)
    }

    /// Recently used emojis, one entry each, last used first
    pub fn list_recent(&self, limit: usize) -> Vec<Emoji> {
        let sql = format!(
            "SELECT {EMOJI_COLUMNS}, {FAVORITE_FLAG}, \
                    MAX(h.used_at) AS last_used, MAX(h.id) AS last_id \
             FROM history h JOIN emojis e ON e.id = h.emoji_id \
             GROUP BY e.id \
             ORDER BY last_used DESC, last_id DESC \
             LIMIT ?"
        );
        degrade("list recent emojis", self.fetch_records(&sql, &[sql_int(limit)]))
    }

    /// Run a record query whose first six columns are `EMOJI_COLUMNS,
    /// is_favorite`, then attach keywords in one batched lookup.
    fn fetch_records(&self, sql: &str, params: &[Value]) -> Result<Vec<Emoji>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt
                .query_map(params_from_iter(params.iter()), RawEmojiRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let ids: Vec<EmojiId> = rows.iter().map(|r| r.id).collect();
            let keywords = keywords_for(conn, &ids)?;
            Ok(projection::project_all(rows, keywords))
        })
    }

    fn fetch_strings(&self, sql: &str, params: &[Value]) -> Result<Vec<String>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let values = stmt
                .query_map(params_from_iter(params.iter()), |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(values)
        })
    }
}

/// Keywords of each emoji in association insertion order
fn keywords_for(conn: &Connection, ids: &[EmojiId]) -> Result<HashMap<EmojiId, Vec<String>>> {
    let mut keywords: HashMap<EmojiId, Vec<String>> = HashMap::new();

    for chunk in ids.chunks(KEYWORD_BATCH) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let sql = format!(
            "SELECT ek.emoji_id, k.keyword \
             FROM emoji_keywords ek JOIN keywords k ON k.id = ek.keyword_id \
             WHERE ek.emoji_id IN ({placeholders}) \
             ORDER BY ek.emoji_id, ek.rowid"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(chunk.iter()), |row| {
            Ok((row.get::<_, EmojiId>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (id, keyword) = row?;
            keywords.entry(id).or_default().push(keyword);
        }
    }

    Ok(keywords)
}

/// Log a failed read and fall back to the empty value
fn degrade<T: Default>(op: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        tracing::error!("Failed to {}: {}", op, e);
        T::default()
    })
}
