//! Row projection: raw relational rows -> [`Emoji`] records
//!
//! Pure, no I/O. Keywords arrive as a native ordered sequence from a
//! separate association lookup rather than a delimited aggregate.

use std::collections::HashMap;
use crate::emoji::{Emoji, EmojiId};

/// Column list every record query selects, in [`RawEmojiRow::from_row`] order.
/// Callers must alias the emojis table as `e` and supply `is_favorite`.
pub const EMOJI_COLUMNS: &str = "e.id, e.unicode, e.short_name, e.group_name, e.subgroup";

/// An `emojis` row joined with its favorite indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEmojiRow {
    pub id: EmojiId,
    pub unicode: String,
    pub short_name: String,
    pub group_name: Option<String>,
    pub subgroup: Option<String>,
    /// 0/1 (or any count) from an `EXISTS`/aggregate expression
    pub is_favorite: i64,
}

impl RawEmojiRow {
    /// Read columns `EMOJI_COLUMNS, is_favorite` (indexes 0..=5)
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            unicode: row.get(1)?,
            short_name: row.get(2)?,
            group_name: row.get(3)?,
            subgroup: row.get(4)?,
            is_favorite: row.get(5)?,
        })
    }
}

/// Build the canonical record from a raw row and its associated keywords.
///
/// Keyword order is preserved as given. The short name is appended when
/// the association set lacks it.
pub fn project(raw: RawEmojiRow, mut keywords: Vec<String>) -> Emoji {
    if !raw.short_name.is_empty() && !keywords.iter().any(|k| *k == raw.short_name) {
        keywords.push(raw.short_name.clone());
    }

    Emoji {
        id: raw.id,
        unicode: raw.unicode,
        short_name: raw.short_name,
        group_name: raw.group_name,
        subgroup: raw.subgroup,
        keywords,
        is_favorite: raw.is_favorite != 0,
    }
}

/// Project a batch of rows, pulling each one's keywords out of `keywords`.
/// Rows without an entry get an empty keyword sequence.
pub fn project_all(rows: Vec<RawEmojiRow>, mut keywords: HashMap<EmojiId, Vec<String>>) -> Vec<Emoji> {
    rows.into_iter()
        .map(|raw| {
            let kws = keywords.remove(&raw.id).unwrap_or_default();
            project(raw, kws)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: EmojiId, short_name: &str, is_favorite: i64) -> RawEmojiRow {
        RawEmojiRow {
            id,
            unicode: "😀".into(),
            short_name: short_name.into(),
            group_name: Some("Smileys".into()),
            subgroup: None,
            is_favorite,
        }
    }

    #[test]
    fn test_favorite_flag_coerced() {
        assert!(!project(raw(1, "a", 0), vec![]).is_favorite);
        assert!(project(raw(1, "a", 1), vec![]).is_favorite);
        assert!(project(raw(1, "a", 3), vec![]).is_favorite);
    }

    #[test]
    fn test_keyword_order_preserved_and_short_name_appended() {
        let emoji = project(raw(1, "grinning face", 0), vec!["smile".into(), "happy".into()]);
        assert_eq!(emoji.keywords, vec!["smile", "happy", "grinning face"]);
    }

    #[test]
    fn test_short_name_not_duplicated() {
        let emoji = project(raw(1, "cat", 0), vec!["cat".into(), "pet".into()]);
        assert_eq!(emoji.keywords, vec!["cat", "pet"]);
    }

    #[test]
    fn test_keyword_containing_comma_survives() {
        let emoji = project(raw(1, "x", 0), vec!["one, two".into()]);
        assert_eq!(emoji.keywords[0], "one, two");
    }

    #[test]
    fn test_project_all_matches_keywords_by_id() {
        let mut kws = HashMap::new();
        kws.insert(2, vec!["b".to_string()]);

        let emojis = project_all(vec![raw(1, "a", 0), raw(2, "b", 1)], kws);
        assert_eq!(emojis[0].keywords, vec!["a"]);
        assert_eq!(emojis[1].keywords, vec!["b"]);
        assert!(emojis[1].is_favorite);
    }
}
