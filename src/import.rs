//! Bulk import of an emoji dataset
//!
//! The dataset is a JSON object keyed by glyph:
//!
//! ```json
//! { "😀": { "short_name": "grinning face", "group": "Smileys & Emotion",
//!           "subgroup": "face-smiling", "keywords": ["face", "grin"] } }
//! ```
//!
//! Import rebuilds the schema from scratch, so it must not run against a
//! store that is in use.

use std::collections::HashMap;
use std::path::Path;
use rusqlite::{Connection, params};
use serde::Deserialize;
use crate::{Error, Result};
use crate::storage::schema;

/// One dataset entry; the glyph is the map key
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatasetEntry {
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub subgroup: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Dataset entries keyed by glyph, in file order.
///
/// Import assigns surrogate ids in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    entries: Vec<(String, DatasetEntry)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry`, or replace the entry already stored for `unicode`
    pub fn insert(&mut self, unicode: String, entry: DatasetEntry) {
        match self.entries.iter_mut().find(|(u, _)| *u == unicode) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((unicode, entry)),
        }
    }

    pub fn get(&self, unicode: &str) -> Option<&DatasetEntry> {
        self.entries.iter().find(|(u, _)| u == unicode).map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DatasetEntry)> {
        self.entries.iter().map(|(u, e)| (u.as_str(), e))
    }
}

/// Counts of rows written by an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ImportStats {
    pub emojis: usize,
    pub keywords: usize,
    pub associations: usize,
}

impl std::fmt::Display for ImportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} emojis, {} keywords, {} associations",
            self.emojis, self.keywords, self.associations
        )
    }
}

/// Parse a dataset file
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let contents = std::fs::read_to_string(path)?;
    parse_dataset(&contents)
}

pub fn parse_dataset(json: &str) -> Result<Dataset> {
    // serde_json's `preserve_order` keeps the object in file order
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
    let mut dataset = Dataset::new();
    for (unicode, value) in object {
        dataset.entries.push((unicode, serde_json::from_value(value)?));
    }
    if dataset.is_empty() {
        return Err(Error::Import("dataset contains no emojis".into()));
    }
    Ok(dataset)
}

/// Drop and recreate every table, then load `dataset` in one transaction.
///
/// Keywords are interned; each emoji's short name is associated as a
/// keyword even if the dataset does not list it.
pub fn import_dataset(conn: &mut Connection, dataset: &Dataset) -> Result<ImportStats> {
    let tx = conn.transaction()?;

    for stmt in schema::drop_statements() {
        tx.execute(&stmt, [])?;
    }
    for stmt in schema::all_schema_statements() {
        tx.execute(stmt, [])?;
    }

    let mut stats = ImportStats::default();
    {
        let mut insert_emoji = tx.prepare(
            "INSERT INTO emojis (unicode, short_name, group_name, subgroup) VALUES (?1, ?2, ?3, ?4)",
        )?;
        let mut insert_keyword = tx.prepare("INSERT INTO keywords (keyword) VALUES (?1)")?;
        let mut associate = tx.prepare(
            "INSERT OR IGNORE INTO emoji_keywords (emoji_id, keyword_id) VALUES (?1, ?2)",
        )?;
        let mut interned: HashMap<String, i64> = HashMap::new();

        for (unicode, entry) in dataset.iter() {
            let short_name = entry.short_name.as_deref().unwrap_or("");
            insert_emoji.execute(params![unicode, short_name, entry.group, entry.subgroup])?;
            let emoji_id = tx.last_insert_rowid();
            stats.emojis += 1;

            for keyword in entry_keywords(entry) {
                let keyword_id = match interned.get(keyword) {
                    Some(id) => *id,
                    None => {
                        insert_keyword.execute([keyword])?;
                        let id = tx.last_insert_rowid();
                        interned.insert(keyword.to_string(), id);
                        id
                    }
                };
                stats.associations += associate.execute(params![emoji_id, keyword_id])?;
            }

            if stats.emojis % 500 == 0 {
                tracing::debug!("Imported {} emojis", stats.emojis);
            }
        }
        stats.keywords = interned.len();
    }

    tx.commit()?;
    tracing::info!("Import complete: {}", stats);
    Ok(stats)
}

/// Dataset keywords followed by the short name when missing; blanks skipped
fn entry_keywords(entry: &DatasetEntry) -> Vec<&str> {
    let mut keywords: Vec<&str> = entry
        .keywords
        .iter()
        .map(String::as_str)
        .filter(|k| !k.is_empty())
        .collect();
    if let Some(name) = entry.short_name.as_deref().filter(|n| !n.is_empty()) {
        if !keywords.contains(&name) {
            keywords.push(name);
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::EmojiStore;
    use crate::test_support::sample_dataset;

    #[test]
    fn test_parse_dataset() {
        let json = r#"{
            "😀": {"short_name": "grinning face", "group": "Smileys", "subgroup": "face-smiling", "keywords": ["face", "grin"]},
            "🫠": {"short_name": "melting face"}
        }"#;
        let dataset = parse_dataset(json).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get("😀").unwrap().keywords, vec!["face", "grin"]);
        assert_eq!(dataset.get("🫠").unwrap().group, None);
        assert!(dataset.get("🫠").unwrap().keywords.is_empty());
    }

    #[test]
    fn test_import_assigns_ids_in_file_order() {
        let json = r#"{
            "🚗": {"short_name": "automobile"},
            "😀": {"short_name": "grinning face"},
            "🍎": {"short_name": "red apple"}
        }"#;
        let dataset = parse_dataset(json).unwrap();
        let glyphs: Vec<&str> = dataset.iter().map(|(u, _)| u).collect();
        assert_eq!(glyphs, vec!["🚗", "😀", "🍎"]);

        let store = EmojiStore::open_in_memory().unwrap();
        store.with_conn(|c| import_dataset(c, &dataset)).unwrap();
        let ids: Vec<i64> = ["🚗", "😀", "🍎"]
            .iter()
            .map(|g| crate::test_support::id_of(&store, g))
            .collect();
        assert!(ids[0] < ids[1] && ids[1] < ids[2]);
    }

    #[test]
    fn test_parse_rejects_empty_and_malformed() {
        assert!(matches!(parse_dataset("{}"), Err(Error::Import(_))));
        assert!(matches!(parse_dataset("[1, 2]"), Err(Error::Json(_))));
    }

    #[test]
    fn test_import_interns_keywords() {
        let store = EmojiStore::open_in_memory().unwrap();
        let stats = store
            .with_conn(|c| import_dataset(c, &sample_dataset()))
            .unwrap();

        assert_eq!(stats.emojis, 5);
        // "cat" and "smile" are shared between entries
        assert_eq!(stats.keywords, 13);
        assert_eq!(stats.associations, 15);
        assert_eq!(store.stats().unwrap().keywords, 13);
    }

    #[test]
    fn test_import_adds_short_name_keyword_once() {
        let mut dataset = Dataset::new();
        dataset.insert(
            "🐱".into(),
            DatasetEntry {
                short_name: Some("cat".into()),
                keywords: vec!["cat".into(), "".into(), "pet".into()],
                ..Default::default()
            },
        );
        assert_eq!(entry_keywords(dataset.get("🐱").unwrap()), vec!["cat", "pet"]);

        let store = EmojiStore::open_in_memory().unwrap();
        let stats = store.with_conn(|c| import_dataset(c, &dataset)).unwrap();
        assert_eq!(stats.associations, 2);
    }

    #[test]
    fn test_reimport_replaces_everything() {
        let store = crate::test_support::seeded_store();
        let id = crate::test_support::id_of(&store, "😀");
        crate::mutation::MutationEngine::new(&store).add_favorite(id).unwrap();

        let mut dataset = Dataset::new();
        dataset.insert("🍎".into(), crate::test_support::entry("red apple", "Food", "fruit", &["apple"]));
        store.with_conn(|c| import_dataset(c, &dataset)).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.emojis, 1);
        assert_eq!(stats.keywords, 2);
        assert_eq!(stats.favorites, 0);
    }

    #[test]
    fn test_load_dataset_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emoji.json");
        std::fs::write(&path, r#"{"🚗": {"short_name": "automobile", "keywords": ["car"]}}"#).unwrap();

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.get("🚗").unwrap().short_name.as_deref(), Some("automobile"));
        assert!(matches!(load_dataset(&dir.path().join("missing.json")), Err(Error::Io(_))));
    }
}
