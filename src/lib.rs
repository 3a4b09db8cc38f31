//! # Emojikit - Local emoji catalog
//!
//! A SQLite-backed store of emoji metadata with normalized keyword
//! associations.
//!
//! Emojikit provides:
//! - Composable search over short names and keywords, filtered by category
//! - Category and subgroup listings
//! - Idempotent favorites and an append-only usage history
//! - One-shot import of an external emoji dataset
//! - A thin clipboard boundary for copying glyphs

pub mod emoji;
pub mod storage;
pub mod query;
pub mod mutation;
pub mod import;
pub mod clipboard;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use emoji::{Emoji, EmojiId};
pub use storage::EmojiStore;
pub use query::{QueryEngine, SearchFilter};
pub use mutation::MutationEngine;

use std::path::PathBuf;

/// Result type alias for Emojikit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Emojikit operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Store not found: {}", path.display())]
    StoreNotFound { path: PathBuf },

    #[error("Connection error: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Failed to {op}: {source}")]
    Mutation {
        op: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("Import error: {0}")]
    Import(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::import::{self, Dataset, DatasetEntry};
    use crate::storage::EmojiStore;

    pub fn entry(short_name: &str, group: &str, subgroup: &str, keywords: &[&str]) -> DatasetEntry {
        DatasetEntry {
            short_name: Some(short_name.to_string()),
            group: Some(group.to_string()),
            subgroup: Some(subgroup.to_string()),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn sample_dataset() -> Dataset {
        let mut data = Dataset::new();
        data.insert("😀".into(), entry("grinning face", "Smileys", "face-smiling", &["happy", "smile"]));
        data.insert("😸".into(), entry("grinning cat", "Smileys", "cat-face", &["cat", "smile"]));
        data.insert("🐱".into(), entry("cat face", "Animals", "animal-mammal", &["cat", "pet"]));
        data.insert("🍎".into(), entry("red apple", "Food", "food-fruit", &["apple", "fruit"]));
        data.insert("🚗".into(), entry("automobile", "Travel", "transport-ground", &["car", "drive"]));
        data
    }

    pub fn seeded_store() -> EmojiStore {
        let store = EmojiStore::open_in_memory().unwrap();
        store
            .with_conn(|conn| import::import_dataset(conn, &sample_dataset()))
            .unwrap();
        store
    }

    /// Look up the surrogate id assigned to a glyph during import
    pub fn id_of(store: &EmojiStore, unicode: &str) -> i64 {
        store
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT id FROM emojis WHERE unicode = ?1", [unicode], |row| row.get(0))?)
            })
            .unwrap()
    }

    pub fn count(store: &EmojiStore, sql: &str, id: i64) -> i64 {
        store
            .with_conn(|conn| Ok(conn.query_row(sql, [id], |row| row.get(0))?))
            .unwrap()
    }
}
