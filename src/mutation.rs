//! Mutation engine: favorites and usage history
//!
//! Every write runs in its own transaction. A failure rolls the transaction
//! back and is returned as [`Error::Mutation`].

use rusqlite::{Transaction, params};
use crate::{Error, Result};
use crate::emoji::EmojiId;
use crate::storage::EmojiStore;

/// Write operations over favorites and history
pub struct MutationEngine<'a> {
    store: &'a EmojiStore,
}

impl<'a> MutationEngine<'a> {
    pub fn new(store: &'a EmojiStore) -> Self {
        Self { store }
    }

    /// Mark an emoji as favorite. Succeeds without a second row if it
    /// already is one.
    pub fn add_favorite(&self, id: EmojiId) -> Result<()> {
        self.write("add favorite", id, |tx| {
            let inserted = insert_favorite(tx, id)?;
            if inserted {
                tracing::info!("Added emoji {} to favorites", id);
            } else {
                tracing::info!("Emoji {} is already a favorite", id);
            }
            Ok(())
        })
    }

    /// Remove every favorite row of an emoji. Succeeds if there were none.
    pub fn remove_favorite(&self, id: EmojiId) -> Result<()> {
        self.write("remove favorite", id, |tx| {
            let removed = delete_favorite(tx, id)?;
            tracing::info!("Removed emoji {} from favorites ({} rows)", id, removed);
            Ok(())
        })
    }

    /// Flip the favorite state of an emoji, returning the new state
    pub fn toggle_favorite(&self, id: EmojiId) -> Result<bool> {
        self.write("toggle favorite", id, |tx| {
            if delete_favorite(tx, id)? > 0 {
                tracing::info!("Removed emoji {} from favorites", id);
                Ok(false)
            } else {
                insert_favorite(tx, id)?;
                tracing::info!("Added emoji {} to favorites", id);
                Ok(true)
            }
        })
    }

    /// Append a usage event for an emoji
    pub fn record_usage(&self, id: EmojiId) -> Result<()> {
        self.write("record usage", id, |tx| {
            tx.execute("INSERT INTO history (emoji_id) VALUES (?1)", params![id])?;
            tracing::info!("Recorded usage of emoji {}", id);
            Ok(())
        })
    }

    fn write<T>(&self, op: &'static str, id: EmojiId, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        self.store.transaction(f).map_err(|e| {
            tracing::error!("Failed to {} for emoji {}: {}", op, id, e);
            Error::Mutation { op, source: Box::new(e) }
        })
    }
}

/// Insert a favorite row unless one exists; `true` when a row was added.
/// Uniqueness comes from the `idx_favorites_emoji` index.
fn insert_favorite(tx: &Transaction<'_>, id: EmojiId) -> rusqlite::Result<bool> {
    let changed = tx.execute("INSERT OR IGNORE INTO favorites (emoji_id) VALUES (?1)", params![id])?;
    Ok(changed > 0)
}

fn delete_favorite(tx: &Transaction<'_>, id: EmojiId) -> rusqlite::Result<usize> {
    tx.execute("DELETE FROM favorites WHERE emoji_id = ?1", params![id])
}
