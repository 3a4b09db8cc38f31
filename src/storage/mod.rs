//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - emojis(id, unicode, short_name, group_name, subgroup)
//! - keywords(id, keyword)
//! - emoji_keywords(emoji_id, keyword_id)
//! - favorites(id, emoji_id, created_at)
//! - history(id, emoji_id, used_at)

pub mod schema;
pub mod sqlite;
pub mod provision;

pub use sqlite::{EmojiStore, DbStats};
pub use provision::{ensure_store, Provisioned};
