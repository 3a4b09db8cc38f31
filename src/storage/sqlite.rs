//! SQLite storage implementation
//!
//! [`EmojiStore`] owns at most one connection. It is opened on first use,
//! reused by every subsequent call, and dropped by [`EmojiStore::close`].

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use rusqlite::{Connection, Transaction};
use crate::{Result, Error};
use super::{provision, schema};

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

/// SQLite-backed emoji store.
///
/// Not `Sync`: callers sharing a store across threads must serialize access
/// themselves or open one store per thread.
pub struct EmojiStore {
    location: Location,
    conn: RefCell<Option<Connection>>,
}

impl EmojiStore {
    /// Provision the store at `path` (copying `default_store` if it is
    /// missing) and return an unconnected handle.
    pub fn open(path: impl Into<PathBuf>, default_store: Option<&Path>) -> Result<Self> {
        let path = path.into();
        match provision::ensure_store(&path, default_store)? {
            provision::Provisioned::Existing => tracing::debug!("Using store at {}", path.display()),
            provision::Provisioned::CopiedDefault(from) => {
                tracing::info!("Provisioned store at {} from {}", path.display(), from.display())
            }
        }
        Ok(Self::at(path))
    }

    /// Handle for a store file without the provisioning step.
    /// The first connection creates the schema if the file is new.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
            conn: RefCell::new(None),
        }
    }

    /// Open an in-memory database (for testing)
    ///
    /// Contents are lost on [`close`](Self::close).
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            location: Location::Memory,
            conn: RefCell::new(None),
        };
        store.connect()?;
        Ok(store)
    }

    /// Path of the backing file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Memory => None,
        }
    }

    /// Open the connection if it is not already open
    pub fn connect(&self) -> Result<()> {
        self.with_conn(|_| Ok(()))
    }

    /// Whether a connection is currently held
    pub fn is_connected(&self) -> bool {
        self.conn.borrow().is_some()
    }

    /// Release the connection. A later call reopens it.
    pub fn close(&self) -> Result<()> {
        if let Some(conn) = self.conn.borrow_mut().take() {
            conn.close().map_err(|(_, e)| Error::Connection(e))?;
            tracing::debug!("Closed store connection");
        }
        Ok(())
    }

    /// Run `f` against the live connection, opening it first if needed.
    ///
    /// Must not be called re-entrantly from inside `f`.
    pub fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut slot = self.conn.borrow_mut();
        let conn = match slot.take() {
            Some(conn) => conn,
            None => self.open_connection()?,
        };
        let conn = slot.insert(conn);
        f(conn)
    }

    /// Run `f` inside a transaction: committed on `Ok`, rolled back on `Err`.
    pub fn transaction<T>(&self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            let value = f(&tx)?;
            tx.commit()?;
            Ok(value)
        })
    }

    fn open_connection(&self) -> Result<Connection> {
        let conn = match &self.location {
            Location::File(path) => {
                tracing::info!("Opening store {}", path.display());
                Connection::open(path)
            }
            Location::Memory => Connection::open_in_memory(),
        }
        .map_err(Error::Connection)?;

        conn.execute_batch(schema::CONNECTION_PRAGMAS).map_err(Error::Connection)?;
        Self::initialize_schema(&conn).map_err(Error::Connection)?;
        Ok(conn)
    }

    /// Initialize the database schema
    fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        self.with_conn(|conn| {
            let count = |table: &str| -> rusqlite::Result<usize> {
                let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
                Ok(n as usize)
            };
            Ok(DbStats {
                emojis: count("emojis")?,
                keywords: count("keywords")?,
                favorites: count("favorites")?,
                history: count("history")?,
            })
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct DbStats {
    pub emojis: usize,
    pub keywords: usize,
    pub favorites: usize,
    pub history: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Emojis: {}", self.emojis)?;
        writeln!(f, "  Keywords: {}", self.keywords)?;
        writeln!(f, "  Favorites: {}", self.favorites)?;
        writeln!(f, "  History: {}", self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seeded_store;

    #[test]
    fn test_connect_is_lazy_and_reused() {
        let dir = tempfile::tempdir().unwrap();
        let store = EmojiStore::at(dir.path().join("emojis.db"));
        assert!(!store.is_connected());

        store.connect().unwrap();
        assert!(store.is_connected());

        let first: usize = store.with_conn(|c| Ok(c as *const Connection as usize)).unwrap();
        let second: usize = store.with_conn(|c| Ok(c as *const Connection as usize)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_close_then_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = EmojiStore::at(dir.path().join("emojis.db"));
        store
            .with_conn(|c| {
                c.execute("INSERT INTO emojis (unicode, short_name) VALUES ('🍎', 'red apple')", [])?;
                Ok(())
            })
            .unwrap();

        store.close().unwrap();
        assert!(!store.is_connected());
        store.close().unwrap();

        assert_eq!(store.stats().unwrap().emojis, 1);
        assert!(store.is_connected());
    }

    #[test]
    fn test_open_without_store_or_default_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = EmojiStore::open(dir.path().join("missing.db"), None);
        assert!(matches!(result, Err(Error::StoreNotFound { .. })));
    }

    #[test]
    fn test_open_copies_default_store() {
        let dir = tempfile::tempdir().unwrap();
        let bundled = dir.path().join("bundled.db");
        {
            let seed = EmojiStore::at(&bundled);
            seed.with_conn(|c| {
                c.execute("INSERT INTO emojis (unicode, short_name) VALUES ('🚗', 'automobile')", [])?;
                Ok(())
            })
            .unwrap();
            seed.close().unwrap();
        }

        let target = dir.path().join("user").join("emojis.db");
        let store = EmojiStore::open(&target, Some(&bundled)).unwrap();
        assert!(!store.is_connected());
        assert_eq!(store.path(), Some(target.as_path()));
        assert_eq!(store.stats().unwrap().emojis, 1);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let store = EmojiStore::open_in_memory().unwrap();
        let result = store.with_conn(|c| {
            c.execute("INSERT INTO favorites (emoji_id) VALUES (42)", [])?;
            Ok(())
        });
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let store = seeded_store();
        let before = store.stats().unwrap();

        let result: Result<()> = store.transaction(|tx| {
            tx.execute("INSERT INTO keywords (keyword) VALUES ('temporary')", [])?;
            Err(Error::Import("abort".into()))
        });
        assert!(result.is_err());
        assert_eq!(store.stats().unwrap(), before);
    }

    #[test]
    fn test_stats() {
        let stats = seeded_store().stats().unwrap();
        assert_eq!(stats.emojis, 5);
        assert_eq!(stats.favorites, 0);
        assert_eq!(stats.history, 0);
        assert!(stats.keywords > 5);
    }
}
