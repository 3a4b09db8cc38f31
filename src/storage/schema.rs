//! Database schema definitions

/// SQL to create the emojis table
pub const CREATE_EMOJIS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS emojis (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    unicode TEXT NOT NULL,
    short_name TEXT NOT NULL,
    group_name TEXT,
    subgroup TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)
"#;

/// SQL to create the keywords table
/// Keyword text is interned: one row per distinct (case-sensitive) string
pub const CREATE_KEYWORDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS keywords (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    keyword TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)
"#;

/// SQL to create the emoji <-> keyword association table
pub const CREATE_EMOJI_KEYWORDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS emoji_keywords (
    emoji_id INTEGER NOT NULL,
    keyword_id INTEGER NOT NULL,
    PRIMARY KEY (emoji_id, keyword_id),
    FOREIGN KEY (emoji_id) REFERENCES emojis (id) ON DELETE CASCADE,
    FOREIGN KEY (keyword_id) REFERENCES keywords (id) ON DELETE CASCADE
)
"#;

/// SQL to create the favorites table
pub const CREATE_FAVORITES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS favorites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    emoji_id INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    FOREIGN KEY (emoji_id) REFERENCES emojis (id) ON DELETE CASCADE
)
"#;

/// SQL to create the history table
/// Append-only: one row per usage event
pub const CREATE_HISTORY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    emoji_id INTEGER NOT NULL,
    used_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    FOREIGN KEY (emoji_id) REFERENCES emojis (id) ON DELETE CASCADE
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_emojis_unicode ON emojis(unicode)",
    "CREATE INDEX IF NOT EXISTS idx_emojis_short_name ON emojis(short_name)",
    "CREATE INDEX IF NOT EXISTS idx_emojis_group ON emojis(group_name)",
    "CREATE INDEX IF NOT EXISTS idx_emojis_subgroup ON emojis(subgroup)",
    "CREATE INDEX IF NOT EXISTS idx_keywords_keyword ON keywords(keyword)",
    "CREATE INDEX IF NOT EXISTS idx_emoji_keywords_keyword ON emoji_keywords(keyword_id)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_favorites_emoji ON favorites(emoji_id)",
    "CREATE INDEX IF NOT EXISTS idx_history_emoji ON history(emoji_id)",
    "CREATE INDEX IF NOT EXISTS idx_history_used_at ON history(used_at)",
];

/// Tables in dependency order (children last)
pub const TABLES: &[&str] = &["emojis", "keywords", "emoji_keywords", "favorites", "history"];

/// Pragmas applied to every new connection
pub const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_EMOJIS_TABLE,
        CREATE_KEYWORDS_TABLE,
        CREATE_EMOJI_KEYWORDS_TABLE,
        CREATE_FAVORITES_TABLE,
        CREATE_HISTORY_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}

/// Statements that drop every table, children first
pub fn drop_statements() -> Vec<String> {
    TABLES
        .iter()
        .rev()
        .map(|table| format!("DROP TABLE IF EXISTS {}", table))
        .collect()
}
