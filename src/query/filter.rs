//! Search filters and SQL predicate composition
//!
//! [`Predicates`] accumulates `(clause, params)` pairs and renders them as a
//! single `WHERE` clause, so clause text and bound values never drift apart.

use rusqlite::types::Value;

/// Default page size for list queries
pub const DEFAULT_LIMIT: usize = 100;

/// Filters for [`QueryEngine::search`](super::QueryEngine::search).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    /// Case-insensitive substring over short name or any keyword
    pub text: Option<String>,
    /// Exact group name
    pub category: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            text: None,
            category: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Compose the `WHERE` predicates for the filters actually supplied.
    /// Blank text or category is treated as absent; text is matched as given.
    pub fn predicates(&self) -> Predicates {
        let mut preds = Predicates::new();

        if let Some(text) = self.text.as_deref().filter(|t| !is_blank(t)) {
            let pattern = like_pattern(text);
            preds.push(
                r"(e.short_name LIKE ? ESCAPE '\' OR EXISTS (
                    SELECT 1 FROM emoji_keywords ek
                    JOIN keywords k ON k.id = ek.keyword_id
                    WHERE ek.emoji_id = e.id AND k.keyword LIKE ? ESCAPE '\'
                ))",
                [Value::Text(pattern.clone()), Value::Text(pattern)],
            );
        }

        if let Some(category) = self.category.as_deref().filter(|c| !is_blank(c)) {
            preds.push("e.group_name = ?", [Value::Text(category.to_string())]);
        }

        preds
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Accumulated `WHERE` predicates with their positional parameters.
#[derive(Debug, Default)]
pub struct Predicates {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause using `?` placeholders together with the values it binds.
    pub fn push<I>(&mut self, clause: &str, params: I)
    where
        I: IntoIterator<Item = Value>,
    {
        let before = self.params.len();
        self.params.extend(params);
        debug_assert_eq!(
            clause.matches('?').count(),
            self.params.len() - before,
            "placeholder count must match bound params in {clause:?}"
        );
        self.clauses.push(clause.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// ` WHERE a AND b`, or an empty string when no predicate was added
    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// Bound values in placeholder order, followed by `extra`
    pub fn params_with(&self, extra: impl IntoIterator<Item = Value>) -> Vec<Value> {
        self.params.iter().cloned().chain(extra).collect()
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

/// `%needle%` with LIKE metacharacters in `needle` escaped by `\`
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Convert a page bound to an SQL integer, saturating at `i64::MAX`
pub fn sql_int(n: usize) -> Value {
    Value::Integer(i64::try_from(n).unwrap_or(i64::MAX))
}
