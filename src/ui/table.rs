use crate::emoji::Emoji;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

#[derive(Tabled)]
struct EmojiRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "")]
    glyph: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "★")]
    favorite: &'static str,
}

/// Render records as a table, empty string for no records
pub fn emoji_table(emojis: &[Emoji]) -> String {
    if emojis.is_empty() {
        return String::new();
    }

    let rows: Vec<EmojiRow> = emojis
        .iter()
        .map(|e| EmojiRow {
            id: e.id,
            glyph: e.unicode.clone(),
            name: e.short_name.clone(),
            group: e.group_label().to_string(),
            favorite: if e.is_favorite { "★" } else { "" },
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_table_contains_rows() {
        let table = stats_table(&[("Emojis", "5"), ("Keywords", "13")]);
        assert!(table.contains("Emojis"));
        assert!(table.contains("13"));
        assert!(stats_table(&[]).is_empty());
    }

    #[test]
    fn test_emoji_table_marks_favorites() {
        let emoji = Emoji {
            id: 7,
            unicode: "🍎".into(),
            short_name: "red apple".into(),
            group_name: Some("Food".into()),
            subgroup: None,
            keywords: vec![],
            is_favorite: true,
        };
        let table = emoji_table(&[emoji]);
        assert!(table.contains("red apple"));
        assert!(table.contains("Food"));
        assert!(table.matches('★').count() >= 2);
        assert!(emoji_table(&[]).is_empty());
    }
}
