//! Emoji record - the caller-facing projection of the catalog
//!
//! Rows in the store are normalized across `emojis`, `keywords` and
//! `emoji_keywords`; an [`Emoji`] is the denormalized view with its keyword
//! list and favorite flag attached.

use serde::Serialize;

/// Surrogate key of an emoji row
pub type EmojiId = i64;

/// A projected emoji record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Emoji {
    /// Surrogate key assigned at import
    pub id: EmojiId,
    /// Glyph / codepoint sequence
    pub unicode: String,
    /// Short display name
    pub short_name: String,
    /// Top-level classification (e.g. "Smileys & Emotion")
    pub group_name: Option<String>,
    /// Second-level classification
    pub subgroup: Option<String>,
    /// Associated keyword texts, short name included
    pub keywords: Vec<String>,
    pub is_favorite: bool,
}

impl Emoji {
    /// Case-insensitive substring match against the short name or any keyword
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.short_name.to_lowercase().contains(&needle)
            || self.keywords.iter().any(|k| k.to_lowercase().contains(&needle))
    }

    /// Group name, or an empty string when unclassified
    pub fn group_label(&self) -> &str {
        self.group_name.as_deref().unwrap_or("")
    }
}

impl std::fmt::Display for Emoji {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.unicode, self.short_name)?;
        if let Some(group) = self.group_name.as_deref().filter(|g| !g.is_empty()) {
            write!(f, " ({})", group)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Emoji {
        Emoji {
            id: 1,
            unicode: "😀".into(),
            short_name: "Grinning Face".into(),
            group_name: Some("Smileys".into()),
            subgroup: None,
            keywords: vec!["happy".into(), "Grinning Face".into()],
            is_favorite: false,
        }
    }

    #[test]
    fn test_matches_text_is_case_insensitive() {
        let emoji = sample();
        assert!(emoji.matches_text("grin"));
        assert!(emoji.matches_text("HAP"));
        assert!(!emoji.matches_text("cat"));
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "😀 - Grinning Face (Smileys)");

        let mut bare = sample();
        bare.group_name = Some(String::new());
        assert_eq!(bare.to_string(), "😀 - Grinning Face");
    }
}
