//! Clipboard boundary
//!
//! The store never touches the clipboard itself; callers copy a glyph
//! through this trait after recording its usage.

use std::sync::Mutex;

pub trait Clipboard {
    /// Replace the clipboard contents; `false` when the copy failed
    fn copy_text(&self, text: &str) -> bool;
    /// Current text contents, `None` when empty or unreadable
    fn read_text(&self) -> Option<String>;
}

/// The operating system clipboard
#[cfg(feature = "clipboard")]
#[derive(Debug, Default)]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn copy_text(&self, text: &str) -> bool {
        let result = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string()));
        match result {
            Ok(()) => {
                tracing::info!("Copied {:?} to clipboard", text);
                true
            }
            Err(e) => {
                tracing::error!("Clipboard copy failed: {}", e);
                false
            }
        }
    }

    fn read_text(&self) -> Option<String> {
        match arboard::Clipboard::new().and_then(|mut cb| cb.get_text()) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("Clipboard read failed: {}", e);
                None
            }
        }
    }
}

/// Process-local clipboard for tests and headless use
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy_text(&self, text: &str) -> bool {
        match self.contents.lock() {
            Ok(mut slot) => {
                *slot = Some(text.to_string());
                true
            }
            Err(_) => false,
        }
    }

    fn read_text(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|slot| slot.clone())
    }
}

/// The platform clipboard when built with it, otherwise an in-memory one
pub fn default_clipboard() -> Box<dyn Clipboard> {
    #[cfg(feature = "clipboard")]
    {
        Box::new(SystemClipboard::new())
    }
    #[cfg(not(feature = "clipboard"))]
    {
        Box::new(MemoryClipboard::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_round_trip() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.read_text(), None);

        assert!(clipboard.copy_text("🐱"));
        assert_eq!(clipboard.read_text().as_deref(), Some("🐱"));

        assert!(clipboard.copy_text("🍎"));
        assert_eq!(clipboard.read_text().as_deref(), Some("🍎"));
    }
}
