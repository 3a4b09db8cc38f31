use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("EMOJIKIT_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }

    pub fn is_human(self) -> bool {
        self == Self::Human
    }
}

/// `{"ok": true, "command": ..., "data": ...}`
pub fn success_envelope(command: &str, data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    })
}

/// Print a JSON success envelope for `command`
pub fn emit_success(command: &str, data: impl serde::Serialize) -> anyhow::Result<()> {
    let envelope = success_envelope(command, serde_json::to_value(data)?);
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let envelope = success_envelope("categories", serde_json::json!(["Food"]));
        assert_eq!(envelope["ok"], true);
        assert_eq!(envelope["command"], "categories");
        assert_eq!(envelope["data"][0], "Food");
    }

    #[test]
    fn test_mode_from_flag() {
        assert!(OutputMode::from_json_flag(false).is_human());
        assert_eq!(OutputMode::from_json_flag(true), OutputMode::Json);
    }
}
