use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for terminal output. `error` and `warn` go to stderr and are
/// colored only when stderr is a terminal; the rest follow stdout.
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub info: Style,
    pub dim: Style,
    pub favorite: Style,
    pub error: Style,
    pub warn: Style,
}

impl Theme {
    /// Color each stream that is a terminal, unless `NO_COLOR` is set
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(
            !no_color && console::Term::stdout().is_term(),
            !no_color && console::Term::stderr().is_term(),
        )
    }

    pub fn new(color_stdout: bool, color_stderr: bool) -> Self {
        let out = |style: Style| if color_stdout { style } else { Style::new() };
        let err = |style: Style| if color_stderr { style } else { Style::new() };
        Self {
            header: out(Style::new().cyan().bold()),
            success: out(Style::new().green().bold()),
            info: out(Style::new().magenta()),
            dim: out(Style::new().white().dimmed()),
            favorite: out(Style::new().yellow().bold()),
            error: err(Style::new().red().bold()),
            warn: err(Style::new().yellow()),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_streams_colored_independently() {
        let theme = Theme::new(true, false);
        assert!("★".style(theme.favorite).to_string().contains('\u{1b}'));
        assert_eq!("oops".style(theme.error).to_string(), "oops");

        let theme = Theme::new(false, true);
        assert_eq!("★".style(theme.favorite).to_string(), "★");
        assert!("oops".style(theme.error).to_string().contains('\u{1b}'));
    }
}
