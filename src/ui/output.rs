use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use owo_colors::{OwoColorize, Style};

pub fn header(icon: &str, text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", icon, text.style(theme().header.clone()));
}

pub fn success(message: &str) {
    println!("{}", status_line(Icons::CHECK, message, theme().success.clone()));
}

/// Failure report on stderr
pub fn error(message: &str) {
    eprintln!("{}", status_line(Icons::CROSS, message, theme().error.clone()));
}

pub fn warn(message: &str) {
    eprintln!("{}", status_line(Icons::WARN, message, theme().warn.clone()));
}

fn status_line(icon: &str, message: &str, style: Style) -> String {
    format!("{} {}", icon, message.style(style))
}

/// `label: value` line of a record view, labels padded to a common width
pub fn info(label: &str, value: &str) {
    println!(
        "{} {:<9} {}",
        Icons::INFO.style(theme().info.clone()),
        format!("{}:", label).style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

/// Star for favorites, empty for the rest
pub fn favorite_marker(is_favorite: bool) -> String {
    if is_favorite {
        Icons::STAR.style(theme().favorite.clone()).to_string()
    } else {
        String::new()
    }
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_marker() {
        assert!(favorite_marker(true).contains(Icons::STAR));
        assert!(favorite_marker(false).is_empty());
    }

    #[test]
    fn test_status_line_plain_style() {
        assert_eq!(status_line(Icons::CROSS, "boom", Style::new()), format!("{} boom", Icons::CROSS));
    }
}
