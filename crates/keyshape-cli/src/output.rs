//! Output formatting utilities.

use keyshape_core::Identifier;
use serde::Serialize;

/// Formats any serializable value as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats an identifier as a simple table row.
pub fn format_table_row(key: &str, identifier: &Identifier) -> String {
    format!(
        "{:<24} {:<24} {}",
        truncate(key, 24),
        truncate(&identifier.to_syntax_string(), 24),
        identifier
    )
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!("{:<24} {:<24} {}", "KEY", "SYNTAX", "VALUE");
    println!("{}", "-".repeat(72));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_values() {
        assert_eq!(truncate("type/id", 24), "type/id");
    }

    #[test]
    fn truncate_marks_long_values() {
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
    }
}
