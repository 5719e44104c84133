use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Global output format setting
static OUTPUT_JSON: AtomicBool = AtomicBool::new(false);

pub fn set_json_output(json: bool) {
    OUTPUT_JSON.store(json, Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    OUTPUT_JSON.load(Ordering::Relaxed)
}

/// Print a table or JSON depending on output mode
pub fn print_table<T, R, F>(items: &[T], to_row: F)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if is_json_output() {
        println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }
}

/// Print a message (as a simple object in JSON mode)
pub fn print_message(message: &str) {
    if is_json_output() {
        println!("{}", message_json(message));
    } else {
        println!("{message}");
    }
}

fn message_json(message: &str) -> String {
    serde_json::json!({ "message": message }).to_string()
}

/// Truncate a string with ellipsis, keeping at most `max` bytes and never
/// cutting inside a multi-byte character.
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }

    let budget = max.saturating_sub(3);
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        if idx + c.len_utf8() > budget {
            break;
        }
        end = idx + c.len_utf8();
    }

    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 40), "short");
    }

    #[test]
    fn truncate_cuts_long_ascii_with_ellipsis() {
        let out = truncate(&"x".repeat(50), 40);
        assert_eq!(out.len(), 40);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let out = truncate("日本語のリリースノートの説明テキスト", 40);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 40);
        assert!(out.starts_with("日本語"));
    }

    #[test]
    fn message_json_escapes_special_characters() {
        assert_eq!(
            message_json(r#"path C:\out and "quotes""#),
            r#"{"message":"path C:\\out and \"quotes\""}"#
        );
    }
}
