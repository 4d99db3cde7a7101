//! Shared helpers for the browser view.

use ratatui::style::{Color, Modifier, Style};

/// Truncate a string to fit within `max_len` bytes, respecting char boundaries.
pub fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    if max_len == 0 {
        return "";
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Render a unix-seconds timestamp as a short local date, empty when absent.
pub fn format_short_time(timestamp: Option<f64>) -> String {
    timestamp
        .and_then(|secs| chrono::DateTime::from_timestamp(secs as i64, 0))
        .map(|d| {
            d.with_timezone(&chrono::Local)
                .format("%m/%d %H:%M")
                .to_string()
        })
        .unwrap_or_default()
}

/// Header style for a message's role label in the preview pane.
pub fn role_style(role: &str) -> Style {
    match role {
        "user" => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        "assistant" => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Cyan),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_respects_char_boundaries() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello", 3), "hel");
        // Each CJK char is 3 bytes; cutting at 4 must back off to 3.
        assert_eq!(truncate_str("日本語", 4), "日");
        assert_eq!(truncate_str("日本語", 0), "");
    }
}
