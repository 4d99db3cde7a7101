//! Plain-text transcript export for a single conversation.

use crate::Conversation;
use regex::Regex;
use std::sync::OnceLock;

/// Instruction line at the top of every exported transcript.
pub const TRANSCRIPT_HEADER: &str = "This file is a plain-text transcript of a saved \
assistant conversation. Messages appear in chronological order, each prefixed with the \
speaker's role in capitals.";

/// Fallback filename stem when sanitization leaves nothing usable.
pub const DEFAULT_FILENAME_STEM: &str = "untitled_conversation";

const FILENAME_STEM_LIMIT: usize = 100;

fn forbidden_chars_re() -> &'static Regex {
    static FORBIDDEN_RE: OnceLock<Regex> = OnceLock::new();
    FORBIDDEN_RE.get_or_init(|| Regex::new(r#"[/\\?%*:|"<>]"#).expect("valid forbidden-char regex"))
}

fn whitespace_re() -> &'static Regex {
    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// Render a conversation as the plain-text export document: the header
/// line, a `---` separator, then `ROLE: text` blocks separated by blank
/// lines, in the conversation's stored chronological order.
pub fn render_transcript(conversation: &Conversation) -> String {
    let blocks: Vec<String> = conversation
        .messages
        .iter()
        .map(|m| format!("{}: {}", m.author_role.to_uppercase(), m.content_text))
        .collect();
    format!("{}\n---\n{}\n", TRANSCRIPT_HEADER, blocks.join("\n\n"))
}

/// Turn a title (or id) into a filesystem-safe filename stem.
///
/// Forbidden characters become spaces, whitespace runs collapse to a single
/// underscore, and the result is clipped to 100 characters.
pub fn sanitize_filename_stem(raw: &str) -> String {
    let spaced = forbidden_chars_re().replace_all(raw, " ");
    let underscored = whitespace_re().replace_all(spaced.trim(), "_");
    let stem: String = underscored
        .trim_matches('_')
        .chars()
        .take(FILENAME_STEM_LIMIT)
        .collect();
    if stem.is_empty() {
        DEFAULT_FILENAME_STEM.to_string()
    } else {
        stem
    }
}

/// Export filename for a conversation: derived from the title, or from the
/// id when the title is empty.
pub fn export_filename(conversation: &Conversation) -> String {
    let source = if conversation.title.is_empty() {
        conversation.id.as_str()
    } else {
        conversation.title.as_str()
    };
    format!("ChatTown_Obsidian_{}.txt", sanitize_filename_stem(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn conversation(title: &str, messages: Vec<Message>) -> Conversation {
        Conversation {
            id: "conv-42".to_string(),
            title: title.to_string(),
            create_time: Some(1.0),
            update_time: Some(2.0),
            summary: crate::generate_summary(title, &messages),
            messages,
            original: json!({}),
        }
    }

    fn message(role: &str, text: &str, ts: f64) -> Message {
        Message {
            id: format!("m-{}", ts),
            author_role: role.to_string(),
            content_text: text.to_string(),
            create_time: Some(ts),
        }
    }

    #[test]
    fn test_render_transcript_layout() {
        let conversation = conversation(
            "Plans",
            vec![
                message("user", "What should we build?", 1.0),
                message("assistant", "A transcript exporter.", 2.0),
            ],
        );
        let expected = format!(
            "{}\n---\nUSER: What should we build?\n\nASSISTANT: A transcript exporter.\n",
            TRANSCRIPT_HEADER
        );
        assert_eq!(render_transcript(&conversation), expected);
    }

    #[test]
    fn test_sanitize_strips_forbidden_and_joins_whitespace() {
        assert_eq!(sanitize_filename_stem("My/Chat: Plans?"), "My_Chat_Plans");
        assert_eq!(sanitize_filename_stem("a\\b|c<d>e\"f"), "a_b_c_d_e_f");
        assert_eq!(sanitize_filename_stem("  spaced   out\ttitle "), "spaced_out_title");
    }

    #[test]
    fn test_sanitize_truncates_to_100_chars() {
        let long = "x".repeat(140);
        assert_eq!(sanitize_filename_stem(&long).chars().count(), 100);

        let multibyte = "標".repeat(140);
        let stem = sanitize_filename_stem(&multibyte);
        assert_eq!(stem.chars().count(), 100);
    }

    #[test]
    fn test_sanitize_defaults_when_empty() {
        assert_eq!(sanitize_filename_stem(""), DEFAULT_FILENAME_STEM);
        assert_eq!(sanitize_filename_stem("  %%//  "), DEFAULT_FILENAME_STEM);
    }

    #[test]
    fn test_export_filename_uses_title_then_id() {
        let with_title = conversation("Weekly sync notes", vec![]);
        assert_eq!(
            export_filename(&with_title),
            "ChatTown_Obsidian_Weekly_sync_notes.txt"
        );

        let untitled = conversation("", vec![]);
        assert_eq!(export_filename(&untitled), "ChatTown_Obsidian_conv-42.txt");
    }
}
