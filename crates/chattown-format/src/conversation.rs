//! Normalized conversation model and the mapping-extraction algorithm.
//!
//! A conversation arrives as a flat mapping of graph nodes. Normalization
//! does NOT walk `parent`/`children` links; it scans every node in the
//! mapping, keeps the ones with visible, non-empty message text, and sorts
//! them by timestamp. Alternate/regenerated branches are therefore not
//! deduplicated: all of them appear in the flattened transcript, ordered by
//! time. This is a known limitation of the flat scan, not an oversight.

use crate::raw::{RawConversation, RawNode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder titles the export tool assigns to unnamed conversations.
/// A title matching one of these (case-insensitively) never becomes the
/// summary on its own.
const GENERIC_TITLES: [&str; 3] = ["new chat", "empty chat", "untitled conversation"];

/// Maximum summary length taken from a real title.
const TITLE_SUMMARY_LIMIT: usize = 150;

/// Maximum summary length taken from message text.
const MESSAGE_SUMMARY_LIMIT: usize = 100;

/// Fallback summary when neither title nor messages offer anything usable.
pub const NO_SUMMARY: &str = "No summary available";

/// A single visible message, owned by its parent [`Conversation`].
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Message {
    pub id: String,
    pub author_role: String,
    pub content_text: String,
    /// Unix timestamp in seconds. Messages without one sort as the oldest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<f64>,
}

/// A normalized conversation: ordered messages plus a derived summary.
///
/// Created once per surviving raw record and immutable thereafter; loading a
/// new archive replaces the whole set.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<f64>,
    /// Sorted ascending by `create_time`, stable on ties.
    pub messages: Vec<Message>,
    pub summary: String,
    /// The record exactly as it appeared in the uploaded archive. Bulk
    /// export serializes this, never the normalized fields above.
    #[serde(skip_serializing)]
    #[schemars(skip)]
    pub original: Value,
}

impl Conversation {
    /// Build a normalized conversation from one raw archive record.
    ///
    /// Returns `None` when the record lacks a non-empty `id` or a `mapping`
    /// object; callers treat that as a skip, not an error.
    pub fn from_record(record: &Value) -> Option<Self> {
        let raw = RawConversation::deserialize(record).ok()?;
        let id = raw.id.filter(|id| !id.is_empty())?;
        let mapping = raw.mapping?;

        let mut messages: Vec<Message> = mapping.values().filter_map(extract_message).collect();
        // Stable sort: ties keep mapping insertion order.
        messages.sort_by(|a, b| {
            a.create_time
                .unwrap_or(0.0)
                .total_cmp(&b.create_time.unwrap_or(0.0))
        });

        let title = raw.title.unwrap_or_default();
        let summary = generate_summary(&title, &messages);

        Some(Self {
            id,
            title,
            create_time: raw.create_time,
            update_time: raw.update_time,
            messages,
            summary,
            original: record.clone(),
        })
    }
}

/// Extract the visible message from one mapping node, if it has one.
///
/// A node is dropped when it has no message, its message is marked visually
/// hidden, its content resolves to whitespace-only text, or the node itself
/// fails to deserialize.
fn extract_message(node: &Value) -> Option<Message> {
    let node = RawNode::deserialize(node).ok()?;
    let message = node.message?;

    let hidden = message
        .metadata
        .as_ref()
        .and_then(|m| m.is_visually_hidden_from_conversation)
        .unwrap_or(false);
    if hidden {
        return None;
    }

    let content = message.content?;
    let text: String = match &content.parts {
        Some(parts) => parts.iter().filter_map(Value::as_str).collect(),
        None => content.text.clone().unwrap_or_default(),
    };
    if text.trim().is_empty() {
        return None;
    }

    Some(Message {
        id: message.id.unwrap_or_default(),
        author_role: message
            .author
            .and_then(|author| author.role)
            .unwrap_or_default(),
        content_text: text,
        create_time: message.create_time,
    })
}

/// Derive a one-line summary for a conversation.
///
/// Precedence: a real (non-generic) title, then the first user message, then
/// the first assistant message, then the title verbatim, then [`NO_SUMMARY`].
pub fn generate_summary(title: &str, messages: &[Message]) -> String {
    let generic = GENERIC_TITLES
        .iter()
        .any(|generic| title.eq_ignore_ascii_case(generic));
    if !title.is_empty() && !generic {
        return truncate_with_ellipsis(title, TITLE_SUMMARY_LIMIT);
    }

    for role in ["user", "assistant"] {
        let first = messages
            .iter()
            .find(|m| m.author_role == role && !m.content_text.trim().is_empty());
        if let Some(message) = first {
            return truncate_with_ellipsis(&message.content_text, MESSAGE_SUMMARY_LIMIT);
        }
    }

    if title.is_empty() {
        NO_SUMMARY.to_string()
    } else {
        title.to_string()
    }
}

/// Truncate to `max` characters, appending `...` when anything was cut.
fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max).collect();
        format!("{}...", kept)
    }
}
