//! Raw types for the chat-assistant export format.
//!
//! Every field is `#[serde(default)]` so that a malformed record degrades at
//! its own level: a record missing `id` or `mapping` is skipped as a whole,
//! a node that fails to deserialize is skipped on its own, and nothing aborts
//! the batch. The full record is additionally retained as a raw
//! `serde_json::Value` so bulk export can round-trip fields this view does
//! not model (moderation results, plugin IDs, and whatever else the export
//! tool adds over time).

use serde::Deserialize;
use serde_json::{Map, Value};

/// A conversation record as it appears in the export file.
///
/// `mapping` is kept as an ordered JSON object: extraction iterates it in
/// raw-file insertion order, which is also the tie-break order for the
/// timestamp sort.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConversation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub create_time: Option<f64>,
    #[serde(default)]
    pub update_time: Option<f64>,
    #[serde(default)]
    pub mapping: Option<Map<String, Value>>,
    #[serde(default)]
    pub current_node: Option<String>,
}

/// A single node in a conversation's mapping.
///
/// `parent` and `children` are modeled for completeness but never traversed:
/// extraction flattens the whole mapping, so graph shape (branching, edited
/// alternates, even cycles) cannot affect it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<RawMessage>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

/// The message payload carried by a node, when it has one.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub author: Option<RawAuthor>,
    #[serde(default)]
    pub create_time: Option<f64>,
    #[serde(default)]
    pub content: Option<RawContent>,
    #[serde(default)]
    pub metadata: Option<RawMessageMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Message content. `parts` entries can be strings or structured payloads
/// (image pointers and the like); only string parts contribute text.
#[derive(Debug, Clone, Deserialize)]
pub struct RawContent {
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub parts: Option<Vec<Value>>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMessageMetadata {
    #[serde(default)]
    pub is_visually_hidden_from_conversation: Option<bool>,
}
