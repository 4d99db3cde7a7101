//! # chattown-format
//!
//! Core types and logic for chat-assistant conversation archives.
//!
//! An archive is a JSON array of conversation records, each carrying its
//! messages as a flat `mapping` of graph nodes. This crate provides:
//! - Lenient raw types for the export format
//! - The normalization algorithm (flat node scan → ordered transcript)
//! - Summary generation
//! - Selection/filter workspace state
//! - Plain-text transcript and round-trip JSON export
//!
//! ## Example
//!
//! ```rust,no_run
//! use chattown_format::{Archive, Workspace};
//!
//! let archive = Archive::from_path("conversations.json")?;
//! let mut workspace = Workspace::from_archive(&archive);
//!
//! workspace.set_query("borrow checker");
//! for conversation in workspace.displayed() {
//!     println!("{}: {}", conversation.id, conversation.summary);
//! }
//! # Ok::<(), chattown_format::ArchiveError>(())
//! ```

mod archive;
mod conversation;
mod error;
mod raw;
mod transcript;
mod workspace;

pub use archive::*;
pub use conversation::*;
pub use error::*;
pub use raw::*;
pub use transcript::*;
pub use workspace::*;

/// File extension accepted for uploaded archives.
pub const ARCHIVE_EXTENSION: &str = "json";
