//! Reading and re-exporting conversation archives.

use crate::{ArchiveError, ArchiveResult, Conversation};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Bulk export file name for the selected subset.
pub const SELECTED_EXPORT_FILENAME: &str = "selected_collection.json";

/// Bulk export file name for the unselected complement.
pub const UNSELECTED_EXPORT_FILENAME: &str = "unselected_conversations.json";

/// A parsed conversation archive.
///
/// Records are kept verbatim as JSON values; normalization derives
/// [`Conversation`]s from them without mutating anything, so a loaded
/// archive can always be re-exported byte-equivalently (modulo formatting).
#[derive(Debug, Clone)]
pub struct Archive {
    records: Vec<Value>,
}

impl Archive {
    /// Read an archive from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ArchiveResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read an archive from a reader. The whole document is read into
    /// memory before parsing; there is no streaming mode.
    pub fn from_reader<R: Read>(mut reader: R) -> ArchiveResult<Self> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        let value: Value = serde_json::from_str(&contents)?;
        Self::from_value(value)
    }

    /// Build an archive from an already-parsed JSON value.
    pub fn from_value(value: Value) -> ArchiveResult<Self> {
        match value {
            Value::Array(records) => Ok(Self { records }),
            _ => Err(ArchiveError::ExpectedArray),
        }
    }

    /// Raw record count, including records normalization will skip.
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// The raw records, in file order.
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Normalize every record in input order.
    ///
    /// Records without a usable `id`/`mapping` are dropped with a warning on
    /// stderr; the batch never fails. The output count can therefore be
    /// smaller than [`Archive::total`].
    pub fn normalize(&self) -> Vec<Conversation> {
        let mut conversations = Vec::new();
        for (index, record) in self.records.iter().enumerate() {
            match Conversation::from_record(record) {
                Some(conversation) => conversations.push(conversation),
                None => {
                    eprintln!(
                        "Warning: Skipping conversation record {}: missing id or mapping",
                        index
                    );
                }
            }
        }
        conversations
    }
}

/// Serialize a subset's original records as a pretty-printed JSON archive.
///
/// Always writes the verbatim raw records, never the normalized form, so the
/// output parses back as valid input (round-trip guarantee).
pub fn write_export<W: Write>(conversations: &[&Conversation], writer: W) -> ArchiveResult<()> {
    let records: Vec<&Value> = conversations.iter().map(|c| &c.original).collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

/// Write a subset export to a file path.
pub fn export_to_path<P: AsRef<Path>>(
    conversations: &[&Conversation],
    path: P,
) -> ArchiveResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_export(conversations, &mut writer)?;
    writer.flush()?;
    Ok(())
}
