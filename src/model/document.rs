//! Output document types for the indexing pipeline.

use crate::error::{Error, Result};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Shape of a document's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Plain body text
    Text,
    /// A reconstructed table grid
    Table,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Text => write!(f, "text"),
            ContentType::Table => write!(f, "table"),
        }
    }
}

/// A rectangular table grid: one header row plus data rows.
///
/// The grid is fully materialized; merged source cells have already been
/// expanded across their spans during reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    /// Header row (the first reconstructed row)
    pub header: Vec<String>,

    /// Data rows
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Build a grid from reconstructed rows; the first row becomes the header.
    pub fn from_rows(mut grid: Vec<Vec<String>>) -> Self {
        if grid.is_empty() {
            return Self::default();
        }
        let header = grid.remove(0);
        Self { header, rows: grid }
    }

    /// Number of columns (based on the header row).
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the grid has neither header nor rows.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }

    /// Iterate over every cell value, header first, then rows in order.
    pub fn iter_cells(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .chain(self.rows.iter().flatten())
            .map(|s| s.as_str())
    }

    /// Get plain text representation (cells tab-joined, rows newline-joined).
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.header)
            .chain(self.rows.iter())
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Document content: either body text or a table grid.
///
/// Serialized with an adjacent `content_type` tag so consumers can dispatch
/// on the shape without probing the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "content_type", content = "content", rename_all = "snake_case")]
pub enum Content {
    /// Plain body text
    Text(String),
    /// A reconstructed table grid
    Table(TableGrid),
}

impl Content {
    /// The shape of this content.
    pub fn content_type(&self) -> ContentType {
        match self {
            Content::Text(_) => ContentType::Text,
            Content::Table(_) => ContentType::Table,
        }
    }

    /// Borrow the content as text.
    pub fn as_text(&self) -> Result<&str> {
        match self {
            Content::Text(text) => Ok(text),
            Content::Table(_) => Err(Error::ContentTypeMismatch {
                expected: ContentType::Text,
                found: ContentType::Table,
            }),
        }
    }

    /// Borrow the content as a table grid.
    pub fn as_table(&self) -> Result<&TableGrid> {
        match self {
            Content::Table(grid) => Ok(grid),
            Content::Text(_) => Err(Error::ContentTypeMismatch {
                expected: ContentType::Table,
                found: ContentType::Text,
            }),
        }
    }

    /// Canonical string form used for id derivation.
    fn canonical_text(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::Table(grid) => grid.plain_text(),
        }
    }
}

/// Typed metadata attached to a reconstructed document.
///
/// The three reserved keys are explicit fields; everything the caller
/// supplies travels in the open `extra` map and round-trips through JSON
/// at the same level as the reserved keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Body lines immediately before a table, newline-joined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preceding_context: Option<String>,

    /// Body lines immediately after a table, newline-joined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_context: Option<String>,

    /// Page the content starts on (1-indexed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Caller-supplied metadata
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DocumentMeta {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a caller-supplied entry and return self.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        self.preceding_context.is_none()
            && self.following_context.is_none()
            && self.page.is_none()
            && self.extra.is_empty()
    }
}

/// A field contributing to document id derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdHashKey {
    /// Hash the document content
    Content,
    /// Hash the document metadata
    Meta,
}

/// A reconstructed document ready for the indexing pipeline.
///
/// Documents are created by reconstruction and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Deterministic id derived from the hashed fields
    pub id: String,

    /// Text or table content, tagged with its `content_type`
    #[serde(flatten)]
    pub content: Content,

    /// Attached metadata
    pub meta: DocumentMeta,
}

impl Document {
    /// Create a document, deriving its id from the given hash keys.
    ///
    /// Identical content, metadata, and key list always produce the same id.
    /// An empty key list falls back to hashing the content.
    pub fn new(content: Content, meta: DocumentMeta, id_hash_keys: &[IdHashKey]) -> Self {
        let id = derive_id(&content, &meta, id_hash_keys);
        Self { id, content, meta }
    }

    /// The shape of this document's content.
    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }
}

/// Derive a document id as an MD5 digest over the selected fields.
///
/// Metadata is canonicalized through its JSON form; the `extra` map is
/// ordered, so serialization order is stable across runs.
fn derive_id(content: &Content, meta: &DocumentMeta, id_hash_keys: &[IdHashKey]) -> String {
    let mut hasher = Md5::new();
    let keys: &[IdHashKey] = if id_hash_keys.is_empty() {
        &[IdHashKey::Content]
    } else {
        id_hash_keys
    };

    for key in keys {
        match key {
            IdHashKey::Content => hasher.update(content.canonical_text()),
            IdHashKey::Meta => {
                hasher.update(serde_json::to_string(meta).unwrap_or_default());
            }
        }
        // Field separator keeps adjacent values from running together
        hasher.update([0x1f]);
    }

    format!("{:x}", hasher.finalize())
}
