//! Wire-format types for the layout analysis result.
//!
//! These types deserialize the persisted output of the external
//! document-layout-analysis service. Field names must stay aligned with the
//! upstream format, so every struct maps the wire schema one-to-one. All
//! container fields default to empty when absent; accessors return documented
//! defaults instead of forcing callers into ad hoc null checks.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A half-open offset+length range into the document's linear text stream.
///
/// Spans correlate lines, cells, and tables positionally: a line whose first
/// span falls inside a table's span belongs to that table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start offset into the full text stream
    pub offset: usize,

    /// Number of characters covered
    pub length: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// End offset (offset + length).
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Whether an offset lies within this span, boundaries included.
    pub fn contains_inclusive(&self, offset: usize) -> bool {
        self.offset <= offset && offset <= self.end()
    }
}

/// A single text line detected on a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    /// Line text
    pub content: String,

    /// Positional spans; the first entry gives the line's position
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line with a single span.
    pub fn new(content: impl Into<String>, offset: usize, length: usize) -> Self {
        Self {
            content: content.into(),
            spans: vec![Span::new(offset, length)],
        }
    }

    /// Offset of the line's first span, if the service reported one.
    pub fn first_offset(&self) -> Option<usize> {
        self.spans.first().map(|s| s.offset)
    }
}

/// A single page of the analyzed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Text lines on the page, in reading order
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Page {
    /// Create an empty page.
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            lines: Vec::new(),
        }
    }

    /// Check if the page has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The role the analysis service assigned to a table cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    /// Ordinary body cell
    #[default]
    Content,
    /// Column header cell
    ColumnHeader,
    /// Any other role (row header, stub head, description, ...)
    #[serde(other)]
    Other,
}

/// A single cell of a detected table, addressed by grid coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    /// Zero-based row of the cell's top-left corner
    pub row_index: usize,

    /// Zero-based column of the cell's top-left corner
    pub column_index: usize,

    /// Number of rows the cell spans; `None` when the service omits it
    #[serde(default)]
    pub row_span: Option<u32>,

    /// Number of columns the cell spans; `None` when the service omits it
    #[serde(default)]
    pub column_span: Option<u32>,

    /// Cell role
    #[serde(default)]
    pub kind: CellKind,

    /// Cell text
    #[serde(default)]
    pub content: String,
}

impl TableCell {
    /// Create a body cell with unit spans.
    pub fn new(row_index: usize, column_index: usize, content: impl Into<String>) -> Self {
        Self {
            row_index,
            column_index,
            row_span: Some(1),
            column_span: Some(1),
            kind: CellKind::Content,
            content: content.into(),
        }
    }

    /// Create a column header cell with unit spans.
    pub fn header(row_index: usize, column_index: usize, content: impl Into<String>) -> Self {
        Self {
            kind: CellKind::ColumnHeader,
            ..Self::new(row_index, column_index, content)
        }
    }

    /// Set the column span and return self.
    pub fn with_column_span(mut self, span: u32) -> Self {
        self.column_span = Some(span);
        self
    }

    /// Set the row span and return self.
    pub fn with_row_span(mut self, span: u32) -> Self {
        self.row_span = Some(span);
        self
    }
}

/// The page a table (or part of it) was detected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingRegion {
    /// Page number (1-indexed)
    pub page_number: u32,
}

/// A table detected by the analysis service, as a flat cell list.
///
/// Cells arrive in detection order; the first cell may be a caption spanning
/// all columns. `bounding_regions` lists the pages the table touches, in
/// order, and `spans` locates the table in the linear text stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Declared number of grid rows
    pub row_count: usize,

    /// Declared number of grid columns
    pub column_count: usize,

    /// Flat cell list in detection order
    #[serde(default)]
    pub cells: Vec<TableCell>,

    /// Pages the table occupies, in order
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,

    /// Positions of the table in the text stream
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl Table {
    /// Create a table with the given dimensions and no cells.
    pub fn new(row_count: usize, column_count: usize) -> Self {
        Self {
            row_count,
            column_count,
            cells: Vec::new(),
            bounding_regions: Vec::new(),
            spans: Vec::new(),
        }
    }

    /// Page number of the first bounding region, if any.
    pub fn first_page_number(&self) -> Option<u32> {
        self.bounding_regions.first().map(|r| r.page_number)
    }

    /// Page number of the last bounding region, if any.
    pub fn last_page_number(&self) -> Option<u32> {
        self.bounding_regions.last().map(|r| r.page_number)
    }

    /// First span of the table, if the service reported one.
    pub fn first_span(&self) -> Option<Span> {
        self.spans.first().copied()
    }
}

/// The full structured output of the layout-analysis service for one file.
///
/// Immutable input: reconstruction only ever borrows it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeResult {
    /// Pages in document order
    #[serde(default)]
    pub pages: Vec<Page>,

    /// Detected tables
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl AnalyzeResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a page by its page number.
    pub fn page(&self, page_number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }

    /// Deserialize a result from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a result persisted as a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
