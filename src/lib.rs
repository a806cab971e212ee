//! # unlayout
//!
//! Reconstructs indexable documents from the structured output of a
//! document-layout-analysis service.
//!
//! The service reports page geometry, text lines, and detected tables as
//! flat cell lists with row/column coordinates and spans. This library
//! rebuilds each table into a rectangular grid (splitting off captions and
//! merging stacked header rows), attaches the surrounding body lines as
//! context, and merges everything outside the tables into one body-text
//! stream with page-break markers. The produced [`Document`] records feed
//! a downstream indexing/search pipeline.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unlayout::{convert_json_file, ConvertOptions};
//!
//! fn main() -> unlayout::Result<()> {
//!     // Convert a persisted analysis result
//!     let documents = convert_json_file("report.json", &ConvertOptions::default())?;
//!
//!     for doc in &documents {
//!         println!("{}: {}", doc.id, doc.content_type());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Table reconstruction**: captions, merged cells, multi-row headers
//! - **Context extraction**: body lines before and after every table
//! - **Body text**: in-table lines excluded, form-feed page markers
//! - **Deterministic ids**: repeated conversion yields identical documents
//! - **Language check seam**: injectable validator, warning-only

pub mod convert;
pub mod error;
pub mod model;
pub mod reconstruct;

// Re-export commonly used types
pub use convert::{LanguageValidator, LayoutConverter};
pub use error::{Error, Result};
pub use model::{
    AnalyzeResult, BoundingRegion, CellKind, Content, ContentType, Document, DocumentMeta,
    IdHashKey, Line, Page, Span, Table, TableCell, TableGrid,
};
pub use reconstruct::{ConvertOptions, TableReconstructor, TextReconstructor, ZeroSpanPolicy};

use std::path::Path;

/// Convert an already-materialized analysis result into documents.
///
/// # Example
///
/// ```no_run
/// use unlayout::{convert_result, AnalyzeResult, ConvertOptions};
///
/// let result = AnalyzeResult::from_json_file("report.json").unwrap();
/// let documents = convert_result(&result, &ConvertOptions::default()).unwrap();
/// println!("Documents: {}", documents.len());
/// ```
pub fn convert_result(result: &AnalyzeResult, options: &ConvertOptions) -> Result<Vec<Document>> {
    LayoutConverter::new(options.clone()).convert(result, None)
}

/// Convert an analysis result serialized as a JSON string.
pub fn convert_json_str(json: &str, options: &ConvertOptions) -> Result<Vec<Document>> {
    let result = AnalyzeResult::from_json_str(json)?;
    convert_result(&result, options)
}

/// Convert an analysis result persisted as a JSON file.
///
/// The file holds the raw service output, typically saved alongside the
/// source file with a `.json` suffix.
pub fn convert_json_file<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> Result<Vec<Document>> {
    let result = AnalyzeResult::from_json_file(path)?;
    convert_result(&result, options)
}
