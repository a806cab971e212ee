//! Data model for layout analysis input and reconstructed output.
//!
//! `analyze` mirrors the wire format of the external layout-analysis
//! service field-for-field; `document` defines the typed records handed
//! to the downstream indexing pipeline. The analysis side is read-only
//! input owned by the caller; reconstruction never mutates it.

mod analyze;
mod document;

pub use analyze::{AnalyzeResult, BoundingRegion, CellKind, Line, Page, Span, Table, TableCell};
pub use document::{Content, ContentType, Document, DocumentMeta, IdHashKey, TableGrid};
