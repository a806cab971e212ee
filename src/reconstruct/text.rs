//! Body text reconstruction.

use crate::model::{AnalyzeResult, Content, Document, DocumentMeta, Span};
use std::collections::HashMap;

use super::ConvertOptions;

/// Page-break marker appended after every processed page.
const PAGE_BREAK: char = '\u{0C}';

/// Merges all non-table lines of a result into one body-text document.
///
/// Lines whose position falls inside a detected table are skipped; the
/// table documents carry that content instead. Every processed page
/// contributes a form-feed marker, emitted lines or not, so consumers can
/// recover page boundaries from the text stream.
pub struct TextReconstructor<'a> {
    options: &'a ConvertOptions,
}

impl<'a> TextReconstructor<'a> {
    /// Create a reconstructor over the given options.
    pub fn new(options: &'a ConvertOptions) -> Self {
        Self { options }
    }

    /// Reconstruct the body text of the whole result into a text document.
    ///
    /// `base_meta` is cloned into the document unchanged; text documents
    /// carry no context or page fields of their own.
    pub fn reconstruct(
        &self,
        result: &AnalyzeResult,
        base_meta: Option<&DocumentMeta>,
    ) -> Document {
        // Index each table's first span under the page it starts on. Only
        // the first bounding region counts; tables without regions cannot
        // be located and claim no lines.
        let mut table_spans_by_page: HashMap<u32, Vec<Span>> = HashMap::new();
        for table in &result.tables {
            if let (Some(page_number), Some(span)) =
                (table.first_page_number(), table.first_span())
            {
                table_spans_by_page.entry(page_number).or_default().push(span);
            }
        }

        let mut text = String::new();
        for page in &result.pages {
            let tables_on_page = table_spans_by_page
                .get(&page.page_number)
                .map(Vec::as_slice)
                .unwrap_or_default();

            for line in &page.lines {
                let in_table = line.first_offset().is_some_and(|offset| {
                    tables_on_page
                        .iter()
                        .any(|span| span.contains_inclusive(offset))
                });
                if in_table {
                    continue;
                }
                text.push_str(&line.content);
                text.push('\n');
            }
            text.push(PAGE_BREAK);
        }

        Document::new(
            Content::Text(text),
            base_meta.cloned().unwrap_or_default(),
            &self.options.id_hash_keys,
        )
    }
}
