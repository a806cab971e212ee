//! Table grid reconstruction.

use crate::error::{Error, Result};
use crate::model::{
    CellKind, Content, Document, DocumentMeta, Page, Table, TableGrid,
};
use std::collections::BTreeSet;

use super::ConvertOptions;

/// Markers the analysis service injects for checkbox selection state.
const SELECTION_MARKERS: [&str; 2] = [":selected:", ":unselected:"];

/// Rebuilds one table's flat cell list into a rectangular grid document.
///
/// The reconstructor separates a leading full-width cell off as the table
/// caption, expands every remaining cell across its declared spans,
/// optionally collapses stacked column header rows into one, and attaches
/// the body lines surrounding the table as preceding/following context.
///
/// Known limitation: for a table with multiple spans, only the first span's
/// end offset bounds the following context, so lines between later spans of
/// a multi-page table may be picked up as context.
pub struct TableReconstructor<'a> {
    options: &'a ConvertOptions,
}

impl<'a> TableReconstructor<'a> {
    /// Create a reconstructor over the given options.
    pub fn new(options: &'a ConvertOptions) -> Self {
        Self { options }
    }

    /// Reconstruct a single table into a table document.
    ///
    /// `pages` is the full page list of the analysis result; it supplies the
    /// context lines. `base_meta` is cloned before the context fields are
    /// set, so the caller's metadata is never mutated. Cell placements
    /// outside the declared grid produce [`Error::MalformedTable`].
    pub fn reconstruct(
        &self,
        table: &Table,
        pages: &[Page],
        base_meta: Option<&DocumentMeta>,
    ) -> Result<Document> {
        let mut grid: Vec<Vec<String>> =
            vec![vec![String::new(); table.column_count]; table.row_count];
        let mut extra_header_rows: BTreeSet<usize> = BTreeSet::new();
        let mut caption = String::new();
        let mut row_offset = 0usize;

        for (idx, cell) in table.cells.iter().enumerate() {
            let content = strip_selection_markers(&cell.content);

            // A leading cell spanning the whole width is the table caption,
            // not grid data; its row is dropped and later placements shift
            // up by one.
            if idx == 0 && cell.column_span == Some(table.column_count as u32) {
                caption = content;
                row_offset = 1;
                if !grid.is_empty() {
                    grid.remove(0);
                }
                continue;
            }

            let column_span = self.options.zero_span_policy.effective(cell.column_span);
            let row_span = self.options.zero_span_policy.effective(cell.row_span);

            for c in 0..column_span as usize {
                let column = cell.column_index + c;
                if column >= table.column_count {
                    return Err(self.malformed(table, cell.row_index, column));
                }

                for r in 0..row_span as usize {
                    if self.options.merge_multiple_column_headers
                        && cell.kind == CellKind::ColumnHeader
                        && cell.row_index > row_offset
                    {
                        // A second or later header row: fold its content onto
                        // the first header row and mark the source row for
                        // removal.
                        let merged_row = cell.row_index - row_offset;
                        if merged_row >= grid.len() {
                            return Err(self.malformed(table, cell.row_index, column));
                        }
                        let slot = &mut grid[0][column];
                        slot.push('\n');
                        slot.push_str(&content);
                        extra_header_rows.insert(merged_row);
                    } else {
                        let row = (cell.row_index + r)
                            .checked_sub(row_offset)
                            .ok_or_else(|| self.malformed(table, cell.row_index, column))?;
                        if row >= grid.len() {
                            return Err(self.malformed(table, cell.row_index + r, column));
                        }
                        grid[row][column] = content.clone();
                    }
                }
            }
        }

        // Merged header rows got attached to row 0; delete them back to
        // front so earlier removals do not shift later indices.
        for row in extra_header_rows.iter().rev() {
            grid.remove(*row);
        }

        let (preceding_context, following_context) = self.extract_context(table, pages, &caption);

        let mut meta = base_meta.cloned().unwrap_or_default();
        meta.preceding_context = Some(preceding_context);
        meta.following_context = Some(following_context);
        if self.options.add_page_number {
            if let Some(page_number) = table.first_page_number() {
                meta.page = Some(page_number);
            }
        }

        Ok(Document::new(
            Content::Table(TableGrid::from_rows(grid)),
            meta,
            &self.options.id_hash_keys,
        ))
    }

    /// Collect the body lines surrounding the table.
    ///
    /// Missing pages, spans, or lines degrade to empty context strings.
    fn extract_context(&self, table: &Table, pages: &[Page], caption: &str) -> (String, String) {
        let start_page = table
            .first_page_number()
            .and_then(|n| pages.iter().find(|p| p.page_number == n));
        let first_span = table.first_span();

        let preceding_lines: Vec<&str> = match (start_page, first_span) {
            (Some(page), Some(span)) => page
                .lines
                .iter()
                .filter(|line| line.first_offset().is_some_and(|o| o < span.offset))
                .map(|line| line.content.as_str())
                .collect(),
            _ => Vec::new(),
        };
        let keep_from = preceding_lines
            .len()
            .saturating_sub(self.options.preceding_context_len);
        let preceding_context = format!("{}\n{}", preceding_lines[keep_from..].join("\n"), caption)
            .trim()
            .to_string();

        // A table contained in one page ends on the page it starts on;
        // otherwise the last bounding region names the end page.
        let end_page = if table.bounding_regions.len() <= 1 {
            start_page
        } else {
            table
                .last_page_number()
                .and_then(|n| pages.iter().find(|p| p.page_number == n))
        };

        let following_context = match (end_page, first_span) {
            (Some(page), Some(span)) => page
                .lines
                .iter()
                .filter(|line| line.first_offset().is_some_and(|o| o > span.end()))
                .take(self.options.following_context_len)
                .map(|line| line.content.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            _ => String::new(),
        };

        (preceding_context, following_context)
    }

    fn malformed(&self, table: &Table, row: usize, column: usize) -> Error {
        Error::MalformedTable {
            row,
            column,
            row_count: table.row_count,
            column_count: table.column_count,
        }
    }
}

/// Strip checkbox selection-state markers from cell content.
fn strip_selection_markers(content: &str) -> String {
    let mut content = content.to_string();
    for marker in SELECTION_MARKERS {
        content = content.replace(marker, "");
    }
    content
}
