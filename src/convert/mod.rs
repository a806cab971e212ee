//! Conversion orchestration.
//!
//! [`LayoutConverter`] drives one full conversion: every table through the
//! table reconstructor, the body text once, and an optional language check
//! over everything produced. The converter holds no mutable state, so one
//! instance can serve any number of conversions.

use crate::error::Result;
use crate::model::{AnalyzeResult, Document, DocumentMeta};
use crate::reconstruct::{ConvertOptions, TableReconstructor, TextReconstructor};

/// Validates that extracted text is written in one of a set of languages.
///
/// The heuristic itself lives outside this crate; implementations are
/// injected into the [`LayoutConverter`]. A negative verdict is a
/// diagnostic signal (usually pointing at a decoding problem upstream),
/// never a correctness gate.
pub trait LanguageValidator: Send + Sync {
    /// Check whether `text` is written in one of `valid_languages`
    /// (ISO 639-1 codes).
    fn validate(&self, text: &str, valid_languages: &[String]) -> bool;
}

/// Converts one analysis result into indexable documents.
///
/// Output order is stable: one table document per detected table, in
/// detection order, followed by a single body-text document. Repeated
/// conversion of identical input yields identical document ids.
pub struct LayoutConverter {
    options: ConvertOptions,
    validator: Option<Box<dyn LanguageValidator>>,
}

impl LayoutConverter {
    /// Create a converter with the given options and no language validator.
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            validator: None,
        }
    }

    /// Install a language validator and return self.
    ///
    /// The validator only runs when `valid_languages` is configured.
    pub fn with_validator(mut self, validator: Box<dyn LanguageValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// The options this converter runs with.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert an analysis result into documents.
    ///
    /// `base_meta` is cloned into every produced document before the
    /// reconstructors tag their own fields onto it. A malformed table fails
    /// the whole conversion: an inconsistent table indicates an
    /// untrustworthy upstream result.
    pub fn convert(
        &self,
        result: &AnalyzeResult,
        base_meta: Option<&DocumentMeta>,
    ) -> Result<Vec<Document>> {
        let table_reconstructor = TableReconstructor::new(&self.options);
        let mut documents = Vec::with_capacity(result.tables.len() + 1);

        for table in &result.tables {
            documents.push(table_reconstructor.reconstruct(table, &result.pages, base_meta)?);
        }
        documents.push(TextReconstructor::new(&self.options).reconstruct(result, base_meta));

        if let Some(valid_languages) = &self.options.valid_languages {
            self.check_language(&documents, valid_languages)?;
        }

        Ok(documents)
    }

    /// Run the language check over everything the conversion produced.
    ///
    /// The checked text is the body text plus every table cell value,
    /// space-joined. A failed check logs a warning and nothing else.
    fn check_language(&self, documents: &[Document], valid_languages: &[String]) -> Result<()> {
        let Some(validator) = &self.validator else {
            return Ok(());
        };

        // The text document is always last; everything before it is a table.
        let mut full_text = match documents.last() {
            Some(doc) => doc.content.as_text()?.to_string(),
            None => String::new(),
        };
        for doc in &documents[..documents.len().saturating_sub(1)] {
            let grid = doc.content.as_table()?;
            for cell in grid.iter_cells() {
                full_text.push(' ');
                full_text.push_str(cell);
            }
        }

        if !validator.validate(&full_text, valid_languages) {
            log::warn!(
                "Reconstructed text is not in one of the accepted languages {:?}; \
                 the source may not have been decoded in the correct text format",
                valid_languages
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{BoundingRegion, ContentType, Line, Page, Span, Table, TableCell};
    use std::sync::{Arc, Mutex};

    /// Validator double that records what it was asked to check.
    struct RecordingValidator {
        verdict: bool,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingValidator {
        fn new(verdict: bool) -> (Self, Arc<Mutex<Vec<String>>>) {
            let seen = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    verdict,
                    seen: seen.clone(),
                },
                seen,
            )
        }
    }

    impl LanguageValidator for RecordingValidator {
        fn validate(&self, text: &str, _valid_languages: &[String]) -> bool {
            self.seen.lock().unwrap().push(text.to_string());
            self.verdict
        }
    }

    fn sample_result() -> AnalyzeResult {
        let mut page = Page::new(1);
        page.lines = vec![Line::new("Body line", 0, 9), Line::new("In table", 30, 8)];

        let mut table = Table::new(1, 2);
        table.cells = vec![TableCell::new(0, 0, "left"), TableCell::new(0, 1, "right")];
        table.bounding_regions = vec![BoundingRegion { page_number: 1 }];
        table.spans = vec![Span::new(20, 20)];

        AnalyzeResult {
            pages: vec![page],
            tables: vec![table],
        }
    }

    #[test]
    fn test_tables_come_before_text() {
        let converter = LayoutConverter::new(ConvertOptions::default());
        let documents = converter.convert(&sample_result(), None).unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].content_type(), ContentType::Table);
        assert_eq!(documents[1].content_type(), ContentType::Text);
        assert_eq!(documents[1].content.as_text().unwrap(), "Body line\n\u{0C}");
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let converter = LayoutConverter::new(ConvertOptions::default());
        let first = converter.convert(&sample_result(), None).unwrap();
        let second = converter.convert(&sample_result(), None).unwrap();

        let first_ids: Vec<&str> = first.iter().map(|d| d.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_validator_sees_text_and_cells() {
        let (validator, seen) = RecordingValidator::new(true);
        let options = ConvertOptions::new().with_valid_languages(["en"]);
        let converter = LayoutConverter::new(options).with_validator(Box::new(validator));

        converter.convert(&sample_result(), None).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        // Body text first, then every cell value space-joined
        assert_eq!(seen[0], "Body line\n\u{0C} left right");
    }

    #[test]
    fn test_failed_validation_never_fails_conversion() {
        let (validator, seen) = RecordingValidator::new(false);
        let options = ConvertOptions::new().with_valid_languages(["en"]);
        let converter = LayoutConverter::new(options).with_validator(Box::new(validator));

        let documents = converter.convert(&sample_result(), None).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_no_validator_skips_the_check() {
        let options = ConvertOptions::new().with_valid_languages(["en"]);
        let converter = LayoutConverter::new(options);
        assert!(converter.convert(&sample_result(), None).is_ok());
    }

    #[test]
    fn test_malformed_table_fails_whole_conversion() {
        let mut result = sample_result();
        result.tables[0].cells.push(TableCell::new(9, 0, "stray"));

        let converter = LayoutConverter::new(ConvertOptions::default());
        assert!(matches!(
            converter.convert(&result, None),
            Err(Error::MalformedTable { .. })
        ));
    }

    #[test]
    fn test_result_without_tables_yields_single_text_document() {
        let result = AnalyzeResult {
            pages: vec![Page::new(1)],
            tables: Vec::new(),
        };

        let converter = LayoutConverter::new(ConvertOptions::default());
        let documents = converter.convert(&result, None).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].content_type(), ContentType::Text);
    }
}
