//! Conversion options and configuration.

use crate::model::IdHashKey;

/// Options controlling document reconstruction.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Number of lines before a table to attach as preceding context
    pub preceding_context_len: usize,

    /// Number of lines after a table to attach as following context
    pub following_context_len: usize,

    /// Whether to collapse stacked column header rows into one
    pub merge_multiple_column_headers: bool,

    /// Whether to record the table's starting page number in its metadata
    pub add_page_number: bool,

    /// How to treat cells whose spans are reported as zero or absent
    pub zero_span_policy: ZeroSpanPolicy,

    /// ISO 639-1 codes the reconstructed text is validated against
    pub valid_languages: Option<Vec<String>>,

    /// Fields contributing to document id derivation
    pub id_hash_keys: Vec<IdHashKey>,
}

impl ConvertOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of preceding context lines.
    pub fn with_preceding_context_len(mut self, len: usize) -> Self {
        self.preceding_context_len = len;
        self
    }

    /// Set the number of following context lines.
    pub fn with_following_context_len(mut self, len: usize) -> Self {
        self.following_context_len = len;
        self
    }

    /// Enable or disable merging of stacked column header rows.
    pub fn with_merge_column_headers(mut self, merge: bool) -> Self {
        self.merge_multiple_column_headers = merge;
        self
    }

    /// Enable or disable page numbers in table metadata.
    pub fn with_page_numbers(mut self, add: bool) -> Self {
        self.add_page_number = add;
        self
    }

    /// Set the zero-span policy.
    pub fn with_zero_span_policy(mut self, policy: ZeroSpanPolicy) -> Self {
        self.zero_span_policy = policy;
        self
    }

    /// Treat zero or absent spans as spans of one.
    pub fn zero_span_as_one(mut self) -> Self {
        self.zero_span_policy = ZeroSpanPolicy::AtLeastOne;
        self
    }

    /// Set the accepted languages for validation.
    pub fn with_valid_languages<S: Into<String>>(
        mut self,
        languages: impl IntoIterator<Item = S>,
    ) -> Self {
        self.valid_languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    /// Set the fields hashed into document ids.
    pub fn with_id_hash_keys(mut self, keys: impl IntoIterator<Item = IdHashKey>) -> Self {
        self.id_hash_keys = keys.into_iter().collect();
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            preceding_context_len: 3,
            following_context_len: 3,
            merge_multiple_column_headers: true,
            add_page_number: true,
            zero_span_policy: ZeroSpanPolicy::default(),
            valid_languages: None,
            id_hash_keys: vec![IdHashKey::Content],
        }
    }
}

/// How to expand a cell whose row or column span is zero or absent.
///
/// The upstream format allows spans of zero. Under [`Skip`], such a cell
/// contributes no placements at all and silently drops out of the grid —
/// this reproduces the literal span-count semantics of existing outputs.
/// [`AtLeastOne`] clamps every span to a minimum of one, so the cell still
/// occupies its own coordinates.
///
/// [`Skip`]: ZeroSpanPolicy::Skip
/// [`AtLeastOne`]: ZeroSpanPolicy::AtLeastOne
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroSpanPolicy {
    /// A zero/absent span contributes zero placements (drops the cell)
    #[default]
    Skip,
    /// Clamp spans to a minimum of one
    AtLeastOne,
}

impl ZeroSpanPolicy {
    /// Effective span count for a reported span value.
    pub fn effective(&self, span: Option<u32>) -> u32 {
        match self {
            ZeroSpanPolicy::Skip => span.unwrap_or(0),
            ZeroSpanPolicy::AtLeastOne => span.unwrap_or(1).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ConvertOptions::new()
            .with_preceding_context_len(5)
            .with_following_context_len(0)
            .with_merge_column_headers(false)
            .with_page_numbers(false)
            .zero_span_as_one()
            .with_valid_languages(["en", "de"])
            .with_id_hash_keys([IdHashKey::Content, IdHashKey::Meta]);

        assert_eq!(options.preceding_context_len, 5);
        assert_eq!(options.following_context_len, 0);
        assert!(!options.merge_multiple_column_headers);
        assert!(!options.add_page_number);
        assert_eq!(options.zero_span_policy, ZeroSpanPolicy::AtLeastOne);
        assert_eq!(
            options.valid_languages,
            Some(vec!["en".to_string(), "de".to_string()])
        );
        assert_eq!(options.id_hash_keys.len(), 2);
    }

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert_eq!(options.preceding_context_len, 3);
        assert_eq!(options.following_context_len, 3);
        assert!(options.merge_multiple_column_headers);
        assert!(options.add_page_number);
        assert_eq!(options.zero_span_policy, ZeroSpanPolicy::Skip);
        assert!(options.valid_languages.is_none());
        assert_eq!(options.id_hash_keys, vec![IdHashKey::Content]);
    }

    #[test]
    fn test_zero_span_policy() {
        assert_eq!(ZeroSpanPolicy::Skip.effective(None), 0);
        assert_eq!(ZeroSpanPolicy::Skip.effective(Some(0)), 0);
        assert_eq!(ZeroSpanPolicy::Skip.effective(Some(2)), 2);

        assert_eq!(ZeroSpanPolicy::AtLeastOne.effective(None), 1);
        assert_eq!(ZeroSpanPolicy::AtLeastOne.effective(Some(0)), 1);
        assert_eq!(ZeroSpanPolicy::AtLeastOne.effective(Some(2)), 2);
    }
}
