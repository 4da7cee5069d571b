//! Needle normalization.
//!
//! The external index stores normalized keywords, so the needle must be
//! normalized the same way before querying. The exact normalization is owned
//! by the indexing side; this module only defines the seam and a default
//! that covers the minimum contract (case-folding, whitespace collapse).

/// Trait for normalizing a raw needle into the form the index stores.
///
/// Implementations must apply the same normalization the external index
/// applies to stored keywords, case-folding at minimum.
pub trait KeywordNormalizer: Send + Sync {
    /// Normalize the given raw string.
    fn normalize(&self, raw: &str) -> String;

    /// Get the name of this normalizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Default normalizer: Unicode-lowercases and collapses runs of whitespace
/// into single spaces, trimming the ends.
#[derive(Debug, Clone, Default)]
pub struct SimpleNormalizer;

impl SimpleNormalizer {
    /// Create a new simple normalizer.
    pub fn new() -> Self {
        SimpleNormalizer
    }
}

impl KeywordNormalizer for SimpleNormalizer {
    fn normalize(&self, raw: &str) -> String {
        raw.split_whitespace()
            .map(|word| word.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}
