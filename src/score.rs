//! Relevance weights for index hits.
//!
//! Scores are integers, not probabilities: each weight tier is an order of
//! magnitude above the one below it, so a single higher-tier match always
//! outranks any realistic number of lower-tier occurrences.

use crate::record::Record;

/// Weight for each needle occurrence inside a viewable record's title when
/// the title is not an exact match.
pub const PARTIAL_TITLE_WEIGHT: u64 = 1_000;

/// Weight awarded when the needle is the record's entire title.
pub const FULL_TITLE_WEIGHT: u64 = 10_000;

/// One-time bonus when the raw needle exactly matches one of the record's
/// prioritized search terms.
pub const PRIORITIZED_TERM_WEIGHT: u64 = 100_000;

/// Compute the weight of a single index hit.
///
/// `is_viewable_title` must only be set when the hit is on the title of the
/// record that is itself being credited; title weighting does not apply when
/// credit goes to a substituted parent record. Each occurrence of the needle
/// in a non-title attribute counts 1.
pub fn hit_weight(is_viewable_title: bool, keywords: &str, normalized_needle: &str) -> u64 {
    if is_viewable_title && keywords.trim() == normalized_needle {
        return FULL_TITLE_WEIGHT;
    }
    let occurrences = count_occurrences(keywords, normalized_needle);
    if is_viewable_title {
        occurrences * PARTIAL_TITLE_WEIGHT
    } else {
        occurrences
    }
}

/// Compute the one-time override weight for a record.
///
/// The comparison uses the raw, non-normalized needle: the override is a
/// manual editorial match, not an index match.
pub fn override_weight(record: &Record, needle: &str) -> u64 {
    if record.prioritized_search_terms.contains(needle) {
        PRIORITIZED_TERM_WEIGHT
    } else {
        0
    }
}

/// Count non-overlapping occurrences of `needle` in `haystack`. An empty
/// needle occurs zero times.
fn count_occurrences(haystack: &str, needle: &str) -> u64 {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count() as u64
}
