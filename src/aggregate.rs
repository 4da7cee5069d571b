//! Per-record aggregation of raw index hits into ranked search results.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::excerpt::ExcerptBuilder;
use crate::extract::extract_text;
use crate::record::{AttributeKind, IndexHit, Record, RecordId};
use crate::score::{hit_weight, override_weight};
use crate::store::{RecordStore, ViewablePolicy};

/// One ranked search result.
///
/// There is exactly one result per distinct viewable record per query. The
/// score accumulates across all hits credited to that record; the excerpt is
/// filled by the first hit whose field yields non-empty text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The record credited with the hits.
    pub record: Record,
    /// HTML excerpt showing the needle in context. May be empty if no hit
    /// supplied extractable text.
    pub excerpt: String,
    /// Relevance score. Higher is better.
    pub score: u64,
}

/// Folds a sequence of index hits into ranked [`SearchResult`]s.
///
/// Hits are processed in the order the index delivered them. Each hit is
/// resolved to its record, checked for viewability, scored, and merged into
/// the accumulated result for its viewable record. Results are finally
/// sorted by score descending; ties keep their encounter order (the sort is
/// stable), though callers should not rely on tie order as a contract.
pub struct Aggregator<'a> {
    store: &'a dyn RecordStore,
    policy: &'a dyn ViewablePolicy,
    excerpt_builder: ExcerptBuilder,
}

impl<'a> Aggregator<'a> {
    /// Create a new aggregator over the given store and viewable policy.
    pub fn new(store: &'a dyn RecordStore, policy: &'a dyn ViewablePolicy) -> Self {
        Aggregator {
            store,
            policy,
            excerpt_builder: ExcerptBuilder::new(),
        }
    }

    /// Replace the default excerpt builder.
    pub fn with_excerpt_builder(mut self, excerpt_builder: ExcerptBuilder) -> Self {
        self.excerpt_builder = excerpt_builder;
        self
    }

    /// Aggregate hits into one ranked result per viewable record.
    ///
    /// `needle` is the raw user query (used for override matching and
    /// excerpting); `normalized_needle` is what the index actually matched
    /// (used for scoring against indexed keywords).
    pub fn aggregate(
        &self,
        hits: &[IndexHit],
        needle: &str,
        normalized_needle: &str,
        locale: &str,
    ) -> Result<Vec<SearchResult>> {
        let mut results: Vec<SearchResult> = Vec::new();
        let mut slot_by_record: AHashMap<RecordId, usize> = AHashMap::new();

        for hit in hits {
            let Some(record) = self.store.lookup_record(hit.record_id, locale)? else {
                continue;
            };
            if !record.is_published() {
                continue;
            }
            let Some(viewable) = self.policy.viewable_record(&record) else {
                continue;
            };

            // Title weighting only applies when the credited record is the
            // one whose title actually matched.
            let is_viewable_title =
                hit.attribute == AttributeKind::Title && viewable.id == record.id;
            let weight = hit_weight(is_viewable_title, &hit.keywords, normalized_needle);

            let slot = match slot_by_record.get(&viewable.id) {
                Some(&slot) => {
                    results[slot].score += weight;
                    slot
                }
                None => {
                    let viewable_id = viewable.id;
                    let bonus = override_weight(&viewable, needle);
                    results.push(SearchResult {
                        record: viewable,
                        excerpt: String::new(),
                        score: bonus + weight,
                    });
                    let slot = results.len() - 1;
                    slot_by_record.insert(viewable_id, slot);
                    slot
                }
            };

            // Retry extraction on every hit until some field yields text.
            // The excerpt comes from the hit's own record and field, not the
            // viewable record, and uses the raw needle.
            if results[slot].excerpt.is_empty() {
                results[slot].excerpt = self.field_excerpt(&record, hit, needle)?;
            }
        }

        results.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(results)
    }

    /// Build the excerpt for a hit, or an empty string when the hit carries
    /// no field or the field yields no text.
    fn field_excerpt(&self, record: &Record, hit: &IndexHit, needle: &str) -> Result<String> {
        let Some(field_id) = hit.field_id else {
            return Ok(String::new());
        };
        let Some(meta) = self.store.lookup_field_meta(field_id)? else {
            return Ok(String::new());
        };
        let text = extract_text(record, &meta);
        Ok(self.excerpt_builder.build(&text, needle))
    }
}
