//! Search facade wiring the external collaborators together.

use std::sync::Arc;

use tracing::debug;

use crate::aggregate::{Aggregator, SearchResult};
use crate::analysis::{KeywordNormalizer, SimpleNormalizer};
use crate::error::Result;
use crate::excerpt::ExcerptBuilder;
use crate::index::{SearchIndex, SectionResolver};
use crate::store::{DirectViewablePolicy, RecordStore, ViewablePolicy};

/// The main entry point for weighted substring search.
///
/// Holds the external collaborators (index, record store, section resolver)
/// and the pluggable pieces (normalizer, viewable policy, excerpt builder),
/// and runs one deterministic pass per query: normalize, resolve sections,
/// fetch hits, aggregate, sort. No state outlives a single [`search`] call.
///
/// [`search`]: SearchEngine::search
pub struct SearchEngine {
    index: Arc<dyn SearchIndex>,
    store: Arc<dyn RecordStore>,
    sections: Arc<dyn SectionResolver>,
    normalizer: Arc<dyn KeywordNormalizer>,
    policy: Arc<dyn ViewablePolicy>,
    excerpt_builder: ExcerptBuilder,
}

impl SearchEngine {
    /// Create a new search engine over the given collaborators, with the
    /// default normalizer, viewable policy, and excerpt builder.
    pub fn new(
        index: Arc<dyn SearchIndex>,
        store: Arc<dyn RecordStore>,
        sections: Arc<dyn SectionResolver>,
    ) -> Self {
        SearchEngine {
            index,
            store,
            sections,
            normalizer: Arc::new(SimpleNormalizer::new()),
            policy: Arc::new(DirectViewablePolicy::new()),
            excerpt_builder: ExcerptBuilder::new(),
        }
    }

    /// Replace the needle normalizer. It must match the normalization the
    /// index applies to stored keywords.
    pub fn with_normalizer(mut self, normalizer: Arc<dyn KeywordNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Replace the viewable-record policy.
    pub fn with_viewable_policy(mut self, policy: Arc<dyn ViewablePolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the excerpt builder.
    pub fn with_excerpt_builder(mut self, excerpt_builder: ExcerptBuilder) -> Self {
        self.excerpt_builder = excerpt_builder;
        self
    }

    /// Search records for a substring, most relevant first.
    ///
    /// `section_handles` restricts the search to those sections; an empty
    /// slice searches all sections, and unresolvable handles are silently
    /// omitted from the filter. Errors from the index or record store are
    /// surfaced unchanged, never masked as an empty result list.
    pub fn search(
        &self,
        needle: &str,
        locale: &str,
        section_handles: &[String],
    ) -> Result<Vec<SearchResult>> {
        let normalized_needle = self.normalizer.normalize(needle);
        let section_ids = self.sections.resolve_section_ids(section_handles)?;
        debug!(
            needle,
            %normalized_needle,
            locale,
            sections = section_ids.len(),
            "querying index"
        );

        let hits = self.index.query(&normalized_needle, locale, &section_ids)?;
        debug!(hits = hits.len(), "aggregating hits");

        let aggregator = Aggregator::new(self.store.as_ref(), self.policy.as_ref())
            .with_excerpt_builder(self.excerpt_builder.clone());
        let results = aggregator.aggregate(&hits, needle, &normalized_needle, locale)?;
        debug!(results = results.len(), "search complete");
        Ok(results)
    }
}
