//! Collaborator interfaces for the external full-text index.
//!
//! The index itself lives outside this crate (typically a keyword table in
//! the content store's database). The search facade only needs a way to turn
//! section handles into ids and a way to fetch raw hits for a normalized
//! needle.

use std::collections::HashMap;

use crate::error::Result;
use crate::record::{IndexHit, SectionId};

/// Trait for the external full-text index.
pub trait SearchIndex: Send + Sync {
    /// Fetch all hits whose indexed keywords contain `normalized_needle` as
    /// a case-insensitive substring, restricted to the given locale.
    ///
    /// An empty `section_ids` slice means "search all sections". Any `%` or
    /// `_` in the needle must be matched literally, not as wildcards; LIKE
    /// backed implementations can use [`escape_like_pattern`] for this.
    fn query(
        &self,
        normalized_needle: &str,
        locale: &str,
        section_ids: &[SectionId],
    ) -> Result<Vec<IndexHit>>;
}

/// Trait for resolving section handles to section ids.
pub trait SectionResolver: Send + Sync {
    /// Resolve the given handles, omitting any that cannot be resolved.
    ///
    /// An unresolvable handle is not an error; it simply does not restrict
    /// the section filter.
    fn resolve_section_ids(&self, handles: &[String]) -> Result<Vec<SectionId>>;
}

/// A section resolver backed by a fixed handle-to-id map.
#[derive(Debug, Clone, Default)]
pub struct StaticSectionResolver {
    sections: HashMap<String, SectionId>,
}

impl StaticSectionResolver {
    /// Create a new empty resolver.
    pub fn new() -> Self {
        StaticSectionResolver {
            sections: HashMap::new(),
        }
    }

    /// Register a section handle.
    pub fn with_section<S: Into<String>>(mut self, handle: S, id: SectionId) -> Self {
        self.sections.insert(handle.into(), id);
        self
    }
}

impl SectionResolver for StaticSectionResolver {
    fn resolve_section_ids(&self, handles: &[String]) -> Result<Vec<SectionId>> {
        Ok(handles
            .iter()
            .filter_map(|handle| self.sections.get(handle).copied())
            .collect())
    }
}

/// Escape `%` and `_` in a needle so a SQL-LIKE-backed index matches them
/// literally instead of as wildcards.
pub fn escape_like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if ch == '%' || ch == '_' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
