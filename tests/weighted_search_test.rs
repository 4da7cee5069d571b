//! End-to-end tests for the weighted search engine, using in-memory
//! collaborators that mimic a LIKE-backed keyword index and a CMS record
//! store.

use std::collections::HashMap;
use std::sync::Arc;

use hitmark::error::Result;
use hitmark::index::{SearchIndex, StaticSectionResolver, escape_like_pattern};
use hitmark::record::{FieldId, FieldKind, FieldMeta, IndexHit, Record, RecordId, SectionId};
use hitmark::score::{FULL_TITLE_WEIGHT, PARTIAL_TITLE_WEIGHT, PRIORITIZED_TERM_WEIGHT};
use hitmark::store::RecordStore;
use hitmark::{RecordStatus, SearchEngine};

/// One indexed keyword row, as the external index would store it.
#[derive(Clone)]
struct IndexRow {
    hit: IndexHit,
    section_id: Option<SectionId>,
    locale: String,
}

/// In-memory stand-in for a SQL-LIKE-backed keyword index.
#[derive(Default)]
struct MemoryIndex {
    rows: Vec<IndexRow>,
}

impl MemoryIndex {
    fn add(&mut self, hit: IndexHit, section_id: Option<SectionId>, locale: &str) {
        self.rows.push(IndexRow {
            hit,
            section_id,
            locale: locale.to_string(),
        });
    }
}

impl SearchIndex for MemoryIndex {
    fn query(
        &self,
        normalized_needle: &str,
        locale: &str,
        section_ids: &[SectionId],
    ) -> Result<Vec<IndexHit>> {
        let pattern = format!("%{}%", escape_like_pattern(normalized_needle));
        Ok(self
            .rows
            .iter()
            .filter(|row| row.locale == locale)
            .filter(|row| {
                section_ids.is_empty()
                    || row
                        .section_id
                        .is_some_and(|section| section_ids.contains(&section))
            })
            .filter(|row| like_match(&row.hit.keywords, &pattern))
            .map(|row| row.hit.clone())
            .collect())
    }
}

/// Interpret a SQL LIKE pattern: `%` and `_` are wildcards unless preceded
/// by a backslash.
fn like_match(text: &str, pattern: &str) -> bool {
    let mut translated = String::from("^");
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    translated.push_str(&regex::escape(&escaped.to_string()));
                }
            }
            '%' => translated.push_str(".*"),
            '_' => translated.push('.'),
            other => translated.push_str(&regex::escape(&other.to_string())),
        }
    }
    translated.push('$');
    regex::Regex::new(&translated).unwrap().is_match(text)
}

#[derive(Default)]
struct MemoryStore {
    records: HashMap<RecordId, Record>,
    fields: HashMap<FieldId, FieldMeta>,
}

impl MemoryStore {
    fn add_record(&mut self, record: Record) {
        self.records.insert(record.id, record);
    }

    fn add_field(&mut self, field_id: FieldId, meta: FieldMeta) {
        self.fields.insert(field_id, meta);
    }
}

impl RecordStore for MemoryStore {
    fn lookup_record(&self, id: RecordId, _locale: &str) -> Result<Option<Record>> {
        Ok(self.records.get(&id).cloned())
    }

    fn lookup_field_meta(&self, field_id: FieldId) -> Result<Option<FieldMeta>> {
        Ok(self.fields.get(&field_id).cloned())
    }
}

/// A small site: a contact page, a store page with rich text, a news
/// article, and an unpublished draft.
fn build_site() -> (MemoryIndex, MemoryStore, StaticSectionResolver) {
    let mut index = MemoryIndex::default();
    let mut store = MemoryStore::default();

    store.add_field(10, FieldMeta::new(FieldKind::RichText, "body"));
    store.add_field(11, FieldMeta::new(FieldKind::PlainText, "summary"));
    store.add_field(12, FieldMeta::new(FieldKind::Other("table".to_string()), "sizes"));

    store.add_record(Record::new(1, "Contact").with_section(100));
    index.add(IndexHit::title(1, "contact"), Some(100), "en");

    store.add_record(
        Record::new(2, "Our store")
            .with_section(100)
            .with_prioritized_term("shoes")
            .with_field(
                "body",
                "<h2>Shoes</h2><p>We sell shoes &amp; boots. Contact the store for shoes in other sizes.</p>",
            ),
    );
    index.add(
        IndexHit::field(2, 10, "shoes we sell shoes boots contact the store for shoes in other sizes"),
        Some(100),
        "en",
    );

    store.add_record(
        Record::new(3, "Contact hours for the store")
            .with_section(101)
            .with_field("summary", "When to contact the store staff."),
    );
    index.add(IndexHit::title(3, "contact hours for the store"), Some(101), "en");
    index.add(IndexHit::field(3, 11, "when to contact the store staff"), Some(101), "en");

    store.add_record(
        Record::new(4, "Contact draft")
            .with_section(100)
            .with_status(RecordStatus::Pending),
    );
    index.add(IndexHit::title(4, "contact draft"), Some(100), "en");

    let sections = StaticSectionResolver::new()
        .with_section("pages", 100)
        .with_section("news", 101);

    (index, store, sections)
}

fn build_engine() -> SearchEngine {
    let (index, store, sections) = build_site();
    SearchEngine::new(Arc::new(index), Arc::new(store), Arc::new(sections))
}

#[test]
fn test_full_title_match_outranks_everything_but_overrides() -> Result<()> {
    let engine = build_engine();
    let results = engine.search("Contact", "en", &[])?;

    // Draft is skipped, the three published records each get one result.
    assert_eq!(results.len(), 3);

    // Full title match first.
    assert_eq!(results[0].record.id, 1);
    assert_eq!(results[0].score, FULL_TITLE_WEIGHT);

    // Partial title match plus one field occurrence.
    assert_eq!(results[1].record.id, 3);
    assert_eq!(results[1].score, PARTIAL_TITLE_WEIGHT + 1);

    // One body occurrence only.
    assert_eq!(results[2].record.id, 2);
    assert_eq!(results[2].score, 1);
    Ok(())
}

#[test]
fn test_prioritized_term_dominates() -> Result<()> {
    let engine = build_engine();
    let results = engine.search("shoes", "en", &[])?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.id, 2);
    // Three keyword occurrences plus the one-time override bonus.
    assert_eq!(results[0].score, PRIORITIZED_TERM_WEIGHT + 3);
    Ok(())
}

#[test]
fn test_rich_text_excerpt_is_highlighted_and_escaped() -> Result<()> {
    let engine = build_engine();
    let results = engine.search("shoes", "en", &[])?;

    let excerpt = &results[0].excerpt;
    assert!(excerpt.contains("<mark>Shoes</mark>"));
    assert!(excerpt.contains("<mark>shoes</mark>"));
    // The decoded ampersand gets re-escaped for safe embedding.
    assert!(excerpt.contains("&amp; boots"));
    // No markup from the source field survives.
    assert!(!excerpt.contains("<p>"));
    assert!(!excerpt.contains("<h2>"));
    Ok(())
}

#[test]
fn test_title_only_match_has_empty_excerpt() -> Result<()> {
    let engine = build_engine();
    let results = engine.search("Contact", "en", &[])?;

    assert_eq!(results[0].record.id, 1);
    assert_eq!(results[0].excerpt, "");
    Ok(())
}

#[test]
fn test_section_filter_restricts_results() -> Result<()> {
    let engine = build_engine();
    let results = engine.search("Contact", "en", &["news".to_string()])?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.id, 3);
    Ok(())
}

#[test]
fn test_unknown_section_handle_is_ignored() -> Result<()> {
    let engine = build_engine();

    // Only unknown handles resolve to an empty filter, i.e. all sections.
    let results = engine.search("Contact", "en", &["no-such-section".to_string()])?;
    assert_eq!(results.len(), 3);
    Ok(())
}

#[test]
fn test_locale_restricts_hits() -> Result<()> {
    let engine = build_engine();
    let results = engine.search("Contact", "de", &[])?;
    assert!(results.is_empty());
    Ok(())
}

#[test]
fn test_no_results_is_empty_not_error() -> Result<()> {
    let engine = build_engine();
    let results = engine.search("xyzzy", "en", &[])?;
    assert!(results.is_empty());
    Ok(())
}

#[test]
fn test_wildcard_characters_match_literally() -> Result<()> {
    let mut index = MemoryIndex::default();
    let mut store = MemoryStore::default();

    store.add_field(11, FieldMeta::new(FieldKind::PlainText, "summary"));
    store.add_record(
        Record::new(1, "Cotton shirt").with_field("summary", "Made of 100% cotton."),
    );
    index.add(IndexHit::field(1, 11, "made of 100% cotton"), None, "en");

    store.add_record(Record::new(2, "Wool shirt").with_field("summary", "All wool."));
    index.add(IndexHit::field(2, 11, "all wool"), None, "en");

    let engine = SearchEngine::new(
        Arc::new(index),
        Arc::new(store),
        Arc::new(StaticSectionResolver::new()),
    );

    // An unescaped "%" would match every row; a literal one matches only
    // the keywords actually containing it.
    let results = engine.search("%", "en", &[])?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.id, 1);
    assert!(results[0].excerpt.contains("<mark>%</mark>"));

    let results = engine.search("_", "en", &[])?;
    assert!(results.is_empty());
    Ok(())
}

#[test]
fn test_excerpt_round_trip_contains_needle() -> Result<()> {
    let engine = build_engine();
    let results = engine.search("store", "en", &[])?;

    for result in &results {
        if result.excerpt.is_empty() {
            continue;
        }
        let plain = result
            .excerpt
            .replace("<mark>", "")
            .replace("</mark>", "")
            .replace('…', "")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");
        assert!(plain.to_lowercase().contains("store"));
    }
    Ok(())
}
