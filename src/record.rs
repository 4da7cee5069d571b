//! Record and index-hit data model.
//!
//! Records live in an external content store; this crate only reads them.
//! Index hits are produced by the external full-text index, one per
//! field/attribute containing the normalized needle, and are consumed once
//! per aggregation pass.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Identifier of a record in the external content store.
pub type RecordId = u64;

/// Identifier of a field definition in the external content store.
pub type FieldId = u64;

/// Identifier of a section (a grouping of records) in the content store.
pub type SectionId = u64;

/// Publication status of a record.
///
/// Only [`RecordStatus::Published`] records are viewable and may receive
/// credit for search hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// The record is live and viewable.
    Published,
    /// The record has been taken offline.
    Disabled,
    /// The record has not been published yet.
    Pending,
}

/// The kind of a record field, as reported by the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A plain text field; its value is used verbatim for excerpting.
    PlainText,
    /// A lightly-marked-up rich text field; markup is stripped best-effort.
    RichText,
    /// Any other field kind (tables, assets, ...). Yields no excerpt text.
    Other(String),
}

/// Metadata for a record field, resolved from a [`FieldId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    /// The field kind, which decides how its value is turned into text.
    pub kind: FieldKind,
    /// The identifier used to look the value up on a record.
    pub identifier: String,
}

impl FieldMeta {
    /// Create new field metadata.
    pub fn new<S: Into<String>>(kind: FieldKind, identifier: S) -> Self {
        FieldMeta {
            kind,
            identifier: identifier.into(),
        }
    }
}

/// Which attribute of a record an index hit matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// The record's title.
    Title,
    /// One of the record's named fields.
    Field,
}

/// A single raw hit from the external full-text index.
///
/// One hit is produced for each record attribute whose indexed keywords
/// contain the normalized needle as a substring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexHit {
    /// The record whose attribute matched.
    pub record_id: RecordId,
    /// Whether the title or a field matched.
    pub attribute: AttributeKind,
    /// The matched field, if the attribute is a field. Title hits carry none.
    pub field_id: Option<FieldId>,
    /// The indexed (normalized) keyword string of the matched attribute.
    pub keywords: String,
}

impl IndexHit {
    /// Create a hit for a record's title.
    pub fn title<S: Into<String>>(record_id: RecordId, keywords: S) -> Self {
        IndexHit {
            record_id,
            attribute: AttributeKind::Title,
            field_id: None,
            keywords: keywords.into(),
        }
    }

    /// Create a hit for one of a record's fields.
    pub fn field<S: Into<String>>(record_id: RecordId, field_id: FieldId, keywords: S) -> Self {
        IndexHit {
            record_id,
            attribute: AttributeKind::Field,
            field_id: Some(field_id),
            keywords: keywords.into(),
        }
    }
}

/// A text record owned by the external content store.
///
/// Field values are exposed through [`Record::field_value`] rather than any
/// dynamic property lookup, so the set of accessible fields is explicit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// The record's identifier.
    pub id: RecordId,
    /// Publication status.
    pub status: RecordStatus,
    /// The record's title.
    pub title: String,
    /// The section this record belongs to, if any.
    pub section_id: Option<SectionId>,
    /// Manual relevance override terms. A search whose raw needle exactly
    /// equals one of these terms gets a fixed bonus score for this record.
    pub prioritized_search_terms: HashSet<String>,
    /// Named field values, keyed by field identifier.
    fields: HashMap<String, String>,
}

impl Record {
    /// Create a new published record with the given id and title.
    pub fn new<S: Into<String>>(id: RecordId, title: S) -> Self {
        Record {
            id,
            status: RecordStatus::Published,
            title: title.into(),
            section_id: None,
            prioritized_search_terms: HashSet::new(),
            fields: HashMap::new(),
        }
    }

    /// Set the record's publication status.
    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the record's section.
    pub fn with_section(mut self, section_id: SectionId) -> Self {
        self.section_id = Some(section_id);
        self
    }

    /// Add a field value to the record.
    pub fn with_field<K: Into<String>, V: Into<String>>(mut self, identifier: K, value: V) -> Self {
        self.fields.insert(identifier.into(), value.into());
        self
    }

    /// Add a prioritized search term to the record.
    pub fn with_prioritized_term<S: Into<String>>(mut self, term: S) -> Self {
        self.prioritized_search_terms.insert(term.into());
        self
    }

    /// Get a field value by its identifier.
    pub fn field_value(&self, identifier: &str) -> Option<&str> {
        self.fields.get(identifier).map(|s| s.as_str())
    }

    /// Whether the record is published and may receive credit for hits.
    pub fn is_published(&self) -> bool {
        self.status == RecordStatus::Published
    }
}
