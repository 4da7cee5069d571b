//! Collaborator interfaces for the external content store, and the
//! viewable-record policy.

use crate::error::Result;
use crate::record::{FieldId, FieldMeta, Record, RecordId};

/// Trait for the external content store that owns records and field
/// definitions.
pub trait RecordStore: Send + Sync {
    /// Look up a record by id in the given locale. Absent records are not an
    /// error; their hits are simply skipped.
    fn lookup_record(&self, id: RecordId, locale: &str) -> Result<Option<Record>>;

    /// Look up field metadata by field id.
    fn lookup_field_meta(&self, field_id: FieldId) -> Result<Option<FieldMeta>>;
}

/// Policy deciding which record should receive credit for a hit.
///
/// Normally the hit's own record is credited. A site can substitute a
/// different record instead (typically a "parent" page that renders the hit
/// record's content inline), by returning that record here. Returning `None`
/// drops the hit.
///
/// The policy is only consulted for published records; viewability itself is
/// not negotiable.
pub trait ViewablePolicy: Send + Sync {
    /// Map a published record to the record that should be credited.
    fn viewable_record(&self, record: &Record) -> Option<Record>;
}

/// The default policy: every published record is credited directly.
#[derive(Debug, Clone, Default)]
pub struct DirectViewablePolicy;

impl DirectViewablePolicy {
    /// Create a new direct policy.
    pub fn new() -> Self {
        DirectViewablePolicy
    }
}

impl ViewablePolicy for DirectViewablePolicy {
    fn viewable_record(&self, record: &Record) -> Option<Record> {
        Some(record.clone())
    }
}
