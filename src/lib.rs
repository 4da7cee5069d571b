//! # Hitmark
//!
//! Weighted substring search over externally-stored text records.
//!
//! Hitmark ranks records matching a substring query ("needle") by combining
//! raw full-text index hits with manual relevance overrides, and renders an
//! HTML-safe highlighted excerpt per result. The full-text index and the
//! content store are external collaborators, injected as traits.
//!
//! ## Features
//!
//! - Integer weight tiers: field occurrence < partial title < full title
//!   < prioritized term override
//! - One aggregated result per viewable record, score summed across hits
//! - Length-bounded, entity-escaped excerpts with `<mark>` highlighting
//! - Pluggable needle normalization and viewable-record substitution

pub mod aggregate;
pub mod analysis;
pub mod error;
pub mod excerpt;
pub mod extract;
pub mod index;
pub mod record;
pub mod score;
pub mod search;
pub mod store;

pub use aggregate::{Aggregator, SearchResult};
pub use error::{HitmarkError, Result};
pub use excerpt::ExcerptBuilder;
pub use record::{AttributeKind, FieldKind, FieldMeta, IndexHit, Record, RecordStatus};
pub use search::SearchEngine;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
