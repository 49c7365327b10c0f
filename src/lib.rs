//! Multilingual content resolution for the corporate site.
//!
//! Content records (brochures, news, gallery categories, positions,
//! products, certificates) carry base fields plus a `translations` column.
//! This crate decides which language variant to display, merges admin edits
//! into that column, and builds the localized list views.

pub mod brochures;
pub mod compose;
pub mod config;
pub mod content;
pub mod error;
pub mod i18n;
pub mod resolve;
pub mod section;
pub mod snapshot;
pub mod store;

pub use brochures::{group_by_category, CategoryGroup};
pub use compose::{merge_translation, merge_translations};
pub use error::ContentError;
pub use resolve::{
    lookup_field, resolve_collection, resolve_collection_with_metrics, resolve_field,
    resolve_field_with_source, Localized, ResolutionSource, Translatable,
};
pub use section::{localize_sections, resolve_section_field, Section, SectionField, SectionText};
pub use snapshot::ContentSnapshot;
pub use store::{FieldMap, LangMap, Translations};
