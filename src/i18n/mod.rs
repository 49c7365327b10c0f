//! Internationalization (i18n) support shared by the site and the admin
//! editors.
//!
//! # Architecture
//!
//! - `registry`: languages the site ships editors for, and the default one
//! - `language`: open, non-validating language code type
//! - `coverage`: per-entity translation completeness checks
//! - `metrics`: counts of which fallback step served each resolved field
//!
//! # Example
//!
//! ```rust,ignore
//! use site_content_i18n::i18n::{LanguageCode, LanguageRegistry};
//!
//! let macedonian = LanguageCode::new("mk");
//! let editor_tabs = LanguageRegistry::get().enabled_codes();
//! ```

mod coverage;
mod language;
mod metrics;
mod registry;

pub use coverage::{CoverageReport, MissingTranslation, TranslationCoverage};
pub use language::LanguageCode;
pub use metrics::{MetricsReport, ResolutionMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
