//! Field resolution: which language variant of a field to display.
//!
//! For a requested language the chain is:
//!
//! 1. `translations[language][field]`, if non-empty
//! 2. `translations[default_language][field]`, if non-empty, where the
//!    default language is the entity's recorded one or `en` when none is
//!    recorded
//! 3. the entity's base field, if present
//! 4. an empty string
//!
//! The lookup layer works with `Option`; only [`resolve_field`] and the
//! collection resolver coerce a miss into an empty string for rendering.

use crate::i18n::{LanguageCode, ResolutionMetrics};
use crate::store::Translations;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Deref;
use tracing::{debug, trace};

/// A content record with base fields and optional per-language overrides.
pub trait Translatable {
    /// The base (default-language) value of `field`, if the entity has it.
    fn base_field(&self, field: &str) -> Option<&str>;

    /// Stored translations, `None` when the entity has never been translated.
    fn translations(&self) -> Option<&Translations>;

    /// Language the base fields are written in, if recorded.
    fn default_language(&self) -> Option<&str> {
        None
    }
}

impl<T: Translatable + ?Sized> Translatable for &T {
    fn base_field(&self, field: &str) -> Option<&str> {
        (**self).base_field(field)
    }

    fn translations(&self) -> Option<&Translations> {
        (**self).translations()
    }

    fn default_language(&self) -> Option<&str> {
        (**self).default_language()
    }
}

/// Which step of the fallback chain produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Translation in the requested language
    Requested,
    /// Translation in the entity's default language
    DefaultLanguage,
    /// The entity's base field
    Base,
    /// Nothing found; rendered as an empty string
    Empty,
}

/// The language step 2 of the chain falls back to.
pub fn fallback_language<E: Translatable + ?Sized>(entity: &E) -> &str {
    entity
        .default_language()
        .filter(|code| !code.is_empty())
        .unwrap_or(LanguageCode::DEFAULT)
}

/// Walk the fallback chain, returning the text and the step that matched.
pub fn lookup_field<'a, E: Translatable + ?Sized>(
    entity: &'a E,
    language: &str,
    field: &str,
) -> Option<(&'a str, ResolutionSource)> {
    if let Some(translations) = entity.translations() {
        if let Some(text) = translations.get_non_empty(language, field) {
            return Some((text, ResolutionSource::Requested));
        }

        let fallback = fallback_language(entity);
        if let Some(text) = translations.get_non_empty(fallback, field) {
            trace!(
                "'{}' has no {} translation, using default language {}",
                field,
                language,
                fallback
            );
            return Some((text, ResolutionSource::DefaultLanguage));
        }
    }

    entity
        .base_field(field)
        .map(|text| (text, ResolutionSource::Base))
}

/// Display text for `field` in `language`. Never fails; a miss is `""`.
pub fn resolve_field<E: Translatable + ?Sized>(entity: &E, language: &str, field: &str) -> String {
    lookup_field(entity, language, field)
        .map(|(text, _)| text.to_string())
        .unwrap_or_default()
}

/// Like [`resolve_field`], also reporting which fallback step was used.
pub fn resolve_field_with_source<E: Translatable + ?Sized>(
    entity: &E,
    language: &str,
    field: &str,
) -> (String, ResolutionSource) {
    match lookup_field(entity, language, field) {
        Some((text, source)) => (text.to_string(), source),
        None => (String::new(), ResolutionSource::Empty),
    }
}

/// An entity together with its resolved fields for one language.
///
/// Serializes as the entity's own properties plus a `translatedContent`
/// object. Entities must not serialize a `translatedContent` key of their own.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Localized<T> {
    #[serde(flatten)]
    pub entity: T,
    pub translated_content: BTreeMap<String, String>,
}

impl<T> Localized<T> {
    /// Resolved text of a field, `""` if it was not requested.
    pub fn text(&self, field: &str) -> &str {
        self.translated_content
            .get(field)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn into_inner(self) -> T {
        self.entity
    }
}

impl<T> Deref for Localized<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.entity
    }
}

/// Resolve `fields` for every entity, preserving order.
///
/// `None` is treated like an empty list.
pub fn resolve_collection<T>(entities: Option<&[T]>, language: &str, fields: &[&str]) -> Vec<Localized<T>>
where
    T: Translatable + Clone,
{
    resolve_collection_inner(entities, language, fields, None)
}

/// [`resolve_collection`], recording every field's fallback step in `metrics`.
pub fn resolve_collection_with_metrics<T>(
    entities: Option<&[T]>,
    language: &str,
    fields: &[&str],
    metrics: &ResolutionMetrics,
) -> Vec<Localized<T>>
where
    T: Translatable + Clone,
{
    resolve_collection_inner(entities, language, fields, Some(metrics))
}

fn resolve_collection_inner<T>(
    entities: Option<&[T]>,
    language: &str,
    fields: &[&str],
    metrics: Option<&ResolutionMetrics>,
) -> Vec<Localized<T>>
where
    T: Translatable + Clone,
{
    let entities = entities.unwrap_or_default();

    let localized: Vec<_> = entities
        .iter()
        .map(|entity| {
            let translated_content = fields
                .iter()
                .map(|field| {
                    let (text, source) = resolve_field_with_source(entity, language, field);
                    if let Some(metrics) = metrics {
                        metrics.record(source);
                    }
                    (field.to_string(), text)
                })
                .collect();

            Localized {
                entity: entity.clone(),
                translated_content,
            }
        })
        .collect();

    debug!(
        "Resolved {} fields for {} entities in '{}'",
        fields.len(),
        localized.len(),
        language
    );

    localized
}
