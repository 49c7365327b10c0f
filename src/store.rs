//! Stored shape of per-entity translations.
//!
//! Entities carry their translations as a JSON column of the form
//! `{"<language>": {"<field>": "<text>"}}`. The column is written back
//! verbatim by the persistence layer, so this module only has to read it
//! tolerantly and hand out ordered, cloneable maps.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Field name to translated text, for a single language.
pub type FieldMap = BTreeMap<String, String>;

/// Language code to string, as used by section titles and contents.
pub type LangMap = BTreeMap<String, String>;

/// Translations of one entity, keyed by language code and then field name.
///
/// Partial data is normal: a language may be absent, and a present language
/// may carry only some fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Translations(BTreeMap<String, FieldMap>);

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build translations from an arbitrary JSON value.
    ///
    /// Anything that is not an object of objects of strings is treated as
    /// absent: a non-object root yields an empty map, a non-object language
    /// entry is skipped, and non-string field values are dropped.
    pub fn from_value(value: &Value) -> Self {
        let mut translations = Self::new();

        let languages = match value {
            Value::Object(languages) => languages,
            Value::Null => return translations,
            other => {
                warn!(
                    "Ignoring translations column with unexpected shape: {}",
                    shape_name(other)
                );
                return translations;
            }
        };

        for (language, fields) in languages {
            let Value::Object(fields) = fields else {
                warn!(
                    "Ignoring translations for '{}': expected object, got {}",
                    language,
                    shape_name(fields)
                );
                continue;
            };

            let entry = translations.0.entry(language.clone()).or_default();
            for (field, text) in fields {
                match text {
                    Value::String(text) => {
                        entry.insert(field.clone(), text.clone());
                    }
                    Value::Null => {}
                    other => warn!(
                        "Ignoring non-string translation {}.{} ({})",
                        language,
                        field,
                        shape_name(other)
                    ),
                }
            }
        }

        translations
    }

    /// Look up the stored text for `(language, field)`, if any.
    pub fn get(&self, language: &str, field: &str) -> Option<&str> {
        self.0
            .get(language)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    /// Like [`Translations::get`], but treats an empty string as absent.
    pub fn get_non_empty(&self, language: &str, field: &str) -> Option<&str> {
        self.get(language, field).filter(|text| !text.is_empty())
    }

    /// All fields stored for one language.
    pub fn language(&self, language: &str) -> Option<&FieldMap> {
        self.0.get(language)
    }

    /// Language codes with an entry, in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Set a single translated field, creating the language bucket if needed.
    pub fn insert(
        &mut self,
        language: impl Into<String>,
        field: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.0
            .entry(language.into())
            .or_default()
            .insert(field.into(), text.into());
    }

    /// Mutable access to a language bucket, created empty if missing.
    pub(crate) fn language_mut(&mut self, language: &str) -> &mut FieldMap {
        self.0.entry(language.to_string()).or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldMap)> {
        self.0.iter().map(|(language, fields)| (language.as_str(), fields))
    }
}

impl<'de> Deserialize<'de> for Translations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl<L, F, T, const N: usize> From<[(L, F, T); N]> for Translations
where
    L: Into<String>,
    F: Into<String>,
    T: Into<String>,
{
    fn from(entries: [(L, F, T); N]) -> Self {
        let mut translations = Self::new();
        for (language, field, text) in entries {
            translations.insert(language, field, text);
        }
        translations
    }
}

/// Read a `{"<language>": "<text>"}` map, dropping non-string values.
pub fn lang_map_from_value(value: &Value) -> Option<LangMap> {
    let Value::Object(entries) = value else {
        return None;
    };

    Some(
        entries
            .iter()
            .filter_map(|(language, text)| {
                text.as_str()
                    .map(|text| (language.clone(), text.to_string()))
            })
            .collect(),
    )
}

pub(crate) fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
