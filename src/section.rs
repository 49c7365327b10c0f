//! News article sections and their two stored translation shapes.
//!
//! Section titles and contents were stored in two ways over time:
//!
//! - inline: `"title": {"en": "...", "mk": "..."}`
//! - legacy: `"title": "..."` plus `"titleTranslations": {"mk": "..."}`
//!
//! Both still exist in persisted articles, even within one article. The
//! shape is detected once when a section is deserialized and kept in
//! [`SectionText`]; resolution then dispatches on it instead of probing
//! JSON at every call site. Serializing writes the shape back as it was read.

use crate::i18n::LanguageCode;
use crate::store::{lang_map_from_value, shape_name, LangMap};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Text of a section title or content, in whichever shape it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionText {
    /// The field itself is a language map. A leftover legacy sibling map is
    /// kept and consulted after the inline entry.
    Inline {
        values: LangMap,
        legacy: Option<LangMap>,
    },
    /// The field is a plain default-language string, with translations in
    /// a sibling map.
    Legacy {
        text: Option<String>,
        translations: Option<LangMap>,
    },
}

impl SectionText {
    /// Detect the shape from the raw field value and its sibling map.
    ///
    /// Values that fit neither shape (numbers, arrays, ...) are treated as
    /// absent.
    pub fn detect(value: Option<&Value>, sibling: Option<&Value>) -> Self {
        let sibling = sibling.and_then(lang_map_from_value);

        match value {
            Some(Value::Object(_)) => SectionText::Inline {
                values: value.and_then(lang_map_from_value).unwrap_or_default(),
                legacy: sibling,
            },
            Some(Value::String(text)) => SectionText::Legacy {
                text: Some(text.clone()),
                translations: sibling,
            },
            Some(Value::Null) | None => SectionText::Legacy {
                text: None,
                translations: sibling,
            },
            Some(other) => {
                warn!("Ignoring section text of unexpected shape: {}", shape_name(other));
                SectionText::Legacy {
                    text: None,
                    translations: sibling,
                }
            }
        }
    }

    /// A plain string with no translations.
    pub fn plain(text: impl Into<String>) -> Self {
        SectionText::Legacy {
            text: Some(text.into()),
            translations: None,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, SectionText::Inline { .. })
    }

    /// Text for `language`, falling back to English and then to the plain
    /// string. `None` when nothing usable is stored.
    pub fn lookup(&self, language: &str) -> Option<&str> {
        let fallback = LanguageCode::DEFAULT;

        match self {
            SectionText::Inline { values, legacy } => non_empty(Some(values), language)
                .or_else(|| non_empty(legacy.as_ref(), language))
                .or_else(|| non_empty(Some(values), fallback))
                .or_else(|| non_empty(legacy.as_ref(), fallback)),
            SectionText::Legacy { text, translations } => non_empty(translations.as_ref(), language)
                .or_else(|| non_empty(translations.as_ref(), fallback))
                .or(text.as_deref()),
        }
    }

    /// Display text for `language`; `""` when nothing is stored.
    pub fn resolve(&self, language: &str) -> String {
        self.lookup(language).unwrap_or_default().to_string()
    }

    /// Split back into the stored field value and sibling map.
    fn to_raw(&self) -> (Option<Value>, Option<Value>) {
        match self {
            SectionText::Inline { values, legacy } => (
                Some(lang_map_to_value(values)),
                legacy.as_ref().map(lang_map_to_value),
            ),
            SectionText::Legacy { text, translations } => (
                text.clone().map(Value::String),
                translations.as_ref().map(lang_map_to_value),
            ),
        }
    }
}

impl Default for SectionText {
    fn default() -> Self {
        SectionText::Legacy {
            text: None,
            translations: None,
        }
    }
}

fn non_empty<'a>(map: Option<&'a LangMap>, language: &str) -> Option<&'a str> {
    map.and_then(|map| map.get(language))
        .map(String::as_str)
        .filter(|text| !text.is_empty())
}

fn lang_map_to_value(map: &LangMap) -> Value {
    Value::Object(
        map.iter()
            .map(|(language, text)| (language.clone(), Value::String(text.clone())))
            .collect(),
    )
}

/// Layout of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Text,
    Image,
    TextImage,
}

impl SectionKind {
    /// Parse the stored `type` value, accepting the spellings seen in content.
    pub fn from_type(value: &str) -> Option<Self> {
        match value {
            "text" => Some(SectionKind::Text),
            "image" => Some(SectionKind::Image),
            "text-image" | "text_image" | "textImage" | "text-with-image" => {
                Some(SectionKind::TextImage)
            }
            _ => None,
        }
    }

    pub fn has_text(&self) -> bool {
        matches!(self, SectionKind::Text | SectionKind::TextImage)
    }

    pub fn has_image(&self) -> bool {
        matches!(self, SectionKind::Image | SectionKind::TextImage)
    }
}

/// Side an image is placed on in a text-with-image section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    Left,
    Right,
}

impl ImagePosition {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "left" => Some(ImagePosition::Left),
            "right" => Some(ImagePosition::Right),
            _ => None,
        }
    }
}

/// Which translatable text of a section to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionField {
    Title,
    Content,
}

/// A content block within a news article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSection", into = "RawSection")]
pub struct Section {
    pub id: String,
    pub kind: SectionKind,
    pub image_url: Option<String>,
    pub image_position: Option<ImagePosition>,
    pub title: SectionText,
    pub content: SectionText,
}

impl Section {
    pub fn text(&self, field: SectionField) -> &SectionText {
        match field {
            SectionField::Title => &self.title,
            SectionField::Content => &self.content,
        }
    }
}

/// Resolve a section's title or content for `language`.
///
/// Order: the inline map entry, the legacy map entry, the inline `en`
/// entry, the legacy `en` entry, the plain string, then `""`.
pub fn resolve_section_field(section: &Section, language: &str, field: SectionField) -> String {
    section.text(field).resolve(language)
}

/// A section with title and content resolved for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedSection {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_position: Option<ImagePosition>,
    pub title: String,
    pub content: String,
}

/// Resolve every section of an article, preserving order.
pub fn localize_sections(sections: &[Section], language: &str) -> Vec<LocalizedSection> {
    sections
        .iter()
        .map(|section| LocalizedSection {
            id: section.id.clone(),
            kind: section.kind,
            image_url: section.image_url.clone(),
            image_position: section.image_position,
            title: resolve_section_field(section, language, SectionField::Title),
            content: resolve_section_field(section, language, SectionField::Content),
        })
        .collect()
}

/// Stored JSON form of a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSection {
    #[serde(default, deserialize_with = "string_or_number")]
    id: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title_translations: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_translations: Option<Value>,
}

impl From<RawSection> for Section {
    fn from(raw: RawSection) -> Self {
        let kind = match raw.kind.as_deref() {
            Some(kind) => SectionKind::from_type(kind).unwrap_or_else(|| {
                warn!("Unknown section type '{}' in section {}, treating as text", kind, raw.id);
                SectionKind::Text
            }),
            None => SectionKind::Text,
        };

        let image_position = raw.image_position.as_deref().and_then(|position| {
            let parsed = ImagePosition::from_value(position);
            if parsed.is_none() {
                warn!("Ignoring image position '{}' in section {}", position, raw.id);
            }
            parsed
        });

        Section {
            title: SectionText::detect(raw.title.as_ref(), raw.title_translations.as_ref()),
            content: SectionText::detect(raw.content.as_ref(), raw.content_translations.as_ref()),
            id: raw.id,
            kind,
            image_url: raw.image_url,
            image_position,
        }
    }
}

impl From<Section> for RawSection {
    fn from(section: Section) -> Self {
        let (title, title_translations) = section.title.to_raw();
        let (content, content_translations) = section.content.to_raw();

        let kind = match section.kind {
            SectionKind::Text => "text",
            SectionKind::Image => "image",
            SectionKind::TextImage => "text-image",
        };

        RawSection {
            id: section.id,
            kind: Some(kind.to_string()),
            image_url: section.image_url,
            image_position: section.image_position.map(|position| {
                match position {
                    ImagePosition::Left => "left",
                    ImagePosition::Right => "right",
                }
                .to_string()
            }),
            title,
            title_translations,
            content,
            content_translations,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
