//! Content records as they come out of the database export.
//!
//! Each model carries its base fields, an optional `translations` column and
//! an optional `defaultLanguage`. Field names match the JSON the CRUD layer
//! writes (camelCase).

use crate::resolve::Translatable;
use crate::section::Section;
use crate::store::Translations;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A kind of content record with a fixed set of translatable fields.
pub trait ContentEntity: Translatable {
    /// Name used in reports and preview output.
    const KIND: &'static str;

    /// Fields the admin editors offer translations for.
    const FIELDS: &'static [&'static str];

    fn id(&self) -> i64;
}

macro_rules! translatable {
    (
        $entity:ty, $kind:literal,
        required { $($req_name:literal => $req:ident),* $(,)? }
        optional { $($opt_name:literal => $opt:ident),* $(,)? }
    ) => {
        impl Translatable for $entity {
            fn base_field(&self, field: &str) -> Option<&str> {
                match field {
                    $($req_name => Some(self.$req.as_str()),)*
                    $($opt_name => self.$opt.as_deref(),)*
                    _ => None,
                }
            }

            fn translations(&self) -> Option<&Translations> {
                self.translations.as_ref()
            }

            fn default_language(&self) -> Option<&str> {
                self.default_language.as_deref()
            }
        }

        impl ContentEntity for $entity {
            const KIND: &'static str = $kind;
            const FIELDS: &'static [&'static str] = &[$($req_name,)* $($opt_name,)*];

            fn id(&self) -> i64 {
                self.id
            }
        }
    };
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brochure {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Title of the category this brochure is listed under
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub active: bool,
    #[serde(default)]
    pub sort_order: Option<i32>,
    /// Shared by the per-language copies of the same brochure
    #[serde(default)]
    pub translation_group: Option<String>,
    #[serde(default)]
    pub translations: Option<Translations>,
    #[serde(default)]
    pub default_language: Option<String>,
}

translatable!(Brochure, "brochure",
    required { "title" => title }
    optional { "description" => description }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrochureCategory {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub translations: Option<Translations>,
    #[serde(default)]
    pub default_language: Option<String>,
}

translatable!(BrochureCategory, "brochure_category",
    required { "title" => title }
    optional { "description" => description }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub published: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub translations: Option<Translations>,
    #[serde(default)]
    pub default_language: Option<String>,
}

translatable!(NewsArticle, "news_article",
    required { "title" => title }
    optional { "excerpt" => excerpt, "content" => content }
);

/// Published articles, newest first. Undated articles go last, and ties
/// keep their input order.
pub fn latest_first(articles: &[NewsArticle]) -> Vec<&NewsArticle> {
    let mut published: Vec<_> = articles.iter().filter(|a| a.published).collect();
    published.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    published
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryCategory {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub translations: Option<Translations>,
    #[serde(default)]
    pub default_language: Option<String>,
}

translatable!(GalleryCategory, "gallery_category",
    required { "title" => title }
    optional { "description" => description }
);

/// An open job position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub active: bool,
    #[serde(default)]
    pub translations: Option<Translations>,
    #[serde(default)]
    pub default_language: Option<String>,
}

translatable!(Position, "position",
    required { "title" => title }
    optional {
        "description" => description,
        "location" => location,
        "requirements" => requirements,
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub translations: Option<Translations>,
    #[serde(default)]
    pub default_language: Option<String>,
}

translatable!(Product, "product",
    required { "name" => name }
    optional { "description" => description }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub translations: Option<Translations>,
    #[serde(default)]
    pub default_language: Option<String>,
}

translatable!(Certificate, "certificate",
    required { "title" => title }
    optional { "description" => description, "issuer" => issuer }
);

/// Any JSON record with string base fields, `translations` and
/// `defaultLanguage` keys. Used for entities without a typed model.
///
/// Serializes as the stored object, minus any `translatedContent` key, which
/// belongs to the resolved view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentRecord {
    fields: Map<String, Value>,
    translations: Option<Translations>,
}

impl ContentRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        let translations = match fields.get("translations") {
            None | Some(Value::Null) => None,
            Some(value) => Some(Translations::from_value(value)),
        };
        Self {
            fields,
            translations,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Serialize for ContentRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(
            self.fields
                .iter()
                .filter(|(key, _)| key.as_str() != "translatedContent"),
        )
    }
}

impl<'de> Deserialize<'de> for ContentRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::new(Map::deserialize(deserializer)?))
    }
}

impl Translatable for ContentRecord {
    fn base_field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    fn translations(&self) -> Option<&Translations> {
        self.translations.as_ref()
    }

    fn default_language(&self) -> Option<&str> {
        self.fields.get("defaultLanguage").and_then(Value::as_str)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    null_as_default(deserializer)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{resolve_collection, resolve_field};
    use serde_json::json;

    // ==================== Model Deserialization Tests ====================

    #[test]
    fn test_brochure_defaults() {
        let brochure: Brochure =
            serde_json::from_value(json!({"id": 1, "title": "Pumps", "category": "Water"}))
                .expect("brochure");

        assert!(brochure.active);
        assert_eq!(brochure.sort_order, None);
        assert_eq!(brochure.translations, None);
        assert_eq!(brochure.translation_group, None);
    }

    #[test]
    fn test_brochure_with_translations() {
        let brochure: Brochure = serde_json::from_value(json!({
            "id": 1,
            "title": "Pumps",
            "category": "Water",
            "translationGroup": "g1",
            "translations": {"mk": {"title": "Пумпи"}},
            "defaultLanguage": "en"
        }))
        .expect("brochure");

        assert_eq!(brochure.translation_group.as_deref(), Some("g1"));
        assert_eq!(resolve_field(&brochure, "mk", "title"), "Пумпи");
        assert_eq!(resolve_field(&brochure, "de", "title"), "Pumps");
    }

    #[test]
    fn test_malformed_translations_column_degrades() {
        let product: Product = serde_json::from_value(json!({
            "id": 3,
            "name": "Filter",
            "translations": "{not json}"
        }))
        .expect("product");

        assert_eq!(product.translations, Some(Translations::new()));
        assert_eq!(resolve_field(&product, "mk", "name"), "Filter");
    }

    #[test]
    fn test_news_article_sections_null() {
        let article: NewsArticle =
            serde_json::from_value(json!({"id": 1, "title": "News", "sections": null}))
                .expect("article");
        assert!(article.sections.is_empty());
    }

    #[test]
    fn test_null_columns_take_defaults() {
        let brochure: Brochure = serde_json::from_value(json!({
            "id": 1,
            "title": "Pumps",
            "category": null,
            "active": null
        }))
        .expect("brochure");
        assert_eq!(brochure.category, "");
        assert!(brochure.active);

        let position: Position =
            serde_json::from_value(json!({"id": 2, "title": "Welder", "active": null}))
                .expect("position");
        assert!(position.active);

        let article: NewsArticle =
            serde_json::from_value(json!({"id": 3, "title": "News", "published": null}))
                .expect("article");
        assert!(article.published);
    }

    #[test]
    fn test_explicit_false_is_kept() {
        let position: Position =
            serde_json::from_value(json!({"id": 2, "title": "Welder", "active": false}))
                .expect("position");
        assert!(!position.active);
    }

    #[test]
    fn test_news_article_published_at() {
        let article: NewsArticle = serde_json::from_value(json!({
            "id": 1,
            "title": "News",
            "publishedAt": "2024-03-01T10:00:00Z"
        }))
        .expect("article");

        assert_eq!(
            article.published_at.map(|d| d.to_rfc3339()),
            Some("2024-03-01T10:00:00+00:00".to_string())
        );
    }

    // ==================== Translatable Impl Tests ====================

    #[test]
    fn test_base_fields_by_name() {
        let position: Position = serde_json::from_value(json!({
            "id": 2,
            "title": "Engineer",
            "location": "Skopje"
        }))
        .expect("position");

        assert_eq!(position.base_field("title"), Some("Engineer"));
        assert_eq!(position.base_field("location"), Some("Skopje"));
        assert_eq!(position.base_field("requirements"), None);
        assert_eq!(position.base_field("unknown"), None);
    }

    #[test]
    fn test_entity_fields() {
        assert_eq!(Brochure::FIELDS, &["title", "description"]);
        assert_eq!(Product::FIELDS, &["name", "description"]);
        assert_eq!(
            Position::FIELDS,
            &["title", "description", "location", "requirements"]
        );
        assert_eq!(NewsArticle::KIND, "news_article");
    }

    // ==================== latest_first Tests ====================

    #[test]
    fn test_latest_first_orders_and_filters() {
        let articles: Vec<NewsArticle> = serde_json::from_value(json!([
            {"id": 1, "title": "Old", "publishedAt": "2023-01-01T00:00:00Z"},
            {"id": 2, "title": "Draft", "published": false, "publishedAt": "2025-01-01T00:00:00Z"},
            {"id": 3, "title": "Undated"},
            {"id": 4, "title": "New", "publishedAt": "2024-06-01T00:00:00Z"}
        ]))
        .expect("articles");

        let ids: Vec<i64> = latest_first(&articles).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![4, 1, 3]);
    }

    // ==================== ContentRecord Tests ====================

    #[test]
    fn test_content_record_resolves() {
        let record: ContentRecord = serde_json::from_value(json!({
            "id": 9,
            "title": "About us",
            "defaultLanguage": "mk",
            "translations": {"mk": {"title": "За нас"}, "de": {"title": ""}}
        }))
        .expect("record");

        assert_eq!(record.default_language(), Some("mk"));
        assert_eq!(resolve_field(&record, "de", "title"), "За нас");
        assert_eq!(resolve_field(&record, "en", "id"), "");
    }

    #[test]
    fn test_localized_record_has_one_translated_content() {
        let record: ContentRecord = serde_json::from_value(json!({
            "id": 1,
            "name": "Firm",
            "translatedContent": {"name": "stale"},
            "translations": {"mk": {"name": "Фирма"}}
        }))
        .expect("record");

        let localized = resolve_collection(Some(std::slice::from_ref(&record)), "mk", &["name"]);
        let text = serde_json::to_string(&localized[0]).expect("serialize");

        assert_eq!(text.matches("\"translatedContent\"").count(), 1);
        let value: Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["translatedContent"], json!({"name": "Фирма"}));
        assert_eq!(value["name"], "Firm");
    }

    #[test]
    fn test_content_record_serializes_verbatim() {
        let value = json!({"id": 1, "title": "X", "translations": {"en": {"title": "Y"}}});
        let record: ContentRecord = serde_json::from_value(value.clone()).expect("record");
        assert_eq!(serde_json::to_value(&record).expect("serialize"), value);
    }
}
