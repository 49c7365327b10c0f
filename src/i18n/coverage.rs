//! Translation coverage checks for admin editors.
//!
//! Reports, for one entity, which fields are still untranslated in which
//! languages, and flags translations that dropped links or e-mail
//! addresses present in the base text.

use crate::i18n::{LanguageCode, LanguageRegistry};
use crate::resolve::{fallback_language, Translatable};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// A field with no usable translation in a language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingTranslation {
    pub language: LanguageCode,
    pub field: String,
}

/// Coverage report containing errors and warnings about an entity's translations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Fields without a translation, one entry per (language, field)
    pub missing: Vec<MissingTranslation>,

    /// Human-readable form of `missing`
    pub errors: Vec<String>,

    /// Non-critical warnings about potential issues
    pub warnings: Vec<String>,
}

impl CoverageReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Fully translated with no warnings
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

/// Coverage checker for translatable entities.
pub struct TranslationCoverage;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationCoverage {
    /// Check `fields` of `entity` in every language of `languages`.
    ///
    /// The entity's own default language is skipped, since its base fields
    /// already cover it. Fields whose base value is empty or absent are not
    /// expected to be translated.
    pub fn check<E: Translatable + ?Sized>(
        entity: &E,
        languages: &[LanguageCode],
        fields: &[&str],
    ) -> CoverageReport {
        let mut report = CoverageReport::new();
        let default_language = fallback_language(entity);
        let translations = entity.translations();

        for language in languages {
            if language.as_str() == default_language {
                continue;
            }

            for field in fields {
                let Some(base) = entity.base_field(field).filter(|base| !base.is_empty()) else {
                    continue;
                };

                let translated =
                    translations.and_then(|t| t.get_non_empty(language.as_str(), field));

                match translated {
                    None => {
                        report.errors.push(format!(
                            "Missing {} translation for '{}'",
                            language.display_name(),
                            field
                        ));
                        report.missing.push(MissingTranslation {
                            language: language.clone(),
                            field: field.to_string(),
                        });
                    }
                    Some(translated) => {
                        Self::compare_preserved(&mut report, language, field, base, translated)
                    }
                }
            }
        }

        if let Some(translations) = translations {
            let registry = LanguageRegistry::get();
            for language in translations.languages() {
                if !registry.is_enabled(language) {
                    report.warnings.push(format!(
                        "Translations stored for unsupported language '{}'",
                        language
                    ));
                }
            }
        }

        report
    }

    fn compare_preserved(
        report: &mut CoverageReport,
        language: &LanguageCode,
        field: &str,
        base: &str,
        translated: &str,
    ) {
        let base_urls = Self::extract_urls(base);
        let translated_urls = Self::extract_urls(translated);
        if base_urls != translated_urls {
            report.warnings.push(format!(
                "URL mismatch in {} '{}': base has {} URLs, translation has {}",
                language.display_name(),
                field,
                base_urls.len(),
                translated_urls.len()
            ));
        }

        let base_emails = Self::extract_emails(base);
        let translated_emails = Self::extract_emails(translated);
        if base_emails != translated_emails {
            report.warnings.push(format!(
                "E-mail mismatch in {} '{}': base has {:?}, translation has {:?}",
                language.display_name(),
                field,
                base_emails,
                translated_emails
            ));
        }
    }

    /// Extract all URLs from text
    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"https?://[^\s)\]]+").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Extract all e-mail addresses from text
    fn extract_emails(text: &str) -> Vec<String> {
        let regex = EMAIL_REGEX
            .get_or_init(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Translations;

    struct Item {
        title: String,
        description: String,
        translations: Option<Translations>,
        default_language: Option<String>,
    }

    impl Translatable for Item {
        fn base_field(&self, field: &str) -> Option<&str> {
            match field {
                "title" => Some(&self.title),
                "description" => Some(&self.description),
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

    fn item(translations: Option<Translations>) -> Item {
        Item {
            title: "Water filters".to_string(),
            description: "See https://example.com or mail sales@example.com".to_string(),
            translations,
            default_language: None,
        }
    }

    fn languages(codes: &[&str]) -> Vec<LanguageCode> {
        codes.iter().map(|code| LanguageCode::new(code)).collect()
    }

    // ==================== Extraction Tests ====================

    #[test]
    fn test_extract_urls() {
        let urls = TranslationCoverage::extract_urls("Check https://example.com and http://test.org");
        assert_eq!(urls, vec!["https://example.com", "http://test.org"]);
    }

    #[test]
    fn test_extract_emails() {
        let emails = TranslationCoverage::extract_emails("Write to info@firm.mk today");
        assert_eq!(emails, vec!["info@firm.mk"]);
    }

    #[test]
    fn test_extract_none() {
        assert!(TranslationCoverage::extract_urls("plain text").is_empty());
        assert!(TranslationCoverage::extract_emails("plain text").is_empty());
    }

    // ==================== Coverage Tests ====================

    #[test]
    fn test_untranslated_entity_reports_every_field() {
        let report = TranslationCoverage::check(&item(None), &languages(&["en", "mk", "de"]), &[
            "title",
            "description",
        ]);

        assert_eq!(report.missing.len(), 4);
        assert!(report.errors[0].contains("Macedonian"));
        assert!(report.errors[0].contains("'title'"));
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_default_language_is_skipped() {
        let report = TranslationCoverage::check(&item(None), &languages(&["en"]), &["title"]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_recorded_default_language_is_skipped() {
        let mut entity = item(None);
        entity.default_language = Some("mk".to_string());

        let report = TranslationCoverage::check(&entity, &languages(&["en", "mk"]), &["title"]);
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].language.as_str(), "en");
    }

    #[test]
    fn test_fully_translated_is_clean() {
        let translations = Translations::from([
            ("mk", "title", "Филтри за вода"),
            (
                "mk",
                "description",
                "Видете https://example.com или пишете на sales@example.com",
            ),
        ]);
        let report =
            TranslationCoverage::check(&item(Some(translations)), &languages(&["mk"]), &[
                "title",
                "description",
            ]);

        assert!(report.is_clean(), "unexpected report: {:?}", report);
    }

    #[test]
    fn test_empty_translation_counts_as_missing() {
        let translations = Translations::from([("de", "title", "")]);
        let report =
            TranslationCoverage::check(&item(Some(translations)), &languages(&["de"]), &["title"]);

        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].field, "title");
    }

    #[test]
    fn test_dropped_url_and_email_warn() {
        let translations = Translations::from([("de", "description", "Siehe unsere Webseite")]);
        let report = TranslationCoverage::check(&item(Some(translations)), &languages(&["de"]), &[
            "description",
        ]);

        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("URL mismatch"));
        assert!(report.warnings[1].contains("E-mail mismatch"));
    }

    #[test]
    fn test_unsupported_language_bucket_warns() {
        let translations = Translations::from([("fr", "title", "Filtres")]);
        let report = TranslationCoverage::check(&item(Some(translations)), &[], &["title"]);

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("'fr'"));
    }

    #[test]
    fn test_empty_base_field_not_expected() {
        let mut entity = item(None);
        entity.description = String::new();

        let report = TranslationCoverage::check(&entity, &languages(&["mk"]), &["description"]);
        assert!(report.is_clean());
    }
}
