//! Language registry: the languages the site ships content editors for.
//!
//! The registry drives which language tabs the admin editors show and which
//! languages a coverage report checks. It never restricts resolution or
//! writes, where any language code is accepted. The table is built once,
//! on first access.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "mk", "de")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Macedonian")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "Македонски")
    pub native_name: &'static str,

    /// Base fields are authored in this language; listed first
    pub is_default: bool,

    /// Whether editors are offered for this language
    pub enabled: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Codes of all enabled languages, default language first.
    pub fn enabled_codes(&self) -> Vec<&'static str> {
        let mut enabled: Vec<_> = self.languages.iter().filter(|lang| lang.enabled).collect();
        enabled.sort_by_key(|lang| !lang.is_default);
        enabled.into_iter().map(|lang| lang.code).collect()
    }

    /// Check if a language code is known and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// Languages the site is published in.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: true,
            enabled: true,
        },
        LanguageConfig {
            code: "mk",
            name: "Macedonian",
            native_name: "Македонски",
            is_default: false,
            enabled: true,
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            is_default: false,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_macedonian() {
        let config = LanguageRegistry::get()
            .get_by_code("mk")
            .expect("mk should be registered");

        assert_eq!(config.name, "Macedonian");
        assert_eq!(config.native_name, "Македонски");
        assert!(!config.is_default);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("fr").is_none());
    }

    #[test]
    fn test_enabled_codes_default_first() {
        let codes = LanguageRegistry::get().enabled_codes();
        assert_eq!(codes, vec!["en", "mk", "de"]);
    }

    #[test]
    fn test_default_language_listed_first() {
        let registry = LanguageRegistry {
            languages: vec![
                LanguageConfig {
                    code: "mk",
                    name: "Macedonian",
                    native_name: "Македонски",
                    is_default: false,
                    enabled: true,
                },
                LanguageConfig {
                    code: "sq",
                    name: "Albanian",
                    native_name: "Shqip",
                    is_default: false,
                    enabled: false,
                },
                LanguageConfig {
                    code: "en",
                    name: "English",
                    native_name: "English",
                    is_default: true,
                    enabled: true,
                },
            ],
        };

        assert_eq!(registry.enabled_codes(), vec!["en", "mk"]);
        assert!(!registry.is_enabled("sq"));
    }

    #[test]
    fn test_is_enabled() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_enabled("en"));
        assert!(registry.is_enabled("mk"));
        assert!(!registry.is_enabled("fr"));
        assert!(!registry.is_enabled(""));
    }
}
