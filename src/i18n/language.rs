//! Language codes as they appear in content.
//!
//! Unlike the registry, a `LanguageCode` is never validated: content may
//! carry codes for languages the site has not shipped editors for yet, and
//! those must still resolve (falling through to the default) and still be
//! writable (creating a new bucket).

use crate::i18n::{LanguageConfig, LanguageRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A language code such as `en`, `mk` or `de`.
///
/// Construction trims surrounding whitespace and lower-cases the code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Code used when an entity records no default language.
    pub const DEFAULT: &'static str = "en";

    pub fn new(code: &str) -> Self {
        Self(code.trim().to_ascii_lowercase())
    }

    /// The fallback language, `en`.
    pub fn default_language() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }

    /// Registry entry for this code, if the site ships editors for it.
    pub fn config(&self) -> Option<&'static LanguageConfig> {
        LanguageRegistry::get().get_by_code(&self.0)
    }

    /// English name from the registry, or the bare code for unknown languages.
    pub fn display_name(&self) -> &str {
        self.config().map(|config| config.name).unwrap_or(&self.0)
    }

    /// Parse a comma separated list such as `"en, mk,de"`, skipping blanks.
    pub fn parse_list(list: &str) -> Vec<LanguageCode> {
        list.split(',')
            .map(LanguageCode::new)
            .filter(|code| !code.0.is_empty())
            .collect()
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::default_language()
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self::new(&code)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
