//! Composing translation edits from the admin editors.
//!
//! Edits are merged, never replaced: saving the German title must keep the
//! German description that was stored earlier. Inputs are borrowed and a new
//! `Translations` is returned, so the caller's copy is left as it was.

use crate::store::Translations;
use tracing::debug;

/// Shallow-merge `updates` into the `language` bucket of `current`.
///
/// `None` is treated as empty translations. Other languages, and fields of
/// `language` not named in `updates`, are carried over unchanged. Unknown
/// language codes simply create a new bucket.
pub fn merge_translation<I, F, T>(
    current: Option<&Translations>,
    language: &str,
    updates: I,
) -> Translations
where
    I: IntoIterator<Item = (F, T)>,
    F: Into<String>,
    T: Into<String>,
{
    let mut merged = current.cloned().unwrap_or_default();
    apply(&mut merged, language, updates);
    merged
}

/// Apply edits for several languages at once, in order.
///
/// Equivalent to folding [`merge_translation`] over `edits`.
pub fn merge_translations<'a, L, I, F, T>(current: Option<&Translations>, edits: L) -> Translations
where
    L: IntoIterator<Item = (&'a str, I)>,
    I: IntoIterator<Item = (F, T)>,
    F: Into<String>,
    T: Into<String>,
{
    let mut merged = current.cloned().unwrap_or_default();
    for (language, updates) in edits {
        apply(&mut merged, language, updates);
    }
    merged
}

fn apply<I, F, T>(translations: &mut Translations, language: &str, updates: I)
where
    I: IntoIterator<Item = (F, T)>,
    F: Into<String>,
    T: Into<String>,
{
    let bucket = translations.language_mut(language);
    let mut count = 0;
    for (field, text) in updates {
        bucket.insert(field.into(), text.into());
        count += 1;
    }
    debug!("Merged {} field edits into '{}' translations", count, language);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_is_additive() {
        let current = Translations::from([("en", "title", "A"), ("en", "desc", "B")]);
        let merged = merge_translation(Some(&current), "en", [("title", "C")]);

        assert_eq!(merged, Translations::from([("en", "title", "C"), ("en", "desc", "B")]));
    }

    #[test]
    fn test_merge_does_not_touch_input() {
        let current = Translations::from([("en", "title", "A"), ("mk", "title", "Б")]);
        let before = current.clone();

        let merged = merge_translation(Some(&current), "en", [("title", "X")]);

        assert_eq!(current, before);
        assert_eq!(merged.get("en", "title"), Some("X"));
        assert_eq!(merged.get("mk", "title"), Some("Б"));
    }

    #[test]
    fn test_merge_into_none() {
        let merged = merge_translation(None, "de", [("title", "Wasser")]);
        assert_eq!(merged, Translations::from([("de", "title", "Wasser")]));
    }

    #[test]
    fn test_merge_unknown_language_creates_bucket() {
        let current = Translations::from([("en", "title", "A")]);
        let merged = merge_translation(Some(&current), "sq", [("title", "Ujë")]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("sq", "title"), Some("Ujë"));
    }

    #[test]
    fn test_merge_empty_updates_creates_empty_bucket() {
        let merged = merge_translation(None, "mk", Vec::<(String, String)>::new());
        assert!(merged.language("mk").is_some_and(|fields| fields.is_empty()));
    }

    #[test]
    fn test_merge_accepts_owned_strings() {
        let updates = vec![("title".to_string(), "Naslov".to_string())];
        let merged = merge_translation(None, "mk", updates);
        assert_eq!(merged.get("mk", "title"), Some("Naslov"));
    }

    #[test]
    fn test_merge_translations_multiple_languages() {
        let current = Translations::from([("mk", "description", "Опис")]);
        let merged = merge_translations(
            Some(&current),
            [
                ("mk", vec![("title", "Наслов")]),
                ("de", vec![("title", "Titel")]),
            ],
        );

        assert_eq!(merged.get("mk", "title"), Some("Наслов"));
        assert_eq!(merged.get("mk", "description"), Some("Опис"));
        assert_eq!(merged.get("de", "title"), Some("Titel"));
        assert_eq!(current.len(), 1);
    }

    #[test]
    fn test_later_edit_wins() {
        let merged = merge_translations(
            None,
            [("en", vec![("title", "First")]), ("en", vec![("title", "Second")])],
        );
        assert_eq!(merged.get("en", "title"), Some("Second"));
    }
}
