//! Brochure list view: brochures grouped under their categories.

use crate::content::{Brochure, BrochureCategory};
use crate::resolve::resolve_field;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// One category with the brochures listed under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup<'a> {
    pub category: &'a BrochureCategory,
    /// Category title resolved for the requested language
    pub title: String,
    pub brochures: Vec<&'a Brochure>,
}

/// Identity of a brochure across its language copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GroupKey<'a> {
    TranslationGroup(&'a str),
    Id(i64),
}

fn group_key(brochure: &Brochure) -> GroupKey<'_> {
    match brochure.translation_group.as_deref() {
        Some(group) => GroupKey::TranslationGroup(group),
        None => GroupKey::Id(brochure.id),
    }
}

/// Group active brochures under the category whose `title` equals their
/// `category`, in category order.
///
/// Within a category, brochures sharing a translation group (or id, when
/// they have none) are collapsed to the first one encountered, and the
/// rest are ordered by `sortOrder` (missing is 0), keeping input order for
/// ties. Categories left without brochures are dropped.
pub fn group_by_category<'a>(
    brochures: &'a [Brochure],
    categories: &'a [BrochureCategory],
    language: &str,
) -> Vec<CategoryGroup<'a>> {
    let groups: Vec<_> = categories
        .iter()
        .filter_map(|category| {
            let mut seen = HashSet::new();
            let mut members: Vec<&Brochure> = brochures
                .iter()
                .filter(|brochure| brochure.active && brochure.category == category.title)
                .filter(|brochure| seen.insert(group_key(*brochure)))
                .collect();

            if members.is_empty() {
                return None;
            }

            members.sort_by_key(|brochure| brochure.sort_order.unwrap_or(0));

            Some(CategoryGroup {
                category,
                title: resolve_field(category, language, "title"),
                brochures: members,
            })
        })
        .collect();

    debug!(
        "Grouped brochures into {} of {} categories for '{}'",
        groups.len(),
        categories.len(),
        language
    );

    groups
}
