//! JSON export of all site content, as handed over by the CRUD layer.

use crate::content::{
    Brochure, BrochureCategory, Certificate, ContentRecord, GalleryCategory, NewsArticle, Position,
    Product,
};
use crate::error::ContentError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Every content table, each a list of rows. Missing tables are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentSnapshot {
    pub brochures: Vec<Brochure>,
    pub brochure_categories: Vec<BrochureCategory>,
    pub news: Vec<NewsArticle>,
    pub gallery_categories: Vec<GalleryCategory>,
    pub positions: Vec<Position>,
    pub products: Vec<Product>,
    pub certificates: Vec<Certificate>,
    /// Single-row company information, if exported
    pub company_info: Option<ContentRecord>,
}

impl ContentSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();

        let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot: ContentSnapshot =
            serde_json::from_str(&raw).map_err(|source| ContentError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            "Loaded content snapshot from {}: {} brochures, {} news articles, {} products",
            path.display(),
            snapshot.brochures.len(),
            snapshot.news.len(),
            snapshot.products.len()
        );

        Ok(snapshot)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Total number of rows across all tables.
    pub fn len(&self) -> usize {
        self.brochures.len()
            + self.brochure_categories.len()
            + self.news.len()
            + self.gallery_categories.len()
            + self.positions.len()
            + self.products.len()
            + self.certificates.len()
            + usize::from(self.company_info.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
