//! Distinct classification values across a product collection

use crate::core::product::{Product, Schema};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Distinct categories, themes and (tiered schema only) tiers
///
/// Values are distinct; their order is first-seen but callers should treat
/// each list as a set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub categories: Vec<String>,
    pub themes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<String>>,
}

/// Derives [`CatalogMetadata`] from a collection
///
/// Records that lack a field are skipped for that field; an absent value is
/// never reported as an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataExtractor {
    schema: Schema,
}

impl MetadataExtractor {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn extract(&self, products: &[Product]) -> CatalogMetadata {
        CatalogMetadata {
            categories: distinct(products.iter().map(|p| p.category.as_deref())),
            themes: distinct(products.iter().map(|p| p.theme.as_deref())),
            tiers: self
                .schema
                .has_tier()
                .then(|| distinct(products.iter().map(|p| p.tier.as_deref()))),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .flatten()
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
