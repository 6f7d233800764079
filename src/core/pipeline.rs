//! Query pipeline over an in-memory product collection
//!
//! Stages run in a fixed order and each one is skipped when its parameter is
//! absent:
//!
//! 1. category filter
//! 2. tier filter (tiered schema only)
//! 3. price range filter
//! 4. search filter
//! 5. multi-key stable sort
//! 6. cursor advance
//! 7. limit
//!
//! `total` is the length of the sequence after the cursor advance and before
//! the limit, i.e. the matches remaining from the cursor onward.

use crate::core::collation::locale_compare;
use crate::core::product::{Product, Schema};
use crate::core::query::{ProductPage, ProductQuery, SortCriterion, SortDirection, SortKey};
use std::cmp::Ordering;

/// Applies a [`ProductQuery`] to a borrowed product collection
///
/// The collection is never mutated; only the products on the returned page
/// are cloned. The pipeline holds no per-call state and can be shared freely
/// between concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryPipeline {
    schema: Schema,
}

impl QueryPipeline {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Run every stage and return the requested page
    #[tracing::instrument(level = "debug", skip_all, fields(input = products.len()))]
    pub fn execute(&self, products: &[Product], query: &ProductQuery) -> ProductPage {
        let mut matches: Vec<&Product> = products.iter().collect();

        if let Some(category) = query.category.as_deref() {
            matches.retain(|p| p.category.as_deref() == Some(category));
            tracing::trace!(remaining = matches.len(), "category filter");
        }

        if self.schema.has_tier() {
            if let Some(tier) = query.tier.as_deref() {
                matches.retain(|p| p.tier.as_deref() == Some(tier));
                tracing::trace!(remaining = matches.len(), "tier filter");
            }
        }

        if let Some(min) = query.min_price {
            matches.retain(|p| p.price >= min);
        }
        if let Some(max) = query.max_price {
            matches.retain(|p| p.price <= max);
        }
        if query.min_price.is_some() || query.max_price.is_some() {
            tracing::trace!(remaining = matches.len(), "price filter");
        }

        if let Some(search) = query.search.as_deref() {
            let needle = search.to_lowercase();
            matches.retain(|p| p.matches_search(&needle));
            tracing::trace!(remaining = matches.len(), "search filter");
        }

        if !query.sort.is_empty() {
            matches = sort_products(matches, &query.sort);
        }

        let remaining = advance_cursor(&matches, query.last_item_id.as_deref());
        let total = remaining.len();
        let products: Vec<Product> = remaining
            .iter()
            .take(query.limit)
            .map(|p| (*p).clone())
            .collect();

        tracing::debug!(total, returned = products.len(), "query executed");

        ProductPage { total, products }
    }
}

/// Product paired with its parsed creation time, so timestamps are parsed
/// once per sort rather than once per comparison
struct SortEntry<'a> {
    product: &'a Product,
    created_at: Option<i64>,
}

fn sort_products<'a>(products: Vec<&'a Product>, criteria: &[SortCriterion]) -> Vec<&'a Product> {
    let mut entries: Vec<SortEntry<'a>> = products
        .into_iter()
        .map(|product| SortEntry {
            product,
            created_at: product.created_at_millis(),
        })
        .collect();

    // `sort_by` is stable: full ties keep their input order
    entries.sort_by(|a, b| compare_entries(a, b, criteria));

    entries.into_iter().map(|entry| entry.product).collect()
}

fn compare_entries(a: &SortEntry<'_>, b: &SortEntry<'_>, criteria: &[SortCriterion]) -> Ordering {
    for criterion in criteria {
        let ordering = match &criterion.key {
            SortKey::Price => a
                .product
                .price
                .partial_cmp(&b.product.price)
                .unwrap_or(Ordering::Equal),
            // Unparsable timestamps (None) order before every valid one
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Title => locale_compare(&a.product.title, &b.product.title),
            SortKey::Unrecognized(_) => Ordering::Equal,
        };

        let ordering = match criterion.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Drop everything up to and including the cursor item
///
/// An unknown cursor leaves the sequence untouched.
fn advance_cursor<'s, 'a>(
    products: &'s [&'a Product],
    last_item_id: Option<&str>,
) -> &'s [&'a Product] {
    let Some(last_item_id) = last_item_id else {
        return products;
    };

    match products.iter().position(|p| p.id == last_item_id) {
        Some(index) => &products[index + 1..],
        None => {
            tracing::debug!(last_item_id, "cursor not found, returning from the start");
            products
        }
    }
}
