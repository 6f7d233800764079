//! Shared fixtures for integration tests

#![allow(dead_code)]

use catalog::prelude::*;

pub fn book(id: &str, title: &str, first: &str, last: &str, price: f64) -> Product {
    Product::new(id, title, Author::new(first, last), price)
}

/// Twelve-item catalog covering every field the pipeline looks at
pub fn sample_catalog() -> Vec<Product> {
    vec![
        book("1", "Dune", "Frank", "Herbert", 9.99)
            .with_category("Fiction")
            .with_theme("Desert")
            .with_tier("gold")
            .with_created_at("2023-01-10T09:00:00Z"),
        book("2", "Clean Code", "Robert", "Martin", 32.0)
            .with_category("Tech")
            .with_theme("Craft")
            .with_tier("silver")
            .with_created_at("2022-05-01T12:00:00Z"),
        book("3", "emma", "Jane", "Austen", 5.5)
            .with_category("Fiction")
            .with_theme("Romance")
            .with_tier("bronze")
            .with_created_at("2021-11-20"),
        book("4", "The Pragmatic Programmer", "Andrew", "Hunt", 32.0)
            .with_category("Tech")
            .with_theme("Craft")
            .with_tier("gold")
            .with_created_at("2020-02-02T08:00:00Z"),
        book("5", "Neuromancer", "William", "Gibson", 12.0)
            .with_category("Fiction")
            .with_theme("Cyberpunk")
            .with_tier("silver")
            .with_created_at("2024-07-04T00:00:00Z"),
        book("6", "Smith's Guide to Rust", "Alice", "Smith", 45.0)
            .with_category("Tech")
            .with_theme("Systems")
            .with_tier("gold")
            .with_created_at("2024-01-15T10:30:00Z"),
        book("7", "Persuasion", "Jane", "Austen", 5.5)
            .with_category("Fiction")
            .with_theme("Romance")
            .with_tier("bronze")
            .with_created_at("2019-08-08T08:08:08Z"),
        book("8", "Snow Crash", "Neal", "Stephenson", 15.0)
            .with_category("Fiction")
            .with_theme("Cyberpunk")
            .with_tier("silver")
            .with_created_at("2022-12-24T18:00:00Z"),
        book("9", "Refactoring", "Martin", "Fowler", 40.0)
            .with_category("Tech")
            .with_theme("Craft")
            .with_tier("gold")
            .with_created_at("2018-11-19T00:00:00Z"),
        book("10", "Alice in Wonderland", "Lewis", "Carroll", 3.0)
            .with_category("Fiction")
            .with_theme("Fantasy")
            .with_tier("bronze")
            .with_created_at("2017-03-03T03:03:03Z"),
        book("11", "Anathem", "Neal", "Stephenson", 15.0)
            .with_category("Fiction")
            .with_theme("Philosophy")
            .with_tier("silver")
            .with_created_at("2023-09-09T09:09:09Z"),
        book("12", "Designing Data-Intensive Applications", "Martin", "Kleppmann", 38.0)
            .with_category("Tech")
            .with_theme("Systems")
            .with_tier("gold")
            .with_created_at("2021-03-16T00:00:00Z"),
    ]
}

pub fn ids(page: &ProductPage) -> Vec<&str> {
    page.products.iter().map(|p| p.id.as_str()).collect()
}

/// Parse query-string style pairs the way the HTTP layer does
pub fn parse(pairs: &[(&str, &str)]) -> ProductQuery {
    let map: serde_json::Map<String, serde_json::Value> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();
    let params: QueryParams = serde_json::from_value(serde_json::Value::Object(map))
        .expect("query params should deserialize");
    params.parse().0
}
