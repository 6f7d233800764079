//! Query parameters and result pages

use crate::core::product::Product;
use serde::{Deserialize, Serialize};

/// Page size used when `limit` is missing or unusable
pub const DEFAULT_LIMIT: usize = 10;

/// Raw query parameters as they arrive in the URL query string
///
/// Every field is kept as a string; [`QueryParams::parse`] turns them into a
/// typed [`ProductQuery`]. Parsing never rejects a request.
///
/// # Example
/// ```rust,ignore
/// // In handler:
/// pub async fn list_products(
///     Query(params): Query<QueryParams>,
/// ) -> Json<ProductPage> {
///     let (query, _malformed) = params.parse();
///     // query.limit defaults to 10
/// }
///
/// // Usage:
/// GET /api/products?category=Fiction&minPrice=5&maxPrice=20
/// GET /api/products?search=tolkien&sortBy=price,title&sortDirection=desc,asc
/// GET /api/products?sortBy=createdAt&lastItemId=p42&limit=5
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryParams {
    /// Exact-match category filter
    pub category: Option<String>,

    /// Exact-match tier filter (tiered schema only)
    pub tier: Option<String>,

    /// Inclusive lower price bound
    pub min_price: Option<String>,

    /// Inclusive upper price bound
    pub max_price: Option<String>,

    /// Case-insensitive substring matched against title and author name
    pub search: Option<String>,

    /// Comma-separated sort keys
    ///
    /// # Format
    /// One or more of `price`, `createdAt`, `title`, in priority order.
    ///
    /// # Example
    /// ```text
    /// sortBy=price,title
    /// ```
    pub sort_by: Option<String>,

    /// Comma-separated directions, parallel to `sortBy`
    ///
    /// Missing entries default to `asc`.
    pub sort_direction: Option<String>,

    /// Cursor: id of the last item seen on the previous page
    pub last_item_id: Option<String>,

    /// Page size
    pub limit: Option<String>,
}

/// Sort key named in `sortBy`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Price,
    CreatedAt,
    Title,
    /// Kept so the criterion still occupies its slot; compares as a tie
    Unrecognized(String),
}

impl SortKey {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "price" => SortKey::Price,
            "createdAt" => SortKey::CreatedAt,
            "title" => SortKey::Title,
            other => SortKey::Unrecognized(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything other than `desc` sorts ascending
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// One (key, direction) pair of a multi-key sort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortCriterion {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortCriterion {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }
}

/// Typed product query consumed by the query pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub tier: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
    pub sort: Vec<SortCriterion>,
    pub last_item_id: Option<String>,
    pub limit: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            category: None,
            tier: None,
            min_price: None,
            max_price: None,
            search: None,
            sort: Vec::new(),
            last_item_id: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// A query parameter that could not be honoured as given
///
/// These are diagnostics, not failures: the parameter falls back to its
/// default or becomes a no-op.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedParameter {
    #[error("{name}={value:?} is not a number, bound ignored")]
    PriceBound { name: &'static str, value: String },

    #[error("limit={value:?} is not a positive integer, using the default page size")]
    Limit { value: String },

    #[error("unknown sort key {key:?}, criterion ignored")]
    SortKey { key: String },
}

impl QueryParams {
    /// Parse into a typed query, collecting anything that had to be ignored
    pub fn parse(&self) -> (ProductQuery, Vec<MalformedParameter>) {
        let mut malformed = Vec::new();

        let min_price = parse_price_bound("minPrice", present(&self.min_price), &mut malformed);
        let max_price = parse_price_bound("maxPrice", present(&self.max_price), &mut malformed);

        let limit = match present(&self.limit) {
            None => DEFAULT_LIMIT,
            Some(raw) => match parse_leading_int(raw) {
                Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
                _ => {
                    malformed.push(MalformedParameter::Limit {
                        value: raw.to_string(),
                    });
                    DEFAULT_LIMIT
                }
            },
        };

        let sort = self.sort_criteria();
        for criterion in &sort {
            if let SortKey::Unrecognized(key) = &criterion.key {
                malformed.push(MalformedParameter::SortKey { key: key.clone() });
            }
        }

        let query = ProductQuery {
            category: present(&self.category).map(str::to_string),
            tier: present(&self.tier).map(str::to_string),
            min_price,
            max_price,
            search: present(&self.search).map(str::to_string),
            sort,
            last_item_id: present(&self.last_item_id).map(str::to_string),
            limit,
        };

        (query, malformed)
    }

    /// Pair each `sortBy` entry with its `sortDirection` entry
    ///
    /// The direction list may be shorter than the key list; it is never
    /// cycled and never truncates the keys.
    pub fn sort_criteria(&self) -> Vec<SortCriterion> {
        let Some(sort_by) = present(&self.sort_by) else {
            return Vec::new();
        };
        let directions: Vec<&str> = present(&self.sort_direction)
            .map(|raw| raw.split(',').collect())
            .unwrap_or_default();

        sort_by
            .split(',')
            .enumerate()
            .map(|(i, key)| SortCriterion {
                key: SortKey::parse(key),
                direction: SortDirection::from_param(directions.get(i).copied()),
            })
            .collect()
    }
}

// Empty strings count as absent
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn parse_price_bound(
    name: &'static str,
    raw: Option<&str>,
    malformed: &mut Vec<MalformedParameter>,
) -> Option<f64> {
    let raw = raw?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            malformed.push(MalformedParameter::PriceBound {
                name,
                value: raw.to_string(),
            });
            None
        }
    }
}

/// Leading-integer parse: optional sign then digits, trailing junk ignored
///
/// Values beyond the `i64` range saturate.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -value } else { value })
}

/// One page of query results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    /// Matches remaining from the cursor onward, before the limit is applied
    pub total: usize,

    /// At most `limit` products
    pub products: Vec<Product>,
}
