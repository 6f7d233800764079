//! Product records as decoded from the catalog database

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Catalog schema variant
///
/// The legacy catalog has no `tier` classification. With the tiered schema the
/// tier filter is honoured and tier metadata is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    Legacy,
    #[default]
    Tiered,
}

impl Schema {
    /// Whether records carry a `tier` classification
    pub fn has_tier(self) -> bool {
        matches!(self, Schema::Tiered)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Legacy => write!(f, "legacy"),
            Schema::Tiered => write!(f, "tiered"),
        }
    }
}

impl FromStr for Schema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Schema::Legacy),
            "tiered" => Ok(Schema::Tiered),
            other => Err(format!("unknown schema '{}' (expected 'legacy' or 'tiered')", other)),
        }
    }
}

/// Structured author name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// `"firstName lastName"` joined by a single space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A single catalog record
///
/// Records are read-only snapshots. Fields the service does not interpret are
/// kept in `extra` and echoed back. The output is not byte-identical to the
/// input: a missing `title` or `author` serializes as empty strings and
/// `price` always serializes as a float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author: Author,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Absent in the legacy schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,

    pub price: f64,

    /// Raw timestamp, either a date string or epoch milliseconds
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub created_at: Value,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: Author,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author,
            category: None,
            theme: None,
            tier: None,
            price,
            created_at: Value::Null,
            extra: Map::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<Value>) -> Self {
        self.created_at = created_at.into();
        self
    }

    /// Creation time in epoch milliseconds, if the stored value parses
    pub fn created_at_millis(&self) -> Option<i64> {
        parse_timestamp(&self.created_at)
    }

    /// Case-insensitive substring match against title or author full name
    ///
    /// `needle` must already be lower-cased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.author.full_name().to_lowercase().contains(needle)
    }
}

/// Parse a stored timestamp into epoch milliseconds
///
/// Accepts RFC 3339 strings, naive date-times and plain dates (both taken as
/// UTC), and JSON numbers holding epoch milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => parse_timestamp_str(s),
        _ => None,
    }
}

fn parse_timestamp_str(raw: &str) -> Option<i64> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}
