//! Product search result model.
//!
//! The search API's result shape is owned by the server; this module accepts
//! the two envelopes seen in practice (a bare array of products, or an object
//! wrapping the array with a total count) and normalises them into
//! [`SearchResults`].

use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// A single product returned by a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Product {
    /// Formats the price with two decimals, or an empty string when unknown.
    ///
    /// ```
    /// use shopsearch::domain::Product;
    ///
    /// let product = Product {
    ///     id: "1".into(),
    ///     name: "Shoe".into(),
    ///     price: Some(49.5),
    ///     category: None,
    /// };
    /// assert_eq!(product.display_price(), "49.50");
    /// ```
    #[must_use]
    pub fn display_price(&self) -> String {
        self.price.map(|p| format!("{p:.2}")).unwrap_or_default()
    }
}

/// Wire envelope for product search responses.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResultsEnvelope {
    Bare(Vec<Product>),
    Wrapped {
        products: Vec<Product>,
        #[serde(default)]
        total: Option<usize>,
    },
}

/// The outcome of a product search, tagged with the query that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub products: Vec<Product>,
    /// Total number of matches on the server; may exceed `products.len()`.
    pub total: usize,
}

impl SearchResults {
    /// Parses a product search response body.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body matches neither envelope.
    pub fn from_json(query: &str, body: &[u8]) -> serde_json::Result<Self> {
        let envelope: ResultsEnvelope = serde_json::from_slice(body)?;
        let (products, total) = match envelope {
            ResultsEnvelope::Bare(products) => {
                let total = products.len();
                (products, total)
            }
            ResultsEnvelope::Wrapped { products, total } => {
                let total = total.unwrap_or(products.len()).max(products.len());
                (products, total)
            }
        };

        Ok(Self {
            query: query.to_string(),
            products,
            total,
        })
    }
}

/// Returns a short human-readable description of how long ago `timestamp` was.
///
/// - Less than 1 minute: "just now"
/// - Less than 1 hour: "Xm ago"
/// - Less than 1 day: "Xh ago"
/// - Otherwise: "Xd ago"
#[must_use]
pub fn time_ago(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array() {
        let body = br#"[{"id":"a1","name":"Running shoe","price":89.9},{"name":"Sock"}]"#;
        let results = SearchResults::from_json("shoe", body).unwrap();

        assert_eq!(results.query, "shoe");
        assert_eq!(results.total, 2);
        assert_eq!(results.products[0].price, Some(89.9));
        assert_eq!(results.products[1].id, "");
        assert_eq!(results.products[1].category, None);
    }

    #[test]
    fn parses_wrapped_object_with_total() {
        let body = br#"{"products":[{"id":"1","name":"Lamp","category":"Home"}],"total":40}"#;
        let results = SearchResults::from_json("lamp", body).unwrap();

        assert_eq!(results.products.len(), 1);
        assert_eq!(results.total, 40);
        assert_eq!(results.products[0].category.as_deref(), Some("Home"));
    }

    #[test]
    fn total_never_below_returned_count() {
        let body = br#"{"products":[{"name":"A"},{"name":"B"}],"total":1}"#;
        let results = SearchResults::from_json("x", body).unwrap();
        assert_eq!(results.total, 2);
    }

    #[test]
    fn rejects_unrelated_json() {
        assert!(SearchResults::from_json("x", br#"{"items": 3}"#).is_err());
        assert!(SearchResults::from_json("x", b"not json").is_err());
    }

    #[test]
    fn time_ago_buckets() {
        let now = 1_000_000;
        assert_eq!(time_ago(now - 5, now), "just now");
        assert_eq!(time_ago(now - 300, now), "5m ago");
        assert_eq!(time_ago(now - 3 * 3600, now), "3h ago");
        assert_eq!(time_ago(now - 7 * 86400, now), "7d ago");
    }
}
