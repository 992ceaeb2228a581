//! Historical customer-product rating store.
//!
//! Rating history arrives as one or more delimited files (the upstream
//! pipeline partitions large exports); the store unions them row-wise into
//! one logical table, normalizes identifiers, and exposes the derived
//! views the collaborative ranker needs: distinct customers, distinct
//! products in first-occurrence order, and per-customer exclusion sets.
//!
//! Deduplication of repeated (customer, product) pairs is an upstream
//! concern (most-recent-wins already applied); the store does not
//! re-deduplicate records.
//!
//! # Quick Start
//!
//! ```
//! use sugerir::ratings::{RatingRecord, RatingStore};
//!
//! let store = RatingStore::from_records(vec![
//!     RatingRecord::new("U1", "P1", 5),
//!     RatingRecord::new("U1", "P2", 2),
//!     RatingRecord::new("U2", "P1", 4),
//! ]);
//!
//! assert_eq!(store.customers(), ["U1", "U2"]);
//! assert_eq!(store.products(), ["P1", "P2"]);
//! assert!(store.rated_at_least("U1", 3).contains("P1"));
//! assert!(!store.rated_at_least("U1", 3).contains("P2"));
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, SugerirError};

/// Columns every rating file must provide, in any order.
const REQUIRED_COLUMNS: [&str; 3] = ["customer_code", "product_code", "stars"];

/// Optional display-metadata columns joined back onto recommendations.
const METADATA_COLUMNS: [&str; 6] = [
    "name",
    "image",
    "price",
    "list_price",
    "description",
    "avg_rating",
];

/// One normalized rating record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingRecord {
    /// Customer code, trimmed.
    pub customer: String,
    /// Product code, trimmed.
    pub product: String,
    /// Star value, 1-5.
    pub stars: u8,
    /// Optional rating timestamp (seconds).
    pub timestamp: Option<i64>,
}

impl RatingRecord {
    /// Create a record with no timestamp.
    #[must_use]
    pub fn new(customer: impl Into<String>, product: impl Into<String>, stars: u8) -> Self {
        Self {
            customer: customer.into(),
            product: product.into(),
            stars,
            timestamp: None,
        }
    }
}

/// First-match display metadata for a product, taken from the rating
/// table's optional columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductInfo {
    /// Display name.
    pub name: String,
    /// Image reference.
    pub image: String,
    /// Current price.
    pub price: f64,
    /// Original price.
    pub list_price: f64,
    /// Free-text description.
    pub description: String,
    /// Average rating.
    pub avg_rating: f64,
}

/// Normalized union of one or more rating-history files.
#[derive(Debug, Clone)]
pub struct RatingStore {
    records: Vec<RatingRecord>,
    customers: Vec<String>,
    product_order: Vec<String>,
    metadata: HashMap<String, ProductInfo>,
    skipped_rows: usize,
}

/// Normalize an identifier the way stored identifiers are normalized.
///
/// Trims surrounding whitespace and keeps the value as a string:
/// numeric-looking codes survive verbatim, with leading characters intact
/// and no float round-trip.
#[must_use]
pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_string()
}

impl RatingStore {
    /// Load and union rating records from `paths`.
    ///
    /// Every file must present the required columns (`customer_code`,
    /// `product_code`, `stars`) and all files must agree on the full
    /// header set; a disagreement is a fatal
    /// [`SugerirError::SchemaMismatch`]. Rows with empty identifiers or a
    /// star value outside 1-5 are skipped and counted, never silently
    /// dropped without trace.
    ///
    /// # Errors
    ///
    /// Returns an error if `paths` is empty, a file is unreadable, or the
    /// schemas are incompatible.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        if paths.is_empty() {
            return Err(SugerirError::empty_input("rating files"));
        }

        let mut records = Vec::new();
        let mut metadata = HashMap::new();
        let mut skipped = 0usize;
        let mut reference_headers: Option<Vec<String>> = None;

        for path in paths {
            let path = path.as_ref();
            let display = path.display().to_string();

            let mut reader = csv::Reader::from_path(path).map_err(|e| SugerirError::Parse {
                path: display.clone(),
                line: 0,
                message: format!("failed to open rating file: {e}"),
            })?;

            let headers = reader
                .headers()
                .map_err(|e| SugerirError::Parse {
                    path: display.clone(),
                    line: 1,
                    message: format!("failed to read headers: {e}"),
                })?
                .clone();

            let mut sorted_headers: Vec<String> = headers.iter().map(String::from).collect();
            sorted_headers.sort_unstable();

            for required in REQUIRED_COLUMNS {
                if !headers.iter().any(|h| h == required) {
                    return Err(SugerirError::SchemaMismatch {
                        path: display,
                        expected: format!("{REQUIRED_COLUMNS:?}"),
                        actual: format!("{sorted_headers:?}"),
                    });
                }
            }

            match &reference_headers {
                None => reference_headers = Some(sorted_headers),
                Some(reference) => {
                    if *reference != sorted_headers {
                        return Err(SugerirError::SchemaMismatch {
                            path: display,
                            expected: format!("{reference:?}"),
                            actual: format!("{sorted_headers:?}"),
                        });
                    }
                }
            }

            let column = |name: &str| headers.iter().position(|h| h == name);
            let customer_idx = column("customer_code").unwrap_or(0);
            let product_idx = column("product_code").unwrap_or(0);
            let stars_idx = column("stars").unwrap_or(0);
            let timestamp_idx = column("timestamp");
            let metadata_idx: HashMap<&str, usize> = METADATA_COLUMNS
                .iter()
                .filter_map(|&name| column(name).map(|idx| (name, idx)))
                .collect();

            let mut line = 1usize;
            for record in reader.records() {
                line += 1;
                let record = record.map_err(|e| SugerirError::Parse {
                    path: display.clone(),
                    line,
                    message: format!("failed to read row: {e}"),
                })?;

                let customer = normalize_id(record.get(customer_idx).unwrap_or(""));
                let product = normalize_id(record.get(product_idx).unwrap_or(""));
                let Some(stars) = parse_stars(record.get(stars_idx).unwrap_or("")) else {
                    skipped += 1;
                    continue;
                };
                if customer.is_empty() || product.is_empty() {
                    skipped += 1;
                    continue;
                }

                let timestamp = timestamp_idx
                    .and_then(|idx| record.get(idx))
                    .and_then(|raw| raw.trim().parse::<i64>().ok());

                if !metadata_idx.is_empty() && !metadata.contains_key(&product) {
                    let text = |name: &str| {
                        metadata_idx
                            .get(name)
                            .and_then(|&idx| record.get(idx))
                            .unwrap_or("")
                            .trim()
                            .to_string()
                    };
                    let number = |name: &str| {
                        metadata_idx
                            .get(name)
                            .and_then(|&idx| record.get(idx))
                            .and_then(|raw| raw.trim().parse::<f64>().ok())
                            .unwrap_or(0.0)
                    };
                    metadata.insert(
                        product.clone(),
                        ProductInfo {
                            name: text("name"),
                            image: text("image"),
                            price: number("price"),
                            list_price: number("list_price"),
                            description: text("description"),
                            avg_rating: number("avg_rating"),
                        },
                    );
                }

                records.push(RatingRecord {
                    customer,
                    product,
                    stars,
                    timestamp,
                });
            }
        }

        if skipped > 0 {
            warn!(skipped, "skipped malformed rating rows");
        }
        debug!(
            files = paths.len(),
            records = records.len(),
            "rating history loaded"
        );

        Ok(Self::assemble(records, metadata, skipped))
    }

    /// Build a store from in-memory records (no display metadata).
    ///
    /// Identifiers are normalized exactly as in [`RatingStore::load`].
    #[must_use]
    pub fn from_records(records: Vec<RatingRecord>) -> Self {
        let normalized = records
            .into_iter()
            .map(|r| RatingRecord {
                customer: normalize_id(&r.customer),
                product: normalize_id(&r.product),
                ..r
            })
            .collect();
        Self::assemble(normalized, HashMap::new(), 0)
    }

    fn assemble(
        records: Vec<RatingRecord>,
        metadata: HashMap<String, ProductInfo>,
        skipped_rows: usize,
    ) -> Self {
        let mut seen_products = HashSet::new();
        let mut product_order = Vec::new();
        let mut customer_set = HashSet::new();
        for record in &records {
            if seen_products.insert(record.product.clone()) {
                product_order.push(record.product.clone());
            }
            customer_set.insert(record.customer.clone());
        }

        // Sorted so the distinct-customer view is identical no matter how
        // the input files were ordered.
        let mut customers: Vec<String> = customer_set.into_iter().collect();
        customers.sort_unstable();

        Self {
            records,
            customers,
            product_order,
            metadata,
            skipped_rows,
        }
    }

    /// All records in load order.
    #[must_use]
    pub fn records(&self) -> &[RatingRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn n_records(&self) -> usize {
        self.records.len()
    }

    /// Distinct customer codes, sorted.
    #[must_use]
    pub fn customers(&self) -> &[String] {
        &self.customers
    }

    /// Distinct product codes in first-occurrence order.
    ///
    /// This is the candidate order for collaborative ranking and the
    /// tie-break order for equal predicted scores.
    #[must_use]
    pub fn products(&self) -> &[String] {
        &self.product_order
    }

    /// Product codes `customer` rated at or above `threshold` stars.
    #[must_use]
    pub fn rated_at_least(&self, customer: &str, threshold: u8) -> HashSet<&str> {
        let customer = customer.trim();
        self.records
            .iter()
            .filter(|r| r.customer == customer && r.stars >= threshold)
            .map(|r| r.product.as_str())
            .collect()
    }

    /// First-match display metadata for a product, if any rating file
    /// carried metadata columns.
    #[must_use]
    pub fn metadata(&self, product: &str) -> Option<&ProductInfo> {
        self.metadata.get(product.trim())
    }

    /// Rows dropped during load because of malformed fields.
    #[must_use]
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

/// Stars must be integral and within 1-5; "4" and "4.0" both parse.
fn parse_stars(raw: &str) -> Option<u8> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.fract() != 0.0 || !(1.0..=5.0).contains(&value) {
        return None;
    }
    Some(value as u8)
}

#[cfg(test)]
#[path = "ratings_tests.rs"]
mod tests;
