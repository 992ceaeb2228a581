//! Product catalog loading.
//!
//! The catalog is written by an upstream preprocessing pipeline as
//! delimited tabular text, one record per product, with the tokenized
//! description stored as a serialized token-list literal. It is loaded
//! once per session and treated as immutable afterwards; recommendation
//! calls only read it.
//!
//! # Quick Start
//!
//! ```
//! use sugerir::catalog::{Catalog, Product};
//!
//! let catalog = Catalog::from_products(vec![
//!     Product::new("SP001", "Hydrating Cream")
//!         .with_tokens(vec!["cream".into(), "hydrating".into()])
//!         .with_avg_rating(4.2),
//!     Product::new("SP002", "Matte Lipstick")
//!         .with_tokens(vec!["lipstick".into(), "matte".into()])
//!         .with_avg_rating(4.8),
//! ]).expect("catalog should build");
//!
//! assert_eq!(catalog.len(), 2);
//! assert!(catalog.get("SP001").is_some());
//! ```

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, SugerirError};

/// Columns every catalog file must provide, in any order.
const REQUIRED_COLUMNS: [&str; 8] = [
    "product_code",
    "name",
    "description",
    "tokens",
    "avg_rating",
    "image",
    "price",
    "list_price",
];

/// One product row from the preprocessed catalog.
///
/// Immutable during a recommendation request. Display attributes (image,
/// prices, description) are carried through to result rows untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique product code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Tokenized description: normalized, lowercase terms with stopwords
    /// already removed upstream.
    pub tokens: Vec<String>,
    /// Average customer rating, typically 0-5.
    pub avg_rating: f64,
    /// Image reference.
    pub image: String,
    /// Current price.
    pub price: f64,
    /// Original price.
    pub list_price: f64,
}

impl Product {
    /// Create a product with the given code and name; remaining fields
    /// default to empty/zero.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: String::new(),
            tokens: Vec::new(),
            avg_rating: 0.0,
            image: String::new(),
            price: 0.0,
            list_price: 0.0,
        }
    }

    /// Set the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the tokenized description.
    #[must_use]
    pub fn with_tokens(mut self, tokens: Vec<String>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Set the average rating.
    #[must_use]
    pub fn with_avg_rating(mut self, avg_rating: f64) -> Self {
        self.avg_rating = avg_rating;
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set current and original price.
    #[must_use]
    pub fn with_prices(mut self, price: f64, list_price: f64) -> Self {
        self.price = price;
        self.list_price = list_price;
        self
    }
}

/// Immutable, ordered product catalog with code lookup.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    by_code: HashMap<String, usize>,
    fingerprint: u64,
    skipped_rows: usize,
}

impl Catalog {
    /// Build a catalog from in-memory products, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error if `products` is empty or contains a duplicate
    /// product code.
    pub fn from_products(products: Vec<Product>) -> Result<Self> {
        Self::build(products, 0)
    }

    /// Load a catalog from a delimited catalog file.
    ///
    /// The file must carry the full column set (`product_code`, `name`,
    /// `description`, `tokens`, `avg_rating`, `image`, `price`,
    /// `list_price`); a missing column is a fatal [`SugerirError::SchemaMismatch`].
    /// Rows with an empty code or unparsable numeric fields are skipped
    /// and counted, not fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable, the schema is
    /// incomplete, or a product code appears twice.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let display_path = path.display().to_string();

        let mut reader = csv::Reader::from_path(path).map_err(|e| SugerirError::Parse {
            path: display_path.clone(),
            line: 0,
            message: format!("failed to open catalog: {e}"),
        })?;

        let headers = reader
            .headers()
            .map_err(|e| SugerirError::Parse {
                path: display_path.clone(),
                line: 1,
                message: format!("failed to read headers: {e}"),
            })?
            .clone();

        let mut column_idx = HashMap::new();
        for required in REQUIRED_COLUMNS {
            match headers.iter().position(|h| h == required) {
                Some(idx) => {
                    column_idx.insert(required, idx);
                }
                None => {
                    return Err(SugerirError::SchemaMismatch {
                        path: display_path,
                        expected: format!("{REQUIRED_COLUMNS:?}"),
                        actual: format!("{:?}", headers.iter().collect::<Vec<_>>()),
                    });
                }
            }
        }

        let mut products = Vec::new();
        let mut skipped = 0usize;
        let mut line = 1usize;

        for record in reader.records() {
            line += 1;
            let record = record.map_err(|e| SugerirError::Parse {
                path: display_path.clone(),
                line,
                message: format!("failed to read row: {e}"),
            })?;

            let field = |name: &str| record.get(column_idx[name]).unwrap_or("").trim();

            let code = field("product_code");
            if code.is_empty() {
                skipped += 1;
                continue;
            }

            let Some(avg_rating) = parse_float_or_default(field("avg_rating")) else {
                skipped += 1;
                continue;
            };
            let Some(price) = parse_float_or_default(field("price")) else {
                skipped += 1;
                continue;
            };
            let Some(list_price) = parse_float_or_default(field("list_price")) else {
                skipped += 1;
                continue;
            };

            products.push(
                Product::new(code, field("name"))
                    .with_description(field("description"))
                    .with_tokens(parse_token_list(field("tokens")))
                    .with_avg_rating(avg_rating)
                    .with_image(field("image"))
                    .with_prices(price, list_price),
            );
        }

        if skipped > 0 {
            warn!(path = %display_path, skipped, "skipped malformed catalog rows");
        }
        debug!(path = %display_path, products = products.len(), "catalog loaded");

        Self::build(products, skipped)
    }

    fn build(products: Vec<Product>, skipped_rows: usize) -> Result<Self> {
        if products.is_empty() {
            return Err(SugerirError::empty_input("catalog products"));
        }

        let mut by_code = HashMap::with_capacity(products.len());
        for (idx, product) in products.iter().enumerate() {
            if by_code.insert(product.code.clone(), idx).is_some() {
                return Err(SugerirError::Other(format!(
                    "duplicate product code in catalog: {}",
                    product.code
                )));
            }
        }

        let fingerprint = fingerprint_products(&products);
        Ok(Self {
            products,
            by_code,
            fingerprint,
            skipped_rows,
        })
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Product> {
        self.by_code.get(code.trim()).map(|&idx| &self.products[idx])
    }

    /// Row index of a product code in catalog order.
    #[must_use]
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.by_code.get(code.trim()).copied()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty (never true for a built catalog).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Content hash of the loaded catalog.
    ///
    /// Stable for identical content; changes when any product row changes.
    /// Embedders can use it to key caches of derived structures (the
    /// TF-IDF index) across catalog reloads.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Rows dropped during load because of malformed fields.
    #[must_use]
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

/// Parse a serialized token-list literal back into tokens.
///
/// Accepts the bracketed, quoted form the preprocessing pipeline writes
/// (`['cream', 'hydrating']`, single or double quotes), a bracketed
/// unquoted form (`[cream, hydrating]`), or bare whitespace-separated
/// tokens.
///
/// # Examples
///
/// ```
/// use sugerir::catalog::parse_token_list;
///
/// assert_eq!(parse_token_list("['cream', 'hydrating']"), vec!["cream", "hydrating"]);
/// assert_eq!(parse_token_list("cream hydrating"), vec!["cream", "hydrating"]);
/// assert!(parse_token_list("[]").is_empty());
/// ```
#[must_use]
pub fn parse_token_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if let Some(inner) = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
    {
        let mut tokens = Vec::new();
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\'' || c == '"' {
                let quote = c;
                let mut token = String::new();
                for t in chars.by_ref() {
                    if t == quote {
                        break;
                    }
                    token.push(t);
                }
                if !token.is_empty() {
                    tokens.push(token);
                }
            }
        }
        if tokens.is_empty() {
            return inner
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
        }
        return tokens;
    }

    trimmed.split_whitespace().map(String::from).collect()
}

/// Empty numeric fields default to 0.0; unparsable ones reject the row.
fn parse_float_or_default(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok()
}

fn fingerprint_products(products: &[Product]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    products.len().hash(&mut hasher);
    for product in products {
        product.code.hash(&mut hasher);
        product.name.hash(&mut hasher);
        product.description.hash(&mut hasher);
        product.tokens.hash(&mut hasher);
        product.avg_rating.to_bits().hash(&mut hasher);
        product.image.hash(&mut hasher);
        product.price.to_bits().hash(&mut hasher);
        product.list_price.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
