//! Error types for Sugerir operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Sugerir operations.
///
/// Distinguishes load-time failures (schema mismatches, undecodable model
/// artifacts) from request-time failures (unknown product codes, invalid
/// blend weights). An empty recommendation list is a valid result, not an
/// error, and is never represented here.
///
/// # Examples
///
/// ```
/// use sugerir::error::SugerirError;
///
/// let err = SugerirError::ProductNotFound {
///     code: "SP001".to_string(),
/// };
/// assert!(err.to_string().contains("SP001"));
/// ```
#[derive(Debug)]
pub enum SugerirError {
    /// Requested product code is absent from the catalog.
    ProductNotFound {
        /// Product code that was looked up
        code: String,
    },

    /// Input files lack expected columns or disagree across unioned sources.
    SchemaMismatch {
        /// File that failed the check
        path: String,
        /// Expected column set description
        expected: String,
        /// Actual column set found
        actual: String,
    },

    /// Predictive-model artifact is missing, corrupt, or undecodable.
    ModelLoad {
        /// Failure description
        message: String,
    },

    /// Invalid blend weight or threshold provided.
    InvalidWeight {
        /// Parameter name
        param: String,
        /// Provided value
        value: f64,
        /// Constraint description
        constraint: String,
    },

    /// A tabular input file could not be read or decoded.
    Parse {
        /// File being parsed
        path: String,
        /// 1-based line number, 0 when unknown
        line: usize,
        /// Failure description
        message: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for SugerirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SugerirError::ProductNotFound { code } => {
                write!(f, "Product not found in catalog: {code}")
            }
            SugerirError::SchemaMismatch {
                path,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Schema mismatch in {path}: expected columns {expected}, got {actual}"
                )
            }
            SugerirError::ModelLoad { message } => {
                write!(f, "Model artifact load failed: {message}")
            }
            SugerirError::InvalidWeight {
                param,
                value,
                constraint,
            } => {
                write!(f, "Invalid weight: {param} = {value}, expected {constraint}")
            }
            SugerirError::Parse {
                path,
                line,
                message,
            } => {
                if *line == 0 {
                    write!(f, "Parse error in {path}: {message}")
                } else {
                    write!(f, "Parse error in {path} at line {line}: {message}")
                }
            }
            SugerirError::Io(e) => write!(f, "I/O error: {e}"),
            SugerirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SugerirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SugerirError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SugerirError {
    fn from(err: std::io::Error) -> Self {
        SugerirError::Io(err)
    }
}

impl From<&str> for SugerirError {
    fn from(msg: &str) -> Self {
        SugerirError::Other(msg.to_string())
    }
}

impl From<String> for SugerirError {
    fn from(msg: String) -> Self {
        SugerirError::Other(msg)
    }
}

impl SugerirError {
    /// Create a model-load error with descriptive context.
    #[must_use]
    pub fn model_load(message: impl Into<String>) -> Self {
        Self::ModelLoad {
            message: message.into(),
        }
    }

    /// Create an empty input error.
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for SugerirError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<SugerirError> for &str {
    fn eq(&self, other: &SugerirError) -> bool {
        *self == other.to_string()
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SugerirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_not_found_display() {
        let err = SugerirError::ProductNotFound {
            code: "SP422".to_string(),
        };
        assert!(err.to_string().contains("Product not found"));
        assert!(err.to_string().contains("SP422"));
    }

    #[test]
    fn test_schema_mismatch_display() {
        let err = SugerirError::SchemaMismatch {
            path: "ratings_part2.csv".to_string(),
            expected: "[customer_code, product_code, stars]".to_string(),
            actual: "[customer_code, stars]".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Schema mismatch"));
        assert!(msg.contains("ratings_part2.csv"));
        assert!(msg.contains("product_code"));
    }

    #[test]
    fn test_model_load_display() {
        let err = SugerirError::model_load("checksum mismatch");
        assert!(err.to_string().contains("Model artifact load failed"));
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn test_invalid_weight_display() {
        let err = SugerirError::InvalidWeight {
            param: "weight_content".to_string(),
            value: -0.5,
            constraint: "finite and >= 0".to_string(),
        };
        assert!(err.to_string().contains("weight_content"));
        assert!(err.to_string().contains("-0.5"));
        assert!(err.to_string().contains(">= 0"));
    }

    #[test]
    fn test_parse_display_with_and_without_line() {
        let with_line = SugerirError::Parse {
            path: "catalog.csv".to_string(),
            line: 14,
            message: "bad rating".to_string(),
        };
        assert!(with_line.to_string().contains("line 14"));

        let without_line = SugerirError::Parse {
            path: "catalog.csv".to_string(),
            line: 0,
            message: "unreadable header".to_string(),
        };
        assert!(!without_line.to_string().contains("line"));
    }

    #[test]
    fn test_from_str_and_string() {
        let err: SugerirError = "test error".into();
        assert!(matches!(err, SugerirError::Other(_)));
        assert_eq!(err.to_string(), "test error");

        let err: SugerirError = "owned error".to_string().into();
        assert_eq!(err.to_string(), "owned error");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SugerirError = io_err.into();
        assert!(matches!(err, SugerirError::Io(_)));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SugerirError::Io(io_err);
        assert!(err.source().is_some());

        let err = SugerirError::Other("test".to_string());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_error_eq_str() {
        let err = SugerirError::Other("test error".to_string());
        assert!(err == "test error");
        assert!("test error" == err);
    }

    #[test]
    fn test_empty_input_helper() {
        let err = SugerirError::empty_input("rating files");
        assert!(err.to_string().contains("empty input"));
        assert!(err.to_string().contains("rating files"));
    }
}
