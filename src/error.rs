//! Error types for criterion binding and feed loading

use thiserror::Error;

/// Errors surfaced by the listing filter and its data source
#[derive(Debug, Error)]
pub enum FilterError {
    /// A criterion name that is not in the registry
    #[error("Call to undefined criterion: {0}")]
    UndefinedOperation(String),

    /// A value whose shape does not fit the criterion's declared type
    #[error("Invalid argument for {criterion}: expected {expected}")]
    InvalidArgument {
        criterion: String,
        expected: &'static str,
    },

    #[error("Listing feed parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Listing feed read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The feed document has no recognizable listing collection
    #[error("Listing feed has no listings: {0}")]
    MissingListings(String),
}

impl FilterError {
    /// Stable error code, used by the CLI for exit status mapping
    pub fn error_code(&self) -> &'static str {
        match self {
            FilterError::UndefinedOperation(_) => "undefined_operation",
            FilterError::InvalidArgument { .. } => "invalid_argument",
            FilterError::Parse(_) => "feed_parse_failed",
            FilterError::Io(_) => "feed_read_failed",
            FilterError::MissingListings(_) => "missing_listings",
        }
    }

    pub(crate) fn invalid_argument(criterion: &str, expected: &'static str) -> Self {
        FilterError::InvalidArgument {
            criterion: criterion.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_display() {
        let error = FilterError::UndefinedOperation("num_rooms".to_string());
        assert_eq!(error.to_string(), "Call to undefined criterion: num_rooms");

        let error = FilterError::invalid_argument("neighborhood", "array");
        assert_eq!(
            error.to_string(),
            "Invalid argument for neighborhood: expected array"
        );

        let error = FilterError::MissingListings("no `listing` key".to_string());
        assert_eq!(
            error.to_string(),
            "Listing feed has no listings: no `listing` key"
        );
    }

    #[test]
    fn test_filter_error_codes() {
        assert_eq!(
            FilterError::UndefinedOperation("x".to_string()).error_code(),
            "undefined_operation"
        );
        assert_eq!(
            FilterError::invalid_argument("amenities", "array").error_code(),
            "invalid_argument"
        );
    }

    #[test]
    fn test_filter_error_from_conversions() {
        let json_error = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let error: FilterError = json_error.into();
        assert!(matches!(error, FilterError::Parse(_)));

        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: FilterError = io_error.into();
        assert!(matches!(error, FilterError::Io(_)));
        assert_eq!(error.error_code(), "feed_read_failed");
    }
}
