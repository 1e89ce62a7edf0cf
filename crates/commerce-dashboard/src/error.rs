//! Error types for the dashboard.
//!
//! Every failure is fatal to the operation that raised it: a load error stops
//! the dashboard from starting, a query error aborts the current render.
//!
//! Errors are serializable so they can be emitted as part of the JSON report.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// An input file does not exist.
    #[error("Input file not found: {0}")]
    FileNotFound(String),

    /// A required column is missing from a loaded table.
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// A purchase timestamp could not be parsed.
    #[error("Invalid purchase timestamp: '{value}'")]
    InvalidTimestamp { value: String },

    /// A query parameter is outside its allowed range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DashboardError>,
    },
}

impl DashboardError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DashboardError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, used in the JSON output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::ColumnNotFound { .. } => "COLUMN_NOT_FOUND",
            Self::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error happened while loading input data.
    pub fn is_load_failure(&self) -> bool {
        match self {
            Self::FileNotFound(_)
            | Self::ColumnNotFound { .. }
            | Self::InvalidTimestamp { .. }
            | Self::Io(_)
            | Self::Polars(_) => true,
            Self::WithContext { source, .. } => source.is_load_failure(),
            _ => false,
        }
    }
}

/// Errors are serialized as `{ "code": ..., "message": ... }`.
impl Serialize for DashboardError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DashboardError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DashboardError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            DashboardError::FileNotFound("x.csv".to_string()).error_code(),
            "FILE_NOT_FOUND"
        );
        assert_eq!(
            DashboardError::ColumnNotFound {
                table: "customers".to_string(),
                column: "customer_city".to_string(),
            }
            .error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_is_load_failure() {
        assert!(DashboardError::FileNotFound("a.csv".to_string()).is_load_failure());
        assert!(
            DashboardError::InvalidTimestamp {
                value: "yesterday".to_string()
            }
            .is_load_failure()
        );
        assert!(!DashboardError::InvalidParameter("top_n".to_string()).is_load_failure());
    }

    #[test]
    fn test_error_serialization() {
        let error = DashboardError::ColumnNotFound {
            table: "sellers".to_string(),
            column: "seller_city".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("seller_city"));
    }

    #[test]
    fn test_with_context() {
        let error = DashboardError::FileNotFound("orders.csv".to_string())
            .with_context("Loading dataset");
        assert!(error.to_string().contains("Loading dataset"));
        assert_eq!(error.error_code(), "FILE_NOT_FOUND");
        assert!(error.is_load_failure());
    }
}
