//! Error types for the raster pipeline.

use thiserror::Error;

/// Result type alias using RasterError.
pub type RasterResult<T> = Result<T, RasterError>;

/// Errors surfaced by a draw call or by configuration construction.
///
/// The "nothing to draw" case is not an error; see [`crate::DrawOutcome`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    // === Request Errors ===
    #[error("Invalid scale: {0}")]
    InvalidScale(String),

    #[error("Invalid draw options: {0}")]
    InvalidOptions(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("No data for product {0} in this scan")]
    UnsupportedProduct(String),

    #[error("No palette registered for product: {0}")]
    UnknownProductPalette(String),

    // === Data Errors ===
    #[error("Missing scan data: {0}")]
    MissingData(String),

    // === Configuration Errors ===
    #[error("Duplicate product code {0}")]
    DuplicateProductCode(u16),

    #[error("Invalid palette table: {0}")]
    InvalidPalette(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RasterError {
    fn from(e: serde_json::Error) -> Self {
        RasterError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_scale_message() {
        let err = RasterError::InvalidScale("scale factor 0.5 is below 1".to_string());
        assert_eq!(err.to_string(), "Invalid scale: scale factor 0.5 is below 1");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: RasterError = parse.unwrap_err().into();
        assert!(matches!(err, RasterError::Serialization(_)));
    }
}
