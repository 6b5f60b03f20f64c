//! Errors from loading configuration and datasets.

/// Errors from reading configuration or parsing zone and alert documents.
///
/// Normalization itself never fails; only getting the inputs in can.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML config parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// `GeoJSON` document parsing failed.
    #[error("GeoJSON parse error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The document parsed but does not have a usable shape.
    #[error("Invalid document: {message}")]
    InvalidDocument {
        /// Description of what went wrong.
        message: String,
    },
}
