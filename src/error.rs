//! Unified error types for the thumbnail preview application.

use std::fmt;

/// Application-specific errors.
///
/// None of these is fatal: the animator turns every one of them into a
/// static thumbnail plus a log line.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewError {
    /// Missing or non-positive markup attribute
    ConfigInvalid(String),
    /// Sprite sheet or slide image could not be fetched or decoded
    AssetLoadFailed(String),
    /// The carousel widget refused to construct
    WidgetConstructFailed(String),
    /// Error reading or parsing a gallery manifest
    Manifest(String),
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewError::ConfigInvalid(msg) => write!(f, "Invalid preview config: {}", msg),
            PreviewError::AssetLoadFailed(msg) => write!(f, "Asset load failed: {}", msg),
            PreviewError::WidgetConstructFailed(msg) => {
                write!(f, "Carousel construction failed: {}", msg)
            }
            PreviewError::Manifest(msg) => write!(f, "Gallery manifest error: {}", msg),
        }
    }
}

impl std::error::Error for PreviewError {}

impl From<image::ImageError> for PreviewError {
    fn from(err: image::ImageError) -> Self {
        PreviewError::AssetLoadFailed(err.to_string())
    }
}

impl From<std::io::Error> for PreviewError {
    fn from(err: std::io::Error) -> Self {
        PreviewError::Manifest(err.to_string())
    }
}

impl From<toml::de::Error> for PreviewError {
    fn from(err: toml::de::Error) -> Self {
        PreviewError::Manifest(err.to_string())
    }
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, PreviewError>;
