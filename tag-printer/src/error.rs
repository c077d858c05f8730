//! Error types for the printer library

use thiserror::Error;

/// Printer and renderer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Character cannot be represented in Code 128
    #[error("Unencodable character {ch:?} at position {position}")]
    Unencodable { ch: char, position: usize },

    /// Barcode payload is empty
    #[error("Empty barcode payload")]
    EmptyPayload,

    /// Raster encoding failed
    #[error("Image encoding failed: {0}")]
    Encode(String),

    /// Network connection error
    #[error("Connection failed: {0}")]
    Connection(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout waiting for printer
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
