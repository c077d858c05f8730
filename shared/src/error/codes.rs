//! Unified error codes for Tag Station
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Option catalog errors
//! - 2xxx: Session errors
//! - 3xxx: Render, export and print errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they serialize compactly
/// and stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Catalog ====================
    /// Value is not one of the catalog options
    OptionNotFound = 1001,
    /// Brand list scope refers to a type that is not in the catalog
    TypeNotFound = 1002,
    /// Persisted catalog could not be decoded
    CatalogCorrupted = 1003,

    // ==================== 2xxx: Session ====================
    /// Scanned payload does not have the `branch|type|brand` shape
    InvalidPayload = 2001,
    /// No barcode in the preview surface
    NoPreview = 2002,
    /// Print queue is empty
    QueueEmpty = 2003,

    // ==================== 3xxx: Render ====================
    /// Barcode symbol could not be encoded
    BarcodeEncodeFailed = 3001,
    /// Raster image could not be encoded
    ImageEncodeFailed = 3002,
    /// Export file could not be written
    ExportFailed = 3003,
    /// Print job failed
    PrintFailed = 3004,
    /// Printer is not reachable
    PrinterUnavailable = 3005,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Storage error
    StorageError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// File system error
    IoError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Catalog
            ErrorCode::OptionNotFound => "Option not found",
            ErrorCode::TypeNotFound => "Type not found",
            ErrorCode::CatalogCorrupted => "Stored options are corrupted",

            // Session
            ErrorCode::InvalidPayload => "Invalid tag payload",
            ErrorCode::NoPreview => "Generate a barcode first!",
            ErrorCode::QueueEmpty => "No items to print",

            // Render
            ErrorCode::BarcodeEncodeFailed => "Barcode encoding failed",
            ErrorCode::ImageEncodeFailed => "Image encoding failed",
            ErrorCode::ExportFailed => "Export failed",
            ErrorCode::PrintFailed => "Print failed",
            ErrorCode::PrinterUnavailable => "Printer is not available",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::IoError => "File system error",
        }
    }

    /// Whether this code reports a user input problem rather than a failure
    ///
    /// The front end shows these as plain alerts.
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            ErrorCode::ValidationFailed
                | ErrorCode::RequiredField
                | ErrorCode::AlreadyExists
                | ErrorCode::OptionNotFound
                | ErrorCode::TypeNotFound
                | ErrorCode::InvalidPayload
                | ErrorCode::NoPreview
                | ErrorCode::QueueEmpty
        )
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Catalog
            1001 => Ok(ErrorCode::OptionNotFound),
            1002 => Ok(ErrorCode::TypeNotFound),
            1003 => Ok(ErrorCode::CatalogCorrupted),

            // Session
            2001 => Ok(ErrorCode::InvalidPayload),
            2002 => Ok(ErrorCode::NoPreview),
            2003 => Ok(ErrorCode::QueueEmpty),

            // Render
            3001 => Ok(ErrorCode::BarcodeEncodeFailed),
            3002 => Ok(ErrorCode::ImageEncodeFailed),
            3003 => Ok(ErrorCode::ExportFailed),
            3004 => Ok(ErrorCode::PrintFailed),
            3005 => Ok(ErrorCode::PrinterUnavailable),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::ConfigError),
            9004 => Ok(ErrorCode::IoError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
