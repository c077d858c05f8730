//! Error conversions for the printer library

use shared::error::{AppError, ErrorCode};
use tag_printer::PrintError;

/// Map a printer library error onto the unified error codes
///
/// Use as `.map_err(print_error)`.
pub fn print_error(err: PrintError) -> AppError {
    let code = match &err {
        PrintError::Unencodable { .. } | PrintError::EmptyPayload => ErrorCode::BarcodeEncodeFailed,
        PrintError::Encode(_) => ErrorCode::ImageEncodeFailed,
        PrintError::Connection(_) | PrintError::Timeout(_) => ErrorCode::PrinterUnavailable,
        PrintError::Io(_) => ErrorCode::PrintFailed,
        PrintError::InvalidConfig(_) => ErrorCode::ConfigError,
    };
    AppError::with_message(code, err.to_string())
}
