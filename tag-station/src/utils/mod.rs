//! Utilities
//!
//! - [`AppError`] / [`AppResult`] - unified error types (from shared::error)
//! - [`print_error`] - printer library error mapping
//! - logging setup

pub mod error;
pub mod logger;

pub use error::print_error;
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
