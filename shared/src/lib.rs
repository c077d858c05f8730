//! Shared types for Tag Station
//!
//! Data model and the unified error system used by the printer library,
//! the station core and the command line front end.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
