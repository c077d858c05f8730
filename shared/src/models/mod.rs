//! Data models
//!
//! Shared between the station core and the front end.

pub mod catalog;
pub mod queue;
pub mod selection;

// Re-exports
pub use catalog::*;
pub use queue::*;
pub use selection::*;
