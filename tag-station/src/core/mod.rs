//! Core module - station configuration
//!
//! - [`Config`] - paths, printer address and logging settings

pub mod config;

pub use config::Config;
