//! # Pragati Common Library
//!
//! Shared code for the Pragati services:
//! - Error and result types
//! - Bootstrap configuration loading (TOML file, environment, command line)

pub mod config;
pub mod error;

pub use config::{CorsConfig, LoggingConfig, TomlConfig};
pub use error::{Error, Result};
