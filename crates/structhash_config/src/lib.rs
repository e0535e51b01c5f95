//! Parsing and validation of `structhash.toml` configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`HashConfig`]: the digest format plus the [`HashOptions`] to hash with.
//!
//! [`HashOptions`]: structhash::HashOptions

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use types::HashConfig;
