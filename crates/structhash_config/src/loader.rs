//! Configuration file loading and validation.

use std::path::Path;

use crate::error::ConfigError;
use crate::types::HashConfig;

/// The configuration file name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "structhash.toml";

/// Loads and validates a `structhash.toml` configuration from a directory.
///
/// Reads `<dir>/structhash.toml`, parses it, and validates its values.
pub fn load_config(dir: &Path) -> Result<HashConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `structhash.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<HashConfig, ConfigError> {
    let config: HashConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Metadata keys are attribute words: anything else can never match a field.
fn validate_config(config: &HashConfig) -> Result<(), ConfigError> {
    let tag = &config.options.tag_name;
    if tag.is_empty() {
        return Ok(());
    }
    let mut chars = tag.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConfigError::InvalidTagName { tag: tag.clone() });
    }
    Ok(())
}
