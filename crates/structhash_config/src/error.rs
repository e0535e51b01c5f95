//! Errors raised while loading `structhash.toml`.

/// Errors from reading, parsing, or validating a `structhash.toml` file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid TOML, names an unknown format, or has an
    /// unknown key.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// `options.tag_name` can never match a field attribute key.
    #[error("options.tag_name '{tag}' is not a plain identifier")]
    InvalidTagName {
        /// The rejected metadata key.
        tag: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse_error() {
        let err = ConfigError::ParseError("unknown variant `crc32`".to_string());
        assert_eq!(
            err.to_string(),
            "failed to parse configuration: unknown variant `crc32`"
        );
    }

    #[test]
    fn display_invalid_tag_name() {
        let err = ConfigError::InvalidTagName {
            tag: "json,omitempty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "options.tag_name 'json,omitempty' is not a plain identifier"
        );
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ConfigError::from(io_err);
        assert!(matches!(err, ConfigError::IoError(_)));
        assert!(err.to_string().ends_with("no such file"));
    }
}
