//! Configuration types deserialized from `structhash.toml`.

use serde::{Deserialize, Serialize};
use structhash::{Fingerprint, Format, HashError, HashOptions, StructHash};

/// The top-level configuration parsed from `structhash.toml`.
///
/// ```toml
/// format = "sha256"
///
/// [options]
/// tag_name = "hash"
/// zero_nil = true
/// slices_as_sets = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashConfig {
    /// The digest format, by lowercase name.
    pub format: Format,
    /// Traversal options.
    pub options: HashOptions,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            format: Format::Md5,
            options: HashOptions::default(),
        }
    }
}

impl HashConfig {
    /// Hashes `value` with the configured format and options.
    pub fn hash<T: StructHash + ?Sized>(&self, value: &T) -> Result<Vec<u8>, HashError> {
        structhash::hash(value, self.format, Some(&self.options))
    }

    /// Like [`HashConfig::hash`], but returns a [`Fingerprint`].
    pub fn fingerprint<T: StructHash + ?Sized>(&self, value: &T) -> Result<Fingerprint, HashError> {
        Fingerprint::of(value, self.format, Some(&self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_md5_with_default_options() {
        let config = HashConfig::default();
        assert_eq!(config.format, Format::Md5);
        assert_eq!(config.options, HashOptions::default());
    }

    #[test]
    fn hash_uses_configured_format() {
        let config = HashConfig {
            format: Format::Sha256,
            options: HashOptions::default(),
        };
        assert_eq!(config.hash("abc").unwrap().len(), 32);
        assert_eq!(config.fingerprint("abc").unwrap().format(), Format::Sha256);
    }
}
