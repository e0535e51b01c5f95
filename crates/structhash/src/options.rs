//! Per-call hashing options.

use serde::{Deserialize, Serialize};

/// The metadata key consulted when [`HashOptions::tag_name`] is empty.
pub const DEFAULT_TAG: &str = "hash";

/// Options that are available for hashing.
///
/// Read-only for the duration of a traversal. Missing keys in a serialized
/// form fall back to [`HashOptions::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashOptions {
    /// The field-metadata key to look at when hashing records.
    pub tag_name: String,

    /// Treat an absent reference as equal to the zero value of the
    /// referenced type.
    pub zero_nil: bool,

    /// Skip record fields that hold the zero value of their type.
    pub ignore_zero_value: bool,

    /// Treat every sequence as if its field were marked `set`.
    pub slices_as_sets: bool,

    /// Hash every field that can render itself as text via that text.
    ///
    /// Fields without the capability fall back to ordinary traversal. A
    /// field explicitly marked `string` still fails if it cannot render.
    pub use_stringer: bool,
}

impl HashOptions {
    /// Returns the metadata key in effect, substituting the default for an
    /// empty `tag_name`.
    pub fn tag(&self) -> &str {
        if self.tag_name.is_empty() {
            DEFAULT_TAG
        } else {
            &self.tag_name
        }
    }
}

impl Default for HashOptions {
    fn default() -> Self {
        Self {
            tag_name: DEFAULT_TAG.to_string(),
            zero_nil: false,
            ignore_zero_value: false,
            slices_as_sets: false,
            use_stringer: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = HashOptions::default();
        assert_eq!(opts.tag(), "hash");
        assert!(!opts.zero_nil);
        assert!(!opts.ignore_zero_value);
        assert!(!opts.slices_as_sets);
        assert!(!opts.use_stringer);
    }

    #[test]
    fn empty_tag_falls_back() {
        let opts = HashOptions {
            tag_name: String::new(),
            ..HashOptions::default()
        };
        assert_eq!(opts.tag(), DEFAULT_TAG);
    }

    #[test]
    fn custom_tag() {
        let opts = HashOptions {
            tag_name: "cache".to_string(),
            ..HashOptions::default()
        };
        assert_eq!(opts.tag(), "cache");
    }

    #[test]
    fn deserialize_partial() {
        let opts: HashOptions = serde_json::from_str(r#"{"zero_nil": true}"#).unwrap();
        assert!(opts.zero_nil);
        assert_eq!(opts.tag(), "hash");
        assert!(!opts.use_stringer);
    }

    #[test]
    fn serde_roundtrip() {
        let opts = HashOptions {
            tag_name: "audit".to_string(),
            zero_nil: true,
            ignore_zero_value: true,
            slices_as_sets: true,
            use_stringer: true,
        };
        let json = serde_json::to_string(&opts).unwrap();
        let back: HashOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(opts, back);
    }
}
