//! Error types for structural hashing.

/// A boxed error returned by caller-implemented hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can abort a structural hash.
///
/// Every error aborts the whole top-level call: no partial digest is
/// returned alongside it.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// The digest format selector is zero, out of range, or unknown.
    #[error("invalid hash format: {selector}")]
    InvalidFormat {
        /// The rejected selector as the caller spelled it.
        selector: String,
    },

    /// A field demanded text rendering but its value cannot render itself as text.
    #[error("field '{field}' is marked string but does not implement text rendering")]
    NotStringer {
        /// The field that carried the `string` metadata.
        field: String,
    },

    /// The traversal reached a value with no defined encoding.
    #[error("unknown kind to hash: {kind}")]
    UnsupportedKind {
        /// A short name for the offending kind.
        kind: String,
    },

    /// A self-hash, field-filter, or entry-filter hook failed.
    #[error("{hook} hook failed on '{field}': {source}")]
    Hook {
        /// Which capability hook failed.
        hook: &'static str,
        /// The field being processed, or the record type name for self-hash.
        field: String,
        /// The error returned by the hook.
        source: BoxError,
    },

    /// A timestamp could not be converted to its canonical binary form.
    #[error("cannot encode timestamp: {reason}")]
    Timestamp {
        /// Description of the encoding failure.
        reason: String,
    },
}

impl HashError {
    pub(crate) fn invalid_format(selector: impl ToString) -> Self {
        Self::InvalidFormat {
            selector: selector.to_string(),
        }
    }

    pub(crate) fn hook(hook: &'static str, field: impl Into<String>, source: BoxError) -> Self {
        Self::Hook {
            hook,
            field: field.into(),
            source,
        }
    }
}
