//! Digests tagged with the format that produced them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HashError;
use crate::format::Format;
use crate::options::HashOptions;
use crate::traits::StructHash;

/// A structural digest together with its [`Format`].
///
/// Two values with equal fingerprints are assumed to be structurally equal.
/// Digests of different formats never compare equal.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    format: Format,
    bytes: Vec<u8>,
}

impl Fingerprint {
    /// Hashes `value` and wraps the digest.
    pub fn of<T: StructHash + ?Sized>(
        value: &T,
        format: Format,
        options: Option<&HashOptions>,
    ) -> Result<Self, HashError> {
        let bytes = crate::hash(value, format, options)?;
        Ok(Self { format, bytes })
    }

    /// The format that produced this digest.
    pub fn format(&self) -> Format {
        self.format
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length of the digest in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the digest has no bytes. Never the case for a
    /// fingerprint produced by [`Fingerprint::of`].
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consumes the fingerprint, returning the raw digest.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.bytes {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({}:", self.format.name())?;
        for byte in self.bytes.iter().take(2) {
            write!(f, "{byte:02x}")?;
        }
        f.write_str("..)")
    }
}
