//! Deterministic structural hashing of in-memory value graphs.
//!
//! [`hash`] walks a value and feeds a canonical byte encoding of it into a
//! digest. Structurally equal values produce equal digests regardless of
//! keyed-collection iteration order, pointer identity, or integer width
//! within a signedness family.
//!
//! Types take part by implementing [`StructHash`]. Records usually derive it:
//!
//! ```
//! use structhash::{hash, Format, StructHash};
//!
//! #[derive(StructHash)]
//! struct Host {
//!     pub name: String,
//!     #[hash(set)]
//!     pub aliases: Vec<String>,
//!     #[hash(ignore)]
//!     pub last_seen: u64,
//! }
//!
//! let a = Host { name: "db".into(), aliases: vec!["x".into(), "y".into()], last_seen: 1 };
//! let b = Host { name: "db".into(), aliases: vec!["y".into(), "x".into()], last_seen: 2 };
//! assert_eq!(
//!     hash(&a, Format::Md5, None).unwrap(),
//!     hash(&b, Format::Md5, None).unwrap(),
//! );
//! ```

#![warn(missing_docs)]

extern crate self as structhash;

mod collections;
pub mod error;
pub mod fingerprint;
pub mod format;
mod impls;
pub mod node;
pub mod optional;
pub mod options;
mod record;
pub mod time;
pub mod traits;
pub mod walker;

use tracing::debug;

pub use error::{BoxError, HashError};
pub use fingerprint::Fingerprint;
pub use format::{DigestSink, Format};
pub use node::{Elements, Entries, Node, VisitCtx, VisitFlags, ZeroFn};
pub use optional::{Optional, OptionalError, OptionalPayload, OptionalValue};
pub use options::{HashOptions, DEFAULT_TAG};
pub use time::Timestamp;
pub use traits::{EntryFilter, Field, FieldFilter, FieldTag, Record, SelfHash, StructHash};
pub use walker::Walker;

/// Derives [`StructHash`] and [`Record`] for a struct with named or tuple
/// fields. See the crate documentation for the supported `#[hash(...)]`
/// attributes.
pub use structhash_derive::StructHash;

/// Returns the digest of `value` in the given format.
///
/// `None` options mean [`HashOptions::default`]. The call is pure: it holds
/// no state between invocations and is safe to run concurrently from many
/// threads. On any error no digest is returned.
pub fn hash<T: StructHash + ?Sized>(
    value: &T,
    format: Format,
    options: Option<&HashOptions>,
) -> Result<Vec<u8>, HashError> {
    let defaults;
    let opts = match options {
        Some(opts) => opts,
        None => {
            defaults = HashOptions::default();
            &defaults
        }
    };
    debug!(
        format = format.name(),
        tag = opts.tag(),
        zero_nil = opts.zero_nil,
        ignore_zero_value = opts.ignore_zero_value,
        slices_as_sets = opts.slices_as_sets,
        use_stringer = opts.use_stringer,
        "hashing value"
    );

    let mut walker = Walker::new(format, opts);
    if let Err(err) = walker.visit_node(value.node(), None) {
        debug!(format = format.name(), error = %err, "hash failed");
        return Err(err);
    }
    Ok(walker.finish())
}

/// Like [`hash`], but takes the raw numeric format selector.
///
/// A selector outside [`Format::ALL`], including the unset `0`, fails with
/// [`HashError::InvalidFormat`] before any traversal happens.
pub fn hash_with_selector<T: StructHash + ?Sized>(
    value: &T,
    selector: u32,
    options: Option<&HashOptions>,
) -> Result<Vec<u8>, HashError> {
    let format = Format::try_from(selector)?;
    hash(value, format, options)
}
