//! The traits a type implements to take part in structural hashing.
//!
//! [`StructHash`] is the entry point: it exposes a value's [`Node`]. Records
//! additionally implement [`Record`], usually through `#[derive(StructHash)]`,
//! and may opt into the three capability traits [`SelfHash`],
//! [`FieldFilter`] and [`EntryFilter`]. A record advertises a capability by
//! returning `Some(self)` from the matching `as_*` probe; the walker checks
//! the probes at traversal time and falls back to default behavior when a
//! probe returns `None`.

use crate::error::BoxError;
use crate::node::Node;

/// A value that can be structurally hashed.
pub trait StructHash {
    /// Describes this value to the walker.
    fn node(&self) -> Node<'_>;

    /// Returns `true` if this is the zero value of its type.
    ///
    /// Consulted when [`HashOptions::ignore_zero_value`](crate::HashOptions)
    /// is set.
    fn is_zero(&self) -> bool {
        false
    }

    /// Like [`is_zero`](StructHash::is_zero), but looks through references:
    /// an absent reference and a reference to a zero value both count.
    ///
    /// Consulted instead of `is_zero` when
    /// [`HashOptions::zero_nil`](crate::HashOptions) is also set, so that an
    /// absent reference and a present zero are skipped alike.
    fn is_zero_or_nil(&self) -> bool {
        self.is_zero()
    }

    /// Renders this value as text, if the type supports it.
    ///
    /// Used for fields marked `string` and when
    /// [`HashOptions::use_stringer`](crate::HashOptions) is set.
    fn render_text(&self) -> Option<String> {
        None
    }
}

/// A record: a composite value with a fixed, ordered set of named fields.
pub trait Record {
    /// The record's type name, written into the digest before its fields.
    fn type_name(&self) -> &'static str;

    /// The externally visible fields, in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Probes for the [`SelfHash`] capability.
    fn as_self_hash(&self) -> Option<&dyn SelfHash> {
        None
    }

    /// Probes for the [`FieldFilter`] capability.
    fn as_field_filter(&self) -> Option<&dyn FieldFilter> {
        None
    }

    /// Probes for the [`EntryFilter`] capability.
    fn as_entry_filter(&self) -> Option<&dyn EntryFilter> {
        None
    }
}

/// A record that computes its own hash, replacing field traversal entirely.
///
/// The returned value is written into the digest as decimal text.
pub trait SelfHash {
    /// Computes the record's hash.
    fn self_hash(&self) -> Result<u64, BoxError>;
}

/// A record that decides which of its fields take part in the digest.
pub trait FieldFilter {
    /// Returns whether `field` with the given value should be hashed.
    ///
    /// `value` is the rendered text when the field was rendered via
    /// [`StructHash::render_text`].
    fn include_field(&self, field: &str, value: &dyn StructHash) -> Result<bool, BoxError>;
}

/// A record that decides which entries of its keyed-collection fields take
/// part in the digest.
pub trait EntryFilter {
    /// Returns whether the entry `key => value` of the collection stored in
    /// `field` should be hashed.
    fn include_entry(
        &self,
        field: &str,
        key: &dyn StructHash,
        value: &dyn StructHash,
    ) -> Result<bool, BoxError>;
}

/// Behavior metadata attached to a record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldTag {
    /// The field never influences the digest.
    Ignore,
    /// The field is a sequence whose order does not matter.
    Set,
    /// The field is hashed as its rendered text.
    String,
}

/// One visible field of a record.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    name: &'static str,
    value: &'a dyn StructHash,
    tags: &'static [(&'static str, FieldTag)],
}

impl<'a> Field<'a> {
    /// Creates a field without metadata.
    pub fn new(name: &'static str, value: &'a dyn StructHash) -> Self {
        Self {
            name,
            value,
            tags: &[],
        }
    }

    /// Creates a field with metadata, given as `(metadata key, tag)` pairs.
    pub fn with_tags(
        name: &'static str,
        value: &'a dyn StructHash,
        tags: &'static [(&'static str, FieldTag)],
    ) -> Self {
        Self { name, value, tags }
    }

    /// The field's declared name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field's value.
    pub fn value(&self) -> &'a dyn StructHash {
        self.value
    }

    /// Returns the tag recorded under the metadata key `key`, if any.
    pub fn tag(&self, key: &str) -> Option<FieldTag> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, tag)| *tag)
    }
}
