//! The kind view a value presents to the walker.
//!
//! Every [`StructHash`] type describes itself as a [`Node`]. The walker
//! dispatches on the node kind instead of inspecting the value at runtime.

use std::fmt;

use crate::error::HashError;
use crate::optional::OptionalValue;
use crate::time::Timestamp;
use crate::traits::{Record, StructHash};
use crate::walker::Walker;

/// Iterator over the elements of a sequence-like node.
pub type Elements<'a> = Box<dyn Iterator<Item = &'a dyn StructHash> + 'a>;

/// Iterator over the entries of a keyed-collection node.
pub type Entries<'a> = Box<dyn Iterator<Item = (&'a dyn StructHash, &'a dyn StructHash)> + 'a>;

/// Visits the zero value of the type behind an absent reference.
pub type ZeroFn = for<'w, 'c> fn(&mut Walker<'w>, Option<VisitCtx<'c>>) -> Result<(), HashError>;

/// A value's kind, as seen by the walker after indirection is stripped.
pub enum Node<'a> {
    /// Any signed integer, widened to 64 bits.
    Int(i64),
    /// Any unsigned integer, widened to 64 bits.
    Uint(u64),
    /// A boolean, encoded as a single `0`/`1` byte.
    Bool(bool),
    /// Any floating-point value, widened to 64 bits.
    Float(f64),
    /// Text, written as raw bytes with no length prefix.
    Text(&'a str),
    /// A timestamp, written in its canonical binary form.
    Time(Timestamp),
    /// A fixed-size ordered collection. Never treated as a set.
    Array(Elements<'a>),
    /// A growable sequence. Treated as a set when the field says so.
    Seq(Elements<'a>),
    /// A collection whose iteration order carries no meaning.
    Set(Elements<'a>),
    /// A keyed collection.
    Map(Entries<'a>),
    /// A record with named fields.
    Record(&'a dyn Record),
    /// A payload of the [`Optional`](crate::Optional) adapter family.
    Optional(OptionalValue<'a>),
    /// An absent reference. Carries a visitor for the zero value of the
    /// referenced type.
    Nil(ZeroFn),
    /// A kind with no defined encoding.
    Unsupported(&'static str),
}

impl Node<'_> {
    /// Returns a short name for the node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Int(_) => "int",
            Node::Uint(_) => "uint",
            Node::Bool(_) => "bool",
            Node::Float(_) => "float",
            Node::Text(_) => "text",
            Node::Time(_) => "time",
            Node::Array(_) => "array",
            Node::Seq(_) => "seq",
            Node::Set(_) => "set",
            Node::Map(_) => "map",
            Node::Record(_) => "record",
            Node::Optional(_) => "optional",
            Node::Nil(_) => "nil",
            Node::Unsupported(kind) => kind,
        }
    }

    /// Builds the absent-reference node for `T`.
    pub fn nil<'n, T: StructHash + Default>() -> Node<'n> {
        Node::Nil(visit_default::<T>)
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Int(v) => write!(f, "Int({v})"),
            Node::Uint(v) => write!(f, "Uint({v})"),
            Node::Bool(v) => write!(f, "Bool({v})"),
            Node::Float(v) => write!(f, "Float({v})"),
            Node::Text(v) => write!(f, "Text({v:?})"),
            Node::Time(v) => write!(f, "Time({v:?})"),
            Node::Record(r) => write!(f, "Record({})", r.type_name()),
            Node::Optional(v) => write!(f, "Optional({v:?})"),
            other => f.write_str(other.kind()),
        }
    }
}

fn visit_default<T: StructHash + Default>(
    walker: &mut Walker<'_>,
    ctx: Option<VisitCtx<'_>>,
) -> Result<(), HashError> {
    walker.visit(&T::default(), ctx)
}

/// Bitmask of flags affecting how a single value is visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisitFlags(u8);

impl VisitFlags {
    /// No flags.
    pub const NONE: VisitFlags = VisitFlags(0);
    /// Treat the sequence as an unordered set.
    pub const SET: VisitFlags = VisitFlags(1);

    /// Returns `true` if every flag in `other` is set.
    pub fn contains(self, other: VisitFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for VisitFlags {
    type Output = VisitFlags;

    fn bitor(self, rhs: VisitFlags) -> VisitFlags {
        VisitFlags(self.0 | rhs.0)
    }
}

/// Context for visiting one field value of a record.
///
/// Created fresh for each field and never shared across recursive calls.
#[derive(Clone, Copy)]
pub struct VisitCtx<'a> {
    /// Behavior flags for this field.
    pub flags: VisitFlags,
    /// The record that contains the field.
    pub parent: &'a dyn Record,
    /// The field's declared name.
    pub field: &'a str,
}

impl VisitCtx<'_> {
    /// Returns `true` if the field is marked as a set.
    pub fn is_set(&self) -> bool {
        self.flags.contains(VisitFlags::SET)
    }
}

impl fmt::Debug for VisitCtx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitCtx")
            .field("flags", &self.flags)
            .field("parent", &self.parent.type_name())
            .field("field", &self.field)
            .finish()
    }
}
