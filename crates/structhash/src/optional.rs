//! The optional-value adapter family.
//!
//! [`Optional<T>`] is a present-or-absent container for a closed set of
//! payload kinds: text, error, boolean, and signed, unsigned, and
//! floating-point numbers. Unlike `Option<T>`, which the walker treats as a
//! reference, an absent `Optional` has its own encoding: the marker `nil`,
//! which no present payload can produce.

use std::fmt;

use crate::error::BoxError;
use crate::node::Node;
use crate::traits::StructHash;
use crate::walker::Walker;
use crate::HashError;

const NIL: &[u8] = b"nil";
const TEXT_PREFIX: &[u8] = b"string";
const ERROR_PREFIX: &[u8] = b"error";

/// A value that may or may not be present.
#[derive(Clone, PartialEq)]
pub struct Optional<T> {
    value: Option<T>,
}

/// An optional error, hashed by its message.
pub type OptionalError = Optional<BoxError>;

impl<T> Optional<T> {
    /// Creates a present value.
    pub fn new(value: T) -> Self {
        Self { value: Some(value) }
    }

    /// Creates an absent value.
    pub fn empty() -> Self {
        Self { value: None }
    }

    /// Returns `true` if a value is present.
    pub fn present(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the value, if present.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Replaces the value, making it present.
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    /// Returns the value if present, otherwise `default`.
    pub fn or_else(self, default: T) -> T {
        self.value.unwrap_or(default)
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        Self { value }
    }
}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "Optional({v:?})"),
            None => f.write_str("Optional(nil)"),
        }
    }
}

/// The payload of an [`Optional`], normalized to its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionalValue<'a> {
    /// Text payload.
    Text(Option<&'a str>),
    /// Error payload, as its message.
    Error(Option<String>),
    /// Boolean payload.
    Bool(Option<bool>),
    /// Signed payload, widened to 64 bits.
    Int(Option<i64>),
    /// Unsigned payload, widened to 64 bits.
    Uint(Option<u64>),
    /// Floating-point payload, widened to 64 bits.
    Float(Option<f64>),
}

impl OptionalValue<'_> {
    fn is_absent(&self) -> bool {
        match self {
            OptionalValue::Text(v) => v.is_none(),
            OptionalValue::Error(v) => v.is_none(),
            OptionalValue::Bool(v) => v.is_none(),
            OptionalValue::Int(v) => v.is_none(),
            OptionalValue::Uint(v) => v.is_none(),
            OptionalValue::Float(v) => v.is_none(),
        }
    }

    /// Returns `true` if the payload, or the kind's zero when absent, is zero.
    fn is_zero_or_absent(&self) -> bool {
        match self {
            OptionalValue::Text(v) => v.map_or(true, str::is_empty),
            OptionalValue::Error(v) => v.as_deref().map_or(true, str::is_empty),
            OptionalValue::Bool(v) => !v.unwrap_or(false),
            OptionalValue::Int(v) => v.unwrap_or(0) == 0,
            OptionalValue::Uint(v) => v.unwrap_or(0) == 0,
            OptionalValue::Float(v) => v.unwrap_or(0.0) == 0.0,
        }
    }
}

impl Walker<'_> {
    /// Writes an optional payload.
    ///
    /// With ignore-zero-value on, a zero or absent payload contributes
    /// nothing. Otherwise an absent payload is written as the kind's zero
    /// when zero-nil is on, and as `nil` when it is off.
    pub(crate) fn visit_optional(&mut self, value: OptionalValue<'_>) -> Result<(), HashError> {
        if self.opts.ignore_zero_value && value.is_zero_or_absent() {
            return Ok(());
        }
        if value.is_absent() && !self.opts.zero_nil {
            self.write(NIL);
            return Ok(());
        }

        match value {
            OptionalValue::Text(v) => {
                self.write(TEXT_PREFIX);
                self.write(v.unwrap_or_default().as_bytes());
            }
            OptionalValue::Error(v) => {
                self.write(ERROR_PREFIX);
                self.write(v.unwrap_or_default().as_bytes());
            }
            OptionalValue::Bool(v) => {
                let text = if v.unwrap_or(false) { "true" } else { "false" };
                self.write(text.as_bytes());
            }
            OptionalValue::Int(v) => self.write_int(v.unwrap_or(0)),
            OptionalValue::Uint(v) => self.write_uint(v.unwrap_or(0)),
            OptionalValue::Float(v) => self.write(&v.unwrap_or(0.0).to_le_bytes()),
        }
        Ok(())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A payload type supported by [`Optional`].
///
/// Sealed: the adapter table is closed.
pub trait OptionalPayload: sealed::Sealed {
    /// Normalizes a possibly-absent payload to its kind.
    fn payload(value: Option<&Self>) -> OptionalValue<'_>;
}

impl<T: OptionalPayload> StructHash for Optional<T> {
    fn node(&self) -> Node<'_> {
        Node::Optional(T::payload(self.value.as_ref()))
    }

    fn is_zero(&self) -> bool {
        T::payload(self.value.as_ref()).is_zero_or_absent()
    }
}

impl sealed::Sealed for String {}

impl OptionalPayload for String {
    fn payload(value: Option<&Self>) -> OptionalValue<'_> {
        OptionalValue::Text(value.map(String::as_str))
    }
}

impl sealed::Sealed for BoxError {}

impl OptionalPayload for BoxError {
    fn payload(value: Option<&Self>) -> OptionalValue<'_> {
        OptionalValue::Error(value.map(|e| e.to_string()))
    }
}

impl sealed::Sealed for bool {}

impl OptionalPayload for bool {
    fn payload(value: Option<&Self>) -> OptionalValue<'_> {
        OptionalValue::Bool(value.copied())
    }
}

macro_rules! optional_numeric {
    ($variant:ident => $wide:ty: $($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl OptionalPayload for $t {
                fn payload(value: Option<&Self>) -> OptionalValue<'_> {
                    OptionalValue::$variant(value.map(|v| *v as $wide))
                }
            }
        )*
    };
}

optional_numeric!(Int => i64: i8, i16, i32, i64, isize);
optional_numeric!(Uint => u64: u8, u16, u32, u64, usize);
optional_numeric!(Float => f64: f32, f64);

impl sealed::Sealed for char {}

impl OptionalPayload for char {
    fn payload(value: Option<&Self>) -> OptionalValue<'_> {
        OptionalValue::Uint(value.map(|c| u64::from(u32::from(*c))))
    }
}
