//! Conformance fixtures for structhash.
//!
//! Provides the golden records whose MD5 digests are pinned byte-for-byte,
//! plus small helpers shared by the integration tests.

#![warn(missing_docs)]

use std::collections::HashMap;

use structhash::{hash, Format, HashError, HashOptions, StructHash};

/// Inner record of the golden fixtures.
#[derive(StructHash, Debug, Clone, Default, PartialEq)]
#[hash(rename = "structB")]
pub struct StructB {
    /// A signed number.
    #[hash(rename = "A")]
    pub a: i64,
    /// A flag.
    #[hash(rename = "B")]
    pub b: bool,
}

impl StructB {
    /// Creates a `StructB`.
    pub fn new(a: i64, b: bool) -> Self {
        Self { a, b }
    }
}

/// Outer record of the golden fixtures.
#[derive(StructHash, Debug, Clone, Default, PartialEq)]
#[hash(rename = "goldenStruct")]
pub struct GoldenStruct {
    /// Identity that never affects the digest.
    #[hash(ignore, rename = "UUID")]
    pub uuid: String,
    /// Keyed collection of inner records.
    #[hash(rename = "AMap")]
    pub a_map: HashMap<String, StructB>,
    /// Ordered numbers.
    #[hash(rename = "ASlice")]
    pub a_slice: Vec<i64>,
    /// Plain text.
    #[hash(rename = "AString")]
    pub a_string: String,
    /// Optional inner record.
    #[hash(rename = "APtr")]
    pub a_ptr: Option<StructB>,
}

/// The pinned MD5 digests of [`golden_structs`], in order.
pub const GOLDEN_MD5: [[u8; 16]; 4] = [
    [115, 205, 154, 57, 182, 201, 82, 233, 17, 152, 239, 179, 145, 124, 147, 33],
    [115, 205, 154, 57, 182, 201, 82, 233, 17, 152, 239, 179, 145, 124, 147, 33],
    [54, 216, 215, 148, 238, 156, 123, 242, 153, 51, 225, 50, 219, 99, 82, 194],
    [105, 71, 150, 88, 101, 21, 32, 136, 53, 28, 235, 133, 95, 114, 36, 110],
];

fn golden_map(extra: &[&str]) -> HashMap<String, StructB> {
    let mut map = HashMap::new();
    map.insert("bar".to_string(), StructB::new(2, true));
    map.insert("baz".to_string(), StructB::new(-5, false));
    map.insert("bat".to_string(), StructB::default());
    for key in extra {
        map.insert((*key).to_string(), StructB::default());
    }
    map
}

/// The four golden records.
///
/// The first two differ only in their ignored identity and in map insertion
/// order. The third is entirely zero. The fourth has a larger map and
/// everything else empty or absent.
pub fn golden_structs() -> [GoldenStruct; 4] {
    let a = GoldenStruct {
        uuid: "Foobar".to_string(),
        a_map: golden_map(&[]),
        a_slice: vec![5, 42, -13, 0, 0, 24],
        a_string: "hello".to_string(),
        a_ptr: Some(StructB::new(4, true)),
    };
    let b = GoldenStruct {
        uuid: "DIFFERENT_THAN_ABOVE".to_string(),
        ..a.clone()
    };
    let d = GoldenStruct {
        uuid: "uuid".to_string(),
        a_map: golden_map(&["1", "2"]),
        ..GoldenStruct::default()
    };
    [a, b, GoldenStruct::default(), d]
}

/// Hashes `value` with MD5 and default options.
pub fn md5<T: StructHash + ?Sized>(value: &T) -> Result<Vec<u8>, HashError> {
    hash(value, Format::Md5, None)
}

/// Hashes `value` with MD5 and the given options.
pub fn md5_with<T: StructHash + ?Sized>(
    value: &T,
    options: &HashOptions,
) -> Result<Vec<u8>, HashError> {
    hash(value, Format::Md5, Some(options))
}

/// Options with only zero-nil equivalence enabled.
pub fn zero_nil() -> HashOptions {
    HashOptions {
        zero_nil: true,
        ..HashOptions::default()
    }
}
