//! The optional-value adapter family inside records.

use structhash::{HashOptions, Optional, OptionalError, StructHash};
use structhash_conformance::{md5, md5_with, zero_nil};

#[derive(StructHash, Default)]
#[hash(rename = "optionalStruct")]
struct OptionalStruct {
    #[hash(rename = "Int")]
    pub int: Optional<i64>,
    #[hash(rename = "String")]
    pub text: Optional<String>,
    #[hash(rename = "Bool")]
    pub flag: Optional<bool>,
}

#[derive(StructHash)]
#[hash(rename = "outerStruct")]
struct OuterStruct {
    #[hash(rename = "Int")]
    pub int: i64,
    #[hash(rename = "InnerStruct")]
    pub inner: Option<OptionalStruct>,
}

#[test]
fn different_payloads_differ() {
    let s1 = OuterStruct {
        int: 42,
        inner: Some(OptionalStruct {
            int: Optional::new(3),
            text: Optional::new("hello".to_string()),
            flag: Optional::empty(),
        }),
    };
    let s2 = OuterStruct {
        int: 42,
        inner: Some(OptionalStruct {
            int: Optional::new(2),
            text: Optional::empty(),
            flag: Optional::new(false),
        }),
    };
    assert_ne!(md5(&s1).unwrap(), md5(&s2).unwrap());
}

#[test]
fn absent_and_zero_are_distinct_by_default() {
    let absent = OptionalStruct::default();
    let zero = OptionalStruct {
        int: Optional::new(0),
        text: Optional::new(String::new()),
        flag: Optional::new(false),
    };
    assert_ne!(md5(&absent).unwrap(), md5(&zero).unwrap());
}

#[test]
fn zero_nil_merges_absent_and_zero() {
    let opts = zero_nil();
    let absent = OptionalStruct::default();
    let zero = OptionalStruct {
        int: Optional::new(0),
        text: Optional::new(String::new()),
        flag: Optional::new(false),
    };
    assert_eq!(
        md5_with(&absent, &opts).unwrap(),
        md5_with(&zero, &opts).unwrap()
    );
}

#[test]
fn ignore_zero_value_skips_absent_fields() {
    let opts = HashOptions {
        ignore_zero_value: true,
        ..HashOptions::default()
    };
    let sparse = OptionalStruct {
        int: Optional::new(5),
        ..OptionalStruct::default()
    };
    let zeroed = OptionalStruct {
        int: Optional::new(5),
        text: Optional::new(String::new()),
        flag: Optional::new(false),
    };
    assert_eq!(
        md5_with(&sparse, &opts).unwrap(),
        md5_with(&zeroed, &opts).unwrap()
    );
}

#[test]
fn absent_text_is_not_the_literal_nil() {
    let absent = Optional::<String>::empty();
    let literal = Optional::new("nil".to_string());
    assert_ne!(md5(&absent).unwrap(), md5(&literal).unwrap());
}

#[test]
fn errors_hash_by_message() {
    let a: OptionalError = Optional::new("timeout".into());
    let b: OptionalError = Optional::new(std::io::Error::other("timeout").into());
    let c: OptionalError = Optional::new("refused".into());
    assert_eq!(md5(&a).unwrap(), md5(&b).unwrap());
    assert_ne!(md5(&a).unwrap(), md5(&c).unwrap());
}

#[test]
fn every_payload_kind_hashes() {
    let values: Vec<Box<dyn StructHash>> = vec![
        Box::new(Optional::new(1i8)),
        Box::new(Optional::new(1u8)),
        Box::new(Optional::new(1isize)),
        Box::new(Optional::new(1usize)),
        Box::new(Optional::new(1.0f32)),
        Box::new(Optional::new(1.0f64)),
        Box::new(Optional::new('x')),
        Box::new(Optional::new(true)),
        Box::new(Optional::new("x".to_string())),
    ];
    for v in &values {
        assert_eq!(md5(v).unwrap().len(), 16);
    }
}
