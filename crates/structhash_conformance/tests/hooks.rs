//! Self-hash, field-filter, and entry-filter capabilities.

use std::collections::HashMap;

use structhash::{BoxError, EntryFilter, FieldFilter, HashError, SelfHash, StructHash};
use structhash_conformance::md5;

#[derive(StructHash)]
#[hash(entry_filter)]
struct Labels {
    pub name: String,
    pub labels: HashMap<String, String>,
}

impl EntryFilter for Labels {
    fn include_entry(
        &self,
        field: &str,
        key: &dyn StructHash,
        _value: &dyn StructHash,
    ) -> Result<bool, BoxError> {
        assert_eq!(field, "labels");
        let key = key.render_text().unwrap_or_default();
        Ok(!key.starts_with("tmp."))
    }
}

#[test]
fn entry_filter_drops_entries() {
    let mut with_tmp = HashMap::new();
    with_tmp.insert("team".to_string(), "core".to_string());
    with_tmp.insert("tmp.build".to_string(), "42".to_string());
    let mut without_tmp = HashMap::new();
    without_tmp.insert("team".to_string(), "core".to_string());

    let a = Labels {
        name: "svc".into(),
        labels: with_tmp,
    };
    let b = Labels {
        name: "svc".into(),
        labels: without_tmp,
    };
    assert_eq!(md5(&a).unwrap(), md5(&b).unwrap());
}

#[derive(StructHash)]
#[hash(entry_filter)]
struct Failing {
    pub data: HashMap<u8, u8>,
}

impl EntryFilter for Failing {
    fn include_entry(
        &self,
        _field: &str,
        _key: &dyn StructHash,
        _value: &dyn StructHash,
    ) -> Result<bool, BoxError> {
        Err("filter unavailable".into())
    }
}

#[test]
fn entry_filter_error_aborts() {
    let mut data = HashMap::new();
    data.insert(1, 2);
    let err = md5(&Failing { data }).unwrap_err();
    match err {
        HashError::Hook { hook, field, source } => {
            assert_eq!(hook, "entry filter");
            assert_eq!(field, "data");
            assert_eq!(source.to_string(), "filter unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn entry_filter_not_called_for_empty_map() {
    let err = md5(&Failing {
        data: HashMap::new(),
    });
    assert!(err.is_ok());
}

#[derive(StructHash)]
#[hash(field_filter)]
struct Partial {
    pub keep: String,
    pub volatile: u64,
}

impl FieldFilter for Partial {
    fn include_field(&self, field: &str, _value: &dyn StructHash) -> Result<bool, BoxError> {
        match field {
            "keep" => Ok(true),
            "volatile" => Ok(false),
            other => Err(format!("unexpected field {other}").into()),
        }
    }
}

#[test]
fn field_filter_excludes_fields() {
    let a = Partial {
        keep: "x".into(),
        volatile: 1,
    };
    let b = Partial {
        keep: "x".into(),
        volatile: 2,
    };
    let c = Partial {
        keep: "y".into(),
        volatile: 1,
    };
    assert_eq!(md5(&a).unwrap(), md5(&b).unwrap());
    assert_ne!(md5(&a).unwrap(), md5(&c).unwrap());
}

#[derive(StructHash)]
#[hash(field_filter)]
struct Strict {
    pub value: u8,
}

impl FieldFilter for Strict {
    fn include_field(&self, _field: &str, _value: &dyn StructHash) -> Result<bool, BoxError> {
        Err("denied".into())
    }
}

#[test]
fn field_filter_error_aborts() {
    let err = md5(&Strict { value: 1 }).unwrap_err();
    assert!(matches!(err, HashError::Hook { hook: "field filter", .. }));
}

/// Hashes by identifier only.
#[derive(StructHash)]
#[hash(self_hash)]
struct Document {
    pub id: u64,
    pub body: String,
}

impl SelfHash for Document {
    fn self_hash(&self) -> Result<u64, BoxError> {
        Ok(self.id)
    }
}

#[test]
fn self_hash_replaces_traversal() {
    let a = Document {
        id: 7,
        body: "draft".into(),
    };
    let b = Document {
        id: 7,
        body: "final".into(),
    };
    assert_eq!(md5(&a).unwrap(), md5(&b).unwrap());
    // Written as decimal text.
    assert_eq!(md5(&a).unwrap(), md5("7").unwrap());
}

#[derive(StructHash)]
struct Library {
    pub docs: Vec<Document>,
}

#[test]
fn self_hash_applies_to_nested_records() {
    let a = Library {
        docs: vec![Document {
            id: 1,
            body: "a".into(),
        }],
    };
    let b = Library {
        docs: vec![Document {
            id: 1,
            body: "b".into(),
        }],
    };
    assert_eq!(md5(&a).unwrap(), md5(&b).unwrap());
}
