//! Order-invariance properties.

use std::collections::{BTreeMap, HashMap};

use proptest::prelude::*;
use structhash::{HashOptions, StructHash};
use structhash_conformance::{md5, md5_with};

#[derive(StructHash)]
struct Tagged {
    #[hash(set)]
    pub members: Vec<String>,
    pub ordered: Vec<i32>,
}

proptest! {
    #[test]
    fn map_digest_ignores_insertion_order(
        entries in proptest::collection::btree_map(any::<String>(), any::<i64>(), 0..20)
    ) {
        let forward: HashMap<_, _> = entries.iter().collect();
        let mut reverse = HashMap::new();
        for (k, v) in entries.iter().rev() {
            reverse.insert(k, v);
        }
        let sorted: BTreeMap<_, _> = entries.iter().collect();
        prop_assert_eq!(md5(&forward).unwrap(), md5(&reverse).unwrap());
        prop_assert_eq!(md5(&forward).unwrap(), md5(&sorted).unwrap());
    }

    #[test]
    fn set_field_ignores_element_order(
        members in proptest::collection::vec("[a-z]{0,6}", 0..12),
        ordered in proptest::collection::vec(any::<i32>(), 0..6),
    ) {
        let mut shuffled = members.clone();
        shuffled.reverse();
        let a = Tagged { members, ordered: ordered.clone() };
        let b = Tagged { members: shuffled, ordered };
        prop_assert_eq!(md5(&a).unwrap(), md5(&b).unwrap());
    }

    #[test]
    fn slices_as_sets_ignores_order(items in proptest::collection::vec(any::<u16>(), 0..16)) {
        let opts = HashOptions { slices_as_sets: true, ..HashOptions::default() };
        let mut rotated = items.clone();
        if !rotated.is_empty() {
            rotated.rotate_left(1);
        }
        prop_assert_eq!(md5_with(&items, &opts).unwrap(), md5_with(&rotated, &opts).unwrap());
    }

    #[test]
    fn ordinary_sequences_are_order_sensitive(a in any::<i64>(), b in any::<i64>()) {
        prop_assume!(a != b);
        prop_assert_ne!(md5(&vec![a, b]).unwrap(), md5(&vec![b, a]).unwrap());
    }

    #[test]
    fn hashing_is_deterministic(v in proptest::collection::vec((any::<u8>(), ".*"), 0..8)) {
        prop_assert_eq!(md5(&v).unwrap(), md5(&v).unwrap());
    }

    #[test]
    fn integer_width_does_not_matter(v in any::<i16>()) {
        prop_assert_eq!(md5(&v).unwrap(), md5(&i64::from(v)).unwrap());
        prop_assert_eq!(md5(&(v as u16)).unwrap(), md5(&u64::from(v as u16)).unwrap());
    }
}
