use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::hash::DjbHash;

/// Hash that sends every name to the same key.
#[derive(Clone, Copy, Default)]
struct Constant;

impl HashFunction for Constant {
	fn compute(&self, _bytes: &[u8], _length: usize) -> u32 {
		7
	}
}

#[test]
fn empty_index_finds_nothing() {
	let index: SortedIndex<u32> = SortedIndex::new();
	assert!(index.is_empty());
	assert_eq!(index.search("anything"), None);
	assert_eq!(index.get(0), None);
}

#[test]
fn insert_then_search_returns_value() {
	let mut index = SortedIndex::new();
	for (value, name) in ["alpha", "beta", "gamma", "delta"].into_iter().enumerate() {
		assert!(index.insert(name, value).is_some());
	}
	assert_eq!(index.len(), 4);
	for (value, name) in ["alpha", "beta", "gamma", "delta"].into_iter().enumerate() {
		let slot = index.search(name).expect("inserted name is found");
		assert_eq!(index.get(slot), Some(&value));
		assert_eq!(index.name(slot), Some(name));
	}
}

#[test]
fn duplicate_insert_is_rejected() {
	let mut index = SortedIndex::new();
	assert!(index.insert("node", 1).is_some());
	assert_eq!(index.insert("node", 2), None);
	assert_eq!(index.get_by_name("node"), Some(&1));
	assert_eq!(index.len(), 1);
}

#[test]
fn remove_absent_name_fails() {
	let mut index = SortedIndex::new();
	index.insert("a", 1);
	assert!(!index.remove("b"));
	assert!(index.remove("a"));
	assert!(!index.remove("a"));
	assert!(index.is_empty());
}

#[test]
fn colliding_hashes_stay_distinct() {
	let mut index = SortedIndex::with_hasher(Constant);
	assert!(index.insert("first", 1).is_some());
	assert!(index.insert("second", 2).is_some());
	assert!(index.insert("third", 3).is_some());
	assert_eq!(index.get_by_name("first"), Some(&1));
	assert_eq!(index.get_by_name("second"), Some(&2));
	assert_eq!(index.get_by_name("third"), Some(&3));
	assert!(index.remove("second"));
	assert_eq!(index.get_by_name("second"), None);
	assert_eq!(index.get_by_name("third"), Some(&3));
}

#[test]
fn get_or_insert_defaults_missing_names() {
	let mut index: SortedIndex<Vec<u8>> = SortedIndex::new();
	index.get_or_insert("bytes").push(1);
	index.get_or_insert("bytes").push(2);
	assert_eq!(index.get_by_name("bytes"), Some(&vec![1, 2]));
	assert_eq!(index.len(), 1);
}

#[test]
fn reset_keeps_capacity() {
	let mut index = SortedIndex::new();
	for i in 0..10 {
		index.insert(&format!("n{i}"), i);
	}
	let capacity = index.capacity();
	index.reset();
	assert!(index.is_empty());
	assert_eq!(index.capacity(), capacity);
	assert_eq!(index.search("n3"), None);
}

#[test]
fn growth_follows_granularity() {
	let mut index = SortedIndex::with_granularity(4);
	index.insert("a", ());
	assert!(index.capacity() >= 1);
	index.insert("b", ());
	assert!(index.capacity() >= 4);
	assert_eq!(SortedIndex::<()>::with_granularity(0).granularity(), 2);
}

#[test]
fn alternative_hash_is_pluggable() {
	let mut index = SortedIndex::with_hasher(DjbHash);
	index.insert("ciao", 1);
	assert_eq!(index.keys(), &[2_090_149_025]);
	assert_eq!(index.get_by_name("ciao"), Some(&1));
}

fn names() -> impl Strategy<Value = Vec<String>> {
	prop::collection::vec("[a-z]{1,6}", 0..64)
}

proptest! {
	#[test]
	fn keys_stay_sorted(names in names()) {
		let mut index = SortedIndex::new();
		for name in &names {
			index.insert(name, ());
		}
		prop_assert!(index.keys().windows(2).all(|pair| pair[0] <= pair[1]));
	}

	#[test]
	fn behaves_like_a_map(names in names(), removals in prop::collection::vec(0usize..64, 0..16)) {
		let mut index = SortedIndex::new();
		let mut model = BTreeMap::new();
		for (value, name) in names.iter().enumerate() {
			let fresh = !model.contains_key(name);
			prop_assert_eq!(index.insert(name, value).is_some(), fresh);
			model.entry(name.clone()).or_insert(value);
		}
		for position in removals {
			if let Some(name) = names.get(position) {
				prop_assert_eq!(index.remove(name), model.remove(name).is_some());
			}
		}
		prop_assert_eq!(index.len(), model.len());
		for (name, value) in &model {
			prop_assert_eq!(index.get_by_name(name), Some(value));
		}
	}

	#[test]
	fn search_misses_terminate(names in names(), probe in "[A-Z]{1,4}") {
		let mut index = SortedIndex::with_hasher(Constant);
		for name in &names {
			index.insert(name, ());
		}
		prop_assert_eq!(index.search(&probe), None);
	}
}
