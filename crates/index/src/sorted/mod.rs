//! Sorted dual-array associative index.
//!
//! Entries are `(hash, name, value)` triples stored in three parallel vectors that stay
//! ordered by `(hash, name)`. Colliding hashes are told apart by the name, so two
//! distinct names never share a slot.

use std::cmp::Ordering;
use std::fmt;

use crate::hash::{Fnv1aHash, HashFunction};

#[cfg(test)]
mod tests;

/// Growth factor applied when the backing arrays are full.
pub const DEFAULT_GRANULARITY: usize = 2;

/// Name to value map with O(log n) lookup and O(n) insert/remove.
///
/// Slot indices returned by [`insert`](Self::insert) and [`search`](Self::search) are
/// positions in the sorted arrays and shift when other entries are inserted or removed
/// before them.
pub struct SortedIndex<V, H = Fnv1aHash> {
	keys: Vec<u32>,
	names: Vec<Box<str>>,
	values: Vec<V>,
	granularity: usize,
	hasher: H,
}

impl<V> SortedIndex<V, Fnv1aHash> {
	pub fn new() -> Self {
		Self::with_hasher(Fnv1aHash)
	}

	pub fn with_granularity(granularity: usize) -> Self {
		let mut index = Self::new();
		index.set_granularity(granularity);
		index
	}
}

impl<V> Default for SortedIndex<V, Fnv1aHash> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V, H: HashFunction> SortedIndex<V, H> {
	pub fn with_hasher(hasher: H) -> Self {
		Self {
			keys: Vec::new(),
			names: Vec::new(),
			values: Vec::new(),
			granularity: DEFAULT_GRANULARITY,
			hasher,
		}
	}

	/// Sets the growth factor. Values below 2 are raised to 2.
	pub fn set_granularity(&mut self, granularity: usize) {
		self.granularity = granularity.max(2);
	}

	pub fn granularity(&self) -> usize {
		self.granularity
	}

	pub fn len(&self) -> usize {
		self.keys.len()
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.keys.capacity()
	}

	/// Hash keys in slot order. Non-decreasing.
	pub fn keys(&self) -> &[u32] {
		&self.keys
	}

	/// Inserts `value` under `name`.
	///
	/// Returns the slot the entry landed in, or `None` when `name` is already present
	/// (the stored value is left untouched).
	pub fn insert(&mut self, name: &str, value: V) -> Option<usize> {
		let key = self.hasher.hash_str(name);
		let slot = self.locate(key, name).err()?;
		self.grow();
		self.keys.insert(slot, key);
		self.names.insert(slot, name.into());
		self.values.insert(slot, value);
		Some(slot)
	}

	/// Removes the entry for `name`. Returns whether an entry was removed.
	pub fn remove(&mut self, name: &str) -> bool {
		self.take(name).is_some()
	}

	/// Removes the entry for `name` and returns its value.
	pub fn take(&mut self, name: &str) -> Option<V> {
		let slot = self.search(name)?;
		self.keys.remove(slot);
		self.names.remove(slot);
		Some(self.values.remove(slot))
	}

	/// Slot of `name`, if present.
	pub fn search(&self, name: &str) -> Option<usize> {
		self.locate(self.hasher.hash_str(name), name).ok()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.search(name).is_some()
	}

	pub fn get(&self, slot: usize) -> Option<&V> {
		self.values.get(slot)
	}

	pub fn get_mut(&mut self, slot: usize) -> Option<&mut V> {
		self.values.get_mut(slot)
	}

	pub fn name(&self, slot: usize) -> Option<&str> {
		self.names.get(slot).map(AsRef::as_ref)
	}

	pub fn get_by_name(&self, name: &str) -> Option<&V> {
		self.search(name).and_then(|slot| self.values.get(slot))
	}

	pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut V> {
		let slot = self.search(name)?;
		self.values.get_mut(slot)
	}

	/// Value stored under `name`, inserting `V::default()` at the sorted position first
	/// when the name is absent.
	pub fn get_or_insert(&mut self, name: &str) -> &mut V
	where
		V: Default,
	{
		let key = self.hasher.hash_str(name);
		let slot = match self.locate(key, name) {
			Ok(slot) => slot,
			Err(slot) => {
				self.grow();
				self.keys.insert(slot, key);
				self.names.insert(slot, name.into());
				self.values.insert(slot, V::default());
				slot
			}
		};
		&mut self.values[slot]
	}

	/// Drops every entry, keeping the allocated capacity.
	pub fn reset(&mut self) {
		self.keys.clear();
		self.names.clear();
		self.values.clear();
	}

	/// Entries in slot order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
		self.names.iter().map(AsRef::as_ref).zip(self.values.iter())
	}

	/// Binary search over `(hash, name)`.
	///
	/// `range` counts the candidates left in the window starting at `base`. Moving up
	/// past the probe drops the probe and the lower half, which is `half` entries when the
	/// range is odd and `half - 1` when it is even.
	fn locate(&self, key: u32, name: &str) -> Result<usize, usize> {
		let mut base = 0;
		let mut range = self.keys.len();
		while range > 0 {
			let half = range / 2;
			let index = base + half;
			let probe = self.keys[index].cmp(&key).then_with(|| self.names[index].as_ref().cmp(name));
			match probe {
				Ordering::Equal => return Ok(index),
				Ordering::Less => {
					base = index + 1;
					range -= half + 1;
				}
				Ordering::Greater => range = half,
			}
		}
		Err(base)
	}

	fn grow(&mut self) {
		let len = self.keys.len();
		let capacity = self.keys.capacity();
		if len < capacity {
			return;
		}
		let target = (capacity * self.granularity).max(1);
		let additional = target - len;
		self.keys.reserve_exact(additional);
		self.names.reserve_exact(additional);
		self.values.reserve_exact(additional);
	}
}

impl<V: fmt::Debug, H> fmt::Debug for SortedIndex<V, H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.names.iter().zip(self.values.iter())).finish()
	}
}

impl<V: Clone, H: Clone> Clone for SortedIndex<V, H> {
	fn clone(&self) -> Self {
		Self {
			keys: self.keys.clone(),
			names: self.names.clone(),
			values: self.values.clone(),
			granularity: self.granularity,
			hasher: self.hasher.clone(),
		}
	}
}
