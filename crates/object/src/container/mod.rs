//! Ordered list of named [`Reference`]s.

use crate::reference::Reference;


#[derive(Debug, Clone)]
struct Entry {
	name: String,
	reference: Reference,
}

/// Ordered collection of handles addressable by position or by name.
///
/// Entries are named after their object at insertion time unless an explicit name is
/// given. Named lookups accept dotted paths that descend into nested containers.
#[derive(Debug, Clone, Default)]
pub struct ReferenceContainer {
	name: String,
	entries: Vec<Entry>,
}

crate::impl_object!(ReferenceContainer);

impl ReferenceContainer {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			entries: Vec::new(),
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Handle at `index`, or an invalid handle when out of range.
	pub fn get(&self, index: usize) -> Reference {
		self.entries.get(index).map(|entry| entry.reference.clone()).unwrap_or_default()
	}

	/// Handle at the dotted `path`, or an invalid handle when any segment is missing.
	pub fn find(&self, path: &str) -> Reference {
		let (head, rest) = match path.split_once('.') {
			Some((head, rest)) => (head, Some(rest)),
			None => (path, None),
		};
		let Some(entry) = self.entries.iter().find(|entry| !head.is_empty() && entry.name == head) else {
			return Reference::invalid();
		};
		match rest {
			Some(rest) => entry
				.reference
				.downcast_ref::<ReferenceContainer>()
				.map(|nested| nested.find(rest))
				.unwrap_or_default(),
			None => entry.reference.clone(),
		}
	}

	/// Appends `reference` under its object's name.
	///
	/// Fails for invalid handles and for names already present.
	pub fn insert(&mut self, reference: Reference) -> bool {
		let Some(name) = reference.name().map(str::to_owned) else {
			return false;
		};
		self.insert_named(name, reference)
	}

	/// Appends `reference` under `name`. Unnamed entries never clash.
	pub fn insert_named(&mut self, name: impl Into<String>, reference: Reference) -> bool {
		let name = name.into();
		if !reference.is_valid() || (!name.is_empty() && self.position(&name).is_some()) {
			return false;
		}
		self.entries.push(Entry { name, reference });
		true
	}

	/// Inserts `reference` at `index` under its object's name.
	pub fn insert_at(&mut self, index: usize, reference: Reference) -> bool {
		let Some(name) = reference.name().map(str::to_owned) else {
			return false;
		};
		if index > self.entries.len() || (!name.is_empty() && self.position(&name).is_some()) {
			return false;
		}
		self.entries.insert(index, Entry { name, reference });
		true
	}

	/// Removes the entry holding the same object as `reference`.
	pub fn delete(&mut self, reference: &Reference) -> bool {
		match self.entries.iter().position(|entry| entry.reference.ptr_eq(reference)) {
			Some(index) => {
				self.entries.remove(index);
				true
			}
			None => false,
		}
	}

	pub fn delete_named(&mut self, name: &str) -> bool {
		match self.position(name) {
			Some(index) => {
				self.entries.remove(index);
				true
			}
			None => false,
		}
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// Entry name at `index`.
	pub fn entry_name(&self, index: usize) -> Option<&str> {
		self.entries.get(index).map(|entry| entry.name.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Reference)> {
		self.entries.iter().map(|entry| (entry.name.as_str(), &entry.reference))
	}

	fn position(&self, name: &str) -> Option<usize> {
		self.entries.iter().position(|entry| entry.name == name)
	}
}
