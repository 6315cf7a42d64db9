//! Configuration tree nodes.
//!
//! A [`ConfigNode`] owns shared handles to its children and keeps a [`SortedIndex`]
//! from child name to position in the child array. The link to the parent is a
//! [`Weak`], so a tree never keeps itself alive.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use recall_index::SortedIndex;
use recall_object::{AnyValue, Object, Reference};

use crate::settings::Settings;


/// Named value stored in a configuration tree.
pub struct ConfigLeaf {
	name: String,
	value: RwLock<AnyValue>,
}

impl ConfigLeaf {
	pub fn new(name: impl Into<String>, value: impl Into<AnyValue>) -> Self {
		Self {
			name: name.into(),
			value: RwLock::new(value.into()),
		}
	}

	pub fn value(&self) -> AnyValue {
		self.value.read().clone()
	}

	pub fn set_value(&self, value: AnyValue) {
		*self.value.write() = value;
	}
}

recall_object::impl_object!(ConfigLeaf);

impl fmt::Debug for ConfigLeaf {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ConfigLeaf").field("name", &self.name).field("value", &*self.value.read()).finish()
	}
}

struct NodeInner {
	children: Vec<Reference>,
	/// Logical capacity of `children`, grown and shrunk by `granularity`.
	capacity: usize,
	granularity: usize,
	index: SortedIndex<usize>,
	parent: Weak<ConfigNode>,
}

impl NodeInner {
	fn rebuild_index(&mut self) {
		self.index.reset();
		for (position, child) in self.children.iter().enumerate() {
			if let Some(name) = child.name() {
				self.index.insert(name, position);
			}
		}
	}

	fn position(&self, name: &str) -> Option<usize> {
		self.index.get_by_name(name).copied()
	}
}

/// Sub-tree node of a configuration tree.
pub struct ConfigNode {
	name: String,
	this: Weak<ConfigNode>,
	inner: RwLock<NodeInner>,
}

impl ConfigNode {
	pub fn new(name: impl Into<String>) -> Arc<Self> {
		Self::with_settings(name, &Settings::default())
	}

	/// Node whose child array and child index grow by the configured granularities.
	pub fn with_settings(name: impl Into<String>, settings: &Settings) -> Arc<Self> {
		let name = name.into();
		Arc::new_cyclic(|this| Self {
			name,
			this: this.clone(),
			inner: RwLock::new(NodeInner {
				children: Vec::new(),
				capacity: 0,
				granularity: settings.tree.granularity.max(2),
				index: SortedIndex::with_granularity(settings.index.granularity),
				parent: Weak::new(),
			}),
		})
	}

	/// Owning handle to this node, if it is still alive.
	pub fn arc(&self) -> Option<Arc<ConfigNode>> {
		self.this.upgrade()
	}

	pub fn size(&self) -> usize {
		self.inner.read().children.len()
	}

	pub fn is_empty(&self) -> bool {
		self.size() == 0
	}

	pub fn capacity(&self) -> usize {
		self.inner.read().capacity
	}

	/// Child at `index`, or an invalid handle.
	pub fn get(&self, index: usize) -> Reference {
		self.inner.read().children.get(index).cloned().unwrap_or_default()
	}

	pub fn child_name(&self, index: usize) -> Option<String> {
		self.inner.read().children.get(index).and_then(|child| child.name().map(str::to_owned))
	}

	/// Snapshot of the children in insertion order.
	pub fn children(&self) -> Vec<Reference> {
		self.inner.read().children.clone()
	}

	/// Adds `reference` as a child named after its object.
	///
	/// When a child of that name already exists the insert fails if `fail_if_exists`
	/// is set, and otherwise replaces the child in its slot. Sub-tree children get
	/// this node as their parent.
	pub fn insert(&self, reference: Reference, fail_if_exists: bool) -> bool {
		let Some(name) = reference.name().map(str::to_owned) else {
			return false;
		};

		let replaced = {
			let mut guard = self.inner.write();
			let inner = &mut *guard;
			match inner.position(&name) {
				Some(_) if fail_if_exists => return false,
				Some(position) => Some(std::mem::replace(&mut inner.children[position], reference.clone())),
				None => {
					if inner.children.len() >= inner.capacity {
						let capacity = (inner.capacity * inner.granularity).max(1);
						inner.children.reserve_exact(capacity - inner.children.len());
						inner.capacity = capacity;
					}
					inner.index.insert(&name, inner.children.len());
					inner.children.push(reference.clone());
					None
				}
			}
		};

		if let Some(old) = replaced.filter(|old| !old.ptr_eq(&reference))
			&& let Some(node) = old.downcast_ref::<ConfigNode>()
		{
			node.set_parent(None);
		}
		if let Some(node) = reference.downcast_ref::<ConfigNode>() {
			node.set_parent(Some(self));
		}
		true
	}

	/// Resolves a dot-separated path.
	///
	/// The first segment is looked up in this node. Remaining segments are resolved in
	/// that child when it is a sub-tree node; a leaf child is returned as is.
	pub fn find(&self, path: &str) -> Reference {
		let path = path.trim_start_matches('.');
		let (head, rest) = path.split_once('.').unwrap_or((path, ""));
		let child = self.find_leaf(head);
		if rest.trim_matches('.').is_empty() {
			return child;
		}
		match child.downcast_ref::<ConfigNode>() {
			Some(node) => node.find(rest),
			None => child,
		}
	}

	/// Direct child named `name`.
	pub fn find_leaf(&self, name: &str) -> Reference {
		if name.is_empty() {
			return Reference::invalid();
		}
		let inner = self.inner.read();
		inner.position(name).map(|position| inner.children[position].clone()).unwrap_or_default()
	}

	/// Removes the child carrying `reference`'s name.
	///
	/// The child array shrinks once usage drops below `capacity / granularity` and the
	/// index is rebuilt. A removed sub-tree is detached and purged.
	pub fn delete(&self, reference: &Reference) -> bool {
		let Some(name) = reference.name() else {
			return false;
		};

		let removed = {
			let mut guard = self.inner.write();
			let inner = &mut *guard;
			let Some(position) = inner.position(name) else {
				return false;
			};
			let removed = inner.children.remove(position);
			let threshold = inner.capacity / inner.granularity;
			if inner.children.len() < threshold {
				inner.capacity = threshold;
				inner.children.shrink_to(threshold);
			}
			inner.rebuild_index();
			removed
		};

		if let Some(node) = removed.downcast_ref::<ConfigNode>() {
			node.purge();
		}
		tracing::trace!(node = %self.name, child = %name, "deleted configuration child");
		true
	}

	/// Detaches from the parent, then empties this node and every sub-tree below it.
	pub fn purge(&self) {
		self.set_parent(None);
		let children = {
			let mut guard = self.inner.write();
			let inner = &mut *guard;
			inner.index.reset();
			inner.capacity = 0;
			std::mem::take(&mut inner.children)
		};
		for child in children {
			if let Some(node) = child.downcast_ref::<ConfigNode>() {
				node.purge();
			}
		}
	}

	pub fn parent(&self) -> Option<Arc<ConfigNode>> {
		self.inner.read().parent.upgrade()
	}

	pub fn set_parent(&self, parent: Option<&ConfigNode>) {
		self.inner.write().parent = parent.map_or_else(Weak::new, |parent| parent.this.clone());
	}

	/// Dot-separated path from the root of the tree, excluding the root's own name.
	pub fn full_path(&self) -> String {
		let mut segments = Vec::new();
		let mut node = self.arc();
		while let Some(current) = node {
			let parent = current.parent();
			if parent.is_some() {
				segments.push(current.name.clone());
			}
			node = parent;
		}
		segments.reverse();
		segments.join(".")
	}
}

recall_object::impl_object!(ConfigNode);

impl fmt::Debug for ConfigNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let inner = self.inner.read();
		f.debug_struct("ConfigNode")
			.field("name", &self.name)
			.field("children", &inner.children)
			.field("capacity", &inner.capacity)
			.finish()
	}
}
