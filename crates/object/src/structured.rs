//! Named-field key/value stores used as parameter sources and sinks.

use crate::reference::Reference;
use crate::value::{AnyValue, Parameter};

/// A hierarchical key/value store with a movable current node.
///
/// Reads and writes address leaves of the current node by name. Stores are shared
/// behind handles, so every operation takes `&self` and implementations synchronise
/// internally. Navigation is optional; the defaults report failure.
pub trait StructuredData: Send + Sync {
	/// Value of the leaf `name` in the current node.
	fn read(&self, name: &str) -> Option<AnyValue>;

	/// Creates or replaces the leaf `name` in the current node.
	fn write(&self, name: &str, value: AnyValue) -> bool;

	fn move_to_root(&self) -> bool {
		false
	}

	fn move_to_ancestor(&self, _generations: u32) -> bool {
		false
	}

	/// Moves to the node at dotted `path` from the root.
	fn move_absolute(&self, _path: &str) -> bool {
		false
	}

	/// Moves to the node at dotted `path` below the current node.
	fn move_relative(&self, _path: &str) -> bool {
		false
	}

	fn move_to_child(&self, _index: usize) -> bool {
		false
	}

	/// Creates every missing node along `path` from the root and moves there.
	fn create_absolute(&self, _path: &str) -> bool {
		false
	}

	/// Creates every missing node along `path` below the current node and moves there.
	fn create_relative(&self, _path: &str) -> bool {
		false
	}

	fn add_to_current_node(&self, _node: Reference) -> bool {
		false
	}

	/// Removes the child `name` of the current node.
	fn delete(&self, _name: &str) -> bool {
		false
	}

	fn node_name(&self) -> String {
		String::new()
	}

	fn child_name(&self, _index: usize) -> Option<String> {
		None
	}

	fn number_of_children(&self) -> usize {
		0
	}
}

/// Typed access on top of [`StructuredData`].
pub trait StructuredDataExt: StructuredData {
	/// Reads `name` and converts it. `None` when missing or not convertible.
	fn read_as<T: Parameter>(&self, name: &str) -> Option<T> {
		self.read(name).and_then(|value| T::from_value(&value).ok())
	}

	fn write_as<T: Parameter>(&self, name: &str, value: &T) -> bool {
		self.write(name, value.to_value())
	}
}

impl<D: StructuredData + ?Sized> StructuredDataExt for D {}
