//! Tree-backed [`StructuredData`] with a movable cursor.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use recall_object::{AnyValue, Object, Reference, StructuredData};

use crate::error::{ConfigError, Result};
use crate::node::{ConfigLeaf, ConfigNode};
use crate::settings::Settings;


/// A configuration tree plus the node that reads and writes currently address.
pub struct ConfigurationDatabase {
	name: String,
	settings: Settings,
	root: Arc<ConfigNode>,
	current: RwLock<Arc<ConfigNode>>,
}

impl Default for ConfigurationDatabase {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigurationDatabase {
	pub fn new() -> Self {
		Self::with_settings(Settings::default())
	}

	pub fn with_settings(settings: Settings) -> Self {
		let root = ConfigNode::with_settings("", &settings);
		Self {
			name: String::new(),
			settings,
			current: RwLock::new(root.clone()),
			root,
		}
	}

	/// Builds a database from TOML text. Tables become nodes, everything else leaves.
	pub fn from_toml_str(text: &str) -> Result<Self> {
		Self::from_toml_str_with(text, Settings::default())
	}

	pub fn from_toml_str_with(text: &str, settings: Settings) -> Result<Self> {
		let table: toml::Table = toml::from_str(text)?;
		let database = Self::with_settings(settings);
		database.populate(&database.root, &table, "")?;
		Ok(database)
	}

	pub fn load(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let database = Self::from_toml_str(&text)?;
		tracing::debug!(path = %path.display(), children = database.root.size(), "loaded configuration");
		Ok(database)
	}

	pub fn root(&self) -> &Arc<ConfigNode> {
		&self.root
	}

	pub fn current(&self) -> Arc<ConfigNode> {
		self.current.read().clone()
	}

	fn populate(&self, node: &ConfigNode, table: &toml::Table, path: &str) -> Result<()> {
		for (key, value) in table {
			let child_path = if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
			let child = match value {
				toml::Value::Table(table) => {
					let child = ConfigNode::with_settings(key.as_str(), &self.settings);
					self.populate(&child, table, &child_path)?;
					Reference::from(child)
				}
				value => Reference::new(ConfigLeaf::new(key.as_str(), toml_to_value(value, &child_path)?)),
			};
			node.insert(child, false);
		}
		Ok(())
	}

	fn set_current(&self, node: Arc<ConfigNode>) {
		*self.current.write() = node;
	}

	fn resolve_node(start: &ConfigNode, path: &str) -> Option<Arc<ConfigNode>> {
		start.find(path).downcast_ref::<ConfigNode>().and_then(ConfigNode::arc)
	}

	fn create_from(&self, start: Arc<ConfigNode>, path: &str) -> bool {
		let mut node = start;
		let mut created = false;
		for segment in path.split('.').filter(|segment| !segment.is_empty()) {
			let existing = node.find_leaf(segment);
			let next = if existing.is_valid() {
				match existing.downcast_ref::<ConfigNode>().and_then(ConfigNode::arc) {
					Some(next) => next,
					None => return false,
				}
			} else {
				let next = ConfigNode::with_settings(segment, &self.settings);
				if !node.insert(Reference::from(next.clone()), true) {
					return false;
				}
				created = true;
				next
			};
			node = next;
		}
		if created {
			self.set_current(node);
		}
		created
	}
}

fn toml_to_value(value: &toml::Value, path: &str) -> Result<AnyValue> {
	Ok(match value {
		toml::Value::String(s) => AnyValue::String(s.clone()),
		toml::Value::Integer(i) => AnyValue::Int(*i),
		toml::Value::Float(f) => AnyValue::Float(*f),
		toml::Value::Boolean(b) => AnyValue::Bool(*b),
		toml::Value::Datetime(dt) => AnyValue::String(dt.to_string()),
		toml::Value::Array(items) => AnyValue::Array(items.iter().map(|item| toml_to_value(item, path)).collect::<Result<_>>()?),
		toml::Value::Table(_) => {
			return Err(ConfigError::Unsupported {
				path: path.to_owned(),
				kind: "nested table",
			});
		}
	})
}

impl Object for ConfigurationDatabase {
	fn name(&self) -> &str {
		&self.name
	}

	fn set_name(&mut self, name: &str) {
		self.name = name.to_owned();
	}

	fn as_structured_data(&self) -> Option<&dyn StructuredData> {
		Some(self)
	}
}

impl StructuredData for ConfigurationDatabase {
	fn read(&self, name: &str) -> Option<AnyValue> {
		self.current().find_leaf(name).downcast_ref::<ConfigLeaf>().map(ConfigLeaf::value)
	}

	fn write(&self, name: &str, value: AnyValue) -> bool {
		let current = self.current();
		let existing = current.find_leaf(name);
		if existing.is_valid() {
			return match existing.downcast_ref::<ConfigLeaf>() {
				Some(leaf) => {
					leaf.set_value(value);
					true
				}
				None => false,
			};
		}
		current.insert(Reference::new(ConfigLeaf::new(name, value)), true)
	}

	fn move_to_root(&self) -> bool {
		self.set_current(self.root.clone());
		true
	}

	fn move_to_ancestor(&self, generations: u32) -> bool {
		let mut node = self.current();
		for _ in 0..generations {
			match node.parent() {
				Some(parent) => node = parent,
				None => return false,
			}
		}
		self.set_current(node);
		true
	}

	fn move_absolute(&self, path: &str) -> bool {
		match Self::resolve_node(&self.root, path) {
			Some(node) => {
				self.set_current(node);
				true
			}
			None => false,
		}
	}

	fn move_relative(&self, path: &str) -> bool {
		match Self::resolve_node(&self.current(), path) {
			Some(node) => {
				self.set_current(node);
				true
			}
			None => false,
		}
	}

	fn move_to_child(&self, index: usize) -> bool {
		match self.current().get(index).downcast_ref::<ConfigNode>().and_then(ConfigNode::arc) {
			Some(node) => {
				self.set_current(node);
				true
			}
			None => false,
		}
	}

	fn create_absolute(&self, path: &str) -> bool {
		self.create_from(self.root.clone(), path)
	}

	fn create_relative(&self, path: &str) -> bool {
		self.create_from(self.current(), path)
	}

	fn add_to_current_node(&self, node: Reference) -> bool {
		self.current().insert(node, true)
	}

	fn delete(&self, name: &str) -> bool {
		let current = self.current();
		let child = current.find_leaf(name);
		child.is_valid() && current.delete(&child)
	}

	fn node_name(&self) -> String {
		self.current().name().to_owned()
	}

	fn child_name(&self, index: usize) -> Option<String> {
		self.current().child_name(index)
	}

	fn number_of_children(&self) -> usize {
		self.current().size()
	}
}
