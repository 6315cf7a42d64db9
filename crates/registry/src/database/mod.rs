//! Class registry database.

use std::any::TypeId;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use recall_config::RegistrySettings;
use recall_object::{Reference, ReferenceContainer, StructuredData, StructuredDataExt};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::class::{ClassRegistryItem, LoadableLibrary, TypeDescriptor};
use crate::error::{RegistryError, Result};
use crate::methods;
use crate::registration::{ClassRegistration, MembersRegistration, MethodsRegistration};

#[cfg(test)]
mod tests;

/// Name of the leaf holding the class of a configured object.
const CLASS_FIELD: &str = "Class";

#[derive(Default)]
struct Inner {
	items: Vec<Arc<ClassRegistryItem>>,
	by_name: FxHashMap<&'static str, usize>,
	by_type: FxHashMap<TypeId, usize>,
	/// Addresses of inventory submissions already processed.
	absorbed: FxHashSet<usize>,
}

impl Inner {
	fn add(&mut self, item: ClassRegistryItem) -> Result<Arc<ClassRegistryItem>> {
		let existing = self
			.by_type
			.get(&item.type_id())
			.or_else(|| self.by_name.get(item.class_name()))
			.map(|&index| &self.items[index]);
		if let Some(existing) = existing {
			tracing::warn!(class = item.class_name(), existing = existing.type_name(), "class already registered");
			return Err(RegistryError::DuplicateClass {
				class_name: item.class_name(),
				existing: existing.type_name(),
			});
		}

		let index = self.items.len();
		self.by_name.insert(item.class_name(), index);
		self.by_type.insert(item.type_id(), index);
		tracing::debug!(class = item.class_name(), version = item.version(), descriptor = item.descriptor().as_u32(), "registered class");
		let item = Arc::new(item);
		self.items.push(item.clone());
		Ok(item)
	}

	fn get_by_type(&self, type_id: TypeId) -> Option<&Arc<ClassRegistryItem>> {
		self.by_type.get(&type_id).map(|&index| &self.items[index])
	}

	fn first_visit<T>(&mut self, registration: &'static T) -> bool {
		self.absorbed.insert(std::ptr::from_ref(registration) as usize)
	}
}

/// Collection of class items, searchable by class name, type name and type.
pub struct ClassRegistryDatabase {
	settings: RegistrySettings,
	inner: RwLock<Inner>,
	/// Libraries that contributed no class of their own name.
	libraries: Mutex<Vec<LoadableLibrary>>,
}

impl Default for ClassRegistryDatabase {
	fn default() -> Self {
		Self::new()
	}
}

impl ClassRegistryDatabase {
	pub fn new() -> Self {
		Self::with_settings(RegistrySettings::default())
	}

	pub fn with_settings(settings: RegistrySettings) -> Self {
		Self {
			settings,
			inner: RwLock::new(Inner::default()),
			libraries: Mutex::new(Vec::new()),
		}
	}

	/// Database holding every compile-time registration linked into the process.
	pub fn from_inventory(settings: RegistrySettings) -> Self {
		let database = Self::with_settings(settings);
		database.absorb_inventory();
		database
	}

	pub fn settings(&self) -> &RegistrySettings {
		&self.settings
	}

	/// Takes in registrations submitted since the last call and returns how many
	/// classes were added.
	///
	/// Method sets and members are attached to their class. Submissions for classes
	/// that are not registered are skipped.
	pub fn absorb_inventory(&self) -> usize {
		let mut inner = self.inner.write();
		let mut added = 0;

		for registration in inventory::iter::<ClassRegistration> {
			if inner.first_visit(registration) && inner.add((registration.item)()).is_ok() {
				added += 1;
			}
		}

		for registration in inventory::iter::<MethodsRegistration> {
			if !inner.first_visit(registration) {
				continue;
			}
			match inner.get_by_type((registration.class)()) {
				Some(class) => {
					(registration.methods)().register(class);
				}
				None => tracing::warn!("method registration for an unregistered class"),
			}
		}

		for registration in inventory::iter::<MembersRegistration> {
			if !inner.first_visit(registration) {
				continue;
			}
			match inner.get_by_type((registration.class)()) {
				Some(class) => (registration.members)().into_iter().for_each(|member| class.add_member(member)),
				None => tracing::warn!("member registration for an unregistered class"),
			}
		}

		added
	}

	/// Adds a class. Fails when its type or class name is already registered.
	pub fn add(&self, item: ClassRegistryItem) -> Result<Arc<ClassRegistryItem>> {
		self.inner.write().add(item)
	}

	pub fn len(&self) -> usize {
		self.inner.read().items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Class at registration position `index`.
	pub fn get(&self, index: usize) -> Option<Arc<ClassRegistryItem>> {
		self.inner.read().items.get(index).cloned()
	}

	pub fn class_names(&self) -> Vec<&'static str> {
		self.inner.read().items.iter().map(|item| item.class_name()).collect()
	}

	/// Looks a class up by class name, then by full type name.
	///
	/// A `library::Class` name that matches neither loads `library` when dynamic
	/// loading is enabled, and the class is searched again among the registrations the
	/// library brought in.
	pub fn find(&self, name: &str) -> Option<Arc<ClassRegistryItem>> {
		if let Some(item) = self.find_registered(name) {
			return Some(item);
		}
		let (library, class) = name.rsplit_once("::")?;
		if !self.settings.dynamic_loading || library.is_empty() {
			return None;
		}
		match self.load_library(library, class) {
			Ok(item) => item,
			Err(error) => {
				tracing::warn!(%error, "dynamic class lookup failed");
				None
			}
		}
	}

	/// [`find`](Self::find), reporting a miss as [`RegistryError::UnknownClass`].
	pub fn resolve(&self, name: &str) -> Result<Arc<ClassRegistryItem>> {
		self.find(name).ok_or_else(|| RegistryError::UnknownClass {
			name: name.to_owned(),
			suggestion: self.suggest(name),
		})
	}

	pub fn find_type<T: 'static>(&self) -> Option<Arc<ClassRegistryItem>> {
		self.find_by_type_id(TypeId::of::<T>())
	}

	pub fn find_by_type_id(&self, type_id: TypeId) -> Option<Arc<ClassRegistryItem>> {
		self.inner.read().get_by_type(type_id).cloned()
	}

	pub fn find_by_descriptor(&self, descriptor: TypeDescriptor) -> Option<Arc<ClassRegistryItem>> {
		self.inner.read().items.iter().find(|item| item.descriptor() == descriptor).cloned()
	}

	/// Closest registered class name to `name`.
	pub fn suggest(&self, name: &str) -> Option<String> {
		let inner = self.inner.read();
		methods::closest(name, inner.items.iter().map(|item| item.class_name())).map(str::to_owned)
	}

	/// New object of class `class` named `name`.
	pub fn build_object(&self, class: &str, name: &str) -> Result<Reference> {
		let item = self.resolve(class)?;
		let object = item.build_object(name).ok_or(RegistryError::NoBuilder(item.class_name()))?;
		Ok(Reference::from_box(object))
	}

	/// Builds the objects described under the cursor of `data`.
	///
	/// Every child node whose name starts with `+` describes one object: its `Class`
	/// leaf names the class and the node itself is handed to
	/// [`Object::initialise`](recall_object::Object::initialise). Objects are named
	/// after their node without the `+`. The cursor is left where it was.
	pub fn initialise_container(&self, data: &dyn StructuredData) -> Result<ReferenceContainer> {
		let mut container = ReferenceContainer::new(data.node_name());
		for index in 0..data.number_of_children() {
			let Some(child) = data.child_name(index) else {
				continue;
			};
			let Some(name) = child.strip_prefix('+') else {
				continue;
			};
			if !data.move_to_child(index) {
				return Err(RegistryError::MissingClass(name.to_owned()));
			}
			let built = self.build_configured(data, name);
			data.move_to_ancestor(1);
			if !container.insert(built?) {
				return Err(RegistryError::DuplicateObject(name.to_owned()));
			}
		}
		tracing::debug!(node = %data.node_name(), objects = container.len(), "initialised container");
		Ok(container)
	}

	fn build_configured(&self, data: &dyn StructuredData, name: &str) -> Result<Reference> {
		let class = data.read_as::<String>(CLASS_FIELD).ok_or_else(|| RegistryError::MissingClass(name.to_owned()))?;
		let item = self.resolve(&class)?;
		let mut object = item.build_object(name).ok_or(RegistryError::NoBuilder(item.class_name()))?;
		if !object.initialise(data) {
			return Err(RegistryError::Initialisation {
				name: name.to_owned(),
				class_name: item.class_name(),
			});
		}
		Ok(Reference::from_box(object))
	}

	fn find_registered(&self, name: &str) -> Option<Arc<ClassRegistryItem>> {
		let inner = self.inner.read();
		match inner.by_name.get(name) {
			Some(&index) => Some(inner.items[index].clone()),
			None => inner.items.iter().find(|item| item.type_name() == name).cloned(),
		}
	}

	fn load_library(&self, library: &str, class: &str) -> Result<Option<Arc<ClassRegistryItem>>> {
		let loaded = LoadableLibrary::open(library)?;
		let added = self.absorb_inventory();
		let item = self.find_registered(class);
		tracing::debug!(library, class, added, found = item.is_some(), "loaded class library");
		match &item {
			Some(item) if item.loadable_library_name().is_none() => item.set_loadable_library(loaded),
			_ => self.libraries.lock().push(loaded),
		}
		Ok(item)
	}
}
