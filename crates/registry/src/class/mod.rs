//! Per-class registry entries.

use std::any::{TypeId, type_name};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::{Mutex, RwLock};
use recall_invocation::{ErrorType, MethodCaller, Parameters};
use recall_object::{Object, Parameter, short_type_name};

use crate::methods::{self, ClassMethodsRegistryItem};

mod library;


pub use library::LoadableLibrary;

/// Creates a default instance of a registered class.
pub type ObjectBuilder = fn() -> Box<dyn Object>;

/// Process-unique identifier handed to each class item on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeDescriptor(u32);

impl TypeDescriptor {
	fn next() -> Self {
		static NEXT: AtomicU32 = AtomicU32::new(1);
		Self(NEXT.fetch_add(1, Ordering::Relaxed))
	}

	pub fn as_u32(self) -> u32 {
		self.0
	}
}

/// Description of one field of a registered class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntrospectionEntry {
	pub member_name: &'static str,
	pub type_name: &'static str,
	/// Reference or pointer qualifier of the field type, empty for plain values.
	pub modifiers: &'static str,
	pub size: usize,
	pub offset: usize,
}

impl IntrospectionEntry {
	/// Entry for a field of `C`, typed through `field`.
	///
	/// `offset` normally comes from [`core::mem::offset_of!`].
	pub fn of<C, F>(member_name: &'static str, offset: usize, _field: fn(&C) -> &F) -> Self {
		let type_name = type_name::<F>();
		let modifiers = ["&mut ", "&", "*const ", "*mut "]
			.into_iter()
			.find(|prefix| type_name.starts_with(prefix))
			.map_or("", str::trim_end);
		Self {
			member_name,
			type_name,
			modifiers,
			size: size_of::<F>(),
			offset,
		}
	}
}

/// Registry entry of a single class.
pub struct ClassRegistryItem {
	class_name: &'static str,
	type_name: &'static str,
	type_id: TypeId,
	version: &'static str,
	size: usize,
	descriptor: TypeDescriptor,
	instances: AtomicU32,
	builder: Option<ObjectBuilder>,
	library: Mutex<Option<LoadableLibrary>>,
	methods: RwLock<Vec<Arc<ClassMethodsRegistryItem>>>,
	members: RwLock<Vec<IntrospectionEntry>>,
}

impl ClassRegistryItem {
	pub fn new<T: Object>(version: &'static str) -> Self {
		let type_name = type_name::<T>();
		Self {
			class_name: short_type_name(type_name),
			type_name,
			type_id: TypeId::of::<T>(),
			version,
			size: size_of::<T>(),
			descriptor: TypeDescriptor::next(),
			instances: AtomicU32::new(0),
			builder: None,
			library: Mutex::new(None),
			methods: RwLock::new(Vec::new()),
			members: RwLock::new(Vec::new()),
		}
	}

	pub fn with_builder(mut self, builder: ObjectBuilder) -> Self {
		self.builder = Some(builder);
		self
	}

	/// Unqualified type name, the name classes are looked up by.
	pub fn class_name(&self) -> &'static str {
		self.class_name
	}

	/// Fully qualified type name.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	pub fn version(&self) -> &'static str {
		self.version
	}

	pub fn size(&self) -> usize {
		self.size
	}

	pub fn descriptor(&self) -> TypeDescriptor {
		self.descriptor
	}

	pub fn increment_instances(&self) -> u32 {
		self.instances.fetch_add(1, Ordering::AcqRel) + 1
	}

	pub fn decrement_instances(&self) -> u32 {
		self.instances
			.fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| count.checked_sub(1))
			.map_or(0, |previous| previous - 1)
	}

	pub fn instances(&self) -> u32 {
		self.instances.load(Ordering::Acquire)
	}

	/// Counts one live instance until the returned guard is dropped.
	pub fn track(self: &Arc<Self>) -> InstanceGuard {
		self.increment_instances();
		InstanceGuard { class: self.clone() }
	}

	/// Hands the library this class was loaded from to the item. A previously held
	/// library is released.
	pub fn set_loadable_library(&self, library: LoadableLibrary) {
		*self.library.lock() = Some(library);
	}

	pub fn loadable_library_name(&self) -> Option<String> {
		self.library.lock().as_ref().map(|library| library.name().to_owned())
	}

	pub fn object_builder(&self) -> Option<ObjectBuilder> {
		self.builder
	}

	/// New instance named `name`, if the class has a builder.
	pub fn build_object(&self, name: &str) -> Option<Box<dyn Object>> {
		let mut object = (self.builder?)();
		object.set_name(name);
		tracing::trace!(class = self.class_name, name, "built object");
		Some(object)
	}

	pub fn add_methods(&self, methods: Arc<ClassMethodsRegistryItem>) {
		tracing::debug!(class = self.class_name, count = methods.len(), "registered methods");
		self.methods.write().push(methods);
	}

	/// Method sets in registration order.
	pub fn methods(&self) -> Vec<Arc<ClassMethodsRegistryItem>> {
		self.methods.read().clone()
	}

	/// Caller of the first method named `name` across all method sets.
	pub fn find_method(&self, name: &str) -> Option<Arc<dyn MethodCaller>> {
		self.methods.read().iter().find_map(|methods| methods.find_function(name))
	}

	/// Calls `name` on `object`, choosing among same-named methods of every method set.
	pub fn call_method(&self, object: &mut dyn Object, name: &str, parameters: Parameters<'_>) -> ErrorType {
		if name.is_empty() {
			return ErrorType::PARAMETERS_ERROR;
		}
		let selected = {
			let sets = self.methods.read();
			methods::select(sets.iter().flat_map(|set| set.mappers()), name, &parameters)
		};
		match selected {
			Some(caller) => caller.call(object, parameters),
			None => {
				tracing::debug!(class = self.class_name, method = name, "no such method");
				ErrorType::UNSUPPORTED_FEATURE
			}
		}
	}

	/// [`call_method`](Self::call_method) with a single typed argument.
	pub fn call_method_value<V: Parameter>(&self, object: &mut dyn Object, name: &str, value: &mut V) -> ErrorType {
		let mut slot = value.to_value();
		let status = self.call_method(object, name, Parameters::Value(&mut slot));
		methods::store_value(status, &slot, value)
	}

	pub fn add_member(&self, member: IntrospectionEntry) {
		self.members.write().push(member);
	}

	pub fn member(&self, index: usize) -> Option<IntrospectionEntry> {
		self.members.read().get(index).copied()
	}

	pub fn find_member(&self, name: &str) -> Option<IntrospectionEntry> {
		self.members.read().iter().find(|member| member.member_name == name).copied()
	}

	pub fn members_len(&self) -> usize {
		self.members.read().len()
	}
}

impl fmt::Debug for ClassRegistryItem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClassRegistryItem")
			.field("class_name", &self.class_name)
			.field("version", &self.version)
			.field("descriptor", &self.descriptor)
			.field("instances", &self.instances())
			.field("library", &self.loadable_library_name())
			.finish_non_exhaustive()
	}
}

/// Live-instance token returned by [`ClassRegistryItem::track`].
#[derive(Debug)]
pub struct InstanceGuard {
	class: Arc<ClassRegistryItem>,
}

impl InstanceGuard {
	pub fn class(&self) -> &Arc<ClassRegistryItem> {
		&self.class
	}
}

impl Drop for InstanceGuard {
	fn drop(&mut self) {
		self.class.decrement_instances();
	}
}
