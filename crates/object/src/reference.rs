use std::fmt;
use std::sync::Arc;

use crate::object::Object;
use crate::stream::StreamCell;
use crate::structured::StructuredData;

/// Nullable shared handle to an [`Object`].
#[derive(Clone, Default)]
pub struct Reference(Option<Arc<dyn Object>>);

impl Reference {
	pub fn new<T: Object>(object: T) -> Self {
		Self(Some(Arc::new(object)))
	}

	pub fn from_arc(object: Arc<dyn Object>) -> Self {
		Self(Some(object))
	}

	pub fn from_box(object: Box<dyn Object>) -> Self {
		Self(Some(Arc::from(object)))
	}

	pub const fn invalid() -> Self {
		Self(None)
	}

	pub fn is_valid(&self) -> bool {
		self.0.is_some()
	}

	pub fn get(&self) -> Option<&dyn Object> {
		self.0.as_deref()
	}

	/// Mutable access, available only while this handle is the sole owner.
	pub fn get_mut(&mut self) -> Option<&mut dyn Object> {
		Arc::get_mut(self.0.as_mut()?)
	}

	pub fn arc(&self) -> Option<&Arc<dyn Object>> {
		self.0.as_ref()
	}

	pub fn name(&self) -> Option<&str> {
		self.get().map(Object::name)
	}

	pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
		self.get()?.downcast_ref()
	}

	pub fn as_structured_data(&self) -> Option<&dyn StructuredData> {
		self.get()?.as_structured_data()
	}

	pub fn as_stream(&self) -> Option<&StreamCell> {
		self.get()?.as_stream()
	}

	/// Whether both handles point at the same object. Two invalid handles are equal.
	pub fn ptr_eq(&self, other: &Reference) -> bool {
		match (&self.0, &other.0) {
			(Some(a), Some(b)) => Arc::ptr_eq(a, b),
			(None, None) => true,
			_ => false,
		}
	}

	/// Number of handles sharing the object, zero when invalid.
	pub fn strong_count(&self) -> usize {
		self.0.as_ref().map_or(0, Arc::strong_count)
	}
}

impl<T: Object> From<Arc<T>> for Reference {
	fn from(object: Arc<T>) -> Self {
		Self(Some(object))
	}
}

impl fmt::Debug for Reference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.get() {
			Some(object) => f
				.debug_struct("Reference")
				.field("class", &object.class_name())
				.field("name", &object.name())
				.finish(),
			None => f.write_str("Reference(invalid)"),
		}
	}
}
