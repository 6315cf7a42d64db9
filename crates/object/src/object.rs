//! The [`Object`] trait and its downcasting helpers.

use std::any::Any;

use crate::stream::StreamCell;
use crate::structured::StructuredData;

/// A named instance that can be stored behind a [`Reference`](crate::Reference) and have
/// registered methods invoked on it.
pub trait Object: Any + Send + Sync {
	fn name(&self) -> &str;

	fn set_name(&mut self, name: &str);

	/// Unqualified name of the concrete type.
	fn class_name(&self) -> &'static str {
		short_type_name(std::any::type_name::<Self>())
	}

	/// The structured-data view of this object, if it has one.
	fn as_structured_data(&self) -> Option<&dyn StructuredData> {
		None
	}

	/// The stream wrapped by this object, if it has one.
	fn as_stream(&self) -> Option<&StreamCell> {
		None
	}

	/// Configures the object from its configuration node. Returns `false` on rejection.
	fn initialise(&mut self, _data: &dyn StructuredData) -> bool {
		true
	}
}

/// Last path segment of a type name, without generic arguments.
pub fn short_type_name(full: &'static str) -> &'static str {
	let base = full.split('<').next().unwrap_or(full);
	base.rsplit("::").next().unwrap_or(base)
}

impl dyn Object {
	pub fn is<T: Object>(&self) -> bool {
		let any: &dyn Any = self;
		any.is::<T>()
	}

	pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
		let any: &dyn Any = self;
		any.downcast_ref()
	}

	pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
		let any: &mut dyn Any = self;
		any.downcast_mut()
	}
}

/// Implements [`Object`] for a type with a `name: String` field.
///
/// Extra trait items can follow in braces:
///
/// ```ignore
/// impl_object!(Sensor {
/// 	fn initialise(&mut self, data: &dyn StructuredData) -> bool { ... }
/// });
/// ```
#[macro_export]
macro_rules! impl_object {
	($ty:ty $({ $($body:tt)* })?) => {
		impl $crate::Object for $ty {
			fn name(&self) -> &str {
				&self.name
			}

			fn set_name(&mut self, name: &str) {
				self.name = name.to_owned();
			}

			$($($body)*)?
		}
	};
}
