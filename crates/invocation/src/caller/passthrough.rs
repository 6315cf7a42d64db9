//! Adapters that hand a parameter object straight to the method.

use recall_object::{Object, ReferenceContainer, Stream, StructuredData};

use super::MethodCaller;
use crate::error::ErrorType;
use crate::parameters::{Compatibility, Parameters};

type DataFn<T> = Box<dyn Fn(&mut T, &dyn StructuredData) -> ErrorType + Send + Sync>;

/// Adapter for `fn(&mut self, &dyn StructuredData)`.
pub struct DataCaller<T> {
	function: DataFn<T>,
}

impl<T: Object> DataCaller<T> {
	pub fn new<F>(function: F) -> Self
	where
		F: Fn(&mut T, &dyn StructuredData) -> ErrorType + Send + Sync + 'static,
	{
		Self {
			function: Box::new(function),
		}
	}
}

impl<T: Object> MethodCaller for DataCaller<T> {
	fn call(&self, object: &mut dyn Object, parameters: Parameters<'_>) -> ErrorType {
		let Some(object) = object.downcast_mut::<T>() else {
			return ErrorType::UNSUPPORTED_FEATURE;
		};
		match parameters {
			Parameters::Data(data) => (self.function)(object, data),
			Parameters::Container(container) => {
				let first = container.get(0);
				match first.as_structured_data() {
					Some(data) => (self.function)(object, data),
					None => ErrorType::PARAMETERS_ERROR,
				}
			}
			_ => ErrorType::PARAMETERS_ERROR,
		}
	}

	fn compatibility(&self, parameters: &Parameters<'_>) -> Compatibility {
		match parameters {
			Parameters::Data(_) => Compatibility::Native,
			Parameters::Container(_) => Compatibility::Compatible,
			_ => Compatibility::Incompatible,
		}
	}

	fn mask(&self) -> u16 {
		0
	}

	fn arity(&self) -> usize {
		1
	}
}

type ContainerFn<T> = Box<dyn Fn(&mut T, &mut ReferenceContainer) -> ErrorType + Send + Sync>;

/// Adapter for methods taking a [`ReferenceContainer`] by copy, reference or mutable
/// reference. The generated closure decides how the container is passed on.
pub struct ContainerCaller<T> {
	function: ContainerFn<T>,
	mask: u16,
}

impl<T: Object> ContainerCaller<T> {
	pub fn new<F>(function: F, mask: u16) -> Self
	where
		F: Fn(&mut T, &mut ReferenceContainer) -> ErrorType + Send + Sync + 'static,
	{
		Self {
			function: Box::new(function),
			mask,
		}
	}
}

impl<T: Object> MethodCaller for ContainerCaller<T> {
	fn call(&self, object: &mut dyn Object, parameters: Parameters<'_>) -> ErrorType {
		let Some(object) = object.downcast_mut::<T>() else {
			return ErrorType::UNSUPPORTED_FEATURE;
		};
		match parameters {
			Parameters::Container(container) => (self.function)(object, container),
			other => {
				tracing::debug!(parameters = other.kind(), "container method called without a container");
				ErrorType::PARAMETERS_ERROR
			}
		}
	}

	fn compatibility(&self, parameters: &Parameters<'_>) -> Compatibility {
		match parameters {
			Parameters::Container(_) => Compatibility::Native,
			_ => Compatibility::Incompatible,
		}
	}

	fn mask(&self) -> u16 {
		self.mask
	}

	fn arity(&self) -> usize {
		1
	}
}

type StreamFn<T> = Box<dyn Fn(&mut T, &mut dyn Stream) -> ErrorType + Send + Sync>;

/// Adapter for `fn(&mut self, &mut dyn Stream)`.
pub struct StreamCaller<T> {
	function: StreamFn<T>,
}

impl<T: Object> StreamCaller<T> {
	pub fn new<F>(function: F) -> Self
	where
		F: Fn(&mut T, &mut dyn Stream) -> ErrorType + Send + Sync + 'static,
	{
		Self {
			function: Box::new(function),
		}
	}
}

impl<T: Object> MethodCaller for StreamCaller<T> {
	fn call(&self, object: &mut dyn Object, parameters: Parameters<'_>) -> ErrorType {
		let Some(object) = object.downcast_mut::<T>() else {
			return ErrorType::UNSUPPORTED_FEATURE;
		};
		match parameters {
			Parameters::Stream(stream) => (self.function)(object, stream),
			Parameters::Container(container) => {
				let first = container.get(0);
				match first.as_stream() {
					Some(cell) => (self.function)(object, &mut *cell.lock()),
					None => ErrorType::PARAMETERS_ERROR,
				}
			}
			_ => ErrorType::PARAMETERS_ERROR,
		}
	}

	fn compatibility(&self, parameters: &Parameters<'_>) -> Compatibility {
		match parameters {
			Parameters::Stream(_) => Compatibility::Native,
			Parameters::Container(_) => Compatibility::Compatible,
			_ => Compatibility::Incompatible,
		}
	}

	fn mask(&self) -> u16 {
		0
	}

	fn arity(&self) -> usize {
		1
	}
}
