use std::marker::PhantomData;

use recall_object::{AnyValue, Object, Parameter, StructuredData};

use super::MethodCaller;
use crate::error::ErrorType;
use crate::parameters::{Compatibility, Parameters};

/// Argument tuple of a [`ValueCaller`].
///
/// Slot `k` is read from and written to the field `param<k>`.
pub trait ValueSlots: Sized + Send + Sync + 'static {
	const ARITY: usize;

	/// Reads every slot in order, stopping at the first field that is missing or does
	/// not convert. The error names that field.
	fn load(data: &dyn StructuredData) -> Result<Self, &'static str>;

	/// Writes back the slots whose mask nibble is set. Returns `false` if any write failed.
	fn store(&self, data: &dyn StructuredData, mask: u16) -> bool;

	/// The empty argument list, for arity zero.
	fn unit() -> Option<Self> {
		None
	}

	/// Builds a one-slot tuple from a bare value.
	fn load_single(_value: &AnyValue) -> Option<Self> {
		None
	}

	fn store_single(&self, _value: &mut AnyValue) {}
}

impl ValueSlots for () {
	const ARITY: usize = 0;

	fn load(_data: &dyn StructuredData) -> Result<Self, &'static str> {
		Ok(())
	}

	fn store(&self, _data: &dyn StructuredData, _mask: u16) -> bool {
		true
	}

	fn unit() -> Option<Self> {
		Some(())
	}
}

fn load_slot<V: Parameter>(data: &dyn StructuredData, field: &'static str) -> Result<V, &'static str> {
	data.read(field).and_then(|value| V::from_value(&value).ok()).ok_or(field)
}

macro_rules! value_slots {
	($arity:literal => $($ty:ident . $idx:tt : $field:literal << $shift:literal),+ $(; $($single:tt)*)?) => {
		impl<$($ty: Parameter),+> ValueSlots for ($($ty,)+) {
			const ARITY: usize = $arity;

			fn load(data: &dyn StructuredData) -> Result<Self, &'static str> {
				Ok(($(load_slot::<$ty>(data, $field)?,)+))
			}

			fn store(&self, data: &dyn StructuredData, mask: u16) -> bool {
				let mut stored = true;
				$(
					if mask & (0xF << $shift) != 0 {
						stored &= data.write($field, self.$idx.to_value());
					}
				)+
				stored
			}

			$($($single)*)?
		}
	};
}

value_slots!(1 => V1.0: "param1" << 12;
	fn load_single(value: &AnyValue) -> Option<Self> {
		V1::from_value(value).ok().map(|v| (v,))
	}

	fn store_single(&self, value: &mut AnyValue) {
		*value = self.0.to_value();
	}
);
value_slots!(2 => V1.0: "param1" << 12, V2.1: "param2" << 8);
value_slots!(3 => V1.0: "param1" << 12, V2.1: "param2" << 8, V3.2: "param3" << 4);
value_slots!(4 => V1.0: "param1" << 12, V2.1: "param2" << 8, V3.2: "param3" << 4, V4.3: "param4" << 0);

type ValueFn<T, A> = Box<dyn Fn(&mut T, &mut A) -> ErrorType + Send + Sync>;

/// Adapter for methods taking up to four value parameters.
pub struct ValueCaller<T, A> {
	function: ValueFn<T, A>,
	mask: u16,
	_class: PhantomData<fn(&mut T)>,
}

impl<T: Object, A: ValueSlots> ValueCaller<T, A> {
	pub fn new<F>(function: F, mask: u16) -> Self
	where
		F: Fn(&mut T, &mut A) -> ErrorType + Send + Sync + 'static,
	{
		Self {
			function: Box::new(function),
			mask,
			_class: PhantomData,
		}
	}

	fn call_with_data(&self, object: &mut T, data: &dyn StructuredData) -> ErrorType {
		let mut arguments = match A::load(data) {
			Ok(arguments) => arguments,
			Err(field) => {
				tracing::debug!(field, arity = A::ARITY, "method parameter missing or not convertible");
				return ErrorType::PARAMETERS_ERROR;
			}
		};
		let mut status = (self.function)(object, &mut arguments);
		if self.mask != 0 && !arguments.store(data, self.mask) {
			tracing::debug!(mask = self.mask, "failed to write back method parameters");
			status |= ErrorType::PARAMETERS_ERROR;
		}
		status
	}
}

impl<T: Object, A: ValueSlots> MethodCaller for ValueCaller<T, A> {
	fn call(&self, object: &mut dyn Object, parameters: Parameters<'_>) -> ErrorType {
		let Some(object) = object.downcast_mut::<T>() else {
			return ErrorType::UNSUPPORTED_FEATURE;
		};

		if let Some(mut unit) = A::unit() {
			return (self.function)(object, &mut unit);
		}

		match parameters {
			Parameters::Data(data) => self.call_with_data(object, data),
			Parameters::Container(container) => {
				let first = container.get(0);
				match first.as_structured_data() {
					Some(data) => self.call_with_data(object, data),
					None => ErrorType::PARAMETERS_ERROR,
				}
			}
			Parameters::Value(value) => {
				let Some(mut arguments) = A::load_single(value) else {
					return ErrorType::PARAMETERS_ERROR;
				};
				let status = (self.function)(object, &mut arguments);
				if self.mask != 0 {
					arguments.store_single(value);
				}
				status
			}
			Parameters::None | Parameters::Stream(_) => ErrorType::PARAMETERS_ERROR,
		}
	}

	fn compatibility(&self, parameters: &Parameters<'_>) -> Compatibility {
		match (A::ARITY, parameters) {
			(0, Parameters::None) => Compatibility::Native,
			(0, _) => Compatibility::Compatible,
			(1, Parameters::Value(_)) | (_, Parameters::Data(_)) => Compatibility::Native,
			(_, Parameters::Container(_)) => Compatibility::Compatible,
			_ => Compatibility::Incompatible,
		}
	}

	fn mask(&self) -> u16 {
		self.mask
	}

	fn arity(&self) -> usize {
		A::ARITY
	}
}
