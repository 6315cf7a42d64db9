//! Dynamically typed values exchanged through [`StructuredData`](crate::StructuredData).

use std::fmt;

#[cfg(test)]
mod tests;

/// A value stored in a structured-data leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyValue {
	Bool(bool),
	Int(i64),
	UInt(u64),
	Float(f64),
	String(String),
	Array(Vec<AnyValue>),
}

impl AnyValue {
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::UInt(_) => "uint",
			Self::Float(_) => "float",
			Self::String(_) => "string",
			Self::Array(_) => "array",
		}
	}

	/// Converts to `T`, see [`Parameter::from_value`].
	pub fn get<T: Parameter>(&self) -> Result<T, ValueError> {
		T::from_value(self)
	}
}

impl fmt::Display for AnyValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(v) => write!(f, "{v}"),
			Self::Int(v) => write!(f, "{v}"),
			Self::UInt(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v}"),
			Self::String(v) => f.write_str(v),
			Self::Array(items) => {
				f.write_str("{ ")?;
				for item in items {
					write!(f, "{item} ")?;
				}
				f.write_str("}")
			}
		}
	}
}

/// Conversion failures between [`AnyValue`] and concrete parameter types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
	#[error("cannot convert {found} value to {expected}")]
	TypeMismatch { expected: &'static str, found: &'static str },
	#[error("value {value} is out of range for {target}")]
	OutOfRange { value: String, target: &'static str },
	#[error("cannot parse {value:?} as {target}")]
	Parse { value: String, target: &'static str },
}

/// A type that can be carried in a method parameter slot.
pub trait Parameter: Clone + Send + Sync + 'static {
	fn from_value(value: &AnyValue) -> Result<Self, ValueError>;

	fn to_value(&self) -> AnyValue;
}

macro_rules! integer_parameter {
	($variant:ident($wide:ty): $($ty:ty),*) => {
		$(
			impl From<$ty> for AnyValue {
				fn from(value: $ty) -> Self {
					Self::$variant(<$wide>::from(value))
				}
			}

			impl Parameter for $ty {
				fn from_value(value: &AnyValue) -> Result<Self, ValueError> {
					let target = stringify!($ty);
					match value {
						AnyValue::Int(v) => <$ty>::try_from(*v).map_err(|_| ValueError::OutOfRange { value: v.to_string(), target }),
						AnyValue::UInt(v) => <$ty>::try_from(*v).map_err(|_| ValueError::OutOfRange { value: v.to_string(), target }),
						AnyValue::String(s) => s.trim().parse().map_err(|_| ValueError::Parse { value: s.clone(), target }),
						other => Err(ValueError::TypeMismatch { expected: target, found: other.kind() }),
					}
				}

				fn to_value(&self) -> AnyValue {
					AnyValue::from(*self)
				}
			}
		)*
	};
}

integer_parameter!(Int(i64): i8, i16, i32, i64);
integer_parameter!(UInt(u64): u8, u16, u32, u64);

macro_rules! float_parameter {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for AnyValue {
				fn from(value: $ty) -> Self {
					Self::Float(f64::from(value))
				}
			}

			impl Parameter for $ty {
				fn from_value(value: &AnyValue) -> Result<Self, ValueError> {
					let target = stringify!($ty);
					match value {
						AnyValue::Float(v) => Ok(*v as $ty),
						AnyValue::Int(v) => Ok(*v as $ty),
						AnyValue::UInt(v) => Ok(*v as $ty),
						AnyValue::String(s) => s.trim().parse().map_err(|_| ValueError::Parse { value: s.clone(), target }),
						other => Err(ValueError::TypeMismatch { expected: target, found: other.kind() }),
					}
				}

				fn to_value(&self) -> AnyValue {
					AnyValue::from(*self)
				}
			}
		)*
	};
}

float_parameter!(f32, f64);

impl From<bool> for AnyValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl Parameter for bool {
	fn from_value(value: &AnyValue) -> Result<Self, ValueError> {
		match value {
			AnyValue::Bool(v) => Ok(*v),
			AnyValue::String(s) => s.trim().parse().map_err(|_| ValueError::Parse { value: s.clone(), target: "bool" }),
			other => Err(ValueError::TypeMismatch { expected: "bool", found: other.kind() }),
		}
	}

	fn to_value(&self) -> AnyValue {
		AnyValue::Bool(*self)
	}
}

impl From<String> for AnyValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<&str> for AnyValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl Parameter for String {
	fn from_value(value: &AnyValue) -> Result<Self, ValueError> {
		match value {
			AnyValue::Array(_) => Err(ValueError::TypeMismatch { expected: "string", found: "array" }),
			AnyValue::String(s) => Ok(s.clone()),
			scalar => Ok(scalar.to_string()),
		}
	}

	fn to_value(&self) -> AnyValue {
		AnyValue::String(self.clone())
	}
}

impl<T: Into<AnyValue>> From<Vec<T>> for AnyValue {
	fn from(items: Vec<T>) -> Self {
		Self::Array(items.into_iter().map(Into::into).collect())
	}
}

impl<T: Parameter> Parameter for Vec<T> {
	fn from_value(value: &AnyValue) -> Result<Self, ValueError> {
		match value {
			AnyValue::Array(items) => items.iter().map(T::from_value).collect(),
			other => Err(ValueError::TypeMismatch { expected: "array", found: other.kind() }),
		}
	}

	fn to_value(&self) -> AnyValue {
		AnyValue::Array(self.iter().map(Parameter::to_value).collect())
	}
}
