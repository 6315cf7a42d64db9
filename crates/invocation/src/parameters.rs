use recall_object::{AnyValue, ReferenceContainer, Stream, StructuredData};

/// Argument source handed to a [`MethodCaller`](crate::MethodCaller).
pub enum Parameters<'a> {
	/// No arguments.
	None,
	/// Named fields `param1`..`param4`, or the store itself for structured-data methods.
	Data(&'a dyn StructuredData),
	/// A container passed through to container methods, or whose first element stands
	/// in for structured data or a stream.
	Container(&'a mut ReferenceContainer),
	Stream(&'a mut dyn Stream),
	/// A single value feeding the first argument slot directly.
	Value(&'a mut AnyValue),
}

impl Parameters<'_> {
	pub fn kind(&self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Data(_) => "structured data",
			Self::Container(_) => "reference container",
			Self::Stream(_) => "stream",
			Self::Value(_) => "value",
		}
	}
}

/// How well a caller fits a parameter shape, used to pick between overloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Compatibility {
	Incompatible,
	/// Accepted through a conversion such as taking a container's first element.
	Compatible,
	/// The shape the method was declared for.
	Native,
}
