use std::fmt;
use std::sync::Arc;

use crate::caller::MethodCaller;

mod macros;

#[cfg(test)]
mod tests;

/// A named method and the adapter that invokes it.
///
/// Methods whose parameter list has no adapter (raw pointers) map to a mapper without
/// a caller.
#[derive(Clone)]
pub struct MethodMapper {
	name: String,
	caller: Option<Arc<dyn MethodCaller>>,
}

impl MethodMapper {
	pub fn new(name: impl Into<String>, caller: impl MethodCaller + 'static) -> Self {
		Self {
			name: name.into(),
			caller: Some(Arc::new(caller)),
		}
	}

	pub fn unsupported(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			caller: None,
		}
	}

	pub fn method_name(&self) -> &str {
		&self.name
	}

	pub fn set_method_name(&mut self, name: impl Into<String>) {
		self.name = name.into();
	}

	pub fn method_caller(&self) -> Option<&Arc<dyn MethodCaller>> {
		self.caller.as_ref()
	}

	pub fn is_supported(&self) -> bool {
		self.caller.is_some()
	}
}

impl fmt::Debug for MethodMapper {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("MethodMapper");
		s.field("name", &self.name);
		match &self.caller {
			Some(caller) => s.field("arity", &caller.arity()).field("mask", &format_args!("{:#06x}", caller.mask())),
			None => s.field("caller", &"unsupported"),
		};
		s.finish()
	}
}
