//! Named method sets attached to a class.

use std::sync::Arc;

use recall_invocation::{Compatibility, ErrorType, MethodCaller, MethodMapper, Parameters};
use recall_object::{AnyValue, Object, Parameter};

use crate::class::ClassRegistryItem;


/// An ordered list of method mappers registered together for one class.
///
/// Names may repeat: same-named mappers are overloads, and a call picks the one whose
/// adapter fits the parameters best.
#[derive(Debug, Clone, Default)]
pub struct ClassMethodsRegistryItem {
	mappers: Vec<MethodMapper>,
}

impl ClassMethodsRegistryItem {
	pub fn new(mappers: Vec<MethodMapper>) -> Self {
		Self { mappers }
	}

	pub fn len(&self) -> usize {
		self.mappers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.mappers.is_empty()
	}

	pub fn mappers(&self) -> &[MethodMapper] {
		&self.mappers
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.mappers.iter().map(MethodMapper::method_name)
	}

	/// Position of the first mapper named exactly `name`.
	pub fn find(&self, name: &str) -> Option<usize> {
		self.mappers.iter().position(|mapper| mapper.method_name() == name)
	}

	pub fn find_function(&self, name: &str) -> Option<Arc<dyn MethodCaller>> {
		self.find(name).and_then(|index| self.mappers[index].method_caller().cloned())
	}

	/// Calls the method `name` on `object`.
	///
	/// Returns `PARAMETERS_ERROR` for an empty name and `UNSUPPORTED_FEATURE` when no
	/// callable method has that name. Otherwise the chosen adapter's status is returned.
	pub fn call_function(&self, object: &mut dyn Object, name: &str, parameters: Parameters<'_>) -> ErrorType {
		if name.is_empty() {
			return ErrorType::PARAMETERS_ERROR;
		}
		match select(&self.mappers, name, &parameters) {
			Some(caller) => {
				tracing::trace!(method = name, parameters = parameters.kind(), "calling method");
				caller.call(object, parameters)
			}
			None => {
				let suggestion = closest(name, self.names());
				tracing::debug!(method = name, ?suggestion, "no such method");
				ErrorType::UNSUPPORTED_FEATURE
			}
		}
	}

	/// Calls `name` with `value` as its single argument, updating `value` when the
	/// method writes it back.
	pub fn call_function_value<V: Parameter>(&self, object: &mut dyn Object, name: &str, value: &mut V) -> ErrorType {
		let mut slot = value.to_value();
		let status = self.call_function(object, name, Parameters::Value(&mut slot));
		store_value(status, &slot, value)
	}

	/// Attaches the set to `class` and returns the shared handle.
	pub fn register(self, class: &ClassRegistryItem) -> Arc<Self> {
		let methods = Arc::new(self);
		class.add_methods(methods.clone());
		methods
	}
}

pub(crate) fn store_value<V: Parameter>(status: ErrorType, slot: &AnyValue, value: &mut V) -> ErrorType {
	if !status.is_ok() {
		return status;
	}
	match V::from_value(slot) {
		Ok(updated) => {
			*value = updated;
			status
		}
		Err(_) => status | ErrorType::PARAMETERS_ERROR,
	}
}

/// Picks the adapter for a call among mappers named `name`.
///
/// The first native match wins, then the first compatible one, then the first callable
/// mapper of that name. Mappers without an adapter are skipped.
pub(crate) fn select<'m>(mappers: impl IntoIterator<Item = &'m MethodMapper>, name: &str, parameters: &Parameters<'_>) -> Option<Arc<dyn MethodCaller>> {
	let mut first = None;
	let mut compatible = None;
	for caller in mappers.into_iter().filter(|mapper| mapper.method_name() == name).filter_map(MethodMapper::method_caller) {
		match caller.compatibility(parameters) {
			Compatibility::Native => return Some(caller.clone()),
			Compatibility::Compatible => {
				compatible.get_or_insert(caller);
			}
			Compatibility::Incompatible => {}
		}
		first.get_or_insert(caller);
	}
	compatible.or(first).cloned()
}

/// Closest candidate to `name` within edit distance 3.
pub(crate) fn closest<'a>(name: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
	candidates
		.min_by_key(|candidate| strsim::levenshtein(name, candidate))
		.filter(|candidate| strsim::levenshtein(name, candidate) <= 3)
}
