//! Method-call adapters.
//!
//! Each adapter stores one method of one class as a closure and implements
//! [`MethodCaller`] for it. Which adapter a method gets depends on its parameter list:
//!
//! * [`ValueCaller`]: zero to four value slots, each by copy, by reference or by
//!   mutable reference.
//! * [`DataCaller`]: a single `&dyn StructuredData`.
//! * [`ContainerCaller`]: a single [`ReferenceContainer`](recall_object::ReferenceContainer),
//!   by copy, reference or mutable reference.
//! * [`StreamCaller`]: a single `&mut dyn Stream`.

use recall_object::Object;

use crate::error::ErrorType;
use crate::parameters::{Compatibility, Parameters};

mod passthrough;
mod value;


pub use passthrough::{ContainerCaller, DataCaller, StreamCaller};
pub use value::{ValueCaller, ValueSlots};

/// Uniform entry point for a stored method.
pub trait MethodCaller: Send + Sync {
	/// Invokes the stored method on `object`.
	///
	/// Returns `UNSUPPORTED_FEATURE` when `object` is not of the method's class and
	/// `PARAMETERS_ERROR` when the arguments cannot be extracted or stored back.
	/// Otherwise returns the method's own status.
	fn call(&self, object: &mut dyn Object, parameters: Parameters<'_>) -> ErrorType;

	/// How `parameters` would be accepted, without invoking anything.
	fn compatibility(&self, parameters: &Parameters<'_>) -> Compatibility;

	/// Write-back flags, one nibble per slot with slot 1 in the top nibble.
	fn mask(&self) -> u16;

	/// Number of declared parameters.
	fn arity(&self) -> usize;
}
