//! Type-erased method invocation.
//!
//! A registered method is stored as a [`MethodMapper`]: a name plus a [`MethodCaller`]
//! adapter that knows how to downcast the target [`Object`](recall_object::Object),
//! pull the method's arguments out of a [`Parameters`] source, invoke it, and write
//! modified arguments back. Mappers are produced by [`method_mapper!`] from a restated
//! parameter list, which picks the adapter and the write-back mask.

pub mod caller;
mod error;
mod mapper;
mod parameters;

pub use caller::{ContainerCaller, DataCaller, MethodCaller, StreamCaller, ValueCaller, ValueSlots};
pub use error::ErrorType;
pub use mapper::MethodMapper;
pub use parameters::{Compatibility, Parameters};
#[doc(hidden)]
pub use paste;
