//! Contracts shared by the method-dispatch core.
//!
//! * [`Object`]: a named, type-erased instance that registered methods are invoked on.
//! * [`Reference`] and [`ReferenceContainer`]: shared handles and ordered handle lists.
//! * [`StructuredData`]: a named-field store that parameters are read from and written to.
//! * [`Stream`]: a seekable byte stream.

pub mod container;
pub mod object;
pub mod reference;
pub mod stream;
pub mod structured;
pub mod value;

pub use container::ReferenceContainer;
pub use object::{Object, short_type_name};
pub use reference::Reference;
pub use stream::{SharedStream, Stream, StreamCell, StreamString};
pub use structured::{StructuredData, StructuredDataExt};
pub use value::{AnyValue, Parameter, ValueError};
