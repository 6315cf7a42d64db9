//! Runtime class registry.
//!
//! Every registered class is described by a [`ClassRegistryItem`]: its names, size,
//! version, an optional object builder, its introspection members and the method sets
//! attached to it. Method sets ([`ClassMethodsRegistryItem`]) dispatch calls by name
//! through [`MethodMapper`](recall_invocation::MethodMapper)s.
//!
//! Classes are usually registered at compile time with [`class_register!`],
//! [`class_method_register!`] and [`class_member_register!`], and collected into the
//! process-wide [`registry()`] on first use.

use std::sync::OnceLock;

use recall_config::RegistrySettings;

pub mod class;
pub mod database;
mod error;
pub mod methods;
pub mod registration;

pub use class::{ClassRegistryItem, InstanceGuard, IntrospectionEntry, LoadableLibrary, ObjectBuilder, TypeDescriptor};
pub use database::ClassRegistryDatabase;
pub use error::{RegistryError, Result};
#[doc(hidden)]
pub use inventory;
pub use methods::ClassMethodsRegistryItem;
#[doc(hidden)]
pub use recall_invocation;
#[doc(hidden)]
pub use recall_object;

static REGISTRY: OnceLock<ClassRegistryDatabase> = OnceLock::new();

/// Process-wide class database, filled from compile-time registrations on first use.
pub fn registry() -> &'static ClassRegistryDatabase {
	REGISTRY.get_or_init(|| ClassRegistryDatabase::from_inventory(RegistrySettings::default()))
}
