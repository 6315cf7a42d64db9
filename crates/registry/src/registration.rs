//! Compile-time registrations collected by [`ClassRegistryDatabase::absorb_inventory`](crate::ClassRegistryDatabase::absorb_inventory).

use std::any::TypeId;

use crate::class::{ClassRegistryItem, IntrospectionEntry};
use crate::methods::ClassMethodsRegistryItem;

/// A class submitted by [`class_register!`](crate::class_register).
pub struct ClassRegistration {
	pub item: fn() -> ClassRegistryItem,
}

inventory::collect!(ClassRegistration);

/// A method set submitted by [`class_method_register!`](crate::class_method_register).
pub struct MethodsRegistration {
	pub class: fn() -> TypeId,
	pub methods: fn() -> ClassMethodsRegistryItem,
}

inventory::collect!(MethodsRegistration);

/// Field descriptions submitted by [`class_member_register!`](crate::class_member_register).
pub struct MembersRegistration {
	pub class: fn() -> TypeId,
	pub members: fn() -> Vec<IntrospectionEntry>,
}

inventory::collect!(MembersRegistration);

/// Registers a class with the process-wide registry.
///
/// Classes implementing `Default` are buildable by name. Pass `no_builder` for
/// classes that cannot be default-constructed.
///
/// ```ignore
/// class_register!(Pump, "1.0");
/// class_register!(Valve, "1.0", no_builder);
/// ```
#[macro_export]
macro_rules! class_register {
	($class:ty, $version:expr) => {
		const _: () = {
			fn build() -> ::std::boxed::Box<dyn $crate::recall_object::Object> {
				::std::boxed::Box::new(<$class as ::core::default::Default>::default())
			}

			fn item() -> $crate::ClassRegistryItem {
				$crate::ClassRegistryItem::new::<$class>($version).with_builder(build)
			}

			$crate::inventory::submit! {
				$crate::registration::ClassRegistration { item }
			}
		};
	};
	($class:ty, $version:expr, no_builder) => {
		const _: () = {
			fn item() -> $crate::ClassRegistryItem {
				$crate::ClassRegistryItem::new::<$class>($version)
			}

			$crate::inventory::submit! {
				$crate::registration::ClassRegistration { item }
			}
		};
	};
}

/// Registers a set of methods for a class.
///
/// Each entry is written as for
/// [`method_mapper!`](recall_invocation::method_mapper), with an optional
/// `"Name" =>` prefix. Entries sharing a name are overloads.
///
/// ```ignore
/// class_method_register!(Pump,
/// 	set_rate(u32),
/// 	"Rate" => read_rate(&mut u32),
/// );
/// ```
#[macro_export]
macro_rules! class_method_register {
	($class:ty $(, $($name:literal =>)? $method:ident ( $($params:tt)* ))* $(,)?) => {
		const _: () = {
			fn class() -> ::core::any::TypeId {
				::core::any::TypeId::of::<$class>()
			}

			fn methods() -> $crate::ClassMethodsRegistryItem {
				$crate::ClassMethodsRegistryItem::new(::std::vec![
					$( $crate::recall_invocation::method_mapper!($class, $($name =>)? $method($($params)*)) ),*
				])
			}

			$crate::inventory::submit! {
				$crate::registration::MethodsRegistration { class, methods }
			}
		};
	};
}

/// Registers introspection entries for fields of a class.
///
/// ```ignore
/// class_member_register!(Pump { rate, label });
/// ```
#[macro_export]
macro_rules! class_member_register {
	($class:ty { $($field:ident),* $(,)? }) => {
		const _: () = {
			fn class() -> ::core::any::TypeId {
				::core::any::TypeId::of::<$class>()
			}

			fn members() -> ::std::vec::Vec<$crate::IntrospectionEntry> {
				::std::vec![
					$( $crate::IntrospectionEntry::of(
						::core::stringify!($field),
						::core::mem::offset_of!($class, $field),
						|object: &$class| &object.$field,
					) ),*
				]
			}

			$crate::inventory::submit! {
				$crate::registration::MembersRegistration { class, members }
			}
		};
	};
}
