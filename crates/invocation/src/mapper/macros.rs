/// Builds a [`MethodMapper`](crate::MethodMapper) for a method of `$class`.
///
/// The parameter list restates the method's parameter types so the right adapter and
/// write-back mask can be chosen:
///
/// | shape                       | adapter                | written back |
/// |-----------------------------|------------------------|--------------|
/// | `T`, `&T`                   | value slot             | no           |
/// | `&mut T`                    | value slot             | yes          |
/// | `&dyn StructuredData`       | structured data        | -            |
/// | `&mut dyn Stream`           | stream                 | -            |
/// | `ReferenceContainer`, `&ReferenceContainer`, `&mut ReferenceContainer` | container | `&mut` only |
/// | `*const T`, `*mut T`        | none (unsupported)     | -            |
///
/// Up to four value slots can be mixed freely. The structured-data, stream and
/// container shapes must be the only parameter. Value slot types implement
/// [`Parameter`](recall_object::Parameter).
///
/// The method is registered under its CamelCase name unless a name is given:
///
/// ```ignore
/// method_mapper!(Pump, set_rate(u32));                   // "SetRate"
/// method_mapper!(Pump, "Rate" => read_rate(&mut u32));   // "Rate"
/// ```
///
/// The generated call is type-checked against the real signature. The method may
/// return `bool`, `()` or [`ErrorType`](crate::ErrorType).
#[macro_export]
macro_rules! method_mapper {
	($class:ty, $method:ident ( $($params:tt)* )) => {
		$crate::paste::paste! {
			$crate::method_mapper!($class, ::core::stringify!([<$method:camel>]) => $method($($params)*))
		}
	};
	($class:ty, $name:expr => $method:ident ( $($params:tt)* )) => {
		$crate::__method_slots!([$class, $name, $method] [] $($params)*)
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __method_slots {
	($head:tt [$($slots:tt)*]) => {
		$crate::__method_build!($head $($slots)*)
	};
	($head:tt [$($slots:tt)*] & dyn StructuredData $(, $($rest:tt)*)?) => {
		$crate::__method_slots!($head [$($slots)* (data)] $($($rest)*)?)
	};
	($head:tt [$($slots:tt)*] & mut dyn Stream $(, $($rest:tt)*)?) => {
		$crate::__method_slots!($head [$($slots)* (stream)] $($($rest)*)?)
	};
	($head:tt [$($slots:tt)*] & mut ReferenceContainer $(, $($rest:tt)*)?) => {
		$crate::__method_slots!($head [$($slots)* (container write)] $($($rest)*)?)
	};
	($head:tt [$($slots:tt)*] & ReferenceContainer $(, $($rest:tt)*)?) => {
		$crate::__method_slots!($head [$($slots)* (container read)] $($($rest)*)?)
	};
	($head:tt [$($slots:tt)*] ReferenceContainer $(, $($rest:tt)*)?) => {
		$crate::__method_slots!($head [$($slots)* (container copy)] $($($rest)*)?)
	};
	($head:tt [$($slots:tt)*] * const $t:ty $(, $($rest:tt)*)?) => {
		$crate::__method_build!(@unsupported $head)
	};
	($head:tt [$($slots:tt)*] * mut $t:ty $(, $($rest:tt)*)?) => {
		$crate::__method_build!(@unsupported $head)
	};
	($head:tt [$($slots:tt)*] & mut $t:ty $(, $($rest:tt)*)?) => {
		$crate::__method_slots!($head [$($slots)* (write $t)] $($($rest)*)?)
	};
	($head:tt [$($slots:tt)*] & $t:ty $(, $($rest:tt)*)?) => {
		$crate::__method_slots!($head [$($slots)* (read $t)] $($($rest)*)?)
	};
	($head:tt [$($slots:tt)*] $t:ty $(, $($rest:tt)*)?) => {
		$crate::__method_slots!($head [$($slots)* (copy $t)] $($($rest)*)?)
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __method_build {
	(@unsupported [$class:ty, $name:expr, $method:ident]) => {
		$crate::MethodMapper::unsupported($name)
	};
	([$class:ty, $name:expr, $method:ident] (data)) => {
		$crate::MethodMapper::new(
			$name,
			$crate::DataCaller::<$class>::new(|object: &mut $class, data| $crate::ErrorType::from(object.$method(data))),
		)
	};
	([$class:ty, $name:expr, $method:ident] (stream)) => {
		$crate::MethodMapper::new(
			$name,
			$crate::StreamCaller::<$class>::new(|object: &mut $class, stream| $crate::ErrorType::from(object.$method(stream))),
		)
	};
	([$class:ty, $name:expr, $method:ident] (container $kind:ident)) => {
		$crate::MethodMapper::new(
			$name,
			$crate::ContainerCaller::<$class>::new(
				|object: &mut $class, container| $crate::ErrorType::from(object.$method($crate::__pass!($kind container))),
				$crate::__mask!($kind) << 12,
			),
		)
	};
	([$class:ty, $name:expr, $method:ident]) => {
		$crate::MethodMapper::new(
			$name,
			$crate::ValueCaller::<$class, ()>::new(|object: &mut $class, _: &mut ()| $crate::ErrorType::from(object.$method()), 0),
		)
	};
	([$class:ty, $name:expr, $method:ident] ($k1:ident $t1:ty)) => {
		$crate::MethodMapper::new(
			$name,
			$crate::ValueCaller::<$class, ($t1,)>::new(
				|object: &mut $class, (p1,): &mut ($t1,)| $crate::ErrorType::from(object.$method($crate::__pass!($k1 p1))),
				$crate::__mask!($k1) << 12,
			),
		)
	};
	([$class:ty, $name:expr, $method:ident] ($k1:ident $t1:ty) ($k2:ident $t2:ty)) => {
		$crate::MethodMapper::new(
			$name,
			$crate::ValueCaller::<$class, ($t1, $t2)>::new(
				|object: &mut $class, (p1, p2): &mut ($t1, $t2)| {
					$crate::ErrorType::from(object.$method($crate::__pass!($k1 p1), $crate::__pass!($k2 p2)))
				},
				$crate::__mask!($k1) << 12 | $crate::__mask!($k2) << 8,
			),
		)
	};
	([$class:ty, $name:expr, $method:ident] ($k1:ident $t1:ty) ($k2:ident $t2:ty) ($k3:ident $t3:ty)) => {
		$crate::MethodMapper::new(
			$name,
			$crate::ValueCaller::<$class, ($t1, $t2, $t3)>::new(
				|object: &mut $class, (p1, p2, p3): &mut ($t1, $t2, $t3)| {
					$crate::ErrorType::from(object.$method($crate::__pass!($k1 p1), $crate::__pass!($k2 p2), $crate::__pass!($k3 p3)))
				},
				$crate::__mask!($k1) << 12 | $crate::__mask!($k2) << 8 | $crate::__mask!($k3) << 4,
			),
		)
	};
	([$class:ty, $name:expr, $method:ident] ($k1:ident $t1:ty) ($k2:ident $t2:ty) ($k3:ident $t3:ty) ($k4:ident $t4:ty)) => {
		$crate::MethodMapper::new(
			$name,
			$crate::ValueCaller::<$class, ($t1, $t2, $t3, $t4)>::new(
				|object: &mut $class, (p1, p2, p3, p4): &mut ($t1, $t2, $t3, $t4)| {
					$crate::ErrorType::from(object.$method(
						$crate::__pass!($k1 p1),
						$crate::__pass!($k2 p2),
						$crate::__pass!($k3 p3),
						$crate::__pass!($k4 p4),
					))
				},
				$crate::__mask!($k1) << 12 | $crate::__mask!($k2) << 8 | $crate::__mask!($k3) << 4 | $crate::__mask!($k4),
			),
		)
	};
	([$class:ty, $name:expr, $method:ident] $($slots:tt)*) => {
		::core::compile_error!(::core::concat!(
			"unsupported parameter list for ",
			::core::stringify!($method),
			": structured data, stream and container parameters must be alone, and at most four values are supported"
		))
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __pass {
	(copy $arg:ident) => {
		::core::clone::Clone::clone(&*$arg)
	};
	(read $arg:ident) => {
		&*$arg
	};
	(write $arg:ident) => {
		$arg
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __mask {
	(copy) => {
		0u16
	};
	(read) => {
		0u16
	};
	(write) => {
		1u16
	};
}
