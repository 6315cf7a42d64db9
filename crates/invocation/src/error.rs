use std::fmt;

bitflags::bitflags! {
	/// Composite outcome of a method dispatch.
	///
	/// The empty set means success. Flags combine, so a method that failed and whose
	/// outputs could not be stored reports `FUNCTION_ERROR | PARAMETERS_ERROR`.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct ErrorType: u32 {
		const FATAL_ERROR = 1 << 0;
		const RECOVERABLE_ERROR = 1 << 1;
		const INITIALISATION_ERROR = 1 << 2;
		const OS_ERROR = 1 << 3;
		/// Arguments could not be read or written, or had the wrong shape.
		const PARAMETERS_ERROR = 1 << 4;
		const ILLEGAL_OPERATION = 1 << 5;
		/// The invoked method itself reported failure.
		const FUNCTION_ERROR = 1 << 6;
		const TIMEOUT = 1 << 7;
		/// No such method, or the object is not of the method's class.
		const UNSUPPORTED_FEATURE = 1 << 8;
		const INTERNAL_SETUP_ERROR = 1 << 9;
	}
}

impl ErrorType {
	pub const NO_ERROR: Self = Self::empty();

	pub fn is_ok(self) -> bool {
		self.is_empty()
	}
}

impl From<bool> for ErrorType {
	fn from(ok: bool) -> Self {
		if ok { Self::NO_ERROR } else { Self::FUNCTION_ERROR }
	}
}

impl From<()> for ErrorType {
	fn from(_: ()) -> Self {
		Self::NO_ERROR
	}
}

impl fmt::Display for ErrorType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_empty() {
			return f.write_str("NO_ERROR");
		}
		for (i, (name, _)) in self.iter_names().enumerate() {
			if i > 0 {
				f.write_str(" | ")?;
			}
			f.write_str(name)?;
		}
		Ok(())
	}
}
