use std::fmt;

use libloading::Library;

use crate::error::{RegistryError, Result};

/// An open shared library, kept loaded while the class that owns it lives.
pub struct LoadableLibrary {
	name: String,
	_library: Library,
}

impl LoadableLibrary {
	/// Opens `name` with the platform's library prefix and extension added.
	pub fn open(name: &str) -> Result<Self> {
		let file = libloading::library_filename(name);
		// SAFETY: opening runs the library's initialisers, which for class libraries
		// only submit registrations.
		let library = unsafe { Library::new(&file) }.map_err(|source| RegistryError::Library {
			name: name.to_owned(),
			source,
		})?;
		tracing::debug!(library = name, file = ?file, "opened class library");
		Ok(Self {
			name: name.to_owned(),
			_library: library,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

impl fmt::Debug for LoadableLibrary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LoadableLibrary").field("name", &self.name).finish_non_exhaustive()
	}
}
