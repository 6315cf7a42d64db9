/// Registry error types.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
	/// Another type already registered under this class name.
	#[error("class '{class_name}' is already registered by {existing}")]
	DuplicateClass { class_name: &'static str, existing: &'static str },

	/// No class of that name is registered or loadable.
	#[error("unknown class: {name}{}", suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
	UnknownClass {
		name: String,
		/// The closest registered class name, if one is close enough.
		suggestion: Option<String>,
	},

	/// The class is registered without an object builder.
	#[error("class '{0}' cannot be instantiated by name")]
	NoBuilder(&'static str),

	/// A shared library could not be opened.
	#[error("failed to load library '{name}': {source}")]
	Library {
		name: String,
		#[source]
		source: libloading::Error,
	},

	/// A `+Name` configuration node has no `Class` leaf.
	#[error("object node '{0}' has no Class field")]
	MissingClass(String),

	/// A built object refused its configuration node.
	#[error("object '{name}' of class '{class_name}' failed to initialise")]
	Initialisation { name: String, class_name: &'static str },

	/// Two configured objects share a name.
	#[error("duplicate object name '{0}'")]
	DuplicateObject(String),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
