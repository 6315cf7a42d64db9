use std::path::PathBuf;

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Malformed TOML input.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// A configuration file could not be read.
	#[error("failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A TOML value has no structured-data counterpart.
	#[error("unsupported {kind} value at '{path}'")]
	Unsupported { path: String, kind: &'static str },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
