//! Workspace tunables loaded from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Top-level settings. Every section and field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	pub index: IndexSettings,
	pub tree: TreeSettings,
	pub registry: RegistrySettings,
}

/// Name index tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexSettings {
	/// Growth factor of the index arrays.
	pub granularity: usize,
}

impl Default for IndexSettings {
	fn default() -> Self {
		Self {
			granularity: recall_index::DEFAULT_GRANULARITY,
		}
	}
}

/// Configuration tree tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeSettings {
	/// Growth factor of each node's child array.
	pub granularity: usize,
}

impl Default for TreeSettings {
	fn default() -> Self {
		Self { granularity: 2 }
	}
}

/// Class registry behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrySettings {
	/// Load `library::Class` names from shared libraries on lookup misses.
	pub dynamic_loading: bool,
}

impl Default for RegistrySettings {
	fn default() -> Self {
		Self { dynamic_loading: true }
	}
}

impl Settings {
	pub fn from_toml_str(text: &str) -> Result<Self> {
		Ok(toml::from_str(text)?)
	}

	pub fn load(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let settings = Self::from_toml_str(&text)?;
		tracing::debug!(path = %path.display(), ?settings, "loaded settings");
		Ok(settings)
	}
}
