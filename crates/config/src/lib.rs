//! Hierarchical configuration storage.
//!
//! [`ConfigNode`] is a named node holding an ordered list of children (leaves or
//! sub-nodes) with an index from child name to position. [`ConfigurationDatabase`]
//! walks a tree of nodes with a movable cursor and exposes it as
//! [`StructuredData`](recall_object::StructuredData). [`Settings`] carries the tunables
//! shared by the workspace.

pub mod database;
pub mod error;
pub mod node;
pub mod settings;

pub use database::ConfigurationDatabase;
pub use error::{ConfigError, Result};
pub use node::{ConfigLeaf, ConfigNode};
pub use settings::{IndexSettings, RegistrySettings, Settings, TreeSettings};
