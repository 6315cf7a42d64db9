//! Name hashing and sorted-array associative lookup.
//!
//! [`SortedIndex`] maps names to values through a 32-bit hash of the name. Keys and
//! values live in parallel arrays ordered by `(hash, name)`, so lookups are a binary
//! search and insertions/removals shift the tail of the arrays.

pub mod hash;
pub mod sorted;

pub use hash::{DjbHash, Fnv1aHash, HashFunction};
pub use sorted::{DEFAULT_GRANULARITY, SortedIndex};
