//! Non-cryptographic string hashes used to key [`SortedIndex`](crate::SortedIndex).


/// A 32-bit hash over a byte slice.
///
/// With `length == 0` the input is treated as a NUL-terminated string: hashing stops at
/// the first zero byte or at the end of the slice. Any other `length` hashes exactly that
/// many bytes (clamped to the slice).
pub trait HashFunction {
	fn compute(&self, bytes: &[u8], length: usize) -> u32;

	/// Hashes every byte of `name`.
	fn hash_str(&self, name: &str) -> u32 {
		self.compute(name.as_bytes(), name.len())
	}
}

/// Fowler-Noll-Vo, variant 1a.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fnv1aHash;

impl Fnv1aHash {
	pub const OFFSET_BASIS: u32 = 0x811c_9dc5;
	pub const PRIME: u32 = 0x0100_0193;
}

impl HashFunction for Fnv1aHash {
	fn compute(&self, bytes: &[u8], length: usize) -> u32 {
		hashed_bytes(bytes, length)
			.iter()
			.fold(Self::OFFSET_BASIS, |hash, &byte| (hash ^ u32::from(byte)).wrapping_mul(Self::PRIME))
	}
}

/// Bernstein's `hash * 33 + c`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DjbHash;

impl DjbHash {
	pub const SEED: u32 = 5381;
}

impl HashFunction for DjbHash {
	fn compute(&self, bytes: &[u8], length: usize) -> u32 {
		hashed_bytes(bytes, length)
			.iter()
			.fold(Self::SEED, |hash, &byte| (hash << 5).wrapping_add(hash).wrapping_add(u32::from(byte)))
	}
}

fn hashed_bytes(bytes: &[u8], length: usize) -> &[u8] {
	if length == 0 {
		let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
		&bytes[..end]
	} else {
		&bytes[..length.min(bytes.len())]
	}
}
