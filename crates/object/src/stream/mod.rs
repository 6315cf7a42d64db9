//! Seekable byte streams.

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

use parking_lot::{Mutex, MutexGuard};

use crate::object::Object;

#[cfg(test)]
mod tests;

/// A seekable byte stream with a resizable length.
pub trait Stream: Read + Write + Seek + Send {
	fn size(&self) -> u64;

	/// Truncates or zero-extends the stream. The position is clamped to the new size.
	fn set_size(&mut self, size: u64) -> io::Result<()>;

	fn can_read(&self) -> bool {
		true
	}

	fn can_write(&self) -> bool {
		true
	}

	fn can_seek(&self) -> bool {
		true
	}
}

/// Lock around a type-erased stream, as exposed by [`Object::as_stream`].
pub type StreamCell = Mutex<dyn Stream>;

/// Growable in-memory stream.
#[derive(Debug, Clone, Default)]
pub struct StreamString {
	cursor: Cursor<Vec<u8>>,
}

impl StreamString {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn as_bytes(&self) -> &[u8] {
		self.cursor.get_ref()
	}

	/// Contents as text, with invalid UTF-8 replaced.
	pub fn contents(&self) -> String {
		String::from_utf8_lossy(self.as_bytes()).into_owned()
	}

	pub fn position(&self) -> u64 {
		self.cursor.position()
	}

	pub fn into_inner(self) -> Vec<u8> {
		self.cursor.into_inner()
	}
}

impl From<&str> for StreamString {
	fn from(text: &str) -> Self {
		Self {
			cursor: Cursor::new(text.as_bytes().to_vec()),
		}
	}
}

impl Read for StreamString {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		self.cursor.read(buf)
	}
}

impl Write for StreamString {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.cursor.write(buf)
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl Seek for StreamString {
	fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
		self.cursor.seek(pos)
	}
}

impl Stream for StreamString {
	fn size(&self) -> u64 {
		self.cursor.get_ref().len() as u64
	}

	fn set_size(&mut self, size: u64) -> io::Result<()> {
		let len = usize::try_from(size).map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "stream size exceeds address space"))?;
		self.cursor.get_mut().resize(len, 0);
		if self.cursor.position() > size {
			self.cursor.set_position(size);
		}
		Ok(())
	}
}

/// Named object owning a stream.
pub struct SharedStream<S> {
	name: String,
	stream: Mutex<S>,
}

impl<S: Stream + 'static> SharedStream<S> {
	pub fn new(name: impl Into<String>, stream: S) -> Self {
		Self {
			name: name.into(),
			stream: Mutex::new(stream),
		}
	}

	pub fn lock(&self) -> MutexGuard<'_, S> {
		self.stream.lock()
	}

	pub fn into_inner(self) -> S {
		self.stream.into_inner()
	}
}

impl<S: Stream + 'static> Object for SharedStream<S> {
	fn name(&self) -> &str {
		&self.name
	}

	fn set_name(&mut self, name: &str) {
		self.name = name.to_owned();
	}

	fn as_stream(&self) -> Option<&StreamCell> {
		Some(&self.stream)
	}
}
