use std::io::{Read, Seek, SeekFrom, Write};

use pretty_assertions::assert_eq;

use super::*;
use crate::Reference;

#[test]
fn string_stream_reads_back_writes() {
	let mut stream = StreamString::new();
	stream.write_all(b"hello").unwrap();
	assert_eq!(stream.size(), 5);
	stream.seek(SeekFrom::Start(0)).unwrap();
	let mut text = String::new();
	stream.read_to_string(&mut text).unwrap();
	assert_eq!(text, "hello");
}

#[test]
fn set_size_clamps_position() {
	let mut stream = StreamString::from("abcdef");
	stream.seek(SeekFrom::End(0)).unwrap();
	stream.set_size(3).unwrap();
	assert_eq!(stream.position(), 3);
	assert_eq!(stream.contents(), "abc");
	stream.set_size(5).unwrap();
	assert_eq!(stream.as_bytes(), b"abc\0\0");
}

#[test]
fn shared_stream_is_reachable_through_reference() {
	let reference = Reference::new(SharedStream::new("log", StreamString::new()));
	let cell = reference.as_stream().expect("stream object exposes its stream");
	cell.lock().write_all(b"written").unwrap();

	let shared = reference.downcast_ref::<SharedStream<StreamString>>().unwrap();
	assert_eq!(shared.lock().contents(), "written");
	assert_eq!(reference.get().unwrap().class_name(), "SharedStream");
}
