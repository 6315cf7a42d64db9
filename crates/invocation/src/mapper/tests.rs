use std::io::Write as _;

use pretty_assertions::assert_eq;
use recall_config::ConfigurationDatabase;
use recall_object::{Reference, ReferenceContainer, Stream, StreamString, StructuredData, StructuredDataExt};
use rstest::rstest;

use crate::{ErrorType, MethodMapper, Parameters, method_mapper};

/// Records every argument it sees; mutable slots are incremented.
#[derive(Default)]
struct Matrix {
	name: String,
	seen: Vec<i32>,
	calls: usize,
}

recall_object::impl_object!(Matrix);

macro_rules! slot_type {
	(C) => { i32 };
	(R) => { &i32 };
	(W) => { &mut i32 };
}

macro_rules! slot_use {
	($seen:ident, C, $arg:ident) => {
		$seen.push($arg)
	};
	($seen:ident, R, $arg:ident) => {
		$seen.push(*$arg)
	};
	($seen:ident, W, $arg:ident) => {{
		$seen.push(*$arg);
		*$arg += 1;
	}};
}

macro_rules! matrix {
	($($method:ident($($arg:ident: $kind:ident),+);)+) => {
		impl Matrix {
			$(
				fn $method(&mut self, $($arg: slot_type!($kind)),+) -> bool {
					self.calls += 1;
					let seen = &mut self.seen;
					$( slot_use!(seen, $kind, $arg); )+
					true
				}
			)+
		}
	};
}

matrix! {
	cc(a: C, b: C);
	cr(a: C, b: R);
	cw(a: C, b: W);
	rc(a: R, b: C);
	rr(a: R, b: R);
	rw(a: R, b: W);
	wc(a: W, b: C);
	wr(a: W, b: R);
	ww(a: W, b: W);
	ccc(a: C, b: C, c: C);
	ccr(a: C, b: C, c: R);
	ccw(a: C, b: C, c: W);
	crc(a: C, b: R, c: C);
	crr(a: C, b: R, c: R);
	crw(a: C, b: R, c: W);
	cwc(a: C, b: W, c: C);
	cwr(a: C, b: W, c: R);
	cww(a: C, b: W, c: W);
	rcc(a: R, b: C, c: C);
	rcr(a: R, b: C, c: R);
	rcw(a: R, b: C, c: W);
	rrc(a: R, b: R, c: C);
	rrr(a: R, b: R, c: R);
	rrw(a: R, b: R, c: W);
	rwc(a: R, b: W, c: C);
	rwr(a: R, b: W, c: R);
	rww(a: R, b: W, c: W);
	wcc(a: W, b: C, c: C);
	wcr(a: W, b: C, c: R);
	wcw(a: W, b: C, c: W);
	wrc(a: W, b: R, c: C);
	wrr(a: W, b: R, c: R);
	wrw(a: W, b: R, c: W);
	wwc(a: W, b: W, c: C);
	wwr(a: W, b: W, c: R);
	www(a: W, b: W, c: W);
	cccc(a: C, b: C, c: C, d: C);
	wwww(a: W, b: W, c: W, d: W);
	crwc(a: C, b: R, c: W, d: C);
	wrcw(a: W, b: R, c: C, d: W);
	rwrw(a: R, b: W, c: R, d: W);
	cwwr(a: C, b: W, c: W, d: R);
}

fn parameters_for(slots: usize) -> ConfigurationDatabase {
	let db = ConfigurationDatabase::new();
	for slot in 1..=slots {
		db.write_as(&format!("param{slot}"), &(slot as i32 * 10));
	}
	db
}

#[rstest]
#[case::cc(method_mapper!(Matrix, cc(i32, i32)), &[false, false])]
#[case::cr(method_mapper!(Matrix, cr(i32, &i32)), &[false, false])]
#[case::cw(method_mapper!(Matrix, cw(i32, &mut i32)), &[false, true])]
#[case::rc(method_mapper!(Matrix, rc(&i32, i32)), &[false, false])]
#[case::rr(method_mapper!(Matrix, rr(&i32, &i32)), &[false, false])]
#[case::rw(method_mapper!(Matrix, rw(&i32, &mut i32)), &[false, true])]
#[case::wc(method_mapper!(Matrix, wc(&mut i32, i32)), &[true, false])]
#[case::wr(method_mapper!(Matrix, wr(&mut i32, &i32)), &[true, false])]
#[case::ww(method_mapper!(Matrix, ww(&mut i32, &mut i32)), &[true, true])]
#[case::ccc(method_mapper!(Matrix, ccc(i32, i32, i32)), &[false, false, false])]
#[case::ccr(method_mapper!(Matrix, ccr(i32, i32, &i32)), &[false, false, false])]
#[case::ccw(method_mapper!(Matrix, ccw(i32, i32, &mut i32)), &[false, false, true])]
#[case::crc(method_mapper!(Matrix, crc(i32, &i32, i32)), &[false, false, false])]
#[case::crr(method_mapper!(Matrix, crr(i32, &i32, &i32)), &[false, false, false])]
#[case::crw(method_mapper!(Matrix, crw(i32, &i32, &mut i32)), &[false, false, true])]
#[case::cwc(method_mapper!(Matrix, cwc(i32, &mut i32, i32)), &[false, true, false])]
#[case::cwr(method_mapper!(Matrix, cwr(i32, &mut i32, &i32)), &[false, true, false])]
#[case::cww(method_mapper!(Matrix, cww(i32, &mut i32, &mut i32)), &[false, true, true])]
#[case::rcc(method_mapper!(Matrix, rcc(&i32, i32, i32)), &[false, false, false])]
#[case::rcr(method_mapper!(Matrix, rcr(&i32, i32, &i32)), &[false, false, false])]
#[case::rcw(method_mapper!(Matrix, rcw(&i32, i32, &mut i32)), &[false, false, true])]
#[case::rrc(method_mapper!(Matrix, rrc(&i32, &i32, i32)), &[false, false, false])]
#[case::rrr(method_mapper!(Matrix, rrr(&i32, &i32, &i32)), &[false, false, false])]
#[case::rrw(method_mapper!(Matrix, rrw(&i32, &i32, &mut i32)), &[false, false, true])]
#[case::rwc(method_mapper!(Matrix, rwc(&i32, &mut i32, i32)), &[false, true, false])]
#[case::rwr(method_mapper!(Matrix, rwr(&i32, &mut i32, &i32)), &[false, true, false])]
#[case::rww(method_mapper!(Matrix, rww(&i32, &mut i32, &mut i32)), &[false, true, true])]
#[case::wcc(method_mapper!(Matrix, wcc(&mut i32, i32, i32)), &[true, false, false])]
#[case::wcr(method_mapper!(Matrix, wcr(&mut i32, i32, &i32)), &[true, false, false])]
#[case::wcw(method_mapper!(Matrix, wcw(&mut i32, i32, &mut i32)), &[true, false, true])]
#[case::wrc(method_mapper!(Matrix, wrc(&mut i32, &i32, i32)), &[true, false, false])]
#[case::wrr(method_mapper!(Matrix, wrr(&mut i32, &i32, &i32)), &[true, false, false])]
#[case::wrw(method_mapper!(Matrix, wrw(&mut i32, &i32, &mut i32)), &[true, false, true])]
#[case::wwc(method_mapper!(Matrix, wwc(&mut i32, &mut i32, i32)), &[true, true, false])]
#[case::wwr(method_mapper!(Matrix, wwr(&mut i32, &mut i32, &i32)), &[true, true, false])]
#[case::www(method_mapper!(Matrix, www(&mut i32, &mut i32, &mut i32)), &[true, true, true])]
#[case::cccc(method_mapper!(Matrix, cccc(i32, i32, i32, i32)), &[false, false, false, false])]
#[case::wwww(method_mapper!(Matrix, wwww(&mut i32, &mut i32, &mut i32, &mut i32)), &[true, true, true, true])]
#[case::crwc(method_mapper!(Matrix, crwc(i32, &i32, &mut i32, i32)), &[false, false, true, false])]
#[case::wrcw(method_mapper!(Matrix, wrcw(&mut i32, &i32, i32, &mut i32)), &[true, false, false, true])]
#[case::rwrw(method_mapper!(Matrix, rwrw(&i32, &mut i32, &i32, &mut i32)), &[false, true, false, true])]
#[case::cwwr(method_mapper!(Matrix, cwwr(i32, &mut i32, &mut i32, &i32)), &[false, true, true, false])]
fn value_slots_follow_their_passing_mode(#[case] mapper: MethodMapper, #[case] writes: &[bool]) {
	let db = parameters_for(writes.len());
	let mut object = Matrix::default();
	let caller = mapper.method_caller().expect("value methods are supported");

	assert_eq!(caller.call(&mut object, Parameters::Data(&db)), ErrorType::NO_ERROR);
	assert_eq!(object.calls, 1);

	let initial: Vec<i32> = (1..=writes.len()).map(|slot| slot as i32 * 10).collect();
	assert_eq!(object.seen, initial);
	for (slot, written) in writes.iter().enumerate() {
		let expected = initial[slot] + i32::from(*written);
		assert_eq!(db.read_as::<i32>(&format!("param{}", slot + 1)), Some(expected), "param{}", slot + 1);
	}

	let mask = writes.iter().enumerate().fold(0u16, |mask, (slot, written)| mask | u16::from(*written) << (12 - 4 * slot));
	assert_eq!(caller.mask(), mask);
	assert_eq!(caller.arity(), writes.len());
}

#[rstest]
#[case::second_of_two(method_mapper!(Matrix, cc(i32, i32)), 2)]
#[case::third_of_three(method_mapper!(Matrix, wwc(&mut i32, &mut i32, i32)), 3)]
#[case::last_of_four(method_mapper!(Matrix, wwww(&mut i32, &mut i32, &mut i32, &mut i32)), 4)]
fn missing_field_skips_the_call(#[case] mapper: MethodMapper, #[case] slots: usize) {
	let db = parameters_for(slots - 1);
	let mut object = Matrix::default();
	let status = mapper.method_caller().map(|caller| caller.call(&mut object, Parameters::Data(&db)));
	assert_eq!(status, Some(ErrorType::PARAMETERS_ERROR));
	assert_eq!(object.calls, 0);
	assert_eq!(db.read_as::<i32>("param1"), Some(10));
}

#[derive(Default)]
struct Probe {
	name: String,
	log: Vec<&'static str>,
}

recall_object::impl_object!(Probe);

impl Probe {
	fn with_pointer(&mut self, value: *const i32) -> bool {
		value.is_null()
	}

	fn with_data(&mut self, data: &dyn StructuredData) -> bool {
		self.log.push("data");
		data.read("param1").is_some()
	}

	fn with_stream(&mut self, stream: &mut dyn Stream) -> bool {
		self.log.push("stream");
		stream.write_all(b"probe").is_ok()
	}

	fn take_container(&mut self, container: ReferenceContainer) {
		self.log.push(if container.is_empty() { "empty" } else { "filled" });
	}

	fn fill_container(&mut self, container: &mut ReferenceContainer) -> ErrorType {
		self.log.push("fill");
		ErrorType::from(container.insert(Reference::new(Probe {
			name: "TestObject2".into(),
			log: Vec::new(),
		})))
	}
}

#[test]
fn pointer_parameters_are_unsupported() {
	assert!(!method_mapper!(Probe, with_pointer(*const i32)).is_supported());
	assert!(!method_mapper!(Probe, with_pointer(i32, *mut u8)).is_supported());
	assert!(Probe::default().with_pointer(std::ptr::null()));
}

#[test]
fn default_names_are_camel_case() {
	assert_eq!(method_mapper!(Matrix, cwr(i32, &mut i32, &i32)).method_name(), "Cwr");
	assert_eq!(method_mapper!(Probe, with_data(&dyn StructuredData)).method_name(), "WithData");
	assert_eq!(method_mapper!(Probe, "Explicit" => with_data(&dyn StructuredData)).method_name(), "Explicit");

	let mut mapper = method_mapper!(Probe, with_stream(&mut dyn Stream));
	mapper.set_method_name("Renamed");
	assert_eq!(mapper.method_name(), "Renamed");
}

fn call(mapper: &MethodMapper, probe: &mut Probe, parameters: Parameters<'_>) -> Option<ErrorType> {
	mapper.method_caller().map(|caller| caller.call(probe, parameters))
}

#[test]
fn pass_through_shapes_pick_their_adapter() {
	let mut probe = Probe::default();
	let db = parameters_for(1);
	let mut stream = StreamString::new();
	let mut container = ReferenceContainer::default();

	let data = method_mapper!(Probe, with_data(&dyn StructuredData));
	let streamed = method_mapper!(Probe, with_stream(&mut dyn Stream));
	let copied = method_mapper!(Probe, take_container(ReferenceContainer));
	let filled = method_mapper!(Probe, fill_container(&mut ReferenceContainer));

	assert_eq!(call(&data, &mut probe, Parameters::Data(&db)), Some(ErrorType::NO_ERROR));
	assert_eq!(call(&streamed, &mut probe, Parameters::Stream(&mut stream)), Some(ErrorType::NO_ERROR));
	assert_eq!(call(&copied, &mut probe, Parameters::Container(&mut container)), Some(ErrorType::NO_ERROR));
	assert_eq!(call(&filled, &mut probe, Parameters::Container(&mut container)), Some(ErrorType::NO_ERROR));
	assert_eq!(call(&copied, &mut probe, Parameters::Container(&mut container)), Some(ErrorType::NO_ERROR));
	assert_eq!(probe.log, ["data", "stream", "empty", "fill", "filled"]);
	assert_eq!(stream.contents(), "probe");
	assert!(container.find("TestObject2").is_valid());

	assert_eq!(copied.method_caller().map(|caller| caller.mask()), Some(0));
	assert_eq!(filled.method_caller().map(|caller| caller.mask()), Some(0x1000));
}
