use pretty_assertions::assert_eq;

use super::*;

#[test]
fn integers_convert_within_range() {
	assert_eq!(i32::from_value(&AnyValue::Int(-7)), Ok(-7));
	assert_eq!(u8::from_value(&AnyValue::UInt(255)), Ok(255));
	assert_eq!(u32::from_value(&AnyValue::Int(40)), Ok(40));
	assert_eq!(
		u8::from_value(&AnyValue::Int(-1)),
		Err(ValueError::OutOfRange { value: "-1".into(), target: "u8" })
	);
}

#[test]
fn strings_parse_into_scalars() {
	assert_eq!(i32::from_value(&AnyValue::from(" 10 ")), Ok(10));
	assert_eq!(f64::from_value(&AnyValue::from("2.5")), Ok(2.5));
	assert_eq!(bool::from_value(&AnyValue::from("true")), Ok(true));
	assert!(matches!(i32::from_value(&AnyValue::from("ten")), Err(ValueError::Parse { .. })));
}

#[test]
fn mismatched_kinds_are_rejected() {
	assert_eq!(
		i32::from_value(&AnyValue::Bool(true)),
		Err(ValueError::TypeMismatch { expected: "i32", found: "bool" })
	);
	assert!(String::from_value(&AnyValue::Array(vec![])).is_err());
	assert!(Vec::<i32>::from_value(&AnyValue::Int(1)).is_err());
}

#[test]
fn scalars_render_as_strings() {
	assert_eq!(String::from_value(&AnyValue::Int(35)), Ok("35".to_owned()));
	assert_eq!(AnyValue::from(vec![1i32, 2]).to_string(), "{ 1 2 }");
}

#[test]
fn arrays_convert_elementwise() {
	let value = vec![1u16, 2, 3].to_value();
	assert_eq!(value, AnyValue::Array(vec![AnyValue::UInt(1), AnyValue::UInt(2), AnyValue::UInt(3)]));
	assert_eq!(value.get::<Vec<u16>>(), Ok(vec![1, 2, 3]));
}
