use pretty_assertions::assert_eq;

use super::*;

#[test]
fn numbers_render_like_number_to_string() {
    assert_eq!(number_to_string(1.0), "1");
    assert_eq!(number_to_string(-0.0), "0");
    assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
    assert_eq!(number_to_string(1e21), "1e+21");
    assert_eq!(number_to_string(123_456_789_012_345_680_000.0), "123456789012345680000");
    assert_eq!(number_to_string(1.5e-7), "1.5e-7");
    assert_eq!(number_to_string(0.000_001), "0.000001");
    assert_eq!(number_to_string(f64::NAN), "NaN");
    assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
}

#[test]
fn truthiness() {
    assert!(!Value::Undefined.to_boolean());
    assert!(!Value::Null.to_boolean());
    assert!(!Value::Number(0.0).to_boolean());
    assert!(!Value::Number(f64::NAN).to_boolean());
    assert!(!Value::string("").to_boolean());
    assert!(Value::string("0").to_boolean());
    assert!(Value::array(vec![]).to_boolean());
    assert!(Value::empty_object().to_boolean());
}

#[test]
fn string_to_number_conversions() {
    assert_eq!(Value::string("  42 ").to_number(), 42.0);
    assert_eq!(Value::string("").to_number(), 0.0);
    assert_eq!(Value::string("0x1f").to_number(), 31.0);
    assert_eq!(Value::string("-Infinity").to_number(), f64::NEG_INFINITY);
    assert!(Value::string("12px").to_number().is_nan());
    assert!(Value::string("inf").to_number().is_nan());
    assert_eq!(Value::Bool(true).to_number(), 1.0);
    assert_eq!(Value::Null.to_number(), 0.0);
    assert!(Value::Undefined.to_number().is_nan());
    assert_eq!(Value::array(vec![Value::Number(7.0)]).to_number(), 7.0);
}

#[test]
fn arrays_and_objects_stringify() {
    let nested = Value::array(vec![
        Value::Number(1.0),
        Value::Null,
        Value::array(vec![Value::string("a"), Value::Bool(false)]),
    ]);
    assert_eq!(nested.to_js_string(), "1,,a,false");
    assert_eq!(Value::empty_object().to_js_string(), "[object Object]");
}

#[test]
fn self_referencing_array_stringifies() {
    let items = Shared::new(vec![Value::Number(1.0)]);
    let array = Value::Array(items.clone());
    items.borrow_mut().push(array.clone());
    assert_eq!(array.to_js_string(), "1,");
}

#[test]
fn error_objects_stringify_with_name_and_message() {
    let mut obj = JsObject::plain(PropertyMap::default());
    obj.brand = ObjectBrand::Error("TypeError".into());
    obj.set("message".into(), Value::string("bad"));
    let value = Value::Object(Shared::new(obj));
    assert_eq!(value.to_js_string(), "TypeError: bad");
}

#[test]
fn int32_wraps() {
    assert_eq!(to_int32(&Value::Number(4_294_967_295.0)), -1);
    assert_eq!(to_int32(&Value::Number(-1.5)), -1);
    assert_eq!(to_uint32(&Value::Number(-1.0)), 4_294_967_295);
    assert_eq!(to_int32(&Value::Number(f64::NAN)), 0);
}

#[test]
fn strict_equality_uses_identity_for_references() {
    let a = Value::empty_object();
    let b = Value::empty_object();
    assert!(a.strict_equals(&a.clone()));
    assert!(!a.strict_equals(&b));
    assert!(!Value::Number(f64::NAN).strict_equals(&Value::Number(f64::NAN)));
    assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
    assert!(Value::Number(0.0).strict_equals(&Value::Number(-0.0)));
}

#[test]
fn typeof_names() {
    assert_eq!(Value::Null.type_of(), "object");
    assert_eq!(Value::array(vec![]).type_of(), "object");
    assert_eq!(
        Value::native(NativeFunction::new("f", 0, |_, _| Ok(Value::Undefined))).type_of(),
        "function"
    );
}
