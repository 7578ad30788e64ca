use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalErrorKind;

fn key(text: &str) -> Name {
    text.into()
}

fn call_member(base: &Value, name: &str, args: &[Value]) -> Value {
    let Value::Native(method) = get_property(base, &key(name)).unwrap() else {
        panic!("{name} is not a built-in member");
    };
    method.call(base, args).unwrap()
}

#[test]
fn reading_from_nullish_fails() {
    let err = get_property(&Value::Undefined, &key("x")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot read properties of undefined (reading 'x')"
    );
    assert!(set_property(&Value::Null, key("x"), Value::Null).is_err());
}

#[test]
fn object_properties_round_trip() {
    let obj = Value::empty_object();
    set_property(&obj, key("b"), Value::Number(1.0)).unwrap();
    assert_eq!(get_property(&obj, &key("b")).unwrap(), Value::Number(1.0));
    assert_eq!(get_property(&obj, &key("missing")).unwrap(), Value::Undefined);
    assert!(delete_property(&obj, "b").unwrap());
    assert!(!has_property(&obj, "b"));
}

#[test]
fn array_index_and_length() {
    let arr = Value::array(vec![Value::Number(1.0), Value::Number(2.0)]);
    assert_eq!(get_property(&arr, &key("1")).unwrap(), Value::Number(2.0));
    assert_eq!(get_property(&arr, &key("length")).unwrap(), Value::Number(2.0));

    set_property(&arr, key("4"), Value::Bool(true)).unwrap();
    assert_eq!(get_property(&arr, &key("length")).unwrap(), Value::Number(5.0));
    assert_eq!(get_property(&arr, &key("3")).unwrap(), Value::Undefined);

    set_property(&arr, key("length"), Value::Number(1.0)).unwrap();
    assert_eq!(arr.to_js_string(), "1");
}

#[test]
fn oversized_array_writes_fail_without_growing() {
    let arr = Value::array(vec![Value::Number(1.0)]);

    let err = set_property(&arr, key("1000000000000000"), Value::Number(1.0)).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::TypeError { .. }), "{err}");

    let err = set_property(&arr, key("4294967295"), Value::Number(1.0)).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::TypeError { .. }), "{err}");

    let err = set_property(&arr, key("4294967294"), Value::Number(1.0)).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::RangeError { .. }), "{err}");
    assert_eq!(err.to_string(), "Invalid array length");

    let err = set_property(&arr, key("length"), Value::Number(4e9)).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::RangeError { .. }), "{err}");
    assert_eq!(err.to_string(), "Invalid array length");

    let err = set_property(&arr, key("length"), Value::Number(1.5)).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::RangeError { .. }), "{err}");
    assert_eq!(err.to_string(), "Invalid array length");

    assert_eq!(get_property(&arr, &key("length")).unwrap(), Value::Number(1.0));
}

#[test]
fn string_indices_count_utf16_units() {
    let text = Value::string("a\u{1F600}b");
    assert_eq!(get_property(&text, &key("length")).unwrap(), Value::Number(4.0));
    assert_eq!(get_property(&text, &key("0")).unwrap(), Value::string("a"));
    assert_eq!(get_property(&text, &key("3")).unwrap(), Value::string("b"));
    assert_eq!(get_property(&text, &key("1")).unwrap(), Value::string("\u{FFFD}"));
    assert_eq!(get_property(&text, &key("4")).unwrap(), Value::Undefined);
    assert_eq!(enumerable_keys(&text).len(), 4);
}

#[test]
fn array_methods() {
    let arr = Value::array(vec![]);
    assert_eq!(
        call_member(&arr, "push", &[Value::Number(0.0), Value::Number(1.0)]),
        Value::Number(2.0)
    );
    assert_eq!(call_member(&arr, "join", &[Value::string("-")]), Value::string("0-1"));
    assert_eq!(call_member(&arr, "indexOf", &[Value::Number(1.0)]), Value::Number(1.0));
    assert_eq!(call_member(&arr, "pop", &[]), Value::Number(1.0));
    assert_eq!(call_member(&arr, "unshift", &[Value::string("a")]), Value::Number(2.0));
    assert_eq!(arr.to_js_string(), "a,0");

    let sliced = call_member(&arr, "slice", &[Value::Number(-1.0)]);
    assert_eq!(sliced.to_js_string(), "0");
}

#[test]
fn string_members() {
    let text = Value::string("Hello");
    assert_eq!(get_property(&text, &key("length")).unwrap(), Value::Number(5.0));
    assert_eq!(get_property(&text, &key("1")).unwrap(), Value::string("e"));
    assert_eq!(call_member(&text, "toUpperCase", &[]), Value::string("HELLO"));
    assert_eq!(call_member(&text, "indexOf", &[Value::string("l")]), Value::Number(2.0));
    assert_eq!(
        call_member(&text, "slice", &[Value::Number(1.0), Value::Number(-1.0)]),
        Value::string("ell")
    );
    let parts = call_member(&Value::string("a,b"), "split", &[Value::string(",")]);
    assert_eq!(parts.to_js_string(), "a,b");
    assert_eq!(get_property(&parts, &key("length")).unwrap(), Value::Number(2.0));
}

#[test]
fn number_members() {
    let n = Value::Number(255.0);
    assert_eq!(call_member(&n, "toString", &[Value::Number(16.0)]), Value::string("ff"));
    assert_eq!(
        call_member(&Value::Number(1.005), "toFixed", &[Value::Number(1.0)]),
        Value::string("1.0")
    );
}

#[test]
fn canonical_array_indices() {
    assert_eq!(array_index("0"), Some(0));
    assert_eq!(array_index("42"), Some(42));
    assert_eq!(array_index("01"), None);
    assert_eq!(array_index("1.5"), None);
    assert_eq!(array_index(""), None);
    assert_eq!(array_index("-1"), None);
    assert_eq!(array_index("4294967294"), Some(4_294_967_294));
    assert_eq!(array_index("4294967295"), None);
}

#[test]
fn enumerable_keys_follow_insertion_order() {
    let obj = Value::object_from([("z", Value::Null), ("a", Value::Null)]);
    assert_eq!(enumerable_keys(&obj), vec![key("z"), key("a")]);
    let arr = Value::array(vec![Value::Null, Value::Null]);
    assert_eq!(enumerable_keys(&arr), vec![key("0"), key("1")]);
    assert!(enumerable_keys(&Value::Number(3.0)).is_empty());
}

#[test]
fn has_own_property_is_available_on_objects() {
    let obj = Value::object_from([("hello", Value::string("world"))]);
    assert_eq!(
        call_member(&obj, "hasOwnProperty", &[Value::string("hello")]),
        Value::Bool(true)
    );
    assert_eq!(
        call_member(&obj, "hasOwnProperty", &[Value::string("nope")]),
        Value::Bool(false)
    );
}
