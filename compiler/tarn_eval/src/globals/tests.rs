use pretty_assertions::assert_eq;

use super::*;
use crate::console::buffer_console;
use crate::environment::Scope;
use crate::methods::get_property;

fn call(value: &Value, args: &[Value]) -> Value {
    let Value::Native(native) = value else {
        panic!("not a host function: {value:?}");
    };
    native.call(&Value::Undefined, args).unwrap()
}

fn member(value: &Value, key: &str) -> Value {
    get_property(value, &key.into()).unwrap()
}

#[test]
fn install_declares_vars_in_order() {
    let bindings: HostBindings = [("a", Value::Number(1.0)), ("b", Value::Null)]
        .into_iter()
        .collect();
    let scope = Scope::root();
    bindings.install(&scope).unwrap();

    assert_eq!(scope.borrow().lookup("a"), Some(Value::Number(1.0)));
    assert_eq!(
        scope.borrow().declaration_kind("b"),
        Some(crate::environment::DeclarationKind::Var)
    );
    let names: Vec<&str> = bindings.iter().map(|(name, _)| &**name).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn insert_replaces_existing_entry() {
    let mut bindings = HostBindings::new();
    bindings.insert("x", Value::Number(1.0)).insert("x", Value::Number(2.0));
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings.get("x"), Some(&Value::Number(2.0)));
}

#[test]
fn native_registers_callable() {
    let mut bindings = HostBindings::new();
    bindings.native("double", 1, |_, args| {
        Ok(Value::Number(args.first().map_or(0.0, Value::to_number) * 2.0))
    });
    let double = bindings.get("double").cloned().unwrap();
    assert_eq!(call(&double, &[Value::Number(4.0)]), Value::Number(8.0));
}

#[test]
fn standard_catalog_contents() {
    let bindings = HostBindings::standard(buffer_console());
    for name in [
        "undefined", "NaN", "Infinity", "console", "JSON", "Math", "Object", "Array", "isNaN",
        "isFinite", "parseInt", "parseFloat", "String", "Number", "Boolean", "Error",
        "TypeError", "ReferenceError", "RangeError", "SyntaxError",
    ] {
        assert!(bindings.get(name).is_some(), "missing {name}");
    }
}

#[test]
fn console_writes_to_shared_sink() {
    let console = buffer_console();
    let bindings = HostBindings::standard(console.clone());
    let console_obj = bindings.get("console").cloned().unwrap();
    call(&member(&console_obj, "log"), &[Value::string("hi"), Value::Number(2.0)]);
    call(&member(&console_obj, "error"), &[Value::array(vec![Value::Number(1.0)])]);
    assert_eq!(console.output(), "hi 2\n[ 1 ]\n");
}

#[test]
fn json_stringify_shapes() {
    let value = Value::object_from([
        ("a", Value::Number(1.0)),
        ("b", Value::array(vec![Value::Undefined, Value::string("x\"y")])),
        ("skip", Value::Undefined),
        ("f", Value::Number(1.5)),
    ]);
    assert_eq!(
        json_stringify(&value, None).unwrap(),
        Value::string(r#"{"a":1,"b":[null,"x\"y"],"f":1.5}"#)
    );
    assert_eq!(json_stringify(&Value::Undefined, None).unwrap(), Value::Undefined);
    assert_eq!(
        json_stringify(&Value::Number(f64::NAN), None).unwrap(),
        Value::string("null")
    );
}

#[test]
fn json_stringify_indents() {
    let value = Value::object_from([("a", Value::array(vec![Value::Number(1.0)]))]);
    assert_eq!(
        json_stringify(&value, Some(&Value::Number(2.0))).unwrap(),
        Value::string("{\n  \"a\": [\n    1\n  ]\n}")
    );
}

#[test]
fn json_stringify_rejects_cycles() {
    let obj = Value::empty_object();
    crate::methods::set_property(&obj, "self".into(), obj.clone()).unwrap();
    let err = json_stringify(&obj, None).unwrap_err();
    assert_eq!(err.to_string(), "Converting circular structure to JSON");
}

#[test]
fn json_parse_preserves_key_order() {
    let parsed = json_parse(r#"{"z": 1, "a": [true, null, "s"]}"#).unwrap();
    assert_eq!(
        crate::methods::enumerable_keys(&parsed),
        vec![tarn_ir::Name::from("z"), tarn_ir::Name::from("a")]
    );
    assert_eq!(member(&parsed, "a").to_js_string(), "true,,s");
}

#[test]
fn json_parse_errors_are_thrown_syntax_errors() {
    let err = json_parse("{oops").unwrap_err();
    let thrown = err.thrown_value().cloned().unwrap();
    assert_eq!(member(&thrown, "name"), Value::string("SyntaxError"));
}

#[test]
fn object_assign_and_keys() {
    let bindings = HostBindings::standard(buffer_console());
    let object = bindings.get("Object").cloned().unwrap();
    let target = Value::empty_object();
    let source = Value::object_from([("hello", Value::string("world"))]);
    let result = call(&member(&object, "assign"), &[target.clone(), source]);
    assert!(result.strict_equals(&target));
    assert_eq!(member(&target, "hello"), Value::string("world"));

    let keys = call(&member(&object, "keys"), &[target]);
    assert_eq!(keys.to_js_string(), "hello");
}

#[test]
fn array_constructor_bounds_its_length() {
    let bindings = HostBindings::standard(buffer_console());
    let Some(Value::Native(array)) = bindings.get("Array").cloned() else {
        panic!("Array is not a host function");
    };
    let sized = array.call(&Value::Undefined, &[Value::Number(3.0)]).unwrap();
    assert_eq!(member(&sized, "length"), Value::Number(3.0));

    for len in [-1.0, 2.5, 1e9] {
        let err = array.call(&Value::Undefined, &[Value::Number(len)]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid array length");
    }
}

#[test]
fn math_functions() {
    let bindings = HostBindings::standard(buffer_console());
    let math = bindings.get("Math").cloned().unwrap();
    assert_eq!(call(&member(&math, "floor"), &[Value::Number(2.7)]), Value::Number(2.0));
    assert_eq!(call(&member(&math, "round"), &[Value::Number(2.5)]), Value::Number(3.0));
    assert_eq!(call(&member(&math, "round"), &[Value::Number(-2.5)]), Value::Number(-2.0));
    assert_eq!(
        call(&member(&math, "max"), &[Value::Number(1.0), Value::Number(9.0)]),
        Value::Number(9.0)
    );
    assert_eq!(call(&member(&math, "min"), &[]), Value::Number(f64::INFINITY));
}

#[test]
fn error_constructors_brand_their_objects() {
    let bindings = HostBindings::standard(buffer_console());
    let type_error = bindings.get("TypeError").cloned().unwrap();
    let err = call(&type_error, &[Value::string("bad")]);
    assert_eq!(member(&err, "message"), Value::string("bad"));
    assert_eq!(err.to_js_string(), "TypeError: bad");

    let Value::Native(type_ctor) = &type_error else {
        unreachable!()
    };
    let Value::Native(error_ctor) = bindings.get("Error").unwrap() else {
        unreachable!()
    };
    let Value::Native(range_ctor) = bindings.get("RangeError").unwrap() else {
        unreachable!()
    };
    assert!(type_ctor.has_instance(&err));
    assert!(error_ctor.has_instance(&err));
    assert!(!range_ctor.has_instance(&err));
}
