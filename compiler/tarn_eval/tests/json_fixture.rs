#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

//! Programs loaded from parser output rather than built in Rust.

use pretty_assertions::assert_eq;
use tarn_eval::methods::get_property;
use tarn_eval::{evaluate, HostBindings, Interpreter, Value};
use tarn_ir::{from_json, SourceType};

#[test]
fn labeled_continue_from_json() {
    let program =
        from_json(include_str!("../../tarn_ir/tests/fixtures/labeled_continue.json")).unwrap();

    let result = evaluate(&program, HostBindings::new()).unwrap();

    assert_eq!(result, Value::string("0234"));
}

#[test]
fn module_export_is_callable_from_the_host() {
    let program = from_json(include_str!("fixtures/module_greet.json")).unwrap();
    assert_eq!(program.source_type, SourceType::Module);

    let mut interpreter = Interpreter::builder().module(true).build().unwrap();
    let exports = interpreter.run(&program).unwrap();
    let greet = get_property(&exports, &"greet".into()).unwrap();

    let greeting = interpreter
        .call_function(&greet, Value::Undefined, vec![Value::string("tarn")])
        .unwrap();

    assert_eq!(greeting, Value::string("hello tarn!"));
    // `prefix` is a root binding, not an export.
    assert_eq!(get_property(&exports, &"prefix".into()).unwrap(), Value::Undefined);
    assert_eq!(interpreter.global("prefix"), Some(Value::string("hello")));
}
