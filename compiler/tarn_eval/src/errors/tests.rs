use pretty_assertions::assert_eq;

use super::*;

#[test]
fn messages_match_script_visible_text() {
    assert_eq!(unbound_identifier(&"ccc".into()).to_string(), "ccc is not defined");
    assert_eq!(
        declaration_conflict(&"a".into()).to_string(),
        "Identifier 'a' has already been declared"
    );
    assert_eq!(
        const_reassignment(&"i".into()).to_string(),
        "Assignment to constant variable 'i'."
    );
    assert_eq!(illegal_break(None).to_string(), "Illegal break statement");
    assert_eq!(
        illegal_continue(Some("outer".into())).to_string(),
        "Undefined label 'outer' for continue"
    );
    assert_eq!(
        cannot_read_property(&Value::Null, "x".into()).to_string(),
        "Cannot read properties of null (reading 'x')"
    );
}

#[test]
fn structural_errors_are_fatal() {
    assert!(!declaration_conflict(&"a".into()).is_catchable());
    assert!(!unsupported_node("ClassDeclaration").is_catchable());
    assert!(!illegal_break(None).is_catchable());
    assert!(const_reassignment(&"a".into()).is_catchable());
    assert!(stack_overflow(10).is_catchable());
    assert!(thrown(Value::Number(1.0)).is_catchable());
}

#[test]
fn caught_errors_become_error_objects() {
    let caught = const_reassignment(&"i".into()).into_thrown_value();
    let Value::Object(obj) = caught else {
        panic!("expected an error object");
    };
    let obj = obj.borrow();
    assert_eq!(obj.get("name"), Some(&Value::string("TypeError")));
    assert_eq!(
        obj.get("message"),
        Some(&Value::string("Assignment to constant variable 'i'."))
    );
    assert!(matches!(obj.brand, ObjectBrand::Error(ref name) if &**name == "TypeError"));
}

#[test]
fn thrown_values_pass_through() {
    let err = thrown(Value::string("boom"));
    assert_eq!(err.to_string(), "Uncaught boom");
    assert_eq!(err.thrown_value(), Some(&Value::string("boom")));
    assert_eq!(err.into_thrown_value(), Value::string("boom"));
}

#[test]
fn backtrace_renders_most_recent_first() {
    let backtrace = EvalBacktrace::new(vec![
        BacktraceFrame { name: "inner".into() },
        BacktraceFrame { name: "outer".into() },
    ]);
    assert_eq!(
        backtrace.to_string(),
        "stack backtrace:\n  0: inner\n  1: outer\n"
    );
    let err = type_error("bad").with_backtrace(backtrace);
    assert_eq!(err.backtrace.map(|bt| bt.len()), Some(2));
}
