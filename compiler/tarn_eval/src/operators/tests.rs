use pretty_assertions::assert_eq;
use tarn_ir::{BinaryOp, UnaryOp};

use super::*;
use crate::value::NativeFunction;

fn num(n: f64) -> Value {
    Value::Number(n)
}

fn s(text: &str) -> Value {
    Value::string(text)
}

fn bin(left: Value, op: BinaryOp, right: Value) -> Value {
    evaluate_binary(&left, &right, op).unwrap()
}

#[test]
fn arithmetic() {
    assert_eq!(bin(num(7.0), BinaryOp::Mod, num(3.0)), num(1.0));
    assert_eq!(bin(num(-7.0), BinaryOp::Mod, num(3.0)), num(-1.0));
    assert_eq!(bin(num(2.0), BinaryOp::Exp, num(10.0)), num(1024.0));
    assert_eq!(bin(num(1.0), BinaryOp::Div, num(0.0)), num(f64::INFINITY));
    assert!(bin(num(1.0), BinaryOp::Exp, num(f64::INFINITY))
        .as_number()
        .is_some_and(f64::is_nan));
}

#[test]
fn plus_concatenates_when_either_side_is_a_string() {
    assert_eq!(bin(s(""), BinaryOp::Add, num(0.0)), s("0"));
    assert_eq!(bin(num(1.0), BinaryOp::Add, s("2")), s("12"));
    assert_eq!(bin(Value::Bool(true), BinaryOp::Add, num(1.0)), num(2.0));
    assert_eq!(
        bin(Value::array(vec![num(1.0), num(2.0)]), BinaryOp::Add, s("!")),
        s("1,2!")
    );
    assert_eq!(bin(Value::Null, BinaryOp::Add, num(1.0)), num(1.0));
}

#[test]
fn equality() {
    assert_eq!(bin(num(1.0), BinaryOp::LooseEq, s("1")), Value::Bool(true));
    assert_eq!(bin(Value::Null, BinaryOp::LooseEq, Value::Undefined), Value::Bool(true));
    assert_eq!(bin(Value::Null, BinaryOp::LooseEq, num(0.0)), Value::Bool(false));
    assert_eq!(bin(Value::Bool(true), BinaryOp::LooseEq, s("1")), Value::Bool(true));
    assert_eq!(bin(num(1.0), BinaryOp::StrictEq, s("1")), Value::Bool(false));
    assert_eq!(
        bin(Value::array(vec![]), BinaryOp::LooseEq, s("")),
        Value::Bool(true)
    );
    assert_eq!(
        bin(num(f64::NAN), BinaryOp::StrictNotEq, num(f64::NAN)),
        Value::Bool(true)
    );
}

#[test]
fn relational() {
    assert_eq!(bin(num(1.0), BinaryOp::Lt, num(2.0)), Value::Bool(true));
    assert_eq!(bin(s("b"), BinaryOp::Gt, s("abc")), Value::Bool(true));
    assert_eq!(bin(s("10"), BinaryOp::Lt, num(9.0)), Value::Bool(false));
    assert_eq!(bin(num(f64::NAN), BinaryOp::LtEq, num(1.0)), Value::Bool(false));
    assert_eq!(bin(num(2.0), BinaryOp::GtEq, num(2.0)), Value::Bool(true));
}

#[test]
fn bitwise_and_shifts() {
    assert_eq!(bin(num(5.0), BinaryOp::BitAnd, num(3.0)), num(1.0));
    assert_eq!(bin(num(5.0), BinaryOp::BitOr, num(3.0)), num(7.0));
    assert_eq!(bin(num(5.0), BinaryOp::BitXor, num(3.0)), num(6.0));
    assert_eq!(bin(num(1.0), BinaryOp::Shl, num(33.0)), num(2.0));
    assert_eq!(bin(num(-8.0), BinaryOp::Shr, num(1.0)), num(-4.0));
    assert_eq!(bin(num(-1.0), BinaryOp::UShr, num(28.0)), num(15.0));
}

#[test]
fn in_checks_own_keys() {
    let obj = Value::object_from([("a", num(1.0))]);
    assert_eq!(bin(s("a"), BinaryOp::In, obj.clone()), Value::Bool(true));
    assert_eq!(bin(s("b"), BinaryOp::In, obj), Value::Bool(false));
    let arr = Value::array(vec![num(1.0)]);
    assert_eq!(bin(num(0.0), BinaryOp::In, arr.clone()), Value::Bool(true));
    assert_eq!(bin(s("length"), BinaryOp::In, arr), Value::Bool(true));
    assert!(evaluate_binary(&s("a"), &num(1.0), BinaryOp::In).is_err());
}

#[test]
fn instanceof_uses_host_checks() {
    let array_ctor = Value::native(
        NativeFunction::new("Array", 0, |_, _| Ok(Value::array(vec![])))
            .constructor(|v| matches!(v, Value::Array(_))),
    );
    assert_eq!(
        bin(Value::array(vec![]), BinaryOp::InstanceOf, array_ctor.clone()),
        Value::Bool(true)
    );
    assert_eq!(
        bin(Value::empty_object(), BinaryOp::InstanceOf, array_ctor),
        Value::Bool(false)
    );
    assert!(evaluate_binary(&Value::empty_object(), &num(1.0), BinaryOp::InstanceOf).is_err());
}

#[test]
fn unary_chain() {
    // ~ + - ! void 1
    let v = evaluate_unary(UnaryOp::Void, &num(1.0)).unwrap();
    let v = evaluate_unary(UnaryOp::Not, &v).unwrap();
    let v = evaluate_unary(UnaryOp::Neg, &v).unwrap();
    let v = evaluate_unary(UnaryOp::Plus, &v).unwrap();
    let v = evaluate_unary(UnaryOp::BitNot, &v).unwrap();
    assert_eq!(v, num(0.0));
    assert_eq!(evaluate_unary(UnaryOp::TypeOf, &Value::Null).unwrap(), s("object"));
}
