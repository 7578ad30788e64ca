//! Unary operators that only need the operand's value.
//!
//! `typeof` on identifiers and `delete` depend on the operand's syntax and
//! live in the interpreter.

use tarn_ir::UnaryOp;

use crate::errors::{self, EvalResult};
use crate::value::{to_int32, Value};

pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    Ok(match op {
        UnaryOp::Neg => Value::Number(-operand.to_number()),
        UnaryOp::Plus => Value::Number(operand.to_number()),
        UnaryOp::Not => Value::Bool(!operand.to_boolean()),
        UnaryOp::BitNot => Value::Number(f64::from(!to_int32(operand))),
        UnaryOp::TypeOf => Value::string(operand.type_of()),
        UnaryOp::Void => Value::Undefined,
        UnaryOp::Delete => {
            return Err(errors::type_error(
                "delete needs a reference, not a value",
            ))
        }
    })
}
