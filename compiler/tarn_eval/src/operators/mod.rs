//! Binary operator semantics.
//!
//! Pure functions over values: no scope access, no user calls. Objects
//! take part through their string form, which is what `ToPrimitive`
//! yields without user-defined `valueOf`/`toString`.

mod unary;

use std::cmp::Ordering;

use tarn_ir::BinaryOp;

use crate::errors::{self, EvalResult};
use crate::methods;
use crate::value::{to_int32, to_uint32, ObjectBrand, Value};

pub use unary::evaluate_unary;

/// Evaluate `left op right` on already evaluated operands.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let result = match op {
        BinaryOp::LooseEq => Value::Bool(loose_equals(left, right)),
        BinaryOp::LooseNotEq => Value::Bool(!loose_equals(left, right)),
        BinaryOp::StrictEq => Value::Bool(left.strict_equals(right)),
        BinaryOp::StrictNotEq => Value::Bool(!left.strict_equals(right)),

        BinaryOp::Lt => Value::Bool(compare(left, right) == Some(Ordering::Less)),
        BinaryOp::Gt => Value::Bool(compare(left, right) == Some(Ordering::Greater)),
        BinaryOp::LtEq => Value::Bool(matches!(
            compare(left, right),
            Some(Ordering::Less | Ordering::Equal)
        )),
        BinaryOp::GtEq => Value::Bool(matches!(
            compare(left, right),
            Some(Ordering::Greater | Ordering::Equal)
        )),

        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => Value::Number(left.to_number() - right.to_number()),
        BinaryOp::Mul => Value::Number(left.to_number() * right.to_number()),
        BinaryOp::Div => Value::Number(left.to_number() / right.to_number()),
        BinaryOp::Mod => Value::Number(left.to_number() % right.to_number()),
        BinaryOp::Exp => Value::Number(power(left.to_number(), right.to_number())),

        BinaryOp::Shl => {
            let shift = to_uint32(right) & 31;
            Value::Number(f64::from(to_int32(left).wrapping_shl(shift)))
        }
        BinaryOp::Shr => {
            let shift = to_uint32(right) & 31;
            Value::Number(f64::from(to_int32(left) >> shift))
        }
        BinaryOp::UShr => {
            let shift = to_uint32(right) & 31;
            Value::Number(f64::from(to_uint32(left) >> shift))
        }
        BinaryOp::BitAnd => Value::Number(f64::from(to_int32(left) & to_int32(right))),
        BinaryOp::BitOr => Value::Number(f64::from(to_int32(left) | to_int32(right))),
        BinaryOp::BitXor => Value::Number(f64::from(to_int32(left) ^ to_int32(right))),

        BinaryOp::In => {
            if !right.is_reference() {
                return Err(errors::type_error(format!(
                    "Cannot use 'in' operator to search for '{left}' in {right}"
                )));
            }
            Value::Bool(methods::has_property(right, &left.to_property_key()))
        }
        BinaryOp::InstanceOf => Value::Bool(instance_of(left, right)?),
    };
    Ok(result)
}

/// `ToPrimitive` without user hooks.
fn to_primitive(value: &Value) -> Value {
    if value.is_reference() {
        Value::Str(value.to_js_string().into())
    } else {
        value.clone()
    }
}

fn add(left: &Value, right: &Value) -> Value {
    let left = to_primitive(left);
    let right = to_primitive(right);
    match (&left, &right) {
        (Value::Str(a), b) => Value::Str(format!("{a}{}", b.to_js_string()).into()),
        (a, Value::Str(b)) => Value::Str(format!("{}{b}", a.to_js_string()).into()),
        _ => Value::Number(left.to_number() + right.to_number()),
    }
}

fn power(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        return f64::NAN;
    }
    base.powf(exponent)
}

/// Abstract equality (`==`).
pub fn loose_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
        (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
        (Value::Number(a), Value::Str(_)) => *a == right.to_number(),
        (Value::Str(_), Value::Number(b)) => left.to_number() == *b,
        (Value::Bool(_), _) => loose_equals(&Value::Number(left.to_number()), right),
        (_, Value::Bool(_)) => loose_equals(left, &Value::Number(right.to_number())),
        (l, r) if l.is_reference() && !r.is_reference() => loose_equals(&to_primitive(l), r),
        (l, r) if !l.is_reference() && r.is_reference() => loose_equals(l, &to_primitive(r)),
        _ => left.strict_equals(right),
    }
}

/// Relational comparison; `None` when either side is `NaN`.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    let left = to_primitive(left);
    let right = to_primitive(right);
    if let (Value::Str(a), Value::Str(b)) = (&left, &right) {
        return Some(a.encode_utf16().cmp(b.encode_utf16()));
    }
    left.to_number().partial_cmp(&right.to_number())
}

/// `value instanceof constructor`, without prototype chains: an object
/// is an instance of the user function that `new` built it with, or of a
/// host constructor whose instance check accepts it.
fn instance_of(value: &Value, constructor: &Value) -> Result<bool, errors::EvalError> {
    match constructor {
        Value::Function(ctor) => Ok(match value {
            Value::Object(obj) => match &obj.borrow().brand {
                ObjectBrand::Instance(made_by) => std::rc::Rc::ptr_eq(made_by, ctor),
                ObjectBrand::Plain | ObjectBrand::Error(_) => false,
            },
            _ => false,
        }),
        Value::Native(native) => Ok(native.has_instance(value)),
        _ => Err(errors::type_error(
            "Right-hand side of 'instanceof' is not callable",
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
