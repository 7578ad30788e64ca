//! Runtime values.
//!
//! Primitives are stored inline. Arrays, objects and functions are
//! reference types: cloning a `Value` clones the handle, and strict
//! equality compares identity.

mod convert;
mod number;

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tarn_ir::ast::Function;
use tarn_ir::Name;

use crate::environment::ScopeRef;
use crate::errors::EvalResult;
use crate::shared::Shared;

pub use convert::{to_int32, to_uint32};
pub use number::number_to_string;

/// Insertion-ordered own properties.
pub type PropertyMap = IndexMap<Name, Value, FxBuildHasher>;

/// Signature of host functions: `(this, arguments)`.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> EvalResult;

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(Name),
    Array(Shared<Vec<Value>>),
    Object(Shared<JsObject>),
    Function(Rc<Closure>),
    Native(Rc<NativeFunction>),
}

impl Value {
    pub fn string(text: &str) -> Self {
        Value::Str(text.into())
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Shared::new(items))
    }

    pub fn object(properties: PropertyMap) -> Self {
        Value::Object(Shared::new(JsObject::plain(properties)))
    }

    /// An empty `{}`.
    pub fn empty_object() -> Self {
        Value::object(PropertyMap::default())
    }

    /// Build a plain object from `(key, value)` pairs.
    pub fn object_from<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Value)>,
    {
        Value::object(
            entries
                .into_iter()
                .map(|(key, value)| (Name::from(key), value))
                .collect(),
        )
    }

    pub fn native(native: NativeFunction) -> Self {
        Value::Native(Rc::new(native))
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Native(_))
    }

    /// Objects, arrays and functions.
    #[inline]
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Native(_)
        )
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Identity of reference values, `None` for primitives.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(items) => Some(items.addr()),
            Value::Object(obj) => Some(obj.addr()),
            Value::Function(closure) => Some(Rc::as_ptr(closure).cast::<()>() as usize),
            Value::Native(native) => Some(Rc::as_ptr(native).cast::<()>() as usize),
            _ => None,
        }
    }

    /// The `typeof` result.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null | Value::Array(_) | Value::Object(_) => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Function(_) | Value::Native(_) => "function",
        }
    }

    /// Strict equality (`===`).
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => match (self.identity(), other.identity()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

/// Strict equality, except that `NaN` equals itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan() => true,
            _ => self.strict_equals(other),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Array(items) => match items.try_borrow() {
                Ok(items) => write!(f, "Array(len={})", items.len()),
                Err(_) => f.write_str("Array(<borrowed>)"),
            },
            Value::Object(obj) => match obj.try_borrow() {
                Ok(obj) => f
                    .debug_struct("Object")
                    .field("brand", &obj.brand)
                    .field("keys", &obj.properties.keys().collect::<Vec<_>>())
                    .finish(),
                Err(_) => f.write_str("Object(<borrowed>)"),
            },
            Value::Function(closure) => write!(f, "Function({})", closure.display_name()),
            Value::Native(native) => write!(f, "Native({})", native.name),
        }
    }
}

/// `ToString` rendering.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_js_string())
    }
}

/// What created an object; stands in for prototype identity.
#[derive(Clone, Debug, Default)]
pub enum ObjectBrand {
    #[default]
    Plain,
    /// Built by one of the error constructors; holds the constructor name.
    Error(Name),
    /// Built by `new` on a user function.
    Instance(Rc<Closure>),
}

#[derive(Clone, Debug, Default)]
pub struct JsObject {
    pub properties: PropertyMap,
    pub brand: ObjectBrand,
}

impl JsObject {
    pub fn plain(properties: PropertyMap) -> Self {
        JsObject {
            properties,
            brand: ObjectBrand::Plain,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn set(&mut self, key: Name, value: Value) {
        self.properties.insert(key, value);
    }
}

/// Whether a closure came from `function` or `=>` syntax.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClosureKind {
    /// Binds its own `this` and `arguments`; may be used with `new`.
    Normal,
    /// Sees `this` and `arguments` of the defining scope.
    Arrow,
}

/// A user function: its syntax plus the scope it was defined in.
pub struct Closure {
    pub name: Option<Name>,
    pub node: Rc<Function>,
    pub scope: ScopeRef,
    pub kind: ClosureKind,
    /// Own properties (`fn.cache = ...`).
    pub props: Shared<JsObject>,
}

impl Closure {
    pub fn new(name: Option<Name>, node: Rc<Function>, scope: ScopeRef, kind: ClosureKind) -> Self {
        Closure {
            name,
            node,
            scope,
            kind,
            props: Shared::default(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("anonymous")
    }

    /// Declared parameter count (`fn.length`), stopping at the first
    /// default or rest parameter.
    pub fn arity(&self) -> usize {
        self.node
            .params
            .iter()
            .take_while(|param| param.as_identifier().is_some())
            .count()
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("params", &self.node.params.len())
            .finish_non_exhaustive()
    }
}

/// Instance test used by `instanceof` for host constructors.
pub type InstanceCheck = fn(&Value) -> bool;

/// A function implemented by the host.
pub struct NativeFunction {
    pub name: Name,
    pub arity: usize,
    func: Box<NativeFn>,
    constructible: bool,
    instance_check: Option<InstanceCheck>,
    /// Own properties (`Math.PI`, `Object.assign`).
    pub props: Shared<JsObject>,
}

impl NativeFunction {
    pub fn new<F>(name: &str, arity: usize, func: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> EvalResult + 'static,
    {
        NativeFunction {
            name: name.into(),
            arity,
            func: Box::new(func),
            constructible: false,
            instance_check: None,
            props: Shared::default(),
        }
    }

    /// Allow `new` on this function. The function is called with an
    /// undefined `this` and its result is the constructed value.
    #[must_use]
    pub fn constructor(mut self, instance_check: InstanceCheck) -> Self {
        self.constructible = true;
        self.instance_check = Some(instance_check);
        self
    }

    /// Attach a static property.
    #[must_use]
    pub fn with_prop(self, key: &str, value: Value) -> Self {
        self.props.borrow_mut().set(key.into(), value);
        self
    }

    #[inline]
    pub fn call(&self, this: &Value, args: &[Value]) -> EvalResult {
        (self.func)(this, args)
    }

    #[inline]
    pub fn is_constructible(&self) -> bool {
        self.constructible
    }

    /// `value instanceof self`, if this function is a host constructor.
    pub fn has_instance(&self, value: &Value) -> bool {
        self.instance_check.is_some_and(|check| check(value))
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("constructible", &self.constructible)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
