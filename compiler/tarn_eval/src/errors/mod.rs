//! Evaluation errors.
//!
//! `EvalErrorKind` is the typed category; `EvalError` wraps it with the
//! call-stack backtrace captured at the error site. Factory functions are
//! the construction API used throughout the evaluator.
//!
//! Errors split into two families:
//! - catchable: everything a script's `try` can observe. Materialized as an
//!   error object (or the thrown value itself) when caught.
//! - fatal: structural problems in the tree (redeclarations, unsupported
//!   nodes, escaped `break`/`continue`). These bypass `catch` and `finally`.

use std::fmt;

use tarn_ir::Name;
use thiserror::Error;

use crate::shared::Shared;
use crate::value::{JsObject, ObjectBrand, PropertyMap, Value};

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

#[derive(Clone, Debug, Error)]
pub enum EvalErrorKind {
    #[error("{name} is not defined")]
    UnboundIdentifier { name: Name },

    #[error("Identifier '{name}' has already been declared")]
    DeclarationConflict { name: Name },

    #[error("Assignment to constant variable '{name}'.")]
    ConstReassignment { name: Name },

    #[error("unsupported node: {kind}")]
    UnsupportedNode { kind: &'static str },

    #[error("{}", jump_message("break", .label.as_deref()))]
    IllegalBreak { label: Option<Name> },

    #[error("{}", jump_message("continue", .label.as_deref()))]
    IllegalContinue { label: Option<Name> },

    #[error("{callee} is not a function")]
    NotCallable { callee: String },

    #[error("{callee} is not a constructor")]
    NotConstructor { callee: String },

    #[error("Cannot read properties of {base} (reading '{property}')")]
    CannotReadProperty { base: &'static str, property: Name },

    #[error("Cannot set properties of {base} (setting '{property}')")]
    CannotSetProperty { base: &'static str, property: Name },

    #[error("{message}")]
    TypeError { message: String },

    #[error("{message}")]
    RangeError { message: String },

    #[error("Maximum call stack size exceeded (depth {depth})")]
    StackOverflow { depth: usize },

    #[error("Uncaught {0}")]
    Thrown(Value),
}

fn jump_message(keyword: &str, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("Undefined label '{label}' for {keyword}"),
        None => format!("Illegal {keyword} statement"),
    }
}

impl EvalErrorKind {
    /// Whether a script-level `try` can observe this error.
    pub fn is_catchable(&self) -> bool {
        !matches!(
            self,
            EvalErrorKind::DeclarationConflict { .. }
                | EvalErrorKind::UnsupportedNode { .. }
                | EvalErrorKind::IllegalBreak { .. }
                | EvalErrorKind::IllegalContinue { .. }
        )
    }

    /// Constructor name of the error object a script sees.
    pub fn js_error_name(&self) -> &'static str {
        match self {
            EvalErrorKind::UnboundIdentifier { .. } => "ReferenceError",
            EvalErrorKind::DeclarationConflict { .. }
            | EvalErrorKind::IllegalBreak { .. }
            | EvalErrorKind::IllegalContinue { .. } => "SyntaxError",
            EvalErrorKind::StackOverflow { .. } | EvalErrorKind::RangeError { .. } => "RangeError",
            EvalErrorKind::UnsupportedNode { .. } | EvalErrorKind::Thrown(_) => "Error",
            EvalErrorKind::ConstReassignment { .. }
            | EvalErrorKind::NotCallable { .. }
            | EvalErrorKind::NotConstructor { .. }
            | EvalErrorKind::CannotReadProperty { .. }
            | EvalErrorKind::CannotSetProperty { .. }
            | EvalErrorKind::TypeError { .. } => "TypeError",
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: Name,
}

/// Snapshot of the interpreted call stack at an error site, most recent
/// call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {}", frame.name)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Interpreted calls active when the error was raised.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            backtrace: None,
        }
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    #[inline]
    pub fn is_catchable(&self) -> bool {
        self.kind.is_catchable()
    }

    /// The value a `catch` clause binds.
    ///
    /// Thrown values pass through unchanged; every other catchable kind
    /// becomes an error object carrying `name` and `message`.
    pub fn into_thrown_value(self) -> Value {
        match self.kind {
            EvalErrorKind::Thrown(value) => value,
            kind => error_object(kind.js_error_name(), &kind.to_string()),
        }
    }

    /// The thrown value, if this error came from a `throw`.
    pub fn thrown_value(&self) -> Option<&Value> {
        match &self.kind {
            EvalErrorKind::Thrown(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for EvalError {}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

/// Build an error object as the error constructors do.
pub fn error_object(name: &str, message: &str) -> Value {
    let mut properties = PropertyMap::default();
    properties.insert("name".into(), Value::string(name));
    properties.insert("message".into(), Value::string(message));
    Value::Object(Shared::new(JsObject {
        properties,
        brand: ObjectBrand::Error(name.into()),
    }))
}

// Factories

#[cold]
pub fn unbound_identifier(name: &Name) -> EvalError {
    EvalErrorKind::UnboundIdentifier { name: name.clone() }.into()
}

#[cold]
pub fn declaration_conflict(name: &Name) -> EvalError {
    EvalErrorKind::DeclarationConflict { name: name.clone() }.into()
}

#[cold]
pub fn const_reassignment(name: &Name) -> EvalError {
    EvalErrorKind::ConstReassignment { name: name.clone() }.into()
}

#[cold]
pub fn unsupported_node(kind: &'static str) -> EvalError {
    EvalErrorKind::UnsupportedNode { kind }.into()
}

#[cold]
pub fn illegal_break(label: Option<Name>) -> EvalError {
    EvalErrorKind::IllegalBreak { label }.into()
}

#[cold]
pub fn illegal_continue(label: Option<Name>) -> EvalError {
    EvalErrorKind::IllegalContinue { label }.into()
}

#[cold]
pub fn not_callable(callee: impl Into<String>) -> EvalError {
    EvalErrorKind::NotCallable {
        callee: callee.into(),
    }
    .into()
}

#[cold]
pub fn not_constructor(callee: impl Into<String>) -> EvalError {
    EvalErrorKind::NotConstructor {
        callee: callee.into(),
    }
    .into()
}

#[cold]
pub fn cannot_read_property(base: &Value, property: Name) -> EvalError {
    EvalErrorKind::CannotReadProperty {
        base: nullish_name(base),
        property,
    }
    .into()
}

#[cold]
pub fn cannot_set_property(base: &Value, property: Name) -> EvalError {
    EvalErrorKind::CannotSetProperty {
        base: nullish_name(base),
        property,
    }
    .into()
}

#[cold]
pub fn type_error(message: impl Into<String>) -> EvalError {
    EvalErrorKind::TypeError {
        message: message.into(),
    }
    .into()
}

#[cold]
pub fn range_error(message: impl Into<String>) -> EvalError {
    EvalErrorKind::RangeError {
        message: message.into(),
    }
    .into()
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalErrorKind::StackOverflow { depth }.into()
}

#[cold]
pub fn thrown(value: Value) -> EvalError {
    EvalErrorKind::Thrown(value).into()
}

fn nullish_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        _ => "undefined",
    }
}

#[cfg(test)]
mod tests;
