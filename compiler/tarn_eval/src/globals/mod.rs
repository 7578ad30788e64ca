//! Initial bindings supplied by the embedder.
//!
//! The evaluator starts from an empty root scope; everything a script can
//! reach without declaring it comes from a `HostBindings` table installed
//! as `var` bindings before execution. `HostBindings::standard` assembles a
//! small conventional catalog; embedders can start from it or from nothing.

mod json;
mod standard;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tarn_ir::Name;

use crate::console::SharedConsole;
use crate::environment::{DeclarationKind, ScopeRef};
use crate::errors::{EvalError, EvalResult};
use crate::value::{NativeFunction, Value};

pub use json::{json_parse, json_stringify};

/// Ordered name → value table.
#[derive(Clone, Debug, Default)]
pub struct HostBindings {
    entries: IndexMap<Name, Value, FxBuildHasher>,
}

impl HostBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// `undefined`, `NaN`, `Infinity`, `console`, `JSON`, `Object`, `Math`,
    /// `Array`, the conversion functions and the error constructors.
    pub fn standard(console: SharedConsole) -> Self {
        let mut bindings = Self::new();
        standard::install(&mut bindings, console);
        bindings
    }

    /// Add or replace a binding.
    pub fn insert(&mut self, name: &str, value: Value) -> &mut Self {
        self.entries.insert(name.into(), value);
        self
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.insert(name, value);
        self
    }

    /// Register a host function.
    pub fn native<F>(&mut self, name: &str, arity: usize, func: F) -> &mut Self
    where
        F: Fn(&Value, &[Value]) -> EvalResult + 'static,
    {
        self.insert(name, Value::native(NativeFunction::new(name, arity, func)))
    }

    /// Add every binding of `other`, replacing same-named entries.
    pub fn extend(&mut self, other: HostBindings) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.entries.iter()
    }

    /// Declare every binding as a `var` of `scope`.
    pub fn install(&self, scope: &ScopeRef) -> Result<(), EvalError> {
        let mut scope = scope.borrow_mut();
        for (name, value) in &self.entries {
            scope.create(DeclarationKind::Var, name, Some(value.clone()))?;
        }
        Ok(())
    }
}

impl<'a> FromIterator<(&'a str, Value)> for HostBindings {
    fn from_iter<I: IntoIterator<Item = (&'a str, Value)>>(iter: I) -> Self {
        let mut bindings = Self::new();
        for (name, value) in iter {
            bindings.insert(name, value);
        }
        bindings
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
