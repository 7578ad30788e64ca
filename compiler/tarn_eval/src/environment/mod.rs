//! Lexical environments.
//!
//! A `Scope` owns the bindings declared directly in one function body,
//! block, loop iteration, catch clause or switch body, partitioned by
//! declaration kind, plus a shared handle to its enclosing scope. Scopes
//! are shared (`Shared<Scope>`): closures keep their defining scope alive
//! and observe later mutation of it.

use std::fmt;

use rustc_hash::FxHashMap;
use tarn_ir::{Name, VariableKind};

use crate::errors::{self, EvalError};
use crate::shared::Shared;
use crate::value::Value;

/// Shared handle to a scope.
pub type ScopeRef = Shared<Scope>;

/// How a binding was introduced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

impl From<VariableKind> for DeclarationKind {
    fn from(kind: VariableKind) -> Self {
        match kind {
            VariableKind::Var => DeclarationKind::Var,
            VariableKind::Let => DeclarationKind::Let,
            VariableKind::Const => DeclarationKind::Const,
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeclarationKind::Var => "var",
            DeclarationKind::Let => "let",
            DeclarationKind::Const => "const",
        })
    }
}

/// Failure of a scope operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeError {
    /// The name is already declared here in a way the new declaration
    /// may not override.
    DeclarationConflict(Name),
    /// No scope in the chain binds the name.
    Unbound(Name),
    /// The nearest binding of the name is `const`.
    ConstReassignment(Name),
}

impl From<ScopeError> for EvalError {
    fn from(err: ScopeError) -> Self {
        match err {
            ScopeError::DeclarationConflict(name) => errors::declaration_conflict(&name),
            ScopeError::Unbound(name) => errors::unbound_identifier(&name),
            ScopeError::ConstReassignment(name) => errors::const_reassignment(&name),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scope {
    vars: FxHashMap<Name, Value>,
    lets: FxHashMap<Name, Value>,
    consts: FxHashMap<Name, Value>,
    parent: Option<ScopeRef>,
}

impl Scope {
    /// A scope with no parent.
    pub fn root() -> ScopeRef {
        Shared::new(Scope::default())
    }

    /// An empty scope enclosed by `parent`.
    pub fn child(parent: &ScopeRef) -> ScopeRef {
        Shared::new(Scope {
            parent: Some(parent.clone()),
            ..Scope::default()
        })
    }

    /// A new scope with the same parent holding copies of this scope's
    /// bindings. Used to give each loop iteration its own `let` bindings.
    pub fn fork(&self) -> ScopeRef {
        Shared::new(self.clone())
    }

    pub fn parent(&self) -> Option<&ScopeRef> {
        self.parent.as_ref()
    }

    /// Declare `name` in this scope.
    ///
    /// `var` over an existing `var` replaces the value when one is given
    /// and keeps the current value otherwise. Every other combination with
    /// an existing binding of the name is a conflict. `let`/`const` without
    /// a value hold `undefined`.
    pub fn create(
        &mut self,
        kind: DeclarationKind,
        name: &Name,
        value: Option<Value>,
    ) -> Result<(), ScopeError> {
        if let Some(existing) = self.declaration_kind_here(name) {
            if !(kind == DeclarationKind::Var && existing == DeclarationKind::Var) {
                return Err(ScopeError::DeclarationConflict(name.clone()));
            }
            if let Some(value) = value {
                self.vars.insert(name.clone(), value);
            }
            return Ok(());
        }

        let value = value.unwrap_or_default();
        let map = match kind {
            DeclarationKind::Var => &mut self.vars,
            DeclarationKind::Let => &mut self.lets,
            DeclarationKind::Const => &mut self.consts,
        };
        map.insert(name.clone(), value);
        Ok(())
    }

    /// Resolve `name` through the scope chain.
    pub fn query(&self, name: &Name) -> Result<Value, ScopeError> {
        self.lookup(name)
            .ok_or_else(|| ScopeError::Unbound(name.clone()))
    }

    /// Resolve `name` through the scope chain, `None` when unbound.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.get_here(name) {
            return Some(value.clone());
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().lookup(name))
    }

    /// Assign to the nearest binding of `name`.
    ///
    /// When no scope in the chain binds the name, it is created as a `var`
    /// of the root scope.
    pub fn update(&mut self, name: &Name, value: Value) -> Result<(), ScopeError> {
        if self.consts.contains_key(name) {
            return Err(ScopeError::ConstReassignment(name.clone()));
        }
        if let Some(slot) = self.vars.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        if let Some(slot) = self.lets.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().update(name, value),
            None => {
                self.vars.insert(name.clone(), value);
                Ok(())
            }
        }
    }

    /// `delete name`. Always acts on the root scope.
    ///
    /// Returns `true` when a root `var` was removed or the name is not a
    /// root binding, `false` when it is a root `let`/`const`.
    pub fn delete(&mut self, name: &str) -> bool {
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().delete(name);
        }
        if self.vars.remove(name).is_some() {
            return true;
        }
        !(self.lets.contains_key(name) || self.consts.contains_key(name))
    }

    /// Kind of the nearest binding of `name`.
    pub fn declaration_kind(&self, name: &str) -> Option<DeclarationKind> {
        self.declaration_kind_here(name).or_else(|| {
            self.parent
                .as_ref()
                .and_then(|parent| parent.borrow().declaration_kind(name))
        })
    }

    fn declaration_kind_here(&self, name: &str) -> Option<DeclarationKind> {
        if self.vars.contains_key(name) {
            Some(DeclarationKind::Var)
        } else if self.lets.contains_key(name) {
            Some(DeclarationKind::Let)
        } else if self.consts.contains_key(name) {
            Some(DeclarationKind::Const)
        } else {
            None
        }
    }

    fn get_here(&self, name: &str) -> Option<&Value> {
        self.vars
            .get(name)
            .or_else(|| self.lets.get(name))
            .or_else(|| self.consts.get(name))
    }
}
