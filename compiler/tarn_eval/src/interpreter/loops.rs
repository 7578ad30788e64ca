//! Loop statements.
//!
//! Every iteration runs its body in a fresh scope. Body completions are
//! routed through [`loop_step`], which consumes unlabeled signals and
//! signals naming one of the loop's labels.

use tarn_ir::ast::{
    DeclarationNode, ForInStatement, ForInTarget, ForInit, ForStatement, VariableDeclaration,
    WhileStatement,
};
use tarn_ir::{Identifier, Name, Statement, VariableKind};

use super::statements::binding_identifier;
use super::Interpreter;
use crate::completion::{loop_step, Completion, ExecResult, LoopStep};
use crate::environment::{DeclarationKind, Scope, ScopeRef};
use crate::errors::{self, EvalError};
use crate::methods;
use crate::value::Value;

impl Interpreter {
    pub(super) fn exec_while(
        &mut self,
        stmt: &WhileStatement,
        scope: &ScopeRef,
        labels: &[Name],
    ) -> ExecResult {
        let mut last = Value::Undefined;
        while self.eval(&stmt.test, scope)?.to_boolean() {
            let iteration = Scope::child(scope);
            let completion = self.exec_loop_body(&stmt.body, &iteration)?;
            match loop_step(completion, labels, &mut last) {
                LoopStep::Next => {}
                LoopStep::Exit => break,
                LoopStep::Propagate(signal) => return Ok(propagate(signal)),
            }
        }
        Ok(Completion::Normal(last))
    }

    /// `do ... while`: the body runs before the first test, and `continue`
    /// jumps to the test.
    pub(super) fn exec_do_while(
        &mut self,
        stmt: &WhileStatement,
        scope: &ScopeRef,
        labels: &[Name],
    ) -> ExecResult {
        let mut last = Value::Undefined;
        loop {
            let iteration = Scope::child(scope);
            let completion = self.exec_loop_body(&stmt.body, &iteration)?;
            match loop_step(completion, labels, &mut last) {
                LoopStep::Next => {}
                LoopStep::Exit => break,
                LoopStep::Propagate(signal) => return Ok(propagate(signal)),
            }
            if !self.eval(&stmt.test, scope)?.to_boolean() {
                break;
            }
        }
        Ok(Completion::Normal(last))
    }

    /// `for (init; test; update) body`.
    ///
    /// The init runs in a header scope, except `var` declarations which
    /// bind in the enclosing scope. Each iteration works on a copy of the
    /// previous iteration's header bindings, made before the update runs,
    /// so closures created in the body keep the values of their own
    /// iteration.
    pub(super) fn exec_for(
        &mut self,
        stmt: &ForStatement,
        scope: &ScopeRef,
        labels: &[Name],
    ) -> ExecResult {
        let header = Scope::child(scope);
        match &stmt.init {
            Some(ForInit::Declaration(DeclarationNode::VariableDeclaration(decl))) => {
                let target = if decl.kind == VariableKind::Var {
                    scope
                } else {
                    &header
                };
                self.declare_variables(decl, target)?;
            }
            Some(ForInit::Expression(init)) => {
                self.eval(init, &header)?;
            }
            None => {}
        }

        let mut iteration = header.borrow().fork();
        let mut last = Value::Undefined;
        loop {
            if let Some(test) = &stmt.test {
                if !self.eval(test, &iteration)?.to_boolean() {
                    break;
                }
            }

            let body_scope = Scope::child(&iteration);
            let completion = self.exec_loop_body(&stmt.body, &body_scope)?;
            match loop_step(completion, labels, &mut last) {
                LoopStep::Next => {}
                LoopStep::Exit => break,
                LoopStep::Propagate(signal) => return Ok(propagate(signal)),
            }

            let next = iteration.borrow().fork();
            iteration = next;
            if let Some(update) = &stmt.update {
                self.eval(update, &iteration)?;
            }
        }
        Ok(Completion::Normal(last))
    }

    /// `for (left in right) body` over a snapshot of the enumerable keys.
    pub(super) fn exec_for_in(
        &mut self,
        stmt: &ForInStatement,
        scope: &ScopeRef,
        labels: &[Name],
    ) -> ExecResult {
        if let ForInTarget::VariableDeclaration(decl) = &stmt.left {
            if decl.kind == VariableKind::Var {
                let id = for_in_identifier(decl)?;
                scope
                    .borrow_mut()
                    .create(DeclarationKind::Var, &id.name, None)?;
            }
        }

        let object = self.eval(&stmt.right, scope)?;
        let keys = methods::enumerable_keys(&object);

        let mut last = Value::Undefined;
        for key in keys {
            let iteration = Scope::child(scope);
            self.bind_for_in_target(&stmt.left, Value::Str(key), &iteration)?;
            let completion = self.exec_loop_body(&stmt.body, &iteration)?;
            match loop_step(completion, labels, &mut last) {
                LoopStep::Next => {}
                LoopStep::Exit => break,
                LoopStep::Propagate(signal) => return Ok(propagate(signal)),
            }
        }
        Ok(Completion::Normal(last))
    }

    fn bind_for_in_target(
        &mut self,
        target: &ForInTarget,
        key: Value,
        iteration: &ScopeRef,
    ) -> Result<(), EvalError> {
        match target {
            ForInTarget::VariableDeclaration(decl) => {
                let id = for_in_identifier(decl)?;
                let mut scope = iteration.borrow_mut();
                match decl.kind {
                    VariableKind::Var => scope.update(&id.name, key)?,
                    kind => scope.create(kind.into(), &id.name, Some(key))?,
                }
                Ok(())
            }
            ForInTarget::Identifier(id) => {
                iteration.borrow_mut().update(&id.name, key)?;
                Ok(())
            }
            ForInTarget::MemberExpression(member) => {
                let object = self.eval(&member.object, iteration)?;
                let property = self.member_key(member, iteration)?;
                methods::set_property(&object, property, key)
            }
            ForInTarget::ObjectPattern(_) => Err(errors::unsupported_node("ObjectPattern")),
            ForInTarget::ArrayPattern(_) => Err(errors::unsupported_node("ArrayPattern")),
        }
    }

    /// Run a loop body in `iteration`. A block body uses the iteration
    /// scope directly instead of nesting another one.
    fn exec_loop_body(&mut self, body: &Statement, iteration: &ScopeRef) -> ExecResult {
        match body {
            Statement::BlockStatement(block) => self.exec_body(&block.body, iteration),
            other => self.exec(other, iteration, &[]),
        }
    }
}

fn for_in_identifier(decl: &VariableDeclaration) -> Result<&Identifier, EvalError> {
    match decl.declarations.as_slice() {
        [declarator] => binding_identifier(&declarator.id),
        _ => Err(errors::unsupported_node("VariableDeclaration")),
    }
}

fn propagate(signal: Completion) -> Completion {
    tracing::trace!(?signal, "signal leaves loop");
    signal
}
