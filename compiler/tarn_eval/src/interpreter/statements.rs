//! Statement execution: declarations, blocks, `if`, `switch`, labels and
//! `try`.

use std::rc::Rc;

use tarn_ir::ast::{
    CatchClause, Identifier, IfStatement, LabeledStatement, SwitchStatement, TryStatement,
    VariableDeclaration,
};
use tarn_ir::{Function, Name, Pattern, Statement};
use tarn_stack::ensure_sufficient_stack;

use super::function_call::closure_value;
use super::Interpreter;
use crate::completion::{Completion, ExecResult, LabelSet};
use crate::environment::{DeclarationKind, Scope, ScopeRef};
use crate::errors::{self, EvalError};
use crate::value::{ClosureKind, Value};

impl Interpreter {
    /// Execute a statement with stack safety.
    ///
    /// `labels` are the labels written directly in front of the statement.
    pub(crate) fn exec(
        &mut self,
        stmt: &Statement,
        scope: &ScopeRef,
        labels: &[Name],
    ) -> ExecResult {
        ensure_sufficient_stack(|| self.exec_inner(stmt, scope, labels))
    }

    fn exec_inner(&mut self, stmt: &Statement, scope: &ScopeRef, labels: &[Name]) -> ExecResult {
        match stmt {
            Statement::ExpressionStatement(stmt) => {
                Ok(Completion::Normal(self.eval(&stmt.expression, scope)?))
            }
            Statement::BlockStatement(block) => {
                let inner = Scope::child(scope);
                self.exec_body(&block.body, &inner)
            }
            Statement::EmptyStatement(_) | Statement::DebuggerStatement(_) => Ok(Completion::EMPTY),
            Statement::VariableDeclaration(decl) => {
                self.declare_variables(decl, scope)?;
                Ok(Completion::EMPTY)
            }
            Statement::FunctionDeclaration(func) => {
                declare_function(func, scope)?;
                Ok(Completion::EMPTY)
            }
            Statement::ReturnStatement(ret) => {
                let value = match &ret.argument {
                    Some(argument) => self.eval(argument, scope)?,
                    None => Value::Undefined,
                };
                Ok(Completion::Return(value))
            }
            Statement::BreakStatement(jump) => {
                Ok(Completion::Break(label_name(jump.label.as_ref())))
            }
            Statement::ContinueStatement(jump) => {
                Ok(Completion::Continue(label_name(jump.label.as_ref())))
            }
            Statement::IfStatement(stmt) => self.exec_if(stmt, scope),
            Statement::SwitchStatement(stmt) => self.exec_switch(stmt, scope, labels),
            Statement::WhileStatement(stmt) => self.exec_while(stmt, scope, labels),
            Statement::DoWhileStatement(stmt) => self.exec_do_while(stmt, scope, labels),
            Statement::ForStatement(stmt) => self.exec_for(stmt, scope, labels),
            Statement::ForInStatement(stmt) => self.exec_for_in(stmt, scope, labels),
            Statement::LabeledStatement(stmt) => self.exec_labeled(stmt, scope, labels),
            Statement::TryStatement(stmt) => self.exec_try(stmt, scope),
            Statement::ThrowStatement(stmt) => {
                let value = self.eval(&stmt.argument, scope)?;
                Err(errors::thrown(value))
            }
            Statement::ForOfStatement(_)
            | Statement::ClassDeclaration(_)
            | Statement::WithStatement(_)
            | Statement::ImportDeclaration(_)
            | Statement::ExportNamedDeclaration(_)
            | Statement::ExportDefaultDeclaration(_)
            | Statement::ExportAllDeclaration(_) => Err(errors::unsupported_node(stmt.kind())),
        }
    }

    /// Run a statement list in `scope`.
    ///
    /// Function declarations are bound first, the remaining statements run
    /// in order. Completes with the value of the last statement, or with
    /// the first abrupt completion.
    pub(crate) fn exec_body(&mut self, body: &[Statement], scope: &ScopeRef) -> ExecResult {
        hoist_functions(body, scope)?;
        self.exec_hoisted(body, scope)
    }

    /// Run the statements of an already hoisted list.
    fn exec_hoisted(&mut self, body: &[Statement], scope: &ScopeRef) -> ExecResult {
        let mut last = Value::Undefined;
        for stmt in body {
            if matches!(stmt, Statement::FunctionDeclaration(_)) {
                continue;
            }
            match self.exec(stmt, scope, &[])? {
                Completion::Normal(value) => last = value,
                signal => return Ok(signal),
            }
        }
        Ok(Completion::Normal(last))
    }

    /// Declare every declarator of `decl` in `scope`.
    pub(crate) fn declare_variables(
        &mut self,
        decl: &VariableDeclaration,
        scope: &ScopeRef,
    ) -> Result<(), EvalError> {
        let kind = DeclarationKind::from(decl.kind);
        for declarator in &decl.declarations {
            let id = binding_identifier(&declarator.id)?;
            let value = match &declarator.init {
                Some(init) => Some(self.eval_named(init, &id.name, scope)?),
                None => None,
            };
            scope.borrow_mut().create(kind, &id.name, value)?;
        }
        Ok(())
    }

    fn exec_if(&mut self, stmt: &IfStatement, scope: &ScopeRef) -> ExecResult {
        if self.eval(&stmt.test, scope)?.to_boolean() {
            self.exec(&stmt.consequent, scope, &[])
        } else if let Some(alternate) = &stmt.alternate {
            self.exec(alternate, scope, &[])
        } else {
            Ok(Completion::EMPTY)
        }
    }

    fn exec_labeled(
        &mut self,
        stmt: &LabeledStatement,
        scope: &ScopeRef,
        labels: &[Name],
    ) -> ExecResult {
        let mut own: LabelSet = labels.iter().cloned().collect();
        own.push(stmt.label.name.clone());

        match self.exec(&stmt.body, scope, &own)? {
            Completion::Break(Some(label)) if label == stmt.label.name => {
                tracing::trace!(%label, "break consumed by labeled statement");
                Ok(Completion::EMPTY)
            }
            completion => Ok(completion),
        }
    }

    /// `switch`: the discriminant is evaluated once, then cases are tested
    /// in order with strict equality. Execution starts at the first
    /// matching case, or at a `default` reached before any match, and falls
    /// through the remaining bodies until a `break`.
    fn exec_switch(
        &mut self,
        stmt: &SwitchStatement,
        scope: &ScopeRef,
        labels: &[Name],
    ) -> ExecResult {
        let discriminant = self.eval(&stmt.discriminant, scope)?;
        let body_scope = Scope::child(scope);
        for case in &stmt.cases {
            hoist_functions(&case.consequent, &body_scope)?;
        }

        let mut matched = false;
        let mut last = Value::Undefined;
        for case in &stmt.cases {
            if !matched {
                matched = match &case.test {
                    Some(test) => self.eval(test, &body_scope)?.strict_equals(&discriminant),
                    None => true,
                };
                if !matched {
                    continue;
                }
            }

            match self.exec_hoisted(&case.consequent, &body_scope)? {
                Completion::Normal(value) => last = value,
                Completion::Break(None) => return Ok(Completion::Normal(last)),
                Completion::Break(Some(label)) if labels.contains(&label) => {
                    return Ok(Completion::Normal(last));
                }
                signal => {
                    tracing::trace!(?signal, "signal leaves switch");
                    return Ok(signal);
                }
            }
        }
        Ok(Completion::Normal(last))
    }

    /// `try`/`catch`/`finally`.
    ///
    /// Only catchable errors reach the handler; fatal errors skip both the
    /// handler and the finalizer. Otherwise the finalizer's completion,
    /// normal or abrupt, replaces whatever the try and catch produced.
    fn exec_try(&mut self, stmt: &TryStatement, scope: &ScopeRef) -> ExecResult {
        let block_scope = Scope::child(scope);
        let mut outcome = self.exec_body(&stmt.block.body, &block_scope);

        if let Some(handler) = &stmt.handler {
            outcome = match outcome {
                Err(err) if err.is_catchable() => self.exec_catch(handler, err, scope),
                other => other,
            };
        }

        let Some(finalizer) = &stmt.finalizer else {
            return outcome;
        };
        if let Err(err) = &outcome {
            if !err.is_catchable() {
                return outcome;
            }
            tracing::debug!(error = %err, "error discarded by finally");
        }
        let finally_scope = Scope::child(scope);
        self.exec_body(&finalizer.body, &finally_scope)
    }

    fn exec_catch(
        &mut self,
        handler: &CatchClause,
        err: EvalError,
        scope: &ScopeRef,
    ) -> ExecResult {
        tracing::debug!(error = %err, "exception caught");
        let catch_scope = Scope::child(scope);
        if let Some(param) = &handler.param {
            let id = binding_identifier(param)?;
            catch_scope.borrow_mut().create(
                DeclarationKind::Var,
                &id.name,
                Some(err.into_thrown_value()),
            )?;
        }
        self.exec_body(&handler.body.body, &catch_scope)
    }
}

/// Bind a function declaration as a `var` of `scope`.
fn declare_function(func: &Rc<Function>, scope: &ScopeRef) -> Result<(), EvalError> {
    let Some(id) = &func.id else {
        return Err(errors::unsupported_node("FunctionDeclaration without a name"));
    };
    let closure = closure_value(func, Some(id.name.clone()), scope, ClosureKind::Normal)?;
    scope
        .borrow_mut()
        .create(DeclarationKind::Var, &id.name, Some(closure))?;
    Ok(())
}

fn hoist_functions(body: &[Statement], scope: &ScopeRef) -> Result<(), EvalError> {
    for stmt in body {
        if let Statement::FunctionDeclaration(func) = stmt {
            declare_function(func, scope)?;
        }
    }
    Ok(())
}

/// The identifier a declaration binds. Destructuring is not executed.
pub(super) fn binding_identifier(pattern: &Pattern) -> Result<&Identifier, EvalError> {
    pattern
        .as_identifier()
        .ok_or_else(|| errors::unsupported_node(pattern.kind()))
}

fn label_name(label: Option<&Identifier>) -> Option<Name> {
    label.map(|label| label.name.clone())
}
