//! Tree-walking evaluator.
//!
//! The `Interpreter` owns the root scope and the interpreted call stack.
//! Statements run through `exec` and produce a [`Completion`]; expressions
//! run through `eval` and produce a [`Value`]. Both recurse with
//! `ensure_sufficient_stack` so deeply nested trees grow the native stack
//! instead of overflowing it.
//!
//! The implementation is split by node family:
//! - `statements`: declarations, blocks, `if`, `switch`, labels, `try`
//! - `loops`: `while`, `do ... while`, `for`, `for ... in`
//! - `expressions`: operators, literals, member access, assignment
//! - `function_call`: closure creation, calls and `new`

mod builder;
mod expressions;
mod function_call;
mod loops;
mod statements;

use tarn_ir::{Name, Program};

use crate::completion::Completion;
use crate::diagnostics::CallStack;
use crate::environment::ScopeRef;
use crate::errors::{self, EvalResult};
use crate::methods;
use crate::value::Value;

pub use builder::InterpreterBuilder;

/// Evaluator state for one program run.
///
/// Created with [`InterpreterBuilder`]. An interpreter can run several
/// programs; they share the root scope, so bindings made by one run are
/// visible to the next.
pub struct Interpreter {
    /// Root scope holding the host bindings.
    global: ScopeRef,
    /// Interpreted calls in progress.
    call_stack: CallStack,
    /// `module` object of the module entry convention.
    module: Option<Value>,
}

impl Interpreter {
    /// Shorthand for [`InterpreterBuilder::new`].
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// The root scope.
    pub fn global_scope(&self) -> &ScopeRef {
        &self.global
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    /// The `module` object, when built in module mode.
    pub fn module_object(&self) -> Option<&Value> {
        self.module.as_ref()
    }

    /// Whether the interpreter follows the module entry convention.
    #[inline]
    pub fn is_module(&self) -> bool {
        self.module.is_some()
    }

    /// Run `program` in the root scope.
    ///
    /// Returns the value of the last statement executed (or of a top-level
    /// `return`). In module mode the result is `module.exports`, read after
    /// the program finishes.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.body.len()))]
    pub fn run(&mut self, program: &Program) -> EvalResult {
        let global = self.global.clone();
        let result = self
            .exec_body(&program.body, &global)
            .and_then(|completion| match completion {
                Completion::Normal(value) | Completion::Return(value) => Ok(value),
                Completion::Break(label) => Err(errors::illegal_break(label)),
                Completion::Continue(label) => Err(errors::illegal_continue(label)),
            });

        match result {
            Ok(value) => match &self.module {
                Some(module) => methods::get_property(module, &Name::from("exports")),
                None => Ok(value),
            },
            Err(err) => {
                tracing::debug!(error = %err, catchable = err.is_catchable(), "uncaught error");
                Err(err)
            }
        }
    }

    /// Resolve an identifier through the root scope.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.global.borrow().lookup(name)
    }
}
