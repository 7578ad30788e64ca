//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use tarn_ir::Name;

use super::Interpreter;
use crate::console::{stdout_console, SharedConsole};
use crate::diagnostics::CallStack;
use crate::environment::{DeclarationKind, Scope, ScopeRef};
use crate::errors::EvalError;
use crate::globals::HostBindings;
use crate::value::Value;

/// Interpreted call depth allowed when none is configured.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Builder for creating Interpreter instances with various configurations.
///
/// The root scope starts empty: host bindings are whatever the embedder
/// adds, plus the standard catalog when [`standard_globals`] is requested.
///
/// [`standard_globals`]: InterpreterBuilder::standard_globals
pub struct InterpreterBuilder {
    bindings: HostBindings,
    standard_globals: bool,
    console: Option<SharedConsole>,
    max_call_depth: Option<usize>,
    module: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            bindings: HostBindings::new(),
            standard_globals: false,
            console: None,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            module: false,
        }
    }

    /// Add every entry of `bindings` to the initial table.
    #[must_use]
    pub fn bindings(mut self, bindings: HostBindings) -> Self {
        self.bindings.extend(bindings);
        self
    }

    /// Add one initial binding.
    #[must_use]
    pub fn binding(mut self, name: &str, value: Value) -> Self {
        self.bindings.insert(name, value);
        self
    }

    /// Install the standard catalog beneath the embedder's bindings.
    ///
    /// Embedder bindings with the same name take precedence.
    #[must_use]
    pub fn standard_globals(mut self) -> Self {
        self.standard_globals = true;
        self
    }

    /// Set the sink `console.*` writes to.
    ///
    /// Default is stdout. Only used together with `standard_globals`.
    #[must_use]
    pub fn console(mut self, console: SharedConsole) -> Self {
        self.console = Some(console);
        self
    }

    /// Set the interpreted call-depth limit. `None` removes the limit.
    #[must_use]
    pub fn max_call_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_call_depth = max_depth;
        self
    }

    /// Follow the module entry convention: the root scope gets
    /// `const module = { exports }` and `const exports`, and runs return
    /// `module.exports`.
    #[must_use]
    pub fn module(mut self, module: bool) -> Self {
        self.module = module;
        self
    }

    /// Build the interpreter.
    ///
    /// Fails when an embedder binding collides with `module` or `exports`
    /// in module mode.
    pub fn build(self) -> Result<Interpreter, EvalError> {
        let global = Scope::root();

        let mut table = if self.standard_globals {
            HostBindings::standard(self.console.unwrap_or_else(stdout_console))
        } else {
            HostBindings::new()
        };
        table.extend(self.bindings);
        table.install(&global)?;

        let module = if self.module {
            Some(install_module(&global)?)
        } else {
            None
        };

        tracing::debug!(
            bindings = table.len(),
            module = self.module,
            max_call_depth = ?self.max_call_depth,
            "interpreter built"
        );

        Ok(Interpreter {
            global,
            call_stack: CallStack::new(self.max_call_depth),
            module,
        })
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn install_module(global: &ScopeRef) -> Result<Value, EvalError> {
    let exports = Value::empty_object();
    let module = Value::object_from([("exports", exports.clone())]);
    let mut scope = global.borrow_mut();
    scope.create(DeclarationKind::Const, &Name::from("module"), Some(module.clone()))?;
    scope.create(DeclarationKind::Const, &Name::from("exports"), Some(exports))?;
    Ok(module)
}
