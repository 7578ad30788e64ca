//! Tarn Eval - tree-walking evaluator for ESTree programs.
//!
//! # Architecture
//!
//! - `Scope`: lexical environments with separate `var`/`let`/`const`
//!   bindings, shared by closures through `Shared` handles
//! - `Interpreter`: exhaustive dispatch over statement and expression
//!   nodes; statements yield a `Completion` carrying `return`, `break` and
//!   `continue` signals
//! - `evaluate_binary` / `evaluate_unary`: operator semantics on `Value`s
//! - `HostBindings`: the initial table of names an embedder provides
//!
//! # Entry points
//!
//! [`evaluate`] and [`evaluate_module`] cover the common case. Use
//! [`InterpreterBuilder`] for call-depth limits, the standard globals or a
//! captured console.

mod completion;
pub mod console;
mod diagnostics;
pub mod environment;
pub mod errors;
pub mod globals;
pub mod interpreter;
pub mod methods;
pub mod operators;
mod shared;
pub mod value;

use std::sync::Once;

use tarn_ir::Program;

pub use completion::{Completion, ExecResult, LabelSet};
pub use console::{
    buffer_console, silent_console, stdout_console, ConsoleEntry, ConsoleLevel, ConsoleSink,
    SharedConsole,
};
pub use diagnostics::{CallFrame, CallStack};
pub use environment::{DeclarationKind, Scope, ScopeError, ScopeRef};
pub use errors::{EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use globals::HostBindings;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, evaluate_unary};
pub use shared::Shared;
pub use value::{Closure, ClosureKind, JsObject, NativeFunction, ObjectBrand, PropertyMap, Value};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Run `program` with `bindings` as the root scope's initial `var`s.
///
/// Returns the value of the last statement executed.
pub fn evaluate(program: &Program, bindings: HostBindings) -> EvalResult {
    Interpreter::builder().bindings(bindings).build()?.run(program)
}

/// Run `program` under the module entry convention.
///
/// The root scope also receives `const module = { exports }` and
/// `const exports`; the result is `module.exports` after the run.
pub fn evaluate_module(program: &Program, bindings: HostBindings) -> EvalResult {
    Interpreter::builder()
        .bindings(bindings)
        .module(true)
        .build()?
        .run(program)
}
