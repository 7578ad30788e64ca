//! Statement completions.
//!
//! Statements do not produce bare values: they complete normally with a
//! value or abruptly with a control-flow signal that unwinds through the
//! enclosing statements until something consumes it.

use smallvec::SmallVec;
use tarn_ir::Name;

use crate::errors::EvalError;
use crate::value::Value;

/// Result of executing a statement.
pub type ExecResult = Result<Completion, EvalError>;

/// Labels attached to the statement being executed (`a: b: while (...)`).
pub type LabelSet = SmallVec<[Name; 2]>;

#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    Normal(Value),
    Return(Value),
    Break(Option<Name>),
    Continue(Option<Name>),
}

impl Completion {
    pub const EMPTY: Completion = Completion::Normal(Value::Undefined);
}

/// What a loop does after one execution of its body.
#[derive(Debug)]
pub(crate) enum LoopStep {
    /// Run the next iteration.
    Next,
    /// Leave the loop normally.
    Exit,
    /// Leave the loop and hand this completion to the enclosing statement.
    Propagate(Completion),
}

/// Route a body completion through a loop carrying `labels`.
///
/// Unlabeled `break`/`continue` and those naming one of the loop's labels
/// are consumed. `return` and signals for other labels propagate.
pub(crate) fn loop_step(completion: Completion, labels: &[Name], last: &mut Value) -> LoopStep {
    match completion {
        Completion::Normal(value) => {
            *last = value;
            LoopStep::Next
        }
        Completion::Continue(None) => LoopStep::Next,
        Completion::Continue(Some(label)) if labels.contains(&label) => LoopStep::Next,
        Completion::Break(None) => LoopStep::Exit,
        Completion::Break(Some(label)) if labels.contains(&label) => LoopStep::Exit,
        signal => LoopStep::Propagate(signal),
    }
}
