//! Function creation, invocation and `new`.

use std::rc::Rc;

use tarn_ir::{Function, FunctionBody, Name, Pattern};

use super::Interpreter;
use crate::completion::Completion;
use crate::diagnostics::CallFrame;
use crate::environment::{DeclarationKind, Scope, ScopeRef};
use crate::errors::{self, EvalError, EvalResult};
use crate::shared::Shared;
use crate::value::{Closure, ClosureKind, JsObject, ObjectBrand, PropertyMap, Value};

impl Interpreter {
    /// Call `callee` with the given `this` and arguments.
    ///
    /// This is also the embedder's way back into script code, e.g. to call
    /// a function found in `module.exports`.
    #[tracing::instrument(level = "debug", skip_all, fields(callee = %callee_name(callee)))]
    pub fn call_function(&mut self, callee: &Value, this: Value, args: Vec<Value>) -> EvalResult {
        match callee {
            Value::Function(closure) => self.call_closure(closure, this, args),
            Value::Native(native) => native.call(&this, &args),
            other => Err(errors::not_callable(other.to_js_string())),
        }
    }

    /// `new callee(...args)`.
    ///
    /// A user function runs with a fresh object as `this`, branded so that
    /// `instanceof` recognizes it. If the function returns an object, array
    /// or function, that value is the result instead. Host constructors
    /// produce their own value.
    pub fn construct(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        match callee {
            Value::Function(closure) if closure.kind == ClosureKind::Normal => {
                let instance = Value::Object(Shared::new(JsObject {
                    properties: PropertyMap::default(),
                    brand: ObjectBrand::Instance(Rc::clone(closure)),
                }));
                let result = self.call_closure(closure, instance.clone(), args)?;
                Ok(if result.is_reference() { result } else { instance })
            }
            Value::Native(native) if native.is_constructible() => {
                native.call(&Value::Undefined, &args)
            }
            other => Err(errors::not_constructor(callee_name(other))),
        }
    }

    fn call_closure(&mut self, closure: &Rc<Closure>, this: Value, args: Vec<Value>) -> EvalResult {
        let frame = CallFrame {
            name: closure.display_name().into(),
        };
        self.call_stack
            .push(frame)
            .map_err(|err| self.call_stack.attach_backtrace(err))?;
        let result = self
            .invoke(closure, this, args)
            .map_err(|err| self.call_stack.attach_backtrace(err));
        self.call_stack.pop();
        result
    }

    /// Run a closure body in a fresh child of its defining scope.
    ///
    /// Normal functions bind `this` (const) and `arguments` (var) before
    /// the parameters; arrow functions see those of the defining scope.
    fn invoke(&mut self, closure: &Closure, this: Value, args: Vec<Value>) -> EvalResult {
        let call_scope = Scope::child(&closure.scope);
        if closure.kind == ClosureKind::Normal {
            let mut scope = call_scope.borrow_mut();
            scope.create(DeclarationKind::Const, &Name::from("this"), Some(this))?;
            scope.create(
                DeclarationKind::Var,
                &Name::from("arguments"),
                Some(Value::array(args.clone())),
            )?;
        }
        self.bind_parameters(&closure.node.params, args, &call_scope)?;

        match &closure.node.body {
            FunctionBody::Expression(expr) => self.eval(expr, &call_scope),
            FunctionBody::Block(block) => match self.exec_body(&block.body, &call_scope)? {
                Completion::Normal(_) => Ok(Value::Undefined),
                Completion::Return(value) => Ok(value),
                Completion::Break(label) => Err(errors::illegal_break(label)),
                Completion::Continue(label) => Err(errors::illegal_continue(label)),
            },
        }
    }

    /// Bind parameters as `var`s of the call scope. Missing arguments are
    /// `undefined`; a rest parameter collects the remaining ones.
    fn bind_parameters(
        &mut self,
        params: &[Pattern],
        args: Vec<Value>,
        scope: &ScopeRef,
    ) -> Result<(), EvalError> {
        let mut args = args.into_iter();
        for param in params {
            match param {
                Pattern::RestElement { argument } => {
                    let rest = Value::array(args.by_ref().collect());
                    self.bind_parameter(argument, rest, scope)?;
                }
                other => {
                    let value = args.next().unwrap_or_default();
                    self.bind_parameter(other, value, scope)?;
                }
            }
        }
        Ok(())
    }

    fn bind_parameter(
        &mut self,
        pattern: &Pattern,
        value: Value,
        scope: &ScopeRef,
    ) -> Result<(), EvalError> {
        match pattern {
            Pattern::Identifier(id) => {
                scope
                    .borrow_mut()
                    .create(DeclarationKind::Var, &id.name, Some(value))?;
                Ok(())
            }
            Pattern::AssignmentPattern { left, right } => {
                let value = match (value, left.as_identifier()) {
                    (Value::Undefined, Some(id)) => self.eval_named(right, &id.name, scope)?,
                    (Value::Undefined, None) => self.eval(right, scope)?,
                    (value, _) => value,
                };
                self.bind_parameter(left, value, scope)
            }
            other => Err(errors::unsupported_node(other.kind())),
        }
    }
}

/// Create a function value capturing `scope`.
pub(super) fn closure_value(
    func: &Rc<Function>,
    name: Option<Name>,
    scope: &ScopeRef,
    kind: ClosureKind,
) -> EvalResult {
    if func.generator {
        return Err(errors::unsupported_node("generator function"));
    }
    if func.is_async {
        return Err(errors::unsupported_node("async function"));
    }
    let closure = Closure::new(name, Rc::clone(func), scope.clone(), kind);
    Ok(Value::Function(Rc::new(closure)))
}

fn callee_name(callee: &Value) -> String {
    match callee {
        Value::Function(closure) => closure.display_name().to_owned(),
        Value::Native(native) => native.name.to_string(),
        other => other.to_js_string(),
    }
}
