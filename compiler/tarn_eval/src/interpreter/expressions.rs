//! Expression evaluation.

use std::rc::Rc;

use tarn_ir::ast::{
    ArrayExpression, AssignmentExpression, CallExpression, MemberExpression, NewExpression,
    ObjectExpression, ObjectMember, PropertyKind, TemplateLiteral, UnaryExpression,
    UpdateExpression,
};
use tarn_ir::{
    Combine, Expression, Function, Literal, LiteralValue, LogicalOp, Name, Pattern, UnaryOp,
};
use tarn_stack::ensure_sufficient_stack;

use super::function_call::closure_value;
use super::Interpreter;
use crate::environment::{DeclarationKind, Scope, ScopeRef};
use crate::errors::{self, EvalError, EvalResult};
use crate::methods;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::value::{ClosureKind, PropertyMap, Value};

/// A resolved assignment target.
enum Reference {
    /// A name looked up through the scope chain.
    Binding(Name),
    /// A property of an already evaluated object.
    Property { object: Value, key: Name },
}

impl Interpreter {
    /// Evaluate an expression with stack safety.
    pub(crate) fn eval(&mut self, expr: &Expression, scope: &ScopeRef) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr, scope))
    }

    fn eval_inner(&mut self, expr: &Expression, scope: &ScopeRef) -> EvalResult {
        match expr {
            Expression::Identifier(id) => Ok(scope.borrow().query(&id.name)?),
            Expression::Literal(literal) => eval_literal(literal),
            Expression::ThisExpression(_) => Ok(this_value(scope)),
            Expression::ArrayExpression(array) => self.eval_array(array, scope),
            Expression::ObjectExpression(object) => self.eval_object(object, scope),
            Expression::FunctionExpression(func) => function_expression(func, None, scope),
            Expression::ArrowFunctionExpression(func) => {
                closure_value(func, None, scope, ClosureKind::Arrow)
            }
            Expression::TemplateLiteral(template) => self.eval_template(template, scope),
            Expression::UnaryExpression(unary) => self.eval_unary(unary, scope),
            Expression::UpdateExpression(update) => self.eval_update(update, scope),
            Expression::BinaryExpression(binary) => {
                let left = self.eval(&binary.left, scope)?;
                let right = self.eval(&binary.right, scope)?;
                evaluate_binary(&left, &right, binary.operator)
            }
            Expression::LogicalExpression(logical) => {
                let left = self.eval(&logical.left, scope)?;
                if continues_logical(logical.operator, &left) {
                    self.eval(&logical.right, scope)
                } else {
                    Ok(left)
                }
            }
            Expression::AssignmentExpression(assign) => self.eval_assignment(assign, scope),
            Expression::ConditionalExpression(cond) => {
                if self.eval(&cond.test, scope)?.to_boolean() {
                    self.eval(&cond.consequent, scope)
                } else {
                    self.eval(&cond.alternate, scope)
                }
            }
            Expression::CallExpression(call) => self.eval_call(call, scope),
            Expression::NewExpression(new) => self.eval_new(new, scope),
            Expression::MemberExpression(member) => {
                let object = self.eval(&member.object, scope)?;
                let key = self.member_key(member, scope)?;
                methods::get_property(&object, &key)
            }
            Expression::SequenceExpression(seq) => {
                let mut last = Value::Undefined;
                for expr in &seq.expressions {
                    last = self.eval(expr, scope)?;
                }
                Ok(last)
            }
            Expression::ClassExpression(_)
            | Expression::TaggedTemplateExpression(_)
            | Expression::SpreadElement(_)
            | Expression::YieldExpression(_)
            | Expression::AwaitExpression(_)
            | Expression::ChainExpression(_)
            | Expression::ImportExpression(_)
            | Expression::MetaProperty(_)
            | Expression::Super(_) => Err(errors::unsupported_node(expr.kind())),
        }
    }

    /// Evaluate `expr` as the value bound to `name`: anonymous function
    /// and arrow expressions take `name` as their own.
    pub(crate) fn eval_named(
        &mut self,
        expr: &Expression,
        name: &Name,
        scope: &ScopeRef,
    ) -> EvalResult {
        match expr {
            Expression::FunctionExpression(func) if func.id.is_none() => {
                closure_value(func, Some(name.clone()), scope, ClosureKind::Normal)
            }
            Expression::ArrowFunctionExpression(func) => {
                closure_value(func, Some(name.clone()), scope, ClosureKind::Arrow)
            }
            _ => self.eval(expr, scope),
        }
    }

    /// Property key of a member expression: the identifier text for
    /// `a.b`, the evaluated key for `a[b]`.
    pub(crate) fn member_key(
        &mut self,
        member: &MemberExpression,
        scope: &ScopeRef,
    ) -> Result<Name, EvalError> {
        if member.computed {
            return Ok(self.eval(&member.property, scope)?.to_property_key());
        }
        match &*member.property {
            Expression::Identifier(id) => Ok(id.name.clone()),
            other => Err(errors::unsupported_node(other.kind())),
        }
    }

    pub(crate) fn eval_arguments(
        &mut self,
        arguments: &[Expression],
        scope: &ScopeRef,
    ) -> Result<Vec<Value>, EvalError> {
        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval(argument, scope)?);
        }
        Ok(values)
    }

    fn eval_array(&mut self, array: &ArrayExpression, scope: &ScopeRef) -> EvalResult {
        let mut items = Vec::with_capacity(array.elements.len());
        for element in &array.elements {
            items.push(match element {
                Some(expr) => self.eval(expr, scope)?,
                None => Value::Undefined,
            });
        }
        Ok(Value::array(items))
    }

    fn eval_object(&mut self, object: &ObjectExpression, scope: &ScopeRef) -> EvalResult {
        let mut properties = PropertyMap::default();
        for member in &object.properties {
            let property = match member {
                ObjectMember::Property(property) => property,
                ObjectMember::SpreadElement(_) => {
                    return Err(errors::unsupported_node("SpreadElement"));
                }
            };
            if property.kind != PropertyKind::Init {
                return Err(errors::unsupported_node("accessor Property"));
            }
            let key = self.property_key(&property.key, property.computed, scope)?;
            let value = self.eval_named(&property.value, &key, scope)?;
            properties.insert(key, value);
        }
        Ok(Value::object(properties))
    }

    fn property_key(
        &mut self,
        key: &Expression,
        computed: bool,
        scope: &ScopeRef,
    ) -> Result<Name, EvalError> {
        match key {
            Expression::Identifier(id) if !computed => Ok(id.name.clone()),
            Expression::Literal(literal) if !computed => {
                Ok(eval_literal(literal)?.to_property_key())
            }
            other => Ok(self.eval(other, scope)?.to_property_key()),
        }
    }

    fn eval_template(&mut self, template: &TemplateLiteral, scope: &ScopeRef) -> EvalResult {
        let mut text = String::new();
        for (i, quasi) in template.quasis.iter().enumerate() {
            text.push_str(quasi.value.cooked.as_deref().unwrap_or(&quasi.value.raw));
            if let Some(expr) = template.expressions.get(i) {
                text.push_str(&self.eval(expr, scope)?.to_js_string());
            }
        }
        Ok(Value::string(&text))
    }

    fn eval_unary(&mut self, unary: &UnaryExpression, scope: &ScopeRef) -> EvalResult {
        match (unary.operator, &*unary.argument) {
            (UnaryOp::TypeOf, Expression::Identifier(id)) => {
                let value = scope.borrow().lookup(&id.name);
                Ok(Value::string(value.map_or("undefined", |value| value.type_of())))
            }
            (UnaryOp::Delete, Expression::Identifier(id)) => {
                Ok(Value::Bool(scope.borrow_mut().delete(&id.name)))
            }
            (UnaryOp::Delete, Expression::MemberExpression(member)) => {
                let object = self.eval(&member.object, scope)?;
                let key = self.member_key(member, scope)?;
                Ok(Value::Bool(methods::delete_property(&object, &key)?))
            }
            (UnaryOp::Delete, other) => {
                self.eval(other, scope)?;
                Ok(Value::Bool(true))
            }
            (op, argument) => {
                let value = self.eval(argument, scope)?;
                evaluate_unary(op, &value)
            }
        }
    }

    /// `++x`, `x--`: prefix forms yield the new value, postfix forms the
    /// old value converted to a number.
    fn eval_update(&mut self, update: &UpdateExpression, scope: &ScopeRef) -> EvalResult {
        let reference = match &*update.argument {
            Expression::Identifier(id) => Reference::Binding(id.name.clone()),
            Expression::MemberExpression(member) => self.member_reference(member, scope)?,
            other => return Err(errors::unsupported_node(other.kind())),
        };
        let old = Value::Number(get_reference(&reference, scope)?.to_number());
        let new = evaluate_binary(&old, &Value::Number(1.0), update.operator.binary_op())?;
        put_reference(&reference, new.clone(), scope)?;
        Ok(if update.prefix { new } else { old })
    }

    /// Assignment with every operator. The target is resolved before the
    /// right-hand side runs; compound operators read it once.
    fn eval_assignment(&mut self, assign: &AssignmentExpression, scope: &ScopeRef) -> EvalResult {
        let reference = match &*assign.left {
            Pattern::Identifier(id) => Reference::Binding(id.name.clone()),
            Pattern::MemberExpression(member) => self.member_reference(member, scope)?,
            other => return Err(errors::unsupported_node(other.kind())),
        };

        let value = match assign.operator.combining() {
            Combine::Replace => match &reference {
                Reference::Binding(name) => self.eval_named(&assign.right, name, scope)?,
                Reference::Property { .. } => self.eval(&assign.right, scope)?,
            },
            Combine::Binary(op) => {
                let current = get_reference(&reference, scope)?;
                let right = self.eval(&assign.right, scope)?;
                evaluate_binary(&current, &right, op)?
            }
            Combine::Logical(op) => {
                let current = get_reference(&reference, scope)?;
                if !continues_logical(op, &current) {
                    return Ok(current);
                }
                self.eval(&assign.right, scope)?
            }
        };

        put_reference(&reference, value.clone(), scope)?;
        Ok(value)
    }

    fn member_reference(
        &mut self,
        member: &MemberExpression,
        scope: &ScopeRef,
    ) -> Result<Reference, EvalError> {
        let object = self.eval(&member.object, scope)?;
        let key = self.member_key(member, scope)?;
        Ok(Reference::Property { object, key })
    }

    /// Calls through a member expression pass the object as `this`; all
    /// other calls pass the `this` of the calling scope.
    fn eval_call(&mut self, call: &CallExpression, scope: &ScopeRef) -> EvalResult {
        let (this, callee) = match &*call.callee {
            Expression::MemberExpression(member) => {
                let object = self.eval(&member.object, scope)?;
                let key = self.member_key(member, scope)?;
                let method = methods::get_property(&object, &key)?;
                (object, method)
            }
            other => (this_value(scope), self.eval(other, scope)?),
        };
        let args = self.eval_arguments(&call.arguments, scope)?;

        if !callee.is_callable() {
            return Err(errors::not_callable(describe_callee(&call.callee)));
        }
        self.call_function(&callee, this, args)
    }

    fn eval_new(&mut self, new: &NewExpression, scope: &ScopeRef) -> EvalResult {
        let callee = self.eval(&new.callee, scope)?;
        let args = self.eval_arguments(&new.arguments, scope)?;

        if !is_constructor(&callee) {
            return Err(errors::not_constructor(describe_callee(&new.callee)));
        }
        self.construct(&callee, args)
    }
}

fn eval_literal(literal: &Literal) -> EvalResult {
    if literal.regex.is_some() {
        return Err(errors::unsupported_node("RegExpLiteral"));
    }
    if literal.bigint.is_some() {
        return Err(errors::unsupported_node("BigIntLiteral"));
    }
    Ok(match &literal.value {
        LiteralValue::Null => Value::Null,
        LiteralValue::Bool(b) => Value::Bool(*b),
        LiteralValue::Number(n) => Value::Number(*n),
        LiteralValue::String(s) => Value::Str(s.clone()),
    })
}

/// `function name() {}` as an expression binds `name` (const) in a scope
/// of its own so the body can refer to itself.
fn function_expression(func: &Rc<Function>, name: Option<Name>, scope: &ScopeRef) -> EvalResult {
    let Some(id) = &func.id else {
        return closure_value(func, name, scope, ClosureKind::Normal);
    };
    let own = Scope::child(scope);
    let closure = closure_value(func, Some(id.name.clone()), &own, ClosureKind::Normal)?;
    own.borrow_mut()
        .create(DeclarationKind::Const, &id.name, Some(closure.clone()))?;
    Ok(closure)
}

/// `this` of the innermost function scope; `undefined` at the top level.
pub(super) fn this_value(scope: &ScopeRef) -> Value {
    scope.borrow().lookup("this").unwrap_or_default()
}

/// Whether a logical operator evaluates its right operand given `left`.
fn continues_logical(op: LogicalOp, left: &Value) -> bool {
    match op {
        LogicalOp::Or => !left.to_boolean(),
        LogicalOp::And => left.to_boolean(),
        LogicalOp::Coalesce => left.is_nullish(),
    }
}

fn get_reference(reference: &Reference, scope: &ScopeRef) -> EvalResult {
    match reference {
        Reference::Binding(name) => Ok(scope.borrow().query(name)?),
        Reference::Property { object, key } => methods::get_property(object, key),
    }
}

fn put_reference(reference: &Reference, value: Value, scope: &ScopeRef) -> Result<(), EvalError> {
    match reference {
        Reference::Binding(name) => Ok(scope.borrow_mut().update(name, value)?),
        Reference::Property { object, key } => methods::set_property(object, key.clone(), value),
    }
}

fn is_constructor(value: &Value) -> bool {
    match value {
        Value::Function(closure) => closure.kind == ClosureKind::Normal,
        Value::Native(native) => native.is_constructible(),
        _ => false,
    }
}

/// Source-like rendering of a callee for error messages (`a.b`, `f`).
fn describe_callee(expr: &Expression) -> String {
    match expr {
        Expression::Identifier(id) => id.name.to_string(),
        Expression::ThisExpression(_) => "this".to_owned(),
        Expression::MemberExpression(member) => {
            let object = describe_callee(&member.object);
            match (&*member.property, member.computed) {
                (Expression::Identifier(id), false) => format!("{object}.{}", id.name),
                _ => format!("{object}[...]"),
            }
        }
        Expression::CallExpression(call) => format!("{}(...)", describe_callee(&call.callee)),
        other => format!("({})", other.kind()),
    }
}
