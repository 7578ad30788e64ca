//! Terse constructors for building syntax trees in Rust.
//!
//! Mostly used by tests and embedders that generate code:
//!
//! ```text
//! program(vec![
//!     let_("a", num(1.0)),
//!     expr_stmt(ident("a")),
//! ])
//! ```

use std::rc::Rc;

use crate::ast::{
    ArrayExpression, AssignmentExpression, AssignmentOp, BinaryExpression, BinaryOp,
    BlockStatement, CallExpression, CatchClause, ConditionalExpression, DeclarationNode,
    Expression, ExpressionStatement, ForInStatement, ForInTarget, ForInit, ForStatement,
    Function, FunctionBody, Identifier, IfStatement, JumpStatement, LabeledStatement, Literal,
    LiteralValue, LogicalExpression, LogicalOp, MemberExpression, NewExpression,
    ObjectExpression, ObjectMember, Opaque, Pattern, Program, Property, PropertyKind,
    ReturnStatement, SequenceExpression, SourceType, Statement, SwitchCase, SwitchStatement,
    TemplateElement, TemplateLiteral, TemplateValue, ThrowStatement, TryStatement,
    UnaryExpression, UnaryOp, UpdateExpression, UpdateOp, VariableDeclaration,
    VariableDeclarator, VariableKind, WhileStatement,
};

pub fn program(body: Vec<Statement>) -> Program {
    Program::new(body)
}

pub fn module(body: Vec<Statement>) -> Program {
    Program {
        body,
        source_type: SourceType::Module,
    }
}

// Expressions

pub fn ident(name: &str) -> Expression {
    Expression::Identifier(Identifier::new(name))
}

pub fn num(value: f64) -> Expression {
    Expression::Literal(Literal::new(LiteralValue::Number(value)))
}

pub fn str_lit(value: &str) -> Expression {
    Expression::Literal(Literal::new(LiteralValue::String(value.into())))
}

pub fn bool_lit(value: bool) -> Expression {
    Expression::Literal(Literal::new(LiteralValue::Bool(value)))
}

pub fn null() -> Expression {
    Expression::Literal(Literal::new(LiteralValue::Null))
}

pub fn this() -> Expression {
    Expression::ThisExpression(Opaque {})
}

pub fn array(elements: Vec<Expression>) -> Expression {
    Expression::ArrayExpression(ArrayExpression {
        elements: elements.into_iter().map(Some).collect(),
    })
}

/// Object literal with plain `key: value` entries.
pub fn object(entries: Vec<(&str, Expression)>) -> Expression {
    let properties = entries
        .into_iter()
        .map(|(key, value)| {
            ObjectMember::Property(Property {
                key: ident(key),
                value,
                kind: PropertyKind::Init,
                computed: false,
                method: false,
                shorthand: false,
            })
        })
        .collect();
    Expression::ObjectExpression(ObjectExpression { properties })
}

/// Object literal with a single `[key]: value` entry.
pub fn computed_object(key: Expression, value: Expression) -> Expression {
    Expression::ObjectExpression(ObjectExpression {
        properties: vec![ObjectMember::Property(Property {
            key,
            value,
            kind: PropertyKind::Init,
            computed: true,
            method: false,
            shorthand: false,
        })],
    })
}

pub fn unary(operator: UnaryOp, argument: Expression) -> Expression {
    Expression::UnaryExpression(UnaryExpression {
        operator,
        argument: Box::new(argument),
    })
}

pub fn update(operator: UpdateOp, prefix: bool, argument: Expression) -> Expression {
    Expression::UpdateExpression(UpdateExpression {
        operator,
        argument: Box::new(argument),
        prefix,
    })
}

pub fn binary(left: Expression, operator: BinaryOp, right: Expression) -> Expression {
    Expression::BinaryExpression(BinaryExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn logical(left: Expression, operator: LogicalOp, right: Expression) -> Expression {
    Expression::LogicalExpression(LogicalExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// `name op= value`.
pub fn assign(name: &str, operator: AssignmentOp, right: Expression) -> Expression {
    assign_to(Pattern::Identifier(Identifier::new(name)), operator, right)
}

/// Assignment to an arbitrary target.
pub fn assign_to(left: Pattern, operator: AssignmentOp, right: Expression) -> Expression {
    Expression::AssignmentExpression(AssignmentExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn cond(test: Expression, consequent: Expression, alternate: Expression) -> Expression {
    Expression::ConditionalExpression(ConditionalExpression {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
    })
}

pub fn call(callee: Expression, arguments: Vec<Expression>) -> Expression {
    Expression::CallExpression(CallExpression {
        callee: Box::new(callee),
        arguments,
    })
}

pub fn new_(callee: Expression, arguments: Vec<Expression>) -> Expression {
    Expression::NewExpression(NewExpression {
        callee: Box::new(callee),
        arguments,
    })
}

/// `object.property`.
pub fn member(object: Expression, property: &str) -> Expression {
    Expression::MemberExpression(member_node(object, ident(property), false))
}

/// `object[property]`.
pub fn index(object: Expression, property: Expression) -> Expression {
    Expression::MemberExpression(member_node(object, property, true))
}

/// `object.property` as an assignment target.
pub fn member_target(object: Expression, property: &str) -> Pattern {
    Pattern::MemberExpression(member_node(object, ident(property), false))
}

fn member_node(object: Expression, property: Expression, computed: bool) -> MemberExpression {
    MemberExpression {
        object: Box::new(object),
        property: Box::new(property),
        computed,
    }
}

pub fn seq(expressions: Vec<Expression>) -> Expression {
    Expression::SequenceExpression(SequenceExpression { expressions })
}

pub fn template(quasis: &[&str], expressions: Vec<Expression>) -> Expression {
    let last = quasis.len().saturating_sub(1);
    let quasis = quasis
        .iter()
        .enumerate()
        .map(|(i, text)| TemplateElement {
            value: TemplateValue {
                raw: (*text).into(),
                cooked: Some((*text).into()),
            },
            tail: i == last,
        })
        .collect();
    Expression::TemplateLiteral(TemplateLiteral {
        quasis,
        expressions,
    })
}

fn params(names: &[&str]) -> Vec<Pattern> {
    names
        .iter()
        .map(|name| Pattern::Identifier(Identifier::new(name)))
        .collect()
}

fn function(name: Option<&str>, param_names: &[&str], body: Vec<Statement>) -> Rc<Function> {
    Rc::new(Function {
        id: name.map(Identifier::new),
        params: params(param_names),
        body: FunctionBody::Block(BlockStatement { body }),
        generator: false,
        is_async: false,
    })
}

/// `function name?(params) { body }` as an expression.
pub fn func_expr(name: Option<&str>, param_names: &[&str], body: Vec<Statement>) -> Expression {
    Expression::FunctionExpression(function(name, param_names, body))
}

/// `(params) => { body }`.
pub fn arrow(param_names: &[&str], body: Vec<Statement>) -> Expression {
    Expression::ArrowFunctionExpression(function(None, param_names, body))
}

/// `(params) => expression`.
pub fn arrow_expr(param_names: &[&str], body: Expression) -> Expression {
    Expression::ArrowFunctionExpression(Rc::new(Function {
        id: None,
        params: params(param_names),
        body: FunctionBody::Expression(Box::new(body)),
        generator: false,
        is_async: false,
    }))
}

// Statements

pub fn expr_stmt(expression: Expression) -> Statement {
    Statement::ExpressionStatement(ExpressionStatement { expression })
}

pub fn decl(kind: VariableKind, name: &str, init: Option<Expression>) -> Statement {
    Statement::VariableDeclaration(declaration(kind, &[(name, init)]))
}

/// A declaration with several declarators (`var a = 1, b;`).
pub fn decl_many(kind: VariableKind, declarators: Vec<(&str, Option<Expression>)>) -> Statement {
    Statement::VariableDeclaration(declaration(kind, &declarators))
}

fn declaration(
    kind: VariableKind,
    declarators: &[(&str, Option<Expression>)],
) -> VariableDeclaration {
    VariableDeclaration {
        kind,
        declarations: declarators
            .iter()
            .map(|(name, init)| VariableDeclarator {
                id: Pattern::Identifier(Identifier::new(name)),
                init: init.clone(),
            })
            .collect(),
    }
}

pub fn var(name: &str, init: Expression) -> Statement {
    decl(VariableKind::Var, name, Some(init))
}

pub fn let_(name: &str, init: Expression) -> Statement {
    decl(VariableKind::Let, name, Some(init))
}

pub fn const_(name: &str, init: Expression) -> Statement {
    decl(VariableKind::Const, name, Some(init))
}

pub fn func_decl(name: &str, param_names: &[&str], body: Vec<Statement>) -> Statement {
    Statement::FunctionDeclaration(function(Some(name), param_names, body))
}

pub fn block(body: Vec<Statement>) -> Statement {
    Statement::BlockStatement(BlockStatement { body })
}

pub fn empty() -> Statement {
    Statement::EmptyStatement(Opaque {})
}

pub fn return_(argument: Option<Expression>) -> Statement {
    Statement::ReturnStatement(ReturnStatement { argument })
}

pub fn break_(label: Option<&str>) -> Statement {
    Statement::BreakStatement(JumpStatement {
        label: label.map(Identifier::new),
    })
}

pub fn continue_(label: Option<&str>) -> Statement {
    Statement::ContinueStatement(JumpStatement {
        label: label.map(Identifier::new),
    })
}

pub fn throw_(argument: Expression) -> Statement {
    Statement::ThrowStatement(ThrowStatement { argument })
}

pub fn if_(test: Expression, consequent: Statement, alternate: Option<Statement>) -> Statement {
    Statement::IfStatement(IfStatement {
        test,
        consequent: Box::new(consequent),
        alternate: alternate.map(Box::new),
    })
}

pub fn while_(test: Expression, body: Statement) -> Statement {
    Statement::WhileStatement(WhileStatement {
        test,
        body: Box::new(body),
    })
}

pub fn do_while(body: Statement, test: Expression) -> Statement {
    Statement::DoWhileStatement(WhileStatement {
        test,
        body: Box::new(body),
    })
}

/// `for (init; test; update) body`.
pub fn for_(
    init: Option<ForInit>,
    test: Option<Expression>,
    update: Option<Expression>,
    body: Statement,
) -> Statement {
    Statement::ForStatement(ForStatement {
        init,
        test,
        update,
        body: Box::new(body),
    })
}

/// Declaration in a `for` header (`for (let i = 0, n = 3; ...)`).
pub fn init_decl(kind: VariableKind, declarators: Vec<(&str, Option<Expression>)>) -> ForInit {
    ForInit::Declaration(DeclarationNode::VariableDeclaration(declaration(
        kind,
        &declarators,
    )))
}

/// Bare expression in a `for` header (`for (i = 0; ...)`).
pub fn init_expr(expression: Expression) -> ForInit {
    ForInit::Expression(Box::new(expression))
}

/// `for (kind name in right) body`; `kind` of `None` assigns an existing binding.
pub fn for_in(
    kind: Option<VariableKind>,
    name: &str,
    right: Expression,
    body: Statement,
) -> Statement {
    let left = match kind {
        Some(kind) => ForInTarget::VariableDeclaration(declaration(kind, &[(name, None)])),
        None => ForInTarget::Identifier(Identifier::new(name)),
    };
    Statement::ForInStatement(ForInStatement {
        left,
        right,
        body: Box::new(body),
    })
}

pub fn labeled(label: &str, body: Statement) -> Statement {
    Statement::LabeledStatement(LabeledStatement {
        label: Identifier::new(label),
        body: Box::new(body),
    })
}

pub fn switch(discriminant: Expression, cases: Vec<SwitchCase>) -> Statement {
    Statement::SwitchStatement(SwitchStatement {
        discriminant,
        cases,
    })
}

/// `case test: consequent`, or `default:` when `test` is `None`.
pub fn case(test: Option<Expression>, consequent: Vec<Statement>) -> SwitchCase {
    SwitchCase { test, consequent }
}

pub fn try_(
    block: Vec<Statement>,
    handler: Option<(Option<&str>, Vec<Statement>)>,
    finalizer: Option<Vec<Statement>>,
) -> Statement {
    Statement::TryStatement(TryStatement {
        block: BlockStatement { body: block },
        handler: handler.map(|(param, body)| CatchClause {
            param: param.map(|name| Pattern::Identifier(Identifier::new(name))),
            body: BlockStatement { body },
        }),
        finalizer: finalizer.map(|body| BlockStatement { body }),
    })
}
