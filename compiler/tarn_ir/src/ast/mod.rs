//! ESTree node types.
//!
//! The tree mirrors the ESTree JSON shape closely enough that it can be
//! deserialized straight from a parser's output: every node enum is tagged
//! by the `type` field and struct field names follow ESTree's camelCase.
//! Position fields (`start`, `end`, `loc`, `range`) and `raw` text are
//! ignored.
//!
//! Node kinds that the evaluator does not execute are still part of the
//! schema (as [`Opaque`] payloads) so that a tree containing them loads and
//! the failure is reported as an unsupported node at the point of execution.

mod expr;
mod operators;
mod pattern;

use std::rc::Rc;

use serde::Deserialize;

pub use expr::{
    ArrayExpression, AssignmentExpression, BinaryExpression, CallExpression,
    ConditionalExpression, Expression, Function, FunctionBody, Literal, LiteralValue,
    LogicalExpression, MemberExpression, NewExpression, ObjectExpression, ObjectMember,
    Property, PropertyKind, SequenceExpression, TemplateElement, TemplateLiteral,
    TemplateValue, UnaryExpression, UpdateExpression,
};
pub use operators::{
    AssignmentOp, BinaryOp, Combine, LogicalOp, UnaryOp, UpdateOp,
};
pub use pattern::Pattern;

/// Identifier text.
///
/// Shared so that scopes, closures and property maps can hold names
/// without copying the string.
pub type Name = Rc<str>;

/// Payload of schema-known node kinds the evaluator does not execute.
///
/// All fields of such nodes are ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Opaque {}

/// Root node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub body: Vec<Statement>,
    #[serde(default)]
    pub source_type: SourceType,
}

impl Program {
    pub fn new(body: Vec<Statement>) -> Self {
        Program {
            body,
            source_type: SourceType::Script,
        }
    }
}

/// `Program.sourceType`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Script,
    Module,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Identifier {
    pub name: Name,
}

impl Identifier {
    pub fn new(name: &str) -> Self {
        Identifier { name: name.into() }
    }
}

/// Statement nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    ExpressionStatement(ExpressionStatement),
    BlockStatement(BlockStatement),
    EmptyStatement(Opaque),
    DebuggerStatement(Opaque),
    VariableDeclaration(VariableDeclaration),
    FunctionDeclaration(Rc<Function>),
    ReturnStatement(ReturnStatement),
    BreakStatement(JumpStatement),
    ContinueStatement(JumpStatement),
    IfStatement(IfStatement),
    SwitchStatement(SwitchStatement),
    WhileStatement(WhileStatement),
    DoWhileStatement(WhileStatement),
    ForStatement(ForStatement),
    ForInStatement(ForInStatement),
    LabeledStatement(LabeledStatement),
    TryStatement(TryStatement),
    ThrowStatement(ThrowStatement),

    // Known to the schema, not executed.
    ForOfStatement(Opaque),
    ClassDeclaration(Opaque),
    WithStatement(Opaque),
    ImportDeclaration(Opaque),
    ExportNamedDeclaration(Opaque),
    ExportDefaultDeclaration(Opaque),
    ExportAllDeclaration(Opaque),
}

impl Statement {
    /// The ESTree `type` name of this node.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::ExpressionStatement(_) => "ExpressionStatement",
            Statement::BlockStatement(_) => "BlockStatement",
            Statement::EmptyStatement(_) => "EmptyStatement",
            Statement::DebuggerStatement(_) => "DebuggerStatement",
            Statement::VariableDeclaration(_) => "VariableDeclaration",
            Statement::FunctionDeclaration(_) => "FunctionDeclaration",
            Statement::ReturnStatement(_) => "ReturnStatement",
            Statement::BreakStatement(_) => "BreakStatement",
            Statement::ContinueStatement(_) => "ContinueStatement",
            Statement::IfStatement(_) => "IfStatement",
            Statement::SwitchStatement(_) => "SwitchStatement",
            Statement::WhileStatement(_) => "WhileStatement",
            Statement::DoWhileStatement(_) => "DoWhileStatement",
            Statement::ForStatement(_) => "ForStatement",
            Statement::ForInStatement(_) => "ForInStatement",
            Statement::LabeledStatement(_) => "LabeledStatement",
            Statement::TryStatement(_) => "TryStatement",
            Statement::ThrowStatement(_) => "ThrowStatement",
            Statement::ForOfStatement(_) => "ForOfStatement",
            Statement::ClassDeclaration(_) => "ClassDeclaration",
            Statement::WithStatement(_) => "WithStatement",
            Statement::ImportDeclaration(_) => "ImportDeclaration",
            Statement::ExportNamedDeclaration(_) => "ExportNamedDeclaration",
            Statement::ExportDefaultDeclaration(_) => "ExportDefaultDeclaration",
            Statement::ExportAllDeclaration(_) => "ExportAllDeclaration",
        }
    }

    /// Whether the statement is a loop, i.e. consumes unlabeled `continue`.
    pub fn is_loop(&self) -> bool {
        matches!(
            self,
            Statement::WhileStatement(_)
                | Statement::DoWhileStatement(_)
                | Statement::ForStatement(_)
                | Statement::ForInStatement(_)
                | Statement::ForOfStatement(_)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BlockStatement {
    pub body: Vec<Statement>,
}

/// `var` / `let` / `const`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub const fn as_keyword(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VariableDeclaration {
    pub kind: VariableKind,
    pub declarations: Vec<VariableDeclarator>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VariableDeclarator {
    pub id: Pattern,
    #[serde(default)]
    pub init: Option<Expression>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReturnStatement {
    #[serde(default)]
    pub argument: Option<Expression>,
}

/// `break` and `continue`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct JumpStatement {
    #[serde(default)]
    pub label: Option<Identifier>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct IfStatement {
    pub test: Expression,
    pub consequent: Box<Statement>,
    #[serde(default)]
    pub alternate: Option<Box<Statement>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SwitchStatement {
    pub discriminant: Expression,
    pub cases: Vec<SwitchCase>,
}

/// One `case test:` (or `default:` when `test` is absent).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SwitchCase {
    #[serde(default)]
    pub test: Option<Expression>,
    pub consequent: Vec<Statement>,
}

/// `while` and `do ... while`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WhileStatement {
    pub test: Expression,
    pub body: Box<Statement>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ForStatement {
    #[serde(default)]
    pub init: Option<ForInit>,
    #[serde(default)]
    pub test: Option<Expression>,
    #[serde(default)]
    pub update: Option<Expression>,
    pub body: Box<Statement>,
}

/// `ForStatement.init`: a declaration or a bare expression.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ForInit {
    Declaration(DeclarationNode),
    Expression(Box<Expression>),
}

/// A `VariableDeclaration` in a position that also accepts expressions.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum DeclarationNode {
    VariableDeclaration(VariableDeclaration),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ForInStatement {
    pub left: ForInTarget,
    pub right: Expression,
    pub body: Box<Statement>,
}

/// `ForInStatement.left`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ForInTarget {
    VariableDeclaration(VariableDeclaration),
    Identifier(Identifier),
    MemberExpression(MemberExpression),
    ObjectPattern(Opaque),
    ArrayPattern(Opaque),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LabeledStatement {
    pub label: Identifier,
    pub body: Box<Statement>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TryStatement {
    pub block: BlockStatement,
    #[serde(default)]
    pub handler: Option<CatchClause>,
    #[serde(default)]
    pub finalizer: Option<BlockStatement>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CatchClause {
    #[serde(default)]
    pub param: Option<Pattern>,
    pub body: BlockStatement,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ThrowStatement {
    pub argument: Expression,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
