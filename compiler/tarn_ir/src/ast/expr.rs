//! Expression nodes.

use std::rc::Rc;

use serde::Deserialize;

use super::{
    AssignmentOp, BinaryOp, BlockStatement, Identifier, LogicalOp, Name, Opaque, Pattern,
    UnaryOp, UpdateOp,
};

/// Expression nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    Identifier(Identifier),
    Literal(Literal),
    ThisExpression(Opaque),
    ArrayExpression(ArrayExpression),
    ObjectExpression(ObjectExpression),
    FunctionExpression(Rc<Function>),
    ArrowFunctionExpression(Rc<Function>),
    TemplateLiteral(TemplateLiteral),
    UnaryExpression(UnaryExpression),
    UpdateExpression(UpdateExpression),
    BinaryExpression(BinaryExpression),
    LogicalExpression(LogicalExpression),
    AssignmentExpression(AssignmentExpression),
    ConditionalExpression(ConditionalExpression),
    CallExpression(CallExpression),
    NewExpression(NewExpression),
    MemberExpression(MemberExpression),
    SequenceExpression(SequenceExpression),

    // Known to the schema, not executed.
    ClassExpression(Opaque),
    TaggedTemplateExpression(Opaque),
    SpreadElement(Opaque),
    YieldExpression(Opaque),
    AwaitExpression(Opaque),
    ChainExpression(Opaque),
    ImportExpression(Opaque),
    MetaProperty(Opaque),
    Super(Opaque),
}

impl Expression {
    /// The ESTree `type` name of this node.
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Identifier(_) => "Identifier",
            Expression::Literal(_) => "Literal",
            Expression::ThisExpression(_) => "ThisExpression",
            Expression::ArrayExpression(_) => "ArrayExpression",
            Expression::ObjectExpression(_) => "ObjectExpression",
            Expression::FunctionExpression(_) => "FunctionExpression",
            Expression::ArrowFunctionExpression(_) => "ArrowFunctionExpression",
            Expression::TemplateLiteral(_) => "TemplateLiteral",
            Expression::UnaryExpression(_) => "UnaryExpression",
            Expression::UpdateExpression(_) => "UpdateExpression",
            Expression::BinaryExpression(_) => "BinaryExpression",
            Expression::LogicalExpression(_) => "LogicalExpression",
            Expression::AssignmentExpression(_) => "AssignmentExpression",
            Expression::ConditionalExpression(_) => "ConditionalExpression",
            Expression::CallExpression(_) => "CallExpression",
            Expression::NewExpression(_) => "NewExpression",
            Expression::MemberExpression(_) => "MemberExpression",
            Expression::SequenceExpression(_) => "SequenceExpression",
            Expression::ClassExpression(_) => "ClassExpression",
            Expression::TaggedTemplateExpression(_) => "TaggedTemplateExpression",
            Expression::SpreadElement(_) => "SpreadElement",
            Expression::YieldExpression(_) => "YieldExpression",
            Expression::AwaitExpression(_) => "AwaitExpression",
            Expression::ChainExpression(_) => "ChainExpression",
            Expression::ImportExpression(_) => "ImportExpression",
            Expression::MetaProperty(_) => "MetaProperty",
            Expression::Super(_) => "Super",
        }
    }
}

/// `Literal`. Regular-expression and BigInt literals carry their source in
/// `regex` / `bigint`; their `value` is not representable and reads as null.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Literal {
    #[serde(default)]
    pub value: LiteralValue,
    #[serde(default)]
    pub regex: Option<Opaque>,
    #[serde(default)]
    pub bigint: Option<String>,
}

impl Literal {
    pub fn new(value: LiteralValue) -> Self {
        Literal {
            value,
            regex: None,
            bigint: None,
        }
    }

    /// Literal forms the evaluator cannot represent.
    pub fn is_exotic(&self) -> bool {
        self.regex.is_some() || self.bigint.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum LiteralValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(Name),
}

impl From<serde_json::Value> for LiteralValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(b) => LiteralValue::Bool(b),
            serde_json::Value::Number(n) => LiteralValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => LiteralValue::String(s.into()),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => LiteralValue::Null,
        }
    }
}

impl<'de> Deserialize<'de> for LiteralValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(LiteralValue::from)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ArrayExpression {
    /// `None` entries are holes (`[1, , 3]`).
    pub elements: Vec<Option<Expression>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ObjectExpression {
    pub properties: Vec<ObjectMember>,
}

/// An entry of an object literal.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectMember {
    Property(Property),
    SpreadElement(Opaque),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Property {
    pub key: Expression,
    pub value: Expression,
    #[serde(default)]
    pub kind: PropertyKind,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub method: bool,
    #[serde(default)]
    pub shorthand: bool,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    #[default]
    Init,
    Get,
    Set,
}

/// Shared by `FunctionDeclaration`, `FunctionExpression` and
/// `ArrowFunctionExpression`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Function {
    #[serde(default)]
    pub id: Option<Identifier>,
    pub params: Vec<Pattern>,
    pub body: FunctionBody,
    #[serde(default)]
    pub generator: bool,
    #[serde(default, rename = "async")]
    pub is_async: bool,
}

/// A function body: a block, or a bare expression for concise arrows.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FunctionBody {
    Expression(Box<Expression>),
    Block(BlockStatement),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TemplateLiteral {
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<Expression>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TemplateElement {
    pub value: TemplateValue,
    #[serde(default)]
    pub tail: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TemplateValue {
    pub raw: Name,
    #[serde(default)]
    pub cooked: Option<Name>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UnaryExpression {
    pub operator: UnaryOp,
    pub argument: Box<Expression>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UpdateExpression {
    pub operator: UpdateOp,
    pub argument: Box<Expression>,
    pub prefix: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BinaryExpression {
    pub operator: BinaryOp,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LogicalExpression {
    pub operator: LogicalOp,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AssignmentExpression {
    pub operator: AssignmentOp,
    pub left: Box<Pattern>,
    pub right: Box<Expression>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ConditionalExpression {
    pub test: Box<Expression>,
    pub consequent: Box<Expression>,
    pub alternate: Box<Expression>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NewExpression {
    pub callee: Box<Expression>,
    #[serde(default)]
    pub arguments: Vec<Expression>,
}

/// `object.property` or `object[property]` when `computed`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub property: Box<Expression>,
    #[serde(default)]
    pub computed: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SequenceExpression {
    pub expressions: Vec<Expression>,
}
