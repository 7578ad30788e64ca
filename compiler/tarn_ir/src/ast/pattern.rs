//! Binding and assignment targets.

use serde::Deserialize;

use super::{Expression, Identifier, MemberExpression, Opaque};

/// Left-hand sides of declarators, assignments and parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    Identifier(Identifier),
    MemberExpression(MemberExpression),
    /// `param = default`, accepted for parameters and declarators.
    AssignmentPattern {
        left: Box<Pattern>,
        right: Box<Expression>,
    },
    /// `...rest`, accepted as the last parameter.
    RestElement { argument: Box<Pattern> },

    // Destructuring is not executed.
    ObjectPattern(Opaque),
    ArrayPattern(Opaque),
}

impl Pattern {
    pub fn kind(&self) -> &'static str {
        match self {
            Pattern::Identifier(_) => "Identifier",
            Pattern::MemberExpression(_) => "MemberExpression",
            Pattern::AssignmentPattern { .. } => "AssignmentPattern",
            Pattern::RestElement { .. } => "RestElement",
            Pattern::ObjectPattern(_) => "ObjectPattern",
            Pattern::ArrayPattern(_) => "ArrayPattern",
        }
    }

    /// The bound name when the pattern is a plain identifier.
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Pattern::Identifier(id) => Some(id),
            _ => None,
        }
    }
}
