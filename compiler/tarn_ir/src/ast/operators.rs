//! Operator enums.
//!
//! Each operator deserializes from the symbol ESTree stores in the
//! `operator` field and renders back to it with `as_symbol`.

use serde::Deserialize;

/// Binary operators (`BinaryExpression.operator`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Deserialize)]
pub enum BinaryOp {
    // Equality
    #[serde(rename = "==")]
    LooseEq,
    #[serde(rename = "!=")]
    LooseNotEq,
    #[serde(rename = "===")]
    StrictEq,
    #[serde(rename = "!==")]
    StrictNotEq,

    // Relational
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    InstanceOf,

    // Shift
    #[serde(rename = "<<")]
    Shl,
    #[serde(rename = ">>")]
    Shr,
    #[serde(rename = ">>>")]
    UShr,

    // Arithmetic
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "**")]
    Exp,

    // Bitwise
    #[serde(rename = "|")]
    BitOr,
    #[serde(rename = "^")]
    BitXor,
    #[serde(rename = "&")]
    BitAnd,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::LooseEq => "==",
            Self::LooseNotEq => "!=",
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::In => "in",
            Self::InstanceOf => "instanceof",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Exp => "**",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
        }
    }
}

/// Short-circuiting operators (`LogicalExpression.operator`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Deserialize)]
pub enum LogicalOp {
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "??")]
    Coalesce,
}

impl LogicalOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Coalesce => "??",
        }
    }
}

/// Prefix operators (`UnaryExpression.operator`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Deserialize)]
pub enum UnaryOp {
    #[serde(rename = "-")]
    Neg,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "~")]
    BitNot,
    #[serde(rename = "typeof")]
    TypeOf,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::TypeOf => "typeof",
            Self::Void => "void",
            Self::Delete => "delete",
        }
    }
}

/// `++` / `--` (`UpdateExpression.operator`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Deserialize)]
pub enum UpdateOp {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl UpdateOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }

    /// The binary operator applied to the old value and `1`.
    pub const fn binary_op(self) -> BinaryOp {
        match self {
            Self::Increment => BinaryOp::Add,
            Self::Decrement => BinaryOp::Sub,
        }
    }
}

/// Assignment operators (`AssignmentExpression.operator`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Deserialize)]
pub enum AssignmentOp {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    AddAssign,
    #[serde(rename = "-=")]
    SubAssign,
    #[serde(rename = "*=")]
    MulAssign,
    #[serde(rename = "/=")]
    DivAssign,
    #[serde(rename = "%=")]
    ModAssign,
    #[serde(rename = "**=")]
    ExpAssign,
    #[serde(rename = "<<=")]
    ShlAssign,
    #[serde(rename = ">>=")]
    ShrAssign,
    #[serde(rename = ">>>=")]
    UShrAssign,
    #[serde(rename = "|=")]
    BitOrAssign,
    #[serde(rename = "^=")]
    BitXorAssign,
    #[serde(rename = "&=")]
    BitAndAssign,
    #[serde(rename = "||=")]
    OrAssign,
    #[serde(rename = "&&=")]
    AndAssign,
    #[serde(rename = "??=")]
    CoalesceAssign,
}

/// How an assignment combines the old value with the right-hand side.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Combine {
    /// Plain `=`: the right-hand side replaces the old value.
    Replace,
    /// Compound arithmetic/bitwise assignment.
    Binary(BinaryOp),
    /// Logical assignment: the right-hand side is only evaluated (and
    /// stored) when the short-circuit test on the old value lets it through.
    Logical(LogicalOp),
}

impl AssignmentOp {
    pub const fn combining(self) -> Combine {
        match self {
            Self::Assign => Combine::Replace,
            Self::AddAssign => Combine::Binary(BinaryOp::Add),
            Self::SubAssign => Combine::Binary(BinaryOp::Sub),
            Self::MulAssign => Combine::Binary(BinaryOp::Mul),
            Self::DivAssign => Combine::Binary(BinaryOp::Div),
            Self::ModAssign => Combine::Binary(BinaryOp::Mod),
            Self::ExpAssign => Combine::Binary(BinaryOp::Exp),
            Self::ShlAssign => Combine::Binary(BinaryOp::Shl),
            Self::ShrAssign => Combine::Binary(BinaryOp::Shr),
            Self::UShrAssign => Combine::Binary(BinaryOp::UShr),
            Self::BitOrAssign => Combine::Binary(BinaryOp::BitOr),
            Self::BitXorAssign => Combine::Binary(BinaryOp::BitXor),
            Self::BitAndAssign => Combine::Binary(BinaryOp::BitAnd),
            Self::OrAssign => Combine::Logical(LogicalOp::Or),
            Self::AndAssign => Combine::Logical(LogicalOp::And),
            Self::CoalesceAssign => Combine::Logical(LogicalOp::Coalesce),
        }
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::ExpAssign => "**=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
            Self::UShrAssign => ">>>=",
            Self::BitOrAssign => "|=",
            Self::BitXorAssign => "^=",
            Self::BitAndAssign => "&=",
            Self::OrAssign => "||=",
            Self::AndAssign => "&&=",
            Self::CoalesceAssign => "??=",
        }
    }
}
