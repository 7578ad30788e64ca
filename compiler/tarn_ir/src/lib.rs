//! Tarn IR - the syntax tree consumed by the evaluator.
//!
//! Tarn does not parse source text. A host parser (acorn, esprima, swc in
//! ESTree mode) produces an ESTree tree; this crate provides the typed
//! rendition of that tree, a JSON loader, and [`builder`] helpers for
//! constructing trees directly in Rust.

pub mod ast;
pub mod builder;

use thiserror::Error;

pub use ast::{
    AssignmentOp, BinaryOp, BlockStatement, Combine, Expression, Function, FunctionBody,
    Identifier, Literal, LiteralValue, LogicalOp, Name, Pattern, Program, SourceType,
    Statement, UnaryOp, UpdateOp, VariableKind,
};

/// Failure to load a syntax tree.
#[derive(Debug, Error)]
pub enum IrError {
    #[error("malformed ESTree JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load a `Program` from ESTree JSON text.
pub fn from_json(text: &str) -> Result<Program, IrError> {
    Ok(serde_json::from_str(text)?)
}

/// Load a `Program` from an already parsed JSON document.
pub fn from_json_value(value: serde_json::Value) -> Result<Program, IrError> {
    Ok(serde_json::from_value(value)?)
}
