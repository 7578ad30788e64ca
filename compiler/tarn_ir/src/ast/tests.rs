use pretty_assertions::assert_eq;

use super::*;
use crate::builder::{
    binary, bool_lit, decl, expr_stmt, ident, init_decl, null, num, program, str_lit, update,
};
use crate::from_json;

#[test]
fn loads_declaration_and_expression_statement() {
    let json = r#"{
        "type": "Program",
        "start": 0,
        "end": 15,
        "sourceType": "script",
        "body": [
            {
                "type": "VariableDeclaration",
                "kind": "let",
                "declarations": [
                    {
                        "type": "VariableDeclarator",
                        "id": { "type": "Identifier", "name": "a" },
                        "init": { "type": "Literal", "value": 1, "raw": "1" }
                    }
                ]
            },
            {
                "type": "ExpressionStatement",
                "expression": { "type": "Identifier", "name": "a" }
            }
        ]
    }"#;

    let loaded = from_json(json).unwrap();
    let expected = program(vec![
        decl(VariableKind::Let, "a", Some(num(1.0))),
        expr_stmt(ident("a")),
    ]);
    assert_eq!(loaded, expected);
}

#[test]
fn literal_values_cover_json_scalars() {
    let parse = |raw: &str| -> Expression {
        serde_json::from_str(&format!(r#"{{"type": "Literal", "value": {raw}}}"#)).unwrap()
    };

    assert_eq!(parse("null"), null());
    assert_eq!(parse("true"), bool_lit(true));
    assert_eq!(parse("2.5"), num(2.5));
    assert_eq!(parse("\"hi\""), str_lit("hi"));
}

#[test]
fn regex_literal_is_flagged_exotic() {
    let json = r#"{"type": "Literal", "value": {}, "regex": {"pattern": "a+", "flags": "g"}}"#;
    let Expression::Literal(lit) = serde_json::from_str(json).unwrap() else {
        panic!("expected a literal");
    };
    assert!(lit.is_exotic());
    assert_eq!(lit.value, LiteralValue::Null);
}

#[test]
fn operators_deserialize_from_symbols() {
    let json = r#"{
        "type": "BinaryExpression",
        "operator": ">>>",
        "left": { "type": "Identifier", "name": "x" },
        "right": { "type": "Literal", "value": 2 }
    }"#;
    let expr: Expression = serde_json::from_str(json).unwrap();
    assert_eq!(expr, binary(ident("x"), BinaryOp::UShr, num(2.0)));

    let json = r#"{
        "type": "UpdateExpression",
        "operator": "--",
        "prefix": false,
        "argument": { "type": "Identifier", "name": "i" }
    }"#;
    let expr: Expression = serde_json::from_str(json).unwrap();
    assert_eq!(expr, update(UpdateOp::Decrement, false, ident("i")));
}

#[test]
fn for_init_accepts_declaration_or_expression() {
    let with_decl = r#"{
        "type": "ForStatement",
        "init": {
            "type": "VariableDeclaration",
            "kind": "var",
            "declarations": [
                { "type": "VariableDeclarator", "id": { "type": "Identifier", "name": "i" }, "init": { "type": "Literal", "value": 0 } }
            ]
        },
        "test": null,
        "update": null,
        "body": { "type": "EmptyStatement" }
    }"#;
    let Statement::ForStatement(stmt) = serde_json::from_str(with_decl).unwrap() else {
        panic!("expected a for statement");
    };
    assert_eq!(
        stmt.init,
        Some(init_decl(VariableKind::Var, vec![("i", Some(num(0.0)))]))
    );

    let with_expr = r#"{
        "type": "ForStatement",
        "init": { "type": "Identifier", "name": "i" },
        "test": null,
        "update": null,
        "body": { "type": "EmptyStatement" }
    }"#;
    let Statement::ForStatement(stmt) = serde_json::from_str(with_expr).unwrap() else {
        panic!("expected a for statement");
    };
    assert_eq!(stmt.init, Some(ForInit::Expression(Box::new(ident("i")))));
}

#[test]
fn arrow_body_may_be_expression_or_block() {
    let concise = r#"{
        "type": "ArrowFunctionExpression",
        "params": [],
        "expression": true,
        "body": { "type": "Literal", "value": 1 }
    }"#;
    let Expression::ArrowFunctionExpression(func) = serde_json::from_str(concise).unwrap() else {
        panic!("expected an arrow");
    };
    assert!(matches!(func.body, FunctionBody::Expression(_)));

    let block = r#"{
        "type": "ArrowFunctionExpression",
        "params": [],
        "body": { "type": "BlockStatement", "body": [] }
    }"#;
    let Expression::ArrowFunctionExpression(func) = serde_json::from_str(block).unwrap() else {
        panic!("expected an arrow");
    };
    assert_eq!(func.body, FunctionBody::Block(BlockStatement::default()));
}

#[test]
fn unexecuted_kinds_still_load() {
    let json = r#"{
        "type": "Program",
        "body": [
            { "type": "ClassDeclaration", "id": { "type": "Identifier", "name": "A" }, "body": { "type": "ClassBody", "body": [] } }
        ]
    }"#;
    let loaded = from_json(json).unwrap();
    assert_eq!(loaded.body[0].kind(), "ClassDeclaration");
    assert_eq!(loaded.source_type, SourceType::Script);
}

#[test]
fn unknown_kinds_are_rejected() {
    let json = r#"{"type": "Program", "body": [{ "type": "GotoStatement" }]}"#;
    assert!(from_json(json).is_err());
}

#[test]
fn assignment_ops_combine() {
    assert_eq!(AssignmentOp::Assign.combining(), Combine::Replace);
    assert_eq!(
        AssignmentOp::ModAssign.combining(),
        Combine::Binary(BinaryOp::Mod)
    );
    assert_eq!(
        AssignmentOp::CoalesceAssign.combining(),
        Combine::Logical(LogicalOp::Coalesce)
    );
    assert_eq!(AssignmentOp::UShrAssign.as_symbol(), ">>>=");
}

#[test]
fn loop_kinds_are_classified() {
    let json = r#"{"type": "WhileStatement", "test": {"type": "Literal", "value": false}, "body": {"type": "EmptyStatement"}}"#;
    let stmt: Statement = serde_json::from_str(json).unwrap();
    assert!(stmt.is_loop());
    assert!(!crate::builder::empty().is_loop());
}
