//! Unit tests for the parser module.
//!
//! Structure checks for declarations, statements and the expression grammar,
//! including the precedence and associativity rules.

use std::rc::Rc;

use crate::{
    ast::ast::AstNode,
    errors::errors::{Error, Reporter},
    lexer::{lexer::tokenize, tokens::TokenKind},
    SourceFile,
};

use super::{
    expr::parse_expression,
    parser::{parse, Parser},
};

fn parse_source(source: &str) -> Result<AstNode, Error> {
    let file = Rc::new(SourceFile::new("test.aster", source));
    let tokens = tokenize(Rc::clone(&file), Reporter::new(false)).unwrap();
    parse(tokens, file, Reporter::new(false))
}

fn parse_expr(source: &str) -> AstNode {
    let file = Rc::new(SourceFile::new("test.aster", source));
    let tokens = tokenize(Rc::clone(&file), Reporter::new(false)).unwrap();
    let mut parser = Parser::new(tokens, file, Reporter::new(false));
    parse_expression(&mut parser).unwrap()
}

fn identifier(name: &str) -> AstNode {
    AstNode::Identifier(name.to_string())
}

fn integer(value: &str) -> AstNode {
    AstNode::IntegerLiteral(value.to_string())
}

fn binary(left: AstNode, operator: TokenKind, right: AstNode) -> AstNode {
    AstNode::Binary {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let ast = parse_source("int32: x = 42;").unwrap();

    let AstNode::Program(declarations) = ast else {
        panic!("expected a program root");
    };
    assert_eq!(declarations.len(), 1);
    let AstNode::VariableDeclaration {
        data_type,
        variables,
    } = &declarations[0]
    else {
        panic!("expected a variable declaration");
    };
    assert_eq!(
        **data_type,
        AstNode::DataType {
            qualifiers: vec![],
            name: "int32".to_string()
        }
    );
    assert_eq!(variables.len(), 1);
    assert_eq!(variables[0].0, "x");
    assert_eq!(variables[0].1, Some(integer("42")));
}

#[test]
fn test_parse_declaration_list() {
    let ast = parse_source("int32: x = 1, y, z = 3;").unwrap();

    let AstNode::Program(declarations) = ast else {
        panic!("expected a program root");
    };
    let AstNode::VariableDeclaration { variables, .. } = &declarations[0] else {
        panic!("expected a variable declaration");
    };
    assert_eq!(variables.len(), 3);
    assert_eq!(variables[1], ("y".to_string(), None));
    assert_eq!(variables[2], ("z".to_string(), Some(integer("3"))));
}

#[test]
fn test_parse_qualified_declaration() {
    let ast = parse_source("const int32: LIMIT = 10;").unwrap();

    let AstNode::Program(declarations) = ast else {
        panic!("expected a program root");
    };
    let AstNode::VariableDeclaration { data_type, .. } = &declarations[0] else {
        panic!("expected a variable declaration");
    };
    assert_eq!(
        **data_type,
        AstNode::DataType {
            qualifiers: vec!["const".to_string()],
            name: "int32".to_string()
        }
    );
}

#[test]
fn test_parse_let_declaration() {
    assert!(parse_source("let: inferred = 1 + 2;").is_ok());
}

#[test]
fn test_parse_function_declaration() {
    let ast = parse_source("func add(x: int32, y: int32): int32 { return x + y; }").unwrap();

    let AstNode::Program(declarations) = ast else {
        panic!("expected a program root");
    };
    let AstNode::FunctionDeclaration {
        name,
        parameters,
        return_type,
        body,
    } = &declarations[0]
    else {
        panic!("expected a function declaration");
    };
    assert_eq!(name, "add");
    assert_eq!(parameters.len(), 2);
    assert_eq!(parameters[0].names, vec![("x".to_string(), None)]);
    assert_eq!(
        parameters[0].data_type,
        AstNode::DataType {
            qualifiers: vec![],
            name: "int32".to_string()
        }
    );
    assert_eq!(parameters[1].names, vec![("y".to_string(), None)]);
    assert_eq!(
        **return_type,
        AstNode::DataType {
            qualifiers: vec![],
            name: "int32".to_string()
        }
    );

    let AstNode::Block(statements) = body.as_ref() else {
        panic!("expected a block body");
    };
    assert_eq!(statements.len(), 1);
    assert_eq!(
        statements[0],
        AstNode::Jump {
            keyword: "return".to_string(),
            value: Some(Box::new(binary(
                identifier("x"),
                TokenKind::Plus,
                identifier("y")
            ))),
        }
    );
}

#[test]
fn test_parse_grouped_parameters() {
    let ast = parse_source("func max(a, b: int64): int64 { return a; }").unwrap();

    let AstNode::Program(declarations) = ast else {
        panic!("expected a program root");
    };
    let AstNode::FunctionDeclaration { parameters, .. } = &declarations[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(parameters.len(), 1);
    assert_eq!(
        parameters[0].names,
        vec![("a".to_string(), None), ("b".to_string(), None)]
    );
}

#[test]
fn test_parse_parameter_defaults() {
    let ast = parse_source("func greet(times = 1: int32): void { }").unwrap();

    let AstNode::Program(declarations) = ast else {
        panic!("expected a program root");
    };
    let AstNode::FunctionDeclaration { parameters, .. } = &declarations[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(
        parameters[0].names,
        vec![("times".to_string(), Some(integer("1")))]
    );
}

#[test]
fn test_parse_empty_parameter_list() {
    assert!(parse_source("func main(): void { }").is_ok());
}

#[test]
fn test_parse_untyped_parameter_fails() {
    assert!(parse_source("func f(x): void { }").is_err());
}

#[test]
fn test_parse_expression_precedence() {
    let ast = parse_expr("1 + 2 * 3");

    assert_eq!(
        ast,
        binary(
            integer("1"),
            TokenKind::Plus,
            binary(integer("2"), TokenKind::Star, integer("3"))
        )
    );
}

#[test]
fn test_parse_grouping_overrides_precedence() {
    let ast = parse_expr("(1 + 2) * 3");

    assert_eq!(
        ast,
        binary(
            binary(integer("1"), TokenKind::Plus, integer("2")),
            TokenKind::Star,
            integer("3")
        )
    );
}

#[test]
fn test_parse_exponent_groups_left() {
    let ast = parse_expr("2**3**2");

    assert_eq!(
        ast,
        binary(
            binary(integer("2"), TokenKind::StarStar, integer("3")),
            TokenKind::StarStar,
            integer("2")
        )
    );
}

#[test]
fn test_parse_assignment_chain_folds_left() {
    let ast = parse_expr("a = b = c");

    assert_eq!(
        ast,
        binary(
            binary(identifier("a"), TokenKind::Assignment, identifier("b")),
            TokenKind::Assignment,
            identifier("c")
        )
    );
}

#[test]
fn test_parse_logical_binds_looser_than_relational() {
    let ast = parse_expr("a > 0 && b < 1");

    assert_eq!(
        ast,
        binary(
            binary(identifier("a"), TokenKind::Greater, integer("0")),
            TokenKind::And,
            binary(identifier("b"), TokenKind::Less, integer("1"))
        )
    );
}

#[test]
fn test_parse_bitwise_levels() {
    // `&` binds tighter than `^`, which binds tighter than `|`.
    let ast = parse_expr("a | b ^ c & d");

    assert_eq!(
        ast,
        binary(
            identifier("a"),
            TokenKind::Pipe,
            binary(
                identifier("b"),
                TokenKind::Caret,
                binary(identifier("c"), TokenKind::Ampersand, identifier("d"))
            )
        )
    );
}

#[test]
fn test_parse_ternary() {
    let ast = parse_expr("a ? b : c");

    assert_eq!(
        ast,
        AstNode::Ternary {
            condition: Box::new(identifier("a")),
            then_value: Box::new(identifier("b")),
            else_value: Box::new(identifier("c")),
        }
    );
}

#[test]
fn test_parse_trailing_if_ternary() {
    // `b if a else c` is the alternate spelling of `a ? b : c`.
    let ast = parse_expr("b if a else c");

    assert_eq!(
        ast,
        AstNode::Ternary {
            condition: Box::new(identifier("a")),
            then_value: Box::new(identifier("b")),
            else_value: Box::new(identifier("c")),
        }
    );
}

#[test]
fn test_parse_prefix_chain() {
    let ast = parse_expr("--x");

    assert_eq!(
        ast,
        AstNode::Unary {
            operator: TokenKind::MinusMinus,
            operand: Box::new(identifier("x")),
            prefix: true,
        }
    );
}

#[test]
fn test_parse_postfix() {
    let ast = parse_expr("x++");

    assert_eq!(
        ast,
        AstNode::Unary {
            operator: TokenKind::PlusPlus,
            operand: Box::new(identifier("x")),
            prefix: false,
        }
    );
}

#[test]
fn test_parse_member_chain() {
    let ast = parse_expr("a.b.c");

    assert_eq!(
        ast,
        binary(
            binary(identifier("a"), TokenKind::Dot, identifier("b")),
            TokenKind::Dot,
            identifier("c")
        )
    );
}

#[test]
fn test_parse_member_call() {
    let ast = parse_expr("list.push(1)");

    assert_eq!(
        ast,
        binary(
            identifier("list"),
            TokenKind::Dot,
            AstNode::FunctionCall {
                callee: "push".to_string(),
                arguments: vec![integer("1")],
            }
        )
    );
}

#[test]
fn test_parse_call_arguments() {
    let ast = parse_expr("clamp(x, 0, max - 1)");

    let AstNode::FunctionCall { callee, arguments } = ast else {
        panic!("expected a call");
    };
    assert_eq!(callee, "clamp");
    assert_eq!(arguments.len(), 3);
    assert_eq!(
        arguments[2],
        binary(identifier("max"), TokenKind::Dash, integer("1"))
    );
}

#[test]
fn test_parse_literals() {
    assert_eq!(parse_expr("true"), AstNode::BoolLiteral(true));
    assert_eq!(parse_expr("false"), AstNode::BoolLiteral(false));
    assert_eq!(parse_expr("null"), AstNode::NullLiteral);
    assert_eq!(
        parse_expr("\"hi\""),
        AstNode::StringLiteral("hi".to_string())
    );
    assert_eq!(parse_expr("3.5"), AstNode::DecimalLiteral("3.5".to_string()));
}

#[test]
fn test_parse_if_elif_else() {
    let source = r#"
        func grade(score: int32): int32 {
            if (score > 90) { return 1; }
            elif (score > 60) { return 2; }
            elif (score > 30) { return 3; }
            else { return 4; }
        }
    "#;
    let ast = parse_source(source).unwrap();

    let AstNode::Program(declarations) = ast else {
        panic!("expected a program root");
    };
    let AstNode::FunctionDeclaration { body, .. } = &declarations[0] else {
        panic!("expected a function declaration");
    };
    let AstNode::Block(statements) = body.as_ref() else {
        panic!("expected a block body");
    };
    let AstNode::If {
        elif_branches,
        else_block,
        ..
    } = &statements[0]
    else {
        panic!("expected an if statement");
    };
    assert_eq!(elif_branches.len(), 2);
    assert!(else_block.is_some());
}

#[test]
fn test_parse_while_loop() {
    let source = "func run(): void { while (x < 10) { x += 1; } }";
    assert!(parse_source(source).is_ok());
}

#[test]
fn test_parse_do_while_requires_semicolon() {
    let good = "func run(): void { do { x += 1; } while (x < 10); }";
    assert!(parse_source(good).is_ok());

    let bad = "func run(): void { do { x += 1; } while (x < 10) }";
    assert!(parse_source(bad).is_err());
}

#[test]
fn test_parse_for_loop() {
    let source = "func run(): void { for (int32: i = 0; i < 10; i++) { use(i); } }";
    let ast = parse_source(source).unwrap();

    let AstNode::Program(declarations) = ast else {
        panic!("expected a program root");
    };
    let AstNode::FunctionDeclaration { body, .. } = &declarations[0] else {
        panic!("expected a function declaration");
    };
    let AstNode::Block(statements) = body.as_ref() else {
        panic!("expected a block body");
    };
    let AstNode::For {
        init,
        condition,
        step,
        ..
    } = &statements[0]
    else {
        panic!("expected a for loop");
    };
    assert!(matches!(
        init.as_deref(),
        Some(AstNode::VariableDeclaration { .. })
    ));
    assert!(condition.is_some());
    assert!(matches!(step.as_deref(), Some(AstNode::Unary { .. })));
}

#[test]
fn test_parse_for_loop_with_empty_clauses() {
    assert!(parse_source("func run(): void { for (;;) { } }").is_ok());
}

#[test]
fn test_parse_jump_statements() {
    let source = "func run(): void { break; continue; return; return 1; }";
    let ast = parse_source(source).unwrap();

    let AstNode::Program(declarations) = ast else {
        panic!("expected a program root");
    };
    let AstNode::FunctionDeclaration { body, .. } = &declarations[0] else {
        panic!("expected a function declaration");
    };
    let AstNode::Block(statements) = body.as_ref() else {
        panic!("expected a block body");
    };
    assert_eq!(statements.len(), 4);
    assert_eq!(
        statements[3],
        AstNode::Jump {
            keyword: "return".to_string(),
            value: Some(Box::new(integer("1"))),
        }
    );
}

#[test]
fn test_parse_nested_blocks() {
    assert!(parse_source("func run(): void { { int32: x; { x = 1; } } }").is_ok());
}

#[test]
fn test_statement_lookahead_tells_declarations_apart() {
    // `point: p;` declares, `point = p;` assigns.
    let source = "func run(): void { point: p; point = p; }";
    let ast = parse_source(source).unwrap();

    let AstNode::Program(declarations) = ast else {
        panic!("expected a program root");
    };
    let AstNode::FunctionDeclaration { body, .. } = &declarations[0] else {
        panic!("expected a function declaration");
    };
    let AstNode::Block(statements) = body.as_ref() else {
        panic!("expected a block body");
    };
    assert!(matches!(
        statements[0],
        AstNode::VariableDeclaration { .. }
    ));
    assert!(matches!(statements[1], AstNode::Binary { .. }));
}

#[test]
fn test_ternary_statement_is_not_a_declaration() {
    let source = "func run(): void { flag ? yes() : no(); }";
    let ast = parse_source(source).unwrap();

    let AstNode::Program(declarations) = ast else {
        panic!("expected a program root");
    };
    let AstNode::FunctionDeclaration { body, .. } = &declarations[0] else {
        panic!("expected a function declaration");
    };
    let AstNode::Block(statements) = body.as_ref() else {
        panic!("expected a block body");
    };
    assert!(matches!(statements[0], AstNode::Ternary { .. }));
}

#[test]
fn test_parse_empty_program() {
    assert_eq!(parse_source("").unwrap(), AstNode::Program(vec![]));
}

#[test]
fn test_parse_missing_semicolon_fails() {
    let error = parse_source("int32: x = 42").unwrap_err();
    assert_eq!(error.code(), 10);
}

#[test]
fn test_parse_missing_identifier_fails() {
    assert!(parse_source("int32: = 42;").is_err());
}

#[test]
fn test_parse_statement_at_top_level_fails() {
    assert!(parse_source("return 1;").is_err());
}

#[test]
fn test_parse_error_at_eof_stays_in_buffer() {
    let error = parse_source("int32: x =").unwrap_err();

    // Anchored to the last real token, not the EOF sentinel.
    assert_eq!(error.code(), 10);
    assert!(!error.span().start.is_missing());
}

#[test]
fn test_deep_nesting_fails_gracefully() {
    let source = format!("int32: x = {}1{};", "(".repeat(300), ")".repeat(300));
    let error = parse_source(&source).unwrap_err();
    assert_eq!(error.code(), 10);
}

#[test]
fn test_moderate_nesting_is_accepted() {
    let source = format!("int32: x = {}1{};", "(".repeat(200), ")".repeat(200));
    assert!(parse_source(&source).is_ok());
}
