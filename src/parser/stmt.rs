//! Statement and declaration grammar.

use crate::{
    ast::ast::{AstNode, ParameterGroup},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expression, parser::Parser};

/// Qualifier keywords accepted in front of a type.
const TYPE_QUALIFIERS: [&str; 3] = ["const", "ref", "static"];

/// A program-level item: a function declaration or a variable declaration.
pub fn parse_declaration(parser: &mut Parser) -> Result<AstNode, Error> {
    if parser.current().is_keyword("func") {
        return parse_function_declaration(parser);
    }
    if leads_declaration(parser) {
        let declaration = parse_variable_declaration(parser)?;
        parser.expect(TokenKind::Semicolon, "';'")?;
        return Ok(declaration);
    }
    Err(parser.syntax_error(format!(
        "expected a declaration, but got '{}'",
        parser.current().value
    )))
}

/// True when the tokens at the cursor start a variable declaration.
///
/// Qualifier keywords, `let` and primary types decide immediately; for a
/// leading identifier (a user-named type) a bounded lookahead scans to the
/// next `;` `,` `)` — or `?`, so a ternary expression statement is not
/// mistaken for a declaration — and says yes only if a `:` shows up first.
/// The cursor itself never moves.
fn leads_declaration(parser: &Parser) -> bool {
    match parser.current_kind() {
        TokenKind::PrimaryType => true,
        TokenKind::Keyword => {
            parser.current().value == "let"
                || TYPE_QUALIFIERS.contains(&parser.current().value.as_str())
        }
        TokenKind::Identifier => {
            let mut index = parser.position();
            loop {
                match parser.token_at(index).kind {
                    TokenKind::Colon => return true,
                    TokenKind::Semicolon
                    | TokenKind::Comma
                    | TokenKind::CloseParen
                    | TokenKind::Question
                    | TokenKind::EOF => return false,
                    _ => index += 1,
                }
            }
        }
        _ => false,
    }
}

fn expect_identifier(parser: &mut Parser) -> Result<String, Error> {
    if parser.current_kind() != TokenKind::Identifier {
        return Err(parser.syntax_error(format!(
            "expected an identifier, but got '{}'",
            parser.current().value
        )));
    }
    Ok(parser.advance().value.clone())
}

/// Optional qualifiers followed by a type word: an identifier, a primary
/// type, or `let`.
fn parse_data_type(parser: &mut Parser) -> Result<AstNode, Error> {
    let mut qualifiers = vec![];
    while parser.current_kind() == TokenKind::Keyword
        && TYPE_QUALIFIERS.contains(&parser.current().value.as_str())
    {
        qualifiers.push(parser.advance().value.clone());
    }

    match parser.current_kind() {
        TokenKind::Identifier | TokenKind::PrimaryType => Ok(AstNode::DataType {
            qualifiers,
            name: parser.advance().value.clone(),
        }),
        TokenKind::Keyword if parser.current().value == "let" => Ok(AstNode::DataType {
            qualifiers,
            name: parser.advance().value.clone(),
        }),
        _ => Err(parser.syntax_error(format!(
            "expected a type, but got '{}'",
            parser.current().value
        ))),
    }
}

/// `[qualifiers] type : name [= init] {, name [= init]}`. The terminating
/// `;` is left to the caller, so the same production serves for-loop
/// initializers.
pub fn parse_variable_declaration(parser: &mut Parser) -> Result<AstNode, Error> {
    let data_type = parse_data_type(parser)?;
    parser.expect(TokenKind::Colon, "':'")?;

    let mut variables = vec![];
    loop {
        let name = expect_identifier(parser)?;
        let initializer = if parser.current_kind() == TokenKind::Assignment {
            parser.advance();
            Some(parse_expression(parser)?)
        } else {
            None
        };
        variables.push((name, initializer));
        if parser.current_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    Ok(AstNode::VariableDeclaration {
        data_type: Box::new(data_type),
        variables,
    })
}

/// `func name ( [parameters] ) : return-type block`.
///
/// Parameter entries mirror the declaration shape inside the parens: a run
/// of `name [= default]` separated by commas, closed by `: type`, and the
/// run shares that type.
pub fn parse_function_declaration(parser: &mut Parser) -> Result<AstNode, Error> {
    parser.advance();
    let name = expect_identifier(parser)?;
    parser.expect(TokenKind::OpenParen, "'('")?;

    let mut parameters: Vec<ParameterGroup> = vec![];
    let mut names: Vec<(String, Option<AstNode>)> = vec![];
    while parser.current_kind() != TokenKind::CloseParen {
        let parameter = expect_identifier(parser)?;
        let default = if parser.current_kind() == TokenKind::Assignment {
            parser.advance();
            Some(parse_expression(parser)?)
        } else {
            None
        };
        names.push((parameter, default));

        match parser.current_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::Colon => {
                parser.advance();
                let data_type = parse_data_type(parser)?;
                parameters.push(ParameterGroup {
                    names: std::mem::take(&mut names),
                    data_type,
                });
                if parser.current_kind() == TokenKind::Comma {
                    parser.advance();
                }
            }
            TokenKind::CloseParen => break,
            _ => {
                return Err(parser.syntax_error(format!(
                    "expected ':' or ',', but got '{}'",
                    parser.current().value
                )))
            }
        }
    }
    if !names.is_empty() {
        return Err(parser.syntax_error(String::from(
            "parameter list ended before a ':' gave the last parameters a type",
        )));
    }
    parser.expect(TokenKind::CloseParen, "')'")?;

    parser.expect(TokenKind::Colon, "':'")?;
    let return_type = parse_data_type(parser)?;
    let body = parse_block(parser)?;

    Ok(AstNode::FunctionDeclaration {
        name,
        parameters,
        return_type: Box::new(return_type),
        body: Box::new(body),
    })
}

/// `{ ... }` holding nested blocks, keyword-led constructs, declarations and
/// expression statements. Everything except control constructs and nested
/// blocks is `;`-terminated.
pub fn parse_block(parser: &mut Parser) -> Result<AstNode, Error> {
    parser.enter()?;
    parser.expect(TokenKind::OpenCurly, "'{'")?;

    let mut nodes = vec![];
    while parser.current_kind() != TokenKind::CloseCurly {
        if parser.current_kind() == TokenKind::EOF {
            return Err(parser.syntax_error(String::from("expected '}' before end of file")));
        }
        nodes.push(parse_statement(parser)?);
    }

    parser.expect(TokenKind::CloseCurly, "'}'")?;
    parser.leave();
    Ok(AstNode::Block(nodes))
}

pub fn parse_statement(parser: &mut Parser) -> Result<AstNode, Error> {
    match parser.current_kind() {
        TokenKind::OpenCurly => parse_block(parser),
        TokenKind::Keyword => {
            let word = parser.current().value.clone();
            match word.as_str() {
                "if" => parse_if(parser),
                "while" => parse_while(parser),
                "do" => parse_do_while(parser),
                "for" => parse_for(parser),
                "return" | "break" | "continue" => parse_jump(parser),
                "func" => Err(parser.syntax_error(String::from(
                    "function declarations are not allowed inside a block",
                ))),
                "let" | "const" | "ref" | "static" => {
                    let declaration = parse_variable_declaration(parser)?;
                    parser.expect(TokenKind::Semicolon, "';'")?;
                    Ok(declaration)
                }
                _ => parse_expression_statement(parser),
            }
        }
        TokenKind::PrimaryType => {
            let declaration = parse_variable_declaration(parser)?;
            parser.expect(TokenKind::Semicolon, "';'")?;
            Ok(declaration)
        }
        _ => {
            if leads_declaration(parser) {
                let declaration = parse_variable_declaration(parser)?;
                parser.expect(TokenKind::Semicolon, "';'")?;
                Ok(declaration)
            } else {
                parse_expression_statement(parser)
            }
        }
    }
}

fn parse_expression_statement(parser: &mut Parser) -> Result<AstNode, Error> {
    let expression = parse_expression(parser)?;
    parser.expect(TokenKind::Semicolon, "';'")?;
    Ok(expression)
}

/// `if ( cond ) block` with any number of `elif ( cond ) block` arms and an
/// optional trailing `else block`.
fn parse_if(parser: &mut Parser) -> Result<AstNode, Error> {
    parser.advance();
    parser.expect(TokenKind::OpenParen, "'('")?;
    let condition = parse_expression(parser)?;
    parser.expect(TokenKind::CloseParen, "')'")?;
    let body = parse_block(parser)?;

    let mut elif_branches = vec![];
    while parser.current().is_keyword("elif") {
        parser.advance();
        parser.expect(TokenKind::OpenParen, "'('")?;
        let elif_condition = parse_expression(parser)?;
        parser.expect(TokenKind::CloseParen, "')'")?;
        let elif_body = parse_block(parser)?;
        elif_branches.push((elif_condition, elif_body));
    }

    let else_block = if parser.current().is_keyword("else") {
        parser.advance();
        Some(Box::new(parse_block(parser)?))
    } else {
        None
    };

    Ok(AstNode::If {
        condition: Box::new(condition),
        body: Box::new(body),
        elif_branches,
        else_block,
    })
}

fn parse_while(parser: &mut Parser) -> Result<AstNode, Error> {
    parser.advance();
    parser.expect(TokenKind::OpenParen, "'('")?;
    let condition = parse_expression(parser)?;
    parser.expect(TokenKind::CloseParen, "')'")?;
    let body = parse_block(parser)?;
    Ok(AstNode::While {
        condition: Box::new(condition),
        body: Box::new(body),
    })
}

/// `do block while ( cond ) ;` — the trailing semicolon is required.
fn parse_do_while(parser: &mut Parser) -> Result<AstNode, Error> {
    parser.advance();
    let body = parse_block(parser)?;
    if !parser.current().is_keyword("while") {
        return Err(parser.syntax_error(format!(
            "expected 'while', but got '{}'",
            parser.current().value
        )));
    }
    parser.advance();
    parser.expect(TokenKind::OpenParen, "'('")?;
    let condition = parse_expression(parser)?;
    parser.expect(TokenKind::CloseParen, "')'")?;
    parser.expect(TokenKind::Semicolon, "';'")?;
    Ok(AstNode::DoWhile {
        body: Box::new(body),
        condition: Box::new(condition),
    })
}

/// `for ( [init] ; [cond] ; [step] ) block`, every clause optional. The
/// initializer may be a declaration or an expression.
fn parse_for(parser: &mut Parser) -> Result<AstNode, Error> {
    parser.advance();
    parser.expect(TokenKind::OpenParen, "'('")?;

    let init = if parser.current_kind() == TokenKind::Semicolon {
        None
    } else if leads_declaration(parser) {
        Some(Box::new(parse_variable_declaration(parser)?))
    } else {
        Some(Box::new(parse_expression(parser)?))
    };
    parser.expect(TokenKind::Semicolon, "';'")?;

    let condition = if parser.current_kind() == TokenKind::Semicolon {
        None
    } else {
        Some(Box::new(parse_expression(parser)?))
    };
    parser.expect(TokenKind::Semicolon, "';'")?;

    let step = if parser.current_kind() == TokenKind::CloseParen {
        None
    } else {
        Some(Box::new(parse_expression(parser)?))
    };
    parser.expect(TokenKind::CloseParen, "')'")?;

    let body = parse_block(parser)?;
    Ok(AstNode::For {
        init,
        condition,
        step,
        body: Box::new(body),
    })
}

/// `return [expr] ;`, `break ;` or `continue ;`.
fn parse_jump(parser: &mut Parser) -> Result<AstNode, Error> {
    let keyword = parser.advance().value.clone();
    let value = if keyword == "return" && parser.current_kind() != TokenKind::Semicolon {
        Some(Box::new(parse_expression(parser)?))
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon, "';'")?;
    Ok(AstNode::Jump { keyword, value })
}
