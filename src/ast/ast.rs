use crate::lexer::tokens::TokenKind;

/// One run of parameter names sharing a declared type, e.g. the
/// `x, y: int32` in `func add(x, y: int32): int32`. Each name may carry a
/// default-value expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGroup {
    pub names: Vec<(String, Option<AstNode>)>,
    pub data_type: AstNode,
}

/// The abstract syntax tree.
///
/// A closed set of node variants dispatched by pattern matching. Every node
/// exclusively owns its children, so dropping the root (or an abandoned
/// partial subtree on a failed parse) frees the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Identifier(String),
    CharLiteral(String),
    StringLiteral(String),
    IntegerLiteral(String),
    DecimalLiteral(String),
    BoolLiteral(bool),
    NullLiteral,

    /// Prefix (`-x`, `++x`, `!x`, `~x`) or postfix (`x++`, `x--`) operation.
    Unary {
        operator: TokenKind,
        operand: Box<AstNode>,
        prefix: bool,
    },
    /// Any infix operation, including assignments and `.` member access.
    Binary {
        left: Box<AstNode>,
        operator: TokenKind,
        right: Box<AstNode>,
    },
    Ternary {
        condition: Box<AstNode>,
        then_value: Box<AstNode>,
        else_value: Box<AstNode>,
    },

    /// A type reference with its qualifier keywords, e.g. `const int32`.
    DataType {
        qualifiers: Vec<String>,
        name: String,
    },
    /// One declared type with one or more `name [= initializer]` entries.
    VariableDeclaration {
        data_type: Box<AstNode>,
        variables: Vec<(String, Option<AstNode>)>,
    },
    FunctionCall {
        callee: String,
        arguments: Vec<AstNode>,
    },

    Block(Vec<AstNode>),
    If {
        condition: Box<AstNode>,
        body: Box<AstNode>,
        elif_branches: Vec<(AstNode, AstNode)>,
        else_block: Option<Box<AstNode>>,
    },
    While {
        condition: Box<AstNode>,
        body: Box<AstNode>,
    },
    DoWhile {
        body: Box<AstNode>,
        condition: Box<AstNode>,
    },
    For {
        init: Option<Box<AstNode>>,
        condition: Option<Box<AstNode>>,
        step: Option<Box<AstNode>>,
        body: Box<AstNode>,
    },
    /// `return [expr]`, `break` or `continue`.
    Jump {
        keyword: String,
        value: Option<Box<AstNode>>,
    },

    FunctionDeclaration {
        name: String,
        parameters: Vec<ParameterGroup>,
        return_type: Box<AstNode>,
        body: Box<AstNode>,
    },
    Program(Vec<AstNode>),
}
