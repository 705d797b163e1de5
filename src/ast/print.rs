//! Human-readable AST dump.
//!
//! Statements render one per line with uppercase labels and two-space
//! indentation; nested expressions render inline, fully parenthesized. This
//! is a developer-facing debug aid, not a stable machine format.

use std::fmt::{self, Display, Formatter};

use super::ast::{AstNode, ParameterGroup};

impl AstNode {
    /// Writes the indented dump of this tree to stdout.
    pub fn print(&self) {
        println!("{self}");
    }

    fn is_statement(&self) -> bool {
        matches!(
            self,
            AstNode::VariableDeclaration { .. }
                | AstNode::Block(_)
                | AstNode::If { .. }
                | AstNode::While { .. }
                | AstNode::DoWhile { .. }
                | AstNode::For { .. }
                | AstNode::Jump { .. }
                | AstNode::FunctionDeclaration { .. }
                | AstNode::Program(_)
        )
    }

    fn write_expr(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Identifier(name) => write!(f, "{name}"),
            AstNode::CharLiteral(value) => write!(f, "'{}'", value.escape_debug()),
            AstNode::StringLiteral(value) => write!(f, "{value:?}"),
            AstNode::IntegerLiteral(value) | AstNode::DecimalLiteral(value) => {
                write!(f, "{value}")
            }
            AstNode::BoolLiteral(value) => write!(f, "{value}"),
            AstNode::NullLiteral => write!(f, "null"),
            AstNode::Unary {
                operator,
                operand,
                prefix,
            } => {
                if *prefix {
                    write!(f, "( {} ", operator.symbol())?;
                    operand.write_expr(f)?;
                    write!(f, " )")
                } else {
                    write!(f, "( ")?;
                    operand.write_expr(f)?;
                    write!(f, " {} )", operator.symbol())
                }
            }
            AstNode::Binary {
                left,
                operator,
                right,
            } => {
                write!(f, "( ")?;
                left.write_expr(f)?;
                write!(f, " {} ", operator.symbol())?;
                right.write_expr(f)?;
                write!(f, " )")
            }
            AstNode::Ternary {
                condition,
                then_value,
                else_value,
            } => {
                write!(f, "( ")?;
                condition.write_expr(f)?;
                write!(f, " ? ")?;
                then_value.write_expr(f)?;
                write!(f, " : ")?;
                else_value.write_expr(f)?;
                write!(f, " )")
            }
            AstNode::DataType { qualifiers, name } => {
                for qualifier in qualifiers {
                    write!(f, "{qualifier} ")?;
                }
                write!(f, "{name}")
            }
            AstNode::FunctionCall { callee, arguments } => {
                write!(f, "{callee}(")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    argument.write_expr(f)?;
                }
                write!(f, ")")
            }
            statement => statement.write_indented(f, 0),
        }
    }

    fn write_indented(&self, f: &mut Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        match self {
            AstNode::Program(declarations) => {
                for (index, declaration) in declarations.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    declaration.write_indented(f, indent)?;
                }
                Ok(())
            }
            AstNode::Block(nodes) => {
                writeln!(f, "{pad}BLOCK {{")?;
                for node in nodes {
                    if node.is_statement() {
                        node.write_indented(f, indent + 1)?;
                    } else {
                        write!(f, "{pad}  ")?;
                        node.write_expr(f)?;
                    }
                    writeln!(f)?;
                }
                write!(f, "{pad}}}")
            }
            AstNode::VariableDeclaration {
                data_type,
                variables,
            } => {
                write!(f, "{pad}VAR_DECL TYPE: ")?;
                data_type.write_expr(f)?;
                writeln!(f, " (")?;
                for (name, initializer) in variables {
                    write!(f, "{pad}  NAME: {name}")?;
                    if let Some(value) = initializer {
                        write!(f, "  VALUE: ")?;
                        value.write_expr(f)?;
                    }
                    writeln!(f)?;
                }
                write!(f, "{pad})")
            }
            AstNode::If {
                condition,
                body,
                elif_branches,
                else_block,
            } => {
                write!(f, "{pad}IF ( ")?;
                condition.write_expr(f)?;
                writeln!(f, " )")?;
                body.write_indented(f, indent)?;
                for (elif_condition, elif_body) in elif_branches {
                    write!(f, "\n{pad}ELIF ( ")?;
                    elif_condition.write_expr(f)?;
                    writeln!(f, " )")?;
                    elif_body.write_indented(f, indent)?;
                }
                if let Some(block) = else_block {
                    writeln!(f, "\n{pad}ELSE")?;
                    block.write_indented(f, indent)?;
                }
                Ok(())
            }
            AstNode::While { condition, body } => {
                write!(f, "{pad}WHILE ( ")?;
                condition.write_expr(f)?;
                writeln!(f, " )")?;
                body.write_indented(f, indent)
            }
            AstNode::DoWhile { body, condition } => {
                writeln!(f, "{pad}DO")?;
                body.write_indented(f, indent)?;
                write!(f, "\n{pad}WHILE ( ")?;
                condition.write_expr(f)?;
                write!(f, " )")
            }
            AstNode::For {
                init,
                condition,
                step,
                body,
            } => {
                writeln!(f, "{pad}FOR (")?;
                if let Some(node) = init {
                    if node.is_statement() {
                        node.write_indented(f, indent + 1)?;
                    } else {
                        write!(f, "{pad}  ")?;
                        node.write_expr(f)?;
                    }
                    writeln!(f)?;
                }
                if let Some(node) = condition {
                    write!(f, "{pad}  CONDITION: ")?;
                    node.write_expr(f)?;
                    writeln!(f)?;
                }
                if let Some(node) = step {
                    write!(f, "{pad}  STEP: ")?;
                    node.write_expr(f)?;
                    writeln!(f)?;
                }
                writeln!(f, "{pad})")?;
                body.write_indented(f, indent)
            }
            AstNode::Jump { keyword, value } => {
                write!(f, "{pad}{}", keyword.to_uppercase())?;
                if let Some(node) = value {
                    write!(f, " ")?;
                    node.write_expr(f)?;
                }
                Ok(())
            }
            AstNode::FunctionDeclaration {
                name,
                parameters,
                return_type,
                body,
            } => {
                write!(f, "{pad}FUNC {name} ( ")?;
                for (index, group) in parameters.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    group.write_expr(f)?;
                }
                write!(f, " ) : ")?;
                return_type.write_expr(f)?;
                writeln!(f)?;
                body.write_indented(f, indent)
            }
            expression => {
                write!(f, "{pad}")?;
                expression.write_expr(f)
            }
        }
    }
}

impl ParameterGroup {
    fn write_expr(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, (name, default)) in self.names.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}")?;
            if let Some(value) = default {
                write!(f, " = ")?;
                value.write_expr(f)?;
            }
        }
        write!(f, ": ")?;
        self.data_type.write_expr(f)
    }
}

impl Display for AstNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
