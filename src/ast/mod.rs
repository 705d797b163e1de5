/// AST (Abstract Syntax Tree) module
/// Contains the node definitions and the debug dump
///
/// Submodules:
/// - ast: the closed node enum and parameter grouping
/// - print: indented human-readable rendering
pub mod ast;
pub mod print;
