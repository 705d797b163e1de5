//! Lexical analysis.
//!
//! Converts a source buffer into a token sequence with a single
//! forward-scanning state machine: longest-match operator lexing with one
//! character of lookahead, escape processing for string and char literals,
//! backtick block comments, numeric and identifier scanning with keyword /
//! primary-type classification, and a bracket-balance post-pass over the
//! finished stream.

pub mod lexer;
pub mod tokens;
