use std::{fmt::Display, rc::Rc};

use thiserror::Error;

use crate::{lexer::tokens::Token, SourceFile, Span};

pub const RED_FG: &str = "\x1b[91m";
pub const WHITE_FG: &str = "\x1b[97m";
pub const RESET_COLOR: &str = "\x1b[0m";

/// The pipeline stage a diagnostic originated from, named in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexer,
    Parser,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Lexer => write!(f, "lexer"),
            Stage::Parser => write!(f, "parser"),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorKind {
    #[error("'{location}' cannot be opened for reading: {reason}")]
    Io { location: String, reason: String },
    #[error("unrecognized token '{token}'")]
    UnknownToken { token: char },
    #[error("invalid escape sequence '\\{sequence}'")]
    InvalidEscapeSequence { sequence: char },
    #[error("missing terminating {terminator} character")]
    MissingTerminatingChar { terminator: char },
    #[error("empty character constant")]
    LessBytes,
    #[error("multi-character character constant")]
    MoreBytes,
    #[error("unbalanced bracket '{bracket}'")]
    InvalidBracket { bracket: String },
    #[error("{message}")]
    SyntaxError { message: String },
}

impl ErrorKind {
    /// The stable numeric code surfaced as `error[E<code>]`.
    pub fn code(&self) -> u32 {
        match self {
            ErrorKind::Io { .. } => 1,
            ErrorKind::UnknownToken { .. } => 2,
            ErrorKind::InvalidEscapeSequence { .. } => 3,
            ErrorKind::MissingTerminatingChar { .. } => 4,
            ErrorKind::LessBytes => 5,
            ErrorKind::MoreBytes => 6,
            ErrorKind::InvalidBracket { .. } => 7,
            ErrorKind::SyntaxError { .. } => 10,
        }
    }
}

/// A failure that has already been rendered to the error stream by the
/// operation that produced it. Ancestor calls only propagate it upward.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Error { kind, span }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn code(&self) -> u32 {
        self.kind.code()
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

/// Renders diagnostics against the source text.
///
/// The color choice is computed once at startup and threaded through here
/// instead of being read from global state; rendered output is identical
/// modulo the ANSI escapes.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// Prints a loader failure and hands the error back for propagation.
    pub fn io_error(&self, location: &str, reason: &str) -> Error {
        let kind = ErrorKind::Io {
            location: location.to_string(),
            reason: reason.to_string(),
        };
        if self.color {
            eprintln!(
                "aster: {RED_FG}error[E{}]:{RESET_COLOR} {WHITE_FG}'{location}'{RESET_COLOR} cannot be opened for reading: {reason}",
                kind.code()
            );
        } else {
            eprintln!(
                "aster: error[E{}]: '{location}' cannot be opened for reading: {reason}",
                kind.code()
            );
        }
        let name = Rc::new(location.to_string());
        Error::new(kind, Span::missing(&name))
    }

    /// Prints a lexer diagnostic anchored to the byte range `[start, end)`
    /// and hands the error back for propagation.
    pub fn lexer_error(
        &self,
        file: &SourceFile,
        line: usize,
        start: usize,
        end: usize,
        kind: ErrorKind,
    ) -> Error {
        let (text, _) = self.render(Stage::Lexer, file, line, start, end, &kind);
        eprintln!("{text}");
        let name = Rc::new(file.location.clone());
        Error::new(kind, Span::new(start, end, &name))
    }

    /// Prints a parser diagnostic anchored to a token and hands the error
    /// back for propagation. Sentinel spans are clamped into the buffer.
    pub fn parser_error(&self, file: &SourceFile, token: &Token, kind: ErrorKind) -> Error {
        let length = file.content.len();
        let start = (token.span.start.0 as usize).min(length);
        let end = (token.span.end.0 as usize).clamp(start, length);
        let line = line_number_at(&file.content, start);
        let (text, _) = self.render(Stage::Parser, file, line, start, end, &kind);
        eprintln!("{text}");
        Error::new(kind, token.span.clone())
    }

    /// Builds the complete diagnostic text for a span, returning it along
    /// with the 0-based column of the span start within its line.
    pub fn render(
        &self,
        stage: Stage,
        file: &SourceFile,
        line_no: usize,
        start: usize,
        end: usize,
        kind: &ErrorKind,
    ) -> (String, usize) {
        let (excerpt, column) = highlight_span(&file.content, start, end, self.color);

        let mut text = String::new();
        if self.color {
            text.push_str(&format!(
                "aster: {stage}: {WHITE_FG}{}:{line_no}:{}:{RESET_COLOR} {RED_FG}error[E{}]:{RESET_COLOR} {kind}\n",
                file.location,
                column + 1,
                kind.code()
            ));
        } else {
            text.push_str(&format!(
                "aster: {stage}: {}:{line_no}:{}: error[E{}]: {kind}\n",
                file.location,
                column + 1,
                kind.code()
            ));
        }

        let gutter = format!("  {line_no}");
        text.push_str(&format!("{gutter} | {excerpt}\n"));

        let width = if end > start { end - start } else { 1 };
        let underline = format!("^{}", "~".repeat(width - 1));
        let pad = " ".repeat(gutter.len());
        let offset = " ".repeat(column);
        if self.color {
            text.push_str(&format!("{pad} | {offset}{RED_FG}{underline}{RESET_COLOR}"));
        } else {
            text.push_str(&format!("{pad} | {offset}{underline}"));
        }

        (text, column)
    }
}

/// Extracts the source line(s) enclosing `[start, end)` with the span
/// highlighted, plus the 0-based column of `start` within its line.
///
/// An empty span is widened to one character so the caret always has
/// something to point at; offsets past the buffer are clamped to its end.
pub fn highlight_span(content: &str, start: usize, end: usize, color: bool) -> (String, usize) {
    let bytes = content.as_bytes();
    let length = bytes.len();
    let start = start.min(length);
    let end = if start == end { start + 1 } else { end }
        .clamp(start, length);

    let mut line_start = start;
    while line_start > 0 && bytes[line_start - 1] != b'\n' {
        line_start -= 1;
    }
    let mut line_end = end;
    while line_end < length && bytes[line_end] != b'\n' {
        line_end += 1;
    }

    let column = start - line_start;
    let excerpt = if color {
        format!(
            "{}{RED_FG}{}{RESET_COLOR}{}",
            String::from_utf8_lossy(&bytes[line_start..start]),
            String::from_utf8_lossy(&bytes[start..end]),
            String::from_utf8_lossy(&bytes[end..line_end])
        )
    } else {
        String::from_utf8_lossy(&bytes[line_start..line_end]).into_owned()
    };

    (excerpt, column)
}

/// 1-based line number of a byte offset, counting newlines before it.
pub fn line_number_at(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    content.as_bytes()[..offset]
        .iter()
        .filter(|byte| **byte == b'\n')
        .count()
        + 1
}
