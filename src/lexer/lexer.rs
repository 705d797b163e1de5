use std::rc::Rc;

use regex::Regex;

use crate::{
    errors::errors::{line_number_at, Error, ErrorKind, Reporter},
    Position, SourceFile, Span,
};

use super::tokens::{Token, TokenKind, KEYWORDS, PRIMARY_TYPES};

/// A single forward scan over the source buffer with one character of
/// lookahead. Multi-character operators always take the longest match.
pub struct Lexer {
    tokens: Vec<Token>,
    file: Rc<SourceFile>,
    name: Rc<String>,
    reporter: Reporter,
    pos: usize,
    start: usize,
    line: usize,
    identifier_pattern: Regex,
    number_pattern: Regex,
    fraction_pattern: Regex,
}

impl Lexer {
    pub fn new(file: Rc<SourceFile>, reporter: Reporter) -> Lexer {
        Lexer {
            tokens: vec![],
            name: Rc::new(file.location.clone()),
            file,
            reporter,
            pos: 0,
            start: 0,
            line: 1,
            identifier_pattern: Regex::new("^[a-zA-Z_$][a-zA-Z0-9_$]*").unwrap(),
            number_pattern: Regex::new("^[0-9]+(\\.[0-9]+)?").unwrap(),
            fraction_pattern: Regex::new("^\\.[0-9]+").unwrap(),
        }
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.file.content.len()
    }

    fn peek(&self) -> u8 {
        *self.file.content.as_bytes().get(self.pos).unwrap_or(&0)
    }

    fn peek_next(&self) -> u8 {
        *self.file.content.as_bytes().get(self.pos + 1).unwrap_or(&0)
    }

    fn bump(&mut self) {
        if self.peek() == b'\n' {
            self.line += 1;
        }
        self.pos += 1;
    }

    fn remainder(&self) -> &str {
        &self.file.content[self.pos..]
    }

    /// Appends a token spanning `start..pos`. Identifiers are classified
    /// against the keyword and primary-type word lists.
    fn push(&mut self, kind: TokenKind) {
        let lexeme = self.file.content[self.start..self.pos].to_string();
        let kind = if kind == TokenKind::Identifier {
            if KEYWORDS.contains(lexeme.as_str()) {
                TokenKind::Keyword
            } else if PRIMARY_TYPES.contains(lexeme.as_str()) {
                TokenKind::PrimaryType
            } else {
                TokenKind::Identifier
            }
        } else {
            kind
        };
        let span = Span::new(self.start, self.pos, &self.name);
        self.tokens.push(Token {
            kind,
            value: lexeme,
            span,
        });
    }

    /// Appends a token whose value differs from its source slice, such as a
    /// string literal with its escapes decoded.
    fn push_value(&mut self, kind: TokenKind, value: String) {
        let span = Span::new(self.start, self.pos, &self.name);
        self.tokens.push(Token { kind, value, span });
    }

    fn error(&self, kind: ErrorKind) -> Error {
        self.reporter
            .lexer_error(&self.file, self.line, self.start, self.pos, kind)
    }

    fn scan(&mut self) -> Result<(), Error> {
        while !self.at_eof() {
            self.start = self.pos;
            match self.peek() {
                b'+' => {
                    self.bump();
                    if self.peek() == b'+' {
                        self.bump();
                        self.push(TokenKind::PlusPlus);
                    } else if self.peek() == b'=' {
                        self.bump();
                        self.push(TokenKind::PlusEquals);
                    } else {
                        self.push(TokenKind::Plus);
                    }
                }
                b'-' => {
                    self.bump();
                    if self.peek() == b'-' {
                        self.bump();
                        self.push(TokenKind::MinusMinus);
                    } else if self.peek() == b'=' {
                        self.bump();
                        self.push(TokenKind::MinusEquals);
                    } else {
                        self.push(TokenKind::Dash);
                    }
                }
                b'*' => {
                    self.bump();
                    if self.peek() == b'=' {
                        self.bump();
                        self.push(TokenKind::StarEquals);
                    } else if self.peek() == b'*' {
                        self.bump();
                        if self.peek() == b'=' {
                            self.bump();
                            self.push(TokenKind::StarStarEquals);
                        } else {
                            self.push(TokenKind::StarStar);
                        }
                    } else {
                        self.push(TokenKind::Star);
                    }
                }
                b'/' => {
                    self.bump();
                    if self.peek() == b'=' {
                        self.bump();
                        self.push(TokenKind::SlashEquals);
                    } else {
                        self.push(TokenKind::Slash);
                    }
                }
                b'%' => {
                    self.bump();
                    if self.peek() == b'=' {
                        self.bump();
                        self.push(TokenKind::PercentEquals);
                    } else {
                        self.push(TokenKind::Percent);
                    }
                }
                b'^' => {
                    self.bump();
                    if self.peek() == b'=' {
                        self.bump();
                        self.push(TokenKind::CaretEquals);
                    } else {
                        self.push(TokenKind::Caret);
                    }
                }
                b'~' => {
                    self.bump();
                    self.push(TokenKind::Tilde);
                }
                b'&' => {
                    self.bump();
                    if self.peek() == b'&' {
                        self.bump();
                        self.push(TokenKind::And);
                    } else if self.peek() == b'=' {
                        self.bump();
                        self.push(TokenKind::AmpersandEquals);
                    } else {
                        self.push(TokenKind::Ampersand);
                    }
                }
                b'|' => {
                    self.bump();
                    if self.peek() == b'|' {
                        self.bump();
                        self.push(TokenKind::Or);
                    } else if self.peek() == b'=' {
                        self.bump();
                        self.push(TokenKind::PipeEquals);
                    } else {
                        self.push(TokenKind::Pipe);
                    }
                }
                b'!' => {
                    self.bump();
                    if self.peek() == b'=' {
                        self.bump();
                        self.push(TokenKind::NotEquals);
                    } else {
                        self.push(TokenKind::Not);
                    }
                }
                b'=' => {
                    self.bump();
                    if self.peek() == b'=' {
                        self.bump();
                        self.push(TokenKind::Equals);
                    } else {
                        self.push(TokenKind::Assignment);
                    }
                }
                b'<' => {
                    self.bump();
                    if self.peek() == b'<' {
                        self.bump();
                        if self.peek() == b'=' {
                            self.bump();
                            self.push(TokenKind::LeftShiftEquals);
                        } else {
                            self.push(TokenKind::LeftShift);
                        }
                    } else if self.peek() == b'=' {
                        self.bump();
                        self.push(TokenKind::LessEquals);
                    } else {
                        self.push(TokenKind::Less);
                    }
                }
                b'>' => {
                    self.bump();
                    if self.peek() == b'>' {
                        self.bump();
                        if self.peek() == b'=' {
                            self.bump();
                            self.push(TokenKind::RightShiftEquals);
                        } else {
                            self.push(TokenKind::RightShift);
                        }
                    } else if self.peek() == b'=' {
                        self.bump();
                        self.push(TokenKind::GreaterEquals);
                    } else {
                        self.push(TokenKind::Greater);
                    }
                }
                b'?' => {
                    self.bump();
                    self.push(TokenKind::Question);
                }
                b' ' | b'\t' | b'\r' | b'\n' => self.bump(),
                b'(' => {
                    self.bump();
                    self.push(TokenKind::OpenParen);
                }
                b')' => {
                    self.bump();
                    self.push(TokenKind::CloseParen);
                }
                b'{' => {
                    self.bump();
                    self.push(TokenKind::OpenCurly);
                }
                b'}' => {
                    self.bump();
                    self.push(TokenKind::CloseCurly);
                }
                b'[' => {
                    self.bump();
                    self.push(TokenKind::OpenBracket);
                }
                b']' => {
                    self.bump();
                    self.push(TokenKind::CloseBracket);
                }
                b';' => {
                    self.bump();
                    self.push(TokenKind::Semicolon);
                }
                b':' => {
                    self.bump();
                    self.push(TokenKind::Colon);
                }
                b',' => {
                    self.bump();
                    self.push(TokenKind::Comma);
                }
                b'`' => self.comment()?,
                b'"' => self.string()?,
                b'\'' => self.char_literal()?,
                b'0'..=b'9' => self.number(),
                b'.' => {
                    if self.peek_next().is_ascii_digit() {
                        self.number();
                    } else {
                        self.bump();
                        self.push(TokenKind::Dot);
                    }
                }
                ch if ch.is_ascii_alphabetic() || ch == b'_' || ch == b'$' => self.identifier(),
                ch => {
                    return Err(self.error(ErrorKind::UnknownToken { token: ch as char }));
                }
            }
        }
        Ok(())
    }

    /// Backtick-delimited block comment. On a missing terminator the scan
    /// position and line counter are restored to the opening backtick so the
    /// diagnostic points at it.
    fn comment(&mut self) -> Result<(), Error> {
        let opening_line = self.line;
        self.bump();
        while !self.at_eof() && self.peek() != b'`' {
            self.bump();
        }
        if self.at_eof() {
            self.pos = self.start;
            self.line = opening_line;
            return Err(self.error(ErrorKind::MissingTerminatingChar { terminator: '`' }));
        }
        self.bump();
        Ok(())
    }

    /// Decodes one escape sequence, with the cursor on the character after
    /// the backslash. Returns the offending character for an unrecognized
    /// escape, which is copied through literally.
    fn escape(&mut self, value: &mut String) -> Option<char> {
        let escape = self.peek() as char;
        let mut invalid = None;
        match escape {
            'a' => value.push('\x07'),
            'b' => value.push('\x08'),
            'f' => value.push('\x0c'),
            'n' => value.push('\n'),
            'r' => value.push('\r'),
            't' => value.push('\t'),
            'v' => value.push('\x0b'),
            '\\' => value.push('\\'),
            '\'' => value.push('\''),
            '"' => value.push('"'),
            '?' => value.push('?'),
            '0' => value.push('\0'),
            other => {
                value.push(other);
                invalid = Some(other);
            }
        }
        self.bump();
        invalid
    }

    fn string(&mut self) -> Result<(), Error> {
        self.bump();
        let mut value = String::new();
        let mut invalid_escape = None;
        while !self.at_eof() && self.peek() != b'"' && self.peek() != b'\n' {
            if self.peek() == b'\\' {
                self.bump();
                if self.at_eof() {
                    break;
                }
                if let Some(sequence) = self.escape(&mut value) {
                    invalid_escape = Some(sequence);
                }
            } else {
                value.push(self.peek() as char);
                self.bump();
            }
        }
        if self.at_eof() || self.peek() == b'\n' {
            return Err(self.error(ErrorKind::MissingTerminatingChar { terminator: '"' }));
        }
        self.bump();
        self.push_value(TokenKind::StringLiteral, value);
        if let Some(sequence) = invalid_escape {
            return Err(self.error(ErrorKind::InvalidEscapeSequence { sequence }));
        }
        Ok(())
    }

    fn char_literal(&mut self) -> Result<(), Error> {
        self.bump();
        let mut value = String::new();
        let mut invalid_escape = None;
        while !self.at_eof() && self.peek() != b'\'' && self.peek() != b'\n' {
            if self.peek() == b'\\' {
                self.bump();
                if self.at_eof() {
                    break;
                }
                if let Some(sequence) = self.escape(&mut value) {
                    invalid_escape = Some(sequence);
                }
            } else {
                value.push(self.peek() as char);
                self.bump();
            }
        }
        if self.at_eof() || self.peek() == b'\n' {
            return Err(self.error(ErrorKind::MissingTerminatingChar { terminator: '\'' }));
        }
        self.bump();
        if value.is_empty() {
            return Err(self.error(ErrorKind::LessBytes));
        }
        if let Some(sequence) = invalid_escape {
            return Err(self.error(ErrorKind::InvalidEscapeSequence { sequence }));
        }
        if value.chars().count() == 1 {
            self.push_value(TokenKind::CharLiteral, value);
        } else {
            // More than one byte: reinterpret as a big-endian packed unsigned
            // integer. Diagnosed, but scanning continues.
            let packed = value
                .chars()
                .fold(0u64, |acc, ch| (acc << 8) | (ch as u64 & 0xff));
            self.push_value(TokenKind::IntegerLiteral, packed.to_string());
            self.error(ErrorKind::MoreBytes);
        }
        Ok(())
    }

    fn number(&mut self) {
        let length = {
            let pattern = if self.peek() == b'.' {
                &self.fraction_pattern
            } else {
                &self.number_pattern
            };
            pattern
                .find(self.remainder())
                .map(|found| found.end())
                .unwrap_or(1)
        };
        self.pos += length;
        let kind = if self.file.content[self.start..self.pos].contains('.') {
            TokenKind::DecimalLiteral
        } else {
            TokenKind::IntegerLiteral
        };
        self.push(kind);
    }

    fn identifier(&mut self) {
        let length = self
            .identifier_pattern
            .find(self.remainder())
            .map(|found| found.end())
            .unwrap_or(1);
        self.pos += length;
        self.push(TokenKind::Identifier);
    }
}

/// Verifies bracket nesting over the finished token stream with a stack of
/// open-bracket token indices. Returns the index of the first offending
/// token: a close bracket that mismatches (or underflows) the stack, or the
/// innermost opener left unmatched at end-of-stream.
fn check_brackets(tokens: &[Token]) -> Option<usize> {
    let mut stack: Vec<usize> = vec![];
    for (index, token) in tokens.iter().enumerate() {
        if token.kind.is_open_bracket() {
            stack.push(index);
        } else if token.kind.is_close_bracket() {
            match stack.pop() {
                Some(open) if tokens[open].kind.closing_bracket() == Some(token.kind) => {}
                _ => return Some(index),
            }
        }
    }
    stack.pop()
}

/// Converts a source buffer into a token sequence terminated by an
/// end-of-file sentinel.
///
/// Any error aborts the whole call after printing one diagnostic; no partial
/// sequence is returned. The one exception is a multi-byte char literal,
/// which is diagnosed and re-emitted as an integer while scanning continues.
pub fn tokenize(file: Rc<SourceFile>, reporter: Reporter) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(file, reporter);
    lexer.scan()?;

    let eof = Token {
        kind: TokenKind::EOF,
        value: String::from("EOF"),
        span: Span {
            start: Position::missing(Rc::clone(&lexer.name)),
            end: Position::missing(Rc::clone(&lexer.name)),
        },
    };
    lexer.tokens.push(eof);

    if let Some(index) = check_brackets(&lexer.tokens) {
        let token = &lexer.tokens[index];
        let start = token.span.start.0 as usize;
        let end = token.span.end.0 as usize;
        let line = line_number_at(&lexer.file.content, start);
        return Err(lexer.reporter.lexer_error(
            &lexer.file,
            line,
            start,
            end,
            ErrorKind::InvalidBracket {
                bracket: token.value.clone(),
            },
        ));
    }

    Ok(lexer.tokens)
}
