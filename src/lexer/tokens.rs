use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref KEYWORDS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("let");
        set.insert("func");
        set.insert("sizeof");
        set.insert("operator");
        set.insert("heap");
        set.insert("array");
        set.insert("export");
        set.insert("public");
        set.insert("private");
        set.insert("import");
        set.insert("const");
        set.insert("ref");
        set.insert("this");
        set.insert("block");
        set.insert("enum");
        set.insert("return");
        set.insert("if");
        set.insert("else");
        set.insert("elif");
        set.insert("null");
        set.insert("throw");
        set.insert("struct");
        set.insert("typeof");
        set.insert("alias");
        set.insert("true");
        set.insert("false");
        set.insert("static");
        set.insert("for");
        set.insert("while");
        set.insert("do");
        set.insert("match");
        set.insert("case");
        set.insert("break");
        set.insert("continue");
        set
    };
    pub static ref PRIMARY_TYPES: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("char");
        set.insert("uchar");
        set.insert("u8char");
        set.insert("u16char");
        set.insert("u32char");
        set.insert("str");
        set.insert("ustr");
        set.insert("u8str");
        set.insert("u16str");
        set.insert("u32str");
        set.insert("bool");
        set.insert("int8");
        set.insert("uint8");
        set.insert("int16");
        set.insert("uint16");
        set.insert("int32");
        set.insert("uint32");
        set.insert("int64");
        set.insert("uint64");
        set.insert("dec32");
        set.insert("dec64");
        set.insert("dec128");
        set.insert("void");
        set
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    CharLiteral,
    StringLiteral,
    IntegerLiteral,
    DecimalLiteral,

    Plus,     // +
    Dash,     // -
    Star,     // *
    StarStar, // **
    Slash,    // /
    Percent,  // %

    Equals,        // ==
    NotEquals,     // !=
    Greater,       // >
    Less,          // <
    GreaterEquals, // >=
    LessEquals,    // <=

    Not, // !
    And, // &&
    Or,  // ||

    Tilde,      // ~
    Ampersand,  // &
    Pipe,       // |
    Caret,      // ^
    LeftShift,  // <<
    RightShift, // >>

    Assignment,       // =
    PlusEquals,       // +=
    MinusEquals,      // -=
    StarEquals,       // *=
    StarStarEquals,   // **=
    SlashEquals,      // /=
    PercentEquals,    // %=
    AmpersandEquals,  // &=
    PipeEquals,       // |=
    CaretEquals,      // ^=
    LeftShiftEquals,  // <<=
    RightShiftEquals, // >>=

    PlusPlus,   // ++
    MinusMinus, // --

    Question,  // ?
    Semicolon, // ;
    Colon,     // :
    Comma,     // ,
    Dot,       // .

    CloseParen,   // )
    OpenParen,    // (
    CloseCurly,   // }
    OpenCurly,    // {
    CloseBracket, // ]
    OpenBracket,  // [

    Keyword,
    PrimaryType,
    EOF,
}

impl TokenKind {
    /// The source spelling of an operator or punctuation kind, or a
    /// lowercase description for the remaining kinds. Used by the AST dump
    /// and diagnostics.
    pub fn symbol(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::CharLiteral => "char literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::DecimalLiteral => "decimal literal",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Star => "*",
            TokenKind::StarStar => "**",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::GreaterEquals => ">=",
            TokenKind::LessEquals => "<=",
            TokenKind::Not => "!",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Tilde => "~",
            TokenKind::Ampersand => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::LeftShift => "<<",
            TokenKind::RightShift => ">>",
            TokenKind::Assignment => "=",
            TokenKind::PlusEquals => "+=",
            TokenKind::MinusEquals => "-=",
            TokenKind::StarEquals => "*=",
            TokenKind::StarStarEquals => "**=",
            TokenKind::SlashEquals => "/=",
            TokenKind::PercentEquals => "%=",
            TokenKind::AmpersandEquals => "&=",
            TokenKind::PipeEquals => "|=",
            TokenKind::CaretEquals => "^=",
            TokenKind::LeftShiftEquals => "<<=",
            TokenKind::RightShiftEquals => ">>=",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Question => "?",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::CloseParen => ")",
            TokenKind::OpenParen => "(",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenBracket => "[",
            TokenKind::Keyword => "keyword",
            TokenKind::PrimaryType => "primary type",
            TokenKind::EOF => "EOF",
        }
    }

    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::Assignment
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::StarStarEquals
                | TokenKind::SlashEquals
                | TokenKind::PercentEquals
                | TokenKind::AmpersandEquals
                | TokenKind::PipeEquals
                | TokenKind::CaretEquals
                | TokenKind::LeftShiftEquals
                | TokenKind::RightShiftEquals
        )
    }

    pub fn is_open_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::OpenParen | TokenKind::OpenCurly | TokenKind::OpenBracket
        )
    }

    pub fn is_close_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::CloseParen | TokenKind::CloseCurly | TokenKind::CloseBracket
        )
    }

    /// The closing kind matching an opening bracket kind.
    pub fn closing_bracket(&self) -> Option<TokenKind> {
        match self {
            TokenKind::OpenParen => Some(TokenKind::CloseParen),
            TokenKind::OpenCurly => Some(TokenKind::CloseCurly),
            TokenKind::OpenBracket => Some(TokenKind::CloseBracket),
            _ => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.value == word
    }

    pub fn debug(&self) {
        if self.span.start.is_missing() {
            println!("'{}': {}", self.value, self.kind);
        } else {
            println!(
                "'{}': {}: start:{}, end:{}",
                self.value.escape_debug(),
                self.kind,
                self.span.start.0,
                self.span.end.0
            );
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{ kind: {}, value: {} }}", self.kind, self.value)
    }
}
