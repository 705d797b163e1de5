#![allow(clippy::module_inception)]

use std::{fs, path::Path, rc::Rc};

use crate::errors::errors::{Error, Reporter};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod parser;

/// A byte offset into a source file, paired with the name of that file.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    /// Sentinel for tokens that occupy no source range, such as end-of-file.
    pub fn missing(file: Rc<String>) -> Self {
        Position(u32::MAX, file)
    }

    pub fn is_missing(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// The half-open byte range `[start, end)` a token was scanned from.
#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: usize, end: usize, file: &Rc<String>) -> Self {
        Span {
            start: Position(start as u32, Rc::clone(file)),
            end: Position(end as u32, Rc::clone(file)),
        }
    }

    pub fn missing(file: &Rc<String>) -> Self {
        Span {
            start: Position::missing(Rc::clone(file)),
            end: Position::missing(Rc::clone(file)),
        }
    }
}

/// A source file loaded into memory once, read-only for the duration of
/// lexing and parsing. The lexer, parser and diagnostics only borrow it.
#[derive(Debug)]
pub struct SourceFile {
    pub location: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(location: impl Into<String>, content: impl Into<String>) -> Self {
        SourceFile {
            location: location.into(),
            content: content.into(),
        }
    }
}

/// Loads a source file from disk.
///
/// Rejects directories and reports open/read failures itself, so callers
/// only need to propagate the returned error.
pub fn load_file(location: &str, reporter: &Reporter) -> Result<SourceFile, Error> {
    let path = Path::new(location);
    if path.is_dir() {
        return Err(reporter.io_error(location, "Is a directory"));
    }

    match fs::read_to_string(path) {
        Ok(content) => Ok(SourceFile::new(location, content)),
        Err(error) => Err(reporter.io_error(location, &error.to_string())),
    }
}
