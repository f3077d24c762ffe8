use std::{
    fmt::{Debug, Formatter},
    str::Chars,
};

use derive_more::{Display, From};

#[derive(Debug, Display, From, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Line(pub usize);

#[derive(Debug, Display, From, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Col(pub usize);

/// Where a character sits in the source: 1-based line, 0-based column.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[display(fmt = "{}:{}", line, col)]
pub struct Position {
    pub line: Line,
    pub col: Col,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line: Line(line), col: Col(col) }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

#[derive(Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    chars: Chars<'a>,
    position: Position,
}

impl<'a> Debug for Cursor<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Printing source and chars is usually to verbose, so by default
        // we only print the position
        if f.alternate() {
            f.debug_struct("Cursor")
                .field("position", &self.position)
                .field("source", &self.source)
                .finish()
        } else {
            f.debug_struct("Cursor").field("position", &self.position).finish()
        }
    }
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, chars: source.chars(), position: Position::default() }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn line(&self) -> Line {
        self.position.line
    }

    pub fn col(&self) -> Col {
        self.position.col
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    /// Consumes the next character only if it satisfies `pred`.
    pub fn next_if(&mut self, pred: impl FnOnce(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(c) if pred(c) => self.next(),
            _ => None,
        }
    }

    pub fn slice_until(&self, end: &Cursor<'a>) -> &'a str {
        assert!(self.source == end.source);
        &self.source[(self.source.len() - self.chars.as_str().len())
            ..(self.source.len() - end.chars.as_str().len())]
    }
}

impl<'a> From<&'a str> for Cursor<'a> {
    fn from(source: &'a str) -> Self {
        Self::new(source)
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.position.line.0 += 1;
            self.position.col = Col(0);
        } else {
            self.position.col.0 += 1;
        }
        Some(c)
    }
}
