//! Source positions and spans.
//!
//! Every [`crate::Expression`] and [`crate::Statement`] node records the
//! [`Span`] of source text it was parsed from, per §6 of the spec ("Nodes
//! include at minimum: type, loc (start/end line/column), range"). The
//! evaluator threads the current node's span into the running execution
//! context (§3.7) so a thrown error's `stack` string can point back at it.

use std::fmt;

/// A 1-indexed line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    line: u32,
    column: u32,
}

impl Position {
    /// Creates a new position. Both `line` and `column` are 1-indexed.
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        debug_assert!(line != 0, "line numbers start at 1");
        debug_assert!(column != 0, "column numbers start at 1");
        Position { line, column }
    }

    /// The 1-indexed line number.
    #[must_use]
    pub fn line_number(self) -> u32 {
        self.line
    }

    /// The 1-indexed column number.
    #[must_use]
    pub fn column_number(self) -> u32 {
        self.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The `[start, end)` range a Parse Node was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: Position,
    end: Position,
}

impl Span {
    /// Creates a span covering `start` to `end`.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "span start must not be after its end");
        Span { start, end }
    }

    /// The span's starting position.
    #[must_use]
    pub fn start(self) -> Position {
        self.start
    }

    /// The span's ending position.
    #[must_use]
    pub fn end(self) -> Position {
        self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.start, self.end)
    }
}
