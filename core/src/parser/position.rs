// Source position tracking (line/column mapping)

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 1-based source location. Columns are tab-aware (tab width 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: usize,
}

impl Position {
    pub fn new(line: u32, column: usize) -> Self {
        Self { line, column }
    }

    /// Map a location inside an inline payload back into the document.
    ///
    /// `self` is the document position of the payload's first character;
    /// locations on the payload's first line are column-shifted, later lines
    /// are line-shifted.
    pub fn within_payload(&self, payload: Position) -> Position {
        if payload.line == 1 {
            Position::new(self.line, self.column + payload.column - 1)
        } else {
            Position::new(self.line + payload.line - 1, payload.column)
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_within_payload_first_line() {
        let start = Position::new(3, 5);
        assert_eq!(start.within_payload(Position::new(1, 4)), Position::new(3, 8));
    }

    #[test]
    fn smoke_test_within_payload_later_line() {
        let start = Position::new(3, 5);
        assert_eq!(start.within_payload(Position::new(2, 2)), Position::new(4, 2));
    }

    #[test]
    fn smoke_test_ordering_is_line_major() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert!(Position::new(2, 1) < Position::new(2, 4));
    }
}
