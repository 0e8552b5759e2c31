// User-visible parse errors

use thiserror::Error;

use super::position::Position;

/// What went wrong at a given position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Trivial failure: an unexpected token (or end of input) together with
    /// the labels of the constructs that would have been accepted.
    #[error("{}", render_unexpected(.found, .expected))]
    Unexpected {
        found: String,
        expected: Vec<String>,
    },
    /// The YAML decoder rejected the front matter body.
    #[error("YAML parse error: {0}")]
    YamlParseError(String),
    /// A delimiter run that satisfies neither flanking rule.
    #[error("non-flanking delimiter run {0:?}")]
    NonFlankingDelimiterRun(String),
}

/// A parse error annotated with the file-name label and its source position.
///
/// `parse` returns these in document order; the list it returns is never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_error(.file, .position, .kind))]
pub struct ParseError {
    pub file: String,
    pub position: Position,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(file: impl Into<String>, position: Position, kind: ParseErrorKind) -> Self {
        Self {
            file: file.into(),
            position,
            kind,
        }
    }
}

fn render_unexpected(found: &str, expected: &[String]) -> String {
    if expected.is_empty() {
        format!("unexpected {found}")
    } else {
        format!("unexpected {found}; expected {}", expected.join(", "))
    }
}

fn render_error(file: &str, position: &Position, kind: &ParseErrorKind) -> String {
    if file.is_empty() {
        format!("{position}: {kind}")
    } else {
        format!("{file}:{position}: {kind}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_display_with_file() {
        let err = ParseError::new(
            "doc.md",
            Position::new(2, 7),
            ParseErrorKind::Unexpected {
                found: "'x'".into(),
                expected: vec!["white space".into()],
            },
        );
        assert_eq!(err.to_string(), "doc.md:2:7: unexpected 'x'; expected white space");
    }

    #[test]
    fn smoke_test_display_without_file() {
        let err = ParseError::new(
            "",
            Position::new(1, 3),
            ParseErrorKind::NonFlankingDelimiterRun("*".into()),
        );
        assert_eq!(err.to_string(), "1:3: non-flanking delimiter run \"*\"");
    }
}
