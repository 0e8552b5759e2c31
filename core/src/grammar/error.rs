// Grammar-level error type threaded through every parser function

use std::collections::BTreeSet;

use nom::error::{ErrorKind, ParseError};

use super::shared::{position_of, Span};
use crate::parser::{ParseErrorKind, Position};

const DEFAULT_EOF_LABEL: &str = "end of input";

/// Custom failures that survive into the user-visible error list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MmarkErr {
    YamlParseError(String),
    NonFlankingDelimiterRun(String),
}

/// Error value produced by the block and inline grammars.
///
/// Carries the failure position, the labels of the alternatives that were
/// acceptable there, and optionally a custom failure that takes precedence
/// over the trivial unexpected-token report.
#[derive(Debug, Clone)]
pub struct MmarkError<'a> {
    pub span: Span<'a>,
    pub expected: BTreeSet<&'static str>,
    pub custom: Option<MmarkErr>,
    pub eof_label: &'static str,
}

pub type MResult<'a, T> = nom::IResult<Span<'a>, T, MmarkError<'a>>;

impl<'a> MmarkError<'a> {
    pub fn new(span: Span<'a>) -> Self {
        Self {
            span,
            expected: BTreeSet::new(),
            custom: None,
            eof_label: DEFAULT_EOF_LABEL,
        }
    }

    /// Trivial error expecting the given label.
    pub fn expecting(span: Span<'a>, label: &'static str) -> Self {
        let mut err = Self::new(span);
        err.expected.insert(label);
        err
    }

    /// Custom (fancy) error at the given position.
    pub fn fancy(span: Span<'a>, custom: MmarkErr) -> Self {
        let mut err = Self::new(span);
        err.custom = Some(custom);
        err
    }

    pub fn into_err<T>(self) -> Result<T, nom::Err<Self>> {
        Err(nom::Err::Error(self))
    }

    /// Replace the label used when the failure sits at end of input. The
    /// first rewrite wins: an inner parser's label survives outer rewrites.
    pub fn with_eof_label(mut self, label: &'static str) -> Self {
        if self.eof_label == DEFAULT_EOF_LABEL {
            self.eof_label = label;
        }
        self
    }

    /// Keep the error that made it further into the input; merge at ties.
    pub fn merge(self, other: Self) -> Self {
        use std::cmp::Ordering;
        match self.span.location_offset().cmp(&other.span.location_offset()) {
            Ordering::Greater => self,
            Ordering::Less => other,
            Ordering::Equal => {
                let mut merged = self;
                merged.expected.extend(other.expected.iter().copied());
                if merged.custom.is_none() {
                    merged.custom = other.custom;
                }
                merged
            }
        }
    }

    /// Position of the failure within the buffer this error was raised on.
    pub fn position(&self) -> Position {
        position_of(&self.span)
    }

    /// Describe the offending token, or the EOF label when input ran out.
    pub fn found(&self) -> String {
        match self.span.fragment().chars().next() {
            None => self.eof_label.to_string(),
            Some('\n') | Some('\r') => "newline".to_string(),
            Some('\t') => "tab".to_string(),
            Some(c) => format!("'{c}'"),
        }
    }

    /// Flatten into the user-visible error kind.
    pub fn kind(&self) -> ParseErrorKind {
        match &self.custom {
            Some(MmarkErr::YamlParseError(message)) => {
                ParseErrorKind::YamlParseError(message.clone())
            }
            Some(MmarkErr::NonFlankingDelimiterRun(delims)) => {
                ParseErrorKind::NonFlankingDelimiterRun(delims.clone())
            }
            None => ParseErrorKind::Unexpected {
                found: self.found(),
                expected: self.expected.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

impl<'a> ParseError<Span<'a>> for MmarkError<'a> {
    fn from_error_kind(input: Span<'a>, _kind: ErrorKind) -> Self {
        MmarkError::new(input)
    }

    fn append(_input: Span<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        self.merge(other)
    }
}
