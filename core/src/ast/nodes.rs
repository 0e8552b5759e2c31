// Block and inline node types
//
// `Block` is generic over its inline payload: the block phase produces
// `Block<Isp>` (raw text plus start position), the inline phase turns each
// payload into a `Vec<Inline>`.

use std::fmt;

use serde::Serialize;

use crate::parser::Position;

/// Block-level element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block<I> {
    /// Horizontal rule: a line of three or more identical `*`, `-` or `_`.
    ThematicBreak,
    /// ATX heading; `level` is always within 1..=6.
    Heading { level: u8, content: I },
    /// Fenced or indented code block. `info` is `None` for indented blocks
    /// and for fences without an info string; `content` ends with a newline.
    CodeBlock {
        info: Option<String>,
        content: String,
    },
    Paragraph(I),
    /// Bullet list; each item is itself a sequence of blocks. Never empty.
    UnorderedList(Vec<Vec<Block<I>>>),
}

impl<I> Block<I> {
    /// Replace every inline payload in the block, preserving structure.
    pub fn map_payloads<J>(self, f: &mut impl FnMut(I) -> J) -> Block<J> {
        match self {
            Block::ThematicBreak => Block::ThematicBreak,
            Block::Heading { level, content } => Block::Heading {
                level,
                content: f(content),
            },
            Block::CodeBlock { info, content } => Block::CodeBlock { info, content },
            Block::Paragraph(payload) => Block::Paragraph(f(payload)),
            Block::UnorderedList(items) => Block::UnorderedList(
                items
                    .into_iter()
                    .map(|item| item.into_iter().map(|b| b.map_payloads(f)).collect())
                    .collect(),
            ),
        }
    }
}

/// Inline-level element. Emphasis-class containers always hold at least one
/// child.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Inline {
    Plain(String),
    /// Hard line break (`\` before a line terminator).
    LineBreak,
    CodeSpan(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikeout(Vec<Inline>),
    Subscript(Vec<Inline>),
    Superscript(Vec<Inline>),
    Link {
        label: Vec<Inline>,
        destination: Uri,
        title: Option<String>,
    },
    Image {
        description: Vec<Inline>,
        source: Uri,
        title: Option<String>,
    },
}

/// Inline-source-pending: the raw text of a block's inline content together
/// with the document position of its first character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Isp {
    pub position: Position,
    pub text: String,
}

impl Isp {
    pub fn new(position: Position, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }
}

/// A validated URI reference. `text` is the full rendered form, scheme
/// included when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Uri {
    pub scheme: Option<String>,
    pub text: String,
}

impl Uri {
    pub fn new(scheme: Option<String>, text: impl Into<String>) -> Self {
        Self {
            scheme,
            text: text.into(),
        }
    }

    /// Everything after the scheme separator, or the whole text for a
    /// scheme-less reference.
    pub fn path_part(&self) -> &str {
        match &self.scheme {
            Some(scheme) => &self.text[scheme.len() + 1..],
            None => &self.text,
        }
    }

    /// Attach `scheme` when the reference has none.
    pub fn make_absolute(self, scheme: &str) -> Uri {
        match self.scheme {
            Some(_) => self,
            None => Uri {
                scheme: Some(scheme.to_string()),
                text: format!("{scheme}:{}", self.text),
            },
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
