// Shared types and helper functions for grammar modules

use nom::Input;
use nom_locate::LocatedSpan;

use crate::parser::Position;

/// Span type used throughout grammar modules.
///
/// The `extra` field carries the full buffer being parsed so that tab-aware
/// columns can be derived for any position without reconstructing spans
/// (creating a fresh `LocatedSpan` mid-parse resets line/column to 1:1).
pub type Span<'a> = LocatedSpan<&'a str, &'a str>;

/// Tab stops count as this many columns for all indent accounting.
pub const TAB_WIDTH: usize = 4;

/// Wrap a buffer into a span positioned at its start.
pub fn new_span(input: &str) -> Span<'_> {
    LocatedSpan::new_extra(input, input)
}

// ---------------------------------------------------------------------------
// Character classification
// ---------------------------------------------------------------------------

/// Horizontal whitespace.
pub fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Horizontal whitespace or a line terminator.
pub fn is_space_or_newline(c: char) -> bool {
    is_space(c) || c == '\n' || c == '\r'
}

pub fn not_newline(c: char) -> bool {
    c != '\n' && c != '\r'
}

/// Characters that can begin an inline construct.
pub fn is_markup_char(c: char) -> bool {
    matches!(c, '*' | '~' | '_' | '`' | '^' | '[' | ']')
}

/// ASCII punctuation per the ranges !-/, :-@, [-`, {-~.
pub fn is_ascii_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// Punctuation that does not count as adjacent content for flanking checks.
pub fn is_transparent_punctuation(c: char) -> bool {
    matches!(
        c,
        '!' | '"' | '(' | ')' | ',' | '-' | '.' | ':' | ';' | '?' | '{' | '}' | '–' | '—'
    )
}

/// Whitespace or transparent punctuation.
pub fn is_transparent(c: char) -> bool {
    c.is_whitespace() || is_transparent_punctuation(c)
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Tab-aware column (1-based) of the start of `s` within its buffer.
pub fn column_of(s: &Span) -> usize {
    let doc = s.extra;
    let offset = s.location_offset();
    let line_start = doc[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let mut column = 1;
    for ch in doc[line_start..offset].chars() {
        column += if ch == '\t' { TAB_WIDTH } else { 1 };
    }
    column
}

/// Line/column of the start of `s`.
pub fn position_of(s: &Span) -> Position {
    Position::new(s.location_line(), column_of(s))
}

// ---------------------------------------------------------------------------
// Low-level scanners
// ---------------------------------------------------------------------------

/// Skip horizontal and vertical whitespace.
pub fn skip_whitespace(s: Span) -> Span {
    let stop = s
        .fragment()
        .char_indices()
        .find(|&(_, c)| !is_space_or_newline(c))
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.fragment().len());
    s.take_from(stop)
}

/// Skip horizontal whitespace only (never crosses line terminators).
pub fn skip_hspace(s: Span) -> Span {
    let stop = s
        .fragment()
        .char_indices()
        .find(|&(_, c)| !is_space(c))
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.fragment().len());
    s.take_from(stop)
}

/// The rest of the current line, excluding any line terminator.
pub fn current_line<'a>(s: &Span<'a>) -> &'a str {
    let frag = *s.fragment();
    let end = frag.find('\n').unwrap_or(frag.len());
    frag[..end].strip_suffix('\r').unwrap_or(&frag[..end])
}

/// The current line taken from its true start in the buffer, leading
/// whitespace included even when `s` sits past it.
pub fn full_current_line<'a>(s: &Span<'a>) -> &'a str {
    let doc = s.extra;
    let offset = s.location_offset();
    let frag = *s.fragment();
    let line_start = doc[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = offset + frag.find('\n').unwrap_or(frag.len());
    doc[line_start..end].strip_suffix('\r').unwrap_or(&doc[line_start..end])
}

/// Advance past the rest of the current line and its terminator, if any.
pub fn consume_line(s: Span) -> Span {
    let frag = s.fragment();
    match frag.find('\n') {
        Some(i) => s.take_from(i + 1),
        None => s.take_from(frag.len()),
    }
}

// ---------------------------------------------------------------------------
// Text assembly
// ---------------------------------------------------------------------------

/// Effective indentation of a line: space counts 1 column, tab counts 4.
pub fn indent_level(line: &str) -> usize {
    let mut level = 0;
    for ch in line.chars() {
        match ch {
            ' ' => level += 1,
            '\t' => level += TAB_WIDTH,
            _ => break,
        }
    }
    level
}

/// Drop leading whitespace and `>` characters worth up to `indent - 1`
/// effective columns.
pub fn strip_indent(indent: usize, line: &str) -> &str {
    let budget = indent.saturating_sub(1);
    let mut columns = 0;
    let mut bytes = 0;
    for ch in line.chars() {
        if columns >= budget {
            break;
        }
        match ch {
            ' ' | '>' => {
                columns += 1;
                bytes += 1;
            }
            '\t' => {
                columns += TAB_WIDTH;
                bytes += 1;
            }
            _ => break,
        }
    }
    &line[bytes..]
}

/// Unindent code block lines, join them, and terminate with a newline.
pub fn assemble_code_block(indent: usize, lines: &[&str]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(strip_indent(indent, line));
    }
    out.push('\n');
    out
}

/// Join paragraph lines and right-trim the final one.
pub fn assemble_paragraph(lines: &[&str]) -> String {
    let mut out = lines.join("\n");
    let trimmed = out.trim_end_matches(is_space).len();
    out.truncate(trimmed);
    out
}

/// Replace every maximal run of ASCII whitespace with a single space and trim
/// the result. Code span contents go through this normalization.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve backslash escapes: `\` before ASCII punctuation contributes the
/// punctuation character verbatim; any other `\` stays literal.
pub fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&p) if is_ascii_punctuation(p) => {
                    out.push(p);
                    chars.next();
                }
                _ => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_indent_level() {
        assert_eq!(indent_level("    text"), 4);
        assert_eq!(indent_level("\ttext"), 4);
        assert_eq!(indent_level(" \ttext"), 5);
        assert_eq!(indent_level("text"), 0);
        assert_eq!(indent_level(""), 0);
    }

    #[test]
    fn smoke_test_column_of_counts_tabs() {
        let doc = "\tx";
        let span = new_span(doc).take_from(1);
        assert_eq!(column_of(&span), 5);
    }

    #[test]
    fn smoke_test_strip_indent() {
        assert_eq!(strip_indent(5, "    code"), "code");
        assert_eq!(strip_indent(5, "\tcode"), "code");
        assert_eq!(strip_indent(5, "  code"), "code");
        assert_eq!(strip_indent(1, "  code"), "  code");
        assert_eq!(strip_indent(5, "> code"), "code");
    }

    #[test]
    fn smoke_test_assemble_code_block() {
        assert_eq!(assemble_code_block(1, &["a", "b"]), "a\nb\n");
        assert_eq!(assemble_code_block(5, &["    a", "      b"]), "a\n  b\n");
    }

    #[test]
    fn smoke_test_assemble_paragraph_right_trims() {
        assert_eq!(assemble_paragraph(&["a", "b  \t"]), "a\nb");
    }

    #[test]
    fn smoke_test_collapse_whitespace() {
        assert_eq!(collapse_whitespace(" foo ` bar "), "foo ` bar");
        assert_eq!(collapse_whitespace("a\n\t b"), "a b");
        assert_eq!(collapse_whitespace(" b "), "b");
    }

    #[test]
    fn smoke_test_unescape_text() {
        assert_eq!(unescape_text(r"a\*b"), "a*b");
        assert_eq!(unescape_text(r"a\qb"), r"a\qb");
        assert_eq!(unescape_text(r"trailing\"), r"trailing\");
    }

    #[test]
    fn smoke_test_transparent_punctuation() {
        assert!(is_transparent_punctuation('—'));
        assert!(is_transparent('\u{a0}'));
        assert!(!is_transparent('*'));
    }

    #[test]
    fn smoke_test_skip_whitespace_crosses_newlines() {
        let span = new_span("  \n\t x");
        assert_eq!(*skip_whitespace(span).fragment(), "x");
        assert_eq!(*skip_hspace(span).fragment(), "\n\t x");
    }
}
