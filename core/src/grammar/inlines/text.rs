// Plain text grammar
//
// Assembles a maximal run of ordinary characters. Escapes resolve to their
// punctuation, soft newlines collapse to a single space with the surrounding
// horizontal whitespace dropped, and the class of the last consumed
// character becomes the parser state.

use nom::Input;

use super::{autolink, CharKind, InlineCtx};
use crate::ast::Inline;
use crate::grammar::error::{MResult, MmarkError};
use crate::grammar::shared::{
    is_ascii_punctuation, is_markup_char, is_transparent_punctuation, Span,
};

pub fn plain<'a>(cx: &mut InlineCtx, input: Span<'a>) -> MResult<'a, Inline> {
    let frag = *input.fragment();
    let mut out = String::new();
    let mut kind = cx.last;
    let mut i = 0;

    while i < frag.len() {
        let c = match frag[i..].chars().next() {
            Some(c) => c,
            None => break,
        };
        match c {
            '\\' => match frag[i + 1..].chars().next() {
                Some(p) if is_ascii_punctuation(p) => {
                    out.push(p);
                    kind = CharKind::OtherChar;
                    i += 1 + p.len_utf8();
                }
                // A break belongs to the hard-line-break token.
                Some('\n') | Some('\r') => break,
                _ => {
                    out.push('\\');
                    kind = CharKind::OtherChar;
                    i += 1;
                }
            },
            '\n' | '\r' => {
                while out.ends_with(' ') || out.ends_with('\t') {
                    out.pop();
                }
                i += if c == '\r' && frag[i + 1..].starts_with('\n') {
                    2
                } else {
                    1
                };
                while frag[i..].starts_with(' ') || frag[i..].starts_with('\t') {
                    i += 1;
                }
                out.push(' ');
                kind = CharKind::SpaceChar;
            }
            '!' => {
                if frag[i + 1..].starts_with('[') {
                    break;
                }
                out.push('!');
                kind = CharKind::SpaceChar;
                i += 1;
            }
            '<' => {
                if cx.cfg.allow_links && autolink::scan_autolink(input.take_from(i)).is_some() {
                    break;
                }
                out.push('<');
                kind = CharKind::OtherChar;
                i += 1;
            }
            c if is_markup_char(c) => break,
            ' ' | '\t' => {
                out.push(c);
                kind = CharKind::SpaceChar;
                i += 1;
            }
            c if is_transparent_punctuation(c) => {
                out.push(c);
                kind = CharKind::SpaceChar;
                i += c.len_utf8();
            }
            c => {
                out.push(c);
                kind = CharKind::OtherChar;
                i += c.len_utf8();
            }
        }
    }

    if out.is_empty() {
        return MmarkError::expecting(input, "inline content").into_err();
    }
    cx.last = kind;
    Ok((input.take_from(i), Inline::Plain(out)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::shared::new_span;

    fn plain_ok(input: &str) -> (String, String, CharKind) {
        let mut cx = InlineCtx::new();
        let (rest, inline) = plain(&mut cx, new_span(input)).expect("not plain text");
        match inline {
            Inline::Plain(text) => (text, rest.fragment().to_string(), cx.last),
            other => panic!("expected plain, got {other:?}"),
        }
    }

    #[test]
    fn smoke_test_stops_at_markup() {
        let (text, rest, kind) = plain_ok("hello *world*");
        assert_eq!(text, "hello ");
        assert_eq!(rest, "*world*");
        assert_eq!(kind, CharKind::SpaceChar);
    }

    #[test]
    fn smoke_test_escaped_punctuation() {
        let (text, _, kind) = plain_ok(r"a\*b");
        assert_eq!(text, "a*b");
        assert_eq!(kind, CharKind::OtherChar);
    }

    #[test]
    fn smoke_test_newline_collapses_with_surrounding_space() {
        let (text, _, kind) = plain_ok("one  \n   two");
        assert_eq!(text, "one two");
        assert_eq!(kind, CharKind::OtherChar);
    }

    #[test]
    fn smoke_test_bang_before_bracket_stops() {
        let (text, rest, _) = plain_ok("see ![img](x)");
        assert_eq!(text, "see ");
        assert_eq!(rest, "![img](x)");
    }

    #[test]
    fn smoke_test_lone_bang_is_text() {
        let (text, _, kind) = plain_ok("wow!");
        assert_eq!(text, "wow!");
        assert_eq!(kind, CharKind::SpaceChar);
    }

    #[test]
    fn smoke_test_angle_without_autolink_is_text() {
        let (text, _, kind) = plain_ok("a < b");
        assert_eq!(text, "a < b");
        assert_eq!(kind, CharKind::OtherChar);
    }

    #[test]
    fn smoke_test_angle_before_autolink_stops() {
        let (text, rest, _) = plain_ok("go <https://x.io>");
        assert_eq!(text, "go ");
        assert_eq!(rest, "<https://x.io>");
    }

    #[test]
    fn smoke_test_transparent_punctuation_is_space_class() {
        let (text, _, kind) = plain_ok("fin.");
        assert_eq!(text, "fin.");
        assert_eq!(kind, CharKind::SpaceChar);
    }

    #[test]
    fn smoke_test_lone_backslash() {
        let (text, _, kind) = plain_ok("a\\");
        assert_eq!(text, "a\\");
        assert_eq!(kind, CharKind::OtherChar);
    }

    #[test]
    fn smoke_test_empty_run_fails() {
        let mut cx = InlineCtx::new();
        assert!(plain(&mut cx, new_span("*x*")).is_err());
    }
}
