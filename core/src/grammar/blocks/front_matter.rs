// YAML front matter
//
// Triggered only at the very start of the input: a `---` line, body lines up
// to a line whose trimmed content is exactly `---` (or end of input), decoded
// by serde_yml. Decoder failures become a document error positioned from the
// decoder's own location report when it has one, else at the opening fence.

use serde_yml::Value;

use super::Recovered;
use crate::grammar::shared::{consume_line, current_line, is_space, Span};
use crate::parser::{ParseErrorKind, Position};

/// Outcome of the front matter scan: the input after the fenced region, the
/// decoded value, and at most one error to report.
pub struct FrontMatter<'a> {
    pub rest: Span<'a>,
    pub yaml: Option<Value>,
    pub error: Option<Recovered>,
}

/// Recognize and decode a YAML front matter fence at the start of the input.
pub fn front_matter(input: Span) -> FrontMatter<'_> {
    let opener = current_line(&input);
    let is_fence = opener
        .strip_prefix("---")
        .map(|tail| tail.chars().all(is_space))
        .unwrap_or(false);
    let terminated = input.fragment().contains('\n');
    if !is_fence || !terminated {
        return FrontMatter {
            rest: input,
            yaml: None,
            error: None,
        };
    }
    log::debug!("Parsing YAML front matter");

    let mut cursor = consume_line(input);
    let mut body: Vec<&str> = Vec::new();
    loop {
        if cursor.fragment().is_empty() {
            break;
        }
        let line = current_line(&cursor);
        cursor = consume_line(cursor);
        if line.trim() == "---" {
            break;
        }
        body.push(line);
    }

    let text = body.join("\n");
    if text.trim().is_empty() {
        // The decoder maps an empty document to null; short-circuit so the
        // outcome does not depend on its empty-input quirks.
        return FrontMatter {
            rest: cursor,
            yaml: Some(Value::Null),
            error: None,
        };
    }

    match serde_yml::from_str::<Value>(&text) {
        Ok(value) => {
            log::debug!("Decoded front matter");
            FrontMatter {
                rest: cursor,
                yaml: Some(value),
                error: None,
            }
        }
        Err(err) => {
            // Body line L is document line L+1: the opening fence was
            // stripped before decoding.
            let position = match err.location() {
                Some(loc) => Position::new(loc.line() as u32 + 1, loc.column()),
                None => Position::new(1, 1),
            };
            let message = strip_location_suffix(err.to_string());
            log::debug!("Front matter decode failed at {position}: {message}");
            FrontMatter {
                rest: cursor,
                yaml: None,
                error: Some((position, ParseErrorKind::YamlParseError(message))),
            }
        }
    }
}

// serde_yml appends " at line L column C" to its messages; the position is
// reported separately, so drop the suffix.
fn strip_location_suffix(mut message: String) -> String {
    if let Some(i) = message.rfind(" at line ") {
        message.truncate(i);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::shared::new_span;

    #[test]
    fn smoke_test_no_front_matter() {
        let out = front_matter(new_span("# heading\n"));
        assert!(out.yaml.is_none());
        assert!(out.error.is_none());
        assert_eq!(*out.rest.fragment(), "# heading\n");
    }

    #[test]
    fn smoke_test_simple_mapping() {
        let out = front_matter(new_span("---\ntitle: x\n---\nrest\n"));
        let expected: Value = serde_yml::from_str("title: x").unwrap();
        assert_eq!(out.yaml, Some(expected));
        assert!(out.error.is_none());
        assert_eq!(*out.rest.fragment(), "rest\n");
    }

    #[test]
    fn smoke_test_empty_body_is_null() {
        let out = front_matter(new_span("---\n---\n"));
        assert_eq!(out.yaml, Some(Value::Null));
        assert_eq!(*out.rest.fragment(), "");
    }

    #[test]
    fn smoke_test_unclosed_runs_to_eof() {
        let out = front_matter(new_span("---\na: 1\nb: 2\n"));
        assert!(out.yaml.is_some());
        assert_eq!(*out.rest.fragment(), "");
    }

    #[test]
    fn smoke_test_four_dashes_are_not_a_fence() {
        let out = front_matter(new_span("----\nx\n"));
        assert!(out.yaml.is_none());
        assert_eq!(*out.rest.fragment(), "----\nx\n");
    }

    #[test]
    fn smoke_test_decode_error_positioned_in_document() {
        let out = front_matter(new_span("---\nkey: [unclosed\n---\nrest\n"));
        assert!(out.yaml.is_none());
        let (position, kind) = out.error.expect("expected a YAML error");
        assert!(matches!(kind, ParseErrorKind::YamlParseError(_)));
        assert!(position.line >= 1 && position.column >= 1);
        assert_eq!(*out.rest.fragment(), "rest\n");
    }

    #[test]
    fn smoke_test_unterminated_opener_is_not_front_matter() {
        let out = front_matter(new_span("---"));
        assert!(out.yaml.is_none());
        assert_eq!(*out.rest.fragment(), "---");
    }
}
