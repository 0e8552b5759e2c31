// URI reference grammar
//
// Link destinations and autolinks delegate to this sub-parser over a bounded
// window of the input. The parser consumes the whole window or fails at the
// first offending character.

use lazy_static::lazy_static;
use nom::Input;
use regex::Regex;

use super::error::{MResult, MmarkError};
use super::shared::Span;
use crate::ast::Uri;

lazy_static! {
    // Matches the whole candidate; used as the email-address predicate for
    // autolink classification.
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.'
                | '_'
                | '~'
                | '!'
                | '$'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | ';'
                | '='
                | ':'
                | '@'
                | '/'
                | '?'
                | '#'
                | '['
                | ']'
        )
}

/// Parse a URI reference spanning the entire remaining input.
///
/// The scheme is only committed when its trailing `:` is present; otherwise
/// the whole window is treated as a scheme-less reference.
pub fn uri(input: Span) -> MResult<Uri> {
    log::debug!(
        "Parsing URI from: {:?}",
        crate::logic::logger::safe_preview(input.fragment(), 40)
    );

    let frag = *input.fragment();
    if frag.is_empty() {
        return MmarkError::expecting(input, "URI").into_err();
    }

    let scheme = match frag.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => {
            let end = frag
                .char_indices()
                .find(|&(_, c)| !is_scheme_char(c))
                .map(|(i, _)| i)
                .unwrap_or(frag.len());
            if frag[end..].starts_with(':') {
                Some(frag[..end].to_string())
            } else {
                None
            }
        }
        _ => None,
    };

    // Validate the remainder character by character; percent signs must head
    // a two-digit hex escape.
    let body_start = scheme.as_ref().map(|s| s.len() + 1).unwrap_or(0);
    let mut chars = frag[body_start..].char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let at = body_start + i;
        if c == '%' {
            for _ in 0..2 {
                match chars.peek() {
                    Some(&(_, h)) if h.is_ascii_hexdigit() => {
                        chars.next();
                    }
                    Some(&(j, _)) => {
                        return MmarkError::expecting(
                            input.take_from(body_start + j),
                            "hexadecimal digit",
                        )
                        .into_err();
                    }
                    None => {
                        return MmarkError::expecting(
                            input.take_from(frag.len()),
                            "hexadecimal digit",
                        )
                        .into_err();
                    }
                }
            }
        } else if !is_uri_char(c) {
            return MmarkError::expecting(input.take_from(at), "URI character").into_err();
        }
    }

    let rest = input.take_from(frag.len());
    Ok((rest, Uri::new(scheme, frag)))
}

/// Run the URI parser over a collected window, requiring it to consume
/// everything. End-of-input reports are relabelled for the enclosing
/// construct.
pub fn uri_window(window: Span) -> Result<Uri, MmarkError<'_>> {
    match uri(window) {
        Ok((_, parsed)) => Ok(parsed),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(e.with_eof_label("end of URI literal"))
        }
        Err(nom::Err::Incomplete(_)) => {
            Err(MmarkError::expecting(window, "URI").with_eof_label("end of URI literal"))
        }
    }
}

/// Email-address predicate used for autolink classification.
pub fn is_email(candidate: &str) -> bool {
    EMAIL_REGEX.is_match(candidate)
}
