// Autolink grammar
//
// `<uri>` becomes a link to the URI. A scheme-less (or mailto) URI whose
// path is a single segment passing the email predicate is promoted to a
// mailto link labelled with the bare address.

use nom::Input;

use super::{CharKind, InlineCtx};
use crate::ast::{Inline, Uri};
use crate::grammar::error::{MResult, MmarkError};
use crate::grammar::shared::{not_newline, Span};
use crate::grammar::uri;

/// Scan `<uri>` at the head of the input. Shared with the plain-text parser,
/// which treats `<` as ordinary text exactly when this returns nothing.
pub(crate) fn scan_autolink<'a>(input: Span<'a>) -> Option<(Span<'a>, Uri)> {
    let frag = *input.fragment();
    if !frag.starts_with('<') {
        return None;
    }
    let close = frag.find('>')?;
    if !frag[..close].chars().all(not_newline) {
        return None;
    }
    let window = input.take_from(1).take(close - 1);
    match uri::uri_window(window) {
        Ok(parsed) => Some((input.take_from(close + 1), parsed)),
        Err(_) => None,
    }
}

pub fn autolink<'a>(cx: &mut InlineCtx, input: Span<'a>) -> MResult<'a, Inline> {
    let (rest, parsed) = match scan_autolink(input) {
        Some(found) => found,
        None => return MmarkError::expecting(input, "autolink").into_err(),
    };
    log::debug!("Parsed autolink: {}", parsed);

    let path = parsed.path_part();
    let mailish = !path.contains('/')
        && uri::is_email(path)
        && (parsed.scheme.is_none() || parsed.scheme.as_deref() == Some("mailto"));

    let inline = if mailish {
        let label = vec![Inline::Plain(path.to_string())];
        Inline::Link {
            label,
            destination: parsed.make_absolute("mailto"),
            title: None,
        }
    } else {
        Inline::Link {
            label: vec![Inline::Plain(parsed.text.clone())],
            destination: parsed,
            title: None,
        }
    };
    cx.last = CharKind::OtherChar;
    Ok((rest, inline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::shared::new_span;

    fn link_ok(input: &str) -> (Vec<Inline>, Uri) {
        let mut cx = InlineCtx::new();
        let (_, inline) = autolink(&mut cx, new_span(input)).expect("not an autolink");
        match inline {
            Inline::Link {
                label, destination, ..
            } => (label, destination),
            other => panic!("expected link, got {other:?}"),
        }
    }

    #[test]
    fn smoke_test_bare_email_promoted_to_mailto() {
        let (label, destination) = link_ok("<a@b.com>");
        assert_eq!(label, vec![Inline::Plain("a@b.com".into())]);
        assert_eq!(destination.scheme.as_deref(), Some("mailto"));
        assert_eq!(destination.as_str(), "mailto:a@b.com");
    }

    #[test]
    fn smoke_test_explicit_mailto_keeps_text() {
        let (label, destination) = link_ok("<mailto:a@b.com>");
        assert_eq!(label, vec![Inline::Plain("a@b.com".into())]);
        assert_eq!(destination.as_str(), "mailto:a@b.com");
    }

    #[test]
    fn smoke_test_https_keeps_full_text_label() {
        let (label, destination) = link_ok("<https://x.io/p>");
        assert_eq!(label, vec![Inline::Plain("https://x.io/p".into())]);
        assert_eq!(destination.scheme.as_deref(), Some("https"));
    }

    #[test]
    fn smoke_test_unclosed_angle_fails() {
        let mut cx = InlineCtx::new();
        assert!(autolink(&mut cx, new_span("<a@b.com")).is_err());
    }

    #[test]
    fn smoke_test_space_inside_fails() {
        let mut cx = InlineCtx::new();
        assert!(autolink(&mut cx, new_span("<a b>")).is_err());
    }
}
