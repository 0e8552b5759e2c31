// Inline link and image grammar
//
// `[label](dest "title")` and `![description](dest "title")`. Labels are
// recursive inline runs with links switched off; descriptions run with
// images switched off. Destinations are either `<uri>` or a naked reference
// running to whitespace or the closing parenthesis, delegated to the URI
// sub-parser either way.

use nom::Input;

use super::{inline_seq, CharKind, InlineCtx};
use crate::ast::{Inline, Uri};
use crate::grammar::error::{MResult, MmarkError};
use crate::grammar::shared::{
    is_ascii_punctuation, is_space_or_newline, not_newline, skip_hspace, Span,
};
use crate::grammar::uri;

pub fn inline_link<'a>(cx: &mut InlineCtx, input: Span<'a>) -> MResult<'a, Inline> {
    if !input.fragment().starts_with('[') {
        return MmarkError::expecting(input, "inline link").into_err();
    }
    log::debug!(
        "Parsing inline link at: {:?}",
        crate::logic::logger::safe_preview(input.fragment(), 40)
    );
    let saved_last = cx.last;

    // Links do not nest: the label run cannot recognize link openers.
    let saved_links = cx.cfg.allow_links;
    cx.cfg.allow_links = false;
    let (rest, label) = label_group(cx, input.take_from(1));
    cx.cfg.allow_links = saved_links;

    let (rest, label) = match label {
        Ok(label) => (rest, label),
        Err(err) => {
            cx.last = saved_last;
            return Err(err);
        }
    };
    match link_tail(rest) {
        Ok((after, (destination, title))) => {
            cx.last = CharKind::OtherChar;
            Ok((
                after,
                Inline::Link {
                    label,
                    destination,
                    title,
                },
            ))
        }
        Err(err) => {
            cx.last = saved_last;
            Err(err)
        }
    }
}

pub fn image<'a>(cx: &mut InlineCtx, input: Span<'a>) -> MResult<'a, Inline> {
    if !input.fragment().starts_with("![") {
        return MmarkError::expecting(input, "image").into_err();
    }
    log::debug!(
        "Parsing image at: {:?}",
        crate::logic::logger::safe_preview(input.fragment(), 40)
    );
    let saved_last = cx.last;
    let after_opener = input.take_from(2);

    // `![]` is the one image whose description is genuinely empty.
    let (rest, description) = if after_opener.fragment().starts_with(']') {
        (
            after_opener.take_from(1),
            vec![Inline::Plain(String::new())],
        )
    } else {
        let saved_images = cx.cfg.allow_images;
        cx.cfg.allow_images = false;
        let (rest, description) = label_group(cx, after_opener);
        cx.cfg.allow_images = saved_images;
        match description {
            Ok(description) => (rest, description),
            Err(err) => {
                cx.last = saved_last;
                return Err(err);
            }
        }
    };

    match link_tail(rest) {
        Ok((after, (source, title))) => {
            cx.last = CharKind::OtherChar;
            Ok((
                after,
                Inline::Image {
                    description,
                    source,
                    title,
                },
            ))
        }
        Err(err) => {
            cx.last = saved_last;
            Err(err)
        }
    }
}

// The bracketed inline run plus its closing `]`. An empty run is allowed
// exactly when the surrounding context allows empty payloads.
#[allow(clippy::type_complexity)]
fn label_group<'a>(
    cx: &mut InlineCtx,
    input: Span<'a>,
) -> (
    Span<'a>,
    Result<Vec<Inline>, nom::Err<MmarkError<'a>>>,
) {
    let (rest, mut inlines) = inline_seq(cx, input);
    if inlines.is_empty() {
        if cx.cfg.allow_empty {
            inlines.push(Inline::Plain(String::new()));
        } else {
            return (
                rest,
                Err(nom::Err::Error(MmarkError::expecting(
                    rest,
                    "inline content",
                ))),
            );
        }
    }
    if !rest.fragment().starts_with(']') {
        return (
            rest,
            Err(nom::Err::Error(MmarkError::expecting(
                rest,
                "closing bracket",
            ))),
        );
    }
    (rest.take_from(1), Ok(inlines))
}

// `(` optional-space destination optional-(space title) optional-space `)`.
fn link_tail(input: Span) -> MResult<'_, (Uri, Option<String>)> {
    if !input.fragment().starts_with('(') {
        return MmarkError::expecting(input, "opening parenthesis").into_err();
    }
    let cursor = skip_hspace(input.take_from(1));

    let (cursor, destination) = if cursor.fragment().starts_with('<') {
        let frag = *cursor.fragment();
        let close = match frag.find('>') {
            Some(i) if frag[..i].chars().all(not_newline) => i,
            _ => return MmarkError::expecting(cursor, "angle-bracketed URI").into_err(),
        };
        let window = cursor.take_from(1).take(close - 1);
        let parsed = uri::uri_window(window).map_err(nom::Err::Error)?;
        (cursor.take_from(close + 1), parsed)
    } else {
        let frag = *cursor.fragment();
        let end = frag
            .char_indices()
            .find(|&(_, c)| is_space_or_newline(c) || c == ')')
            .map(|(i, _)| i)
            .unwrap_or(frag.len());
        let parsed = uri::uri_window(cursor.take(end)).map_err(nom::Err::Error)?;
        (cursor.take_from(end), parsed)
    };
    log::debug!("Link destination: {}", destination);

    let spaced = skip_hspace(cursor);
    let had_space = spaced.location_offset() > cursor.location_offset();
    let (cursor, title) = match spaced.fragment().chars().next() {
        Some(quote @ ('"' | '\'' | '(')) if had_space => {
            let (after, title) = quoted_title(spaced, quote)?;
            (after, Some(title))
        }
        _ => (spaced, None),
    };

    let cursor = skip_hspace(cursor);
    if !cursor.fragment().starts_with(')') {
        return MmarkError::expecting(cursor, "closing parenthesis").into_err();
    }
    Ok((cursor.take_from(1), (destination, title)))
}

// A `"…"`, `'…'` or `(…)` title with backslash escapes.
fn quoted_title(input: Span, open: char) -> MResult<'_, String> {
    let close = match open {
        '(' => ')',
        other => other,
    };
    let frag = *input.fragment();
    let mut title = String::new();
    let mut i = open.len_utf8();
    while i < frag.len() {
        let c = match frag[i..].chars().next() {
            Some(c) => c,
            None => break,
        };
        if c == close {
            return Ok((input.take_from(i + c.len_utf8()), title));
        }
        if c == '\\' {
            if let Some(p) = frag[i + 1..].chars().next() {
                if is_ascii_punctuation(p) {
                    title.push(p);
                    i += 1 + p.len_utf8();
                    continue;
                }
            }
        }
        title.push(c);
        i += c.len_utf8();
    }
    MmarkError::expecting(input.take_from(frag.len()), "closing title delimiter").into_err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::shared::new_span;

    fn link_ok(input: &str) -> (Vec<Inline>, Uri, Option<String>) {
        let mut cx = InlineCtx::new();
        let (_, inline) = inline_link(&mut cx, new_span(input)).expect("not a link");
        match inline {
            Inline::Link {
                label,
                destination,
                title,
            } => (label, destination, title),
            other => panic!("expected link, got {other:?}"),
        }
    }

    #[test]
    fn smoke_test_basic_link() {
        let (label, destination, title) = link_ok("[text](https://example.com)");
        assert_eq!(label, vec![Inline::Plain("text".into())]);
        assert_eq!(destination.as_str(), "https://example.com");
        assert_eq!(title, None);
    }

    #[test]
    fn smoke_test_link_with_title() {
        let (_, destination, title) = link_ok("[x](https://e.com \"a title\")");
        assert_eq!(destination.as_str(), "https://e.com");
        assert_eq!(title.as_deref(), Some("a title"));
    }

    #[test]
    fn smoke_test_single_quoted_and_paren_titles() {
        let (_, _, title) = link_ok("[x](u 'some title')");
        assert_eq!(title.as_deref(), Some("some title"));
        let (_, _, title) = link_ok("[x](u (some title))");
        assert_eq!(title.as_deref(), Some("some title"));
    }

    #[test]
    fn smoke_test_escaped_title_quote() {
        let (_, _, title) = link_ok("[x](u \"a \\\" b\")");
        assert_eq!(title.as_deref(), Some("a \" b"));
    }

    #[test]
    fn smoke_test_angle_bracketed_destination() {
        let (_, destination, _) = link_ok("[x](<https://e.com/a(b)>)");
        assert_eq!(destination.as_str(), "https://e.com/a(b)");
    }

    #[test]
    fn smoke_test_emphasised_label() {
        let (label, _, _) = link_ok("[*em*](u)");
        assert_eq!(
            label,
            vec![Inline::Emphasis(vec![Inline::Plain("em".into())])]
        );
    }

    #[test]
    fn smoke_test_empty_label_is_empty_plain() {
        let (label, _, _) = link_ok("[](u)");
        assert_eq!(label, vec![Inline::Plain(String::new())]);
    }

    #[test]
    fn smoke_test_missing_tail_fails_and_restores_state() {
        let mut cx = InlineCtx::new();
        cx.last = CharKind::OtherChar;
        assert!(inline_link(&mut cx, new_span("[text] trailing")).is_err());
        assert_eq!(cx.last, CharKind::OtherChar);
    }

    #[test]
    fn smoke_test_image_basic() {
        let mut cx = InlineCtx::new();
        let (_, inline) = image(&mut cx, new_span("![alt](img.png)")).expect("not an image");
        match inline {
            Inline::Image {
                description,
                source,
                ..
            } => {
                assert_eq!(description, vec![Inline::Plain("alt".into())]);
                assert_eq!(source.as_str(), "img.png");
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn smoke_test_image_empty_description() {
        let mut cx = InlineCtx::new();
        let (_, inline) = image(&mut cx, new_span("![](img.png)")).unwrap();
        assert!(matches!(
            inline,
            Inline::Image { ref description, .. } if description == &vec![Inline::Plain(String::new())]
        ));
    }

    #[test]
    fn smoke_test_naked_destination_stops_at_space() {
        let (_, destination, title) = link_ok("[x](a/b 'note')");
        assert_eq!(destination.as_str(), "a/b");
        assert_eq!(title.as_deref(), Some("note"));
    }
}
