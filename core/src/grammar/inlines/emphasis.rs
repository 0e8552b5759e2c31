// Enclosed inline grammar: emphasis, strong, strikeout, sub/superscript
//
// Delimiter runs open a frame (or a pair of frames for composite runs like
// `***`) when they are left-flanking, and close it when right-flanking. The
// run that violates its flanking rule is reported as a non-flanking
// delimiter run; a frame whose closer never materializes is reported at its
// opener.

use nom::Input;

use super::{nonempty_seq, CharKind, InlineCtx};
use crate::ast::Inline;
use crate::grammar::error::{MResult, MmarkErr, MmarkError};
use crate::grammar::shared::{is_markup_char, is_transparent, Span};

/// Delimiter frame kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineFrame {
    EmphasisStar,
    EmphasisUnderscore,
    StrongStar,
    StrongUnderscore,
    Strikeout,
    Subscript,
    Superscript,
}

impl InlineFrame {
    pub fn delimiter(self) -> &'static str {
        match self {
            InlineFrame::EmphasisStar => "*",
            InlineFrame::EmphasisUnderscore => "_",
            InlineFrame::StrongStar => "**",
            InlineFrame::StrongUnderscore => "__",
            InlineFrame::Strikeout => "~~",
            InlineFrame::Subscript => "~",
            InlineFrame::Superscript => "^",
        }
    }

    pub fn wrap(self, children: Vec<Inline>) -> Inline {
        match self {
            InlineFrame::EmphasisStar | InlineFrame::EmphasisUnderscore => {
                Inline::Emphasis(children)
            }
            InlineFrame::StrongStar | InlineFrame::StrongUnderscore => Inline::Strong(children),
            InlineFrame::Strikeout => Inline::Strikeout(children),
            InlineFrame::Subscript => Inline::Subscript(children),
            InlineFrame::Superscript => Inline::Superscript(children),
        }
    }
}

// A matched opener: one frame, or two that must both close.
#[derive(Debug, Clone, Copy)]
enum Opening {
    Single(InlineFrame),
    Double(InlineFrame, InlineFrame),
}

// Priority-ordered opener table; composite runs come before their prefixes.
const OPENERS: [(&str, Opening); 13] = [
    (
        "****",
        Opening::Double(InlineFrame::StrongStar, InlineFrame::StrongStar),
    ),
    (
        "***",
        Opening::Double(InlineFrame::StrongStar, InlineFrame::EmphasisStar),
    ),
    ("**", Opening::Single(InlineFrame::StrongStar)),
    ("*", Opening::Single(InlineFrame::EmphasisStar)),
    (
        "____",
        Opening::Double(InlineFrame::StrongUnderscore, InlineFrame::StrongUnderscore),
    ),
    (
        "___",
        Opening::Double(
            InlineFrame::StrongUnderscore,
            InlineFrame::EmphasisUnderscore,
        ),
    ),
    ("__", Opening::Single(InlineFrame::StrongUnderscore)),
    ("_", Opening::Single(InlineFrame::EmphasisUnderscore)),
    (
        "~~~~",
        Opening::Double(InlineFrame::Strikeout, InlineFrame::Strikeout),
    ),
    (
        "~~~",
        Opening::Double(InlineFrame::Strikeout, InlineFrame::Subscript),
    ),
    ("~~", Opening::Single(InlineFrame::Strikeout)),
    ("~", Opening::Single(InlineFrame::Subscript)),
    ("^", Opening::Single(InlineFrame::Superscript)),
];

pub fn enclosed_inline<'a>(cx: &mut InlineCtx, input: Span<'a>) -> MResult<'a, Inline> {
    let (delims, opening) = match OPENERS
        .iter()
        .find(|(delims, _)| input.fragment().starts_with(delims))
    {
        Some(&(delims, opening)) => (delims, opening),
        None => return MmarkError::expecting(input, "inline delimiter run").into_err(),
    };
    log::debug!("Trying enclosed inline opened by {delims:?}");

    // Left-flanking: adjacent content to the right, a word boundary to the
    // left.
    let body = input.take_from(delims.len());
    let right_ok = body
        .fragment()
        .chars()
        .next()
        .map(|c| !is_transparent(c))
        .unwrap_or(false);
    let left_ok = matches!(cx.last, CharKind::SpaceChar | CharKind::LeftFlankingDel);
    if !right_ok || !left_ok {
        return MmarkError::fancy(input, MmarkErr::NonFlankingDelimiterRun(delims.to_string()))
            .into_err();
    }

    let saved_last = cx.last;
    let saved_empty = cx.cfg.allow_empty;
    cx.last = CharKind::LeftFlankingDel;
    cx.cfg.allow_empty = false;
    let result = enclosed_body(cx, body, input, delims, opening);
    cx.cfg.allow_empty = saved_empty;
    if result.is_err() {
        cx.last = saved_last;
    }
    result
}

fn enclosed_body<'a>(
    cx: &mut InlineCtx,
    body: Span<'a>,
    opener: Span<'a>,
    delims: &'static str,
    opening: Opening,
) -> MResult<'a, Inline> {
    match opening {
        Opening::Single(frame) => {
            let (rest, inlines) = nonempty_seq(cx, body)?;
            let rest = close_frame(cx, rest, frame, opener, delims)?;
            Ok((rest, frame.wrap(inlines)))
        }
        Opening::Double(first, second) => {
            let (rest, inlines0) = nonempty_seq(cx, body)?;
            // Frames close innermost-first: the second frame opened last, so
            // its closer is tried before the first's.
            let (rest, this, that) = match close_frame(cx, rest, second, opener, delims) {
                Ok(after) => (after, second, first),
                Err(_) => {
                    let after = close_frame(cx, rest, first, opener, delims)?;
                    (after, first, second)
                }
            };
            match close_frame(cx, rest, that, opener, delims) {
                Ok(after_both) => Ok((after_both, that.wrap(vec![this.wrap(inlines0)]))),
                Err(_) => {
                    let (rest, inlines1) = nonempty_seq(cx, rest)?;
                    let after = close_frame(cx, rest, that, opener, delims)?;
                    let mut children = vec![this.wrap(inlines0)];
                    children.extend(inlines1);
                    Ok((after, that.wrap(children)))
                }
            }
        }
    }
}

// Match and validate a closing delimiter run.
fn close_frame<'a>(
    cx: &mut InlineCtx,
    input: Span<'a>,
    frame: InlineFrame,
    opener: Span<'a>,
    opener_delims: &str,
) -> Result<Span<'a>, nom::Err<MmarkError<'a>>> {
    let delim = frame.delimiter();
    if !input.fragment().starts_with(delim) {
        // The closer never materialized; the whole construct is reported at
        // its opening run.
        return MmarkError::fancy(
            opener,
            MmarkErr::NonFlankingDelimiterRun(opener_delims.to_string()),
        )
        .into_err();
    }
    let after = input.take_from(delim.len());
    let left_ok = !matches!(cx.last, CharKind::SpaceChar | CharKind::LeftFlankingDel);
    let right_ok = after
        .fragment()
        .chars()
        .next()
        .map(|c| is_transparent(c) || is_markup_char(c))
        .unwrap_or(true);
    if !left_ok || !right_ok {
        return MmarkError::fancy(input, MmarkErr::NonFlankingDelimiterRun(delim.to_string()))
            .into_err();
    }
    cx.last = CharKind::RightFlankingDel;
    Ok(after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::shared::new_span;

    fn enclosed_ok(input: &str) -> Inline {
        let mut cx = InlineCtx::new();
        let (rest, inline) = enclosed_inline(&mut cx, new_span(input)).expect("enclosed failed");
        assert_eq!(*rest.fragment(), "", "input not fully consumed");
        inline
    }

    fn enclosed_err(input: &str) -> MmarkError<'_> {
        let mut cx = InlineCtx::new();
        match enclosed_inline(&mut cx, new_span(input)) {
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => e,
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn smoke_test_single_emphasis() {
        assert_eq!(
            enclosed_ok("*hi*"),
            Inline::Emphasis(vec![Inline::Plain("hi".into())])
        );
    }

    #[test]
    fn smoke_test_single_strong_and_underscores() {
        assert_eq!(
            enclosed_ok("**hi**"),
            Inline::Strong(vec![Inline::Plain("hi".into())])
        );
        assert_eq!(
            enclosed_ok("__hi__"),
            Inline::Strong(vec![Inline::Plain("hi".into())])
        );
        assert_eq!(
            enclosed_ok("_hi_"),
            Inline::Emphasis(vec![Inline::Plain("hi".into())])
        );
    }

    #[test]
    fn smoke_test_triple_star_nests_strong_outside() {
        assert_eq!(
            enclosed_ok("***hi***"),
            Inline::Strong(vec![Inline::Emphasis(vec![Inline::Plain("hi".into())])])
        );
    }

    #[test]
    fn smoke_test_quadruple_star_nests_strong_in_strong() {
        assert_eq!(
            enclosed_ok("****hi****"),
            Inline::Strong(vec![Inline::Strong(vec![Inline::Plain("hi".into())])])
        );
    }

    #[test]
    fn smoke_test_split_double_frame() {
        // The inner frame closes early; the rest still belongs to the outer.
        assert_eq!(
            enclosed_ok("***a* b**"),
            Inline::Strong(vec![
                Inline::Emphasis(vec![Inline::Plain("a".into())]),
                Inline::Plain(" b".into()),
            ])
        );
    }

    #[test]
    fn smoke_test_strikeout_family() {
        assert_eq!(
            enclosed_ok("~~x~~"),
            Inline::Strikeout(vec![Inline::Plain("x".into())])
        );
        assert_eq!(
            enclosed_ok("~x~"),
            Inline::Subscript(vec![Inline::Plain("x".into())])
        );
        assert_eq!(
            enclosed_ok("~~~x~~~"),
            Inline::Strikeout(vec![Inline::Subscript(vec![Inline::Plain("x".into())])])
        );
    }

    #[test]
    fn smoke_test_superscript() {
        assert_eq!(
            enclosed_ok("^2^"),
            Inline::Superscript(vec![Inline::Plain("2".into())])
        );
    }

    #[test]
    fn smoke_test_space_after_opener_is_non_flanking() {
        let err = enclosed_err("* x*");
        assert!(matches!(
            err.custom,
            Some(MmarkErr::NonFlankingDelimiterRun(ref d)) if d == "*"
        ));
        assert_eq!(err.span.location_offset(), 0);
    }

    #[test]
    fn smoke_test_unclosed_frame_reported_at_opener() {
        let err = enclosed_err("*abc");
        assert!(matches!(
            err.custom,
            Some(MmarkErr::NonFlankingDelimiterRun(ref d)) if d == "*"
        ));
        assert_eq!(err.span.location_offset(), 0);
    }

    #[test]
    fn smoke_test_bare_run_is_non_flanking() {
        let err = enclosed_err("**");
        assert!(matches!(
            err.custom,
            Some(MmarkErr::NonFlankingDelimiterRun(ref d)) if d == "**"
        ));
    }

    #[test]
    fn smoke_test_state_restored_on_failure() {
        let mut cx = InlineCtx::new();
        cx.last = CharKind::SpaceChar;
        assert!(enclosed_inline(&mut cx, new_span("*abc")).is_err());
        assert_eq!(cx.last, CharKind::SpaceChar);
        assert!(cx.cfg.allow_empty);
    }
}
