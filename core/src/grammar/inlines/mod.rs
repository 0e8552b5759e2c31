// Inline-level grammar: token loop with a last-character-class state machine
//
// Each inline payload is parsed by repeatedly trying the token alternatives
// in a fixed order. The context threads the class of the last consumed
// character (the flanking rules read it) and the gates that switch link,
// image, and empty-payload recognition on and off.

pub mod autolink;
pub mod code_span;
pub mod emphasis;
pub mod line_break;
pub mod link;
pub mod text;

pub use autolink::autolink;
pub use code_span::code_span;
pub use emphasis::{enclosed_inline, InlineFrame};
pub use line_break::hard_line_break;
pub use link::{image, inline_link};
pub use text::plain;

use super::error::{MResult, MmarkError};
use super::shared::{new_span, Span};
use crate::ast::Inline;

/// Class of the last character consumed by the inline parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharKind {
    SpaceChar,
    LeftFlankingDel,
    RightFlankingDel,
    OtherChar,
}

/// Gates for the context-dependent recognizers.
#[derive(Debug, Clone, Copy)]
pub struct InlineConfig {
    pub allow_empty: bool,
    pub allow_links: bool,
    pub allow_images: bool,
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self {
            allow_empty: true,
            allow_links: true,
            allow_images: true,
        }
    }
}

/// Mutable state local to one payload run. Every payload starts at a logical
/// word boundary.
#[derive(Debug, Clone)]
pub struct InlineCtx {
    pub last: CharKind,
    pub cfg: InlineConfig,
}

impl InlineCtx {
    pub fn new() -> Self {
        Self {
            last: CharKind::SpaceChar,
            cfg: InlineConfig::default(),
        }
    }
}

impl Default for InlineCtx {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a whole inline payload into its inline tree.
pub fn parse_payload(text: &str) -> Result<Vec<Inline>, MmarkError<'_>> {
    log::debug!(
        "Parsing inline payload: {:?}",
        crate::logic::logger::safe_preview(text, 40)
    );

    let span = new_span(text);
    let mut cx = InlineCtx::new();
    if span.fragment().is_empty() {
        // Root payloads allow emptiness.
        return Ok(vec![Inline::Plain(String::new())]);
    }

    let (rest, inlines) = inline_seq(&mut cx, span);
    if rest.fragment().is_empty() {
        log::debug!("Parsed {} inline nodes", inlines.len());
        return Ok(inlines);
    }
    // Something stopped the loop; re-run the token alternatives once to
    // surface the error that did it.
    match inline_token(&mut cx, rest) {
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e),
        _ => Err(MmarkError::expecting(rest, "inline content")),
    }
}

/// Consume inline tokens until none matches. Never fails; the caller decides
/// what a stop means.
pub fn inline_seq<'a>(cx: &mut InlineCtx, input: Span<'a>) -> (Span<'a>, Vec<Inline>) {
    let mut out = Vec::new();
    let mut input = input;
    let mut last_offset = usize::MAX;
    while !input.fragment().is_empty() {
        // Every token consumes input; bail out if one ever stops doing so.
        if input.location_offset() == last_offset {
            log::error!(
                "Inline parser not making progress at offset {}",
                last_offset
            );
            break;
        }
        last_offset = input.location_offset();
        match inline_token(cx, input) {
            Ok((rest, inline)) => {
                out.push(inline);
                input = rest;
            }
            Err(_) => break,
        }
    }
    (input, out)
}

/// Like `inline_seq`, but at least one token must match.
pub fn nonempty_seq<'a>(cx: &mut InlineCtx, input: Span<'a>) -> MResult<'a, Vec<Inline>> {
    let (rest, inlines) = inline_seq(cx, input);
    if inlines.is_empty() {
        return match inline_token(cx, input) {
            Err(e) => Err(e),
            Ok(_) => MmarkError::expecting(input, "inline content").into_err(),
        };
    }
    Ok((rest, inlines))
}

/// Try one inline token, first match wins.
pub fn inline_token<'a>(cx: &mut InlineCtx, input: Span<'a>) -> MResult<'a, Inline> {
    let mut best: Option<MmarkError<'a>> = None;

    if let Some(ok) = try_alt(&mut best, code_span(cx, input)) {
        return Ok(ok);
    }
    if cx.cfg.allow_links {
        if let Some(ok) = try_alt(&mut best, inline_link(cx, input)) {
            return Ok(ok);
        }
    }
    if cx.cfg.allow_images {
        if let Some(ok) = try_alt(&mut best, image(cx, input)) {
            return Ok(ok);
        }
    }
    if cx.cfg.allow_links {
        if let Some(ok) = try_alt(&mut best, autolink(cx, input)) {
            return Ok(ok);
        }
    }
    if let Some(ok) = try_alt(&mut best, enclosed_inline(cx, input)) {
        return Ok(ok);
    }
    if let Some(ok) = try_alt(&mut best, hard_line_break(cx, input)) {
        return Ok(ok);
    }
    if let Some(ok) = try_alt(&mut best, plain(cx, input)) {
        return Ok(ok);
    }

    Err(nom::Err::Error(
        best.unwrap_or_else(|| MmarkError::expecting(input, "inline content")),
    ))
}

// Merge a failed alternative's error into the running best, furthest wins.
fn try_alt<'a>(
    best: &mut Option<MmarkError<'a>>,
    result: MResult<'a, Inline>,
) -> Option<(Span<'a>, Inline)> {
    match result {
        Ok(ok) => Some(ok),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            *best = Some(match best.take() {
                Some(b) => b.merge(e),
                None => e,
            });
            None
        }
        Err(nom::Err::Incomplete(_)) => None,
    }
}
