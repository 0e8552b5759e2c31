// Code span grammar
//
// A run of n backticks opens; the content runs to the next run of exactly n
// backticks. Interior whitespace runs collapse to single spaces.

use nom::Input;

use super::{CharKind, InlineCtx};
use crate::ast::Inline;
use crate::grammar::error::{MResult, MmarkError};
use crate::grammar::shared::{collapse_whitespace, Span};

pub fn code_span<'a>(cx: &mut InlineCtx, input: Span<'a>) -> MResult<'a, Inline> {
    let frag = *input.fragment();
    if !frag.starts_with('`') {
        return MmarkError::expecting(input, "code span").into_err();
    }
    let open = frag.chars().take_while(|&c| c == '`').count();
    log::debug!("Parsing code span with {open} opening backticks");

    // Backticks are ASCII, so byte scanning is safe here.
    let bytes = frag.as_bytes();
    let mut pos = open;
    while pos < bytes.len() {
        if bytes[pos] == b'`' {
            let mut run_end = pos;
            while run_end < bytes.len() && bytes[run_end] == b'`' {
                run_end += 1;
            }
            if run_end - pos == open {
                let content = collapse_whitespace(&frag[open..pos]);
                log::debug!("Code span content: {:?}", content);
                cx.last = CharKind::OtherChar;
                return Ok((input.take_from(run_end), Inline::CodeSpan(content)));
            }
            pos = run_end;
        } else {
            pos += 1;
        }
    }

    MmarkError::expecting(input.take_from(frag.len()), "closing code span delimiter").into_err()
}
