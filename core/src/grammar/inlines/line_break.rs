// Hard line break grammar
//
// A backslash immediately before a line terminator, with more content after
// it; trailing horizontal whitespace on the next line is skipped.

use nom::Input;

use super::{CharKind, InlineCtx};
use crate::ast::Inline;
use crate::grammar::error::{MResult, MmarkError};
use crate::grammar::shared::{skip_hspace, Span};

pub fn hard_line_break<'a>(cx: &mut InlineCtx, input: Span<'a>) -> MResult<'a, Inline> {
    let frag = *input.fragment();
    if !frag.starts_with('\\') {
        return MmarkError::expecting(input, "hard line break").into_err();
    }
    let after_slash = &frag[1..];
    let terminator = if after_slash.starts_with("\r\n") {
        2
    } else if after_slash.starts_with('\n') || after_slash.starts_with('\r') {
        1
    } else {
        return MmarkError::expecting(input, "hard line break").into_err();
    };

    let rest = input.take_from(1 + terminator);
    if rest.fragment().is_empty() {
        // A break at end of input is not a break.
        return MmarkError::expecting(input, "hard line break").into_err();
    }
    log::debug!("Parsed hard line break at offset {}", input.location_offset());
    cx.last = CharKind::SpaceChar;
    Ok((skip_hspace(rest), Inline::LineBreak))
}
