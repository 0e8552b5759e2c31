// Thematic break grammar
//
// A single line that, once whitespace is removed, is three or more of the
// same character drawn from `*`, `-`, `_`.

use crate::ast::{Block, Isp};
use crate::grammar::error::{MResult, MmarkError};
use crate::grammar::shared::{consume_line, current_line, is_space, Span};

/// Parse a thematic break at the current content position.
pub fn thematic_break(input: Span) -> MResult<Block<Isp>> {
    let line = current_line(&input);
    log::debug!("Trying thematic break on line: {:?}", line);

    let mut chars = line.chars().filter(|&c| !is_space(c));
    let first = match chars.next() {
        Some(c @ ('*' | '-' | '_')) => c,
        _ => return MmarkError::expecting(input, "thematic break").into_err(),
    };

    let mut count = 1;
    for c in chars {
        if c != first {
            return MmarkError::expecting(input, "thematic break").into_err();
        }
        count += 1;
    }
    if count < 3 {
        return MmarkError::expecting(input, "thematic break").into_err();
    }

    log::debug!("Parsed thematic break ({count} x {first:?})");
    Ok((consume_line(input), Block::ThematicBreak))
}
