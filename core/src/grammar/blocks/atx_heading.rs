// ATX heading grammar
//
// One to six `#` characters, at least one horizontal whitespace, then the
// heading text up to end of line. A trailing `\s+#+\s*` sequence is
// stripped. Seven or more hashes back out so the line can be read as a
// paragraph; a missing separator after the hash run is a committed failure
// that is recovered by consuming the rest of the line.

use nom::Input;

use super::Recovered;
use crate::ast::{Block, Isp};
use crate::grammar::error::{MResult, MmarkError};
use crate::grammar::shared::{
    consume_line, current_line, is_space, position_of, skip_hspace, Span,
};

/// Parse an ATX heading.
///
/// # Returns
/// * `Ok((rest, Ok(block)))` - a heading
/// * `Ok((rest, Err(recovered)))` - the opener committed but the body failed;
///   the line has been consumed and the error is to be kept in the stream
/// * `Err(_)` - not a heading at all
pub fn atx_heading(input: Span) -> MResult<Result<Block<Isp>, Recovered>> {
    let hashes = input.fragment().chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return MmarkError::expecting(input, "heading opener").into_err();
    }
    let after_hashes = input.take_from(hashes);

    match after_hashes.fragment().chars().next() {
        Some(c) if is_space(c) => {}
        _ => {
            let err = MmarkError::expecting(after_hashes, "white space");
            let recovered = (err.position(), err.kind());
            log::debug!("Heading body failed at {}", recovered.0);
            return Ok((consume_line(after_hashes), Err(recovered)));
        }
    }

    let text_start = skip_hspace(after_hashes);
    let text = strip_closing_sequence(current_line(&text_start));
    let content = Isp::new(position_of(&text_start), text);
    log::debug!("Parsed heading level {}: {:?}", hashes, text);

    Ok((
        consume_line(text_start),
        Ok(Block::Heading {
            level: hashes as u8,
            content,
        }),
    ))
}

// Strip an optional `\s+#+\s*` tail; the hash run only goes when whitespace
// precedes it.
fn strip_closing_sequence(line: &str) -> &str {
    let trimmed = line.trim_end_matches(is_space);
    let without_hashes = trimmed.trim_end_matches('#');
    if without_hashes.len() == trimmed.len() {
        return trimmed;
    }
    if without_hashes.is_empty() {
        return "";
    }
    if without_hashes.ends_with(is_space) {
        without_hashes.trim_end_matches(is_space)
    } else {
        trimmed
    }
}
