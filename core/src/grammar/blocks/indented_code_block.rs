// Indented code block grammar
//
// Requires content at least four columns past the reference level. Blank
// lines stay inside the block only when a sufficiently indented line follows
// them; trailing blanks are dropped. Lines are unindented by the code level
// minus one.

use crate::ast::{Block, Isp};
use crate::grammar::error::{MResult, MmarkError};
use crate::grammar::shared::{
    assemble_code_block, column_of, consume_line, current_line, full_current_line, indent_level,
    Span,
};

use super::ilevel;

/// Parse an indented code block under the given reference level.
pub fn indented_code_block<'a>(input: Span<'a>, rlevel: usize) -> MResult<'a, Block<Isp>> {
    let level = ilevel(rlevel);
    if column_of(&input) < level {
        return MmarkError::expecting(input, "indented code block").into_err();
    }
    log::debug!(
        "Parsing indented code block at level {}: {:?}",
        level,
        crate::logic::logger::safe_preview(input.fragment(), 40)
    );

    // The dispatcher consumed the first line's indentation; recover the line
    // from its true start so unindenting sees it whole.
    let mut lines = vec![full_current_line(&input)];
    let mut cursor = consume_line(input);

    loop {
        if cursor.fragment().is_empty() {
            break;
        }
        let line = current_line(&cursor);
        if !line.trim().is_empty() {
            if indent_level(line) + 1 >= level {
                lines.push(line);
                cursor = consume_line(cursor);
                continue;
            }
            break;
        }

        // A blank run continues the block only when a line at the code level
        // follows it.
        let mut blanks = Vec::new();
        let mut probe = cursor;
        loop {
            if probe.fragment().is_empty() {
                break;
            }
            let probe_line = current_line(&probe);
            if !probe_line.trim().is_empty() {
                break;
            }
            blanks.push(probe_line);
            probe = consume_line(probe);
        }
        if probe.fragment().is_empty() {
            break;
        }
        if indent_level(current_line(&probe)) + 1 >= level {
            lines.extend(blanks);
            cursor = probe;
        } else {
            break;
        }
    }

    let content = assemble_code_block(level, &lines);
    log::debug!("Parsed indented code block, {} lines", lines.len());
    Ok((
        cursor,
        Block::CodeBlock {
            info: None,
            content,
        },
    ))
}
