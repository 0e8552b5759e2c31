// Paragraph grammar
//
// A non-empty line plus every following non-blank line that still sits at or
// past the reference level. Lines are joined with `\n` and the final line is
// right-trimmed; `>` prefixes are left untouched.

use nom::Input;

use crate::ast::{Block, Isp};
use crate::grammar::error::MResult;
use crate::grammar::shared::{
    assemble_paragraph, consume_line, current_line, indent_level, position_of, skip_hspace, Span,
};

/// Parse a paragraph at the current content position.
pub fn paragraph<'a>(input: Span<'a>, rlevel: usize) -> MResult<'a, Block<Isp>> {
    log::debug!(
        "Parsing paragraph from: {:?}",
        crate::logic::logger::safe_preview(input.fragment(), 40)
    );

    let start = position_of(&input);
    let mut lines = vec![current_line(&input)];
    let mut cursor = input;

    loop {
        // A continuation needs a newline separator and a following non-blank
        // line that has not fallen out of the block context.
        let frag = cursor.fragment();
        let line_end = frag.find('\n');
        if line_end.is_none() {
            cursor = cursor.take_from(frag.len());
            break;
        }
        let after_newline = consume_line(cursor);
        let next_line = current_line(&after_newline);
        if next_line.trim().is_empty() || indent_level(next_line) + 1 < rlevel {
            cursor = after_newline;
            break;
        }
        let content = skip_hspace(after_newline);
        lines.push(current_line(&content));
        cursor = content;
    }

    let text = assemble_paragraph(&lines);
    log::debug!(
        "Parsed paragraph: {:?}",
        crate::logic::logger::safe_preview(&text, 40)
    );
    Ok((cursor, Block::Paragraph(Isp::new(start, text))))
}
