// Fenced code block grammar
//
// Opening fence: three or more of the same character (` or ~) at the current
// content column, optionally followed by an info string. Body lines are kept
// verbatim until a closing fence of at least the opening length appears at
// the fence's column or less, or the input ends. Body lines are unindented
// relative to the fence's column.

use nom::Input;

use crate::ast::{Block, Isp};
use crate::grammar::error::{MResult, MmarkError};
use crate::grammar::shared::{
    assemble_code_block, consume_line, current_line, indent_level, unescape_text, Span,
};

/// Parse a fenced code block whose opening fence sits at column `alevel`.
pub fn fenced_code_block<'a>(input: Span<'a>, alevel: usize) -> MResult<'a, Block<Isp>> {
    let fence_char = match input.fragment().chars().next() {
        Some(c @ ('`' | '~')) => c,
        _ => return MmarkError::expecting(input, "code fence").into_err(),
    };
    let fence_len = input
        .fragment()
        .chars()
        .take_while(|&c| c == fence_char)
        .count();
    if fence_len < 3 {
        return MmarkError::expecting(input, "code fence").into_err();
    }
    log::debug!("Parsing fenced code block ({fence_len} x {fence_char:?})");

    let after_fence = input.take_from(fence_len);
    let info_raw = current_line(&after_fence);
    if fence_char == '`' && info_raw.contains('`') {
        // Backtick fences reject info strings containing a backtick.
        return MmarkError::expecting(input, "info string without backticks").into_err();
    }
    let info = {
        let trimmed = unescape_text(info_raw.trim());
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    };

    let mut cursor = consume_line(after_fence);
    let mut lines = Vec::new();
    loop {
        if cursor.fragment().is_empty() {
            // Unclosed fence: everything to end of input is content.
            log::debug!("Unclosed fenced code block");
            break;
        }
        if let Some(after) = closing_fence(&cursor, fence_char, fence_len, alevel) {
            cursor = after;
            break;
        }
        lines.push(current_line(&cursor));
        cursor = consume_line(cursor);
    }

    let content = assemble_code_block(alevel, &lines);
    log::debug!(
        "Parsed fenced code block with info={:?}, {} content bytes",
        info,
        content.len()
    );
    Ok((cursor, Block::CodeBlock { info, content }))
}

// A closing fence line: optional indentation up to the fence's column, a run
// of at least `fence_len` fence characters, then only horizontal whitespace.
fn closing_fence<'a>(
    cursor: &Span<'a>,
    fence_char: char,
    fence_len: usize,
    alevel: usize,
) -> Option<Span<'a>> {
    let line = current_line(cursor);
    if indent_level(line) + 1 > alevel {
        return None;
    }
    let inner = line.trim_start();
    let run = inner.chars().take_while(|&c| c == fence_char).count();
    if run >= fence_len && inner[run..].trim().is_empty() {
        Some(consume_line(*cursor))
    } else {
        None
    }
}
