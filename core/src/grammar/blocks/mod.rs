// Block-level grammar: reference-level dispatch over the block alternatives
//
// The block phase walks the input under a read-only reference level. Every
// iteration skips blank space, measures the content column, and either exits
// the current context (column below the reference level), parses an indented
// code block (column at least four past it), or tries the ordinary
// alternatives in a fixed order.

pub mod atx_heading;
pub mod fenced_code_block;
pub mod front_matter;
pub mod indented_code_block;
pub mod paragraph;
pub mod thematic_break;
pub mod unordered_list;

pub use atx_heading::atx_heading;
pub use fenced_code_block::fenced_code_block;
pub use front_matter::front_matter;
pub use indented_code_block::indented_code_block;
pub use paragraph::paragraph;
pub use thematic_break::thematic_break;
pub use unordered_list::unordered_list;

use super::error::MResult;
use super::shared::{column_of, skip_whitespace, Span, TAB_WIDTH};
use crate::ast::{Block, Isp};
use crate::parser::{ParseErrorKind, Position};

/// An error recovered mid-stream without aborting the block loop.
pub type Recovered = (Position, ParseErrorKind);

/// Column at which content stops being an ordinary block.
pub fn ilevel(rlevel: usize) -> usize {
    rlevel + TAB_WIDTH
}

/// Ordinary-block guard: content column below `rlevel + 4`.
pub fn casual_level(alevel: usize, rlevel: usize) -> bool {
    alevel < ilevel(rlevel)
}

/// Indented-code guard: content column above `rlevel + 3`.
pub fn code_block_level(alevel: usize, rlevel: usize) -> bool {
    alevel > rlevel + 3
}

/// Parse a sequence of blocks under the given reference level.
///
/// Recoverable failures (ATX heading bodies) are pushed onto `recovered` in
/// source order and the loop carries on; the loop itself only stops at end of
/// input or when content falls below the reference level.
pub fn blocks<'a>(
    input: Span<'a>,
    rlevel: usize,
    recovered: &mut Vec<Recovered>,
) -> MResult<'a, Vec<Block<Isp>>> {
    log::debug!(
        "Parsing blocks at reference level {}: {:?}",
        rlevel,
        crate::logic::logger::safe_preview(input.fragment(), 40)
    );

    let mut out = Vec::new();
    let mut input = input;
    loop {
        input = skip_whitespace(input);
        if input.fragment().is_empty() {
            break;
        }

        let alevel = column_of(&input);
        if alevel < rlevel {
            break;
        }

        if code_block_level(alevel, rlevel) {
            let (rest, block) = indented_code_block(input, rlevel)?;
            out.push(block);
            input = rest;
            continue;
        }

        // Ordinary alternatives, first match wins.
        if let Ok((rest, block)) = thematic_break(input) {
            out.push(block);
            input = rest;
            continue;
        }
        match atx_heading(input) {
            Ok((rest, Ok(block))) => {
                out.push(block);
                input = rest;
                continue;
            }
            Ok((rest, Err(err))) => {
                log::debug!("Recovered from heading error at {}", err.0);
                recovered.push(err);
                input = rest;
                continue;
            }
            Err(_) => {}
        }
        if let Ok((rest, block)) = fenced_code_block(input, alevel) {
            out.push(block);
            input = rest;
            continue;
        }
        if let Ok((rest, block)) = unordered_list(input, recovered) {
            out.push(block);
            input = rest;
            continue;
        }

        let (rest, block) = paragraph(input, rlevel)?;
        out.push(block);
        input = rest;
    }

    log::debug!("Parsed {} blocks", out.len());
    Ok((input, out))
}
