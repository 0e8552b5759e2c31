// Two-phase parse driver: block phase, then one inline run per payload,
// collecting every error across both phases in document order

pub mod error;
pub mod position;

pub use error::{ParseError, ParseErrorKind};
pub use position::Position;

use crate::ast::{Block, Document, Inline, Isp};
use crate::grammar::blocks::{blocks, front_matter};
use crate::grammar::inlines::parse_payload;
use crate::grammar::shared::new_span;

/// Parse a complete MMark document.
///
/// `file_name` only labels error messages. The document is produced only
/// when no phase reported an error; otherwise the errors come back in
/// document order, and the vector is never empty.
pub fn parse(file_name: &str, input: &str) -> Result<Document, Vec<ParseError>> {
    log::info!("Starting parse of {:?}: {} bytes", file_name, input.len());

    let span = new_span(input);
    let matter = front_matter(span);

    let mut collected: Vec<(Position, ParseErrorKind)> = Vec::new();
    if let Some(err) = matter.error {
        collected.push(err);
    }

    let mut recovered = Vec::new();
    let stream = match blocks(matter.rest, 1, &mut recovered) {
        Ok((_, stream)) => stream,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            // The block phase could not proceed at all; nothing to salvage.
            return Err(vec![ParseError::new(file_name, e.position(), e.kind())]);
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(vec![ParseError::new(
                file_name,
                Position::new(1, 1),
                ParseErrorKind::Unexpected {
                    found: "incomplete input".into(),
                    expected: Vec::new(),
                },
            )]);
        }
    };
    collected.extend(recovered);

    // Inline phase: each payload parses independently so one bad block does
    // not silence the rest.
    let mut inline_errors: Vec<(Position, ParseErrorKind)> = Vec::new();
    let parsed: Vec<Block<Vec<Inline>>> = stream
        .into_iter()
        .map(|block| {
            block.map_payloads(&mut |isp: Isp| match run_payload(&isp) {
                Ok(inlines) => inlines,
                Err(err) => {
                    inline_errors.push(err);
                    Vec::new()
                }
            })
        })
        .collect();
    collected.extend(inline_errors);

    // Stable by position: block-phase and inline-phase reports interleave in
    // document order.
    collected.sort_by_key(|(position, _)| *position);

    if collected.is_empty() {
        log::info!("Parsed document with {} blocks", parsed.len());
        Ok(Document::new(matter.yaml, parsed))
    } else {
        log::info!("Parse produced {} errors", collected.len());
        Err(collected
            .into_iter()
            .map(|(position, kind)| ParseError::new(file_name, position, kind))
            .collect())
    }
}

// One inline run over a payload, with positions mapped back into the
// document and EOF reports relabelled.
fn run_payload(isp: &Isp) -> Result<Vec<Inline>, (Position, ParseErrorKind)> {
    match parse_payload(&isp.text) {
        Ok(inlines) => Ok(inlines),
        Err(e) => {
            let e = e.with_eof_label("end of inline block");
            Err((isp.position.within_payload(e.position()), e.kind()))
        }
    }
}
