// Unordered list grammar
//
// Items open with `*` followed by at least one horizontal whitespace. The
// item's reference level is the column where its content begins; the item
// body is a full recursive block parse under that level. Consecutive markers
// at the first marker's column extend the list.
//
// TODO: ordered-list and blockquote markers are deliberately absent until
// those constructs land; `1.` and `>` lines read as paragraphs.

use nom::Input;

use super::{blocks, Recovered};
use crate::ast::{Block, Isp};
use crate::grammar::error::{MResult, MmarkError};
use crate::grammar::shared::{column_of, skip_hspace, skip_whitespace, Span};

/// Parse an unordered list: one or more consecutive `*` items.
pub fn unordered_list<'a>(
    input: Span<'a>,
    recovered: &mut Vec<Recovered>,
) -> MResult<'a, Block<Isp>> {
    let marker_column = column_of(&input);
    let (mut cursor, first) = list_item(input, recovered)?;
    log::debug!("Parsed first list item at column {marker_column}");

    let mut items = vec![first];
    loop {
        let probe = skip_whitespace(cursor);
        if probe.fragment().is_empty() || column_of(&probe) != marker_column {
            break;
        }
        match list_item(probe, recovered) {
            Ok((rest, item)) => {
                items.push(item);
                cursor = rest;
            }
            Err(_) => break,
        }
    }

    log::debug!("List parsing complete, {} items", items.len());
    Ok((cursor, Block::UnorderedList(items)))
}

// A single item: the marker, then blocks under the content column.
fn list_item<'a>(
    input: Span<'a>,
    recovered: &mut Vec<Recovered>,
) -> MResult<'a, Vec<Block<Isp>>> {
    if !input.fragment().starts_with('*') {
        return MmarkError::expecting(input, "list item").into_err();
    }
    let after_marker = input.take_from(1);
    let content = skip_hspace(after_marker);
    if content.location_offset() == after_marker.location_offset() {
        // `*` without trailing whitespace is not a marker.
        return MmarkError::expecting(after_marker, "white space").into_err();
    }

    let item_level = column_of(&content);
    let (rest, item_blocks) = blocks(content, item_level, recovered)?;
    Ok((rest, item_blocks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::shared::new_span;

    fn list(input: &str) -> Vec<Vec<Block<Isp>>> {
        let mut recovered = Vec::new();
        let (_, block) =
            unordered_list(new_span(input), &mut recovered).expect("not an unordered list");
        match block {
            Block::UnorderedList(items) => items,
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn smoke_test_single_item() {
        let items = list("* one\n");
        assert_eq!(items.len(), 1);
        assert!(matches!(&items[0][0], Block::Paragraph(isp) if isp.text == "one"));
    }

    #[test]
    fn smoke_test_three_items() {
        let items = list("* one\n* two\n* three\n");
        assert_eq!(items.len(), 3);
        assert!(matches!(&items[2][0], Block::Paragraph(isp) if isp.text == "three"));
    }

    #[test]
    fn smoke_test_multiline_item() {
        let items = list("* one\n  still one\n* two\n");
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0][0], Block::Paragraph(isp) if isp.text == "one\nstill one"));
    }

    #[test]
    fn smoke_test_nested_list() {
        let items = list("* outer\n\n  * inner\n");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].len(), 2);
        assert!(matches!(&items[0][1], Block::UnorderedList(inner) if inner.len() == 1));
    }

    #[test]
    fn smoke_test_item_with_heading() {
        let items = list("* # title\n");
        assert!(matches!(items[0][0], Block::Heading { level: 1, .. }));
    }

    #[test]
    fn smoke_test_marker_needs_whitespace() {
        let mut recovered = Vec::new();
        assert!(unordered_list(new_span("*word\n"), &mut recovered).is_err());
    }

    #[test]
    fn smoke_test_blank_line_between_items() {
        let items = list("* one\n\n* two\n");
        assert_eq!(items.len(), 2);
    }
}
