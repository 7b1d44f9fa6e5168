use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::text_of;
use crate::error::ExtractError;
use crate::fields::{map_label, Field};
use crate::text::scrub;

static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.contentInfo table tbody tr").unwrap());

/// Walk the detail table's cells as (label, value) pairs.
///
/// Cells are taken across all rows in document order, so a label and its
/// value may sit in separate rows. `url` is only used for error reporting.
pub fn extract_detail(doc: &Html, url: &str) -> Result<BTreeMap<Field, String>, ExtractError> {
    let cells: Vec<ElementRef> = doc
        .select(&ROW)
        .flat_map(|row| row.children().filter_map(ElementRef::wrap))
        .collect();

    if cells.len() % 2 != 0 {
        return Err(ExtractError::UnpairedCell {
            url: url.to_string(),
            cells: cells.len(),
        });
    }

    let mut details = BTreeMap::new();
    for pair in cells.chunks_exact(2) {
        let field = map_label(&text_of(pair[0])).map_err(|e| ExtractError::UnknownField {
            label: e.label,
            url: url.to_string(),
        })?;
        details.insert(field, scrub(&text_of(pair[1])));
    }

    Ok(details)
}
