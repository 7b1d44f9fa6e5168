pub mod detail;
pub mod listing;

use scraper::ElementRef;

/// All descendant text of an element, concatenated in document order.
fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}
