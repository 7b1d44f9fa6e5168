use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;

use super::text_of;
use crate::notice::Notice;

static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.contentInfo div.table-container tbody tr").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Yield a bare `Notice` per listing row, top to bottom.
///
/// The row's first link is appended verbatim to `base_url`; rows without one
/// (spacers, "no results" rows) are skipped.
pub fn extract_list<'a>(doc: &'a Html, base_url: &'a str) -> impl Iterator<Item = Notice> + 'a {
    doc.select(&ROW).filter_map(move |row| {
        let href = row
            .select(&ANCHOR)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::trim);

        match href {
            Some(href) => Some(Notice::new(format!("{}{}", base_url, href))),
            None => {
                debug!("Skipping listing row without link: {:?}", text_of(row).trim());
                None
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://www.foodauthority.nsw.gov.au/penalty-notices/default.aspx";

    fn fixture(name: &str) -> Html {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap();
        Html::parse_document(&html)
    }

    #[test]
    fn links_in_document_order() {
        let doc = fixture("listing");
        let links: Vec<String> = extract_list(&doc, BASE).map(|n| n.link).collect();
        assert_eq!(
            links,
            [
                format!("{}?template=detail&data=data&itemId=3013474838", BASE),
                format!("{}?template=detail&data=data&itemId=3013474839", BASE),
                format!("{}?template=detail&data=data&itemId=3013474901", BASE),
            ]
        );
    }

    #[test]
    fn notices_start_as_stubs() {
        let doc = fixture("listing");
        assert!(extract_list(&doc, BASE).all(|n| n.is_stub() && n.location.is_none()));
    }

    #[test]
    fn ignores_links_outside_the_table() {
        let doc = Html::parse_document(
            r#"<div class="contentInfo"><a href="/elsewhere">x</a>
               <div class="table-container"><table><tbody></tbody></table></div></div>"#,
        );
        assert_eq!(extract_list(&doc, BASE).count(), 0);
    }
}
