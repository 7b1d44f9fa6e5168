use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::Connection;
use scraper::Html;
use tracing::{info, warn};

use crate::db;
use crate::dedup::filter_new;
use crate::error::GeocodeError;
use crate::fetch::Fetch;
use crate::fields::Field;
use crate::geocode::{GeocodeCache, Geocoder};
use crate::notice::Notice;
use crate::parser::{detail::extract_detail, listing::extract_list};

/// Counts reported after a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub found: usize,
    pub new: usize,
    pub discarded: usize,
    pub geocode_skipped: usize,
    pub lookups: usize,
    pub cache_hits: usize,
    pub saved: usize,
}

impl RunStats {
    pub fn print(&self) {
        println!(
            "Found {} notices, {} new, {} empty discarded, {} not geocoded.",
            self.found, self.new, self.discarded, self.geocode_skipped,
        );
        println!(
            "Geocoding: {} lookups, {} cache hits.",
            self.lookups, self.cache_hits
        );
        println!("Saved {} notices.", self.saved);
    }
}

/// Owns everything one run needs: the page source, the geocode cache and the store.
pub struct Pipeline<F, G> {
    fetcher: F,
    geocoder: GeocodeCache<G>,
    conn: Connection,
    base_url: String,
}

impl<F: Fetch, G: Geocoder> Pipeline<F, G> {
    pub fn new(fetcher: F, geocoder: G, conn: Connection, base_url: impl Into<String>) -> Self {
        Pipeline {
            fetcher,
            geocoder: GeocodeCache::new(geocoder),
            conn,
            base_url: base_url.into(),
        }
    }

    /// Fetch failures and unknown labels abort the run before anything is
    /// saved. A notice that cannot be geocoded is left out and retried next run.
    pub fn run(&mut self) -> Result<RunStats> {
        let mut stats = RunStats::default();

        let listing_url = format!("{}?template=results", self.base_url);
        let listing = Html::parse_document(&self.fetcher.get(&listing_url)?);
        let notices: Vec<Notice> = extract_list(&listing, &self.base_url).collect();
        stats.found = notices.len();
        info!("Found {} notices", stats.found);

        let existing = db::existing_links(&self.conn)?;
        let new_notices = filter_new(notices, &existing);
        stats.new = new_notices.len();
        info!("There are {} new notices", stats.new);

        let built = self.build_notices(new_notices)?;
        let (built, stubs): (Vec<Notice>, Vec<Notice>) =
            built.into_iter().partition(|n| !n.is_stub());
        for stub in &stubs {
            warn!("No fields extracted from {}, discarding", stub.link);
        }
        stats.discarded = stubs.len();

        let mut located = Vec::with_capacity(built.len());
        for notice in built {
            match self.locate(notice) {
                Ok(notice) => located.push(notice),
                Err(e) => {
                    warn!("Skipping notice: {}", e);
                    stats.geocode_skipped += 1;
                }
            }
        }
        stats.lookups = self.geocoder.misses();
        stats.cache_hits = self.geocoder.hits();

        stats.saved = db::save_notices(&self.conn, &located)?;
        info!("Done");
        Ok(stats)
    }

    fn build_notices(&self, notices: Vec<Notice>) -> Result<Vec<Notice>> {
        let pb = ProgressBar::new(notices.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
                .progress_chars("=> "),
        );

        let mut built = Vec::with_capacity(notices.len());
        for mut notice in notices {
            let page = Html::parse_document(&self.fetcher.get(&notice.link)?);
            let details = extract_detail(&page, &notice.link)?;
            info!(
                "Extracting {}",
                details.get(&Field::Address).map(String::as_str).unwrap_or("")
            );
            notice.merge(details);
            built.push(notice);
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(built)
    }

    fn locate(&mut self, mut notice: Notice) -> Result<Notice, GeocodeError> {
        let address = notice
            .get(Field::Address)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| GeocodeError::MissingAddress(notice.link.clone()))?;
        notice.location = Some(self.geocoder.resolve(address)?);
        Ok(notice)
    }
}
