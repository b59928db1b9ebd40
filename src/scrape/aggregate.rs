// src/scrape/aggregate.rs
use tracing::{debug, warn};

use crate::error::SkipReason;
use crate::model::{
    BlockOutcome, PhotometryRecord, RelatedFileRecord, SourceRecord, SpectrumRecord,
};

/// The outcome of one search: four record sets linked by `tns_id`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResults {
    pub sources: Vec<SourceRecord>,
    pub photometry: Vec<PhotometryRecord>,
    pub spectra: Vec<SpectrumRecord>,
    pub files: Vec<RelatedFileRecord>,
    /// Last request URL as resolved by the server.
    pub url: Option<String>,
    /// Pages fetched successfully.
    pub pages: usize,
    /// Blocks that did not yield a source, in page order.
    pub skipped: Vec<SkipReason>,
    /// Filename prefix for exports of this search.
    pub file_prefix: String,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool { self.sources.is_empty() }
}

/// Accumulates records across pages. One per search.
#[derive(Default)]
pub struct Aggregator {
    results: SearchResults,
}

impl Aggregator {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, outcome: BlockOutcome) {
        match outcome {
            BlockOutcome::Parsed(obj) => {
                let obj = *obj;
                self.results.sources.push(obj.source);
                self.results.photometry.extend(obj.photometry);
                self.results.spectra.extend(obj.spectra);
                self.results.files.extend(obj.files);
            }
            BlockOutcome::Skipped(reason) => {
                warn!(%reason, "skipping object block");
                self.results.skipped.push(reason);
            }
        }
    }

    pub fn page_fetched(&mut self, url: &str) {
        self.results.pages += 1;
        self.results.url = Some(s!(url));
    }

    pub fn source_count(&self) -> usize { self.results.sources.len() }

    /// Close the search: order sources by distance from the cone centre.
    pub fn finish(mut self, file_prefix: String) -> SearchResults {
        if !sort_by_separation(&mut self.results.sources) {
            debug!("sources lack separations; keeping discovery order");
        }
        self.results.file_prefix = file_prefix;
        self.results
    }
}

/// Stable ascending sort by `separation_arcsec`. Leaves the order untouched
/// and returns `false` if any source has no separation.
pub fn sort_by_separation(sources: &mut [SourceRecord]) -> bool {
    if sources.iter().any(|s| s.separation_arcsec.is_none()) {
        return false;
    }
    sources.sort_by(|a, b| {
        let (a, b) = (a.separation_arcsec.unwrap_or(0.0), b.separation_arcsec.unwrap_or(0.0));
        a.total_cmp(&b)
    });
    true
}
