// src/scrape/fetch.rs
//! The page loop.
//!
//! Pages are fetched one at a time. A page holding a full batch of objects
//! means another page follows; anything shorter is the last one. Transport
//! trouble is retried a bounded number of times and then ends the search
//! with whatever was collected so far.

use std::thread;

use reqwest::Url;
use tracing::{debug, error, info, warn};

use super::aggregate::{Aggregator, SearchResults};
use crate::astro::{Axis, decimal_to_sexagesimal};
use crate::config::options::FetchOptions;
use crate::core::net::Fetch;
use crate::error::{FetchError, QueryError};
use crate::model::ResultPage;
use crate::progress::Progress;
use crate::query::{QueryBuilder, SearchRequest};
use crate::specs::{ExtractOptions, Grammar, Rows, count_rows, extract_block};

/// One search in flight. Owns its accumulators; nothing is shared between
/// searches.
pub struct Search<'a, F: Fetch + ?Sized> {
    builder: QueryBuilder,
    extract: ExtractOptions,
    options: &'a FetchOptions,
    fetcher: &'a F,
    grammar: &'a Grammar,
}

impl<'a, F: Fetch + ?Sized> Search<'a, F> {
    /// Validates the query; this is the only point where a search can fail.
    pub fn new(request: &SearchRequest, options: &'a FetchOptions, fetcher: &'a F) -> Result<Self, QueryError> {
        let builder = QueryBuilder::new(request.query.clone())?;
        let extract = ExtractOptions {
            centre: builder.centre(),
            include_comments: request.include_comments,
        };
        Ok(Self { builder, extract, options, fetcher, grammar: Grammar::current() })
    }

    /// Use a different page grammar.
    pub fn with_grammar(mut self, grammar: &'a Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    pub fn run(self, mut progress: Option<&mut dyn Progress>) -> SearchResults {
        let batch = self.options.batch_size.max(1);
        let mut agg = Aggregator::new();
        let mut page = 0usize;

        if let Some(p) = progress.as_deref_mut() {
            p.begin(&self.builder.query().to_string());
        }
        debug!(grammar = self.grammar.version, batch, "search started");
        if let Some(c) = self.extract.centre {
            debug!(
                ra = %decimal_to_sexagesimal(c.ra_deg, Axis::Ra),
                dec = %decimal_to_sexagesimal(c.dec_deg, Axis::Dec),
                "cone centre"
            );
        }

        loop {
            let url = self.builder.url(page, batch);
            let Some(result) = self.fetch_page(&url, page) else {
                error!(page, "could not get the search results from the TNS; returning what we have");
                break;
            };
            agg.page_fetched(&result.url);

            if result.body.contains(self.grammar.no_results) {
                info!(page = result.index, status = result.status, "no results found");
                if let Some(p) = progress.as_deref_mut() {
                    p.log("No results found");
                }
                break;
            }

            let count = count_rows(&result.body, self.grammar);
            for block in Rows::new(&result.body, self.grammar) {
                agg.push(extract_block(block, self.grammar, &self.extract));
            }
            info!(page = result.index, status = result.status, count, total = agg.source_count(), "page parsed");

            if count < batch {
                break;
            }
            page += 1;
            if let Some(p) = progress.as_deref_mut() {
                p.page_done(page, agg.source_count());
            }
            if !self.options.inter_page_delay.is_zero() {
                thread::sleep(self.options.inter_page_delay);
            }
        }

        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        agg.finish(self.builder.file_prefix())
    }

    /// One page, with retries. `None` once every attempt has failed.
    fn fetch_page(&self, url: &Url, index: usize) -> Option<ResultPage> {
        let attempts = self.options.max_retries.saturating_add(1);
        for attempt in 1..=attempts {
            let failure = match self.fetcher.get(url) {
                Ok(resp) if resp.status == 200 => {
                    return Some(ResultPage { index, status: resp.status, url: resp.url, body: resp.body });
                }
                Ok(resp) => FetchError::Status { status: resp.status, url: resp.url },
                Err(e) => e,
            };
            warn!(page = index, attempt, attempts, "{failure}");
            if attempt < attempts && !self.options.retry_delay.is_zero() {
                thread::sleep(self.options.retry_delay);
            }
        }
        None
    }
}

/// Run one search to completion.
pub fn search<F: Fetch + ?Sized>(
    request: &SearchRequest,
    options: &FetchOptions,
    fetcher: &F,
    progress: Option<&mut dyn Progress>,
) -> Result<SearchResults, QueryError> {
    Ok(Search::new(request, options, fetcher)?.run(progress))
}
