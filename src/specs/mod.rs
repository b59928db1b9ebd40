// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! This module hosts the **page-specific parsing** for the registry's search
//! results page. It encodes *where the ground truth lives in the HTML* and
//! *how to extract it robustly*.
//!
//! ## What lives here
//! - **The page grammar** (`grammar`): every pattern the extractors use,
//!   declared once and versioned.
//! - **Segmentation** (`rows`): one borrowed block per object, found by
//!   anchor lines.
//! - **Field extraction** per block: `discovery` (the object row),
//!   `photometry` ("AT reports"), `spectra` ("Classification reports") and
//!   `files` (attachments, linked once per section).
//!
//! ## What does **not** live here
//! - **Fetching and paging** – `scrape::fetch` decides when to ask for the
//!   next page.
//! - **Accumulation and ordering** – `scrape::aggregate`.
//! - **Export formatting** – `data`, `render` and `file`.
//!
//! ## Typical call chain
//! ```text
//! scrape::fetch → specs::rows::Rows (per page)
//!              ↘ specs::extract_block (per block)
//!                   → discovery, photometry, spectra, files
//!              ↘ scrape::aggregate
//! ```
//!
//! ## Conventions & invariants
//! - A block that does not look like an object row is **skipped**, never an
//!   error (`BlockOutcome::Skipped`).
//! - Empty cells become `None`; a redshift of exactly 0 becomes `None`.
//! - Every child record carries the `tns_id` of the block it came from.
//! - Remarks and comments are only kept when asked for.
//!
//! ## Testing notes
//! - Everything here is pure and testable **offline** against inline HTML or
//!   the captured pages under `tests/fixtures/`.
//!
//! In short: **`specs` knows how to read the page.** Other layers decide when
//! to fetch, how to order, and how to present/export.
pub mod discovery;
pub mod files;
pub mod grammar;
pub mod photometry;
pub mod rows;
pub mod spectra;

pub use grammar::Grammar;
pub use rows::{Rows, count_rows};

use tracing::info;

use crate::model::{BlockOutcome, ObjectRecords};
use crate::query::ConeCentre;

/// Per-search switches the extractors need.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExtractOptions {
    /// Query centre; present for cone searches only.
    pub centre: Option<ConeCentre>,
    pub include_comments: bool,
}

/// Log the columns a matched row left empty and return their names.
pub(crate) fn note_missing<'a>(tns_id: &str, table: &str, fields: &[(&'a str, bool)]) -> Vec<&'a str> {
    let missing: Vec<&str> = fields
        .iter()
        .filter_map(|(name, absent)| absent.then_some(*name))
        .collect();
    if !missing.is_empty() {
        info!(tns_id, table, ?missing, "fields not found in the source data");
    }
    missing
}

/// All records for one object block.
pub fn extract_block(block: &str, grammar: &Grammar, opts: &ExtractOptions) -> BlockOutcome {
    let source = match discovery::extract(block, grammar, opts.centre) {
        Ok(s) => s,
        Err(reason) => return BlockOutcome::Skipped(reason),
    };
    let tns_id = source.tns_id.clone();

    let (photometry, mut files) = photometry::extract(block, grammar, &tns_id, opts.include_comments);
    let (spectra, spec_files) = spectra::extract(block, grammar, &tns_id, opts.include_comments);
    files.extend(spec_files);

    BlockOutcome::Parsed(Box::new(ObjectRecords { source, photometry, spectra, files }))
}
