// src/lib.rs
//! Search the Transient Name Server and turn its result pages into four
//! linked record sets: sources, photometry, spectra and related files.
//!
//! ```no_run
//! use tns_scrape::{HttpClient, SearchQuery, SearchRequest, search};
//! use tns_scrape::config::options::FetchOptions;
//!
//! let opts = FetchOptions::default();
//! let client = HttpClient::new(opts.timeout)?;
//! let request = SearchRequest::new(SearchQuery::Name("2016asf".into()));
//! let results = search(&request, &opts, &client, None)?;
//! println!("{} sources", results.sources.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[macro_use]
pub mod macros;

pub mod astro;
pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod query;
pub mod specs;

pub mod csv;
pub mod data;
pub mod file;
pub mod log;
pub mod progress;
pub mod render;
pub mod scrape;

#[cfg(feature = "cli")]
pub mod cli;

pub use core::net::{Fetch, HttpClient};
pub use query::{SearchQuery, SearchRequest};
pub use scrape::{SearchResults, search};
