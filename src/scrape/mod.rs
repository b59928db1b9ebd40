// src/scrape/mod.rs
pub mod aggregate;
pub mod fetch;

pub use aggregate::{Aggregator, SearchResults, sort_by_separation};
pub use fetch::{Search, search};
