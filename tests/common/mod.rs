// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use reqwest::Url;
use tns_scrape::config::options::FetchOptions;
use tns_scrape::core::net::{Fetch, HttpResponse};
use tns_scrape::error::FetchError;

pub const CONE_PAGE: &str = include_str!("../fixtures/cone_2016asf.html");

pub const END_MARKER: &str = "<!-- /.section, /#content -->";

/// Serves canned replies in order and remembers what was asked for.
pub struct ScriptedFetch {
    replies: RefCell<VecDeque<Result<HttpResponse, FetchError>>>,
    pub asked: RefCell<Vec<Url>>,
}

impl ScriptedFetch {
    pub fn new(replies: Vec<Result<HttpResponse, FetchError>>) -> Self {
        Self { replies: RefCell::new(replies.into()), asked: RefCell::new(Vec::new()) }
    }

    pub fn pages(bodies: &[String]) -> Self {
        Self::new(bodies.iter().map(|b| ok(b)).collect())
    }

    pub fn requests(&self) -> usize {
        self.asked.borrow().len()
    }

    /// Value of a query parameter on the n-th request.
    pub fn param(&self, n: usize, key: &str) -> Option<String> {
        self.asked.borrow()[n]
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

impl Fetch for ScriptedFetch {
    fn get(&self, url: &Url) -> Result<HttpResponse, FetchError> {
        self.asked.borrow_mut().push(url.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Client("no more scripted replies".into())))
    }
}

pub fn ok(body: &str) -> Result<HttpResponse, FetchError> {
    Ok(HttpResponse {
        status: 200,
        body: body.to_string(),
        url: "https://www.wis-tns.org/search?page=0".to_string(),
    })
}

pub fn status(code: u16) -> Result<HttpResponse, FetchError> {
    Ok(HttpResponse { status: code, body: String::new(), url: "https://www.wis-tns.org/search".to_string() })
}

pub fn options(batch_size: usize) -> FetchOptions {
    FetchOptions { batch_size, ..FetchOptions::immediate() }
}

/// A discovery row with no reports beneath it.
pub fn object_row(name: &str, ra: &str, dec: &str) -> String {
    format!(
        concat!(
            r#"<tr class="row-odd public odd"><td class="cell-id">1</td>"#,
            r#"<td class="cell-name"><a href="/object/{name}">{name}</a></td><td class="cell-reps">1</td>"#,
            r#"<td class="cell-ra">{ra}</td><td class="cell-decl">{dec}</td>"#,
            r#"<td class="cell-ot_name"></td><td class="cell-redshift"></td>"#,
            r#"<td class="cell-hostname"></td><td class="cell-host_redshift"></td>"#,
            r#"<td class="cell-reporting_group_name">ZTF</td><td class="cell-source_group_name">ZTF</td>"#,
            r#"<td class="cell-classifying_source_group_name"></td>"#,
            r#"<td class="cell-internal_name">ZTF{name}</td><td class="cell-spectra_count">0</td>"#,
            r#"<td class="cell-discoverymag">19.2</td><td class="cell-disc_filter_name">r-ZTF</td>"#,
            r#"<td class="cell-discoverydate">2020-01-01 00:00:00</td><td class="cell-discoverer">ALeRCE</td>"#,
            r#"<td class="cell-sources"></td></tr>"#,
        ),
        name = name,
        ra = ra,
        dec = dec,
    )
}

/// An object anchor whose row does not look like a discovery row.
pub fn broken_row(name: &str) -> String {
    format!(r#"<tr class="row-even"><td class="cell-name"><a href="/object/{name}">{name}</a></td></tr>"#)
}

/// Wrap rows in page chrome, with the end-of-results marker.
pub fn results_page(rows: &[String]) -> String {
    format!(
        "<html><body><div id=\"content\"><table class=\"results-table\"><tbody>\n{}\n</tbody></table>\n{END_MARKER}\n</div></body></html>\n",
        rows.join("\n"),
    )
}

pub fn no_results_page() -> String {
    "<html><body><div class=\"empty\">No results found</div></body></html>".to_string()
}
