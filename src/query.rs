// src/query.rs
//! One bounded search against the registry, and the request it becomes.
//!
//! A [`SearchQuery`] is exactly one of a cone, a name, or a recent-discovery
//! window. [`QueryBuilder`] validates it once and then produces the full GET
//! parameter list for any page. The display flags are always requested so
//! every page carries the same columns.

use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;
use reqwest::Url;

use crate::astro::{Axis, parse_coordinate};
use crate::config::consts::{ORIGIN, SEARCH_PATH};
use crate::core::sanitize::sanitize_filename;
use crate::error::QueryError;

/// Columns the results table must show; the extractors depend on them.
const DISPLAY_COLUMNS: [&str; 12] = [
    "redshift",
    "hostname",
    "host_redshift",
    "source_group_name",
    "internal_name",
    "spectra_count",
    "discoverymag",
    "discmagfilter",
    "discoverydate",
    "discoverer",
    "sources",
    "bibcode",
];

static SEARCH_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse(&join!(ORIGIN, SEARCH_PATH)).expect("search URL is valid")
});

static REGISTRY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((SN|AT) ?)?(\d{4}\w{1,6})").expect("registry name pattern compiles")
});

#[derive(Clone, Debug, PartialEq)]
pub enum SearchQuery {
    /// Cone around a position. Coordinates are sexagesimal or decimal degrees
    /// and are sent upstream exactly as typed.
    Cone { ra: String, dec: String, radius_arcsec: f64 },
    /// Registry name (`SN2016asf`, `2016asf`) or a survey-internal name.
    Name(String),
    /// Everything discovered in the last `days` days.
    Recent { days: u32 },
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchQuery::Cone { ra, dec, radius_arcsec } => {
                write!(f, "cone search at {ra} {dec}, radius {radius_arcsec}\"")
            }
            SearchQuery::Name(n) => write!(f, "name search for {n}"),
            SearchQuery::Recent { days } => write!(f, "objects discovered in the last {days} day(s)"),
        }
    }
}

/// A query plus the options that shape its output.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchRequest {
    pub query: SearchQuery,
    pub include_comments: bool,
}

impl SearchRequest {
    pub fn new(query: SearchQuery) -> Self {
        Self { query, include_comments: false }
    }

    pub fn with_comments(mut self, yes: bool) -> Self {
        self.include_comments = yes;
        self
    }
}

/// How a name query is sent upstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameKind {
    /// Canonical registry designation, prefix removed (`2016asf`).
    Registry(String),
    /// Anything else, e.g. `Gaia16bbi`, `ASASSN-16cs`.
    Internal(String),
}

pub fn classify_name(name: &str) -> NameKind {
    match REGISTRY_NAME.captures(name).and_then(|c| c.get(3)) {
        Some(m) => NameKind::Registry(m.as_str().to_string()),
        None => NameKind::Internal(name.to_string()),
    }
}

/// Query centre in decimal degrees, kept for separations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConeCentre {
    pub ra_deg: f64,
    pub dec_deg: f64,
}

#[derive(Clone, Debug)]
pub struct QueryBuilder {
    query: SearchQuery,
    centre: Option<ConeCentre>,
    name: Option<NameKind>,
}

impl QueryBuilder {
    /// Validate the query. The only place a search can fail.
    pub fn new(query: SearchQuery) -> Result<Self, QueryError> {
        let mut centre = None;
        let mut name = None;
        match &query {
            SearchQuery::Cone { ra, dec, radius_arcsec } => {
                let ra_deg = parse_coordinate(ra, Axis::Ra)?;
                let dec_deg = parse_coordinate(dec, Axis::Dec)?;
                if !(radius_arcsec.is_finite() && *radius_arcsec > 0.0) {
                    return Err(QueryError::InvalidRadius(*radius_arcsec));
                }
                centre = Some(ConeCentre { ra_deg, dec_deg });
            }
            SearchQuery::Name(n) => {
                let n = n.trim();
                if n.is_empty() {
                    return Err(QueryError::EmptyName);
                }
                name = Some(classify_name(n));
            }
            SearchQuery::Recent { days } => {
                if *days == 0 {
                    return Err(QueryError::InvalidWindow(*days));
                }
            }
        }
        Ok(Self { query, centre, name })
    }

    pub fn query(&self) -> &SearchQuery { &self.query }

    /// Decimal centre for cone queries, `None` otherwise.
    pub fn centre(&self) -> Option<ConeCentre> { self.centre }

    /// Full parameter list for one page, in a fixed order. Unused search
    /// keys are sent empty, as the search form does.
    pub fn params(&self, page: usize, batch_size: usize) -> Vec<(String, String)> {
        let (mut ra, mut decl, mut radius) = (String::new(), String::new(), String::new());
        let (mut name, mut internal) = (String::new(), String::new());
        let (mut units, mut period) = (String::new(), String::new());

        match &self.query {
            SearchQuery::Cone { ra: r, dec: d, radius_arcsec } => {
                ra = r.trim().to_string();
                decl = d.trim().to_string();
                radius = radius_arcsec.to_string();
            }
            SearchQuery::Name(_) => match &self.name {
                Some(NameKind::Registry(n)) => name = n.clone(),
                Some(NameKind::Internal(n)) => internal = n.clone(),
                None => {}
            },
            SearchQuery::Recent { days } => {
                units = s!("days");
                period = days.to_string();
            }
        }

        let mut params = vec![
            (s!("page"), page.to_string()),
            (s!("ra"), ra),
            (s!("decl"), decl),
            (s!("radius"), radius),
            (s!("name"), name),
            (s!("internal_name"), internal),
            (s!("discovered_period_units"), units),
            (s!("discovered_period_value"), period),
            (s!("num_page"), batch_size.to_string()),
        ];
        params.extend(DISPLAY_COLUMNS.iter().map(|c| (format!("display[{c}]"), s!("1"))));
        params
    }

    pub fn url(&self, page: usize, batch_size: usize) -> Url {
        let mut url = SEARCH_URL.clone();
        url.query_pairs_mut().extend_pairs(self.params(page, batch_size));
        url
    }

    /// Export filename prefix, e.g. `2016asf_tns_conesearch_`.
    pub fn file_prefix(&self) -> String {
        let now = Local::now();
        match (&self.query, &self.name) {
            (SearchQuery::Cone { .. }, _) => {
                now.format("%Y%m%dt%H%M%S%6f_tns_conesearch_").to_string()
            }
            (SearchQuery::Name(_), Some(NameKind::Registry(n) | NameKind::Internal(n))) => {
                format!("{}_tns_conesearch_", sanitize_filename(n))
            }
            (SearchQuery::Name(n), None) => format!("{}_tns_conesearch_", sanitize_filename(n)),
            (SearchQuery::Recent { days }, _) => {
                format!("{days}d_since_{}_tns_conesearch_", now.format("%Y%m%d"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(params: &'a [(String, String)], key: &str) -> &'a str {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or_else(|| panic!("missing {key}"))
    }

    #[test]
    fn registry_names_lose_their_prefix() {
        assert_eq!(classify_name("SN2016asf"), NameKind::Registry(s!("2016asf")));
        assert_eq!(classify_name("AT 2019abc"), NameKind::Registry(s!("2019abc")));
        assert_eq!(classify_name("2016asf"), NameKind::Registry(s!("2016asf")));
        assert_eq!(classify_name("Gaia16bbi"), NameKind::Internal(s!("Gaia16bbi")));
        assert_eq!(classify_name("ASASSN-16cs"), NameKind::Internal(s!("ASASSN-16cs")));
    }

    #[test]
    fn cone_params_carry_coordinates_as_typed() {
        let b = QueryBuilder::new(SearchQuery::Cone {
            ra: s!("06:50:36.74"),
            dec: s!("+31:06:44.7"),
            radius_arcsec: 5.0,
        })
        .unwrap();
        let p = b.params(0, 500);
        assert_eq!(get(&p, "page"), "0");
        assert_eq!(get(&p, "ra"), "06:50:36.74");
        assert_eq!(get(&p, "decl"), "+31:06:44.7");
        assert_eq!(get(&p, "radius"), "5");
        assert_eq!(get(&p, "name"), "");
        assert_eq!(get(&p, "num_page"), "500");
        assert_eq!(get(&p, "display[bibcode]"), "1");
        assert_eq!(p.len(), 9 + DISPLAY_COLUMNS.len());

        let c = b.centre().unwrap();
        assert!((c.ra_deg - 102.653083).abs() < 1e-4);
    }

    #[test]
    fn name_and_window_params() {
        let b = QueryBuilder::new(SearchQuery::Name(s!("SN2016asf"))).unwrap();
        let p = b.params(2, 50);
        assert_eq!(get(&p, "name"), "2016asf");
        assert_eq!(get(&p, "internal_name"), "");
        assert_eq!(get(&p, "page"), "2");

        let b = QueryBuilder::new(SearchQuery::Name(s!("Gaia16bbi"))).unwrap();
        let p = b.params(0, 50);
        assert_eq!(get(&p, "name"), "");
        assert_eq!(get(&p, "internal_name"), "Gaia16bbi");

        let b = QueryBuilder::new(SearchQuery::Recent { days: 3 }).unwrap();
        let p = b.params(0, 500);
        assert_eq!(get(&p, "discovered_period_units"), "days");
        assert_eq!(get(&p, "discovered_period_value"), "3");
        assert!(b.centre().is_none());
    }

    #[test]
    fn url_encodes_display_flags() {
        let b = QueryBuilder::new(SearchQuery::Name(s!("2016asf"))).unwrap();
        let url = b.url(0, 500).to_string();
        assert!(url.starts_with("https://www.wis-tns.org/search?page=0&"), "{url}");
        assert!(url.contains("name=2016asf"), "{url}");
        assert!(url.contains("display%5Bredshift%5D=1"), "{url}");
    }

    #[test]
    fn misuse_is_rejected() {
        assert!(matches!(
            QueryBuilder::new(SearchQuery::Name(s!("   "))),
            Err(QueryError::EmptyName)
        ));
        assert!(matches!(
            QueryBuilder::new(SearchQuery::Recent { days: 0 }),
            Err(QueryError::InvalidWindow(0))
        ));
        assert!(matches!(
            QueryBuilder::new(SearchQuery::Cone {
                ra: s!("06:50:36.74"),
                dec: s!("+31:06:44.7"),
                radius_arcsec: 0.0,
            }),
            Err(QueryError::InvalidRadius(_))
        ));
        assert!(matches!(
            QueryBuilder::new(SearchQuery::Cone {
                ra: s!("here"),
                dec: s!("+31:06:44.7"),
                radius_arcsec: 5.0,
            }),
            Err(QueryError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn file_prefixes_follow_query_mode() {
        let b = QueryBuilder::new(SearchQuery::Name(s!("SN2016asf"))).unwrap();
        assert_eq!(b.file_prefix(), "2016asf_tns_conesearch_");

        let b = QueryBuilder::new(SearchQuery::Recent { days: 7 }).unwrap();
        let p = b.file_prefix();
        assert!(p.starts_with("7d_since_") && p.ends_with("_tns_conesearch_"), "{p}");

        let b = QueryBuilder::new(SearchQuery::Cone {
            ra: s!("102.65"),
            dec: s!("31.1"),
            radius_arcsec: 3.0,
        })
        .unwrap();
        let p = b.file_prefix();
        // 8 date digits, 't', 6 time digits, 6 fraction digits
        assert_eq!(p.find('_'), Some(21), "{p}");
        assert_eq!(&p[8..9], "t");
    }
}
