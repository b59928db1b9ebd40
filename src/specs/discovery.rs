// src/specs/discovery.rs
//! The top row of an object block: identity, position and discovery details.

use super::grammar::Grammar;
use super::note_missing;
use crate::astro::{Axis, parse_coordinate, separation};
use crate::config::consts::ORIGIN;
use crate::core::sanitize::{normalize_ws, parse_number, parse_redshift, truncate_chars};
use crate::error::SkipReason;
use crate::model::SourceRecord;
use crate::query::ConeCentre;

/// Registry designation → `(tns_name, tns_id)`.
///
/// Bare designations get the `SN` prefix the registry used to print, spaces
/// are dropped, and the id is the name without its `SN`/`AT` prefix:
/// `"2016asf"` → `("SN2016asf", "2016asf")`, `"AT 2019abc"` →
/// `("AT2019abc", "2019abc")`.
pub fn registry_ids(raw: &str) -> (String, String) {
    let mut name: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "SN");
    }
    let id = name
        .strip_prefix("SN")
        .or_else(|| name.strip_prefix("AT"))
        .unwrap_or(&name)
        .to_string();
    (name, id)
}

pub fn extract(block: &str, grammar: &Grammar, centre: Option<ConeCentre>) -> Result<SourceRecord, SkipReason> {
    let Some(caps) = grammar.discovery.captures(block) else {
        return Err(SkipReason::DiscoveryMismatch { snippet: snippet(block) });
    };
    let cell = |name: &str| cell!(caps, name);

    let Some(raw_name) = cell("TNSName") else {
        return Err(SkipReason::DiscoveryMismatch { snippet: snippet(block) });
    };
    let (tns_name, tns_id) = registry_ids(&raw_name);

    let bad_coords = || SkipReason::BadCoordinates { tns_name: tns_name.clone() };
    let ra_sex = cell("raSex").ok_or_else(bad_coords)?;
    let dec_sex = cell("decSex").ok_or_else(bad_coords)?;
    let ra_deg = parse_coordinate(&ra_sex, Axis::Ra).map_err(|_| bad_coords())?;
    let dec_deg = parse_coordinate(&dec_sex, Axis::Dec).map_err(|_| bad_coords())?;

    let object_url = join!(ORIGIN, caps.name("objectUrl").map_or("", |m| m.as_str().trim()));

    let mut record = SourceRecord {
        tns_id,
        tns_name,
        discovery_name: cell("discoveryName"),
        disc_survey: cell("discSurvey").or_else(|| cell("sender")),
        ra_sex,
        dec_sex,
        ra_deg,
        dec_deg,
        trans_redshift: parse_redshift(cell("transRedshift").as_deref()),
        spec_type: cell("specType"),
        disc_mag: parse_number(cell("discMag").as_deref()),
        disc_mag_filter: cell("discMagFilter"),
        disc_date: cell("discDate"),
        object_url,
        host_name: cell("hostName"),
        host_redshift: parse_redshift(cell("hostRedshift").as_deref()),
        reporting_survey: cell("reportingSurvey"),
        ..SourceRecord::default()
    };

    if let Some(c) = centre {
        let sep = separation(c.ra_deg, c.dec_deg, record.ra_deg, record.dec_deg);
        record.separation_arcsec = Some(sep.arcsec);
        record.separation_north_arcsec = Some(sep.north_arcsec);
        record.separation_east_arcsec = Some(sep.east_arcsec);
    }

    note_missing(&record.tns_id, "sources", &[
        ("discoveryName", record.discovery_name.is_none()),
        ("discSurvey", record.disc_survey.is_none()),
        ("specType", record.spec_type.is_none()),
        ("discMag", record.disc_mag.is_none()),
        ("discDate", record.disc_date.is_none()),
        ("hostName", record.host_name.is_none()),
    ]);

    Ok(record)
}

fn snippet(block: &str) -> String {
    truncate_chars(&normalize_ws(block), 120)
}
