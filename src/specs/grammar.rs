// src/specs/grammar.rs
//! The search-results page format, declared in one place.
//!
//! The registry renders results as one very wide table row per object with
//! the object's reports nested beneath it. Each pattern below matches one
//! construct of that markup. Most of them deliberately do *not* cross line
//! breaks: the server emits every discovery row, report header and
//! measurement row on a single line, and that is what keeps lazy matching
//! from running into the neighbouring row.
//!
//! Extractors take a `&Grammar` rather than reaching for statics so a
//! changed page layout can be handled by declaring a new grammar.

use std::sync::LazyLock;

use regex::Regex;

pub struct Grammar {
    /// Bumped whenever a pattern changes meaning.
    pub version: &'static str,
    /// Literal that starts every object block.
    pub object_anchor: &'static str,
    /// Literal that closes the results section.
    pub end_marker: &'static str,
    /// Literal the server prints instead of a results table.
    pub no_results: &'static str,

    pub discovery: Regex,
    pub at_section: Regex,
    pub classification_section: Regex,
    pub phot_report: Regex,
    pub phot_header: Regex,
    pub phot_row: Regex,
    pub related_file: Regex,
    pub spec_report: Regex,
    pub spec_header: Regex,
    pub spec_row: Regex,
}

static TNS_SEARCH_V1: LazyLock<Grammar> =
    LazyLock::new(|| Grammar::tns_search_v1().expect("built-in page grammar compiles"));

impl Grammar {
    /// The grammar for the live site.
    pub fn current() -> &'static Grammar {
        &TNS_SEARCH_V1
    }

    pub fn tns_search_v1() -> Result<Grammar, regex::Error> {
        Ok(Grammar {
            version: "tns-search/1",
            object_anchor: r#"<a href="/object/"#,
            end_marker: "<!-- /.section, /#content -->",
            no_results: "No results found",

            discovery: Regex::new(concat!(
                r#"<tr class="row-.*?"><td class="cell-id">(?P<tnsId>\d*?)</td>"#,
                r#"<td class="cell-name"><a href="(?P<objectUrl>.*?)">(?P<TNSName>.*?)</a></td>"#,
                r#"<td class="cell-.*?<td class="cell-ra">(?P<raSex>.*?)</td>"#,
                r#"<td class="cell-decl">(?P<decSex>.*?)</td>"#,
                r#"<td class="cell-ot_name">(?P<specType>.*?)</td>"#,
                r#"<td class="cell-redshift">(?P<transRedshift>.*?)</td>"#,
                r#"<td class="cell-hostname">(?P<hostName>.*?)</td>"#,
                r#"<td class="cell-host_redshift">(?P<hostRedshift>.*?)</td>"#,
                r#"<td class="cell-reporting_group_name">(?P<reportingSurvey>.*?)</td>"#,
                r#"<td class="cell-source_group_name">(?P<discSurvey>.*?)</td>"#,
                r#".*?<td class="cell-internal_name">(<a.*?>)?(?P<discoveryName>.*?)(</a>)?</td>"#,
                r#".*?<td class="cell-discoverymag">(?P<discMag>.*?)</td>"#,
                r#"<td class="cell-disc_filter_name">(?P<discMagFilter>.*?)</td>"#,
                r#"<td class="cell-discoverydate">(?P<discDate>.*?)</td>"#,
                r#"<td class="cell-discoverer">(?P<sender>.*?)</td>.*?</tr>"#,
            ))?,

            at_section: Regex::new(r#"<tr class=[^\n]*?AT reports"#)?,
            classification_section: Regex::new(r#"<tr class=[^\n]*?Classification reports"#)?,

            phot_report: Regex::new(r#"(?s)<tr class="row-[^"]*"><td class="cell-id">.*?</table>"#)?,
            phot_header: Regex::new(concat!(
                r#"<tr class="row[^"]*".*?time_received">(?P<reportAddedDate>[^<]*)"#,
                r#".*?user_name">(?P<sender>[^<]*)"#,
                r#".*?reporter_name">(?P<reporters>[^<]*)"#,
                r#".*?reporting_group_name">(?P<reportingGroup>[^<]*)"#,
                r#".*?source_group_name">(?P<surveyGroup>[^<]*)"#,
                r#".*?ra">(?P<ra>[^<]*)"#,
                r#".*?decl">(?P<dec>[^<]*)"#,
                r#".*?discovery_date">(?P<obsDate>[^<]*)"#,
                r#".*?flux">(?P<mag>[^<]*)"#,
                r#".*?filter_name">(?P<magFilter>[^<]*)"#,
                r#".*?related_files">(?P<relatedFiles>[^<]*)"#,
                r#".*?type_name">(?P<suggestedType>[^<]*)"#,
                r#".*?hostname">(?P<hostName>[^<]*)"#,
                r#".*?host_redshift">(?P<hostRedshift>[^<]*)"#,
                r#".*?internal_name">(?P<objectName>[^<]*)"#,
                r#".*?groups">(?P<survey>[^<]*)"#,
                r#".*?remarks">(?P<sourceComment>[^<]*)"#,
            ))?,
            phot_row: Regex::new(concat!(
                r#"<tr class="row-[^"]*".*?obsdate">(?P<obsdate>[^<]*)"#,
                r#".*?flux">(?P<mag>[^<]*)"#,
                r#".*?fluxerr">(?P<magErr>[^<]*)"#,
                r#".*?limflux">(?P<limitingMag>[^<]*)"#,
                r#".*?unit_name">(?P<magUnit>[^<]*)"#,
                r#".*?filter_name">(?P<filter>[^<]*)"#,
                r#".*?tel_inst">(?P<telescope>[^<]*)"#,
                r#".*?exptime">(?P<exptime>[^<]*)"#,
                r#".*?observer">(?P<observer>[^<]*)"#,
                r#".*?-remarks">(?P<remarks>[^<]*)"#,
            ))?,
            related_file: Regex::new(
                r#"<td class="cell-filename">.*?href="(?P<filepath>[^"]*).*?remarks">(?P<fileComment>[^<]*)"#,
            )?,

            spec_report: Regex::new(concat!(
                r#"(?s)<tr class="row-[^"]*"><td class="cell-id">.*?"#,
                r#"</tbody>\s*</table>\s*</div></td> </tr>\s*"#,
                r#"</tbody>\s*</table>\s*</div></td> </tr>"#,
            ))?,
            spec_header: Regex::new(concat!(
                r#"(?s)<tr class="row.*?time_received">(?P<reportAddedDate>[^<]*)"#,
                r#".*?user_name">(?P<TNSuser>[^<]*)"#,
                r#".*?classifier_name">(?P<reporters>[^<]*)"#,
                r#".*?source_group_name">(?P<survey>[^<]*)"#,
                r#".*?-type">(?P<specType>[^<]*)"#,
                r#".*?-redshift">(?P<transRedshift>[^<]*)"#,
                r#".*?-related_files">(?P<relatedFiles>[^<]*)"#,
                r#".*?-groups">(?P<surveyGroup>[^<]*)"#,
                r#".*?-remarks">(?P<sourceComment>[^<]*)</td>"#,
            ))?,
            spec_row: Regex::new(concat!(
                r#"<tr class="row-.*?-obsdate">(?P<obsdate>[^<]*)"#,
                r#".*?-tel_inst">(?P<telescope>[^<]*)"#,
                r#".*?-exptime">(?P<exptime>[^<]*)"#,
                r#".*?-observer">(?P<sender>[^<]*)"#,
                r#".*?-reducer">(?P<reducer>[^<]*)"#,
                r#".*?-source_group_name">(?P<survey>[^<]*)"#,
                r#".*?-asciifile">(.*?<a href="(?P<filepath>[^"]*)".*?</a>)?"#,
                r#".*?-fitsfile">(.*?<a href="(?P<fitsFilepath>[^"]*)".*?</a>)?"#,
                r#".*?-groups">(?P<surveyGroup>[^<]*)"#,
                r#".*?-remarks">(?P<remarks>[^<]*)"#,
            ))?,
        })
    }

    /// The "AT reports" part of a block: from its title row up to the
    /// classification title row, or the end of the block.
    pub fn at_reports<'a>(&self, block: &'a str) -> Option<&'a str> {
        let start = self.at_section.find(block)?.start();
        let end = self
            .classification_section
            .find_at(block, start)
            .map_or(block.len(), |m| m.start());
        Some(&block[start..end])
    }

    /// The "Classification reports" part of a block, to the end of the block.
    pub fn classification_reports<'a>(&self, block: &'a str) -> Option<&'a str> {
        let start = self.classification_section.find(block)?.start();
        Some(&block[start..])
    }
}
