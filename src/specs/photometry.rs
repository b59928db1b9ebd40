// src/specs/photometry.rs
//! "AT reports": one header per report, one row per photometric point.

use regex::Captures;
use tracing::debug;

use super::files::FileLinker;
use super::grammar::Grammar;
use super::note_missing;
use crate::core::sanitize::parse_number;
use crate::model::{FileSection, PhotometryRecord, RelatedFileRecord};

const NON_DETECTION_TAG: &str = "[Last non detection]";

/// Report-level fields, shared by every row of the report.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhotReportHeader {
    pub report_added_date: Option<String>,
    pub sender: Option<String>,
    pub reporting_group: Option<String>,
    pub has_related_files: bool,
    pub suggested_type: Option<String>,
    pub object_name: Option<String>,
    pub survey: Option<String>,
    pub source_comment: Option<String>,
}

/// One photometric point as printed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhotRow {
    pub obsdate: Option<String>,
    pub mag: Option<f64>,
    pub mag_err: Option<f64>,
    pub limiting_mag: bool,
    pub mag_unit: Option<String>,
    pub filter: Option<String>,
    pub telescope: Option<String>,
    pub exptime: Option<f64>,
    pub remarks: Option<String>,
}

impl PhotReportHeader {
    pub fn from_captures(c: &Captures<'_>, include_comments: bool) -> Self {
        Self {
            report_added_date: cell!(c, "reportAddedDate"),
            sender: cell!(c, "sender"),
            reporting_group: cell!(c, "reportingGroup"),
            has_related_files: cell!(c, "relatedFiles").is_some(),
            suggested_type: cell!(c, "suggestedType"),
            object_name: cell!(c, "objectName"),
            survey: cell!(c, "survey"),
            source_comment: comment!(c, "sourceComment", include_comments),
        }
    }
}

impl PhotRow {
    pub fn from_captures(c: &Captures<'_>, include_comments: bool) -> Self {
        let mag = cell!(c, "mag");
        let limit = cell!(c, "limitingMag");

        // A row with only a limiting flux is a non-detection; the limit
        // takes the magnitude's place.
        let limiting_mag = mag.is_none() && limit.is_some();
        let mag = if limiting_mag { parse_number(limit.as_deref()) } else { parse_number(mag.as_deref()) };

        let remarks = comment!(c, "remarks", include_comments, |t: &str| {
            if limiting_mag { t.replace(NON_DETECTION_TAG, "") } else { s!(t) }
        });

        Self {
            obsdate: cell!(c, "obsdate"),
            mag,
            mag_err: parse_number(cell!(c, "magErr").as_deref()),
            limiting_mag,
            mag_unit: cell!(c, "magUnit"),
            filter: cell!(c, "filter"),
            telescope: cell!(c, "telescope"),
            exptime: parse_number(cell!(c, "exptime").as_deref()),
            remarks,
        }
    }

    /// Row + its report header → one output record.
    pub fn merge(self, header: &PhotReportHeader, tns_id: &str) -> PhotometryRecord {
        // Without a survey group or an internal name, credit the sender.
        let survey = match (&header.survey, &header.object_name) {
            (None, None) => header.sender.clone(),
            _ => header.survey.clone(),
        };
        PhotometryRecord {
            tns_id: s!(tns_id),
            survey,
            obsdate: self.obsdate,
            filter: self.filter,
            limiting_mag: self.limiting_mag,
            mag: self.mag,
            mag_err: self.mag_err,
            mag_unit: self.mag_unit,
            suggested_type: header.suggested_type.clone(),
            telescope: self.telescope,
            exptime: self.exptime,
            report_added_date: header.report_added_date.clone(),
            reporting_group: header.reporting_group.clone(),
            object_name: header.object_name.clone(),
            remarks: self.remarks,
            source_comment: header.source_comment.clone(),
        }
    }
}

/// Photometry and photometry attachments for one object block.
pub fn extract(
    block: &str,
    grammar: &Grammar,
    tns_id: &str,
    include_comments: bool,
) -> (Vec<PhotometryRecord>, Vec<RelatedFileRecord>) {
    let mut phot = Vec::new();
    let mut files = Vec::new();

    let Some(section) = grammar.at_reports(block) else {
        return (phot, files);
    };
    let mut linker = FileLinker::for_section(section, grammar, FileSection::Photometry, include_comments);

    for report in grammar.phot_report.find_iter(section) {
        let report = report.as_str();
        let Some(hc) = grammar.phot_header.captures(report) else {
            debug!(tns_id, "AT report without a recognisable header");
            continue;
        };
        let header = PhotReportHeader::from_captures(&hc, include_comments);

        for rc in grammar.phot_row.captures_iter(report) {
            let row = PhotRow::from_captures(&rc, include_comments);
            if header.has_related_files {
                files.extend(linker.link(tns_id, row.obsdate.as_deref()));
            }
            let record = row.merge(&header, tns_id);
            note_missing(tns_id, "photometry", &[
                ("obsdate", record.obsdate.is_none()),
                ("mag", record.mag.is_none()),
                ("filter", record.filter.is_none()),
                ("survey", record.survey.is_none()),
            ]);
            phot.push(record);
        }
    }

    (phot, files)
}
