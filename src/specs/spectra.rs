// src/specs/spectra.rs
//! "Classification reports": one header per report, one row per spectrum.

use regex::Captures;
use tracing::debug;

use super::files::{FileLinker, direct_file};
use super::grammar::Grammar;
use super::note_missing;
use crate::core::sanitize::{parse_number, parse_redshift};
use crate::model::{FileSection, RelatedFileRecord, SpectrumRecord};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpecReportHeader {
    pub report_added_date: Option<String>,
    pub tns_user: Option<String>,
    pub spec_type: Option<String>,
    pub trans_redshift: Option<f64>,
    pub has_related_files: bool,
    pub source_comment: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpecRow {
    pub obsdate: Option<String>,
    pub telescope: Option<String>,
    pub exptime: Option<f64>,
    pub survey: Option<String>,
    pub ascii_file: Option<String>,
    pub fits_file: Option<String>,
    pub remarks: Option<String>,
}

impl SpecReportHeader {
    pub fn from_captures(c: &Captures<'_>, include_comments: bool) -> Self {
        Self {
            report_added_date: cell!(c, "reportAddedDate"),
            tns_user: cell!(c, "TNSuser"),
            spec_type: cell!(c, "specType"),
            trans_redshift: parse_redshift(cell!(c, "transRedshift").as_deref()),
            has_related_files: cell!(c, "relatedFiles").is_some(),
            source_comment: comment!(c, "sourceComment", include_comments),
        }
    }
}

impl SpecRow {
    pub fn from_captures(c: &Captures<'_>, include_comments: bool) -> Self {
        Self {
            obsdate: cell!(c, "obsdate"),
            telescope: cell!(c, "telescope"),
            exptime: parse_number(cell!(c, "exptime").as_deref()),
            survey: cell!(c, "survey"),
            ascii_file: cell!(c, "filepath"),
            fits_file: cell!(c, "fitsFilepath"),
            remarks: comment!(c, "remarks", include_comments, |t: &str| t.replace('"', "'")),
        }
    }

    /// The row's own data files, ascii first.
    pub fn files(&self, tns_id: &str) -> Vec<RelatedFileRecord> {
        [&self.ascii_file, &self.fits_file]
            .into_iter()
            .flatten()
            .map(|url| direct_file(tns_id, url, self.obsdate.as_deref(), FileSection::Spectrum))
            .collect()
    }

    pub fn merge(self, header: &SpecReportHeader, tns_id: &str) -> SpectrumRecord {
        SpectrumRecord {
            tns_id: s!(tns_id),
            survey: self.survey,
            obsdate: self.obsdate,
            spec_type: header.spec_type.clone(),
            trans_redshift: header.trans_redshift,
            telescope: self.telescope,
            exptime: self.exptime,
            report_added_date: header.report_added_date.clone(),
            tns_user: header.tns_user.clone(),
            remarks: self.remarks,
            source_comment: header.source_comment.clone(),
        }
    }
}

/// Spectra and spectrum attachments for one object block.
pub fn extract(
    block: &str,
    grammar: &Grammar,
    tns_id: &str,
    include_comments: bool,
) -> (Vec<SpectrumRecord>, Vec<RelatedFileRecord>) {
    let mut spectra = Vec::new();
    let mut files = Vec::new();

    let Some(section) = grammar.classification_reports(block) else {
        return (spectra, files);
    };
    let mut linker = FileLinker::for_section(section, grammar, FileSection::Spectrum, include_comments);

    for report in grammar.spec_report.find_iter(section) {
        let report = report.as_str();
        let Some(hc) = grammar.spec_header.captures(report) else {
            debug!(tns_id, "classification report without a recognisable header");
            continue;
        };
        let header = SpecReportHeader::from_captures(&hc, include_comments);

        for rc in grammar.spec_row.captures_iter(report) {
            let row = SpecRow::from_captures(&rc, include_comments);
            if header.has_related_files {
                files.extend(linker.link(tns_id, row.obsdate.as_deref()));
            }
            files.extend(row.files(tns_id));
            let record = row.merge(&header, tns_id);
            note_missing(tns_id, "spectra", &[
                ("obsdate", record.obsdate.is_none()),
                ("telescope", record.telescope.is_none()),
                ("specType", record.spec_type.is_none()),
            ]);
            spectra.push(record);
        }
    }

    (spectra, files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(redshift: &str, related: &str, rows: &[&str]) -> String {
        format!(
            concat!(
                "<tr class=\"title-row\"><td>Classification reports (1)</td></tr>\n",
                r#"<tr class="row-odd"><td class="cell-id">9012</td>"#,
                r#"<td class="cell-time_received">2016-03-08 12:00:00</td>"#,
                r#"<td class="cell-user_name">Classifier</td>"#,
                r#"<td class="cell-classifier_name">C. Lassifier</td>"#,
                r#"<td class="cell-source_group_name">SCAT</td>"#,
                r#"<td class="cell-type">SN Ia</td>"#,
                r#"<td class="cell-redshift">{redshift}</td>"#,
                r#"<td class="cell-related_files">{related}</td>"#,
                r#"<td class="cell-groups">SCAT</td>"#,
                r#"<td class="cell-remarks">Normal "Ia"</td></tr>"#,
                "\n<tr class=\"spectra\"><td colspan=\"9\"><div><table class=\"spectra\"><tbody>\n",
                "{rows}\n",
                "</tbody>\n</table>\n</div></td> </tr>\n",
                "</tbody>\n</table>\n</div></td> </tr>\n",
                r#"<tr class="row-odd"><td class="cell-filename"><a href="https://www.wis-tns.org/files/class.pdf">class.pdf</a></td><td class="cell-remarks">notes</td></tr>"#,
                "\n",
            ),
            redshift = redshift,
            related = related,
            rows = rows.join("\n"),
        )
    }

    const ROW_WITH_FILES: &str = concat!(
        r#"<tr class="row-even"><td class="cell-obsdate">2016-03-07 05:00:00</td>"#,
        r#"<td class="cell-tel_inst">UH88 - SNIFS</td><td class="cell-exptime">1200</td>"#,
        r#"<td class="cell-observer">O. Bserver</td><td class="cell-reducer">R. Educer</td>"#,
        r#"<td class="cell-source_group_name">SCAT</td>"#,
        r#"<td class="cell-asciifile"><a href="https://www.wis-tns.org/system/files/tns_spectra/2016asf.ascii">2016asf.ascii</a></td>"#,
        r#"<td class="cell-fitsfile"><a href="https://www.wis-tns.org/system/files/tns_spectra/2016asf.fits">2016asf.fits</a></td>"#,
        r#"<td class="cell-groups">SCAT</td><td class="cell-remarks">a "quoted" remark</td></tr>"#,
    );

    const ROW_NO_FILES: &str = concat!(
        r#"<tr class="row-odd"><td class="cell-obsdate">2016-03-08 05:00:00</td>"#,
        r#"<td class="cell-tel_inst">UH88 - SNIFS</td><td class="cell-exptime"></td>"#,
        r#"<td class="cell-observer"></td><td class="cell-reducer"></td>"#,
        r#"<td class="cell-source_group_name">SCAT</td>"#,
        r#"<td class="cell-asciifile"></td><td class="cell-fitsfile"></td>"#,
        r#"<td class="cell-groups"></td><td class="cell-remarks"></td></tr>"#,
    );

    #[test]
    fn header_fields_reach_every_row() {
        let block = report("0.021", "", &[ROW_WITH_FILES, ROW_NO_FILES]);
        let (spec, files) = extract(&block, Grammar::current(), "2016asf", true);
        assert_eq!(spec.len(), 2);
        for s in &spec {
            assert_eq!(s.tns_id, "2016asf");
            assert_eq!(s.spec_type.as_deref(), Some("SN Ia"));
            assert_eq!(s.trans_redshift, Some(0.021));
            assert_eq!(s.tns_user.as_deref(), Some("Classifier"));
            assert_eq!(s.survey.as_deref(), Some("SCAT"));
            assert_eq!(s.source_comment.as_deref(), Some("Normal \"Ia\""));
        }
        assert_eq!(spec[0].telescope.as_deref(), Some("UH88 - SNIFS"));
        assert_eq!(spec[0].exptime, Some(1200.0));
        assert_eq!(spec[0].remarks.as_deref(), Some("a 'quoted' remark"));
        assert_eq!(spec[1].exptime, None);
        assert_eq!(spec[1].remarks, None);

        // ascii + fits of the first row only; the attachment list is not
        // referenced by this report
        let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, ["2016asf.ascii", "2016asf.fits"]);
        assert!(files.iter().all(|f| f.spec1phot2 == FileSection::Spectrum));
        assert_eq!(files[0].date_obs.as_deref(), Some("2016-03-07 05:00:00"));
    }

    #[test]
    fn zero_redshift_and_linked_attachments() {
        let block = report("0", "1", &[ROW_NO_FILES, ROW_NO_FILES]);
        let (spec, files) = extract(&block, Grammar::current(), "2016asf", false);
        assert_eq!(spec.len(), 2);
        assert_eq!(spec[0].trans_redshift, None);
        assert_eq!(spec[0].source_comment, None);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "class.pdf");
        assert_eq!(files[0].comment, None);
    }
}
