// src/model.rs
//! Record types produced by one search.
//!
//! Every child record (photometry, spectrum, file) carries the `tns_id` of
//! the source it was found under. Export column names live with the tabular
//! views in `data`.

use crate::error::SkipReason;

/// One page as it came back from the server.
#[derive(Clone, Debug)]
pub struct ResultPage {
    pub index: usize,
    pub status: u16,
    pub url: String,
    pub body: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceRecord {
    pub tns_id: String,
    pub tns_name: String,
    pub discovery_name: Option<String>,
    pub disc_survey: Option<String>,
    pub ra_sex: String,
    pub dec_sex: String,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub trans_redshift: Option<f64>,
    pub spec_type: Option<String>,
    pub disc_mag: Option<f64>,
    pub disc_mag_filter: Option<String>,
    pub disc_date: Option<String>,
    pub object_url: String,
    pub host_name: Option<String>,
    pub host_redshift: Option<f64>,
    pub separation_arcsec: Option<f64>,
    pub separation_north_arcsec: Option<f64>,
    pub separation_east_arcsec: Option<f64>,
    pub reporting_survey: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhotometryRecord {
    pub tns_id: String,
    pub survey: Option<String>,
    pub obsdate: Option<String>,
    pub filter: Option<String>,
    /// `mag` holds a limiting magnitude, not a detection.
    pub limiting_mag: bool,
    pub mag: Option<f64>,
    pub mag_err: Option<f64>,
    pub mag_unit: Option<String>,
    pub suggested_type: Option<String>,
    pub telescope: Option<String>,
    pub exptime: Option<f64>,
    pub report_added_date: Option<String>,
    pub reporting_group: Option<String>,
    pub object_name: Option<String>,
    pub remarks: Option<String>,
    pub source_comment: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpectrumRecord {
    pub tns_id: String,
    pub survey: Option<String>,
    pub obsdate: Option<String>,
    pub spec_type: Option<String>,
    pub trans_redshift: Option<f64>,
    pub telescope: Option<String>,
    pub exptime: Option<f64>,
    pub report_added_date: Option<String>,
    pub tns_user: Option<String>,
    pub remarks: Option<String>,
    pub source_comment: Option<String>,
}

/// Which kind of report an attachment came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileSection {
    Spectrum = 1,
    Photometry = 2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RelatedFileRecord {
    pub tns_id: String,
    pub filename: String,
    pub url: String,
    pub comment: Option<String>,
    pub date_obs: Option<String>,
    pub spec1phot2: FileSection,
}

/// Everything extracted from one object block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectRecords {
    pub source: SourceRecord,
    pub photometry: Vec<PhotometryRecord>,
    pub spectra: Vec<SpectrumRecord>,
    pub files: Vec<RelatedFileRecord>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BlockOutcome {
    Parsed(Box<ObjectRecords>),
    Skipped(SkipReason),
}
