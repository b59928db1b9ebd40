// src/data.rs
//
// Uniform table shape for renderers and exporters.
//
// - Cell / DataSet: headers plus rows of optional typed cells.
// - Tabular: how each record type lays itself out as a row.
// - Tables: the four data sets of one search, with their natural keys.
//
// Column selection happens here, once: comment columns only when comments
// were requested, separation columns only when a source carries them.

use serde::Serialize;

use crate::model::{PhotometryRecord, RelatedFileRecord, SourceRecord, SpectrumRecord};
use crate::scrape::SearchResults;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(x) => write!(f, "{x}"),
        }
    }
}

fn text(v: &Option<String>) -> Option<Cell> { v.clone().map(Cell::Text) }
fn float(v: Option<f64>) -> Option<Cell> { v.map(Cell::Float) }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Always present.
    Always,
    /// Present only when comments were requested.
    Comment,
    /// Present only when at least one row has a value.
    Sparse,
}

#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn col(name: &'static str) -> Column { Column { name, kind: ColumnKind::Always } }
const fn comment(name: &'static str) -> Column { Column { name, kind: ColumnKind::Comment } }
const fn sparse(name: &'static str) -> Column { Column { name, kind: ColumnKind::Sparse } }

/// A record type that knows its column layout.
pub trait Tabular {
    fn columns() -> &'static [Column];
    /// One cell per entry of `columns()`, same order.
    fn cells(&self) -> Vec<Option<Cell>>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<Cell>>>,
}

impl DataSet {
    pub fn from_records<T: Tabular>(records: &[T], include_comments: bool) -> Self {
        let all: Vec<Vec<Option<Cell>>> = records.iter().map(T::cells).collect();
        let keep: Vec<bool> = T::columns()
            .iter()
            .enumerate()
            .map(|(i, c)| match c.kind {
                ColumnKind::Always => true,
                ColumnKind::Comment => include_comments,
                ColumnKind::Sparse => all.iter().any(|r| r[i].is_some()),
            })
            .collect();

        let headers = T::columns()
            .iter()
            .zip(&keep)
            .filter(|(_, k)| **k)
            .map(|(c, _)| s!(c.name))
            .collect();
        let rows = all
            .into_iter()
            .map(|r| r.into_iter().zip(&keep).filter(|(_, k)| **k).map(|(v, _)| v).collect())
            .collect();
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Rows as display strings; missing cells are empty.
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|c| c.as_ref().map_or_else(String::new, |c| c.to_string())).collect())
            .collect()
    }
}

/// One of the four result tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    Sources,
    Photometry,
    Spectra,
    Files,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [TableKind::Sources, TableKind::Photometry, TableKind::Spectra, TableKind::Files];

    /// Suffix of the exported filename.
    pub fn file_stem(&self) -> &'static str {
        match self {
            TableKind::Sources => "sources",
            TableKind::Photometry => "phot",
            TableKind::Spectra => "spec",
            TableKind::Files => "relatedFiles",
        }
    }

    /// Suffix of the SQL table name.
    pub fn table_suffix(&self) -> &'static str {
        match self {
            TableKind::Sources => "sources",
            TableKind::Photometry => "photometry",
            TableKind::Spectra => "spectra",
            TableKind::Files => "files",
        }
    }

    /// Columns that identify a row.
    pub fn natural_key(&self) -> &'static [&'static str] {
        match self {
            TableKind::Sources => &["TNSId"],
            TableKind::Photometry | TableKind::Spectra => &["TNSId", "survey", "obsdate"],
            TableKind::Files => &["TNSId", "url"],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tables {
    pub sources: DataSet,
    pub photometry: DataSet,
    pub spectra: DataSet,
    pub files: DataSet,
}

impl Tables {
    pub fn from_results(results: &SearchResults, include_comments: bool) -> Self {
        Self {
            sources: DataSet::from_records(&results.sources, include_comments),
            photometry: DataSet::from_records(&results.photometry, include_comments),
            spectra: DataSet::from_records(&results.spectra, include_comments),
            files: DataSet::from_records(&results.files, include_comments),
        }
    }

    pub fn get(&self, kind: TableKind) -> &DataSet {
        match kind {
            TableKind::Sources => &self.sources,
            TableKind::Photometry => &self.photometry,
            TableKind::Spectra => &self.spectra,
            TableKind::Files => &self.files,
        }
    }
}

/* ---------------- Layouts ---------------- */

impl Tabular for SourceRecord {
    fn columns() -> &'static [Column] {
        static COLS: [Column; 20] = [
            col("TNSId"), col("TNSName"), col("discoveryName"), col("discSurvey"),
            col("raSex"), col("decSex"), col("raDeg"), col("decDeg"),
            col("transRedshift"), col("specType"), col("discMag"), col("discMagFilter"),
            col("discDate"), col("objectUrl"), col("hostName"), col("hostRedshift"),
            sparse("separationArcsec"), sparse("separationNorthArcsec"), sparse("separationEastArcsec"),
            col("reportingSurvey"),
        ];
        &COLS
    }

    fn cells(&self) -> Vec<Option<Cell>> {
        vec![
            Some(Cell::Text(self.tns_id.clone())),
            Some(Cell::Text(self.tns_name.clone())),
            text(&self.discovery_name),
            text(&self.disc_survey),
            Some(Cell::Text(self.ra_sex.clone())),
            Some(Cell::Text(self.dec_sex.clone())),
            Some(Cell::Float(self.ra_deg)),
            Some(Cell::Float(self.dec_deg)),
            float(self.trans_redshift),
            text(&self.spec_type),
            float(self.disc_mag),
            text(&self.disc_mag_filter),
            text(&self.disc_date),
            Some(Cell::Text(self.object_url.clone())),
            text(&self.host_name),
            float(self.host_redshift),
            float(self.separation_arcsec),
            float(self.separation_north_arcsec),
            float(self.separation_east_arcsec),
            text(&self.reporting_survey),
        ]
    }
}

impl Tabular for PhotometryRecord {
    fn columns() -> &'static [Column] {
        static COLS: [Column; 16] = [
            col("TNSId"), col("survey"), col("obsdate"), col("filter"),
            col("limitingMag"), col("mag"), col("magErr"), col("magUnit"),
            col("suggestedType"), col("telescope"), col("exptime"), col("reportAddedDate"),
            col("reportingGroup"), col("objectName"), comment("remarks"), comment("sourceComment"),
        ];
        &COLS
    }

    fn cells(&self) -> Vec<Option<Cell>> {
        vec![
            Some(Cell::Text(self.tns_id.clone())),
            text(&self.survey),
            text(&self.obsdate),
            text(&self.filter),
            Some(Cell::Int(i64::from(self.limiting_mag))),
            float(self.mag),
            float(self.mag_err),
            text(&self.mag_unit),
            text(&self.suggested_type),
            text(&self.telescope),
            float(self.exptime),
            text(&self.report_added_date),
            text(&self.reporting_group),
            text(&self.object_name),
            text(&self.remarks),
            text(&self.source_comment),
        ]
    }
}

impl Tabular for SpectrumRecord {
    fn columns() -> &'static [Column] {
        static COLS: [Column; 11] = [
            col("TNSId"), col("survey"), col("obsdate"), col("specType"),
            col("transRedshift"), col("telescope"), col("exptime"), col("reportAddedDate"),
            col("TNSuser"), comment("remarks"), comment("sourceComment"),
        ];
        &COLS
    }

    fn cells(&self) -> Vec<Option<Cell>> {
        vec![
            Some(Cell::Text(self.tns_id.clone())),
            text(&self.survey),
            text(&self.obsdate),
            text(&self.spec_type),
            float(self.trans_redshift),
            text(&self.telescope),
            float(self.exptime),
            text(&self.report_added_date),
            text(&self.tns_user),
            text(&self.remarks),
            text(&self.source_comment),
        ]
    }
}

impl Tabular for RelatedFileRecord {
    fn columns() -> &'static [Column] {
        static COLS: [Column; 6] = [
            col("TNSId"), col("filename"), col("url"), comment("comment"),
            col("dateObs"), col("spec1phot2"),
        ];
        &COLS
    }

    fn cells(&self) -> Vec<Option<Cell>> {
        vec![
            Some(Cell::Text(self.tns_id.clone())),
            Some(Cell::Text(self.filename.clone())),
            Some(Cell::Text(self.url.clone())),
            text(&self.comment),
            text(&self.date_obs),
            Some(Cell::Int(self.spec1phot2 as i64)),
        ]
    }
}
