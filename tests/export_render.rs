// tests/export_render.rs
mod common;

use common::*;
use tns_scrape::config::options::{ExportFormat, ExportOptions};
use tns_scrape::data::{TableKind, Tables};
use tns_scrape::file::write_tables;
use tns_scrape::render::render;
use tns_scrape::{SearchQuery, SearchRequest, SearchResults, search};

fn cone_results(with_comments: bool) -> SearchResults {
    let fetch = ScriptedFetch::pages(&[CONE_PAGE.to_string()]);
    let req = SearchRequest::new(SearchQuery::Cone {
        ra: "06:50:36.74".into(),
        dec: "+31:06:44.7".into(),
        radius_arcsec: 5.0,
    })
    .with_comments(with_comments);
    search(&req, &options(50), &fetch, None).unwrap()
}

fn export_to(dir: &std::path::Path, format: ExportFormat) -> ExportOptions {
    ExportOptions { format, out_dir: Some(dir.to_path_buf()), ..ExportOptions::default() }
}

#[test]
fn csv_export_writes_four_prefixed_files() {
    let results = cone_results(false);
    let tables = Tables::from_results(&results, false);
    let tmp = tempfile::tempdir().unwrap();

    let written = write_tables(&tables, &export_to(tmp.path(), ExportFormat::Csv), "2016asf_tns_conesearch_").unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "2016asf_tns_conesearch_sources.csv",
            "2016asf_tns_conesearch_phot.csv",
            "2016asf_tns_conesearch_spec.csv",
            "2016asf_tns_conesearch_relatedFiles.csv",
        ]
    );

    let sources = std::fs::read_to_string(&written[0]).unwrap();
    let mut lines = sources.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("TNSId,TNSName,discoveryName,discSurvey"));
    assert!(header.contains("separationArcsec,separationNorthArcsec,separationEastArcsec"));
    assert!(lines.next().unwrap().starts_with("2016asf,SN2016asf,ASASSN-16cs,ASAS-SN"));

    let phot = std::fs::read_to_string(&written[1]).unwrap();
    assert_eq!(phot.lines().count(), 3);
    assert!(!phot.contains("remarks"));
}

#[test]
fn sql_export_creates_then_upserts() {
    let results = cone_results(true);
    let tables = Tables::from_results(&results, true);
    let tmp = tempfile::tempdir().unwrap();
    let export = ExportOptions { table_prefix: "tns_test".into(), ..export_to(tmp.path(), ExportFormat::Sql) };

    let written = write_tables(&tables, &export, "x_").unwrap();
    let phot = std::fs::read_to_string(&written[1]).unwrap();
    assert!(phot.starts_with("CREATE TABLE IF NOT EXISTS `tns_test_photometry`"));
    assert_eq!(phot.matches("INSERT INTO `tns_test_photometry`").count(), 2);
    assert!(phot.contains("limitingMag"));

    let files = std::fs::read_to_string(&written[3]).unwrap();
    assert!(files.contains("UNIQUE KEY `u_natural` (`TNSId`,`url`)"));
    assert_eq!(files.matches("INSERT INTO `tns_test_files`").count(), 3);
}

#[test]
fn json_rendering_round_trips_through_serde() {
    let results = cone_results(true);
    let tables = Tables::from_results(&results, true);

    let out = render(tables.get(TableKind::Photometry), ExportFormat::Json, TableKind::Photometry, "TNS").unwrap();
    let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["TNSId"], "2016asf");
    assert_eq!(rows[0]["mag"], serde_json::json!(17.1));
    assert_eq!(rows[1]["limitingMag"], serde_json::json!(1));
    assert_eq!(rows[1]["remarks"], "pre-discovery limit");
}

#[test]
fn yaml_export_parses_back_into_rows() {
    let results = cone_results(true);
    let tables = Tables::from_results(&results, true);
    let tmp = tempfile::tempdir().unwrap();

    let written = write_tables(&tables, &export_to(tmp.path(), ExportFormat::Yaml), "2016asf_").unwrap();
    assert!(written[1].to_string_lossy().ends_with("2016asf_phot.yaml"));

    let text = std::fs::read_to_string(&written[1]).unwrap();
    let rows: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
    let rows = rows.as_sequence().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["TNSId"].as_str(), Some("2016asf"));
    assert_eq!(rows[0]["mag"].as_f64(), Some(17.1));
    assert_eq!(rows[1]["limitingMag"].as_i64(), Some(1));
    assert_eq!(rows[1]["remarks"].as_str(), Some("pre-discovery limit"));

    let files: serde_yaml::Value = serde_yaml::from_str(&std::fs::read_to_string(&written[3]).unwrap()).unwrap();
    assert_eq!(files.as_sequence().unwrap().len(), 3);
}

#[test]
fn empty_results_still_render_headers() {
    let fetch = ScriptedFetch::pages(&[no_results_page()]);
    let req = SearchRequest::new(SearchQuery::Name("2099zzz".into()));
    let results = search(&req, &options(50), &fetch, None).unwrap();
    assert!(results.is_empty());

    let tables = Tables::from_results(&results, false);
    let csv = render(tables.get(TableKind::Sources), ExportFormat::Csv, TableKind::Sources, "TNS").unwrap();
    assert_eq!(csv.lines().count(), 1);
    assert!(!csv.contains("separationArcsec"));

    let md = render(tables.get(TableKind::Spectra), ExportFormat::Markdown, TableKind::Spectra, "TNS").unwrap();
    assert_eq!(md.lines().count(), 2);
}

#[test]
fn export_refuses_a_file_as_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("out");
    std::fs::write(&blocker, "not a dir").unwrap();
    let tables = Tables::from_results(&cone_results(false), false);
    assert!(write_tables(&tables, &export_to(&blocker, ExportFormat::Tsv), "x_").is_err());
}
