// src/render.rs
//! Text renderings of a data set.
//!
//! Every format renders one `DataSet` at a time; callers loop over the four
//! tables. SQL needs the table name, so it takes the table kind and prefix.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::config::options::ExportFormat;
use crate::csv::to_delimited_string;
use crate::data::{Cell, DataSet, TableKind};
use crate::error::ExportError;

pub fn render(ds: &DataSet, format: ExportFormat, kind: TableKind, table_prefix: &str) -> Result<String, ExportError> {
    Ok(match format {
        ExportFormat::Csv | ExportFormat::Tsv => {
            let sep = format.delimiter().unwrap_or(',');
            to_delimited_string(ds, sep)
        }
        ExportFormat::Json => json(ds)?,
        ExportFormat::Yaml => yaml(ds)?,
        ExportFormat::Markdown => markdown(ds),
        ExportFormat::Table => table(ds),
        ExportFormat::Sql => sql_inserts(ds, &sql_table_name(table_prefix, kind)),
    })
}

/* ---------------- JSON / YAML ---------------- */

struct JsonRow<'a> {
    headers: &'a [String],
    cells: &'a [Option<Cell>],
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.headers.len()))?;
        for (h, c) in self.headers.iter().zip(self.cells) {
            map.serialize_entry(h, c)?;
        }
        map.end()
    }
}

fn keyed_rows(ds: &DataSet) -> Vec<JsonRow<'_>> {
    ds.rows
        .iter()
        .map(|r| JsonRow { headers: &ds.headers, cells: r })
        .collect()
}

/// Array of objects, keys in column order.
pub fn json(ds: &DataSet) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&keyed_rows(ds))?)
}

/// Sequence of mappings, same shape as the JSON output.
pub fn yaml(ds: &DataSet) -> Result<String, ExportError> {
    Ok(serde_yaml::to_string(&keyed_rows(ds))?)
}

/* ---------------- Grids ---------------- */

fn widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut w: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for r in rows {
        for (i, c) in r.iter().enumerate() {
            w[i] = w[i].max(c.chars().count());
        }
    }
    w
}

fn pad(s: &str, width: usize) -> String {
    let n = s.chars().count();
    join!(s, &" ".repeat(width.saturating_sub(n)))
}

fn grid_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let inner: Vec<String> = cells.iter().zip(widths).map(|(c, w)| pad(c.as_ref(), *w)).collect();
    format!("| {} |", inner.join(" | "))
}

fn md_escape(s: &str) -> String {
    s.replace('|', "\\|")
}

/// Markdown pipe table. Literal pipes in cells are escaped.
pub fn markdown(ds: &DataSet) -> String {
    let headers: Vec<String> = ds.headers.iter().map(|h| md_escape(h)).collect();
    let rows: Vec<Vec<String>> = ds
        .text_rows()
        .iter()
        .map(|r| r.iter().map(|c| md_escape(c)).collect())
        .collect();
    let w = widths(&headers, &rows);
    let mut out = String::new();
    out.push_str(&grid_line(&headers, &w));
    out.push('\n');
    let rule: Vec<String> = w.iter().map(|n| format!(":{}", "-".repeat((*n).max(3) - 1))).collect();
    out.push_str(&format!("|{}|\n", rule.iter().map(|r| format!(" {r} ")).collect::<Vec<_>>().join("|")));
    for r in &rows {
        out.push_str(&grid_line(r, &w));
        out.push('\n');
    }
    out
}

/// Plain-text grid with `+---+` borders.
pub fn table(ds: &DataSet) -> String {
    let rows = ds.text_rows();
    let w = widths(&ds.headers, &rows);
    let border = format!(
        "+{}+",
        w.iter().map(|n| "-".repeat(n + 2)).collect::<Vec<_>>().join("+")
    );
    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    out.push_str(&grid_line(&ds.headers, &w));
    out.push('\n');
    out.push_str(&border);
    out.push('\n');
    for r in &rows {
        out.push_str(&grid_line(r, &w));
        out.push('\n');
    }
    if !rows.is_empty() {
        out.push_str(&border);
        out.push('\n');
    }
    out
}

/* ---------------- SQL ---------------- */

pub fn sql_table_name(prefix: &str, kind: TableKind) -> String {
    format!("{prefix}_{}", kind.table_suffix())
}

fn sql_value(c: &Option<Cell>) -> String {
    match c {
        None => s!("null"),
        Some(Cell::Int(i)) => i.to_string(),
        Some(Cell::Float(x)) => x.to_string(),
        Some(Cell::Text(t)) => format!("\"{}\"", t.replace('\\', "\\\\").replace('"', "\\\"")),
    }
}

/// One upsert per row; a re-run refreshes rows that already exist.
pub fn sql_inserts(ds: &DataSet, table: &str) -> String {
    let cols = ds.headers.join(",");
    let mut out = String::new();
    for r in &ds.rows {
        let values: Vec<String> = r.iter().map(sql_value).collect();
        let updates: Vec<String> = ds
            .headers
            .iter()
            .zip(&values)
            .map(|(h, v)| format!("{h}={v}"))
            .collect();
        out.push_str(&format!(
            "INSERT INTO `{table}` ({cols}) VALUES ({}) ON DUPLICATE KEY UPDATE {}, updated=1, dateLastModified=NOW();\n",
            values.join(", "),
            updates.join(", "),
        ));
    }
    out
}

fn sql_type(column: &str) -> &'static str {
    match column {
        "raDeg" | "decDeg" | "transRedshift" | "hostRedshift" | "discMag" | "mag" | "magErr"
        | "exptime" | "separationArcsec" | "separationNorthArcsec" | "separationEastArcsec" => "double",
        "limitingMag" | "spec1phot2" => "tinyint(4)",
        "discDate" | "obsdate" | "reportAddedDate" | "dateObs" => "datetime",
        "remarks" | "sourceComment" | "comment" => "varchar(800)",
        // Part of the files table's unique key; utf8mb4 keys stop at 3072 bytes.
        "url" => "varchar(512)",
        _ => "varchar(100)",
    }
}

/// `CREATE TABLE` matching the data set's columns, keyed on the table's
/// natural key.
pub fn sql_create_table(ds: &DataSet, kind: TableKind, table_prefix: &str) -> String {
    let table = sql_table_name(table_prefix, kind);
    let mut out = format!("CREATE TABLE IF NOT EXISTS `{table}` (\n");
    out.push_str("  `primaryId` bigint(20) NOT NULL AUTO_INCREMENT COMMENT 'An internal counter',\n");
    for h in &ds.headers {
        let null = if h == "TNSId" { "NOT NULL" } else { "DEFAULT NULL" };
        out.push_str(&format!("  `{h}` {} {null},\n", sql_type(h)));
    }
    out.push_str("  `dateCreated` datetime DEFAULT CURRENT_TIMESTAMP,\n");
    out.push_str("  `updated` tinyint(4) DEFAULT '0',\n");
    out.push_str("  `dateLastModified` datetime DEFAULT NULL,\n");
    out.push_str("  PRIMARY KEY (`primaryId`),\n");
    let key: Vec<String> = kind.natural_key().iter().map(|k| format!("`{k}`")).collect();
    out.push_str(&format!("  UNIQUE KEY `u_natural` ({})\n", key.join(",")));
    out.push_str(") ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;\n");
    out
}
