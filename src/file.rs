// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::config::options::{ExportFormat, ExportOptions};
use crate::data::{TableKind, Tables};
use crate::error::ExportError;
use crate::render::{render, sql_create_table};

/// `<dir>/<prefix><stem>.<ext>`, e.g. `out/2016asf_tns_conesearch_phot.csv`.
pub fn export_path(dir: &Path, prefix: &str, kind: TableKind, format: ExportFormat) -> PathBuf {
    dir.join(format!("{prefix}{}.{}", kind.file_stem(), format.ext()))
}

/// Render all four tables and write them side by side into the export
/// directory. Returns the paths written, in table order.
pub fn write_tables(tables: &Tables, export: &ExportOptions, prefix: &str) -> Result<Vec<PathBuf>, ExportError> {
    let dir = export.out_dir_or_default();
    ensure_directory(&dir)?;

    let mut written = Vec::with_capacity(TableKind::ALL.len());
    for kind in TableKind::ALL {
        let ds = tables.get(kind);
        let mut contents = render(ds, export.format, kind, &export.table_prefix)?;
        if export.format == ExportFormat::Sql {
            contents.insert_str(0, &format!("{}\n", sql_create_table(ds, kind, &export.table_prefix)));
        }
        let path = export_path(&dir, prefix, kind, export.format);
        fs::write(&path, contents)?;
        info!(path = %path.display(), rows = ds.rows.len(), "wrote export");
        written.push(path);
    }
    Ok(written)
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
