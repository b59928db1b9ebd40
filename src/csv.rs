// src/csv.rs
use std::io::{self, Write};

use crate::data::DataSet;

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header line plus one line per row; missing cells are left empty.
pub fn write_dataset<W: Write>(mut w: W, ds: &DataSet, sep: char) -> io::Result<()> {
    write_row(&mut w, &ds.headers, sep)?;
    for r in ds.text_rows() {
        write_row(&mut w, &r, sep)?;
    }
    Ok(())
}

pub fn to_delimited_string(ds: &DataSet, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let _ = write_dataset(&mut buf, ds, sep);

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
