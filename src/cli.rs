// src/cli.rs
use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::WrapErr;

use crate::config::options::{AppOptions, ExportFormat};
use crate::core::net::HttpClient;
use crate::data::{TableKind, Tables};
use crate::log::{self, LogTarget};
use crate::progress::Progress;
use crate::query::{SearchQuery, SearchRequest};
use crate::render::render;
use crate::scrape::{SearchResults, search};

#[derive(Parser, Debug)]
#[command(
    name = "tns",
    about = "Search the Transient Name Server and export sources, photometry, spectra and related files",
    version
)]
pub struct Cli {
    /// TOML settings file; missing keys use the built-in defaults
    #[arg(short = 's', long, global = true)]
    pub settings: Option<PathBuf>,

    /// Keep TNS remarks and report comments in the result sets
    #[arg(short = 'c', long = "with-comments", global = true)]
    pub with_comments: bool,

    /// Output format for the results
    #[arg(short = 'r', long = "render", value_enum, global = true)]
    pub render: Option<ExportFormat>,

    /// Table name prefix for SQL output
    #[arg(long, global = true)]
    pub table_prefix: Option<String>,

    /// Write one file per table into this directory instead of printing
    #[arg(short = 'o', long, global = true)]
    pub output: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Send logs to .store/debug.log instead of stderr
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Cone search around a position
    Cone {
        /// Right ascension, sexagesimal (HH:MM:SS.ss) or decimal degrees
        #[arg(allow_hyphen_values = true)]
        ra: String,
        /// Declination, sexagesimal (+DD:MM:SS.s) or decimal degrees
        #[arg(allow_hyphen_values = true)]
        dec: String,
        /// Search radius in arcseconds
        radius: f64,
    },
    /// Look up a TNS name (2016asf, SN2016asf) or a survey's internal name
    Search {
        name: String,
    },
    /// Objects discovered in the last N days
    New {
        days: u32,
    },
}

impl Command {
    pub fn to_query(&self) -> SearchQuery {
        match self {
            Command::Cone { ra, dec, radius } => SearchQuery::Cone {
                ra: ra.clone(),
                dec: dec.clone(),
                radius_arcsec: *radius,
            },
            Command::Search { name } => SearchQuery::Name(name.clone()),
            Command::New { days } => SearchQuery::Recent { days: *days },
        }
    }
}

/// Page counter on stderr, overwritten in place.
struct CliProgress {
    out: std::io::Stderr,
    dirty: bool,
}

impl CliProgress {
    fn new() -> Self {
        Self { out: std::io::stderr(), dirty: false }
    }
}

impl Progress for CliProgress {
    fn begin(&mut self, what: &str) {
        let _ = writeln!(self.out, "Searching the TNS: {what}");
    }

    fn log(&mut self, msg: &str) {
        if self.dirty {
            let _ = writeln!(self.out);
            self.dirty = false;
        }
        let _ = writeln!(self.out, "{msg}");
    }

    fn page_done(&mut self, pages: usize, sources_so_far: usize) {
        let plural = if pages == 1 { "" } else { "s" };
        let _ = write!(
            self.out,
            "\rDownloaded {pages} page{plural} from the TNS. {sources_so_far} transients parsed so far."
        );
        let _ = self.out.flush();
        self.dirty = true;
    }

    fn finish(&mut self) {
        if self.dirty {
            let _ = writeln!(self.out);
            self.dirty = false;
        }
    }
}

/// Merge the settings file with the command line; flags win.
pub fn resolve_options(cli: &Cli) -> color_eyre::Result<AppOptions> {
    let mut opts = match &cli.settings {
        Some(path) => AppOptions::from_toml_file(path)
            .wrap_err_with(|| format!("loading settings from {}", path.display()))?,
        None => AppOptions::default(),
    };
    if cli.with_comments {
        opts.include_comments = true;
    }
    if let Some(format) = cli.render {
        opts.export.format = format;
    }
    if let Some(prefix) = &cli.table_prefix {
        opts.export.table_prefix = prefix.clone();
    }
    if let Some(dir) = &cli.output {
        opts.export.out_dir = Some(dir.clone());
    }
    Ok(opts)
}

fn log_target(cli: &Cli) -> (LogTarget, &'static str) {
    if cli.log_file {
        return (LogTarget::File, "debug");
    }
    let level = match cli.verbose {
        0 => "warn",
        1 => "warn,tns_scrape=info",
        _ => "warn,tns_scrape=debug",
    };
    (LogTarget::Stderr, level)
}

fn heading(kind: TableKind) -> &'static str {
    match kind {
        TableKind::Sources => "# Matched Transients",
        TableKind::Photometry => "# Transient Photometry",
        TableKind::Spectra => "# Transient Spectra",
        TableKind::Files => "# Transient Supplementary Files",
    }
}

fn print_results(results: &SearchResults, tables: &Tables, opts: &AppOptions) -> color_eyre::Result<()> {
    let n = results.sources.len();
    println!("{n} transient{} found", if n == 1 { "" } else { "s" });
    if results.is_empty() {
        return Ok(());
    }
    for kind in TableKind::ALL {
        println!("\n{}", heading(kind));
        print!("{}", render(tables.get(kind), opts.export.format, kind, &opts.export.table_prefix)?);
    }
    if let Some(url) = &results.url {
        println!("\n# Original TNS Search URL\n{url}");
    }
    Ok(())
}

pub fn run() -> color_eyre::Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> color_eyre::Result<()> {
    let (target, level) = log_target(&cli);
    log::init_with(target, level).wrap_err("setting up logging")?;
    let opts = resolve_options(&cli)?;

    let request = SearchRequest::new(cli.command.to_query()).with_comments(opts.include_comments);
    let client = HttpClient::new(opts.fetch.timeout)?;
    let mut progress = CliProgress::new();
    let results = search(&request, &opts.fetch, &client, Some(&mut progress))
        .wrap_err_with(|| format!("invalid query: {}", request.query))?;

    if !results.skipped.is_empty() {
        eprintln!("{} object block(s) could not be parsed and were skipped", results.skipped.len());
    }

    let tables = Tables::from_results(&results, opts.include_comments);
    if opts.export.out_dir.is_some() {
        let written = crate::file::write_tables(&tables, &opts.export, &results.file_prefix)?;
        for path in written {
            println!("{}", path.display());
        }
        return Ok(());
    }
    print_results(&results, &tables, &opts)
}
