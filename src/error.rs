// src/error.rs
//! Error types for the search pipeline.
//!
//! Only misuse of the query interface is fatal to a search. Transport failures
//! are retried and then swallowed by the fetch loop (partial results), and a
//! block that does not match the page grammar becomes a [`SkipReason`] rather
//! than an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::astro::Axis;

/// Misuse of the query interface. The only error a search returns.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("name search needs a non-empty name")]
    EmptyName,

    #[error("invalid cone coordinate: {0}")]
    InvalidCoordinate(#[from] CoordError),

    #[error("cone radius must be a positive number of arcsec, got {0}")]
    InvalidRadius(f64),

    #[error("discovery window must be at least one day, got {0}")]
    InvalidWindow(u32),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    #[error("cannot parse {axis} value '{input}'")]
    Malformed { input: String, axis: Axis },

    #[error("{axis} value '{input}' is out of range")]
    OutOfRange { input: String, axis: Axis },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("could not build HTTP client: {0}")]
    Client(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("batch size must be at least 1")]
    ZeroBatchSize,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Why a segmented block produced no records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The block's discovery row does not match the page grammar.
    DiscoveryMismatch { snippet: String },
    /// The discovery row matched but its coordinates could not be converted.
    BadCoordinates { tns_name: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::DiscoveryMismatch { snippet } => {
                write!(f, "discovery row not recognised near '{snippet}'")
            }
            SkipReason::BadCoordinates { tns_name } => {
                write!(f, "unusable coordinates for {tns_name}")
            }
        }
    }
}
