// src/astro/mod.rs
//! Sky-coordinate helpers: sexagesimal parsing/formatting and small-angle
//! offsets between two positions.

pub mod coords;
pub mod separation;

pub use coords::{decimal_to_sexagesimal, parse_coordinate, sexagesimal_to_decimal};
pub use separation::{Separation, separation};

/// Which celestial axis a coordinate string belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Right ascension, `HH:MM:SS.ss`, 15 degrees per hour.
    Ra,
    /// Declination, `±DD:MM:SS.ss`.
    Dec,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Ra => f.write_str("RA"),
            Axis::Dec => f.write_str("Dec"),
        }
    }
}
