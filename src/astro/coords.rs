// src/astro/coords.rs
//! Sexagesimal ↔ decimal-degree conversion.
//!
//! Accepted input: `HH:MM:SS.ss` for right ascension and `±DD:MM:SS.ss` for
//! declination; colons or spaces separate the fields and the seconds field
//! may be omitted. The sign is read from the string, so `-00:30:00` stays
//! negative.

use std::sync::LazyLock;

use regex::Regex;

use super::Axis;
use crate::error::CoordError;

static SEXAGESIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^\s*
        ([+-])?                          # sign
        (\d{1,3})                        # hours or degrees
        [:\s]+
        (\d{1,2})                        # minutes
        (?:[:\s]+(\d{1,2}(?:\.\d*)?))?   # seconds, optional
        \s*$
        ",
    )
    .expect("sexagesimal pattern compiles")
});

/// Parse a sexagesimal RA or Dec string into decimal degrees.
pub fn sexagesimal_to_decimal(coord: &str, axis: Axis) -> Result<f64, CoordError> {
    let malformed = || CoordError::Malformed { input: coord.to_string(), axis };
    let out_of_range = || CoordError::OutOfRange { input: coord.to_string(), axis };

    let caps = SEXAGESIMAL.captures(coord).ok_or_else(malformed)?;
    let negative = caps.get(1).is_some_and(|m| m.as_str() == "-");
    let whole: f64 = caps[2].parse().map_err(|_| malformed())?;
    let minutes: f64 = caps[3].parse().map_err(|_| malformed())?;
    let seconds: f64 = match caps.get(4) {
        Some(m) => m.as_str().parse().map_err(|_| malformed())?,
        None => 0.0,
    };

    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(out_of_range());
    }
    let magnitude = whole + minutes / 60.0 + seconds / 3600.0;

    match axis {
        Axis::Ra => {
            if caps.get(1).is_some() {
                return Err(malformed());
            }
            if magnitude >= 24.0 {
                return Err(out_of_range());
            }
            Ok(magnitude * 15.0)
        }
        Axis::Dec => {
            if magnitude > 90.0 {
                return Err(out_of_range());
            }
            Ok(if negative { -magnitude } else { magnitude })
        }
    }
}

/// Accept either decimal degrees or sexagesimal text.
pub fn parse_coordinate(coord: &str, axis: Axis) -> Result<f64, CoordError> {
    let Ok(deg) = coord.trim().parse::<f64>() else {
        return sexagesimal_to_decimal(coord, axis);
    };
    let in_range = match axis {
        Axis::Ra => (0.0..360.0).contains(&deg),
        Axis::Dec => (-90.0..=90.0).contains(&deg),
    };
    if in_range {
        Ok(deg)
    } else {
        Err(CoordError::OutOfRange { input: coord.to_string(), axis })
    }
}

/// Decimal degrees → `HH:MM:SS.ss` (RA) or `±DD:MM:SS.ss` (Dec).
pub fn decimal_to_sexagesimal(deg: f64, axis: Axis) -> String {
    match axis {
        Axis::Ra => {
            let day = 24 * 3600 * 100;
            let total = ((deg / 15.0 * 3600.0 * 100.0).round() as i64).rem_euclid(day);
            let (h, m, s, cs) = split_hundredths(total);
            format!("{h:02}:{m:02}:{s:02}.{cs:02}")
        }
        Axis::Dec => {
            let sign = if deg < 0.0 { '-' } else { '+' };
            let total = (deg.abs() * 3600.0 * 100.0).round() as i64;
            let (d, m, s, cs) = split_hundredths(total);
            format!("{sign}{d:02}:{m:02}:{s:02}.{cs:02}")
        }
    }
}

fn split_hundredths(total: i64) -> (i64, i64, i64, i64) {
    let cs = total % 100;
    let secs = total / 100;
    (secs / 3600, (secs % 3600) / 60, secs % 60, cs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool { (a - b).abs() < tol }

    #[test]
    fn ra_scales_fifteen_degrees_per_hour() {
        let ra = sexagesimal_to_decimal("06:50:36.74", Axis::Ra).unwrap();
        assert!(close(ra, 102.653083, 1e-4), "{ra}");
        assert_eq!(sexagesimal_to_decimal("00:00:00", Axis::Ra).unwrap(), 0.0);
        assert!(close(sexagesimal_to_decimal("12 00 00", Axis::Ra).unwrap(), 180.0, 1e-12));
    }

    #[test]
    fn dec_keeps_sign_for_whole_value() {
        let dec = sexagesimal_to_decimal("-29:15:00", Axis::Dec).unwrap();
        assert!(close(dec, -29.25, 1e-9), "{dec}");
        let dec = sexagesimal_to_decimal("+31:06:44.7", Axis::Dec).unwrap();
        assert!(close(dec, 31.112417, 1e-5), "{dec}");
    }

    #[test]
    fn negative_zero_degrees_stays_negative() {
        let dec = sexagesimal_to_decimal("-00:30:00", Axis::Dec).unwrap();
        assert!(close(dec, -0.5, 1e-12), "{dec}");
    }

    #[test]
    fn rejects_garbage_and_out_of_range() {
        assert!(matches!(
            sexagesimal_to_decimal("not a coord", Axis::Ra),
            Err(CoordError::Malformed { .. })
        ));
        assert!(matches!(
            sexagesimal_to_decimal("24:00:00", Axis::Ra),
            Err(CoordError::OutOfRange { .. })
        ));
        assert!(matches!(
            sexagesimal_to_decimal("+91:00:00", Axis::Dec),
            Err(CoordError::OutOfRange { .. })
        ));
        assert!(matches!(
            sexagesimal_to_decimal("10:61:00", Axis::Dec),
            Err(CoordError::OutOfRange { .. })
        ));
        assert!(matches!(
            sexagesimal_to_decimal("-06:50:36", Axis::Ra),
            Err(CoordError::Malformed { .. })
        ));
    }

    #[test]
    fn decimal_input_passes_through() {
        assert_eq!(parse_coordinate("102.6530", Axis::Ra).unwrap(), 102.653);
        assert_eq!(parse_coordinate("-12.5", Axis::Dec).unwrap(), -12.5);
        assert!(parse_coordinate("400", Axis::Ra).is_err());
        assert!(close(parse_coordinate("06:50:36.74", Axis::Ra).unwrap(), 102.653083, 1e-4));
    }

    #[test]
    fn formatting_round_trips() {
        for (s, axis) in [
            ("06:50:36.74", Axis::Ra),
            ("23:59:59.99", Axis::Ra),
            ("+31:06:44.70", Axis::Dec),
            ("-29:15:00.00", Axis::Dec),
            ("-00:30:00.00", Axis::Dec),
        ] {
            let deg = sexagesimal_to_decimal(s, axis).unwrap();
            assert_eq!(decimal_to_sexagesimal(deg, axis), s);
        }
    }
}
