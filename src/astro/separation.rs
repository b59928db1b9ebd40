// src/astro/separation.rs

/// Offset of a candidate position from the query centre, all in arcsec.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Separation {
    pub arcsec: f64,
    /// Positive when the candidate lies north of the centre.
    pub north_arcsec: f64,
    /// Positive when the candidate lies east of the centre.
    pub east_arcsec: f64,
}

/// Separation of (`ra2`, `dec2`) from (`ra1`, `dec1`), decimal degrees in.
pub fn separation(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> Separation {
    let delta_ra = wrap_degrees(ra2 - ra1);
    let (d1_sin, d1_cos) = dec1.to_radians().sin_cos();
    let (d2_sin, d2_cos) = dec2.to_radians().sin_cos();

    let total = vincenty(d1_sin, d1_cos, d2_sin, d2_cos, delta_ra.to_radians());

    Separation {
        arcsec: total.to_degrees() * 3600.0,
        north_arcsec: (dec2 - dec1) * 3600.0,
        east_arcsec: delta_ra * d1_cos * 3600.0,
    }
}

// Vincenty form of the great-circle distance; well conditioned at small
// angles where the haversine/cosine forms lose precision.
fn vincenty(d1_sin: f64, d1_cos: f64, d2_sin: f64, d2_cos: f64, delta_lon: f64) -> f64 {
    let (dl_sin, dl_cos) = delta_lon.sin_cos();
    let a = d2_cos * dl_sin;
    let b = d1_cos * d2_sin - d1_sin * d2_cos * dl_cos;
    let num = (a * a + b * b).sqrt();
    let den = d1_sin * d2_sin + d1_cos * d2_cos * dl_cos;
    num.atan2(den)
}

/// Into (-180, 180].
fn wrap_degrees(d: f64) -> f64 {
    let w = (d + 180.0).rem_euclid(360.0) - 180.0;
    if w == -180.0 { 180.0 } else { w }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::{Axis, sexagesimal_to_decimal};

    fn deg(ra: &str, dec: &str) -> (f64, f64) {
        (
            sexagesimal_to_decimal(ra, Axis::Ra).unwrap(),
            sexagesimal_to_decimal(dec, Axis::Dec).unwrap(),
        )
    }

    #[test]
    fn sub_arcsecond_offsets() {
        let (ra1, dec1) = deg("06:50:36.74", "+31:06:44.7");
        let (ra2, dec2) = deg("06:50:36.73", "+31:06:45.36");
        let s = separation(ra1, dec1, ra2, dec2);
        assert!((s.arcsec - 0.6724).abs() < 1e-3, "{s:?}");
        assert!((s.north_arcsec - 0.66).abs() < 1e-6, "{s:?}");
        assert!((s.east_arcsec + 0.1284).abs() < 1e-3, "{s:?}");
    }

    #[test]
    fn same_position_is_zero() {
        let s = separation(10.0, -45.0, 10.0, -45.0);
        assert_eq!(s.arcsec, 0.0);
        assert_eq!(s.north_arcsec, 0.0);
        assert_eq!(s.east_arcsec, 0.0);
    }

    #[test]
    fn ra_difference_wraps_through_zero() {
        let s = separation(359.999, 0.0, 0.001, 0.0);
        assert!((s.east_arcsec - 7.2).abs() < 1e-6, "{s:?}");
        assert!((s.arcsec - 7.2).abs() < 1e-6, "{s:?}");
    }

    #[test]
    fn large_angles_stay_exact() {
        let s = separation(0.0, 0.0, 90.0, 0.0);
        assert!((s.arcsec - 90.0 * 3600.0).abs() < 1e-6);
        let s = separation(0.0, -90.0, 123.0, 90.0);
        assert!((s.arcsec - 180.0 * 3600.0).abs() < 1e-6);
    }
}
