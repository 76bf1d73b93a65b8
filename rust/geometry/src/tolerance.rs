// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Absolute-tolerance comparisons
//!
//! CAD exports are sometimes bit-exact and sometimes off by float noise, so
//! every equality test goes through a tolerance, never `==`.

use stairscan_core::Point;

/// Smallest length treated as non-zero when normalizing.
pub const LENGTH_EPSILON: f64 = 1e-10;

/// `|a - b| <= tolerance`
#[inline]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Per-axis coincidence: each coordinate differs by at most `tolerance`.
#[inline]
pub fn points_coincide(a: &Point, b: &Point, tolerance: f64) -> bool {
    approx_eq(a.x, b.x, tolerance) && approx_eq(a.y, b.y, tolerance) && approx_eq(a.z, b.z, tolerance)
}

/// Round to `decimals` decimal places.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_is_inclusive() {
        assert!(approx_eq(3.0, 3.0, 0.0));
        assert!(approx_eq(3.0, 3.0005, 1e-3));
        assert!(!approx_eq(3.0, 3.2, 1e-3));
    }

    #[test]
    fn coincidence_checks_every_axis() {
        let a = Point::new(1.0, 2.0, 3.0);
        assert!(points_coincide(&a, &Point::new(1.0005, 1.9995, 3.0), 1e-3));
        assert!(!points_coincide(&a, &Point::new(1.0, 2.0, 3.01), 1e-3));
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(0.30000000004, 2), 0.3);
        assert_eq!(round_to(0.276, 2), 0.28);
        assert_eq!(round_to(1.23456, 0), 1.0);
    }
}
