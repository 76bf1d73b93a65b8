// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Direction tests and line distances on segment vectors.

use nalgebra::Vector3;
use stairscan_core::Segment;

use crate::error::{Error, Result};
use crate::tolerance::LENGTH_EPSILON;

/// Unit vector along `v`, or `None` for a (near) zero-length vector.
#[inline]
pub fn normalized(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    v.try_normalize(LENGTH_EPSILON)
}

/// Dot product of the normalized inputs, `None` if either is degenerate.
pub fn normalized_dot(a: &Vector3<f64>, b: &Vector3<f64>) -> Option<f64> {
    Some(normalized(a)?.dot(&normalized(b)?))
}

/// Parallel or anti-parallel: normalized dot within `tolerance` of ±1.
///
/// Degenerate vectors are never parallel.
pub fn is_parallel(a: &Vector3<f64>, b: &Vector3<f64>, tolerance: f64) -> bool {
    normalized_dot(a, b).is_some_and(|dot| 1.0 - dot.abs() <= tolerance)
}

/// Perpendicular: normalized dot within `tolerance` of 0.
///
/// Degenerate vectors are never perpendicular.
pub fn is_perpendicular(a: &Vector3<f64>, b: &Vector3<f64>, tolerance: f64) -> bool {
    normalized_dot(a, b).is_some_and(|dot| dot.abs() <= tolerance)
}

/// Perpendicular distance between the infinite lines through two segments.
///
/// Uses `first`'s direction: the vector from `first.start` to `second.start`
/// minus its projection onto that direction. Only meaningful when the
/// segments are (near) parallel.
pub fn perpendicular_distance(first: &Segment, second: &Segment) -> Result<f64> {
    let direction = normalized(&first.direction())
        .ok_or(Error::DegenerateVector("first segment has zero length"))?;
    let connecting = second.start.to_nalgebra() - first.start.to_nalgebra();
    let perpendicular = connecting - direction * connecting.dot(&direction);
    Ok(perpendicular.norm())
}
