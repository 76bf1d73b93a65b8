// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Four-corner outlines
//!
//! Rectangle candidates are carried as their four ordered corners; sides are
//! rebuilt from consecutive corners (wrapping), so they always form a circuit.

use nalgebra::Vector3;
use stairscan_core::{Point, Segment};

use crate::error::{Error, Result};

pub type Corners = [Point; 4];

/// Converts a point slice into four corners.
pub fn corners_from_slice(points: &[Point]) -> Result<Corners> {
    <Corners>::try_from(points).map_err(|_| Error::WrongPointCount {
        expected: 4,
        found: points.len(),
    })
}

/// Sides `corners[i] → corners[i + 1]`, wrapping.
pub fn sides(corners: &Corners) -> [Segment; 4] {
    std::array::from_fn(|i| Segment::new(corners[i], corners[(i + 1) % 4]))
}

pub fn side_lengths(corners: &Corners) -> [f64; 4] {
    sides(corners).map(|s| s.length())
}

/// Arithmetic mean of the corners.
pub fn centroid(corners: &Corners) -> Point {
    let sum = corners
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.to_nalgebra().coords);
    let mean = sum / 4.0;
    Point::new(mean.x, mean.y, mean.z)
}
