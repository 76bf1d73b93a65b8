// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! StairScan Geometry
//!
//! Tolerance-aware vector geometry used by the tread classification stages:
//! coincidence tests, parallel/perpendicular checks on normalized edge
//! vectors, and perpendicular distance between (near) parallel lines.

pub mod error;
pub mod quad;
pub mod tolerance;
pub mod vector;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use quad::{centroid, corners_from_slice, side_lengths, sides, Corners};
pub use tolerance::{approx_eq, points_coincide, round_to, LENGTH_EPSILON};
pub use vector::{is_parallel, is_perpendicular, normalized, normalized_dot, perpendicular_distance};
