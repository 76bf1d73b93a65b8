// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tread depth measurement.
//!
//! The two longest sides of a validated rectangle are its parallel tread
//! edges; the perpendicular distance between them is the tread depth.

use serde::{Deserialize, Serialize};
use stairscan_core::{Point, Segment, StairModel};
use stairscan_geometry::{perpendicular_distance, round_to, sides, Corners};

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::rectangle::RectangleCandidate;
use crate::stage::LoopSelection;

/// Long edges of a tread and the distance between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthMeasurement {
    pub long_sides: [Segment; 2],
    pub long_side_lengths: [f64; 2],
    /// Full precision, used for aggregation
    pub depth: f64,
    /// Rounded to the configured precision, for display
    pub display_depth: f64,
}

/// A tread that made it through every stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredTread {
    pub rectangle: RectangleCandidate,
    pub measurement: DepthMeasurement,
}

/// Measures the depth of a rectangle given its 4 ordered corners.
///
/// Assumes the corners already passed the closure and right-angle checks so
/// the two longest sides are near-parallel.
///
/// # Errors
///
/// [`Error::WrongCornerCount`] when `points` is not exactly 4 long (a
/// pipeline wiring bug, not bad data) and [`Error::Geometry`] when the
/// longest side has zero length.
pub fn measure_depth(points: &[Point], precision: u32) -> Result<DepthMeasurement> {
    let corners: Corners = points
        .try_into()
        .map_err(|_| Error::WrongCornerCount { found: points.len() })?;

    let mut edges = sides(&corners);
    // stable: equal lengths keep loop order
    edges.sort_by(|a, b| b.length().total_cmp(&a.length()));
    let long_sides = [edges[0], edges[1]];

    let depth = perpendicular_distance(&long_sides[0], &long_sides[1])?;
    let display_depth = round_to(depth, precision);
    let long_side_lengths = [long_sides[0].length(), long_sides[1].length()];

    tracing::debug!(
        first_long_side = long_side_lengths[0],
        second_long_side = long_side_lengths[1],
        first_start = %long_sides[0].start,
        second_start = %long_sides[1].start,
        depth,
        display_depth,
        "measured tread depth"
    );

    Ok(DepthMeasurement {
        long_sides,
        long_side_lengths,
        depth,
        display_depth,
    })
}

/// DEPTH_MEASUREMENT stage: measures every loop of `candidates`.
///
/// # Errors
///
/// Ids missing from the model or loops without exactly 4 segments mean the
/// stage was fed the wrong selection and are reported as errors. Degenerate
/// geometry is logged and skipped.
pub fn measure_treads(
    model: &StairModel,
    candidates: &LoopSelection,
    config: &PipelineConfig,
) -> Result<Vec<MeasuredTread>> {
    let mut treads = Vec::with_capacity(candidates.len());

    for id in candidates.iter() {
        let lp = model.loop_by_id(id).ok_or(Error::UnknownLoop(id))?;
        let points = lp.start_points();
        let measurement = match measure_depth(&points, config.depth_precision) {
            Ok(m) => m,
            Err(Error::Geometry(e)) => {
                tracing::warn!(loop_id = %id, error = %e, "skipping tread with degenerate edges");
                continue;
            }
            Err(e) => return Err(e),
        };

        let Some(rectangle) = RectangleCandidate::from_loop(id, lp) else {
            return Err(Error::WrongCornerCount { found: lp.len() });
        };
        treads.push(MeasuredTread {
            rectangle,
            measurement,
        });
    }

    Ok(treads)
}

/// Measures already-built candidates, keeping any aspect annotation.
pub fn measure_candidates(
    rectangles: &[RectangleCandidate],
    config: &PipelineConfig,
) -> Vec<MeasuredTread> {
    rectangles
        .iter()
        .filter_map(|rect| match measure_depth(&rect.corners, config.depth_precision) {
            Ok(measurement) => Some(MeasuredTread {
                rectangle: rect.clone(),
                measurement,
            }),
            Err(e) => {
                tracing::warn!(loop_id = %rect.id, error = %e, "skipping unmeasurable tread");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use stairscan_core::{Face, Loop, LoopId, Solid};

    fn tread(x: f64, y: f64, z: f64, width: f64, depth: f64) -> Vec<Point> {
        vec![
            Point::new(x, y, z),
            Point::new(x + width, y, z),
            Point::new(x + width, y + depth, z),
            Point::new(x, y + depth, z),
        ]
    }

    #[test]
    fn depth_of_a_tread() {
        let m = measure_depth(&tread(0.0, 0.0, 0.2, 1.0, 0.3), 2).unwrap();
        assert_abs_diff_eq!(m.depth, 0.30, epsilon = 1e-6);
        assert_eq!(m.display_depth, 0.3);
        assert_abs_diff_eq!(m.long_side_lengths[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.long_side_lengths[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn position_along_the_edge_does_not_matter() {
        for x in [-10.0, 0.0, 3.3, 125.0] {
            let m = measure_depth(&tread(x, 4.0, 1.0, 1.0, 0.3), 2).unwrap();
            assert_abs_diff_eq!(m.depth, 0.30, epsilon = 1e-6);
        }
    }

    #[test]
    fn depth_along_x_axis() {
        // long sides run along y; depth is measured along x
        let m = measure_depth(&tread(2.0, 0.0, 0.0, 0.27, 1.1), 2).unwrap();
        assert_abs_diff_eq!(m.depth, 0.27, epsilon = 1e-9);
    }

    #[test]
    fn display_rounding_keeps_full_precision() {
        let m = measure_depth(&tread(0.0, 0.0, 0.0, 1.0, 0.2468), 2).unwrap();
        assert_abs_diff_eq!(m.depth, 0.2468, epsilon = 1e-9);
        assert_eq!(m.display_depth, 0.25);
        let m = measure_depth(&tread(0.0, 0.0, 0.0, 1.0, 0.2468), 3).unwrap();
        assert_eq!(m.display_depth, 0.247);
    }

    #[test]
    fn wrong_corner_count_is_an_error() {
        let mut points = tread(0.0, 0.0, 0.0, 1.0, 0.3);
        points.push(Point::ORIGIN);
        assert!(matches!(
            measure_depth(&points, 2),
            Err(Error::WrongCornerCount { found: 5 })
        ));
        assert!(matches!(
            measure_depth(&points[..3], 2),
            Err(Error::WrongCornerCount { found: 3 })
        ));
    }

    #[test]
    fn collapsed_rectangle_is_a_geometry_error() {
        let points = vec![Point::ORIGIN; 4];
        assert!(matches!(measure_depth(&points, 2), Err(Error::Geometry(_))));
    }

    #[test]
    fn stage_rejects_miswired_selection() {
        let mut five = Loop::from_points(&tread(0.0, 0.0, 0.0, 1.0, 0.3));
        let last = five.segments[3].end;
        five.segments.push(Segment::new(last, last));
        let model = StairModel::from_solids(
            "d",
            "depth",
            vec![Solid::new(vec![Face::new(vec![
                Loop::from_points(&tread(0.0, 0.0, 0.0, 1.0, 0.3)),
                five,
            ])])],
        );
        let config = PipelineConfig::default();

        let good: LoopSelection = [LoopId::new(0, 0, 0)].into_iter().collect();
        let treads = measure_treads(&model, &good, &config).unwrap();
        assert_eq!(treads.len(), 1);
        assert_abs_diff_eq!(treads[0].measurement.depth, 0.3, epsilon = 1e-9);

        let miswired: LoopSelection = [LoopId::new(0, 0, 1)].into_iter().collect();
        assert!(matches!(
            measure_treads(&model, &miswired, &config),
            Err(Error::WrongCornerCount { found: 5 })
        ));

        let unknown: LoopSelection = [LoopId::new(3, 0, 0)].into_iter().collect();
        assert!(matches!(
            measure_treads(&model, &unknown, &config),
            Err(Error::UnknownLoop(_))
        ));
    }
}
