// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Horizontal-plane filter.
//!
//! A loop is horizontal when every endpoint shares the z of the first
//! segment's start within tolerance. Only 4- and 5-segment loops are plane
//! candidates; longer outlines are never treads.

use stairscan_core::{Loop, StairModel};
use stairscan_geometry::approx_eq;

use crate::config::PipelineConfig;
use crate::stage::LoopSelection;

/// Segment counts that can describe a tread outline (5 covers the known
/// duplicated-segment export anomaly).
pub const PLANE_CANDIDATE_SEGMENTS: std::ops::RangeInclusive<usize> = 4..=5;

/// Every segment start and end lies at the reference z within `tolerance`.
///
/// Empty loops are never horizontal.
pub fn is_horizontal(lp: &Loop, tolerance: f64) -> bool {
    let Some(first) = lp.segments.first() else {
        return false;
    };
    let reference = first.start.z;
    lp.endpoints().all(|p| approx_eq(p.z, reference, tolerance))
}

/// Horizontal loop with a plausible tread segment count.
pub fn is_plane_candidate(lp: &Loop, tolerance: f64) -> bool {
    PLANE_CANDIDATE_SEGMENTS.contains(&lp.len()) && is_horizontal(lp, tolerance)
}

/// HORIZONTAL stage: keeps the plane candidates of `candidates`.
pub fn horizontal_loops(
    model: &StairModel,
    candidates: &LoopSelection,
    config: &PipelineConfig,
) -> LoopSelection {
    candidates
        .iter()
        .filter(|id| {
            model
                .loop_by_id(*id)
                .is_some_and(|lp| is_plane_candidate(lp, config.horizontal_tolerance))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stairscan_core::{Face, LoopId, Point, Solid};

    fn square(z: f64) -> Loop {
        Loop::from_points(&[
            Point::new(0.0, 0.0, z),
            Point::new(1.0, 0.0, z),
            Point::new(1.0, 1.0, z),
            Point::new(0.0, 1.0, z),
        ])
    }

    #[test]
    fn flat_loop_is_horizontal() {
        assert!(is_horizontal(&square(3.0), 1e-3));
        // bit-exact data passes with a zero tolerance too
        assert!(is_horizontal(&square(3.0), 0.0));
    }

    #[test]
    fn raised_endpoint_is_not_horizontal() {
        let mut lp = square(3.0);
        lp.segments[2].end.z = 3.2;
        assert!(!is_horizontal(&lp, 1e-3));
    }

    #[test]
    fn noise_within_tolerance_is_horizontal() {
        let mut lp = square(3.0);
        lp.segments[1].start.z = 3.0004;
        assert!(is_horizontal(&lp, 1e-3));
        assert!(!is_horizontal(&lp, 1e-5));
    }

    #[test]
    fn empty_loop_is_not_horizontal() {
        assert!(!is_horizontal(&Loop::default(), 1.0));
    }

    #[test]
    fn segment_count_gates_plane_candidates() {
        let triangle = Loop::from_points(&[
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(0.0, 1.0, 1.0),
        ]);
        let hexagon = Loop::from_points(
            &(0..6)
                .map(|i| {
                    let a = i as f64 * std::f64::consts::PI / 3.0;
                    Point::new(a.cos(), a.sin(), 1.0)
                })
                .collect::<Vec<_>>(),
        );
        let mut five = square(1.0);
        five.segments.push(five.segments[3]);

        assert!(is_horizontal(&triangle, 1e-3));
        assert!(!is_plane_candidate(&triangle, 1e-3));
        assert!(!is_plane_candidate(&hexagon, 1e-3));
        assert!(is_plane_candidate(&five, 1e-3));
        assert!(is_plane_candidate(&square(1.0), 1e-3));
    }

    #[test]
    fn stage_only_narrows_its_input() {
        let mut vertical = square(0.0);
        for seg in &mut vertical.segments {
            std::mem::swap(&mut seg.start.y, &mut seg.start.z);
            std::mem::swap(&mut seg.end.y, &mut seg.end.z);
        }
        let model = StairModel::from_solids(
            "h",
            "horizontal",
            vec![Solid::new(vec![
                Face::new(vec![square(0.0)]),
                Face::new(vec![vertical]),
                Face::new(vec![square(1.0)]),
            ])],
        );

        let all = LoopSelection::all(&model);
        let config = PipelineConfig::default();
        let horizontal = horizontal_loops(&model, &all, &config);
        assert_eq!(
            horizontal.ids(),
            &[LoopId::new(0, 0, 0), LoopId::new(0, 2, 0)]
        );

        // a narrower input is never widened
        let only_last: LoopSelection = [LoopId::new(0, 2, 0)].into_iter().collect();
        assert_eq!(horizontal_loops(&model, &only_last, &config).len(), 1);
    }
}
