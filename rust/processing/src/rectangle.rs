// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed-rectangle validation.
//!
//! A rectangle candidate is a 4-segment loop that
//! 1. closes: each segment's end meets the next segment's start (wrapping)
//! 2. has right-angle structure: opposite edges parallel, adjacent edges
//!    perpendicular, judged on normalized edge vectors
//!
//! Loops failing either check are excluded, never repaired. Broken circuits
//! in real exports are a modelling defect for the user to fix; the space of
//! possible malformations is unbounded.

use serde::{Deserialize, Serialize};
use stairscan_core::{Loop, LoopId, Point, StairModel};
use stairscan_geometry::{centroid, is_parallel, is_perpendicular, normalized, points_coincide, Corners};

use crate::aspect::AspectRatio;
use crate::config::PipelineConfig;
use crate::stage::LoopSelection;

/// Outcome of validating one loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopShape {
    /// Closed, right-angled 4-segment loop
    Rectangle,
    /// Not 4 segments
    WrongSegmentCount(usize),
    /// `segments[segment].end` does not meet the next segment's start
    BrokenCircuit { segment: usize },
    /// At least one zero-length side
    Degenerate,
    /// Closed but the edge directions are not rectangular
    NotRightAngled,
}

/// Counts of loops rejected by the closed-rectangle stage, by reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectangleRejections {
    pub wrong_segment_count: usize,
    /// 5-segment loops (the duplicated-segment export anomaly)
    pub five_segment_loops: usize,
    /// 5-segment loops where one segment is (near) zero length
    pub five_segment_with_degenerate_side: usize,
    pub broken_circuits: usize,
    pub degenerate: usize,
    pub not_right_angled: usize,
}

impl RectangleRejections {
    pub fn total(&self) -> usize {
        self.wrong_segment_count + self.broken_circuits + self.degenerate + self.not_right_angled
    }

    fn record(&mut self, shape: LoopShape) {
        match shape {
            LoopShape::Rectangle => {}
            LoopShape::WrongSegmentCount(_) => self.wrong_segment_count += 1,
            LoopShape::BrokenCircuit { .. } => self.broken_circuits += 1,
            LoopShape::Degenerate => self.degenerate += 1,
            LoopShape::NotRightAngled => self.not_right_angled += 1,
        }
    }
}

/// A loop accepted as a rectangle, with the data later stages derive from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleCandidate {
    pub id: LoopId,
    /// Segment start points, in loop order
    pub corners: Corners,
    pub center: Point,
    /// Filled in by the aspect-ratio stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<AspectRatio>,
}

impl RectangleCandidate {
    /// Corners and centre of a 4-segment loop. Does not validate the shape.
    pub fn from_loop(id: LoopId, lp: &Loop) -> Option<Self> {
        if lp.len() != 4 {
            return None;
        }
        let corners: Corners = std::array::from_fn(|i| lp.segments[i].start);
        Some(Self {
            id,
            corners,
            center: centroid(&corners),
            aspect: None,
        })
    }
}

/// Every segment end meets the following segment's start (wrapping) within
/// `tolerance` per axis. Returns the first segment whose end does not.
pub fn find_circuit_break(lp: &Loop, tolerance: f64) -> Option<usize> {
    let n = lp.len();
    (0..n).find(|&i| {
        let next = &lp.segments[(i + 1) % n];
        !points_coincide(&lp.segments[i].end, &next.start, tolerance)
    })
}

pub fn is_closed_circuit(lp: &Loop, tolerance: f64) -> bool {
    !lp.is_empty() && find_circuit_break(lp, tolerance).is_none()
}

/// Classifies a loop against the closed-rectangle rules.
pub fn classify_loop(lp: &Loop, config: &PipelineConfig) -> LoopShape {
    if lp.len() != 4 {
        return LoopShape::WrongSegmentCount(lp.len());
    }
    if let Some(segment) = find_circuit_break(lp, config.closure_tolerance) {
        return LoopShape::BrokenCircuit { segment };
    }

    let edges: Vec<_> = lp.segments.iter().map(|s| s.direction()).collect();
    if edges.iter().any(|e| normalized(e).is_none()) {
        return LoopShape::Degenerate;
    }

    let tolerance = config.angle_tolerance;
    let right_angled = is_parallel(&edges[0], &edges[2], tolerance)
        && is_parallel(&edges[1], &edges[3], tolerance)
        && is_perpendicular(&edges[0], &edges[1], tolerance);
    if right_angled {
        LoopShape::Rectangle
    } else {
        LoopShape::NotRightAngled
    }
}

pub fn is_closed_rectangle(lp: &Loop, config: &PipelineConfig) -> bool {
    classify_loop(lp, config) == LoopShape::Rectangle
}

/// Output of the closed-rectangle stage
#[derive(Debug, Clone, Default)]
pub struct RectangleStage {
    pub candidates: Vec<RectangleCandidate>,
    pub rejections: RectangleRejections,
}

impl RectangleStage {
    pub fn selection(&self) -> LoopSelection {
        self.candidates.iter().map(|c| c.id).collect()
    }
}

/// CLOSED_RECTANGLE stage: validates each candidate loop.
///
/// Expects horizontal plane candidates as input; anything else is simply
/// validated on its own merits.
pub fn closed_rectangles(
    model: &StairModel,
    candidates: &LoopSelection,
    config: &PipelineConfig,
) -> RectangleStage {
    let mut stage = RectangleStage::default();

    for id in candidates.iter() {
        let Some(lp) = model.loop_by_id(id) else {
            continue;
        };

        let shape = classify_loop(lp, config);
        match shape {
            LoopShape::Rectangle => {
                if let Some(candidate) = RectangleCandidate::from_loop(id, lp) {
                    stage.candidates.push(candidate);
                }
            }
            LoopShape::WrongSegmentCount(5) => {
                stage.rejections.five_segment_loops += 1;
                let shortest = lp
                    .segments
                    .iter()
                    .map(|s| s.length())
                    .fold(f64::INFINITY, f64::min);
                if shortest <= config.closure_tolerance {
                    stage.rejections.five_segment_with_degenerate_side += 1;
                    tracing::debug!(
                        loop_id = %id,
                        shortest_segment = shortest,
                        "5-segment loop with a near-zero segment, not repaired"
                    );
                } else {
                    tracing::debug!(loop_id = %id, "5-segment loop excluded from rectangles");
                }
            }
            LoopShape::BrokenCircuit { segment } => {
                tracing::debug!(loop_id = %id, segment, "broken loop: circuit does not close");
            }
            LoopShape::Degenerate => {
                tracing::debug!(loop_id = %id, "degenerate loop: zero-length side");
            }
            LoopShape::WrongSegmentCount(_) | LoopShape::NotRightAngled => {}
        }
        stage.rejections.record(shape);
    }

    stage
}

/// Rebuilds rectangle candidates for the ids in `selection`.
///
/// Ids that are missing from the model or not 4-segment loops are skipped.
pub fn candidates_for(model: &StairModel, selection: &LoopSelection) -> Vec<RectangleCandidate> {
    selection
        .iter()
        .filter_map(|id| RectangleCandidate::from_loop(id, model.loop_by_id(id)?))
        .collect()
}
