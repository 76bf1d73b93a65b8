// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stack disambiguation.
//!
//! Each step is a cuboid with a top and a bottom horizontal face sharing one
//! footprint. Rectangles are grouped by the planar distance of their centres
//! and only the highest member of each group is kept.
//!
//! Grouping is greedy single-link against the first member of each group,
//! so results depend on input order. Callers must pass rectangles in model
//! traversal order (solid → face → loop).

use serde::{Deserialize, Serialize};
use stairscan_core::{Point, StairModel};

use crate::config::PipelineConfig;
use crate::rectangle::{candidates_for, RectangleCandidate};
use crate::stage::LoopSelection;

/// Rectangles sharing one footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintGroup {
    /// Centre of the first rectangle that opened the group
    pub representative: Point,
    /// Indices into the grouped slice, in input order
    pub members: Vec<usize>,
}

/// Greedy footprint grouping in input order.
///
/// A rectangle joins the first group whose representative centre lies less
/// than `xy_tolerance` away in the XY plane; otherwise it opens a new group.
pub fn group_by_footprint(rectangles: &[RectangleCandidate], xy_tolerance: f64) -> Vec<FootprintGroup> {
    let mut groups: Vec<FootprintGroup> = Vec::new();

    for (index, rect) in rectangles.iter().enumerate() {
        let existing = groups
            .iter_mut()
            .find(|g| g.representative.planar_distance_to(&rect.center) < xy_tolerance);
        match existing {
            Some(group) => group.members.push(index),
            None => groups.push(FootprintGroup {
                representative: rect.center,
                members: vec![index],
            }),
        }
    }

    groups
}

/// Highest rectangle of each footprint group, in group order.
///
/// Ties on height keep the earlier member.
pub fn uppermost(rectangles: &[RectangleCandidate], xy_tolerance: f64) -> Vec<RectangleCandidate> {
    group_by_footprint(rectangles, xy_tolerance)
        .iter()
        .filter_map(|group| {
            group
                .members
                .iter()
                .map(|&i| &rectangles[i])
                .reduce(|best, r| if r.center.z > best.center.z { r } else { best })
        })
        .cloned()
        .collect()
}

/// UPPERMOST stage: top rectangle of every footprint among `candidates`.
pub fn uppermost_rectangles(
    model: &StairModel,
    candidates: &LoopSelection,
    config: &PipelineConfig,
) -> Vec<RectangleCandidate> {
    let rectangles = candidates_for(model, candidates);
    let kept = uppermost(&rectangles, config.stack_xy_tolerance);
    tracing::debug!(
        rectangles = rectangles.len(),
        footprints = kept.len(),
        "grouped rectangles by footprint"
    );
    kept
}
