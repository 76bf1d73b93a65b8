// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aspect-ratio classification: separates treads from landings.

use serde::{Deserialize, Serialize};
use stairscan_core::StairModel;
use stairscan_geometry::{side_lengths, Corners, LENGTH_EPSILON};

use crate::config::{AspectRatioBand, PipelineConfig};
use crate::rectangle::{candidates_for, RectangleCandidate};
use crate::stage::LoopSelection;

/// Proportions of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio {
    /// `long_side / short_side`, always >= 1
    pub ratio: f64,
    pub short_side: f64,
    pub long_side: f64,
}

/// Averages the two shortest and the two longest sides so that export noise
/// between opposite sides does not skew the ratio.
///
/// Returns `None` when the short side has zero length.
pub fn aspect_ratio(corners: &Corners) -> Option<AspectRatio> {
    let mut lengths = side_lengths(corners);
    lengths.sort_by(f64::total_cmp);

    let short_side = (lengths[0] + lengths[1]) / 2.0;
    let long_side = (lengths[2] + lengths[3]) / 2.0;
    if short_side <= LENGTH_EPSILON || !long_side.is_finite() {
        return None;
    }

    Some(AspectRatio {
        ratio: long_side / short_side,
        short_side,
        long_side,
    })
}

/// Annotates `rect` with its aspect ratio if it falls inside `band`.
pub fn classify_rectangle(mut rect: RectangleCandidate, band: &AspectRatioBand) -> Option<RectangleCandidate> {
    let aspect = aspect_ratio(&rect.corners)?;
    if !band.contains(aspect.ratio) {
        tracing::debug!(
            loop_id = %rect.id,
            ratio = aspect.ratio,
            min = band.min,
            max = band.max,
            "rectangle proportions outside tread band"
        );
        return None;
    }
    rect.aspect = Some(aspect);
    Some(rect)
}

/// ASPECT_RATIO stage: rectangles whose proportions match a tread.
pub fn aspect_ratio_rectangles(
    model: &StairModel,
    candidates: &LoopSelection,
    config: &PipelineConfig,
) -> Vec<RectangleCandidate> {
    candidates_for(model, candidates)
        .into_iter()
        .filter_map(|rect| classify_rectangle(rect, &config.aspect_ratio))
        .collect()
}
