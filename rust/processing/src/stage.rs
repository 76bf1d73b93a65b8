// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage identifiers and the loop selections passed between stages.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use stairscan_core::{LoopId, StairModel};

use crate::error::Error;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStage {
    /// No filtering: every loop of the model
    All,
    /// 4- and 5-segment loops lying in one horizontal plane
    Horizontal,
    /// Closed 4-segment loops with right-angle structure
    ClosedRectangle,
    /// Top face of each stacked footprint
    Uppermost,
    /// Rectangles whose proportions match a tread
    AspectRatio,
    /// Treads with a measured depth
    DepthMeasurement,
}

impl PipelineStage {
    pub const STAGES: [PipelineStage; 6] = [
        PipelineStage::All,
        PipelineStage::Horizontal,
        PipelineStage::ClosedRectangle,
        PipelineStage::Uppermost,
        PipelineStage::AspectRatio,
        PipelineStage::DepthMeasurement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::All => "ALL",
            PipelineStage::Horizontal => "HORIZONTAL",
            PipelineStage::ClosedRectangle => "CLOSED_RECTANGLE",
            PipelineStage::Uppermost => "UPPERMOST",
            PipelineStage::AspectRatio => "ASPECT_RATIO",
            PipelineStage::DepthMeasurement => "DEPTH_MEASUREMENT",
        }
    }

    /// Whether this stage runs at or after `other`.
    #[inline]
    pub fn includes(&self, other: PipelineStage) -> bool {
        *self >= other
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PipelineStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        PipelineStage::STAGES
            .into_iter()
            .find(|stage| stage.as_str() == normalized)
            .ok_or_else(|| Error::UnknownStage(s.to_string()))
    }
}

/// Ordered set of loop identities produced by a stage.
///
/// Iteration follows insertion order; membership checks are O(1). Grouping
/// downstream depends on that order, so the hash set is never iterated.
#[derive(Debug, Clone, Default)]
pub struct LoopSelection {
    ids: Vec<LoopId>,
    members: FxHashSet<LoopId>,
}

impl LoopSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every loop of `model`, in traversal order.
    pub fn all(model: &StairModel) -> Self {
        model.loops().map(|(id, _)| id).collect()
    }

    /// Adds `id` unless already present. Returns whether it was added.
    pub fn insert(&mut self, id: LoopId) -> bool {
        if self.members.insert(id) {
            self.ids.push(id);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn contains(&self, id: &LoopId) -> bool {
        self.members.contains(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[LoopId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = LoopId> + '_ {
        self.ids.iter().copied()
    }

    pub fn into_ids(self) -> Vec<LoopId> {
        self.ids
    }
}

impl PartialEq for LoopSelection {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl Eq for LoopSelection {}

impl FromIterator<LoopId> for LoopSelection {
    fn from_iter<I: IntoIterator<Item = LoopId>>(iter: I) -> Self {
        let mut selection = LoopSelection::new();
        for id in iter {
            selection.insert(id);
        }
        selection
    }
}
