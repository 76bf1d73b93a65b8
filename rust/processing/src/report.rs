// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-model aggregation handed to the presentation layer.
//!
//! Everything here is plain data; formatting is the consumer's business.

use serde::{Deserialize, Serialize};
use stairscan_core::LoopId;
use stairscan_geometry::round_to;

use crate::config::PipelineConfig;
use crate::depth::MeasuredTread;
use crate::rectangle::{RectangleCandidate, RectangleRejections};
use crate::stage::PipelineStage;

/// Candidate counts per stage; `None` for stages that were not run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCounts {
    pub all: usize,
    pub horizontal: Option<usize>,
    pub closed_rectangle: Option<usize>,
    pub uppermost: Option<usize>,
    pub aspect_ratio: Option<usize>,
    pub measured: Option<usize>,
}

impl StageCounts {
    pub fn get(&self, stage: PipelineStage) -> Option<usize> {
        match stage {
            PipelineStage::All => Some(self.all),
            PipelineStage::Horizontal => self.horizontal,
            PipelineStage::ClosedRectangle => self.closed_rectangle,
            PipelineStage::Uppermost => self.uppermost,
            PipelineStage::AspectRatio => self.aspect_ratio,
            PipelineStage::DepthMeasurement => self.measured,
        }
    }

    pub(crate) fn set(&mut self, stage: PipelineStage, count: usize) {
        match stage {
            PipelineStage::All => self.all = count,
            PipelineStage::Horizontal => self.horizontal = Some(count),
            PipelineStage::ClosedRectangle => self.closed_rectangle = Some(count),
            PipelineStage::Uppermost => self.uppermost = Some(count),
            PipelineStage::AspectRatio => self.aspect_ratio = Some(count),
            PipelineStage::DepthMeasurement => self.measured = Some(count),
        }
    }

    /// Counts never grow from one executed stage to the next.
    pub fn is_monotonic(&self) -> bool {
        let counts: Vec<usize> = PipelineStage::STAGES
            .iter()
            .map_while(|&stage| self.get(stage))
            .collect();
        counts.windows(2).all(|w| w[1] <= w[0])
    }
}

/// Safety check of measured depths against the minimum tread depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compliance {
    pub min_tread_depth: f64,
    pub compliant: usize,
    /// Indices into [`DepthSummary::depths`] of treads that are too shallow
    pub non_compliant: Vec<usize>,
}

impl Compliance {
    pub fn all_compliant(&self) -> bool {
        self.non_compliant.is_empty()
    }
}

/// Aggregate depth statistics for one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSummary {
    pub count: usize,
    /// Full-precision depths in tread order
    pub depths: Vec<f64>,
    pub display_depths: Vec<f64>,
    /// `None` when there are no treads
    pub average: Option<f64>,
    pub display_average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub compliance: Compliance,
}

/// Summarizes full-precision depths.
///
/// The safety check compares the display-rounded depth so that a value shown
/// as "0.25" never fails a 0.25 minimum.
pub fn summarize_depths(depths: &[f64], config: &PipelineConfig) -> DepthSummary {
    let precision = config.depth_precision;
    let count = depths.len();
    let display_depths: Vec<f64> = depths.iter().map(|&d| round_to(d, precision)).collect();

    let average = (count > 0).then(|| depths.iter().sum::<f64>() / count as f64);
    let min = depths.iter().copied().reduce(f64::min);
    let max = depths.iter().copied().reduce(f64::max);

    let non_compliant: Vec<usize> = display_depths
        .iter()
        .enumerate()
        .filter(|(_, d)| **d < config.min_tread_depth)
        .map(|(i, _)| i)
        .collect();

    DepthSummary {
        count,
        depths: depths.to_vec(),
        display_depths,
        average,
        display_average: average.map(|a| round_to(a, precision)),
        min,
        max,
        compliance: Compliance {
            min_tread_depth: config.min_tread_depth,
            compliant: count - non_compliant.len(),
            non_compliant,
        },
    }
}

pub fn summarize_treads(treads: &[MeasuredTread], config: &PipelineConfig) -> DepthSummary {
    let depths: Vec<f64> = treads.iter().map(|t| t.measurement.depth).collect();
    summarize_depths(&depths, config)
}

/// Result of running the pipeline up to one stage on one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    pub model_id: String,
    pub model_name: String,
    pub stage: PipelineStage,
    /// Loop identities qualifying at `stage`
    pub selected: Vec<LoopId>,
    /// Rectangle candidates at `stage` (rectangle stages only)
    pub rectangles: Vec<RectangleCandidate>,
    /// Measured treads (final stage only)
    pub treads: Vec<MeasuredTread>,
    pub counts: StageCounts,
    /// Closed-rectangle rejection reasons, once that stage has run
    pub rejections: Option<RectangleRejections>,
    /// Translation that recentres the model's bounding box on the origin
    pub recentre_offset: [f64; 3],
    /// Depth statistics (final stage only)
    pub summary: Option<DepthSummary>,
}

impl StageReport {
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn summary_of_three_treads() {
        let config = PipelineConfig::default();
        let summary = summarize_depths(&[0.30, 0.28, 0.244], &config);
        assert_eq!(summary.count, 3);
        assert_relative_eq!(summary.average.unwrap(), 0.274667, epsilon = 1e-6);
        assert_eq!(summary.display_average, Some(0.27));
        assert_eq!(summary.display_depths, vec![0.3, 0.28, 0.24]);
        assert_eq!(summary.min, Some(0.244));
        assert_eq!(summary.max, Some(0.30));
        assert_eq!(summary.compliance.compliant, 2);
        assert_eq!(summary.compliance.non_compliant, vec![2]);
        assert!(!summary.compliance.all_compliant());
    }

    #[test]
    fn empty_summary_has_no_average() {
        let summary = summarize_depths(&[], &PipelineConfig::default());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, None);
        assert_eq!(summary.display_average, None);
        assert_eq!(summary.min, None);
        assert!(summary.compliance.all_compliant());
        // serializes as null, never NaN
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"average\":null"));
    }

    #[test]
    fn rounded_depth_at_the_limit_is_compliant() {
        let summary = summarize_depths(&[0.2496], &PipelineConfig::default());
        assert_eq!(summary.display_depths, vec![0.25]);
        assert!(summary.compliance.all_compliant());
    }

    #[test]
    fn monotonic_counts() {
        let mut counts = StageCounts {
            all: 10,
            ..Default::default()
        };
        counts.set(PipelineStage::Horizontal, 6);
        counts.set(PipelineStage::ClosedRectangle, 4);
        assert!(counts.is_monotonic());
        assert_eq!(counts.get(PipelineStage::Uppermost), None);

        counts.set(PipelineStage::Uppermost, 5);
        assert!(!counts.is_monotonic());
    }
}
