// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stair tread classification and depth measurement
//!
//! Narrows the face loops of a B-rep stair model down to the treads and
//! measures each tread's depth for the minimum-depth safety check:
//! 1. Horizontal-plane filter
//! 2. Closed-rectangle validation
//! 3. Stack disambiguation (top face of each step cuboid)
//! 4. Aspect-ratio classification (treads vs. landings)
//! 5. Depth measurement between the long edges
//! 6. Aggregation
//!
//! Each stage is a pure function of the model, the selection produced by
//! the previous stage and the configuration, so any stage can be inspected
//! on its own.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stairscan_processing::{run_stage, PipelineConfig, PipelineStage};
//!
//! let model = stairscan_core::parse_model(&json)?;
//! let report = run_stage(&model, PipelineStage::DepthMeasurement, &PipelineConfig::default())?;
//! if let Some(summary) = report.summary {
//!     println!("{} treads, average depth {:?}", summary.count, summary.average);
//! }
//! ```

pub mod aspect;
pub mod config;
pub mod depth;
pub mod error;
pub mod horizontal;
pub mod pipeline;
pub mod rectangle;
pub mod report;
pub mod stacking;
pub mod stage;

pub use aspect::{aspect_ratio, aspect_ratio_rectangles, AspectRatio};
pub use config::{AspectRatioBand, PipelineConfig};
pub use depth::{measure_candidates, measure_depth, measure_treads, DepthMeasurement, MeasuredTread};
pub use error::{Error, Result};
pub use horizontal::{horizontal_loops, is_horizontal, is_plane_candidate};
pub use pipeline::{analyze_json, run_pipeline, run_stage};
pub use rectangle::{
    classify_loop, closed_rectangles, is_closed_circuit, is_closed_rectangle, LoopShape,
    RectangleCandidate, RectangleRejections, RectangleStage,
};
pub use report::{summarize_depths, summarize_treads, Compliance, DepthSummary, StageCounts, StageReport};
pub use stacking::{group_by_footprint, uppermost, uppermost_rectangles, FootprintGroup};
pub use stage::{LoopSelection, PipelineStage};
