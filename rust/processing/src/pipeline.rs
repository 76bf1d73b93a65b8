// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage orchestration.
//!
//! Runs the stages in order up to the requested one:
//! 1. ALL: every loop, untouched
//! 2. HORIZONTAL: 4/5-segment loops in one horizontal plane
//! 3. CLOSED_RECTANGLE: closed, right-angled 4-segment loops
//! 4. UPPERMOST: top rectangle of each stacked footprint
//! 5. ASPECT_RATIO: tread proportions only
//! 6. DEPTH_MEASUREMENT: long-edge distance per tread
//!
//! Every run starts from scratch and shares nothing with earlier runs.

use stairscan_core::{parse_models, StairModel};

use crate::aspect::aspect_ratio_rectangles;
use crate::config::PipelineConfig;
use crate::depth::measure_candidates;
use crate::error::Result;
use crate::horizontal::horizontal_loops;
use crate::rectangle::{closed_rectangles, RectangleCandidate};
use crate::report::{summarize_treads, StageCounts, StageReport};
use crate::stacking::uppermost_rectangles;
use crate::stage::{LoopSelection, PipelineStage};

fn selection_of(rectangles: &[RectangleCandidate]) -> LoopSelection {
    rectangles.iter().map(|r| r.id).collect()
}

/// Runs the pipeline on `model` up to and including `stage`.
///
/// # Errors
///
/// Only an invalid `config` fails; geometry that does not qualify is simply
/// absent from the report.
pub fn run_stage(
    model: &StairModel,
    stage: PipelineStage,
    config: &PipelineConfig,
) -> Result<StageReport> {
    config.validate()?;

    let offset = model.recentre_offset();
    let mut report = StageReport {
        model_id: model.id.clone(),
        model_name: model.name.clone(),
        stage,
        selected: Vec::new(),
        rectangles: Vec::new(),
        treads: Vec::new(),
        counts: StageCounts::default(),
        rejections: None,
        recentre_offset: [offset.x, offset.y, offset.z],
        summary: None,
    };

    let all = LoopSelection::all(model);
    report.counts.set(PipelineStage::All, all.len());
    if stage == PipelineStage::All {
        report.selected = all.into_ids();
        return Ok(finish(report));
    }

    let horizontal = horizontal_loops(model, &all, config);
    report.counts.set(PipelineStage::Horizontal, horizontal.len());
    if stage == PipelineStage::Horizontal {
        report.selected = horizontal.into_ids();
        return Ok(finish(report));
    }

    let rectangles = closed_rectangles(model, &horizontal, config);
    report.counts.set(PipelineStage::ClosedRectangle, rectangles.candidates.len());
    report.rejections = Some(rectangles.rejections.clone());
    let closed = rectangles.selection();
    if stage == PipelineStage::ClosedRectangle {
        report.selected = closed.into_ids();
        report.rectangles = rectangles.candidates;
        return Ok(finish(report));
    }

    let uppermost = uppermost_rectangles(model, &closed, config);
    report.counts.set(PipelineStage::Uppermost, uppermost.len());
    if stage == PipelineStage::Uppermost {
        report.selected = selection_of(&uppermost).into_ids();
        report.rectangles = uppermost;
        return Ok(finish(report));
    }

    let treads = aspect_ratio_rectangles(model, &selection_of(&uppermost), config);
    report.counts.set(PipelineStage::AspectRatio, treads.len());
    if stage == PipelineStage::AspectRatio {
        report.selected = selection_of(&treads).into_ids();
        report.rectangles = treads;
        return Ok(finish(report));
    }

    let measured = measure_candidates(&treads, config);
    report.counts.set(PipelineStage::DepthMeasurement, measured.len());
    report.selected = measured.iter().map(|t| t.rectangle.id).collect();
    report.rectangles = measured.iter().map(|t| t.rectangle.clone()).collect();
    report.summary = Some(summarize_treads(&measured, config));
    report.treads = measured;
    Ok(finish(report))
}

fn finish(report: StageReport) -> StageReport {
    let c = &report.counts;
    tracing::info!(
        model = %report.model_id,
        stage = %report.stage,
        all = c.all,
        horizontal = ?c.horizontal,
        closed_rectangle = ?c.closed_rectangle,
        uppermost = ?c.uppermost,
        aspect_ratio = ?c.aspect_ratio,
        measured = ?c.measured,
        "pipeline run complete"
    );
    if let Some(summary) = &report.summary {
        tracing::info!(
            model = %report.model_id,
            treads = summary.count,
            average_depth = ?summary.average,
            non_compliant = summary.compliance.non_compliant.len(),
            "tread depths measured"
        );
    }
    report
}

/// Full pipeline: every stage through depth measurement.
pub fn run_pipeline(model: &StairModel, config: &PipelineConfig) -> Result<StageReport> {
    run_stage(model, PipelineStage::DepthMeasurement, config)
}

/// Parses a model document and runs `stage` on every model in it.
///
/// # Errors
///
/// [`crate::Error::Load`] for documents that cannot be parsed, which is
/// distinct from models that parse but contain no treads.
pub fn analyze_json(
    json: &str,
    stage: PipelineStage,
    config: &PipelineConfig,
) -> Result<Vec<StageReport>> {
    let models = parse_models(json)?;
    models
        .iter()
        .map(|model| run_stage(model, stage, config))
        .collect()
}
