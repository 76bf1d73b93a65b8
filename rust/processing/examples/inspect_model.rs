// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runs every pipeline stage on a model document and prints what survives.
//!
//! Run with: cargo run -p stairscan-processing --example inspect_model -- path/to/model.json
//!
//! Tolerances can be overridden with `STAIRSCAN_*` variables, e.g.
//! `STAIRSCAN_ASPECT_MIN=3.0`.

use stairscan_core::load_models;
use stairscan_processing::{run_stage, PipelineConfig, PipelineStage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,stairscan_processing=debug".into()),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: inspect_model <model.json>")?;

    let config = PipelineConfig::from_env();
    config.validate()?;
    let models = load_models(&path)?;
    println!("{}: {} model(s)\n", path, models.len());

    for model in &models {
        println!("=== {} ({}) ===", model.name, model.id);
        println!(
            "  {} solids, {} faces, {} loops",
            model.solids.len(),
            model.face_count(),
            model.loop_count()
        );

        for stage in PipelineStage::STAGES {
            let report = run_stage(model, stage, &config)?;
            println!("  {:<18} {:>5}", stage, report.selected_count());

            if stage == PipelineStage::ClosedRectangle {
                if let Some(rejections) = &report.rejections {
                    println!(
                        "    rejected: {} wrong count ({} with 5 segments), {} broken, {} degenerate, {} not right-angled",
                        rejections.wrong_segment_count,
                        rejections.five_segment_loops,
                        rejections.broken_circuits,
                        rejections.degenerate,
                        rejections.not_right_angled
                    );
                }
            }

            let Some(summary) = report.summary else {
                continue;
            };
            for (tread, display) in report.treads.iter().zip(&summary.display_depths) {
                println!(
                    "    tread {}: depth {:.prec$} m",
                    tread.rectangle.id,
                    display,
                    prec = config.depth_precision as usize
                );
            }
            match summary.display_average {
                Some(average) => println!(
                    "  average depth {:.prec$} m over {} treads",
                    average,
                    summary.count,
                    prec = config.depth_precision as usize
                ),
                None => println!("  no treads found"),
            }
            if !summary.compliance.all_compliant() {
                println!(
                    "  {} tread(s) shallower than {} m",
                    summary.compliance.non_compliant.len(),
                    summary.compliance.min_tread_depth
                );
            }
        }
        println!();
    }

    Ok(())
}
