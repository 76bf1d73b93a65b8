// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the classification pipeline.
//!
//! Geometric irregularities (broken loops, non-horizontal faces, out-of-band
//! proportions) are classification outcomes and never show up here. These
//! variants cover bad configuration, load failures and wiring mistakes.

use stairscan_core::LoopId;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown pipeline stage: {0}")]
    UnknownStage(String),

    #[error("depth measurement needs exactly 4 corner points, got {found}")]
    WrongCornerCount { found: usize },

    #[error("loop {0} does not exist in the model")]
    UnknownLoop(LoopId),

    #[error(transparent)]
    Geometry(#[from] stairscan_geometry::Error),

    #[error(transparent)]
    Load(#[from] stairscan_core::Error),
}
