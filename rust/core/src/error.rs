// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for model loading.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures while reading or decoding a model document.
///
/// These are distinct from a model that simply contains no stair treads.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read model file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model document contains no models")]
    EmptyDocument,

    #[error("expected a single model, found {0}")]
    MultipleModels(usize),
}
