// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON model loading
//!
//! A document is either a single model object or an array of models.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::StairModel;

/// Parses every model in a JSON document.
///
/// An empty array is reported as [`Error::EmptyDocument`].
pub fn parse_models(json: &str) -> Result<Vec<StairModel>> {
    let value: Value = serde_json::from_str(json)?;
    let models = if value.is_array() {
        serde_json::from_value::<Vec<StairModel>>(value)?
    } else {
        vec![serde_json::from_value::<StairModel>(value)?]
    };

    if models.is_empty() {
        return Err(Error::EmptyDocument);
    }
    Ok(models)
}

/// Parses a document that must contain exactly one model.
pub fn parse_model(json: &str) -> Result<StairModel> {
    let mut models = parse_models(json)?;
    if models.len() != 1 {
        return Err(Error::MultipleModels(models.len()));
    }
    Ok(models.remove(0))
}

/// Reads and parses a model document from disk.
pub fn load_models(path: impl AsRef<Path>) -> Result<Vec<StairModel>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_models(&content)
}
