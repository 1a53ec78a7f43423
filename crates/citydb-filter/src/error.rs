// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for filter configuration

use citydb_model::SchemaError;
use thiserror::Error;

/// Errors that can occur while loading a filter configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Malformed JSON document
    #[error("Invalid filter configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed type name
    #[error(transparent)]
    Name(#[from] SchemaError),
}
