// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feature type filter configuration

use crate::ConfigError;
use citydb_model::QualifiedName;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Allow-list of feature types for one import or export job
///
/// ```json
/// {
///   "defaultNamespace": "http://www.opengis.net/citygml/building/2.0",
///   "typeNames": ["Building", "{http://www.opengis.net/citygml/bridge/2.0}Bridge"]
/// }
/// ```
///
/// An empty or missing `typeNames` list disables filtering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeFilterConfig {
    /// Requested feature types
    pub type_names: Vec<QualifiedName>,
    /// Namespace for type names written without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_namespace: Option<String>,
}

impl TypeFilterConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a configuration from textual type names
    ///
    /// # Errors
    /// Fails on the first name that is not valid Clark notation.
    pub fn from_type_names<'a>(
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ConfigError> {
        let type_names = names
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<QualifiedName>, _>>()?;

        Ok(Self {
            type_names,
            default_namespace: None,
        })
    }

    /// Set the namespace for unqualified type names
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = Some(namespace.into());
        self
    }

    /// Effective set of requested names
    pub fn requested_names(&self) -> FxHashSet<QualifiedName> {
        self.type_names
            .iter()
            .cloned()
            .map(|name| match &self.default_namespace {
                Some(namespace) => name.or_namespace(namespace),
                None => name,
            })
            .collect()
    }
}
