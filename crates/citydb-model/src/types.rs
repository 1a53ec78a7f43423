// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for schema graph representation

use crate::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace-qualified name of a type or property
///
/// The textual form is Clark notation, `{namespace}localName`. Names without a
/// namespace are written as the bare local name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName {
    namespace: String,
    local_name: String,
}

impl QualifiedName {
    /// Create a qualified name from its parts
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
        }
    }

    /// Create a name in the empty namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self::new(String::new(), local_name)
    }

    /// Namespace URI (empty if unqualified)
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Local part of the name
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Whether the name carries no namespace
    pub fn is_unqualified(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Move an unqualified name into `namespace`; qualified names are kept as is
    pub fn or_namespace(self, namespace: &str) -> Self {
        if self.is_unqualified() {
            Self::new(namespace, self.local_name)
        } else {
            self
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.local_name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local_name)
        }
    }
}

impl FromStr for QualifiedName {
    type Err = SchemaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (namespace, local_name) = match s.strip_prefix('{') {
            Some(rest) => rest
                .split_once('}')
                .ok_or_else(|| SchemaError::invalid_name(s))?,
            None => ("", s),
        };

        if local_name.is_empty() || local_name.contains(['{', '}']) {
            return Err(SchemaError::invalid_name(s));
        }

        Ok(Self::new(namespace, local_name))
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = SchemaError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.to_string()
    }
}

/// Index of a type node in a schema graph
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize, Default)]
pub struct TypeId(pub u32);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T#{}", self.0)
    }
}

impl From<TypeId> for usize {
    fn from(id: TypeId) -> Self {
        id.0 as usize
    }
}

/// Index of a property edge in a schema graph
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize, Default)]
pub struct PropertyId(pub u32);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P#{}", self.0)
    }
}

impl From<PropertyId> for usize {
    fn from(id: PropertyId) -> Self {
        id.0 as usize
    }
}

/// What a property's value is
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKind {
    /// Value is an instance of a feature type (a composition edge)
    Feature,
    /// Attributes, geometries, references and everything else
    #[default]
    Other,
}

/// Typed edge from an owning type to a target type
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub name: QualifiedName,
    /// Type that declares the property
    pub owner: TypeId,
    /// Declared value type
    pub target: TypeId,
    /// Whether the declared value type is abstract
    pub target_abstract: bool,
    pub kind: PropertyKind,
}

impl Property {
    /// Whether this is a feature-valued composition edge
    pub fn is_composition(&self) -> bool {
        self.kind == PropertyKind::Feature
    }
}
