// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for schema graph construction

use crate::QualifiedName;
use thiserror::Error;

/// Result type alias for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors that can occur while naming or assembling schema types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Malformed qualified name
    #[error("Invalid qualified name '{0}'")]
    InvalidName(String),

    /// The same type name was declared twice
    #[error("Type {0} is declared more than once")]
    DuplicateType(QualifiedName),

    /// The same property name was declared twice on one owner
    #[error("Property {property} is declared more than once on {owner}")]
    DuplicateProperty {
        owner: QualifiedName,
        property: QualifiedName,
    },

    /// A supertype, owner or target references an undeclared type
    #[error("Unknown type {name} referenced by {referenced_by}")]
    UnknownType {
        referenced_by: QualifiedName,
        name: QualifiedName,
    },

    /// The subtype relation contains a cycle
    #[error("Cyclic inheritance involving type {0}")]
    CyclicInheritance(QualifiedName),
}

impl SchemaError {
    /// Create a new invalid name error
    pub fn invalid_name(name: impl Into<String>) -> Self {
        SchemaError::InvalidName(name.into())
    }

    /// Create a new unknown type error
    pub fn unknown_type(referenced_by: &QualifiedName, name: &QualifiedName) -> Self {
        SchemaError::UnknownType {
            referenced_by: referenced_by.clone(),
            name: name.clone(),
        }
    }
}
