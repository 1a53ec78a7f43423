// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CityDB Model - Shared types and the schema graph abstraction
//!
//! This crate defines the read-only view of a city model application schema
//! that feature type filtering is evaluated against. The schema is a directed
//! graph: feature types are nodes, feature-valued properties are typed
//! composition edges, and every type carries its direct supertypes.
//!
//! # Architecture
//!
//! - [`SchemaGraph`] - Read-only queries over types, subtypes and properties
//! - [`SchemaGraphExt`] - Derived queries (effective property targets)
//! - [`QualifiedName`] - Namespace-qualified type and property names
//!
//! Implementations of [`SchemaGraph`] are built once per process and shared
//! between threads, so the trait requires `Send + Sync`.
//!
//! # Example
//!
//! ```ignore
//! use citydb_model::{QualifiedName, SchemaGraph, SchemaGraphExt};
//!
//! let wall: QualifiedName = "{http://www.opengis.net/citygml/2.0}Wall".parse()?;
//! if let Some(id) = schema.resolve_type(&wall) {
//!     for property in schema.composition_properties(id, true) {
//!         println!("{} -> {:?}", property.name, schema.effective_targets(property));
//!     }
//! }
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::*;
pub use schema::*;
pub use types::*;
