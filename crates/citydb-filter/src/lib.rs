// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CityDB Filter - Feature type hierarchy filter
//!
//! Decides, for every object met during a city model import or export,
//! whether its feature type passes the job's allow-list. With nested matching
//! ("flat hierarchy") enabled, types that can only occur inside a requested
//! type pass as well.
//!
//! # Features
//!
//! - **Reachability search** over the composition graph, safe on cycles
//! - **Top-level soundness** - edges that may hold top-level types are never followed
//! - **Memoized matches** - proven names are cached in a shared, lock-protected set
//! - **In-memory schema graph** with precomputed subtype closures
//!
//! # Example
//!
//! ```ignore
//! use citydb_filter::{SchemaBuilder, TypeDef, PropertyDef, TypeFilter};
//! use std::sync::Arc;
//!
//! let schema = Arc::new(builder.build()?);
//! let filter = TypeFilter::new([building_name], schema);
//!
//! // Called by every worker of the import pipeline
//! if filter.satisfies(&object_type, true) {
//!     // import the object
//! }
//! ```

mod cache;
mod config;
mod error;
mod filter;
mod schema;
mod search;

#[cfg(test)]
mod fixtures;

pub use cache::RequestedTypeSet;
pub use config::TypeFilterConfig;
pub use error::ConfigError;
pub use filter::TypeFilter;
pub use schema::{InMemorySchema, PropertyDef, SchemaBuilder, TypeDef};
pub use search::NestingSearch;

pub use citydb_model::{QualifiedName, SchemaGraph};
