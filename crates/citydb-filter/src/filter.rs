// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feature type filter

use crate::cache::RequestedTypeSet;
use crate::search::NestingSearch;
use crate::TypeFilterConfig;
use citydb_model::{QualifiedName, SchemaGraph, TypeId};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Decides whether objects of a given type pass a job's type allow-list
///
/// With nested matching enabled, a type also passes when it can occur nested
/// inside one of the requested types. Every name proven that way is added to
/// the requested names, so later queries for it are a single set lookup.
///
/// The filter is `Send + Sync`; import and export workers share one instance
/// for the duration of a job.
///
/// # Example
///
/// ```ignore
/// use citydb_filter::TypeFilter;
///
/// let filter = TypeFilter::new([building], Arc::clone(&schema));
/// if filter.satisfies(&object_type, true) {
///     import(object);
/// }
/// ```
pub struct TypeFilter {
    schema: Arc<dyn SchemaGraph>,
    requested: RequestedTypeSet,
    /// Requested names that resolve against the schema, sorted
    roots: Vec<TypeId>,
    unfiltered: bool,
}

impl TypeFilter {
    /// Create a filter for the requested type names
    ///
    /// Names that do not resolve against the schema are kept for exact-name
    /// matching but never take part in nested matching.
    pub fn new(
        names: impl IntoIterator<Item = QualifiedName>,
        schema: Arc<dyn SchemaGraph>,
    ) -> Self {
        let requested = RequestedTypeSet::new(names);

        let mut roots = Vec::new();
        for name in requested.names() {
            match schema.resolve_type(&name) {
                Some(ty) => roots.push(ty),
                None => warn!(type_name = %name, "requested type is not part of the schema"),
            }
        }
        roots.sort_unstable();
        roots.dedup();

        let unfiltered = requested.is_empty();
        debug!(
            requested = requested.len(),
            resolved = roots.len(),
            schema_types = schema.type_count(),
            unfiltered,
            "created type filter"
        );

        Self {
            schema,
            requested,
            roots,
            unfiltered,
        }
    }

    /// Create a filter from a job configuration
    pub fn from_config(config: &TypeFilterConfig, schema: Arc<dyn SchemaGraph>) -> Self {
        Self::new(config.requested_names(), schema)
    }

    /// Check if objects of type `candidate` pass the filter
    ///
    /// # Arguments
    /// * `candidate` - Type name of the object
    /// * `allow_nested_match` - Also accept types nested within a requested type
    pub fn satisfies(&self, candidate: &QualifiedName, allow_nested_match: bool) -> bool {
        if self.unfiltered || self.requested.contains(candidate) {
            return true;
        }

        if !allow_nested_match {
            return false;
        }

        let Some(ty) = self.schema.resolve_type(candidate) else {
            return false;
        };

        let mut search = NestingSearch::new(self.schema.as_ref(), ty);
        for &root in &self.roots {
            if search.is_nested_within(root) {
                trace!(
                    type_name = %candidate,
                    root = ?self.schema.type_name(root),
                    "admitted nested feature type"
                );
                self.requested.insert(candidate.clone());
                return true;
            }
        }

        false
    }

    /// Whether the filter accepts every type
    pub fn is_unfiltered(&self) -> bool {
        self.unfiltered
    }

    /// Requested types that resolve against the schema
    pub fn roots(&self) -> &[TypeId] {
        &self.roots
    }

    /// Snapshot of the requested names, including names proven nested
    pub fn requested_names(&self) -> Vec<QualifiedName> {
        self.requested.names()
    }

    /// Schema the filter is evaluated against
    pub fn schema(&self) -> &dyn SchemaGraph {
        self.schema.as_ref()
    }
}

impl std::fmt::Debug for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeFilter")
            .field("requested", &self.requested)
            .field("roots", &self.roots)
            .field("unfiltered", &self.unfiltered)
            .finish_non_exhaustive()
    }
}
