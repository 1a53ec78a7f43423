// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schema graph trait for type lookup and composition traversal

use crate::{Property, QualifiedName, TypeId};

/// Read-only view of an application schema
///
/// Types are nodes identified by [`TypeId`]; feature-valued properties are
/// composition edges between them. The subtype relation is acyclic, the
/// composition graph generally is not.
///
/// Implementations are built once and never mutated afterwards, so every
/// query can be answered from any thread without synchronization.
///
/// # Example
///
/// ```ignore
/// use citydb_model::{QualifiedName, SchemaGraph};
///
/// fn describe(schema: &dyn SchemaGraph, name: &QualifiedName) {
///     if let Some(ty) = schema.resolve_type(name) {
///         for property in schema.composition_properties(ty, true) {
///             println!("{} contains {}", name, property.name);
///         }
///     }
/// }
/// ```
pub trait SchemaGraph: Send + Sync {
    /// Look up a type by its qualified name
    fn resolve_type(&self, name: &QualifiedName) -> Option<TypeId>;

    /// Qualified name of a type
    fn type_name(&self, ty: TypeId) -> Option<&QualifiedName>;

    /// Number of types in the graph
    fn type_count(&self) -> usize;

    /// Direct supertypes of a type
    fn direct_supertypes(&self, ty: TypeId) -> Vec<TypeId>;

    /// Non-abstract subtypes of a type, excluding the type itself
    ///
    /// # Arguments
    /// * `ty` - The type whose subtypes are requested
    /// * `include_indirect` - Also return subtypes of subtypes
    fn concrete_subtypes(&self, ty: TypeId, include_indirect: bool) -> Vec<TypeId>;

    /// Feature-valued properties of a type
    ///
    /// Properties of any other kind are never returned.
    ///
    /// # Arguments
    /// * `ty` - The owning type
    /// * `include_inherited` - Also return properties declared on supertypes
    fn composition_properties(&self, ty: TypeId, include_inherited: bool) -> Vec<&Property>;

    /// Whether instances of the type may appear as root objects
    fn is_top_level(&self, ty: TypeId) -> bool;

    /// Whether the type is abstract
    fn is_abstract(&self, ty: TypeId) -> bool;

    /// Whether `ty` is `of` or one of its (direct or indirect) subtypes
    fn is_subtype_or_equal(&self, ty: TypeId, of: TypeId) -> bool;
}

/// Extension methods for SchemaGraph
pub trait SchemaGraphExt: SchemaGraph {
    /// Types a property can point to at runtime
    ///
    /// A concrete target stands for itself. An abstract target is expanded to
    /// all of its concrete subtypes, direct and indirect.
    fn effective_targets(&self, property: &Property) -> Vec<TypeId> {
        if property.target_abstract {
            self.concrete_subtypes(property.target, true)
        } else {
            vec![property.target]
        }
    }

    /// Check if any of the given types is top-level
    fn includes_top_level(&self, types: &[TypeId]) -> bool {
        types.iter().any(|&ty| self.is_top_level(ty))
    }
}

// Blanket implementation for all SchemaGraph types
impl<T: SchemaGraph + ?Sized> SchemaGraphExt for T {}
