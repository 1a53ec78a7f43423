// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reachability search over composition edges
//!
//! Decides whether a candidate type can occur as a nested value somewhere
//! below a root type. The walk is depth-first with an explicit stack, so its
//! depth is bounded by the heap rather than the call stack, and the visited
//! sets make it terminate on cyclic composition graphs.

use citydb_model::{PropertyId, SchemaGraph, SchemaGraphExt, TypeId};
use rustc_hash::FxHashSet;

/// Nesting search for one candidate type
///
/// The visited sets persist across calls to [`NestingSearch::is_nested_within`].
/// A type that was fully explored from an earlier root without reaching the
/// candidate cannot reach it from a later root either, so one search value is
/// reused for every root of a single query.
pub struct NestingSearch<'a, S: SchemaGraph + ?Sized> {
    schema: &'a S,
    candidate: TypeId,
    visited_types: FxHashSet<TypeId>,
    visited_properties: FxHashSet<PropertyId>,
    stack: Vec<TypeId>,
}

impl<'a, S: SchemaGraph + ?Sized> NestingSearch<'a, S> {
    /// Create a search for `candidate`
    pub fn new(schema: &'a S, candidate: TypeId) -> Self {
        Self {
            schema,
            candidate,
            visited_types: FxHashSet::default(),
            visited_properties: FxHashSet::default(),
            stack: Vec::new(),
        }
    }

    /// Check if the candidate is reachable from `root`
    ///
    /// A composition edge is never followed when any of its effective targets
    /// is a top-level type. Otherwise every top-level object could claim to be
    /// nested inside an unrelated root.
    pub fn is_nested_within(&mut self, root: TypeId) -> bool {
        let schema = self.schema;
        self.stack.clear();
        self.visit(root);

        while let Some(ty) = self.stack.pop() {
            for property in schema.composition_properties(ty, true) {
                if !self.visited_properties.insert(property.id) {
                    continue;
                }

                let targets = schema.effective_targets(property);
                if schema.includes_top_level(&targets) {
                    continue;
                }

                for target in targets {
                    if schema.is_subtype_or_equal(self.candidate, target) {
                        self.stack.clear();
                        return true;
                    }

                    self.visit(target);
                    // Subtypes may declare additional composition edges
                    for subtype in schema.concrete_subtypes(target, true) {
                        self.visit(subtype);
                    }
                }
            }
        }

        false
    }

    /// Number of types explored so far
    pub fn visited_type_count(&self) -> usize {
        self.visited_types.len()
    }

    fn visit(&mut self, ty: TypeId) {
        if self.visited_types.insert(ty) {
            self.stack.push(ty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{abstract_member_schema, city_schema, cyclic_schema, qn};
    use crate::schema::{PropertyDef, SchemaBuilder, TypeDef};

    fn nested(schema: &dyn SchemaGraph, root: &str, candidate: &str) -> bool {
        let root = schema.resolve_type(&qn(root)).unwrap();
        let candidate = schema.resolve_type(&qn(candidate)).unwrap();
        NestingSearch::new(schema, candidate).is_nested_within(root)
    }

    #[test]
    fn test_direct_and_transitive_nesting() {
        let schema = city_schema();

        assert!(nested(&schema, "Root", "Wall"));
        assert!(nested(&schema, "Root", "WallSurface"));
        assert!(nested(&schema, "Wall", "WallSurface"));
    }

    #[test]
    fn test_no_path() {
        let schema = city_schema();

        assert!(!nested(&schema, "Root", "Door"));
        assert!(!nested(&schema, "WallSurface", "Wall"));
        // The root is not nested within itself
        assert!(!nested(&schema, "Root", "Root"));
    }

    #[test]
    fn test_top_level_target_is_skipped() {
        let schema = abstract_member_schema(true);

        assert!(nested(&schema, "Root", "Wall"));
        assert!(!nested(&schema, "Root", "Opening"));
        assert!(!nested(&schema, "Root", "Building"));
    }

    #[test]
    fn test_abstract_target_without_top_level() {
        let schema = abstract_member_schema(false);

        assert!(nested(&schema, "Root", "Opening"));
        assert!(nested(&schema, "Root", "Building"));
    }

    #[test]
    fn test_cycle_terminates() {
        let schema = cyclic_schema();

        assert!(nested(&schema, "Root", "Leaf"));
        assert!(nested(&schema, "A", "A"));
        assert!(!nested(&schema, "Root", "Unreachable"));
        assert!(!nested(&schema, "A", "Root"));
    }

    #[test]
    fn test_candidate_subtype_of_target() {
        let mut builder = SchemaBuilder::new();
        builder
            .add_type(TypeDef::new(qn("Root")).top_level())
            .add_type(TypeDef::new(qn("Surface")))
            .add_type(TypeDef::new(qn("RoofSurface")).extends(qn("Surface")))
            .add_property(PropertyDef::feature(qn("Root"), qn("surface"), qn("Surface")));
        let schema = builder.build().unwrap();

        assert!(nested(&schema, "Root", "RoofSurface"));
        assert!(!nested(&schema, "RoofSurface", "Surface"));
    }

    #[test]
    fn test_subtype_edges_are_followed() {
        // Only the subtype Installation declares a composition edge
        let mut builder = SchemaBuilder::new();
        builder
            .add_type(TypeDef::new(qn("Root")).top_level())
            .add_type(TypeDef::new(qn("Part")))
            .add_type(TypeDef::new(qn("Installation")).extends(qn("Part")))
            .add_type(TypeDef::new(qn("Detail")))
            .add_property(PropertyDef::feature(qn("Root"), qn("part"), qn("Part")))
            .add_property(PropertyDef::feature(
                qn("Installation"),
                qn("detail"),
                qn("Detail"),
            ));
        let schema = builder.build().unwrap();

        assert!(nested(&schema, "Root", "Detail"));
    }

    #[test]
    fn test_inherited_edges_are_followed() {
        let mut builder = SchemaBuilder::new();
        builder
            .add_type(TypeDef::new(qn("Base")).abstract_type())
            .add_type(TypeDef::new(qn("Root")).top_level().extends(qn("Base")))
            .add_type(TypeDef::new(qn("Appearance")))
            .add_property(PropertyDef::feature(
                qn("Base"),
                qn("appearance"),
                qn("Appearance"),
            ));
        let schema = builder.build().unwrap();

        assert!(nested(&schema, "Root", "Appearance"));
    }

    #[test]
    fn test_non_feature_properties_are_ignored() {
        let mut builder = SchemaBuilder::new();
        builder
            .add_type(TypeDef::new(qn("Root")).top_level())
            .add_type(TypeDef::new(qn("Geometry")))
            .add_property(PropertyDef::other(qn("Root"), qn("lod1Solid"), qn("Geometry")));
        let schema = builder.build().unwrap();

        assert!(!nested(&schema, "Root", "Geometry"));
    }

    #[test]
    fn test_search_reused_across_roots() {
        let schema = city_schema();
        let root = schema.resolve_type(&qn("Root")).unwrap();
        let wall = schema.resolve_type(&qn("Wall")).unwrap();
        let door = schema.resolve_type(&qn("Door")).unwrap();

        let mut search = NestingSearch::new(&schema, door);
        assert!(!search.is_nested_within(root));
        let explored = search.visited_type_count();

        // Wall was already explored from Root
        assert!(!search.is_nested_within(wall));
        assert_eq!(search.visited_type_count(), explored);
    }
}
