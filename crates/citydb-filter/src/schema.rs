// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory SchemaGraph implementation

use citydb_model::{
    Property, PropertyId, PropertyKind, QualifiedName, Result, SchemaError, SchemaGraph, TypeId,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use tracing::debug;

/// Declaration of a type for [`SchemaBuilder`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDef {
    pub name: QualifiedName,
    pub is_abstract: bool,
    pub is_top_level: bool,
    pub supertypes: Vec<QualifiedName>,
}

impl TypeDef {
    /// Declare a concrete, nested-only type
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            is_abstract: false,
            is_top_level: false,
            supertypes: Vec::new(),
        }
    }

    /// Mark the type abstract
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Mark the type as allowed to appear as a root object
    pub fn top_level(mut self) -> Self {
        self.is_top_level = true;
        self
    }

    /// Add a direct supertype
    pub fn extends(mut self, supertype: QualifiedName) -> Self {
        self.supertypes.push(supertype);
        self
    }
}

/// Declaration of a property for [`SchemaBuilder`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDef {
    pub owner: QualifiedName,
    pub name: QualifiedName,
    pub target: QualifiedName,
    pub kind: PropertyKind,
}

impl PropertyDef {
    /// Declare a feature-valued composition property
    pub fn feature(owner: QualifiedName, name: QualifiedName, target: QualifiedName) -> Self {
        Self {
            owner,
            name,
            target,
            kind: PropertyKind::Feature,
        }
    }

    /// Declare a property whose value is not a feature
    pub fn other(owner: QualifiedName, name: QualifiedName, target: QualifiedName) -> Self {
        Self {
            owner,
            name,
            target,
            kind: PropertyKind::Other,
        }
    }
}

/// Collects type and property declarations and assembles an [`InMemorySchema`]
#[derive(Default, Debug)]
pub struct SchemaBuilder {
    types: Vec<TypeDef>,
    properties: Vec<PropertyDef>,
}

impl SchemaBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a type
    pub fn add_type(&mut self, def: TypeDef) -> &mut Self {
        self.types.push(def);
        self
    }

    /// Declare a property
    pub fn add_property(&mut self, def: PropertyDef) -> &mut Self {
        self.properties.push(def);
        self
    }

    /// Resolve all declarations and precompute the type closures
    ///
    /// # Errors
    /// Fails on duplicate declarations, references to undeclared types and
    /// cycles in the subtype relation.
    pub fn build(self) -> Result<InMemorySchema> {
        let mut by_name: FxHashMap<QualifiedName, TypeId> = FxHashMap::default();
        for (index, def) in self.types.iter().enumerate() {
            if by_name.insert(def.name.clone(), TypeId(index as u32)).is_some() {
                return Err(SchemaError::DuplicateType(def.name.clone()));
            }
        }

        let lookup = |referenced_by: &QualifiedName, name: &QualifiedName| {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| SchemaError::unknown_type(referenced_by, name))
        };

        let mut nodes = Vec::with_capacity(self.types.len());
        for def in &self.types {
            let mut supertypes = Vec::with_capacity(def.supertypes.len());
            for supertype in &def.supertypes {
                let id = lookup(&def.name, supertype)?;
                if !supertypes.contains(&id) {
                    supertypes.push(id);
                }
            }

            nodes.push(TypeNode {
                name: def.name.clone(),
                is_abstract: def.is_abstract,
                is_top_level: def.is_top_level,
                supertypes,
                ancestors: FxHashSet::default(),
                direct_subtypes: Vec::new(),
                all_subtypes: Vec::new(),
                own_properties: Vec::new(),
                all_properties: Vec::new(),
            });
        }

        for index in 0..nodes.len() {
            for supertype in nodes[index].supertypes.clone() {
                nodes[usize::from(supertype)]
                    .direct_subtypes
                    .push(TypeId(index as u32));
            }
        }

        // Supertypes come before their subtypes in `order`
        let order = inheritance_order(&nodes)?;

        for &ty in &order {
            let mut ancestors = FxHashSet::default();
            for &supertype in &nodes[usize::from(ty)].supertypes {
                ancestors.insert(supertype);
                ancestors.extend(nodes[usize::from(supertype)].ancestors.iter().copied());
            }
            nodes[usize::from(ty)].ancestors = ancestors;
        }

        for index in 0..nodes.len() {
            let ancestors: Vec<TypeId> = nodes[index].ancestors.iter().copied().collect();
            for ancestor in ancestors {
                nodes[usize::from(ancestor)]
                    .all_subtypes
                    .push(TypeId(index as u32));
            }
        }

        let mut properties = Vec::with_capacity(self.properties.len());
        let mut declared: FxHashSet<(TypeId, QualifiedName)> = FxHashSet::default();
        for (index, def) in self.properties.into_iter().enumerate() {
            let owner = lookup(&def.name, &def.owner)?;
            let target = lookup(&def.name, &def.target)?;
            if !declared.insert((owner, def.name.clone())) {
                return Err(SchemaError::DuplicateProperty {
                    owner: def.owner,
                    property: def.name,
                });
            }

            let id = PropertyId(index as u32);
            nodes[usize::from(owner)].own_properties.push(id);
            properties.push(Property {
                id,
                name: def.name,
                owner,
                target,
                target_abstract: nodes[usize::from(target)].is_abstract,
                kind: def.kind,
            });
        }

        for index in 0..nodes.len() {
            let mut ancestors: Vec<TypeId> = nodes[index].ancestors.iter().copied().collect();
            ancestors.sort_unstable();

            let mut all_properties = nodes[index].own_properties.clone();
            for ancestor in ancestors {
                all_properties.extend_from_slice(&nodes[usize::from(ancestor)].own_properties);
            }

            let node = &mut nodes[index];
            node.all_properties = all_properties;
            node.direct_subtypes.sort_unstable();
            node.all_subtypes.sort_unstable();
        }

        debug!(
            types = nodes.len(),
            properties = properties.len(),
            "built schema graph"
        );

        Ok(InMemorySchema {
            types: nodes,
            properties,
            by_name,
        })
    }
}

/// Topological order of the subtype relation, supertypes first
fn inheritance_order(nodes: &[TypeNode]) -> Result<Vec<TypeId>> {
    let mut pending: Vec<usize> = nodes.iter().map(|node| node.supertypes.len()).collect();
    let mut queue: VecDeque<TypeId> = pending
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count == 0)
        .map(|(index, _)| TypeId(index as u32))
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some(ty) = queue.pop_front() {
        order.push(ty);
        for &subtype in &nodes[usize::from(ty)].direct_subtypes {
            let count = &mut pending[usize::from(subtype)];
            *count -= 1;
            if *count == 0 {
                queue.push_back(subtype);
            }
        }
    }

    if order.len() < nodes.len() {
        let index = pending.iter().position(|&count| count > 0).unwrap_or(0);
        return Err(SchemaError::CyclicInheritance(nodes[index].name.clone()));
    }

    Ok(order)
}

/// Type node with precomputed closures
#[derive(Debug)]
struct TypeNode {
    name: QualifiedName,
    is_abstract: bool,
    is_top_level: bool,
    supertypes: Vec<TypeId>,
    /// All direct and indirect supertypes
    ancestors: FxHashSet<TypeId>,
    direct_subtypes: Vec<TypeId>,
    /// All direct and indirect subtypes
    all_subtypes: Vec<TypeId>,
    own_properties: Vec<PropertyId>,
    /// Own properties followed by inherited ones
    all_properties: Vec<PropertyId>,
}

/// Immutable schema graph held entirely in memory
///
/// Every query is a lookup into data computed by [`SchemaBuilder::build`], so
/// the graph can be shared between threads behind an `Arc` without locking.
#[derive(Debug)]
pub struct InMemorySchema {
    types: Vec<TypeNode>,
    properties: Vec<Property>,
    by_name: FxHashMap<QualifiedName, TypeId>,
}

impl InMemorySchema {
    /// Get a property by ID
    pub fn property(&self, id: PropertyId) -> Option<&Property> {
        self.properties.get(usize::from(id))
    }

    /// Number of declared properties of any kind
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    fn node(&self, ty: TypeId) -> Option<&TypeNode> {
        self.types.get(usize::from(ty))
    }
}

impl SchemaGraph for InMemorySchema {
    fn resolve_type(&self, name: &QualifiedName) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    fn type_name(&self, ty: TypeId) -> Option<&QualifiedName> {
        self.node(ty).map(|node| &node.name)
    }

    fn type_count(&self) -> usize {
        self.types.len()
    }

    fn direct_supertypes(&self, ty: TypeId) -> Vec<TypeId> {
        self.node(ty)
            .map(|node| node.supertypes.clone())
            .unwrap_or_default()
    }

    fn concrete_subtypes(&self, ty: TypeId, include_indirect: bool) -> Vec<TypeId> {
        let Some(node) = self.node(ty) else {
            return Vec::new();
        };

        let subtypes = if include_indirect {
            &node.all_subtypes
        } else {
            &node.direct_subtypes
        };

        subtypes
            .iter()
            .copied()
            .filter(|&subtype| !self.is_abstract(subtype))
            .collect()
    }

    fn composition_properties(&self, ty: TypeId, include_inherited: bool) -> Vec<&Property> {
        let Some(node) = self.node(ty) else {
            return Vec::new();
        };

        let ids = if include_inherited {
            &node.all_properties
        } else {
            &node.own_properties
        };

        ids.iter()
            .filter_map(|&id| self.property(id))
            .filter(|property| property.is_composition())
            .collect()
    }

    fn is_top_level(&self, ty: TypeId) -> bool {
        self.node(ty).is_some_and(|node| node.is_top_level)
    }

    fn is_abstract(&self, ty: TypeId) -> bool {
        self.node(ty).is_some_and(|node| node.is_abstract)
    }

    fn is_subtype_or_equal(&self, ty: TypeId, of: TypeId) -> bool {
        ty == of || self.node(ty).is_some_and(|node| node.ancestors.contains(&of))
    }
}
