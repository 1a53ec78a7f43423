// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Small city model schemas shared by the unit tests

use crate::schema::{InMemorySchema, PropertyDef, SchemaBuilder, TypeDef};
use citydb_model::QualifiedName;

pub(crate) fn qn(local_name: &str) -> QualifiedName {
    QualifiedName::local(local_name)
}

/// Root -boundary-> Wall -lod2MultiSurface-> WallSurface, plus Building, Door
/// and Opening which nothing composes
pub(crate) fn city_schema() -> InMemorySchema {
    let mut builder = base_types();
    builder
        .add_property(PropertyDef::feature(qn("Root"), qn("boundary"), qn("Wall")))
        .add_property(PropertyDef::feature(
            qn("Wall"),
            qn("lod2MultiSurface"),
            qn("WallSurface"),
        ));
    build(builder)
}

/// Like [`city_schema`], but Wall composes the abstract AbstractFeature,
/// whose concrete subtypes include the top-level Building
pub(crate) fn abstract_member_schema(building_top_level: bool) -> InMemorySchema {
    let mut builder = SchemaBuilder::new();
    builder
        .add_type(TypeDef::new(qn("AbstractFeature")).abstract_type())
        .add_type(TypeDef::new(qn("Root")).top_level())
        .add_type(TypeDef::new(qn("Wall")).extends(qn("AbstractFeature")))
        .add_type(TypeDef::new(qn("Opening")).extends(qn("AbstractFeature")));

    let building = TypeDef::new(qn("Building")).extends(qn("AbstractFeature"));
    builder.add_type(if building_top_level {
        building.top_level()
    } else {
        building
    });

    builder
        .add_property(PropertyDef::feature(qn("Root"), qn("boundary"), qn("Wall")))
        .add_property(PropertyDef::feature(
            qn("Wall"),
            qn("member"),
            qn("AbstractFeature"),
        ));
    build(builder)
}

/// A composes B, B composes A, B composes Leaf
pub(crate) fn cyclic_schema() -> InMemorySchema {
    let mut builder = SchemaBuilder::new();
    builder
        .add_type(TypeDef::new(qn("Root")).top_level())
        .add_type(TypeDef::new(qn("A")))
        .add_type(TypeDef::new(qn("B")))
        .add_type(TypeDef::new(qn("Leaf")))
        .add_type(TypeDef::new(qn("Unreachable")))
        .add_property(PropertyDef::feature(qn("Root"), qn("a"), qn("A")))
        .add_property(PropertyDef::feature(qn("A"), qn("b"), qn("B")))
        .add_property(PropertyDef::feature(qn("B"), qn("a"), qn("A")))
        .add_property(PropertyDef::feature(qn("A"), qn("self"), qn("A")))
        .add_property(PropertyDef::feature(qn("B"), qn("leaf"), qn("Leaf")));
    build(builder)
}

fn base_types() -> SchemaBuilder {
    let mut builder = SchemaBuilder::new();
    builder
        .add_type(TypeDef::new(qn("AbstractFeature")).abstract_type())
        .add_type(
            TypeDef::new(qn("CityObject"))
                .abstract_type()
                .extends(qn("AbstractFeature")),
        )
        .add_type(TypeDef::new(qn("Root")).top_level().extends(qn("CityObject")))
        .add_type(TypeDef::new(qn("Building")).top_level().extends(qn("CityObject")))
        .add_type(TypeDef::new(qn("Wall")).extends(qn("CityObject")))
        .add_type(TypeDef::new(qn("WallSurface")).extends(qn("CityObject")))
        .add_type(TypeDef::new(qn("Door")).extends(qn("CityObject")))
        .add_type(TypeDef::new(qn("Opening")).extends(qn("CityObject")));
    builder
}

fn build(builder: SchemaBuilder) -> InMemorySchema {
    builder.build().expect("fixture schema must be valid")
}
