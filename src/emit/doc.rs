//! Doc generation for proxy methods: a human-readable rendering of each
//! parameter's and return value's member structure, recursion-bounded so
//! cyclic type graphs still terminate.

use crate::adapter::{ClassifiedIndex, ItemShape, Member, TypeRef};

/// Nesting bound for member-chain walks.
const MAX_DEPTH: usize = 12;

pub struct DocBuilder<'a> {
    index: &'a ClassifiedIndex,
}

impl<'a> DocBuilder<'a> {
    pub fn new(index: &'a ClassifiedIndex) -> Self {
        Self { index }
    }

    /// One doc line per parameter, e.g. `` `id`: int ``.
    pub fn parameter_line(&self, name: &str, type_ref: &TypeRef) -> String {
        format!("`{name}`: {}", self.describe(type_ref))
    }

    pub fn returns_line(&self, type_ref: &TypeRef) -> String {
        format!("Returns {}", self.describe(type_ref))
    }

    pub fn describe(&self, type_ref: &TypeRef) -> String {
        self.describe_at(type_ref, 0)
    }

    fn describe_at(&self, type_ref: &TypeRef, depth: usize) -> String {
        if depth >= MAX_DEPTH {
            return "...".to_owned();
        }
        match type_ref {
            TypeRef::Builtin(builtin) => builtin.name.to_owned(),
            TypeRef::Named { namespace, class } => match self.index.get(namespace, class) {
                None => class.clone(),
                Some(item) => match &item.shape {
                    ItemShape::Simple { builtin } => builtin.name.to_owned(),
                    ItemShape::ElementOfSimple { inner, .. }
                    | ItemShape::ElementOfComplex { type_ref: inner, .. } => {
                        self.describe_at(inner, depth + 1)
                    }
                    ItemShape::ComplexSimpleContent { base } => self.describe_at(base, depth + 1),
                    ItemShape::ComplexArray { item: inner } => {
                        format!("array of {}", self.describe_at(inner, depth + 1))
                    }
                    ItemShape::ComplexStruct { members }
                    | ItemShape::ComplexExtension { members, .. }
                    | ItemShape::ComplexRestriction { members, .. } => {
                        self.describe_members(class, members, depth)
                    }
                },
            },
        }
    }

    fn describe_members(&self, class: &str, members: &[Member], depth: usize) -> String {
        // A member-less struct carries no structure worth spelling out.
        if members.is_empty() {
            return "simple value".to_owned();
        }
        let rendered: Vec<String> = members
            .iter()
            .map(|member| {
                let mut description = self.describe_at(&member.type_, depth + 1);
                if member.repeated {
                    description = format!("list of {description}");
                } else if member.optional {
                    description = format!("optional {description}");
                }
                format!("{}: {description}", member.wire_name)
            })
            .collect();
        format!("{class} {{ {} }}", rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::ClassifiedItem;
    use crate::builtins;
    use wsdl_model::QName;

    const NS: &str = "urn:example:schema";

    fn named(class: &str) -> TypeRef {
        TypeRef::Named {
            namespace: NS.to_owned(),
            class: class.to_owned(),
        }
    }

    fn item(class: &str, shape: ItemShape) -> ClassifiedItem {
        ClassifiedItem {
            class_name: class.to_owned(),
            namespace: NS.to_owned(),
            schema_name: QName::with_namespace(NS, class),
            shape,
        }
    }

    fn int_member(name: &str) -> Member {
        Member {
            wire_name: name.to_owned(),
            optional: false,
            repeated: false,
            type_: TypeRef::Builtin(builtins::lookup(&QName::with_namespace(
                "http://www.w3.org/2001/XMLSchema",
                "int",
            )).unwrap()),
            wire_type: None,
        }
    }

    #[test]
    fn zero_member_struct_collapses_to_simple_value() {
        let mut index = ClassifiedIndex::default();
        index.push(item("Empty", ItemShape::ComplexStruct { members: vec![] }));
        let docs = DocBuilder::new(&index);
        assert_eq!(docs.describe(&named("Empty")), "simple value");
    }

    #[test]
    fn struct_members_are_spelled_out() {
        let mut index = ClassifiedIndex::default();
        index.push(item(
            "Pair",
            ItemShape::ComplexStruct {
                members: vec![int_member("a"), int_member("b")],
            },
        ));
        let docs = DocBuilder::new(&index);
        assert_eq!(docs.describe(&named("Pair")), "Pair { a: i32, b: i32 }");
    }

    #[test]
    fn cyclic_graph_walk_terminates() {
        let mut index = ClassifiedIndex::default();
        index.push(item(
            "Node",
            ItemShape::ComplexStruct {
                members: vec![Member {
                    wire_name: "next".to_owned(),
                    optional: true,
                    repeated: false,
                    type_: named("Node"),
                    wire_type: None,
                }],
            },
        ));
        let docs = DocBuilder::new(&index);
        let description = docs.describe(&named("Node"));
        assert!(description.contains("..."), "{description}");
        // 12 nesting levels, then the cutoff marker.
        assert_eq!(description.matches("Node {").count(), MAX_DEPTH);
    }

    #[test]
    fn occurrence_flags_shape_the_description() {
        let mut index = ClassifiedIndex::default();
        let mut repeated = int_member("values");
        repeated.repeated = true;
        let mut optional = int_member("label");
        optional.optional = true;
        index.push(item(
            "Bag",
            ItemShape::ComplexStruct {
                members: vec![repeated, optional],
            },
        ));
        let docs = DocBuilder::new(&index);
        assert_eq!(
            docs.describe(&named("Bag")),
            "Bag { values: list of i32, label: optional i32 }"
        );
    }
}
