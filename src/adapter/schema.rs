//! Schema Adapter: normalizes the parser's schema components into a closed
//! set of emission shapes. Classification happens exactly once per item;
//! everything downstream (ordering, emission, wrapper generation, docs)
//! works from the [`ClassifiedIndex`] built here.

use std::collections::HashMap;

use heck::ToPascalCase;
use log::warn;
use wsdl_model::{
    AnyURI, ComplexDerivation, ComplexTypeDefinition, Compositor, Content, DerivedType,
    ElementContent, ElementDeclaration, ModelGroup, NCName, QName, Schema, Term, TypeDefinition,
};

use crate::builtins::{self, Builtin};
use crate::error::GeneratorError;
use crate::naming;

/// Resolution depth bound for simple-type base chains; a chain this deep is
/// cyclic parser output and falls back to the untyped codec.
const MAX_BASE_CHAIN: usize = 32;

/// A resolved member-type reference: either a builtin codec or another
/// generated class, addressed by namespace and class name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef {
    Builtin(Builtin),
    Named { namespace: AnyURI, class: String },
}

/// One member of a flattened model group.
#[derive(Clone, Debug)]
pub struct Member {
    pub wire_name: NCName,
    pub optional: bool,
    pub repeated: bool,
    pub type_: TypeRef,
    /// The schema-level type name, kept for doc generation.
    pub wire_type: Option<QName>,
}

/// The seven schema shapes the derivation resolver distinguishes, plus the
/// synthesized-local case which reduces to `ElementOfComplex`.
#[derive(Clone, Debug)]
pub enum ItemShape {
    /// Atomic or derived simple type, resolved down to a builtin codec.
    Simple { builtin: Builtin },
    /// Element declaration wrapping a simple type.
    ElementOfSimple { name: QName, inner: TypeRef },
    /// Element declaration wrapping a (named or synthesized) complex type.
    ElementOfComplex { name: QName, type_ref: TypeRef },
    /// Complex type with simple content: a codec-only subclass of its base.
    ComplexSimpleContent { base: TypeRef },
    /// Struct-like complex type: flattened model group plus attributes.
    ComplexStruct { members: Vec<Member> },
    /// SOAP-encoded array.
    ComplexArray { item: TypeRef },
    /// Complex-content extension: inherited members stay, own members are
    /// appended.
    ComplexExtension {
        base: TypeRef,
        members: Vec<Member>,
    },
    /// Complex-content restriction: the member list replaces the base's.
    ComplexRestriction {
        base: TypeRef,
        members: Vec<Member>,
    },
}

/// One class-to-be-emitted, in discovery order.
#[derive(Clone, Debug)]
pub struct ClassifiedItem {
    /// Already-sanitized class name; unique within the namespace because
    /// element classes carry an `Element` suffix.
    pub class_name: String,
    pub namespace: AnyURI,
    /// The schema item's own qualified name, for diagnostics.
    pub schema_name: QName,
    pub shape: ItemShape,
}

/// All classified items of a run, addressable by `(namespace, class name)`.
#[derive(Debug, Default)]
pub struct ClassifiedIndex {
    items: Vec<ClassifiedItem>,
    by_key: HashMap<(AnyURI, String), usize>,
}

impl ClassifiedIndex {
    pub fn push(&mut self, item: ClassifiedItem) {
        self.by_key.insert(
            (item.namespace.clone(), item.class_name.clone()),
            self.items.len(),
        );
        self.items.push(item);
    }

    pub fn get(&self, namespace: &str, class: &str) -> Option<&ClassifiedItem> {
        self.by_key
            .get(&(namespace.to_owned(), class.to_owned()))
            .map(|&i| &self.items[i])
    }

    /// Items of one namespace, in discovery order.
    pub fn namespace_items<'s>(
        &'s self,
        namespace: &'s str,
    ) -> impl Iterator<Item = &'s ClassifiedItem> + 's {
        self.items.iter().filter(move |i| i.namespace == namespace)
    }
}

pub fn class_name_for_type(name: &str) -> String {
    naming::sanitize(name).to_pascal_case()
}

pub fn class_name_for_element(name: &str) -> String {
    format!("{}Element", class_name_for_type(name))
}

fn synthesized_type_name(element_name: &str) -> String {
    format!("{}ElementType", class_name_for_type(element_name))
}

/// Uniform read view over every schema of the run.
pub struct SchemaAdapter<'a> {
    schemas: &'a [Schema],
}

impl<'a> SchemaAdapter<'a> {
    pub fn new(schemas: &'a [Schema]) -> Self {
        Self { schemas }
    }

    pub fn schema(&self, namespace: &str) -> Option<&'a Schema> {
        self.schemas.iter().find(|s| s.target_namespace == namespace)
    }

    pub fn resolve_type(&self, name: &QName) -> Option<&'a TypeDefinition> {
        let schema = self.schema(name.namespace_name.as_deref()?)?;
        schema.type_definition(&name.local_name)
    }

    pub fn resolve_element(&self, name: &QName) -> Option<&'a ElementDeclaration> {
        let schema = self.schema(name.namespace_name.as_deref()?)?;
        schema.element_declaration(&name.local_name)
    }

    /// Classifies every named type and global element of one schema, in
    /// document order. Elements with local type definitions additionally
    /// produce a synthesized item directly before the element's own.
    pub fn classify_schema(&self, schema: &Schema) -> Result<Vec<ClassifiedItem>, GeneratorError> {
        let mut out = Vec::new();
        for type_def in &schema.type_definitions {
            match type_def {
                TypeDefinition::Simple(s) => {
                    let name = s.name.clone().unwrap_or_default();
                    out.push(ClassifiedItem {
                        class_name: class_name_for_type(&name),
                        namespace: schema.target_namespace.clone(),
                        schema_name: QName::with_namespace(&schema.target_namespace, &name),
                        shape: ItemShape::Simple {
                            builtin: self.resolve_simple_base(&s.base, 0),
                        },
                    });
                }
                TypeDefinition::Complex(c) => {
                    let name = c.name.clone().unwrap_or_default();
                    let class_name = class_name_for_type(&name);
                    let qname = QName::with_namespace(&schema.target_namespace, &name);
                    let shape = self.classify_complex(c, &qname, &class_name, &mut out)?;
                    out.push(ClassifiedItem {
                        class_name,
                        namespace: schema.target_namespace.clone(),
                        schema_name: qname,
                        shape,
                    });
                }
            }
        }
        for element in &schema.element_declarations {
            let item = self.classify_element(element, schema, &mut out)?;
            out.push(item);
        }
        Ok(out)
    }

    fn classify_element(
        &self,
        element: &ElementDeclaration,
        schema: &Schema,
        synthesized: &mut Vec<ClassifiedItem>,
    ) -> Result<ClassifiedItem, GeneratorError> {
        let namespace = schema.target_namespace.clone();
        let element_qname = QName::with_namespace(&namespace, &element.name);
        let shape = match &element.content {
            ElementContent::TypeRef(type_ref) => {
                if let Some(builtin) = builtins::lookup(type_ref) {
                    ItemShape::ElementOfSimple {
                        name: element_qname.clone(),
                        inner: TypeRef::Builtin(builtin),
                    }
                } else {
                    match self.resolve_type(type_ref) {
                        Some(TypeDefinition::Simple(_)) => ItemShape::ElementOfSimple {
                            name: element_qname.clone(),
                            inner: self.named_ref(type_ref),
                        },
                        Some(TypeDefinition::Complex(_)) => ItemShape::ElementOfComplex {
                            name: element_qname.clone(),
                            type_ref: self.named_ref(type_ref),
                        },
                        None => {
                            return Err(GeneratorError::UnresolvedTypeReference {
                                referrer: element_qname,
                                reference: type_ref.clone(),
                            })
                        }
                    }
                }
            }
            ElementContent::LocalSimple(simple) => ItemShape::ElementOfSimple {
                name: element_qname.clone(),
                inner: TypeRef::Builtin(self.resolve_simple_base(&simple.base, 0)),
            },
            ElementContent::LocalComplex(complex) => {
                // Treat the local definition as a freshly named global one
                // scoped to the element, then apply the named rule.
                let synth_name = synthesized_type_name(&element.name);
                let synth_qname = QName::with_namespace(&namespace, &synth_name);
                let shape = self.classify_complex(complex, &synth_qname, &synth_name, synthesized)?;
                synthesized.push(ClassifiedItem {
                    class_name: synth_name.clone(),
                    namespace: namespace.clone(),
                    schema_name: synth_qname,
                    shape,
                });
                ItemShape::ElementOfComplex {
                    name: element_qname.clone(),
                    type_ref: TypeRef::Named {
                        namespace: namespace.clone(),
                        class: synth_name,
                    },
                }
            }
        };
        Ok(ClassifiedItem {
            class_name: class_name_for_element(&element.name),
            namespace,
            schema_name: element_qname,
            shape,
        })
    }

    fn classify_complex(
        &self,
        complex: &ComplexTypeDefinition,
        qname: &QName,
        class_name: &str,
        synthesized: &mut Vec<ClassifiedItem>,
    ) -> Result<ItemShape, GeneratorError> {
        if !complex.attribute_group_refs.is_empty() {
            return Err(GeneratorError::AttributeGroup {
                type_name: qname.clone(),
            });
        }
        let attribute_members = self.attribute_members(complex);
        match &complex.content {
            Content::Empty => Ok(ItemShape::ComplexStruct {
                members: attribute_members,
            }),
            Content::Group(group) => {
                let mut members = self.flatten_group(
                    group,
                    group.compositor == Compositor::Choice,
                    qname,
                    class_name,
                    synthesized,
                )?;
                members.extend(attribute_members);
                Ok(ItemShape::ComplexStruct { members })
            }
            Content::Derived(derived) => {
                self.classify_derived(complex, derived, qname, class_name, synthesized, attribute_members)
            }
        }
    }

    fn classify_derived(
        &self,
        _complex: &ComplexTypeDefinition,
        derived: &DerivedType,
        qname: &QName,
        class_name: &str,
        synthesized: &mut Vec<ClassifiedItem>,
        attribute_members: Vec<Member>,
    ) -> Result<ItemShape, GeneratorError> {
        match derived {
            DerivedType::SimpleContentRestriction { base }
            | DerivedType::SimpleContentExtension { base } => Ok(ItemShape::ComplexSimpleContent {
                base: self.resolve_member_type(base),
            }),
            DerivedType::ComplexContentRestriction { base, content }
            | DerivedType::ComplexContentExtension { base, content } => {
                if let ComplexDerivation::ArrayOf(item) = content {
                    return match self.try_resolve(&item.item_type) {
                        Some(type_ref) => Ok(ItemShape::ComplexArray { item: type_ref }),
                        None => Err(GeneratorError::UnresolvedArrayItem {
                            array: qname.clone(),
                            item: item.item_type.clone(),
                        }),
                    };
                }
                if builtins::is_array_base(base) {
                    // Array base without an item descriptor: the item type
                    // cannot be resolved.
                    return Err(GeneratorError::UnresolvedArrayItem {
                        array: qname.clone(),
                        item: base.clone(),
                    });
                }
                let base_ref =
                    self.try_resolve(base)
                        .ok_or_else(|| GeneratorError::UnresolvedTypeReference {
                            referrer: qname.clone(),
                            reference: base.clone(),
                        })?;
                let mut members = match content {
                    ComplexDerivation::Group(group) => self.flatten_group(
                        group,
                        group.compositor == Compositor::Choice,
                        qname,
                        class_name,
                        synthesized,
                    )?,
                    ComplexDerivation::Empty => Vec::new(),
                    ComplexDerivation::ArrayOf(_) => unreachable!(),
                };
                members.extend(attribute_members);
                Ok(match derived {
                    DerivedType::ComplexContentExtension { .. } => ItemShape::ComplexExtension {
                        base: base_ref,
                        members,
                    },
                    _ => ItemShape::ComplexRestriction {
                        base: base_ref,
                        members,
                    },
                })
            }
        }
    }

    /// Flattens a model group tree into one ordered member list. Members of
    /// choice groups, and of any group nested under a choice, come out
    /// optional; nested groups of any compositor are folded into the parent
    /// list. The flattening loses the group structure.
    fn flatten_group(
        &self,
        group: &ModelGroup,
        forced_optional: bool,
        owner: &QName,
        owner_class: &str,
        synthesized: &mut Vec<ClassifiedItem>,
    ) -> Result<Vec<Member>, GeneratorError> {
        let mut members = Vec::new();
        for particle in &group.particles {
            let optional = forced_optional || particle.min_occurs == 0;
            let repeated = particle.max_occurs.is_multiple();
            match &particle.term {
                Term::Element(local) => {
                    let (type_, wire_type) = match &local.content {
                        ElementContent::TypeRef(q) => {
                            (self.resolve_member_type(q), Some(q.clone()))
                        }
                        ElementContent::LocalSimple(simple) => (
                            TypeRef::Builtin(self.resolve_simple_base(&simple.base, 0)),
                            Some(simple.base.clone()),
                        ),
                        ElementContent::LocalComplex(complex) => {
                            let synth_name = format!(
                                "{}{}",
                                owner_class,
                                class_name_for_type(&local.name)
                            );
                            let namespace = owner.namespace_name.clone().unwrap_or_default();
                            let synth_qname = QName::with_namespace(&namespace, &synth_name);
                            let shape = self.classify_complex(
                                complex,
                                &synth_qname,
                                &synth_name,
                                synthesized,
                            )?;
                            synthesized.push(ClassifiedItem {
                                class_name: synth_name.clone(),
                                namespace: namespace.clone(),
                                schema_name: synth_qname,
                                shape,
                            });
                            (
                                TypeRef::Named {
                                    namespace,
                                    class: synth_name,
                                },
                                None,
                            )
                        }
                    };
                    members.push(Member {
                        wire_name: local.name.clone(),
                        optional: optional || local.nillable,
                        repeated,
                        type_,
                        wire_type,
                    });
                }
                Term::ElementRef(reference) => {
                    let element = self.resolve_element(reference).ok_or_else(|| {
                        GeneratorError::UnresolvedTypeReference {
                            referrer: owner.clone(),
                            reference: reference.clone(),
                        }
                    })?;
                    let (type_, wire_type) = match &element.content {
                        ElementContent::TypeRef(q) => {
                            (self.resolve_member_type(q), Some(q.clone()))
                        }
                        ElementContent::LocalSimple(simple) => (
                            TypeRef::Builtin(self.resolve_simple_base(&simple.base, 0)),
                            Some(simple.base.clone()),
                        ),
                        // The synthesized item is created when the global
                        // element itself is classified.
                        ElementContent::LocalComplex(_) => (
                            TypeRef::Named {
                                namespace: reference.namespace_name.clone().unwrap_or_default(),
                                class: synthesized_type_name(&element.name),
                            },
                            None,
                        ),
                    };
                    members.push(Member {
                        wire_name: element.name.clone(),
                        optional: optional || element.nillable,
                        repeated,
                        type_,
                        wire_type,
                    });
                }
                Term::Group(nested) => {
                    let nested_forced =
                        forced_optional || optional || nested.compositor == Compositor::Choice;
                    members.extend(self.flatten_group(
                        nested,
                        nested_forced,
                        owner,
                        owner_class,
                        synthesized,
                    )?);
                }
                Term::Wildcard(_) => {
                    members.push(Member {
                        wire_name: "any".to_owned(),
                        optional: true,
                        repeated,
                        type_: TypeRef::Builtin(builtins::any_type()),
                        wire_type: None,
                    });
                }
            }
        }
        Ok(members)
    }

    fn attribute_members(&self, complex: &ComplexTypeDefinition) -> Vec<Member> {
        complex
            .attribute_uses
            .iter()
            .map(|attr| Member {
                wire_name: attr.name.clone(),
                optional: !attr.required,
                repeated: false,
                type_: self.resolve_member_type(&attr.type_definition),
                wire_type: Some(attr.type_definition.clone()),
            })
            .collect()
    }

    /// Resolves a member-type reference: builtin table first, then the
    /// schema dictionaries. An unknown name degrades to the untyped codec
    /// rather than failing, matching the atomic-simple fallback rule.
    pub fn resolve_member_type(&self, name: &QName) -> TypeRef {
        self.try_resolve(name).unwrap_or_else(|| {
            warn!("type reference {} is unresolvable, using the untyped codec", name);
            TypeRef::Builtin(builtins::any_type())
        })
    }

    fn try_resolve(&self, name: &QName) -> Option<TypeRef> {
        if let Some(builtin) = builtins::lookup(name) {
            return Some(TypeRef::Builtin(builtin));
        }
        self.resolve_type(name).map(|_| self.named_ref(name))
    }

    fn named_ref(&self, name: &QName) -> TypeRef {
        TypeRef::Named {
            namespace: name.namespace_name.clone().unwrap_or_default(),
            class: class_name_for_type(&name.local_name),
        }
    }

    /// Chases a simple-type base chain down to a builtin codec. Unknown
    /// bases and over-deep (cyclic) chains fall back to the untyped codec.
    fn resolve_simple_base(&self, base: &QName, depth: usize) -> Builtin {
        if depth >= MAX_BASE_CHAIN {
            warn!("base chain starting at {} does not terminate", base);
            return builtins::any_type();
        }
        if let Some(builtin) = builtins::lookup(base) {
            return builtin;
        }
        match self.resolve_type(base) {
            Some(TypeDefinition::Simple(simple)) => {
                self.resolve_simple_base(&simple.base, depth + 1)
            }
            Some(TypeDefinition::Complex(complex)) => match &complex.content {
                Content::Derived(derived) => self.resolve_simple_base(derived.base(), depth + 1),
                _ => builtins::any_type(),
            },
            None => {
                warn!("simple base {} is unresolvable, using the untyped codec", base);
                builtins::any_type()
            }
        }
    }
}

/// Simple-type wrappers with no members collapse to a plain value in
/// documentation; expose the member view uniformly.
impl ItemShape {
    pub fn members(&self) -> &[Member] {
        match self {
            Self::ComplexStruct { members }
            | Self::ComplexExtension { members, .. }
            | Self::ComplexRestriction { members, .. } => members,
            _ => &[],
        }
    }
}
