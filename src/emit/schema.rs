//! Schema Emitter: turns one namespace's classified items into an ordered
//! list of `syn` items. Ordering is a two-pass fixpoint over emission
//! units; units whose dependency cannot be scheduled are flushed in
//! discovery order, with cycle-participant members boxed so the generated
//! types stay finitely sized.

use std::collections::{HashMap, HashSet};

use log::warn;
use proc_macro2::TokenStream;
use quote::quote;
use syn::parse_quote;

use crate::adapter::{ClassifiedIndex, ClassifiedItem, ItemShape, Member, TypeRef};
use crate::emit::{member_type, resolved_type};
use crate::error::GeneratorError;
use crate::naming::{self, MemberNameTransform};
use crate::registry::NamespaceRegistry;

/// One class-to-be-emitted plus the unresolved structural dependency that
/// must precede it.
struct EmissionUnit {
    class_name: String,
    precedes: Option<String>,
    items: Vec<syn::Item>,
    discovery: usize,
}

pub struct SchemaEmitter<'a> {
    index: &'a ClassifiedIndex,
    registry: &'a NamespaceRegistry,
    member_name: MemberNameTransform,
}

impl<'a> SchemaEmitter<'a> {
    pub fn new(
        index: &'a ClassifiedIndex,
        registry: &'a NamespaceRegistry,
        member_name: MemberNameTransform,
    ) -> Self {
        Self {
            index,
            registry,
            member_name,
        }
    }

    /// Emits the full contents of one namespace module: the target
    /// namespace literal, alias imports for every other registered
    /// namespace (registry order), and one class per schema item in
    /// dependency-resolved order. A namespace without classified items
    /// (imported but carrying no schema document) still gets its header,
    /// so alias imports pointing at it resolve.
    pub fn emit_namespace(&self, namespace: &str) -> Result<Vec<syn::Item>, GeneratorError> {
        let target = namespace;
        let mut out: Vec<syn::Item> = vec![parse_quote! {
            pub const TARGET_NAMESPACE: &str = #target;
        }];
        for (other, module) in self.registry.modules() {
            if other == namespace {
                continue;
            }
            let module = naming::ident(module);
            let alias = naming::ident(self.registry.alias_of(other)?);
            out.push(parse_quote! {
                pub use super::#module as #alias;
            });
        }

        let items: Vec<&ClassifiedItem> = self.index.namespace_items(namespace).collect();
        let (scc_of, cyclic) = reference_components(&items);

        let mut units = Vec::with_capacity(items.len());
        for (discovery, item) in items.iter().enumerate() {
            units.push(EmissionUnit {
                class_name: item.class_name.clone(),
                precedes: precedes_of(item),
                items: self.emit_item(item, &scc_of, &cyclic)?,
                discovery,
            });
        }

        let known: HashSet<String> = units.iter().map(|u| u.class_name.clone()).collect();
        for unit in order_units(units, &known) {
            out.extend(unit.items);
        }
        Ok(out)
    }

    fn emit_item(
        &self,
        item: &ClassifiedItem,
        scc_of: &HashMap<String, usize>,
        cyclic: &HashSet<usize>,
    ) -> Result<Vec<syn::Item>, GeneratorError> {
        let name = naming::ident(&item.class_name);
        let local = item.schema_name.local_name.as_str();
        let namespace = item.namespace.as_str();
        Ok(match &item.shape {
            ItemShape::Simple { builtin } => {
                let inner = builtin.rust_type();
                vec![
                    parse_quote! {
                        #[derive(Debug, Clone)]
                        pub struct #name(pub #inner);
                    },
                    parse_quote! {
                        impl wsdl_rt::codec::SimpleCodec for #name {
                            const TYPE_NAME: &'static str = #local;
                            const TYPE_NAMESPACE: Option<&'static str> = Some(TARGET_NAMESPACE);
                        }
                    },
                ]
            }
            ItemShape::ElementOfSimple { name: element, inner }
            | ItemShape::ElementOfComplex {
                name: element,
                type_ref: inner,
            } => {
                let inner = resolved_type(inner, Some(namespace), self.registry)?;
                let element_name = element.local_name.as_str();
                vec![
                    parse_quote! {
                        #[derive(Debug, Clone)]
                        pub struct #name(pub #inner);
                    },
                    parse_quote! {
                        impl wsdl_rt::codec::ElementCodec for #name {
                            const ELEMENT_NAME: Option<&'static str> = Some(#element_name);
                            const ELEMENT_NAMESPACE: Option<&'static str> = Some(TARGET_NAMESPACE);
                        }
                    },
                ]
            }
            ItemShape::ComplexSimpleContent { base } => {
                let inner = resolved_type(base, Some(namespace), self.registry)?;
                vec![
                    parse_quote! {
                        #[derive(Debug, Clone)]
                        pub struct #name(pub #inner);
                    },
                    parse_quote! {
                        impl wsdl_rt::codec::SimpleCodec for #name {
                            const TYPE_NAME: &'static str = #local;
                            const TYPE_NAMESPACE: Option<&'static str> = Some(TARGET_NAMESPACE);
                        }
                    },
                ]
            }
            ItemShape::ComplexArray { item: item_type } => {
                let inner = resolved_type(item_type, Some(namespace), self.registry)?;
                vec![
                    parse_quote! {
                        #[derive(Debug, Clone)]
                        pub struct #name(pub Vec<#inner>);
                    },
                    parse_quote! {
                        impl wsdl_rt::codec::ArrayCodec for #name {
                            type Item = #inner;
                            const TYPE_NAME: &'static str = #local;
                            const TYPE_NAMESPACE: Option<&'static str> = Some(TARGET_NAMESPACE);
                        }
                    },
                ]
            }
            ItemShape::ComplexStruct { members } => {
                self.emit_struct(item, members, None, scc_of, cyclic)?
            }
            ItemShape::ComplexExtension { base, members } => {
                let base_ty = resolved_type(base, Some(namespace), self.registry)?;
                self.emit_struct(item, members, Some(base_ty), scc_of, cyclic)?
            }
            // Restriction replaces the inherited member list outright.
            ItemShape::ComplexRestriction { members, .. } => {
                self.emit_struct(item, members, None, scc_of, cyclic)?
            }
        })
    }

    fn emit_struct(
        &self,
        item: &ClassifiedItem,
        members: &[Member],
        base: Option<syn::Type>,
        scc_of: &HashMap<String, usize>,
        cyclic: &HashSet<usize>,
    ) -> Result<Vec<syn::Item>, GeneratorError> {
        let name = naming::ident(&item.class_name);
        let local = item.schema_name.local_name.as_str();
        let owner_scc = scc_of.get(&item.class_name);

        let mut fields: Vec<TokenStream> = Vec::new();
        let mut infos: Vec<TokenStream> = Vec::new();
        let mut used = HashSet::new();
        if let Some(base_ty) = base {
            fields.push(quote! { pub base: #base_ty });
            used.insert("base".to_owned());
        }
        for member in members {
            let mut field_name = (self.member_name)(&member.wire_name);
            while !used.insert(field_name.clone()) {
                field_name.push('_');
            }
            let ident = naming::ident(&field_name);
            let boxed = match &member.type_ {
                TypeRef::Named { namespace, class } if *namespace == item.namespace => {
                    match (owner_scc, scc_of.get(class)) {
                        (Some(a), Some(b)) => a == b && cyclic.contains(a),
                        _ => false,
                    }
                }
                _ => false,
            };
            let base_ty = resolved_type(&member.type_, Some(&item.namespace), self.registry)?;
            let ty = member_type(base_ty, member.optional, member.repeated, boxed);
            fields.push(quote! { pub #ident: #ty });

            let wire = member.wire_name.as_str();
            let optional = member.optional;
            let repeated = member.repeated;
            infos.push(quote! {
                wsdl_rt::codec::MemberInfo {
                    name: #wire,
                    optional: #optional,
                    repeated: #repeated,
                }
            });
        }

        Ok(vec![
            parse_quote! {
                #[derive(Debug, Clone)]
                pub struct #name {
                    #(#fields),*
                }
            },
            parse_quote! {
                impl wsdl_rt::codec::StructCodec for #name {
                    const TYPE_NAME: &'static str = #local;
                    const TYPE_NAMESPACE: Option<&'static str> = Some(TARGET_NAMESPACE);
                    const MEMBERS: &'static [wsdl_rt::codec::MemberInfo] = &[#(#infos),*];
                }
            },
        ])
    }
}

/// The same-namespace class a unit structurally depends on, if any.
fn precedes_of(item: &ClassifiedItem) -> Option<String> {
    let same_namespace = |type_ref: &TypeRef| match type_ref {
        TypeRef::Named { namespace, class } if *namespace == item.namespace => Some(class.clone()),
        _ => None,
    };
    match &item.shape {
        ItemShape::ElementOfSimple { inner, .. } => same_namespace(inner),
        ItemShape::ElementOfComplex { type_ref, .. } => same_namespace(type_ref),
        ItemShape::ComplexSimpleContent { base }
        | ItemShape::ComplexExtension { base, .. }
        | ItemShape::ComplexRestriction { base, .. } => same_namespace(base),
        ItemShape::ComplexArray { item: item_type } => same_namespace(item_type),
        ItemShape::Simple { .. } | ItemShape::ComplexStruct { .. } => None,
    }
}

/// Two-pass fixpoint: units ready in discovery order, pending units keyed
/// by the class that must precede them, residual (cyclic) units flushed in
/// discovery order regardless.
fn order_units(units: Vec<EmissionUnit>, known: &HashSet<String>) -> Vec<EmissionUnit> {
    let mut ready: Vec<EmissionUnit> = Vec::new();
    let mut pending: HashMap<String, Vec<EmissionUnit>> = HashMap::new();
    let mut flushed: HashSet<String> = HashSet::new();

    for unit in units {
        match unit.precedes.as_ref() {
            Some(target) if known.contains(target) && !flushed.contains(target) => {
                pending.entry(target.clone()).or_default().push(unit);
            }
            _ => {
                flushed.insert(unit.class_name.clone());
                ready.push(unit);
            }
        }
    }

    let mut i = 0;
    while i < ready.len() {
        if let Some(released) = pending.remove(&ready[i].class_name) {
            for unit in released {
                flushed.insert(unit.class_name.clone());
                ready.push(unit);
            }
        }
        i += 1;
    }

    if !pending.is_empty() {
        let mut residual: Vec<EmissionUnit> = pending.into_values().flatten().collect();
        residual.sort_by_key(|u| u.discovery);
        for unit in residual {
            warn!(
                "dependency of {} on {:?} is unresolvable, emitting in discovery order",
                unit.class_name, unit.precedes
            );
            ready.push(unit);
        }
    }
    ready
}

/// Strongly connected components of the same-namespace reference graph,
/// via iterative Tarjan. Returns each class's component id and the set of
/// component ids that actually contain a cycle.
fn reference_components(
    items: &[&ClassifiedItem],
) -> (HashMap<String, usize>, HashSet<usize>) {
    let position: HashMap<&str, usize> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.class_name.as_str(), i))
        .collect();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
    for (i, item) in items.iter().enumerate() {
        let mut push_edge = |type_ref: &TypeRef| {
            if let TypeRef::Named { namespace, class } = type_ref {
                if *namespace == item.namespace {
                    if let Some(&j) = position.get(class.as_str()) {
                        adjacency[i].push(j);
                    }
                }
            }
        };
        match &item.shape {
            ItemShape::Simple { .. } => {}
            ItemShape::ElementOfSimple { inner, .. } => push_edge(inner),
            ItemShape::ElementOfComplex { type_ref, .. } => push_edge(type_ref),
            ItemShape::ComplexSimpleContent { base } => push_edge(base),
            ItemShape::ComplexArray { item: inner } => push_edge(inner),
            ItemShape::ComplexStruct { members } => {
                members.iter().for_each(|m| push_edge(&m.type_))
            }
            ItemShape::ComplexExtension { base, members }
            | ItemShape::ComplexRestriction { base, members } => {
                push_edge(base);
                members.iter().for_each(|m| push_edge(&m.type_));
            }
        }
    }

    let n = items.len();
    let mut index = vec![usize::MAX; n];
    let mut lowlink = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut counter = 0usize;
    let mut scc_of_idx = vec![0usize; n];
    let mut cyclic: HashSet<usize> = HashSet::new();
    let mut next_scc = 0usize;

    for start in 0..n {
        if index[start] != usize::MAX {
            continue;
        }
        let mut frames: Vec<(usize, usize)> = vec![(start, 0)];
        while let Some(frame) = frames.last_mut() {
            let (v, edge) = (frame.0, frame.1);
            if index[v] == usize::MAX {
                index[v] = counter;
                lowlink[v] = counter;
                counter += 1;
                stack.push(v);
                on_stack[v] = true;
            }
            if edge < adjacency[v].len() {
                frame.1 += 1;
                let w = adjacency[v][edge];
                if index[w] == usize::MAX {
                    frames.push((w, 0));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(index[w]);
                }
            } else {
                frames.pop();
                if let Some(parent) = frames.last() {
                    let p = parent.0;
                    lowlink[p] = lowlink[p].min(lowlink[v]);
                }
                if lowlink[v] == index[v] {
                    let mut size = 0;
                    loop {
                        let w = stack.pop().expect("tarjan stack underflow");
                        on_stack[w] = false;
                        scc_of_idx[w] = next_scc;
                        size += 1;
                        if w == v {
                            break;
                        }
                    }
                    if size > 1 || adjacency[v].contains(&v) {
                        cyclic.insert(next_scc);
                    }
                    next_scc += 1;
                }
            }
        }
    }

    let scc_of = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.class_name.clone(), scc_of_idx[i]))
        .collect();
    (scc_of, cyclic)
}
