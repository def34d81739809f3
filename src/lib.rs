//! Binding-code generator for WSDL contracts: resolves a parsed contract
//! and its embedded schemas into Rust source, one types file per service
//! and one client file with a proxy per SOAP binding. The generated code
//! runs against the `wsdl_rt` runtime crate.
//!
//! `generate` is pure: it performs no I/O, holds no global state, and
//! produces byte-identical output for identical input.

pub mod adapter;
pub mod builtins;
pub mod emit;
pub mod error;
pub mod naming;
pub mod registry;

use log::info;
use syn::parse_quote;
use wsdl_model::{Definition, Schema, Service};

use crate::adapter::{ClassifiedIndex, ContractAdapter, SchemaAdapter};
use crate::emit::contract::ContractEmitter;
use crate::emit::schema::SchemaEmitter;
use crate::error::GeneratorError;
use crate::naming::MemberNameTransform;
use crate::registry::NamespaceRegistry;

/// Header attached to every generated file.
const GENERATED_HEADER: &str = " Generated by wsdl-bindgen. Do not edit.";

#[derive(Clone, Copy)]
pub struct GenerateOptions {
    /// Maps schema member names to Rust field names. The default applies
    /// snake casing and keyword escaping.
    pub member_name: MemberNameTransform,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            member_name: naming::default_member_name,
        }
    }
}

#[derive(Debug)]
pub struct GeneratedFile {
    /// Suggested file name; writing is the caller's concern.
    pub name: String,
    pub contents: String,
}

#[derive(Debug)]
pub struct Artifacts {
    pub files: Vec<GeneratedFile>,
}

/// Generates all artifacts for one contract: for every service, a types
/// file holding one module per reachable schema namespace, plus one client
/// file holding a module per service.
pub fn generate(
    definition: &Definition,
    options: &GenerateOptions,
) -> Result<Artifacts, GeneratorError> {
    let registry = register_namespaces(definition);
    let schemas = SchemaAdapter::new(&definition.schemas);

    let mut index = ClassifiedIndex::default();
    for (namespace, _) in registry.modules() {
        // Imported namespaces without a schema document have no items.
        if let Some(schema) = definition.schema(namespace) {
            for item in schemas.classify_schema(schema)? {
                index.push(item);
            }
        }
    }
    info!(
        "classified {} namespace(s) of contract {}",
        registry.modules().count(),
        definition.name
    );

    let contract = ContractAdapter::new(definition);
    let mut files = Vec::new();
    let mut client_items: Vec<syn::Item> = Vec::new();
    for service in contract.services() {
        let types_module = types_module_name(service);
        files.push(types_file(&types_module, &index, &registry, options)?);

        let emitter = ContractEmitter::new(
            &contract,
            &index,
            &registry,
            naming::ident(&types_module),
            options.member_name,
        );
        let service_items = emitter.emit_service(service)?;
        let service_module = naming::snake_ident(&naming::sanitize(&service.name));
        client_items.push(parse_quote! {
            pub mod #service_module {
                #(#service_items)*
            }
        });
        info!("emitted client module for service {}", service.name);
    }

    files.push(GeneratedFile {
        name: format!(
            "{}_client.rs",
            naming::snake_ident(&naming::sanitize(&definition.name))
        ),
        contents: render_file(client_items),
    });
    Ok(Artifacts { files })
}

fn types_module_name(service: &Service) -> String {
    format!(
        "{}_types",
        naming::snake_ident(&naming::sanitize(&service.name))
    )
}

fn types_file(
    types_module: &str,
    index: &ClassifiedIndex,
    registry: &NamespaceRegistry,
    options: &GenerateOptions,
) -> Result<GeneratedFile, GeneratorError> {
    let emitter = SchemaEmitter::new(index, registry, options.member_name);
    let mut items: Vec<syn::Item> = Vec::new();
    // Document-less imported namespaces still produce a module, so the
    // alias imports of their peers resolve.
    for (namespace, module) in registry.modules() {
        let contents = emitter.emit_namespace(namespace)?;
        let module = naming::ident(module);
        items.push(parse_quote! {
            pub mod #module {
                #(#contents)*
            }
        });
    }
    Ok(GeneratedFile {
        name: format!("{types_module}.rs"),
        contents: render_file(items),
    })
}

/// Schema namespaces in first-seen order: schema documents first, then the
/// namespaces they import, skipping the well-known type namespaces.
fn register_namespaces(definition: &Definition) -> NamespaceRegistry {
    let mut registry = NamespaceRegistry::new();
    for schema in &definition.schemas {
        register_schema(&mut registry, schema);
    }
    registry
}

fn register_schema(registry: &mut NamespaceRegistry, schema: &Schema) {
    if builtins::is_type_namespace(&schema.target_namespace) {
        return;
    }
    registry.add(&schema.target_namespace);
    for import in &schema.imports {
        if !builtins::is_type_namespace(&import.namespace) {
            registry.add(&import.namespace);
        }
    }
}

fn render_file(items: Vec<syn::Item>) -> String {
    let file = syn::File {
        shebang: None,
        attrs: vec![
            parse_quote!(#![doc = #GENERATED_HEADER]),
            parse_quote!(#![allow(dead_code, unused_imports)]),
        ],
        items,
    };
    prettyplease::unparse(&file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wsdl_model::{
        ElementContent, ElementDeclaration, Port, PortType, QName, Service, SoapAddress,
    };

    const TNS: &str = "urn:example:service";
    const XS: &str = "http://www.w3.org/2001/XMLSchema";

    fn definition_with_schema() -> Definition {
        let mut schema = Schema::new(TNS);
        schema.element_declarations = vec![ElementDeclaration {
            name: "value".into(),
            target_namespace: Some(TNS.into()),
            content: ElementContent::TypeRef(QName::with_namespace(XS, "string")),
            nillable: false,
        }];
        let mut definition = Definition::new("Example", TNS);
        definition.schemas = vec![schema];
        definition
    }

    #[test]
    fn generation_is_deterministic() {
        let definition = definition_with_schema();
        let options = GenerateOptions::default();
        let first = generate(&definition, &options).unwrap();
        let second = generate(&definition, &options).unwrap();
        assert_eq!(first.files.len(), second.files.len());
        for (a, b) in first.files.iter().zip(&second.files) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.contents, b.contents);
        }
    }

    #[test]
    fn client_file_is_emitted_even_without_services() {
        let definition = definition_with_schema();
        let artifacts = generate(&definition, &GenerateOptions::default()).unwrap();
        assert_eq!(artifacts.files.len(), 1);
        assert_eq!(artifacts.files[0].name, "example_client.rs");
    }

    #[test]
    fn each_service_gets_a_types_file() {
        let mut definition = definition_with_schema();
        definition.port_types = vec![PortType {
            name: "ExamplePortType".into(),
            operations: vec![],
        }];
        definition.services = vec![Service {
            name: "ExampleService".into(),
            ports: vec![Port {
                name: "ExamplePort".into(),
                binding: QName::with_namespace(TNS, "ExampleBinding"),
                soap_address: Some(SoapAddress {
                    location: "http://localhost/x".into(),
                }),
            }],
        }];
        // An unknown binding reference surfaces as a structural error.
        let err = generate(&definition, &GenerateOptions::default()).unwrap_err();
        assert!(matches!(err, GeneratorError::UnknownBinding { .. }));
    }
}
