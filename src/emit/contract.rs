//! Contract Emitter: one client module per service, holding the message
//! wrappers, a trait per port type, a locator with one accessor per bound
//! port, and a proxy struct per binding that drives `wsdl_rt::soap::Client`.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse_quote;
use wsdl_model::Service;

use crate::adapter::{
    class_name_for_type, ClassifiedIndex, ContractAdapter, ResolvedOperation, SoapPort,
};
use crate::emit::doc::DocBuilder;
use crate::emit::wrapper::{WrapperEmitter, WrapperPlan};
use crate::error::GeneratorError;
use crate::naming::{self, MemberNameTransform};
use crate::registry::NamespaceRegistry;

pub struct ContractEmitter<'a> {
    contract: &'a ContractAdapter<'a>,
    index: &'a ClassifiedIndex,
    registry: &'a NamespaceRegistry,
    types_module: syn::Ident,
    member_name: MemberNameTransform,
}

impl<'a> ContractEmitter<'a> {
    pub fn new(
        contract: &'a ContractAdapter<'a>,
        index: &'a ClassifiedIndex,
        registry: &'a NamespaceRegistry,
        types_module: syn::Ident,
        member_name: MemberNameTransform,
    ) -> Self {
        Self {
            contract,
            index,
            registry,
            types_module,
            member_name,
        }
    }

    /// Emits the contents of one service module.
    pub fn emit_service(&self, service: &'a Service) -> Result<Vec<syn::Item>, GeneratorError> {
        let ports = self.contract.soap_ports(service)?;
        let known = |namespace: &str, class: &str| self.index.get(namespace, class).is_some();
        let wrappers = WrapperEmitter::new(
            self.contract,
            &known,
            self.registry,
            &self.types_module,
            self.member_name,
        );
        let docs = DocBuilder::new(self.index);

        let mut message_items: Vec<syn::Item> = Vec::new();
        let mut emitted_wrappers: HashSet<String> = HashSet::new();
        let mut traits: Vec<syn::Item> = Vec::new();
        let mut emitted_traits: HashSet<String> = HashSet::new();
        let mut bindings: Vec<syn::Item> = Vec::new();
        let mut emitted_bindings: HashSet<String> = HashSet::new();
        let mut locator_methods: Vec<syn::ImplItem> = Vec::new();

        for port in &ports {
            let operations = self.contract.operations(port)?;

            let mut plans = Vec::with_capacity(operations.len());
            for operation in &operations {
                let input = wrappers.input_plan(operation)?;
                let output = wrappers.output_plan(operation)?;
                for plan in input.iter().chain(output.iter()) {
                    if emitted_wrappers.insert(plan.wrapper.to_string()) {
                        message_items.extend(plan.items.iter().cloned());
                    }
                }
                plans.push((operation, input, output));
            }

            let trait_name = naming::ident(&class_name_for_type(&port.port_type.name));
            if emitted_traits.insert(port.port_type.name.clone()) {
                traits.push(self.emit_trait(&trait_name, &plans, &docs));
            }

            let binding_name = naming::ident(&class_name_for_type(&port.binding.name));
            if emitted_bindings.insert(port.binding.name.clone()) {
                bindings.extend(self.emit_binding(&binding_name, &trait_name, &plans));
            }

            locator_methods.extend(self.locator_methods(port, &binding_name));
        }

        let locator_name =
            naming::ident(&format!("{}Locator", class_name_for_type(&service.name)));
        let mut out: Vec<syn::Item> = vec![parse_quote! {
            pub mod messages {
                #(#message_items)*
            }
        }];
        out.extend(traits);
        out.push(parse_quote! {
            pub struct #locator_name;
        });
        out.push(parse_quote! {
            impl #locator_name {
                #(#locator_methods)*
            }
        });
        out.extend(bindings);
        Ok(out)
    }

    fn emit_trait(
        &self,
        trait_name: &syn::Ident,
        plans: &[(&ResolvedOperation<'a>, Option<WrapperPlan>, Option<WrapperPlan>)],
        docs: &DocBuilder<'_>,
    ) -> syn::Item {
        let methods: Vec<syn::TraitItem> = plans
            .iter()
            .map(|(operation, input, output)| {
                let doc_lines = self.doc_lines(operation, input.as_ref(), output.as_ref(), docs);
                let signature = self.signature(operation, input.as_ref(), output.as_ref());
                parse_quote! {
                    #(#[doc = #doc_lines])*
                    #signature;
                }
            })
            .collect();
        parse_quote! {
            pub trait #trait_name {
                #(#methods)*
            }
        }
    }

    fn emit_binding(
        &self,
        binding_name: &syn::Ident,
        trait_name: &syn::Ident,
        plans: &[(&ResolvedOperation<'a>, Option<WrapperPlan>, Option<WrapperPlan>)],
    ) -> Vec<syn::Item> {
        let methods: Vec<syn::ImplItem> = plans
            .iter()
            .map(|(operation, input, output)| {
                let signature = self.signature(operation, input.as_ref(), output.as_ref());
                let body = self.method_body(operation, input.as_ref(), output.as_ref());
                parse_quote! {
                    #signature {
                        #body
                    }
                }
            })
            .collect();
        vec![
            parse_quote! {
                pub struct #binding_name {
                    client: wsdl_rt::soap::Client,
                }
            },
            parse_quote! {
                impl #binding_name {
                    pub fn new(address: &str) -> Self {
                        Self {
                            client: wsdl_rt::soap::Client::new(address),
                        }
                    }

                    pub fn with_client(client: wsdl_rt::soap::Client) -> Self {
                        Self { client }
                    }
                }
            },
            parse_quote! {
                impl #trait_name for #binding_name {
                    #(#methods)*
                }
            },
        ]
    }

    fn locator_methods(&self, port: &SoapPort<'a>, binding_name: &syn::Ident) -> Vec<syn::ImplItem> {
        let port_snake = naming::snake_ident(port.port_name).to_string();
        let address_method = naming::ident(&format!("get_{port_snake}_address"));
        let port_method = naming::ident(&format!("get_{port_snake}"));
        let address = port.address.location.as_str();
        vec![
            parse_quote! {
                pub fn #address_method() -> &'static str {
                    #address
                }
            },
            parse_quote! {
                pub fn #port_method() -> #binding_name {
                    #binding_name::new(Self::#address_method())
                }
            },
        ]
    }

    fn signature(
        &self,
        operation: &ResolvedOperation<'a>,
        input: Option<&WrapperPlan>,
        output: Option<&WrapperPlan>,
    ) -> syn::Signature {
        let method = naming::snake_ident(operation.name);
        let params: Vec<TokenStream> = input
            .map(|plan| {
                plan.params
                    .iter()
                    .map(|p| {
                        let name = &p.name;
                        let ty = &p.ty;
                        quote! { #name: #ty }
                    })
                    .collect()
            })
            .unwrap_or_default();
        let return_type: syn::Type = match output {
            Some(plan) => {
                let wrapper = &plan.wrapper;
                parse_quote!(messages::#wrapper)
            }
            None => parse_quote!(()),
        };
        parse_quote! {
            fn #method(&mut self #(, #params)*) -> Result<#return_type, wsdl_rt::soap::Error>
        }
    }

    fn method_body(
        &self,
        operation: &ResolvedOperation<'a>,
        input: Option<&WrapperPlan>,
        output: Option<&WrapperPlan>,
    ) -> TokenStream {
        let action: syn::Expr = match operation.action {
            Some(action) => parse_quote!(Some(#action)),
            None => parse_quote!(None),
        };
        // `()` is the runtime's empty SOAP body.
        let request: syn::Expr = match input {
            Some(plan) => plan.construct.clone(),
            None => parse_quote!(()),
        };
        match output {
            Some(_) => quote! {
                let request = #request;
                self.client.call(#action, request)
            },
            None => quote! {
                let request = #request;
                self.client.send(#action, request)
            },
        }
    }

    fn doc_lines(
        &self,
        operation: &ResolvedOperation<'a>,
        input: Option<&WrapperPlan>,
        output: Option<&WrapperPlan>,
        docs: &DocBuilder<'_>,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(documentation) = operation.documentation {
            for line in documentation.trim().lines() {
                lines.push(line.trim().to_owned());
            }
        }
        if let Some(plan) = input {
            for param in &plan.params {
                lines.push(docs.parameter_line(&param.name.to_string(), &param.type_ref));
            }
        }
        match output.map(|plan| &plan.params[..]) {
            None | Some([]) => {}
            Some([single]) => lines.push(docs.returns_line(&single.type_ref)),
            Some(many) => {
                let rendered: Vec<String> = many
                    .iter()
                    .map(|p| format!("{}: {}", p.name, docs.describe(&p.type_ref)))
                    .collect();
                lines.push(format!("Returns ({})", rendered.join(", ")));
            }
        }
        if !operation.faults.is_empty() {
            let names: Vec<&str> = operation.faults.iter().map(|f| f.name.as_str()).collect();
            lines.push(format!("May fault with: {}", names.join(", ")));
        }
        lines
    }
}
