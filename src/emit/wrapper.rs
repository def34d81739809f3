//! Message wrapper generation: one wire-visible class per operation
//! message, generated under the client artifact's `messages` module. The
//! four serialization regimes share one struct rule; literal messages with
//! a single element part reuse the element's generated class instead.

use quote::quote;
use syn::parse_quote;
use wsdl_model::{Message, QName, SoapStyle, SoapUse};

use crate::adapter::{
    class_name_for_element, class_name_for_type, ContractAdapter, PartContent, ResolvedOperation,
    TypeRef,
};
use crate::builtins;
use crate::emit::types_path;
use crate::error::GeneratorError;
use crate::naming::{self, MemberNameTransform};
use crate::registry::NamespaceRegistry;

/// A generated wrapper plus everything the contract emitter needs to call
/// it: the parameter list of the proxy method and the expression that
/// rebuilds the wrapper from those parameters.
#[derive(Debug)]
pub struct WrapperPlan {
    pub wrapper: syn::Ident,
    pub params: Vec<WrapperParam>,
    pub construct: syn::Expr,
    pub items: Vec<syn::Item>,
}

#[derive(Debug)]
pub struct WrapperParam {
    pub name: syn::Ident,
    pub ty: syn::Type,
    /// Kept for docstring generation.
    pub type_ref: TypeRef,
}

enum Direction {
    Input,
    Output,
}

pub struct WrapperEmitter<'a> {
    contract: &'a ContractAdapter<'a>,
    known_class: &'a dyn Fn(&str, &str) -> bool,
    registry: &'a NamespaceRegistry,
    types_module: &'a syn::Ident,
    member_name: MemberNameTransform,
}

impl<'a> WrapperEmitter<'a> {
    /// `known_class` answers whether `(namespace, class)` was produced by
    /// schema classification; part references outside that set are
    /// unresolvable.
    pub fn new(
        contract: &'a ContractAdapter<'a>,
        known_class: &'a dyn Fn(&str, &str) -> bool,
        registry: &'a NamespaceRegistry,
        types_module: &'a syn::Ident,
        member_name: MemberNameTransform,
    ) -> Self {
        Self {
            contract,
            known_class,
            registry,
            types_module,
            member_name,
        }
    }

    pub fn input_plan(
        &self,
        operation: &ResolvedOperation,
    ) -> Result<Option<WrapperPlan>, GeneratorError> {
        match operation.input {
            Some(message) => self.plan(operation, message, Direction::Input).map(Some),
            None => Ok(None),
        }
    }

    pub fn output_plan(
        &self,
        operation: &ResolvedOperation,
    ) -> Result<Option<WrapperPlan>, GeneratorError> {
        match operation.output {
            Some(message) => self.plan(operation, message, Direction::Output).map(Some),
            None => Ok(None),
        }
    }

    fn plan(
        &self,
        operation: &ResolvedOperation,
        message: &Message,
        direction: Direction,
    ) -> Result<WrapperPlan, GeneratorError> {
        let base_name = match direction {
            Direction::Input => class_name_for_type(operation.name),
            Direction::Output => format!("{}Response", class_name_for_type(operation.name)),
        };
        // The wire element name of the wrapper itself: rpc style wraps the
        // parts in an operation-named element, document style does not.
        let wire_name = match (operation.style, direction) {
            (SoapStyle::Rpc, Direction::Input) => Some(operation.name.to_owned()),
            (SoapStyle::Rpc, Direction::Output) => Some(format!("{}Response", operation.name)),
            (SoapStyle::Document, _) => None,
        };

        if operation.use_ == SoapUse::Literal && message.parts.len() == 1 {
            if let PartContent::Element(element) =
                self.contract.part_content(message, &message.parts[0])?
            {
                return self.element_plan(message, element, base_name);
            }
        }
        self.parts_plan(message, base_name, wire_name, operation.body_namespace)
    }

    /// Single-part literal: the wrapper is a newtype over the element's
    /// generated class; no parts struct is synthesized and the inner
    /// element codec keeps its own wire name.
    fn element_plan(
        &self,
        message: &Message,
        element: &QName,
        base_name: String,
    ) -> Result<WrapperPlan, GeneratorError> {
        let type_ref = self.element_ref(message, &message.parts[0].name, element)?;
        let inner = types_path(&type_ref, self.types_module, self.registry)?;
        let wrapper = naming::ident(&base_name);
        let param = naming::member_ident(&message.parts[0].name, self.member_name);

        let items = vec![
            parse_quote! {
                #[derive(Debug, Clone)]
                pub struct #wrapper(pub #inner);
            },
            parse_quote! {
                impl wsdl_rt::codec::ElementCodec for #wrapper {
                    const ELEMENT_NAME: Option<&'static str> = None;
                    const ELEMENT_NAMESPACE: Option<&'static str> = None;
                }
            },
        ];
        Ok(WrapperPlan {
            wrapper: wrapper.clone(),
            construct: parse_quote!(messages::#wrapper(#param)),
            params: vec![WrapperParam {
                name: param,
                ty: inner,
                type_ref,
            }],
            items,
        })
    }

    /// Struct rule, shared by the encoded regimes and multi-part or
    /// type-part literal messages: a content struct listing the message's
    /// parts plus a thin wrapper fixing the wire name and namespace.
    fn parts_plan(
        &self,
        message: &Message,
        base_name: String,
        wire_name: Option<String>,
        body_namespace: Option<&str>,
    ) -> Result<WrapperPlan, GeneratorError> {
        let wrapper = naming::ident(&base_name);
        let content = naming::ident(&format!("{base_name}Content"));
        let content_name = message.name.as_str();

        let mut params = Vec::with_capacity(message.parts.len());
        let mut fields = Vec::new();
        let mut infos = Vec::new();
        for part in &message.parts {
            let type_ref = match self.contract.part_content(message, part)? {
                PartContent::Element(element) => self.element_ref(message, &part.name, element)?,
                PartContent::Type(type_name) => self.type_ref(message, &part.name, type_name)?,
            };
            let ty = types_path(&type_ref, self.types_module, self.registry)?;
            let name = naming::member_ident(&part.name, self.member_name);
            fields.push(quote! { pub #name: #ty });
            let wire = part.name.as_str();
            infos.push(quote! {
                wsdl_rt::codec::MemberInfo {
                    name: #wire,
                    optional: false,
                    repeated: false,
                }
            });
            params.push(WrapperParam {
                name,
                ty,
                type_ref,
            });
        }

        let element_name: syn::Expr = match &wire_name {
            Some(name) => parse_quote!(Some(#name)),
            None => parse_quote!(None),
        };
        let element_namespace: syn::Expr = match body_namespace {
            Some(namespace) => parse_quote!(Some(#namespace)),
            None => parse_quote!(None),
        };

        let items = vec![
            parse_quote! {
                #[derive(Debug, Clone)]
                pub struct #content {
                    #(#fields),*
                }
            },
            parse_quote! {
                impl wsdl_rt::codec::StructCodec for #content {
                    const TYPE_NAME: &'static str = #content_name;
                    const TYPE_NAMESPACE: Option<&'static str> = None;
                    const MEMBERS: &'static [wsdl_rt::codec::MemberInfo] = &[#(#infos),*];
                }
            },
            parse_quote! {
                #[derive(Debug, Clone)]
                pub struct #wrapper(pub #content);
            },
            parse_quote! {
                impl wsdl_rt::codec::ElementCodec for #wrapper {
                    const ELEMENT_NAME: Option<&'static str> = #element_name;
                    const ELEMENT_NAMESPACE: Option<&'static str> = #element_namespace;
                }
            },
        ];

        let field_names: Vec<&syn::Ident> = params.iter().map(|p| &p.name).collect();
        Ok(WrapperPlan {
            construct: parse_quote!(messages::#wrapper(messages::#content { #(#field_names),* })),
            wrapper,
            params,
            items,
        })
    }

    fn element_ref(
        &self,
        message: &Message,
        part: &str,
        element: &QName,
    ) -> Result<TypeRef, GeneratorError> {
        let namespace = element.namespace_name.as_deref();
        let class = class_name_for_element(&element.local_name);
        match namespace {
            Some(namespace) if (self.known_class)(namespace, &class) => Ok(TypeRef::Named {
                namespace: namespace.to_owned(),
                class,
            }),
            _ => Err(GeneratorError::UnresolvedPart {
                message: message.name.clone(),
                part: part.to_owned(),
                reference: element.clone(),
            }),
        }
    }

    fn type_ref(
        &self,
        message: &Message,
        part: &str,
        type_name: &QName,
    ) -> Result<TypeRef, GeneratorError> {
        if let Some(builtin) = builtins::lookup(type_name) {
            return Ok(TypeRef::Builtin(builtin));
        }
        let namespace = type_name.namespace_name.as_deref();
        let class = class_name_for_type(&type_name.local_name);
        match namespace {
            Some(namespace) if (self.known_class)(namespace, &class) => Ok(TypeRef::Named {
                namespace: namespace.to_owned(),
                class,
            }),
            _ => Err(GeneratorError::UnresolvedPart {
                message: message.name.clone(),
                part: part.to_owned(),
                reference: type_name.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::default_member_name;
    use quote::ToTokens;
    use wsdl_model::{Message, Part};

    const XS: &str = "http://www.w3.org/2001/XMLSchema";
    const NS: &str = "urn:example:contract";

    fn render(items: &[syn::Item]) -> String {
        let file = syn::File {
            shebang: None,
            attrs: vec![],
            items: items.to_vec(),
        };
        prettyplease::unparse(&file)
    }

    fn message(name: &str, parts: Vec<Part>) -> Message {
        Message {
            name: name.to_owned(),
            parts,
        }
    }

    fn operation<'a>(
        msg: &'a Message,
        style: SoapStyle,
        use_: SoapUse,
    ) -> ResolvedOperation<'a> {
        ResolvedOperation {
            name: "getValue",
            style,
            use_,
            action: None,
            body_namespace: Some(NS),
            documentation: None,
            input: Some(msg),
            output: None,
            faults: Vec::new(),
        }
    }

    fn plan(msg: &Message, style: SoapStyle, use_: SoapUse) -> WrapperPlan {
        let definition = wsdl_model::Definition::new("Sample", NS);
        let contract = ContractAdapter::new(&definition);
        let mut registry = NamespaceRegistry::new();
        registry.add(NS);
        let types_module = naming::ident("sample_types");
        let known: fn(&str, &str) -> bool = |ns, _| ns == NS;
        let emitter = WrapperEmitter::new(
            &contract,
            &known,
            &registry,
            &types_module,
            default_member_name,
        );
        emitter.input_plan(&operation(msg, style, use_)).unwrap().unwrap()
    }

    #[test]
    fn rpc_encoded_fixes_the_operation_element_name() {
        let msg = message(
            "getValueRequest",
            vec![Part::of_type("id", QName::with_namespace(XS, "int"))],
        );
        let plan = plan(&msg, SoapStyle::Rpc, SoapUse::Encoded);
        let source = render(&plan.items);
        assert!(source.contains("pub struct GetValueContent"));
        assert!(source.contains("pub id: i32"));
        assert!(source.contains("const ELEMENT_NAME: Option<&'static str> = Some(\"getValue\")"));
        assert!(source.contains(&format!(
            "const ELEMENT_NAMESPACE: Option<&'static str> = Some(\"{NS}\")"
        )));
    }

    #[test]
    fn document_encoded_leaves_the_wrapper_unnamed() {
        let msg = message(
            "getValueRequest",
            vec![Part::of_type("id", QName::with_namespace(XS, "int"))],
        );
        let plan = plan(&msg, SoapStyle::Document, SoapUse::Encoded);
        let source = render(&plan.items);
        assert!(source.contains("const ELEMENT_NAME: Option<&'static str> = None"));
    }

    #[test]
    fn single_part_element_literal_reuses_the_element_class() {
        let msg = message(
            "getValueRequest",
            vec![Part::of_element(
                "parameters",
                QName::with_namespace(NS, "getValue"),
            )],
        );
        let plan = plan(&msg, SoapStyle::Document, SoapUse::Literal);
        let source = render(&plan.items);
        assert!(
            source.contains("pub struct GetValue(pub crate::sample_types::example_contract::GetValueElement);"),
            "{source}"
        );
        assert!(!source.contains("Content"), "no parts struct expected:\n{source}");
        assert_eq!(plan.params.len(), 1);
        assert_eq!(plan.params[0].name.to_string(), "parameters");
    }

    #[test]
    fn multi_part_literal_falls_back_to_the_struct_rule() {
        let msg = message(
            "getValueRequest",
            vec![
                Part::of_element("head", QName::with_namespace(NS, "getValue")),
                Part::of_type("count", QName::with_namespace(XS, "int")),
            ],
        );
        let plan = plan(&msg, SoapStyle::Rpc, SoapUse::Literal);
        let source = render(&plan.items);
        assert!(source.contains("pub struct GetValueContent"));
        assert!(source.contains("const ELEMENT_NAME: Option<&'static str> = Some(\"getValue\")"));
        assert_eq!(plan.params.len(), 2);
    }

    #[test]
    fn unresolvable_part_reference_is_an_error() {
        let definition = wsdl_model::Definition::new("Sample", NS);
        let contract = ContractAdapter::new(&definition);
        let mut registry = NamespaceRegistry::new();
        registry.add(NS);
        let types_module = naming::ident("sample_types");
        let known: fn(&str, &str) -> bool = |_, _| false;
        let emitter = WrapperEmitter::new(
            &contract,
            &known,
            &registry,
            &types_module,
            default_member_name,
        );
        let msg = message(
            "getValueRequest",
            vec![Part::of_type("id", QName::with_namespace(NS, "Missing"))],
        );
        let err = emitter
            .input_plan(&operation(&msg, SoapStyle::Rpc, SoapUse::Encoded))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::UnresolvedPart { .. }));
    }

    #[test]
    fn construct_expression_rebuilds_the_wrapper() {
        let msg = message(
            "getValueRequest",
            vec![Part::of_type("id", QName::with_namespace(XS, "int"))],
        );
        let plan = plan(&msg, SoapStyle::Rpc, SoapUse::Encoded);
        assert_eq!(
            plan.construct.to_token_stream().to_string(),
            "messages :: GetValue (messages :: GetValueContent { id })"
        );
    }
}
