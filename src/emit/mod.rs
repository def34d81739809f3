//! Emitters: turn classified schema items and resolved operations into
//! `syn` items, assembled into files by the orchestrator.

pub mod contract;
pub mod doc;
pub mod schema;
pub mod wrapper;

use syn::parse_quote;

use crate::adapter::TypeRef;
use crate::error::GeneratorError;
use crate::naming;
use crate::registry::NamespaceRegistry;

/// Renders a resolved type reference as a Rust type, relative to the
/// namespace module the rendering appears in. References to other
/// namespaces are qualified through the registry's short alias, which the
/// surrounding module binds with a `use` declaration.
pub(crate) fn resolved_type(
    type_ref: &TypeRef,
    current_namespace: Option<&str>,
    registry: &NamespaceRegistry,
) -> Result<syn::Type, GeneratorError> {
    match type_ref {
        TypeRef::Builtin(builtin) => Ok(builtin.rust_type()),
        TypeRef::Named { namespace, class } => {
            let class = naming::ident(class);
            if current_namespace == Some(namespace.as_str()) {
                Ok(parse_quote!(#class))
            } else {
                let alias = naming::ident(registry.alias_of(namespace)?);
                Ok(parse_quote!(#alias::#class))
            }
        }
    }
}

/// Renders a type reference as seen from the client artifact, which lives
/// in a different file than the namespace modules and therefore qualifies
/// every generated class through the types artifact's crate path.
pub(crate) fn types_path(
    type_ref: &TypeRef,
    types_module: &syn::Ident,
    registry: &NamespaceRegistry,
) -> Result<syn::Type, GeneratorError> {
    match type_ref {
        TypeRef::Builtin(builtin) => Ok(builtin.rust_type()),
        TypeRef::Named { namespace, class } => {
            let module = naming::ident(registry.module_name_of(namespace)?);
            let class = naming::ident(class);
            Ok(parse_quote!(crate::#types_module::#module::#class))
        }
    }
}

/// Applies occurrence and indirection wrapping to a member's base type.
pub(crate) fn member_type(base: syn::Type, optional: bool, repeated: bool, boxed: bool) -> syn::Type {
    if repeated {
        // Vec already heap-allocates; no extra indirection needed.
        parse_quote!(Vec<#base>)
    } else {
        let base: syn::Type = if boxed { parse_quote!(Box<#base>) } else { base };
        if optional {
            parse_quote!(Option<#base>)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;

    fn render(ty: syn::Type) -> String {
        ty.to_token_stream().to_string()
    }

    #[test]
    fn members_wrap_by_occurrence() {
        let base: syn::Type = parse_quote!(i32);
        assert_eq!(render(member_type(base.clone(), false, false, false)), "i32");
        assert_eq!(
            render(member_type(base.clone(), true, false, false)),
            "Option < i32 >"
        );
        assert_eq!(render(member_type(base.clone(), true, true, false)), "Vec < i32 >");
        assert_eq!(
            render(member_type(base, true, false, true)),
            "Option < Box < i32 > >"
        );
    }

    #[test]
    fn cross_namespace_references_use_the_alias() {
        let mut registry = NamespaceRegistry::new();
        registry.add("urn:a");
        registry.add("urn:b");
        let reference = TypeRef::Named {
            namespace: "urn:b".into(),
            class: "Foo".into(),
        };
        let same = resolved_type(&reference, Some("urn:b"), &registry).unwrap();
        assert_eq!(render(same), "Foo");
        let cross = resolved_type(&reference, Some("urn:a"), &registry).unwrap();
        assert_eq!(render(cross), "ns1 :: Foo");
    }
}
