//! Fixed table of XML Schema builtin types and the Rust types their codecs
//! are emitted over. Lookups cover the three schema namespace revisions and
//! the SOAP encoding namespace, which re-exports the same simple types and
//! adds the canonical array base.

use proc_macro2::{Ident, Span};
use syn::parse_quote;
use wsdl_model::QName;

pub const XSD_NAMESPACES: [&str; 3] = [
    "http://www.w3.org/2001/XMLSchema",
    "http://www.w3.org/2000/10/XMLSchema",
    "http://www.w3.org/1999/XMLSchema",
];

pub const SOAP_ENCODING_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/encoding/";

/// Whether a namespace URI is one of the well-known type namespaces, i.e.
/// never backed by a schema document of its own.
pub fn is_type_namespace(uri: &str) -> bool {
    XSD_NAMESPACES.contains(&uri) || uri == SOAP_ENCODING_NAMESPACE
}

/// The canonical SOAP-encoded array base type.
pub fn is_array_base(name: &QName) -> bool {
    name.local_name == "Array"
        && name.namespace_name.as_deref() == Some(SOAP_ENCODING_NAMESPACE)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuiltinSource {
    RustPrimitive,
    HelperType,
}

/// One resolved builtin: where its Rust rendering comes from and what it is
/// called there.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Builtin {
    pub source: BuiltinSource,
    pub name: &'static str,
}

impl Builtin {
    pub fn rust_type(&self) -> syn::Type {
        let name = Ident::new(self.name, Span::call_site());
        match self.source {
            BuiltinSource::RustPrimitive => parse_quote!(#name),
            BuiltinSource::HelperType => parse_quote!(wsdl_rt::types::#name),
        }
    }
}

/// The untyped fallback codec for names the table does not know.
pub fn any_type() -> Builtin {
    Builtin {
        source: BuiltinSource::HelperType,
        name: "AnyType",
    }
}

/// Looks a qualified name up in the builtin table. `None` when the
/// namespace is not a type namespace or the local name has no entry.
pub fn lookup(name: &QName) -> Option<Builtin> {
    let namespace = name.namespace_name.as_deref()?;
    if !is_type_namespace(namespace) {
        return None;
    }
    use BuiltinSource::*;
    let (source, rust_name) = match name.local_name.as_str() {
        "boolean" => (RustPrimitive, "bool"),
        "double" => (RustPrimitive, "f64"),
        "float" => (RustPrimitive, "f32"),
        "long" => (RustPrimitive, "i64"),
        "int" => (RustPrimitive, "i32"),
        "short" => (RustPrimitive, "i16"),
        "byte" => (RustPrimitive, "i8"),
        "unsignedLong" => (RustPrimitive, "u64"),
        "unsignedInt" => (RustPrimitive, "u32"),
        "unsignedShort" => (RustPrimitive, "u16"),
        "unsignedByte" => (RustPrimitive, "u8"),
        "string" => (RustPrimitive, "String"),
        "anyType" => (HelperType, "AnyType"),
        "anySimpleType" => (HelperType, "AnySimpleType"),
        "anyURI" => (HelperType, "AnyUri"),
        "decimal" => (HelperType, "Decimal"),
        "integer" => (HelperType, "Integer"),
        "nonPositiveInteger" => (HelperType, "NonPositiveInteger"),
        "negativeInteger" => (HelperType, "NegativeInteger"),
        "nonNegativeInteger" => (HelperType, "NonNegativeInteger"),
        "positiveInteger" => (HelperType, "PositiveInteger"),
        "dateTime" => (HelperType, "DateTime"),
        "duration" => (HelperType, "Duration"),
        "time" => (HelperType, "Time"),
        "date" => (HelperType, "Date"),
        "gYearMonth" => (HelperType, "GYearMonth"),
        "gYear" => (HelperType, "GYear"),
        "gMonthDay" => (HelperType, "GMonthDay"),
        "gMonth" => (HelperType, "GMonth"),
        "gDay" => (HelperType, "GDay"),
        "hexBinary" => (HelperType, "HexBinary"),
        "base64Binary" => (HelperType, "Base64Binary"),
        "QName" => (HelperType, "QName"),
        "NOTATION" => (HelperType, "Notation"),
        "normalizedString" => (HelperType, "NormalizedString"),
        "token" => (HelperType, "Token"),
        "language" => (HelperType, "Language"),
        "NMTOKEN" => (HelperType, "NmToken"),
        "NMTOKENS" => (HelperType, "NmTokens"),
        "Name" => (HelperType, "Name"),
        "NCName" => (HelperType, "NcName"),
        "ID" => (HelperType, "Id"),
        "IDREF" => (HelperType, "IdRef"),
        "IDREFS" => (HelperType, "IdRefs"),
        "ENTITY" => (HelperType, "Entity"),
        "ENTITIES" => (HelperType, "Entities"),
        _ => return None,
    };
    Some(Builtin {
        source,
        name: rust_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;

    fn xs(local: &str) -> QName {
        QName::with_namespace(XSD_NAMESPACES[0], local)
    }

    #[test]
    fn primitives_resolve_to_rust_types() {
        let int = lookup(&xs("int")).unwrap();
        assert_eq!(int.rust_type().to_token_stream().to_string(), "i32");
        let string = lookup(&xs("string")).unwrap();
        assert_eq!(string.rust_type().to_token_stream().to_string(), "String");
    }

    #[test]
    fn helper_types_resolve_through_the_runtime() {
        let decimal = lookup(&xs("decimal")).unwrap();
        assert_eq!(
            decimal.rust_type().to_token_stream().to_string(),
            "wsdl_rt :: types :: Decimal"
        );
    }

    #[test]
    fn soap_encoding_shares_the_table() {
        let name = QName::with_namespace(SOAP_ENCODING_NAMESPACE, "string");
        assert!(lookup(&name).is_some());
        assert!(is_array_base(&QName::with_namespace(
            SOAP_ENCODING_NAMESPACE,
            "Array"
        )));
    }

    #[test]
    fn unknown_names_miss() {
        assert!(lookup(&xs("noSuchType")).is_none());
        assert!(lookup(&QName::with_namespace("urn:app", "int")).is_none());
    }
}
