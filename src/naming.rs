//! The single sanitizing path for every identifier the generator emits.
//! Schema and WSDL names pass through [`sanitize`] and one of the
//! case-shaping helpers; nothing else mints identifiers.

use check_keyword::CheckKeyword;
use heck::ToSnakeCase;
use proc_macro2::{Ident, Span};

/// Transform applied to every member identifier, so callers can keep
/// generated fields from shadowing wire-visible names however they like.
/// The default is snake case with keyword escaping.
pub type MemberNameTransform = fn(&str) -> String;

pub fn default_member_name(name: &str) -> String {
    sanitize(name).to_snake_case()
}

/// Rewrites anything that cannot appear in an identifier to `_` and guards
/// a leading digit.
pub fn sanitize(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

pub fn ident(name: &str) -> Ident {
    if ["crate", "self", "super", "Self"].contains(&name) {
        // These are keywords that are not allowed as raw identifiers
        Ident::new(&format!("{}_", name), Span::call_site())
    } else if name.is_keyword() {
        Ident::new_raw(name, Span::call_site())
    } else {
        Ident::new(name, Span::call_site())
    }
}

/// Identifier for a generated function or module: `snake_case`.
pub fn snake_ident(name: &str) -> Ident {
    ident(&sanitize(name).to_snake_case())
}

/// Identifier for a generated struct member, after the caller's transform.
pub fn member_ident(name: &str, transform: MemberNameTransform) -> Ident {
    ident(&transform(name))
}
