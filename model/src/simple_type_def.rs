use crate::xstypes::{AnyURI, NCName, QName};

/// Schema Component: Simple Type Definition.
///
/// Covers both atomic builtins referenced by name and user derivations
/// (restrictions) of another simple type. The generator resolves the base
/// chain down to a builtin; facets beyond the base reference are not
/// retained because the emitted codecs delegate validation to the runtime.
#[derive(Clone, Debug)]
pub struct SimpleTypeDefinition {
    /// `None` for definitions local to an element declaration.
    pub name: Option<NCName>,
    pub target_namespace: Option<AnyURI>,
    /// The restriction base: a builtin name or another named simple type.
    pub base: QName,
}
