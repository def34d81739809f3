use crate::element_decl::ElementDeclaration;
use crate::shared::TypeDefinition;
use crate::xstypes::{AnyURI, NCName, Sequence};

/// One schema document: the named components of one target namespace,
/// together with the import list the generator uses to discover
/// transitively referenced namespaces.
///
/// Dictionaries are kept as sequences in document order; emission order is
/// a function of this order.
#[derive(Clone, Debug)]
pub struct Schema {
    pub target_namespace: AnyURI,
    pub imports: Sequence<Import>,
    /// Named top-level type definitions, document order.
    pub type_definitions: Sequence<TypeDefinition>,
    /// Named top-level element declarations, document order.
    pub element_declarations: Sequence<ElementDeclaration>,
}

#[derive(Clone, Debug)]
pub struct Import {
    pub namespace: AnyURI,
}

impl Schema {
    pub fn new(target_namespace: impl Into<AnyURI>) -> Self {
        Self {
            target_namespace: target_namespace.into(),
            imports: Vec::new(),
            type_definitions: Vec::new(),
            element_declarations: Vec::new(),
        }
    }

    pub fn type_definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.type_definitions
            .iter()
            .find(|t| t.name().map(NCName::as_str) == Some(name))
    }

    pub fn element_declaration(&self, name: &str) -> Option<&ElementDeclaration> {
        self.element_declarations.iter().find(|e| e.name == name)
    }
}
