use crate::complex_type_def::ComplexTypeDefinition;
use crate::element_decl::ElementDeclaration;
use crate::model_group::ModelGroup;
use crate::simple_type_def::SimpleTypeDefinition;
use crate::wildcard::Wildcard;
use crate::xstypes::{AnyURI, NCName, QName};

/// Supertype of simple and complex type definition.
#[derive(Clone, Debug)]
pub enum TypeDefinition {
    Simple(SimpleTypeDefinition),
    Complex(ComplexTypeDefinition),
}

impl TypeDefinition {
    pub fn name(&self) -> Option<&NCName> {
        match self {
            Self::Simple(s) => s.name.as_ref(),
            Self::Complex(c) => c.name.as_ref(),
        }
    }

    pub fn target_namespace(&self) -> Option<&AnyURI> {
        match self {
            Self::Simple(s) => s.target_namespace.as_ref(),
            Self::Complex(c) => c.target_namespace.as_ref(),
        }
    }
}

/// Supertype of the terms that can appear in a particle.
#[derive(Clone, Debug)]
pub enum Term {
    /// A local element declaration, written inline in the group.
    Element(ElementDeclaration),
    /// A reference to a global element declaration.
    ElementRef(QName),
    /// A nested model group.
    Group(ModelGroup),
    Wildcard(Wildcard),
}
