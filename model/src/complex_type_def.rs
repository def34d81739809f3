use crate::attribute_decl::AttributeDeclaration;
use crate::model_group::ModelGroup;
use crate::xstypes::{AnyURI, NCName, QName, Sequence};

/// Schema Component: Complex Type Definition.
#[derive(Clone, Debug)]
pub struct ComplexTypeDefinition {
    /// `None` for definitions local to an element declaration.
    pub name: Option<NCName>,
    pub target_namespace: Option<AnyURI>,
    pub content: Content,
    pub attribute_uses: Sequence<AttributeDeclaration>,
    /// References to named attribute groups. Recognized but unsupported by
    /// the generator.
    pub attribute_group_refs: Sequence<QName>,
}

impl ComplexTypeDefinition {
    pub fn named(
        name: impl Into<NCName>,
        target_namespace: impl Into<AnyURI>,
        content: Content,
    ) -> Self {
        Self {
            name: Some(name.into()),
            target_namespace: Some(target_namespace.into()),
            content,
            attribute_uses: Vec::new(),
            attribute_group_refs: Vec::new(),
        }
    }
}

/// Content of a complex type: empty, an own model group, or a derivation of
/// some base type.
#[derive(Clone, Debug)]
pub enum Content {
    Empty,
    Group(ModelGroup),
    Derived(DerivedType),
}

/// A derivation step, tagged by content variety and derivation method.
#[derive(Clone, Debug)]
pub enum DerivedType {
    SimpleContentRestriction { base: QName },
    SimpleContentExtension { base: QName },
    ComplexContentRestriction { base: QName, content: ComplexDerivation },
    ComplexContentExtension { base: QName, content: ComplexDerivation },
}

impl DerivedType {
    pub fn base(&self) -> &QName {
        match self {
            Self::SimpleContentRestriction { base }
            | Self::SimpleContentExtension { base }
            | Self::ComplexContentRestriction { base, .. }
            | Self::ComplexContentExtension { base, .. } => base,
        }
    }
}

/// The body of a complex-content derivation. `ArrayOf` is only meaningful
/// when the base is the canonical SOAP-encoding array type.
#[derive(Clone, Debug)]
pub enum ComplexDerivation {
    Empty,
    Group(ModelGroup),
    ArrayOf(ArrayItem),
}

/// Item-type descriptor carried by a SOAP-encoded array derivation.
#[derive(Clone, Debug)]
pub struct ArrayItem {
    pub item_type: QName,
}
