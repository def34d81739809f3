use crate::xstypes::{AnyURI, NCName, QName};

/// Schema Component: Attribute Declaration, here always paired with its use
/// on the owning complex type.
#[derive(Clone, Debug)]
pub struct AttributeDeclaration {
    pub name: NCName,
    pub target_namespace: Option<AnyURI>,
    pub type_definition: QName,
    pub required: bool,
}
