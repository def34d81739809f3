use crate::complex_type_def::ComplexTypeDefinition;
use crate::simple_type_def::SimpleTypeDefinition;
use crate::xstypes::{AnyURI, NCName, QName};

/// Schema Component: Element Declaration.
///
/// Used both for global (top-level, named) declarations owned by a
/// [`Schema`](crate::schema::Schema) and for local declarations appearing
/// inside a model group.
#[derive(Clone, Debug)]
pub struct ElementDeclaration {
    pub name: NCName,
    pub target_namespace: Option<AnyURI>,
    pub content: ElementContent,
    pub nillable: bool,
}

/// What an element declaration wraps: a reference to a named type, or a
/// definition written inline in the element's own scope.
#[derive(Clone, Debug)]
pub enum ElementContent {
    TypeRef(QName),
    LocalComplex(Box<ComplexTypeDefinition>),
    LocalSimple(Box<SimpleTypeDefinition>),
}

impl ElementDeclaration {
    pub fn with_type(
        name: impl Into<NCName>,
        target_namespace: impl Into<AnyURI>,
        type_ref: QName,
    ) -> Self {
        Self {
            name: name.into(),
            target_namespace: Some(target_namespace.into()),
            content: ElementContent::TypeRef(type_ref),
            nillable: false,
        }
    }
}
