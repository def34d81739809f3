//! Read-only object model for parsed WSDL contracts and the XML Schema
//! components they reference. This crate is the interface between the
//! external contract parser, which produces this graph, and the binding
//! generator, which consumes it without mutation.

pub mod attribute_decl;
pub mod complex_type_def;
pub mod contract;
pub mod element_decl;
pub mod model_group;
pub mod particle;
pub mod schema;
pub mod shared;
pub mod simple_type_def;
pub mod wildcard;
pub mod xstypes;

pub use attribute_decl::AttributeDeclaration;
pub use complex_type_def::{ArrayItem, ComplexDerivation, ComplexTypeDefinition, Content, DerivedType};
pub use contract::{
    Binding, BindingOperation, Definition, Message, MessageRef, Operation, Part, Port, PortType,
    Service, SoapAddress, SoapBinding, SoapBody, SoapOperation, SoapStyle, SoapUse,
};
pub use element_decl::{ElementContent, ElementDeclaration};
pub use model_group::{Compositor, ModelGroup};
pub use particle::{MaxOccurs, Particle};
pub use schema::{Import, Schema};
pub use shared::{Term, TypeDefinition};
pub use simple_type_def::SimpleTypeDefinition;
pub use wildcard::{ProcessContents, Wildcard};
pub use xstypes::{AnyURI, NCName, QName, Sequence};
