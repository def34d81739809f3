//! WSDL-level nodes: the service/port/binding/operation/message graph, with
//! the SOAP extension elements the generator resolves.

use crate::schema::Schema;
use crate::xstypes::{AnyURI, NCName, QName, Sequence};

/// A whole parsed contract document, the root of the generator's input.
#[derive(Clone, Debug)]
pub struct Definition {
    pub name: NCName,
    pub target_namespace: AnyURI,
    pub services: Sequence<Service>,
    pub port_types: Sequence<PortType>,
    pub bindings: Sequence<Binding>,
    pub messages: Sequence<Message>,
    /// The schema documents embedded in or imported by the contract,
    /// document order.
    pub schemas: Sequence<Schema>,
}

impl Definition {
    pub fn new(name: impl Into<NCName>, target_namespace: impl Into<AnyURI>) -> Self {
        Self {
            name: name.into(),
            target_namespace: target_namespace.into(),
            services: Vec::new(),
            port_types: Vec::new(),
            bindings: Vec::new(),
            messages: Vec::new(),
            schemas: Vec::new(),
        }
    }

    pub fn port_type(&self, name: &str) -> Option<&PortType> {
        self.port_types.iter().find(|p| p.name == name)
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.name == name)
    }

    pub fn message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.name == name)
    }

    pub fn schema(&self, namespace: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.target_namespace == namespace)
    }
}

#[derive(Clone, Debug)]
pub struct Service {
    pub name: NCName,
    pub ports: Sequence<Port>,
}

#[derive(Clone, Debug)]
pub struct Port {
    pub name: NCName,
    pub binding: QName,
    /// `None` when the port carries no SOAP address extension; such ports
    /// are skipped by the generator.
    pub soap_address: Option<SoapAddress>,
}

#[derive(Clone, Debug)]
pub struct SoapAddress {
    pub location: AnyURI,
}

#[derive(Clone, Debug)]
pub struct Binding {
    pub name: NCName,
    pub port_type: QName,
    pub soap: Option<SoapBinding>,
    /// Per-operation binding details, keyed by operation name in
    /// document order.
    pub operations: Sequence<BindingOperation>,
}

impl Binding {
    pub fn operation(&self, name: &str) -> Option<&BindingOperation> {
        self.operations.iter().find(|o| o.name == name)
    }
}

#[derive(Clone, Debug)]
pub struct SoapBinding {
    pub style: SoapStyle,
    pub transport: AnyURI,
}

#[derive(Clone, Debug)]
pub struct BindingOperation {
    pub name: NCName,
    pub soap_operation: Option<SoapOperation>,
    pub input_body: Option<SoapBody>,
    pub output_body: Option<SoapBody>,
}

#[derive(Clone, Debug)]
pub struct SoapOperation {
    pub action: Option<String>,
    /// Operation-level style override; the binding's style applies when
    /// absent.
    pub style: Option<SoapStyle>,
}

#[derive(Clone, Debug)]
pub struct SoapBody {
    pub use_: SoapUse,
    pub namespace: Option<AnyURI>,
    pub encoding_style: Option<AnyURI>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SoapStyle {
    Rpc,
    Document,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SoapUse {
    Encoded,
    Literal,
}

#[derive(Clone, Debug)]
pub struct PortType {
    pub name: NCName,
    pub operations: Sequence<Operation>,
}

#[derive(Clone, Debug)]
pub struct Operation {
    pub name: NCName,
    pub documentation: Option<String>,
    pub input: Option<MessageRef>,
    pub output: Option<MessageRef>,
    pub faults: Sequence<MessageRef>,
}

#[derive(Clone, Debug)]
pub struct MessageRef {
    pub name: Option<NCName>,
    pub message: QName,
}

impl MessageRef {
    pub fn to(message: QName) -> Self {
        Self {
            name: None,
            message,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Message {
    pub name: NCName,
    pub parts: Sequence<Part>,
}

/// A message part references exactly one of a global element declaration or
/// a type definition. Parsers hand us both fields raw; the contract adapter
/// rejects parts carrying neither.
#[derive(Clone, Debug)]
pub struct Part {
    pub name: NCName,
    pub element: Option<QName>,
    pub type_: Option<QName>,
}

impl Part {
    pub fn of_type(name: impl Into<NCName>, type_: QName) -> Self {
        Self {
            name: name.into(),
            element: None,
            type_: Some(type_),
        }
    }

    pub fn of_element(name: impl Into<NCName>, element: QName) -> Self {
        Self {
            name: name.into(),
            element: Some(element),
            type_: None,
        }
    }
}
