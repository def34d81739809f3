use thiserror::Error;
use wsdl_model::{AnyURI, NCName, QName};

/// Everything that can abort a generation run. Each variant names the
/// offending contract or schema item by namespace-qualified name; there is
/// no partial-success mode, so any of these surfacing means no artifact was
/// written.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("service {service} has no SOAP-bound port")]
    NoSoapPort { service: NCName },

    #[error("port {port} references unknown binding {binding}")]
    UnknownBinding { port: NCName, binding: QName },

    #[error("binding {binding} references unknown port type {port_type}")]
    UnknownPortType { binding: NCName, port_type: QName },

    #[error("operation {operation} of port type {port_type} has neither input nor output")]
    OperationWithoutMessages {
        port_type: NCName,
        operation: NCName,
    },

    #[error("operation {operation} references undefined message {message}")]
    UnknownMessage { operation: NCName, message: QName },

    #[error("part {part} of message {message} carries neither a type nor an element reference")]
    PartWithoutContent { message: NCName, part: NCName },

    #[error("part {part} of message {message} references unresolvable {reference}")]
    UnresolvedPart {
        message: NCName,
        part: NCName,
        reference: QName,
    },

    #[error("array type {array} has unresolvable item type {item}")]
    UnresolvedArrayItem { array: QName, item: QName },

    #[error("type reference {reference} from {referrer} cannot be resolved")]
    UnresolvedTypeReference { referrer: QName, reference: QName },

    #[error("namespace {namespace:?} was requested before being registered")]
    UnregisteredNamespace { namespace: AnyURI },

    #[error("type {type_name} uses attribute groups, which are not supported")]
    AttributeGroup { type_name: QName },
}

/// Structurally broken input versus recognized but unsupported schema
/// shapes. Both are fatal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Structural,
    Unsupported,
}

impl GeneratorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AttributeGroup { .. } => ErrorKind::Unsupported,
            _ => ErrorKind::Structural,
        }
    }
}
