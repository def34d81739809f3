//! Contract Adapter: a uniform, SOAP-resolved view over the WSDL-level
//! nodes. Bindings, port types and messages arrive as loose by-name
//! references from the parser; this layer resolves them once and applies
//! the binding/operation style inheritance rules.

use log::{debug, info};
use wsdl_model::{
    Binding, Definition, Message, Part, PortType, QName, Service, SoapAddress, SoapStyle, SoapUse,
};

use crate::error::GeneratorError;

/// A port that carries a SOAP address, joined with its resolved binding and
/// port type.
#[derive(Debug)]
pub struct SoapPort<'a> {
    pub port_name: &'a str,
    pub address: &'a SoapAddress,
    pub binding: &'a Binding,
    pub port_type: &'a PortType,
}

/// One operation with its serialization regime fully resolved.
#[derive(Debug)]
pub struct ResolvedOperation<'a> {
    pub name: &'a str,
    pub style: SoapStyle,
    pub use_: SoapUse,
    pub action: Option<&'a str>,
    /// The SOAP-body namespace declared for the operation's input.
    pub body_namespace: Option<&'a str>,
    pub documentation: Option<&'a str>,
    pub input: Option<&'a Message>,
    pub output: Option<&'a Message>,
    pub faults: Vec<&'a Message>,
}

/// What a message part references, after rejecting the neither-nor case.
#[derive(Debug)]
pub enum PartContent<'a> {
    Element(&'a QName),
    Type(&'a QName),
}

pub struct ContractAdapter<'a> {
    definition: &'a Definition,
}

impl<'a> ContractAdapter<'a> {
    pub fn new(definition: &'a Definition) -> Self {
        Self { definition }
    }

    pub fn services(&self) -> &'a [Service] {
        &self.definition.services
    }

    /// The SOAP-bound ports of a service, in document order. Ports without
    /// a SOAP address are skipped; a service with none left is a terminal
    /// error.
    pub fn soap_ports(&self, service: &'a Service) -> Result<Vec<SoapPort<'a>>, GeneratorError> {
        let mut ports = Vec::new();
        for port in &service.ports {
            let Some(address) = port.soap_address.as_ref() else {
                info!(
                    "skipping port {} of service {}: no SOAP address",
                    port.name, service.name
                );
                continue;
            };
            let binding = self
                .definition
                .binding(&port.binding.local_name)
                .ok_or_else(|| GeneratorError::UnknownBinding {
                    port: port.name.clone(),
                    binding: port.binding.clone(),
                })?;
            let port_type = self
                .definition
                .port_type(&binding.port_type.local_name)
                .ok_or_else(|| GeneratorError::UnknownPortType {
                    binding: binding.name.clone(),
                    port_type: binding.port_type.clone(),
                })?;
            ports.push(SoapPort {
                port_name: &port.name,
                address,
                binding,
                port_type,
            });
        }
        if ports.is_empty() {
            return Err(GeneratorError::NoSoapPort {
                service: service.name.clone(),
            });
        }
        Ok(ports)
    }

    /// Resolves every operation of a bound port: style and transport come
    /// from the operation-level SOAP extension when present, the binding
    /// otherwise; use/namespace/encoding come from the input body.
    pub fn operations(
        &self,
        port: &SoapPort<'a>,
    ) -> Result<Vec<ResolvedOperation<'a>>, GeneratorError> {
        let binding_style = port
            .binding
            .soap
            .as_ref()
            .map(|s| s.style)
            .unwrap_or(SoapStyle::Document);

        let mut operations = Vec::new();
        for operation in &port.port_type.operations {
            if operation.input.is_none() && operation.output.is_none() {
                return Err(GeneratorError::OperationWithoutMessages {
                    port_type: port.port_type.name.clone(),
                    operation: operation.name.clone(),
                });
            }
            let bound = port.binding.operation(&operation.name);
            let style = bound
                .and_then(|b| b.soap_operation.as_ref())
                .and_then(|s| s.style)
                .unwrap_or(binding_style);
            let body = bound.and_then(|b| {
                b.input_body
                    .as_ref()
                    .or(b.output_body.as_ref())
            });
            let use_ = body.map(|b| b.use_).unwrap_or(SoapUse::Literal);
            let body_namespace = body.and_then(|b| b.namespace.as_deref());
            let action = bound
                .and_then(|b| b.soap_operation.as_ref())
                .and_then(|s| s.action.as_deref());

            let input = match operation.input.as_ref() {
                Some(reference) => Some(self.resolve_message(&operation.name, reference)?),
                None => None,
            };
            let output = match operation.output.as_ref() {
                Some(reference) => Some(self.resolve_message(&operation.name, reference)?),
                None => None,
            };
            let faults = operation
                .faults
                .iter()
                .map(|f| self.resolve_message(&operation.name, f))
                .collect::<Result<Vec<_>, _>>()?;

            debug!(
                "resolved operation {} as {:?}/{:?}",
                operation.name, style, use_
            );
            operations.push(ResolvedOperation {
                name: &operation.name,
                style,
                use_,
                action,
                body_namespace,
                documentation: operation.documentation.as_deref(),
                input,
                output,
                faults,
            });
        }
        Ok(operations)
    }

    fn resolve_message(
        &self,
        operation: &str,
        reference: &wsdl_model::MessageRef,
    ) -> Result<&'a Message, GeneratorError> {
        self.definition
            .message(&reference.message.local_name)
            .ok_or_else(|| GeneratorError::UnknownMessage {
                operation: operation.to_owned(),
                message: reference.message.clone(),
            })
    }

    /// Normalizes a part's element/type fields into the exactly-one form.
    pub fn part_content(
        &self,
        message: &Message,
        part: &'a Part,
    ) -> Result<PartContent<'a>, GeneratorError> {
        match (&part.element, &part.type_) {
            (Some(element), _) => Ok(PartContent::Element(element)),
            (None, Some(type_)) => Ok(PartContent::Type(type_)),
            (None, None) => Err(GeneratorError::PartWithoutContent {
                message: message.name.clone(),
                part: part.name.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wsdl_model::{
        BindingOperation, MessageRef, Operation, Port, SoapBinding, SoapBody, SoapOperation,
    };

    const TNS: &str = "urn:example:contract";

    fn qn(local: &str) -> QName {
        QName::with_namespace(TNS, local)
    }

    fn minimal_definition() -> Definition {
        Definition {
            name: "Example".into(),
            target_namespace: TNS.into(),
            services: vec![Service {
                name: "ExampleService".into(),
                ports: vec![
                    Port {
                        name: "RestPort".into(),
                        binding: qn("ExampleBinding"),
                        soap_address: None,
                    },
                    Port {
                        name: "SoapPort".into(),
                        binding: qn("ExampleBinding"),
                        soap_address: Some(SoapAddress {
                            location: "http://localhost:8080/example".into(),
                        }),
                    },
                ],
            }],
            port_types: vec![PortType {
                name: "ExamplePortType".into(),
                operations: vec![Operation {
                    name: "ping".into(),
                    documentation: None,
                    input: Some(MessageRef::to(qn("pingRequest"))),
                    output: None,
                    faults: vec![],
                }],
            }],
            bindings: vec![Binding {
                name: "ExampleBinding".into(),
                port_type: qn("ExamplePortType"),
                soap: Some(SoapBinding {
                    style: SoapStyle::Rpc,
                    transport: "http://schemas.xmlsoap.org/soap/http".into(),
                }),
                operations: vec![BindingOperation {
                    name: "ping".into(),
                    soap_operation: Some(SoapOperation {
                        action: Some("urn:ping".into()),
                        style: Some(SoapStyle::Document),
                    }),
                    input_body: Some(SoapBody {
                        use_: SoapUse::Encoded,
                        namespace: Some(TNS.into()),
                        encoding_style: None,
                    }),
                    output_body: None,
                }],
            }],
            messages: vec![Message {
                name: "pingRequest".into(),
                parts: vec![],
            }],
            schemas: vec![],
        }
    }

    #[test]
    fn ports_without_soap_address_are_skipped() {
        let definition = minimal_definition();
        let adapter = ContractAdapter::new(&definition);
        let ports = adapter.soap_ports(&definition.services[0]).unwrap();
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].port_name, "SoapPort");
    }

    #[test]
    fn service_without_soap_ports_is_an_error() {
        let mut definition = minimal_definition();
        definition.services[0].ports.remove(1);
        let adapter = ContractAdapter::new(&definition);
        let err = adapter.soap_ports(&definition.services[0]).unwrap_err();
        assert!(matches!(err, GeneratorError::NoSoapPort { .. }));
    }

    #[test]
    fn operation_style_overrides_binding_style() {
        let definition = minimal_definition();
        let adapter = ContractAdapter::new(&definition);
        let ports = adapter.soap_ports(&definition.services[0]).unwrap();
        let operations = adapter.operations(&ports[0]).unwrap();
        assert_eq!(operations[0].style, SoapStyle::Document);
        assert_eq!(operations[0].use_, SoapUse::Encoded);
        assert_eq!(operations[0].action, Some("urn:ping"));
        assert_eq!(operations[0].body_namespace, Some(TNS));
    }

    #[test]
    fn binding_style_applies_when_operation_has_no_override() {
        let mut definition = minimal_definition();
        definition.bindings[0].operations[0].soap_operation = None;
        let adapter = ContractAdapter::new(&definition);
        let ports = adapter.soap_ports(&definition.services[0]).unwrap();
        let operations = adapter.operations(&ports[0]).unwrap();
        assert_eq!(operations[0].style, SoapStyle::Rpc);
    }

    #[test]
    fn operation_without_any_message_is_an_error() {
        let mut definition = minimal_definition();
        definition.port_types[0].operations[0].input = None;
        let adapter = ContractAdapter::new(&definition);
        let ports = adapter.soap_ports(&definition.services[0]).unwrap();
        let err = adapter.operations(&ports[0]).unwrap_err();
        assert!(matches!(err, GeneratorError::OperationWithoutMessages { .. }));
    }

    #[test]
    fn part_with_neither_reference_is_an_error() {
        let definition = minimal_definition();
        let adapter = ContractAdapter::new(&definition);
        let message = Message {
            name: "broken".into(),
            parts: vec![Part {
                name: "value".into(),
                element: None,
                type_: None,
            }],
        };
        let err = adapter.part_content(&message, &message.parts[0]).unwrap_err();
        assert!(matches!(err, GeneratorError::PartWithoutContent { .. }));
    }
}
