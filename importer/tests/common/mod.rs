#![allow(dead_code)]

use soapbind_wsdl::{
    namespaces,
    types::{
        Binding, Definition, DefinitionSet, Element, ElementType, Extension, Extensions, Field,
        Message, MessageBinding, MessagePart, Operation, OperationBinding, OperationMessage,
        Port, PortType, QualifiedName, Service, SoapAddressBinding, SoapBinding, SoapBodyBinding,
        SoapHeaderBinding, SoapOperationBinding, SoapStyle, SoapUse, SoapVersion, Type, TypeKind,
    },
};

pub const TNS: &str = "urn:calc";

#[ctor::ctor]
fn init() {
    env_logger::init();
}

pub fn qname(name: &str) -> QualifiedName {
    QualifiedName::new(TNS, name)
}

pub fn xsd(name: &str) -> QualifiedName {
    QualifiedName::new(namespaces::XML_SCHEMA, name)
}

pub fn typed(name: &str, ty: &str) -> MessagePart {
    MessagePart::with_type(name, xsd(ty))
}

pub fn element(name: &str, element: &str) -> MessagePart {
    MessagePart::with_element(name, qname(element))
}

pub fn request_response(name: &str, input: &str, output: &str) -> Operation {
    let mut operation = Operation::new(name);
    operation
        .messages
        .push(OperationMessage::input(qname(input)))
        .unwrap();
    operation
        .messages
        .push(OperationMessage::output(qname(output)))
        .unwrap();
    operation
}

pub fn one_way(name: &str, input: &str) -> Operation {
    let mut operation = Operation::new(name);
    operation
        .messages
        .push(OperationMessage::input(qname(input)))
        .unwrap();
    operation
}

pub fn notification(name: &str, output: &str) -> Operation {
    let mut operation = Operation::new(name);
    operation
        .messages
        .push(OperationMessage::output(qname(output)))
        .unwrap();
    operation
}

pub fn literal() -> SoapBodyBinding {
    SoapBodyBinding {
        use_: SoapUse::Literal,
        namespace: Some(TNS.into()),
        ..Default::default()
    }
}

pub fn encoded(encoding: &str) -> SoapBodyBinding {
    SoapBodyBinding {
        use_: SoapUse::Encoded,
        namespace: Some(TNS.into()),
        encoding: Some(encoding.into()),
        parts: None,
    }
}

pub fn header(message: &str, part: &str, use_: SoapUse) -> SoapHeaderBinding {
    SoapHeaderBinding {
        message: qname(message),
        part: part.into(),
        use_,
        encoding: match use_ {
            SoapUse::Encoded => Some(namespaces::SOAP_ENCODING.into()),
            _ => None,
        },
        namespace: None,
        map_to_property: true,
        fault: None,
    }
}

/// An operation binding with the given bodies; `None` leaves that side unbound.
pub fn bound(
    name: &str,
    input: Option<SoapBodyBinding>,
    output: Option<SoapBodyBinding>,
) -> OperationBinding {
    let message = |body: SoapBodyBinding| MessageBinding {
        name: None,
        extensions: Extensions::new(vec![Extension::SoapBody(body)]),
    };

    OperationBinding {
        name: name.into(),
        extensions: Extensions::new(vec![Extension::SoapOperation(SoapOperationBinding {
            action: format!("{}/{}", TNS, name),
            style: SoapStyle::Default,
        })]),
        input: input.map(message),
        output: output.map(message),
        faults: vec![],
    }
}

pub fn with_headers(
    mut operation: OperationBinding,
    input: Vec<SoapHeaderBinding>,
    output: Vec<SoapHeaderBinding>,
) -> OperationBinding {
    if let Some(message) = operation.input.as_mut() {
        for header in input {
            message.extensions.push(Extension::SoapHeader(header));
        }
    }
    if let Some(message) = operation.output.as_mut() {
        for header in output {
            message.extensions.push(Extension::SoapHeader(header));
        }
    }
    operation
}

pub fn soap_binding(
    name: &str,
    port_type: &str,
    style: SoapStyle,
    transport: &str,
    operations: Vec<OperationBinding>,
) -> Binding {
    Binding {
        name: name.into(),
        port_type: qname(port_type),
        extensions: Extensions::new(vec![Extension::SoapBinding(SoapBinding {
            version: SoapVersion::Soap11,
            transport: transport.into(),
            style,
        })]),
        operations,
    }
}

/// Builds a single document with target namespace [`TNS`].
#[derive(Default)]
pub struct Fixture {
    definition: Definition,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            definition: Definition::new(TNS),
        }
    }

    pub fn message(mut self, name: &str, parts: Vec<MessagePart>) -> Self {
        self.definition.messages.push(Message {
            name: name.into(),
            parts,
        });
        self
    }

    pub fn structure(mut self, name: &str, fields: &[(&str, &str)]) -> Self {
        self.definition.types.push(Type {
            name: qname(name),
            kind: TypeKind::Struct(
                fields
                    .iter()
                    .map(|(field, ty)| Field {
                        name: (*field).into(),
                        ty: xsd(ty),
                    })
                    .collect(),
            ),
        });
        self
    }

    pub fn element(mut self, name: &str, ty: QualifiedName) -> Self {
        self.definition.elements.push(Element {
            name: qname(name),
            ty: ElementType::Named(ty),
        });
        self
    }

    pub fn port_type(mut self, name: &str, operations: Vec<Operation>) -> Self {
        self.definition.port_types.push(PortType {
            name: name.into(),
            operations,
        });
        self
    }

    pub fn binding(mut self, binding: Binding) -> Self {
        self.definition.bindings.push(binding);
        self
    }

    /// Adds a service whose ports are `(port, binding)` pairs.
    pub fn service(mut self, name: &str, ports: &[(&str, &str)]) -> Self {
        self.definition.services.push(Service {
            name: name.into(),
            ports: ports
                .iter()
                .map(|(port, binding)| Port {
                    name: (*port).into(),
                    binding: qname(binding),
                    extensions: Extensions::new(vec![Extension::SoapAddress(
                        SoapAddressBinding {
                            location: format!("http://localhost/{}", port),
                        },
                    )]),
                })
                .collect(),
            extensions: Extensions::default(),
        });
        self
    }

    pub fn build(self) -> DefinitionSet {
        DefinitionSet::new(vec![self.definition])
    }
}

/// The wrapped document/literal calculator most scenarios start from.
pub fn calculator() -> Fixture {
    Fixture::new()
        .structure("AddRequest", &[("a", "int"), ("b", "int")])
        .structure("AddResponseType", &[("AddResult", "int")])
        .element("Add", qname("AddRequest"))
        .element("AddResponse", qname("AddResponseType"))
        .message("AddIn", vec![element("parameters", "Add")])
        .message("AddOut", vec![element("parameters", "AddResponse")])
}
