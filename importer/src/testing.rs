//! Model builders shared by the unit tests.

use soapbind_wsdl::{
    namespaces,
    types::{
        Binding, Definition, DefinitionSet, Element, ElementType, Extension, Extensions, Field,
        Message, MessageBinding, MessagePart, Operation, OperationBinding, OperationMessage,
        OperationMessages, Port, PortType, QualifiedName, Service, SoapAddressBinding,
        SoapBinding, SoapBodyBinding, SoapHeaderBinding, SoapOperationBinding, SoapStyle,
        SoapUse, SoapVersion, Type, TypeKind,
    },
};

use crate::protocol::BindingContext;

pub const TNS: &str = "urn:calc";

pub fn qname(name: &str) -> QualifiedName {
    QualifiedName::new(TNS, name)
}

pub fn xsd(name: &str) -> QualifiedName {
    QualifiedName::new(namespaces::XML_SCHEMA, name)
}

pub fn message(name: &str, parts: Vec<MessagePart>) -> Message {
    Message {
        name: name.into(),
        parts,
    }
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

pub fn named_messages(
    input_name: &str,
    input: &str,
    output_name: &str,
    output: &str,
) -> OperationMessages {
    let mut messages = OperationMessages::new();
    messages
        .push(OperationMessage::input(qname(input)).named(input_name))
        .unwrap();
    messages
        .push(OperationMessage::output(qname(output)).named(output_name))
        .unwrap();
    messages
}

pub fn port_type(name: &str, operations: Vec<Operation>) -> PortType {
    PortType {
        name: name.into(),
        operations,
    }
}

fn soap_binding(style: SoapStyle) -> Extension {
    Extension::SoapBinding(SoapBinding {
        version: SoapVersion::Soap11,
        transport: namespaces::SOAP_HTTP_TRANSPORT.into(),
        style,
    })
}

pub fn rpc_soap_binding() -> Extension {
    soap_binding(SoapStyle::Rpc)
}

pub fn document_soap_binding() -> Extension {
    soap_binding(SoapStyle::Document)
}

pub fn binding(
    name: &str,
    port_type: &str,
    soap: Extension,
    operations: Vec<OperationBinding>,
) -> Binding {
    Binding {
        name: name.into(),
        port_type: qname(port_type),
        extensions: Extensions::new(vec![soap]),
        operations,
    }
}

fn message_binding(body: SoapBodyBinding) -> MessageBinding {
    MessageBinding {
        name: None,
        extensions: Extensions::new(vec![Extension::SoapBody(body)]),
    }
}

pub fn operation_binding(
    name: &str,
    input: Option<SoapBodyBinding>,
    output: Option<SoapBodyBinding>,
) -> OperationBinding {
    OperationBinding {
        name: name.into(),
        extensions: Extensions::new(vec![Extension::SoapOperation(SoapOperationBinding {
            action: format!("{}/{}", TNS, name),
            style: SoapStyle::Default,
        })]),
        input: input.map(message_binding),
        output: output.map(message_binding),
        faults: vec![],
    }
}

pub fn literal_body() -> SoapBodyBinding {
    SoapBodyBinding {
        use_: SoapUse::Literal,
        ..Default::default()
    }
}

pub fn literal_header(message: &str, part: &str) -> SoapHeaderBinding {
    SoapHeaderBinding {
        message: qname(message),
        part: part.into(),
        use_: SoapUse::Literal,
        encoding: None,
        namespace: None,
        map_to_property: true,
        fault: None,
    }
}

pub fn context<'d>(set: &'d DefinitionSet, binding: &str) -> BindingContext<'d> {
    let (binding, namespace) = set.get_binding(&qname(binding)).expect("binding");
    let port_type = set.get_port_type(&binding.port_type).expect("port type");

    BindingContext {
        definitions: set,
        service: None,
        port: None,
        binding,
        port_type,
        namespace,
    }
}

fn int_field(name: &str) -> Field {
    Field {
        name: name.into(),
        ty: xsd("int"),
    }
}

fn headed_operation_binding(
    name: &str,
    input_headers: Vec<SoapHeaderBinding>,
    output_headers: Vec<SoapHeaderBinding>,
) -> OperationBinding {
    let mut operation = operation_binding(name, Some(literal_body()), Some(literal_body()));
    if let Some(input) = operation.input.as_mut() {
        for header in input_headers {
            input.extensions.push(Extension::SoapHeader(header));
        }
    }
    if let Some(output) = operation.output.as_mut() {
        for header in output_headers {
            output.extensions.push(Extension::SoapHeader(header));
        }
    }
    operation
}

/// A wrapped document/literal `Add` operation on binding `CalcSoap`, exposed by
/// service `Calculator`, with the given headers on its request and response.
pub fn header_fixture(
    input_headers: Vec<SoapHeaderBinding>,
    output_headers: Vec<SoapHeaderBinding>,
) -> DefinitionSet {
    let mut definition = Definition::new(TNS);

    definition.types.push(Type {
        name: qname("AddRequest"),
        kind: TypeKind::Struct(vec![int_field("a"), int_field("b")]),
    });
    definition.types.push(Type {
        name: qname("AuthHeader"),
        kind: TypeKind::Struct(vec![Field {
            name: "user".into(),
            ty: xsd("string"),
        }]),
    });
    definition.elements.push(Element {
        name: qname("Add"),
        ty: ElementType::Named(qname("AddRequest")),
    });
    definition.elements.push(Element {
        name: qname("AddResponse"),
        ty: ElementType::Inline(TypeKind::Struct(vec![int_field("AddResult")])),
    });
    definition.elements.push(Element {
        name: qname("AuthHeader"),
        ty: ElementType::Named(qname("AuthHeader")),
    });
    definition.elements.push(Element {
        name: qname("TraceHeader"),
        ty: ElementType::Named(xsd("string")),
    });

    definition.messages.push(message(
        "AddIn",
        vec![MessagePart::with_element("parameters", qname("Add"))],
    ));
    definition.messages.push(message(
        "AddOut",
        vec![MessagePart::with_element("parameters", qname("AddResponse"))],
    ));
    definition.messages.push(message(
        "AuthMsg",
        vec![
            MessagePart::with_element("auth", qname("AuthHeader")),
            MessagePart::with_element("trace", qname("TraceHeader")),
            MessagePart::with_type("typed", xsd("string")),
            MessagePart {
                name: "mixed".into(),
                element: Some(qname("AuthHeader")),
                ty: Some(xsd("string")),
            },
        ],
    ));

    definition.port_types.push(port_type(
        "Calc",
        vec![request_response("Add", "AddIn", "AddOut")],
    ));

    let add = headed_operation_binding("Add", input_headers, output_headers);
    definition
        .bindings
        .push(binding("CalcSoap", "Calc", document_soap_binding(), vec![add]));

    definition.services.push(Service {
        name: "Calculator".into(),
        ports: vec![Port {
            name: "CalcSoapPort".into(),
            binding: qname("CalcSoap"),
            extensions: Extensions::new(vec![Extension::SoapAddress(SoapAddressBinding {
                location: "http://localhost/calc".into(),
            })]),
        }],
        extensions: Extensions::default(),
    });

    DefinitionSet::new(vec![definition])
}

fn edit(set: &mut DefinitionSet, f: impl FnOnce(&mut Definition)) {
    let mut definitions = set.iter().cloned().collect::<Vec<_>>();
    f(&mut definitions[0]);
    *set = DefinitionSet::new(definitions);
}

/// Removes the `soap:body` from the request (or response) of the first bound operation.
pub fn strip_body(set: &mut DefinitionSet, input: bool) {
    edit(set, |definition| {
        let operation = &mut definition.bindings[0].operations[0];
        let message = if input {
            operation.input.as_mut()
        } else {
            operation.output.as_mut()
        };

        if let Some(message) = message {
            message.extensions = Extensions::new(
                message
                    .extensions
                    .iter()
                    .filter(|extension| !matches!(extension, Extension::SoapBody(_)))
                    .cloned()
                    .collect(),
            );
        }
    });
}

/// Adds a string member to the `AddResponse` wrapper.
pub fn add_response_member(set: &mut DefinitionSet, name: &str) {
    edit(set, |definition| {
        for element in &mut definition.elements {
            if element.name.name == "AddResponse" {
                if let ElementType::Inline(TypeKind::Struct(fields)) = &mut element.ty {
                    fields.push(Field {
                        name: name.into(),
                        ty: xsd("string"),
                    });
                }
            }
        }
    });
}

pub fn add_binding_extension(set: &mut DefinitionSet, extension: Extension) {
    edit(set, |definition| definition.bindings[0].extensions.push(extension));
}

/// Drops the output message of the first abstract operation while its binding
/// keeps the output side.
pub fn make_one_way(set: &mut DefinitionSet) {
    edit(set, |definition| {
        let operation = &mut definition.port_types[0].operations[0];
        let input = operation.messages.input().cloned();

        operation.messages = OperationMessages::new();
        if let Some(input) = input {
            operation.messages.push(input).unwrap();
        }
    });
}

/// Adds another operation on the `Add` messages, bound with the given headers.
pub fn add_operation(
    set: &mut DefinitionSet,
    name: &str,
    input_headers: Vec<SoapHeaderBinding>,
    output_headers: Vec<SoapHeaderBinding>,
) {
    edit(set, |definition| {
        definition.port_types[0]
            .operations
            .push(request_response(name, "AddIn", "AddOut"));
        definition.bindings[0].operations.push(headed_operation_binding(
            name,
            input_headers,
            output_headers,
        ));
    });
}

/// Puts the abstract operations in the order of `names`.
pub fn reorder_operations(set: &mut DefinitionSet, names: &[&str]) {
    edit(set, |definition| {
        definition.port_types[0].operations.sort_by_key(|operation| {
            names
                .iter()
                .position(|name| *name == operation.name)
                .unwrap_or(names.len())
        });
    });
}
