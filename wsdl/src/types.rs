use std::fmt;

use crate::{error::Error, namespaces};

#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub enum TypeKind {
    Struct(Vec<Field>),
    Alias(QualifiedName),
    Any,
}

#[derive(Debug, Clone)]
pub struct Type {
    pub name: QualifiedName,
    pub kind: TypeKind,
}

#[derive(Debug, Clone)]
pub enum ElementType {
    Named(QualifiedName),
    Inline(TypeKind),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub name: QualifiedName,
    pub ty: ElementType,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: QualifiedName,
}

#[derive(Debug, Clone)]
pub struct MessagePart {
    pub name: String,
    pub element: Option<QualifiedName>,
    pub ty: Option<QualifiedName>,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub name: String,
    pub parts: Vec<MessagePart>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Input,
    Output,
}

/// Transmission pattern of an operation, derived from the order of its messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    None,
    OneWay,
    Notification,
    RequestResponse,
    SolicitResponse,
}

#[derive(Debug, Clone)]
pub struct OperationMessage {
    pub kind: MessageKind,
    pub name: Option<String>,
    pub message: QualifiedName,
}

/// The input/output messages of an operation.
///
/// Holds at most one input and one output; the insertion order decides between
/// request-response and solicit-response.
#[derive(Default, Debug, Clone)]
pub struct OperationMessages(Vec<OperationMessage>);

#[derive(Debug, Clone)]
pub struct OperationFault {
    pub name: String,
    pub message: QualifiedName,
}

#[derive(Debug, Clone)]
pub struct Operation {
    pub name: String,
    pub documentation: Option<String>,
    pub parameter_order: Option<Vec<String>>,
    pub messages: OperationMessages,
    pub faults: Vec<OperationFault>,
}

#[derive(Debug, Clone)]
pub struct PortType {
    pub name: String,
    pub operations: Vec<Operation>,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoapStyle {
    #[default]
    Default,
    Rpc,
    Document,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoapUse {
    #[default]
    Default,
    Encoded,
    Literal,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoapVersion {
    #[default]
    Soap11,
    Soap12,
}

#[derive(Debug, Clone)]
pub struct SoapBinding {
    pub version: SoapVersion,
    pub transport: String,
    pub style: SoapStyle,
}

#[derive(Default, Debug, Clone)]
pub struct SoapOperationBinding {
    pub action: String,
    pub style: SoapStyle,
}

#[derive(Default, Debug, Clone)]
pub struct SoapBodyBinding {
    pub use_: SoapUse,
    pub namespace: Option<String>,
    pub encoding: Option<String>,
    pub parts: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct SoapHeaderFaultBinding {
    pub message: QualifiedName,
    pub part: String,
    pub use_: SoapUse,
    pub encoding: Option<String>,
    pub namespace: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SoapHeaderBinding {
    pub message: QualifiedName,
    pub part: String,
    pub use_: SoapUse,
    pub encoding: Option<String>,
    pub namespace: Option<String>,
    pub map_to_property: bool,
    pub fault: Option<SoapHeaderFaultBinding>,
}

#[derive(Debug, Clone)]
pub struct SoapFaultBinding {
    pub name: String,
    pub use_: SoapUse,
    pub encoding: Option<String>,
    pub namespace: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SoapAddressBinding {
    pub location: String,
}

#[derive(Debug, Clone)]
pub struct UnknownExtension {
    pub name: String,
    pub namespace: String,
    pub required: bool,
}

#[derive(Debug, Clone)]
pub enum Extension {
    SoapBinding(SoapBinding),
    SoapOperation(SoapOperationBinding),
    SoapBody(SoapBodyBinding),
    SoapHeader(SoapHeaderBinding),
    SoapFault(SoapFaultBinding),
    SoapAddress(SoapAddressBinding),
    Unknown(UnknownExtension),
}

#[derive(Default, Debug, Clone)]
pub struct Extensions(Vec<Extension>);

#[derive(Debug, Clone)]
pub struct MessageBinding {
    pub name: Option<String>,
    pub extensions: Extensions,
}

#[derive(Debug, Clone)]
pub struct FaultBinding {
    pub name: String,
    pub extensions: Extensions,
}

#[derive(Debug, Clone)]
pub struct OperationBinding {
    pub name: String,
    pub extensions: Extensions,
    pub input: Option<MessageBinding>,
    pub output: Option<MessageBinding>,
    pub faults: Vec<FaultBinding>,
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub name: String,
    pub port_type: QualifiedName,
    pub extensions: Extensions,
    pub operations: Vec<OperationBinding>,
}

#[derive(Debug, Clone)]
pub struct Port {
    pub name: String,
    pub binding: QualifiedName,
    pub extensions: Extensions,
}

#[derive(Debug, Clone)]
pub struct Service {
    pub name: String,
    pub ports: Vec<Port>,
    pub extensions: Extensions,
}

#[derive(Default, Debug, Clone)]
pub struct Definition {
    pub target_namespace: String,
    pub types: Vec<Type>,
    pub elements: Vec<Element>,
    pub messages: Vec<Message>,
    pub port_types: Vec<PortType>,
    pub bindings: Vec<Binding>,
    pub services: Vec<Service>,
}

/// Every document taking part in one import request.
#[derive(Default, Debug, Clone)]
pub struct DefinitionSet(Vec<Definition>);

impl QualifiedName {
    pub fn new<N: Into<String>, S: Into<String>>(namespace: N, name: S) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.namespace.is_empty() && self.name.is_empty()
    }

    pub fn is_xml_schema(&self) -> bool {
        self.namespace == namespaces::XML_SCHEMA
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.namespace, self.name)
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Input => write!(f, "input"),
            MessageKind::Output => write!(f, "output"),
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Flow::None => "None",
            Flow::OneWay => "OneWay",
            Flow::Notification => "Notification",
            Flow::RequestResponse => "RequestResponse",
            Flow::SolicitResponse => "SolicitResponse",
        };

        write!(f, "{}", name)
    }
}

impl fmt::Display for SoapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoapStyle::Default => write!(f, "default"),
            SoapStyle::Rpc => write!(f, "rpc"),
            SoapStyle::Document => write!(f, "document"),
        }
    }
}

impl fmt::Display for SoapUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoapUse::Default => write!(f, "default"),
            SoapUse::Encoded => write!(f, "encoded"),
            SoapUse::Literal => write!(f, "literal"),
        }
    }
}

impl SoapUse {
    /// An unspecified use means literal.
    pub fn effective(self) -> Self {
        match self {
            SoapUse::Default => SoapUse::Literal,
            other => other,
        }
    }
}

impl MessagePart {
    pub fn with_element(name: &str, element: QualifiedName) -> Self {
        Self {
            name: name.to_owned(),
            element: Some(element),
            ty: None,
        }
    }

    pub fn with_type(name: &str, ty: QualifiedName) -> Self {
        Self {
            name: name.to_owned(),
            element: None,
            ty: Some(ty),
        }
    }
}

impl Message {
    pub fn find_part(&self, name: &str) -> Option<&MessagePart> {
        self.parts.iter().find(|part| part.name == name)
    }
}

impl OperationMessage {
    pub fn input(message: QualifiedName) -> Self {
        Self {
            kind: MessageKind::Input,
            name: None,
            message,
        }
    }

    pub fn output(message: QualifiedName) -> Self {
        Self {
            kind: MessageKind::Output,
            name: None,
            message,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }
}

impl OperationMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperationMessage> {
        self.0.iter()
    }

    pub fn push(&mut self, message: OperationMessage) -> Result<(), Error> {
        self.insert(self.0.len(), message)
    }

    pub fn insert(&mut self, index: usize, message: OperationMessage) -> Result<(), Error> {
        if self.0.len() > 1 {
            return Err(Error::TooManyMessages);
        }

        if self.0.iter().any(|existing| existing.kind == message.kind) {
            return Err(Error::DuplicateMessage(message.kind));
        }

        if index > self.0.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.0.len(),
            });
        }

        self.0.insert(index, message);
        Ok(())
    }

    pub fn input(&self) -> Option<&OperationMessage> {
        self.find(MessageKind::Input)
    }

    pub fn output(&self) -> Option<&OperationMessage> {
        self.find(MessageKind::Output)
    }

    pub fn flow(&self) -> Flow {
        match self.0.as_slice() {
            [] => Flow::None,
            [only] => match only.kind {
                MessageKind::Input => Flow::OneWay,
                MessageKind::Output => Flow::Notification,
            },
            [first, ..] => match first.kind {
                MessageKind::Input => Flow::RequestResponse,
                MessageKind::Output => Flow::SolicitResponse,
            },
        }
    }

    fn find(&self, kind: MessageKind) -> Option<&OperationMessage> {
        self.0.iter().find(|message| message.kind == kind)
    }
}

impl Extensions {
    pub fn new(extensions: Vec<Extension>) -> Self {
        Self(extensions)
    }

    pub fn push(&mut self, extension: Extension) {
        self.0.push(extension);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        self.0.iter()
    }

    pub fn soap_binding(&self) -> Option<&SoapBinding> {
        self.0.iter().find_map(|extension| match extension {
            Extension::SoapBinding(binding) => Some(binding),
            _ => None,
        })
    }

    pub fn soap_operation(&self) -> Option<&SoapOperationBinding> {
        self.0.iter().find_map(|extension| match extension {
            Extension::SoapOperation(operation) => Some(operation),
            _ => None,
        })
    }

    pub fn soap_body(&self) -> Option<&SoapBodyBinding> {
        self.0.iter().find_map(|extension| match extension {
            Extension::SoapBody(body) => Some(body),
            _ => None,
        })
    }

    pub fn soap_headers(&self) -> impl Iterator<Item = &SoapHeaderBinding> {
        self.0.iter().filter_map(|extension| match extension {
            Extension::SoapHeader(header) => Some(header),
            _ => None,
        })
    }

    pub fn soap_address(&self) -> Option<&SoapAddressBinding> {
        self.0.iter().find_map(|extension| match extension {
            Extension::SoapAddress(address) => Some(address),
            _ => None,
        })
    }
}

impl From<Vec<Extension>> for Extensions {
    fn from(extensions: Vec<Extension>) -> Self {
        Self(extensions)
    }
}

impl Operation {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            documentation: None,
            parameter_order: None,
            messages: OperationMessages::new(),
            faults: Vec::new(),
        }
    }
}

impl Definition {
    pub fn new(target_namespace: &str) -> Self {
        Self {
            target_namespace: target_namespace.to_owned(),
            ..Default::default()
        }
    }

    pub fn qualify(&self, name: &str) -> QualifiedName {
        QualifiedName::new(self.target_namespace.as_str(), name)
    }
}

impl DefinitionSet {
    pub fn new(definitions: Vec<Definition>) -> Self {
        Self(definitions)
    }

    pub fn push(&mut self, definition: Definition) {
        self.0.push(definition);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.0.iter()
    }

    pub fn get_message(&self, name: &QualifiedName) -> Option<&Message> {
        self.in_namespace(&name.namespace)
            .flat_map(|definition| definition.messages.iter())
            .find(|message| message.name == name.name)
    }

    pub fn get_port_type(&self, name: &QualifiedName) -> Option<&PortType> {
        self.in_namespace(&name.namespace)
            .flat_map(|definition| definition.port_types.iter())
            .find(|port_type| port_type.name == name.name)
    }

    /// Finds a binding together with the target namespace of its document.
    pub fn get_binding(&self, name: &QualifiedName) -> Option<(&Binding, &str)> {
        self.in_namespace(&name.namespace).find_map(|definition| {
            definition
                .bindings
                .iter()
                .find(|binding| binding.name == name.name)
                .map(|binding| (binding, definition.target_namespace.as_str()))
        })
    }

    pub fn get_type(&self, name: &QualifiedName) -> Option<&Type> {
        self.0
            .iter()
            .flat_map(|definition| definition.types.iter())
            .find(|ty| ty.name == *name)
    }

    pub fn get_element(&self, name: &QualifiedName) -> Option<&Element> {
        self.0
            .iter()
            .flat_map(|definition| definition.elements.iter())
            .find(|element| element.name == *name)
    }

    fn in_namespace<'a, 'b>(
        &'a self,
        namespace: &'b str,
    ) -> impl Iterator<Item = &'a Definition> + 'b
    where
        'a: 'b,
    {
        self.0
            .iter()
            .filter(move |definition| definition.target_namespace == namespace)
    }
}

impl From<Vec<Definition>> for DefinitionSet {
    fn from(definitions: Vec<Definition>) -> Self {
        Self(definitions)
    }
}
