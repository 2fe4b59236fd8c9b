//! Validated output handed to the code emitter.

use soapbind_wsdl::types::{QualifiedName, SoapStyle, SoapUse};

use crate::options::ImportStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderDirection {
    In,
    Out,
    InOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterDirection {
    In,
    Out,
    InOut,
}

/// How a header or message member maps onto a schema type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    pub element_name: String,
    pub ty: QualifiedName,
    pub encoded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: String,
    pub mapping: TypeMapping,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDescriptor {
    pub field_name: String,
    pub direction: HeaderDirection,
    pub mapping: TypeMapping,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub member_name: String,
    pub ty: QualifiedName,
    pub direction: ParameterDirection,
    /// The emitter has to annotate the parameter because its name no longer
    /// matches the wire name.
    pub needs_metadata: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnDescriptor {
    pub member_name: String,
    pub element_name: String,
    pub ty: QualifiedName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncPair {
    pub begin: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncTypes {
    pub handler_type: String,
    pub args_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncCall {
    pub method_name: String,
    pub completed_event: String,
    pub callback_field: String,
    pub callback_method: String,
    pub types: AsyncTypes,
    /// Whether this operation is the first user of `types` in the session.
    pub declares_types: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub name: String,
    pub method_name: String,
    /// Set when the method name had to be made unique.
    pub message_name: Option<String>,
    pub action: String,
    pub style: SoapStyle,
    pub use_: SoapUse,
    pub wrapped: bool,
    pub uses_wrapper_element: bool,
    pub one_way: bool,
    pub request_element: String,
    pub request_namespace: Option<String>,
    pub response_element: Option<String>,
    pub response_namespace: Option<String>,
    pub parameters: Vec<ParameterDescriptor>,
    pub return_value: Option<ReturnDescriptor>,
    pub headers: Vec<HeaderDescriptor>,
    pub async_pair: Option<AsyncPair>,
    pub async_call: Option<AsyncCall>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportInfo {
    pub uri: String,
    pub importer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDescriptor {
    pub binding: String,
    pub namespace: String,
    pub class_name: String,
    pub kind: ImportStyle,
    pub service: Option<String>,
    pub port: Option<String>,
    pub location: Option<String>,
    pub transport: Option<TransportInfo>,
    pub header_fields: Vec<HeaderField>,
    pub operations: Vec<OperationDescriptor>,
    pub cancel_async: Option<String>,
    /// At least one operation uses encoded bodies.
    pub encoded: bool,
    pub warnings: Vec<String>,
}

impl OperationDescriptor {
    pub fn in_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters
            .iter()
            .filter(|parameter| parameter.direction != ParameterDirection::Out)
    }

    pub fn out_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters
            .iter()
            .filter(|parameter| parameter.direction != ParameterDirection::In)
    }

    pub fn header(&self, field_name: &str) -> Option<&HeaderDescriptor> {
        self.headers
            .iter()
            .find(|header| header.field_name == field_name)
    }
}

impl BindingDescriptor {
    pub fn new(binding: &str, namespace: &str, class_name: String, kind: ImportStyle) -> Self {
        Self {
            binding: binding.to_owned(),
            namespace: namespace.to_owned(),
            class_name,
            kind,
            service: None,
            port: None,
            location: None,
            transport: None,
            header_fields: Vec::new(),
            operations: Vec::new(),
            cancel_async: None,
            encoded: false,
            warnings: Vec::new(),
        }
    }

    pub fn operation(&self, name: &str) -> Option<&OperationDescriptor> {
        self.operations
            .iter()
            .find(|operation| operation.name == name)
    }
}
