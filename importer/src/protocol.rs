use std::collections::HashMap;

use soapbind_wsdl::types::{Binding, DefinitionSet, Flow, Port, PortType, Service};

use crate::{
    descriptor::{BindingDescriptor, OperationDescriptor},
    error::Error,
    identifiers::CodeIdentifiers,
    matcher::MatchedOperation,
    options::GeneratorSupport,
    session::ImportSession,
    style::StyleViolation,
    transport::TransportHandle,
};

/// Where in the document the binding being imported was found.
#[derive(Debug, Clone, Copy)]
pub struct BindingContext<'d> {
    pub definitions: &'d DefinitionSet,
    pub service: Option<&'d Service>,
    pub port: Option<&'d Port>,
    pub binding: &'d Binding,
    pub port_type: &'d PortType,
    /// Target namespace of the document declaring the binding.
    pub namespace: &'d str,
}

#[derive(Debug, Clone)]
pub enum BindingSupport {
    Supported(TransportHandle),
    /// The binding belongs to another protocol.
    NotApplicable,
    UnsupportedTransport(String),
}

/// The class being filled in for one binding.
#[derive(Debug)]
pub struct ClassScope {
    pub descriptor: BindingDescriptor,
    pub(crate) transport: TransportHandle,
    pub(crate) method_names: CodeIdentifiers,
    pub(crate) header_fields: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnsupportedFlow(Flow),
    MissingInputBody,
    MissingOutputBody,
    Style(StyleViolation),
    GeneratorUnsupported {
        feature: GeneratorSupport,
        generator: String,
    },
}

#[derive(Debug, Clone)]
pub enum OperationOutcome {
    Imported(OperationDescriptor),
    Skipped {
        reason: SkipReason,
        /// Warnings gathered before the operation was abandoned.
        notes: Vec<String>,
    },
}

/// One wire protocol the importer can generate classes for.
///
/// The descriptor emitter only talks to this trait; a new protocol is a new
/// implementation.
pub trait ProtocolImporter {
    fn protocol_name(&self) -> &str;

    fn is_binding_supported(&self, binding: &Binding) -> BindingSupport;

    fn is_operation_flow_supported(&self, flow: Flow) -> bool;

    fn begin_class(
        &self,
        _cx: &BindingContext<'_>,
        descriptor: BindingDescriptor,
        transport: TransportHandle,
    ) -> ClassScope {
        ClassScope::new(descriptor, transport)
    }

    fn import_operation(
        &self,
        cx: &BindingContext<'_>,
        matched: &MatchedOperation<'_>,
        scope: &mut ClassScope,
        session: &mut ImportSession,
    ) -> Result<OperationOutcome, Error>;

    fn end_class(&self, scope: &mut ClassScope) {
        scope.transport.import_class(&mut scope.descriptor);
    }
}

impl ClassScope {
    pub fn new(descriptor: BindingDescriptor, transport: TransportHandle) -> Self {
        Self {
            descriptor,
            transport,
            method_names: CodeIdentifiers::default(),
            header_fields: HashMap::new(),
        }
    }
}

impl SkipReason {
    /// Flow and generator problems concern the abstract operation; the rest
    /// concern its binding.
    pub fn is_binding_issue(&self) -> bool {
        !matches!(
            self,
            SkipReason::UnsupportedFlow(_) | SkipReason::GeneratorUnsupported { .. }
        )
    }

    pub fn message(&self) -> String {
        match self {
            SkipReason::UnsupportedFlow(flow) => format!("{} operations are not supported.", flow),
            SkipReason::MissingInputBody => "Missing soap:body input binding.".to_owned(),
            SkipReason::MissingOutputBody => "Missing soap:body output binding.".to_owned(),
            SkipReason::Style(violation) => violation.to_string(),
            SkipReason::GeneratorUnsupported { feature, generator } => format!(
                "The code generator '{}' does not support {}.",
                generator, feature
            ),
        }
    }
}
