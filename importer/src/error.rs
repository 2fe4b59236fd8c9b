use soapbind_wsdl::types::{QualifiedName, SoapUse};
use thiserror::Error;

/// Structural problems found while matching an operation to its binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("The operation binding is missing")]
    MissingBinding,

    #[error("More than one operation binding matches; input/output names must be unique")]
    DuplicateInputOutputNames,

    #[error("The operation has an input message but the binding has no input")]
    MissingInputBinding,

    #[error("The operation has an output message but the binding has no output")]
    MissingOutputBinding,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Protocol with name '{0}' is not recognized")]
    UnknownProtocol(String),

    #[error("Unable to import binding '{binding}' from namespace '{namespace}'")]
    Binding {
        binding: String,
        namespace: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Unable to import operation '{0}'")]
    Operation(String, #[source] Box<Error>),

    #[error("The operation '{operation}' on portType '{port_type}' from namespace '{namespace}' had the following syntax error: {error}")]
    OperationSyntax {
        operation: String,
        port_type: String,
        namespace: String,
        error: SyntaxError,
    },

    #[error("Missing binding '{0}'")]
    MissingBindingReference(QualifiedName),

    #[error("Missing portType '{0}'")]
    MissingPortType(QualifiedName),

    #[error("Missing message '{0}'")]
    MissingMessage(QualifiedName),

    #[error("Missing part '{part}' of message '{message}'")]
    MissingPart { message: QualifiedName, part: String },

    #[error("Missing schema element '{0}'")]
    MissingElement(QualifiedName),

    #[error("Missing schema type '{0}'")]
    MissingType(QualifiedName),

    #[error("Schema element '{0}' does not describe a sequence of members")]
    NotAWrapperElement(QualifiedName),

    #[error("Header use '{header}' does not match the body use '{body}'")]
    HeaderUseMismatch { header: SoapUse, body: SoapUse },

    #[error("Header encoding style '{0}' is not supported")]
    UnknownHeaderEncoding(String),

    #[error("Header part '{part}' of message '{message}' must specify a type when use is encoded")]
    HeaderPartTypeRequired { message: QualifiedName, part: String },

    #[error("Header part '{part}' of message '{message}' must specify an element when use is literal")]
    HeaderPartElementRequired { message: QualifiedName, part: String },
}
