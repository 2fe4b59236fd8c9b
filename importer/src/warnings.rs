use soapbind_wsdl::types::{Extension, Extensions};

bitflags::bitflags! {
    /// Summary of everything the import had to leave out.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ImportWarnings: u8 {
        const NO_CODE_GENERATED              = 0b0000_0001;
        const OPTIONAL_EXTENSIONS_IGNORED    = 0b0000_0010;
        const REQUIRED_EXTENSIONS_IGNORED    = 0b0000_0100;
        const UNSUPPORTED_OPERATIONS_IGNORED = 0b0000_1000;
        const UNSUPPORTED_BINDINGS_IGNORED   = 0b0001_0000;
        const NO_METHODS_GENERATED           = 0b0010_0000;
    }
}

pub(crate) fn binding_ignored(binding: &str, namespace: &str, reason: &str) -> String {
    format!(
        "The binding '{}' from namespace '{}' was ignored. {}",
        binding, namespace, reason
    )
}

pub(crate) fn operation_ignored(operation: &str, namespace: &str, reason: &str) -> String {
    format!(
        "The operation '{}' from namespace '{}' was ignored. {}",
        operation, namespace, reason
    )
}

pub(crate) fn operation_binding_ignored(operation: &str, namespace: &str, reason: &str) -> String {
    format!(
        "The operation binding '{}' from namespace '{}' was ignored. {}",
        operation, namespace, reason
    )
}

pub(crate) const NO_METHODS: &str = "No methods were found in the WSDL for this protocol.";

/// Reports every extension the SOAP importer does not understand.
///
/// Returns the warning bits raised so the caller can fold them into the
/// session.
pub(crate) fn extension_warnings(extensions: &Extensions, out: &mut Vec<String>) -> ImportWarnings {
    let mut raised = ImportWarnings::empty();

    for extension in extensions.iter() {
        let unknown = match extension {
            Extension::Unknown(unknown) => unknown,
            _ => continue,
        };

        if unknown.required {
            raised |= ImportWarnings::REQUIRED_EXTENSIONS_IGNORED;
            out.push(format!(
                "The WSDL '{}' extension element from namespace '{}' was not handled. It is marked as required and the generated code may not work.",
                unknown.name, unknown.namespace
            ));
        } else {
            raised |= ImportWarnings::OPTIONAL_EXTENSIONS_IGNORED;
            out.push(format!(
                "The optional WSDL extension element '{}' from namespace '{}' was not handled.",
                unknown.name, unknown.namespace
            ));
        }
    }

    raised
}
