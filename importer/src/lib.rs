#[macro_use]
extern crate log;

pub mod descriptor;
pub mod error;
mod headers;
pub mod identifiers;
pub mod import;
pub mod matcher;
pub mod options;
pub mod parameters;
pub mod protocol;
pub mod schema;
pub mod selector;
pub mod session;
pub mod soap;
pub mod style;
pub mod transport;
pub mod warnings;

#[cfg(test)]
mod testing;

use soapbind_wsdl::types::DefinitionSet;

pub use descriptor::{BindingDescriptor, HeaderDirection, OperationDescriptor};
pub use error::Error;
pub use options::{
    CodeGenerationOptions, GeneratorInfo, GeneratorSupport, ImportOptions, ImportStyle,
};
pub use protocol::ProtocolImporter;
pub use session::{ImportResult, ImportSession};
pub use soap::SoapProtocolImporter;
pub use warnings::ImportWarnings;

/// Runs protocol importers over a set of definitions.
pub struct ServiceImporter {
    importers: Vec<Box<dyn ProtocolImporter>>,
    options: ImportOptions,
}

impl Default for ServiceImporter {
    fn default() -> Self {
        Self::new(ImportOptions::default())
    }
}

impl ServiceImporter {
    /// An importer that knows the SOAP 1.1 protocol.
    pub fn new(options: ImportOptions) -> Self {
        Self {
            importers: vec![Box::new(SoapProtocolImporter::default())],
            options,
        }
    }

    pub fn add_importer<P: ProtocolImporter + 'static>(&mut self, importer: P) {
        self.importers.push(Box::new(importer));
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    fn find_importer(&self, name: &str) -> Result<&dyn ProtocolImporter, Error> {
        self.importers
            .iter()
            .find(|importer| importer.protocol_name().eq_ignore_ascii_case(name))
            .map(|importer| importer.as_ref())
            .ok_or_else(|| Error::UnknownProtocol(name.to_owned()))
    }

    pub fn import(&self, definitions: &DefinitionSet) -> Result<ImportResult, Error> {
        let mut session = ImportSession::new(self.options.clone());

        let bindings = match &self.options.protocol_name {
            Some(name) => {
                import::generate_code(self.find_importer(name)?, definitions, &mut session)?
            }
            None => {
                let mut bindings = Vec::new();

                for importer in &self.importers {
                    bindings = import::generate_code(importer.as_ref(), definitions, &mut session)?;

                    if !bindings.is_empty() {
                        break;
                    }
                }

                bindings
            }
        };

        if bindings.is_empty() {
            warn!("no protocol importer generated code");
            session.raise(ImportWarnings::NO_CODE_GENERATED);
        }

        Ok(session.finish(bindings))
    }
}

pub fn from_definitions(definitions: &DefinitionSet) -> Result<ImportResult, Error> {
    ServiceImporter::default().import(definitions)
}

// Initialize logger for tests so RUST_LOG can be used while debugging
#[cfg(test)]
#[ctor::ctor]
fn init() {
    env_logger::init();
}
