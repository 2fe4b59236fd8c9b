use std::{fmt, rc::Rc};

use soapbind_wsdl::namespaces;

use crate::descriptor::{BindingDescriptor, TransportInfo};

/// Knows how to carry SOAP messages over one kind of transport.
pub trait TransportImporter: fmt::Debug {
    fn name(&self) -> &str;

    fn is_supported_transport(&self, transport: &str) -> bool;

    /// Adds whatever the transport contributes to the finished class.
    fn import_class(&self, transport: &str, descriptor: &mut BindingDescriptor) {
        descriptor.transport = Some(TransportInfo {
            uri: transport.to_owned(),
            importer: self.name().to_owned(),
        });
    }
}

/// A transport resolved once for a binding and reused for all of its operations.
#[derive(Debug, Clone)]
pub struct TransportHandle {
    pub uri: String,
    importer: Rc<dyn TransportImporter>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SoapHttpTransport;

#[derive(Debug, Clone)]
pub struct Transports(Vec<Rc<dyn TransportImporter>>);

impl TransportImporter for SoapHttpTransport {
    fn name(&self) -> &str {
        "SoapHttp"
    }

    fn is_supported_transport(&self, transport: &str) -> bool {
        transport.trim_end_matches('/') == namespaces::SOAP_HTTP_TRANSPORT
    }
}

impl TransportHandle {
    pub fn importer(&self) -> &dyn TransportImporter {
        self.importer.as_ref()
    }

    pub fn import_class(&self, descriptor: &mut BindingDescriptor) {
        self.importer.import_class(&self.uri, descriptor);
    }
}

impl Transports {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn register<T: TransportImporter + 'static>(&mut self, importer: T) {
        self.0.push(Rc::new(importer));
    }

    pub fn resolve(&self, transport: &str) -> Option<TransportHandle> {
        self.0
            .iter()
            .find(|importer| importer.is_supported_transport(transport))
            .map(|importer| TransportHandle {
                uri: transport.to_owned(),
                importer: Rc::clone(importer),
            })
    }
}

impl Default for Transports {
    fn default() -> Self {
        let mut transports = Self::empty();
        transports.register(SoapHttpTransport);
        transports
    }
}
