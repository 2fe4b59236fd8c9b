use std::collections::HashSet;

use soapbind_wsdl::types::{Binding, DefinitionSet, Port, PortType, QualifiedName, Service};

use crate::{
    error::Error,
    protocol::{BindingContext, BindingSupport, ProtocolImporter},
    session::ImportSession,
    transport::TransportHandle,
    warnings::{self, ImportWarnings},
};

/// A binding the protocol accepted, with the service and port that exposed it.
#[derive(Debug, Clone)]
pub struct SelectedBinding<'d> {
    pub service: Option<&'d Service>,
    pub port: Option<&'d Port>,
    pub binding: &'d Binding,
    pub port_type: &'d PortType,
    pub namespace: &'d str,
    pub transport: TransportHandle,
}

impl<'d> SelectedBinding<'d> {
    pub fn context(&self, definitions: &'d DefinitionSet) -> BindingContext<'d> {
        BindingContext {
            definitions,
            service: self.service,
            port: self.port,
            binding: self.binding,
            port_type: self.port_type,
            namespace: self.namespace,
        }
    }
}

fn resolve_port_type<'d>(
    definitions: &'d DefinitionSet,
    binding: &Binding,
) -> Result<&'d PortType, Error> {
    definitions
        .get_port_type(&binding.port_type)
        .ok_or_else(|| Error::MissingPortType(binding.port_type.clone()))
}

/// Asks the protocol about `binding`, warning when only its transport is the problem.
fn check(
    protocol: &dyn ProtocolImporter,
    binding: &Binding,
    namespace: &str,
    session: &mut ImportSession,
) -> Option<TransportHandle> {
    match protocol.is_binding_supported(binding) {
        BindingSupport::Supported(transport) => {
            debug!(
                "{} binding '{}' accepted with transport '{}'",
                protocol.protocol_name(),
                binding.name,
                transport.uri
            );
            Some(transport)
        }
        BindingSupport::NotApplicable => {
            trace!(
                "binding '{}' is not a {} binding",
                binding.name,
                protocol.protocol_name()
            );
            None
        }
        BindingSupport::UnsupportedTransport(transport) => {
            session.warn_namespace(
                ImportWarnings::UNSUPPORTED_BINDINGS_IGNORED,
                warnings::binding_ignored(
                    &binding.name,
                    namespace,
                    &format!("The transport '{}' is not supported.", transport),
                ),
            );
            None
        }
    }
}

/// Finds the bindings `protocol` will generate classes for.
///
/// Bindings reachable from a service port come first, each once. When no port
/// yields a usable binding every declared binding is tried instead, except
/// those already rejected.
pub fn select_bindings<'d>(
    protocol: &dyn ProtocolImporter,
    definitions: &'d DefinitionSet,
    session: &mut ImportSession,
) -> Result<Vec<SelectedBinding<'d>>, Error> {
    let mut selected = Vec::new();
    let mut seen: HashSet<QualifiedName> = HashSet::new();
    let mut rejected: HashSet<QualifiedName> = HashSet::new();

    for definition in definitions.iter() {
        for service in &definition.services {
            for port in &service.ports {
                let (binding, namespace) = definitions
                    .get_binding(&port.binding)
                    .ok_or_else(|| Error::MissingBindingReference(port.binding.clone()))?;
                let port_type = resolve_port_type(definitions, binding)?;

                if !seen.insert(port.binding.clone()) {
                    continue;
                }

                match check(protocol, binding, namespace, session) {
                    Some(transport) => selected.push(SelectedBinding {
                        service: Some(service),
                        port: Some(port),
                        binding,
                        port_type,
                        namespace,
                        transport,
                    }),
                    None => {
                        rejected.insert(port.binding.clone());
                    }
                }
            }
        }
    }

    if !selected.is_empty() {
        return Ok(selected);
    }

    debug!("no port exposes a usable binding, falling back to declared bindings");

    for definition in definitions.iter() {
        let namespace = definition.target_namespace.as_str();

        for binding in &definition.bindings {
            if rejected.contains(&definition.qualify(&binding.name)) {
                continue;
            }

            let port_type = resolve_port_type(definitions, binding)?;

            if let Some(transport) = check(protocol, binding, namespace, session) {
                selected.push(SelectedBinding {
                    service: None,
                    port: None,
                    binding,
                    port_type,
                    namespace,
                    transport,
                });
            }
        }
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{options::ImportOptions, soap::SoapProtocolImporter, testing::*};
    use soapbind_wsdl::{
        namespaces,
        types::{Definition, Extension, Extensions, SoapBinding, SoapStyle, SoapVersion},
    };

    fn soap_binding_ext(version: SoapVersion, transport: &str) -> Extension {
        Extension::SoapBinding(SoapBinding {
            version,
            transport: transport.into(),
            style: SoapStyle::Document,
        })
    }

    fn smtp_binding() -> Binding {
        binding(
            "CalcSmtp",
            "Calc",
            soap_binding_ext(SoapVersion::Soap11, "urn:smtp"),
            vec![],
        )
    }

    fn service(name: &str, ports: &[(&str, &str)]) -> Service {
        Service {
            name: name.into(),
            ports: ports
                .iter()
                .map(|(port, binding)| Port {
                    name: (*port).into(),
                    binding: qname(binding),
                    extensions: Extensions::default(),
                })
                .collect(),
            extensions: Extensions::default(),
        }
    }

    fn definition(bindings: Vec<Binding>, services: Vec<Service>) -> DefinitionSet {
        let mut definition = Definition::new(TNS);
        definition.port_types.push(port_type("Calc", vec![]));
        definition.bindings = bindings;
        definition.services = services;
        DefinitionSet::new(vec![definition])
    }

    fn names(selected: &[SelectedBinding<'_>]) -> Vec<String> {
        selected
            .iter()
            .map(|selected| selected.binding.name.clone())
            .collect()
    }

    #[test]
    fn ports_sharing_a_binding_select_it_once() {
        let set = definition(
            vec![binding("CalcSoap", "Calc", document_soap_binding(), vec![])],
            vec![service("Calc", &[("A", "CalcSoap"), ("B", "CalcSoap")])],
        );
        let mut session = ImportSession::new(ImportOptions::default());

        let selected =
            select_bindings(&SoapProtocolImporter::default(), &set, &mut session).unwrap();

        assert_eq!(names(&selected), ["CalcSoap"]);
        assert_eq!(selected[0].port.unwrap().name, "A");
        assert_eq!(selected[0].service.unwrap().name, "Calc");
    }

    #[test]
    fn soap12_is_skipped_silently() {
        let set = definition(
            vec![
                binding(
                    "CalcSoap12",
                    "Calc",
                    soap_binding_ext(SoapVersion::Soap12, namespaces::SOAP_HTTP_TRANSPORT),
                    vec![],
                ),
                binding("CalcSoap", "Calc", document_soap_binding(), vec![]),
            ],
            vec![service("Calc", &[("P12", "CalcSoap12"), ("P11", "CalcSoap")])],
        );
        let mut session = ImportSession::new(ImportOptions::default());

        let selected =
            select_bindings(&SoapProtocolImporter::default(), &set, &mut session).unwrap();

        assert_eq!(names(&selected), ["CalcSoap"]);
        assert!(session.warnings().is_empty());
    }

    #[test]
    fn unknown_transport_warns_once() {
        let set = definition(
            vec![smtp_binding()],
            vec![service("Calc", &[("A", "CalcSmtp"), ("B", "CalcSmtp")])],
        );
        let mut session = ImportSession::new(ImportOptions::default());

        let selected =
            select_bindings(&SoapProtocolImporter::default(), &set, &mut session).unwrap();

        assert!(selected.is_empty());
        assert_eq!(session.warnings(), ImportWarnings::UNSUPPORTED_BINDINGS_IGNORED);
        assert_eq!(session.namespace_warnings().len(), 1);
        assert!(session.namespace_warnings()[0].contains("urn:smtp"));
    }

    #[test]
    fn fallback_uses_declared_bindings_but_not_rejected_ones() {
        let set = definition(
            vec![
                smtp_binding(),
                binding("CalcSoap", "Calc", document_soap_binding(), vec![]),
            ],
            vec![service("Calc", &[("A", "CalcSmtp")])],
        );
        let mut session = ImportSession::new(ImportOptions::default());

        let selected =
            select_bindings(&SoapProtocolImporter::default(), &set, &mut session).unwrap();

        assert_eq!(names(&selected), ["CalcSoap"]);
        assert!(selected[0].service.is_none());
        assert!(selected[0].port.is_none());
        assert_eq!(session.namespace_warnings().len(), 1);
    }

    #[test]
    fn fallback_is_skipped_when_a_port_was_accepted() {
        let set = definition(
            vec![
                binding("CalcSoap", "Calc", document_soap_binding(), vec![]),
                binding("Orphan", "Calc", document_soap_binding(), vec![]),
            ],
            vec![service("Calc", &[("A", "CalcSoap")])],
        );
        let mut session = ImportSession::new(ImportOptions::default());

        let selected =
            select_bindings(&SoapProtocolImporter::default(), &set, &mut session).unwrap();

        assert_eq!(names(&selected), ["CalcSoap"]);
    }

    #[test]
    fn dangling_references_are_fatal() {
        let set = definition(vec![], vec![service("Calc", &[("A", "Missing")])]);
        let mut session = ImportSession::new(ImportOptions::default());

        assert!(matches!(
            select_bindings(&SoapProtocolImporter::default(), &set, &mut session),
            Err(Error::MissingBindingReference(name)) if name.name == "Missing"
        ));

        let set = definition(
            vec![binding("CalcSoap", "Nowhere", document_soap_binding(), vec![])],
            vec![],
        );
        assert!(matches!(
            select_bindings(&SoapProtocolImporter::default(), &set, &mut session),
            Err(Error::MissingPortType(name)) if name.name == "Nowhere"
        ));
    }
}
