//! Drives a protocol importer over every selected binding and collects the
//! descriptors handed to the code emitter.

use soapbind_wsdl::types::{DefinitionSet, Operation};

use crate::{
    descriptor::BindingDescriptor,
    error::Error,
    identifiers,
    matcher,
    options::ImportStyle,
    protocol::{BindingContext, ClassScope, OperationOutcome, ProtocolImporter, SkipReason},
    selector::{self, SelectedBinding},
    session::ImportSession,
    transport::TransportHandle,
    warnings::{self, ImportWarnings},
};

const CANCEL_ASYNC: &str = "CancelAsync";

/// Imports every binding `protocol` accepts. An empty result means the
/// protocol found nothing to generate.
pub fn generate_code(
    protocol: &dyn ProtocolImporter,
    definitions: &DefinitionSet,
    session: &mut ImportSession,
) -> Result<Vec<BindingDescriptor>, Error> {
    let selected = selector::select_bindings(protocol, definitions, session)?;
    let binding_count = selected.len();

    selected
        .iter()
        .map(|selected| generate_binding(protocol, definitions, selected, binding_count, session))
        .collect()
}

fn class_name(
    cx: &BindingContext<'_>,
    binding_count: usize,
    session: &mut ImportSession,
) -> String {
    let style = session.options().style;

    let name = match cx.service {
        Some(service) if binding_count == 1 && style != ImportStyle::ServerInterface => {
            service.name.clone()
        }
        _ if style == ImportStyle::ServerInterface => {
            format!("I{}", identifiers::make_pascal(&cx.binding.name))
        }
        _ => cx.binding.name.clone(),
    };

    let name = identifiers::make_valid(&identifiers::decode_name(&name));
    session.class_names.add_unique(&name)
}

fn generate_binding(
    protocol: &dyn ProtocolImporter,
    definitions: &DefinitionSet,
    selected: &SelectedBinding<'_>,
    binding_count: usize,
    session: &mut ImportSession,
) -> Result<BindingDescriptor, Error> {
    let cx = selected.context(definitions);

    import_binding(protocol, &cx, selected.transport.clone(), binding_count, session).map_err(
        |source| Error::Binding {
            binding: cx.binding.name.clone(),
            namespace: cx.namespace.to_owned(),
            source: Box::new(source),
        },
    )
}

fn skip_operation(
    cx: &BindingContext<'_>,
    operation: &Operation,
    reason: SkipReason,
    notes: Vec<String>,
    scope: &mut ClassScope,
    session: &mut ImportSession,
) {
    let message = if reason.is_binding_issue() {
        warnings::operation_binding_ignored(&operation.name, cx.namespace, &reason.message())
    } else {
        warnings::operation_ignored(
            &operation.name,
            &cx.binding.port_type.namespace,
            &reason.message(),
        )
    };

    warn!("{}", message);
    session.raise(ImportWarnings::UNSUPPORTED_OPERATIONS_IGNORED);
    scope.descriptor.warnings.extend(notes);
    scope.descriptor.warnings.push(message);
}

fn import_binding(
    protocol: &dyn ProtocolImporter,
    cx: &BindingContext<'_>,
    transport: TransportHandle,
    binding_count: usize,
    session: &mut ImportSession,
) -> Result<BindingDescriptor, Error> {
    let class_name = class_name(cx, binding_count, session);

    debug!(
        "generating class '{}' for binding '{}'",
        class_name, cx.binding.name
    );

    let mut descriptor = BindingDescriptor::new(
        &cx.binding.name,
        cx.namespace,
        class_name,
        session.options().style,
    );
    descriptor.service = cx.service.map(|service| service.name.clone());
    descriptor.port = cx.port.map(|port| port.name.clone());

    let mut scope = protocol.begin_class(cx, descriptor, transport);
    let mut imported = 0;

    for operation in &cx.port_type.operations {
        let matched = matcher::match_operation(cx, operation)?;

        let flow = operation.messages.flow();
        if !protocol.is_operation_flow_supported(flow) {
            let reason = SkipReason::UnsupportedFlow(flow);
            skip_operation(cx, operation, reason, Vec::new(), &mut scope, session);
            continue;
        }

        let outcome = protocol
            .import_operation(cx, &matched, &mut scope, session)
            .map_err(|source| Error::Operation(operation.name.clone(), Box::new(source)))?;

        match outcome {
            OperationOutcome::Imported(descriptor) => {
                let binding = matched.binding;
                let mut raised = warnings::extension_warnings(
                    &binding.extensions,
                    &mut scope.descriptor.warnings,
                );

                for message in [binding.input.as_ref(), binding.output.as_ref()]
                    .into_iter()
                    .flatten()
                {
                    raised |= warnings::extension_warnings(
                        &message.extensions,
                        &mut scope.descriptor.warnings,
                    );
                }

                session.raise(raised);
                scope.descriptor.operations.push(descriptor);
                imported += 1;
            }
            OperationOutcome::Skipped { reason, notes } => {
                skip_operation(cx, operation, reason, notes, &mut scope, session);
            }
        }
    }

    if imported > 0 && session.options().generates_new_async() {
        scope.descriptor.cancel_async = Some(scope.method_names.add_unique(CANCEL_ASYNC));
    }

    protocol.end_class(&mut scope);

    let mut descriptor = scope.descriptor;

    if imported == 0 {
        warn!("{} ({})", warnings::NO_METHODS, descriptor.class_name);
        session.raise(ImportWarnings::NO_METHODS_GENERATED);
        descriptor.warnings.push(warnings::NO_METHODS.to_owned());
    }

    let mut raised = warnings::extension_warnings(&cx.binding.extensions, &mut descriptor.warnings);
    if let Some(port) = cx.port {
        raised |= warnings::extension_warnings(&port.extensions, &mut descriptor.warnings);
    }
    session.raise(raised);

    Ok(descriptor)
}
