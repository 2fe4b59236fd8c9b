//! The SOAP 1.1 protocol importer.

use soapbind_wsdl::types::{Binding, Flow, SoapBodyBinding, SoapStyle, SoapUse, SoapVersion};

use crate::{
    descriptor::{AsyncCall, AsyncPair, AsyncTypes, BindingDescriptor, OperationDescriptor},
    error::Error,
    headers,
    identifiers,
    matcher::MatchedOperation,
    options::GeneratorSupport,
    parameters::MethodSignature,
    protocol::{
        BindingContext, BindingSupport, ClassScope, OperationOutcome, ProtocolImporter,
        SkipReason,
    },
    schema,
    session::ImportSession,
    style,
    transport::{TransportHandle, Transports},
};

#[derive(Debug, Default)]
pub struct SoapProtocolImporter {
    transports: Transports,
}

fn skip(operation: &str, reason: SkipReason, notes: Vec<String>) -> OperationOutcome {
    debug!("skipping operation '{}': {}", operation, reason.message());
    OperationOutcome::Skipped { reason, notes }
}

/// The element name a message is wrapped in unless the binding overrides it.
fn element_name(binding_name: Option<&str>, style: SoapStyle, default: String) -> String {
    match binding_name {
        Some(name) if !name.is_empty() && style != SoapStyle::Rpc => name.to_owned(),
        _ => default,
    }
}

impl SoapProtocolImporter {
    pub fn new(transports: Transports) -> Self {
        Self { transports }
    }

    fn method_name(&self, operation: &str, scope: &mut ClassScope) -> (String, Option<String>) {
        let mut name = identifiers::make_valid(&identifiers::decode_name(operation));
        if name == scope.descriptor.class_name {
            name = format!("Call{}", name);
        }

        let unique = scope.method_names.add_unique(&name);
        let renamed = (unique != name).then(|| unique.clone());

        (unique, renamed)
    }

    fn async_call(
        &self,
        method_name: &str,
        signature: &MethodSignature,
        scope: &mut ClassScope,
        session: &mut ImportSession,
    ) -> AsyncCall {
        let key = signature.key(method_name);
        let cached = session.async_types(&key).cloned();
        let declares_types = cached.is_none();

        let types = match cached {
            Some(types) => types,
            None => {
                let types = AsyncTypes {
                    handler_type: session
                        .class_names
                        .add_unique(&format!("{}CompletedEventHandler", method_name)),
                    args_type: session
                        .class_names
                        .add_unique(&format!("{}CompletedEventArgs", method_name)),
                };
                session.declare_async_types(key, types.clone());
                types
            }
        };

        let names = &mut scope.method_names;
        AsyncCall {
            completed_event: names.add_unique(&format!("{}Completed", method_name)),
            method_name: names.add_unique(&format!("{}Async", method_name)),
            callback_field: names.add_unique(&format!("{}OperationCompleted", method_name)),
            callback_method: names.add_unique(&format!("On{}OperationCompleted", method_name)),
            types,
            declares_types,
        }
    }
}

impl ProtocolImporter for SoapProtocolImporter {
    fn protocol_name(&self) -> &str {
        "Soap"
    }

    fn is_binding_supported(&self, binding: &Binding) -> BindingSupport {
        match binding.extensions.soap_binding() {
            Some(soap) if soap.version == SoapVersion::Soap11 => {
                match self.transports.resolve(&soap.transport) {
                    Some(handle) => BindingSupport::Supported(handle),
                    None => BindingSupport::UnsupportedTransport(soap.transport.clone()),
                }
            }
            _ => BindingSupport::NotApplicable,
        }
    }

    fn is_operation_flow_supported(&self, flow: Flow) -> bool {
        matches!(flow, Flow::OneWay | Flow::RequestResponse)
    }

    fn begin_class(
        &self,
        cx: &BindingContext<'_>,
        mut descriptor: BindingDescriptor,
        transport: TransportHandle,
    ) -> ClassScope {
        descriptor.location = cx
            .port
            .and_then(|port| port.extensions.soap_address())
            .map(|address| address.location.clone());

        ClassScope::new(descriptor, transport)
    }

    fn import_operation(
        &self,
        cx: &BindingContext<'_>,
        matched: &MatchedOperation<'_>,
        scope: &mut ClassScope,
        session: &mut ImportSession,
    ) -> Result<OperationOutcome, Error> {
        let operation = matched.operation;
        let binding = matched.binding;
        let mut notes = Vec::new();

        let soap_operation = binding.extensions.soap_operation();
        let style = style::resolve_style(soap_operation, cx.binding.extensions.soap_binding());
        let action = soap_operation
            .map(|soap_operation| soap_operation.action.clone())
            .unwrap_or_default();

        let input_body: &SoapBodyBinding = match binding
            .input
            .as_ref()
            .and_then(|input| input.extensions.soap_body())
        {
            Some(body) => body,
            None => return Ok(skip(&operation.name, SkipReason::MissingInputBody, notes)),
        };

        let (input_name, input_message) = match (operation.messages.input(), matched.input_message)
        {
            (Some(input), Some(message)) => (&input.message, message),
            _ => return Ok(skip(&operation.name, SkipReason::MissingInputBody, notes)),
        };

        let output = match (operation.messages.output(), matched.output_message) {
            (Some(output), Some(message)) => {
                match binding
                    .output
                    .as_ref()
                    .and_then(|output_binding| output_binding.extensions.soap_body())
                {
                    Some(body) => Some((&output.message, message, body)),
                    None => {
                        return Ok(skip(&operation.name, SkipReason::MissingOutputBody, notes))
                    }
                }
            }
            _ => None,
        };

        let request_name = element_name(
            binding.input.as_ref().and_then(|input| input.name.as_deref()),
            style,
            operation.name.clone(),
        );
        let response_name = element_name(
            binding.output.as_ref().and_then(|output| output.name.as_deref()),
            style,
            format!("{}Response", operation.name),
        );

        let headers =
            headers::resolve_headers(cx, matched, input_body.use_, scope, session, &mut notes)?;

        let input_parts = style::message_parts(input_name, input_message, input_body)?;
        let mut wrapped =
            match style::check_message_style(cx.definitions, &input_parts, input_body, style) {
                Ok(wrapped) => wrapped,
                Err(violation) => {
                    return Ok(skip(&operation.name, SkipReason::Style(violation), notes))
                }
            };

        let output_parts = match output {
            Some((name, message, body)) => {
                let parts = style::message_parts(name, message, body)?;
                match style::check_message_style(cx.definitions, &parts, body, style) {
                    Ok(output_wrapped) => {
                        wrapped = style::combine_wrapped(wrapped, Some(output_wrapped));
                        Some((parts, body))
                    }
                    Err(violation) => {
                        return Ok(skip(&operation.name, SkipReason::Style(violation), notes))
                    }
                }
            }
            None => None,
        };

        let use_ = input_body.use_.effective();
        let uses_wrapper_element = (style != SoapStyle::Rpc && wrapped)
            || (use_ == SoapUse::Literal && style == SoapStyle::Rpc);

        let request = schema::import_message(
            cx.definitions,
            &request_name,
            &input_parts,
            input_body,
            style,
            wrapped,
        )?;
        let response = match &output_parts {
            Some((parts, body)) => Some(schema::import_message(
                cx.definitions,
                &response_name,
                parts,
                body,
                style,
                wrapped,
            )?),
            None => None,
        };

        let (method_name, message_name) = self.method_name(&operation.name, scope);

        let signature = MethodSignature::new(
            &request,
            response.as_ref(),
            operation.parameter_order.as_deref().unwrap_or_default(),
            &method_name,
        );

        let generator = &session.options().generator;
        let unsupported = [
            (
                signature.has_reference_parameters(),
                GeneratorSupport::REFERENCE_PARAMETERS,
            ),
            (
                signature.has_parameter_metadata(),
                GeneratorSupport::PARAMETER_ATTRIBUTES,
            ),
            (
                signature.has_return_metadata(&method_name),
                GeneratorSupport::RETURN_TYPE_ATTRIBUTES,
            ),
        ]
        .into_iter()
        .find(|(needed, feature)| *needed && !generator.supports(*feature));

        if let Some((_, feature)) = unsupported {
            let reason = SkipReason::GeneratorUnsupported {
                feature,
                generator: generator.name.clone(),
            };
            return Ok(skip(&operation.name, reason, notes));
        }

        scope.descriptor.encoded |= use_ == SoapUse::Encoded;

        let async_pair = session.options().generates_old_async().then(|| AsyncPair {
            begin: format!("Begin{}", method_name),
            end: format!("End{}", method_name),
        });

        let async_call = if session.options().generates_new_async() {
            Some(self.async_call(&method_name, &signature, scope, session))
        } else {
            None
        };

        debug!(
            "imported operation '{}' as {} method '{}' ({}/{}, wrapped: {})",
            operation.name, scope.descriptor.class_name, method_name, style, use_, wrapped
        );

        Ok(OperationOutcome::Imported(OperationDescriptor {
            name: operation.name.clone(),
            method_name,
            message_name,
            action,
            style,
            use_,
            wrapped,
            uses_wrapper_element,
            one_way: response.is_none(),
            request_element: request.element_name,
            request_namespace: request.namespace,
            response_element: response.as_ref().map(|response| response.element_name.clone()),
            response_namespace: response.and_then(|response| response.namespace),
            parameters: signature.parameters,
            return_value: signature.return_value,
            headers,
            async_pair,
            async_call,
            warnings: notes,
        }))
    }
}
