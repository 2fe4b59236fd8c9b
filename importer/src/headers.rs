use std::collections::HashMap;

use soapbind_wsdl::types::{MessageBinding, SoapHeaderBinding, SoapUse};

use crate::{
    descriptor::{HeaderDescriptor, HeaderDirection, HeaderField, TypeMapping},
    error::Error,
    identifiers,
    matcher::MatchedOperation,
    protocol::{BindingContext, ClassScope},
    schema,
    session::ImportSession,
    style,
    warnings::ImportWarnings,
};

fn merge(existing: HeaderDirection, incoming: HeaderDirection) -> HeaderDirection {
    if existing == incoming {
        existing
    } else {
        HeaderDirection::InOut
    }
}

/// Records a header problem that does not stop the operation from importing.
fn note(session: &mut ImportSession, notes: &mut Vec<String>, message: String) {
    warn!("{}", message);
    session.raise(ImportWarnings::UNSUPPORTED_OPERATIONS_IGNORED);
    notes.push(message);
}

/// Resolves the header part a `soap:header` points at into its dedup key and
/// type mapping.
fn resolve_header(
    cx: &BindingContext<'_>,
    header: &SoapHeaderBinding,
    body_use: SoapUse,
    session: &mut ImportSession,
    notes: &mut Vec<String>,
) -> Result<(String, TypeMapping), Error> {
    let header_use = header.use_.effective();

    if header_use != body_use {
        return Err(Error::HeaderUseMismatch {
            header: header_use,
            body: body_use,
        });
    }

    let encoded = header_use == SoapUse::Encoded;
    let encoding = header.encoding.as_deref().unwrap_or_default();

    if encoded && !style::is_soap_encoding_present(encoding) {
        return Err(Error::UnknownHeaderEncoding(encoding.to_owned()));
    }

    let message = cx
        .definitions
        .get_message(&header.message)
        .ok_or_else(|| Error::MissingMessage(header.message.clone()))?;

    let part = message
        .find_part(&header.part)
        .ok_or_else(|| Error::MissingPart {
            message: header.message.clone(),
            part: header.part.clone(),
        })?;

    if encoded {
        let ty = part.ty.as_ref().ok_or_else(|| Error::HeaderPartTypeRequired {
            message: header.message.clone(),
            part: part.name.clone(),
        })?;

        if part.element.is_some() {
            note(
                session,
                notes,
                format!(
                    "Specifying an element for use=encoded message parts is not supported; the element of header part '{}' in message '{}' was ignored.",
                    part.name, header.message
                ),
            );
        }

        Ok((format!("type={}", ty), schema::type_mapping(cx.definitions, ty)?))
    } else {
        let element = part
            .element
            .as_ref()
            .ok_or_else(|| Error::HeaderPartElementRequired {
                message: header.message.clone(),
                part: part.name.clone(),
            })?;

        if part.ty.is_some() {
            note(
                session,
                notes,
                format!(
                    "Specifying a type for use=literal header parts is not supported; the type of header part '{}' in message '{}' was ignored.",
                    part.name, header.message
                ),
            );
        }

        Ok((
            format!("element={}", element),
            schema::element_mapping(cx.definitions, element)?,
        ))
    }
}

/// Returns the name of the class field backing `key`, declaring it first if
/// this binding has not used the header before.
fn class_field(
    scope: &mut ClassScope,
    session: &mut ImportSession,
    key: &str,
    mapping: &TypeMapping,
) -> String {
    if let Some(&index) = scope.header_fields.get(key) {
        return scope.descriptor.header_fields[index].name.clone();
    }

    let mut name = identifiers::make_valid(&mapping.element_name);
    if name == mapping.ty.name {
        name.push_str("Value");
    }
    let name = scope.method_names.add_unique(&name);

    debug!(
        "declaring header field '{}' for {} in class '{}'",
        name, key, scope.descriptor.class_name
    );

    scope
        .header_fields
        .insert(key.to_owned(), scope.descriptor.header_fields.len());
    scope.descriptor.header_fields.push(HeaderField {
        name: name.clone(),
        mapping: mapping.clone(),
    });
    session.declare_header_type(key, mapping);

    name
}

/// Collects the mapped headers of an operation's request and response.
///
/// A header bound on both sides becomes one `InOut` header. Fields are shared
/// by every operation of the binding. Response headers are only read when the
/// abstract operation has an output.
pub fn resolve_headers(
    cx: &BindingContext<'_>,
    matched: &MatchedOperation<'_>,
    body_use: SoapUse,
    scope: &mut ClassScope,
    session: &mut ImportSession,
    notes: &mut Vec<String>,
) -> Result<Vec<HeaderDescriptor>, Error> {
    let body_use = body_use.effective();
    let messages = &matched.operation.messages;
    let directions: [(Option<&MessageBinding>, HeaderDirection); 2] = [
        (
            messages.input().and(matched.binding.input.as_ref()),
            HeaderDirection::In,
        ),
        (
            messages.output().and(matched.binding.output.as_ref()),
            HeaderDirection::Out,
        ),
    ];

    let mut headers: Vec<HeaderDescriptor> = Vec::new();
    let mut local: HashMap<String, usize> = HashMap::new();

    for (message_binding, direction) in directions {
        let message_binding = match message_binding {
            Some(message_binding) => message_binding,
            None => continue,
        };

        for header in message_binding
            .extensions
            .soap_headers()
            .filter(|header| header.map_to_property)
        {
            let (key, mapping) = resolve_header(cx, header, body_use, session, notes)?;

            if let Some(&index) = local.get(&key) {
                let existing = &mut headers[index];
                existing.direction = merge(existing.direction, direction);
                continue;
            }

            let field_name = class_field(scope, session, &key, &mapping);

            local.insert(key, headers.len());
            headers.push(HeaderDescriptor {
                field_name,
                direction,
                mapping,
            });
        }
    }

    Ok(headers)
}
