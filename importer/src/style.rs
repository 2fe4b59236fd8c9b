//! SOAP style/use resolution and the part shapes each combination allows.

use soapbind_wsdl::{
    namespaces,
    types::{
        DefinitionSet, Message, MessagePart, QualifiedName, SoapBinding, SoapBodyBinding,
        SoapOperationBinding, SoapStyle, SoapUse,
    },
};
use thiserror::Error;

use crate::{error::Error, schema};

const WRAPPER_PART: &str = "parameters";

/// Why a message cannot be bound with the requested style and use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleViolation {
    #[error("Each message part in an rpc/literal message must specify a type; part '{0}' does not.")]
    RpcLiteralPartNeedsType(String),

    #[error("Part '{0}' specifies both a type and an element; use=literal messages must use elements.")]
    LiteralPartHasTypeAndElement(String),

    #[error("Specifying a type for use=literal messages is only supported for any types; '{0}' is not one.")]
    LiteralTypeNotAny(QualifiedName),

    #[error("Specifying a type for use=literal messages is not supported; part '{0}' does so.")]
    LiteralPartHasType(String),

    #[error("Each message part in a use=literal message must specify an element; part '{0}' does not.")]
    LiteralPartNeedsElement(String),

    #[error("The encoding '{0}' is not supported.")]
    UnknownEncoding(String),

    #[error("Specifying an element for use=encoded message parts is not supported; part '{0}' does so.")]
    EncodedPartHasElement(String),

    #[error("Each message part in a use=encoded message must specify a type; part '{0}' does not.")]
    EncodedPartNeedsType(String),
}

/// Operation style wins over binding style; document is the fallback.
pub fn resolve_style(
    operation: Option<&SoapOperationBinding>,
    binding: Option<&SoapBinding>,
) -> SoapStyle {
    let from_operation = operation.map(|operation| operation.style);
    let from_binding = binding.map(|binding| binding.style);

    [from_operation, from_binding]
        .into_iter()
        .flatten()
        .find(|style| *style != SoapStyle::Default)
        .unwrap_or(SoapStyle::Document)
}

/// The encoding style list must name SOAP encoding as a whole token.
pub fn is_soap_encoding_present(encoding: &str) -> bool {
    encoding
        .split_whitespace()
        .any(|uri| uri == namespaces::SOAP_ENCODING)
}

/// The parts a body binds: its explicit `parts` list, or all of them.
pub fn message_parts<'d>(
    message_name: &QualifiedName,
    message: &'d Message,
    body: &SoapBodyBinding,
) -> Result<Vec<&'d MessagePart>, Error> {
    match &body.parts {
        None => Ok(message.parts.iter().collect()),
        Some(names) => names
            .iter()
            .map(|name| {
                message.find_part(name).ok_or_else(|| Error::MissingPart {
                    message: message_name.clone(),
                    part: name.clone(),
                })
            })
            .collect(),
    }
}

/// Validates part shapes against style and use.
///
/// `Ok(true)` means the message follows the wrapped document convention.
pub fn check_message_style(
    definitions: &DefinitionSet,
    parts: &[&MessagePart],
    body: &SoapBodyBinding,
    style: SoapStyle,
) -> Result<bool, StyleViolation> {
    match body.use_.effective() {
        SoapUse::Encoded => check_encoded(parts, body)?,
        _ if style == SoapStyle::Rpc => {
            if let Some(part) = parts
                .iter()
                .find(|part| part.element.is_some() || part.ty.is_none())
            {
                return Err(StyleViolation::RpcLiteralPartNeedsType(part.name.clone()));
            }

            return Ok(false);
        }
        _ => {
            if let [part] = parts {
                if let Some(ty) = &part.ty {
                    if part.element.is_some() {
                        return Err(StyleViolation::LiteralPartHasTypeAndElement(
                            part.name.clone(),
                        ));
                    }

                    if !schema::is_any_type(definitions, ty) {
                        return Err(StyleViolation::LiteralTypeNotAny(ty.clone()));
                    }

                    return Ok(false);
                }
            }

            check_document_literal(parts)?
        }
    }

    Ok(style != SoapStyle::Rpc && parts.len() == 1 && parts[0].name == WRAPPER_PART)
}

fn check_encoded(parts: &[&MessagePart], body: &SoapBodyBinding) -> Result<(), StyleViolation> {
    let encoding = body.encoding.as_deref().unwrap_or_default();

    if !is_soap_encoding_present(encoding) {
        return Err(StyleViolation::UnknownEncoding(encoding.to_owned()));
    }

    for part in parts {
        if part.element.is_some() {
            return Err(StyleViolation::EncodedPartHasElement(part.name.clone()));
        }

        if part.ty.is_none() {
            return Err(StyleViolation::EncodedPartNeedsType(part.name.clone()));
        }
    }

    Ok(())
}

fn check_document_literal(parts: &[&MessagePart]) -> Result<(), StyleViolation> {
    for part in parts {
        if part.ty.is_some() {
            return Err(StyleViolation::LiteralPartHasType(part.name.clone()));
        }

        if part.element.is_none() {
            return Err(StyleViolation::LiteralPartNeedsElement(part.name.clone()));
        }
    }

    Ok(())
}

/// Input and output must agree on wrapping; otherwise neither is treated as wrapped.
pub fn combine_wrapped(input: bool, output: Option<bool>) -> bool {
    match output {
        Some(output) if output != input => false,
        _ => input,
    }
}
