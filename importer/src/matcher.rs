use soapbind_wsdl::types::{Message, Operation, OperationBinding, OperationMessage};

use crate::{
    error::{Error, SyntaxError},
    protocol::BindingContext,
};

/// An abstract operation paired with the binding entry that implements it.
#[derive(Debug, Clone, Copy)]
pub struct MatchedOperation<'d> {
    pub operation: &'d Operation,
    pub binding: &'d OperationBinding,
    pub input_message: Option<&'d Message>,
    pub output_message: Option<&'d Message>,
}

fn names_agree(abstract_name: Option<&str>, concrete_name: Option<&str>) -> bool {
    match (abstract_name, concrete_name) {
        (Some(abstract_name), Some(concrete_name)) => abstract_name == concrete_name,
        _ => true,
    }
}

/// Whether `binding` is a candidate implementation of `operation`.
///
/// Input and output names only take part when both sides declare one.
pub fn is_bound_by(operation: &Operation, binding: &OperationBinding) -> bool {
    if operation.name != binding.name {
        return false;
    }

    let input = operation.messages.input().and_then(|m| m.name.as_deref());
    let output = operation.messages.output().and_then(|m| m.name.as_deref());

    names_agree(input, binding.input.as_ref().and_then(|b| b.name.as_deref()))
        && names_agree(output, binding.output.as_ref().and_then(|b| b.name.as_deref()))
}

fn syntax_error(cx: &BindingContext<'_>, operation: &Operation, error: SyntaxError) -> Error {
    Error::OperationSyntax {
        operation: operation.name.clone(),
        port_type: cx.port_type.name.clone(),
        namespace: cx.binding.port_type.namespace.clone(),
        error,
    }
}

fn resolve_message<'d>(
    cx: &BindingContext<'d>,
    message: Option<&OperationMessage>,
) -> Result<Option<&'d Message>, Error> {
    match message {
        Some(message) => cx
            .definitions
            .get_message(&message.message)
            .map(Some)
            .ok_or_else(|| Error::MissingMessage(message.message.clone())),
        None => Ok(None),
    }
}

pub fn match_operation<'d>(
    cx: &BindingContext<'d>,
    operation: &'d Operation,
) -> Result<MatchedOperation<'d>, Error> {
    let mut candidates = cx
        .binding
        .operations
        .iter()
        .filter(|candidate| is_bound_by(operation, candidate));

    let binding = match (candidates.next(), candidates.next()) {
        (Some(binding), None) => binding,
        (None, _) => return Err(syntax_error(cx, operation, SyntaxError::MissingBinding)),
        (Some(_), Some(_)) => {
            return Err(syntax_error(
                cx,
                operation,
                SyntaxError::DuplicateInputOutputNames,
            ))
        }
    };

    let input = operation.messages.input();
    let output = operation.messages.output();

    if input.is_some() && binding.input.is_none() {
        return Err(syntax_error(cx, operation, SyntaxError::MissingInputBinding));
    }

    if output.is_some() && binding.output.is_none() {
        return Err(syntax_error(cx, operation, SyntaxError::MissingOutputBinding));
    }

    trace!(
        "operation '{}' matched in binding '{}'",
        operation.name,
        cx.binding.name
    );

    Ok(MatchedOperation {
        operation,
        binding,
        input_message: resolve_message(cx, input)?,
        output_message: resolve_message(cx, output)?,
    })
}
