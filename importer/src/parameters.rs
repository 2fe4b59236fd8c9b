//! Turns request and response members into a method signature.

use crate::{
    descriptor::{ParameterDescriptor, ParameterDirection, ReturnDescriptor},
    identifiers::{self, CodeIdentifiers},
    schema::{MemberMapping, MembersMapping},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub parameters: Vec<ParameterDescriptor>,
    pub return_value: Option<ReturnDescriptor>,
}

fn identical(a: &MemberMapping, b: &MemberMapping) -> bool {
    a.element_name == b.element_name && a.ty == b.ty && a.namespace == b.namespace
}

fn take(members: &mut Vec<MemberMapping>, element_name: &str) -> Option<MemberMapping> {
    let index = members
        .iter()
        .position(|member| member.element_name == element_name)?;
    Some(members.remove(index))
}

/// Removes the response member matching `request` when both describe the same value.
fn take_identical(
    responses: &mut Vec<MemberMapping>,
    request: &MemberMapping,
) -> Option<MemberMapping> {
    let index = responses
        .iter()
        .position(|response| identical(request, response))?;
    Some(responses.remove(index))
}

fn parameter(member: MemberMapping, direction: ParameterDirection) -> ParameterDescriptor {
    ParameterDescriptor {
        name: identifiers::make_valid(&member.member_name),
        member_name: member.member_name,
        ty: member.ty,
        direction,
        needs_metadata: false,
    }
}

impl MethodSignature {
    /// Lays out the parameters in `parameter_order` first, then the remaining
    /// request members. The first remaining response member is returned; the
    /// rest become out parameters.
    ///
    /// Parameter names are unique case-insensitively and never collide with
    /// `method_name`.
    pub fn new(
        request: &MembersMapping,
        response: Option<&MembersMapping>,
        parameter_order: &[String],
        method_name: &str,
    ) -> Self {
        let mut requests = request.members.clone();
        let mut responses = response
            .map(|response| response.members.clone())
            .unwrap_or_default();
        let mut parameters = Vec::new();

        for name in parameter_order {
            match take(&mut requests, name) {
                Some(request) => {
                    let direction = match take_identical(&mut responses, &request) {
                        Some(_) => ParameterDirection::InOut,
                        None => ParameterDirection::In,
                    };
                    parameters.push(parameter(request, direction));
                }
                None => {
                    if let Some(response) = take(&mut responses, name) {
                        parameters.push(parameter(response, ParameterDirection::Out));
                    }
                }
            }
        }

        for request in requests {
            let direction = match take_identical(&mut responses, &request) {
                Some(_) => ParameterDirection::InOut,
                None => ParameterDirection::In,
            };
            parameters.push(parameter(request, direction));
        }

        let mut responses = responses.into_iter();
        let return_value = responses.next().map(|member| ReturnDescriptor {
            member_name: member.member_name,
            element_name: member.element_name,
            ty: member.ty,
        });
        parameters.extend(responses.map(|member| parameter(member, ParameterDirection::Out)));

        let mut names = CodeIdentifiers::new(false);
        names.add_reserved(method_name);
        for parameter in &mut parameters {
            parameter.name = names.add_unique(&parameter.name);
            parameter.needs_metadata = parameter.name != parameter.member_name;
        }

        Self {
            parameters,
            return_value,
        }
    }

    pub fn has_reference_parameters(&self) -> bool {
        self.parameters
            .iter()
            .any(|parameter| parameter.direction != ParameterDirection::In)
    }

    pub fn has_parameter_metadata(&self) -> bool {
        self.parameters
            .iter()
            .any(|parameter| parameter.needs_metadata)
    }

    /// The return value carries a wire name other than the conventional `<method>Result`.
    pub fn has_return_metadata(&self, method_name: &str) -> bool {
        self.return_value
            .as_ref()
            .map_or(false, |value| value.element_name != format!("{}Result", method_name))
    }

    /// Shape of the method used to share async handler types between methods.
    pub fn key(&self, method_name: &str) -> String {
        let return_type = self
            .return_value
            .as_ref()
            .map_or_else(|| "void".to_owned(), |value| value.ty.to_string());

        let parameters = self
            .parameters
            .iter()
            .map(|parameter| {
                let prefix = match parameter.direction {
                    ParameterDirection::In => "",
                    ParameterDirection::InOut => "ref ",
                    ParameterDirection::Out => "out ",
                };
                format!("{}{}", prefix, parameter.ty)
            })
            .collect::<Vec<_>>()
            .join(",");

        format!("{} {} ({})", return_type, method_name, parameters)
    }
}
