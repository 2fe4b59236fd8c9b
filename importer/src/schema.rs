//! Maps message parts and header parts onto the schema tables of the model.

use soapbind_wsdl::types::{
    DefinitionSet, ElementType, Field, MessagePart, QualifiedName, SoapBodyBinding, SoapStyle,
    SoapUse, Type, TypeKind,
};

use crate::{descriptor::TypeMapping, error::Error};

const ANY_TYPE: &str = "anyType";
const MAX_ALIAS_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberMapping {
    pub member_name: String,
    pub element_name: String,
    pub namespace: Option<String>,
    pub ty: QualifiedName,
}

/// The members carried by one request or response message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembersMapping {
    pub element_name: String,
    pub namespace: Option<String>,
    pub members: Vec<MemberMapping>,
}

fn resolve_alias<'d>(definitions: &'d DefinitionSet, name: &QualifiedName) -> Option<&'d Type> {
    let mut current = definitions.get_type(name)?;

    for _ in 0..MAX_ALIAS_DEPTH {
        match &current.kind {
            TypeKind::Alias(target) => current = definitions.get_type(target)?,
            _ => return Some(current),
        }
    }

    None
}

/// Whether a type describes arbitrary content.
pub fn is_any_type(definitions: &DefinitionSet, ty: &QualifiedName) -> bool {
    if ty.is_xml_schema() {
        return ty.name == ANY_TYPE;
    }

    matches!(
        resolve_alias(definitions, ty),
        Some(Type {
            kind: TypeKind::Any,
            ..
        })
    )
}

pub fn element_mapping(
    definitions: &DefinitionSet,
    element: &QualifiedName,
) -> Result<TypeMapping, Error> {
    let declaration = definitions
        .get_element(element)
        .ok_or_else(|| Error::MissingElement(element.clone()))?;

    let ty = match &declaration.ty {
        ElementType::Named(ty) => ty.clone(),
        ElementType::Inline(_) => element.clone(),
    };

    Ok(TypeMapping {
        element_name: element.name.clone(),
        ty,
        encoded: false,
    })
}

pub fn type_mapping(definitions: &DefinitionSet, ty: &QualifiedName) -> Result<TypeMapping, Error> {
    if !ty.is_xml_schema() && definitions.get_type(ty).is_none() {
        return Err(Error::MissingType(ty.clone()));
    }

    Ok(TypeMapping {
        element_name: ty.name.clone(),
        ty: ty.clone(),
        encoded: true,
    })
}

fn wrapper_fields<'d>(
    definitions: &'d DefinitionSet,
    element: &QualifiedName,
) -> Result<&'d [Field], Error> {
    let declaration = definitions
        .get_element(element)
        .ok_or_else(|| Error::MissingElement(element.clone()))?;

    let kind = match &declaration.ty {
        ElementType::Inline(kind) => Some(kind),
        ElementType::Named(ty) => resolve_alias(definitions, ty).map(|ty| &ty.kind),
    };

    match kind {
        Some(TypeKind::Struct(fields)) => Ok(fields),
        _ => Err(Error::NotAWrapperElement(element.clone())),
    }
}

fn typed_member(part: &MessagePart, namespace: Option<&String>) -> MemberMapping {
    MemberMapping {
        member_name: part.name.clone(),
        element_name: part.name.clone(),
        namespace: namespace.cloned(),
        ty: part.ty.clone().unwrap_or_default(),
    }
}

fn element_member(
    definitions: &DefinitionSet,
    element: &QualifiedName,
) -> Result<MemberMapping, Error> {
    let mapping = element_mapping(definitions, element)?;

    Ok(MemberMapping {
        member_name: element.name.clone(),
        element_name: mapping.element_name,
        namespace: Some(element.namespace.clone()),
        ty: mapping.ty,
    })
}

/// Builds the member list of a message whose shape already passed the style check.
pub fn import_message(
    definitions: &DefinitionSet,
    message_name: &str,
    parts: &[&MessagePart],
    body: &SoapBodyBinding,
    style: SoapStyle,
    wrapped: bool,
) -> Result<MembersMapping, Error> {
    let encoded = body.use_.effective() == SoapUse::Encoded;

    if encoded || style == SoapStyle::Rpc {
        let parts = if encoded && wrapped { &parts[..1] } else { parts };

        return Ok(MembersMapping {
            element_name: message_name.to_owned(),
            namespace: body.namespace.clone(),
            members: parts
                .iter()
                .map(|part| typed_member(part, body.namespace.as_ref()))
                .collect(),
        });
    }

    if wrapped {
        let element = parts[0].element.clone().unwrap_or_default();
        let members = wrapper_fields(definitions, &element)?
            .iter()
            .map(|field| MemberMapping {
                member_name: field.name.clone(),
                element_name: field.name.clone(),
                namespace: Some(element.namespace.clone()),
                ty: field.ty.clone(),
            })
            .collect();

        return Ok(MembersMapping {
            element_name: element.name.clone(),
            namespace: Some(element.namespace.clone()),
            members,
        });
    }

    if let [part] = parts {
        if part.ty.is_some() {
            return Ok(MembersMapping {
                element_name: part.name.clone(),
                namespace: None,
                members: vec![typed_member(part, None)],
            });
        }
    }

    Ok(MembersMapping {
        element_name: String::new(),
        namespace: None,
        members: parts
            .iter()
            .filter_map(|part| part.element.as_ref())
            .map(|element| element_member(definitions, element))
            .collect::<Result<_, _>>()?,
    })
}
