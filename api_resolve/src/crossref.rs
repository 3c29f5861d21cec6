//! One pass turning identifier references into live links.
//!
//! Requires a fully populated registry. Mutates only derived fields on
//! existing nodes (field groups, message element indices, method service
//! back-handles), creates and removes nothing, and is idempotent on an
//! already-resolved model. Every check runs read-only before the first
//! write, so a failed pass aborts with the model exactly as it was; no
//! partially resolved IR is ever produced.

use crate::error::ResolveError;
use api_types::{Field, FieldType, MessageElement, Model};
use indexmap::IndexMap;
use std::collections::HashMap;

pub fn cross_reference(model: &mut Model) -> Result<(), ResolveError> {
    let messages = check_messages(model)?;
    let method_owners = check_methods(model)?;

    for entry in messages {
        if let Some(message) = model.state.messages.get_mut(&entry.id) {
            message.elements = entry.elements;
            for (field, group) in message.fields.iter_mut().zip(entry.field_groups) {
                field.group = group;
            }
        }
    }
    for (method_id, service_id) in method_owners {
        if let Some(method) = model.state.methods.get_mut(&method_id) {
            method.service = Some(service_id);
        }
    }

    Ok(())
}

/// Per-message derived state, computed read-only and applied afterwards.
struct ResolvedMessage {
    id: String,
    elements: IndexMap<String, MessageElement>,
    /* One group entry per field, in field order */
    field_groups: Vec<Option<String>>,
}

fn check_messages(model: &Model) -> Result<Vec<ResolvedMessage>, ResolveError> {
    let mut resolved = Vec::with_capacity(model.state.messages.len());

    for message in model.state.messages.values() {
        /* Every enum/message-typed field must resolve */
        for field in &message.fields {
            match &field.typez {
                FieldType::Scalar(_) => {}
                FieldType::Enum { type_id } => {
                    if !model.state.enums.contains_key(type_id) {
                        return Err(ResolveError::UnresolvedReference {
                            node: field.id.clone(),
                            target: type_id.clone(),
                        });
                    }
                }
                FieldType::Message { type_id } => {
                    if !model.state.messages.contains_key(type_id) {
                        return Err(ResolveError::UnresolvedReference {
                            node: field.id.clone(),
                            target: type_id.clone(),
                        });
                    }
                }
            }
        }

        /* A set parent must itself be registered */
        if let Some(parent) = &message.parent {
            if !model.state.messages.contains_key(parent) {
                return Err(ResolveError::UnresolvedReference {
                    node: message.id.clone(),
                    target: parent.clone(),
                });
            }
        }

        let mut groups: HashMap<&str, &str> = HashMap::new();
        for oneof in &message.oneofs {
            for field_name in &oneof.fields {
                groups.insert(field_name.as_str(), oneof.name.as_str());
            }
        }
        let field_groups = message
            .fields
            .iter()
            .map(|field| groups.get(field.name.as_str()).map(|name| (*name).to_string()))
            .collect();

        let mut elements = IndexMap::new();
        for field in &message.fields {
            elements.insert(field.name.clone(), MessageElement::Field(field.name.clone()));
        }
        for oneof in &message.oneofs {
            elements.insert(oneof.name.clone(), MessageElement::OneOf(oneof.name.clone()));
        }
        for nested_id in &message.messages {
            let nested = model.state.messages.get(nested_id).ok_or_else(|| {
                ResolveError::UnresolvedReference {
                    node: message.id.clone(),
                    target: nested_id.clone(),
                }
            })?;
            elements.insert(nested.name.clone(), MessageElement::Message(nested_id.clone()));
        }
        for nested_id in &message.enums {
            let nested = model.state.enums.get(nested_id).ok_or_else(|| {
                ResolveError::UnresolvedReference {
                    node: message.id.clone(),
                    target: nested_id.clone(),
                }
            })?;
            elements.insert(nested.name.clone(), MessageElement::Enum(nested_id.clone()));
        }

        resolved.push(ResolvedMessage {
            id: message.id.clone(),
            elements,
            field_groups,
        });
    }

    /* Enum parents must be registered too */
    for enumz in model.state.enums.values() {
        if let Some(parent) = &enumz.parent {
            if !model.state.messages.contains_key(parent) {
                return Err(ResolveError::UnresolvedReference {
                    node: enumz.id.clone(),
                    target: parent.clone(),
                });
            }
        }
    }

    Ok(resolved)
}

fn check_methods(model: &Model) -> Result<Vec<(String, String)>, ResolveError> {
    let mut owners: Vec<(String, String)> = Vec::new();
    for service in model.state.services.values() {
        for method_id in &service.methods {
            if !model.state.methods.contains_key(method_id) {
                return Err(ResolveError::UnresolvedReference {
                    node: service.id.clone(),
                    target: method_id.clone(),
                });
            }
            owners.push((method_id.clone(), service.id.clone()));
        }
    }

    for method in model.state.methods.values() {
        let mut targets = vec![&method.input_type_id, &method.output_type_id];
        if let Some(info) = &method.operation_info {
            targets.push(&info.metadata_type_id);
            targets.push(&info.response_type_id);
        }
        for target in targets {
            if !model.state.messages.contains_key(target) {
                return Err(ResolveError::UnresolvedReference {
                    node: method.id.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    Ok(owners)
}

/// Resolves a dotted field path against a message, component by component,
/// through the `elements` indices built by [`cross_reference`]. Intermediate
/// components must be message-typed fields; the final component may be any
/// field.
pub fn resolve_field_path<'a>(
    model: &'a Model,
    message_id: &str,
    path: &[String],
) -> Result<&'a Field, ResolveError> {
    let unresolved = || ResolveError::UnresolvedFieldPath {
        message: message_id.to_string(),
        path: path.join("."),
    };

    let mut message = model.message(message_id).ok_or_else(unresolved)?;
    let mut found: Option<&Field> = None;
    for (position, component) in path.iter().enumerate() {
        let field = match message.elements.get(component) {
            Some(MessageElement::Field(name)) => message
                .fields
                .iter()
                .find(|field| &field.name == name)
                .ok_or_else(unresolved)?,
            _ => return Err(unresolved()),
        };
        if position + 1 < path.len() {
            let type_id = field.typez.message_type_id().ok_or_else(unresolved)?;
            message = model.message(type_id).ok_or_else(unresolved)?;
        }
        found = Some(field);
    }
    found.ok_or_else(unresolved)
}
