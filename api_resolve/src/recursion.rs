//! Labels fields whose type graph loops back to their enclosing message.
//!
//! A value-typed rendition of a self-referential composite has infinite
//! size; the `recursive` flag is the per-field signal telling the emission
//! layer exactly where heap indirection is required. Cycle traversal runs
//! through map entries as well, since a map's synthetic value field is an
//! ordinary message-typed edge.

use api_types::{Field, Model};
use std::collections::HashSet;

/// Sets `Field::recursive` on every field of every registered message.
/// Read-only apart from writing the derived flag.
pub fn label_recursive_fields(model: &mut Model) {
    let ids: Vec<String> = model.state.messages.keys().cloned().collect();
    for id in ids {
        let flags: Vec<bool> = match model.message(&id) {
            Some(message) => message
                .fields
                .iter()
                .map(|field| field_is_recursive(model, &id, field))
                .collect(),
            None => continue,
        };
        if let Some(message) = model.state.messages.get_mut(&id) {
            for (field, recursive) in message.fields.iter_mut().zip(flags) {
                field.recursive = recursive;
            }
        }
    }
}

/// True iff following message-typed field edges from the field's referenced
/// type reaches `enclosing` again. Explicit-stack DFS with a per-search
/// visited set, so cycles elsewhere in the graph terminate without marking
/// the field.
fn field_is_recursive(model: &Model, enclosing: &str, field: &Field) -> bool {
    let Some(target) = field.typez.message_type_id() else {
        /* Enum and scalar fields are never recursive */
        return false;
    };
    if target == enclosing {
        return true;
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![target];
    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(message) = model.message(id) else {
            continue;
        };
        for next in message
            .fields
            .iter()
            .filter_map(|field| field.typez.message_type_id())
        {
            if next == enclosing {
                return true;
            }
            if !visited.contains(next) {
                stack.push(next);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::{FieldType, Message, Scalar};

    fn field(message_id: &str, name: &str, typez: FieldType) -> Field {
        Field {
            name: name.to_string(),
            id: format!("{message_id}.{name}"),
            documentation: None,
            typez,
            repeated: false,
            optional: false,
            is_oneof: false,
            group: None,
            recursive: false,
        }
    }

    fn message_ref(type_id: &str) -> FieldType {
        FieldType::Message {
            type_id: type_id.to_string(),
        }
    }

    fn message(id: &str, fields: Vec<Field>) -> Message {
        Message {
            id: id.to_string(),
            name: id.rsplit('.').next().unwrap_or(id).to_string(),
            fields,
            ..Default::default()
        }
    }

    fn recursive_flags(model: &Model, id: &str) -> Vec<bool> {
        model
            .message(id)
            .unwrap()
            .fields
            .iter()
            .map(|field| field.recursive)
            .collect()
    }

    #[test]
    fn direct_self_reference_is_recursive() {
        let mut model = Model::new("test.api");
        model.add_message(message(
            ".test.Tree",
            vec![
                field(".test.Tree", "child", message_ref(".test.Tree")),
                field(".test.Tree", "label", FieldType::Scalar(Scalar::String)),
            ],
        ));
        label_recursive_fields(&mut model);
        assert_eq!(recursive_flags(&model, ".test.Tree"), vec![true, false]);
    }

    #[test]
    fn indirect_cycle_is_recursive_on_both_ends() {
        let mut model = Model::new("test.api");
        model.add_message(message(
            ".test.A",
            vec![field(".test.A", "b", message_ref(".test.B"))],
        ));
        model.add_message(message(
            ".test.B",
            vec![field(".test.B", "a", message_ref(".test.A"))],
        ));
        label_recursive_fields(&mut model);
        assert_eq!(recursive_flags(&model, ".test.A"), vec![true]);
        assert_eq!(recursive_flags(&model, ".test.B"), vec![true]);
    }

    /// A message pointing into a cycle it is not a member of never loops
    /// back to itself, so its field stays non-recursive.
    #[test]
    fn reaching_a_cycle_is_not_recursive() {
        let mut model = Model::new("test.api");
        model.add_message(message(
            ".test.Outside",
            vec![field(".test.Outside", "a", message_ref(".test.A"))],
        ));
        model.add_message(message(
            ".test.A",
            vec![field(".test.A", "b", message_ref(".test.B"))],
        ));
        model.add_message(message(
            ".test.B",
            vec![field(".test.B", "a", message_ref(".test.A"))],
        ));
        label_recursive_fields(&mut model);
        assert_eq!(recursive_flags(&model, ".test.Outside"), vec![false]);
    }

    #[test]
    fn cycle_through_map_value_field_is_recursive() {
        let mut model = Model::new("test.api");
        model.add_message(message(
            ".test.Node",
            vec![{
                let mut map_field =
                    field(".test.Node", "children", message_ref(".test.Node.ChildrenEntry"));
                map_field.repeated = true;
                map_field
            }],
        ));
        let mut entry = message(
            ".test.Node.ChildrenEntry",
            vec![
                field(
                    ".test.Node.ChildrenEntry",
                    "key",
                    FieldType::Scalar(Scalar::String),
                ),
                field(".test.Node.ChildrenEntry", "value", message_ref(".test.Node")),
            ],
        );
        entry.parent = Some(".test.Node".to_string());
        entry.is_map = true;
        model.add_message(entry);

        label_recursive_fields(&mut model);
        assert_eq!(recursive_flags(&model, ".test.Node"), vec![true]);
        /* The synthetic entry's value field loops back through Node too */
        assert_eq!(
            recursive_flags(&model, ".test.Node.ChildrenEntry"),
            vec![false, true]
        );
    }

    #[test]
    fn acyclic_chain_stays_unlabeled() {
        let mut model = Model::new("test.api");
        model.add_message(message(
            ".test.Top",
            vec![field(".test.Top", "mid", message_ref(".test.Mid"))],
        ));
        model.add_message(message(
            ".test.Mid",
            vec![field(".test.Mid", "leaf", FieldType::Scalar(Scalar::Int64))],
        ));
        label_recursive_fields(&mut model);
        assert_eq!(recursive_flags(&model, ".test.Top"), vec![false]);
        assert_eq!(recursive_flags(&model, ".test.Mid"), vec![false]);
    }
}
