use crate::types::{Enum, Message, Method, Service};
use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};

/// The kind of element a registered ID refers to.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Service,
    Method,
    Message,
    Enum,
}

/// The global ID -> node registry: four insertion-ordered maps, the single
/// source of truth for lookup. Every relationship in the IR (parent links,
/// field type references, a service's methods, nested children) is an ID
/// resolved through this registry.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct State {
    pub services: IndexMap<String, Service>,
    pub methods: IndexMap<String, Method>,
    pub messages: IndexMap<String, Message>,
    pub enums: IndexMap<String, Enum>,
}

/// The root of the IR: a named API surface owning top-level element ID
/// lists plus the registry.
///
/// Built once by the upstream translators, resolved once by the
/// cross-referencer, then read-only (plus derived-field writes) for every
/// downstream pass. Always passed explicitly; there is no hidden global.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub documentation: Option<String>,
    /* Top-level element IDs, in translator order */
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub enums: Vec<String>,
    #[serde(default)]
    pub state: State,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Model {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Registers a service and records it as a top-level element. The
    /// service's methods are registered separately via [`Model::add_method`].
    pub fn add_service(&mut self, service: Service) {
        self.services.push(service.id.clone());
        self.state.services.insert(service.id.clone(), service);
    }

    pub fn add_method(&mut self, method: Method) {
        self.state.methods.insert(method.id.clone(), method);
    }

    /// Registers a message; top-level (parent-less) messages are also
    /// recorded in the root element list. Nested messages are registered
    /// individually by the translator as it walks the containment tree.
    pub fn add_message(&mut self, message: Message) {
        if message.parent.is_none() {
            self.messages.push(message.id.clone());
        }
        self.state.messages.insert(message.id.clone(), message);
    }

    pub fn add_enum(&mut self, enumz: Enum) {
        if enumz.parent.is_none() {
            self.enums.push(enumz.id.clone());
        }
        self.state.enums.insert(enumz.id.clone(), enumz);
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.state.services.get(id)
    }

    pub fn method(&self, id: &str) -> Option<&Method> {
        self.state.methods.get(id)
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.state.messages.get(id)
    }

    pub fn enum_by_id(&self, id: &str) -> Option<&Enum> {
        self.state.enums.get(id)
    }

    /// Which registry an ID belongs to, if any.
    pub fn kind_of(&self, id: &str) -> Option<ElementKind> {
        if self.state.services.contains_key(id) {
            Some(ElementKind::Service)
        } else if self.state.methods.contains_key(id) {
            Some(ElementKind::Method)
        } else if self.state.messages.contains_key(id) {
            Some(ElementKind::Message)
        } else if self.state.enums.contains_key(id) {
            Some(ElementKind::Enum)
        } else {
            None
        }
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.kind_of(id).is_some()
    }

    /// Every registered ID, in registry order: services, methods, messages,
    /// enums.
    pub fn all_ids(&self) -> impl Iterator<Item = &str> {
        self.state
            .services
            .keys()
            .chain(self.state.methods.keys())
            .chain(self.state.messages.keys())
            .chain(self.state.enums.keys())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, FieldType, Scalar};

    #[test]
    fn registration_and_lookup() {
        let mut model = Model::new("test.api");

        model.add_message(Message {
            id: ".test.Parent".to_string(),
            name: "Parent".to_string(),
            messages: vec![".test.Parent.Child".to_string()],
            ..Default::default()
        });
        model.add_message(Message {
            id: ".test.Parent.Child".to_string(),
            name: "Child".to_string(),
            parent: Some(".test.Parent".to_string()),
            fields: vec![Field {
                name: "count".to_string(),
                id: ".test.Parent.Child.count".to_string(),
                documentation: None,
                typez: FieldType::Scalar(Scalar::Int32),
                repeated: false,
                optional: false,
                is_oneof: false,
                group: None,
                recursive: false,
            }],
            ..Default::default()
        });

        /* Only the parent-less message is a top-level element */
        assert_eq!(model.messages, vec![".test.Parent".to_string()]);
        assert_eq!(model.kind_of(".test.Parent.Child"), Some(ElementKind::Message));
        assert_eq!(model.kind_of(".test.Missing"), None);
        assert!(model.has_id(".test.Parent"));

        let child = model.message(".test.Parent.Child").unwrap();
        assert_eq!(child.fields[0].typez, FieldType::Scalar(Scalar::Int32));
    }

    #[test]
    fn all_ids_covers_every_registry() {
        let mut model = Model::new("test.api");
        model.add_service(Service {
            id: ".test.Svc".to_string(),
            name: "Svc".to_string(),
            documentation: None,
            default_host: None,
            methods: vec![".test.Svc.Get".to_string()],
        });
        model.add_method(Method {
            id: ".test.Svc.Get".to_string(),
            name: "Get".to_string(),
            documentation: None,
            input_type_id: ".test.Req".to_string(),
            output_type_id: ".test.Res".to_string(),
            service: None,
            operation_info: None,
            path_info: None,
            routing: Vec::new(),
        });
        model.add_message(Message {
            id: ".test.Req".to_string(),
            name: "Req".to_string(),
            ..Default::default()
        });
        model.add_enum(Enum {
            id: ".test.Color".to_string(),
            name: "Color".to_string(),
            documentation: None,
            parent: None,
            values: Vec::new(),
        });

        let ids: Vec<&str> = model.all_ids().collect();
        assert_eq!(ids, vec![".test.Svc", ".test.Svc.Get", ".test.Req", ".test.Color"]);
    }
}
