use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};

/// Scalar (non-composite) field types, mirroring the set produced by the
/// descriptor translators.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum Scalar {
    Double,
    Float,
    Int32,
    Int64,
    UInt32,
    UInt64,
    SInt32,
    SInt64,
    Fixed32,
    Fixed64,
    SFixed32,
    SFixed64,
    Bool,
    String,
    Bytes,
}

/// The type of a field: exactly one of scalar, enum, or message.
///
/// Enum and message variants carry the dotted ID of the referenced type; the
/// cross-referencer verifies the ID resolves in the registry.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Scalar(Scalar),
    Enum { type_id: String },
    Message { type_id: String },
}

impl FieldType {
    /// The referenced type ID, for enum- and message-typed fields.
    pub fn type_id(&self) -> Option<&str> {
        match self {
            FieldType::Scalar(_) => None,
            FieldType::Enum { type_id } | FieldType::Message { type_id } => Some(type_id),
        }
    }

    /// The referenced message ID, if this field is message-typed.
    pub fn message_type_id(&self) -> Option<&str> {
        match self {
            FieldType::Message { type_id } => Some(type_id),
            _ => None,
        }
    }

    pub fn is_message(&self) -> bool {
        matches!(self, FieldType::Message { .. })
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Field {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub documentation: Option<String>,
    pub typez: FieldType,
    #[serde(default)]
    pub repeated: bool,
    #[serde(default)]
    pub optional: bool,
    /* Set by the translator when the field belongs to a one-of group */
    #[serde(default)]
    pub is_oneof: bool,
    /* Owning one-of name; populated by cross-referencing */
    #[serde(default)]
    pub group: Option<String>,
    /* Whether the field's type graph loops back to its enclosing message;
     * populated by the recursion labeler */
    #[serde(default)]
    pub recursive: bool,
}

/// A named group of mutually exclusive fields owned by one message.
/// `fields` holds the local names of the member fields.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct OneOf {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub documentation: Option<String>,
    pub fields: Vec<String>,
}

/// A tagged reference in a message's local-name index.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum MessageElement {
    /* Local field name */
    Field(String),
    /* Local one-of name */
    OneOf(String),
    /* Nested message ID */
    Message(String),
    /* Nested enum ID */
    Enum(String),
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Message {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub documentation: Option<String>,
    /* Enclosing message ID; None for top-level messages */
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub oneofs: Vec<OneOf>,
    /* Nested message/enum IDs, resolved through the registry */
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub enums: Vec<String>,
    /* True for the synthetic key/value wrapper messages backing map fields */
    #[serde(default)]
    pub is_map: bool,
    /* Local name -> element index; populated by cross-referencing */
    #[serde(default)]
    pub elements: IndexMap<String, MessageElement>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct EnumValue {
    pub name: String,
    pub number: i64,
    #[serde(default)]
    pub documentation: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Enum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub documentation: Option<String>,
    /* Enclosing message ID; None for top-level enums */
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub default_host: Option<String>,
    /* Method IDs, resolved through the registry */
    #[serde(default)]
    pub methods: Vec<String>,
}

/// Long-running-operation metadata attached to a method. Both IDs must
/// resolve to registered messages.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct OperationInfo {
    pub metadata_type_id: String,
    pub response_type_id: String,
}

/// One segment of an HTTP path template.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum PathSegment {
    Literal(String),
    /* A dotted field path into the request message */
    Variable(Vec<String>),
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct PathBinding {
    pub verb: String,
    pub path_template: Vec<PathSegment>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PathInfo {
    pub bindings: Vec<PathBinding>,
}

/// One candidate extraction pattern for a routing key. `field_path` is the
/// dotted path into the request message the value is read from; `pattern`
/// holds the template segments the extracted value must match.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct RoutingVariant {
    pub field_path: Vec<String>,
    #[serde(default)]
    pub pattern: Vec<String>,
}

/// A dynamic-routing key with its priority-ordered candidate variants.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct RoutingInfo {
    pub name: String,
    pub variants: Vec<RoutingVariant>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Method {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub documentation: Option<String>,
    pub input_type_id: String,
    pub output_type_id: String,
    /* Owning service ID; populated by cross-referencing */
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub operation_info: Option<OperationInfo>,
    #[serde(default)]
    pub path_info: Option<PathInfo>,
    #[serde(default)]
    pub routing: Vec<RoutingInfo>,
}
