use crate::{
    MAX_FIELD_ID_LEN,
    error::ErrorTree,
    types::{Choice, MinMaxStep},
    validate::naming,
    value::Value,
    visit::{ValidateNode, VisitableNode, Visitor},
};
use serde::{Deserialize, Serialize};

///
/// FieldSchema
///
/// One declared input unit within a box. Composite types carry their own
/// nested sub-schema in `settings`; everything else describes how the field
/// renders and how its submitted value is sanitized.
///
/// Deserialization must tolerate sparse payloads: a composite sub-settings
/// blob may declare nothing beyond `id` and `type`.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FieldSchema {
    pub id: String,

    #[serde(rename = "type")]
    pub ty: String,

    pub label: String,
    pub desc: String,

    /// Declared default, applied when no stored value exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u16>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_max_step: Option<MinMaxStep>,

    pub class: String,

    /// Extra wrapper attributes, rendered in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,

    pub condition: String,

    /// Raw operator token; gated against the whitelist at encode time.
    pub operator: String,

    /// Nested sub-schema for composite (repeatable) types.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub settings: Vec<FieldSchema>,
}

impl FieldSchema {
    #[must_use]
    pub fn new(id: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ty: ty.into(),
            ..Self::default()
        }
    }
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self {
            id: String::new(),
            ty: String::new(),
            label: String::new(),
            desc: String::new(),
            std: None,
            rows: None,
            choices: Vec::new(),
            min_max_step: None,
            class: String::new(),
            attrs: Vec::new(),
            condition: String::new(),
            operator: "and".to_string(),
            settings: Vec::new(),
        }
    }
}

impl ValidateNode for FieldSchema {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        naming::check_ident(&self.id, MAX_FIELD_ID_LEN, &mut errs);

        if self.ty.is_empty() {
            errs.add("field type must not be empty");
        }

        errs.result()
    }
}

impl VisitableNode for FieldSchema {
    fn route_key(&self) -> String {
        self.id.clone()
    }

    fn drive<V: Visitor>(&self, v: &mut V) {
        for node in &self.settings {
            node.accept(v);
        }
    }
}

///
/// TESTS
///
