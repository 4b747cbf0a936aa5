use crate::{
    MAX_BOX_ID_LEN,
    error::ErrorTree,
    node::FieldSchema,
    types::{Placement, Priority},
    validate::naming,
    visit::{ValidateNode, VisitableNode, Visitor},
};
use serde::{Deserialize, Serialize};

///
/// MetaBox
///
/// A named collection of fields attached to one or more content-type edit
/// screens. Built once at registration time and immutable thereafter; the
/// registering module owns it.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct MetaBox {
    pub id: String,
    pub title: String,
    pub desc: String,

    /// Content types this box attaches to (`post`, `page`, ...).
    pub content_types: Vec<String>,

    pub placement: Placement,
    pub priority: Priority,

    pub fields: Vec<FieldSchema>,
}

impl MetaBox {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn field(&self, id: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn targets(&self, content_type: &str) -> bool {
        self.content_types.iter().any(|ct| ct == content_type)
    }
}

impl ValidateNode for MetaBox {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        naming::check_ident(&self.id, MAX_BOX_ID_LEN, &mut errs);

        if self.content_types.is_empty() {
            errs.add("box must target at least one content type");
        }

        errs.result()
    }
}

impl VisitableNode for MetaBox {
    fn route_key(&self) -> String {
        self.id.clone()
    }

    fn drive<V: Visitor>(&self, v: &mut V) {
        for node in &self.fields {
            node.accept(v);
        }
    }
}
