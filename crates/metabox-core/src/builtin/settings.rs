//! Built-in default sub-schemas for composite field types.
//!
//! Used whenever a composite field declares no custom sub-schema, or its
//! submitted sub-settings payload is absent or malformed.

use metabox_schema::node::FieldSchema;

/// Implicit title sub-field prepended to every composite sub-schema so each
/// entry stays addressable and labelable.
#[must_use]
pub fn title_setting() -> FieldSchema {
    FieldSchema {
        label: "Title".to_string(),
        class: "metabox-setting-title".to_string(),
        ..FieldSchema::new("title", "text")
    }
}

/// Default sub-schema for a composite type tag; empty for non-composites.
#[must_use]
pub fn default_settings(ty: &str) -> Vec<FieldSchema> {
    match ty {
        "slider" => vec![
            FieldSchema {
                label: "Image".to_string(),
                ..FieldSchema::new("image", "upload")
            },
            FieldSchema {
                label: "Link".to_string(),
                ..FieldSchema::new("link", "text")
            },
            FieldSchema {
                label: "Description".to_string(),
                ..FieldSchema::new("description", "textarea-simple")
            },
        ],
        "list-item" => vec![FieldSchema {
            label: "Description".to_string(),
            ..FieldSchema::new("description", "textarea-simple")
        }],
        "social-links" => vec![
            FieldSchema {
                label: "Name".to_string(),
                ..FieldSchema::new("name", "text")
            },
            FieldSchema {
                label: "Link".to_string(),
                ..FieldSchema::new("href", "upload")
            },
        ],
        _ => vec![],
    }
}
