//! Composite sub-schema expansion.
//!
//! Composite fields are mini-schemas whose shape can be customized per
//! instance at configuration time and must be re-derived at submission
//! time. The expanded sequence always starts with the implicit title
//! sub-field; a malformed submitted payload falls through to the type's
//! built-in defaults and never errors.

use crate::builtin::{default_settings, title_setting};
use metabox_schema::node::FieldSchema;

/// Effective sub-schema at submission time: implicit title + the submitted
/// sub-settings payload when present and well-formed, else the type's
/// built-in defaults.
#[must_use]
pub fn effective_settings(ty: &str, submitted: Option<&str>) -> Vec<FieldSchema> {
    let custom = submitted.and_then(parse_settings);
    with_title(custom.unwrap_or_else(|| default_settings(ty)))
}

/// Effective sub-schema at render time: implicit title + the field's
/// declared sub-schema, else the type's built-in defaults.
#[must_use]
pub fn declared_settings(field: &FieldSchema) -> Vec<FieldSchema> {
    let base = if field.settings.is_empty() {
        default_settings(&field.ty)
    } else {
        field.settings.clone()
    };
    with_title(base)
}

// Malformed or empty payloads are treated as absent.
fn parse_settings(raw: &str) -> Option<Vec<FieldSchema>> {
    serde_json::from_str::<Vec<FieldSchema>>(raw)
        .ok()
        .filter(|settings| !settings.is_empty())
}

// The implicit title wins over a custom "title" declaration; keeping both
// would duplicate the id within the group.
fn with_title(base: Vec<FieldSchema>) -> Vec<FieldSchema> {
    let mut merged = vec![title_setting()];
    merged.extend(base.into_iter().filter(|f| f.id != "title"));
    merged
}

///
/// TESTS
///
