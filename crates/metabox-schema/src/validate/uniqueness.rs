//! Box-wide identifier uniqueness.
//!
//! Field ids key storage attributes, so duplicates silently shadow each
//! other at save time. Uniqueness is scoped: top-level ids within the box,
//! sub-field ids within their owning composite group.

use crate::{error::ErrorTree, node::{FieldSchema, MetaBox}};
use std::collections::BTreeSet;

/// Flag duplicate field ids at every nesting level.
pub fn validate_field_ids(meta_box: &MetaBox, errors: &mut ErrorTree) {
    check_level(&meta_box.fields, &meta_box.id, errors);

    for field in &meta_box.fields {
        if !field.settings.is_empty() {
            let route = format!("{}.{}", meta_box.id, field.id);
            check_level(&field.settings, &route, errors);
        }
    }
}

fn check_level(fields: &[FieldSchema], route: &str, errors: &mut ErrorTree) {
    let mut seen = BTreeSet::new();

    for field in fields {
        if field.id.is_empty() {
            // Empty ids are flagged by the node pass; skip the set.
            continue;
        }
        if !seen.insert(field.id.as_str()) {
            errors.add_at(route, format!("duplicate field id '{}'", field.id));
        }
    }
}
