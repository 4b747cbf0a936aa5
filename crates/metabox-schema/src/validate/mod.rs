//! Schema validation orchestration and shared helpers.

pub mod naming;
pub mod uniqueness;

use crate::{
    error::ErrorTree,
    node::MetaBox,
    visit::{ValidateVisitor, VisitableNode},
};

/// Run full schema validation in a staged, deterministic order.
pub fn validate_schema(meta_box: &MetaBox) -> Result<(), ErrorTree> {
    // Phase 1: validate each node (structural + local invariants).
    let mut errors = validate_nodes(meta_box);

    // Phase 2: enforce box-wide invariants.
    validate_global(meta_box, &mut errors);

    errors.result()
}

// Validate all nodes via a visitor to retain route-aware error aggregation.
fn validate_nodes(meta_box: &MetaBox) -> ErrorTree {
    let mut visitor = ValidateVisitor::new();
    meta_box.accept(&mut visitor);

    visitor.errors
}

// Run global validation passes that require a full box view.
fn validate_global(meta_box: &MetaBox, errors: &mut ErrorTree) {
    uniqueness::validate_field_ids(meta_box, errors);
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::FieldSchema;

    fn sample_box() -> MetaBox {
        MetaBox {
            content_types: vec!["post".to_string()],
            fields: vec![
                FieldSchema::new("headline", "text"),
                FieldSchema::new("body", "textarea"),
            ],
            ..MetaBox::new("demo_box", "Demo")
        }
    }

    #[test]
    fn test_valid_box_passes() {
        assert!(validate_schema(&sample_box()).is_ok());
    }

    #[test]
    fn test_all_problems_collected_in_one_pass() {
        let mut bad = sample_box();
        bad.fields.push(FieldSchema::new("headline", "text")); // duplicate
        bad.fields.push(FieldSchema::new("", "text")); // empty ident

        let errs = validate_schema(&bad).unwrap_err();
        assert!(errs.len() >= 2);
    }

    #[test]
    fn test_nested_duplicate_is_routed() {
        let mut slides = FieldSchema::new("slides", "slider");
        slides.settings = vec![
            FieldSchema::new("link", "text"),
            FieldSchema::new("link", "upload"),
        ];

        let mut boxed = sample_box();
        boxed.fields.push(slides);

        let errs = validate_schema(&boxed).unwrap_err();
        let routed = errs
            .flatten()
            .iter()
            .any(|(route, msg)| route.contains("slides") && msg.contains("duplicate"));
        assert!(routed, "expected a routed duplicate error: {errs}");
    }
}
