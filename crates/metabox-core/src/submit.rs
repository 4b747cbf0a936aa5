//! Submission sanitization.
//!
//! Walks the raw submitted payload against the box schema and builds a
//! fresh sanitized value tree. The raw submission is never mutated, and a
//! field absent from the payload produces no entry; absence is what the
//! persistence step later reads as "cleared".

use crate::{
    SETTINGS_SUFFIX, expand,
    registry::{FieldTypeRegistry, UnknownFieldType},
};
use derive_more::{Deref, DerefMut};
use metabox_schema::{
    node::{FieldSchema, MetaBox},
    value::{Entry, Value},
};
use std::collections::BTreeMap;

///
/// Submission
/// Raw request payload: submitted key → raw value.
///

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct Submission(BTreeMap<String, Value>);

impl Submission {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Raw sub-settings payload submitted alongside a composite field.
    #[must_use]
    pub fn settings_payload(&self, field_id: &str) -> Option<&str> {
        self.0
            .get(&format!("{field_id}{SETTINGS_SUFFIX}"))
            .and_then(Value::as_text)
    }
}

///
/// SanitizedTree
/// Sanitized per-field values in schema order. Transient; mirrors the
/// schema shape and is consumed by the persistence step.
///

#[derive(Clone, Debug, Default, Deref, PartialEq)]
pub struct SanitizedTree(Vec<(String, Value)>);

impl SanitizedTree {
    #[must_use]
    pub fn value(&self, field_id: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, value)| value)
    }
}

///
/// SubmissionValidator
///

pub struct SubmissionValidator<'r> {
    registry: &'r FieldTypeRegistry,
}

impl<'r> SubmissionValidator<'r> {
    #[must_use]
    pub const fn new(registry: &'r FieldTypeRegistry) -> Self {
        Self { registry }
    }

    /// Sanitize every submitted field of the box.
    pub fn validate(
        &self,
        meta_box: &MetaBox,
        raw: &Submission,
    ) -> Result<SanitizedTree, UnknownFieldType> {
        let mut tree = Vec::new();

        for field in &meta_box.fields {
            if let Some(value) = raw.get(&field.id) {
                let sanitized = self.sanitize_field(field, value, raw)?;
                tree.push((field.id.clone(), sanitized));
            }
        }

        Ok(SanitizedTree(tree))
    }

    /// Sanitize one field's raw value. Composite fields expand their
    /// effective sub-schema first, sanitize each submitted entry's
    /// sub-values in submitted order, then run the composite-level
    /// validator over the reassembled entries.
    pub fn sanitize_field(
        &self,
        field: &FieldSchema,
        raw_value: &Value,
        raw: &Submission,
    ) -> Result<Value, UnknownFieldType> {
        let handler = self.registry.handler(&field.ty)?;

        if !handler.composite {
            return Ok((handler.validator)(raw_value.clone(), &field.id));
        }

        let settings =
            expand::effective_settings(&field.ty, raw.settings_payload(&field.id));

        let entries = match raw_value {
            Value::Entries(entries) => entries.as_slice(),
            _ => &[],
        };

        let mut sanitized_entries = Vec::with_capacity(entries.len());
        for entry in entries {
            let mut clean = Entry::new();
            for sub in &settings {
                if let Some(sub_value) = entry.get(&sub.id) {
                    let validator = self.registry.validator_for(&sub.ty)?;
                    clean.insert(sub.id.clone(), validator(sub_value.clone(), &sub.id));
                }
            }
            sanitized_entries.push(clean);
        }

        Ok((handler.validator)(Value::Entries(sanitized_entries), &field.id))
    }
}

///
/// TESTS
///
