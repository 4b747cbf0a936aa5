use metabox_schema::{error::ErrorTree, node::MetaBox, value::Value};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

use crate::render::Control;
use metabox_schema::node::FieldSchema;

///
/// UnknownFieldType
///
/// A schema referenced a type tag with no registered handler. Fatal at
/// registration and pipeline entry; a field is never silently dropped.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown field type: '{ty}'")]
pub struct UnknownFieldType {
    pub ty: String,
}

/// Sanitize one raw value. Total: coerce or reject-to-empty, never fail.
pub type ValidatorFn = fn(Value, &str) -> Value;

/// Build the render control for a field and its resolved value.
pub type RendererFn = fn(&FieldSchema, &Value) -> Control;

///
/// FieldTypeHandler
///

#[derive(Clone, Copy)]
pub struct FieldTypeHandler {
    pub validator: ValidatorFn,
    pub renderer: RendererFn,

    /// Composite types hold an ordered sequence of sub-value entries and
    /// expand an effective sub-schema before sanitization.
    pub composite: bool,
}

impl FieldTypeHandler {
    #[must_use]
    pub const fn simple(validator: ValidatorFn, renderer: RendererFn) -> Self {
        Self {
            validator,
            renderer,
            composite: false,
        }
    }

    #[must_use]
    pub const fn composite(validator: ValidatorFn, renderer: RendererFn) -> Self {
        Self {
            validator,
            renderer,
            composite: true,
        }
    }
}

///
/// FieldTypeRegistry
///
/// Tag → handler table. Populated at startup before any box registers and
/// shared immutably afterwards; there is no ambient global registry.
///

#[derive(Default)]
pub struct FieldTypeRegistry {
    handlers: BTreeMap<String, FieldTypeHandler>,
}

impl FieldTypeRegistry {
    /// Empty registry; hosts normally want [`Self::with_builtins`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Registry pre-populated with every built-in field type.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtin::install(&mut registry);
        registry
    }

    /// Register (or replace) a handler for a type tag.
    pub fn register(&mut self, ty: impl Into<String>, handler: FieldTypeHandler) {
        self.handlers.insert(ty.into(), handler);
    }

    pub fn handler(&self, ty: &str) -> Result<&FieldTypeHandler, UnknownFieldType> {
        self.handlers.get(ty).ok_or_else(|| UnknownFieldType {
            ty: ty.to_string(),
        })
    }

    pub fn validator_for(&self, ty: &str) -> Result<ValidatorFn, UnknownFieldType> {
        Ok(self.handler(ty)?.validator)
    }

    pub fn renderer_for(&self, ty: &str) -> Result<RendererFn, UnknownFieldType> {
        Ok(self.handler(ty)?.renderer)
    }

    #[must_use]
    pub fn contains(&self, ty: &str) -> bool {
        self.handlers.contains_key(ty)
    }

    #[must_use]
    pub fn is_composite(&self, ty: &str) -> bool {
        self.handlers.get(ty).is_some_and(|h| h.composite)
    }

    /// Fail on the first unregistered type in the box, nested sub-schemas
    /// included. Pipelines call this before touching any storage.
    pub fn ensure_known(&self, meta_box: &MetaBox) -> Result<(), UnknownFieldType> {
        for field in &meta_box.fields {
            self.handler(&field.ty)?;
            for sub in &field.settings {
                self.handler(&sub.ty)?;
            }
        }
        Ok(())
    }

    /// Registration-time check collecting every unregistered type with its
    /// schema route.
    pub fn check_box(&self, meta_box: &MetaBox) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        for field in &meta_box.fields {
            if !self.contains(&field.ty) {
                errs.add_at(
                    format!("{}.{}", meta_box.id, field.id),
                    format!("unknown field type: '{}'", field.ty),
                );
            }
            for sub in &field.settings {
                if !self.contains(&sub.ty) {
                    errs.add_at(
                        format!("{}.{}.{}", meta_box.id, field.id, sub.id),
                        format!("unknown field type: '{}'", sub.ty),
                    );
                }
            }
        }

        errs.result()
    }
}

///
/// TESTS
///
