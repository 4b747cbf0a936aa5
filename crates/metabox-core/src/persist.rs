//! Diffed persistence.
//!
//! The differ decides per field whether a sanitized value warrants a write,
//! a delete, or nothing; the pipeline wraps it with the save preconditions
//! and restricts the `css` stylesheet side channel to one idempotent write per
//! save.

use crate::{
    interface::{
        AttributeStore, AuthorizationCheck, ItemId, OriginVerifier, RequestContext,
        StylesheetResource,
    },
    obs::{SaveEvent, SaveSink},
    registry::{FieldTypeRegistry, UnknownFieldType},
    submit::SubmissionValidator,
};
use metabox_schema::{node::MetaBox, value::Value};
use std::fmt;

///
/// Action
/// Outcome of diffing one field's sanitized value against its stored one.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    NoOp,
    Write(Value),
    Delete,
}

/// `Write` iff the new value is non-empty and differs (strictly, type
/// included) from the stored one; `Delete` iff the new value is empty and a
/// non-empty stored value exists; otherwise `NoOp`.
#[must_use]
pub fn diff(old: Option<&Value>, new: Option<&Value>) -> Action {
    if let Some(new) = new
        && !new.is_empty()
    {
        if old == Some(new) {
            return Action::NoOp;
        }
        return Action::Write(new.clone());
    }

    if old.is_some_and(|v| !v.is_empty()) {
        return Action::Delete;
    }

    Action::NoOp
}

///
/// SkipReason
/// Why a save was a whole-box no-op. Checked in gate order.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkipReason {
    EmptyPayload,
    QuickEdit,
    Autosave,
    Revision,
    OriginMismatch,
    AuthorizationDenied,
}

impl SkipReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyPayload => "empty_payload",
            Self::QuickEdit => "quick_edit",
            Self::Autosave => "autosave",
            Self::Revision => "revision",
            Self::OriginMismatch => "origin_mismatch",
            Self::AuthorizationDenied => "authorization_denied",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// SaveReceipt
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SaveReceipt {
    pub writes: usize,
    pub deletes: usize,
    pub unchanged: usize,
}

///
/// SaveVerdict
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SaveVerdict {
    Saved(SaveReceipt),
    Skipped(SkipReason),
}

impl SaveVerdict {
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

///
/// SavePipeline
///

pub struct SavePipeline<'r> {
    registry: &'r FieldTypeRegistry,
    sink: &'r dyn SaveSink,
}

impl<'r> SavePipeline<'r> {
    #[must_use]
    pub const fn new(registry: &'r FieldTypeRegistry, sink: &'r dyn SaveSink) -> Self {
        Self { registry, sink }
    }

    /// Persist one box's submission for one content item.
    ///
    /// All preconditions are checked before any field is touched; a failed
    /// gate skips the save as a whole with zero storage mutations. The full
    /// payload is sanitized before the first write, so an unknown field
    /// type also aborts with zero mutations.
    pub fn save(
        &self,
        meta_box: &MetaBox,
        item: ItemId,
        ctx: &dyn RequestContext,
        origin: &dyn OriginVerifier,
        auth: &dyn AuthorizationCheck,
        store: &mut dyn AttributeStore,
        sheet: &mut dyn StylesheetResource,
    ) -> Result<SaveVerdict, UnknownFieldType> {
        if let Some(reason) = self.precondition_failure(meta_box, item, ctx, origin, auth) {
            self.sink.record(SaveEvent::Skipped {
                box_id: &meta_box.id,
                reason,
            });
            return Ok(SaveVerdict::Skipped(reason));
        }

        // Sanitize everything up front; storage stays untouched on error.
        let validator = SubmissionValidator::new(self.registry);
        let tree = validator.validate(meta_box, ctx.payload())?;

        let mut receipt = SaveReceipt::default();

        for field in &meta_box.fields {
            let new = tree.value(&field.id);

            // css side channel: exactly once per save, before the store
            // write, and only when the field was submitted at all.
            if field.ty == "css"
                && let Some(new) = new
            {
                match new.as_text() {
                    Some(css) if !css.is_empty() => sheet.upsert_block(&field.id, css),
                    _ => sheet.remove_block(&field.id),
                }
            }

            let old = store.get(item, &field.id);
            match diff(old.as_ref(), new) {
                Action::Write(value) => {
                    store.set(item, &field.id, value);
                    receipt.writes += 1;
                    self.sink.record(SaveEvent::FieldWritten {
                        box_id: &meta_box.id,
                        field_id: &field.id,
                    });
                }
                Action::Delete => {
                    store.delete(item, &field.id);
                    receipt.deletes += 1;
                    self.sink.record(SaveEvent::FieldDeleted {
                        box_id: &meta_box.id,
                        field_id: &field.id,
                    });
                }
                Action::NoOp => {
                    receipt.unchanged += 1;
                    self.sink.record(SaveEvent::FieldUnchanged {
                        box_id: &meta_box.id,
                        field_id: &field.id,
                    });
                }
            }
        }

        self.sink.record(SaveEvent::Finished {
            box_id: &meta_box.id,
            writes: receipt.writes,
            deletes: receipt.deletes,
            unchanged: receipt.unchanged,
        });

        Ok(SaveVerdict::Saved(receipt))
    }

    // Gate order mirrors the save entry checks of the legacy admin screen.
    fn precondition_failure(
        &self,
        meta_box: &MetaBox,
        item: ItemId,
        ctx: &dyn RequestContext,
        origin: &dyn OriginVerifier,
        auth: &dyn AuthorizationCheck,
    ) -> Option<SkipReason> {
        if ctx.payload().is_empty() {
            return Some(SkipReason::EmptyPayload);
        }
        if ctx.is_quick_edit() {
            return Some(SkipReason::QuickEdit);
        }
        if ctx.is_autosave() {
            return Some(SkipReason::Autosave);
        }
        if ctx.is_revision() {
            return Some(SkipReason::Revision);
        }

        let verified = ctx
            .token(&meta_box.id)
            .is_some_and(|token| origin.verify(&token, &meta_box.id));
        if !verified {
            return Some(SkipReason::OriginMismatch);
        }

        if !auth.can_edit(item, ctx.content_type()) {
            return Some(SkipReason::AuthorizationDenied);
        }

        None
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn txt(s: &str) -> Value {
        Value::text(s)
    }

    #[test]
    fn test_diff_truth_table() {
        // new non-empty, differs -> write
        assert_eq!(
            diff(Some(&txt("a")), Some(&txt("b"))),
            Action::Write(txt("b"))
        );
        // new non-empty, absent before -> write
        assert_eq!(diff(None, Some(&txt("b"))), Action::Write(txt("b")));
        // new equals old -> noop
        assert_eq!(diff(Some(&txt("a")), Some(&txt("a"))), Action::NoOp);
        // new empty, old present -> delete
        assert_eq!(diff(Some(&txt("a")), Some(&txt(""))), Action::Delete);
        assert_eq!(diff(Some(&txt("a")), None), Action::Delete);
        // new empty, nothing stored -> noop
        assert_eq!(diff(None, Some(&txt(""))), Action::NoOp);
        assert_eq!(diff(None, None), Action::NoOp);
        // empty old counts as absent
        assert_eq!(diff(Some(&txt("")), None), Action::NoOp);
    }

    #[test]
    fn test_diff_is_type_strict() {
        let old = Value::List(vec!["1".to_string()]);
        assert_eq!(
            diff(Some(&old), Some(&txt("1"))),
            Action::Write(txt("1"))
        );
    }

    proptest! {
        // Applying the same sanitized value twice yields Write then NoOp.
        #[test]
        fn prop_diff_idempotent(s in "\\PC{1,24}") {
            let new = txt(&s);
            let first = diff(None, Some(&new));
            prop_assert_eq!(first, Action::Write(new.clone()));

            let second = diff(Some(&new), Some(&new));
            prop_assert_eq!(second, Action::NoOp);
        }
    }
}
