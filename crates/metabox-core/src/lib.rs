//! Runtime for the meta-box pipeline: field-type registry, composite schema
//! expansion, render view-model construction, submission sanitization, and
//! diffed persistence against a key-value attribute store.
//!
//! Collaborators the hosting platform owns (attribute store, origin
//! verification, authorization, request context, generated stylesheet) are
//! expressed as traits in `interface`; in-memory implementations ship for
//! hosts and tests that need them.

pub mod builtin;
pub mod error;
pub mod expand;
pub mod interface;
pub mod obs;
pub mod persist;
pub mod registry;
pub mod render;
pub mod store;
pub mod stylesheet;
pub mod submit;

/// Payload key suffix carrying a composite field's customized sub-schema.
pub const SETTINGS_SUFFIX: &str = "_settings_array";

/// Payload key suffix carrying the box's origin-verification token.
pub const TOKEN_SUFFIX: &str = "_nonce";

///
/// Prelude
///
/// Domain vocabulary only; errors, pipelines, and helpers are imported from
/// their modules.
///

pub mod prelude {
    pub use crate::{
        interface::{
            AttributeStore, AuthorizationCheck, ItemId, OriginVerifier, RequestContext,
            StylesheetResource,
        },
        persist::{Action, SaveVerdict, SkipReason},
        registry::FieldTypeRegistry,
        render::{Control, ViewModel},
        submit::{SanitizedTree, Submission},
    };
    pub use metabox_schema::prelude::*;
}
