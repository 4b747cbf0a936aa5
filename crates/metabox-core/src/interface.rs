//! Collaborator boundaries owned by the hosting platform.
//!
//! The pipeline never reaches around these traits; a host wires its own
//! storage, auth, and request plumbing in, and tests substitute fakes.

use crate::{TOKEN_SUFFIX, submit::Submission};
use derive_more::Display;
use metabox_schema::value::Value;

///
/// ItemId
/// Host-assigned identity of one content item.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ItemId(pub u64);

///
/// AttributeStore
///
/// Key-value attribute storage, one slot per `(item, field id)`. Concurrency
/// control is the store's own business; the pipeline tolerates
/// last-writer-wins at this boundary.
///

pub trait AttributeStore {
    fn get(&self, item: ItemId, field_id: &str) -> Option<Value>;
    fn set(&mut self, item: ItemId, field_id: &str, value: Value);
    fn delete(&mut self, item: ItemId, field_id: &str);
}

///
/// OriginVerifier
/// Per-box request-origin tokens; submissions not carrying the box's own
/// token are rejected wholesale.
///

pub trait OriginVerifier {
    fn issue_token(&self, box_id: &str) -> String;
    fn verify(&self, token: &str, box_id: &str) -> bool;
}

///
/// AuthorizationCheck
/// Edit capability for the acting principal. Hosts distinguish page-edit
/// from generic edit capability via `content_type`.
///

pub trait AuthorizationCheck {
    fn can_edit(&self, item: ItemId, content_type: &str) -> bool;
}

///
/// RequestContext
///

pub trait RequestContext {
    /// Raw submitted key/value payload.
    fn payload(&self) -> &Submission;

    fn content_type(&self) -> &str;

    fn is_quick_edit(&self) -> bool;
    fn is_autosave(&self) -> bool;
    fn is_revision(&self) -> bool;

    /// Origin token submitted for a box, conventionally under
    /// `{box_id}_nonce` in the payload.
    fn token(&self, box_id: &str) -> Option<String> {
        self.payload()
            .get(&format!("{box_id}{TOKEN_SUFFIX}"))
            .and_then(Value::as_text)
            .map(ToString::to_string)
    }
}

///
/// StylesheetResource
///
/// Generated stylesheet side channel for `css` fields. Blocks are uniquely
/// delimited per key; upsert replaces in place so repeated saves never
/// accumulate duplicates.
///

pub trait StylesheetResource {
    fn upsert_block(&mut self, key: &str, css: &str);
    fn remove_block(&mut self, key: &str);
}

///
/// EditRequest
/// Plain-data `RequestContext` for hosts and tests.
///

#[derive(Clone, Debug, Default)]
pub struct EditRequest {
    pub payload: Submission,
    pub content_type: String,
    pub quick_edit: bool,
    pub autosave: bool,
    pub revision: bool,
}

impl EditRequest {
    #[must_use]
    pub fn new(payload: Submission, content_type: impl Into<String>) -> Self {
        Self {
            payload,
            content_type: content_type.into(),
            ..Self::default()
        }
    }
}

impl RequestContext for EditRequest {
    fn payload(&self) -> &Submission {
        &self.payload
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn is_quick_edit(&self) -> bool {
        self.quick_edit
    }

    fn is_autosave(&self) -> bool {
        self.autosave
    }

    fn is_revision(&self) -> bool {
        self.revision
    }
}

///
/// OpenPolicy
/// Authorization check that grants everything; the default for hosts that
/// gate editing upstream.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct OpenPolicy;

impl AuthorizationCheck for OpenPolicy {
    fn can_edit(&self, _item: ItemId, _content_type: &str) -> bool {
        true
    }
}
