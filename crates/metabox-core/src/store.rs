//! In-memory collaborator implementations.
//!
//! `MemoryAttributeStore` doubles as the write-counting fake the test suite
//! uses to prove redundant saves never touch storage.

use crate::interface::{AttributeStore, ItemId, OriginVerifier};
use metabox_schema::value::Value;
use std::collections::BTreeMap;

///
/// MemoryAttributeStore
///

#[derive(Clone, Debug, Default)]
pub struct MemoryAttributeStore {
    slots: BTreeMap<(ItemId, String), Value>,
    writes: usize,
    deletes: usize,
}

impl MemoryAttributeStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            writes: 0,
            deletes: 0,
        }
    }

    /// Number of `set` calls observed since construction.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Number of `delete` calls observed since construction.
    #[must_use]
    pub const fn deletes(&self) -> usize {
        self.deletes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl AttributeStore for MemoryAttributeStore {
    fn get(&self, item: ItemId, field_id: &str) -> Option<Value> {
        self.slots.get(&(item, field_id.to_string())).cloned()
    }

    fn set(&mut self, item: ItemId, field_id: &str, value: Value) {
        self.writes += 1;
        self.slots.insert((item, field_id.to_string()), value);
    }

    fn delete(&mut self, item: ItemId, field_id: &str) {
        self.deletes += 1;
        self.slots.remove(&(item, field_id.to_string()));
    }
}

///
/// StaticOriginVerifier
///
/// Deterministic per-box tokens derived from a host-held seed. Suitable for
/// single-process hosts and tests; production hosts bring their own
/// verifier.
///

#[derive(Clone, Debug)]
pub struct StaticOriginVerifier {
    seed: String,
}

impl StaticOriginVerifier {
    #[must_use]
    pub fn new(seed: impl Into<String>) -> Self {
        Self { seed: seed.into() }
    }
}

impl OriginVerifier for StaticOriginVerifier {
    fn issue_token(&self, box_id: &str) -> String {
        format!("{}:{box_id}", self.seed)
    }

    fn verify(&self, token: &str, box_id: &str) -> bool {
        token == self.issue_token(box_id)
    }
}

///
/// TESTS
///
