//! End-to-end pipeline coverage: register boxes, render against a store,
//! submit payloads, and verify the persistence effects.

use metabox::prelude::*;
use metabox::core::{
    interface::{EditRequest, OpenPolicy},
    obs::{NullSink, SaveEvent, SaveSink},
    store::{MemoryAttributeStore, StaticOriginVerifier},
    stylesheet::MarkerStylesheet,
};
use metabox::core::interface::StylesheetResource;
use std::cell::RefCell;

fn demo_registry() -> BoxRegistry {
    let mut registry = BoxRegistry::new(FieldTypeRegistry::with_builtins());

    let mut meta_box = MetaBox::new("article_meta", "Article Settings");
    meta_box.content_types = vec!["post".to_string(), "page".to_string()];
    meta_box.fields = vec![
        FieldSchema {
            label: "Headline".to_string(),
            std: Some(Value::text("Untitled")),
            ..FieldSchema::new("headline", "text")
        },
        FieldSchema {
            label: "Accent".to_string(),
            ..FieldSchema::new("accent", "colorpicker")
        },
        FieldSchema {
            label: "Slides".to_string(),
            ..FieldSchema::new("slides", "slider")
        },
        FieldSchema {
            label: "Custom CSS".to_string(),
            ..FieldSchema::new("article_css", "css")
        },
    ];
    registry.register(meta_box).unwrap();
    registry
}

fn submission(origin: &StaticOriginVerifier) -> Submission {
    Submission::new().with("article_meta_nonce", origin.issue_token("article_meta"))
}

fn entry(pairs: &[(&str, &str)]) -> Entry {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::text(*v)))
        .collect()
}

///
/// RecordingSink
///

#[derive(Default)]
struct RecordingSink {
    events: RefCell<Vec<String>>,
}

impl SaveSink for RecordingSink {
    fn record(&self, event: SaveEvent<'_>) {
        self.events.borrow_mut().push(format!("{event:?}"));
    }
}

///
/// CountingSheet
///

#[derive(Default)]
struct CountingSheet {
    inner: MarkerStylesheet,
    upserts: Vec<String>,
    removes: Vec<String>,
}

impl StylesheetResource for CountingSheet {
    fn upsert_block(&mut self, key: &str, css: &str) {
        self.upserts.push(key.to_string());
        self.inner.upsert_block(key, css);
    }

    fn remove_block(&mut self, key: &str) {
        self.removes.push(key.to_string());
        self.inner.remove_block(key);
    }
}

#[test]
fn renders_declared_default_when_nothing_stored() {
    let registry = demo_registry();
    let origin = StaticOriginVerifier::new("seed");
    let store = MemoryAttributeStore::new();

    let views = registry
        .render_boxes("post", ItemId(1), &store, &origin)
        .unwrap();

    assert_eq!(views.len(), 1);
    let headline = &views[0].fields[0];
    assert_eq!(headline.value, Value::text("Untitled"));
    assert_eq!(views[0].token, origin.issue_token("article_meta"));
}

#[test]
fn view_models_serialize_for_the_template_layer() {
    let registry = demo_registry();
    let origin = StaticOriginVerifier::new("seed");
    let store = MemoryAttributeStore::new();

    let views = registry
        .render_boxes("post", ItemId(1), &store, &origin)
        .unwrap();
    let json = serde_json::to_value(&views[0].fields).unwrap();

    assert_eq!(json[0]["control"]["kind"], "text-input");
    assert_eq!(json[0]["value"], "Untitled");
    assert_eq!(json[0]["classes"], "format-settings");
}

#[test]
fn save_then_resave_writes_once() {
    let registry = demo_registry();
    let origin = StaticOriginVerifier::new("seed");
    let mut store = MemoryAttributeStore::new();
    let mut sheet = MarkerStylesheet::new();

    let payload = submission(&origin).with("headline", "Breaking");
    let ctx = EditRequest::new(payload, "post");

    let verdicts = registry
        .save_boxes(
            ItemId(1),
            &ctx,
            &origin,
            &OpenPolicy,
            &mut store,
            &mut sheet,
            &NullSink,
        )
        .unwrap();
    assert!(matches!(verdicts[0].1, SaveVerdict::Saved(_)));
    assert_eq!(store.writes(), 1);
    assert_eq!(store.get(ItemId(1), "headline"), Some(Value::text("Breaking")));

    // identical submission: sanitized value equals stored, no new write
    registry
        .save_boxes(
            ItemId(1),
            &ctx,
            &origin,
            &OpenPolicy,
            &mut store,
            &mut sheet,
            &NullSink,
        )
        .unwrap();
    assert_eq!(store.writes(), 1);
}

#[test]
fn clearing_a_field_deletes_only_when_previously_stored() {
    let registry = demo_registry();
    let origin = StaticOriginVerifier::new("seed");
    let mut store = MemoryAttributeStore::new();
    let mut sheet = MarkerStylesheet::new();

    // no prior value: empty submission is a field-level no-op
    let ctx = EditRequest::new(
        submission(&origin).with("headline", ""),
        "post",
    );
    registry
        .save_boxes(
            ItemId(1),
            &ctx,
            &origin,
            &OpenPolicy,
            &mut store,
            &mut sheet,
            &NullSink,
        )
        .unwrap();
    assert_eq!(store.writes(), 0);
    assert_eq!(store.deletes(), 0);

    // with a prior value the same submission deletes the attribute
    store.set(ItemId(1), "headline", Value::text("Old"));
    registry
        .save_boxes(
            ItemId(1),
            &ctx,
            &origin,
            &OpenPolicy,
            &mut store,
            &mut sheet,
            &NullSink,
        )
        .unwrap();
    assert_eq!(store.deletes(), 1);
    assert_eq!(store.get(ItemId(1), "headline"), None);
}

#[test]
fn origin_mismatch_rejects_the_whole_save() {
    let registry = demo_registry();
    let origin = StaticOriginVerifier::new("seed");
    let mut store = MemoryAttributeStore::new();
    let mut sheet = MarkerStylesheet::new();
    let sink = RecordingSink::default();

    let payload = Submission::new()
        .with("article_meta_nonce", "forged")
        .with("headline", "Injected")
        .with("article_css", "body { display: none; }");
    let ctx = EditRequest::new(payload, "post");

    let verdicts = registry
        .save_boxes(
            ItemId(1),
            &ctx,
            &origin,
            &OpenPolicy,
            &mut store,
            &mut sheet,
            &sink,
        )
        .unwrap();

    assert_eq!(
        verdicts[0].1,
        SaveVerdict::Skipped(SkipReason::OriginMismatch)
    );
    assert_eq!(store.writes(), 0);
    assert_eq!(store.deletes(), 0);
    assert_eq!(sheet.text(), "");
    assert!(sink.events.borrow()[0].contains("OriginMismatch"));
}

#[test]
fn internal_request_contexts_skip_saving() {
    let registry = demo_registry();
    let origin = StaticOriginVerifier::new("seed");
    let mut store = MemoryAttributeStore::new();
    let mut sheet = MarkerStylesheet::new();

    for (reason, tweak) in [
        (SkipReason::QuickEdit, 0),
        (SkipReason::Autosave, 1),
        (SkipReason::Revision, 2),
    ] {
        let mut ctx = EditRequest::new(
            submission(&origin).with("headline", "x"),
            "post",
        );
        match tweak {
            0 => ctx.quick_edit = true,
            1 => ctx.autosave = true,
            _ => ctx.revision = true,
        }

        let verdicts = registry
            .save_boxes(
                ItemId(1),
                &ctx,
                &origin,
                &OpenPolicy,
                &mut store,
                &mut sheet,
                &NullSink,
            )
            .unwrap();
        assert_eq!(verdicts[0].1, SaveVerdict::Skipped(reason));
    }

    assert_eq!(store.writes(), 0);
}

#[test]
fn denied_principal_cannot_write() {
    struct DenyAll;
    impl metabox::core::interface::AuthorizationCheck for DenyAll {
        fn can_edit(&self, _item: ItemId, _content_type: &str) -> bool {
            false
        }
    }

    let registry = demo_registry();
    let origin = StaticOriginVerifier::new("seed");
    let mut store = MemoryAttributeStore::new();
    let mut sheet = MarkerStylesheet::new();

    let ctx = EditRequest::new(
        submission(&origin).with("headline", "x"),
        "page",
    );
    let verdicts = registry
        .save_boxes(
            ItemId(1),
            &ctx,
            &origin,
            &DenyAll,
            &mut store,
            &mut sheet,
            &NullSink,
        )
        .unwrap();

    assert_eq!(
        verdicts[0].1,
        SaveVerdict::Skipped(SkipReason::AuthorizationDenied)
    );
    assert_eq!(store.writes(), 0);
}

#[test]
fn repeatable_entries_save_in_submitted_order() {
    let registry = demo_registry();
    let origin = StaticOriginVerifier::new("seed");
    let mut store = MemoryAttributeStore::new();
    let mut sheet = MarkerStylesheet::new();

    let payload = submission(&origin).with(
        "slides",
        Value::Entries(vec![
            entry(&[("title", "First"), ("link", "a.html")]),
            entry(&[("title", "Second"), ("link", "b.html")]),
        ]),
    );
    let ctx = EditRequest::new(payload, "post");

    registry
        .save_boxes(
            ItemId(1),
            &ctx,
            &origin,
            &OpenPolicy,
            &mut store,
            &mut sheet,
            &NullSink,
        )
        .unwrap();

    let Some(Value::Entries(entries)) = store.get(ItemId(1), "slides") else {
        panic!("expected stored entries");
    };
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], Value::text("First"));
    assert_eq!(entries[1]["title"], Value::text("Second"));
}

#[test]
fn css_side_channel_runs_exactly_once_per_save() {
    let registry = demo_registry();
    let origin = StaticOriginVerifier::new("seed");
    let mut store = MemoryAttributeStore::new();
    let mut sheet = CountingSheet::default();

    let payload =
        submission(&origin).with("article_css", "h1 { color: teal; }");
    let ctx = EditRequest::new(payload, "post");

    registry
        .save_boxes(
            ItemId(1),
            &ctx,
            &origin,
            &OpenPolicy,
            &mut store,
            &mut sheet,
            &NullSink,
        )
        .unwrap();

    assert_eq!(sheet.upserts, vec!["article_css".to_string()]);
    assert_eq!(sheet.inner.block("article_css"), Some("h1 { color: teal; }"));

    // clearing the field removes the block instead
    let ctx = EditRequest::new(
        submission(&origin).with("article_css", ""),
        "post",
    );
    registry
        .save_boxes(
            ItemId(1),
            &ctx,
            &origin,
            &OpenPolicy,
            &mut store,
            &mut sheet,
            &NullSink,
        )
        .unwrap();

    assert_eq!(sheet.upserts.len(), 1);
    assert!(sheet.removes.contains(&"article_css".to_string()));
    assert_eq!(sheet.inner.block("article_css"), None);
}

#[test]
fn registration_rejects_unknown_types_and_duplicates() {
    let mut registry = BoxRegistry::new(FieldTypeRegistry::with_builtins());

    let mut bad = MetaBox::new("bad_box", "Bad");
    bad.content_types = vec!["post".to_string()];
    bad.fields = vec![FieldSchema::new("x", "holo-deck")];
    assert!(registry.register(bad).is_err());

    let mut ok = MetaBox::new("ok_box", "Ok");
    ok.content_types = vec!["post".to_string()];
    ok.fields = vec![FieldSchema::new("x", "text")];
    registry.register(ok.clone()).unwrap();
    assert!(registry.register(ok).is_err());
}

#[test]
fn boxes_only_apply_to_their_content_types() {
    let registry = demo_registry();
    let origin = StaticOriginVerifier::new("seed");
    let store = MemoryAttributeStore::new();

    let views = registry
        .render_boxes("product", ItemId(1), &store, &origin)
        .unwrap();
    assert!(views.is_empty());
}
