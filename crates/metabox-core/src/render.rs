//! Render view-model construction.
//!
//! Walks a box schema, resolves each field's current stored value (falling
//! back to its declared default), and produces a view-model tree for the
//! external template layer. No HTML is assembled here; every node carries
//! renderer-agnostic hints only.

use crate::{
    expand,
    interface::{AttributeStore, ItemId},
    registry::{FieldTypeRegistry, UnknownFieldType},
};
use metabox_schema::{
    condition::VisibilityDirective,
    node::{FieldSchema, MetaBox},
    types::{Choice, MinMaxStep},
    value::Value,
};
use serde::Serialize;

/// Base CSS class carried by every field wrapper.
pub const BASE_CLASS: &str = "format-settings";

/// Suffix appended to each declared class token.
pub const CLASS_SUFFIX: &str = "-wrap";

///
/// Control
/// Typed render hint for one field; the template layer maps these to
/// concrete markup.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Control {
    TextInput,
    TextArea { rows: u16 },
    Select { choices: Vec<Choice> },
    Radio { choices: Vec<Choice> },
    CheckboxGroup { choices: Vec<Choice> },
    OnOff,
    NumericSlider { min_max_step: MinMaxStep },
    Upload,
    ColorPicker,
    DatePicker,
    CodeEditor { rows: u16 },
    StaticBlock { body: String },
    Repeatable,
}

///
/// ViewModel
/// One rendered field node. `children` holds one inner sequence per
/// composite entry, in stored order.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewModel {
    pub id: String,
    pub ty: String,
    pub label: String,
    pub show_label: bool,
    pub value: Value,
    pub desc: String,
    pub attrs: String,
    pub classes: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilityDirective>,

    pub control: Control,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Vec<ViewModel>>,
}

///
/// Renderer
///

pub struct Renderer<'r> {
    registry: &'r FieldTypeRegistry,
}

impl<'r> Renderer<'r> {
    #[must_use]
    pub const fn new(registry: &'r FieldTypeRegistry) -> Self {
        Self { registry }
    }

    /// Build the view-model sequence for one box and content item.
    pub fn render(
        &self,
        meta_box: &MetaBox,
        item: ItemId,
        store: &dyn AttributeStore,
    ) -> Result<Vec<ViewModel>, UnknownFieldType> {
        self.registry.ensure_known(meta_box)?;

        meta_box
            .fields
            .iter()
            .map(|field| self.render_field(field, store.get(item, &field.id)))
            .collect()
    }

    fn render_field(
        &self,
        field: &FieldSchema,
        stored: Option<Value>,
    ) -> Result<ViewModel, UnknownFieldType> {
        let handler = self.registry.handler(&field.ty)?;
        let value = filter_std_value(stored, field.std.as_ref());

        let children = if handler.composite {
            let settings = expand::declared_settings(field);
            let mut rows = Vec::new();

            if let Value::Entries(entries) = &value {
                for entry in entries {
                    let row = settings
                        .iter()
                        .map(|sub| self.render_field(sub, entry.get(&sub.id).cloned()))
                        .collect::<Result<Vec<_>, _>>()?;
                    rows.push(row);
                }
            }
            rows
        } else {
            Vec::new()
        };

        Ok(ViewModel {
            id: field.id.clone(),
            ty: field.ty.clone(),
            label: field.label.clone(),
            show_label: field.ty != "textblock" && !field.label.is_empty(),
            desc: field.desc.clone(),
            attrs: attrs_string(&field.attrs),
            classes: css_classes(&field.class),
            visibility: VisibilityDirective::encode(&field.condition, &field.operator),
            control: (handler.renderer)(field, &value),
            value,
            children,
        })
    }
}

/// Default-filling policy: a declared default replaces an empty stored
/// value verbatim for scalars; composite defaults merge structurally
/// (stored sub-values win, default entries fill missing sub-keys at the
/// same index).
#[must_use]
pub fn filter_std_value(stored: Option<Value>, std: Option<&Value>) -> Value {
    let Some(std) = std else {
        return stored.unwrap_or_default();
    };

    match stored {
        None => std.clone(),
        Some(value) if value.is_empty() => std.clone(),
        Some(Value::Entries(entries)) => {
            if let Value::Entries(defaults) = std {
                let merged = entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, entry)| {
                        let mut row = defaults.get(i).cloned().unwrap_or_default();
                        row.extend(entry);
                        row
                    })
                    .collect();
                Value::Entries(merged)
            } else {
                Value::Entries(entries)
            }
        }
        Some(value) => value,
    }
}

/// Filter out falsy attribute entries, format the rest as `key="value"`.
#[must_use]
pub fn attrs_string(attrs: &[(String, String)]) -> String {
    attrs
        .iter()
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Suffix each declared class token and join behind the base class.
#[must_use]
pub fn css_classes(class: &str) -> String {
    let mut out = BASE_CLASS.to_string();
    for token in class.split_whitespace() {
        out.push(' ');
        out.push_str(token);
        out.push_str(CLASS_SUFFIX);
    }
    out
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryAttributeStore;
    use metabox_schema::value::Entry;

    fn registry() -> FieldTypeRegistry {
        FieldTypeRegistry::with_builtins()
    }

    fn render_one(field: FieldSchema, store: &MemoryAttributeStore) -> ViewModel {
        let mut meta_box = MetaBox::new("demo", "Demo");
        meta_box.content_types = vec!["post".to_string()];
        meta_box.fields = vec![field];

        let reg = registry();
        Renderer::new(&reg)
            .render(&meta_box, ItemId(7), store)
            .unwrap()
            .remove(0)
    }

    #[test]
    fn test_default_applies_when_nothing_stored() {
        let field = FieldSchema {
            std: Some(Value::text("Untitled")),
            ..FieldSchema::new("headline", "text")
        };

        let vm = render_one(field, &MemoryAttributeStore::default());
        assert_eq!(vm.value, Value::text("Untitled"));
    }

    #[test]
    fn test_stored_value_wins_over_default() {
        let mut store = MemoryAttributeStore::default();
        store.set(ItemId(7), "headline", Value::text("Breaking"));

        let field = FieldSchema {
            std: Some(Value::text("Untitled")),
            ..FieldSchema::new("headline", "text")
        };

        let vm = render_one(field, &store);
        assert_eq!(vm.value, Value::text("Breaking"));
    }

    #[test]
    fn test_empty_stored_scalar_takes_default() {
        let mut store = MemoryAttributeStore::default();
        store.set(ItemId(7), "headline", Value::text(""));

        let field = FieldSchema {
            std: Some(Value::text("Untitled")),
            ..FieldSchema::new("headline", "text")
        };

        assert_eq!(render_one(field, &store).value, Value::text("Untitled"));
    }

    #[test]
    fn test_composite_default_merges_structurally() {
        let stored = Value::Entries(vec![Entry::from([(
            "title".to_string(),
            Value::text("Stored"),
        )])]);
        let std = Value::Entries(vec![Entry::from([
            ("title".to_string(), Value::text("Default")),
            ("link".to_string(), Value::text("https://example.com")),
        ])]);

        let merged = filter_std_value(Some(stored), Some(&std));
        let Value::Entries(entries) = merged else {
            panic!("expected entries");
        };
        assert_eq!(entries[0]["title"], Value::text("Stored"));
        assert_eq!(entries[0]["link"], Value::text("https://example.com"));
    }

    #[test]
    fn test_attrs_filter_and_format() {
        let attrs = vec![
            ("placeholder".to_string(), "Enter a title".to_string()),
            ("data-empty".to_string(), String::new()),
            (String::new(), "orphan".to_string()),
        ];
        assert_eq!(attrs_string(&attrs), r#"placeholder="Enter a title""#);
        assert_eq!(attrs_string(&[]), "");
    }

    #[test]
    fn test_css_class_suffixing() {
        assert_eq!(css_classes(""), "format-settings");
        assert_eq!(
            css_classes("hero wide"),
            "format-settings hero-wrap wide-wrap"
        );
    }

    #[test]
    fn test_textblock_suppresses_label() {
        let field = FieldSchema {
            label: "Ignored".to_string(),
            ..FieldSchema::new("note", "textblock")
        };
        let vm = render_one(field, &MemoryAttributeStore::default());
        assert!(!vm.show_label);

        let field = FieldSchema {
            label: "Shown".to_string(),
            ..FieldSchema::new("note2", "textblock-titled")
        };
        let vm = render_one(field, &MemoryAttributeStore::default());
        assert!(vm.show_label);
    }

    #[test]
    fn test_composite_children_follow_stored_entries() {
        let mut store = MemoryAttributeStore::default();
        store.set(
            ItemId(7),
            "slides",
            Value::Entries(vec![
                Entry::from([("title".to_string(), Value::text("one"))]),
                Entry::from([("title".to_string(), Value::text("two"))]),
            ]),
        );

        let vm = render_one(FieldSchema::new("slides", "slider"), &store);
        assert_eq!(vm.control, Control::Repeatable);
        assert_eq!(vm.children.len(), 2);

        // each entry row carries the full effective sub-schema
        let first = &vm.children[0];
        assert_eq!(first[0].id, "title");
        assert_eq!(first[0].value, Value::text("one"));
        assert_eq!(first.len(), 4); // title, image, link, description
    }

    #[test]
    fn test_visibility_directive_attached() {
        let field = FieldSchema {
            condition: "layout:is(left)".to_string(),
            operator: "OR".to_string(),
            ..FieldSchema::new("sidebar", "select")
        };
        let vm = render_one(field, &MemoryAttributeStore::default());
        let directive = vm.visibility.unwrap();
        assert_eq!(directive.condition, "layout:is(left)");
        assert!(directive.operator.is_some());
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let mut meta_box = MetaBox::new("demo", "Demo");
        meta_box.fields = vec![FieldSchema::new("x", "warp")];

        let reg = registry();
        let err = Renderer::new(&reg)
            .render(&meta_box, ItemId(1), &MemoryAttributeStore::default())
            .unwrap_err();
        assert_eq!(err.ty, "warp");
    }
}
