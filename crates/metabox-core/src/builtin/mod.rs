//! Built-in field types: sanitizers, render controls, and the default
//! composite sub-schemas. Installed into a [`FieldTypeRegistry`] by
//! [`install`]; hosts can register further types alongside them.

pub mod sanitize;
pub mod settings;

use crate::{
    registry::{FieldTypeHandler, FieldTypeRegistry},
    render::Control,
};
use metabox_schema::{node::FieldSchema, value::Value};

pub use settings::{default_settings, title_setting};

/// Default rows for multi-line controls when the field declares none.
pub const DEFAULT_ROWS: u16 = 10;

/// Register every built-in field type.
pub fn install(registry: &mut FieldTypeRegistry) {
    // simple scalars
    registry.register("text", FieldTypeHandler::simple(sanitize::text, text_control));
    registry.register(
        "textarea",
        FieldTypeHandler::simple(sanitize::textarea, textarea_control),
    );
    registry.register(
        "textarea-simple",
        FieldTypeHandler::simple(sanitize::textarea, textarea_control),
    );
    registry.register(
        "select",
        FieldTypeHandler::simple(sanitize::choice, select_control),
    );
    registry.register(
        "radio",
        FieldTypeHandler::simple(sanitize::choice, radio_control),
    );
    registry.register(
        "checkbox",
        FieldTypeHandler::simple(sanitize::checkbox, checkbox_control),
    );
    registry.register(
        "on-off",
        FieldTypeHandler::simple(sanitize::on_off, on_off_control),
    );
    registry.register(
        "numeric-slider",
        FieldTypeHandler::simple(sanitize::numeric, numeric_slider_control),
    );
    registry.register(
        "upload",
        FieldTypeHandler::simple(sanitize::upload, upload_control),
    );
    registry.register(
        "colorpicker",
        FieldTypeHandler::simple(sanitize::color, color_control),
    );
    registry.register(
        "date-picker",
        FieldTypeHandler::simple(sanitize::date, date_control),
    );
    registry.register(
        "css",
        FieldTypeHandler::simple(sanitize::textarea, css_control),
    );

    // static blocks render their description; values never persist
    registry.register(
        "textblock",
        FieldTypeHandler::simple(sanitize::text, static_control),
    );
    registry.register(
        "textblock-titled",
        FieldTypeHandler::simple(sanitize::text, static_control),
    );

    // composites
    registry.register(
        "slider",
        FieldTypeHandler::composite(titled_entries, repeatable_control),
    );
    registry.register(
        "list-item",
        FieldTypeHandler::composite(titled_entries, repeatable_control),
    );
    registry.register(
        "social-links",
        FieldTypeHandler::composite(linked_entries, repeatable_control),
    );
}

// ----------------------------------------------------------------------
// Composite-level validators (structural checks over sanitized entries)
// ----------------------------------------------------------------------

fn entry_has(entry: &metabox_schema::value::Entry, key: &str) -> bool {
    entry.get(key).is_some_and(|v| !v.is_empty())
}

/// Keep only entries that carry a non-empty title.
fn titled_entries(value: Value, _field_id: &str) -> Value {
    match value {
        Value::Entries(entries) => Value::Entries(
            entries
                .into_iter()
                .filter(|e| entry_has(e, "title"))
                .collect(),
        ),
        _ => Value::Entries(vec![]),
    }
}

/// Social links additionally need a non-empty href.
fn linked_entries(value: Value, field_id: &str) -> Value {
    match titled_entries(value, field_id) {
        Value::Entries(entries) => Value::Entries(
            entries
                .into_iter()
                .filter(|e| entry_has(e, "href"))
                .collect(),
        ),
        other => other,
    }
}

// ----------------------------------------------------------------------
// Render controls
// ----------------------------------------------------------------------

fn rows_of(field: &FieldSchema) -> u16 {
    field.rows.filter(|r| *r > 0).unwrap_or(DEFAULT_ROWS)
}

fn text_control(_field: &FieldSchema, _value: &Value) -> Control {
    Control::TextInput
}

fn textarea_control(field: &FieldSchema, _value: &Value) -> Control {
    Control::TextArea {
        rows: rows_of(field),
    }
}

fn select_control(field: &FieldSchema, _value: &Value) -> Control {
    Control::Select {
        choices: field.choices.clone(),
    }
}

fn radio_control(field: &FieldSchema, _value: &Value) -> Control {
    Control::Radio {
        choices: field.choices.clone(),
    }
}

fn checkbox_control(field: &FieldSchema, _value: &Value) -> Control {
    Control::CheckboxGroup {
        choices: field.choices.clone(),
    }
}

fn on_off_control(_field: &FieldSchema, _value: &Value) -> Control {
    Control::OnOff
}

fn numeric_slider_control(field: &FieldSchema, _value: &Value) -> Control {
    Control::NumericSlider {
        min_max_step: field.min_max_step.unwrap_or_default(),
    }
}

fn upload_control(_field: &FieldSchema, _value: &Value) -> Control {
    Control::Upload
}

fn color_control(_field: &FieldSchema, _value: &Value) -> Control {
    Control::ColorPicker
}

fn date_control(_field: &FieldSchema, _value: &Value) -> Control {
    Control::DatePicker
}

fn css_control(field: &FieldSchema, _value: &Value) -> Control {
    Control::CodeEditor {
        rows: rows_of(field),
    }
}

fn static_control(field: &FieldSchema, _value: &Value) -> Control {
    Control::StaticBlock {
        body: field.desc.clone(),
    }
}

fn repeatable_control(_field: &FieldSchema, _value: &Value) -> Control {
    Control::Repeatable
}

///
/// TESTS
///
