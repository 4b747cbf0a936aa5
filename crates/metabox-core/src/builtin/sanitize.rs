//! Per-type value sanitizers.
//!
//! Every sanitizer is total: bad input coerces or rejects to empty, never
//! errors, so one malformed field cannot abort the save of its siblings.

use metabox_schema::value::Value;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Collapse any value shape to a single scalar string.
fn scalar(value: Value) -> String {
    match value {
        Value::Text(s) => s,
        Value::List(items) => items.into_iter().next().unwrap_or_default(),
        Value::Entries(_) => String::new(),
    }
}

/// Single-line text: trimmed, control characters stripped.
pub fn text(value: Value, _field_id: &str) -> Value {
    let s: String = scalar(value).chars().filter(|c| !c.is_control()).collect();
    Value::Text(s.trim().to_string())
}

/// Multi-line text: line endings normalized, NULs stripped, body preserved.
pub fn textarea(value: Value, _field_id: &str) -> Value {
    let s = scalar(value).replace("\r\n", "\n").replace('\r', "\n");
    Value::Text(s.replace('\0', ""))
}

/// Scalar passthrough for choice fields; lists collapse to their first
/// element.
pub fn choice(value: Value, _field_id: &str) -> Value {
    Value::Text(scalar(value).trim().to_string())
}

/// Checkbox groups keep every non-empty trimmed token.
pub fn checkbox(value: Value, _field_id: &str) -> Value {
    let items = match value {
        Value::Text(s) => vec![s],
        Value::List(items) => items,
        Value::Entries(_) => vec![],
    };

    Value::List(
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

/// Exactly `on` or `off`; anything else rejects to empty.
pub fn on_off(value: Value, _field_id: &str) -> Value {
    match scalar(value).trim() {
        s @ ("on" | "off") => Value::text(s),
        _ => Value::default(),
    }
}

/// Numeric input: sign/digit/dot characters retained, and the survivor must
/// parse as a finite float.
pub fn numeric(value: Value, _field_id: &str) -> Value {
    let s: String = scalar(value)
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
        .collect();

    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Text(s),
        _ => Value::default(),
    }
}

/// Upload URL: trimmed, interior whitespace rejected, scheme defaulted to
/// `https://` when missing.
pub fn upload(value: Value, _field_id: &str) -> Value {
    let s = scalar(value).trim().to_string();
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return Value::default();
    }

    if s.starts_with("http://") || s.starts_with("https://") {
        Value::Text(s)
    } else {
        Value::Text(format!("https://{s}"))
    }
}

/// RGB hex color, canonicalized to lowercase `#rrggbb`.
pub fn color(value: Value, _field_id: &str) -> Value {
    let s = scalar(value);
    let hex = s.trim().trim_start_matches('#');

    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Value::Text(format!("#{}", hex.to_ascii_lowercase()))
    } else {
        Value::default()
    }
}

/// `YYYY-MM-DD` dates only.
pub fn date(value: Value, _field_id: &str) -> Value {
    let s = scalar(value).trim().to_string();

    match Date::parse(&s, DATE_FORMAT) {
        Ok(_) => Value::Text(s),
        Err(_) => Value::default(),
    }
}

///
/// TESTS
///
