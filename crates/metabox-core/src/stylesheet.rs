//! Generated stylesheet document with marker-delimited blocks.
//!
//! The `css` field type writes its sanitized value here as a side channel,
//! keyed by field id. One block per key: upsert replaces the existing block
//! in place, so repeated saves never accumulate duplicates.

use crate::interface::StylesheetResource;
use std::fmt::Write as _;

///
/// MarkerStylesheet
///

#[derive(Clone, Debug, Default)]
pub struct MarkerStylesheet {
    text: String,
}

impl MarkerStylesheet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Full document text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// CSS body of one block, without its markers or the separator
    /// newline `upsert_block` writes after the body.
    #[must_use]
    pub fn block(&self, key: &str) -> Option<&str> {
        let (start, end) = self.block_span(key)?;
        let body = &self.text[start..end];
        let body = body.strip_prefix(&begin_marker(key))?;
        body.strip_suffix(&end_marker(key))?.strip_suffix('\n')
    }

    // Byte span of the whole block, markers included.
    fn block_span(&self, key: &str) -> Option<(usize, usize)> {
        let begin = begin_marker(key);
        let end = end_marker(key);

        let start = self.text.find(&begin)?;
        let stop = self.text[start..].find(&end)? + start + end.len();
        Some((start, stop))
    }
}

fn begin_marker(key: &str) -> String {
    format!("/* BEGIN {key} */\n")
}

fn end_marker(key: &str) -> String {
    format!("/* END {key} */\n")
}

impl StylesheetResource for MarkerStylesheet {
    fn upsert_block(&mut self, key: &str, css: &str) {
        self.remove_block(key);

        let _ = write!(
            self.text,
            "{}{}\n{}",
            begin_marker(key),
            css.trim_end(),
            end_marker(key)
        );
    }

    fn remove_block(&mut self, key: &str) {
        if let Some((start, stop)) = self.block_span(key) {
            self.text.replace_range(start..stop, "");
        }
    }
}

///
/// TESTS
///
