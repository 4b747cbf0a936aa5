//! Save observability boundary.
//!
//! Pipeline logic MUST NOT depend on a concrete sink; all instrumentation
//! flows through [`SaveEvent`] and [`SaveSink`]. Recording an event never
//! affects save semantics.

use crate::persist::SkipReason;

///
/// SaveEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaveEvent<'a> {
    Skipped {
        box_id: &'a str,
        reason: SkipReason,
    },
    FieldWritten {
        box_id: &'a str,
        field_id: &'a str,
    },
    FieldDeleted {
        box_id: &'a str,
        field_id: &'a str,
    },
    FieldUnchanged {
        box_id: &'a str,
        field_id: &'a str,
    },
    Finished {
        box_id: &'a str,
        writes: usize,
        deletes: usize,
        unchanged: usize,
    },
}

///
/// SaveSink
///

pub trait SaveSink {
    fn record(&self, event: SaveEvent<'_>);
}

///
/// NullSink
/// Default sink; drops every event.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SaveSink for NullSink {
    fn record(&self, _event: SaveEvent<'_>) {}
}
