//! ## Crate layout
//! - `core`: runtime pipeline — values, field-type registry, schema
//!   expansion, rendering, submission sanitization, diffed persistence,
//!   collaborator boundaries, and the save sink.
//! - `schema`: declarative box/field AST, shared vocabulary types, and
//!   structural validation.
//!
//! This crate adds the [`BoxRegistry`], the explicit registration surface a
//! host wires into its "build render view" and "persist submission"
//! lifecycle points.

pub use metabox_core as core;
pub use metabox_schema as schema;

mod registry;

pub use registry::{BoxRegistry, BoxView};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        BoxRegistry, BoxView,
        core::{
            interface::{
                AttributeStore as _, AuthorizationCheck as _, ItemId, OriginVerifier as _,
                RequestContext as _, StylesheetResource as _,
            },
            persist::{Action, SaveVerdict, SkipReason},
            registry::FieldTypeRegistry,
            render::{Control, ViewModel},
            submit::Submission,
        },
        schema::{
            node::{FieldSchema, MetaBox},
            types::{Choice, MinMaxStep, Operator, Placement, Priority},
            value::{Entry, Value},
        },
    };
}
