//! Declarative meta-box schema: the field AST, shared vocabulary types, and
//! structural validation. Runtime behavior (rendering, sanitization,
//! persistence) lives in `metabox-core`.

pub mod condition;
pub mod error;
pub mod node;
pub mod types;
pub mod validate;
pub mod value;
pub mod visit;

/// Maximum length for meta-box identifiers.
pub const MAX_BOX_ID_LEN: usize = 64;

/// Maximum length for field identifiers.
pub const MAX_FIELD_ID_LEN: usize = 64;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        condition::VisibilityDirective,
        error::ErrorTree,
        node::*,
        types::{Choice, MinMaxStep, Operator, Placement, Priority},
        value::{Entry, Value},
        visit::Visitor,
    };
    pub use serde::{Deserialize, Serialize};
}
