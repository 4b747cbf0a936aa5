use crate::registry::UnknownFieldType;
use metabox_schema::error::ErrorTree;
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level runtime error. Per-field sanitization is total and never
/// surfaces here; what remains is schema-shape trouble caught at
/// registration or pipeline entry.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    UnknownFieldType(#[from] UnknownFieldType),

    #[error("schema validation failed:\n{0}")]
    Schema(ErrorTree),

    #[error("duplicate box id: '{0}'")]
    DuplicateBox(String),
}

impl From<ErrorTree> for Error {
    fn from(tree: ErrorTree) -> Self {
        Self::Schema(tree)
    }
}
