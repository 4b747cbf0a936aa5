mod field;
mod meta_box;

pub use field::*;
pub use meta_box::*;
