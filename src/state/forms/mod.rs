//! Form domain layer: fields, the form document tree, row visibility and
//! the per-record form states

mod document;
mod field;
mod form_state;
mod visibility;

pub use document::*;
pub use field::*;
pub use form_state::*;
pub use visibility::*;
