//! Domain Layer
//!
//! Backend-side entities. The form document itself lives in `form-document`.

mod draft;
mod entity;

pub use draft::Draft;
pub use entity::{DomainError, DomainResult, Entity};
