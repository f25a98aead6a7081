//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod catalog_cmd;
mod draft_cmd;
mod form_cmd;
mod layout_cmd;
mod window_cmd;

pub use catalog_cmd::*;
pub use draft_cmd::*;
pub use form_cmd::*;
pub use layout_cmd::*;
pub use window_cmd::*;
