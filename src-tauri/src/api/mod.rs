//! Backend API
//!
//! The external REST backend that owns apps, modules, layouts, the field
//! catalog and saved forms.

mod backend;
mod http;

pub use backend::{ApiError, ApiResult, FormBackend};
pub use http::HttpFormBackend;
