//! Backend Trait
//!
//! Seam between the Tauri commands and the REST backend, so persistence
//! logic can be exercised against an in-process fake.

use async_trait::async_trait;
use form_document::{AppInfo, FieldTemplate, LayoutInfo, LayoutRecord, ModuleInfo, SaveFormRequest, SaveFormResponse};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Invalid backend configuration: {0}")]
    Config(String),
}

#[async_trait]
pub trait FormBackend: Send + Sync {
    async fn list_apps(&self) -> ApiResult<Vec<AppInfo>>;

    async fn list_modules(&self, app_id: &str) -> ApiResult<Vec<ModuleInfo>>;

    /// Layouts of one module
    async fn list_layouts(&self, module_id: &str) -> ApiResult<Vec<LayoutInfo>>;

    /// Field templates with their attribute definitions
    async fn fetch_field_catalog(&self) -> ApiResult<Vec<FieldTemplate>>;

    async fn load_layout(&self, layout_id: &str) -> ApiResult<LayoutRecord>;

    async fn save_form(&self, request: &SaveFormRequest) -> ApiResult<SaveFormResponse>;
}
