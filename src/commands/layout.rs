//! Layout Selection Commands
//!
//! Frontend bindings for the app → module → layout listings and the
//! document load.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{call, to_args};
use crate::models::Document;
use form_document::{AppInfo, LayoutInfo, ModuleInfo};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct AppIdArgs<'a> {
    #[serde(rename = "appId")]
    app_id: &'a str,
}

#[derive(Serialize)]
struct ModuleIdArgs<'a> {
    #[serde(rename = "moduleId")]
    module_id: &'a str,
}

#[derive(Serialize)]
struct LayoutIdArgs<'a> {
    #[serde(rename = "layoutId")]
    layout_id: &'a str,
}

// ========================
// Commands
// ========================

pub async fn list_apps() -> Result<Vec<AppInfo>, String> {
    call("list_apps", JsValue::NULL).await
}

pub async fn list_modules(app_id: &str) -> Result<Vec<ModuleInfo>, String> {
    call("list_modules", to_args(&AppIdArgs { app_id })?).await
}

pub async fn list_layouts(module_id: &str) -> Result<Vec<LayoutInfo>, String> {
    call("list_layouts", to_args(&ModuleIdArgs { module_id })?).await
}

/// Fails with "No form found" when the layout has no stored form
pub async fn load_layout_document(layout_id: &str) -> Result<Document, String> {
    call("load_layout_document", to_args(&LayoutIdArgs { layout_id })?).await
}
