//! Layout Selection Commands
//!
//! Listings behind the app → module → layout selectors, and the document
//! load at the end of the cascade.

use form_document::{AppInfo, Document, LayoutInfo, ModuleInfo};
use tauri::State;

use crate::persistence;
use crate::AppState;

#[tauri::command]
pub async fn list_apps(state: State<'_, AppState>) -> Result<Vec<AppInfo>, String> {
    state.backend.list_apps().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_modules(state: State<'_, AppState>, app_id: String) -> Result<Vec<ModuleInfo>, String> {
    state.backend.list_modules(&app_id).await.map_err(|e| e.to_string())
}

/// Layouts of a module, as returned by the backend (the UI filters again)
#[tauri::command]
pub async fn list_layouts(state: State<'_, AppState>, module_id: String) -> Result<Vec<LayoutInfo>, String> {
    state.backend.list_layouts(&module_id).await.map_err(|e| e.to_string())
}

/// Load and decode a layout's form. Fails with "No form found" when the
/// layout has none.
#[tauri::command]
pub async fn load_layout_document(state: State<'_, AppState>, layout_id: String) -> Result<Document, String> {
    persistence::load_document(state.backend.as_ref(), &layout_id)
        .await
        .map_err(|e| {
            tracing::warn!(%layout_id, error = %e, "layout document not loaded");
            e.to_string()
        })
}
