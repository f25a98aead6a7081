//! Field Catalog Commands

use form_document::FieldTemplate;
use tauri::State;

use crate::AppState;

/// Field templates offered by the palette
#[tauri::command]
pub async fn fetch_field_catalog(state: State<'_, AppState>) -> Result<Vec<FieldTemplate>, String> {
    let templates = state.backend.fetch_field_catalog().await.map_err(|e| {
        tracing::error!(error = %e, "field catalog fetch failed");
        e.to_string()
    })?;
    tracing::info!(count = templates.len(), "field catalog loaded");
    Ok(templates)
}
