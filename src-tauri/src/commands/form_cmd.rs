//! Form Save Command

use form_document::{Document, LayoutKey, SaveFormRequest, SaveFormResponse};
use tauri::State;

use crate::persistence;
use crate::repository::DraftRepository;
use crate::AppState;

/// Save the document under its layout, attaching the configured user id
#[tauri::command]
pub async fn save_form(
    state: State<'_, AppState>,
    key: LayoutKey,
    document: Document,
) -> Result<SaveFormResponse, String> {
    let request = SaveFormRequest::new(&key, state.config.user_id.clone(), document);
    let drafts = DraftRepository::new(state.db_state.conn.clone());

    persistence::save_document(state.backend.as_ref(), &drafts, request)
        .await
        .map_err(|e| e.to_string())
}
