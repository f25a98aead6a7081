//! Local Draft Commands
//!
//! Drafts are documents kept on disk after a failed save.

use form_document::LayoutKey;
use tauri::State;

use crate::domain::{DomainError, Draft};
use crate::repository::{DraftRepository, Repository};
use crate::AppState;

#[tauri::command]
pub async fn load_draft(state: State<'_, AppState>, key: LayoutKey) -> Result<Option<Draft>, String> {
    let repo = DraftRepository::new(state.db_state.conn.clone());
    repo.find_by_id(key).await.map_err(|e| e.to_string())
}

/// Discard a draft; discarding a missing draft is not an error
#[tauri::command]
pub async fn discard_draft(state: State<'_, AppState>, key: LayoutKey) -> Result<(), String> {
    let repo = DraftRepository::new(state.db_state.conn.clone());
    match repo.delete(key).await {
        Ok(()) | Err(DomainError::NotFound(_)) => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}
