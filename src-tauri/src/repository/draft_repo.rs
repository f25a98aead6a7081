//! Draft Repository
//!
//! SQLite-backed store of documents that failed to save remotely, keyed by
//! `(app_id, module_id, layout_id)`.

use async_trait::async_trait;
use form_document::{Document, LayoutKey};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, Draft};
use super::traits::Repository;

pub struct DraftRepository {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl DraftRepository {
    pub fn new(conn: Arc<Mutex<Option<Connection>>>) -> Self {
        Self { conn }
    }
}

fn row_to_draft(row: &Row<'_>) -> rusqlite::Result<(LayoutKey, String, i64, Option<String>)> {
    Ok((
        LayoutKey {
            app_id: row.get(0)?,
            module_id: row.get(1)?,
            layout_id: row.get(2)?,
        },
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn into_draft((key, document, saved_at, reason): (LayoutKey, String, i64, Option<String>)) -> DomainResult<Draft> {
    let document: Document = serde_json::from_str(&document)
        .map_err(|e| DomainError::Internal(format!("Corrupt draft {}: {}", key, e)))?;
    Ok(Draft {
        key,
        document,
        reason,
        saved_at,
    })
}

#[async_trait]
impl Repository<Draft> for DraftRepository {
    async fn create(&self, draft: &Draft) -> DomainResult<Draft> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let document = serde_json::to_string(&draft.document)
            .map_err(|e| DomainError::InvalidInput(e.to_string()))?;

        conn.execute(
            "INSERT OR REPLACE INTO drafts (app_id, module_id, layout_id, document, saved_at, reason)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                draft.key.app_id,
                draft.key.module_id,
                draft.key.layout_id,
                document,
                draft.saved_at,
                draft.reason,
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        tracing::info!(key = %draft.key, "draft stored");
        Ok(draft.clone())
    }

    async fn find_by_id(&self, id: LayoutKey) -> DomainResult<Option<Draft>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let row = conn
            .query_row(
                "SELECT app_id, module_id, layout_id, document, saved_at, reason FROM drafts
                 WHERE app_id = ? AND module_id = ? AND layout_id = ?",
                params![id.app_id, id.module_id, id.layout_id],
                row_to_draft,
            )
            .optional()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        row.map(into_draft).transpose()
    }

    async fn delete(&self, id: LayoutKey) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let removed = conn
            .execute(
                "DELETE FROM drafts WHERE app_id = ? AND module_id = ? AND layout_id = ?",
                params![id.app_id, id.module_id, id.layout_id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if removed == 0 {
            return Err(DomainError::NotFound(format!("draft {}", id)));
        }
        Ok(())
    }
}
