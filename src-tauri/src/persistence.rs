//! Persistence Service
//!
//! Loads layout documents from the backend and saves them back, keeping a
//! local draft whenever a save does not go through.

use form_document::{Document, DocumentError, SaveFormRequest, SaveFormResponse};
use thiserror::Error;

use crate::api::{ApiError, FormBackend};
use crate::domain::{DomainError, Draft};
use crate::repository::Repository;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("No form found")]
    NoForm,

    #[error("Stored form is unreadable: {0}")]
    Malformed(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Save rejected: {0}")]
    Rejected(String),

    #[error("{cause} (draft kept locally)")]
    DraftKept { cause: Box<PersistenceError> },

    #[error(transparent)]
    Drafts(#[from] DomainError),
}

impl From<DocumentError> for PersistenceError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::Empty => PersistenceError::NoForm,
            DocumentError::Malformed(e) => PersistenceError::Malformed(e.to_string()),
        }
    }
}

/// Fetch a layout and decode its stored form
pub async fn load_document(backend: &dyn FormBackend, layout_id: &str) -> Result<Document, PersistenceError> {
    let record = backend.load_layout(layout_id).await?;
    let document = record.document()?;
    tracing::info!(layout_id, sections = document.sections.len(), "layout document loaded");
    Ok(document)
}

/// Send the document to the backend.
///
/// A successful save discards the layout's local draft. A transport error,
/// an HTTP error or a rejected save stores the document as a draft instead.
pub async fn save_document(
    backend: &dyn FormBackend,
    drafts: &dyn Repository<Draft>,
    request: SaveFormRequest,
) -> Result<SaveFormResponse, PersistenceError> {
    let key = request.key();

    let cause = match backend.save_form(&request).await {
        Ok(response) if response.status => {
            match drafts.delete(key.clone()).await {
                Ok(()) => tracing::info!(%key, "draft discarded after save"),
                Err(DomainError::NotFound(_)) => {}
                Err(e) => tracing::warn!(%key, error = %e, "failed to discard draft"),
            }
            tracing::info!(%key, "form saved");
            return Ok(response);
        }
        Ok(response) => PersistenceError::Rejected(response.message),
        Err(e) => PersistenceError::Api(e),
    };

    tracing::warn!(%key, error = %cause, "save failed");
    let draft = Draft::new(key.clone(), request.form_fields, Some(cause.to_string()));
    match drafts.create(&draft).await {
        Ok(_) => Err(PersistenceError::DraftKept { cause: Box::new(cause) }),
        Err(e) => {
            tracing::error!(%key, error = %e, "failed to keep draft");
            Err(cause)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResult;
    use crate::repository::{init_db, DraftRepository};
    use async_trait::async_trait;
    use form_document::{
        AppInfo, FieldTemplate, LayoutInfo, LayoutKey, LayoutRecord, ModuleInfo, SequentialIds,
    };
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// In-process backend that answers from canned values and records saves
    #[derive(Default)]
    struct FakeBackend {
        form: Option<serde_json::Value>,
        save_status: Option<u16>,
        rejected: bool,
        saved: Mutex<Vec<SaveFormRequest>>,
    }

    #[async_trait]
    impl FormBackend for FakeBackend {
        async fn list_apps(&self) -> ApiResult<Vec<AppInfo>> {
            Ok(Vec::new())
        }

        async fn list_modules(&self, _app_id: &str) -> ApiResult<Vec<ModuleInfo>> {
            Ok(Vec::new())
        }

        async fn list_layouts(&self, _module_id: &str) -> ApiResult<Vec<LayoutInfo>> {
            Ok(Vec::new())
        }

        async fn fetch_field_catalog(&self) -> ApiResult<Vec<FieldTemplate>> {
            Ok(Vec::new())
        }

        async fn load_layout(&self, layout_id: &str) -> ApiResult<LayoutRecord> {
            Ok(LayoutRecord {
                id: layout_id.to_string(),
                module_id: None,
                name: "Default".to_string(),
                form: self.form.clone(),
            })
        }

        async fn save_form(&self, request: &SaveFormRequest) -> ApiResult<SaveFormResponse> {
            if let Some(status) = self.save_status {
                return Err(ApiError::Status {
                    url: "http://fake/save".to_string(),
                    status,
                });
            }
            self.saved.lock().unwrap().push(request.clone());
            Ok(SaveFormResponse {
                status: !self.rejected,
                message: if self.rejected { "Layout locked".to_string() } else { String::new() },
            })
        }
    }

    async fn drafts() -> DraftRepository {
        let db_state = init_db(&PathBuf::from(":memory:")).await.expect("Failed to init test DB");
        DraftRepository::new(db_state.conn.clone())
    }

    fn key() -> LayoutKey {
        LayoutKey {
            app_id: "crm".to_string(),
            module_id: "bookings".to_string(),
            layout_id: "9".to_string(),
        }
    }

    fn document() -> Document {
        Document::with_default_section(&mut SequentialIds::new())
    }

    #[tokio::test]
    async fn test_load_decodes_stored_form() {
        let stored = document().to_form_json().unwrap();
        let backend = FakeBackend {
            form: Some(serde_json::Value::String(stored)),
            ..FakeBackend::default()
        };

        let loaded = load_document(&backend, "9").await.unwrap();
        assert_eq!(loaded, document());
    }

    #[tokio::test]
    async fn test_load_without_form_is_no_form() {
        let backend = FakeBackend::default();
        let err = load_document(&backend, "9").await.unwrap_err();
        assert!(matches!(err, PersistenceError::NoForm));
        assert_eq!(err.to_string(), "No form found");
    }

    #[tokio::test]
    async fn test_load_malformed_form() {
        let backend = FakeBackend {
            form: Some(serde_json::Value::String("[{\"id\": ".to_string())),
            ..FakeBackend::default()
        };
        assert!(matches!(load_document(&backend, "9").await, Err(PersistenceError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_successful_save_discards_draft() {
        let backend = FakeBackend::default();
        let repo = drafts().await;
        repo.create(&Draft::new(key(), document(), Some("offline".to_string()))).await.unwrap();

        let request = SaveFormRequest::new(&key(), "17", document());
        let response = save_document(&backend, &repo, request).await.unwrap();

        assert!(response.status);
        assert!(repo.find_by_id(key()).await.unwrap().is_none());
        let saved = backend.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].user_id, "17");
        assert_eq!(saved[0].id, "9");
    }

    #[tokio::test]
    async fn test_http_failure_keeps_draft() {
        let backend = FakeBackend {
            save_status: Some(502),
            ..FakeBackend::default()
        };
        let repo = drafts().await;

        let request = SaveFormRequest::new(&key(), "17", document());
        let err = save_document(&backend, &repo, request).await.unwrap_err();

        assert!(matches!(err, PersistenceError::DraftKept { .. }));
        let draft = repo.find_by_id(key()).await.unwrap().expect("draft stored");
        assert_eq!(draft.document, document());
        assert!(draft.reason.unwrap().contains("502"));
    }

    #[tokio::test]
    async fn test_rejected_save_keeps_draft() {
        let backend = FakeBackend {
            rejected: true,
            ..FakeBackend::default()
        };
        let repo = drafts().await;

        let request = SaveFormRequest::new(&key(), "17", document());
        let err = save_document(&backend, &repo, request).await.unwrap_err();

        assert_eq!(err.to_string(), "Save rejected: Layout locked (draft kept locally)");
        assert!(repo.find_by_id(key()).await.unwrap().is_some());
    }
}
