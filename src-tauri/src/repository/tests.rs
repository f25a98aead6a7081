//! Repository Integration Tests
//!
//! Tests for DraftRepository with in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{DomainError, Draft};
    use crate::repository::{init_db, DraftRepository, Repository};
    use form_document::{Document, LayoutKey, SequentialIds};
    use std::path::PathBuf;

    async fn setup_test_db() -> DraftRepository {
        // Use in-memory database for tests
        let db_path = PathBuf::from(":memory:");
        let db_state = init_db(&db_path).await.expect("Failed to init test DB");
        DraftRepository::new(db_state.conn.clone())
    }

    fn key(layout_id: &str) -> LayoutKey {
        LayoutKey {
            app_id: "crm".to_string(),
            module_id: "bookings".to_string(),
            layout_id: layout_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_draft() {
        let repo = setup_test_db().await;
        let document = Document::with_default_section(&mut SequentialIds::new());

        let draft = Draft::new(key("1"), document.clone(), Some("HTTP 500".to_string()));
        repo.create(&draft).await.expect("Failed to create");

        let found = repo.find_by_id(key("1")).await.expect("Find failed").expect("Missing draft");
        assert_eq!(found.document, document);
        assert_eq!(found.reason.as_deref(), Some("HTTP 500"));
        assert_eq!(found.saved_at, draft.saved_at);
    }

    #[tokio::test]
    async fn test_empty_document_draft() {
        let repo = setup_test_db().await;
        repo.create(&Draft::new(key("1"), Document::default(), None)).await.unwrap();

        let found = repo.find_by_id(key("1")).await.unwrap().unwrap();
        assert!(found.document.is_empty());
    }

    #[tokio::test]
    async fn test_create_replaces_same_layout() {
        let repo = setup_test_db().await;
        repo.create(&Draft::new(key("1"), Document::default(), None)).await.unwrap();

        let document = Document::with_default_section(&mut SequentialIds::new());
        repo.create(&Draft::new(key("1"), document.clone(), None)).await.unwrap();

        let found = repo.find_by_id(key("1")).await.expect("Find failed").expect("Missing draft");
        assert_eq!(found.document, document);
    }

    #[tokio::test]
    async fn test_drafts_are_kept_per_layout() {
        let repo = setup_test_db().await;
        repo.create(&Draft::new(key("1"), Document::default(), None)).await.unwrap();
        repo.create(&Draft::new(key("2"), Document::default(), Some("offline".to_string())))
            .await
            .unwrap();

        repo.delete(key("1")).await.unwrap();
        let other = repo.find_by_id(key("2")).await.unwrap().expect("other layout's draft");
        assert_eq!(other.reason.as_deref(), Some("offline"));
        assert!(repo.find_by_id(key("3")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_draft() {
        let repo = setup_test_db().await;
        repo.create(&Draft::new(key("1"), Document::default(), None)).await.unwrap();

        repo.delete(key("1")).await.expect("Delete failed");
        assert!(repo.find_by_id(key("1")).await.unwrap().is_none());
        assert!(matches!(repo.delete(key("1")).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_uninitialized_database() {
        let state = crate::repository::DbState::new(PathBuf::from("unused.db"));
        let repo = DraftRepository::new(state.conn.clone());
        assert!(matches!(repo.find_by_id(key("1")).await, Err(DomainError::Internal(_))));
    }
}
