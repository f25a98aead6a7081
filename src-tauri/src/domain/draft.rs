//! Draft Entity
//!
//! A locally stored copy of a document that could not be saved remotely.

use form_document::{Document, LayoutKey};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub key: LayoutKey,
    pub document: Document,
    /// Why the draft was kept (last save error)
    pub reason: Option<String>,
    /// Unix millis
    pub saved_at: i64,
}

impl Draft {
    pub fn new(key: LayoutKey, document: Document, reason: Option<String>) -> Self {
        Self {
            key,
            document,
            reason,
            saved_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl Entity for Draft {
    type Id = LayoutKey;

    fn id(&self) -> Self::Id {
        self.key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_id_is_layout_key() {
        let key = LayoutKey {
            app_id: "crm".to_string(),
            module_id: "quotes".to_string(),
            layout_id: "7".to_string(),
        };
        let draft = Draft::new(key.clone(), Document::default(), None);
        assert_eq!(draft.id(), key);
        assert!(draft.saved_at > 0);
    }
}
