//! Persisted Shapes
//!
//! The backend stores a document as an opaque JSON string under the layout
//! record; this client is the only interpreter of that string.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::cascade::LayoutKey;
use crate::error::{DocumentError, DocumentResult};
use crate::model::{de_id, de_opt_id, Document};

impl Document {
    /// Serialize for the backend's `form` column.
    ///
    /// A document without sections encodes as `[]`, which reads back as
    /// `DocumentError::Empty` ("no form yet") rather than as an empty document.
    pub fn to_form_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored form string.
    ///
    /// Blank input, `null` and `[]` mean the layout has no form yet.
    pub fn from_form_json(raw: &str) -> DocumentResult<Document> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DocumentError::Empty);
        }
        Self::from_form_value(serde_json::from_str(raw)?)
    }

    fn from_form_value(value: Value) -> DocumentResult<Document> {
        match value {
            Value::Null => Err(DocumentError::Empty),
            // some backends double-encode the blob
            Value::String(inner) => Self::from_form_json(&inner),
            Value::Array(ref sections) if sections.is_empty() => Err(DocumentError::Empty),
            other => Ok(serde_json::from_value(other)?),
        }
    }
}

/// Layout row returned by the layout-by-id endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub module_id: Option<String>,
    #[serde(default, alias = "title")]
    pub name: String,
    #[serde(default)]
    pub form: Option<Value>,
}

impl LayoutRecord {
    pub fn document(&self) -> DocumentResult<Document> {
        match &self.form {
            Some(form) => Document::from_form_value(form.clone()),
            None => Err(DocumentError::Empty),
        }
    }
}

/// Body of the save-form call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFormRequest {
    pub id: String,
    pub app_id: String,
    pub module_id: String,
    pub layout_id: String,
    pub user_id: String,
    #[serde(rename = "formFields")]
    pub form_fields: Document,
}

impl SaveFormRequest {
    /// The saved form record shares the layout's id.
    pub fn new(key: &LayoutKey, user_id: impl Into<String>, document: Document) -> Self {
        Self {
            id: key.layout_id.clone(),
            app_id: key.app_id.clone(),
            module_id: key.module_id.clone(),
            layout_id: key.layout_id.clone(),
            user_id: user_id.into(),
            form_fields: document,
        }
    }

    pub fn key(&self) -> LayoutKey {
        LayoutKey {
            app_id: self.app_id.clone(),
            module_id: self.module_id.clone(),
            layout_id: self.layout_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFormResponse {
    #[serde(default, deserialize_with = "de_status")]
    pub status: bool,
    #[serde(default)]
    pub message: String,
}

/// `true`, `1`, `"success"`, `"ok"` all count as success.
fn de_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_i64() == Some(1) || n.as_u64() == Some(200),
        Value::String(s) => matches!(s.to_ascii_lowercase().as_str(), "success" | "ok" | "true" | "1"),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AttributeDefinition, FieldTemplate};
    use crate::ids::SequentialIds;
    use crate::model::{AttributeValue, InputType};

    fn sample_document() -> Document {
        let mut ids = SequentialIds::new();
        let tpl = FieldTemplate {
            id: "t1".to_string(),
            title: "Newsletter".to_string(),
            icon: "mail".to_string(),
            attributes: vec![
                AttributeDefinition {
                    id: "required".to_string(),
                    title: "Required".to_string(),
                    info_text: String::new(),
                    input_type: InputType::Checkbox,
                },
                AttributeDefinition {
                    id: "max".to_string(),
                    title: "Max length".to_string(),
                    info_text: "Characters".to_string(),
                    input_type: InputType::Number,
                },
            ],
        };
        let doc = Document::with_default_section(&mut ids);
        let sid = doc.sections[0].id.clone();
        let doc = doc.add_field_to_section(&tpl, &sid, &mut ids);
        let fid = doc.sections[0].fields[0].id.clone();
        doc.update_field_attribute_value(&sid, &fid, "required", AttributeValue::Flag(true))
            .update_field_attribute_value(&sid, &fid, "max", "120".into())
    }

    #[test]
    fn test_round_trip() {
        let doc = sample_document();
        let json = doc.to_form_json().unwrap();
        assert_eq!(Document::from_form_json(&json).unwrap(), doc);
    }

    #[test]
    fn test_empty_forms() {
        for raw in ["", "  ", "null", "[]", "\"\""] {
            assert!(matches!(Document::from_form_json(raw), Err(DocumentError::Empty)), "{raw:?}");
        }
    }

    #[test]
    fn test_sectionless_document_reads_back_as_no_form() {
        let json = Document::default().to_form_json().unwrap();
        assert_eq!(json, "[]");
        assert!(matches!(Document::from_form_json(&json), Err(DocumentError::Empty)));
    }

    #[test]
    fn test_malformed_form() {
        assert!(matches!(Document::from_form_json("[{"), Err(DocumentError::Malformed(_))));
        assert!(matches!(Document::from_form_json("{\"a\":1}"), Err(DocumentError::Malformed(_))));
    }

    #[test]
    fn test_layout_record_with_string_form() {
        let doc = sample_document();
        let record = LayoutRecord {
            id: "9".to_string(),
            module_id: Some("2".to_string()),
            name: "Default".to_string(),
            form: Some(Value::String(doc.to_form_json().unwrap())),
        };
        assert_eq!(record.document().unwrap(), doc);
    }

    #[test]
    fn test_layout_record_without_form() {
        let record: LayoutRecord = serde_json::from_str(r#"{"id": 9, "form": null}"#).unwrap();
        assert!(matches!(record.document(), Err(DocumentError::Empty)));
    }

    #[test]
    fn test_save_request_shape() {
        let key = LayoutKey {
            app_id: "crm".to_string(),
            module_id: "bookings".to_string(),
            layout_id: "default".to_string(),
        };
        let request = SaveFormRequest::new(&key, "42", Document::default());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["formFields"], serde_json::json!([]));
        assert_eq!(json["user_id"], "42");
        assert_eq!(json["id"], "default");
        assert_eq!(request.key(), key);
    }

    #[test]
    fn test_save_response_status_variants() {
        let ok: SaveFormResponse = serde_json::from_str(r#"{"status": "success", "message": "Saved"}"#).unwrap();
        assert!(ok.status);
        let ok: SaveFormResponse = serde_json::from_str(r#"{"status": 1}"#).unwrap();
        assert!(ok.status);
        let failed: SaveFormResponse = serde_json::from_str(r#"{"status": false, "message": "Denied"}"#).unwrap();
        assert!(!failed.status);
        assert_eq!(failed.message, "Denied");
    }
}
