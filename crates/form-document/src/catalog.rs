//! Field Catalog
//!
//! Read-only palette templates. Dropping a template into a section clones it
//! into an independent `Field`.

use serde::{Deserialize, Serialize};

use crate::model::{de_id, Attribute, AttributeValue, Field, InputType, Section};

/// Attribute definition carried by a catalog field template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub info_text: String,
    #[serde(default)]
    pub input_type: InputType,
}

impl AttributeDefinition {
    pub fn instantiate(&self) -> Attribute {
        Attribute {
            id: self.id.clone(),
            title: self.title.clone(),
            info_text: self.info_text.clone(),
            input_type: self.input_type,
            value: AttributeValue::empty_for(self.input_type),
        }
    }
}

/// A field type available in the palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTemplate {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
}

impl FieldTemplate {
    /// Deep-clone into a field instance under a fresh id.
    ///
    /// Attribute definitions sharing an id are collapsed to the first one so
    /// ids stay unique within the field.
    pub fn instantiate(&self, field_id: String) -> Field {
        let mut attributes: Vec<Attribute> = Vec::with_capacity(self.attributes.len());
        for def in &self.attributes {
            if attributes.iter().any(|a| a.id == def.id) {
                tracing::debug!(template = %self.id, attribute = %def.id, "duplicate attribute id skipped");
                continue;
            }
            attributes.push(def.instantiate());
        }

        Field {
            id: field_id,
            title: self.title.clone(),
            icon: self.icon.clone(),
            attributes,
            template_id: Some(self.id.clone()),
        }
    }
}

/// A section type available in the palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTemplate {
    pub title: String,
    pub column: u32,
    pub icon: String,
}

impl SectionTemplate {
    pub fn instantiate(&self, section_id: String) -> Section {
        Section {
            id: section_id,
            title: self.title.clone(),
            column: self.column,
            icon: self.icon.clone(),
            fields: Vec::new(),
        }
    }
}

impl Default for SectionTemplate {
    fn default() -> Self {
        Self {
            title: "Information".to_string(),
            column: 1,
            icon: "section".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkbox_template() -> FieldTemplate {
        FieldTemplate {
            id: "tpl-required".to_string(),
            title: "Required".to_string(),
            icon: "check".to_string(),
            attributes: vec![
                AttributeDefinition {
                    id: "1".to_string(),
                    title: "Required".to_string(),
                    info_text: "Must be filled".to_string(),
                    input_type: InputType::Checkbox,
                },
                AttributeDefinition {
                    id: "1".to_string(),
                    title: "Duplicate".to_string(),
                    info_text: String::new(),
                    input_type: InputType::Text,
                },
            ],
        }
    }

    #[test]
    fn test_instantiate_field() {
        let field = checkbox_template().instantiate("field-9".to_string());
        assert_eq!(field.id, "field-9");
        assert_eq!(field.template_id.as_deref(), Some("tpl-required"));
        assert_eq!(field.attributes.len(), 1);
        assert_eq!(field.attributes[0].value, AttributeValue::Flag(false));
    }

    #[test]
    fn test_catalog_listing_parses() {
        let json = r#"[{"id": 3, "title": "Full Name", "icon": "user",
            "attributes": [{"id": 10, "title": "Label", "info_text": "Shown above", "input_type": "text"}]}]"#;
        let catalog: Vec<FieldTemplate> = serde_json::from_str(json).unwrap();
        assert_eq!(catalog[0].id, "3");
        assert_eq!(catalog[0].attributes[0].id, "10");
        assert_eq!(catalog[0].attributes[0].input_type, InputType::Text);
    }

    #[test]
    fn test_default_section_template() {
        let section = SectionTemplate::default().instantiate("section-1".to_string());
        assert_eq!(section.title, "Information");
        assert!(section.fields.is_empty());
    }
}
