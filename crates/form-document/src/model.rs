//! Document Model
//!
//! Section → Field → Attribute tree. The whole `Document` is the unit of
//! persistence and serializes as a plain JSON array of sections.

use serde::{Deserialize, Deserializer, Serialize};

/// Editor control an attribute renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InputType {
    #[default]
    Text,
    Textarea,
    Number,
    Checkbox,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Textarea => "textarea",
            InputType::Number => "number",
            InputType::Checkbox => "checkbox",
        }
    }

    /// Unknown control names render as plain text inputs.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "textarea" => InputType::Textarea,
            "number" => InputType::Number,
            "checkbox" => InputType::Checkbox,
            _ => InputType::Text,
        }
    }
}

impl From<String> for InputType {
    fn from(s: String) -> Self {
        InputType::from_str(&s)
    }
}

impl From<InputType> for String {
    fn from(t: InputType) -> Self {
        t.as_str().to_string()
    }
}

/// Value held by an attribute instance.
///
/// Checkboxes carry a flag; every other control carries text (numbers are
/// kept as numeric strings, exactly as typed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Text(String),
}

impl AttributeValue {
    /// Initial value for a freshly cloned attribute
    pub fn empty_for(input_type: InputType) -> Self {
        match input_type {
            InputType::Checkbox => AttributeValue::Flag(false),
            _ => AttributeValue::Text(String::new()),
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        AttributeValue::Text(s.into())
    }

    pub fn as_text(&self) -> String {
        match self {
            AttributeValue::Flag(b) => b.to_string(),
            AttributeValue::Text(s) => s.clone(),
        }
    }

    pub fn as_flag(&self) -> bool {
        match self {
            AttributeValue::Flag(b) => *b,
            AttributeValue::Text(s) => matches!(s.trim(), "true" | "1" | "on"),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AttributeValue::Text(s) if s.is_empty())
    }
}

impl Default for AttributeValue {
    fn default() -> Self {
        AttributeValue::Text(String::new())
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Flag(b)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde_json::Value;

        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => AttributeValue::Flag(b),
            Value::String(s) => AttributeValue::Text(s),
            Value::Number(n) => AttributeValue::Text(n.to_string()),
            Value::Null => AttributeValue::Text(String::new()),
            other => AttributeValue::Text(other.to_string()),
        })
    }
}

/// A typed, editable property of a field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub info_text: String,
    #[serde(default)]
    pub input_type: InputType,
    #[serde(default)]
    pub value: AttributeValue,
}

/// A form element instance cloned from a catalog template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Catalog template this field was cloned from
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de_opt_id")]
    pub template_id: Option<String>,
}

impl Field {
    pub fn attribute(&self, attribute_id: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == attribute_id)
    }
}

/// A titled, orderable group of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_column")]
    pub column: u32,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

fn default_column() -> u32 {
    1
}

impl Section {
    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn field_index(&self, field_id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == field_id)
    }

    pub fn field_ids(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.id.as_str()).collect()
    }
}

/// The full ordered Section → Field → Attribute tree of one layout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn field(&self, section_id: &str, field_id: &str) -> Option<&Field> {
        self.section(section_id)?.field(field_id)
    }

    pub fn attribute(&self, section_id: &str, field_id: &str, attribute_id: &str) -> Option<&Attribute> {
        self.field(section_id, field_id)?.attribute(attribute_id)
    }

    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }

    /// Whether any section or field already uses `id`
    pub fn contains_id(&self, id: &str) -> bool {
        self.sections
            .iter()
            .any(|s| s.id == id || s.fields.iter().any(|f| f.id == id))
    }
}

/// Backend ids arrive as numbers or strings; both are kept as strings.
pub(crate) fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

pub(crate) fn de_opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type_parsing() {
        assert_eq!(InputType::from_str("textarea"), InputType::Textarea);
        assert_eq!(InputType::from_str("Checkbox"), InputType::Checkbox);
        assert_eq!(InputType::from_str("date"), InputType::Text);
        assert_eq!(InputType::Number.as_str(), "number");
    }

    #[test]
    fn test_attribute_value_from_json() {
        let flag: AttributeValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, AttributeValue::Flag(true));

        let number: AttributeValue = serde_json::from_str("42").unwrap();
        assert_eq!(number, AttributeValue::text("42"));

        let null: AttributeValue = serde_json::from_str("null").unwrap();
        assert!(null.is_empty());
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let json = r#"{"id": 7, "title": "Name", "info_text": "", "input_type": "text"}"#;
        let attr: Attribute = serde_json::from_str(json).unwrap();
        assert_eq!(attr.id, "7");
        assert_eq!(attr.value, AttributeValue::default());
    }

    #[test]
    fn test_section_defaults() {
        let section: Section = serde_json::from_str(r#"{"id": "s1"}"#).unwrap();
        assert_eq!(section.column, 1);
        assert!(section.fields.is_empty());
    }

    #[test]
    fn test_document_serializes_as_array() {
        let doc = Document::default();
        assert_eq!(serde_json::to_string(&doc).unwrap(), "[]");
    }
}
