//! Frontend Models
//!
//! The document types come from `form-document`; the rest are UI-only.

use serde::Deserialize;

pub use form_document::{
    Attribute, AttributeValue, Document, Editor, FieldTemplate, InputType, LayoutCascade,
    LayoutKey, LoadStage, LoadTicket, Section, SectionTemplate,
};

/// A locally kept copy of a document whose save failed
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Draft {
    pub key: LayoutKey,
    pub document: Document,
    pub reason: Option<String>,
    /// Unix millis
    pub saved_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "toast toast-success",
            NoticeKind::Error => "toast toast-error",
        }
    }
}

/// A toast message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub text: String,
}
