//! Editor State
//!
//! The document being edited plus the field shown in the attribute sidebar.
//! Removing a field or section never leaves the selection dangling.

use crate::catalog::{FieldTemplate, SectionTemplate};
use crate::ids::IdSource;
use crate::model::{Attribute, AttributeValue, Document, Field, Section};
use crate::reorder::{resolve_drag_end, DragEnd};

/// The field currently open in the attribute sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    pub section_id: String,
    pub field_id: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Editor {
    document: Document,
    selection: Option<FieldSelection>,
    dirty: bool,
}

impl Editor {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: None,
            dirty: false,
        }
    }

    /// Fresh editor with the default "Information" section
    pub fn blank(ids: &mut impl IdSource) -> Self {
        Self::new(Document::with_default_section(ids))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Option<&FieldSelection> {
        self.selection.as_ref()
    }

    /// Unsaved changes since the last load or save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&self) -> Self {
        Self {
            dirty: false,
            ..self.clone()
        }
    }

    /// Install a loaded document; a selection that no longer resolves is dropped.
    pub fn replace_document(&self, document: Document) -> Self {
        let selection = self
            .selection
            .clone()
            .filter(|sel| document.field(&sel.section_id, &sel.field_id).is_some());
        Self {
            document,
            selection,
            dirty: false,
        }
    }

    /// Install a locally kept draft; unlike a load it still needs saving.
    pub fn restore_draft(&self, document: Document) -> Self {
        Self {
            dirty: true,
            ..self.replace_document(document)
        }
    }

    pub fn select_field(&self, section_id: &str, field_id: &str) -> Self {
        if self.document.field(section_id, field_id).is_none() {
            tracing::debug!(section = section_id, field = field_id, "select_field: no such field");
            return self.clone();
        }
        Self {
            selection: Some(FieldSelection {
                section_id: section_id.to_string(),
                field_id: field_id.to_string(),
            }),
            ..self.clone()
        }
    }

    pub fn clear_selection(&self) -> Self {
        Self {
            selection: None,
            ..self.clone()
        }
    }

    pub fn is_selected(&self, section_id: &str, field_id: &str) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|sel| sel.section_id == section_id && sel.field_id == field_id)
    }

    pub fn selected_field(&self) -> Option<&Field> {
        let sel = self.selection.as_ref()?;
        self.document.field(&sel.section_id, &sel.field_id)
    }

    pub fn selected_attributes(&self) -> Vec<Attribute> {
        self.selected_field()
            .map(|f| f.attributes.clone())
            .unwrap_or_default()
    }

    pub fn add_section(&self, template: &SectionTemplate, ids: &mut impl IdSource) -> Self {
        self.edited(self.document.add_section(template, ids))
    }

    /// Remove a section after `confirm` approves it.
    ///
    /// Declining, or an unknown id, leaves the editor untouched.
    pub fn remove_section(&self, section_id: &str, confirm: impl FnOnce(&Section) -> bool) -> Self {
        let Some(section) = self.document.section(section_id) else {
            return self.clone();
        };
        if !confirm(section) {
            return self.clone();
        }

        let mut next = self.edited(self.document.remove_section(section_id));
        if next
            .selection
            .as_ref()
            .is_some_and(|sel| sel.section_id == section_id)
        {
            next.selection = None;
        }
        next
    }

    pub fn update_section_title(&self, section_id: &str, title: &str) -> Self {
        if self.document.section(section_id).is_none() {
            return self.clone();
        }
        self.edited(self.document.update_section_title(section_id, title))
    }

    pub fn add_field_to_section(
        &self,
        template: &FieldTemplate,
        section_id: &str,
        ids: &mut impl IdSource,
    ) -> Self {
        if self.document.section(section_id).is_none() {
            return self.clone();
        }
        self.edited(self.document.add_field_to_section(template, section_id, ids))
    }

    pub fn remove_field_from_section(&self, section_id: &str, field_id: &str) -> Self {
        if self.document.field(section_id, field_id).is_none() {
            return self.clone();
        }
        let mut next = self.edited(self.document.remove_field_from_section(section_id, field_id));
        if self.is_selected(section_id, field_id) {
            next.selection = None;
        }
        next
    }

    pub fn reorder_fields_in_section(&self, section_id: &str, from_id: &str, to_id: &str) -> Self {
        let next = self.document.reorder_fields_in_section(section_id, from_id, to_id);
        if next == self.document {
            return self.clone();
        }
        self.edited(next)
    }

    /// Apply the end of a drag gesture inside `section_id`
    pub fn apply_drag_end(&self, section_id: &str, drag: &DragEnd) -> Self {
        let intent = self
            .document
            .section(section_id)
            .and_then(|section| resolve_drag_end(section, drag));
        match intent {
            Some(intent) => self.reorder_fields_in_section(&intent.section_id, &intent.from_id, &intent.to_id),
            None => self.clone(),
        }
    }

    pub fn update_field_attribute_value(
        &self,
        section_id: &str,
        field_id: &str,
        attribute_id: &str,
        value: AttributeValue,
    ) -> Self {
        if self.document.attribute(section_id, field_id, attribute_id).is_none() {
            return self.clone();
        }
        self.edited(
            self.document
                .update_field_attribute_value(section_id, field_id, attribute_id, value),
        )
    }

    /// Write an attribute of the selected field (no-op without a selection)
    pub fn set_selected_attribute_value(&self, attribute_id: &str, value: AttributeValue) -> Self {
        match &self.selection {
            Some(sel) => self.update_field_attribute_value(&sel.section_id, &sel.field_id, attribute_id, value),
            None => self.clone(),
        }
    }

    pub fn find_attribute(&self, section_id: &str, field_id: &str, attribute_id: &str) -> Attribute {
        self.document.find_attribute(section_id, field_id, attribute_id)
    }

    fn edited(&self, document: Document) -> Self {
        Self {
            document,
            selection: self.selection.clone(),
            dirty: true,
        }
    }
}
