//! Section/Field Tree Operations
//!
//! Immutable-update API: every operation takes the prior document and returns
//! a new one. Missing ids are lenient no-ops.

use crate::catalog::{FieldTemplate, SectionTemplate};
use crate::ids::{IdKind, IdSource};
use crate::model::{Attribute, AttributeValue, Document, Section};
use crate::reorder::move_item;

impl Document {
    /// A document with one empty "Information" section
    pub fn with_default_section(ids: &mut impl IdSource) -> Self {
        Document::default().add_section(&SectionTemplate::default(), ids)
    }

    pub fn add_section(&self, template: &SectionTemplate, ids: &mut impl IdSource) -> Self {
        let id = self.fresh_id(IdKind::Section, ids);
        let mut next = self.clone();
        next.sections.push(template.instantiate(id));
        next
    }

    pub fn remove_section(&self, section_id: &str) -> Self {
        if self.section(section_id).is_none() {
            tracing::debug!(section = section_id, "remove_section: no such section");
            return self.clone();
        }
        let mut next = self.clone();
        next.sections.retain(|s| s.id != section_id);
        next
    }

    pub fn update_section_title(&self, section_id: &str, title: &str) -> Self {
        self.map_section(section_id, |section| {
            section.title = title.to_string();
        })
    }

    pub fn add_field_to_section(
        &self,
        template: &FieldTemplate,
        section_id: &str,
        ids: &mut impl IdSource,
    ) -> Self {
        if self.section(section_id).is_none() {
            tracing::debug!(section = section_id, "add_field_to_section: no such section");
            return self.clone();
        }
        let field = template.instantiate(self.fresh_id(IdKind::Field, ids));
        self.map_section(section_id, move |section| section.fields.push(field))
    }

    pub fn remove_field_from_section(&self, section_id: &str, field_id: &str) -> Self {
        self.map_section(section_id, |section| {
            section.fields.retain(|f| f.id != field_id);
        })
    }

    /// Move `from_id` to the index currently held by `to_id`
    pub fn reorder_fields_in_section(&self, section_id: &str, from_id: &str, to_id: &str) -> Self {
        if from_id == to_id {
            return self.clone();
        }
        self.map_section(section_id, |section| {
            match (section.field_index(from_id), section.field_index(to_id)) {
                (Some(from), Some(to)) => section.fields = move_item(&section.fields, from, to),
                _ => tracing::debug!(from = from_id, to = to_id, "reorder: field not in section"),
            }
        })
    }

    pub fn update_field_attribute_value(
        &self,
        section_id: &str,
        field_id: &str,
        attribute_id: &str,
        value: AttributeValue,
    ) -> Self {
        if self.attribute(section_id, field_id, attribute_id).is_none() {
            tracing::debug!(
                section = section_id,
                field = field_id,
                attribute = attribute_id,
                "update_field_attribute_value: chain not found"
            );
            return self.clone();
        }
        self.map_section(section_id, |section| {
            let attribute = section
                .fields
                .iter_mut()
                .find(|f| f.id == field_id)
                .and_then(|f| f.attributes.iter_mut().find(|a| a.id == attribute_id));
            if let Some(attribute) = attribute {
                attribute.value = value;
            }
        })
    }

    /// Lenient lookup: a default attribute when any link is missing
    pub fn find_attribute(&self, section_id: &str, field_id: &str, attribute_id: &str) -> Attribute {
        self.attribute(section_id, field_id, attribute_id)
            .cloned()
            .unwrap_or_default()
    }

    fn map_section(&self, section_id: &str, f: impl FnOnce(&mut Section)) -> Self {
        let mut next = self.clone();
        match next.sections.iter_mut().find(|s| s.id == section_id) {
            Some(section) => f(section),
            None => tracing::debug!(section = section_id, "no such section"),
        }
        next
    }

    fn fresh_id(&self, kind: IdKind, ids: &mut impl IdSource) -> String {
        loop {
            let id = ids.next_id(kind);
            if !self.contains_id(&id) {
                return id;
            }
        }
    }
}
