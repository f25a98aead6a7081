//! Drop Handling
//!
//! Turns a finished drag `(DragSource, DropTarget)` into an editor operation.

use form_document::{DragEnd, IdSource};
use leptos_dragdrop::{DragSource, DropTarget};

use crate::models::{Editor, FieldTemplate, SectionTemplate};

/// Apply a drop to `editor`. Pairs that mean nothing return it unchanged.
///
/// A template dropped on a placed field is appended to that field's section
/// and then moved into the field's slot.
pub fn apply_drop(
    editor: &Editor,
    catalog: &[FieldTemplate],
    source: DragSource,
    target: DropTarget,
    ids: &mut impl IdSource,
) -> Editor {
    match (source, target) {
        (DragSource::SectionTemplate, _) => editor.add_section(&SectionTemplate::default(), ids),
        (DragSource::Template(template_id), target) => {
            let Some(template) = catalog.iter().find(|t| t.id == template_id) else {
                return editor.clone();
            };
            match target {
                DropTarget::Section(section_id) => {
                    editor.add_field_to_section(template, &section_id, ids)
                }
                DropTarget::Field { section_id, field_id } => {
                    let added = editor.add_field_to_section(template, &section_id, ids);
                    let new_id = added
                        .document()
                        .section(&section_id)
                        .and_then(|s| s.fields.last())
                        .map(|f| f.id.clone());
                    match new_id {
                        Some(new_id) => {
                            added.reorder_fields_in_section(&section_id, &new_id, &field_id)
                        }
                        None => added,
                    }
                }
                DropTarget::Canvas => editor.clone(),
            }
        }
        (
            DragSource::Field { section_id, field_id },
            DropTarget::Field { section_id: over_section, field_id: over },
        ) => {
            if section_id != over_section {
                return editor.clone();
            }
            editor.apply_drag_end(&section_id, &DragEnd::new(field_id, Some(over)))
        }
        (DragSource::Field { .. }, _) => editor.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_document::{AttributeDefinition, InputType, SequentialIds};

    fn catalog() -> Vec<FieldTemplate> {
        vec![FieldTemplate {
            id: "email".to_string(),
            title: "Email".to_string(),
            icon: "mail".to_string(),
            attributes: vec![AttributeDefinition {
                id: "required".to_string(),
                title: "Required".to_string(),
                info_text: String::new(),
                input_type: InputType::Checkbox,
            }],
        }]
    }

    fn field_ids(editor: &Editor) -> Vec<String> {
        editor.document().sections[0]
            .fields
            .iter()
            .map(|f| f.id.clone())
            .collect()
    }

    #[test]
    fn test_section_template_anywhere_adds_section() {
        let mut ids = SequentialIds::new();
        let editor = Editor::blank(&mut ids);
        let next = apply_drop(
            &editor,
            &catalog(),
            DragSource::SectionTemplate,
            DropTarget::Canvas,
            &mut ids,
        );
        assert_eq!(next.document().sections.len(), 2);
        assert_eq!(next.document().sections[1].title, "Information");
    }

    #[test]
    fn test_template_on_field_takes_its_slot() {
        let mut ids = SequentialIds::new();
        let editor = Editor::blank(&mut ids);
        let sid = editor.document().sections[0].id.clone();
        let source = || DragSource::Template("email".to_string());

        let to_section = DropTarget::Section(sid.clone());
        let editor = apply_drop(&editor, &catalog(), source(), to_section, &mut ids);
        let first = field_ids(&editor)[0].clone();

        let editor = apply_drop(
            &editor,
            &catalog(),
            source(),
            DropTarget::Field {
                section_id: sid.clone(),
                field_id: first.clone(),
            },
            &mut ids,
        );
        let order = field_ids(&editor);
        assert_eq!(order.len(), 2);
        assert_eq!(order[1], first);
        assert_eq!(editor.document().sections[0].fields[0].template_id.as_deref(), Some("email"));
    }

    #[test]
    fn test_unknown_template_is_ignored() {
        let mut ids = SequentialIds::new();
        let editor = Editor::blank(&mut ids);
        let sid = editor.document().sections[0].id.clone();
        let next = apply_drop(
            &editor,
            &catalog(),
            DragSource::Template("gone".to_string()),
            DropTarget::Section(sid),
            &mut ids,
        );
        assert_eq!(next, editor);
    }

    #[test]
    fn test_field_drop_reorders_within_section() {
        let mut ids = SequentialIds::new();
        let editor = Editor::blank(&mut ids);
        let sid = editor.document().sections[0].id.clone();
        let email = || DragSource::Template("email".to_string());
        let to_section = || DropTarget::Section(sid.clone());
        let editor = apply_drop(&editor, &catalog(), email(), to_section(), &mut ids);
        let editor = apply_drop(&editor, &catalog(), email(), to_section(), &mut ids);
        let before = field_ids(&editor);

        let moved = apply_drop(
            &editor,
            &catalog(),
            DragSource::Field {
                section_id: sid.clone(),
                field_id: before[0].clone(),
            },
            DropTarget::Field {
                section_id: sid,
                field_id: before[1].clone(),
            },
            &mut ids,
        );
        assert_eq!(field_ids(&moved), vec![before[1].clone(), before[0].clone()]);
    }
}
