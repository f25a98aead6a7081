//! Reorder Engine
//!
//! Turns the end of a drag gesture into a move inside one section.
//! Hit-testing belongs to the UI; this module only sees the resulting ids.

use crate::model::Section;

/// End of a drag gesture: the dragged field and the field it was released over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    pub active: String,
    pub over: Option<String>,
}

impl DragEnd {
    pub fn new(active: impl Into<String>, over: Option<String>) -> Self {
        Self {
            active: active.into(),
            over,
        }
    }
}

/// A resolved move of `from_id` onto the slot held by `to_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderIntent {
    pub section_id: String,
    pub from_id: String,
    pub to_id: String,
}

/// Remove the element at `from` and insert it at `to`.
///
/// Out-of-range indices leave the order untouched.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut result = items.to_vec();
    if from >= result.len() || to >= result.len() || from == to {
        return result;
    }
    let moved = result.remove(from);
    result.insert(to, moved);
    result
}

/// Resolve a drag end inside `section`.
///
/// Returns `None` when there is no target, when the target is the dragged
/// field itself, or when either id is not a field of this section.
pub fn resolve_drag_end(section: &Section, drag: &DragEnd) -> Option<ReorderIntent> {
    let over = drag.over.as_deref()?;
    if over == drag.active {
        return None;
    }
    section.field_index(&drag.active)?;
    section.field_index(over)?;

    Some(ReorderIntent {
        section_id: section.id.clone(),
        from_id: drag.active.clone(),
        to_id: over.to_string(),
    })
}
