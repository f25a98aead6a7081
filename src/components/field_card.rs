//! Field Card Component
//!
//! A placed field. Click selects it for the sidebar; drag moves it within
//! its section.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mousedown, make_on_mouseleave, make_on_target_mouseenter, DragSource, DropTarget};

use crate::context::use_builder;
use crate::store::BuilderStateStoreFields;
use form_document::Field;

#[component]
pub fn FieldCard(section_id: String, field: Field) -> impl IntoView {
    let ctx = use_builder();
    let dnd = ctx.dnd;
    let field_id = field.id.clone();

    let source = DragSource::Field {
        section_id: section_id.clone(),
        field_id: field_id.clone(),
    };
    let target = DropTarget::Field {
        section_id: section_id.clone(),
        field_id: field_id.clone(),
    };
    let on_mousedown = make_on_mousedown(dnd, source);
    let on_mouseenter = make_on_target_mouseenter(dnd, target.clone());
    // still inside the section body after leaving the card
    let on_mouseleave = make_on_mouseleave(dnd, Some(DropTarget::Section(section_id.clone())));

    let is_selected = {
        let (section_id, field_id) = (section_id.clone(), field_id.clone());
        move || ctx.store.editor().with(|editor| editor.is_selected(&section_id, &field_id))
    };
    let is_dragging = {
        let field_id = field_id.clone();
        move || dnd.is_dragging_field(&field_id)
    };
    let card_class = move || {
        let mut c = String::from("field-card");
        if is_selected() { c.push_str(" selected"); }
        if is_dragging() { c.push_str(" dragging"); }
        if dnd.is_target(&target) { c.push_str(" drop-target"); }
        c
    };

    let select = {
        let (section_id, field_id) = (section_id.clone(), field_id.clone());
        move |_| {
            // a drop is followed by a click on the same element
            if dnd.drag_just_ended_read.get_untracked() {
                return;
            }
            ctx.edit(|editor| editor.select_field(&section_id, &field_id));
        }
    };

    let remove = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        ctx.edit(|editor| editor.remove_field_from_section(&section_id, &field_id));
    };

    view! {
        <div
            class=card_class
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
            on:click=select
        >
            <span class="field-icon">{field.icon.clone()}</span>
            <span class="field-title">{field.title.clone()}</span>
            <span class="field-attr-count">{format!("{} attributes", field.attributes.len())}</span>
            <button class="field-delete" title="Remove field" on:click=remove>"×"</button>
        </div>
    }
}
