//! Section Panel Component
//!
//! One section on the canvas: editable title, delete, and its fields.
//! The body is a drop target for catalog templates.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mouseleave, make_on_target_mouseenter, DropTarget};

use crate::components::FieldCard;
use crate::context::use_builder;
use crate::models::Section;

/// Ask before a section and its fields go away
fn confirm_remove(section: &Section) -> bool {
    let message = format!(
        "Delete section \"{}\" and its {} field(s)?",
        section.title,
        section.fields.len()
    );
    web_sys::window()
        .and_then(|w| w.confirm_with_message(&message).ok())
        .unwrap_or(false)
}

#[component]
pub fn SectionPanel(section: Section) -> impl IntoView {
    let ctx = use_builder();
    let dnd = ctx.dnd;

    let section_id = section.id.clone();
    let target = DropTarget::Section(section_id.clone());
    let on_mouseenter = make_on_target_mouseenter(dnd, target.clone());
    let on_mouseleave = make_on_mouseleave(dnd, None);

    let body_class = {
        let target = target.clone();
        move || {
            if dnd.is_target(&target) { "section-body drop-target" } else { "section-body" }
        }
    };

    let rename = {
        let section_id = section_id.clone();
        move |ev: web_sys::Event| {
            let title = event_target_value(&ev);
            ctx.edit(|editor| editor.update_section_title(&section_id, &title));
        }
    };

    let remove = {
        let section_id = section_id.clone();
        move |_| ctx.edit(|editor| editor.remove_section(&section_id, confirm_remove))
    };

    let fields = section.fields.clone();

    view! {
        <section class="section-panel" data-column=section.column.to_string()>
            <header class="section-header">
                <span class="section-icon">{section.icon.clone()}</span>
                <input
                    class="section-title"
                    type="text"
                    prop:value=section.title.clone()
                    on:change=rename
                />
                <span class="section-count">{format!("{} fields", fields.len())}</span>
                <button class="section-delete" title="Delete section" on:click=remove>"×"</button>
            </header>
            <div class=body_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave>
                {if fields.is_empty() {
                    view! { <p class="section-empty">"Drop fields here"</p> }.into_any()
                } else {
                    fields
                        .into_iter()
                        .map(|field| view! { <FieldCard section_id=section_id.clone() field=field /> })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </section>
    }
}
