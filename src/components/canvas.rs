//! Canvas Component
//!
//! The document being built: one panel per section, plus an empty drop area
//! that takes new sections.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mouseleave, make_on_target_mouseenter, DragSource, DropTarget};

use crate::components::SectionPanel;
use crate::context::use_builder;
use crate::store::BuilderStateStoreFields;

#[component]
pub fn Canvas() -> impl IntoView {
    let ctx = use_builder();
    let dnd = ctx.dnd;

    let sections = move || ctx.store.editor().with(|editor| editor.document().sections.clone());

    let is_target = move || dnd.is_target(&DropTarget::Canvas);
    let dragging_section = move || matches!(dnd.dragging_read.get(), Some(DragSource::SectionTemplate));
    let tail_class = move || {
        let mut c = String::from("canvas-tail");
        if dragging_section() { c.push_str(" drop-ready"); }
        if is_target() { c.push_str(" drop-target"); }
        c
    };

    view! {
        <main class="canvas">
            <Show
                when=move || !sections().is_empty()
                fallback=|| view! { <p class="canvas-empty">"Drag a section here to start"</p> }
            >
                <For
                    each=sections
                    // re-render a panel whenever its section changes
                    key=|section| (section.id.clone(), section.title.clone(), section.field_ids().join(","))
                    children=move |section| view! { <SectionPanel section=section /> }
                />
            </Show>
            <div
                class=tail_class
                on:mouseenter=make_on_target_mouseenter(dnd, DropTarget::Canvas)
                on:mouseleave=make_on_mouseleave(dnd, None)
            >
                "Drop a section here"
            </div>
        </main>
    }
}
