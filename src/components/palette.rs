//! Palette Component
//!
//! Left column: the section template and the field catalog. Items are
//! dragged onto the canvas; a click adds them too.

use form_document::UuidIds;
use leptos::prelude::*;
use leptos_dragdrop::{make_on_mousedown, DragSource};

use crate::context::use_builder;
use crate::models::{FieldTemplate, SectionTemplate};
use crate::store::BuilderStateStoreFields;

#[component]
pub fn Palette() -> impl IntoView {
    let ctx = use_builder();
    let section_template = SectionTemplate::default();

    let add_section = move |_| {
        if ctx.dnd.drag_just_ended_read.get_untracked() {
            return;
        }
        ctx.edit(|editor| editor.add_section(&SectionTemplate::default(), &mut UuidIds));
    };

    view! {
        <aside class="palette">
            <h2>"Sections"</h2>
            <div
                class="palette-item palette-section"
                on:mousedown=make_on_mousedown(ctx.dnd, DragSource::SectionTemplate)
                on:click=add_section
            >
                <span class="palette-icon">{section_template.icon.clone()}</span>
                <span class="palette-title">{section_template.title.clone()}</span>
            </div>

            <h2>"Fields"</h2>
            <Show
                when=move || !ctx.store.catalog_loading().get()
                fallback=|| view! { <p class="palette-loading">"Loading fields…"</p> }
            >
                <Show
                    when=move || !ctx.store.catalog().with(|c| c.is_empty())
                    fallback=|| view! { <p class="palette-empty">"No fields available"</p> }
                >
                    <For
                        each=move || ctx.store.catalog().get()
                        key=|template| template.id.clone()
                        children=move |template| view! { <PaletteField template=template /> }
                    />
                </Show>
            </Show>
        </aside>
    }
}

/// One catalog entry
#[component]
fn PaletteField(template: FieldTemplate) -> impl IntoView {
    let ctx = use_builder();
    let on_mousedown = make_on_mousedown(ctx.dnd, DragSource::Template(template.id.clone()));
    let title = template.title.clone();
    let icon = template.icon.clone();

    // Click adds to the selected field's section, else the last section
    let add_field = move |_| {
        if ctx.dnd.drag_just_ended_read.get_untracked() {
            return;
        }
        ctx.edit(|editor| {
            let section_id = editor
                .selection()
                .map(|sel| sel.section_id.clone())
                .or_else(|| editor.document().sections.last().map(|s| s.id.clone()));
            match section_id {
                Some(section_id) => editor.add_field_to_section(&template, &section_id, &mut UuidIds),
                None => editor.clone(),
            }
        });
    };

    view! {
        <div class="palette-item palette-field" on:mousedown=on_mousedown on:click=add_field>
            <span class="palette-icon">{icon}</span>
            <span class="palette-title">{title}</span>
        </div>
    }
}
