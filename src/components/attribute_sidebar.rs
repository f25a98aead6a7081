//! Attribute Sidebar Component
//!
//! Right column: the attributes of the selected field, one input per
//! attribute according to its input type.

use leptos::prelude::*;

use crate::context::use_builder;
use crate::models::{Attribute, AttributeValue, InputType};
use crate::store::BuilderStateStoreFields;

#[component]
pub fn AttributeSidebar() -> impl IntoView {
    let ctx = use_builder();

    let selected_title = move || {
        ctx.store
            .editor()
            .with(|editor| editor.selected_field().map(|f| f.title.clone()))
    };
    let attributes = move || ctx.store.editor().with(|editor| editor.selected_attributes());

    view! {
        <aside class="attribute-sidebar">
            {move || match selected_title() {
                None => view! {
                    <p class="sidebar-empty">"Select a field to edit its attributes"</p>
                }.into_any(),
                Some(title) => view! {
                    <h2 class="sidebar-title">{title}</h2>
                    <button class="sidebar-close" on:click=move |_| ctx.edit(|editor| editor.clear_selection())>
                        "Close"
                    </button>
                    <For
                        each=attributes
                        key=|attr| (attr.id.clone(), attr.title.clone(), attr.input_type.as_str())
                        children=move |attr| view! { <AttributeInput attribute=attr /> }
                    />
                }.into_any(),
            }}
        </aside>
    }
}

/// Input for one attribute; writes back on every edit
#[component]
fn AttributeInput(attribute: Attribute) -> impl IntoView {
    let ctx = use_builder();
    let attribute_id = attribute.id.clone();

    // current value straight from the document
    let value = {
        let attribute_id = attribute_id.clone();
        move || {
            ctx.store.editor().with(|editor| {
                editor
                    .selected_attributes()
                    .into_iter()
                    .find(|a| a.id == attribute_id)
                    .map(|a| a.value)
                    .unwrap_or_default()
            })
        }
    };

    let write = move |value: AttributeValue| {
        ctx.edit(|editor| editor.set_selected_attribute_value(&attribute_id, value));
    };

    let input = match attribute.input_type {
        InputType::Checkbox => view! {
            <input
                type="checkbox"
                prop:checked=move || value().as_flag()
                on:change=move |ev| write(AttributeValue::Flag(event_target_checked(&ev)))
            />
        }
        .into_any(),
        InputType::Textarea => view! {
            <textarea
                rows="3"
                prop:value=move || value().as_text()
                on:input=move |ev| write(AttributeValue::text(event_target_value(&ev)))
            />
        }
        .into_any(),
        InputType::Number => view! {
            <input
                type="number"
                prop:value=move || value().as_text()
                on:input=move |ev| write(AttributeValue::text(event_target_value(&ev)))
            />
        }
        .into_any(),
        InputType::Text => view! {
            <input
                type="text"
                prop:value=move || value().as_text()
                on:input=move |ev| write(AttributeValue::text(event_target_value(&ev)))
            />
        }
        .into_any(),
    };

    view! {
        <label class="attribute-row">
            <span class="attribute-title">{attribute.title.clone()}</span>
            {input}
            {(!attribute.info_text.is_empty()).then(|| view! {
                <small class="attribute-info">{attribute.info_text.clone()}</small>
            })}
        </label>
    }
}
