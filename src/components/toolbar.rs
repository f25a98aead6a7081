//! Toolbar Component
//!
//! Save, Save & Close, and the local draft controls.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;

use crate::commands;
use crate::context::{use_builder, BuilderContext};
use crate::models::Draft;
use crate::store::BuilderStateStoreFields;

fn draft_label(draft: &Draft) -> String {
    let saved_at = js_sys::Date::new(&JsValue::from_f64(draft.saved_at as f64));
    let when: String = saved_at.to_locale_string("default", &JsValue::UNDEFINED).into();
    match &draft.reason {
        Some(reason) => format!("Unsaved draft from {} ({})", when, reason),
        None => format!("Unsaved draft from {}", when),
    }
}

async fn save(ctx: BuilderContext, close_after: bool) {
    let Some(key) = ctx.store.cascade().with_untracked(|c| c.layout_key()) else {
        ctx.notify_error("Select an app, module and layout first");
        return;
    };
    if ctx.store.saving().get_untracked() {
        return;
    }

    ctx.store.saving().set(true);
    let document = ctx.store.editor().with_untracked(|editor| editor.document().clone());

    match commands::save_form(&key, &document).await {
        Ok(response) => {
            // edits made while the request was out stay dirty
            ctx.edit(|editor| {
                if editor.document() == &document { editor.mark_saved() } else { editor.clone() }
            });
            ctx.store.draft().set(None);
            let message = if response.message.is_empty() { "Form saved".to_string() } else { response.message };
            ctx.notify_success(message);

            if close_after {
                if let Err(e) = commands::close_window().await {
                    ctx.notify_error(format!("Failed to close window: {}", e));
                }
            }
        }
        Err(e) => {
            ctx.notify_error(e);
            ctx.refresh_draft(key).await;
        }
    }
    ctx.store.saving().set(false);
}

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_builder();

    let dirty = move || ctx.store.editor().with(|editor| editor.is_dirty());
    let saving = move || ctx.store.saving().get();
    let no_layout = move || ctx.store.cascade().with(|c| c.layout_key().is_none());
    let field_count = move || ctx.store.editor().with(|editor| editor.document().field_count());

    let restore = move |_| {
        if let Some(draft) = ctx.store.draft().get_untracked() {
            ctx.edit(|editor| editor.restore_draft(draft.document));
            ctx.store.draft().set(None);
            ctx.notify_success("Draft restored");
        }
    };

    let discard = move |_| {
        let Some(draft) = ctx.store.draft().get_untracked() else {
            return;
        };
        spawn_local(async move {
            match commands::discard_draft(&draft.key).await {
                Ok(()) => ctx.store.draft().set(None),
                Err(e) => ctx.notify_error(format!("Failed to discard draft: {}", e)),
            }
        });
    };

    view! {
        <div class="toolbar">
            <span class="toolbar-status">
                {move || format!("{} fields", field_count())}
                <Show when=dirty>
                    <span class="unsaved">" · Unsaved changes"</span>
                </Show>
            </span>

            <Show when=move || ctx.store.draft().with(|d| d.is_some())>
                <span class="draft-notice">
                    {move || {
                        ctx.store.draft().with(|d| match d {
                            Some(draft) => draft_label(draft),
                            None => String::new(),
                        })
                    }}
                    <button class="draft-restore" on:click=restore>"Restore draft"</button>
                    <button class="draft-discard" on:click=discard>"Discard"</button>
                </span>
            </Show>

            <button
                class="save-btn"
                prop:disabled=move || saving() || no_layout()
                on:click=move |_| spawn_local(save(ctx, false))
            >
                {move || if saving() { "Saving…" } else { "Save" }}
            </button>
            <button
                class="save-close-btn"
                prop:disabled=move || saving() || no_layout()
                on:click=move |_| spawn_local(save(ctx, true))
            >
                "Save & Close"
            </button>
        </div>
    }
}
