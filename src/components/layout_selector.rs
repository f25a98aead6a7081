//! Layout Selector Component
//!
//! App → module → layout dropdowns. Each change resets what is below it and
//! starts the next load; a response only lands if no newer selection was
//! made in the meantime.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{use_builder, BuilderContext};
use crate::models::{LoadStage, LoadTicket};
use crate::store::{store_cascade, BuilderStateStoreFields};

fn log_stale(what: &str) {
    web_sys::console::log_1(&format!("[CASCADE] Dropped stale {} response", what).into());
}

/// Finish a failed load; only the current request gets to show its error
fn fail(ctx: BuilderContext, ticket: LoadTicket, message: String) {
    let current = store_cascade(&ctx.store, |c| {
        let current = c.is_current(ticket);
        c.fail_load(ticket);
        current
    });
    if current == Some(true) {
        ctx.notify_error(message);
    } else {
        web_sys::console::warn_1(&format!("[CASCADE] Stale failure: {}", message).into());
    }
}

fn on_app_change(ctx: BuilderContext, app_id: String) {
    ctx.store.draft().set(None);
    let Some(ticket) = store_cascade(&ctx.store, |c| c.select_app(Some(app_id.clone()))).flatten() else {
        return;
    };
    spawn_local(async move {
        match commands::list_modules(&app_id).await {
            Ok(modules) => {
                if store_cascade(&ctx.store, |c| c.apply_modules(ticket, modules)) != Some(true) {
                    log_stale("module list");
                }
            }
            Err(e) => {
                fail(ctx, ticket, format!("Failed to load modules: {}", e));
            }
        }
    });
}

fn on_module_change(ctx: BuilderContext, module_id: String) {
    ctx.store.draft().set(None);
    let Some(ticket) = store_cascade(&ctx.store, |c| c.select_module(Some(module_id.clone()))).flatten() else {
        return;
    };
    spawn_local(async move {
        match commands::list_layouts(&module_id).await {
            Ok(layouts) => {
                if store_cascade(&ctx.store, |c| c.apply_layouts(ticket, layouts)) != Some(true) {
                    log_stale("layout list");
                }
            }
            Err(e) => {
                fail(ctx, ticket, format!("Failed to load layouts: {}", e));
            }
        }
    });
}

fn on_layout_change(ctx: BuilderContext, layout_id: String) {
    ctx.store.draft().set(None);
    let Some((ticket, key)) = store_cascade(&ctx.store, |c| {
        let ticket = c.select_layout(Some(layout_id.clone()))?;
        Some((ticket, c.layout_key()?))
    })
    .flatten() else {
        return;
    };
    spawn_local(async move {
        match commands::load_layout_document(&layout_id).await {
            Ok(document) => {
                if store_cascade(&ctx.store, |c| c.accept_document(ticket)) == Some(true) {
                    ctx.edit(|editor| editor.replace_document(document));
                } else {
                    log_stale("document");
                    return;
                }
            }
            Err(e) => {
                // keep whatever is on the canvas
                fail(ctx, ticket, e);
            }
        }
        ctx.refresh_draft(key).await;
    });
}

#[component]
pub fn LayoutSelector() -> impl IntoView {
    let ctx = use_builder();
    let app_id = move || ctx.store.cascade().with(|c| c.app_id().unwrap_or_default().to_string());
    let module_id = move || ctx.store.cascade().with(|c| c.module_id().unwrap_or_default().to_string());
    let layout_id = move || ctx.store.cascade().with(|c| c.layout_id().unwrap_or_default().to_string());

    let apps = move || ctx.store.cascade().with(|c| c.apps().to_vec());
    let modules = move || ctx.store.cascade().with(|c| c.modules().to_vec());
    let layouts = move || ctx.store.cascade().with(|c| c.layouts().to_vec());

    let loading_label = move || match ctx.store.cascade().with(|c| c.loading()) {
        Some(LoadStage::Modules) => "Loading modules…",
        Some(LoadStage::Layouts) => "Loading layouts…",
        Some(LoadStage::Document) => "Loading form…",
        None => "",
    };

    view! {
        <div class="layout-selector">
            <select
                class="select-app"
                prop:value=app_id
                on:change=move |ev| on_app_change(ctx, event_target_value(&ev))
            >
                <option value="">"Select app"</option>
                <For
                    each=apps
                    key=|app| app.id.clone()
                    children=move |app| view! { <option value=app.id.clone()>{app.name.clone()}</option> }
                />
            </select>
            <select
                class="select-module"
                prop:value=module_id
                prop:disabled=move || app_id().is_empty()
                on:change=move |ev| on_module_change(ctx, event_target_value(&ev))
            >
                <option value="">"Select module"</option>
                <For
                    each=modules
                    key=|module| module.id.clone()
                    children=move |module| view! { <option value=module.id.clone()>{module.name.clone()}</option> }
                />
            </select>
            <select
                class="select-layout"
                prop:value=layout_id
                prop:disabled=move || module_id().is_empty()
                on:change=move |ev| on_layout_change(ctx, event_target_value(&ev))
            >
                <option value="">"Select layout"</option>
                <For
                    each=layouts
                    key=|layout| layout.id.clone()
                    children=move |layout| view! { <option value=layout.id.clone()>{layout.name.clone()}</option> }
                />
            </select>
            <span class="cascade-loading">{loading_label}</span>
        </div>
    }
}
