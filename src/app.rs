//! Form Builder App
//!
//! Main application component: palette, canvas and attribute sidebar under
//! a header with the layout selectors and the save controls.

use form_document::UuidIds;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals};
use reactive_stores::Store;

use crate::commands;
use crate::components::{AttributeSidebar, Canvas, LayoutSelector, Palette, ToastStack, Toolbar};
use crate::context::BuilderContext;
use crate::drop::apply_drop;
use crate::models::Editor;
use crate::store::{store_cascade, BuilderState, BuilderStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(BuilderState {
        editor: Editor::blank(&mut UuidIds),
        catalog_loading: true,
        ..Default::default()
    });
    let dnd = create_dnd_signals();
    let ctx = BuilderContext::new(store, dnd);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    bind_global_mouseup(dnd, move |source, target| {
        web_sys::console::log_1(&format!("[DND] Drop {:?} on {:?}", source, target).into());
        let catalog = store.catalog().get_untracked();
        ctx.edit(|editor| apply_drop(editor, &catalog, source, target, &mut UuidIds));
    });

    // Load the field catalog on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::fetch_field_catalog().await {
                Ok(templates) => {
                    web_sys::console::log_1(&format!("[APP] Loaded {} field templates", templates.len()).into());
                    store.catalog().set(templates);
                }
                Err(e) => ctx.notify_error(format!("Failed to load fields: {}", e)),
            }
            store.catalog_loading().set(false);
        });
    });

    // Load the app list on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::list_apps().await {
                Ok(apps) => {
                    store_cascade(&store, |c| c.set_apps(apps));
                }
                Err(e) => ctx.notify_error(format!("Failed to load apps: {}", e)),
            }
        });
    });

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Form Builder"</h1>
                <LayoutSelector />
                <Toolbar />
            </header>
            <div class="builder">
                <Palette />
                <Canvas />
                <AttributeSidebar />
            </div>
            <ToastStack />
        </div>
    }
}
