//! Toast Component
//!
//! Success/error messages; each dismisses itself after a few seconds.

use leptos::prelude::*;

use crate::context::use_builder;
use crate::store::BuilderStateStoreFields;

#[component]
pub fn ToastStack() -> impl IntoView {
    let ctx = use_builder();

    view! {
        <div class="toast-stack">
            <For
                each=move || ctx.store.notices().get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.class() role="status">
                            <span class="toast-text">{notice.text}</span>
                            <button class="toast-close" on:click=move |_| ctx.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
