//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::DndSignals;

use crate::commands;
use crate::models::{Editor, LayoutKey, Notice, NoticeKind};
use crate::store::{store_edit, BuilderStore, BuilderStateStoreFields};

/// How long a toast stays up
const NOTICE_MS: u32 = 4_000;

#[derive(Clone, Copy)]
pub struct BuilderContext {
    pub store: BuilderStore,
    pub dnd: DndSignals,
}

impl BuilderContext {
    pub fn new(store: BuilderStore, dnd: DndSignals) -> Self {
        Self { store, dnd }
    }

    /// Apply an editor operation
    pub fn edit(&self, f: impl FnOnce(&Editor) -> Editor) {
        store_edit(&self.store, f);
    }

    pub fn notify_success(&self, text: impl Into<String>) {
        self.notify(NoticeKind::Success, text.into());
    }

    pub fn notify_error(&self, text: impl Into<String>) {
        let text = text.into();
        web_sys::console::error_1(&format!("[BUILDER] {}", text).into());
        self.notify(NoticeKind::Error, text);
    }

    /// Look up a local draft for `key`, if it is still the selected layout
    pub async fn refresh_draft(&self, key: LayoutKey) {
        match commands::load_draft(&key).await {
            Ok(draft) => {
                let current = self.store.cascade().with_untracked(|c| c.layout_key());
                if current.as_ref() == Some(&key) {
                    self.store.draft().set(draft);
                }
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("[DRAFT] Lookup failed for {}: {}", key, e).into());
            }
        }
    }

    pub fn dismiss(&self, id: u32) {
        self.store.notices().write().retain(|n| n.id != id);
    }

    fn notify(&self, kind: NoticeKind, text: String) {
        let id = self.store.next_notice_id().get_untracked();
        self.store.next_notice_id().set(id.wrapping_add(1));
        self.store.notices().write().push(Notice { id, kind, text });

        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_MS).await;
            ctx.dismiss(id);
        });
    }
}

pub fn use_builder() -> BuilderContext {
    expect_context::<BuilderContext>()
}
