//! Builder State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Draft, Editor, FieldTemplate, LayoutCascade, Notice};

/// Everything the builder screen renders from
#[derive(Clone, Debug, Default, Store)]
pub struct BuilderState {
    /// Document plus selection
    pub editor: Editor,
    /// Field templates for the palette
    pub catalog: Vec<FieldTemplate>,
    pub catalog_loading: bool,
    /// App → module → layout selection
    pub cascade: LayoutCascade,
    pub notices: Vec<Notice>,
    pub next_notice_id: u32,
    /// A save is in flight
    pub saving: bool,
    /// Local draft for the selected layout, if one exists
    pub draft: Option<Draft>,
}

/// Type alias for the store
pub type BuilderStore = Store<BuilderState>;

/// Get the builder store from context
pub fn use_builder_store() -> BuilderStore {
    expect_context::<BuilderStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the editor with `f(editor)`
pub fn store_edit(store: &BuilderStore, f: impl FnOnce(&Editor) -> Editor) {
    store.editor().update(|editor| *editor = f(editor));
}

/// Run `f` on the cascade; `None` once the store is disposed
pub fn store_cascade<R>(store: &BuilderStore, f: impl FnOnce(&mut LayoutCascade) -> R) -> Option<R> {
    store.cascade().try_update(f)
}
