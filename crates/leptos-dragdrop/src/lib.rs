//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.
//!
//! The crate only tracks what is being dragged and what it is over; the
//! caller decides what a `(DragSource, DropTarget)` pair means.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// What the user picked up
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragSource {
    /// A field template from the palette (catalog id)
    Template(String),
    /// The section template from the palette
    SectionTemplate,
    /// A field already placed in a section
    Field { section_id: String, field_id: String },
}

/// What the pointer is over
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Onto a placed field (take its slot)
    Field { section_id: String, field_id: String },
    /// Onto a section body (append)
    Section(String),
    /// Onto the empty canvas below the sections
    Canvas,
}

impl DropTarget {
    /// Whether dropping `source` here means anything.
    ///
    /// Placed fields only move within their own section.
    pub fn accepts(&self, source: &DragSource) -> bool {
        match (source, self) {
            (DragSource::SectionTemplate, _) => true,
            (DragSource::Template(_), DropTarget::Field { .. } | DropTarget::Section(_)) => true,
            (DragSource::Template(_), DropTarget::Canvas) => false,
            (
                DragSource::Field { section_id, field_id },
                DropTarget::Field { section_id: target_section, field_id: target_field },
            ) => section_id == target_section && field_id != target_field,
            (DragSource::Field { .. }, _) => false,
        }
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_read: ReadSignal<Option<DragSource>>,
    pub dragging_write: WriteSignal<Option<DragSource>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending source (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<DragSource>>,
    pub pending_write: WriteSignal<Option<DragSource>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

impl DndSignals {
    pub fn is_dragging(&self) -> bool {
        self.dragging_read.get().is_some()
    }

    pub fn is_dragging_field(&self, field_id: &str) -> bool {
        matches!(self.dragging_read.get(), Some(DragSource::Field { field_id: ref id, .. }) if id == field_id)
    }

    pub fn is_target(&self, target: &DropTarget) -> bool {
        self.drop_target_read.get().as_ref() == Some(target)
    }
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

fn passes_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    let dx = (now.0 - start.0).abs();
    let dy = (now.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_read, dragging_write) = signal(None::<DragSource>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<DragSource>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_read,
        dragging_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// What a mouseup finished
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MouseUp {
    /// No drag was in progress; the click that follows is a real click
    Click,
    /// A drag ended away from any accepting target
    Cancelled,
    /// A drag ended over an accepting target
    Drop(DragSource, DropTarget),
}

impl MouseUp {
    pub fn classify(dragging: Option<DragSource>, target: Option<DropTarget>) -> Self {
        match (dragging, target) {
            (Some(source), Some(target)) => MouseUp::Drop(source, target),
            (Some(_), None) => MouseUp::Cancelled,
            (None, _) => MouseUp::Click,
        }
    }

    /// Whether the click fired after this mouseup must be ignored
    pub fn suppresses_click(&self) -> bool {
        !matches!(self, MouseUp::Click)
    }
}

/// Reset all drag state
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_write.set(None);
}

/// Swallow the click that the browser fires right after a drag ends
fn mark_drag_just_ended(dnd: &DndSignals) {
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for draggable elements
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, source: DragSource) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is a form control
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlSelectElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_write.set(Some(source.clone()));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mousemove handler for document - starts drag if moved enough
pub fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_read.get_untracked();

        if pending.is_some() && dnd.dragging_read.get_untracked().is_none() {
            let start = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
            if passes_threshold(start, (ev.client_x(), ev.client_y())) {
                dnd.dragging_write.set(pending);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for drop targets.
/// The target is only recorded when it accepts the current drag.
pub fn make_on_target_mouseenter(dnd: DndSignals, target: DropTarget) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(source) = dnd.dragging_read.get_untracked() {
            if target.accepts(&source) {
                dnd.drop_target_write.set(Some(target.clone()));
            }
        }
    }
}

/// Create mouseleave handler.
/// `fallback` is the enclosing target the pointer is still over (e.g. the
/// section around a field).
pub fn make_on_mouseleave(dnd: DndSignals, fallback: Option<DropTarget>) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(source) = dnd.dragging_read.get_untracked() {
            let next = fallback.clone().filter(|t| t.accepts(&source));
            dnd.drop_target_write.set(next);
        }
    }
}

/// Bind global mouseup handler for drop detection
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(DragSource, DropTarget) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let outcome = MouseUp::classify(
            dnd.dragging_read.get_untracked(),
            dnd.drop_target_read.get_untracked(),
        );

        end_drag(&dnd);
        if outcome.suppresses_click() {
            mark_drag_just_ended(&dnd);
        }
        if let MouseUp::Drop(source, target) = outcome {
            on_drop(source, target);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(section: &str, id: &str) -> DragSource {
        DragSource::Field {
            section_id: section.to_string(),
            field_id: id.to_string(),
        }
    }

    fn field_target(section: &str, id: &str) -> DropTarget {
        DropTarget::Field {
            section_id: section.to_string(),
            field_id: id.to_string(),
        }
    }

    #[test]
    fn test_threshold() {
        assert!(!passes_threshold((0, 0), (5, 5)));
        assert!(passes_threshold((0, 0), (6, 0)));
        assert!(passes_threshold((10, 10), (10, 3)));
    }

    #[test]
    fn test_plain_click_is_not_suppressed() {
        let outcome = MouseUp::classify(None, None);
        assert_eq!(outcome, MouseUp::Click);
        assert!(!outcome.suppresses_click());

        // a stale target without a drag is still a click
        assert!(!MouseUp::classify(None, Some(DropTarget::Canvas)).suppresses_click());
    }

    #[test]
    fn test_finished_drag_suppresses_click() {
        let source = field("s1", "a");
        let target = field_target("s1", "b");

        let dropped = MouseUp::classify(Some(source.clone()), Some(target.clone()));
        assert_eq!(dropped, MouseUp::Drop(source.clone(), target));
        assert!(dropped.suppresses_click());

        let cancelled = MouseUp::classify(Some(source), None);
        assert_eq!(cancelled, MouseUp::Cancelled);
        assert!(cancelled.suppresses_click());
    }

    #[test]
    fn test_fields_stay_in_their_section() {
        assert!(field_target("s1", "b").accepts(&field("s1", "a")));
        assert!(!field_target("s1", "a").accepts(&field("s1", "a")));
        assert!(!field_target("s2", "b").accepts(&field("s1", "a")));
        assert!(!DropTarget::Section("s1".to_string()).accepts(&field("s1", "a")));
    }

    #[test]
    fn test_templates_land_in_sections() {
        let tpl = DragSource::Template("text".to_string());
        assert!(DropTarget::Section("s1".to_string()).accepts(&tpl));
        assert!(field_target("s1", "a").accepts(&tpl));
        assert!(!DropTarget::Canvas.accepts(&tpl));
        assert!(DropTarget::Canvas.accepts(&DragSource::SectionTemplate));
    }
}
