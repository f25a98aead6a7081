//! UI Components
//!
//! Reusable Leptos components.

mod attribute_sidebar;
mod canvas;
mod field_card;
mod layout_selector;
mod palette;
mod section_panel;
mod toast;
mod toolbar;

pub use attribute_sidebar::AttributeSidebar;
pub use canvas::Canvas;
pub use field_card::FieldCard;
pub use layout_selector::LayoutSelector;
pub use palette::Palette;
pub use section_panel::SectionPanel;
pub use toast::ToastStack;
pub use toolbar::Toolbar;
