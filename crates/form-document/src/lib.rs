//! Form Document
//!
//! Domain layer of the form builder:
//! - model: Section / Field / Attribute tree
//! - tree: immutable-update operations over a document
//! - reorder: drag-end resolution and array moves
//! - editor: document + field selection
//! - catalog: palette templates served by the backend
//! - cascade: app → module → layout selection
//! - codec: persisted JSON shapes
//!
//! No UI or network dependencies live here, so everything is testable natively.

pub mod cascade;
pub mod catalog;
pub mod codec;
pub mod editor;
mod error;
pub mod ids;
pub mod model;
pub mod reorder;
mod tree;

pub use cascade::{AppInfo, LayoutCascade, LayoutInfo, LayoutKey, LoadStage, LoadTicket, ModuleInfo};
pub use catalog::{AttributeDefinition, FieldTemplate, SectionTemplate};
pub use codec::{LayoutRecord, SaveFormRequest, SaveFormResponse};
pub use editor::{Editor, FieldSelection};
pub use error::{DocumentError, DocumentResult};
pub use ids::{IdKind, IdSource, SequentialIds, UuidIds};
pub use model::{Attribute, AttributeValue, Document, Field, InputType, Section};
pub use reorder::{DragEnd, ReorderIntent};
