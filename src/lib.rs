#![forbid(unsafe_code)]

//! Backend-agnostic drag-and-drop session core.
//!
//! This crate coordinates a single drag-and-drop session between registered
//! drag sources and drop targets, independent of any rendering surface. It
//! tracks session state, validates legal transitions (no double begin, no
//! drop without a drag, no type-mismatched drop) and notifies subscribers
//! with minimal churn. An input backend (pointer, touch, keyboard — out of
//! scope here) drives it through four protocol actions on
//! [`DragDropManager`]: `begin_drag`, `hover`, `drop`, `end_drag`.
//!
//! Nothing here renders, hit-tests or persists; the backend supplies the
//! ordered list of hovered targets and the pointer offsets, and reads
//! derived state back through [`Monitor`].

mod dirty;
mod error;
mod handles;
mod handlers;
mod manager;
mod monitor;
mod offset;
mod operation;
mod registry;
mod snapshot;
mod types;


pub use dirty::DirtyHandlerIds;
pub use error::DragDropError;
pub use handles::{HandlerId, HandlerKind};
pub use handlers::{DragSource, DropTarget};
pub use manager::{BeginDragOptions, ChangeListener, DragDropManager, SubscriptionId};
pub use monitor::Monitor;
pub use offset::PointerOffsets;
pub use registry::HandlerRegistry;
pub use types::{ItemType, Point, TargetTypes};
