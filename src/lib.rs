//! Draggable, droppable and sortable-list behaviors coordinated through shared drag sessions.
//!
//! Each behavior is attached to one host element and fed the element's native drag events. The
//! behaviors of one [`DndContext`] agree through two shared records: the [`DragSession`] (is a drag
//! in flight, with which payload, restricted to which drop zones) and the [`SortableSession`]
//! (where the item of a reorder gesture currently sits).
//!
//! - [`Draggable`]: a drag source.
//! - [`Droppable`]: a drop target.
//! - [`SortableContainer`] and [`SortableItem`]: reorderable lists, across containers too.
//!
//! Host element operations go through the [`Platform`] trait; [`HeadlessDom`] is an in-memory
//! implementation. Views are redrawn through [`RequestRefresh`], implemented for `egui::Context`.

#![forbid(unsafe_code)]

pub mod behavior;
pub mod config;
pub mod context;
pub mod draggable;
pub mod droppable;
pub mod emitter;
pub mod error;
pub mod headless;
pub mod payload;
pub mod platform;
pub mod refresh;
pub mod session;
pub mod sortable;

pub use behavior::{AllowDropFn, Behavior, BehaviorConfig, BehaviorCore, DragHooks, DropHooks};
pub use config::{DataTransferEffect, DndConfig, DragImage, DragImageSource, ImageRef};
pub use context::DndContext;
pub use draggable::Draggable;
pub use droppable::Droppable;
pub use emitter::EventEmitter;
pub use error::DndError;
pub use headless::HeadlessDom;
pub use payload::{DragData, DragDropData};
pub use platform::{DataTransfer, DragEvent, ElementId, Platform};
pub use refresh::RequestRefresh;
pub use session::{DragSession, SortableSession, SuccessSink};
pub use sortable::{FormArray, SequenceAdapter, SortableContainer, SortableData, SortableItem};
