//! The two records every behavior of a [`crate::DndContext`] coordinates through.
//!
//! Only one native drag gesture can be in flight per pointer, so each record has exactly one
//! writer at a time: whichever element currently owns the gesture.

use std::rc::{Rc, Weak};

use itertools::Itertools as _;

use crate::emitter::EventEmitter;
use crate::payload::{DragData, DragDropData};
use crate::platform::ElementId;
use crate::sortable::SortableContainer;

/// Sink a drag source registers to hear about a successful drop on some other element.
pub type SuccessSink = Rc<EventEmitter<DragDropData>>;

/// The in-flight plain drag.
///
/// `payload` and `on_success` only mean something while [`Self::in_progress`] is `true`; they are
/// set and cleared together with it.
#[derive(Debug, Default)]
pub struct DragSession {
    in_progress: bool,
    payload: Option<DragData>,
    allowed_drop_zones: Vec<String>,
    on_success: Option<SuccessSink>,
}

impl DragSession {
    pub fn begin(&mut self, payload: Option<DragData>, on_success: Option<SuccessSink>) {
        log::debug!("drag session begin payload={payload:?}");
        self.in_progress = true;
        self.payload = payload;
        self.on_success = on_success;
    }

    /// Clear the gesture fields. The allowed zones are owned by the drag source's end handler.
    pub fn clear(&mut self) {
        if self.in_progress {
            log::debug!("drag session end");
        }
        self.in_progress = false;
        self.payload = None;
        self.on_success = None;
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn payload(&self) -> Option<&DragData> {
        self.payload.as_ref()
    }

    pub fn on_success(&self) -> Option<&SuccessSink> {
        self.on_success.as_ref()
    }

    /// Zones the current drag source restricts drops to. Empty means unrestricted.
    pub fn allowed_drop_zones(&self) -> &[String] {
        &self.allowed_drop_zones
    }

    pub fn set_allowed_drop_zones(&mut self, zones: Vec<String>) {
        log::trace!("allowed drop zones = [{}]", zones.iter().join(", "));
        self.allowed_drop_zones = zones;
    }
}

/// The in-flight reorder gesture: where the dragged item currently lives, and which element is
/// marked as the live insertion point.
#[derive(Debug, Default)]
pub struct SortableSession {
    in_progress: bool,
    source: Option<Weak<SortableContainer>>,
    index: Option<usize>,
    hovered: Option<ElementId>,
}

impl SortableSession {
    pub fn begin(&mut self, container: &Rc<SortableContainer>, index: usize) {
        log::debug!("sortable session begin index={index}");
        self.in_progress = true;
        self.retarget(container, index);
    }

    /// Record that the dragged item now sits at `index` of `container`.
    pub fn retarget(&mut self, container: &Rc<SortableContainer>, index: usize) {
        self.source = Some(Rc::downgrade(container));
        self.index = Some(index);
    }

    pub fn clear(&mut self) {
        if self.in_progress {
            log::debug!("sortable session end");
        }
        self.in_progress = false;
        self.source = None;
        self.index = None;
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// The container currently holding the dragged item, if it is still alive.
    pub fn source(&self) -> Option<Rc<SortableContainer>> {
        self.source.as_ref().and_then(Weak::upgrade)
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    pub(crate) fn replace_hovered(&mut self, element: Option<ElementId>) -> Option<ElementId> {
        std::mem::replace(&mut self.hovered, element)
    }

    /// `true` if the gesture's recorded source is `container`.
    pub fn is_source(&self, container: &Rc<SortableContainer>) -> bool {
        self.source
            .as_ref()
            .is_some_and(|w| std::ptr::eq(w.as_ptr(), Rc::as_ptr(container)))
    }
}
