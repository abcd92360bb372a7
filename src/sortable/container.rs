use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::behavior::{Behavior, BehaviorCore, DragHooks, DropHooks};
use crate::context::DndContext;
use crate::error::DndError;
use crate::payload::DragData;
use crate::platform::{DragEvent, ElementId};

use super::collection::SortableData;
use super::relocate;

/// An element owning an ordered collection whose items are reordered by dragging.
pub type SortableContainer = Behavior<ContainerHooks>;

#[derive(Debug)]
pub struct ContainerHooks {
    this: Weak<SortableContainer>,
    data: RefCell<Option<SortableData>>,
}

impl DragHooks for ContainerHooks {}

impl DropHooks for ContainerHooks {
    /// The pointer is over the container itself rather than one of its items: pull the dragged
    /// item in at the top if it lives elsewhere.
    fn on_drag_enter(&self, core: &BehaviorCore, _event: &DragEvent) {
        let ctx = core.context();
        if !ctx.is_sorting() {
            return;
        }
        let Some(this) = self.this.upgrade() else {
            return;
        };
        let (source, index) = {
            let session = ctx.sortable_session();
            (session.source(), session.index())
        };
        if let (Some(source), Some(index)) = (source, index) {
            match source.get_item_at(index) {
                Some(item) if this.index_of(&item).is_none() => {
                    log::debug!("container {:?} adopts dragged item", core.element());
                    if let Err(err) = relocate(ctx, &this, 0) {
                        log::warn!("sortable relocation into empty space failed: {err}");
                    }
                }
                Some(_) => {}
                None => log::trace!("dragged item {index} no longer in its source"),
            }
        }
        core.request_refresh();
    }
}

impl SortableContainer {
    /// Attach a sortable container to `element`. The container itself is not draggable, and
    /// accepts drops once a collection is attached.
    pub fn new(ctx: &DndContext, element: ElementId) -> Rc<Self> {
        Rc::new_cyclic(|this| {
            let core = BehaviorCore::new(ctx, element);
            core.set_drag_enabled(false);
            Self::with_hooks(
                core,
                ContainerHooks {
                    this: this.clone(),
                    data: RefCell::new(None),
                },
            )
        })
    }

    pub fn with_data(ctx: &DndContext, element: ElementId, data: SortableData) -> Rc<Self> {
        let container = Self::new(ctx, element);
        container.set_sortable_data(Some(data));
        container
    }

    pub fn set_sortable_data(&self, data: Option<SortableData>) {
        self.core().set_drop_enabled(data.is_some());
        *self.hooks().data.borrow_mut() = data;
    }

    pub fn sortable_data(&self) -> Option<SortableData> {
        self.hooks().data.borrow().clone()
    }

    fn data(&self) -> Result<SortableData, DndError> {
        self.sortable_data().ok_or(DndError::NoCollection)
    }

    pub fn len(&self) -> usize {
        self.sortable_data().map_or(0, |d| d.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_item_at(&self, index: usize) -> Option<DragData> {
        self.sortable_data()?.with(|s| s.item_at(index))
    }

    pub fn index_of(&self, item: &DragData) -> Option<usize> {
        self.sortable_data()?.with(|s| s.index_of(item))
    }

    /// # Errors
    /// [`DndError::NoCollection`] without attached data, [`DndError::IndexOutOfBounds`] past the end.
    pub fn remove_item_at(&self, index: usize) -> Result<DragData, DndError> {
        self.data()?.with_mut(|s| s.remove_at(index))
    }

    /// # Errors
    /// [`DndError::NoCollection`] without attached data, [`DndError::IndexOutOfBounds`] if `index`
    /// is past the end.
    pub fn insert_item_at(&self, item: DragData, index: usize) -> Result<(), DndError> {
        self.data()?.with_mut(|s| s.insert_at(index, item))
    }

    /// `true` if both containers reorder the same underlying collection (or are the same
    /// container).
    pub fn shares_collection_with(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self.sortable_data(), other.sortable_data()) {
            (Some(a), Some(b)) => a.same_collection(&b),
            _ => false,
        }
    }
}
