use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::behavior::{Behavior, BehaviorCore, DragHooks, DropHooks};
use crate::context::DndContext;
use crate::emitter::EventEmitter;
use crate::payload::{DragData, DragDropData};
use crate::platform::{DragEvent, ElementId};
use crate::session::SuccessSink;

use super::container::SortableContainer;
use super::relocate;

/// One reorderable entry of a [`SortableContainer`].
pub type SortableItem = Behavior<ItemHooks>;

#[derive(Debug)]
pub struct ItemHooks {
    container: Rc<SortableContainer>,
    index: Cell<usize>,
    drag_data: RefCell<Option<DragData>>,

    pub drag_start: EventEmitter<Option<DragData>>,
    pub drag_over: EventEmitter<Option<DragData>>,
    pub drag_end: EventEmitter<Option<DragData>>,
    pub drop_success: EventEmitter<Option<DragData>>,

    /// Fired by the drop target after a successful drop.
    pub drag_success: SuccessSink,
}

impl ItemHooks {
    fn drag_data(&self) -> Option<DragData> {
        self.drag_data.borrow().clone()
    }
}

impl DragHooks for ItemHooks {
    fn on_drag_start(&self, core: &BehaviorCore, _event: &DragEvent) {
        let ctx = core.context();
        ctx.sortable_session_mut()
            .begin(&self.container, self.index.get());
        ctx.mark_hovered(Some(core.element()));

        let drag_data = self.drag_data();
        ctx.drag_session_mut()
            .begin(drag_data.clone(), Some(Rc::clone(&self.drag_success)));
        self.drag_start.emit(&drag_data);
    }

    fn on_drag_end(&self, core: &BehaviorCore, _event: &DragEvent) {
        let ctx = core.context();
        ctx.sortable_session_mut().clear();
        ctx.mark_hovered(None);
        ctx.drag_session_mut().clear();
        self.drag_end.emit(&self.drag_data());
    }
}

impl DropHooks for ItemHooks {
    /// Moves the dragged item to this item's slot.
    fn on_drag_enter(&self, core: &BehaviorCore, _event: &DragEvent) {
        let ctx = core.context();
        if !ctx.is_sorting() {
            return;
        }
        ctx.mark_hovered(Some(core.element()));

        let index = self.index.get();
        let (source, from) = {
            let session = ctx.sortable_session();
            (session.source(), session.index())
        };
        let Some(source) = source else {
            log::trace!("sortable source container is gone");
            return;
        };
        if from == Some(index) && source.shares_collection_with(&self.container) {
            return;
        }

        match relocate(ctx, &self.container, index) {
            Ok(_) => {
                if self.container.core().drop_enabled() {
                    self.container.core().set_drop_enabled(false);
                }
                core.request_refresh();
            }
            Err(err) => log::warn!("sortable relocation to index {index} failed: {err}"),
        }
    }

    /// Moves the insertion marker without moving data.
    fn on_drag_over(&self, core: &BehaviorCore, _event: &DragEvent) {
        let ctx = core.context();
        let (sorting, hovered) = {
            let session = ctx.sortable_session();
            (session.in_progress(), session.hovered())
        };
        if !sorting || hovered == Some(core.element()) {
            return;
        }
        ctx.sortable_session_mut()
            .retarget(&self.container, self.index.get());
        ctx.mark_hovered(Some(core.element()));
        let payload = ctx.drag_session().payload().cloned();
        self.drag_over.emit(&payload);
    }

    fn on_drop(&self, core: &BehaviorCore, event: &DragEvent) {
        let ctx = core.context();
        if !ctx.is_sorting() {
            return;
        }
        let (payload, sink) = {
            let session = ctx.drag_session();
            (session.payload().cloned(), session.on_success().cloned())
        };
        self.drop_success.emit(&payload);
        if let Some(sink) = sink {
            sink.emit(&DragDropData::new(payload, event));
        }
        self.container.core().request_refresh();
    }
}

impl SortableItem {
    /// Attach a sortable item at `index` of `container`. Drag and drop are enabled, and the item
    /// takes the container's drop zones.
    pub fn new(
        ctx: &DndContext,
        element: ElementId,
        container: &Rc<SortableContainer>,
        index: usize,
    ) -> Self {
        let core = BehaviorCore::new(ctx, element);
        core.set_drop_zones(container.core().drop_zones());
        core.set_drag_enabled(true);
        core.set_drop_enabled(true);
        Self::with_hooks(
            core,
            ItemHooks {
                container: Rc::clone(container),
                index: Cell::new(index),
                drag_data: RefCell::new(None),
                drag_start: EventEmitter::new(),
                drag_over: EventEmitter::new(),
                drag_end: EventEmitter::new(),
                drop_success: EventEmitter::new(),
                drag_success: SuccessSink::default(),
            },
        )
    }

    pub fn index(&self) -> usize {
        self.hooks().index.get()
    }

    pub fn set_index(&self, index: usize) {
        self.hooks().index.set(index);
    }

    pub fn container(&self) -> &Rc<SortableContainer> {
        &self.hooks().container
    }

    pub fn set_drag_data(&self, drag_data: Option<DragData>) {
        *self.hooks().drag_data.borrow_mut() = drag_data;
    }

    pub fn drag_data(&self) -> Option<DragData> {
        self.hooks().drag_data()
    }

    pub fn drag_start(&self) -> &EventEmitter<Option<DragData>> {
        &self.hooks().drag_start
    }

    pub fn drag_over(&self) -> &EventEmitter<Option<DragData>> {
        &self.hooks().drag_over
    }

    pub fn drag_end(&self) -> &EventEmitter<Option<DragData>> {
        &self.hooks().drag_end
    }

    pub fn drop_success(&self) -> &EventEmitter<Option<DragData>> {
        &self.hooks().drop_success
    }

    pub fn drag_success(&self) -> &EventEmitter<DragDropData> {
        &self.hooks().drag_success
    }
}
