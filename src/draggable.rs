use std::cell::RefCell;
use std::rc::Rc;

use crate::behavior::{Behavior, BehaviorCore, DragHooks, DropHooks};
use crate::context::DndContext;
use crate::emitter::EventEmitter;
use crate::payload::{DragData, DragDropData};
use crate::platform::{DragEvent, ElementId};
use crate::session::SuccessSink;

/// A drag source.
pub type Draggable = Behavior<DraggableHooks>;

#[derive(Debug, Default)]
pub struct DraggableHooks {
    drag_data: RefCell<Option<DragData>>,

    pub on_drag_start: EventEmitter<DragDropData>,
    pub on_drag_end: EventEmitter<DragDropData>,

    /// Fired by the drop target after a successful drop, after its own `drop_success`.
    pub drag_success: SuccessSink,
}

impl DraggableHooks {
    fn drag_data(&self) -> Option<DragData> {
        self.drag_data.borrow().clone()
    }
}

impl DragHooks for DraggableHooks {
    fn on_drag_start(&self, core: &BehaviorCore, event: &DragEvent) {
        let ctx = core.context();
        let drag_data = self.drag_data();
        ctx.drag_session_mut()
            .begin(drag_data.clone(), Some(Rc::clone(&self.drag_success)));
        ctx.platform()
            .add_class(core.element(), &ctx.config().drag_start_class);
        self.on_drag_start.emit(&DragDropData::new(drag_data, event));
    }

    fn on_drag_end(&self, core: &BehaviorCore, event: &DragEvent) {
        let ctx = core.context();
        ctx.drag_session_mut().clear();
        ctx.platform()
            .remove_class(core.element(), &ctx.config().drag_start_class);
        self.on_drag_end
            .emit(&DragDropData::new(self.drag_data(), event));
    }
}

impl DropHooks for DraggableHooks {}

impl Draggable {
    /// Attach a drag source to `element`. Dragging is enabled.
    pub fn new(ctx: &DndContext, element: ElementId) -> Self {
        let core = BehaviorCore::new(ctx, element);
        core.set_drag_enabled(true);
        Self::with_hooks(core, DraggableHooks::default())
    }

    pub fn set_drag_data(&self, drag_data: Option<DragData>) {
        *self.hooks().drag_data.borrow_mut() = drag_data;
    }

    pub fn drag_data(&self) -> Option<DragData> {
        self.hooks().drag_data()
    }

    pub fn on_drag_start(&self) -> &EventEmitter<DragDropData> {
        &self.hooks().on_drag_start
    }

    pub fn on_drag_end(&self) -> &EventEmitter<DragDropData> {
        &self.hooks().on_drag_end
    }

    pub fn drag_success(&self) -> &EventEmitter<DragDropData> {
        &self.hooks().drag_success
    }
}
