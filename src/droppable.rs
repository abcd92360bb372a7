use crate::behavior::{Behavior, BehaviorCore, DragHooks, DropHooks};
use crate::context::DndContext;
use crate::emitter::EventEmitter;
use crate::payload::DragDropData;
use crate::platform::{DragEvent, ElementId};

/// A drop target.
pub type Droppable = Behavior<DroppableHooks>;

#[derive(Debug, Default)]
pub struct DroppableHooks {
    /// Fired on a successful drop, before the drag source's `drag_success`.
    pub drop_success: EventEmitter<DragDropData>,
    pub drag_enter: EventEmitter<DragDropData>,
    pub drag_over: EventEmitter<DragDropData>,
    pub drag_leave: EventEmitter<DragDropData>,
}

fn current(core: &BehaviorCore, event: &DragEvent) -> Option<DragDropData> {
    let session = core.context().drag_session();
    session
        .in_progress()
        .then(|| DragDropData::new(session.payload().cloned(), event))
}

impl DragHooks for DroppableHooks {}

impl DropHooks for DroppableHooks {
    fn on_drag_enter(&self, core: &BehaviorCore, event: &DragEvent) {
        let Some(data) = current(core, event) else {
            return;
        };
        let ctx = core.context();
        ctx.platform()
            .add_class(core.element(), &ctx.config().drag_enter_class);
        self.drag_enter.emit(&data);
    }

    fn on_drag_over(&self, core: &BehaviorCore, event: &DragEvent) {
        let Some(data) = current(core, event) else {
            return;
        };
        let ctx = core.context();
        ctx.platform()
            .add_class(core.element(), &ctx.config().drag_over_class);
        self.drag_over.emit(&data);
    }

    fn on_drag_leave(&self, core: &BehaviorCore, event: &DragEvent) {
        let Some(data) = current(core, event) else {
            return;
        };
        remove_feedback(core);
        self.drag_leave.emit(&data);
    }

    fn on_drop(&self, core: &BehaviorCore, event: &DragEvent) {
        let (in_progress, payload, sink) = {
            let session = core.context().drag_session();
            (
                session.in_progress(),
                session.payload().cloned(),
                session.on_success().cloned(),
            )
        };
        if !(in_progress || event.has_files()) {
            return;
        }
        log::debug!("drop accepted on {:?}", core.element());
        let data = DragDropData::new(payload, event);
        self.drop_success.emit(&data);
        if let Some(sink) = sink {
            sink.emit(&data);
        }
        remove_feedback(core);
    }
}

fn remove_feedback(core: &BehaviorCore) {
    let ctx = core.context();
    let platform = ctx.platform();
    platform.remove_class(core.element(), &ctx.config().drag_over_class);
    platform.remove_class(core.element(), &ctx.config().drag_enter_class);
}

impl Droppable {
    /// Attach a drop target to `element`. Dropping is enabled.
    pub fn new(ctx: &DndContext, element: ElementId) -> Self {
        let core = BehaviorCore::new(ctx, element);
        core.set_drop_enabled(true);
        Self::with_hooks(core, DroppableHooks::default())
    }

    pub fn drop_success(&self) -> &EventEmitter<DragDropData> {
        &self.hooks().drop_success
    }

    pub fn drag_enter(&self) -> &EventEmitter<DragDropData> {
        &self.hooks().drag_enter
    }

    pub fn drag_over(&self) -> &EventEmitter<DragDropData> {
        &self.hooks().drag_over
    }

    pub fn drag_leave(&self) -> &EventEmitter<DragDropData> {
        &self.hooks().drag_leave
    }
}
