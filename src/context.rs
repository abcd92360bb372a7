use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::config::DndConfig;
use crate::platform::{ElementId, Platform};
use crate::session::{DragSession, SortableSession};

struct ContextInner {
    config: DndConfig,
    platform: Rc<dyn Platform>,
    drag: RefCell<DragSession>,
    sortable: RefCell<SortableSession>,
    source: Cell<Option<GestureSource>>,
}

/// The element that started the current gesture, and its drag ghost if one was spawned.
#[derive(Clone, Copy, Debug)]
struct GestureSource {
    element: ElementId,
    helper: Option<ElementId>,
}

/// Shared state injected into every behavior at construction.
///
/// One context per application (or per independent drag-and-drop domain). Clones share the same
/// sessions. Never hold a session borrow across a hook or an emitter call.
#[derive(Clone)]
pub struct DndContext {
    inner: Rc<ContextInner>,
}

impl DndContext {
    pub fn new(config: DndConfig, platform: Rc<dyn Platform>) -> Self {
        Self {
            inner: Rc::new(ContextInner {
                config,
                platform,
                drag: RefCell::new(DragSession::default()),
                sortable: RefCell::new(SortableSession::default()),
                source: Cell::new(None),
            }),
        }
    }

    pub fn with_platform(platform: Rc<dyn Platform>) -> Self {
        Self::new(DndConfig::default(), platform)
    }

    pub fn config(&self) -> &DndConfig {
        &self.inner.config
    }

    pub fn platform(&self) -> &dyn Platform {
        self.inner.platform.as_ref()
    }

    pub fn drag_session(&self) -> Ref<'_, DragSession> {
        self.inner.drag.borrow()
    }

    pub(crate) fn drag_session_mut(&self) -> RefMut<'_, DragSession> {
        self.inner.drag.borrow_mut()
    }

    pub fn sortable_session(&self) -> Ref<'_, SortableSession> {
        self.inner.sortable.borrow()
    }

    pub(crate) fn sortable_session_mut(&self) -> RefMut<'_, SortableSession> {
        self.inner.sortable.borrow_mut()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.drag.borrow().in_progress()
    }

    pub fn is_sorting(&self) -> bool {
        self.inner.sortable.borrow().in_progress()
    }

    /// Move the sortable marker class to `element`, or remove it entirely for `None`.
    pub(crate) fn mark_hovered(&self, element: Option<ElementId>) {
        let previous = self.inner.sortable.borrow_mut().replace_hovered(element);
        let class = &self.inner.config.sortable_drag_class;
        if let Some(previous) = previous {
            self.platform().remove_class(previous, class);
        }
        if let Some(element) = element {
            self.platform().add_class(element, class);
        }
    }

    pub(crate) fn set_gesture_source(&self, element: Option<ElementId>) {
        self.inner
            .source
            .set(element.map(|element| GestureSource { element, helper: None }));
    }

    pub(crate) fn set_gesture_helper(&self, helper: ElementId) {
        if let Some(mut source) = self.inner.source.get() {
            source.helper = Some(helper);
            self.inner.source.set(Some(source));
        }
    }

    /// Forget the current gesture.
    ///
    /// A native drag abandoned without a terminating `dragend` leaves both sessions active until the
    /// next drag start overwrites them; the abandoned source keeps its drag-start class in that
    /// case. Hosts that can detect such a cancellation (window blur, escape key, pointer capture
    /// loss) call this to clear the sessions immediately. The drag-start class and the drag ghost of
    /// the latest source are removed as well.
    pub fn abort_gesture(&self) {
        log::debug!("gesture aborted");
        if let Some(source) = self.inner.source.take() {
            let platform = self.platform();
            platform.remove_class(source.element, &self.inner.config.drag_start_class);
            if let Some(helper) = source.helper {
                if let Some(parent) = platform.parent(helper) {
                    platform.remove_child(parent, helper);
                }
            }
        }
        {
            let mut drag = self.inner.drag.borrow_mut();
            drag.clear();
            drag.set_allowed_drop_zones(Vec::new());
        }
        self.inner.sortable.borrow_mut().clear();
        self.mark_hovered(None);
    }
}

impl std::fmt::Debug for DndContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DndContext")
            .field("config", &self.inner.config)
            .field("drag", &self.inner.drag)
            .field("sortable", &self.inner.sortable)
            .finish_non_exhaustive()
    }
}
