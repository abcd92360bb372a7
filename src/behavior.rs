//! The event dispatcher shared by every drag-and-drop behavior.
//!
//! A [`Behavior`] owns the per-element configuration ([`BehaviorCore`]) and routes native drag
//! events to a hook implementation (`H`). Draggables, droppables and sortables differ only in their
//! hooks; the handle check, drag image selection, cursor handling and drop-allowed gating live here.
//!
//! ## Event order
//!
//! The host calls [`Behavior::handle_pointer_down`] on `mousedown`, then the `handle_drag_*`
//! methods in native order. Drop-side handlers fire their hook only when
//! [`BehaviorCore::is_drop_allowed`] passes.

mod drop_policy;

#[cfg(test)]
mod dispatch_tests;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::DragImageSource;
use crate::context::DndContext;
use crate::platform::{DragEvent, ElementId};
use crate::refresh::{Refresher, RequestRefresh};

pub use drop_policy::{AllowDropFn, zones_allow};

/// Hooks fired on the drag source.
pub trait DragHooks {
    fn on_drag_start(&self, _core: &BehaviorCore, _event: &DragEvent) {}

    fn on_drag_end(&self, _core: &BehaviorCore, _event: &DragEvent) {}
}

/// Hooks fired on a drop target, only after the drop-allowed check passed.
pub trait DropHooks {
    fn on_drag_enter(&self, _core: &BehaviorCore, _event: &DragEvent) {}

    fn on_drag_over(&self, _core: &BehaviorCore, _event: &DragEvent) {}

    fn on_drag_leave(&self, _core: &BehaviorCore, _event: &DragEvent) {}

    fn on_drop(&self, _core: &BehaviorCore, _event: &DragEvent) {}
}

/// The bare behavior: configuration and dispatch, no reactions.
impl DragHooks for () {}

impl DropHooks for () {}

/// Per-element settings, mutable at any time through the [`BehaviorCore`] setters.
#[derive(Clone, Default)]
pub struct BehaviorConfig {
    pub drag_enabled: bool,
    pub drop_enabled: bool,

    /// If set, a drag only starts when the pointer went down inside this element.
    pub drag_handle: Option<ElementId>,

    pub effect_allowed: Option<String>,
    pub effect_cursor: Option<String>,

    /// Drop-zone tags. On a drag source they restrict where it may land; on a target they say which
    /// restricted drags it accepts.
    pub drop_zones: Vec<String>,

    /// Replaces the zone check when set.
    pub allow_drop: Option<AllowDropFn>,

    pub drag_image: Option<DragImageSource>,

    /// Use a clone of the element as drag image when no other image is configured.
    pub clone_item: bool,
}

impl std::fmt::Debug for BehaviorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorConfig")
            .field("drag_enabled", &self.drag_enabled)
            .field("drop_enabled", &self.drop_enabled)
            .field("drag_handle", &self.drag_handle)
            .field("effect_allowed", &self.effect_allowed)
            .field("effect_cursor", &self.effect_cursor)
            .field("drop_zones", &self.drop_zones)
            .field("allow_drop", &self.allow_drop.is_some())
            .field("drag_image", &self.drag_image)
            .field("clone_item", &self.clone_item)
            .finish()
    }
}

/// The state one behavior keeps about its element.
#[derive(Debug)]
pub struct BehaviorCore {
    element: ElementId,
    ctx: DndContext,
    config: RefCell<BehaviorConfig>,
    default_cursor: String,

    /// Target of the last pointer-down, for the handle check.
    pointer_target: Cell<Option<ElementId>>,

    /// Clone created as drag image, removed again on drag end.
    drag_helper: Cell<Option<ElementId>>,

    refresher: Refresher,
}

impl BehaviorCore {
    pub fn new(ctx: &DndContext, element: ElementId) -> Self {
        let default_cursor = ctx.config().default_cursor.clone();
        ctx.platform().set_style(element, "cursor", &default_cursor);
        Self {
            element,
            ctx: ctx.clone(),
            config: RefCell::new(BehaviorConfig::default()),
            default_cursor,
            pointer_target: Cell::new(None),
            drag_helper: Cell::new(None),
            refresher: Refresher::default(),
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn context(&self) -> &DndContext {
        &self.ctx
    }

    /// A snapshot of the current settings.
    pub fn config(&self) -> BehaviorConfig {
        self.config.borrow().clone()
    }

    pub fn drag_enabled(&self) -> bool {
        self.config.borrow().drag_enabled
    }

    pub fn set_drag_enabled(&self, enabled: bool) {
        self.config.borrow_mut().drag_enabled = enabled;
        self.ctx.platform().set_draggable(self.element, enabled);
    }

    pub fn drop_enabled(&self) -> bool {
        self.config.borrow().drop_enabled
    }

    pub fn set_drop_enabled(&self, enabled: bool) {
        self.config.borrow_mut().drop_enabled = enabled;
    }

    pub fn drag_handle(&self) -> Option<ElementId> {
        self.config.borrow().drag_handle
    }

    pub fn set_drag_handle(&self, handle: Option<ElementId>) {
        self.config.borrow_mut().drag_handle = handle;
    }

    pub fn drop_zones(&self) -> Vec<String> {
        self.config.borrow().drop_zones.clone()
    }

    pub fn set_drop_zones<S: Into<String>>(&self, zones: impl IntoIterator<Item = S>) {
        self.config.borrow_mut().drop_zones = zones.into_iter().map(Into::into).collect();
    }

    pub fn set_allow_drop(&self, allow_drop: Option<AllowDropFn>) {
        self.config.borrow_mut().allow_drop = allow_drop;
    }

    pub fn set_drag_image(&self, drag_image: Option<DragImageSource>) {
        self.config.borrow_mut().drag_image = drag_image;
    }

    pub fn set_effect_allowed(&self, effect: Option<String>) {
        self.config.borrow_mut().effect_allowed = effect;
    }

    pub fn set_effect_cursor(&self, cursor: Option<String>) {
        self.config.borrow_mut().effect_cursor = cursor;
    }

    pub fn set_clone_item(&self, clone_item: bool) {
        self.config.borrow_mut().clone_item = clone_item;
    }

    /// Attach the view that redraws this element. Only a weak reference is kept.
    pub fn attach_view<V: RequestRefresh + 'static>(&self, view: &Rc<V>) {
        self.refresher.attach(view);
    }

    pub fn detach_view(&self) {
        self.refresher.detach();
    }

    /// Ask the attached view to redraw after the configured delay.
    pub fn request_refresh(&self) -> bool {
        self.refresher.request(self.ctx.config().refresh_delay)
    }

    pub fn is_drop_allowed(&self, event: &DragEvent) -> bool {
        let (in_progress, payload, drag_zones) = {
            let session = self.ctx.drag_session();
            (
                session.in_progress(),
                session.payload().cloned(),
                session.allowed_drop_zones().to_vec(),
            )
        };
        let config = self.config();
        drop_policy::DropCheck {
            gesture_active: in_progress || event.has_files(),
            drop_enabled: config.drop_enabled,
            allow_drop: config.allow_drop.as_ref(),
            payload: payload.as_ref(),
            drag_zones: &drag_zones,
            target_zones: &config.drop_zones,
        }
        .evaluate()
    }

    /// The element whose cursor reflects the drag: the handle if there is one.
    fn cursor_element(&self) -> ElementId {
        self.drag_handle().unwrap_or(self.element)
    }

    fn spawn_drag_helper(&self) -> ElementId {
        let platform = self.ctx.platform();
        let helper = platform.clone_element(self.element);
        platform.add_class(helper, &self.ctx.config().drag_helper_class);
        platform.set_style(helper, "position", "absolute");
        platform.set_style(helper, "top", "0px");
        platform.set_style(helper, "left", "-1000px");
        if let Some(parent) = platform.parent(self.element) {
            platform.append_child(parent, helper);
        }
        self.drag_helper.set(Some(helper));
        self.ctx.set_gesture_helper(helper);
        helper
    }

    fn remove_drag_helper(&self) {
        let Some(helper) = self.drag_helper.take() else {
            return;
        };
        let platform = self.ctx.platform();
        if let Some(parent) = platform.parent(helper) {
            platform.remove_child(parent, helper);
        }
    }
}

/// A behavior attached to one element: shared dispatch plus variant hooks.
#[derive(Debug)]
pub struct Behavior<H> {
    core: BehaviorCore,
    hooks: H,
}

impl<H> Behavior<H> {
    pub fn with_hooks(core: BehaviorCore, hooks: H) -> Self {
        Self { core, hooks }
    }

    pub fn core(&self) -> &BehaviorCore {
        &self.core
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn element(&self) -> ElementId {
        self.core.element
    }
}

impl Behavior<()> {
    /// A behavior without reactions: drag and drop disabled until configured.
    pub fn bare(ctx: &DndContext, element: ElementId) -> Self {
        Self::with_hooks(BehaviorCore::new(ctx, element), ())
    }
}

impl<H: DragHooks + DropHooks> Behavior<H> {
    pub fn handle_pointer_down(&self, target: Option<ElementId>) {
        self.core.pointer_target.set(target);
    }

    pub fn handle_drag_start(&self, event: &mut DragEvent) {
        let core = &self.core;
        let ctx = &core.ctx;
        let platform = ctx.platform();

        if let Some(handle) = core.drag_handle() {
            let inside = core
                .pointer_target
                .get()
                .is_some_and(|target| platform.contains(handle, target));
            if !inside {
                log::trace!("drag start outside handle on {:?}, cancelled", core.element);
                event.prevent_default();
                return;
            }
        }

        let config = core.config();
        if config.drag_enabled {
            ctx.drag_session_mut()
                .set_allowed_drop_zones(config.drop_zones.clone());
            ctx.set_gesture_source(Some(core.element));
            self.hooks.on_drag_start(core, event);
        }

        let offset = event.offset;
        let Some(data_transfer) = event.data_transfer.as_mut() else {
            return;
        };
        data_transfer.set_data("text", "");
        data_transfer.effect_allowed = Some(
            config
                .effect_allowed
                .clone()
                .unwrap_or_else(|| ctx.config().drag_effect.name().to_owned()),
        );

        let image = if let Some(source) = &config.drag_image {
            Some(source.resolve(platform))
        } else if let Some(image) = &ctx.config().drag_image {
            Some(image.resolve(platform))
        } else if config.clone_item {
            Some((core.spawn_drag_helper(), offset))
        } else {
            None
        };
        if let Some((image, image_offset)) = image {
            data_transfer.set_drag_image(image, image_offset);
        }

        let cursor = if config.drag_enabled {
            config
                .effect_cursor
                .unwrap_or_else(|| ctx.config().drag_cursor.clone())
        } else {
            core.default_cursor.clone()
        };
        platform.set_style(core.cursor_element(), "cursor", &cursor);
    }

    pub fn handle_drag_end(&self, event: &DragEvent) {
        let core = &self.core;
        core.remove_drag_helper();
        core.ctx.drag_session_mut().set_allowed_drop_zones(Vec::new());
        core.ctx.set_gesture_source(None);
        self.hooks.on_drag_end(core, event);
        core.ctx
            .platform()
            .set_style(core.cursor_element(), "cursor", &core.default_cursor);
    }

    pub fn handle_drag_enter(&self, event: &DragEvent) {
        if self.core.is_drop_allowed(event) {
            self.hooks.on_drag_enter(&self.core, event);
        }
    }

    /// The configured drop effect is reported on every drag-over; only an allowed one is
    /// accepted (`prevent_default`) and reaches the hook.
    pub fn handle_drag_over(&self, event: &mut DragEvent) {
        if self.core.is_drop_allowed(event) {
            event.prevent_default();
            self.hooks.on_drag_over(&self.core, event);
        }
        let drop_effect = self.core.ctx.config().drop_effect.name();
        if let Some(data_transfer) = event.data_transfer.as_mut() {
            data_transfer.drop_effect = Some(drop_effect.to_owned());
        }
    }

    pub fn handle_drag_leave(&self, event: &DragEvent) {
        if self.core.is_drop_allowed(event) {
            self.hooks.on_drag_leave(&self.core, event);
        }
    }

    pub fn handle_drop(&self, event: &mut DragEvent) {
        if !self.core.is_drop_allowed(event) {
            log::trace!("drop on {:?} rejected", self.core.element);
            return;
        }
        event.prevent_default();
        event.stop_propagation();
        self.hooks.on_drop(&self.core, event);
        self.core.request_refresh();
    }
}
