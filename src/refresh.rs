//! Deferred view refresh.
//!
//! After a drop or a sortable relocation the owning view should redraw, but some hosts render the
//! state of the current event turn stale. Behaviors therefore ask for a redraw *after* a delay
//! ([`crate::DndConfig::refresh_delay`]) instead of inline. The request goes through a weak
//! reference: once the view is gone the request silently does nothing.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// A view that can be asked to redraw no sooner than `delay` from now.
pub trait RequestRefresh {
    fn request_refresh_after(&self, delay: Duration);
}

impl RequestRefresh for egui::Context {
    fn request_refresh_after(&self, delay: Duration) {
        self.request_repaint_after(delay);
    }
}

/// The refresh hook of one behavior.
#[derive(Default)]
pub struct Refresher {
    view: RefCell<Option<Weak<dyn RequestRefresh>>>,
}

impl Refresher {
    /// Attach the view to refresh. Only a weak reference is kept.
    pub fn attach<V: RequestRefresh + 'static>(&self, view: &Rc<V>) {
        let view: Rc<dyn RequestRefresh> = view.clone();
        *self.view.borrow_mut() = Some(Rc::downgrade(&view));
    }

    pub fn detach(&self) {
        *self.view.borrow_mut() = None;
    }

    /// Returns `true` if a live view received the request.
    pub fn request(&self, delay: Duration) -> bool {
        let view = self.view.borrow().as_ref().and_then(Weak::upgrade);
        if let Some(view) = view {
            view.request_refresh_after(delay);
            true
        } else {
            log::trace!("refresh skipped: no live view");
            false
        }
    }
}

impl std::fmt::Debug for Refresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let live = self.view.borrow().as_ref().is_some_and(|w| w.strong_count() > 0);
        f.debug_struct("Refresher").field("live", &live).finish()
    }
}
