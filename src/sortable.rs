//! Sortable lists: containers owning an ordered collection, and items reordered by dragging.
//!
//! While a reorder gesture is live the dragged item is moved *eagerly*: every time the pointer
//! enters another item (or the empty space of another container) the item is removed from where the
//! [`crate::SortableSession`] says it currently is and inserted at the new position. A drop then
//! only has to confirm the result.
//!
//! A move is a remove followed by an insert with nothing in between, so no observer ever sees the
//! item in zero or two collections.
//!
//! ```
//! use std::rc::Rc;
//! use egui_dnd_sortable::{DndContext, DragData, DragEvent, HeadlessDom, SortableContainer,
//!     SortableData, SortableItem};
//!
//! let dom = Rc::new(HeadlessDom::new());
//! let ctx = DndContext::with_platform(dom.clone());
//!
//! let (x, y) = (DragData::new("x"), DragData::new("y"));
//! let list = dom.create_element("ul");
//! let container = SortableContainer::with_data(
//!     &ctx,
//!     list,
//!     SortableData::plain(vec![x.clone(), y.clone()]),
//! );
//! let first = SortableItem::new(&ctx, dom.create_child(list, "li"), &container, 0);
//! let second = SortableItem::new(&ctx, dom.create_child(list, "li"), &container, 1);
//!
//! first.handle_drag_start(&mut DragEvent::new(first.element()));
//! second.handle_drag_enter(&DragEvent::new(second.element()));
//! first.handle_drag_end(&DragEvent::new(first.element()));
//!
//! assert_eq!(container.get_item_at(0), Some(y));
//! assert_eq!(container.get_item_at(1), Some(x));
//! ```

mod collection;
mod container;
mod item;


use std::rc::Rc;

use crate::context::DndContext;
use crate::error::DndError;
use crate::payload::DragData;

pub use collection::{FormArray, SequenceAdapter, SortableData};
pub use container::{ContainerHooks, SortableContainer};
pub use item::{ItemHooks, SortableItem};

/// Move the dragged item from the session's recorded position to `index` of `target`, and point
/// the session at its new position.
///
/// An emptied source container accepts drops again. If the insert fails the item is put back where
/// it came from.
pub(crate) fn relocate(
    ctx: &DndContext,
    target: &Rc<SortableContainer>,
    index: usize,
) -> Result<DragData, DndError> {
    let (source, from) = {
        let session = ctx.sortable_session();
        (session.source(), session.index())
    };
    let (Some(source), Some(from)) = (source, from) else {
        return Err(DndError::NoCollection);
    };

    let item = source.remove_item_at(from)?;
    if let Err(err) = target.insert_item_at(item.clone(), index) {
        if let Err(restore) = source.insert_item_at(item, from) {
            log::warn!("could not restore dragged item to index {from}: {restore}");
        }
        return Err(err);
    }
    if source.is_empty() {
        source.core().set_drop_enabled(true);
    }

    log::debug!(
        "sortable move {:?}[{from}] -> {:?}[{index}]",
        source.element(),
        target.element()
    );
    ctx.sortable_session_mut().retarget(target, index);
    Ok(item)
}
