use std::any::Any;
use std::rc::Rc;

use crate::platform::DragEvent;

/// Opaque application data carried by a drag, or stored as an item of a sortable collection.
///
/// Cloning is cheap and keeps identity: two `DragData` compare equal only if they are clones of
/// the same value, which is how a sortable container finds "the dragged item" in its collection.
#[derive(Clone)]
pub struct DragData(Rc<dyn Any>);

impl DragData {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for DragData {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for DragData {}

impl std::fmt::Debug for DragData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DragData({:p})", Rc::as_ptr(&self.0))
    }
}

/// What a drag or drop observer is told: the payload in flight plus the event that triggered the
/// notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragDropData {
    pub drag_data: Option<DragData>,
    pub event: DragEvent,
}

impl DragDropData {
    pub fn new(drag_data: Option<DragData>, event: &DragEvent) -> Self {
        Self {
            drag_data,
            event: event.clone(),
        }
    }
}
