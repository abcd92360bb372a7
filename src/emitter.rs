use std::cell::RefCell;
use std::rc::Rc;

type Listener<T> = Rc<dyn Fn(&T)>;

/// An output of a behavior: observers subscribe, the behavior emits.
///
/// Listeners are called in subscription order. The listener list is snapshotted before calling, so a
/// listener may subscribe further listeners without tripping a `RefCell` borrow.
pub struct EventEmitter<T> {
    listeners: RefCell<Vec<Listener<T>>>,
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl<T> EventEmitter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn emit(&self, value: &T) {
        let listeners: Vec<Listener<T>> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(value);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T> std::fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
