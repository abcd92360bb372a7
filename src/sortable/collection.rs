use std::cell::RefCell;
use std::rc::Rc;

use crate::error::DndError;
use crate::payload::DragData;

/// Index-based access a sortable container needs from its backing collection.
pub trait SequenceAdapter {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn item_at(&self, index: usize) -> Option<DragData>;

    fn index_of(&self, item: &DragData) -> Option<usize>;

    /// # Errors
    /// [`DndError::IndexOutOfBounds`] if `index >= len`.
    fn remove_at(&mut self, index: usize) -> Result<DragData, DndError>;

    /// Insert before `index`; `index == len` appends.
    ///
    /// # Errors
    /// [`DndError::IndexOutOfBounds`] if `index > len`.
    fn insert_at(&mut self, index: usize, item: DragData) -> Result<(), DndError>;
}

impl SequenceAdapter for Vec<DragData> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn item_at(&self, index: usize) -> Option<DragData> {
        self.get(index).cloned()
    }

    fn index_of(&self, item: &DragData) -> Option<usize> {
        self.iter().position(|i| i == item)
    }

    fn remove_at(&mut self, index: usize) -> Result<DragData, DndError> {
        let len = self.as_slice().len();
        if index >= len {
            return Err(DndError::IndexOutOfBounds { index, len });
        }
        Ok(self.remove(index))
    }

    fn insert_at(&mut self, index: usize, item: DragData) -> Result<(), DndError> {
        let len = self.as_slice().len();
        if index > len {
            return Err(DndError::IndexOutOfBounds { index, len });
        }
        self.insert(index, item);
        Ok(())
    }
}

/// A form-bound ordered collection: each item is a sub-form node.
///
/// Structural changes mark the array dirty and bump [`Self::revision`], which is what form
/// bindings watch to re-validate and re-render.
#[derive(Debug, Default)]
pub struct FormArray {
    controls: Vec<DragData>,
    dirty: bool,
    revision: u64,
}

impl FormArray {
    pub fn new(controls: Vec<DragData>) -> Self {
        Self {
            controls,
            dirty: false,
            revision: 0,
        }
    }

    pub fn controls(&self) -> &[DragData] {
        &self.controls
    }

    pub fn at(&self, index: usize) -> Option<&DragData> {
        self.controls.get(index)
    }

    pub fn push(&mut self, control: DragData) {
        self.controls.push(control);
        self.changed();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_pristine(&mut self) {
        self.dirty = false;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn changed(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }
}

impl SequenceAdapter for FormArray {
    fn len(&self) -> usize {
        self.controls.len()
    }

    fn item_at(&self, index: usize) -> Option<DragData> {
        self.at(index).cloned()
    }

    fn index_of(&self, item: &DragData) -> Option<usize> {
        self.controls.index_of(item)
    }

    fn remove_at(&mut self, index: usize) -> Result<DragData, DndError> {
        let control = self.controls.remove_at(index)?;
        self.changed();
        Ok(control)
    }

    fn insert_at(&mut self, index: usize, item: DragData) -> Result<(), DndError> {
        self.controls.insert_at(index, item)?;
        self.changed();
        Ok(())
    }
}

/// The collection a sortable container reorders, shared with the application.
#[derive(Clone, Debug)]
pub enum SortableData {
    Plain(Rc<RefCell<Vec<DragData>>>),
    FormBound(Rc<RefCell<FormArray>>),
}

impl SortableData {
    pub fn plain(items: Vec<DragData>) -> Self {
        Self::Plain(Rc::new(RefCell::new(items)))
    }

    pub fn form_bound(array: FormArray) -> Self {
        Self::FormBound(Rc::new(RefCell::new(array)))
    }

    pub fn with<R>(&self, f: impl FnOnce(&dyn SequenceAdapter) -> R) -> R {
        match self {
            Self::Plain(items) => f(&*items.borrow()),
            Self::FormBound(array) => f(&*array.borrow()),
        }
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut dyn SequenceAdapter) -> R) -> R {
        match self {
            Self::Plain(items) => f(&mut *items.borrow_mut()),
            Self::FormBound(array) => f(&mut *array.borrow_mut()),
        }
    }

    pub fn len(&self) -> usize {
        self.with(|s| s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.with(|s| s.is_empty())
    }

    /// `true` if both handles share one underlying collection.
    pub fn same_collection(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Plain(a), Self::Plain(b)) => Rc::ptr_eq(a, b),
            (Self::FormBound(a), Self::FormBound(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
