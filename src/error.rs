/// Errors from the index operations of a [`crate::SortableContainer`].
///
/// Behaviors never surface these to the host: a failed relocation is logged and abandoned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DndError {
    /// The index does not address an item (or, for insertion, a gap) of the collection.
    IndexOutOfBounds { index: usize, len: usize },

    /// The container has no backing collection attached.
    NoCollection,
}

impl std::fmt::Display for DndError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "sortable index {index} out of bounds (len {len})")
            }
            Self::NoCollection => write!(f, "sortable container has no collection attached"),
        }
    }
}

impl std::error::Error for DndError {}
