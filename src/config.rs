use std::rc::Rc;
use std::time::Duration;

use egui::Vec2;

use crate::platform::{ElementId, Platform};

/// The `effectAllowed` / `dropEffect` vocabulary of native drag-and-drop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DataTransferEffect {
    Copy,
    Link,
    #[default]
    Move,
    None,
}

impl DataTransferEffect {
    pub fn name(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Link => "link",
            Self::Move => "move",
            Self::None => "none",
        }
    }
}

/// Where a drag image comes from: an URL the platform still has to load, or an element that
/// already exists.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ImageRef {
    Url(String),
    Element(ElementId),
}

/// An image plus the pointer offset within it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DragImage {
    pub image: ImageRef,
    pub offset: Vec2,
}

impl DragImage {
    pub fn new(image: ImageRef, offset: Vec2) -> Self {
        Self { image, offset }
    }

    pub fn from_url(src: impl Into<String>) -> Self {
        Self::new(ImageRef::Url(src.into()), Vec2::ZERO)
    }

    /// Turn the image into an element, constructing one for URL images.
    pub fn resolve(&self, platform: &dyn Platform) -> (ElementId, Vec2) {
        let element = match &self.image {
            ImageRef::Url(src) => platform.create_image(src),
            ImageRef::Element(id) => *id,
        };
        (element, self.offset)
    }
}

/// Per-element drag image setting.
#[derive(Clone)]
pub enum DragImageSource {
    /// An image URL, loaded at drag start with a zero offset.
    Url(String),

    /// An explicit image and offset.
    Image(DragImage),

    /// Evaluated at every drag start.
    Callable(Rc<dyn Fn() -> DragImage>),
}

impl DragImageSource {
    pub fn callable(f: impl Fn() -> DragImage + 'static) -> Self {
        Self::Callable(Rc::new(f))
    }

    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }

    pub fn resolve(&self, platform: &dyn Platform) -> (ElementId, Vec2) {
        match self {
            Self::Url(src) => (platform.create_image(src), Vec2::ZERO),
            Self::Image(image) => image.resolve(platform),
            Self::Callable(f) => f().resolve(platform),
        }
    }
}

impl std::fmt::Debug for DragImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(src) => f.debug_tuple("Url").field(src).finish(),
            Self::Image(image) => f.debug_tuple("Image").field(image).finish(),
            Self::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

impl From<&str> for DragImageSource {
    fn from(src: &str) -> Self {
        Self::Url(src.to_owned())
    }
}

impl From<DragImage> for DragImageSource {
    fn from(image: DragImage) -> Self {
        Self::Image(image)
    }
}

/// Settings shared by every behavior of a [`crate::DndContext`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DndConfig {
    /// Added to a draggable while it is being dragged.
    pub drag_start_class: String,

    /// Added to a droppable when an acceptable drag enters it.
    pub drag_enter_class: String,

    /// Added to a droppable while an acceptable drag hovers it.
    pub drag_over_class: String,

    /// Marks the sortable item currently targeted by a reorder gesture.
    pub sortable_drag_class: String,

    /// Added to the cloned ghost created for `clone_item` drags.
    pub drag_helper_class: String,

    /// `effectAllowed` used when an element does not set its own.
    pub drag_effect: DataTransferEffect,

    /// `dropEffect` reported on every drag-over.
    pub drop_effect: DataTransferEffect,

    /// Cursor while dragging, unless an element sets its own effect cursor.
    pub drag_cursor: String,

    /// Cursor of every attached element when idle.
    pub default_cursor: String,

    /// Used when an element has no drag image of its own.
    pub drag_image: Option<DragImage>,

    /// Delay before a requested view refresh is delivered.
    pub refresh_delay: Duration,
}

impl Default for DndConfig {
    fn default() -> Self {
        Self {
            drag_start_class: "dnd-drag-start".to_owned(),
            drag_enter_class: "dnd-drag-enter".to_owned(),
            drag_over_class: "dnd-drag-over".to_owned(),
            sortable_drag_class: "dnd-sortable-drag".to_owned(),
            drag_helper_class: "dnd-drag-item".to_owned(),
            drag_effect: DataTransferEffect::Move,
            drop_effect: DataTransferEffect::Move,
            drag_cursor: "move".to_owned(),
            default_cursor: "pointer".to_owned(),
            drag_image: None,
            refresh_delay: Duration::from_millis(250),
        }
    }
}
