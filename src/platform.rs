//! The host-side capabilities a behavior needs, and the native drag event it reacts to.
//!
//! A behavior never touches a DOM (or any other retained element tree) directly. Instead the host
//! hands it a [`Platform`] through the [`crate::DndContext`], and feeds it [`DragEvent`]s. After a
//! handler returns, the host reads back the event's [`DataTransfer`] and the
//! [`DragEvent::default_prevented`] / [`DragEvent::propagation_stopped`] flags and applies them to
//! the native gesture.

use egui::Vec2;

/// Identity of a host element. Any hashable key works; `egui::Id` is what egui hosts already have.
pub type ElementId = egui::Id;

/// Element operations the behaviors rely on.
///
/// All methods take `&self`: implementations are expected to use interior mutability, since the
/// platform is shared between every behavior of a [`crate::DndContext`].
pub trait Platform {
    /// Toggle the native `draggable` attribute.
    fn set_draggable(&self, element: ElementId, draggable: bool);

    fn add_class(&self, element: ElementId, class: &str);

    fn remove_class(&self, element: ElementId, class: &str);

    fn set_style(&self, element: ElementId, property: &str, value: &str);

    fn style(&self, element: ElementId, property: &str) -> Option<String>;

    /// `true` if `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Deep-clone an element's subtree. The clone is detached until appended.
    fn clone_element(&self, element: ElementId) -> ElementId;

    fn append_child(&self, parent: ElementId, child: ElementId);

    fn remove_child(&self, parent: ElementId, child: ElementId);

    /// Construct an image element loading `src`.
    fn create_image(&self, src: &str) -> ElementId;
}

/// The data-transfer part of a native drag event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataTransfer {
    data: Vec<(String, String)>,

    /// Names of the files carried by the gesture (dragged in from outside the page).
    pub files: Vec<String>,

    pub effect_allowed: Option<String>,

    pub drop_effect: Option<String>,

    /// The ghost image and the pointer offset within it.
    pub drag_image: Option<(ElementId, Vec2)>,
}

impl DataTransfer {
    pub fn with_files(files: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn set_data(&mut self, format: &str, data: &str) {
        if let Some(slot) = self.data.iter_mut().find(|(f, _)| f == format) {
            slot.1 = data.to_owned();
        } else {
            self.data.push((format.to_owned(), data.to_owned()));
        }
    }

    pub fn data(&self, format: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, d)| d.as_str())
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn set_drag_image(&mut self, image: ElementId, offset: Vec2) {
        self.drag_image = Some((image, offset));
    }
}

/// A native drag (or drop) event as delivered to one element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DragEvent {
    /// The element the event was dispatched to.
    pub target: Option<ElementId>,

    /// Pointer position relative to the target's padding box.
    pub offset: Vec2,

    pub data_transfer: Option<DataTransfer>,

    default_prevented: bool,
    propagation_stopped: bool,
}

impl DragEvent {
    pub fn new(target: ElementId) -> Self {
        Self {
            target: Some(target),
            data_transfer: Some(DataTransfer::default()),
            ..Default::default()
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_data_transfer(mut self, data_transfer: Option<DataTransfer>) -> Self {
        self.data_transfer = data_transfer;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn has_files(&self) -> bool {
        self.data_transfer.as_ref().is_some_and(DataTransfer::has_files)
    }
}
