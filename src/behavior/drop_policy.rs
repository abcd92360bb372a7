use crate::payload::DragData;

/// Custom acceptance test of a drop target. Receives the payload of the drag in flight.
pub type AllowDropFn = std::rc::Rc<dyn Fn(Option<&DragData>) -> bool>;

/// `true` if a drag restricted to `drag_zones` may land on a target listening on `target_zones`.
///
/// Two unrestricted sides always match; otherwise any shared tag is enough.
pub fn zones_allow(drag_zones: &[String], target_zones: &[String]) -> bool {
    if drag_zones.is_empty() && target_zones.is_empty() {
        return true;
    }
    drag_zones.iter().any(|zone| target_zones.contains(zone))
}

/// Everything the drop-allowed decision reads, captured so no session borrow is held while the
/// target's [`AllowDropFn`] runs.
pub(crate) struct DropCheck<'a> {
    /// A drag is in progress, or the native event carries files.
    pub gesture_active: bool,
    pub drop_enabled: bool,
    pub allow_drop: Option<&'a AllowDropFn>,
    pub payload: Option<&'a DragData>,
    pub drag_zones: &'a [String],
    pub target_zones: &'a [String],
}

impl DropCheck<'_> {
    pub fn evaluate(&self) -> bool {
        if !(self.gesture_active && self.drop_enabled) {
            return false;
        }
        if let Some(allow_drop) = self.allow_drop {
            return allow_drop(self.payload);
        }
        zones_allow(self.drag_zones, self.target_zones)
    }
}
