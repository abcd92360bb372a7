use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use egui::Vec2;

use crate::config::{DragImage, DragImageSource, ImageRef};
use crate::context::DndContext;
use crate::draggable::Draggable;
use crate::droppable::Droppable;
use crate::headless::HeadlessDom;
use crate::payload::{DragData, DragDropData};
use crate::platform::{DataTransfer, DragEvent, ElementId, Platform as _};
use crate::refresh::RequestRefresh;

use super::{AllowDropFn, Behavior};

#[derive(Default)]
struct CountingView {
    requests: Cell<u32>,
}

impl RequestRefresh for CountingView {
    fn request_refresh_after(&self, _delay: Duration) {
        self.requests.set(self.requests.get() + 1);
    }
}

struct Fixture {
    dom: Rc<HeadlessDom>,
    ctx: DndContext,
    root: ElementId,
}

fn fixture() -> Fixture {
    let dom = Rc::new(HeadlessDom::new());
    let ctx = DndContext::with_platform(dom.clone());
    let root = dom.create_element("div");
    Fixture { dom, ctx, root }
}

fn record<T: Clone + 'static>(
    emitter: &crate::emitter::EventEmitter<T>,
) -> Rc<RefCell<Vec<T>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    emitter.subscribe(move |v: &T| sink.borrow_mut().push(v.clone()));
    seen
}

impl Fixture {
    fn draggable(&self, payload: &DragData) -> Draggable {
        let el = self.dom.create_child(self.root, "div");
        let draggable = Draggable::new(&self.ctx, el);
        draggable.set_drag_data(Some(payload.clone()));
        draggable
    }

    fn droppable(&self) -> Droppable {
        Droppable::new(&self.ctx, self.dom.create_child(self.root, "div"))
    }
}

#[test]
fn attach_sets_draggable_attribute_and_default_cursor() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new(()));
    assert!(f.dom.is_draggable(draggable.element()));
    assert_eq!(
        f.dom.style(draggable.element(), "cursor").as_deref(),
        Some("pointer")
    );

    let droppable = f.droppable();
    assert!(!f.dom.is_draggable(droppable.element()));
    assert!(droppable.core().drop_enabled());
}

#[test]
fn drag_start_then_end_restores_cleared_session() {
    let f = fixture();
    let payload = DragData::new("card");
    let draggable = f.draggable(&payload);
    let starts = record(draggable.on_drag_start());
    let ends = record(draggable.on_drag_end());
    let class = f.ctx.config().drag_start_class.clone();

    for round in 1..=2 {
        let mut start = DragEvent::new(draggable.element());
        draggable.handle_drag_start(&mut start);
        assert!(f.ctx.is_dragging(), "round {round}");
        assert_eq!(f.ctx.drag_session().payload(), Some(&payload));
        assert!(f.ctx.drag_session().on_success().is_some());
        assert!(f.dom.has_class(draggable.element(), &class));

        draggable.handle_drag_end(&DragEvent::new(draggable.element()));
        let session = f.ctx.drag_session();
        assert!(!session.in_progress(), "round {round}");
        assert!(session.payload().is_none());
        assert!(session.on_success().is_none());
        assert!(session.allowed_drop_zones().is_empty());
        assert!(!f.dom.has_class(draggable.element(), &class));
    }

    assert_eq!(starts.borrow().len(), 2);
    assert_eq!(ends.borrow().len(), 2);
    assert_eq!(starts.borrow()[0].drag_data, Some(payload));
}

#[test]
fn drag_start_configures_data_transfer_and_cursor() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new(1_u8));
    let mut start = DragEvent::new(draggable.element());
    draggable.handle_drag_start(&mut start);

    let dt = start.data_transfer.as_ref().expect("data transfer");
    assert_eq!(dt.data("text"), Some(""));
    assert_eq!(dt.effect_allowed.as_deref(), Some("move"));
    assert_eq!(dt.drag_image, None);
    assert_eq!(
        f.dom.style(draggable.element(), "cursor").as_deref(),
        Some("move")
    );

    draggable.handle_drag_end(&DragEvent::new(draggable.element()));
    assert_eq!(
        f.dom.style(draggable.element(), "cursor").as_deref(),
        Some("pointer")
    );

    draggable
        .core()
        .set_effect_allowed(Some("copyMove".to_owned()));
    draggable.core().set_effect_cursor(Some("grabbing".to_owned()));
    let mut start = DragEvent::new(draggable.element());
    draggable.handle_drag_start(&mut start);
    let dt = start.data_transfer.as_ref().expect("data transfer");
    assert_eq!(dt.effect_allowed.as_deref(), Some("copyMove"));
    assert_eq!(
        f.dom.style(draggable.element(), "cursor").as_deref(),
        Some("grabbing")
    );
}

#[test]
fn disabled_drag_does_not_start_a_session() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new(()));
    draggable.core().set_drag_enabled(false);
    assert!(!f.dom.is_draggable(draggable.element()));

    let starts = record(draggable.on_drag_start());
    draggable.handle_drag_start(&mut DragEvent::new(draggable.element()));
    assert!(!f.ctx.is_dragging());
    assert!(starts.borrow().is_empty());
    assert_eq!(
        f.dom.style(draggable.element(), "cursor").as_deref(),
        Some("pointer")
    );
}

#[test]
fn drag_outside_handle_is_cancelled() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new(()));
    let handle = f.dom.create_child(draggable.element(), "span");
    let grip = f.dom.create_child(handle, "i");
    let body = f.dom.create_child(draggable.element(), "p");
    draggable.core().set_drag_handle(Some(handle));
    let starts = record(draggable.on_drag_start());

    draggable.handle_pointer_down(Some(body));
    let mut start = DragEvent::new(draggable.element());
    draggable.handle_drag_start(&mut start);
    assert!(start.default_prevented());
    assert!(!f.ctx.is_dragging());
    assert!(starts.borrow().is_empty());
    assert_eq!(start.data_transfer.as_ref().and_then(|dt| dt.data("text")), None);

    draggable.handle_pointer_down(Some(grip));
    let mut start = DragEvent::new(draggable.element());
    draggable.handle_drag_start(&mut start);
    assert!(!start.default_prevented());
    assert!(f.ctx.is_dragging());
    assert_eq!(f.dom.style(handle, "cursor").as_deref(), Some("move"));

    draggable.handle_drag_end(&DragEvent::new(draggable.element()));
    assert_eq!(f.dom.style(handle, "cursor").as_deref(), Some("pointer"));
}

#[test]
fn mismatched_zones_reject_the_drop() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new("red card"));
    draggable.core().set_drop_zones(["red"]);
    let droppable = f.droppable();
    droppable.core().set_drop_zones(["blue"]);
    let drops = record(droppable.drop_success());
    let successes = record(draggable.drag_success());

    draggable.handle_drag_start(&mut DragEvent::new(draggable.element()));
    assert_eq!(f.ctx.drag_session().allowed_drop_zones(), ["red".to_owned()]);

    let mut over = DragEvent::new(droppable.element());
    droppable.handle_drag_over(&mut over);
    assert!(!over.default_prevented());
    assert_eq!(
        over.data_transfer.as_ref().and_then(|dt| dt.drop_effect.as_deref()),
        Some("move"),
        "a rejected drag-over still reports the configured drop effect"
    );

    let mut drop = DragEvent::new(droppable.element());
    droppable.handle_drop(&mut drop);
    assert!(!droppable.core().is_drop_allowed(&drop));
    assert!(!drop.default_prevented());
    assert!(drops.borrow().is_empty());
    assert!(successes.borrow().is_empty());
}

#[test]
fn shared_zone_accepts_the_drop() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new(()));
    draggable.core().set_drop_zones(["red", "green"]);
    let droppable = f.droppable();
    droppable.core().set_drop_zones(["green"]);

    draggable.handle_drag_start(&mut DragEvent::new(draggable.element()));
    assert!(droppable.core().is_drop_allowed(&DragEvent::new(droppable.element())));
}

#[test]
fn unrestricted_drop_notifies_target_then_source() {
    let f = fixture();
    let payload = DragData::new("note");
    let draggable = f.draggable(&payload);
    let droppable = f.droppable();
    let view = Rc::new(CountingView::default());
    droppable.core().attach_view(&view);

    let order = Rc::new(RefCell::new(Vec::new()));
    {
        let order = Rc::clone(&order);
        droppable
            .drop_success()
            .subscribe(move |d: &DragDropData| order.borrow_mut().push(("drop", d.clone())));
    }
    {
        let order = Rc::clone(&order);
        draggable
            .drag_success()
            .subscribe(move |d: &DragDropData| order.borrow_mut().push(("success", d.clone())));
    }

    draggable.handle_drag_start(&mut DragEvent::new(draggable.element()));
    droppable.handle_drag_enter(&DragEvent::new(droppable.element()));
    let mut drop = DragEvent::new(droppable.element());
    droppable.handle_drop(&mut drop);

    assert!(drop.default_prevented());
    assert!(drop.propagation_stopped());
    let order = order.borrow();
    assert_eq!(order.len(), 2);
    assert_eq!(order[0].0, "drop");
    assert_eq!(order[1].0, "success");
    assert_eq!(order[1].1.drag_data, Some(payload));
    assert_eq!(view.requests.get(), 1);
    assert!(!f.dom.has_class(droppable.element(), &f.ctx.config().drag_enter_class));
}

#[test]
fn enter_over_leave_toggle_feedback_classes() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new(()));
    let droppable = f.droppable();
    let enters = record(droppable.drag_enter());
    let overs = record(droppable.drag_over());
    let leaves = record(droppable.drag_leave());
    let enter_class = f.ctx.config().drag_enter_class.clone();
    let over_class = f.ctx.config().drag_over_class.clone();
    let el = droppable.element();

    droppable.handle_drag_enter(&DragEvent::new(el));
    assert!(enters.borrow().is_empty(), "no drag in progress yet");

    draggable.handle_drag_start(&mut DragEvent::new(draggable.element()));
    droppable.handle_drag_enter(&DragEvent::new(el));
    let mut over = DragEvent::new(el);
    droppable.handle_drag_over(&mut over);
    assert!(over.default_prevented());
    assert_eq!(
        over.data_transfer.as_ref().and_then(|dt| dt.drop_effect.as_deref()),
        Some("move")
    );
    assert!(f.dom.has_class(el, &enter_class));
    assert!(f.dom.has_class(el, &over_class));

    droppable.handle_drag_leave(&DragEvent::new(el));
    assert!(!f.dom.has_class(el, &enter_class));
    assert!(!f.dom.has_class(el, &over_class));
    assert_eq!(
        (enters.borrow().len(), overs.borrow().len(), leaves.borrow().len()),
        (1, 1, 1)
    );
}

#[test]
fn files_from_outside_are_accepted_without_a_session() {
    let f = fixture();
    let droppable = f.droppable();
    let drops = record(droppable.drop_success());

    let mut drop = DragEvent::new(droppable.element())
        .with_data_transfer(Some(DataTransfer::with_files(["report.pdf"])));
    droppable.handle_drop(&mut drop);
    assert_eq!(drops.borrow().len(), 1);
    assert_eq!(drops.borrow()[0].drag_data, None);

    let mut empty = DragEvent::new(droppable.element());
    droppable.handle_drop(&mut empty);
    assert_eq!(drops.borrow().len(), 1);
}

#[test]
fn allow_drop_overrides_zones() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new(42_i32));
    draggable.core().set_drop_zones(["red"]);
    let droppable = f.droppable();
    droppable.core().set_drop_zones(["blue"]);
    let only_numbers: AllowDropFn = Rc::new(|p: Option<&DragData>| p.is_some_and(DragData::is::<i32>));
    droppable.core().set_allow_drop(Some(only_numbers));

    draggable.handle_drag_start(&mut DragEvent::new(draggable.element()));
    assert!(droppable.core().is_drop_allowed(&DragEvent::new(droppable.element())));

    droppable.core().set_drop_enabled(false);
    assert!(!droppable.core().is_drop_allowed(&DragEvent::new(droppable.element())));
}

#[test]
fn element_drag_image_wins_over_config_and_clone() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new(()));
    draggable.core().set_clone_item(true);
    draggable
        .core()
        .set_drag_image(Some(DragImageSource::from("/img/card.png")));

    let mut start = DragEvent::new(draggable.element());
    draggable.handle_drag_start(&mut start);
    let (image, offset) = start
        .data_transfer
        .and_then(|dt| dt.drag_image)
        .expect("drag image");
    assert_eq!(f.dom.image_src(image).as_deref(), Some("/img/card.png"));
    assert_eq!(offset, Vec2::ZERO);
    assert_eq!(f.dom.children(f.root).len(), 1, "no clone helper");
}

#[test]
fn callable_drag_image_is_evaluated_per_drag() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new(()));
    let calls = Rc::new(Cell::new(0));
    {
        let calls = Rc::clone(&calls);
        draggable
            .core()
            .set_drag_image(Some(DragImageSource::callable(move || {
                calls.set(calls.get() + 1);
                DragImage::new(ImageRef::Url("/img/lazy.png".to_owned()), Vec2::new(3.0, 4.0))
            })));
    }
    for _ in 0..2 {
        let mut start = DragEvent::new(draggable.element());
        draggable.handle_drag_start(&mut start);
        let (_, offset) = start
            .data_transfer
            .and_then(|dt| dt.drag_image)
            .expect("drag image");
        assert_eq!(offset, Vec2::new(3.0, 4.0));
        draggable.handle_drag_end(&DragEvent::new(draggable.element()));
    }
    assert_eq!(calls.get(), 2);
}

#[test]
fn config_drag_image_is_the_fallback() {
    let dom = Rc::new(HeadlessDom::new());
    let ghost = dom.create_element("img");
    let config = crate::DndConfig {
        drag_image: Some(DragImage::new(ImageRef::Element(ghost), Vec2::new(1.0, 1.0))),
        ..Default::default()
    };
    let ctx = DndContext::new(config, dom.clone());
    let draggable = Draggable::new(&ctx, dom.create_element("div"));
    draggable.core().set_clone_item(true);

    let mut start = DragEvent::new(draggable.element());
    draggable.handle_drag_start(&mut start);
    assert_eq!(
        start.data_transfer.and_then(|dt| dt.drag_image),
        Some((ghost, Vec2::new(1.0, 1.0)))
    );
}

#[test]
fn clone_item_spawns_and_removes_a_ghost() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new(()));
    f.dom.add_class(draggable.element(), "card");
    draggable.core().set_clone_item(true);

    let mut start = DragEvent::new(draggable.element()).with_offset(Vec2::new(12.0, 5.0));
    draggable.handle_drag_start(&mut start);
    let (ghost, offset) = start
        .data_transfer
        .and_then(|dt| dt.drag_image)
        .expect("drag image");
    assert_eq!(offset, Vec2::new(12.0, 5.0));
    assert_eq!(f.dom.parent(ghost), Some(f.root));
    assert!(f.dom.has_class(ghost, "card"));
    assert!(f.dom.has_class(ghost, &f.ctx.config().drag_helper_class));
    assert_eq!(f.dom.style(ghost, "left").as_deref(), Some("-1000px"));
    assert_eq!(f.dom.style(ghost, "position").as_deref(), Some("absolute"));

    draggable.handle_drag_end(&DragEvent::new(draggable.element()));
    assert!(!f.dom.exists(ghost));
    assert_eq!(f.dom.children(f.root), vec![draggable.element()]);
}

#[test]
fn bare_behavior_dispatches_without_reactions() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new(()));
    let bare = Behavior::bare(&f.ctx, f.dom.create_child(f.root, "div"));
    bare.core().set_drop_enabled(true);

    draggable.handle_drag_start(&mut DragEvent::new(draggable.element()));
    let mut drop = DragEvent::new(bare.element());
    bare.handle_drop(&mut drop);
    assert!(drop.default_prevented());
    assert!(!bare.core().request_refresh(), "no view attached");
}

#[test]
fn refresh_after_view_teardown_is_a_no_op() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new(()));
    let droppable = f.droppable();
    let view = Rc::new(CountingView::default());
    droppable.core().attach_view(&view);
    drop(view);

    draggable.handle_drag_start(&mut DragEvent::new(draggable.element()));
    let mut drop_event = DragEvent::new(droppable.element());
    droppable.handle_drop(&mut drop_event);
    assert!(drop_event.default_prevented());
}

#[test]
fn stuck_drag_is_overwritten_by_the_next_start() {
    let f = fixture();
    let first = DragData::new("first");
    let second = DragData::new("second");
    let a = f.draggable(&first);
    let b = f.draggable(&second);

    a.handle_drag_start(&mut DragEvent::new(a.element()));
    // no drag end delivered for `a`
    b.handle_drag_start(&mut DragEvent::new(b.element()));
    assert_eq!(f.ctx.drag_session().payload(), Some(&second));

    f.ctx.abort_gesture();
    assert!(!f.ctx.is_dragging());
    let class = &f.ctx.config().drag_start_class;
    assert!(f.dom.has_class(a.element(), class), "overwritten source keeps its class");
    assert!(!f.dom.has_class(b.element(), class));
}

#[test]
fn abort_removes_the_source_class_and_ghost() {
    let f = fixture();
    let draggable = f.draggable(&DragData::new(()));
    draggable.core().set_clone_item(true);

    let mut start = DragEvent::new(draggable.element());
    draggable.handle_drag_start(&mut start);
    let (ghost, _) = start
        .data_transfer
        .and_then(|dt| dt.drag_image)
        .expect("drag image");
    assert!(f.dom.exists(ghost));
    assert!(f.dom.has_class(draggable.element(), &f.ctx.config().drag_start_class));

    f.ctx.abort_gesture();
    assert!(!f.dom.exists(ghost));
    assert!(!f.dom.has_class(draggable.element(), &f.ctx.config().drag_start_class));
    assert_eq!(f.dom.children(f.root), vec![draggable.element()]);

    // a late drag end finds nothing left to undo
    draggable.handle_drag_end(&DragEvent::new(draggable.element()));
    assert_eq!(f.dom.children(f.root), vec![draggable.element()]);
}
