//! Two sortable task lists and a trash bin, driven by a scripted drag gesture.
//!
//! Run with `RUST_LOG=debug cargo run --example sortable_lists` to see the session traffic.

use std::cell::RefCell;
use std::rc::Rc;

use egui_dnd_sortable::{
    DndContext, DragData, DragDropData, DragEvent, Droppable, ElementId, HeadlessDom,
    Platform as _, SortableContainer, SortableData, SortableItem,
};

struct Board {
    dom: Rc<HeadlessDom>,
    ctx: DndContext,
    lists: Vec<(&'static str, ElementId, Rc<SortableContainer>)>,
    items: Vec<SortableItem>,
}

impl Board {
    fn new() -> Self {
        let dom = Rc::new(HeadlessDom::new());
        let ctx = DndContext::with_platform(dom.clone());
        Self {
            dom,
            ctx,
            lists: Vec::new(),
            items: Vec::new(),
        }
    }

    fn add_list(&mut self, title: &'static str, tasks: &[&'static str]) {
        let element = self.dom.create_element("ul");
        let data: Vec<DragData> = tasks.iter().map(|t| DragData::new(*t)).collect();
        let container = SortableContainer::with_data(&self.ctx, element, SortableData::plain(data));
        self.lists.push((title, element, container));
        self.render();
    }

    /// Rebuild the item behaviors from the collections, as a host does after a refresh.
    fn render(&mut self) {
        for item in self.items.drain(..) {
            if let Some(parent) = self.dom.parent(item.element()) {
                self.dom.remove_child(parent, item.element());
            }
        }
        for (_, element, container) in &self.lists {
            for index in 0..container.len() {
                let li = self.dom.create_child(*element, "li");
                let item = SortableItem::new(&self.ctx, li, container, index);
                item.set_drag_data(container.get_item_at(index));
                self.items.push(item);
            }
        }
    }

    fn item(&self, list: usize, index: usize) -> &SortableItem {
        let container = &self.lists[list].2;
        self.items
            .iter()
            .find(|item| Rc::ptr_eq(item.container(), container) && item.index() == index)
            .unwrap_or_else(|| panic!("no item {index} in list {list}"))
    }

    fn print(&self) {
        for (title, _, container) in &self.lists {
            let tasks: Vec<&str> = (0..container.len())
                .filter_map(|i| container.get_item_at(i))
                .filter_map(|d| d.downcast_ref::<&'static str>().copied())
                .collect();
            println!("{title:>8}: {}", tasks.join(", "));
        }
    }
}

fn main() {
    env_logger::init();

    let mut board = Board::new();
    board.add_list("todo", &["write docs", "fix login", "review pr"]);
    board.add_list("done", &["set up ci"]);
    println!("before:");
    board.print();

    // "fix login" moves over the only task of "done", then is dropped there.
    let source = board.item(0, 1).element();
    board.item(0, 1).handle_drag_start(&mut DragEvent::new(source));
    let target = board.item(1, 0);
    target.handle_drag_enter(&DragEvent::new(target.element()));
    target.handle_drop(&mut DragEvent::new(target.element()));
    board.item(0, 1).handle_drag_end(&DragEvent::new(source));
    board.render();

    println!("after reorder:");
    board.print();

    // A plain drop target accepts sortable items too.
    let trash = Droppable::new(&board.ctx, board.dom.create_element("div"));
    let trashed = Rc::new(RefCell::new(Vec::new()));
    {
        let trashed = Rc::clone(&trashed);
        trash.drop_success().subscribe(move |d: &DragDropData| {
            if let Some(task) = d.drag_data.as_ref().and_then(|p| p.downcast_ref::<&'static str>()) {
                trashed.borrow_mut().push(*task);
            }
        });
    }
    let first = board.item(0, 0);
    let element = first.element();
    first.handle_drag_start(&mut DragEvent::new(element));
    trash.handle_drop(&mut DragEvent::new(trash.element()));
    first.handle_drag_end(&DragEvent::new(element));

    println!("trashed: {}", trashed.borrow().join(", "));
}
