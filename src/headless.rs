//! An in-memory element tree implementing [`Platform`].
//!
//! Useful for tests and for hosts that render from a model rather than a live DOM: behaviors mutate
//! classes, styles and the tree here, and the host reads them back when it draws.

use std::cell::{Cell, RefCell};

use ahash::HashMap;

use crate::platform::{ElementId, Platform};

#[derive(Clone, Debug, Default)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
    draggable: bool,
    src: Option<String>,
}

#[derive(Debug, Default)]
pub struct HeadlessDom {
    nodes: RefCell<HashMap<ElementId, Node>>,
    next_id: Cell<u64>,
}

impl HeadlessDom {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&self, node: Node) -> ElementId {
        let n = self.next_id.get();
        self.next_id.set(n + 1);
        let id = ElementId::new(("headless_dom", n));
        self.nodes.borrow_mut().insert(id, node);
        id
    }

    pub fn create_element(&self, tag: &str) -> ElementId {
        self.alloc(Node {
            tag: tag.to_owned(),
            ..Default::default()
        })
    }

    /// Create an element and append it to `parent`.
    pub fn create_child(&self, parent: ElementId, tag: &str) -> ElementId {
        let child = self.create_element(tag);
        self.append_child(parent, child);
        child
    }

    pub fn exists(&self, element: ElementId) -> bool {
        self.nodes.borrow().contains_key(&element)
    }

    pub fn tag(&self, element: ElementId) -> Option<String> {
        self.nodes.borrow().get(&element).map(|n| n.tag.clone())
    }

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .borrow()
            .get(&element)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    pub fn is_draggable(&self, element: ElementId) -> bool {
        self.nodes.borrow().get(&element).is_some_and(|n| n.draggable)
    }

    pub fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.nodes
            .borrow()
            .get(&element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn image_src(&self, element: ElementId) -> Option<String> {
        self.nodes.borrow().get(&element).and_then(|n| n.src.clone())
    }

    /// Every element currently carrying `class`.
    pub fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        let nodes = self.nodes.borrow();
        let mut ids: Vec<ElementId> = nodes
            .keys()
            .copied()
            .filter(|id| nodes[id].classes.iter().any(|c| c == class))
            .collect();
        ids.sort_by_key(|id| id.value());
        ids
    }

    fn detach(&self, child: ElementId) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(old_parent) = nodes.get_mut(&child).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = nodes.get_mut(&old_parent) {
            p.children.retain(|c| *c != child);
        }
    }

    fn clone_subtree(&self, element: ElementId) -> Option<ElementId> {
        let mut node = self.nodes.borrow().get(&element)?.clone();
        let children = std::mem::take(&mut node.children);
        node.parent = None;
        let copy = self.alloc(node);
        for child in children {
            if let Some(child_copy) = self.clone_subtree(child) {
                self.append_child(copy, child_copy);
            }
        }
        Some(copy)
    }

    fn forget_subtree(&self, element: ElementId) {
        let Some(node) = self.nodes.borrow_mut().remove(&element) else {
            return;
        };
        for child in node.children {
            self.forget_subtree(child);
        }
    }
}

impl Platform for HeadlessDom {
    fn set_draggable(&self, element: ElementId, draggable: bool) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(&element) {
            n.draggable = draggable;
        }
    }

    fn add_class(&self, element: ElementId, class: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(&element) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_owned());
            }
        }
    }

    fn remove_class(&self, element: ElementId, class: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(&element) {
            n.classes.retain(|c| c != class);
        }
    }

    fn set_style(&self, element: ElementId, property: &str, value: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(&element) {
            match n.styles.iter_mut().find(|(p, _)| p == property) {
                Some(slot) => value.clone_into(&mut slot.1),
                None => n.styles.push((property.to_owned(), value.to_owned())),
            }
        }
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        let nodes = self.nodes.borrow();
        let node = nodes.get(&element)?;
        node.styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.clone())
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.borrow().get(&element).and_then(|n| n.parent)
    }

    fn clone_element(&self, element: ElementId) -> ElementId {
        self.clone_subtree(element)
            .unwrap_or_else(|| self.create_element("div"))
    }

    fn append_child(&self, parent: ElementId, child: ElementId) {
        if !self.exists(parent) || !self.exists(child) {
            return;
        }
        self.detach(child);
        let mut nodes = self.nodes.borrow_mut();
        if let Some(c) = nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        if let Some(p) = nodes.get_mut(&parent) {
            p.children.push(child);
        }
    }

    fn remove_child(&self, parent: ElementId, child: ElementId) {
        if self.parent(child) != Some(parent) {
            return;
        }
        self.detach(child);
        self.forget_subtree(child);
    }

    fn create_image(&self, src: &str) -> ElementId {
        self.alloc(Node {
            tag: "img".to_owned(),
            src: Some(src.to_owned()),
            ..Default::default()
        })
    }
}
