//! In-memory host for engine tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use crate::direction::Direction;
use crate::error::ResizeError;
use crate::geometry::{Point, Rect};
use crate::host::{ResizeHost, StyleAccessor};
use crate::selection::SelectionLock;
use crate::style::StyleMap;

pub type NodeId = usize;

#[derive(Debug, Default)]
struct Node {
    parent: Option<NodeId>,
    control: Option<String>,
    inline: BTreeMap<String, String>,
    removed: bool,
}

/// Records every style write and listener change. Node 0 is the target
/// element; handles are appended as children.
#[derive(Debug)]
pub struct MockHost {
    nodes: RefCell<Vec<Node>>,
    computed: RefCell<HashMap<(NodeId, String), String>>,
    selectors: HashMap<String, NodeId>,
    rect: Rect,
    scroll: Cell<Point>,
    lock: SelectionLock,
    selection_enabled: Cell<bool>,
    style_failure: Cell<bool>,
    pub listening_move: bool,
    pub listening_up: bool,
}

impl MockHost {
    pub fn new() -> Self {
        let mut selectors = HashMap::new();
        selectors.insert("#box".to_string(), 0);
        Self {
            nodes: RefCell::new(vec![Node::default()]),
            computed: RefCell::new(HashMap::new()),
            selectors,
            rect: Rect::new(100.0, 100.0, 200.0, 100.0),
            scroll: Cell::new(Point::default()),
            lock: SelectionLock::new(),
            selection_enabled: Cell::new(true),
            style_failure: Cell::new(false),
            listening_move: false,
            listening_up: false,
        }
    }

    pub fn target(&self) -> NodeId {
        0
    }

    pub fn set_scroll(&self, x: f64, y: f64) {
        self.scroll.set(Point::new(x, y));
    }

    /// Stylesheet (non-inline) value for a property.
    pub fn set_computed(&self, node: NodeId, property: &str, value: &str) {
        self.computed
            .borrow_mut()
            .insert((node, property.to_string()), value.to_string());
    }

    /// Inline style previously written through `apply_styles`.
    pub fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[*node].inline.get(property).cloned()
    }

    pub fn handle_count(&self) -> usize {
        self.nodes
            .borrow()
            .iter()
            .filter(|n| n.control.is_some() && !n.removed)
            .count()
    }

    pub fn selection_enabled(&self) -> bool {
        self.selection_enabled.get()
    }

    /// Make every style read and write fail, like a detached node.
    pub fn fail_style_access(&self, fail: bool) {
        self.style_failure.set(fail);
    }

    fn check_style_access(&self) -> Result<(), ResizeError> {
        if self.style_failure.get() {
            return Err(ResizeError::Dom("style access failed".to_string()));
        }
        Ok(())
    }
}

impl StyleAccessor for MockHost {
    type Element = NodeId;

    fn computed_value(&self, element: &NodeId, property: &str) -> Result<String, ResizeError> {
        self.check_style_access()?;
        if let Some(value) = self.nodes.borrow()[*element].inline.get(property) {
            return Ok(value.clone());
        }
        if let Some(value) = self.computed.borrow().get(&(*element, property.to_string())) {
            return Ok(value.clone());
        }
        Ok(match property {
            "position" => "static".to_string(),
            "transform" => "none".to_string(),
            _ => String::new(),
        })
    }

    fn apply_styles(&self, element: &NodeId, styles: &StyleMap) -> Result<(), ResizeError> {
        self.check_style_access()?;
        let mut nodes = self.nodes.borrow_mut();
        for (property, value) in styles.iter() {
            nodes[*element]
                .inline
                .insert(property.to_string(), value.to_string());
        }
        Ok(())
    }
}

impl ResizeHost for MockHost {
    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.selectors.get(selector).copied()
    }

    fn bounding_rect(&self, _element: &NodeId) -> Rect {
        self.rect
    }

    fn scroll_offset(&self) -> Point {
        self.scroll.get()
    }

    fn handle_direction(&self, node: &NodeId) -> Option<String> {
        let nodes = self.nodes.borrow();
        nodes.get(*node).filter(|n| !n.removed)?.control.clone()
    }

    fn find_handle(&self, target: &NodeId, direction: Direction) -> Option<NodeId> {
        self.nodes.borrow().iter().position(|n| {
            !n.removed && n.parent == Some(*target) && n.control.as_deref() == Some(direction.name())
        })
    }

    fn create_handle(&self, target: &NodeId, direction: Direction) -> Result<NodeId, ResizeError> {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            parent: Some(*target),
            control: Some(direction.name().to_string()),
            ..Node::default()
        });
        Ok(nodes.len() - 1)
    }

    fn remove_element(&self, element: &NodeId) {
        self.nodes.borrow_mut()[*element].removed = true;
    }

    fn selection_lock(&self) -> &SelectionLock {
        &self.lock
    }

    fn set_text_selection(&self, enabled: bool) {
        self.selection_enabled.set(enabled);
    }

    fn listen_drag(&mut self) {
        self.listening_move = true;
        self.listening_up = true;
    }

    fn release_drag(&mut self) {
        self.listening_move = false;
        // single-shot: the up listener is gone once it has fired
        self.listening_up = false;
    }

    fn detach(&mut self) {
        self.listening_move = false;
        self.listening_up = false;
    }
}
