use std::collections::BTreeMap;

use super::selector::Selector;

/// Handle to an element.
///
/// Removing an element frees its slot for reuse. Handles to removed elements
/// go stale: reads see an empty detached element and writes are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Layout box in page coordinates (pixels from the document origin)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest rect covering both
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    selected_index: usize,
    rect: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    const EMPTY: Node = Node {
        tag: String::new(),
        classes: Vec::new(),
        attributes: BTreeMap::new(),
        styles: BTreeMap::new(),
        text: String::new(),
        value: String::new(),
        selected_index: 0,
        rect: Rect {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        },
        parent: None,
        children: Vec::new(),
    };
}

/// What a stale handle reads
static DETACHED: Node = Node::EMPTY;

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Node,
}

/// Element tree rooted at `<html>` with a `<body>` child.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let placeholder = NodeId {
            index: 0,
            generation: 0,
        };
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: placeholder,
            body: placeholder,
        };
        doc.root = doc.create_element("html");
        doc.body = doc.create_element("body");
        doc.append_child(doc.root, doc.body);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    fn node(&self, id: NodeId) -> &Node {
        match self.slots.get(id.index as usize) {
            Some(slot) if slot.generation == id.generation => &slot.node,
            _ => &DETACHED,
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .map(|slot| &mut slot.node)
    }

    /// Whether `id` still refers to an element that has not been removed
    pub fn is_live(&self, id: NodeId) -> bool {
        self.slots
            .get(id.index as usize)
            .is_some_and(|slot| slot.generation == id.generation)
    }

    /// Number of element slots, live or free
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    // ==================== Tree ====================

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let node = Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::EMPTY
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = node;
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            node,
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Append `child` to `parent`, detaching it from its old parent first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child
            || !self.is_live(parent)
            || !self.is_live(child)
            || self.contains(child, parent)
        {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    /// Create an element with the given class list and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str, class_name: &str) -> NodeId {
        let id = self.create_element(tag);
        self.set_class_name(id, class_name);
        self.append_child(parent, id);
        id
    }

    fn detach(&mut self, id: NodeId) {
        let parent = self.node_mut(id).and_then(|node| node.parent.take());
        if let Some(node) = parent.and_then(|p| self.node_mut(p)) {
            node.children.retain(|c| *c != id);
        }
    }

    /// Remove `id` and all its descendants, returning their now stale
    /// handles. The root and body cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> Vec<NodeId> {
        if id == self.root || id == self.body || !self.is_live(id) {
            return Vec::new();
        }
        self.detach(id);
        let mut removed = vec![id];
        removed.extend(self.descendants(id));
        for node in &removed {
            self.release(*node);
        }
        removed
    }

    fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.index as usize) {
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Node::EMPTY;
            self.free.push(id.index);
        }
    }

    /// Remove every child of `id`, returning every removed handle
    pub fn clear_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = self.node(id).children.clone();
        children.into_iter().flat_map(|c| self.remove(c)).collect()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Descendants of `id` in document order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(id).children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.node(next).children.iter().rev().copied());
        }
        out
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.node(id).parent;
        while let Some(p) = current {
            out.push(p);
            current = self.node(p).parent;
        }
        out
    }

    /// Inclusive containment, like `Node.contains`
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        id == ancestor || self.ancestors(id).contains(&ancestor)
    }

    /// Whether `id` is attached to the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    // ==================== Element data ====================

    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class)
            && let Some(node) = self.node_mut(id)
        {
            node.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes.retain(|c| c != class);
        }
    }

    /// Toggle `class`, returning whether it is now present
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            true
        }
    }

    pub fn class_name(&self, id: NodeId) -> String {
        self.node(id).classes.join(" ")
    }

    pub fn set_class_name(&mut self, id: NodeId, class_name: &str) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.classes.clear();
        for class in class_name.split_whitespace() {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        (name == "class" && !self.node(id).classes.is_empty())
            || self.node(id).attributes.contains_key(name)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if name == "class" {
            self.set_class_name(id, value);
            return;
        }
        if let Some(node) = self.node_mut(id) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(node) = self.node_mut(id) {
            node.attributes.remove(name);
        }
    }

    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.attribute(id, "id")
    }

    pub fn element_by_id(&self, element_id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|n| self.element_id(*n) == Some(element_id))
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.node(id).styles.get(property).map(String::as_str)
    }

    /// Set an inline style; an empty value removes the property
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let styles = &mut node.styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    /// `display: none` on the element or any ancestor
    pub fn is_hidden(&self, id: NodeId) -> bool {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .any(|n| self.style(n, "display") == Some("none"))
    }

    /// The element's own text, excluding descendants
    pub fn text(&self, id: NodeId) -> &str {
        &self.node(id).text
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(node) = self.node_mut(id) {
            node.text = text.to_string();
        }
    }

    /// Own text followed by descendants' text, like `textContent`
    pub fn text_content(&self, id: NodeId) -> String {
        std::iter::once(id)
            .chain(self.descendants(id))
            .map(|n| self.text(n))
            .collect()
    }

    /// Form value. For `<select>` this is the selected option's `value`
    /// attribute, falling back to its text.
    pub fn value(&self, id: NodeId) -> String {
        if self.tag(id) == "select" {
            let options = self.options(id);
            return options
                .get(self.node(id).selected_index)
                .map(|opt| {
                    self.attribute(*opt, "value")
                        .map(str::to_string)
                        .unwrap_or_else(|| self.text_content(*opt))
                })
                .unwrap_or_default();
        }
        self.node(id).value.clone()
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) {
        if let Some(node) = self.node_mut(id) {
            node.value = value.to_string();
        }
    }

    pub fn selected_index(&self, id: NodeId) -> usize {
        self.node(id).selected_index
    }

    pub fn set_selected_index(&mut self, id: NodeId, index: usize) {
        let max = self.options(id).len().saturating_sub(1);
        if let Some(node) = self.node_mut(id) {
            node.selected_index = index.min(max);
        }
    }

    /// `<option>` descendants of a select, in order
    pub fn options(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|n| self.tag(*n) == "option")
            .collect()
    }

    pub fn rect(&self, id: NodeId) -> Rect {
        self.node(id).rect
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.rect = rect;
        }
    }

    // ==================== Queries ====================

    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        selector.matches(self, id)
    }

    /// Matching descendants of `scope` in document order
    pub fn query_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| selector.matches(self, *n))
            .collect()
    }

    pub fn query(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| selector.matches(self, *n))
    }

    /// Whole-document query from selector text. Unparseable selectors match
    /// nothing.
    pub fn select_all(&self, selector: &str) -> Vec<NodeId> {
        self.select_all_in(self.root, selector)
    }

    pub fn select(&self, selector: &str) -> Option<NodeId> {
        self.select_in(self.root, selector)
    }

    pub fn select_all_in(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        match Selector::parse(selector) {
            Ok(sel) => self.query_all(scope, &sel),
            Err(e) => {
                log::debug!("{}", e);
                Vec::new()
            }
        }
    }

    pub fn select_in(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        match Selector::parse(selector) {
            Ok(sel) => self.query(scope, &sel),
            Err(e) => {
                log::debug!("{}", e);
                None
            }
        }
    }

    /// Nearest inclusive ancestor matching `selector`
    pub fn closest(&self, id: NodeId, selector: &str) -> Option<NodeId> {
        let sel = Selector::parse(selector).ok()?;
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|n| sel.matches(self, *n))
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod document_tests;
