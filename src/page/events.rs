//! Events and subscriptions
//!
//! Components subscribe a message to an (event source, event kind) pair.
//! Dispatch resolves the bubbling path of an event into the ordered list of
//! messages to deliver; the caller hands each message to its handler.

use crate::dom::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Input,
    Focus,
    Blur,
    Submit,
    PointerMove,
    PointerLeave,
    Scroll,
    Resize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    Backspace,
    Char(char),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Click { target: NodeId },
    KeyDown { target: NodeId, key: Key },
    Input { target: NodeId },
    Focus { target: NodeId },
    Blur { target: NodeId },
    Submit { target: NodeId },
    /// Client coordinates are relative to the viewport
    PointerMove {
        target: NodeId,
        client_x: f64,
        client_y: f64,
    },
    PointerLeave { target: NodeId },
    Scroll,
    Resize,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Click { .. } => EventKind::Click,
            Event::KeyDown { .. } => EventKind::KeyDown,
            Event::Input { .. } => EventKind::Input,
            Event::Focus { .. } => EventKind::Focus,
            Event::Blur { .. } => EventKind::Blur,
            Event::Submit { .. } => EventKind::Submit,
            Event::PointerMove { .. } => EventKind::PointerMove,
            Event::PointerLeave { .. } => EventKind::PointerLeave,
            Event::Scroll => EventKind::Scroll,
            Event::Resize => EventKind::Resize,
        }
    }

    pub fn target(&self) -> Option<NodeId> {
        match self {
            Event::Click { target }
            | Event::KeyDown { target, .. }
            | Event::Input { target }
            | Event::Focus { target }
            | Event::Blur { target }
            | Event::Submit { target }
            | Event::PointerMove { target, .. }
            | Event::PointerLeave { target } => Some(*target),
            Event::Scroll | Event::Resize => None,
        }
    }

    /// Focus, blur and pointer-leave stay on their target
    pub fn bubbles(&self) -> bool {
        !matches!(
            self,
            Event::Focus { .. } | Event::Blur { .. } | Event::PointerLeave { .. }
        )
    }
}

/// Where a subscription is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Window,
    Document,
    Node(NodeId),
}

#[derive(Debug, Clone)]
struct Subscription<T> {
    source: Source,
    kind: EventKind,
    message: T,
}

/// Per-dispatch state shared by every handler of one event
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub event: Event,
    default_prevented: bool,
}

impl Dispatch {
    pub fn new(event: Event) -> Self {
        Self {
            event,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Subscription registry
#[derive(Debug)]
pub struct Listeners<T> {
    subscriptions: Vec<Subscription<T>>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    pub fn listen(&mut self, source: Source, kind: EventKind, message: T) {
        self.subscriptions.push(Subscription {
            source,
            kind,
            message,
        });
    }

    /// Drop subscriptions attached to any of `nodes`
    pub fn forget(&mut self, nodes: &[NodeId]) {
        self.subscriptions.retain(|s| match s.source {
            Source::Node(n) => !nodes.contains(&n),
            _ => true,
        });
    }

    pub fn count(&self, source: Source, kind: EventKind) -> usize {
        self.subscriptions
            .iter()
            .filter(|s| s.source == source && s.kind == kind)
            .count()
    }
}

impl<T: Clone> Listeners<T> {
    /// Messages to deliver for `event`, in delivery order: target first, then
    /// each ancestor, then the document (for bubbling events on connected
    /// nodes). Window events go to window subscriptions only.
    pub fn route(&self, doc: &Document, event: &Event) -> Vec<T> {
        let kind = event.kind();
        let path: Vec<Source> = match event.target() {
            None => vec![Source::Window],
            Some(target) if !event.bubbles() => vec![Source::Node(target)],
            Some(target) => {
                let mut path = vec![Source::Node(target)];
                path.extend(doc.ancestors(target).into_iter().map(Source::Node));
                if doc.is_connected(target) {
                    path.push(Source::Document);
                }
                path
            }
        };

        path.iter()
            .flat_map(|source| {
                self.subscriptions
                    .iter()
                    .filter(move |s| s.source == *source && s.kind == kind)
                    .map(|s| s.message.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_bubbles_to_document() {
        let mut doc = Document::new();
        let card = doc.append_element(doc.body(), "div", "card");
        let button = doc.append_element(card, "button", "details-btn");

        let mut listeners = Listeners::new();
        listeners.listen(Source::Document, EventKind::Click, "document");
        listeners.listen(Source::Node(card), EventKind::Click, "card");
        listeners.listen(Source::Node(button), EventKind::Click, "button");
        listeners.listen(Source::Node(button), EventKind::KeyDown, "key");

        let routed = listeners.route(&doc, &Event::Click { target: button });
        assert_eq!(routed, vec!["button", "card", "document"]);
    }

    #[test]
    fn test_focus_does_not_bubble() {
        let mut doc = Document::new();
        let form = doc.append_element(doc.body(), "form", "");
        let input = doc.append_element(form, "input", "");

        let mut listeners = Listeners::new();
        listeners.listen(Source::Node(form), EventKind::Focus, "form");
        listeners.listen(Source::Node(input), EventKind::Focus, "input");

        let routed = listeners.route(&doc, &Event::Focus { target: input });
        assert_eq!(routed, vec!["input"]);
    }

    #[test]
    fn test_window_events_route_to_window() {
        let doc = Document::new();
        let mut listeners = Listeners::new();
        listeners.listen(Source::Window, EventKind::Scroll, "scroll-a");
        listeners.listen(Source::Document, EventKind::Scroll, "document");
        listeners.listen(Source::Window, EventKind::Scroll, "scroll-b");

        let routed = listeners.route(&doc, &Event::Scroll);
        assert_eq!(routed, vec!["scroll-a", "scroll-b"]);
    }

    #[test]
    fn test_detached_target_skips_document() {
        let mut doc = Document::new();
        let loose = doc.create_element("div");
        let mut listeners = Listeners::new();
        listeners.listen(Source::Document, EventKind::Click, "document");
        listeners.listen(Source::Node(loose), EventKind::Click, "loose");

        let routed = listeners.route(&doc, &Event::Click { target: loose });
        assert_eq!(routed, vec!["loose"]);
    }

    #[test]
    fn test_forget_removes_node_subscriptions() {
        let mut doc = Document::new();
        let item = doc.append_element(doc.body(), "div", "suggestion-item");
        let mut listeners = Listeners::new();
        listeners.listen(Source::Node(item), EventKind::Click, 1);
        listeners.listen(Source::Window, EventKind::Scroll, 2);

        listeners.forget(&[item]);
        assert_eq!(listeners.count(Source::Node(item), EventKind::Click), 0);
        assert_eq!(listeners.count(Source::Window, EventKind::Scroll), 1);
    }

    #[test]
    fn test_prevent_default() {
        let mut dispatch = Dispatch::new(Event::Scroll);
        assert!(!dispatch.default_prevented());
        dispatch.prevent_default();
        assert!(dispatch.default_prevented());
    }
}
