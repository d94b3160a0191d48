//! Page host environment
//!
//! Everything a UI component can touch: the document, the window, the timer
//! and frame queue, and the subscription registry. Generic over the message
//! type `T` carried by timers, frames and subscriptions.

mod events;
mod storage;
mod timers;
mod window;

pub use events::{Dispatch, Event, EventKind, Key, Listeners, Source};
pub use storage::{FileStore, MemoryStore, PreferenceStore, default_store_path};
pub use timers::{Schedule, TimerId, TimerQueue};
pub use window::{
    Capabilities, Console, EntryType, PerformanceEntry, ScrollBehavior, ScrollRequest, Window,
};

use std::collections::VecDeque;

use crate::dom::{Document, NodeId};

#[derive(Debug)]
pub struct Page<T> {
    pub document: Document,
    pub window: Window,
    pub timers: TimerQueue<T>,
    pub listeners: Listeners<T>,
    queued: VecDeque<Event>,
}

impl<T> Page<T> {
    pub fn new(document: Document, window: Window) -> Self {
        Self {
            document,
            window,
            timers: TimerQueue::new(),
            listeners: Listeners::new(),
            queued: VecDeque::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn listen(&mut self, source: Source, kind: EventKind, message: T) {
        self.listeners.listen(source, kind, message);
    }

    /// Remove `node` from the document along with its subscriptions
    pub fn remove_node(&mut self, node: NodeId) {
        let removed = self.document.remove(node);
        self.listeners.forget(&removed);
    }

    /// Remove every child of `node` along with their subscriptions
    pub fn clear_children(&mut self, node: NodeId) {
        let removed = self.document.clear_children(node);
        self.listeners.forget(&removed);
    }

    /// Scroll the window; a change queues a scroll event
    pub fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        if self.window.scroll_to(top, behavior) {
            self.queue_event(Event::Scroll);
        }
    }

    pub fn scroll_into_view(&mut self, node: NodeId) {
        let top = self.document.rect(node).y;
        self.scroll_to(top, ScrollBehavior::Smooth);
    }

    /// Move focus to `node`, queueing blur/focus events
    pub fn focus(&mut self, node: NodeId) {
        let previous = self.window.focused();
        if previous == Some(node) {
            return;
        }
        if let Some(prev) = previous {
            self.queue_event(Event::Blur { target: prev });
        }
        self.window.set_focused(Some(node));
        self.queue_event(Event::Focus { target: node });
    }

    pub fn blur(&mut self) {
        if let Some(prev) = self.window.focused() {
            self.window.set_focused(None);
            self.queue_event(Event::Blur { target: prev });
        }
    }

    /// Queue an event to be dispatched after the current handler returns
    pub fn queue_event(&mut self, event: Event) {
        self.queued.push_back(event);
    }

    pub fn take_queued(&mut self) -> Option<Event> {
        self.queued.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page<&'static str> {
        Page::new(Document::new(), Window::default())
    }

    #[test]
    fn test_focus_queues_blur_then_focus() {
        let mut page = page();
        let body = page.document.body();
        let a = page.document.append_element(body, "input", "");
        let b = page.document.append_element(body, "input", "");

        page.focus(a);
        assert_eq!(page.take_queued(), Some(Event::Focus { target: a }));

        page.focus(b);
        assert_eq!(page.take_queued(), Some(Event::Blur { target: a }));
        assert_eq!(page.take_queued(), Some(Event::Focus { target: b }));
        assert_eq!(page.window.focused(), Some(b));

        page.focus(b);
        assert_eq!(page.take_queued(), None);
    }

    #[test]
    fn test_scroll_to_queues_scroll_only_on_change() {
        let mut page = page();
        page.scroll_to(0.0, ScrollBehavior::Smooth);
        assert_eq!(page.take_queued(), None);

        page.scroll_to(400.0, ScrollBehavior::Smooth);
        assert_eq!(page.take_queued(), Some(Event::Scroll));
        assert_eq!(page.window.scroll_y, 400.0);
    }

    #[test]
    fn test_remove_node_forgets_subscriptions() {
        let mut page = page();
        let body = page.document.body();
        let item = page.document.append_element(body, "div", "");
        page.listen(Source::Node(item), EventKind::Click, "item");

        page.remove_node(item);
        assert_eq!(page.listeners.count(Source::Node(item), EventKind::Click), 0);
    }
}
