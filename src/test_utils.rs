//! Shared test utilities for softshelf
//!
//! Fixtures for building a running catalog page and poking at its nodes.

#[cfg(test)]
pub mod test_helpers {
    use crate::catalog::sample_page;
    use crate::config::Config;
    use crate::dom::NodeId;
    use crate::page::{MemoryStore, Window};
    use crate::runtime::Runtime;
    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind,
    };

    /// Catalog page on a default window with an empty preference store
    pub fn sample_runtime() -> Runtime {
        runtime_with_window(Window::default())
    }

    pub fn runtime_with_window(window: Window) -> Runtime {
        Runtime::start(sample_page(), window, &Config::default())
    }

    /// Window whose store already holds a theme preference
    pub fn window_with_theme(theme: &str) -> Window {
        Window::new(Box::new(MemoryStore::new().with_entry("theme", theme)))
    }

    /// First node matching `selector`, panicking with the selector otherwise
    pub fn node(rt: &Runtime, selector: &str) -> NodeId {
        rt.document()
            .select(selector)
            .unwrap_or_else(|| panic!("no node matches {}", selector))
    }

    pub fn nodes(rt: &Runtime, selector: &str) -> Vec<NodeId> {
        rt.document().select_all(selector)
    }

    /// Text of every live toast message, oldest first
    pub fn toast_messages(rt: &Runtime) -> Vec<String> {
        nodes(rt, "#toast-container .toast-message")
            .into_iter()
            .map(|n| rt.document().text_content(n))
            .collect()
    }

    pub fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    pub fn mouse_event(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }
}
