//! Keyboard and mouse handling for the terminal host
//!
//! Crossterm events become page events on the node under the cursor or the
//! focused node. Default actions a browser would run (following a click,
//! submitting a form) happen here when no handler prevented them.

use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::Shell;
use super::layout::{COL_PX, ROW_PX};
use crate::dom::NodeId;
use crate::page::Key;

/// Elements reachable with Tab and focused by a click
const FOCUSABLE: &str = "a, button, input, select, [tabindex], .category-card, .ranking-item";
const WHEEL_ROWS: f64 = 3.0;

impl Shell {
    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Check that it's a key press event to avoid duplicates
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(cols, rows) => self.set_viewport(cols, rows),
            _ => {}
        }
        self.relayout();
    }

    fn editing(&self) -> Option<NodeId> {
        let focused = self.runtime.window().focused()?;
        (self.runtime.document().tag(focused) == "input").then_some(focused)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc => match self.runtime.window().focused() {
                Some(focused) => {
                    self.runtime.key_down(focused, Key::Escape);
                    self.runtime.blur();
                }
                None => self.should_quit = true,
            },
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::Up => self.scroll_rows(-1.0),
            KeyCode::Down => self.scroll_rows(1.0),
            KeyCode::PageUp => self.scroll_rows(-f64::from(self.page_rows.max(1))),
            KeyCode::PageDown => self.scroll_rows(f64::from(self.page_rows.max(1))),
            KeyCode::Home if self.editing().is_none() => self.runtime.scroll_to(0.0),
            KeyCode::End if self.editing().is_none() => self.runtime.scroll_to(self.max_scroll()),
            KeyCode::Enter => self.activate_focused(Key::Enter),
            KeyCode::Backspace => {
                if let Some(input) = self.editing() {
                    let mut value = self.runtime.document().value(input);
                    value.pop();
                    self.runtime.type_into(input, &value);
                }
            }
            KeyCode::Char(c) => match self.editing() {
                Some(input) => {
                    let mut value = self.runtime.document().value(input);
                    value.push(c);
                    self.runtime.type_into(input, &value);
                }
                None if c == 'q' => self.should_quit = true,
                None if c == ' ' => self.activate_focused(Key::Space),
                None => {}
            },
            _ => {}
        }
    }

    /// Enter or Space on the focused element
    fn activate_focused(&mut self, key: Key) {
        let Some(focused) = self.runtime.window().focused() else {
            return;
        };
        let doc = self.runtime.document();
        match doc.tag(focused) {
            "input" => {
                if key == Key::Enter
                    && let Some(form) = doc.closest(focused, "form")
                {
                    self.runtime.submit(form);
                }
            }
            "select" => {
                let count = doc.options(focused).len();
                if count > 0 {
                    let next = (doc.selected_index(focused) + 1) % count;
                    self.runtime.document_mut().set_selected_index(focused, next);
                }
            }
            _ => {
                if !self.runtime.key_down(focused, key) {
                    self.click_with_defaults(focused);
                }
            }
        }
    }

    /// Click `target`, then run the default action unless a handler prevented it
    fn click_with_defaults(&mut self, target: NodeId) {
        if self.runtime.click(target) {
            return;
        }
        let doc = self.runtime.document();
        let Some(button) = doc.closest(target, "button") else {
            return;
        };
        if doc.attribute(button, "type").is_none_or(|t| t == "submit")
            && let Some(form) = doc.closest(button, "form")
        {
            self.runtime.submit(form);
        }
    }

    /// Focusable elements in document order, one per element
    fn focus_ring(&self) -> Vec<NodeId> {
        let doc = self.runtime.document();
        let mut ring: Vec<NodeId> = Vec::new();
        for row in &self.rows {
            if let Some(node) = doc.closest(row.node, FOCUSABLE)
                && !ring.contains(&node)
            {
                ring.push(node);
            }
        }
        ring
    }

    fn move_focus(&mut self, forward: bool) {
        let ring = self.focus_ring();
        if ring.is_empty() {
            return;
        }
        let current = self
            .runtime
            .window()
            .focused()
            .and_then(|f| ring.iter().position(|n| *n == f));
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % ring.len(),
            (Some(i), false) => (i + ring.len() - 1) % ring.len(),
            (None, true) => 0,
            (None, false) => ring.len() - 1,
        };
        let node = ring[next];
        self.runtime.focus(node);
        self.reveal(node);
    }

    /// Scroll just enough to bring `node` on screen
    fn reveal(&mut self, node: NodeId) {
        let rect = self.runtime.document().rect(node);
        let top = self.runtime.window().scroll_y;
        let height = f64::from(self.page_rows) * ROW_PX;
        if rect.y < top {
            self.runtime.scroll_to(rect.y);
        } else if rect.bottom() > top + height {
            self.runtime.scroll_to((rect.bottom() - height).max(0.0));
        }
    }

    fn max_scroll(&self) -> f64 {
        let hidden = self.rows.len().saturating_sub(self.page_rows as usize);
        hidden as f64 * ROW_PX
    }

    fn scroll_rows(&mut self, rows: f64) {
        let top = self.runtime.window().scroll_y + rows * ROW_PX;
        self.runtime.scroll_to(top.clamp(0.0, self.max_scroll()));
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_rows(WHEEL_ROWS),
            MouseEventKind::ScrollUp => self.scroll_rows(-WHEEL_ROWS),
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(target) = self.node_at(mouse.row) else {
                    return;
                };
                match self.runtime.document().closest(target, FOCUSABLE) {
                    Some(focusable) => self.runtime.focus(focusable),
                    None => self.runtime.blur(),
                }
                self.click_with_defaults(target);
            }
            MouseEventKind::Moved => self.hover(mouse.column, mouse.row),
            _ => {}
        }
    }

    /// Move the pointer, firing leave events on every element it exits
    fn hover(&mut self, column: u16, row: u16) {
        let target = self.node_at(row);
        if let Some(previous) = self.hovered
            && Some(previous) != target
        {
            let doc = self.runtime.document();
            let mut left = vec![previous];
            left.extend(doc.ancestors(previous));
            left.retain(|node| target.is_none_or(|t| !doc.contains(*node, t)));
            for node in left {
                self.runtime.pointer_leave(node);
            }
        }
        self.hovered = target;

        if let Some(target) = target {
            let client_x = (f64::from(column) + 0.5) * COL_PX;
            let client_y = (f64::from(row) + 0.5) * ROW_PX;
            self.runtime.pointer_move(target, client_x, client_y);
        }
    }
}
