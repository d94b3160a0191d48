use std::collections::VecDeque;

use crate::dom::NodeId;

use super::storage::{MemoryStore, PreferenceStore};

/// Optional host capabilities. A missing capability degrades the feature
/// that needs it to a fallback or a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub intersection_observer: bool,
    pub performance_observer: bool,
    pub match_media: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            intersection_observer: true,
            performance_observer: true,
            match_media: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    LargestContentfulPaint,
    FirstContentfulPaint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceEntry {
    pub name: String,
    pub entry_type: EntryType,
    pub render_time: f64,
}

/// Lines kept for display; older lines only reach the logger
pub const CONSOLE_CAPACITY: usize = 200;

/// Diagnostic console. Recent lines are kept and every line is forwarded
/// to the logger.
#[derive(Debug, Default)]
pub struct Console {
    lines: VecDeque<String>,
}

impl Console {
    pub fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!("{}", line);
        if self.lines.len() == CONSOLE_CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Most recent lines, oldest first
    pub fn lines(&self) -> &VecDeque<String> {
        &self.lines
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }
}

/// Viewport, scroll position, focus and host services
#[derive(Debug)]
pub struct Window {
    pub scroll_y: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub capabilities: Capabilities,
    pub console: Console,
    system_prefers_dark: bool,
    focused: Option<NodeId>,
    performance: Vec<PerformanceEntry>,
    last_scroll_request: Option<ScrollRequest>,
    store: Box<dyn PreferenceStore>,
}

impl Default for Window {
    fn default() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }
}

impl Window {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        Self {
            scroll_y: 0.0,
            viewport_width: 1280.0,
            viewport_height: 800.0,
            capabilities: Capabilities::default(),
            console: Console::default(),
            system_prefers_dark: false,
            focused: None,
            performance: Vec::new(),
            last_scroll_request: None,
            store,
        }
    }

    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_system_dark(mut self, prefers_dark: bool) -> Self {
        self.system_prefers_dark = prefers_dark;
        self
    }

    /// `(prefers-color-scheme: dark)`, or `None` without media query support
    pub fn prefers_dark_scheme(&self) -> Option<bool> {
        self.capabilities
            .match_media
            .then_some(self.system_prefers_dark)
    }

    pub fn storage(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }

    pub fn storage_mut(&mut self) -> &mut dyn PreferenceStore {
        self.store.as_mut()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub(super) fn set_focused(&mut self, node: Option<NodeId>) {
        self.focused = node;
    }

    /// Scroll the page. Returns whether the offset changed.
    pub fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) -> bool {
        let top = top.max(0.0);
        self.last_scroll_request = Some(ScrollRequest { top, behavior });
        let changed = (self.scroll_y - top).abs() > f64::EPSILON;
        self.scroll_y = top;
        changed
    }

    /// The most recent scroll, programmatic or user
    pub fn last_scroll_request(&self) -> Option<&ScrollRequest> {
        self.last_scroll_request.as_ref()
    }

    pub fn push_performance_entry(&mut self, entry: PerformanceEntry) {
        self.performance.push(entry);
    }

    /// Buffered entries of one type
    pub fn performance_entries(&self, entry_type: EntryType) -> Vec<PerformanceEntry> {
        self.performance
            .iter()
            .filter(|e| e.entry_type == entry_type)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_keeps_only_latest_request() {
        let mut window = Window::default();
        for i in 0..5000 {
            let top = if i % 2 == 0 { 400.0 } else { 0.0 };
            window.scroll_to(top, ScrollBehavior::Auto);
        }
        window.scroll_to(120.0, ScrollBehavior::Smooth);

        let request = window.last_scroll_request().unwrap();
        assert_eq!(request.top, 120.0);
        assert_eq!(request.behavior, ScrollBehavior::Smooth);
        assert_eq!(window.scroll_y, 120.0);
    }

    #[test]
    fn test_scroll_clamps_negative_offsets() {
        let mut window = Window::default();
        assert!(!window.scroll_to(-50.0, ScrollBehavior::Auto));
        assert_eq!(window.last_scroll_request().unwrap().top, 0.0);
    }

    #[test]
    fn test_console_drops_oldest_lines_past_capacity() {
        let mut console = Console::default();
        for i in 0..CONSOLE_CAPACITY + 50 {
            console.log(format!("line {}", i));
        }
        assert_eq!(console.lines().len(), CONSOLE_CAPACITY);
        assert_eq!(console.lines().front().map(String::as_str), Some("line 50"));
        assert_eq!(console.last(), Some(format!("line {}", CONSOLE_CAPACITY + 49)).as_deref());
    }
}
