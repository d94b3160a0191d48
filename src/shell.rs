//! Terminal host for the catalog page
//!
//! Lays the document out as rows, draws it with ratatui and turns crossterm
//! input into page events. Real elapsed time drives the page clock.

mod input;
mod layout;
mod render;

pub use layout::{COL_PX, ROW_PX, Row, RowKind, layout, row_index};
pub use render::{render_toasts, split};

use std::time::Duration;

use ratatui::Frame;

use crate::dom::NodeId;
use crate::runtime::Runtime;

/// Frame interval while animation frames are pending
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Longest idle wait between polls
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub struct Shell {
    runtime: Runtime,
    rows: Vec<Row>,
    page_rows: u16,
    hovered: Option<NodeId>,
    should_quit: bool,
}

impl Shell {
    pub fn new(runtime: Runtime) -> Self {
        let mut shell = Self {
            runtime,
            rows: Vec::new(),
            page_rows: 0,
            hovered: None,
            should_quit: false,
        };
        shell.relayout();
        shell
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Recompute rows and element boxes from the current document
    pub fn relayout(&mut self) {
        self.rows = layout(self.runtime.document_mut());
    }

    /// Match the page viewport to a terminal of `cols` x `rows` cells
    pub fn set_viewport(&mut self, cols: u16, rows: u16) {
        let (page, _) = split(ratatui::layout::Rect::new(0, 0, cols, rows));
        self.page_rows = page.height;
        self.runtime
            .resize(f64::from(page.width) * COL_PX, f64::from(page.height) * ROW_PX);
        self.relayout();
    }

    /// Catch the page clock up to `now_ms` and run one frame batch
    pub fn tick(&mut self, now_ms: u64) {
        self.runtime.advance_to(now_ms);
        if self.runtime.has_pending_frames() {
            self.runtime.render_frame();
        }
        self.relayout();
    }

    /// How long to wait for input before the next tick
    pub fn poll_timeout(&self, now_ms: u64) -> Duration {
        if self.runtime.has_pending_frames() {
            return FRAME_INTERVAL;
        }
        match self.runtime.next_timer_due() {
            Some(due) => Duration::from_millis(due.saturating_sub(now_ms)).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        render::render(frame, &self.runtime, &self.rows);
    }

    /// Row under terminal line `screen_row` of the page area
    fn node_at(&self, screen_row: u16) -> Option<NodeId> {
        if screen_row >= self.page_rows {
            return None;
        }
        let first = row_index(self.runtime.window().scroll_y);
        self.rows
            .get(first + screen_row as usize)
            .map(|row| row.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::*;

    #[test]
    fn test_viewport_follows_terminal() {
        let mut shell = Shell::new(sample_runtime());
        shell.set_viewport(100, 31);
        let window = shell.runtime().window();
        assert_eq!(window.viewport_width, 800.0);
        assert_eq!(window.viewport_height, 600.0);
    }

    #[test]
    fn test_tick_runs_frames_and_timers() {
        let mut shell = Shell::new(sample_runtime());
        shell.set_viewport(80, 24);
        assert_eq!(shell.poll_timeout(0), FRAME_INTERVAL);

        shell.tick(0);
        let card = node(shell.runtime(), ".software-card");
        assert!(shell.runtime().document().has_class(card, "fade-in"));
        // first images are on screen and start loading
        assert!(!nodes(shell.runtime(), "img[src]").is_empty());

        shell.tick(1);
        assert!(!nodes(shell.runtime(), "img.loaded").is_empty());
    }

    #[test]
    fn test_poll_waits_for_next_timer() {
        let mut shell = Shell::new(sample_runtime());
        shell.set_viewport(80, 24);
        shell.runtime_mut().settle_frames();
        shell.runtime_mut().advance_by(0);
        assert_eq!(shell.poll_timeout(0), IDLE_POLL);

        shell
            .runtime_mut()
            .notify(crate::notification::ToastRequest::new("hi"));
        shell.runtime_mut().settle_frames();
        assert_eq!(shell.poll_timeout(2900), Duration::from_millis(100));
    }

    #[test]
    fn test_node_at_respects_scroll() {
        let mut shell = Shell::new(sample_runtime());
        shell.set_viewport(80, 24);
        let top = shell.node_at(0).unwrap();
        assert_eq!(shell.runtime().document().text(top), "Softshelf");

        shell.runtime_mut().scroll_to(ROW_PX * 2.0);
        shell.relayout();
        assert_eq!(shell.node_at(0), Some(shell.rows()[2].node));
        assert_eq!(shell.node_at(23), None);
    }
}
