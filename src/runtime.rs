//! Event loop glue
//!
//! Owns the page and the controller. Hosts feed it input events, advance the
//! virtual clock and render animation frames; every resulting action is
//! handed to the controller together with its trigger.

use crate::config::Config;
use crate::controller::{Action, Controller, NavState, Theme, Trigger};
use crate::dom::{Document, NodeId};
use crate::notification::{ToastHandle, ToastRequest};
use crate::page::{Dispatch, Event, Key, Page, PerformanceEntry, ScrollBehavior, Window};

/// Cap on events queued by handlers while draining one dispatch
const MAX_CHAINED_EVENTS: usize = 256;
/// Cap on frame batches run by `settle_frames`
const MAX_FRAME_BATCHES: usize = 32;

#[derive(Debug)]
pub struct Runtime {
    page: Page<Action>,
    controller: Controller,
}

impl Runtime {
    /// Build the page and initialize the controller on it
    pub fn start(document: Document, window: Window, config: &Config) -> Self {
        let mut page = Page::new(document, window);
        let mut controller = Controller::new(config);
        controller.init(&mut page);

        let mut runtime = Self { page, controller };
        runtime.drain_queued();
        runtime
    }

    pub fn page(&self) -> &Page<Action> {
        &self.page
    }

    pub fn document(&self) -> &Document {
        &self.page.document
    }

    /// Direct document access for hosts that lay out elements
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.page.document
    }

    pub fn window(&self) -> &Window {
        &self.page.window
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn now_ms(&self) -> u64 {
        self.page.now_ms()
    }

    // ==================== Events ====================

    /// Deliver an event and everything its handlers queue.
    /// Returns whether a handler prevented the default action.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let prevented = self.deliver(event);
        self.drain_queued();
        prevented
    }

    fn deliver(&mut self, event: Event) -> bool {
        let messages = self.page.listeners.route(&self.page.document, &event);
        let mut dispatch = Dispatch::new(event);
        for message in messages {
            self.controller
                .handle(&mut self.page, message, &mut Trigger::Event(&mut dispatch));
        }
        dispatch.default_prevented()
    }

    fn drain_queued(&mut self) {
        let mut delivered = 0;
        while let Some(event) = self.page.take_queued() {
            if delivered == MAX_CHAINED_EVENTS {
                log::warn!("Dropping queued events after {} chained dispatches", delivered);
                while self.page.take_queued().is_some() {}
                return;
            }
            self.deliver(event);
            delivered += 1;
        }
    }

    pub fn click(&mut self, target: NodeId) -> bool {
        self.dispatch(Event::Click { target })
    }

    pub fn key_down(&mut self, target: NodeId, key: Key) -> bool {
        self.dispatch(Event::KeyDown { target, key })
    }

    /// Replace an input's value the way typing does, then fire `input`
    pub fn type_into(&mut self, input: NodeId, value: &str) {
        self.page.document.set_value(input, value);
        self.dispatch(Event::Input { target: input });
    }

    pub fn submit(&mut self, form: NodeId) -> bool {
        self.dispatch(Event::Submit { target: form })
    }

    pub fn pointer_move(&mut self, target: NodeId, client_x: f64, client_y: f64) {
        self.dispatch(Event::PointerMove {
            target,
            client_x,
            client_y,
        });
    }

    pub fn pointer_leave(&mut self, target: NodeId) {
        self.dispatch(Event::PointerLeave { target });
    }

    pub fn focus(&mut self, node: NodeId) {
        self.page.focus(node);
        self.drain_queued();
    }

    pub fn blur(&mut self) {
        self.page.blur();
        self.drain_queued();
    }

    /// User scroll. Fires a scroll event when the offset changes.
    pub fn scroll_to(&mut self, top: f64) {
        self.page.scroll_to(top, ScrollBehavior::Auto);
        self.drain_queued();
    }

    pub fn scroll_by(&mut self, delta: f64) {
        let top = self.page.window.scroll_y + delta;
        self.scroll_to(top);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.page.window.viewport_width = width;
        self.page.window.viewport_height = height;
        self.dispatch(Event::Resize);
    }

    // ==================== Clock ====================

    /// Run every timer due within `ms` from now. Returns how many fired.
    pub fn advance_by(&mut self, ms: u64) -> usize {
        let until = self.now_ms().saturating_add(ms);
        self.advance_to(until)
    }

    /// Run timers due at or before `until` in order, then move the clock there
    pub fn advance_to(&mut self, until: u64) -> usize {
        let mut fired = 0;
        while let Some((id, action)) = self.page.timers.pop_due(until) {
            self.controller
                .handle(&mut self.page, action, &mut Trigger::Timer(id));
            self.drain_queued();
            fired += 1;
        }
        self.page.timers.advance_clock(until);
        fired
    }

    pub fn next_timer_due(&self) -> Option<u64> {
        self.page.timers.next_due()
    }

    pub fn pending_timers(&self) -> usize {
        self.page.timers.pending_timers()
    }

    // ==================== Frames ====================

    /// Run one batch of frame callbacks. Callbacks requested meanwhile wait
    /// for the next batch.
    pub fn render_frame(&mut self) -> usize {
        let batch = self.page.timers.take_frame_batch();
        let count = batch.len();
        for action in batch {
            self.controller
                .handle(&mut self.page, action, &mut Trigger::Frame);
            self.drain_queued();
        }
        count
    }

    /// Run frame batches until none are pending
    pub fn settle_frames(&mut self) -> usize {
        let mut batches = 0;
        while self.has_pending_frames() && batches < MAX_FRAME_BATCHES {
            self.render_frame();
            batches += 1;
        }
        batches
    }

    pub fn has_pending_frames(&self) -> bool {
        self.page.timers.pending_frames() > 0
    }

    // ==================== Services ====================

    /// Show a toast. `None` when the page has no toast container.
    pub fn notify(&mut self, request: ToastRequest) -> Option<ToastHandle> {
        self.controller.notify(&mut self.page, request)
    }

    /// A performance entry arrives from the host
    pub fn record_performance_entry(&mut self, entry: PerformanceEntry) {
        self.page.window.push_performance_entry(entry.clone());
        self.controller.observe_performance(&mut self.page, &entry);
    }

    pub fn theme(&self) -> Option<Theme> {
        self.controller.theme()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.controller.set_theme(&mut self.page, theme);
    }

    pub fn nav_state(&self) -> Option<NavState> {
        self.controller.nav_state()
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod runtime_tests;
