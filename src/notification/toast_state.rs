//! Toast state management
//!
//! Entrance runs over two animation frames so the node is laid out before its
//! transform changes; exit plays the transition and removes the node once it
//! has finished.

use std::collections::HashMap;

use crate::dom::NodeId;
use crate::page::{EventKind, Page, Schedule, Source, TimerId};

pub const DEFAULT_DURATION_MS: u64 = 3000;
pub const EXIT_TRANSITION_MS: u64 = 300;
const CONTAINER_ID: &str = "toast-container";

/// Severity tag - determines the `toast-{tag}` class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Inverse of `tag`, used by the terminal host to style toast nodes
    pub fn from_class_list(class_name: &str) -> Self {
        class_name
            .split_whitespace()
            .find_map(|c| match c {
                "toast-success" => Some(Severity::Success),
                "toast-warning" => Some(Severity::Warning),
                "toast-error" => Some(Severity::Error),
                "toast-info" => Some(Severity::Info),
                _ => None,
            })
            .unwrap_or_default()
    }
}

/// What to show. Info severity and a 3000ms lifetime unless overridden;
/// a zero duration never closes on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastRequest {
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u64,
}

impl ToastRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

/// Handle to a live toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastHandle {
    pub id: ToastId,
    pub node: NodeId,
}

/// Scheduled toast work, carried by timers, frames and the close button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTask {
    /// First of the two entrance frames
    EnterLayout(ToastId),
    EnterSlide(ToastId),
    AutoClose(ToastId),
    CloseClicked(ToastId),
    Remove(ToastId),
}

#[derive(Debug)]
struct ToastEntry {
    node: NodeId,
    auto_close: Option<TimerId>,
    closing: bool,
}

/// Toast service. Any number of toasts may be live at once.
#[derive(Debug)]
pub struct Toasts {
    container: Option<NodeId>,
    exit_ms: u64,
    next_id: u64,
    live: HashMap<ToastId, ToastEntry>,
}

impl Toasts {
    pub fn new(container: Option<NodeId>, exit_ms: u64) -> Self {
        Self {
            container,
            exit_ms,
            next_id: 0,
            live: HashMap::new(),
        }
    }

    /// Bind to the page's `#toast-container`, if it has one
    pub fn attach<T>(page: &Page<T>, exit_ms: u64) -> Self {
        Self::new(page.document.element_by_id(CONTAINER_ID), exit_ms)
    }

    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// Create a toast. Returns `None` when the page has no toast container.
    pub fn notify<T>(&mut self, page: &mut Page<T>, request: ToastRequest) -> Option<ToastHandle>
    where
        T: From<ToastTask>,
    {
        let container = self.container?;
        let id = ToastId(self.next_id);
        self.next_id += 1;

        let doc = &mut page.document;
        let node = doc.create_element("div");
        doc.set_class_name(node, &format!("toast toast-{}", request.severity.tag()));
        let message = doc.append_element(node, "div", "toast-message");
        doc.set_text(message, &request.message);
        let close = doc.append_element(node, "button", "toast-close");
        doc.set_attribute(close, "aria-label", "Close notification");
        doc.set_text(close, "×");
        doc.append_child(container, node);

        page.listen(
            Source::Node(close),
            EventKind::Click,
            ToastTask::CloseClicked(id).into(),
        );
        page.timers.request_frame(ToastTask::EnterLayout(id).into());

        let auto_close = (request.duration_ms > 0).then(|| {
            page.timers
                .set_timeout(request.duration_ms, ToastTask::AutoClose(id).into())
        });

        #[cfg(debug_assertions)]
        log::debug!(
            "toast {:?} [{}] {:?} for {}ms",
            id,
            request.severity.tag(),
            request.message,
            request.duration_ms
        );

        self.live.insert(
            id,
            ToastEntry {
                node,
                auto_close,
                closing: false,
            },
        );
        Some(ToastHandle { id, node })
    }

    /// Start the exit transition. Closing an already-closing or removed toast
    /// does nothing.
    pub fn close<T>(&mut self, page: &mut Page<T>, id: ToastId)
    where
        T: From<ToastTask>,
    {
        let Some(entry) = self.live.get_mut(&id) else {
            return;
        };
        if entry.closing {
            return;
        }
        entry.closing = true;
        if let Some(timer) = entry.auto_close.take() {
            page.timers.clear_timeout(timer);
        }

        page.document
            .set_style(entry.node, "transform", "translateX(100%)");
        page.document.set_style(entry.node, "opacity", "0");
        page.timers
            .set_timeout(self.exit_ms, ToastTask::Remove(id).into());
    }

    pub fn handle<T>(&mut self, page: &mut Page<T>, task: ToastTask)
    where
        T: From<ToastTask>,
    {
        match task {
            ToastTask::EnterLayout(id) => {
                if self.live.contains_key(&id) {
                    page.timers.request_frame(ToastTask::EnterSlide(id).into());
                }
            }
            ToastTask::EnterSlide(id) => {
                if let Some(entry) = self.live.get(&id)
                    && !entry.closing
                {
                    page.document
                        .set_style(entry.node, "transform", "translateX(0)");
                }
            }
            ToastTask::AutoClose(id) => {
                if let Some(entry) = self.live.get_mut(&id) {
                    entry.auto_close = None;
                }
                self.close(page, id);
            }
            ToastTask::CloseClicked(id) => self.close(page, id),
            ToastTask::Remove(id) => {
                if let Some(entry) = self.live.remove(&id)
                    && page.document.parent(entry.node) == self.container
                {
                    page.remove_node(entry.node);
                }
            }
        }
    }

    pub fn is_live(&self, id: ToastId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn is_closing(&self, id: ToastId) -> bool {
        self.live.get(&id).is_some_and(|e| e.closing)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
#[path = "toast_state_tests.rs"]
mod toast_state_tests;
