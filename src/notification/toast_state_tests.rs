//! Tests for toast_state

use super::*;
use crate::dom::Document;
use crate::page::{Event, Window};

fn page_with_container() -> (Page<ToastTask>, NodeId) {
    let mut doc = Document::new();
    let container = doc.append_element(doc.body(), "div", "toast-stack");
    doc.set_attribute(container, "id", "toast-container");
    (Page::new(doc, Window::default()), container)
}

fn run_frame(toasts: &mut Toasts, page: &mut Page<ToastTask>) {
    for task in page.timers.take_frame_batch() {
        toasts.handle(page, task);
    }
}

fn advance_to(toasts: &mut Toasts, page: &mut Page<ToastTask>, until: u64) {
    while let Some((_, task)) = page.timers.pop_due(until) {
        toasts.handle(page, task);
    }
    page.timers.advance_clock(until);
}

fn close_button(page: &Page<ToastTask>, handle: &ToastHandle) -> NodeId {
    page.document
        .select_in(handle.node, ".toast-close")
        .expect("toast has a close button")
}

fn click(toasts: &mut Toasts, page: &mut Page<ToastTask>, target: NodeId) {
    for task in page.listeners.route(&page.document, &Event::Click { target }) {
        toasts.handle(page, task);
    }
}

#[test]
fn test_request_defaults() {
    let request = ToastRequest::new("Saved");
    assert_eq!(request.severity, Severity::Info);
    assert_eq!(request.duration_ms, 3000);

    let request = ToastRequest::new("Oops")
        .severity(Severity::Error)
        .duration_ms(0);
    assert_eq!(request.severity, Severity::Error);
    assert_eq!(request.duration_ms, 0);
}

#[test]
fn test_severity_tag_roundtrip() {
    for severity in [
        Severity::Info,
        Severity::Success,
        Severity::Warning,
        Severity::Error,
    ] {
        let class_list = format!("toast toast-{}", severity.tag());
        assert_eq!(Severity::from_class_list(&class_list), severity);
    }
    assert_eq!(Severity::from_class_list("toast"), Severity::Info);
}

#[test]
fn test_notify_without_container_returns_none() {
    let mut page: Page<ToastTask> = Page::new(Document::new(), Window::default());
    let mut toasts = Toasts::attach(&page, EXIT_TRANSITION_MS);
    assert!(toasts.notify(&mut page, ToastRequest::new("hi")).is_none());
    assert_eq!(toasts.live_count(), 0);
}

#[test]
fn test_notify_creates_one_dismissible_node() {
    let (mut page, container) = page_with_container();
    let mut toasts = Toasts::attach(&page, EXIT_TRANSITION_MS);

    let handle = toasts
        .notify(&mut page, ToastRequest::new("Viewing details").severity(Severity::Success))
        .unwrap();

    assert_eq!(page.document.children(container), &[handle.node]);
    assert_eq!(page.document.class_name(handle.node), "toast toast-success");
    let message = page.document.select_in(handle.node, ".toast-message").unwrap();
    assert_eq!(page.document.text(message), "Viewing details");
    let close = close_button(&page, &handle);
    assert_eq!(
        page.document.attribute(close, "aria-label"),
        Some("Close notification")
    );
}

#[test]
fn test_entrance_takes_two_frames() {
    let (mut page, _) = page_with_container();
    let mut toasts = Toasts::attach(&page, EXIT_TRANSITION_MS);
    let handle = toasts.notify(&mut page, ToastRequest::new("hi")).unwrap();

    run_frame(&mut toasts, &mut page);
    assert_eq!(page.document.style(handle.node, "transform"), None);

    run_frame(&mut toasts, &mut page);
    assert_eq!(
        page.document.style(handle.node, "transform"),
        Some("translateX(0)")
    );
}

#[test]
fn test_auto_close_after_duration() {
    let (mut page, container) = page_with_container();
    let mut toasts = Toasts::attach(&page, EXIT_TRANSITION_MS);
    let handle = toasts
        .notify(&mut page, ToastRequest::new("hi").duration_ms(1000))
        .unwrap();

    advance_to(&mut toasts, &mut page, 999);
    assert!(toasts.is_live(handle.id));
    assert!(!toasts.is_closing(handle.id));

    advance_to(&mut toasts, &mut page, 1000);
    assert!(toasts.is_closing(handle.id));
    assert_eq!(page.document.style(handle.node, "opacity"), Some("0"));
    assert_eq!(
        page.document.style(handle.node, "transform"),
        Some("translateX(100%)")
    );

    advance_to(&mut toasts, &mut page, 1000 + EXIT_TRANSITION_MS);
    assert!(!toasts.is_live(handle.id));
    assert!(page.document.children(container).is_empty());
}

#[test]
fn test_manual_close_cancels_auto_close() {
    let (mut page, container) = page_with_container();
    let mut toasts = Toasts::attach(&page, EXIT_TRANSITION_MS);
    let handle = toasts.notify(&mut page, ToastRequest::new("hi")).unwrap();

    advance_to(&mut toasts, &mut page, 500);
    let close = close_button(&page, &handle);
    click(&mut toasts, &mut page, close);
    assert!(toasts.is_closing(handle.id));
    // Only the removal timer is left
    assert_eq!(page.timers.pending_timers(), 1);

    advance_to(&mut toasts, &mut page, 500 + EXIT_TRANSITION_MS);
    assert!(page.document.children(container).is_empty());
    assert!(!toasts.is_live(handle.id));

    // Past the original auto-close deadline nothing else happens
    advance_to(&mut toasts, &mut page, 10_000);
    assert_eq!(page.timers.pending_timers(), 0);
}

#[test]
fn test_double_close_is_noop() {
    let (mut page, _) = page_with_container();
    let mut toasts = Toasts::attach(&page, EXIT_TRANSITION_MS);
    let handle = toasts.notify(&mut page, ToastRequest::new("hi")).unwrap();

    toasts.close(&mut page, handle.id);
    toasts.close(&mut page, handle.id);
    assert_eq!(page.timers.pending_timers(), 1);

    advance_to(&mut toasts, &mut page, EXIT_TRANSITION_MS);
    toasts.close(&mut page, handle.id);
    assert_eq!(page.timers.pending_timers(), 0);
}

#[test]
fn test_zero_duration_is_sticky() {
    let (mut page, _) = page_with_container();
    let mut toasts = Toasts::attach(&page, EXIT_TRANSITION_MS);
    let handle = toasts
        .notify(&mut page, ToastRequest::new("sticky").duration_ms(0))
        .unwrap();

    advance_to(&mut toasts, &mut page, 60_000);
    assert!(toasts.is_live(handle.id));
    assert!(!toasts.is_closing(handle.id));
}

#[test]
fn test_concurrent_toasts() {
    let (mut page, container) = page_with_container();
    let mut toasts = Toasts::attach(&page, EXIT_TRANSITION_MS);
    let first = toasts
        .notify(&mut page, ToastRequest::new("one").duration_ms(1000))
        .unwrap();
    let second = toasts
        .notify(&mut page, ToastRequest::new("two").duration_ms(5000))
        .unwrap();

    assert_eq!(page.document.children(container).len(), 2);
    advance_to(&mut toasts, &mut page, 2000);
    assert_eq!(page.document.children(container), &[second.node]);
    assert!(!toasts.is_live(first.id));
}

#[test]
fn test_removed_toast_drops_close_subscription() {
    let (mut page, _) = page_with_container();
    let mut toasts = Toasts::attach(&page, EXIT_TRANSITION_MS);
    let handle = toasts.notify(&mut page, ToastRequest::new("hi")).unwrap();
    let close = close_button(&page, &handle);

    toasts.close(&mut page, handle.id);
    advance_to(&mut toasts, &mut page, EXIT_TRANSITION_MS);
    assert_eq!(
        page.listeners.count(Source::Node(close), EventKind::Click),
        0
    );
}
