//! Tests for terminal rendering

use super::*;
use crate::controller::Theme;
use crate::notification::ToastRequest;
use crate::shell::layout::layout;
use crate::test_utils::test_helpers::*;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

fn render_to_string(runtime: &mut Runtime, width: u16, height: u16) -> String {
    let rows = layout(runtime.document_mut());
    let mut terminal = create_test_terminal(width, height);
    terminal.draw(|f| render(f, runtime, &rows)).unwrap();
    terminal.backend().to_string()
}

#[test]
fn test_page_rows_are_drawn() {
    let mut rt = sample_runtime();
    let output = render_to_string(&mut rt, 80, 24);
    assert!(output.contains("Softshelf"));
    assert!(output.contains("Find the right software"));
    assert!(output.contains("theme: light"));
}

#[test]
fn test_scrolled_page_skips_rows() {
    let mut rt = sample_runtime();
    rt.scroll_to(20.0 * 60.0);
    let output = render_to_string(&mut rt, 80, 24);
    assert!(!output.contains("Find the right software"));
}

#[test]
fn test_status_follows_theme() {
    let mut rt = sample_runtime();
    rt.set_theme(Theme::Dark);
    let output = render_to_string(&mut rt, 100, 24);
    assert!(output.contains("theme: dark"));
}

#[test]
fn test_toast_overlay_top_right() {
    let mut rt = sample_runtime();
    rt.notify(ToastRequest::new("Saved"));
    rt.settle_frames();

    let mut terminal = create_test_terminal(60, 12);
    terminal
        .draw(|f| render_toasts(f, f.area(), rt.document()))
        .unwrap();
    let buffer = terminal.backend().buffer();

    let line: String = (0..60u16)
        .map(|x| buffer[(x, 2)].symbol().to_string())
        .collect();
    assert!(line.contains("Saved"));
    assert!(line.contains('×'));
    assert!(line.trim_end().len() < line.len(), "toast should leave a right margin");
    assert!(line.starts_with("      "), "toast should sit on the right");
}

#[test]
fn test_toasts_stack_downwards() {
    let mut rt = sample_runtime();
    rt.notify(ToastRequest::new("first"));
    rt.notify(ToastRequest::new("second"));

    let mut terminal = create_test_terminal(60, 12);
    terminal
        .draw(|f| render_toasts(f, f.area(), rt.document()))
        .unwrap();
    let buffer = terminal.backend().buffer();
    let row = |y: u16| -> String { (0..60u16).map(|x| buffer[(x, y)].symbol().to_string()).collect() };

    assert!(row(2).contains("first"));
    assert!(row(5).contains("second"));
}

#[test]
fn test_no_container_draws_nothing() {
    let doc = crate::dom::Document::new();
    let mut terminal = create_test_terminal(40, 8);
    terminal.draw(|f| render_toasts(f, f.area(), &doc)).unwrap();
    assert!(!terminal.backend().to_string().contains('×'));
}

#[test]
fn test_oversized_toast_is_clamped_to_area() {
    let mut rt = sample_runtime();
    rt.notify(ToastRequest::new("x".repeat(70_000)));
    rt.settle_frames();

    let mut terminal = create_test_terminal(60, 12);
    terminal
        .draw(|f| render_toasts(f, f.area(), rt.document()))
        .unwrap();
    let buffer = terminal.backend().buffer();
    let line: String = (0..60u16)
        .map(|x| buffer[(x, 2)].symbol().to_string())
        .collect();
    assert!(line.contains("xxxx"));
    assert!(line.ends_with("  "), "toast should keep its margin");
}
