//! Terminal rendering of the page, the toast overlay and the status line

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use super::layout::{Row, RowKind, row_index};
use crate::controller::Theme;
use crate::dom::{Document, NodeId};
use crate::notification::Severity;
use crate::runtime::Runtime;

const TOAST_MARGIN: u16 = 2;
const TOAST_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy)]
struct Palette {
    fg: Color,
    bg: Color,
    muted: Color,
    accent: Color,
    focus_bg: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                fg: Color::Black,
                bg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Blue,
                focus_bg: Color::LightBlue,
            },
            Theme::Dark => Palette {
                fg: Color::White,
                bg: Color::Black,
                muted: Color::Gray,
                accent: Color::Cyan,
                focus_bg: Color::DarkGray,
            },
        }
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

/// Split the frame into the page area and the one-line status bar
pub fn split(area: Rect) -> (Rect, Rect) {
    let [page, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
    (page, status)
}

pub fn render(frame: &mut Frame, runtime: &Runtime, rows: &[Row]) {
    let (page_area, status_area) = split(frame.area());
    let palette = Palette::for_theme(runtime.theme().unwrap_or_default());

    render_page(frame, page_area, runtime, rows, palette);
    render_status(frame, status_area, runtime, palette);
    render_toasts(frame, page_area, runtime.document());
}

fn row_line<'a>(row: &'a Row, doc: &Document, focused: Option<NodeId>, palette: Palette) -> Line<'a> {
    let mut style = Style::default().fg(palette.fg);
    match row.kind {
        RowKind::Heading => style = style.add_modifier(Modifier::BOLD),
        RowKind::Link => style = style.fg(palette.accent).add_modifier(Modifier::UNDERLINED),
        RowKind::Button | RowKind::Select => style = style.fg(palette.accent),
        RowKind::Input => {
            if doc.value(row.node).is_empty() {
                style = style.fg(palette.muted);
            }
        }
        RowKind::Image => style = style.fg(palette.muted),
        RowKind::Text => {}
    }
    if doc.has_class(row.node, "active") || doc.has_class(row.node, "clicked") {
        style = style.add_modifier(Modifier::REVERSED);
    }
    if focused.is_some_and(|f| f == row.node || doc.contains(f, row.node)) {
        style = style.bg(palette.focus_bg);
    }

    // a tilted card leans its rows
    let tilted = doc
        .closest(row.node, ".category-card")
        .is_some_and(|card| doc.style(card, "transform").is_some());
    let marker = if tilted { "» " } else { "" };

    Line::from(vec![
        Span::raw(" ".repeat(row.indent())),
        Span::styled(marker, Style::default().fg(palette.accent)),
        Span::styled(row.text.as_str(), style),
    ])
}

fn render_page(frame: &mut Frame, area: Rect, runtime: &Runtime, rows: &[Row], palette: Palette) {
    let doc = runtime.document();
    let focused = runtime.window().focused();
    let first = row_index(runtime.window().scroll_y);
    let visible = area.height as usize;

    let lines: Vec<Line> = rows
        .iter()
        .skip(first)
        .take(visible)
        .map(|row| row_line(row, doc, focused, palette))
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().fg(palette.fg).bg(palette.bg));
    frame.render_widget(paragraph, area);

    render_scrollbar(frame, area, rows.len(), visible, first, palette.muted);
}

fn render_scrollbar(
    frame: &mut Frame,
    area: Rect,
    total_rows: usize,
    viewport_rows: usize,
    offset: usize,
    color: Color,
) {
    if total_rows <= viewport_rows || viewport_rows == 0 {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .thumb_style(Style::default().fg(color))
        .track_style(Style::default().fg(color));

    // thumb reaches the bottom exactly at max scroll
    let max_scroll = total_rows.saturating_sub(viewport_rows);
    let mut state = ScrollbarState::new(max_scroll + 1)
        .position(offset.min(max_scroll))
        .viewport_content_length(viewport_rows);

    frame.render_stateful_widget(scrollbar, area, &mut state);
}

fn render_status(frame: &mut Frame, area: Rect, runtime: &Runtime, palette: Palette) {
    let theme = runtime.theme().unwrap_or_default();
    let nav = match runtime.nav_state() {
        Some(state) => format!("{:?}", state).to_lowercase(),
        None => "none".to_string(),
    };
    let last_log = runtime.window().console.last().unwrap_or("");

    let line = Line::from(vec![
        Span::styled(" softshelf ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            " theme: {}  nav: {}  y: {}px ",
            theme.as_str(),
            nav,
            runtime.window().scroll_y
        )),
        Span::styled(
            " Tab focus · Enter activate · Esc blur · q quit ",
            Style::default().fg(palette.muted),
        ),
        Span::raw(format!(" {}", last_log)),
    ]);
    let paragraph = Paragraph::new(line).style(Style::default().fg(palette.bg).bg(palette.accent));
    frame.render_widget(paragraph, area);
}

/// Draw live toast nodes stacked in the top-right corner
pub fn render_toasts(frame: &mut Frame, area: Rect, doc: &Document) {
    let Some(container) = doc.element_by_id("toast-container") else {
        return;
    };

    let mut y = area.y + 1;
    for &toast in doc.children(container) {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let message = doc
            .select_in(toast, ".toast-message")
            .map(|m| doc.text_content(m))
            .unwrap_or_default();
        let close = doc
            .select_in(toast, ".toast-close")
            .map(|c| doc.text_content(c))
            .unwrap_or_default();
        let severity = Severity::from_class_list(&doc.class_name(toast));
        let color = severity_color(severity);

        let content = format!(" {}  {} ", message, close);
        let width = u16::try_from(content.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.width.saturating_sub(TOAST_MARGIN * 2));
        if width < 5 {
            return;
        }
        let entered = doc.style(toast, "transform") == Some("translateX(0)");
        let closing = doc.style(toast, "opacity") == Some("0");
        // flush right until the entrance frame slides it in
        let inset = if entered || closing { TOAST_MARGIN } else { 0 };
        let x = (area.x + area.width).saturating_sub(width + inset);
        let toast_area = Rect {
            x,
            y,
            width,
            height: TOAST_HEIGHT,
        };

        let mut style = Style::default().fg(color);
        if closing {
            style = style.add_modifier(Modifier::DIM);
        }
        frame.render_widget(Clear, toast_area);
        let block = Block::default().borders(Borders::ALL).border_style(style);
        let paragraph = Paragraph::new(Line::from(Span::styled(content, style))).block(block);
        frame.render_widget(paragraph, toast_area);

        y += TOAST_HEIGHT;
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
