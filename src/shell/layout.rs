//! Flattens the document into terminal rows
//!
//! Every rendered element with its own content gets one row. Row geometry is
//! written back into the document so page-coordinate logic (lazy loading,
//! tilt, anchors) sees the same boxes the terminal shows.

use crate::dom::{Document, NodeId, Rect};

/// Pixels per terminal row and column
pub const ROW_PX: f64 = 20.0;
pub const COL_PX: f64 = 8.0;
const INDENT_COLS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Heading,
    Text,
    Link,
    Button,
    Input,
    Select,
    Image,
}

impl RowKind {
    /// Widgets whose children are summarized in their own row
    fn is_leaf(self) -> bool {
        matches!(
            self,
            RowKind::Link | RowKind::Button | RowKind::Input | RowKind::Select | RowKind::Image
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub node: NodeId,
    pub depth: usize,
    pub kind: RowKind,
    pub text: String,
}

impl Row {
    pub fn indent(&self) -> usize {
        self.depth * INDENT_COLS
    }
}

pub fn layout(doc: &mut Document) -> Vec<Row> {
    let mut rows = Vec::new();
    let body = doc.body();
    for &child in doc.children(body) {
        collect(doc, child, 0, &mut rows);
    }
    assign_rects(doc, &rows);
    rows
}

/// Index of the row at page offset `y`
pub fn row_index(y: f64) -> usize {
    (y.max(0.0) / ROW_PX).floor() as usize
}

fn is_rendered(doc: &Document, node: NodeId) -> bool {
    if doc.style(node, "display") == Some("none") || doc.tag(node) == "option" {
        return false;
    }
    // drawn as an overlay
    if doc.element_id(node) == Some("toast-container") {
        return false;
    }
    if doc.has_class(node, "mobile-nav") && !doc.has_class(node, "open") {
        return false;
    }
    if doc.has_class(node, "back-to-top") && !doc.has_class(node, "visible") {
        return false;
    }
    true
}

fn collect(doc: &Document, node: NodeId, depth: usize, rows: &mut Vec<Row>) {
    if !is_rendered(doc, node) {
        return;
    }
    if let Some((kind, text)) = describe(doc, node) {
        rows.push(Row {
            node,
            depth,
            kind,
            text,
        });
        if kind.is_leaf() {
            return;
        }
    }
    for &child in doc.children(node) {
        collect(doc, child, depth + 1, rows);
    }
}

const ICONS: &[(&str, &str)] = &[
    ("fa-moon", "☾"),
    ("fa-sun", "☀"),
    ("fa-bars", "≡"),
    ("fa-arrow-up", "↑"),
];

fn icon_glyph(doc: &Document, node: NodeId) -> Option<&'static str> {
    let icon = doc.select_in(node, "i")?;
    let glyph = ICONS
        .iter()
        .find(|(class, _)| doc.has_class(icon, class))
        .map_or("•", |(_, glyph)| *glyph);
    Some(glyph)
}

fn describe(doc: &Document, node: NodeId) -> Option<(RowKind, String)> {
    let text = doc.text_content(node).trim().to_string();
    match doc.tag(node) {
        "h1" | "h2" | "h3" => Some((RowKind::Heading, text)),
        "a" => Some((RowKind::Link, text)),
        "button" => {
            let label = if text.is_empty() {
                icon_glyph(doc, node)
                    .or_else(|| doc.attribute(node, "aria-label"))
                    .unwrap_or("")
                    .to_string()
            } else {
                text
            };
            Some((RowKind::Button, format!("[ {} ]", label)))
        }
        "input" => {
            let value = doc.value(node);
            let shown = if value.is_empty() {
                doc.attribute(node, "placeholder").unwrap_or("").to_string()
            } else {
                value
            };
            Some((RowKind::Input, format!("[{}]", shown)))
        }
        "select" => {
            let options = doc.options(node);
            let label = options
                .get(doc.selected_index(node))
                .map(|opt| doc.text_content(*opt))
                .unwrap_or_default();
            Some((RowKind::Select, format!("< {} >", label)))
        }
        "img" => {
            let alt = doc.attribute(node, "alt").unwrap_or("image");
            let state = if doc.has_attribute(node, "data-src") {
                " ░"
            } else if doc.has_class(node, "loaded") {
                ""
            } else {
                " …"
            };
            Some((RowKind::Image, format!("▣ {}{}", alt, state)))
        }
        _ => {
            let own = doc.text(node).trim();
            (!own.is_empty()).then(|| (RowKind::Text, own.to_string()))
        }
    }
}

fn assign_rects(doc: &mut Document, rows: &[Row]) {
    let all = doc.descendants(doc.root());
    for node in &all {
        doc.set_rect(*node, Rect::default());
    }

    let mut has_row = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let rect = Rect::new(
            row.indent() as f64 * COL_PX,
            index as f64 * ROW_PX,
            row.text.chars().count().max(1) as f64 * COL_PX,
            ROW_PX,
        );
        doc.set_rect(row.node, rect);
        // icons and labels inside a leaf share its box
        for inner in doc.descendants(row.node) {
            doc.set_rect(inner, rect);
        }
        has_row.push(row.node);
    }

    // containers cover their children, bottom-up
    for node in all.into_iter().rev() {
        if has_row.contains(&node) {
            continue;
        }
        let covered = doc
            .children(node)
            .iter()
            .map(|child| doc.rect(*child))
            .filter(|rect| rect.height > 0.0)
            .reduce(|acc, rect| acc.union(&rect));
        if let Some(rect) = covered {
            doc.set_rect(node, rect);
        }
    }
}
