use crate::dom::NodeId;
use crate::page::{EventKind, Page, Source};

use super::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    Open,
    #[default]
    Closed,
}

impl NavState {
    fn flipped(self) -> Self {
        match self {
            NavState::Open => NavState::Closed,
            NavState::Closed => NavState::Open,
        }
    }
}

/// Hamburger toggle plus the slide-out panel it controls
#[derive(Debug)]
pub(super) struct MobileNav {
    toggle: NodeId,
    panel: NodeId,
    state: NavState,
}

impl MobileNav {
    pub(super) fn init(page: &mut Page<Action>) -> Option<Self> {
        let toggle = page.document.element_by_id("nav-toggle")?;
        let panel = page.document.element_by_id("mobile-nav")?;

        page.listen(Source::Node(toggle), EventKind::Click, Action::NavToggle);
        for link in page.document.select_all_in(panel, "a") {
            page.listen(Source::Node(link), EventKind::Click, Action::NavLinkClick);
        }
        page.listen(Source::Document, EventKind::Click, Action::NavOutsideClick);

        Some(Self {
            toggle,
            panel,
            state: NavState::Closed,
        })
    }

    pub(super) fn state(&self) -> NavState {
        self.state
    }

    pub(super) fn toggle(&mut self, page: &mut Page<Action>) {
        self.set_state(page, self.state.flipped());
    }

    pub(super) fn close(&mut self, page: &mut Page<Action>) {
        self.set_state(page, NavState::Closed);
    }

    /// Close when a click lands outside both the panel and its toggle
    pub(super) fn outside_click(&mut self, page: &mut Page<Action>, target: NodeId) {
        if self.state != NavState::Open {
            return;
        }
        let doc = &page.document;
        if doc.contains(self.panel, target) || doc.contains(self.toggle, target) {
            return;
        }
        self.close(page);
    }

    fn set_state(&mut self, page: &mut Page<Action>, state: NavState) {
        self.state = state;
        let open = state == NavState::Open;
        let doc = &mut page.document;

        doc.set_attribute(self.toggle, "aria-expanded", if open { "true" } else { "false" });
        for node in [self.toggle, self.panel] {
            if open {
                doc.add_class(node, "open");
            } else {
                doc.remove_class(node, "open");
            }
        }
        let body = doc.body();
        doc.set_style(body, "overflow", if open { "hidden" } else { "" });
    }
}
