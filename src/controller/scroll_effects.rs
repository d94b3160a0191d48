use crate::config::Config;
use crate::dom::NodeId;
use crate::page::{EventKind, Page, ScrollBehavior, Source, TimerId};
use crate::ratelimit::Throttle;

use super::Action;

const SHADOW_RAISED: &str = "var(--shadow-md)";
const SHADOW_RESTING: &str = "var(--shadow-sm)";
const BACKGROUND_RAISED: &str = "rgba(255, 255, 255, 0.98)";
const BACKGROUND_RESTING: &str = "rgba(255, 255, 255, 0.95)";

/// Header styling and the floating back-to-top button
#[derive(Debug)]
pub(super) struct ScrollEffects {
    throttle: Throttle,
    header: Option<NodeId>,
    back_to_top: NodeId,
    back_to_top_offset: f64,
    header_offset: f64,
}

impl ScrollEffects {
    pub(super) fn init(page: &mut Page<Action>, config: &Config) -> Self {
        let header = page.document.select(".header");

        let body = page.document.body();
        let button = page.document.append_element(body, "button", "back-to-top");
        page.document
            .set_attribute(button, "aria-label", "Back to top");
        page.document.append_element(button, "i", "fas fa-arrow-up");

        page.listen(Source::Window, EventKind::Scroll, Action::WindowScrolled);
        page.listen(Source::Node(button), EventKind::Click, Action::BackToTop);

        Self {
            throttle: Throttle::new(config.timing.scroll_throttle_ms),
            header,
            back_to_top: button,
            back_to_top_offset: config.scroll.back_to_top_offset,
            header_offset: config.scroll.header_offset,
        }
    }

    pub(super) fn on_scroll(&mut self, page: &mut Page<Action>) {
        let offset = page.window.scroll_y;
        if let Some(offset) = self
            .throttle
            .call(offset, &mut page.timers, Action::ScrollCooldownEnd)
        {
            self.apply(page, offset);
        }
    }

    pub(super) fn cooldown_end(&mut self, timer: TimerId) {
        self.throttle.release(timer);
    }

    fn apply(&self, page: &mut Page<Action>, offset: f64) {
        let doc = &mut page.document;
        if offset > self.back_to_top_offset {
            doc.add_class(self.back_to_top, "visible");
        } else {
            doc.remove_class(self.back_to_top, "visible");
        }

        let Some(header) = self.header else {
            return;
        };
        let (shadow, background) = if offset > self.header_offset {
            (SHADOW_RAISED, BACKGROUND_RAISED)
        } else {
            (SHADOW_RESTING, BACKGROUND_RESTING)
        };
        doc.set_style(header, "box-shadow", shadow);
        doc.set_style(header, "background-color", background);
    }

    pub(super) fn back_to_top(&self, page: &mut Page<Action>) {
        page.scroll_to(0.0, ScrollBehavior::Smooth);
    }

    pub(super) fn button(&self) -> NodeId {
        self.back_to_top
    }
}
