//! Click-to-notify bindings: detail buttons, category and ranking cards,
//! popular tags and the mobile bottom navigation

use crate::config::Config;
use crate::dom::NodeId;
use crate::notification::{ToastRequest, Toasts};
use crate::page::{EventKind, Key, Page, Schedule, Source};

use super::Action;

#[derive(Debug)]
pub(super) struct Bindings {
    toast_ms: u64,
    bottom_nav_toast_ms: u64,
    flash_ms: u64,
    bottom_nav: Vec<NodeId>,
}

impl Bindings {
    pub(super) fn init(page: &mut Page<Action>, config: &Config) -> Self {
        let doc = &page.document;
        let details = doc.select_all(".details-btn");
        let categories = doc.select_all(".category-card");
        let rankings = doc.select_all(".ranking-item");
        let tags = doc.select_all(".popular-tags span");
        let bottom_nav = doc.select_all(".mobile-bottom-nav-item");

        for node in details {
            page.listen(Source::Node(node), EventKind::Click, Action::DetailsClick(node));
        }
        for node in categories {
            page.listen(Source::Node(node), EventKind::Click, Action::CategoryClick(node));
        }
        for node in rankings {
            page.listen(Source::Node(node), EventKind::Click, Action::RankingClick(node));
        }
        for node in tags {
            page.listen(Source::Node(node), EventKind::Click, Action::TagClick(node));
            page.listen(Source::Node(node), EventKind::KeyDown, Action::TagKeyDown(node));
        }
        for node in &bottom_nav {
            page.listen(Source::Node(*node), EventKind::Click, Action::BottomNavClick(*node));
        }

        Self {
            toast_ms: config.timing.toast_duration_ms,
            bottom_nav_toast_ms: config.timing.bottom_nav_toast_ms,
            flash_ms: config.timing.click_flash_ms,
            bottom_nav,
        }
    }

    pub(super) fn details(&self, page: &mut Page<Action>, toasts: &mut Toasts, button: NodeId) {
        let name = page
            .document
            .closest(button, ".software-card")
            .and_then(|card| heading(page, card));
        if let Some(name) = name {
            self.toast(page, toasts, format!("Viewing details for {}", name));
        }
    }

    pub(super) fn category(&self, page: &mut Page<Action>, toasts: &mut Toasts, card: NodeId) {
        if let Some(name) = heading(page, card) {
            self.toast(page, toasts, format!("Browsing {} category", name));
        }
    }

    /// Briefly mark the item as clicked and announce it
    pub(super) fn ranking(&self, page: &mut Page<Action>, toasts: &mut Toasts, item: NodeId) {
        page.document.add_class(item, "clicked");
        page.timers
            .set_timeout(self.flash_ms, Action::RankingFlashEnd(item));
        if let Some(name) = heading(page, item) {
            self.toast(page, toasts, format!("Viewing details for {}", name));
        }
    }

    pub(super) fn ranking_flash_end(&self, page: &mut Page<Action>, item: NodeId) {
        page.document.remove_class(item, "clicked");
    }

    /// Announce the tag and copy it into the large search box
    pub(super) fn search_for_tag(&self, page: &mut Page<Action>, toasts: &mut Toasts, tag: NodeId) {
        let text = page.document.text_content(tag);
        self.toast(page, toasts, format!("Searching for {}", text));

        if let Some(input) = page.document.select(".search-large input") {
            page.document.set_value(input, &text);
            page.focus(input);
        }
    }

    pub(super) fn is_tag_activation(key: &Key) -> bool {
        matches!(key, Key::Enter | Key::Space)
    }

    pub(super) fn bottom_nav(&self, page: &mut Page<Action>, toasts: &mut Toasts, item: NodeId) {
        for other in &self.bottom_nav {
            page.document.remove_class(*other, "active");
        }
        page.document.add_class(item, "active");

        let Some(label) = page.document.select_in(item, "span") else {
            return;
        };
        let text = page.document.text_content(label).trim().to_string();
        toasts.notify(
            page,
            ToastRequest::new(format!("Switching to {}", text)).duration_ms(self.bottom_nav_toast_ms),
        );
    }

    fn toast(&self, page: &mut Page<Action>, toasts: &mut Toasts, message: String) {
        toasts.notify(page, ToastRequest::new(message).duration_ms(self.toast_ms));
    }
}

fn heading(page: &Page<Action>, node: NodeId) -> Option<String> {
    page.document
        .select_in(node, "h3")
        .map(|h| page.document.text_content(h))
}
