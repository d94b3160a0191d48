use crate::config::Config;
use crate::dom::NodeId;
use crate::page::{EventKind, Page, Schedule, Source};

use super::Action;

const DEFERRED: &str = "img[data-src]";

/// Images holding their real source in `data-src` until they near the viewport
#[derive(Debug)]
pub(super) struct LazyImages {
    observed: Vec<NodeId>,
    margin_bottom: f64,
    check_queued: bool,
}

impl LazyImages {
    pub(super) fn init(page: &mut Page<Action>, config: &Config) -> Self {
        let images = page.document.select_all(DEFERRED);
        let mut lazy = Self {
            observed: Vec::new(),
            margin_bottom: config.lazy.root_margin_bottom,
            check_queued: false,
        };

        if !page.window.capabilities.intersection_observer {
            #[cfg(debug_assertions)]
            log::debug!("no intersection observer, loading {} images now", images.len());
            for image in images {
                load(page, image);
            }
            return lazy;
        }

        lazy.observed = images;
        page.listen(Source::Window, EventKind::Scroll, Action::ViewportChanged);
        page.listen(Source::Window, EventKind::Resize, Action::ViewportChanged);
        lazy.queue_check(page);
        lazy
    }

    pub(super) fn viewport_changed(&mut self, page: &mut Page<Action>) {
        self.queue_check(page);
    }

    fn queue_check(&mut self, page: &mut Page<Action>) {
        if self.observed.is_empty() || self.check_queued {
            return;
        }
        self.check_queued = true;
        page.timers.request_frame(Action::CheckLazyImages);
    }

    /// Load every observed image intersecting the extended viewport.
    /// Loaded images are no longer observed.
    pub(super) fn check(&mut self, page: &mut Page<Action>) {
        self.check_queued = false;
        let top = page.window.scroll_y;
        let bottom = top + page.window.viewport_height + self.margin_bottom;

        let (visible, pending): (Vec<NodeId>, Vec<NodeId>) =
            self.observed.iter().copied().partition(|image| {
                let doc = &page.document;
                let rect = doc.rect(*image);
                doc.is_connected(*image) && rect.bottom() >= top && rect.y <= bottom
            });
        self.observed = pending;

        for image in visible {
            load(page, image);
        }
    }

    pub(super) fn loaded(&self, page: &mut Page<Action>, image: NodeId) {
        page.document.add_class(image, "loaded");
    }

    pub(super) fn observed(&self) -> usize {
        self.observed.len()
    }
}

/// Swap `data-src` into `src`; the load completes on the next timer turn
fn load(page: &mut Page<Action>, image: NodeId) {
    let Some(source) = page.document.attribute(image, "data-src").map(str::to_string) else {
        return;
    };
    page.document.set_attribute(image, "src", &source);
    page.document.remove_attribute(image, "data-src");
    page.timers.set_timeout(0, Action::ImageLoaded(image));
}
