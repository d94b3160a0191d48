use std::fmt;

use crate::config::Config;
use crate::dom::NodeId;
use crate::page::{EventKind, Page, Schedule, Source};

use super::Action;

const CARDS: &str = ".software-card";

/// Values read from the three filter selects; a missing select reads empty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub category: String,
    pub rating: String,
    pub downloads: String,
}

impl FilterSelection {
    fn read<T>(page: &Page<T>) -> Self {
        let read = |element_id: &str| {
            page.document
                .element_by_id(element_id)
                .map(|select| page.document.value(select))
                .unwrap_or_default()
        };
        Self {
            category: read("category-filter"),
            rating: read("rating-filter"),
            downloads: read("downloads-filter"),
        }
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "category={}, rating={}, downloads={}",
            self.category, self.rating, self.downloads
        )
    }
}

/// Filter and reset buttons. Both must exist for the feature to start.
#[derive(Debug)]
pub(super) struct Filters {
    pulse_ms: u64,
    last_selection: Option<FilterSelection>,
}

impl Filters {
    pub(super) fn init(page: &mut Page<Action>, config: &Config) -> Option<Self> {
        let apply = page.document.select(".filter-btn")?;
        let reset = page.document.select(".reset-btn")?;

        page.listen(Source::Node(apply), EventKind::Click, Action::ApplyFilters);
        page.listen(Source::Node(reset), EventKind::Click, Action::ResetFilters);

        Some(Self {
            pulse_ms: config.timing.fade_pulse_ms,
            last_selection: None,
        })
    }

    pub(super) fn apply(&mut self, page: &mut Page<Action>) {
        let selection = FilterSelection::read(page);
        page.window
            .console
            .log(format!("Filter selection: {}", selection));
        self.last_selection = Some(selection);
        queue_pulse(page);
    }

    pub(super) fn reset(&mut self, page: &mut Page<Action>) {
        for select in page.document.select_all(".filter-select") {
            page.document.set_selected_index(select, 0);
        }
        queue_pulse(page);
    }

    pub(super) fn fade_pulse(&self, page: &mut Page<Action>, cards: &[NodeId]) {
        for card in cards {
            page.document.add_class(*card, "fade-in");
        }
        page.timers
            .set_timeout(self.pulse_ms, Action::FadePulseEnd(cards.to_vec()));
    }

    pub(super) fn fade_pulse_end(&self, page: &mut Page<Action>, cards: &[NodeId]) {
        for card in cards {
            page.document.remove_class(*card, "fade-in");
        }
    }

    pub(super) fn last_selection(&self) -> Option<&FilterSelection> {
        self.last_selection.as_ref()
    }
}

fn queue_pulse(page: &mut Page<Action>) {
    let cards = page.document.select_all(CARDS);
    if !cards.is_empty() {
        page.timers.request_frame(Action::FadePulse(cards));
    }
}
