//! Search boxes with debounced suggestions

use crate::config::Config;
use crate::dom::NodeId;
use crate::page::{EventKind, Page, Schedule, Source, TimerId};
use crate::ratelimit::Debounce;

use super::Action;

const SEARCH_INPUTS: &str = ".search-box input, .search-large input";
const FOCUSED_PLACEHOLDER: &str = "Type keywords to search...";
const LARGE_PLACEHOLDER: &str = "Try \"Design Software\" or \"Office Tools\"...";
const SMALL_PLACEHOLDER: &str = "Search software...";

/// Case-insensitive substring match over `candidates`, keeping their order.
/// Queries shorter than `min_chars` match nothing.
pub fn filter_suggestions<'a>(candidates: &'a [String], query: &str, min_chars: usize) -> Vec<&'a str> {
    if query.chars().count() < min_chars {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    candidates
        .iter()
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

#[derive(Debug)]
struct SearchField {
    input: NodeId,
    suggestion_box: NodeId,
    large: bool,
    debounce: Debounce<String>,
}

#[derive(Debug)]
pub(super) struct Search {
    fields: Vec<SearchField>,
    candidates: Vec<String>,
    min_chars: usize,
    blur_grace_ms: u64,
}

impl Search {
    pub(super) fn init(page: &mut Page<Action>, config: &Config) -> Self {
        let mut fields = Vec::new();

        for input in page.document.select_all(SEARCH_INPUTS) {
            let Some(container) = page.document.parent(input) else {
                continue;
            };
            let suggestion_box = page
                .document
                .append_element(container, "div", "suggestions-box");
            page.document.set_style(suggestion_box, "display", "none");

            let index = fields.len();
            page.listen(Source::Node(input), EventKind::Focus, Action::SearchFocus(index));
            page.listen(Source::Node(input), EventKind::Blur, Action::SearchBlur(index));
            page.listen(Source::Node(input), EventKind::Input, Action::SearchInput(index));

            fields.push(SearchField {
                input,
                suggestion_box,
                large: page.document.has_class(container, "search-large"),
                debounce: Debounce::new(config.timing.search_debounce_ms),
            });
        }

        Self {
            fields,
            candidates: config.search.suggestions.clone(),
            min_chars: config.search.min_query_chars,
            blur_grace_ms: config.timing.blur_grace_ms,
        }
    }

    pub(super) fn focus(&self, page: &mut Page<Action>, index: usize) {
        if let Some(field) = self.fields.get(index) {
            page.document
                .set_attribute(field.input, "placeholder", FOCUSED_PLACEHOLDER);
        }
    }

    pub(super) fn blur(&self, page: &mut Page<Action>, index: usize) {
        let Some(field) = self.fields.get(index) else {
            return;
        };
        page.timers
            .set_timeout(self.blur_grace_ms, Action::HideSuggestions(index));
        let placeholder = if field.large {
            LARGE_PLACEHOLDER
        } else {
            SMALL_PLACEHOLDER
        };
        page.document
            .set_attribute(field.input, "placeholder", placeholder);
    }

    pub(super) fn input(&mut self, page: &mut Page<Action>, index: usize) {
        let Some(field) = self.fields.get_mut(index) else {
            return;
        };
        let query = page.document.value(field.input);
        field
            .debounce
            .call(query, &mut page.timers, Action::SearchDebounced(index));
    }

    pub(super) fn debounced(&mut self, page: &mut Page<Action>, index: usize, timer: TimerId) {
        let query = match self.fields.get_mut(index) {
            Some(field) => field.debounce.fire(timer),
            None => None,
        };
        if let Some(query) = query {
            self.show_suggestions(page, index, &query);
        }
    }

    fn show_suggestions(&self, page: &mut Page<Action>, index: usize, query: &str) {
        let Some(field) = self.fields.get(index) else {
            return;
        };
        let matches = filter_suggestions(&self.candidates, query, self.min_chars);
        if matches.is_empty() {
            self.hide(page, index);
            return;
        }

        page.clear_children(field.suggestion_box);
        for text in matches {
            let item = page
                .document
                .append_element(field.suggestion_box, "div", "suggestion-item");
            page.document.set_text(item, text);
            page.listen(
                Source::Node(item),
                EventKind::Click,
                Action::PickSuggestion {
                    field: index,
                    text: text.to_string(),
                },
            );
        }
        page.document
            .set_style(field.suggestion_box, "display", "block");
    }

    pub(super) fn pick(&self, page: &mut Page<Action>, index: usize, text: &str) {
        if let Some(field) = self.fields.get(index) {
            page.document.set_value(field.input, text);
            self.hide(page, index);
        }
    }

    pub(super) fn hide(&self, page: &mut Page<Action>, index: usize) {
        if let Some(field) = self.fields.get(index) {
            page.document
                .set_style(field.suggestion_box, "display", "none");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn candidates() -> Vec<String> {
        crate::config::SearchConfig::default().suggestions
    }

    #[test]
    fn test_adobe_matches_photoshop() {
        let all = candidates();
        assert_eq!(filter_suggestions(&all, "adobe", 2), vec!["Adobe Photoshop"]);
    }

    #[test]
    fn test_match_is_case_insensitive_and_ordered() {
        let all = candidates();
        assert_eq!(
            filter_suggestions(&all, "SOFT", 2),
            vec!["Design Software", "Office Software", "Microsoft Office"]
        );
    }

    #[test]
    fn test_short_query_matches_nothing() {
        let all = candidates();
        assert!(filter_suggestions(&all, "o", 2).is_empty());
        assert!(filter_suggestions(&all, "", 2).is_empty());
    }

    #[test]
    fn test_no_match() {
        let all = candidates();
        assert!(filter_suggestions(&all, "zzz", 2).is_empty());
    }

    proptest! {
        #[test]
        fn prop_every_match_contains_query(query in "[a-zA-Z ]{0,6}") {
            let all = candidates();
            let lowered = query.to_lowercase();
            for hit in filter_suggestions(&all, &query, 2) {
                prop_assert!(hit.to_lowercase().contains(&lowered));
            }
        }
    }
}
