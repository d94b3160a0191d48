use crate::dom::NodeId;
use crate::page::{EventKind, Page, Source};

use super::Action;

pub const THEME_KEY: &str = "theme";
const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Toggle icon: a sun offers the way back to light
    pub fn icon_class(self) -> &'static str {
        match self {
            Theme::Light => "fas fa-moon",
            Theme::Dark => "fas fa-sun",
        }
    }
}

/// Stored preference wins, then a dark system scheme, then light.
/// Unrecognized stored values count as absent.
pub fn resolve_initial(stored: Option<&str>, system_dark: Option<bool>) -> Theme {
    if let Some(theme) = stored.and_then(Theme::parse) {
        return theme;
    }
    if system_dark == Some(true) {
        return Theme::Dark;
    }
    Theme::Light
}

#[derive(Debug)]
pub(super) struct ThemeState {
    current: Theme,
    toggle: Option<NodeId>,
}

impl ThemeState {
    pub(super) fn init(page: &mut Page<Action>) -> Self {
        let toggle = page.document.select(".theme-toggle");
        if let Some(toggle) = toggle {
            page.listen(Source::Node(toggle), EventKind::Click, Action::ToggleTheme);
        }

        let stored = page.window.storage().get(THEME_KEY);
        let current = resolve_initial(stored.as_deref(), page.window.prefers_dark_scheme());

        #[cfg(debug_assertions)]
        log::debug!(
            "initial theme {} (stored: {:?}, system dark: {:?})",
            current.as_str(),
            stored,
            page.window.prefers_dark_scheme()
        );

        let state = Self { current, toggle };
        state.apply(page);
        state
    }

    pub(super) fn current(&self) -> Theme {
        self.current
    }

    /// Switch theme, update the page and persist the choice
    pub(super) fn set(&mut self, page: &mut Page<Action>, theme: Theme) {
        self.current = theme;
        self.apply(page);
        if let Err(e) = page.window.storage_mut().set(THEME_KEY, theme.as_str()) {
            log::warn!("Failed to persist theme preference: {}", e);
        }
    }

    pub(super) fn toggle(&mut self, page: &mut Page<Action>) -> Theme {
        let next = self.current.flipped();
        self.set(page, next);
        next
    }

    fn apply(&self, page: &mut Page<Action>) {
        let body = page.document.body();
        page.document
            .set_attribute(body, THEME_ATTRIBUTE, self.current.as_str());

        if let Some(icon) = self
            .toggle
            .and_then(|toggle| page.document.select_in(toggle, "i"))
        {
            page.document
                .set_class_name(icon, self.current.icon_class());
        }
    }
}
