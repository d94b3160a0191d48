//! Catalog page controller
//!
//! Wires every interactive feature of the page. Each feature subscribes an
//! [`Action`] to the events it cares about; the host routes events, timers
//! and animation frames back into [`Controller::handle`] along with the
//! [`Trigger`] that produced them.
//!
//! Features are independent: a feature whose elements are missing stays
//! inert without affecting the others.

mod anchors;
mod bindings;
mod entrance;
mod filters;
mod lazy_images;
mod mobile_nav;
mod parallax;
mod perf;
mod scroll_effects;
mod search;
mod signup;
mod theme;

pub use filters::FilterSelection;
pub use mobile_nav::NavState;
pub use parallax::{pointer_offset, tilt_transform};
pub use search::filter_suggestions;
pub use signup::{INVALID_EMAIL_MESSAGE, SUCCESS_MESSAGE, is_valid_email};
pub use theme::{THEME_KEY, Theme, resolve_initial};

use crate::config::Config;
use crate::dom::NodeId;
use crate::notification::{ToastHandle, ToastRequest, ToastTask, Toasts};
use crate::page::{Dispatch, Event, Page, PerformanceEntry, TimerId};

use bindings::Bindings;
use filters::Filters;
use lazy_images::LazyImages;
use mobile_nav::MobileNav;
use parallax::Parallax;
use scroll_effects::ScrollEffects;
use search::Search;
use theme::ThemeState;

/// Message carried by subscriptions, timers and frames
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ApplyEntrance,

    WindowScrolled,
    ScrollCooldownEnd,
    BackToTop,

    ToggleTheme,

    ApplyFilters,
    ResetFilters,
    FadePulse(Vec<NodeId>),
    FadePulseEnd(Vec<NodeId>),

    SearchFocus(usize),
    SearchBlur(usize),
    SearchInput(usize),
    SearchDebounced(usize),
    HideSuggestions(usize),
    PickSuggestion { field: usize, text: String },

    AnchorClick(NodeId),

    ViewportChanged,
    CheckLazyImages,
    ImageLoaded(NodeId),

    TiltMove(usize),
    TiltCooldownEnd(usize),
    TiltLeave(usize),
    ApplyTilt { card: NodeId, dx: f64, dy: f64 },
    ResetTilt(NodeId),

    SignupSubmit(NodeId),

    NavToggle,
    NavLinkClick,
    NavOutsideClick,

    DetailsClick(NodeId),
    CategoryClick(NodeId),
    RankingClick(NodeId),
    RankingFlashEnd(NodeId),
    TagClick(NodeId),
    TagKeyDown(NodeId),
    BottomNavClick(NodeId),

    Toast(ToastTask),
}

impl From<ToastTask> for Action {
    fn from(task: ToastTask) -> Self {
        Action::Toast(task)
    }
}

/// What caused an action to run
#[derive(Debug)]
pub enum Trigger<'a> {
    Event(&'a mut Dispatch),
    Timer(TimerId),
    Frame,
}

impl Trigger<'_> {
    pub fn event(&self) -> Option<&Event> {
        match self {
            Trigger::Event(dispatch) => Some(&dispatch.event),
            _ => None,
        }
    }

    pub fn timer(&self) -> Option<TimerId> {
        match self {
            Trigger::Timer(id) => Some(*id),
            _ => None,
        }
    }

    pub fn prevent_default(&mut self) {
        if let Trigger::Event(dispatch) = self {
            dispatch.prevent_default();
        }
    }
}

#[derive(Debug)]
struct Features {
    entrance: Vec<NodeId>,
    scroll: ScrollEffects,
    theme: ThemeState,
    filters: Option<Filters>,
    search: Search,
    lazy: LazyImages,
    parallax: Parallax,
    signup: Option<NodeId>,
    nav: Option<MobileNav>,
    bindings: Bindings,
    observes_performance: bool,
}

#[derive(Debug)]
pub struct Controller {
    config: Config,
    toasts: Toasts,
    features: Option<Features>,
}

impl Controller {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            toasts: Toasts::new(None, config.timing.toast_exit_ms),
            features: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.features.is_some()
    }

    /// Wire every feature into `page`. Later calls do nothing.
    pub fn init(&mut self, page: &mut Page<Action>) {
        if self.features.is_some() {
            #[cfg(debug_assertions)]
            log::debug!("controller already initialized");
            return;
        }

        let config = &self.config;
        self.toasts = Toasts::attach(page, config.timing.toast_exit_ms);

        let entrance = entrance::init(page);
        let scroll = ScrollEffects::init(page, config);
        let theme = ThemeState::init(page);
        let filters = Filters::init(page, config);
        let search = Search::init(page, config);
        anchors::init(page);
        let lazy = LazyImages::init(page, config);
        let parallax = Parallax::init(page, config);
        let signup = signup::init(page);
        let nav = MobileNav::init(page);
        let bindings = Bindings::init(page, config);
        let observes_performance = perf::init(page);

        let features = Features {
            entrance,
            scroll,
            theme,
            filters,
            search,
            lazy,
            parallax,
            signup,
            nav,
            bindings,
            observes_performance,
        };

        #[cfg(debug_assertions)]
        log::debug!(
            "controller ready: {} animated cards, {} lazy images, filters {}, nav {}, toasts {}",
            features.entrance.len(),
            features.lazy.observed(),
            features.filters.is_some(),
            features.nav.is_some(),
            self.toasts.container().is_some()
        );

        self.features = Some(features);
    }

    pub fn handle(&mut self, page: &mut Page<Action>, action: Action, trigger: &mut Trigger<'_>) {
        let Some(f) = self.features.as_mut() else {
            return;
        };
        let toasts = &mut self.toasts;

        match action {
            Action::ApplyEntrance => entrance::apply(page, &f.entrance),

            Action::WindowScrolled => f.scroll.on_scroll(page),
            Action::ScrollCooldownEnd => {
                if let Some(timer) = trigger.timer() {
                    f.scroll.cooldown_end(timer);
                }
            }
            Action::BackToTop => f.scroll.back_to_top(page),

            Action::ToggleTheme => {
                f.theme.toggle(page);
            }

            Action::ApplyFilters => {
                if let Some(filters) = f.filters.as_mut() {
                    filters.apply(page);
                }
            }
            Action::ResetFilters => {
                if let Some(filters) = f.filters.as_mut() {
                    filters.reset(page);
                }
            }
            Action::FadePulse(cards) => {
                if let Some(filters) = f.filters.as_ref() {
                    filters.fade_pulse(page, &cards);
                }
            }
            Action::FadePulseEnd(cards) => {
                if let Some(filters) = f.filters.as_ref() {
                    filters.fade_pulse_end(page, &cards);
                }
            }

            Action::SearchFocus(index) => f.search.focus(page, index),
            Action::SearchBlur(index) => f.search.blur(page, index),
            Action::SearchInput(index) => f.search.input(page, index),
            Action::SearchDebounced(index) => {
                if let Some(timer) = trigger.timer() {
                    f.search.debounced(page, index, timer);
                }
            }
            Action::HideSuggestions(index) => f.search.hide(page, index),
            Action::PickSuggestion { field, text } => f.search.pick(page, field, &text),

            Action::AnchorClick(anchor) => {
                trigger.prevent_default();
                anchors::follow(page, anchor);
            }

            Action::ViewportChanged => f.lazy.viewport_changed(page),
            Action::CheckLazyImages => f.lazy.check(page),
            Action::ImageLoaded(image) => f.lazy.loaded(page, image),

            Action::TiltMove(index) => {
                if let Some(Event::PointerMove {
                    client_x, client_y, ..
                }) = trigger.event()
                {
                    let (x, y) = (*client_x, *client_y);
                    f.parallax.pointer_move(page, index, x, y);
                }
            }
            Action::TiltCooldownEnd(index) => {
                if let Some(timer) = trigger.timer() {
                    f.parallax.cooldown_end(index, timer);
                }
            }
            Action::TiltLeave(index) => f.parallax.pointer_leave(page, index),
            Action::ApplyTilt { card, dx, dy } => parallax::apply_tilt(page, card, dx, dy),
            Action::ResetTilt(card) => parallax::reset_tilt(page, card),

            Action::SignupSubmit(form) => {
                trigger.prevent_default();
                signup::submit(page, form);
            }

            Action::NavToggle => {
                if let Some(nav) = f.nav.as_mut() {
                    nav.toggle(page);
                }
            }
            Action::NavLinkClick => {
                if let Some(nav) = f.nav.as_mut() {
                    nav.close(page);
                }
            }
            Action::NavOutsideClick => {
                let target = trigger.event().and_then(Event::target);
                if let (Some(nav), Some(target)) = (f.nav.as_mut(), target) {
                    nav.outside_click(page, target);
                }
            }

            Action::DetailsClick(button) => f.bindings.details(page, toasts, button),
            Action::CategoryClick(card) => f.bindings.category(page, toasts, card),
            Action::RankingClick(item) => f.bindings.ranking(page, toasts, item),
            Action::RankingFlashEnd(item) => f.bindings.ranking_flash_end(page, item),
            Action::TagClick(tag) => f.bindings.search_for_tag(page, toasts, tag),
            Action::TagKeyDown(tag) => {
                let activates = matches!(
                    trigger.event(),
                    Some(Event::KeyDown { key, .. }) if Bindings::is_tag_activation(key)
                );
                if activates {
                    trigger.prevent_default();
                    f.bindings.search_for_tag(page, toasts, tag);
                }
            }
            Action::BottomNavClick(item) => {
                trigger.prevent_default();
                f.bindings.bottom_nav(page, toasts, item);
            }

            Action::Toast(task) => toasts.handle(page, task),
        }
    }

    pub fn notify(&mut self, page: &mut Page<Action>, request: ToastRequest) -> Option<ToastHandle> {
        self.toasts.notify(page, request)
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    /// A new performance entry arrived after initialization
    pub fn observe_performance(&mut self, page: &mut Page<Action>, entry: &PerformanceEntry) {
        if self.features.as_ref().is_some_and(|f| f.observes_performance) {
            perf::log_entry(page, entry);
        }
    }

    pub fn theme(&self) -> Option<Theme> {
        self.features.as_ref().map(|f| f.theme.current())
    }

    pub fn set_theme(&mut self, page: &mut Page<Action>, theme: Theme) {
        if let Some(f) = self.features.as_mut() {
            f.theme.set(page, theme);
        }
    }

    /// `None` when the page has no mobile navigation
    pub fn nav_state(&self) -> Option<NavState> {
        self.features
            .as_ref()
            .and_then(|f| f.nav.as_ref())
            .map(MobileNav::state)
    }

    pub fn last_filter_selection(&self) -> Option<&FilterSelection> {
        self.features
            .as_ref()
            .and_then(|f| f.filters.as_ref())
            .and_then(Filters::last_selection)
    }

    pub fn back_to_top_button(&self) -> Option<NodeId> {
        self.features.as_ref().map(|f| f.scroll.button())
    }

    /// Images still waiting to come into view
    pub fn pending_lazy_images(&self) -> usize {
        self.features.as_ref().map_or(0, |f| f.lazy.observed())
    }

    pub fn signup_form(&self) -> Option<NodeId> {
        self.features.as_ref().and_then(|f| f.signup)
    }
}
