use crate::config::Config;
use crate::dom::{NodeId, Rect};
use crate::page::{EventKind, Page, Source, TimerId};
use crate::ratelimit::Throttle;

use super::Action;

const MAX_TILT_DEG: f64 = 5.0;

/// Pointer position relative to the card centre, in [-1, 1] inside the card
pub fn pointer_offset(rect: &Rect, client_x: f64, client_y: f64) -> (f64, f64) {
    let half_w = rect.width / 2.0;
    let half_h = rect.height / 2.0;
    let axis = |pos: f64, start: f64, half: f64| {
        if half > 0.0 { (pos - start - half) / half } else { 0.0 }
    };
    (
        axis(client_x, rect.x, half_w),
        axis(client_y, rect.y, half_h),
    )
}

pub fn tilt_transform(dx: f64, dy: f64) -> String {
    format!(
        "perspective(1000px) rotateY({:.2}deg) rotateX({:.2}deg) translateY(-15px)",
        unsigned_zero(dx * MAX_TILT_DEG),
        unsigned_zero(-dy * MAX_TILT_DEG)
    )
}

// -0.0 would print as "-0.00"
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

#[derive(Debug)]
struct TiltCard {
    node: NodeId,
    throttle: Throttle,
}

/// Pointer-driven 3D tilt on category cards
#[derive(Debug)]
pub(super) struct Parallax {
    cards: Vec<TiltCard>,
}

impl Parallax {
    pub(super) fn init(page: &mut Page<Action>, config: &Config) -> Self {
        let cards = page
            .document
            .select_all(".category-card")
            .into_iter()
            .enumerate()
            .map(|(index, node)| {
                page.listen(Source::Node(node), EventKind::PointerMove, Action::TiltMove(index));
                page.listen(Source::Node(node), EventKind::PointerLeave, Action::TiltLeave(index));
                TiltCard {
                    node,
                    throttle: Throttle::new(config.timing.parallax_throttle_ms),
                }
            })
            .collect();
        Self { cards }
    }

    pub(super) fn pointer_move(
        &mut self,
        page: &mut Page<Action>,
        index: usize,
        client_x: f64,
        client_y: f64,
    ) {
        let Some(card) = self.cards.get_mut(index) else {
            return;
        };
        let Some((x, y)) =
            card.throttle
                .call((client_x, client_y), &mut page.timers, Action::TiltCooldownEnd(index))
        else {
            return;
        };

        let page_rect = page.document.rect(card.node);
        let client_rect = Rect::new(
            page_rect.x,
            page_rect.y - page.window.scroll_y,
            page_rect.width,
            page_rect.height,
        );
        let (dx, dy) = pointer_offset(&client_rect, x, y);
        page.timers.request_frame(Action::ApplyTilt {
            card: card.node,
            dx,
            dy,
        });
    }

    pub(super) fn cooldown_end(&mut self, index: usize, timer: TimerId) {
        if let Some(card) = self.cards.get_mut(index) {
            card.throttle.release(timer);
        }
    }

    pub(super) fn pointer_leave(&self, page: &mut Page<Action>, index: usize) {
        if let Some(card) = self.cards.get(index) {
            page.timers.request_frame(Action::ResetTilt(card.node));
        }
    }
}

pub(super) fn apply_tilt(page: &mut Page<Action>, card: NodeId, dx: f64, dy: f64) {
    page.document
        .set_style(card, "transform", &tilt_transform(dx, dy));
}

pub(super) fn reset_tilt(page: &mut Page<Action>, card: NodeId) {
    page.document.set_style(card, "transform", "");
}
