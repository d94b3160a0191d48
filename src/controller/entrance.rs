use crate::dom::NodeId;
use crate::page::Page;

use super::Action;

const ANIMATED: &str = ".software-card, .category-card, .testimonial-card, .ranking-item";
const STAGGER_STEPS: usize = 4;

/// Collect the animated cards and defer tagging them to one frame
pub(super) fn init(page: &mut Page<Action>) -> Vec<NodeId> {
    let cards = page.document.select_all(ANIMATED);
    if !cards.is_empty() {
        page.timers.request_frame(Action::ApplyEntrance);
    }
    cards
}

pub(super) fn apply(page: &mut Page<Action>, cards: &[NodeId]) {
    for (index, card) in cards.iter().enumerate() {
        page.document.add_class(*card, "fade-in");
        page.document
            .add_class(*card, &format!("delay-{}", index % STAGGER_STEPS + 1));
    }
}
