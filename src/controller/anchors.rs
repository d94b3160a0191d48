use crate::dom::{NodeId, Selector};
use crate::page::{EventKind, Page, Source};

use super::Action;

pub(super) fn init(page: &mut Page<Action>) {
    for anchor in page.document.select_all(r##"a[href^="#"]"##) {
        page.listen(Source::Node(anchor), EventKind::Click, Action::AnchorClick(anchor));
    }
}

/// Smooth-scroll to the element the fragment names. A bare `#` or an
/// unparseable fragment does nothing.
pub(super) fn follow(page: &mut Page<Action>, anchor: NodeId) {
    let Some(href) = page.document.attribute(anchor, "href") else {
        return;
    };
    let target = Selector::parse(href)
        .ok()
        .and_then(|selector| page.document.query(page.document.root(), &selector));
    if let Some(target) = target {
        page.scroll_into_view(target);
    }
}
