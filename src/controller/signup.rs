use std::sync::LazyLock;

use regex::Regex;

use crate::dom::NodeId;
use crate::page::{EventKind, Page, Source};

use super::Action;

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const SUCCESS_MESSAGE: &str = "Signed up! Thanks for subscribing";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Something@domain.tld with no whitespace or extra `@`. Surrounding
/// whitespace is ignored.
pub fn is_valid_email(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && EMAIL_PATTERN.is_match(trimmed)
}

pub(super) fn init(page: &mut Page<Action>) -> Option<NodeId> {
    let form = page.document.select(".signup-form")?;
    page.listen(Source::Node(form), EventKind::Submit, Action::SignupSubmit(form));
    Some(form)
}

/// Validate the form's email field. Invalid input shows a single error
/// message; valid input replaces the form contents with a thank-you note.
pub(super) fn submit(page: &mut Page<Action>, form: NodeId) {
    let email = page
        .document
        .select_in(form, r#"input[type="email"]"#)
        .map(|input| page.document.value(input))
        .unwrap_or_default();
    let existing_error = page.document.select_in(form, ".error-message");

    if !is_valid_email(&email) {
        if existing_error.is_none() {
            let error = page.document.append_element(form, "div", "error-message");
            page.document.set_text(error, INVALID_EMAIL_MESSAGE);
        }
        return;
    }

    if let Some(error) = existing_error {
        page.remove_node(error);
    }
    page.clear_children(form);
    let success = page.document.append_element(form, "div", "success-message");
    page.document.set_text(success, SUCCESS_MESSAGE);
}
