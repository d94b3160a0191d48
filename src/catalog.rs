//! The sample software catalog page served by the terminal host

use crate::dom::{Document, NodeId};

struct Software {
    name: &'static str,
    blurb: &'static str,
    image: &'static str,
}

const FEATURED: &[Software] = &[
    Software {
        name: "Adobe Photoshop",
        blurb: "Raster editing and compositing",
        image: "images/photoshop.webp",
    },
    Software {
        name: "Microsoft Office",
        blurb: "Documents, spreadsheets and slides",
        image: "images/office.webp",
    },
    Software {
        name: "Visual Studio Code",
        blurb: "Lightweight code editor",
        image: "images/vscode.webp",
    },
    Software {
        name: "Final Cut Pro",
        blurb: "Professional video editing",
        image: "images/finalcut.webp",
    },
    Software {
        name: "Ableton Live",
        blurb: "Music production and live performance",
        image: "images/ableton.webp",
    },
];

const CATEGORIES: &[&str] = &["Design", "Office", "Development", "Video", "Audio"];
const RANKINGS: &[&str] = &["Visual Studio Code", "Adobe Photoshop", "Microsoft Office"];
const TAGS: &[&str] = &["Photoshop", "Office", "VS Code", "Video Editing"];
const BOTTOM_NAV: &[(&str, &str)] = &[
    ("fas fa-home", "Home"),
    ("fas fa-th-large", "Categories"),
    ("fas fa-trophy", "Rankings"),
    ("fas fa-user", "Account"),
];

fn text_element(doc: &mut Document, parent: NodeId, tag: &str, class_name: &str, text: &str) -> NodeId {
    let id = doc.append_element(parent, tag, class_name);
    doc.set_text(id, text);
    id
}

fn link(doc: &mut Document, parent: NodeId, href: &str, text: &str) -> NodeId {
    let id = text_element(doc, parent, "a", "", text);
    doc.set_attribute(id, "href", href);
    id
}

fn select(doc: &mut Document, parent: NodeId, element_id: &str, options: &[(&str, &str)]) -> NodeId {
    let id = doc.append_element(parent, "select", "filter-select");
    doc.set_attribute(id, "id", element_id);
    for (value, label) in options {
        let option = text_element(doc, id, "option", "", label);
        doc.set_attribute(option, "value", value);
    }
    id
}

/// Build the catalog page
pub fn sample_page() -> Document {
    let mut doc = Document::new();
    let body = doc.body();

    let header = doc.append_element(body, "header", "header");
    text_element(&mut doc, header, "div", "logo", "Softshelf");
    let nav = doc.append_element(header, "nav", "main-nav");
    link(&mut doc, nav, "#featured", "Featured");
    link(&mut doc, nav, "#categories", "Categories");
    link(&mut doc, nav, "#rankings", "Rankings");
    link(&mut doc, nav, "#", "About");
    let search = doc.append_element(header, "div", "search-box");
    let input = doc.append_element(search, "input", "");
    doc.set_attribute(input, "type", "text");
    doc.set_attribute(input, "placeholder", "Search software...");
    let toggle = doc.append_element(header, "button", "theme-toggle");
    doc.append_element(toggle, "i", "fas fa-moon");
    let hamburger = doc.append_element(header, "button", "nav-toggle");
    doc.set_attribute(hamburger, "id", "nav-toggle");
    doc.set_attribute(hamburger, "aria-expanded", "false");
    doc.append_element(hamburger, "i", "fas fa-bars");

    let mobile = doc.append_element(body, "div", "mobile-nav");
    doc.set_attribute(mobile, "id", "mobile-nav");
    link(&mut doc, mobile, "#featured", "Featured");
    link(&mut doc, mobile, "#categories", "Categories");
    link(&mut doc, mobile, "#signup", "Newsletter");

    let hero = doc.append_element(body, "section", "hero");
    text_element(&mut doc, hero, "h1", "", "Find the right software");
    let large = doc.append_element(hero, "div", "search-large");
    let input = doc.append_element(large, "input", "");
    doc.set_attribute(input, "type", "text");
    doc.set_attribute(input, "placeholder", "Try \"Design Software\" or \"Office Tools\"...");
    let tags = doc.append_element(hero, "div", "popular-tags");
    for tag in TAGS {
        let span = text_element(&mut doc, tags, "span", "", tag);
        doc.set_attribute(span, "tabindex", "0");
    }

    let filters = doc.append_element(body, "section", "filters");
    select(
        &mut doc,
        filters,
        "category-filter",
        &[("all", "All categories"), ("design", "Design"), ("office", "Office"), ("dev", "Development")],
    );
    select(
        &mut doc,
        filters,
        "rating-filter",
        &[("all", "Any rating"), ("4", "4 stars and up"), ("3", "3 stars and up")],
    );
    select(
        &mut doc,
        filters,
        "downloads-filter",
        &[("all", "Any downloads"), ("10k", "10k+"), ("100k", "100k+")],
    );
    text_element(&mut doc, filters, "button", "filter-btn", "Apply filters");
    text_element(&mut doc, filters, "button", "reset-btn", "Reset");

    let featured = doc.append_element(body, "section", "featured");
    doc.set_attribute(featured, "id", "featured");
    text_element(&mut doc, featured, "h2", "", "Featured software");
    for software in FEATURED {
        let card = doc.append_element(featured, "div", "software-card");
        let img = doc.append_element(card, "img", "");
        doc.set_attribute(img, "data-src", software.image);
        doc.set_attribute(img, "alt", software.name);
        text_element(&mut doc, card, "h3", "", software.name);
        text_element(&mut doc, card, "p", "", software.blurb);
        text_element(&mut doc, card, "button", "details-btn", "Details");
    }

    let categories = doc.append_element(body, "section", "categories");
    doc.set_attribute(categories, "id", "categories");
    text_element(&mut doc, categories, "h2", "", "Categories");
    for name in CATEGORIES {
        let card = doc.append_element(categories, "div", "category-card");
        text_element(&mut doc, card, "h3", "", name);
    }

    let rankings = doc.append_element(body, "section", "rankings");
    doc.set_attribute(rankings, "id", "rankings");
    text_element(&mut doc, rankings, "h2", "", "Top downloads");
    for (rank, name) in RANKINGS.iter().enumerate() {
        let item = doc.append_element(rankings, "div", "ranking-item");
        text_element(&mut doc, item, "span", "rank", &format!("{}.", rank + 1));
        text_element(&mut doc, item, "h3", "", name);
    }

    let testimonials = doc.append_element(body, "section", "testimonials");
    for quote in [
        "Found every tool my studio needed in one afternoon.",
        "The rankings saved me hours of comparison.",
    ] {
        let card = doc.append_element(testimonials, "div", "testimonial-card");
        text_element(&mut doc, card, "p", "", quote);
    }

    let signup = doc.append_element(body, "section", "newsletter");
    doc.set_attribute(signup, "id", "signup");
    text_element(&mut doc, signup, "h2", "", "Stay up to date");
    let form = doc.append_element(signup, "form", "signup-form");
    let email = doc.append_element(form, "input", "");
    doc.set_attribute(email, "type", "email");
    doc.set_attribute(email, "placeholder", "you@example.com");
    let submit = text_element(&mut doc, form, "button", "", "Subscribe");
    doc.set_attribute(submit, "type", "submit");

    let bottom = doc.append_element(body, "nav", "mobile-bottom-nav");
    for (index, (icon, label)) in BOTTOM_NAV.iter().enumerate() {
        let class_name = if index == 0 {
            "mobile-bottom-nav-item active"
        } else {
            "mobile-bottom-nav-item"
        };
        let item = doc.append_element(bottom, "a", class_name);
        doc.set_attribute(item, "href", "#");
        doc.append_element(item, "i", icon);
        text_element(&mut doc, item, "span", "", label);
    }

    let container = doc.append_element(body, "div", "toast-container");
    doc.set_attribute(container, "id", "toast-container");

    doc
}
