//! Document model
//!
//! An in-memory element tree standing in for the page markup. The controller
//! only ever queries it by selector and mutates classes, attributes, inline
//! styles, values and children.

mod document;
mod selector;

pub use document::{Document, NodeId, Rect};
pub use selector::Selector;
