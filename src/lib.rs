//! softshelf library - Interactive software catalog page
//!
//! The page model, its UI controller and the terminal host that drives it.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod notification;
pub mod page;
pub mod ratelimit;
pub mod runtime;
pub mod shell;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::ShelfError;
pub use runtime::Runtime;
pub use shell::Shell;
