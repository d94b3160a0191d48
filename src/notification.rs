//! Notification module for softshelf
//!
//! Toasts are transient, dismissible message nodes appended to the page's
//! toast container. The `Toasts` service is handed to whichever component
//! needs to raise one.

mod toast_state;

pub use toast_state::{Severity, ToastHandle, ToastId, ToastRequest, ToastTask, Toasts};
