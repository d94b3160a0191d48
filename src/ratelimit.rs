//! Event-rate limiters
//!
//! `Debounce` and `Throttle` control how often a handler runs in response to
//! high-frequency events. Both schedule their wake-ups on any `Schedule`
//! implementation and keep at most one timer in flight.

mod debounce;
mod throttle;

pub use debounce::Debounce;
pub use throttle::Throttle;
