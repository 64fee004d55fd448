//! Monotonic time for sample streams
//!
//! Position samples arrive at an unspecified, possibly irregular rate; the
//! debounce logic only ever compares timestamps from the same session, so a
//! process-local monotonic clock is all that is needed.

pub mod timebase;

pub use timebase::{Interval, MonoClock, Timestamp};
