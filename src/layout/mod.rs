//! Keyboard geometry and hit testing
//!
//! This module turns a layout specification (rows of key labels, uniform
//! key size, margin, origin) into an immutable grid of key slots and
//! resolves screen coordinates to keys:
//! - Axis-aligned rectangle and point primitives
//! - Row-major, first-match, boundary-inclusive resolution

pub mod geometry;
pub mod keyboard;

pub use geometry::{Point, Rect};
pub use keyboard::{Key, KeyAction, KeySlot, KeyboardLayout, LayoutSpec};
