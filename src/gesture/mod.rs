//! Gesture-to-keystroke interpretation
//!
//! Turns a raw stream of (fingertip, thumb) position samples into discrete,
//! debounced key events and applies them to a text buffer:
//! - Pinch detection (thumb tip within a pixel threshold of the index tip)
//! - A two-state machine so a held pinch fires exactly once
//! - A minimum inter-event interval shared across all keys

pub mod emitter;
pub mod sample;
pub mod text;

pub use emitter::{GestureKeyEmitter, EmitterConfig, KeyEvent, PinchPhase};
pub use sample::{PositionSample, Surface};
pub use text::TextBuffer;
