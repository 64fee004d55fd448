//! # Airtype
//!
//! A gesture-driven virtual keyboard engine. A tracked fingertip stream
//! (from a hand-pose landmark provider, a recorded trace, or a mouse
//! stand-in) is hit-tested against an on-screen keyboard layout; a pinch
//! gesture (thumb tip near index fingertip) or a discrete click emits a
//! debounced keystroke into an accumulated text buffer.
//!
//! ## Quick Start
//!
//! ```
//! use airtype::app::config::Config;
//! use airtype::gesture::sample::PositionSample;
//! use airtype::layout::geometry::Point;
//! use airtype::session::Session;
//! use airtype::time::timebase::Timestamp;
//!
//! let mut session = Session::from_config(&Config::default()).expect("valid default config");
//!
//! // Hover the "Q" key (origin of the default layout) and close the pinch.
//! let tip = Point::new(160.0, 470.0);
//! let sample = PositionSample::new(tip, tip, Timestamp::from_millis(600));
//! session.process_sample(&sample);
//!
//! assert_eq!(session.text(), "Q");
//! ```
//!
//! ## Architecture
//!
//! - [`layout`]: keyboard geometry and coordinate-to-key resolution
//! - [`gesture`]: pinch state machine, debounce, and the text buffer
//! - [`session`]: session object, position sources, and transcripts
//! - [`inject`]: best-effort OS key injection collaborators
//! - [`time`]: monotonic timestamps and intervals
//! - [`app`]: CLI and configuration management
//!
//! ## Sample Pipeline
//!
//! ```text
//! ┌────────────────┐    ┌────────────────┐    ┌────────────────┐
//! │ PositionSource │───▶│ KeyboardLayout │───▶│ GestureEmitter │
//! │ (trace/synth)  │    │  (hit testing) │    │ (state machine)│
//! └────────────────┘    └────────────────┘    └───────┬────────┘
//!                                                     │ KeyEvent
//!                                     ┌───────────────┼───────────────┐
//!                                     ▼               ▼               ▼
//!                               ┌──────────┐   ┌────────────┐  ┌────────────┐
//!                               │TextBuffer│   │ Transcript │  │ KeyInjector│
//!                               └──────────┘   └────────────┘  └────────────┘
//! ```

pub mod time;
pub mod layout;
pub mod gesture;
pub mod inject;
pub mod session;
pub mod app;

// Re-export commonly used types
pub use gesture::emitter::{GestureKeyEmitter, KeyEvent};
pub use gesture::sample::PositionSample;
pub use layout::keyboard::{Key, KeyAction, KeyboardLayout};
pub use session::transcript::Transcript;
pub use session::Session;
pub use time::timebase::{Interval, Timestamp};

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid layout: {0}")]
    Layout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sample trace error: {0}")]
    Trace(String),

    #[error("Key injection error: {0}")]
    Injection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
