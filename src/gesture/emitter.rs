//! Pinch-to-keystroke state machine
//!
//! Consumes resolved hover information plus the pinch distance from each
//! sample and decides when a key event fires. Two rules keep a held pinch
//! from repeat-firing:
//! - A closure only fires on the `Idle -> Pressing` transition; while the
//!   pinch stays closed no further events fire, even if the hovered key
//!   changes underneath the fingertip.
//! - A minimum inter-event interval (`press_delay`) gates the transition
//!   itself; `now - last_emitted >= press_delay` is inclusive, and a
//!   never-emitted session always counts as ready.
//!
//! Discrete clicks (the mouse demo path) bypass both rules: a click is
//! inherently a one-shot, so it fires immediately without entering the
//! `Pressing` state and without consulting or updating the debounce clock.

use crate::gesture::sample::PositionSample;
use crate::gesture::text::TextBuffer;
use crate::layout::keyboard::{Key, KeyAction, KeyboardLayout};
use crate::time::timebase::{Interval, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pinch state of the tracked hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinchPhase {
    /// Fingers apart; a qualifying closure may fire
    Idle,
    /// Fingers below the touch threshold; this closure is spent
    Pressing,
}

/// Emitter tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterConfig {
    /// Pinch distance below which fingers count as touching (strict `<`)
    pub touch_threshold: f64,
    /// Minimum elapsed time between two emitted key events
    pub press_delay: Interval,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            // The hand-tracking demo settles on 30 px / 500 ms
            touch_threshold: 30.0,
            press_delay: Interval::from_millis(500),
        }
    }
}

/// A key event emitted by a qualifying gesture or click
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub label: String,
    pub action: KeyAction,
    pub timestamp: Timestamp,
}

/// Stateful gesture interpreter for one session.
///
/// Owns the text buffer; no other component may write to it.
#[derive(Debug)]
pub struct GestureKeyEmitter {
    config: EmitterConfig,
    phase: PinchPhase,
    last_emitted: Option<Timestamp>,
    hovered: Option<Key>,
    text: TextBuffer,
}

impl GestureKeyEmitter {
    pub fn new(config: EmitterConfig) -> Self {
        Self {
            config,
            phase: PinchPhase::Idle,
            last_emitted: None,
            hovered: None,
            text: TextBuffer::new(),
        }
    }

    /// Feed one position sample. The sample is expected to be clamped into
    /// the surface bounds already (the session does this).
    ///
    /// Returns the key event if this sample completed a qualifying gesture.
    pub fn process_sample(
        &mut self,
        sample: &PositionSample,
        layout: &KeyboardLayout,
    ) -> Option<KeyEvent> {
        // Hover tracks the fingertip on every sample, pinched or not; the
        // presentation layer reads it to highlight the active key.
        self.hovered = layout.resolve_point(sample.primary).cloned();

        let touching = sample.pinch_distance < self.config.touch_threshold;

        match self.phase {
            PinchPhase::Idle => {
                if !touching {
                    return None;
                }
                let key = self.hovered.clone()?;
                if !self.debounce_ready(sample.timestamp) {
                    return None;
                }
                self.phase = PinchPhase::Pressing;
                Some(self.emit(&key, sample.timestamp))
            }
            PinchPhase::Pressing => {
                if !touching {
                    // Release: no event fires on the way up
                    self.phase = PinchPhase::Idle;
                }
                None
            }
        }
    }

    /// Feed one discrete click at surface coordinates.
    ///
    /// Clicks fire once per click with no debounce and no phase change;
    /// they also leave the debounce clock untouched so an interleaved pinch
    /// stream is unaffected.
    pub fn process_click(
        &mut self,
        x: f64,
        y: f64,
        timestamp: Timestamp,
        layout: &KeyboardLayout,
    ) -> Option<KeyEvent> {
        let key = layout.resolve(x, y)?.clone();
        Some(self.apply(&key, timestamp))
    }

    fn debounce_ready(&self, now: Timestamp) -> bool {
        match self.last_emitted {
            None => true,
            Some(last) => now.since(last) >= self.config.press_delay,
        }
    }

    /// Emit through the debounced gesture path: applies the key and stamps
    /// the debounce clock.
    fn emit(&mut self, key: &Key, timestamp: Timestamp) -> KeyEvent {
        self.last_emitted = Some(timestamp);
        self.apply(key, timestamp)
    }

    /// Apply a key to the text buffer and build the event record.
    fn apply(&mut self, key: &Key, timestamp: Timestamp) -> KeyEvent {
        match key.action() {
            KeyAction::Space => self.text.push_space(),
            KeyAction::Backspace => self.text.pop(),
            KeyAction::Text => self.text.push_str(key.label()),
        }
        debug!(key = key.label(), text = self.text.as_str(), "key event");
        KeyEvent {
            label: key.label().to_string(),
            action: key.action(),
            timestamp,
        }
    }

    /// Key currently under the fingertip, independent of pinch state.
    pub fn hovered_key(&self) -> Option<&Key> {
        self.hovered.as_ref()
    }

    /// Current pinch phase.
    pub fn phase(&self) -> PinchPhase {
        self.phase
    }

    /// The accumulated text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Character count of the accumulated text.
    pub fn char_count(&self) -> usize {
        self.text.char_count()
    }
}

impl Default for GestureKeyEmitter {
    fn default() -> Self {
        Self::new(EmitterConfig::default())
    }
}
