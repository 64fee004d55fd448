//! Typing sessions
//!
//! A [`Session`] wires the engine together: it clamps incoming samples to
//! the tracking surface, runs them through the gesture emitter against the
//! keyboard layout, records emitted key events into a transcript, and
//! forwards them to a [`KeyInjector`].

pub mod source;
pub mod transcript;

use crate::app::config::Config;
use crate::gesture::emitter::{EmitterConfig, GestureKeyEmitter, KeyEvent};
use crate::gesture::sample::{PositionSample, Surface};
use crate::inject::{KeyInjector, NoopInjector};
use crate::layout::keyboard::{Key, KeyboardLayout};
use crate::time::timebase::Timestamp;
use crate::Result;
use std::sync::atomic::{AtomicBool, Ordering};

use self::source::PositionSource;
use self::transcript::Transcript;

/// A typing session: layout + emitter + transcript + injector
pub struct Session {
    layout: KeyboardLayout,
    emitter: GestureKeyEmitter,
    surface: Surface,
    injector: Box<dyn KeyInjector>,
    transcript: Transcript,
    first_sample_at: Option<Timestamp>,
    last_sample_at: Option<Timestamp>,
}

impl Session {
    /// Build a session from a validated configuration.
    ///
    /// Uses a [`NoopInjector`]; swap it with [`Session::with_injector`]
    /// when OS key injection is wanted.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let layout = KeyboardLayout::build(&config.layout_spec())?;
        let emitter = GestureKeyEmitter::new(EmitterConfig {
            touch_threshold: config.gesture.touch_threshold_px,
            press_delay: config.gesture.press_delay(),
        });
        Ok(Self {
            layout,
            emitter,
            surface: config.surface_size(),
            injector: Box::new(NoopInjector),
            transcript: Transcript::new("session".to_string()),
            first_sample_at: None,
            last_sample_at: None,
        })
    }

    /// Replace the key injector.
    pub fn with_injector(mut self, injector: Box<dyn KeyInjector>) -> Self {
        self.injector = injector;
        self
    }

    /// Name the session's transcript.
    pub fn with_name(mut self, name: &str) -> Self {
        self.transcript.metadata.name = name.to_string();
        self
    }

    /// Process one fingertip sample.
    ///
    /// The sample is clamped to the tracking surface before hit testing.
    /// Returns the emitted key event, if any.
    pub fn process_sample(&mut self, sample: &PositionSample) -> Option<KeyEvent> {
        let clamped = sample.clamped(self.surface);
        self.note_time(clamped.timestamp);
        let event = self.emitter.process_sample(&clamped, &self.layout)?;
        self.dispatch(event)
    }

    /// Process a discrete click at surface coordinates.
    pub fn process_click(&mut self, x: f64, y: f64, timestamp: Timestamp) -> Option<KeyEvent> {
        let p = crate::layout::geometry::Point::new(x, y)
            .clamped(self.surface.width, self.surface.height);
        self.note_time(timestamp);
        let event = self.emitter.process_click(p.x, p.y, timestamp, &self.layout)?;
        self.dispatch(event)
    }

    /// Drain a position source, honoring a stop flag between samples.
    ///
    /// Returns the number of samples processed.
    pub fn run(&mut self, source: &mut dyn PositionSource, stop: &AtomicBool) -> usize {
        let mut processed = 0usize;
        while !stop.load(Ordering::SeqCst) {
            let Some(sample) = source.next_sample() else {
                break;
            };
            self.process_sample(&sample);
            processed += 1;
        }
        tracing::info!(
            samples = processed,
            events = self.transcript.len(),
            "Session source drained"
        );
        processed
    }

    fn dispatch(&mut self, event: KeyEvent) -> Option<KeyEvent> {
        if let Some(slot) = self.layout.slot_for_label(&event.label) {
            // Injection is best effort; a failed keystroke never stops
            // the session.
            if let Err(e) = self.injector.inject(&slot.key) {
                tracing::debug!(label = %event.label, error = %e, "Key injection failed");
            }
        }
        self.transcript.add_event(event.clone());
        Some(event)
    }

    fn note_time(&mut self, t: Timestamp) {
        if self.first_sample_at.is_none() {
            self.first_sample_at = Some(t);
        }
        self.last_sample_at = Some(t);
    }

    /// Finish the session, producing its transcript.
    pub fn finalize(mut self) -> Transcript {
        let duration_ms = match (self.first_sample_at, self.last_sample_at) {
            (Some(first), Some(last)) => last.since(first).as_millis(),
            _ => 0,
        };
        self.transcript
            .finalize(self.emitter.text().to_string(), duration_ms);
        self.transcript
    }

    /// Accumulated text so far.
    pub fn text(&self) -> &str {
        self.emitter.text()
    }

    /// Key currently under the fingertip.
    pub fn hovered_key(&self) -> Option<&Key> {
        self.emitter.hovered_key()
    }

    /// Number of emitted key events so far.
    pub fn event_count(&self) -> usize {
        self.transcript.len()
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::Point;
    use super::source::SyntheticHandSource;

    fn session() -> Session {
        Session::from_config(&Config::default()).unwrap()
    }

    fn pinch_at(x: f64, y: f64, ms: u64) -> PositionSample {
        let p = Point::new(x, y);
        PositionSample::new(p, p, Timestamp::from_millis(ms))
    }

    #[test]
    fn test_pinch_on_key_emits_and_records() {
        let mut s = session();
        let event = s.process_sample(&pinch_at(160.0, 470.0, 600)).unwrap();
        assert_eq!(event.label, "Q");
        assert_eq!(s.text(), "Q");
        assert_eq!(s.event_count(), 1);
    }

    #[test]
    fn test_out_of_surface_sample_is_clamped() {
        let mut s = session();
        // Far off-surface; clamps to (1280, 720), which is between keys.
        let event = s.process_sample(&pinch_at(5000.0, 5000.0, 600));
        assert!(event.is_none());
        assert_eq!(s.text(), "");
    }

    #[test]
    fn test_click_bypasses_debounce() {
        let mut s = session();
        let a = s.process_click(160.0, 470.0, Timestamp::from_millis(10));
        let b = s.process_click(160.0, 470.0, Timestamp::from_millis(20));
        assert!(a.is_some());
        assert!(b.is_some());
        assert_eq!(s.text(), "QQ");
    }

    #[test]
    fn test_run_drains_synthetic_source() {
        let mut s = session();
        let mut source = SyntheticHandSource::from_phrase(
            "hi",
            s.layout(),
            &EmitterConfig::default(),
        )
        .unwrap();
        let stop = AtomicBool::new(false);
        let processed = s.run(&mut source, &stop);
        assert_eq!(processed, 6);
        assert_eq!(s.text(), "HI");
    }

    #[test]
    fn test_run_honors_stop_flag() {
        let mut s = session();
        let mut source = SyntheticHandSource::from_phrase(
            "hello",
            s.layout(),
            &EmitterConfig::default(),
        )
        .unwrap();
        let stop = AtomicBool::new(true);
        let processed = s.run(&mut source, &stop);
        assert_eq!(processed, 0);
        assert_eq!(s.text(), "");
    }

    #[test]
    fn test_finalize_captures_text_and_duration() {
        let mut s = session().with_name("final");
        s.process_sample(&pinch_at(160.0, 470.0, 600));
        // Release the pinch, then press again past the debounce window.
        let open = PositionSample::new(
            Point::new(160.0, 470.0),
            Point::new(100.0, 510.0),
            Timestamp::from_millis(700),
        );
        s.process_sample(&open);
        s.process_sample(&pinch_at(160.0, 470.0, 1300));
        let transcript = s.finalize();
        assert_eq!(transcript.metadata.name, "final");
        assert_eq!(transcript.final_text, "QQ");
        assert_eq!(transcript.metadata.event_count, 2);
        assert_eq!(transcript.metadata.duration_ms, 700);
    }
}
