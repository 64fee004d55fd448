//! Integration tests for the typing session pipeline
//!
//! These tests verify the complete path:
//! Position source -> hit testing -> gesture emitter -> transcript

use airtype::app::config::Config;
use airtype::gesture::emitter::EmitterConfig;
use airtype::gesture::sample::{PositionSample, Surface};
use airtype::layout::geometry::Point;
use airtype::layout::keyboard::{KeyAction, KeyboardLayout, LayoutSpec};
use airtype::session::source::{PositionSource, SampleTrace, SyntheticHandSource, TraceSource};
use airtype::session::transcript::Transcript;
use airtype::session::Session;
use airtype::time::timebase::Timestamp;
use std::sync::atomic::AtomicBool;
use tempfile::TempDir;

fn default_layout() -> KeyboardLayout {
    KeyboardLayout::build(&LayoutSpec::default()).expect("default layout is valid")
}

/// A closed-pinch sample at the given surface position
fn pinch_at(x: f64, y: f64, ms: u64) -> PositionSample {
    let p = Point::new(x, y);
    PositionSample::new(p, p, Timestamp::from_millis(ms))
}

/// An open-pinch sample hovering the given surface position
fn hover_at(x: f64, y: f64, ms: u64) -> PositionSample {
    PositionSample::new(
        Point::new(x, y),
        Point::new(x - 60.0, y + 40.0),
        Timestamp::from_millis(ms),
    )
}

#[test]
fn test_synth_to_replay_roundtrip() {
    let layout = default_layout();
    let emitter_config = EmitterConfig::default();
    let mut synth =
        SyntheticHandSource::from_phrase("hello world", &layout, &emitter_config).unwrap();

    // Record the synthetic stream into a trace file
    let dir = TempDir::new().unwrap();
    let trace_path = dir.path().join("hello.json");
    let mut trace = SampleTrace::new("hello".to_string(), Surface::default());
    while let Some(sample) = synth.next_sample() {
        trace.push(sample);
    }
    trace.save(&trace_path).unwrap();

    // Replay the trace through a fresh session
    let mut source = TraceSource::from_file(&trace_path).unwrap();
    let mut session = Session::from_config(&Config::default()).unwrap();
    let stop = AtomicBool::new(false);
    let processed = session.run(&mut source, &stop);

    assert_eq!(processed, trace.len());
    assert_eq!(session.text(), "HELLO WORLD");
}

#[test]
fn test_press_and_hold_emits_once() {
    let mut session = Session::from_config(&Config::default()).unwrap();

    // Close the pinch over "Q" and hold it across many samples
    for ms in (600..1600).step_by(50) {
        session.process_sample(&pinch_at(160.0, 470.0, ms));
    }

    assert_eq!(session.text(), "Q");
    assert_eq!(session.event_count(), 1);
}

#[test]
fn test_rapid_repress_is_debounced() {
    let mut session = Session::from_config(&Config::default()).unwrap();

    // First press fires
    session.process_sample(&pinch_at(160.0, 470.0, 600));
    // Release and re-press 200 ms later: inside the debounce window
    session.process_sample(&hover_at(160.0, 470.0, 700));
    session.process_sample(&pinch_at(160.0, 470.0, 800));
    assert_eq!(session.text(), "Q");

    // Holding that pinch until the window elapses fires the second press
    session.process_sample(&pinch_at(160.0, 470.0, 1200));
    assert_eq!(session.text(), "QQ");
}

#[test]
fn test_backspace_and_space_flow() {
    let layout = default_layout();
    let emitter_config = EmitterConfig::default();
    let mut source = SyntheticHandSource::from_phrase("ab", &layout, &emitter_config).unwrap();

    let mut session = Session::from_config(&Config::default()).unwrap();
    let stop = AtomicBool::new(false);
    session.run(&mut source, &stop);
    assert_eq!(session.text(), "AB");

    // Click SPACE, then erase the space and the B through the click path
    let space = layout.slot_for_label("SPACE").unwrap().rect.center();
    let back = layout.slot_for_label("BACK").unwrap().rect.center();
    session.process_click(space.x, space.y, Timestamp::from_millis(10_000));
    session.process_click(back.x, back.y, Timestamp::from_millis(10_010));
    session.process_click(back.x, back.y, Timestamp::from_millis(10_020));

    assert_eq!(session.text(), "A");
    assert_eq!(session.event_count(), 5);
}

#[test]
fn test_clicks_between_keys_do_nothing() {
    let mut session = Session::from_config(&Config::default()).unwrap();

    // Margin between Q and W
    let event = session.process_click(219.0, 470.0, Timestamp::from_millis(100));
    assert!(event.is_none());
    assert_eq!(session.text(), "");
    assert_eq!(session.event_count(), 0);
}

#[test]
fn test_transcript_file_roundtrip_through_session() {
    let layout = default_layout();
    let mut source =
        SyntheticHandSource::from_phrase("qa", &layout, &EmitterConfig::default()).unwrap();

    let mut session = Session::from_config(&Config::default())
        .unwrap()
        .with_name("roundtrip");
    let stop = AtomicBool::new(false);
    session.run(&mut source, &stop);
    let transcript = session.finalize();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transcript.json");
    transcript.save(&path).unwrap();

    let loaded = Transcript::load(&path).unwrap();
    assert_eq!(loaded.metadata.name, "roundtrip");
    assert_eq!(loaded.final_text, "QA");
    assert_eq!(loaded.len(), 2);
    assert!(loaded.events.iter().all(|e| e.action == KeyAction::Text));
    assert!(loaded
        .events
        .windows(2)
        .all(|w| w[1].timestamp.is_after(w[0].timestamp)));
}

#[test]
fn test_custom_config_changes_behavior() {
    let mut config = Config::default();
    config.gesture.key_press_delay_ms = 100;
    let mut session = Session::from_config(&config).unwrap();

    session.process_sample(&pinch_at(160.0, 470.0, 600));
    session.process_sample(&hover_at(160.0, 470.0, 650));
    // 150 ms after the first press: inside the default window but past
    // the shortened one
    session.process_sample(&pinch_at(160.0, 470.0, 750));

    assert_eq!(session.text(), "QQ");
}

#[test]
fn test_invalid_config_rejected_at_session_build() {
    let mut config = Config::default();
    config.layout.key_width = 0.0;
    assert!(Session::from_config(&config).is_err());
}

#[test]
fn test_offscreen_samples_never_type() {
    let mut session = Session::from_config(&Config::default()).unwrap();

    // Wildly out-of-range positions clamp to the surface edge, which is
    // off the keyboard
    session.process_sample(&pinch_at(-500.0, -500.0, 600));
    session.process_sample(&pinch_at(99_999.0, 99_999.0, 1200));

    assert_eq!(session.text(), "");
    assert_eq!(session.event_count(), 0);
}
