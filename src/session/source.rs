//! Position sources
//!
//! A [`PositionSource`] feeds fingertip samples to a [`Session`]. Two
//! implementations exist: [`TraceSource`] replays a recorded
//! [`SampleTrace`] from disk, and [`SyntheticHandSource`] fabricates a
//! sample stream that types a given phrase.
//!
//! [`Session`]: crate::session::Session

use crate::gesture::emitter::EmitterConfig;
use crate::gesture::sample::{PositionSample, Surface};
use crate::layout::geometry::Point;
use crate::layout::keyboard::{KeyboardLayout, SPACE_LABEL};
use crate::time::timebase::{Interval, Timestamp};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;
use uuid::Uuid;

/// Current trace format version
pub const TRACE_FORMAT_VERSION: &str = "1.0";

/// A stream of fingertip position samples
pub trait PositionSource {
    /// Produce the next sample, or `None` when the stream is exhausted.
    fn next_sample(&mut self) -> Option<PositionSample>;
}

/// Metadata stored alongside a recorded sample trace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceMetadata {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub sample_count: usize,
    pub format_version: String,
}

impl TraceMetadata {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
            sample_count: 0,
            format_version: TRACE_FORMAT_VERSION.to_string(),
        }
    }
}

impl Default for TraceMetadata {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// A recorded stream of position samples, loadable from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleTrace {
    pub metadata: TraceMetadata,
    /// Surface the sample coordinates are expressed in
    pub surface: Surface,
    pub samples: Vec<PositionSample>,
}

impl SampleTrace {
    pub fn new(name: String, surface: Surface) -> Self {
        Self {
            metadata: TraceMetadata::new(name),
            surface,
            samples: Vec::new(),
        }
    }

    pub fn push(&mut self, sample: PositionSample) {
        self.samples.push(sample);
        self.metadata.sample_count = self.samples.len();
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let trace: SampleTrace = serde_json::from_str(&content)?;
        if trace.metadata.format_version != TRACE_FORMAT_VERSION {
            tracing::warn!(
                name = %trace.metadata.name,
                found = %trace.metadata.format_version,
                expected = TRACE_FORMAT_VERSION,
                "Trace has different format version"
            );
        }
        Ok(trace)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Replays a recorded [`SampleTrace`] sample by sample
pub struct TraceSource {
    samples: VecDeque<PositionSample>,
}

impl TraceSource {
    pub fn new(trace: SampleTrace) -> Self {
        Self {
            samples: trace.samples.into(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let trace = SampleTrace::load(path)
            .map_err(|e| Error::Trace(format!("failed to load trace {}: {e}", path.display())))?;
        if trace.is_empty() {
            tracing::warn!(path = %path.display(), "Trace contains no samples");
        }
        Ok(Self::new(trace))
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl PositionSource for TraceSource {
    fn next_sample(&mut self) -> Option<PositionSample> {
        self.samples.pop_front()
    }
}

/// Resting offset of the thumb tip relative to the index tip when the
/// pinch is open (px)
const OPEN_THUMB_OFFSET: (f64, f64) = (-60.0, 40.0);

/// Fabricates a sample stream that types a phrase on the given layout.
///
/// For each character, the virtual hand hovers over the key center with
/// an open pinch, closes the pinch for one sample to press, then opens
/// again. The clock advances past the press delay between consecutive
/// keys so every press clears the debounce window.
pub struct SyntheticHandSource {
    samples: VecDeque<PositionSample>,
}

impl SyntheticHandSource {
    pub fn from_phrase(
        phrase: &str,
        layout: &KeyboardLayout,
        config: &EmitterConfig,
    ) -> Result<Self> {
        let mut samples = VecDeque::new();
        // Step past the debounce window with margin so sample spacing
        // never lands exactly on the boundary.
        let step = config.press_delay + Interval::from_millis(100);
        let mut clock = Timestamp::from_micros(0) + step;

        for ch in phrase.chars() {
            let label = if ch == ' ' {
                SPACE_LABEL.to_string()
            } else {
                ch.to_uppercase().to_string()
            };
            let slot = match layout.slot_for_label(&label) {
                Some(slot) => slot,
                None => {
                    tracing::warn!(character = %ch, "No key for character, skipping");
                    continue;
                }
            };
            let tip = slot.rect.center();
            let open_thumb = Point::new(tip.x + OPEN_THUMB_OFFSET.0, tip.y + OPEN_THUMB_OFFSET.1);

            // Hover with the pinch open, then close it to press.
            samples.push_back(PositionSample::new(tip, open_thumb, clock));
            clock = clock + Interval::from_millis(50);
            samples.push_back(PositionSample::new(tip, tip, clock));
            clock = clock + Interval::from_millis(50);
            samples.push_back(PositionSample::new(tip, open_thumb, clock));
            clock = clock + step;
        }

        if samples.is_empty() && !phrase.is_empty() {
            return Err(Error::Trace(format!(
                "no typeable characters in phrase {phrase:?}"
            )));
        }
        Ok(Self { samples })
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl PositionSource for SyntheticHandSource {
    fn next_sample(&mut self) -> Option<PositionSample> {
        self.samples.pop_front()
    }
}
