//! Session transcripts
//!
//! A transcript is the persisted record of one typing session: metadata
//! plus every emitted key event and the final text. It replaces the demos'
//! end-of-session console summary with a loadable JSON artifact.

use crate::gesture::emitter::KeyEvent;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current transcript format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Transcript metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptMetadata {
    /// Unique transcript ID
    pub id: Uuid,
    /// Session name
    pub name: String,
    /// Session start time (wall clock)
    pub started_at: DateTime<Utc>,
    /// Session end time
    pub ended_at: Option<DateTime<Utc>>,
    /// Total emitted key events
    pub event_count: usize,
    /// Session duration in milliseconds
    pub duration_ms: u64,
    /// Version of the transcript format
    pub format_version: String,
}

impl TranscriptMetadata {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            started_at: Utc::now(),
            ended_at: None,
            event_count: 0,
            duration_ms: 0,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }

    /// Stamp the end of the session.
    pub fn finalize(&mut self, event_count: usize, duration_ms: u64) {
        self.ended_at = Some(Utc::now());
        self.event_count = event_count;
        self.duration_ms = duration_ms;
    }
}

impl Default for TranscriptMetadata {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// A complete record of one typing session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub metadata: TranscriptMetadata,
    /// Emitted key events in arrival order
    pub events: Vec<KeyEvent>,
    /// Final accumulated text
    pub final_text: String,
}

impl Transcript {
    pub fn new(name: String) -> Self {
        Self {
            metadata: TranscriptMetadata::new(name),
            events: Vec::new(),
            final_text: String::new(),
        }
    }

    /// Record an emitted key event.
    pub fn add_event(&mut self, event: KeyEvent) {
        self.events.push(event);
    }

    /// Finalize with the session's accumulated text and duration.
    pub fn finalize(&mut self, final_text: String, duration_ms: u64) {
        self.final_text = final_text;
        self.metadata.finalize(self.events.len(), duration_ms);
    }

    /// Save as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file.
    ///
    /// Warns on an unknown format version but still attempts to
    /// deserialize; missing metadata fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let transcript: Transcript = serde_json::from_str(&content)?;
        if transcript.metadata.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                name = %transcript.metadata.name,
                found = %transcript.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Transcript has different format version; some fields may use default values"
            );
        }
        Ok(transcript)
    }

    /// Number of emitted events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new("untitled".to_string())
    }
}
