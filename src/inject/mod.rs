//! Best-effort OS key injection
//!
//! The engine optionally forwards each emitted key to an injector that
//! simulates the corresponding OS keypress. Injection is fire-and-forget:
//! the session swallows every error here, so a failing or unsupported
//! backend can never affect the text buffer or the gesture state machine.

use crate::layout::keyboard::{Key, KeyAction};
use crate::{Error, Result};
use tracing::debug;

/// A sink that attempts to simulate a keypress for an emitted key.
///
/// Implementations may fail for any reason (missing mapping, permissions,
/// unsupported platform); callers must treat the outcome as advisory.
pub trait KeyInjector {
    fn inject(&mut self, key: &Key) -> Result<()>;
}

/// Injector that does nothing. Used when no OS backend is wanted,
/// e.g. for trace replay.
#[derive(Debug, Default)]
pub struct NoopInjector;

impl KeyInjector for NoopInjector {
    fn inject(&mut self, _key: &Key) -> Result<()> {
        Ok(())
    }
}

/// Injector that logs the keypress it would have simulated.
#[derive(Debug, Default)]
pub struct TraceInjector;

impl KeyInjector for TraceInjector {
    fn inject(&mut self, key: &Key) -> Result<()> {
        let name = os_key_name(key).ok_or_else(|| {
            Error::Injection(format!("no OS key mapping for label '{}'", key.label()))
        })?;
        debug!(key = name, "would inject keypress");
        Ok(())
    }
}

/// Map a key to the lowercase OS key name a simulation backend would press.
///
/// Only single-character text labels have a mapping; multi-character labels
/// other than the special keys have none and injection for them fails
/// (which the session ignores).
pub fn os_key_name(key: &Key) -> Option<String> {
    match key.action() {
        KeyAction::Space => Some("space".to_string()),
        KeyAction::Backspace => Some("backspace".to_string()),
        KeyAction::Text => {
            let label = key.label();
            if label.chars().count() == 1 {
                Some(label.to_lowercase())
            } else {
                None
            }
        }
    }
}
