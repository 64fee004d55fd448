//! Keyboard layout construction and resolution
//!
//! A [`LayoutSpec`] (rows of labels plus uniform geometry) is validated once
//! at startup and frozen into a [`KeyboardLayout`]: an ordered, row-major
//! list of [`KeySlot`]s. Resolution walks the slots top-to-bottom,
//! left-to-right and returns the first rectangle containing the point, so
//! behavior stays deterministic even if a hand-edited spec produced
//! overlapping slots.

use crate::layout::geometry::{Point, Rect};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Effect a key has on the text buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAction {
    /// Append the key's label verbatim
    Text,
    /// Append a single space character
    Space,
    /// Remove the last character (no-op on an empty buffer)
    Backspace,
}

/// Label for the space key in layout specs
pub const SPACE_LABEL: &str = "SPACE";
/// Label for the backspace key in layout specs
pub const BACKSPACE_LABEL: &str = "BACK";

/// A single key: an opaque label plus its buffer action.
/// Immutable once the layout is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    label: String,
    action: KeyAction,
}

impl Key {
    /// Derive a key from its label. `SPACE` and `BACK` map to their special
    /// actions; every other label appends itself verbatim.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let action = match label.as_str() {
            SPACE_LABEL => KeyAction::Space,
            BACKSPACE_LABEL => KeyAction::Backspace,
            _ => KeyAction::Text,
        };
        Self { label, action }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn action(&self) -> KeyAction {
        self.action
    }
}

/// A key and the rectangle it occupies on the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeySlot {
    pub key: Key,
    pub rect: Rect,
}

/// Layout specification: rows of labels plus uniform geometry.
///
/// The default is the QWERTY grid the demos use: 50x50 keys with a 20 px
/// margin, origin (150, 450), three letter rows and a SPACE/BACK row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Rows of key labels, top to bottom
    pub rows: Vec<Vec<String>>,
    /// Key width in pixels
    pub key_width: f64,
    /// Key height in pixels
    pub key_height: f64,
    /// Gap between adjacent keys in pixels
    pub margin: f64,
    /// Left edge of the first column
    pub origin_x: f64,
    /// Top edge of the first row
    pub origin_y: f64,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        let rows = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"]
            .iter()
            .map(|row| row.chars().map(|c| c.to_string()).collect())
            .chain(std::iter::once(vec![
                SPACE_LABEL.to_string(),
                BACKSPACE_LABEL.to_string(),
            ]))
            .collect();

        Self {
            rows,
            key_width: 50.0,
            key_height: 50.0,
            margin: 20.0,
            origin_x: 150.0,
            origin_y: 450.0,
        }
    }
}

impl LayoutSpec {
    /// Validate dimensions and row structure.
    pub fn validate(&self) -> Result<()> {
        if self.rows.is_empty() {
            return Err(Error::Layout("layout has no rows".to_string()));
        }
        if let Some(idx) = self.rows.iter().position(|r| r.is_empty()) {
            return Err(Error::Layout(format!("row {} has no keys", idx)));
        }
        if self.key_width <= 0.0 || self.key_height <= 0.0 {
            return Err(Error::Layout(format!(
                "key dimensions must be positive, got {}x{}",
                self.key_width, self.key_height
            )));
        }
        if self.margin < 0.0 {
            return Err(Error::Layout(format!(
                "margin must be non-negative, got {}",
                self.margin
            )));
        }
        Ok(())
    }
}

/// Immutable geometric lookup structure for an on-screen keyboard.
///
/// Built once at startup; resolution is a pure function with no side
/// effects. Linear scan over the slots is fine at this scale (<= ~40 keys).
#[derive(Debug, Clone)]
pub struct KeyboardLayout {
    slots: Vec<KeySlot>,
    rows: Vec<Vec<String>>,
}

impl KeyboardLayout {
    /// Build a layout from a spec. Fails with [`Error::Layout`] on empty
    /// rows or non-positive dimensions.
    pub fn build(spec: &LayoutSpec) -> Result<Self> {
        spec.validate()?;

        let mut slots = Vec::new();
        for (row_idx, row) in spec.rows.iter().enumerate() {
            for (col_idx, label) in row.iter().enumerate() {
                let x = spec.origin_x + col_idx as f64 * (spec.key_width + spec.margin);
                let y = spec.origin_y + row_idx as f64 * (spec.key_height + spec.margin);
                slots.push(KeySlot {
                    key: Key::from_label(label.clone()),
                    rect: Rect::new(x, y, spec.key_width, spec.key_height),
                });
            }
        }

        Ok(Self {
            slots,
            rows: spec.rows.clone(),
        })
    }

    /// Resolve a screen coordinate to the key occupying it.
    ///
    /// Deterministic: first match in row-major order, boundary inclusive.
    /// Returns `None` when the point falls in a margin gap or outside the
    /// keyboard entirely.
    pub fn resolve(&self, x: f64, y: f64) -> Option<&Key> {
        let p = Point::new(x, y);
        self.slots
            .iter()
            .find(|slot| slot.rect.contains(p))
            .map(|slot| &slot.key)
    }

    /// Resolve a point.
    pub fn resolve_point(&self, p: Point) -> Option<&Key> {
        self.resolve(p.x, p.y)
    }

    /// Find the slot for a given label, if present.
    pub fn slot_for_label(&self, label: &str) -> Option<&KeySlot> {
        self.slots.iter().find(|slot| slot.key.label() == label)
    }

    /// All slots in row-major order.
    pub fn slots(&self) -> &[KeySlot] {
        &self.slots
    }

    /// The label rows the layout was built from.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Total key count.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
