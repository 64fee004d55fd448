//! Position samples and the boundary mapping from landmark providers
//!
//! The emitter never sees the pose model's object shape: whatever the
//! provider reports (normalized landmarks, mouse coordinates, recorded
//! traces) is converted into a concrete [`PositionSample`] here.

use crate::layout::geometry::Point;
use crate::time::timebase::Timestamp;
use serde::{Deserialize, Serialize};

/// Dimensions of the presentation surface (camera frame or window).
///
/// Passed explicitly so coordinate scaling never needs to read a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Surface {
    fn default() -> Self {
        // The demos capture at 1280x720
        Self::new(1280.0, 720.0)
    }
}

/// One timestamped observation of the tracked hand.
///
/// `primary` is the index fingertip (hover + typing target); `secondary` is
/// the thumb tip, used only for the pinch distance. The distance is
/// derivable from the two points but carried in the sample for clarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Index fingertip position in surface pixels
    pub primary: Point,
    /// Thumb tip position in surface pixels
    pub secondary: Point,
    /// Euclidean distance between the two points
    pub pinch_distance: f64,
    /// When the sample was observed
    pub timestamp: Timestamp,
}

impl PositionSample {
    /// Create a sample from pixel-space fingertip positions.
    pub fn new(primary: Point, secondary: Point, timestamp: Timestamp) -> Self {
        Self {
            primary,
            secondary,
            pinch_distance: primary.distance_to(secondary),
            timestamp,
        }
    }

    /// Map normalized landmark coordinates (`[0, 1]` per axis, as produced
    /// by hand-pose models) into surface pixels.
    pub fn from_normalized(
        primary: (f64, f64),
        secondary: (f64, f64),
        surface: Surface,
        timestamp: Timestamp,
    ) -> Self {
        let scale = |(nx, ny): (f64, f64)| Point::new(nx * surface.width, ny * surface.height);
        Self::new(scale(primary), scale(secondary), timestamp)
    }

    /// Clamp both points into the surface bounds, recomputing the pinch
    /// distance. Applied uniformly before hit-testing so boundary behavior
    /// at frame edges is consistent across input paths.
    pub fn clamped(&self, surface: Surface) -> Self {
        Self::new(
            self.primary.clamped(surface.width, surface.height),
            self.secondary.clamped(surface.width, surface.height),
            self.timestamp,
        )
    }
}
