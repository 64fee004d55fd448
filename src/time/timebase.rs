//! Process-local monotonic clock
//!
//! Provides microsecond-precision timestamps anchored to a per-process
//! `Instant`. Timestamps from recorded traces carry their own microsecond
//! values and never mix with live timestamps from another process, so the
//! anchor being process-local is fine.

use std::sync::OnceLock;
use std::time::Instant;

/// Anchor instant, initialized on first use
static CLOCK_ANCHOR: OnceLock<Instant> = OnceLock::new();

/// Monotonic clock producing microseconds since the process anchor.
///
/// This struct provides:
/// - Microsecond precision timestamps
/// - Monotonic guarantees (time never goes backward)
/// - Identical behavior across platforms (plain `std::time::Instant`)
#[derive(Debug, Clone, Copy)]
pub struct MonoClock;

impl MonoClock {
    /// Initialize the clock anchor. Safe to call more than once; only the
    /// first call pins the anchor.
    pub fn init() {
        CLOCK_ANCHOR.get_or_init(Instant::now);
    }

    /// Microseconds elapsed since the anchor.
    #[inline]
    pub fn now_micros() -> u64 {
        let anchor = CLOCK_ANCHOR.get_or_init(Instant::now);
        anchor.elapsed().as_micros() as u64
    }

    /// Check whether two microsecond values maintain monotonic order.
    #[inline]
    pub fn is_monotonic(t1: u64, t2: u64) -> bool {
        t2 >= t1
    }
}

/// A timestamp in microseconds on the session's monotonic timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from raw microseconds.
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Create a timestamp from milliseconds.
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis * 1_000)
    }

    /// Capture the current timestamp.
    #[inline]
    pub fn now() -> Self {
        Self(MonoClock::now_micros())
    }

    /// Raw microsecond value.
    #[inline]
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Convert to milliseconds.
    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0 / 1_000
    }

    /// Interval since an earlier timestamp. Saturates to zero if `earlier`
    /// is actually later (out-of-order trace data).
    #[inline]
    pub fn since(&self, earlier: Timestamp) -> Interval {
        Interval(self.0.saturating_sub(earlier.0))
    }

    /// Check if this timestamp is strictly after another.
    #[inline]
    pub fn is_after(&self, other: Timestamp) -> bool {
        self.0 > other.0
    }
}

impl serde::Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Raw microseconds for maximum precision
        serializer.serialize_u64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let micros = u64::deserialize(deserializer)?;
        Ok(Timestamp(micros))
    }
}

/// A length of time in microseconds, used for debounce windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Interval(u64);

impl Interval {
    /// Zero-length interval.
    pub const ZERO: Interval = Interval(0);

    /// Create an interval from raw microseconds.
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Create an interval from milliseconds.
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis * 1_000)
    }

    /// Raw microsecond value.
    #[inline]
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Convert to milliseconds.
    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0 / 1_000
    }

    /// Convert to seconds as f64.
    #[inline]
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }
}

impl std::ops::Add for Interval {
    type Output = Interval;

    fn add(self, rhs: Self) -> Self::Output {
        Interval(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub for Interval {
    type Output = Interval;

    fn sub(self, rhs: Self) -> Self::Output {
        Interval(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::Add<Interval> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Interval) -> Self::Output {
        Timestamp(self.0.saturating_add(rhs.0))
    }
}

impl serde::Serialize for Interval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Interval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let micros = u64::deserialize(deserializer)?;
        Ok(Interval(micros))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_monotonicity() {
        MonoClock::init();
        let t1 = MonoClock::now_micros();
        for _ in 0..1000 {
            std::hint::black_box(0);
        }
        let t2 = MonoClock::now_micros();
        assert!(MonoClock::is_monotonic(t1, t2), "clock must be monotonic");
    }

    #[test]
    fn test_timestamp_now_advances() {
        MonoClock::init();
        let t1 = Timestamp::now();
        std::thread::sleep(std::time::Duration::from_micros(200));
        let t2 = Timestamp::now();

        assert!(t2.is_after(t1));
        assert!(t2.since(t1).as_micros() >= 200);
    }

    #[test]
    fn test_timestamp_conversions() {
        let ts = Timestamp::from_millis(1_500);
        assert_eq!(ts.as_micros(), 1_500_000);
        assert_eq!(ts.as_millis(), 1_500);
    }

    #[test]
    fn test_timestamp_ordering() {
        let t1 = Timestamp::from_micros(1_000);
        let t2 = Timestamp::from_micros(2_000);
        let t3 = Timestamp::from_micros(1_000);

        assert!(t2 > t1);
        assert_eq!(t1, t3);
        assert!(t2.is_after(t1));
        assert!(!t1.is_after(t2));
    }

    #[test]
    fn test_since_saturates_on_out_of_order() {
        let t1 = Timestamp::from_micros(1_000);
        let t2 = Timestamp::from_micros(500);

        assert_eq!(t2.since(t1), Interval::ZERO);
        assert_eq!(t1.since(t2).as_micros(), 500);
    }

    #[test]
    fn test_interval_arithmetic() {
        let a = Interval::from_millis(100);
        let b = Interval::from_millis(50);

        assert_eq!((a + b).as_millis(), 150);
        assert_eq!((a - b).as_millis(), 50);
        // Subtraction saturates at zero
        assert_eq!((b - a), Interval::ZERO);
    }

    #[test]
    fn test_interval_saturating_add() {
        let big = Interval::from_micros(u64::MAX);
        let one = Interval::from_micros(1);
        assert_eq!((big + one).as_micros(), u64::MAX);
    }

    #[test]
    fn test_timestamp_plus_interval() {
        let ts = Timestamp::from_millis(100);
        let shifted = ts + Interval::from_millis(400);
        assert_eq!(shifted, Timestamp::from_millis(500));
    }

    #[test]
    fn test_interval_as_secs_f64() {
        let half = Interval::from_millis(500);
        let secs = half.as_secs_f64();
        assert!((secs - 0.5).abs() < 1e-9, "expected 0.5s, got {}", secs);
    }

    #[test]
    fn test_timestamp_serialization() {
        let ts = Timestamp::from_micros(123_456_789);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "123456789");

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn test_interval_serialization() {
        let iv = Interval::from_millis(500);
        let json = serde_json::to_string(&iv).unwrap();
        let back: Interval = serde_json::from_str(&json).unwrap();
        assert_eq!(back, iv);
    }

    #[test]
    fn test_interval_zero() {
        assert_eq!(Interval::ZERO.as_micros(), 0);
        assert_eq!(Interval::ZERO.as_millis(), 0);
        assert_eq!(Interval::default(), Interval::ZERO);
    }
}
