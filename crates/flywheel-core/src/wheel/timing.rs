//! Animation timing helpers.
//!
//! All functions take the current instant explicitly so callers (and
//! tests) control the clock.

use std::time::{Duration, Instant};

/// Linear progress of an animation at `now`, in [0, 1].
///
/// Zero-duration animations are complete immediately. An instant
/// before `start` reads as progress 0.
pub fn progress_at(now: Instant, start: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

/// Whether an animation that began at `start` has run its full
/// `duration` by `now`.
pub fn is_complete_at(now: Instant, start: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
