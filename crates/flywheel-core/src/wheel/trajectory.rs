//! Time-parameterized motion curves.
//!
//! A trajectory maps instants to absolute wheel travel positions. The
//! scheduler samples it each tick and feeds the position differences
//! into the stepping arithmetic, so curves never touch wheel state
//! directly.

use std::time::{Duration, Instant};

use crate::easing::EasingKind;

use super::timing;

/// An active motion curve with a defined end value and end time.
#[derive(Debug, Clone)]
pub(crate) enum Trajectory {
    Fling(FlingCurve),
    Eased(EasedCurve),
}

impl Trajectory {
    /// Momentum curve: starts at `velocity` px/s and decelerates at a
    /// constant rate until it stops. `bounds` limits where a non-cyclic
    /// wheel may come to rest; the curve is cut short at construction
    /// so it never aims outside them.
    pub fn fling(
        from: i64,
        velocity: f64,
        deceleration: f64,
        start: Instant,
        bounds: Option<(i64, i64)>,
    ) -> Self {
        Trajectory::Fling(FlingCurve::new(from, velocity, deceleration, start, bounds))
    }

    /// Fixed-duration curve from `from` to `to` shaped by `easing`.
    pub fn eased(
        from: i64,
        to: i64,
        start: Instant,
        duration: Duration,
        easing: EasingKind,
    ) -> Self {
        Trajectory::Eased(EasedCurve {
            start,
            from,
            to,
            duration,
            easing,
        })
    }

    /// Position at `now`. Exact at and past the end time.
    pub fn sample(&self, now: Instant) -> i64 {
        match self {
            Trajectory::Fling(curve) => curve.sample(now),
            Trajectory::Eased(curve) => curve.sample(now),
        }
    }

    /// Position at the start instant.
    pub fn start_value(&self) -> i64 {
        match self {
            Trajectory::Fling(curve) => curve.from,
            Trajectory::Eased(curve) => curve.from,
        }
    }

    /// Where the curve comes to rest.
    pub fn end_value(&self) -> i64 {
        match self {
            Trajectory::Fling(curve) => curve.end,
            Trajectory::Eased(curve) => curve.to,
        }
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        let (start, duration) = match self {
            Trajectory::Fling(curve) => (curve.start, curve.duration),
            Trajectory::Eased(curve) => (curve.start, curve.duration),
        };
        timing::is_complete_at(now, start, duration)
    }
}

/// Constant-deceleration momentum curve.
#[derive(Debug, Clone)]
pub(crate) struct FlingCurve {
    start: Instant,
    from: i64,
    velocity: f64,
    deceleration: f64,
    duration: Duration,
    end: i64,
}

impl FlingCurve {
    fn new(
        from: i64,
        velocity: f64,
        deceleration: f64,
        start: Instant,
        bounds: Option<(i64, i64)>,
    ) -> Self {
        if velocity == 0.0 || deceleration <= 0.0 {
            return Self::resting(from, start);
        }

        let speed = velocity.abs();
        let mut duration_s = speed / deceleration;
        let distance = velocity.signum() * speed * speed / (2.0 * deceleration);
        let mut end = from + distance.round() as i64;

        if let Some((lo, hi)) = bounds {
            let clamped = end.clamp(lo, hi);
            if clamped != end {
                end = clamped;
                let travel = (end - from) as f64;
                if travel == 0.0 || travel.signum() != velocity.signum() {
                    // Released while already pressed against the edge
                    return Self::resting(from, start);
                }
                let disc = (speed * speed - 2.0 * deceleration * travel.abs()).max(0.0);
                duration_s = (speed - disc.sqrt()) / deceleration;
            }
        }

        Self {
            start,
            from,
            velocity,
            deceleration,
            duration: Duration::from_secs_f64(duration_s.max(0.0)),
            end,
        }
    }

    fn resting(from: i64, start: Instant) -> Self {
        Self {
            start,
            from,
            velocity: 0.0,
            deceleration: 1.0,
            duration: Duration::ZERO,
            end: from,
        }
    }

    fn sample(&self, now: Instant) -> i64 {
        if timing::is_complete_at(now, self.start, self.duration) {
            return self.end;
        }
        let t = now.saturating_duration_since(self.start).as_secs_f64();
        let speed = self.velocity.abs();
        let travelled = speed * t - 0.5 * self.deceleration * t * t;
        self.from + (self.velocity.signum() * travelled).round() as i64
    }
}

/// Fixed-duration interpolation curve.
#[derive(Debug, Clone)]
pub(crate) struct EasedCurve {
    start: Instant,
    from: i64,
    to: i64,
    duration: Duration,
    easing: EasingKind,
}

impl EasedCurve {
    fn sample(&self, now: Instant) -> i64 {
        if timing::is_complete_at(now, self.start, self.duration) {
            return self.to;
        }
        let t = timing::progress_at(now, self.start, self.duration);
        let eased = self.easing.apply(t);
        timing::lerp(self.from as f64, self.to as f64, eased).round() as i64
    }
}
