//! Pointer gesture classification.

use std::time::Instant;

use crate::config::WheelConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GesturePhase {
    Idle,
    Pressed,
    Dragging,
}

/// What a pointer move contributes to the wheel.
///
/// The carried value is a scroll delta: pointer deltas arrive
/// positive-up and are inverted, so dragging content up reveals later
/// items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MoveOutcome {
    /// No press in progress, or still under the drag threshold.
    Ignored,
    /// The drag threshold was just crossed; carries all pointer travel
    /// accumulated since the press so no pixels are lost.
    Started(i32),
    Dragged(i32),
}

/// What a release asks the wheel to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ReleaseOutcome {
    /// No drag happened; the wheel takes no scroll action.
    Tap,
    /// Momentum scroll at the carried velocity (px/s, positive-up,
    /// clamped to the configured maximum).
    Fling(f64),
    /// Drag ended below fling speed; settle onto an item boundary.
    Justify,
}

/// State machine over {idle, pressed, dragging} that turns raw pointer
/// events into drag deltas, a fling velocity, or a tap.
pub(crate) struct GestureAdapter {
    phase: GesturePhase,
    accumulated: i32,
    drag_threshold: f64,
    fling_min_velocity: f64,
    fling_max_velocity: f64,
}

impl GestureAdapter {
    pub fn new(config: &WheelConfig) -> Self {
        Self {
            phase: GesturePhase::Idle,
            accumulated: 0,
            drag_threshold: config.drag_threshold,
            fling_min_velocity: config.fling_min_velocity,
            fling_max_velocity: config.fling_max_velocity,
        }
    }

    pub fn on_press(&mut self) {
        self.phase = GesturePhase::Pressed;
        self.accumulated = 0;
    }

    /// Feed one pointer move. `delta_y` is positive when the pointer
    /// moved up.
    pub fn on_move(&mut self, delta_y: i32) -> MoveOutcome {
        match self.phase {
            GesturePhase::Idle => MoveOutcome::Ignored,
            GesturePhase::Pressed => {
                self.accumulated = self.accumulated.saturating_add(delta_y);
                if (self.accumulated as f64).abs() > self.drag_threshold {
                    self.phase = GesturePhase::Dragging;
                    MoveOutcome::Started(-self.accumulated)
                } else {
                    MoveOutcome::Ignored
                }
            }
            GesturePhase::Dragging => MoveOutcome::Dragged(-delta_y),
        }
    }

    /// Feed the release. `velocity_y` is the pointer velocity in px/s,
    /// positive-up.
    pub fn on_release(&mut self, velocity_y: f64) -> ReleaseOutcome {
        let was_dragging = self.phase == GesturePhase::Dragging;
        self.phase = GesturePhase::Idle;
        self.accumulated = 0;

        if !was_dragging {
            return ReleaseOutcome::Tap;
        }
        if velocity_y.abs() >= self.fling_min_velocity {
            ReleaseOutcome::Fling(velocity_y.clamp(-self.fling_max_velocity, self.fling_max_velocity))
        } else {
            ReleaseOutcome::Justify
        }
    }

    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.accumulated = 0;
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }
}

/// Exponentially smoothed pointer velocity, for hosts that only see
/// absolute pointer positions. Feed per-sample deltas (positive-up)
/// and read the velocity back at release time.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    velocity: f64,
    last_at: Option<Instant>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record pointer travel since the previous sample.
    pub fn push(&mut self, delta_y: f64, at: Instant) {
        if let Some(last) = self.last_at {
            let dt = at.saturating_duration_since(last).as_secs_f64();
            if dt > 0.0 {
                let instantaneous = delta_y / dt;
                self.velocity = self.velocity * 0.3 + instantaneous * 0.7;
            }
        }
        self.last_at = Some(at);
    }

    /// Smoothed velocity in px/s, positive-up.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn adapter() -> GestureAdapter {
        GestureAdapter::new(&WheelConfig::default())
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut gesture = adapter();
        assert_eq!(gesture.on_move(20), MoveOutcome::Ignored);
    }

    #[test]
    fn test_press_then_release_is_tap() {
        let mut gesture = adapter();
        gesture.on_press();
        assert_eq!(gesture.on_release(0.0), ReleaseOutcome::Tap);
    }

    #[test]
    fn test_under_threshold_stays_tap() {
        let mut gesture = adapter();
        gesture.on_press();
        // Default threshold is 8px
        assert_eq!(gesture.on_move(3), MoveOutcome::Ignored);
        assert_eq!(gesture.on_move(4), MoveOutcome::Ignored);
        assert_eq!(gesture.on_release(0.0), ReleaseOutcome::Tap);
    }

    #[test]
    fn test_crossing_threshold_carries_accumulated_travel() {
        let mut gesture = adapter();
        gesture.on_press();
        assert_eq!(gesture.on_move(5), MoveOutcome::Ignored);
        // 5 + 4 = 9 crosses the 8px threshold; delta arrives inverted
        assert_eq!(gesture.on_move(4), MoveOutcome::Started(-9));
        assert!(gesture.is_dragging());
        assert_eq!(gesture.on_move(-2), MoveOutcome::Dragged(2));
    }

    #[test]
    fn test_downward_drag_crosses_threshold_too() {
        let mut gesture = adapter();
        gesture.on_press();
        assert_eq!(gesture.on_move(-9), MoveOutcome::Started(9));
    }

    #[test]
    fn test_slow_release_justifies() {
        let mut gesture = adapter();
        gesture.on_press();
        gesture.on_move(20);
        assert_eq!(gesture.on_release(30.0), ReleaseOutcome::Justify);
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn test_fast_release_flings_clamped() {
        let mut gesture = adapter();
        gesture.on_press();
        gesture.on_move(20);
        assert_eq!(gesture.on_release(600.0), ReleaseOutcome::Fling(600.0));

        gesture.on_press();
        gesture.on_move(20);
        assert_eq!(gesture.on_release(-20000.0), ReleaseOutcome::Fling(-8000.0));
    }

    #[test]
    fn test_velocity_tracker_smooths_toward_instantaneous() {
        let mut tracker = VelocityTracker::new();
        let t0 = Instant::now();
        tracker.push(0.0, t0);
        // 10px every 10ms is 1000 px/s
        for i in 1..=20 {
            tracker.push(10.0, t0 + Duration::from_millis(10 * i));
        }
        assert!((tracker.velocity() - 1000.0).abs() < 1.0);
    }

    #[test]
    fn test_velocity_tracker_first_sample_and_reset() {
        let mut tracker = VelocityTracker::new();
        let t0 = Instant::now();
        tracker.push(50.0, t0);
        assert_eq!(tracker.velocity(), 0.0);

        tracker.push(10.0, t0 + Duration::from_millis(10));
        assert!(tracker.velocity() > 0.0);

        tracker.reset();
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn test_velocity_tracker_ignores_same_instant() {
        let mut tracker = VelocityTracker::new();
        let t0 = Instant::now();
        tracker.push(0.0, t0);
        tracker.push(100.0, t0);
        assert_eq!(tracker.velocity(), 0.0);
    }
}
