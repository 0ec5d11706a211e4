//! Cooperative animation driver.
//!
//! Holds at most one active trajectory. Each `step` samples it at the
//! caller's clock and reports the pixel delta since the previous
//! sample; the wheel feeds that into its stepping arithmetic. Samples
//! within the minimum-delta tolerance of the end value force the
//! trajectory to its end instead of chasing an asymptotic tail.
//!
//! Starting or cancelling bumps a generation counter, so externally
//! scheduled ticks can detect that the trajectory they were queued for
//! is gone.

use std::time::Instant;

use super::trajectory::Trajectory;

/// Which kind of motion the trajectory is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnimationPhase {
    /// A fling or programmatic scroll; chains into a snap when done.
    Travel,
    /// The final snap onto an item boundary.
    Settle,
}

/// One scheduler advance.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SchedulerStep {
    /// Pixel delta since the previous sample.
    pub delta: i64,
    /// Set when the trajectory ended on this step.
    pub finished: Option<AnimationPhase>,
}

struct ActiveTrajectory {
    trajectory: Trajectory,
    phase: AnimationPhase,
    last_sample: i64,
    min_delta: i64,
}

pub(crate) struct Scheduler {
    active: Option<ActiveTrajectory>,
    generation: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            active: None,
            generation: 0,
        }
    }

    /// Replace any active trajectory with a new one.
    pub fn start(&mut self, trajectory: Trajectory, phase: AnimationPhase, min_delta: i64) {
        self.generation += 1;
        let last_sample = trajectory.start_value();
        self.active = Some(ActiveTrajectory {
            trajectory,
            phase,
            last_sample,
            min_delta: min_delta.max(1),
        });
    }

    /// Drop the active trajectory, invalidating any tick queued for it.
    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            self.generation += 1;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Monotonic counter, bumped whenever the active trajectory is
    /// replaced, cancelled or finished. A tick scheduled under an older
    /// generation must not run.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance the active trajectory to `now`. Returns `None` when
    /// idle.
    pub fn step(&mut self, now: Instant) -> Option<SchedulerStep> {
        let active = self.active.as_mut()?;

        let mut sampled = active.trajectory.sample(now);
        let end = active.trajectory.end_value();
        let mut finished = active.trajectory.is_complete(now);
        if (sampled - end).abs() < active.min_delta {
            sampled = end;
            finished = true;
        }

        let delta = active.last_sample - sampled;
        active.last_sample = sampled;

        if finished {
            let phase = active.phase;
            self.active = None;
            self.generation += 1;
            Some(SchedulerStep {
                delta,
                finished: Some(phase),
            })
        } else {
            Some(SchedulerStep {
                delta,
                finished: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::EasingKind;
    use std::time::Duration;

    #[test]
    fn test_step_when_idle_is_none() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.step(Instant::now()).is_none());
        assert!(!scheduler.is_active());
    }

    #[test]
    fn test_deltas_telescope_to_full_travel() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();
        let trajectory =
            Trajectory::eased(0, 100, t0, Duration::from_millis(100), EasingKind::Linear);
        scheduler.start(trajectory, AnimationPhase::Settle, 1);

        let mut total = 0;
        let mut finished = None;
        for ms in [25, 50, 75, 100] {
            let step = scheduler.step(t0 + Duration::from_millis(ms)).unwrap();
            total += step.delta;
            finished = step.finished;
        }

        // Position deltas are emitted as last - sampled
        assert_eq!(total, -100);
        assert_eq!(finished, Some(AnimationPhase::Settle));
        assert!(!scheduler.is_active());
    }

    #[test]
    fn test_near_end_sample_forces_convergence() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();
        // Cubic ease-out hugs the end value well before the duration elapses
        let trajectory =
            Trajectory::eased(0, 10, t0, Duration::from_millis(300), EasingKind::Cubic);
        scheduler.start(trajectory, AnimationPhase::Travel, 1);

        let step = scheduler.step(t0 + Duration::from_millis(280)).unwrap();
        assert_eq!(step.finished, Some(AnimationPhase::Travel));
        assert_eq!(step.delta, -10);
        assert!(!scheduler.is_active());
    }

    #[test]
    fn test_cancel_discards_trajectory_and_bumps_generation() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();
        let trajectory =
            Trajectory::eased(0, 100, t0, Duration::from_millis(100), EasingKind::Linear);
        scheduler.start(trajectory, AnimationPhase::Travel, 1);
        let generation = scheduler.generation();

        scheduler.cancel();
        assert!(scheduler.generation() > generation);
        assert!(scheduler.step(t0 + Duration::from_millis(50)).is_none());

        // Cancelling while idle changes nothing
        let generation = scheduler.generation();
        scheduler.cancel();
        assert_eq!(scheduler.generation(), generation);
    }

    #[test]
    fn test_replacing_trajectory_restarts_sampling() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();
        scheduler.start(
            Trajectory::eased(0, 100, t0, Duration::from_millis(100), EasingKind::Linear),
            AnimationPhase::Travel,
            1,
        );
        scheduler.step(t0 + Duration::from_millis(50)).unwrap();

        // New trajectory's first delta is relative to its own start value
        scheduler.start(
            Trajectory::eased(200, 300, t0, Duration::from_millis(100), EasingKind::Linear),
            AnimationPhase::Settle,
            1,
        );
        let step = scheduler.step(t0 + Duration::from_millis(50)).unwrap();
        assert_eq!(step.delta, -50);
    }

    #[test]
    fn test_finishing_bumps_generation() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();
        scheduler.start(
            Trajectory::eased(0, 10, t0, Duration::from_millis(50), EasingKind::Linear),
            AnimationPhase::Settle,
            1,
        );
        let generation = scheduler.generation();
        scheduler.step(t0 + Duration::from_millis(50)).unwrap();
        assert!(scheduler.generation() > generation);
    }
}
