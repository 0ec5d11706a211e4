//! The scrolling wheel engine.
//!
//! A [`Wheel`] owns a committed selection, a sub-item pixel remainder
//! and at most one active motion trajectory. Pointer input and
//! animation ticks both funnel through the same stepping arithmetic,
//! so every committed index change fires the changed listeners exactly
//! once no matter how the wheel got there.
//!
//! The engine is single-threaded and clock-agnostic: the host calls
//! [`Wheel::tick`] with its own notion of "now" for as long as
//! [`Wheel::needs_tick`] says motion remains.

mod gesture;
mod listener;
mod physics;
mod position;
mod scheduler;
mod timing;
mod trajectory;

pub use gesture::VelocityTracker;
pub use listener::{ListenerId, ScrollPhase};

use std::time::Instant;

use tracing::debug;

use crate::config::WheelConfig;
use crate::items::ItemSource;

use gesture::{GestureAdapter, MoveOutcome, ReleaseOutcome};
use listener::ListenerBus;
use physics::ScrollState;
use position::PositionModel;
use scheduler::{AnimationPhase, Scheduler};
use trajectory::Trajectory;

/// Everything a renderer needs to draw the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSnapshot {
    pub selected_index: usize,
    /// Sub-item scroll remainder in pixels; zero once settled.
    pub pixel_remainder: i32,
    pub item_height: i32,
    pub visible_count: usize,
}

/// An interactive wheel selector.
pub struct Wheel {
    position: PositionModel,
    scroll: ScrollState,
    scheduler: Scheduler,
    gesture: GestureAdapter,
    listeners: ListenerBus,
    source: Option<Box<dyn ItemSource>>,
    config: WheelConfig,
    is_scrolling: bool,
    invalidated: bool,
}

impl Wheel {
    pub fn new(config: WheelConfig) -> Self {
        Self {
            position: PositionModel::new(0, false),
            scroll: ScrollState {
                offset: 0,
                item_height: config.item_height,
            },
            scheduler: Scheduler::new(),
            gesture: GestureAdapter::new(&config),
            listeners: ListenerBus::new(),
            source: None,
            config,
            is_scrolling: false,
            invalidated: false,
        }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Replace the tuning. Re-seeds the item height and gesture
    /// thresholds from the new values.
    pub fn set_config(&mut self, config: WheelConfig) {
        self.scroll.item_height = config.item_height;
        self.gesture = GestureAdapter::new(&config);
        self.config = config;
        self.invalidated = true;
    }

    /// Attach the item source. The item count follows the source; an
    /// empty source leaves the previous count in place (rows render
    /// blank) per the zero-count no-op policy.
    pub fn set_source(&mut self, source: Box<dyn ItemSource>) {
        let count = source.count();
        self.source = Some(source);
        self.invalidated = true;
        self.set_item_count(count);
    }

    pub fn item_text(&self, index: usize) -> Option<String> {
        self.source.as_ref()?.text(index)
    }

    pub fn max_text_len(&self) -> usize {
        self.source.as_ref().map(|s| s.max_text_len()).unwrap_or(0)
    }

    pub fn item_count(&self) -> usize {
        self.position.count()
    }

    /// Change the item count, revalidating the selection (wrap when
    /// cyclic, clamp otherwise). Cancels any running animation and
    /// closes an active scroll burst. Zero is a no-op.
    pub fn set_item_count(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.scheduler.cancel();
        let change = self.position.set_count(count);
        self.invalidated = true;
        if let Some((old, new)) = change {
            self.listeners.notify_changed(old, new);
        }
        self.finish_scrolling();
    }

    pub fn is_cyclic(&self) -> bool {
        self.position.is_cyclic()
    }

    pub fn set_cyclic(&mut self, cyclic: bool) {
        if self.position.is_cyclic() == cyclic {
            return;
        }
        self.position.set_cyclic(cyclic);
        self.invalidated = true;
    }

    pub fn position(&self) -> usize {
        self.position.selected()
    }

    /// Select an index. Out-of-range values wrap on cyclic wheels and
    /// are ignored on non-cyclic ones. Non-animated changes commit and
    /// notify immediately; animated ones scroll the literal index
    /// distance, then snap.
    pub fn set_position(&mut self, index: i64, animated: bool, now: Instant) {
        let Some(target) = self.position.normalize(index) else {
            debug!(index, "position request out of range, ignoring");
            return;
        };
        if target == self.position.selected() {
            return;
        }

        self.scheduler.cancel();

        if !animated || self.scroll.item_height <= 0 {
            let old = self.position.selected();
            self.position.commit(target);
            self.invalidated = true;
            self.listeners.notify_changed(old, target);
            self.finish_scrolling();
            return;
        }

        debug!(target, "starting animated scroll");
        self.start_scrolling();
        let from = self.travel_position();
        let to = target as i64 * self.scroll.item_height as i64;
        let trajectory = Trajectory::eased(
            from,
            to,
            now,
            self.config.scrolling_duration(),
            self.config.easing,
        );
        self.scheduler
            .start(trajectory, AnimationPhase::Travel, self.min_delta());
    }

    pub fn item_height(&self) -> i32 {
        self.scroll.item_height
    }

    /// Supply the measured item height. Until a positive height is set
    /// the engine ignores gesture input.
    pub fn set_item_height(&mut self, height: i32) {
        if self.scroll.item_height == height {
            return;
        }
        self.scroll.item_height = height;
        self.invalidated = true;
    }

    /// Pointer went down. Stops any running animation in place; the
    /// interrupted burst stays open until the wheel settles again.
    pub fn on_press(&mut self) {
        self.gesture.on_press();
        self.scheduler.cancel();
    }

    /// Pointer moved while down. `delta_y` is positive when the
    /// pointer moved up.
    pub fn on_move(&mut self, delta_y: i32) {
        if self.scroll.item_height <= 0 || self.position.count() == 0 {
            return;
        }
        match self.gesture.on_move(delta_y) {
            MoveOutcome::Ignored => {}
            MoveOutcome::Started(delta) | MoveOutcome::Dragged(delta) => {
                self.start_scrolling();
                self.apply_scroll(delta as i64, false);
            }
        }
    }

    /// Pointer went up. `velocity_y` is the release velocity in px/s,
    /// positive-up. Fast releases fling; everything else settles onto
    /// the nearest item boundary.
    pub fn on_release(&mut self, velocity_y: f64, now: Instant) {
        if self.scroll.item_height <= 0 || self.position.count() == 0 {
            self.gesture.reset();
            return;
        }
        match self.gesture.on_release(velocity_y) {
            ReleaseOutcome::Fling(velocity) => {
                let h = self.scroll.item_height as i64;
                let bounds = if self.position.is_cyclic() {
                    None
                } else {
                    Some((0, (self.position.count() as i64 - 1) * h))
                };
                debug!(velocity, "starting fling");
                let trajectory = Trajectory::fling(
                    self.travel_position(),
                    velocity,
                    self.config.fling_deceleration,
                    now,
                    bounds,
                );
                self.scheduler
                    .start(trajectory, AnimationPhase::Travel, self.min_delta());
            }
            ReleaseOutcome::Tap | ReleaseOutcome::Justify => self.justify(now),
        }
    }

    /// Advance any active animation to `now`, committing index changes
    /// along the way. Returns whether motion remains.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(step) = self.scheduler.step(now) {
            if step.delta != 0 {
                self.apply_scroll(step.delta, true);
            }
            match step.finished {
                Some(AnimationPhase::Travel) => self.justify(now),
                Some(AnimationPhase::Settle) => self.finish_scrolling(),
                None => {}
            }
        }
        self.scheduler.is_active()
    }

    pub fn needs_tick(&self) -> bool {
        self.scheduler.is_active()
    }

    pub fn is_animating(&self) -> bool {
        self.scheduler.is_active()
    }

    /// Whether a scroll burst is open (started fired, finished pending).
    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Bumped whenever the active trajectory is replaced, cancelled or
    /// finished; hosts scheduling delayed ticks can compare it to drop
    /// stale ones.
    pub fn generation(&self) -> u64 {
        self.scheduler.generation()
    }

    pub fn add_changed_listener(
        &mut self,
        listener: impl FnMut(usize, usize) + 'static,
    ) -> ListenerId {
        self.listeners.add_changed(Box::new(listener))
    }

    pub fn add_scroll_listener(
        &mut self,
        listener: impl FnMut(ScrollPhase) + 'static,
    ) -> ListenerId {
        self.listeners.add_scroll(Box::new(listener))
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            selected_index: self.position.selected(),
            pixel_remainder: self.scroll.offset,
            item_height: self.scroll.item_height,
            visible_count: self.config.visible_items,
        }
    }

    /// Read and clear the redraw flag.
    pub fn take_invalidated(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    /// Absolute travel coordinate: `index * height - remainder`.
    /// Trajectories run in this space, so cyclic wrapping of the
    /// committed index never makes a curve discontinuous.
    fn travel_position(&self) -> i64 {
        self.position.selected() as i64 * self.scroll.item_height as i64
            - self.scroll.offset as i64
    }

    fn min_delta(&self) -> i64 {
        self.config.min_scroll_delta.max(1) as i64
    }

    fn apply_scroll(&mut self, delta: i64, animating: bool) {
        let outcome = physics::apply_delta(&mut self.scroll, &mut self.position, delta, animating);
        if outcome.moved {
            self.invalidated = true;
        }
        if let Some((old, new)) = outcome.committed {
            debug!(old, new, "index committed");
            self.listeners.notify_changed(old, new);
        }
    }

    /// Settle the carried remainder onto an item boundary: start the
    /// snap trajectory, or finish right away when the distance is
    /// within the minimum-motion threshold. A wheel already at rest
    /// stays silent.
    fn justify(&mut self, now: Instant) {
        if self.scroll.item_height <= 0 || self.position.count() == 0 {
            self.finish_scrolling();
            return;
        }

        let snap = physics::snap_delta(&self.scroll, &self.position);
        if snap.abs() <= self.config.min_scroll_delta as i64 {
            self.finish_scrolling();
            return;
        }

        let from = self.travel_position();
        let trajectory = Trajectory::eased(
            from,
            from - snap,
            now,
            self.config.scrolling_duration(),
            self.config.easing,
        );
        self.scheduler
            .start(trajectory, AnimationPhase::Settle, self.min_delta());
    }

    fn start_scrolling(&mut self) {
        if !self.is_scrolling {
            self.is_scrolling = true;
            self.listeners.notify_scroll(ScrollPhase::Started);
        }
    }

    fn finish_scrolling(&mut self) {
        if self.scroll.offset != 0 {
            self.scroll.offset = 0;
            self.invalidated = true;
        }
        if self.is_scrolling {
            self.is_scrolling = false;
            self.listeners.notify_scroll(ScrollPhase::Finished);
        }
    }
}
