use std::time::Instant;

use chrono::{Local, NaiveDateTime, Timelike};
use flywheel_core::{AppConfig, DatePicker, PickerField, ScrollPhase, VelocityTracker};
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc;

use crate::theme::Theme;

/// An in-progress pointer drag captured by one wheel
struct DragCapture {
    /// Wheel that owns the gesture until release
    field: PickerField,
    /// Terminal row of the previous pointer sample
    last_row: u16,
}

/// Listener events funneled out of the picker into the UI loop
enum PickerEvent {
    Picked(NaiveDateTime),
    Scroll(PickerField, ScrollPhase),
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: AppConfig,
    /// The multi-wheel date picker
    pub picker: DatePicker,
    /// Color theme
    pub theme: Theme,
    /// Field with keyboard focus
    pub focus: PickerField,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Most recent committed date, shown in the status bar
    pub last_picked: Option<NaiveDateTime>,
    /// Most recent scroll-lifecycle event, shown in the status bar
    pub last_scroll: Option<String>,
    /// Screen region of each visible wheel, refreshed on every draw
    pub wheel_areas: Vec<(PickerField, Rect)>,
    drag: Option<DragCapture>,
    velocity: VelocityTracker,
    events_rx: mpsc::UnboundedReceiver<PickerEvent>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let mut picker = DatePicker::new(&config);
        let (event_tx, events_rx) = mpsc::unbounded_channel();

        let date_tx = event_tx.clone();
        picker.add_date_listener(move |date| {
            let _ = date_tx.send(PickerEvent::Picked(date));
        });
        for field in PickerField::ALL {
            let scroll_tx = event_tx.clone();
            picker.wheel_mut(field).add_scroll_listener(move |phase| {
                let _ = scroll_tx.send(PickerEvent::Scroll(field, phase));
            });
        }

        let focus = picker.fields()[0];
        Self {
            config,
            picker,
            theme: Theme::default(),
            focus,
            should_quit: false,
            last_picked: None,
            last_scroll: None,
            wheel_areas: Vec::new(),
            drag: None,
            velocity: VelocityTracker::new(),
            events_rx,
        }
    }

    /// Move keyboard focus to the next wheel in the current mode
    pub fn focus_next(&mut self) {
        let fields = self.picker.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + 1) % fields.len()];
    }

    /// Move keyboard focus to the previous wheel in the current mode
    pub fn focus_prev(&mut self) {
        let fields = self.picker.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + fields.len() - 1) % fields.len()];
    }

    /// Step the focused wheel by the given number of items
    pub fn step_focused(&mut self, steps: i64, now: Instant) {
        self.picker.step(self.focus, steps, true, now);
    }

    /// Toggle wrap-around on the focused wheel
    pub fn toggle_cyclic(&mut self) {
        let wheel = self.picker.wheel_mut(self.focus);
        let cyclic = wheel.is_cyclic();
        wheel.set_cyclic(!cyclic);
    }

    /// Switch the picker to the next field layout
    pub fn cycle_mode(&mut self) {
        let mode = self.picker.mode().next();
        tracing::debug!("picker mode -> {}", mode.name());
        self.picker.set_mode(mode);
        let fields = self.picker.fields();
        if !fields.contains(&self.focus) {
            self.focus = fields[0];
        }
    }

    /// Animate the picker to the current local date and time
    pub fn set_today(&mut self, now: Instant) {
        let local = Local::now().naive_local();
        if let Some(target) = local
            .date()
            .and_hms_opt(local.hour(), local.minute(), 0)
        {
            self.picker.set_date(target, true, now);
        }
    }

    /// Begin a pointer gesture on the wheel under the cursor
    pub fn pointer_down(&mut self, x: u16, y: u16, now: Instant) {
        let Some(field) = self.wheel_at(x, y) else {
            return;
        };
        self.focus = field;
        self.drag = Some(DragCapture { field, last_row: y });
        self.velocity.reset();
        self.velocity.push(0.0, now);
        self.picker.on_press(field);
    }

    /// Feed pointer travel into the wheel that captured the gesture
    pub fn pointer_move(&mut self, _x: u16, y: u16, now: Instant) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let delta_rows = drag.last_row as i32 - y as i32;
        if delta_rows == 0 {
            return;
        }
        let field = drag.field;
        drag.last_row = y;
        let delta_px = self.rows_to_px(field, delta_rows);
        self.picker.on_move(field, delta_px);
        self.velocity.push(delta_px as f64, now);
    }

    /// End the pointer gesture, handing the tracked velocity to the wheel
    pub fn pointer_up(&mut self, x: u16, y: u16, now: Instant) {
        self.pointer_move(x, y, now);
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.picker.on_release(drag.field, self.velocity.velocity(), now);
        self.velocity.reset();
    }

    /// Step the wheel under the cursor, focusing it as a side effect
    pub fn nudge_at(&mut self, x: u16, y: u16, steps: i64, now: Instant) {
        if let Some(field) = self.wheel_at(x, y) {
            self.focus = field;
            self.picker.step(field, steps, true, now);
        }
    }

    /// Advance animations and drain listener events from the picker
    pub fn on_tick(&mut self, now: Instant) {
        self.picker.tick_all(now);
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                PickerEvent::Picked(date) => self.last_picked = Some(date),
                PickerEvent::Scroll(field, phase) => {
                    let phase_str = match phase {
                        ScrollPhase::Started => "scrolling",
                        ScrollPhase::Finished => "settled",
                    };
                    self.last_scroll = Some(format!("{} {}", field.label(), phase_str));
                }
            }
        }
    }

    /// Whether the next redraw should come at animation cadence
    pub fn needs_animation(&self) -> bool {
        self.picker.needs_tick() || self.drag.is_some()
    }

    /// Whether a pointer drag is currently captured
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn wheel_at(&self, x: u16, y: u16) -> Option<PickerField> {
        self.wheel_areas
            .iter()
            .find(|(_, area)| area.contains(Position { x, y }))
            .map(|(field, _)| *field)
    }

    /// Convert terminal rows of pointer travel into wheel pixels
    fn rows_to_px(&self, field: PickerField, rows: i32) -> i32 {
        let item_height = self.picker.wheel(field).item_height();
        let rows_per_item = self.config.ui.drag_rows_per_item.max(1) as i32;
        rows.saturating_mul(item_height) / rows_per_item
    }
}
