//! Date/time picker: five wheels wired to calendar fields.
//!
//! The picker owns one wheel per field, keeps the day wheel's item
//! count in step with the selected year and month, and reports every
//! committed date change to its listeners.

mod date;

pub use date::days_in_month;

use std::time::Instant;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::items::NumericSource;
use crate::wheel::Wheel;

/// One calendar field, backed by one wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl PickerField {
    pub const ALL: [PickerField; 5] = [
        PickerField::Year,
        PickerField::Month,
        PickerField::Day,
        PickerField::Hour,
        PickerField::Minute,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PickerField::Year => "Year",
            PickerField::Month => "Month",
            PickerField::Day => "Day",
            PickerField::Hour => "Hour",
            PickerField::Minute => "Minute",
        }
    }

    fn index(self) -> usize {
        match self {
            PickerField::Year => 0,
            PickerField::Month => 1,
            PickerField::Day => 2,
            PickerField::Hour => 3,
            PickerField::Minute => 4,
        }
    }
}

/// Which wheels the picker shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PickerMode {
    YmdHm,
    YmdH,
    Ymd,
    Ym,
    Y,
    Hm,
}

impl PickerMode {
    pub fn fields(&self) -> &'static [PickerField] {
        match self {
            PickerMode::YmdHm => &[
                PickerField::Year,
                PickerField::Month,
                PickerField::Day,
                PickerField::Hour,
                PickerField::Minute,
            ],
            PickerMode::YmdH => &[
                PickerField::Year,
                PickerField::Month,
                PickerField::Day,
                PickerField::Hour,
            ],
            PickerMode::Ymd => &[PickerField::Year, PickerField::Month, PickerField::Day],
            PickerMode::Ym => &[PickerField::Year, PickerField::Month],
            PickerMode::Y => &[PickerField::Year],
            PickerMode::Hm => &[PickerField::Hour, PickerField::Minute],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PickerMode::YmdHm => "ymd-hm",
            PickerMode::YmdH => "ymd-h",
            PickerMode::Ymd => "ymd",
            PickerMode::Ym => "ym",
            PickerMode::Y => "y",
            PickerMode::Hm => "hm",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            PickerMode::YmdHm => PickerMode::YmdH,
            PickerMode::YmdH => PickerMode::Ymd,
            PickerMode::Ymd => PickerMode::Ym,
            PickerMode::Ym => PickerMode::Y,
            PickerMode::Y => PickerMode::Hm,
            PickerMode::Hm => PickerMode::YmdHm,
        }
    }
}

/// Handle returned by date listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateListenerId(u64);

type DateListenerFn = Box<dyn FnMut(NaiveDateTime)>;

/// Five wheels composed into a date/time selector.
pub struct DatePicker {
    wheels: [Wheel; 5],
    mode: PickerMode,
    min_year: i32,
    max_year: i32,
    date_listeners: Vec<(DateListenerId, DateListenerFn)>,
    next_listener_id: u64,
    last_notified: Option<NaiveDateTime>,
}

impl DatePicker {
    pub fn new(config: &AppConfig) -> Self {
        let mut min_year = config.picker.min_year;
        let mut max_year = config.picker.max_year;
        if min_year > max_year {
            warn!(min_year, max_year, "inverted year range, swapping");
            std::mem::swap(&mut min_year, &mut max_year);
        }

        let mut picker = Self {
            wheels: std::array::from_fn(|_| Wheel::new(config.wheel.clone())),
            mode: config.picker.mode,
            min_year,
            max_year,
            date_listeners: Vec::new(),
            next_listener_id: 0,
            last_notified: None,
        };
        picker.init_sources();
        picker.last_notified = picker.date();
        picker
    }

    fn init_sources(&mut self) {
        let (min_year, max_year) = (self.min_year, self.max_year);
        self.wheel_mut(PickerField::Year)
            .set_source(Box::new(NumericSource::new(min_year, max_year)));

        let month = self.wheel_mut(PickerField::Month);
        month.set_source(Box::new(NumericSource::zero_padded(1, 12, 2)));
        month.set_cyclic(true);

        let days = date::days_in_month(min_year, 1).unwrap_or(31);
        let day = self.wheel_mut(PickerField::Day);
        day.set_source(Box::new(NumericSource::zero_padded(1, days as i32, 2)));
        day.set_cyclic(true);

        let hour = self.wheel_mut(PickerField::Hour);
        hour.set_source(Box::new(NumericSource::zero_padded(0, 23, 2)));
        hour.set_cyclic(true);

        let minute = self.wheel_mut(PickerField::Minute);
        minute.set_source(Box::new(NumericSource::zero_padded(0, 59, 2)));
        minute.set_cyclic(true);
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PickerMode) {
        if self.mode != mode {
            info!(mode = mode.name(), "picker mode set");
        }
        self.mode = mode;
    }

    /// Fields visible in the current mode, in display order.
    pub fn fields(&self) -> &'static [PickerField] {
        self.mode.fields()
    }

    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    pub fn max_year(&self) -> i32 {
        self.max_year
    }

    pub fn wheel(&self, field: PickerField) -> &Wheel {
        &self.wheels[field.index()]
    }

    pub fn wheel_mut(&mut self, field: PickerField) -> &mut Wheel {
        &mut self.wheels[field.index()]
    }

    pub fn on_press(&mut self, field: PickerField) {
        self.wheel_mut(field).on_press();
    }

    pub fn on_move(&mut self, field: PickerField, delta_y: i32) {
        self.wheel_mut(field).on_move(delta_y);
        self.after_interaction();
    }

    pub fn on_release(&mut self, field: PickerField, velocity_y: f64, now: Instant) {
        self.wheel_mut(field).on_release(velocity_y, now);
        self.after_interaction();
    }

    /// Move a field by a number of items. Cyclic fields wrap;
    /// non-cyclic ones stop at their edges.
    pub fn step(&mut self, field: PickerField, steps: i64, animated: bool, now: Instant) {
        let wheel = self.wheel_mut(field);
        let count = wheel.item_count();
        if count == 0 {
            return;
        }
        let mut target = wheel.position() as i64 + steps;
        if !wheel.is_cyclic() {
            target = target.clamp(0, count as i64 - 1);
        }
        wheel.set_position(target, animated, now);
        self.after_interaction();
    }

    /// Advance every wheel's animation. Returns whether any motion
    /// remains.
    pub fn tick_all(&mut self, now: Instant) -> bool {
        let mut running = false;
        for wheel in &mut self.wheels {
            if wheel.tick(now) {
                running = true;
            }
        }
        self.after_interaction();
        running
    }

    pub fn needs_tick(&self) -> bool {
        self.wheels.iter().any(|wheel| wheel.needs_tick())
    }

    /// The currently committed date. Fields hidden by the mode still
    /// contribute their committed values.
    pub fn date(&self) -> Option<NaiveDateTime> {
        let year = self.min_year + self.wheel(PickerField::Year).position() as i32;
        let month = self.wheel(PickerField::Month).position() as u32 + 1;
        let day = self.wheel(PickerField::Day).position() as u32 + 1;
        let hour = self.wheel(PickerField::Hour).position() as u32;
        let minute = self.wheel(PickerField::Minute).position() as u32;

        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        Some(NaiveDateTime::new(date, time))
    }

    /// Move every wheel to the given date. Years outside the
    /// configured range are clamped.
    pub fn set_date(&mut self, target: NaiveDateTime, animated: bool, now: Instant) {
        let mut year = target.year();
        if year < self.min_year || year > self.max_year {
            warn!(year, "requested year outside range, clamping");
            year = year.clamp(self.min_year, self.max_year);
        }

        let year_pos = (year - self.min_year) as i64;
        self.wheel_mut(PickerField::Year)
            .set_position(year_pos, animated, now);
        self.wheel_mut(PickerField::Month)
            .set_position(target.month() as i64 - 1, animated, now);

        // Size the day wheel for the target month up front so the day
        // index lands without wrapping
        let days = date::days_in_month(year, target.month()).unwrap_or(31);
        if self.wheel(PickerField::Day).item_count() != days as usize {
            self.wheel_mut(PickerField::Day)
                .set_source(Box::new(NumericSource::zero_padded(1, days as i32, 2)));
        }
        let day = target.day().min(days);
        self.wheel_mut(PickerField::Day)
            .set_position(day as i64 - 1, animated, now);

        self.wheel_mut(PickerField::Hour)
            .set_position(target.hour() as i64, animated, now);
        self.wheel_mut(PickerField::Minute)
            .set_position(target.minute() as i64, animated, now);

        self.notify_if_date_changed();
    }

    /// Replace the selectable year span, keeping the selected year
    /// where possible.
    pub fn set_year_range(&mut self, min_year: i32, max_year: i32, now: Instant) {
        let (min_year, max_year) = if min_year <= max_year {
            (min_year, max_year)
        } else {
            (max_year, min_year)
        };

        info!(min_year, max_year, "year range set");
        let current_year = self.min_year + self.wheel(PickerField::Year).position() as i32;
        self.min_year = min_year;
        self.max_year = max_year;

        self.wheel_mut(PickerField::Year)
            .set_source(Box::new(NumericSource::new(min_year, max_year)));
        let target = (current_year.clamp(min_year, max_year) - min_year) as i64;
        self.wheel_mut(PickerField::Year)
            .set_position(target, false, now);

        self.after_interaction();
    }

    pub fn add_date_listener(
        &mut self,
        listener: impl FnMut(NaiveDateTime) + 'static,
    ) -> DateListenerId {
        self.next_listener_id += 1;
        let id = DateListenerId(self.next_listener_id);
        self.date_listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_date_listener(&mut self, id: DateListenerId) -> bool {
        let before = self.date_listeners.len();
        self.date_listeners.retain(|(lid, _)| *lid != id);
        before != self.date_listeners.len()
    }

    fn after_interaction(&mut self) {
        self.refresh_day_count();
        self.notify_if_date_changed();
    }

    /// Keep the day wheel's count in step with the committed year and
    /// month. Deferred while either is still animating so an in-flight
    /// day target isn't revalidated against a stale month.
    fn refresh_day_count(&mut self) {
        if self.wheel(PickerField::Year).is_animating()
            || self.wheel(PickerField::Month).is_animating()
        {
            return;
        }

        let year = self.min_year + self.wheel(PickerField::Year).position() as i32;
        let month = self.wheel(PickerField::Month).position() as u32 + 1;
        let Some(days) = date::days_in_month(year, month) else {
            return;
        };

        if self.wheel(PickerField::Day).item_count() != days as usize {
            self.wheel_mut(PickerField::Day)
                .set_source(Box::new(NumericSource::zero_padded(1, days as i32, 2)));
        }
    }

    fn notify_if_date_changed(&mut self) {
        let Some(date) = self.date() else {
            return;
        };
        if self.last_notified == Some(date) {
            return;
        }
        self.last_notified = Some(date);
        for (_, listener) in &mut self.date_listeners {
            listener(date);
        }
    }
}
