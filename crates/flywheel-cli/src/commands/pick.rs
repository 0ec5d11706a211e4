use std::time::Instant;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use flywheel_core::{AppConfig, DatePicker, PickerField, PickerMode};

pub fn run(
    config: &AppConfig,
    date: Option<&str>,
    field: PickerField,
    steps: i64,
    mode: PickerMode,
) -> Result<()> {
    let mut config = config.clone();
    config.picker.mode = mode;

    let now = Instant::now();
    let mut picker = DatePicker::new(&config);

    if let Some(raw) = date {
        let target =
            parse_date(raw).ok_or_else(|| anyhow::anyhow!("unrecognized date: {raw}"))?;
        picker.set_date(target, false, now);
    }

    if steps != 0 {
        picker.step(field, steps, false, now);
    }

    match picker.date() {
        Some(date) => println!("{}", format_for_mode(date, mode)),
        None => anyhow::bail!("picker holds no valid date"),
    }
    Ok(())
}

/// Accept "YYYY-MM-DD HH:MM" or a bare "YYYY-MM-DD"
fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M") {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn format_for_mode(date: NaiveDateTime, mode: PickerMode) -> String {
    let fmt = match mode {
        PickerMode::YmdHm => "%Y-%m-%d %H:%M",
        PickerMode::YmdH => "%Y-%m-%d %H:00",
        PickerMode::Ymd => "%Y-%m-%d",
        PickerMode::Ym => "%Y-%m",
        PickerMode::Y => "%Y",
        PickerMode::Hm => "%H:%M",
    };
    date.format(fmt).to_string()
}
