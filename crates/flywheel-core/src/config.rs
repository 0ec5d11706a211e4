use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::easing::EasingKind;
use crate::error::{Error, Result};
use crate::picker::PickerMode;

/// Application configuration, loaded from `~/.config/flywheel/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub wheel: WheelConfig,

    #[serde(default)]
    pub picker: PickerConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Tuning for a single wheel: geometry, gesture thresholds and animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Number of rows shown at once. Odd values keep the selection centered.
    #[serde(default = "default_visible_items")]
    pub visible_items: usize,

    /// Height of one item in pixels.
    #[serde(default = "default_item_height")]
    pub item_height: i32,

    /// Duration of snap and programmatic scroll animations in milliseconds.
    #[serde(default = "default_scrolling_duration_ms")]
    pub scrolling_duration_ms: u64,

    /// Animated deltas smaller than this settle immediately.
    #[serde(default = "default_min_scroll_delta")]
    pub min_scroll_delta: i32,

    /// Pointer travel in pixels before a press becomes a drag.
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f64,

    /// Release velocities below this (px/s) justify instead of flinging.
    #[serde(default = "default_fling_min_velocity")]
    pub fling_min_velocity: f64,

    /// Release velocities are clamped to this magnitude (px/s).
    #[serde(default = "default_fling_max_velocity")]
    pub fling_max_velocity: f64,

    /// Constant deceleration applied to flings (px/s²).
    #[serde(default = "default_fling_deceleration")]
    pub fling_deceleration: f64,

    /// Easing curve for snap and programmatic scrolls.
    #[serde(default = "default_easing")]
    pub easing: EasingKind,

    /// Target animation frame rate.
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u16,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            visible_items: default_visible_items(),
            item_height: default_item_height(),
            scrolling_duration_ms: default_scrolling_duration_ms(),
            min_scroll_delta: default_min_scroll_delta(),
            drag_threshold: default_drag_threshold(),
            fling_min_velocity: default_fling_min_velocity(),
            fling_max_velocity: default_fling_max_velocity(),
            fling_deceleration: default_fling_deceleration(),
            easing: default_easing(),
            animation_fps: default_animation_fps(),
        }
    }
}

impl WheelConfig {
    /// Duration of snap and programmatic scroll animations.
    pub fn scrolling_duration(&self) -> Duration {
        Duration::from_millis(self.scrolling_duration_ms)
    }

    /// Interval between animation frames.
    pub fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            return Duration::from_millis(16);
        }
        Duration::from_millis(1000 / self.animation_fps as u64)
    }
}

/// Date picker defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerConfig {
    /// First selectable year.
    #[serde(default = "default_min_year")]
    pub min_year: i32,

    /// Last selectable year.
    #[serde(default = "default_max_year")]
    pub max_year: i32,

    /// Which wheels the picker shows.
    #[serde(default = "default_mode")]
    pub mode: PickerMode,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
            max_year: default_max_year(),
            mode: default_mode(),
        }
    }
}

/// Terminal front end tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle event poll interval in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Terminal rows of pointer travel that equal one item of scroll.
    #[serde(default = "default_drag_rows_per_item")]
    pub drag_rows_per_item: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            drag_rows_per_item: default_drag_rows_per_item(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path, or return defaults if
    /// the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: AppConfig =
                toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(AppConfig::default())
        }
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Path to the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;
        Ok(home.join(".config").join("flywheel").join("config.toml"))
    }
}

fn default_visible_items() -> usize {
    5
}

fn default_item_height() -> i32 {
    48
}

fn default_scrolling_duration_ms() -> u64 {
    300
}

fn default_min_scroll_delta() -> i32 {
    1
}

fn default_drag_threshold() -> f64 {
    8.0
}

fn default_fling_min_velocity() -> f64 {
    50.0
}

fn default_fling_max_velocity() -> f64 {
    8000.0
}

fn default_fling_deceleration() -> f64 {
    2400.0
}

fn default_easing() -> EasingKind {
    EasingKind::Cubic
}

fn default_animation_fps() -> u16 {
    60
}

fn default_min_year() -> i32 {
    1970
}

fn default_max_year() -> i32 {
    2100
}

fn default_mode() -> PickerMode {
    PickerMode::YmdHm
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_drag_rows_per_item() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.wheel.visible_items, 5);
        assert_eq!(config.wheel.item_height, 48);
        assert_eq!(config.wheel.scrolling_duration_ms, 300);
        assert_eq!(config.picker.min_year, 1970);
        assert_eq!(config.picker.max_year, 2100);
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml_str = r#"
            [wheel]
            item_height = 64
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.wheel.item_height, 64);
        assert_eq!(config.wheel.visible_items, 5);
        assert_eq!(config.picker.max_year, 2100);
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.wheel.item_height, config.wheel.item_height);
        assert_eq!(parsed.picker.mode, config.picker.mode);
    }

    #[test]
    fn test_animation_tick_duration() {
        let mut wheel = WheelConfig::default();
        assert_eq!(wheel.animation_tick_duration(), Duration::from_millis(16));
        wheel.animation_fps = 0;
        assert_eq!(wheel.animation_tick_duration(), Duration::from_millis(16));
        wheel.animation_fps = 50;
        assert_eq!(wheel.animation_tick_duration(), Duration::from_millis(20));
    }
}
