//! Core engine for the Flywheel picker: the scrolling wheel state
//! machine, item sources and the date/time picker composition.

pub mod config;
pub mod easing;
pub mod error;
pub mod items;
pub mod picker;
pub mod wheel;

pub use config::{AppConfig, PickerConfig, UiConfig, WheelConfig};
pub use easing::EasingKind;
pub use error::{Error, Result};
pub use items::{ItemSource, LabelSource, NumericSource};
pub use picker::{DateListenerId, DatePicker, PickerField, PickerMode};
pub use wheel::{ListenerId, RenderSnapshot, ScrollPhase, VelocityTracker, Wheel};
