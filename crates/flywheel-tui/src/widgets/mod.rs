mod picker_view;
mod status_bar;
mod wheel_column;

pub use picker_view::PickerWidget;
pub use status_bar::StatusBarWidget;
pub use wheel_column::WheelColumnWidget;
