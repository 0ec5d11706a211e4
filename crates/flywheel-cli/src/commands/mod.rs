pub mod config;
pub mod pick;
pub mod simulate;
pub mod tui;
