use flywheel_core::PickerField;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// One vertical wheel of the picker
pub struct WheelColumnWidget;

impl WheelColumnWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, field: PickerField) {
        let theme = &app.theme;
        let wheel = app.picker.wheel(field);
        let snapshot = wheel.snapshot();
        let focused = app.focus == field;

        let border_color = if focused {
            theme.focused
        } else {
            theme.unfocused
        };
        let block = Block::default()
            .title(field.label())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let rows = visible_rows(snapshot.visible_count, inner.height);
        let center = rows / 2;
        let top = inner.y + (inner.height - rows as u16) / 2;
        let shift = row_shift(snapshot.pixel_remainder, snapshot.item_height);

        for slot in 0..rows {
            let raw = snapshot.selected_index as i64 + slot as i64 - center as i64 - shift;
            let index = resolve_index(raw, wheel.item_count(), wheel.is_cyclic());
            let text = index.and_then(|i| wheel.item_text(i)).unwrap_or_default();

            let row_area = Rect {
                x: inner.x,
                y: top + slot as u16,
                width: inner.width,
                height: 1,
            };

            let distance = slot.abs_diff(center);
            let paragraph = if distance == 0 {
                let fg = if focused { theme.accent } else { theme.fg0 };
                Paragraph::new(Line::from(Span::styled(
                    text,
                    Style::default().fg(fg).add_modifier(Modifier::BOLD),
                )))
                .alignment(Alignment::Center)
                .style(Style::default().bg(theme.selection))
            } else if distance == 1 {
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(theme.fg1))
            } else {
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(theme.grey1))
            };
            frame.render_widget(paragraph, row_area);
        }
    }
}

/// Number of item rows to draw: the configured window, clamped to the
/// available height and forced odd so a center row exists
fn visible_rows(visible_count: usize, inner_height: u16) -> usize {
    let rows = visible_count.max(1).min(inner_height as usize).max(1);
    if rows % 2 == 0 {
        (rows - 1).max(1)
    } else {
        rows
    }
}

/// Whole-row shift implied by the sub-item remainder
///
/// Mirrors the settle rule: past the half-item mark the column already
/// shows the neighbor the wheel will land on.
fn row_shift(pixel_remainder: i32, item_height: i32) -> i64 {
    if item_height <= 0 {
        return 0;
    }
    let rem = pixel_remainder as i64;
    if rem.abs() * 2 > item_height as i64 {
        rem.signum()
    } else {
        0
    }
}

/// Resolve a raw slot index against the wheel's item range
fn resolve_index(raw: i64, count: usize, cyclic: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    if cyclic {
        Some(raw.rem_euclid(count as i64) as usize)
    } else if (0..count as i64).contains(&raw) {
        Some(raw as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_rows_clamps_and_stays_odd() {
        assert_eq!(visible_rows(5, 10), 5);
        assert_eq!(visible_rows(5, 3), 3);
        assert_eq!(visible_rows(5, 4), 3);
        assert_eq!(visible_rows(4, 10), 3);
        assert_eq!(visible_rows(0, 10), 1);
        assert_eq!(visible_rows(5, 1), 1);
    }

    #[test]
    fn test_row_shift_matches_settle_rule() {
        assert_eq!(row_shift(0, 48), 0);
        assert_eq!(row_shift(24, 48), 0);
        assert_eq!(row_shift(25, 48), 1);
        assert_eq!(row_shift(-24, 48), 0);
        assert_eq!(row_shift(-25, 48), -1);
        assert_eq!(row_shift(30, 0), 0);
    }

    #[test]
    fn test_resolve_index_cyclic_wraps() {
        assert_eq!(resolve_index(-1, 12, true), Some(11));
        assert_eq!(resolve_index(12, 12, true), Some(0));
        assert_eq!(resolve_index(5, 12, true), Some(5));
    }

    #[test]
    fn test_resolve_index_bounded_blanks_outside() {
        assert_eq!(resolve_index(-1, 12, false), None);
        assert_eq!(resolve_index(12, 12, false), None);
        assert_eq!(resolve_index(11, 12, false), Some(11));
        assert_eq!(resolve_index(3, 0, true), None);
    }

    #[test]
    fn test_slot_indices_around_center() {
        let selected = 5i64;
        let center = 2i64;
        let shift = 0i64;
        let raw: Vec<i64> = (0..5).map(|slot| selected + slot - center - shift).collect();
        assert_eq!(raw, vec![3, 4, 5, 6, 7]);
    }
}
