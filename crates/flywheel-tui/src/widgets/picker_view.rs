use ratatui::{layout::Rect, Frame};

use crate::app::App;
use crate::widgets::WheelColumnWidget;

/// The row of wheel columns making up the picker
pub struct PickerWidget;

impl PickerWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let fields = app.picker.fields();

        // Column width follows the widest item text, never narrower than
        // the field label on the border
        let widths: Vec<u16> = fields
            .iter()
            .map(|field| {
                let wheel = app.picker.wheel(*field);
                let text_len = wheel.max_text_len().max(field.label().len());
                text_len as u16 + 4
            })
            .collect();

        let gaps = fields.len().saturating_sub(1) as u16;
        let total_width = widths.iter().sum::<u16>() + gaps;
        let height = (app.config.wheel.visible_items as u16 + 2).min(area.height);

        let x0 = area.x + area.width.saturating_sub(total_width) / 2;
        let y0 = area.y + area.height.saturating_sub(height) / 2;

        app.wheel_areas.clear();
        let mut x = x0;
        for (field, width) in fields.iter().zip(widths) {
            if x.saturating_add(width) > area.x.saturating_add(area.width) {
                break;
            }
            let rect = Rect {
                x,
                y: y0,
                width,
                height,
            };
            app.wheel_areas.push((*field, rect));
            WheelColumnWidget::render(frame, rect, app, *field);
            x += width + 1;
        }
    }
}
