use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let date_str = app
            .picker
            .date()
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "----".to_string());

        let picked_str = app
            .last_picked
            .map(|d| format!(" | picked {}", d.format("%Y-%m-%d %H:%M")))
            .unwrap_or_default();

        let cyclic_str = if app.picker.wheel(app.focus).is_cyclic() {
            "cyclic"
        } else {
            "bounded"
        };

        let scroll_str = app
            .last_scroll
            .as_deref()
            .map(|s| format!(" | {}", s))
            .unwrap_or_default();

        let status_text = format!(
            " {} | {} | {} ({}){}{}",
            app.picker.mode().name(),
            date_str,
            app.focus.label(),
            cyclic_str,
            scroll_str,
            picked_str,
        );

        let help_hint = " q:quit h/l:wheel j/k:spin t:today m:mode c:cyclic ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.hint).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
