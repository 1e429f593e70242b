//! src/view/components/status_bar.rs
//!
//! One-line footer: form phase and in-flight submissions on the left, key
//! hints on the right.

use crate::{model::app_state::AppState, view::theme};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

pub const KEY_HINTS: &str = "Tab/↑↓ move | Enter submit | Ctrl+R reset | Esc dismiss | Ctrl+Q quit";

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    pub fn left_text(app: &AppState) -> String {
        let form = &app.form;
        let mut text = format!("{} | Focus: {}", form.phase.label(), form.focus.label());
        if form.in_flight() > 0 {
            text.push_str(&format!(" | Sending: {}", form.in_flight()));
        }
        if !form.errors.is_empty() {
            text.push_str(&format!(" | Errors: {}", form.errors.len()));
        }
        text
    }

    pub fn render(&self, frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(area);

        Paragraph::new(Self::left_text(app))
            .style(Style::default().fg(theme::FOREGROUND).bg(theme::BACKGROUND))
            .alignment(Alignment::Left)
            .render(left, frame.buffer_mut());

        Paragraph::new(KEY_HINTS)
            .style(Style::default().fg(theme::COMMENT).bg(theme::BACKGROUND))
            .alignment(Alignment::Right)
            .render(right, frame.buffer_mut());
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::form_record::FieldName;

    #[test]
    fn test_left_text_reports_phase() {
        let mut app = AppState::default();
        assert_eq!(StatusBar::left_text(&app), "Empty | Focus: Name");

        app.form.set_field(FieldName::Name, "Ada").unwrap();
        assert!(StatusBar::left_text(&app).starts_with("Editing"));
    }
}
