//! ``src/view/components/form_view.rs``
//! ============================================================================
//! # FormView: the employee registration panel
//!
//! One label line and one input line per field, followed by the inline
//! validation error or constraint hint for that field when there is one.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::model::app_state::AppState;
use crate::model::constraints::max_date_hint;
use crate::model::form_record::FieldName;
use crate::view::theme;

pub const TITLE: &str = " Employee Registration ";
pub const SUBMIT_LABEL: &str = "[ SUBMIT ]";

/// Built lines plus the cursor cell, relative to the panel's inner area.
pub struct FormLines {
    pub lines: Vec<Line<'static>>,
    pub cursor: Option<(u16, u16)>,
}

pub struct FormView;

/// Longest suffix of `value` that fits in `max` terminal cells.
fn visible_tail(value: &str, max: usize) -> &str {
    if Span::raw(value).width() <= max {
        return value;
    }
    let mut start = value.len();
    for (i, _) in value.char_indices().rev() {
        if Span::raw(&value[i..]).width() > max {
            break;
        }
        start = i;
    }
    &value[start..]
}

impl FormView {
    /// Lines for a panel whose inner area is `width` cells wide. Text values
    /// wider than that scroll so the end, and the cursor, stay visible.
    pub fn build(app: &AppState, width: u16) -> FormLines {
        let form = &app.form;
        let mut lines = Vec::with_capacity(FieldName::ALL.len() * 3 + 2);
        let mut cursor = None;

        for field in FieldName::ALL {
            let focused = form.focus == field;
            let value = form.record.get(field);

            let label = match field {
                FieldName::DateOfJoining => format!(
                    "{}: (YYYY-MM-DD, up to {})",
                    field.label(),
                    max_date_hint(app.today())
                ),
                _ => format!("{}:", field.label()),
            };
            lines.push(Line::from(Span::styled(label, theme::label_style())));

            let marker = if focused { "› " } else { "  " };
            let input = if field.is_text() {
                let marker_width = Span::raw(marker).width();
                // one spare cell for the cursor after the last character
                let room = (width as usize).saturating_sub(marker_width + 1);
                let shown = visible_tail(value, room);
                if focused {
                    cursor = Some((
                        (marker_width + Span::raw(shown).width()) as u16,
                        lines.len() as u16,
                    ));
                }
                shown.to_string()
            } else {
                format!("◀ {value} ▶")
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(input, theme::input_style(focused)),
            ]));

            if let Some(error) = form.errors.get(field) {
                lines.push(Line::from(Span::styled(
                    format!("  {error}"),
                    theme::error_style(),
                )));
            } else if let Some(hint) = form.constraint.as_ref().filter(|c| c.field == field) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", hint.message),
                    theme::hint_style(),
                )));
            }
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(SUBMIT_LABEL, theme::submit_style())).alignment(Alignment::Center));

        FormLines { lines, cursor }
    }

    pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(TITLE)
            .title(
                Line::from(Span::styled(" Reset: Ctrl+R ", theme::reset_style()))
                    .alignment(Alignment::Right),
            )
            .border_style(theme::panel_border_style())
            .style(theme::panel_style());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let FormLines { lines, cursor } = Self::build(app, inner.width);
        frame.render_widget(Paragraph::new(lines), inner);

        if let Some((col, row)) = cursor
            && col < inner.width
            && row < inner.height
        {
            frame.set_cursor_position((inner.x + col, inner.y + row));
        }
    }
}
