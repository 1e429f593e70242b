//! src/view/components/notification_overlay.rs
use crate::model::ui_state::{Notification, NotificationLevel};
use crate::view::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tracing::{debug, instrument, trace};

pub struct NotificationOverlay;

impl NotificationOverlay {
    pub fn new() -> Self {
        Self
    }

    /// Top-right toast area inside `screen`.
    pub fn area(screen: Rect) -> Rect {
        let width = screen.width.min(40);
        let height = screen.height.min(5);
        Rect {
            x: screen.x + screen.width.saturating_sub(width),
            y: screen.y,
            width,
            height,
        }
    }

    #[instrument(
        level = "trace",
        skip_all,
        fields(
            marker = "NOTIFICATION_DISPLAYED",
            severity = ?notification.level,
            message_len = notification.message.len(),
        )
    )]
    pub fn render_notification(&self, frame: &mut Frame<'_>, notification: &Notification, area: Rect) {
        frame.render_widget(Clear, area);

        let (border_style, title, icon) = match notification.level {
            NotificationLevel::Warning => (Style::default().fg(theme::YELLOW), "Warning", "⚠"),
            NotificationLevel::Error => (Style::default().fg(theme::RED), "Error", "✕"),
            NotificationLevel::Success => (Style::default().fg(theme::GREEN), "Success", "✓"),
        };

        trace!(title, icon, "Selected notification style based on level");

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {icon} {title} "))
            .title_style(border_style.bold())
            .border_style(border_style)
            .style(Style::default().bg(theme::BACKGROUND));

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .split(inner_area);

        let message = Paragraph::new(notification.message.as_str())
            .style(Style::default().fg(theme::FOREGROUND))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);
        frame.render_widget(message, layout[0]);

        let dismiss = Paragraph::new("Esc to dismiss")
            .style(
                Style::default()
                    .fg(theme::COMMENT)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center);
        frame.render_widget(dismiss, layout[1]);

        if notification.level == NotificationLevel::Error {
            debug!(
                marker = "NOTIFICATION_ERROR",
                text = %notification.message,
                "Error notification displayed to user"
            );
        }
    }
}

impl Default for NotificationOverlay {
    fn default() -> Self {
        Self::new()
    }
}
