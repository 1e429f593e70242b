//! src/view/ui.rs
//! ============================================================
//! Frame renderer that draws the whole form screen from a shared
//! `&AppState`. Nothing is mutated on the model while painting.

use std::time::{Duration, Instant};

use ratatui::prelude::*;
use tracing::{instrument, trace};

use crate::{
    model::{app_state::AppState, form_record::FieldName},
    view::components::{
        form_view::FormView, notification_overlay::NotificationOverlay, status_bar::StatusBar,
    },
};

const FORM_WIDTH: u16 = 64;
/// Two lines per field, room for three inline messages, the button row and borders.
const FORM_HEIGHT: u16 = FieldName::ALL.len() as u16 * 2 + 3 + 2 + 2;

/// ---------------------------------------------------------------------------
/// Renderer struct (contains only caches + stats)
/// ---------------------------------------------------------------------------
pub struct UIRenderer {
    cache: LayoutCache,
    stats: RenderStats,
}

#[derive(Default)]
struct LayoutCache {
    screen: Rect,
    form: Rect,
    status: Rect,
    hit: u64,
    miss: u64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RenderStats {
    pub frames: u64,
    pub slow: u64,
    pub total: Duration,
}

impl UIRenderer {
    pub fn new() -> Self {
        Self {
            cache: LayoutCache::default(),
            stats: RenderStats::default(),
        }
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// ---------------------------------------------------------------------------
/// public API
/// ---------------------------------------------------------------------------
impl UIRenderer {
    #[instrument(level = "trace", skip_all, fields(phase = app.form.phase.label()))]
    pub fn render(&mut self, f: &mut Frame<'_>, app: &AppState) {
        let start = Instant::now();
        self.update_layout_cache(f.area());

        FormView::render(f, app, self.cache.form);
        StatusBar::new().render(f, app, self.cache.status);

        if let Some(notification) = &app.ui.notification {
            let area = NotificationOverlay::area(self.cache.screen);
            NotificationOverlay::new().render_notification(f, notification, area);
        }

        let dur = start.elapsed();
        self.stats.total += dur;
        if dur.as_millis() > 16 {
            self.stats.slow += 1;
            trace!(elapsed_ms = dur.as_millis() as u64, "Slow frame");
        }
        self.stats.frames += 1;
    }
}

/// ---------------------------------------------------------------------------
/// util: layout / rectangles
/// ---------------------------------------------------------------------------
impl UIRenderer {
    fn update_layout_cache(&mut self, scr: Rect) {
        if self.cache.screen == scr && self.cache.miss > 0 {
            self.cache.hit += 1;
            return;
        }

        self.cache.screen = scr;
        self.cache.miss += 1;

        let [content, status] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(scr);
        self.cache.form = Self::centered(content, FORM_WIDTH, FORM_HEIGHT);
        self.cache.status = status;
    }

    fn centered(r: Rect, width: u16, height: u16) -> Rect {
        let w = width.min(r.width);
        let h = height.min(r.height);
        Rect {
            x: r.x + (r.width - w) / 2,
            y: r.y + (r.height - h) / 2,
            width: w,
            height: h,
        }
    }
}

/// ---------------------------------------------------------------------------
/// stats helpers
/// ---------------------------------------------------------------------------
impl RenderStats {
    pub fn fps(&self) -> f64 {
        if self.frames > 0 && !self.total.is_zero() {
            self.frames as f64 / self.total.as_secs_f64()
        } else {
            0.0
        }
    }
}
