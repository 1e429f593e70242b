//! src/model/app_state.rs
//! ============================================================================
//! # AppState: everything the dispatcher mutates and the renderer reads
//!
//! Owned by the UI loop alone, so no locking.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::config::Config;
use crate::model::form_state::FormState;
use crate::model::ui_state::UIState;

#[derive(Debug)]
pub struct AppState {
    pub config: Arc<Config>,
    pub form: FormState,
    pub ui: UIState,

    /// Monotonic id handed to each request, used only for log correlation.
    next_submission_id: u64,

    /// Pinned date for the date-of-joining bound; `None` reads the clock.
    today_override: Option<NaiveDate>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        let ui = UIState::new(config.notifications);
        Self {
            config,
            form: FormState::new(),
            ui,
            next_submission_id: 1,
            today_override: None,
        }
    }

    /// Fixes "today" so date checks are reproducible.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today_override = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn next_submission_id(&mut self) -> u64 {
        let id = self.next_submission_id;
        self.next_submission_id += 1;
        id
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(Config::default()))
    }
}
