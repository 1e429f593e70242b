//! src/controller/action_dispatcher.rs
//! ============================================================================
//! # ActionDispatcher: applies actions to the application state
//!
//! The only place that turns submit decisions and outcomes into
//! notifications. Everything is caught here; nothing propagates past it.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::client::outcome::SubmitOutcome;
use crate::client::registration_client::RegistrationSink;
use crate::controller::actions::Action;
use crate::controller::event_loop::TaskResult;
use crate::error::AppError;
use crate::model::app_state::AppState;
use crate::model::form_state::SubmitDecision;
use crate::model::ui_state::{NotificationLevel, RedrawFlag};
use crate::tasks::submit_task::spawn_submit;

pub const RESET_MESSAGE: &str = "Form has been reset";

#[derive(Debug, Default, Clone, Copy)]
pub struct DispatcherStats {
    pub total_actions: u64,
    pub submits_sent: u64,
    pub submits_rejected: u64,
    pub responses: u64,
}

pub struct ActionDispatcher {
    sink: Arc<dyn RegistrationSink>,
    task_tx: mpsc::UnboundedSender<TaskResult>,
    stats: DispatcherStats,
}

impl ActionDispatcher {
    pub fn new(sink: Arc<dyn RegistrationSink>, task_tx: mpsc::UnboundedSender<TaskResult>) -> Self {
        Self {
            sink,
            task_tx,
            stats: DispatcherStats::default(),
        }
    }

    pub fn get_stats(&self) -> DispatcherStats {
        self.stats
    }

    /// Applies one action. Returns `false` when the application should exit.
    pub fn handle(&mut self, state: &mut AppState, action: Action) -> bool {
        self.stats.total_actions += 1;

        let result = match action {
            Action::Quit => return false,
            Action::NoOp => Ok(()),

            Action::Input(ch) => state.form.input_char(ch),
            Action::Backspace => state.form.backspace(),
            Action::CycleDepartment(forward) => state.form.cycle_department(forward),
            Action::FocusNext => {
                state.form.focus_next();
                Ok(())
            }
            Action::FocusPrev => {
                state.form.focus_prev();
                Ok(())
            }

            Action::Submit => {
                self.submit(state);
                Ok(())
            }
            Action::Reset => {
                self.reset(state);
                Ok(())
            }
            Action::SubmitFinished {
                submission_id,
                outcome,
            } => {
                self.apply_outcome(state, submission_id, &outcome);
                Ok(())
            }

            Action::DismissNotification => {
                state.ui.dismiss_notification();
                Ok(())
            }
            Action::Tick => {
                state.ui.update_notification();
                return true;
            }
            Action::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
                state.ui.request_redraw(RedrawFlag::All);
                return true;
            }
        };

        if let Err(e) = result {
            self.report_edit_error(state, e);
        }
        state.ui.request_redraw(RedrawFlag::Form);
        true
    }

    #[instrument(level = "debug", skip_all, fields(phase = ?state.form.phase))]
    fn submit(&mut self, state: &mut AppState) {
        let today = state.today();

        match state.form.begin_submit(today) {
            SubmitDecision::Blocked(violation) => {
                self.stats.submits_rejected += 1;
                debug!(field = %violation.field, hint = %violation.message, "Submit blocked");
            }
            SubmitDecision::Invalid(errors) => {
                self.stats.submits_rejected += 1;
                debug!(errors = errors.len(), "Submit rejected by validation");
            }
            SubmitDecision::Send(record) => {
                let submission_id = state.next_submission_id();
                self.stats.submits_sent += 1;
                info!(
                    marker = "FORM_SUBMITTED",
                    submission_id,
                    payload = ?record,
                    "Form submitted"
                );
                spawn_submit(self.sink.clone(), submission_id, record, self.task_tx.clone());
            }
        }
        state.ui.request_redraw(RedrawFlag::StatusBar);
    }

    fn reset(&mut self, state: &mut AppState) {
        state.form.reset();
        state.ui.show_warning(RESET_MESSAGE);
        info!(marker = "FORM_RESET", "Form reset to defaults");
    }

    fn apply_outcome(&mut self, state: &mut AppState, submission_id: u64, outcome: &SubmitOutcome) {
        self.stats.responses += 1;
        state.form.finish_submit();

        match outcome {
            SubmitOutcome::Created { result, .. } => {
                info!(
                    marker = "FORM_REGISTERED",
                    submission_id,
                    result = %result.as_ref().map(ToString::to_string).unwrap_or_default(),
                    "Form submitted successfully"
                );
            }
            SubmitOutcome::TransportFailed { reason } => {
                warn!(submission_id, reason = %reason, "Submission failed");
            }
            other => {
                debug!(submission_id, outcome = ?other, "Submission answered");
            }
        }

        let (level, message) = outcome.notification();
        match level {
            NotificationLevel::Success => state.ui.show_success(message),
            NotificationLevel::Warning => state.ui.show_warning(message),
            NotificationLevel::Error => state.ui.show_error(message),
        }
        state.ui.request_redraw(RedrawFlag::StatusBar);
    }

    fn report_edit_error(&self, state: &mut AppState, error: AppError) {
        warn!(error = %error, "Edit rejected");
        state.ui.show_error(error.to_string());
    }
}
