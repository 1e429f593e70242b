//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Application Commands
//!
//! Terminal events and background task results are both reduced to an
//! `Action` before the dispatcher touches any state.

use crate::client::outcome::SubmitOutcome;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Type a character into the focused text field.
    Input(char),

    /// Delete the last character of the focused text field.
    Backspace,

    FocusNext,

    FocusPrev,

    /// Step the department selector forward (`true`) or back.
    CycleDepartment(bool),

    /// Run constraints and validation, then send if both pass.
    Submit,

    /// Restore defaults and announce it.
    Reset,

    DismissNotification,

    /// A registration request finished, successfully or not.
    SubmitFinished {
        submission_id: u64,
        outcome: SubmitOutcome,
    },

    /// Periodic tick for notification expiry.
    Tick,

    /// A terminal resize event.
    Resize(u16, u16),

    Quit,

    /// Event consumed, nothing to do.
    NoOp,
}
