//! src/model/form_state.rs
//! ============================================================================
//! # FormState: record, inline errors and the form lifecycle
//!
//! ```text
//!   Empty ──edit──▶ Editing ──submit ok──▶ Submitting ──response──▶ Editing
//!                     │  ▲
//!        submit fails │  │ edit clears last error
//!                     ▼  │
//!                  ErrorShown
//!   (any) ──reset──▶ Empty
//! ```
//!
//! Submits are not guarded: a second submit while one is in flight sends
//! again and both responses are applied in arrival order.

use chrono::NaiveDate;
use tracing::{debug, instrument, trace};

use crate::error::AppError;
use crate::model::constraints::{ConstraintViolation, check_constraints};
use crate::model::form_record::{FieldName, FormRecord};
use crate::model::validation::{ErrorMap, validate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// Defaults, untouched since mount or the last reset.
    #[default]
    Empty,
    Editing,
    /// At least one request is awaiting its response.
    Submitting { in_flight: u32 },
    /// The last submit attempt failed validation.
    ErrorShown,
}

impl FormPhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Editing => "Editing",
            Self::Submitting { .. } => "Submitting",
            Self::ErrorShown => "Errors",
        }
    }
}

/// What a submit attempt resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// An input constraint blocked the submit; nothing was validated.
    Blocked(ConstraintViolation),
    /// Validation failed; no request may be sent.
    Invalid(ErrorMap),
    /// Snapshot of the record to send.
    Send(FormRecord),
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub record: FormRecord,
    pub errors: ErrorMap,
    pub phase: FormPhase,
    pub focus: FieldName,
    pub constraint: Option<ConstraintViolation>,

    /// Requests sent and not yet answered. Survives reset and failed
    /// validation; only responses bring it down.
    in_flight: u32,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> u32 {
        self.in_flight
    }

    /// Replaces one field and drops whatever error was attached to it.
    #[instrument(level = "trace", skip(self, value))]
    pub fn set_field(&mut self, field: FieldName, value: impl Into<String>) -> Result<(), AppError> {
        self.record = self.record.clone().with_field(field, value)?;

        if self.errors.clear(field) {
            trace!(field = %field, "Cleared inline error");
        }
        if self.constraint.as_ref().is_some_and(|c| c.field == field) {
            self.constraint = None;
        }

        self.phase = match self.phase {
            FormPhase::Empty => FormPhase::Editing,
            FormPhase::ErrorShown if self.errors.is_empty() => FormPhase::Editing,
            other => other,
        };
        Ok(())
    }

    /// Constraint check, then validation; on success the phase becomes
    /// `Submitting` and the caller owns the returned snapshot.
    #[instrument(level = "debug", skip(self), fields(phase = ?self.phase))]
    pub fn begin_submit(&mut self, today: NaiveDate) -> SubmitDecision {
        if let Some(violation) = check_constraints(&self.record, today) {
            debug!(field = %violation.field, "Submit blocked by input constraint");
            self.focus = violation.field;
            self.constraint = Some(violation.clone());
            return SubmitDecision::Blocked(violation);
        }
        self.constraint = None;

        self.errors = validate(&self.record);
        if !self.errors.is_empty() {
            debug!(errors = self.errors.len(), "Submit rejected by validation");
            if let Some(first) = self.errors.fields().min() {
                self.focus = first;
            }
            self.phase = FormPhase::ErrorShown;
            return SubmitDecision::Invalid(self.errors.clone());
        }

        self.in_flight += 1;
        self.phase = FormPhase::Submitting {
            in_flight: self.in_flight,
        };
        SubmitDecision::Send(self.record.clone())
    }

    /// Applies the arrival of one response. The record is left as it is.
    pub fn finish_submit(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.phase = match self.phase {
            FormPhase::Submitting { .. } if self.in_flight > 0 => FormPhase::Submitting {
                in_flight: self.in_flight,
            },
            FormPhase::Submitting { .. } => FormPhase::Editing,
            // reset or a rejected submit moved the phase on while requests were pending
            other => other,
        };
    }

    /// Back to defaults, unconditionally. Pending requests are still counted.
    pub fn reset(&mut self) {
        self.record = FormRecord::default();
        self.errors.clear_all();
        self.constraint = None;
        self.focus = FieldName::default();
        self.phase = FormPhase::Empty;
    }

    // Focus and keyboard editing, all routed through `set_field`

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn input_char(&mut self, ch: char) -> Result<(), AppError> {
        if !self.focus.is_text() {
            return Ok(());
        }
        let mut value = self.record.get(self.focus).to_owned();
        value.push(ch);
        self.set_field(self.focus, value)
    }

    pub fn backspace(&mut self) -> Result<(), AppError> {
        if !self.focus.is_text() {
            return Ok(());
        }
        let mut value = self.record.get(self.focus).to_owned();
        if value.pop().is_none() {
            return Ok(());
        }
        self.set_field(self.focus, value)
    }

    pub fn cycle_department(&mut self, forward: bool) -> Result<(), AppError> {
        let dept = if forward {
            self.record.emp_dept.next()
        } else {
            self.record.emp_dept.prev()
        };
        self.set_field(FieldName::Department, dept.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::form_record::Department;
    use crate::model::validation::{ID_REQUIRED, PHONE_NOT_INTEGER, PHONE_REQUIRED};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn filled() -> FormState {
        let mut state = FormState::new();
        for (field, value) in [
            (FieldName::Name, "Grace Hopper"),
            (FieldName::Id, "42"),
            (FieldName::Email, "grace@example.com"),
            (FieldName::Phone, "1234567890"),
            (FieldName::Role, "Admiral"),
            (FieldName::DateOfJoining, "2020-01-01"),
        ] {
            state.set_field(field, value).unwrap();
        }
        state
    }

    #[test]
    fn test_first_edit_leaves_empty() {
        let mut state = FormState::new();
        assert_eq!(state.phase, FormPhase::Empty);
        state.set_field(FieldName::Role, "x").unwrap();
        assert_eq!(state.phase, FormPhase::Editing);
    }

    #[test]
    fn test_editing_phone_keeps_id_error() {
        let mut state = filled();
        state.set_field(FieldName::Id, "").unwrap();
        state.set_field(FieldName::Phone, "abc").unwrap();

        let decision = state.begin_submit(today());
        assert!(matches!(decision, SubmitDecision::Invalid(ref e) if e.len() == 2));
        assert_eq!(state.phase, FormPhase::ErrorShown);
        assert_eq!(state.errors.get(FieldName::Phone), Some(PHONE_NOT_INTEGER));

        state.set_field(FieldName::Phone, "abc1").unwrap();
        assert_eq!(state.errors.get(FieldName::Phone), None);
        assert_eq!(state.errors.get(FieldName::Id), Some(ID_REQUIRED));
        assert_eq!(state.phase, FormPhase::ErrorShown);

        state.set_field(FieldName::Id, "7").unwrap();
        assert_eq!(state.phase, FormPhase::Editing);
    }

    #[test]
    fn test_errors_replaced_wholesale() {
        let mut state = filled();
        state.set_field(FieldName::Phone, " ").unwrap();
        state.begin_submit(today());
        assert_eq!(state.errors.get(FieldName::Phone), Some(PHONE_REQUIRED));

        state.set_field(FieldName::Phone, "1234567890").unwrap();
        state.set_field(FieldName::Id, "").unwrap();
        state.begin_submit(today());
        assert_eq!(state.errors.len(), 1);
        assert!(state.errors.contains(FieldName::Id));
        assert_eq!(state.focus, FieldName::Id);
    }

    #[test]
    fn test_valid_submit_and_response() {
        let mut state = filled();
        let decision = state.begin_submit(today());
        assert_eq!(decision, SubmitDecision::Send(state.record.clone()));
        assert_eq!(state.phase, FormPhase::Submitting { in_flight: 1 });

        // unguarded second submit
        state.begin_submit(today());
        assert_eq!(state.in_flight(), 2);

        state.finish_submit();
        assert_eq!(state.in_flight(), 1);
        state.finish_submit();
        assert_eq!(state.phase, FormPhase::Editing);
        assert_eq!(state.record, filled().record);
    }

    #[test]
    fn test_pending_count_survives_rejected_submit() {
        let mut state = filled();
        assert!(matches!(state.begin_submit(today()), SubmitDecision::Send(_)));

        state.set_field(FieldName::Id, "x").unwrap();
        assert!(matches!(state.begin_submit(today()), SubmitDecision::Invalid(_)));
        assert_eq!(state.phase, FormPhase::ErrorShown);
        assert_eq!(state.in_flight(), 1);

        state.set_field(FieldName::Id, "7").unwrap();
        assert!(matches!(state.begin_submit(today()), SubmitDecision::Send(_)));
        assert_eq!(state.phase, FormPhase::Submitting { in_flight: 2 });

        state.finish_submit();
        assert_eq!(state.phase, FormPhase::Submitting { in_flight: 1 });
        state.finish_submit();
        assert_eq!(state.phase, FormPhase::Editing);
        assert_eq!(state.in_flight(), 0);
    }

    #[test]
    fn test_reset_keeps_pending_count() {
        let mut state = filled();
        state.begin_submit(today());
        state.reset();
        assert_eq!(state.in_flight(), 1);

        let mut state = FormState {
            record: filled().record,
            ..state
        };
        state.begin_submit(today());
        assert_eq!(state.phase, FormPhase::Submitting { in_flight: 2 });
        state.finish_submit();
        assert_eq!(state.phase, FormPhase::Submitting { in_flight: 1 });
    }

    #[test]
    fn test_constraint_blocks_before_validation() {
        let mut state = filled();
        state.set_field(FieldName::Email, "").unwrap();
        state.set_field(FieldName::Phone, "").unwrap();

        let decision = state.begin_submit(today());
        assert!(matches!(decision, SubmitDecision::Blocked(ref v) if v.field == FieldName::Email));
        assert!(state.errors.is_empty());
        assert_eq!(state.focus, FieldName::Email);
        assert_eq!(state.phase, FormPhase::Editing);

        state.set_field(FieldName::Email, "g@h").unwrap();
        assert!(state.constraint.is_none());
    }

    #[test]
    fn test_reset_from_any_phase() {
        let mut state = filled();
        state.cycle_department(true).unwrap();
        state.begin_submit(today());
        state.reset();

        assert_eq!(state.phase, FormPhase::Empty);
        assert!(state.record.is_default());
        assert_eq!(state.record.emp_dept, Department::HR);
        assert!(state.errors.is_empty());

        // a late response does not resurrect the submitting phase
        state.finish_submit();
        assert_eq!(state.phase, FormPhase::Empty);
    }

    #[test]
    fn test_keyboard_editing() {
        let mut state = FormState::new();
        state.input_char('4').unwrap();
        state.input_char('2').unwrap();
        assert_eq!(state.record.emp_name, "42");
        state.backspace().unwrap();
        assert_eq!(state.record.emp_name, "4");

        state.focus = FieldName::Department;
        state.input_char('x').unwrap();
        assert_eq!(state.record.emp_dept, Department::HR);
        state.cycle_department(false).unwrap();
        assert_eq!(state.record.emp_dept, Department::Marketing);

        state.focus_next();
        assert_eq!(state.focus, FieldName::Name);
        state.focus_prev();
        assert_eq!(state.focus, FieldName::Department);
    }
}
