//! src/model/constraints.rs
//! ============================================================================
//! # Input constraints checked before validation
//!
//! Required text fields, the email shape and the date-of-joining bound are
//! enforced by the input widgets themselves, so a violation blocks the submit
//! before [`super::validation::validate`] runs and is reported as a hint on
//! the offending field rather than through the `ErrorMap`.

use chrono::NaiveDate;
use compact_str::{CompactString, format_compact};

use crate::model::form_record::{FieldName, FormRecord};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const FILL_OUT_FIELD: &str = "Please fill out this field";
pub const ENTER_EMAIL: &str = "Please enter an email address";
pub const ENTER_DATE: &str = "Please enter a valid date (YYYY-MM-DD)";

/// Fields that must be non-blank before the form may be submitted.
pub const REQUIRED_FIELDS: [FieldName; 4] = [
    FieldName::Name,
    FieldName::Email,
    FieldName::Role,
    FieldName::DateOfJoining,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub field: FieldName,
    pub message: CompactString,
}

impl ConstraintViolation {
    fn new(field: FieldName, message: impl Into<CompactString>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// `local@domain`, one `@`, no whitespace.
pub fn looks_like_email(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.is_empty()
                && !value.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Upper bound shown next to the date field.
pub fn max_date_hint(today: NaiveDate) -> String {
    today.format(DATE_FORMAT).to_string()
}

/// Plain text inputs only reject the empty string; email and date inputs
/// strip surrounding whitespace first.
fn is_missing(field: FieldName, value: &str) -> bool {
    match field {
        FieldName::Email | FieldName::DateOfJoining => value.trim().is_empty(),
        _ => value.is_empty(),
    }
}

/// First violated constraint in on-screen field order.
pub fn check_constraints(record: &FormRecord, today: NaiveDate) -> Option<ConstraintViolation> {
    for field in FieldName::ALL {
        let value = record.get(field);

        if REQUIRED_FIELDS.contains(&field) && is_missing(field, value) {
            return Some(ConstraintViolation::new(field, FILL_OUT_FIELD));
        }

        match field {
            FieldName::Email if !looks_like_email(value.trim()) => {
                return Some(ConstraintViolation::new(field, ENTER_EMAIL));
            }
            FieldName::DateOfJoining => match parse_date(value) {
                None => return Some(ConstraintViolation::new(field, ENTER_DATE)),
                Some(date) if date > today => {
                    return Some(ConstraintViolation::new(
                        field,
                        format_compact!("Value must be {} or earlier", max_date_hint(today)),
                    ));
                }
                Some(_) => {}
            },
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::form_record::Department;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn complete() -> FormRecord {
        FormRecord {
            emp_name: "Ada Lovelace".into(),
            emp_id: "".into(),
            emp_email: "ada@example.com".into(),
            emp_phone: "".into(),
            emp_dept: Department::Engineering,
            emp_doj: "2024-06-30".into(),
            emp_role: "Engineer".into(),
        }
    }

    #[test]
    fn test_id_and_phone_are_not_constraints() {
        assert_eq!(check_constraints(&complete(), today()), None);
    }

    #[test]
    fn test_whitespace_satisfies_required_text() {
        let record = FormRecord {
            emp_name: "  ".into(),
            emp_role: " ".into(),
            ..complete()
        };
        assert_eq!(check_constraints(&record, today()), None);

        let blank_email = FormRecord {
            emp_email: "   ".into(),
            ..complete()
        };
        assert_eq!(
            check_constraints(&blank_email, today()).unwrap().message,
            FILL_OUT_FIELD
        );
    }

    #[test]
    fn test_first_missing_field_reported() {
        let record = FormRecord {
            emp_name: "".into(),
            emp_role: "".into(),
            ..complete()
        };
        let violation = check_constraints(&record, today()).unwrap();
        assert_eq!(violation.field, FieldName::Name);
        assert_eq!(violation.message, FILL_OUT_FIELD);
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("a@b"));
        assert!(!looks_like_email("ab"));
        assert!(!looks_like_email("a@b@c"));
        assert!(!looks_like_email("@b"));
        assert!(!looks_like_email("a b@c"));

        let record = FormRecord {
            emp_email: "not-an-email".into(),
            ..complete()
        };
        let violation = check_constraints(&record, today()).unwrap();
        assert_eq!(violation.field, FieldName::Email);
        assert_eq!(violation.message, ENTER_EMAIL);
    }

    #[test]
    fn test_date_of_joining_bounds() {
        let future = FormRecord {
            emp_doj: "2024-07-01".into(),
            ..complete()
        };
        let violation = check_constraints(&future, today()).unwrap();
        assert_eq!(violation.field, FieldName::DateOfJoining);
        assert_eq!(violation.message, "Value must be 2024-06-30 or earlier");

        let garbled = FormRecord {
            emp_doj: "30/06/2024".into(),
            ..complete()
        };
        assert_eq!(
            check_constraints(&garbled, today()).unwrap().message,
            ENTER_DATE
        );

        let past = FormRecord {
            emp_doj: "2019-02-28".into(),
            ..complete()
        };
        assert_eq!(check_constraints(&past, today()), None);
    }
}
