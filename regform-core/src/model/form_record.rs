//! src/model/form_record.rs
//! ============================================================================
//! # FormRecord: the employee record being edited
//!
//! All attributes are kept as text exactly as typed; numeric and date
//! semantics are checked at submit time, never on the edit path. Updates go
//! through [`FormRecord::with_field`], a pure `(record, field, value) -> record`
//! reducer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Closed set of departments offered by the selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[default]
    HR,
    Engineering,
    Marketing,
}

impl Department {
    pub const ALL: [Department; 3] = [Self::HR, Self::Engineering, Self::Marketing];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HR => "HR",
            Self::Engineering => "Engineering",
            Self::Marketing => "Marketing",
        }
    }

    /// Next option, wrapping around.
    pub const fn next(self) -> Self {
        match self {
            Self::HR => Self::Engineering,
            Self::Engineering => Self::Marketing,
            Self::Marketing => Self::HR,
        }
    }

    /// Previous option, wrapping around.
    pub const fn prev(self) -> Self {
        match self {
            Self::HR => Self::Marketing,
            Self::Engineering => Self::HR,
            Self::Marketing => Self::Engineering,
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dept| dept.as_str() == s)
            .ok_or_else(|| {
                AppError::invalid_input(
                    FieldName::Department.key(),
                    format!("unknown department '{s}'"),
                )
            })
    }
}

/// Form fields in on-screen order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    #[default]
    Name,
    Id,
    Email,
    Phone,
    Role,
    DateOfJoining,
    Department,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        Self::Name,
        Self::Id,
        Self::Email,
        Self::Phone,
        Self::Role,
        Self::DateOfJoining,
        Self::Department,
    ];

    /// Wire key used in the JSON payload.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "emp_name",
            Self::Id => "emp_id",
            Self::Email => "emp_email",
            Self::Phone => "emp_phone",
            Self::Role => "emp_role",
            Self::DateOfJoining => "emp_doj",
            Self::Department => "emp_dept",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Id => "Employee ID",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Role => "Role",
            Self::DateOfJoining => "Date of Joining",
            Self::Department => "Department",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }

    /// Following field, wrapping to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Preceding field, wrapping to the last.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether the field is edited by typing (everything but the selector).
    pub const fn is_text(self) -> bool {
        !matches!(self, Self::Department)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FieldName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| AppError::invalid_input(s, "unknown form field"))
    }
}

/// The employee record as submitted to the registration endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub emp_name: String,
    pub emp_id: String,
    pub emp_email: String,
    pub emp_phone: String,
    pub emp_dept: Department,
    pub emp_doj: String,
    pub emp_role: String,
}

impl FormRecord {
    /// Current text of a field.
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.emp_name,
            FieldName::Id => &self.emp_id,
            FieldName::Email => &self.emp_email,
            FieldName::Phone => &self.emp_phone,
            FieldName::Role => &self.emp_role,
            FieldName::DateOfJoining => &self.emp_doj,
            FieldName::Department => self.emp_dept.as_str(),
        }
    }

    /// Returns the record with exactly `field` replaced by `value`.
    ///
    /// Only the department selector can reject a value, since it is a closed
    /// set; free-text fields take anything.
    pub fn with_field(mut self, field: FieldName, value: impl Into<String>) -> Result<Self, AppError> {
        let value = value.into();
        match field {
            FieldName::Name => self.emp_name = value,
            FieldName::Id => self.emp_id = value,
            FieldName::Email => self.emp_email = value,
            FieldName::Phone => self.emp_phone = value,
            FieldName::Role => self.emp_role = value,
            FieldName::DateOfJoining => self.emp_doj = value,
            FieldName::Department => self.emp_dept = value.parse()?,
        }
        Ok(self)
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
