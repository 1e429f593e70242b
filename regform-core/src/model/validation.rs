//! src/model/validation.rs
//! ============================================================================
//! # Submit-time validation
//!
//! Only the employee ID and phone number are checked programmatically. Every
//! other requirement is an input constraint (see [`super::constraints`]) and
//! never shows up in the [`ErrorMap`].

use std::collections::BTreeMap;

use compact_str::CompactString;

use crate::model::form_record::{FieldName, FormRecord};

pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_NOT_INTEGER: &str = "Phone number should be integer";
pub const PHONE_WRONG_LENGTH: &str = "Phone number should be exactly 10 digits";
pub const ID_REQUIRED: &str = "Employee id is required";
pub const ID_NOT_INTEGER: &str = "Employee ID should be an integer";

pub const PHONE_LENGTH: usize = 10;

/// Field name to validation message, recomputed on every submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: BTreeMap<FieldName, CompactString>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldName, message: impl Into<CompactString>) {
        self.entries.insert(field, message.into());
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.entries.get(&field).map(CompactString::as_str)
    }

    /// Drops the entry for `field`; returns whether one was present.
    pub fn clear(&mut self, field: FieldName) -> bool {
        self.entries.remove(&field).is_some()
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.entries.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.entries.keys().copied()
    }
}

/// Optional sign followed by at least one ASCII digit, ignoring surrounding
/// whitespace.
pub fn is_integer(value: &str) -> bool {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix(&['+', '-'][..]).unwrap_or(trimmed);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// First failing phone rule, if any.
pub fn validate_phone(phone: &str) -> Option<&'static str> {
    if is_blank(phone) {
        Some(PHONE_REQUIRED)
    } else if !is_integer(phone) {
        Some(PHONE_NOT_INTEGER)
    } else if phone.chars().count() != PHONE_LENGTH {
        Some(PHONE_WRONG_LENGTH)
    } else {
        None
    }
}

/// First failing employee ID rule, if any.
pub fn validate_id(id: &str) -> Option<&'static str> {
    if is_blank(id) {
        Some(ID_REQUIRED)
    } else if !is_integer(id) {
        Some(ID_NOT_INTEGER)
    } else {
        None
    }
}

/// Runs both field rules independently and collects the failures.
pub fn validate(record: &FormRecord) -> ErrorMap {
    let mut errors = ErrorMap::new();

    if let Some(message) = validate_phone(&record.emp_phone) {
        errors.insert(FieldName::Phone, message);
    }
    if let Some(message) = validate_id(&record.emp_id) {
        errors.insert(FieldName::Id, message);
    }

    errors
}
