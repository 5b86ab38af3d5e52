//! Form lifecycle and field validation.
//!
//! Every modal form follows the same machine: edit mode starts in
//! `Loading` until the record detail arrives, `Ready` accepts input,
//! `Submitting` gates duplicate submissions, and a failed save drops back
//! to `Ready` with the draft intact. Validation runs synchronously on
//! submit and the first violated rule blocks the request.

use chrono::{NaiveDate, NaiveTime};

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit(Id),
}

impl<Id: Clone> FormMode<Id> {
    /// Returns the record id in edit mode.
    pub fn record_id(&self) -> Option<Id> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id.clone()),
        }
    }

    /// Returns whether this is an edit.
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

/// Lifecycle phase of an open form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// Waiting for the record detail (edit mode only).
    Loading,
    /// Accepting input.
    #[default]
    Ready,
    /// A save request is in flight; further submits are ignored.
    Submitting,
}

/// The first violated validation rule, tied to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field label shown in the message.
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    /// Creates an error for a field.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Text shown under the form.
    pub fn display(&self) -> String {
        format!("{}: {}", self.field, self.message)
    }
}

/// Requires a non-blank value; returns it trimmed.
pub fn require(field: &'static str, value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(field, "is required"));
    }
    Ok(trimmed.to_string())
}

/// Requires a trimmed length within `min..=max`.
pub fn require_len(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<String, FieldError> {
    let value = require(field, value)?;
    let len = value.chars().count();
    if len < min || len > max {
        return Err(FieldError::new(
            field,
            format!("must be between {min} and {max} characters"),
        ));
    }
    Ok(value)
}

/// Shallow email shape check: something@something.something.
pub fn require_email(field: &'static str, value: &str) -> Result<String, FieldError> {
    let value = require(field, value)?;
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(FieldError::new(field, "is not a valid email address"));
    }
    Ok(value)
}

/// Parses a non-negative amount.
pub fn parse_amount(field: &'static str, value: &str) -> Result<f64, FieldError> {
    let value = require(field, value)?;
    value
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
        .ok_or_else(|| FieldError::new(field, "must be a non-negative number"))
}

/// Parses a non-negative whole number.
pub fn parse_count(field: &'static str, value: &str) -> Result<u32, FieldError> {
    let value = require(field, value)?;
    value
        .parse::<u32>()
        .map_err(|_| FieldError::new(field, "must be a whole number"))
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FieldError> {
    let value = require(field, value)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|_| FieldError::new(field, "must be a date in YYYY-MM-DD form"))
}

/// Parses a `HH:MM` time.
pub fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, FieldError> {
    let value = require(field, value)?;
    NaiveTime::parse_from_str(&value, "%H:%M")
        .map_err(|_| FieldError::new(field, "must be a time in HH:MM form"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn require_trims_and_rejects_blank() {
        assert_eq!(require("Name", "  Meezan  ").unwrap(), "Meezan");
        assert!(require("Name", "   ").is_err());
        assert!(require("Name", "").is_err());
    }

    #[test]
    fn length_bounds_count_characters() {
        assert!(require_len("IBAN", "PK36MEZN0000000101", 16, 34).is_ok());
        assert!(require_len("IBAN", "PK36", 16, 34).is_err());
    }

    #[test]
    fn email_shape() {
        assert!(require_email("Email", "ops@karwan.pk").is_ok());
        assert!(require_email("Email", "ops@karwan").is_err());
        assert!(require_email("Email", "@karwan.pk").is_err());
        assert!(require_email("Email", "ops.karwan.pk").is_err());
    }

    #[test]
    fn amounts_and_counts() {
        assert_eq!(parse_amount("Credit", "1500.50").unwrap(), 1500.50);
        assert!(parse_amount("Credit", "-3").is_err());
        assert!(parse_amount("Credit", "abc").is_err());

        assert_eq!(parse_count("Seats", "42").unwrap(), 42);
        assert!(parse_count("Seats", "-1").is_err());
        assert!(parse_count("Seats", "4.5").is_err());
    }

    #[test]
    fn dates_and_times() {
        assert_eq!(
            parse_date("Departure date", "2025-03-14").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        assert!(parse_date("Departure date", "14/03/2025").is_err());

        assert_eq!(
            parse_time("Departure time", "22:30").unwrap(),
            NaiveTime::from_hms_opt(22, 30, 0).unwrap()
        );
        assert!(parse_time("Departure time", "10pm").is_err());
    }

    #[test]
    fn error_display_names_the_field() {
        let err = FieldError::new("Short Code", "must be 2-3 uppercase letters");
        assert_eq!(err.display(), "Short Code: must be 2-3 uppercase letters");
    }

    #[test]
    fn form_mode_id_extraction() {
        let create: FormMode<String> = FormMode::Create;
        assert_eq!(create.record_id(), None);
        assert!(!create.is_edit());

        let edit = FormMode::Edit("b-1".to_string());
        assert_eq!(edit.record_id(), Some("b-1".to_string()));
        assert!(edit.is_edit());
    }
}
