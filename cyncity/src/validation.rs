//! Field validators shared by request payloads.
//!
//! `validator` collects every violation into an unordered map, while clients
//! expect the message of the first offending field. [`OrderedValidate`] picks
//! that message using the payload's declared field order.

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveTime};
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::error::{CyncityError, Result};
use crate::models::{DocumentType, UserRole, UserStatus};

pub trait OrderedValidate: Validate {
    /// Validated field names, in the order they are checked.
    const FIELD_ORDER: &'static [&'static str];

    fn validate_ordered(&self) -> Result<()> {
        self.validate()
            .map_err(|errors| CyncityError::Validation(first_violation(&errors, Self::FIELD_ORDER)))
    }
}

/// Message of the first violated field in `order`.
pub fn first_violation(errors: &ValidationErrors, order: &[&str]) -> String {
    let fields = errors.field_errors();

    order
        .iter()
        .filter_map(|field| fields.get(*field).map(|errs| (*field, errs)))
        .chain(fields.iter().map(|(field, errs)| (&**field, errs)))
        .find_map(|(field, errs)| errs.first().map(|e| describe(field, e)))
        .unwrap_or_else(|| "Invalid payload".to_string())
}

fn describe(field: &str, error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("{field}: validation failed"))
}

fn violation(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

pub fn validate_role(role: &str) -> std::result::Result<(), ValidationError> {
    role.parse::<UserRole>()
        .map(|_| ())
        .map_err(|msg| violation("invalid_role", msg))
}

pub fn validate_status(status: &str) -> std::result::Result<(), ValidationError> {
    status
        .parse::<UserStatus>()
        .map(|_| ())
        .map_err(|msg| violation("invalid_status", msg))
}

/// `YYYY-MM-DD`, must be a real calendar date.
pub fn validate_iso_date(date: &str) -> std::result::Result<(), ValidationError> {
    let well_formed = date.len() == 10 && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok();
    if well_formed {
        Ok(())
    } else {
        Err(violation("invalid_date", "Date must be an ISO date (YYYY-MM-DD)"))
    }
}

/// 24-hour `HH:mm`.
pub fn validate_hh_mm(time: &str) -> std::result::Result<(), ValidationError> {
    let well_formed = time.len() == 5 && NaiveTime::parse_from_str(time, "%H:%M").is_ok();
    if well_formed {
        Ok(())
    } else {
        Err(violation("invalid_time", "Time must be in HH:mm format"))
    }
}

pub fn validate_email_list(emails: &[String]) -> std::result::Result<(), ValidationError> {
    match emails.iter().find(|email| !email.validate_email()) {
        Some(bad) => Err(violation(
            "invalid_attendee",
            format!("Invalid attendee email: {bad}"),
        )),
        None => Ok(()),
    }
}

pub fn validate_document_type(content_type: &str) -> std::result::Result<(), ValidationError> {
    content_type
        .parse::<DocumentType>()
        .map(|_| ())
        .map_err(|msg| violation("unsupported_type", msg))
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Unwraps a field that [`OrderedValidate`] has already checked for presence.
pub fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| CyncityError::Validation(format!("{field} is required")))
}
