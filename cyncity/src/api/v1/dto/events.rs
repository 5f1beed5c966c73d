use serde::Deserialize;
use validator::Validate;

use crate::error::{CyncityError, Result};
use crate::models::{EventPatch, NewEvent};
use crate::validation::{
    normalize_email, required, validate_email_list, validate_hh_mm, validate_iso_date,
    OrderedValidate,
};

const EVENT_FIELDS: &[&str] = &[
    "title",
    "venue",
    "date",
    "time",
    "organizer",
    "agenda",
    "attendees",
];

/// Request body for `POST /api/v1/events`.
#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(
        required(message = "Title is required"),
        length(min = 2, message = "Title must be at least 2 characters")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Venue is required"),
        length(min = 2, message = "Venue must be at least 2 characters")
    )]
    pub venue: Option<String>,
    /// `YYYY-MM-DD`.
    #[validate(
        required(message = "Date is required"),
        custom(function = "validate_iso_date")
    )]
    pub date: Option<String>,
    /// `HH:mm`, 24-hour clock.
    #[validate(
        required(message = "Time is required"),
        custom(function = "validate_hh_mm")
    )]
    pub time: Option<String>,
    #[validate(
        required(message = "Organizer is required"),
        length(min = 2, message = "Organizer must be at least 2 characters")
    )]
    pub organizer: Option<String>,
    #[validate(
        required(message = "Agenda is required"),
        length(min = 2, message = "Agenda must be at least 2 characters")
    )]
    pub agenda: Option<String>,
    /// Defaults to an empty list.
    #[validate(custom(function = "validate_email_list"))]
    pub attendees: Option<Vec<String>>,
}

impl OrderedValidate for CreateEventRequest {
    const FIELD_ORDER: &'static [&'static str] = EVENT_FIELDS;
}

impl TryFrom<CreateEventRequest> for NewEvent {
    type Error = CyncityError;

    fn try_from(req: CreateEventRequest) -> Result<Self> {
        req.validate_ordered()?;
        Ok(Self {
            title: required(req.title, "title")?,
            venue: required(req.venue, "venue")?,
            date: required(req.date, "date")?,
            time: required(req.time, "time")?,
            organizer: required(req.organizer, "organizer")?,
            agenda: required(req.agenda, "agenda")?,
            attendees: req.attendees.unwrap_or_default(),
        })
    }
}

/// Request body for `PATCH /api/v1/events/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 2, message = "Title must be at least 2 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 2, message = "Venue must be at least 2 characters"))]
    pub venue: Option<String>,
    #[validate(custom(function = "validate_iso_date"))]
    pub date: Option<String>,
    #[validate(custom(function = "validate_hh_mm"))]
    pub time: Option<String>,
    #[validate(length(min = 2, message = "Organizer must be at least 2 characters"))]
    pub organizer: Option<String>,
    #[validate(length(min = 2, message = "Agenda must be at least 2 characters"))]
    pub agenda: Option<String>,
    /// Replaces the whole attendee list.
    #[validate(custom(function = "validate_email_list"))]
    pub attendees: Option<Vec<String>>,
}

impl OrderedValidate for UpdateEventRequest {
    const FIELD_ORDER: &'static [&'static str] = EVENT_FIELDS;
}

impl TryFrom<UpdateEventRequest> for EventPatch {
    type Error = CyncityError;

    fn try_from(req: UpdateEventRequest) -> Result<Self> {
        req.validate_ordered()?;
        Ok(Self {
            title: req.title,
            venue: req.venue,
            date: req.date,
            time: req.time,
            organizer: req.organizer,
            agenda: req.agenda,
            attendees: req.attendees,
        })
    }
}

/// Request body for `POST /api/v1/events/{id}/attendees`.
#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
pub struct AddAttendeeRequest {
    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: Option<String>,
}

impl OrderedValidate for AddAttendeeRequest {
    const FIELD_ORDER: &'static [&'static str] = &["email"];
}

impl AddAttendeeRequest {
    /// Validated, normalized attendee email.
    pub fn into_email(self) -> Result<String> {
        let trimmed = Self {
            email: self.email.map(|e| e.trim().to_string()),
        };
        trimmed.validate_ordered()?;
        required(trimmed.email, "email").map(|e| normalize_email(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create(json: serde_json::Value) -> Result<NewEvent> {
        let req: CreateEventRequest = serde_json::from_value(json).expect("deserialize");
        NewEvent::try_from(req)
    }

    fn base() -> serde_json::Value {
        serde_json::json!({
            "title": "Health Fair",
            "venue": "Civic Center",
            "date": "2026-11-02",
            "time": "09:30",
            "organizer": "City Health",
            "agenda": "Screenings"
        })
    }

    #[test]
    fn attendees_default_to_empty() {
        let event = create(base()).unwrap();
        assert_eq!(event.attendees, Vec::<String>::new());
    }

    #[test]
    fn attendees_keep_supplied_order() {
        let mut json = base();
        json["attendees"] = serde_json::json!(["c@example.com", "a@example.com", "b@example.com"]);
        let event = create(json).unwrap();
        assert_eq!(
            event.attendees,
            vec!["c@example.com", "a@example.com", "b@example.com"]
        );
    }

    #[test]
    fn bad_attendee_is_named() {
        let mut json = base();
        json["attendees"] = serde_json::json!(["ok@example.com", "broken"]);
        let err = create(json).unwrap_err();
        assert_eq!(err.public_message(), "Invalid attendee email: broken");
    }

    #[test]
    fn date_checked_before_time() {
        let mut json = base();
        json["date"] = serde_json::json!("02/11/2026");
        json["time"] = serde_json::json!("9am");
        let err = create(json).unwrap_err();
        assert_eq!(
            err.public_message(),
            "Date must be an ISO date (YYYY-MM-DD)"
        );
    }

    #[test]
    fn update_with_only_time() {
        let req: UpdateEventRequest =
            serde_json::from_value(serde_json::json!({ "time": "18:45" })).unwrap();
        let patch = EventPatch::try_from(req).unwrap();
        assert_eq!(patch.time.as_deref(), Some("18:45"));
        assert!(patch.title.is_none());
    }

    #[test]
    fn attendee_email_is_normalized() {
        let req = AddAttendeeRequest {
            email: Some("  Guest@Example.com ".to_string()),
        };
        assert_eq!(req.into_email().unwrap(), "guest@example.com");

        let err = AddAttendeeRequest::default().into_email().unwrap_err();
        assert_eq!(err.public_message(), "Email is required");
    }
}
