use serde::{Deserialize, Serialize};

/// A scheduled community event with its RSVP list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub venue: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Local start time, `HH:mm`.
    pub time: String,
    pub organizer: String,
    pub agenda: String,
    pub attendees: Vec<String>,
}

impl Event {
    pub fn apply(&mut self, patch: EventPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(venue) = patch.venue {
            self.venue = venue;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(organizer) = patch.organizer {
            self.organizer = organizer;
        }
        if let Some(agenda) = patch.agenda {
            self.agenda = agenda;
        }
        if let Some(attendees) = patch.attendees {
            self.attendees = attendees;
        }
    }

    pub fn has_attendee(&self, email: &str) -> bool {
        self.attendees.iter().any(|a| a.eq_ignore_ascii_case(email))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub venue: String,
    pub date: String,
    pub time: String,
    pub organizer: String,
    pub agenda: String,
    pub attendees: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub venue: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub organizer: Option<String>,
    pub agenda: Option<String>,
    pub attendees: Option<Vec<String>>,
}
