use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::{is_valid_email, AppError};

/// Length assumed for a session the API stores without one.
pub const DEFAULT_SESSION_MINUTES: u32 = 60;

fn default_duration() -> u32 {
    DEFAULT_SESSION_MINUTES
}

/// Persisted session status. "Completed" is derived, see [`Session::is_completed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Accepted => "accepted",
            SessionStatus::Rejected => "rejected",
        }
    }

    /// Pending sessions move to accepted or rejected exactly once. An accepted
    /// session may be "accepted" again to replace its meeting link.
    pub fn allows(&self, next: SessionStatus) -> bool {
        matches!(
            (self, next),
            (SessionStatus::Pending, SessionStatus::Accepted)
                | (SessionStatus::Pending, SessionStatus::Rejected)
                | (SessionStatus::Accepted, SessionStatus::Accepted)
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(SessionStatus::Pending),
            "accepted" | "accept" => Ok(SessionStatus::Accepted),
            "rejected" | "reject" => Ok(SessionStatus::Rejected),
            other => Err(format!(
                "Unknown session status '{}' (expected pending, accepted or rejected)",
                other
            )),
        }
    }
}

/// Anonymous mentee contact details attached to a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requester {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// The API returns either the bare volunteer id or a populated summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VolunteerRef {
    Id(String),
    Summary(VolunteerSummary),
}

impl VolunteerRef {
    pub fn id(&self) -> &str {
        match self {
            VolunteerRef::Id(id) => id,
            VolunteerRef::Summary(summary) => &summary.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(alias = "volunteerId")]
    pub volunteer: VolunteerRef,
    #[serde(rename = "user", alias = "userData")]
    pub requester: Requester,
    #[serde(default)]
    pub topic: String,
    pub scheduled_for: DateTime<Utc>,
    pub status: SessionStatus,
    /// Minutes.
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meet_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Accepted and already in the past.
    pub fn is_completed(&self, now: DateTime<Utc>) -> bool {
        self.status == SessionStatus::Accepted && self.scheduled_for < now
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status == SessionStatus::Accepted && self.scheduled_for >= now
    }
}

/// Body of `POST /sessions/book`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub volunteer_id: String,
    #[serde(rename = "userData")]
    pub requester: Requester,
    pub scheduled_for: DateTime<Utc>,
    pub topic: String,
}

impl BookingRequest {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        let fail = |msg: &str| Err(AppError::Validation(msg.to_string()));

        if self.volunteer_id.trim().is_empty() {
            return fail("Please choose a mentor");
        }
        if self.requester.name.trim().is_empty() {
            return fail("Name is required");
        }
        if !is_valid_email(&self.requester.email) {
            return fail("A valid email is required");
        }
        if self.topic.trim().is_empty() {
            return fail("Topic is required");
        }
        if self.scheduled_for < now {
            return fail("Preferred date and time must be in the future");
        }
        Ok(())
    }
}

/// Body of `PUT /sessions/:id/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusUpdate {
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meet_link: Option<String>,
}

impl SessionStatusUpdate {
    pub fn accept(meet_link: String) -> Self {
        SessionStatusUpdate {
            status: SessionStatus::Accepted,
            meet_link: Some(meet_link),
        }
    }

    pub fn reject() -> Self {
        SessionStatusUpdate {
            status: SessionStatus::Rejected,
            meet_link: None,
        }
    }
}

/// Tab a session is shown under on the volunteer dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionBucket {
    Pending,
    Upcoming,
    Completed,
    Rejected,
}

impl SessionBucket {
    pub fn of(session: &Session, now: DateTime<Utc>) -> SessionBucket {
        match session.status {
            SessionStatus::Pending => SessionBucket::Pending,
            SessionStatus::Rejected => SessionBucket::Rejected,
            SessionStatus::Accepted if session.scheduled_for < now => SessionBucket::Completed,
            SessionStatus::Accepted => SessionBucket::Upcoming,
        }
    }
}

/// Sessions partitioned into the four dashboard tabs; each session lands in exactly one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionBuckets {
    pub pending: Vec<Session>,
    pub upcoming: Vec<Session>,
    pub completed: Vec<Session>,
    pub rejected: Vec<Session>,
}

impl SessionBuckets {
    pub fn partition(sessions: &[Session], now: DateTime<Utc>) -> Self {
        let mut buckets = SessionBuckets::default();
        for session in sessions {
            let target = match SessionBucket::of(session, now) {
                SessionBucket::Pending => &mut buckets.pending,
                SessionBucket::Upcoming => &mut buckets.upcoming,
                SessionBucket::Completed => &mut buckets.completed,
                SessionBucket::Rejected => &mut buckets.rejected,
            };
            target.push(session.clone());
        }
        buckets.upcoming.sort_by_key(|s| s.scheduled_for);
        buckets.completed.sort_by(|a, b| b.scheduled_for.cmp(&a.scheduled_for));
        buckets
    }

    pub fn total(&self) -> usize {
        self.pending.len() + self.upcoming.len() + self.completed.len() + self.rejected.len()
    }

    pub fn get(&self, bucket: SessionBucket) -> &[Session] {
        match bucket {
            SessionBucket::Pending => &self.pending,
            SessionBucket::Upcoming => &self.upcoming,
            SessionBucket::Completed => &self.completed,
            SessionBucket::Rejected => &self.rejected,
        }
    }
}
