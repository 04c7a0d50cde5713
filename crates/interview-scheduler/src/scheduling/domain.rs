use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::slots::SlotTime;

/// Opaque identifier of the candidate an interview belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

impl ApplicantId {
    /// Applicant ids are stored trimmed; surrounding whitespace never
    /// distinguishes two candidates.
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    fn is(&self, other: &ApplicantId) -> bool {
        self.0.trim() == other.0.trim()
    }
}

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Engine-assigned identifier for a single booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterviewId(pub String);

impl fmt::Display for InterviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lookup key for status transitions.
///
/// An applicant key resolves to that applicant's most recent scheduled
/// interview, or their most recent interview when none is active.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BookingKey {
    Applicant(ApplicantId),
    Interview(InterviewId),
}

impl BookingKey {
    pub fn applicant(id: impl Into<String>) -> Self {
        Self::Applicant(ApplicantId::new(&id.into()))
    }

    pub fn interview(id: impl Into<String>) -> Self {
        Self::Interview(InterviewId(id.into()))
    }
}

/// Lifecycle state of a booking. `Scheduled` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, InterviewStatus::Scheduled)
    }

    pub const fn can_transition_to(self, next: InterviewStatus) -> bool {
        matches!(
            (self, next),
            (
                InterviewStatus::Scheduled,
                InterviewStatus::Completed | InterviewStatus::Cancelled
            )
        )
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewType {
    Phone,
    Video,
    #[default]
    InPerson,
}

impl InterviewType {
    pub const fn label(self) -> &'static str {
        match self {
            InterviewType::Phone => "phone",
            InterviewType::Video => "video",
            InterviewType::InPerson => "in-person",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a status change would leave a terminal state or re-enter
/// `scheduled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move interview from {from} to {to}")]
pub struct TransitionError {
    pub from: InterviewStatus,
    pub to: InterviewStatus,
}

/// A booked interview. Only the interview store mutates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    pub id: InterviewId,
    pub applicant_id: ApplicantId,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub status: InterviewStatus,
    pub interview_type: InterviewType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Interview {
    /// True when this booking actively holds `(date, time)`.
    pub fn holds(&self, date: NaiveDate, time: SlotTime) -> bool {
        self.status == InterviewStatus::Scheduled && self.date == date && self.time == time
    }

    pub fn belongs_to(&self, applicant: &ApplicantId) -> bool {
        self.applicant_id.is(applicant)
    }

    pub fn matches(&self, key: &BookingKey) -> bool {
        match key {
            BookingKey::Applicant(applicant) => self.applicant_id.is(applicant),
            BookingKey::Interview(id) => &self.id == id,
        }
    }

    pub fn transition(
        &mut self,
        next: InterviewStatus,
        at: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        if !self.status.can_transition_to(next) {
            return Err(TransitionError {
                from: self.status,
                to: next,
            });
        }

        self.status = next;
        self.updated_at = at;
        Ok(())
    }
}

/// `null` reads as an absent value so the validator reports it as missing.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw scheduling request as submitted by a caller; validated before use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub applicant_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub interview_type: Option<InterviewType>,
}

impl ScheduleRequest {
    pub fn new(
        applicant_id: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            applicant_id: applicant_id.into(),
            date: date.into(),
            time: time.into(),
            ..Self::default()
        }
    }
}
