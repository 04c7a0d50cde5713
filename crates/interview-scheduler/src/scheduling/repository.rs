use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::conflicts::occupied_times;
use super::domain::{
    ApplicantId, BookingKey, Interview, InterviewId, InterviewStatus, TransitionError,
};
use super::slots::{SlotCatalog, SlotTime};

/// Storage abstraction over the interview collection so a durable backing
/// can replace the in-memory store without touching the service.
///
/// `insert` appends unconditionally. `insert_if_free` must check and write
/// as one step against the shared collection, so every service built over
/// the same backing sees a single booking per slot.
pub trait InterviewRepository: Send + Sync {
    fn insert(&self, interview: Interview) -> Result<Interview, RepositoryError>;
    /// Stores `interview` unless a scheduled record already holds its
    /// `(date, time)`; `Ok(None)` when the slot is taken.
    fn insert_if_free(&self, interview: Interview) -> Result<Option<Interview>, RepositoryError>;
    fn find_by_applicant(&self, applicant: &ApplicantId)
        -> Result<Vec<Interview>, RepositoryError>;
    fn find_scheduled(&self) -> Result<Vec<Interview>, RepositoryError>;
    fn resolve(&self, key: &BookingKey) -> Result<Option<Interview>, RepositoryError>;
    fn update_status(
        &self,
        key: &BookingKey,
        status: InterviewStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Interview>, RepositoryError>;

    fn scheduled_on(&self, date: NaiveDate) -> Result<Vec<Interview>, RepositoryError> {
        let mut scheduled = self.find_scheduled()?;
        scheduled.retain(|interview| interview.date == date);
        Ok(scheduled)
    }

    /// Catalog grid minus the times held by scheduled interviews on `date`.
    fn available_slots(
        &self,
        catalog: &SlotCatalog,
        date: NaiveDate,
    ) -> Result<Vec<SlotTime>, RepositoryError> {
        let booked = self.scheduled_on(date)?;
        let taken = occupied_times(&booked, date);
        Ok(catalog
            .all_slots()
            .into_iter()
            .filter(|slot| !taken.contains(slot))
            .collect())
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for confirmation and cancellation messages (e-mail, push,
/// calendar adapters).
pub trait InterviewNotifier: Send + Sync {
    fn notify(&self, notice: InterviewNotice) -> Result<(), NotifierError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Scheduled,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewNotice {
    pub kind: NoticeKind,
    pub interview_id: InterviewId,
    pub applicant_id: ApplicantId,
    pub summary: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Notifier that drops every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl InterviewNotifier for SilentNotifier {
    fn notify(&self, _notice: InterviewNotice) -> Result<(), NotifierError> {
        Ok(())
    }
}
