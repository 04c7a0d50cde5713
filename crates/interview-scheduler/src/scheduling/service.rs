use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Duration, NaiveDate};
use mockable::{Clock, DefaultClock};
use tracing::{debug, info, warn};

use super::conflicts::ConflictChecker;
use super::domain::{
    ApplicantId, BookingKey, Interview, InterviewId, InterviewStatus, ScheduleRequest,
    TransitionError,
};
use super::presentation;
use super::repository::{
    InterviewNotice, InterviewNotifier, InterviewRepository, NoticeKind, RepositoryError,
};
use super::slots::{SlotCatalog, SlotTime};
use super::validation::{validate_request, ValidationError};
use crate::config::SchedulingConfig;

/// Service composing validation, conflict checking, the interview store, and
/// the outbound notifier.
///
/// Mutations on one service run under `writer`. The final slot check happens
/// inside the repository's `insert_if_free`, so services sharing a store
/// still never double-book.
pub struct InterviewSchedulingService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    catalog: SlotCatalog,
    config: SchedulingConfig,
    clock: Arc<dyn Clock + Send + Sync>,
    writer: Mutex<()>,
}

static INTERVIEW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_interview_id() -> InterviewId {
    let id = INTERVIEW_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    InterviewId(format!("int-{id:06}"))
}

impl<R, N> InterviewSchedulingService<R, N>
where
    R: InterviewRepository + 'static,
    N: InterviewNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, config: SchedulingConfig) -> Self {
        Self::with_clock(repository, notifier, config, Arc::new(DefaultClock))
    }

    pub fn with_clock(
        repository: Arc<R>,
        notifier: Arc<N>,
        config: SchedulingConfig,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            repository,
            notifier,
            catalog: SlotCatalog::business_hours(),
            config,
            clock,
            writer: Mutex::new(()),
        }
    }

    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }

    /// Current calendar day in the service's local time zone.
    pub fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    /// Validate, conflict-check, and record a new booking in `scheduled`
    /// state. Nothing is stored when any step fails.
    pub fn schedule(&self, request: ScheduleRequest) -> Result<Interview, SchedulingError> {
        let validated = validate_request(&request, self.today()).map_err(|error| {
            debug!(kind = error.kind(), applicant = %request.applicant_id, "schedule request rejected");
            error
        })?;

        if self.config.enforce_slot_grid && !self.catalog.contains(validated.time) {
            debug!(time = %validated.time, "off-grid time rejected");
            return Err(ValidationError::OffGridTime {
                time: validated.time,
            }
            .into());
        }

        let guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let checker = ConflictChecker::new(self.repository.as_ref());
        if checker.has_conflict(validated.date, validated.time)? {
            debug!(date = %validated.date, time = %validated.time, "slot already taken");
            return Err(SchedulingError::SlotTaken {
                date: validated.date,
                time: validated.time,
            });
        }

        let now = self.clock.utc();
        let interview = Interview {
            id: next_interview_id(),
            applicant_id: validated.applicant_id,
            date: validated.date,
            time: validated.time,
            status: InterviewStatus::Scheduled,
            interview_type: validated.interview_type,
            notes: validated.notes,
            location: validated.location,
            created_at: now,
            updated_at: now,
        };

        let (date, time) = (interview.date, interview.time);
        let Some(stored) = self.repository.insert_if_free(interview)? else {
            debug!(%date, %time, "slot taken by a concurrent booking");
            return Err(SchedulingError::SlotTaken { date, time });
        };
        drop(guard);

        info!(
            interview = %stored.id,
            applicant = %stored.applicant_id,
            date = %stored.date,
            time = %stored.time,
            interview_type = %stored.interview_type,
            "interview scheduled"
        );
        self.publish(NoticeKind::Scheduled, &stored);

        Ok(stored)
    }

    /// Cancel the booking `key` addresses. Unknown or already-terminal
    /// bookings are a no-op returning `false`.
    pub fn cancel(&self, key: &BookingKey) -> Result<bool, SchedulingError> {
        let guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        match self.repository.resolve(key)? {
            Some(current) if !current.status.is_terminal() => {}
            _ => return Ok(false),
        }

        let Some(cancelled) =
            self.repository
                .update_status(key, InterviewStatus::Cancelled, self.clock.utc())?
        else {
            return Ok(false);
        };
        drop(guard);

        info!(interview = %cancelled.id, applicant = %cancelled.applicant_id, "interview cancelled");
        self.publish(NoticeKind::Cancelled, &cancelled);
        Ok(true)
    }

    /// Move the addressed booking to `status`. Unknown keys yield `None`;
    /// illegal transitions are errors and leave the record untouched.
    pub fn update_status(
        &self,
        key: &BookingKey,
        status: InterviewStatus,
    ) -> Result<Option<Interview>, SchedulingError> {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let updated = self
            .repository
            .update_status(key, status, self.clock.utc())?;

        if let Some(interview) = &updated {
            info!(interview = %interview.id, status = %interview.status, "interview status updated");
        }
        Ok(updated)
    }

    pub fn complete(&self, key: &BookingKey) -> Result<Option<Interview>, SchedulingError> {
        self.update_status(key, InterviewStatus::Completed)
    }

    /// Grid slots on `date` not held by a scheduled interview, recomputed on
    /// every call.
    pub fn available_slots(&self, date: NaiveDate) -> Result<Vec<SlotTime>, SchedulingError> {
        Ok(self.repository.available_slots(&self.catalog, date)?)
    }

    pub fn find_by_applicant(
        &self,
        applicant: &ApplicantId,
    ) -> Result<Vec<Interview>, SchedulingError> {
        let applicant = ApplicantId::new(&applicant.0);
        Ok(self.repository.find_by_applicant(&applicant)?)
    }

    pub fn find_scheduled(&self) -> Result<Vec<Interview>, SchedulingError> {
        Ok(self.repository.find_scheduled()?)
    }

    /// `preferred` when it is still free on `date`, else the first free slot.
    pub fn suggest_slot(
        &self,
        date: NaiveDate,
        preferred: Option<SlotTime>,
    ) -> Result<Option<SlotTime>, SchedulingError> {
        let available = self.available_slots(date)?;
        if let Some(preferred) = preferred.filter(|slot| available.contains(slot)) {
            return Ok(Some(preferred));
        }
        Ok(available.first().copied())
    }

    /// Tomorrow, at the grid slot at or after the current time of day; the
    /// opening slot when that falls outside business hours.
    pub fn default_selection(&self) -> (NaiveDate, SlotTime) {
        let now = self.clock.local();
        let tomorrow = now.date_naive() + Duration::days(1);
        let time = self
            .catalog
            .next_slot_at_or_after(SlotTime::from_time(now.time()))
            .unwrap_or_else(|| self.catalog.opening());
        (tomorrow, time)
    }

    pub fn summarize(&self, interview: &Interview) -> String {
        presentation::summarize(interview)
    }

    fn publish(&self, kind: NoticeKind, interview: &Interview) {
        let notice = InterviewNotice {
            kind,
            interview_id: interview.id.clone(),
            applicant_id: interview.applicant_id.clone(),
            summary: match kind {
                NoticeKind::Scheduled => presentation::summarize(interview),
                NoticeKind::Cancelled => presentation::cancellation_summary(interview),
            },
        };

        // The booking is already committed; a failed notice is only reported.
        if let Err(error) = self.notifier.notify(notice) {
            warn!(interview = %interview.id, %error, "interview notification failed");
        }
    }
}

/// Error raised by the scheduling service.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("the {time} slot on {date} is already booked, select a different time")]
    SlotTaken { date: NaiveDate, time: SlotTime },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl SchedulingError {
    pub fn kind(&self) -> &'static str {
        match self {
            SchedulingError::Validation(error) => error.kind(),
            SchedulingError::SlotTaken { .. } => "slot_taken",
            SchedulingError::Repository(RepositoryError::Transition(_)) => "invalid_transition",
            SchedulingError::Repository(RepositoryError::Unavailable(_)) => "repository_unavailable",
        }
    }

    pub fn transition(&self) -> Option<&TransitionError> {
        match self {
            SchedulingError::Repository(RepositoryError::Transition(error)) => Some(error),
            _ => None,
        }
    }
}
