use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;

use crate::config::SchedulingConfig;
use crate::scheduling::domain::{
    ApplicantId, BookingKey, Interview, InterviewStatus, ScheduleRequest,
};
use crate::scheduling::repository::{
    InterviewNotice, InterviewNotifier, InterviewRepository, NotifierError, RepositoryError,
};
use crate::scheduling::store::InMemoryInterviewStore;
use crate::scheduling::{interview_router, InterviewSchedulingService};

/// Clock pinned to a local wall-clock instant so "today" does not depend on
/// the machine's time zone.
pub(super) struct FixtureClock {
    local: DateTime<Local>,
}

impl FixtureClock {
    pub(super) fn at(naive: NaiveDateTime) -> Self {
        let local = Local
            .from_local_datetime(&naive)
            .earliest()
            .expect("fixture instant exists locally");
        Self { local }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.local
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local.with_timezone(&Utc)
    }
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 15).expect("valid date")
}

pub(super) fn tomorrow() -> NaiveDate {
    today().succ_opt().expect("valid date")
}

pub(super) fn fixture_clock() -> Arc<FixtureClock> {
    Arc::new(FixtureClock::at(
        today().and_hms_opt(14, 7, 0).expect("valid time"),
    ))
}

pub(super) fn request(applicant: &str, date: NaiveDate, time: &str) -> ScheduleRequest {
    ScheduleRequest::new(applicant, date.to_string(), time)
}

pub(super) fn build_service() -> (
    InterviewSchedulingService<InMemoryInterviewStore, MemoryNotifier>,
    Arc<InMemoryInterviewStore>,
    Arc<MemoryNotifier>,
) {
    build_service_with(SchedulingConfig::default())
}

pub(super) fn build_service_with(
    config: SchedulingConfig,
) -> (
    InterviewSchedulingService<InMemoryInterviewStore, MemoryNotifier>,
    Arc<InMemoryInterviewStore>,
    Arc<MemoryNotifier>,
) {
    let store = Arc::new(InMemoryInterviewStore::new());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = InterviewSchedulingService::with_clock(
        store.clone(),
        notifier.clone(),
        config,
        fixture_clock(),
    );
    (service, store, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    notices: Arc<Mutex<Vec<InterviewNotice>>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<InterviewNotice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

impl InterviewNotifier for MemoryNotifier {
    fn notify(&self, notice: InterviewNotice) -> Result<(), NotifierError> {
        self.notices
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl InterviewNotifier for FailingNotifier {
    fn notify(&self, _notice: InterviewNotice) -> Result<(), NotifierError> {
        Err(NotifierError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl InterviewRepository for UnavailableRepository {
    fn insert(&self, _interview: Interview) -> Result<Interview, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_if_free(&self, _interview: Interview) -> Result<Option<Interview>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_applicant(
        &self,
        _applicant: &ApplicantId,
    ) -> Result<Vec<Interview>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_scheduled(&self) -> Result<Vec<Interview>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn resolve(&self, _key: &BookingKey) -> Result<Option<Interview>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_status(
        &self,
        _key: &BookingKey,
        _status: InterviewStatus,
        _at: DateTime<Utc>,
    ) -> Result<Option<Interview>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn router_with_service(
    service: InterviewSchedulingService<InMemoryInterviewStore, MemoryNotifier>,
) -> axum::Router {
    interview_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
