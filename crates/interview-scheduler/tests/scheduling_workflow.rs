//! End-to-end booking scenarios driven through the public service facade:
//! booking, conflicts, availability, and cancellation without reaching into
//! private modules.

mod common {
    use std::sync::Arc;

    use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
    use interview_scheduler::config::SchedulingConfig;
    use interview_scheduler::scheduling::{
        InMemoryInterviewStore, InterviewSchedulingService, ScheduleRequest, SilentNotifier,
    };
    use mockable::Clock;

    pub(super) struct FixedClock(DateTime<Local>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0.with_timezone(&Utc)
        }
    }

    pub(super) fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).expect("valid date")
    }

    pub(super) fn tomorrow() -> NaiveDate {
        today().succ_opt().expect("valid date")
    }

    pub(super) fn service() -> InterviewSchedulingService<InMemoryInterviewStore, SilentNotifier> {
        let instant = today().and_hms_opt(8, 30, 0).expect("valid time");
        let local = Local
            .from_local_datetime(&instant)
            .earliest()
            .expect("instant exists locally");

        InterviewSchedulingService::with_clock(
            Arc::new(InMemoryInterviewStore::new()),
            Arc::new(SilentNotifier),
            SchedulingConfig::default(),
            Arc::new(FixedClock(local)),
        )
    }

    pub(super) fn request(applicant: &str, time: &str) -> ScheduleRequest {
        ScheduleRequest::new(applicant, tomorrow().to_string(), time)
    }
}

use common::*;
use interview_scheduler::scheduling::{
    summarize, ApplicantId, BookingKey, InterviewStatus, SchedulingError, SlotCatalog, SlotTime,
    ValidationError,
};

fn strings(slots: &[SlotTime]) -> Vec<String> {
    slots.iter().map(ToString::to_string).collect()
}

#[test]
fn happy_path_then_cancellation_frees_slot() {
    let service = service();

    let first = service
        .schedule(request("a1", "10:00"))
        .expect("free slot books");
    assert_eq!(first.status, InterviewStatus::Scheduled);

    let duplicate = service.schedule(request("a2", "10:00"));
    assert!(matches!(duplicate, Err(SchedulingError::SlotTaken { .. })));

    let available = strings(&service.available_slots(tomorrow()).expect("query"));
    assert!(!available.contains(&"10:00".to_string()));
    assert!(available.contains(&"10:15".to_string()));

    assert!(service
        .cancel(&BookingKey::applicant("a1"))
        .expect("cancel succeeds"));
    let rebooked = service
        .schedule(request("a2", "10:00"))
        .expect("released slot books again");
    assert_eq!(rebooked.applicant_id, ApplicantId("a2".to_string()));
}

#[test]
fn availability_equals_grid_minus_scheduled_times() {
    let service = service();
    for (applicant, time) in [("a1", "09:00"), ("a2", "12:30"), ("a3", "17:00")] {
        service
            .schedule(request(applicant, time))
            .expect("distinct slots book");
    }
    service
        .cancel(&BookingKey::applicant("a2"))
        .expect("cancel succeeds");

    let expected: Vec<SlotTime> = SlotCatalog::business_hours()
        .all_slots()
        .into_iter()
        .filter(|slot| !["09:00", "17:00"].contains(&slot.to_string().as_str()))
        .collect();
    assert_eq!(service.available_slots(tomorrow()).expect("query"), expected);
}

#[test]
fn never_more_than_one_scheduled_per_slot() {
    let service = service();
    let times = ["10:00", "10:00", "10:15", "10:00", "10:15", "11:00"];

    for (idx, time) in times.iter().enumerate() {
        let _ = service.schedule(request(&format!("a{idx}"), time));
        if idx % 2 == 1 {
            let _ = service.cancel(&BookingKey::applicant(format!("a{}", idx - 1)));
        }

        let scheduled = service.find_scheduled().expect("query");
        let mut pairs: Vec<_> = scheduled
            .iter()
            .map(|interview| (interview.date, interview.time))
            .collect();
        let total = pairs.len();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), total, "double booking after step {idx}");
    }
}

#[test]
fn malformed_time_creates_no_record() {
    let service = service();
    let result = service.schedule(request("a1", "25:99"));
    assert!(matches!(
        result,
        Err(SchedulingError::Validation(ValidationError::InvalidTimeFormat))
    ));
    assert!(service
        .find_by_applicant(&ApplicantId("a1".to_string()))
        .expect("query")
        .is_empty());
}

#[test]
fn past_date_is_always_rejected() {
    let service = service();
    let mut request = request("a1", "10:00");
    request.date = "2000-01-01".to_string();

    match service.schedule(request) {
        Err(SchedulingError::Validation(ValidationError::PastDate)) => {}
        other => panic!("expected past date rejection, got {other:?}"),
    }
}

#[test]
fn summary_reads_naturally() {
    let service = service();
    let interview = service
        .schedule(request("a1", "14:45"))
        .expect("booking");
    assert_eq!(
        summarize(&interview),
        "Interview scheduled for Friday, October 16, 2026 at 14:45"
    );
    assert_eq!(service.summarize(&interview), summarize(&interview));
}
