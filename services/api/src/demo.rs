use crate::infra::{parse_date, parse_slot};
use chrono::NaiveDate;
use clap::Args;
use interview_scheduler::config::SchedulingConfig;
use interview_scheduler::error::AppError;
use interview_scheduler::scheduling::{
    format_date, BookingKey, InMemoryInterviewStore, InterviewNotice, InterviewNotifier,
    InterviewSchedulingService, NoticeKind, NotifierError, ScheduleRequest, SilentNotifier,
    SlotTime,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SlotsArgs {
    /// Interview date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: NaiveDate,
    /// Times already booked on that date (HH:MM); repeat for several
    #[arg(long, value_parser = parse_slot)]
    pub(crate) booked: Vec<SlotTime>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Interview date (YYYY-MM-DD). Defaults to tomorrow.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Interview time (HH:MM). Defaults to the next slot after now.
    #[arg(long, value_parser = parse_slot)]
    pub(crate) time: Option<SlotTime>,
}

/// Prints each notice the engine emits so the demo shows the hand-off.
struct ConsoleNotifier;

impl InterviewNotifier for ConsoleNotifier {
    fn notify(&self, notice: InterviewNotice) -> Result<(), NotifierError> {
        let label = match notice.kind {
            NoticeKind::Scheduled => "confirmation",
            NoticeKind::Cancelled => "cancellation",
        };
        println!(
            "  -> {label} for {} ({}): {}",
            notice.applicant_id, notice.interview_id, notice.summary
        );
        Ok(())
    }
}

pub(crate) fn run_slots(args: SlotsArgs) -> Result<(), AppError> {
    let SlotsArgs { date, booked } = args;

    let service = InterviewSchedulingService::new(
        Arc::new(InMemoryInterviewStore::new()),
        Arc::new(SilentNotifier),
        SchedulingConfig::default(),
    );

    for (idx, time) in booked.iter().enumerate() {
        let request =
            ScheduleRequest::new(format!("booked-{idx}"), date.to_string(), time.to_string());
        if let Err(err) = service.schedule(request) {
            println!("Skipping booked time {time}: {err}");
        }
    }

    let slots = match service.available_slots(date) {
        Ok(slots) => slots,
        Err(err) => {
            println!("Availability unavailable: {err}");
            return Ok(());
        }
    };

    println!("Available interview slots for {}", format_date(date));
    if slots.is_empty() {
        println!("- none");
        return Ok(());
    }
    let listing: Vec<String> = slots.iter().map(ToString::to_string).collect();
    for row in listing.chunks(8) {
        println!("  {}", row.join("  "));
    }
    println!("{} of {} slots free", slots.len(), service.catalog().all_slots().len());

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = InterviewSchedulingService::new(
        Arc::new(InMemoryInterviewStore::new()),
        Arc::new(ConsoleNotifier),
        SchedulingConfig::default(),
    );

    let (default_date, default_time) = service.default_selection();
    let date = args.date.unwrap_or(default_date);
    let time = args.time.unwrap_or(default_time);

    println!("Interview scheduling demo for {}", format_date(date));

    println!("\n1. Employer books candidate a1 at {time}");
    let mut request = ScheduleRequest::new("a1", date.to_string(), time.to_string());
    request.location = Some("Head office, room 2".to_string());
    let first = match service.schedule(request) {
        Ok(interview) => interview,
        Err(err) => {
            println!("  Booking rejected: {err}");
            return Ok(());
        }
    };
    println!("  {}", service.summarize(&first));

    println!("\n2. A second candidate asks for the same slot");
    match service.schedule(ScheduleRequest::new("a2", date.to_string(), time.to_string())) {
        Ok(interview) => println!("  Unexpectedly booked {}", interview.id),
        Err(err) => println!("  Rejected ({}): {err}", err.kind()),
    }
    match service.suggest_slot(date, Some(time)) {
        Ok(Some(alternative)) => println!("  Next free slot to offer: {alternative}"),
        Ok(None) => println!("  No free slots left on this date"),
        Err(err) => println!("  Availability unavailable: {err}"),
    }

    println!("\n3. Malformed request");
    match service.schedule(ScheduleRequest::new("a3", date.to_string(), "25:99")) {
        Ok(interview) => println!("  Unexpectedly booked {}", interview.id),
        Err(err) => println!("  Rejected ({}): {err}", err.kind()),
    }

    println!("\n4. Candidate a1 cancels");
    let key = BookingKey::applicant("a1");
    match service.cancel(&key) {
        Ok(cancelled) => println!("  cancelled: {cancelled}"),
        Err(err) => println!("  Cancellation failed: {err}"),
    }
    match service.cancel(&key) {
        Ok(cancelled) => println!("  cancelling again: {cancelled}"),
        Err(err) => println!("  Cancellation failed: {err}"),
    }

    println!("\n5. Slot {time} is free again, a2 retries");
    match service.schedule(ScheduleRequest::new("a2", date.to_string(), time.to_string())) {
        Ok(interview) => println!("  {}", service.summarize(&interview)),
        Err(err) => println!("  Rejected ({}): {err}", err.kind()),
    }

    match service.find_scheduled() {
        Ok(active) => println!("\nActive bookings: {}", active.len()),
        Err(err) => println!("\nActive bookings unavailable: {err}"),
    }

    Ok(())
}
